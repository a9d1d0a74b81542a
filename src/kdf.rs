//! Concat KDF (NIST SP 800-56A §5.8.1, single-step, hash-based)
//!
//! block_i = H(counter_i || Z || OtherInfo),  counter_1 = 1, u32 big-endian
//! output  = block_1 || block_2 || ...  truncated to the bytes requested
//!
//! The engine is a stream: a read that ends mid-block keeps the rest of that
//! block, and the next read continues from it.

extern crate alloc;
use alloc::vec::Vec;
use core::marker::PhantomData;

use sha2::Digest;
use zeroize::{Zeroize, Zeroizing};

pub struct ConcatKdf<'a, D: Digest> {
    secret: &'a [u8],
    other_info: &'a [u8],
    counter: u32,
    cache: Zeroizing<Vec<u8>>,
    cache_pos: usize,
    _hash: PhantomData<D>,
}

impl<'a, D: Digest> ConcatKdf<'a, D> {
    /// Start a fresh stream; the counter begins at 1.
    pub fn new(secret: &'a [u8], other_info: &'a [u8]) -> Self {
        Self {
            secret,
            other_info,
            counter: 1,
            cache: Zeroizing::new(Vec::new()),
            cache_pos: 0,
            _hash: PhantomData,
        }
    }

    /// Digest size of `D` in bytes.
    pub fn block_len() -> usize {
        <D as Digest>::output_size()
    }

    /// Counter value the next block will be hashed with.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Fill `out` with the next `out.len()` bytes of the stream.
    ///
    /// The counter wraps after 2^32 - 1 blocks; callers bound their output
    /// (see `other_info::MAX_KEY_BYTES`) far below that.
    pub fn fill(&mut self, out: &mut [u8]) {
        let mut written = self.drain_cache(out);

        while written < out.len() {
            let mut block = self.next_block();
            let take = block.len().min(out.len() - written);
            out[written..written + take].copy_from_slice(&block[..take]);
            if take < block.len() {
                self.cache.clear();
                self.cache.extend_from_slice(&block[take..]);
                self.cache_pos = 0;
            }
            block[..].zeroize();
            written += take;
        }
    }

    /// Number of hash invocations needed for `len` bytes from a fresh stream.
    pub fn blocks_for(len: usize) -> usize {
        len.div_ceil(Self::block_len())
    }

    fn drain_cache(&mut self, out: &mut [u8]) -> usize {
        let pending = &self.cache[self.cache_pos..];
        let n = pending.len().min(out.len());
        out[..n].copy_from_slice(&pending[..n]);
        self.cache_pos += n;
        if self.cache_pos == self.cache.len() {
            self.cache.zeroize();
            self.cache_pos = 0;
        }
        n
    }

    fn next_block(&mut self) -> sha2::digest::Output<D> {
        let mut hasher = D::new();
        hasher.update(self.counter.to_be_bytes());
        hasher.update(self.secret);
        hasher.update(self.other_info);
        self.counter = self.counter.wrapping_add(1);
        hasher.finalize()
    }
}

#[cfg(feature = "std")]
impl<D: Digest> std::io::Read for ConcatKdf<'_, D> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.fill(buf);
        Ok(buf.len())
    }
}

/// One-shot derivation of `len` bytes.
pub fn concat_kdf<D: Digest>(secret: &[u8], other_info: &[u8], len: usize) -> Zeroizing<Vec<u8>> {
    let mut out = Zeroizing::new(alloc::vec![0u8; len]);
    ConcatKdf::<D>::new(secret, other_info).fill(&mut out);
    out
}
