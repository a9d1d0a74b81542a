//! Derived content-encryption key.

extern crate alloc;
use alloc::vec::Vec;
use core::fmt;

use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Key material returned to the caller. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: Vec<u8>,
}

impl DerivedKey {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Hand the bytes over, still wrapped for zeroization.
    pub fn into_bytes(mut self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(core::mem::take(&mut self.bytes))
    }
}

impl AsRef<[u8]> for DerivedKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl ConstantTimeEq for DerivedKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.as_slice().ct_eq(other.bytes.as_slice())
    }
}

impl PartialEq for DerivedKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for DerivedKey {}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivedKey([REDACTED; {} bytes])", self.bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn equality_is_by_content() {
        let a = DerivedKey::new(vec![1, 2, 3]);
        let b = DerivedKey::new(vec![1, 2, 3]);
        let c = DerivedKey::new(vec![1, 2, 4]);
        let d = DerivedKey::new(vec![1, 2]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn debug_hides_bytes() {
        let k = DerivedKey::new(vec![0x5A; 16]);
        assert_eq!(alloc::format!("{:?}", k), "DerivedKey([REDACTED; 16 bytes])");
    }

    #[test]
    fn into_bytes_keeps_content() {
        let k = DerivedKey::new(vec![9; 24]);
        assert_eq!(&k.into_bytes()[..], &[9u8; 24][..]);
    }
}
