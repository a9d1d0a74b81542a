//! OtherInfo encoding (NIST SP 800-56A, RFC 7518 §4.6.2)
//!
//! Layout:
//!   AlgorithmID  = len[4] || alg
//!   PartyUInfo   = len[4] || apu
//!   PartyVInfo   = len[4] || apv
//!   SuppPubInfo  = key_bits[4]          (no length prefix)
//!   SuppPrivInfo = empty
//!
//! All integers are unsigned 32-bit big-endian.

extern crate alloc;
use alloc::vec::Vec;

use crate::error::{DeriveError, EncodingError, InvalidParameter};

/// Width of the length prefix on AlgorithmID / PartyUInfo / PartyVInfo.
pub const LENGTH_PREFIX_BYTES: usize = 4;

/// Width of SuppPubInfo (key length in bits).
pub const SUPP_PUB_INFO_BYTES: usize = 4;

/// Largest field a 32-bit length prefix can describe.
pub const MAX_FIELD_BYTES: usize = u32::MAX as usize;

/// Largest key whose bit length fits SuppPubInfo.
pub const MAX_KEY_BYTES: usize = (u32::MAX / 8) as usize;

/// Smallest well-formed OtherInfo: three empty prefixed fields + SuppPubInfo.
pub const MIN_OTHER_INFO_BYTES: usize = 3 * LENGTH_PREFIX_BYTES + SUPP_PUB_INFO_BYTES; // 16

/// Borrowed view of a parsed OtherInfo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtherInfoFields<'a> {
    pub algorithm_id: &'a [u8],
    pub party_u_info: &'a [u8],
    pub party_v_info: &'a [u8],
    pub key_bits: u32,
}

impl OtherInfoFields<'_> {
    /// Key length in bytes implied by SuppPubInfo.
    pub fn key_len(&self) -> usize {
        (self.key_bits / 8) as usize
    }
}

fn put_prefixed(out: &mut Vec<u8>, field: &'static str, data: &[u8]) -> Result<(), DeriveError> {
    let len = u32::try_from(data.len())
        .map_err(|_| InvalidParameter::FieldTooLong { field, len: data.len() })?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(data);
    Ok(())
}

/// SuppPubInfo for a key of `key_len` bytes. A zero-length key is rejected.
pub fn supp_pub_info(key_len: usize) -> Result<[u8; SUPP_PUB_INFO_BYTES], DeriveError> {
    if key_len == 0 {
        return Err(InvalidParameter::ZeroLength.into());
    }
    let bits = key_len
        .checked_mul(8)
        .and_then(|bits| u32::try_from(bits).ok())
        .ok_or(InvalidParameter::OutputTooLong {
            requested: key_len,
            max: MAX_KEY_BYTES,
        })?;
    Ok(bits.to_be_bytes())
}

/// Assemble OtherInfo for a key of `key_len` bytes.
pub fn encode_other_info(
    alg: &[u8],
    apu: &[u8],
    apv: &[u8],
    key_len: usize,
) -> Result<Vec<u8>, DeriveError> {
    let supp_pub = supp_pub_info(key_len)?;

    let mut out = Vec::with_capacity(MIN_OTHER_INFO_BYTES + alg.len() + apu.len() + apv.len());
    put_prefixed(&mut out, "AlgorithmID", alg)?;
    put_prefixed(&mut out, "PartyUInfo", apu)?;
    put_prefixed(&mut out, "PartyVInfo", apv)?;
    out.extend_from_slice(&supp_pub);
    // SuppPrivInfo is always empty for this profile.

    Ok(out)
}

fn take_prefixed<'a>(data: &mut &'a [u8]) -> Result<&'a [u8], EncodingError> {
    if data.len() < LENGTH_PREFIX_BYTES {
        return Err(EncodingError);
    }
    let (prefix, rest) = data.split_at(LENGTH_PREFIX_BYTES);
    let len = u32::from_be_bytes(prefix.try_into().map_err(|_| EncodingError)?) as usize;
    if rest.len() < len {
        return Err(EncodingError);
    }
    let (field, rest) = rest.split_at(len);
    *data = rest;
    Ok(field)
}

/// Parse OtherInfo produced by [`encode_other_info`].
///
/// Rejects truncated fields, a missing SuppPubInfo and trailing bytes
/// (SuppPrivInfo must be empty).
pub fn decode_other_info(data: &[u8]) -> Result<OtherInfoFields<'_>, EncodingError> {
    if data.len() < MIN_OTHER_INFO_BYTES {
        return Err(EncodingError);
    }

    let mut rest = data;
    let algorithm_id = take_prefixed(&mut rest)?;
    let party_u_info = take_prefixed(&mut rest)?;
    let party_v_info = take_prefixed(&mut rest)?;

    let supp_pub: [u8; SUPP_PUB_INFO_BYTES] = rest.try_into().map_err(|_| EncodingError)?;

    Ok(OtherInfoFields {
        algorithm_id,
        party_u_info,
        party_v_info,
        key_bits: u32::from_be_bytes(supp_pub),
    })
}
