//! ECDH-ES key derivation (RFC 7518 §4.6)
//!
//! other_info = AlgorithmID || PartyUInfo || PartyVInfo || SuppPubInfo
//! z          = ECDH(private_key, public_key)
//! key        = ConcatKDF-SHA256(z, other_info)[..size]

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use sha2::Sha256;

use crate::agreement::KeyAgreement;
use crate::config::DeriveConfig;
use crate::error::{DeriveError, InvalidParameter};
use crate::kdf::ConcatKdf;
use crate::key::DerivedKey;
use crate::other_info::encode_other_info;

/// SHA-256 digest size: bytes produced per KDF block.
pub const HASH_BLOCK_BYTES: usize = 32;

fn check_key_len(config: &DeriveConfig, size: usize) -> Result<(), DeriveError> {
    if size == 0 {
        return Err(InvalidParameter::ZeroLength.into());
    }
    if size > config.max_key_len() {
        return Err(InvalidParameter::OutputTooLong {
            requested: size,
            max: config.max_key_len(),
        }
        .into());
    }
    Ok(())
}

fn prepare(
    config: &DeriveConfig,
    alg: &str,
    apu: &[u8],
    apv: &[u8],
    size: usize,
) -> Result<Vec<u8>, DeriveError> {
    check_key_len(config, size)?;
    encode_other_info(alg.as_bytes(), apu, apv, size)
}

fn expand(z: &[u8], other_info: &[u8], size: usize) -> DerivedKey {
    tracing::trace!(
        blocks = ConcatKdf::<Sha256>::blocks_for(size),
        z_len = z.len(),
        "expanding with concat kdf"
    );
    let mut out = vec![0u8; size];
    ConcatKdf::<Sha256>::new(z, other_info).fill(&mut out);
    DerivedKey::new(out)
}

/// Derive `size` bytes from an ECDH key pair with default settings.
///
/// ```
/// use ecdh_es_kdf::{derive_key, KeyAgreement};
///
/// let alice = p256::SecretKey::generate();
/// let bob = p256::SecretKey::generate();
///
/// let k1 = derive_key("A128GCM", b"Alice", b"Bob", &alice, &KeyAgreement::public_key(&bob), 16)?;
/// let k2 = derive_key("A128GCM", b"Alice", b"Bob", &bob, &KeyAgreement::public_key(&alice), 16)?;
/// assert_eq!(k1, k2);
/// # Ok::<(), ecdh_es_kdf::DeriveError>(())
/// ```
pub fn derive_key<K: KeyAgreement>(
    alg: &str,
    apu: &[u8],
    apv: &[u8],
    private_key: &K,
    public_key: &K::PublicKey,
    size: usize,
) -> Result<DerivedKey, DeriveError> {
    derive_key_with(&DeriveConfig::default(), alg, apu, apv, private_key, public_key, size)
}

pub fn derive_key_with<K: KeyAgreement>(
    config: &DeriveConfig,
    alg: &str,
    apu: &[u8],
    apv: &[u8],
    private_key: &K,
    public_key: &K::PublicKey,
    size: usize,
) -> Result<DerivedKey, DeriveError> {
    let other_info = prepare(config, alg, apu, apv, size)?;

    tracing::debug!(
        alg,
        curve = K::CURVE.name(),
        apu_len = apu.len(),
        apv_len = apv.len(),
        size,
        "deriving ECDH-ES key"
    );

    let z = private_key.agree(public_key)?;
    Ok(expand(z.encoded(config.secret_encoding()), &other_info, size))
}

/// Same derivation for a caller that already holds Z. `z` is used as given.
pub fn derive_key_from_secret(
    alg: &str,
    apu: &[u8],
    apv: &[u8],
    z: &[u8],
    size: usize,
) -> Result<DerivedKey, DeriveError> {
    derive_key_from_secret_with(&DeriveConfig::default(), alg, apu, apv, z, size)
}

pub fn derive_key_from_secret_with(
    config: &DeriveConfig,
    alg: &str,
    apu: &[u8],
    apv: &[u8],
    z: &[u8],
    size: usize,
) -> Result<DerivedKey, DeriveError> {
    let other_info = prepare(config, alg, apu, apv, size)?;
    tracing::debug!(
        alg,
        apu_len = apu.len(),
        apv_len = apv.len(),
        size,
        "deriving key from shared secret"
    );
    Ok(expand(z, &other_info, size))
}

/// Sender side: agree with `recipient` from a fresh ephemeral key.
///
/// Returns the ephemeral public key (the JWE `epk`) and the derived key.
pub fn derive_ephemeral<K: KeyAgreement>(
    config: &DeriveConfig,
    alg: &str,
    apu: &[u8],
    apv: &[u8],
    recipient: &K::PublicKey,
    size: usize,
) -> Result<(K::PublicKey, DerivedKey), DeriveError> {
    let ephemeral = K::generate();
    let key = derive_key_with(config, alg, apu, apv, &ephemeral, recipient, size)?;
    Ok((ephemeral.public_key(), key))
}
