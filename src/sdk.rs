//! ECDH-ES SDK — Public API Surface
//!
//! `EcdhEs` carries a [`DeriveConfig`] so call sites that need non-default
//! settings (fixed-width Z, a tighter size cap) configure them once.
//!
//! Internal modules (`kdf`, `other_info`) are usable directly but the SDK
//! is the intended entry point.

use crate::agreement::KeyAgreement;
use crate::alg::Algorithm;
use crate::config::DeriveConfig;
use crate::derive;
use crate::error::DeriveError;
use crate::key::DerivedKey;

/// ECDH-ES key derivation engine.
///
/// # Example
///
/// ```
/// use ecdh_es_kdf::{Algorithm, EcdhEs, KeyAgreement};
///
/// let ecdh_es = EcdhEs::new();
/// let recipient = x25519_dalek::StaticSecret::generate();
///
/// // sender
/// let (epk, cek) = ecdh_es.derive_ephemeral::<x25519_dalek::StaticSecret>(
///     Algorithm::A256Gcm,
///     b"Alice",
///     b"Bob",
///     &recipient.public_key(),
/// )?;
///
/// // recipient
/// let same = ecdh_es.derive_for(Algorithm::A256Gcm, b"Alice", b"Bob", &recipient, &epk)?;
/// assert_eq!(cek, same);
/// assert_eq!(cek.len(), 32);
/// # Ok::<(), ecdh_es_kdf::DeriveError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EcdhEs {
    config: DeriveConfig,
}

impl EcdhEs {
    /// Engine with default settings (minimal Z encoding).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DeriveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DeriveConfig {
        &self.config
    }

    /// Derive `size` bytes bound to the algorithm label `alg`.
    ///
    /// # Arguments
    ///
    /// * `alg` — AlgorithmID value (the `enc` in direct mode, else the `alg`)
    /// * `apu`, `apv` — PartyUInfo / PartyVInfo, decoded bytes, may be empty
    /// * `private_key`, `public_key` — local key and peer key on the same curve
    /// * `size` — key length in bytes
    pub fn derive_key<K: KeyAgreement>(
        &self,
        alg: &str,
        apu: &[u8],
        apv: &[u8],
        private_key: &K,
        public_key: &K::PublicKey,
        size: usize,
    ) -> Result<DerivedKey, DeriveError> {
        derive::derive_key_with(&self.config, alg, apu, apv, private_key, public_key, size)
    }

    /// Derive a key sized for `alg`.
    pub fn derive_for<K: KeyAgreement>(
        &self,
        alg: Algorithm,
        apu: &[u8],
        apv: &[u8],
        private_key: &K,
        public_key: &K::PublicKey,
    ) -> Result<DerivedKey, DeriveError> {
        self.derive_key(alg.name(), apu, apv, private_key, public_key, alg.key_len())
    }

    /// Derive from a shared secret the caller already computed.
    pub fn derive_key_from_secret(
        &self,
        alg: &str,
        apu: &[u8],
        apv: &[u8],
        z: &[u8],
        size: usize,
    ) -> Result<DerivedKey, DeriveError> {
        derive::derive_key_from_secret_with(&self.config, alg, apu, apv, z, size)
    }

    /// Sender side: fresh ephemeral key, returns `(epk, key)`.
    pub fn derive_ephemeral<K: KeyAgreement>(
        &self,
        alg: Algorithm,
        apu: &[u8],
        apv: &[u8],
        recipient: &K::PublicKey,
    ) -> Result<(K::PublicKey, DerivedKey), DeriveError> {
        derive::derive_ephemeral::<K>(&self.config, alg.name(), apu, apv, recipient, alg.key_len())
    }
}

// ---------------------------------------------------------------------------
// Version info
// ---------------------------------------------------------------------------

/// SDK version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
