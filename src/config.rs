//! Runtime derivation settings.

use crate::other_info::MAX_KEY_BYTES;

/// How the ECDH x-coordinate is fed to the KDF as Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecretEncoding {
    /// Big-endian with leading zero bytes stripped.
    ///
    /// For roughly 1 in 256 key pairs the x-coordinate starts with a zero
    /// byte, and Z is then shorter than the field width. This is what the
    /// reference big-integer encoding produces, so it stays the default.
    #[default]
    Minimal,
    /// Big-endian, left-padded with zeros to the curve's coordinate width.
    FixedWidth,
}

/// Settings for a derivation.
///
/// ```
/// use ecdh_es_kdf::{DeriveConfig, SecretEncoding};
///
/// let config = DeriveConfig::new()
///     .with_secret_encoding(SecretEncoding::FixedWidth)
///     .with_max_key_len(64);
/// assert_eq!(config.max_key_len(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeriveConfig {
    secret_encoding: SecretEncoding,
    max_key_len: usize,
}

impl Default for DeriveConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DeriveConfig {
    pub const fn new() -> Self {
        Self {
            secret_encoding: SecretEncoding::Minimal,
            max_key_len: MAX_KEY_BYTES,
        }
    }

    pub const fn with_secret_encoding(mut self, encoding: SecretEncoding) -> Self {
        self.secret_encoding = encoding;
        self
    }

    /// Cap on the requested key length. Values above what SuppPubInfo can
    /// express are clamped to that limit.
    pub const fn with_max_key_len(mut self, max: usize) -> Self {
        self.max_key_len = if max > MAX_KEY_BYTES { MAX_KEY_BYTES } else { max };
        self
    }

    pub const fn secret_encoding(&self) -> SecretEncoding {
        self.secret_encoding
    }

    pub const fn max_key_len(&self) -> usize {
        self.max_key_len
    }
}
