//! JWA algorithm identifiers that feed AlgorithmID (RFC 7518 §4.6.2).
//!
//! Direct key agreement binds the `enc` value; key agreement with key
//! wrapping binds the `alg` value.

use core::fmt;
use core::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    A128Gcm,
    A192Gcm,
    A256Gcm,
    A128CbcHs256,
    A192CbcHs384,
    A256CbcHs512,
    EcdhEsA128Kw,
    EcdhEsA192Kw,
    EcdhEsA256Kw,
}

impl Algorithm {
    pub const ALL: [Algorithm; 9] = [
        Self::A128Gcm,
        Self::A192Gcm,
        Self::A256Gcm,
        Self::A128CbcHs256,
        Self::A192CbcHs384,
        Self::A256CbcHs512,
        Self::EcdhEsA128Kw,
        Self::EcdhEsA192Kw,
        Self::EcdhEsA256Kw,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::A128Gcm => "A128GCM",
            Self::A192Gcm => "A192GCM",
            Self::A256Gcm => "A256GCM",
            Self::A128CbcHs256 => "A128CBC-HS256",
            Self::A192CbcHs384 => "A192CBC-HS384",
            Self::A256CbcHs512 => "A256CBC-HS512",
            Self::EcdhEsA128Kw => "ECDH-ES+A128KW",
            Self::EcdhEsA192Kw => "ECDH-ES+A192KW",
            Self::EcdhEsA256Kw => "ECDH-ES+A256KW",
        }
    }

    /// Key length in bytes (CBC-HMAC keys include the MAC half).
    pub const fn key_len(&self) -> usize {
        match self {
            Self::A128Gcm | Self::EcdhEsA128Kw => 16,
            Self::A192Gcm | Self::EcdhEsA192Kw => 24,
            Self::A256Gcm | Self::EcdhEsA256Kw | Self::A128CbcHs256 => 32,
            Self::A192CbcHs384 => 48,
            Self::A256CbcHs512 => 64,
        }
    }

    /// True for `ECDH-ES+A*KW`, where the derived key wraps a CEK.
    pub const fn is_key_wrap(&self) -> bool {
        matches!(self, Self::EcdhEsA128Kw | Self::EcdhEsA192Kw | Self::EcdhEsA256Kw)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownAlgorithm;

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm identifier")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|alg| alg.name() == s)
            .ok_or(UnknownAlgorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.name().parse::<Algorithm>(), Ok(alg));
        }
        assert_eq!("a128gcm".parse::<Algorithm>(), Err(UnknownAlgorithm));
        assert_eq!("ECDH-ES".parse::<Algorithm>(), Err(UnknownAlgorithm));
    }

    #[test]
    fn key_lengths() {
        assert_eq!(Algorithm::A128Gcm.key_len(), 16);
        assert_eq!(Algorithm::A192CbcHs384.key_len(), 48);
        assert_eq!(Algorithm::EcdhEsA256Kw.key_len(), 32);
        assert!(Algorithm::EcdhEsA192Kw.is_key_wrap());
        assert!(!Algorithm::A256CbcHs512.is_key_wrap());
    }
}
