//! Key agreement providers (the ECDH shared-secret step)
//!
//! Each provider wraps a curve library and returns Z:
//!   NIST / secp256k1 curves: big-endian affine x-coordinate, field width
//!                            (66 bytes on P-521)
//!   X25519:                  raw 32-byte output (RFC 7748 / RFC 8037)
//!
//! Public keys:
//!   NIST / secp256k1: SEC1 encoding (compressed or uncompressed)
//!   X25519:           raw 32 bytes

extern crate alloc;
use alloc::vec::Vec;
use core::fmt;

use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand_core::OsRng;
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::Zeroizing;

use crate::config::SecretEncoding;
use crate::error::{DeriveError, InvalidParameter};

/// X25519 key / shared secret size.
pub const X25519_KEY_BYTES: usize = 32;

// ---------------------------------------------------------------------------
// Curves
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Curve {
    P256,
    P384,
    P521,
    Secp256k1,
    X25519,
}

impl Curve {
    /// JWK `crv` name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
            Self::Secp256k1 => "secp256k1",
            Self::X25519 => "X25519",
        }
    }

    /// Width of an encoded coordinate (and of a fixed-width Z).
    pub const fn coordinate_bytes(&self) -> usize {
        match self {
            Self::P256 | Self::Secp256k1 | Self::X25519 => 32,
            Self::P384 => 48,
            Self::P521 => 66,
        }
    }

    /// Montgomery outputs are little-endian strings, not integers, and are
    /// never trimmed.
    const fn is_big_endian(&self) -> bool {
        !matches!(self, Self::X25519)
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Shared secret (Z)
// ---------------------------------------------------------------------------

/// ECDH output, zeroized on drop.
pub struct SharedSecret {
    curve: Curve,
    bytes: Zeroizing<Vec<u8>>,
}

impl SharedSecret {
    /// Wrap raw ECDH output. Big-endian curves pass the x-coordinate at full
    /// [`Curve::coordinate_bytes`] width.
    pub fn new(curve: Curve, bytes: &[u8]) -> Self {
        Self {
            curve,
            bytes: Zeroizing::new(bytes.to_vec()),
        }
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Z at the curve's full coordinate width.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Z as a minimal big-endian integer (leading zero bytes removed).
    pub fn minimal(&self) -> &[u8] {
        if !self.curve.is_big_endian() {
            return &self.bytes;
        }
        let start = self
            .bytes
            .iter()
            .position(|&b| b != 0)
            .unwrap_or(self.bytes.len());
        &self.bytes[start..]
    }

    pub fn encoded(&self, encoding: SecretEncoding) -> &[u8] {
        match encoding {
            SecretEncoding::Minimal => self.minimal(),
            SecretEncoding::FixedWidth => self.as_bytes(),
        }
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecret")
            .field("curve", &self.curve)
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// A private key that can perform ECDH with a peer public key.
///
/// Implemented here for the bundled curves. Other crates can implement it for
/// their own key types and build the result with [`SharedSecret::new`].
pub trait KeyAgreement: Sized {
    type PublicKey: Clone;

    const CURVE: Curve;

    /// Fresh random key from the OS RNG.
    fn generate() -> Self;

    /// Big-endian scalar (NIST curves) or raw 32 bytes (X25519).
    fn from_secret_bytes(bytes: &[u8]) -> Result<Self, DeriveError>;

    fn public_key(&self) -> Self::PublicKey;

    /// Parse a peer key. Points not on the curve are a key agreement
    /// failure, not a caller error.
    fn public_from_bytes(bytes: &[u8]) -> Result<Self::PublicKey, DeriveError>;

    fn public_to_bytes(public_key: &Self::PublicKey) -> Vec<u8>;

    fn agree(&self, peer: &Self::PublicKey) -> Result<SharedSecret, DeriveError>;
}

macro_rules! weierstrass_agreement {
    ($krate:ident, $curve:expr) => {
        impl KeyAgreement for $krate::SecretKey {
            type PublicKey = $krate::PublicKey;

            const CURVE: Curve = $curve;

            fn generate() -> Self {
                $krate::SecretKey::random(&mut OsRng)
            }

            fn from_secret_bytes(bytes: &[u8]) -> Result<Self, DeriveError> {
                $krate::SecretKey::from_slice(bytes)
                    .map_err(|_| DeriveError::InvalidParameter(InvalidParameter::MalformedKey))
            }

            fn public_key(&self) -> Self::PublicKey {
                $krate::SecretKey::public_key(self)
            }

            fn public_from_bytes(bytes: &[u8]) -> Result<Self::PublicKey, DeriveError> {
                $krate::PublicKey::from_sec1_bytes(bytes).map_err(|_| {
                    tracing::warn!(curve = Self::CURVE.name(), "rejected peer public key");
                    DeriveError::KeyAgreementFailure
                })
            }

            fn public_to_bytes(public_key: &Self::PublicKey) -> Vec<u8> {
                public_key.to_encoded_point(false).as_bytes().to_vec()
            }

            fn agree(&self, peer: &Self::PublicKey) -> Result<SharedSecret, DeriveError> {
                let shared =
                    $krate::ecdh::diffie_hellman(self.to_nonzero_scalar(), peer.as_affine());
                Ok(SharedSecret::new(Self::CURVE, &shared.raw_secret_bytes()[..]))
            }
        }
    };
}

weierstrass_agreement!(p256, Curve::P256);
weierstrass_agreement!(p384, Curve::P384);
weierstrass_agreement!(p521, Curve::P521);
weierstrass_agreement!(k256, Curve::Secp256k1);

impl KeyAgreement for StaticSecret {
    type PublicKey = X25519PublicKey;

    const CURVE: Curve = Curve::X25519;

    fn generate() -> Self {
        StaticSecret::random_from_rng(OsRng)
    }

    fn from_secret_bytes(bytes: &[u8]) -> Result<Self, DeriveError> {
        let raw: [u8; X25519_KEY_BYTES] = bytes
            .try_into()
            .map_err(|_| DeriveError::InvalidParameter(InvalidParameter::MalformedKey))?;
        let raw = Zeroizing::new(raw);
        Ok(StaticSecret::from(*raw))
    }

    fn public_key(&self) -> Self::PublicKey {
        X25519PublicKey::from(self)
    }

    fn public_from_bytes(bytes: &[u8]) -> Result<Self::PublicKey, DeriveError> {
        let raw: [u8; X25519_KEY_BYTES] = bytes.try_into().map_err(|_| {
            tracing::warn!(
                curve = Self::CURVE.name(),
                len = bytes.len(),
                "rejected peer public key"
            );
            DeriveError::KeyAgreementFailure
        })?;
        Ok(X25519PublicKey::from(raw))
    }

    fn public_to_bytes(public_key: &Self::PublicKey) -> Vec<u8> {
        public_key.as_bytes().to_vec()
    }

    fn agree(&self, peer: &Self::PublicKey) -> Result<SharedSecret, DeriveError> {
        let shared = self.diffie_hellman(peer);
        // Low-order peer points give an all-zero output.
        if !shared.was_contributory() {
            tracing::warn!(curve = Self::CURVE.name(), "non-contributory X25519 result");
            return Err(DeriveError::KeyAgreementFailure);
        }
        Ok(SharedSecret::new(Self::CURVE, shared.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<K: KeyAgreement>() {
        let alice = K::generate();
        let bob = K::generate();
        let ab = alice.agree(&bob.public_key()).unwrap();
        let ba = bob.agree(&alice.public_key()).unwrap();
        assert_eq!(ab.as_bytes(), ba.as_bytes());
        assert_eq!(ab.as_bytes().len(), K::CURVE.coordinate_bytes());
        assert_eq!(ab.curve(), K::CURVE);
    }

    #[test]
    fn both_sides_agree() {
        roundtrip::<p256::SecretKey>();
        roundtrip::<p384::SecretKey>();
        roundtrip::<p521::SecretKey>();
        roundtrip::<k256::SecretKey>();
        roundtrip::<StaticSecret>();
    }

    #[test]
    fn public_key_bytes_roundtrip() {
        let sk = p256::SecretKey::generate();
        let encoded =
            <p256::SecretKey as KeyAgreement>::public_to_bytes(&KeyAgreement::public_key(&sk));
        assert_eq!(encoded.len(), 65);
        assert_eq!(encoded[0], 0x04);
        let decoded = <p256::SecretKey as KeyAgreement>::public_from_bytes(&encoded).unwrap();
        assert_eq!(decoded, KeyAgreement::public_key(&sk));
    }

    #[test]
    fn invalid_point_is_key_agreement_failure() {
        let mut bogus = [0u8; 65];
        bogus[0] = 0x04;
        bogus[1] = 0x01;
        assert_eq!(
            <p256::SecretKey as KeyAgreement>::public_from_bytes(&bogus).unwrap_err(),
            DeriveError::KeyAgreementFailure
        );
        assert_eq!(
            <StaticSecret as KeyAgreement>::public_from_bytes(&[0u8; 31]).unwrap_err(),
            DeriveError::KeyAgreementFailure
        );
    }

    #[test]
    fn low_order_x25519_point_fails() {
        let sk = StaticSecret::generate();
        let identity = X25519PublicKey::from([0u8; X25519_KEY_BYTES]);
        assert_eq!(sk.agree(&identity).unwrap_err(), DeriveError::KeyAgreementFailure);
    }

    #[test]
    fn malformed_private_key() {
        assert_eq!(
            <p256::SecretKey as KeyAgreement>::from_secret_bytes(&[0u8; 32]).unwrap_err(),
            DeriveError::InvalidParameter(InvalidParameter::MalformedKey)
        );
        assert!(<StaticSecret as KeyAgreement>::from_secret_bytes(&[1u8; 33]).is_err());
    }

    #[test]
    fn minimal_strips_leading_zeros_only_for_big_endian() {
        let z = SharedSecret::new(Curve::P256, &[0, 0, 7, 0, 9]);
        assert_eq!(z.minimal(), &[7, 0, 9]);
        assert_eq!(z.encoded(SecretEncoding::FixedWidth), &[0, 0, 7, 0, 9]);

        let x = SharedSecret::new(Curve::X25519, &[0, 1, 2]);
        assert_eq!(x.minimal(), &[0, 1, 2]);
    }

    #[test]
    fn p521_coordinate_width() {
        assert_eq!(Curve::P521.coordinate_bytes(), 66);
        assert_eq!(Curve::P521.name(), "P-521");

        let sk = p521::SecretKey::generate();
        let encoded =
            <p521::SecretKey as KeyAgreement>::public_to_bytes(&KeyAgreement::public_key(&sk));
        assert_eq!(encoded.len(), 1 + 2 * 66);
    }

    #[test]
    fn debug_redacts_secret() {
        let z = SharedSecret::new(Curve::P384, &[0xAB; 48]);
        let s = alloc::format!("{:?}", z);
        assert!(s.contains("REDACTED"));
        assert!(!s.contains("171"));
    }
}
