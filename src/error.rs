//! Error types for ECDH-ES key derivation.

use core::fmt;

// ---------------------------------------------------------------------------
// Caller precondition violations
// ---------------------------------------------------------------------------

/// Which precondition a caller broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidParameter {
    /// A zero-length key was requested.
    ZeroLength,
    /// The requested key is longer than SuppPubInfo (or the configured
    /// maximum) can express.
    OutputTooLong { requested: usize, max: usize },
    /// A length-prefixed OtherInfo field does not fit a 32-bit prefix.
    FieldTooLong { field: &'static str, len: usize },
    /// Private key bytes are not a valid scalar for the curve.
    MalformedKey,
}

impl fmt::Display for InvalidParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLength => write!(f, "requested key length is zero"),
            Self::OutputTooLong { requested, max } => {
                write!(f, "requested key length {} exceeds maximum {}", requested, max)
            }
            Self::FieldTooLong { field, len } => {
                write!(f, "{} is {} bytes, too long for a 32-bit length prefix", field, len)
            }
            Self::MalformedKey => write!(f, "malformed private key"),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level derivation error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeriveError {
    InvalidParameter(InvalidParameter),
    /// The curve collaborator rejected the key pair (invalid peer point,
    /// non-contributory result).
    KeyAgreementFailure,
}

impl fmt::Display for DeriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(p) => write!(f, "invalid parameter: {}", p),
            Self::KeyAgreementFailure => write!(f, "key agreement failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DeriveError {}

impl From<InvalidParameter> for DeriveError {
    fn from(p: InvalidParameter) -> Self {
        Self::InvalidParameter(p)
    }
}

// ---------------------------------------------------------------------------
// OtherInfo decoding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingError;

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed OtherInfo encoding")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodingError {}
