//! # ECDH-ES Key Derivation
//!
//! JWE direct key agreement (RFC 7518 §4.6): an ECDH shared secret expanded
//! with the NIST SP 800-56A Concat KDF into a content-encryption key.
//!
//! ## Quick Start
//!
//! ```rust
//! use ecdh_es_kdf::{derive_key, KeyAgreement};
//!
//! let alice = p256::SecretKey::generate();
//! let bob = p256::SecretKey::generate();
//!
//! let key = derive_key("A128GCM", b"", b"", &alice, &KeyAgreement::public_key(&bob), 16).unwrap();
//! assert_eq!(key.len(), 16);
//! ```
//!
//! ## Properties
//!
//! - **Deterministic**: same inputs, same key
//! - **Bound context**: algorithm, both party infos and the key length are
//!   hashed into every block
//! - **Explicit failures**: bad parameters and rejected peer keys are errors,
//!   never a silently wrong key
//!
//! ## What's NOT Provided
//!
//! - JWE/JWK parsing
//! - Authenticated encryption / key wrapping
//! - Key storage

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

// ---------------------------------------------------------------------------
// Building blocks
// ---------------------------------------------------------------------------

mod agreement;
mod alg;
mod config;
mod derive;
mod error;
mod key;

pub mod kdf;
pub mod other_info;

// ---------------------------------------------------------------------------
// Public SDK interface
// ---------------------------------------------------------------------------

mod sdk;

pub use sdk::{EcdhEs, VERSION};

pub use agreement::{Curve, KeyAgreement, SharedSecret, X25519_KEY_BYTES};
pub use alg::{Algorithm, UnknownAlgorithm};
pub use config::{DeriveConfig, SecretEncoding};
pub use derive::{
    derive_ephemeral, derive_key, derive_key_from_secret, derive_key_from_secret_with,
    derive_key_with, HASH_BLOCK_BYTES,
};
pub use error::{DeriveError, EncodingError, InvalidParameter};
pub use key::DerivedKey;

// Curve crates, so callers name the same key types the providers use.
pub use k256;
pub use p256;
pub use p384;
pub use p521;
pub use x25519_dalek;
