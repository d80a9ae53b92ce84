//! Key generation primitives and key encodings for Keysmith
//!
//! This crate provides:
//! - JWK (JSON Web Key) types per RFC 7517 / RFC 7518 (RSA, EC)
//! - Native key generation for RSA, P-256 and P-384
//! - SPKI / PKCS#8 PEM encoding, including AES-256 encrypted PKCS#8
//! - OpenSSH public and private key encoding
//! - OpenPGP key generation, armoring and passphrase protection

mod error;
mod jwk;
mod key_type;

pub mod pem;
pub mod ssh;

#[cfg(feature = "rsa")]
pub mod rsa;

#[cfg(feature = "p256")]
pub mod p256;

#[cfg(feature = "p384")]
pub mod p384;

#[cfg(feature = "openpgp")]
pub mod openpgp;

pub use error::CryptoError;
pub use jwk::{ECParams, JWK, Params, RSAParams};
pub use key_type::KeyType;

// Re-exported so callers can pick line endings without depending on pkcs8 directly
pub use pkcs8::LineEnding;
