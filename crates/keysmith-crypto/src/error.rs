//! Error types for cryptographic operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Key error: {0}")]
    KeyError(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Decoding error: {0}")]
    Decoding(String),

    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),

    #[error("OpenPGP error: {0}")]
    OpenPgp(String),

    #[error("SSH error: {0}")]
    Ssh(#[from] ssh_key::Error),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

#[cfg(feature = "openpgp")]
impl From<pgp::errors::Error> for CryptoError {
    fn from(error: pgp::errors::Error) -> Self {
        CryptoError::OpenPgp(error.to_string())
    }
}
