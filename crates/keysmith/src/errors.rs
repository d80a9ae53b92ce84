/*!
 * Keysmith errors and handling/conversion
 */

use keysmith_crypto::CryptoError;
use thiserror::Error;

use crate::request::Scheme;

/// Keysmith Errors
///
/// Every variant carries a message that can be shown to the user as-is
#[derive(Error, Debug)]
pub enum KeysmithError {
    /// Request rejected by the validator, no generation work was started
    #[error("{0}")]
    Validation(String),

    /// The key generation primitive failed
    #[error("{scheme} key generation failed: {message}")]
    Generation { scheme: Scheme, message: String },

    /// The key pair couldn't be rendered in the requested format
    #[error("Key conversion failed: {0}")]
    Conversion(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl KeysmithError {
    pub(crate) fn generation(scheme: Scheme, message: impl Into<String>) -> Self {
        KeysmithError::Generation {
            scheme,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KeysmithError>;

impl From<CryptoError> for KeysmithError {
    fn from(error: CryptoError) -> Self {
        KeysmithError::Conversion(error.to_string())
    }
}
