/*!
 * Keysmith key pair wizard core
 *
 * A request flows through four stages:
 * 1. [validator] checks the scheme/size/format combination and passphrase policy
 * 2. [dispatcher] generates the key material with the native or OpenPGP primitive
 * 3. [converter] renders it as PEM, JWK, SSH or OpenPGP text
 * 4. [metadata] attaches a descriptive record
 *
 * [generate_key_pair] runs the whole pipeline for one request.
 */

use tracing::info;

pub mod config;
pub mod converter;
pub mod dispatcher;
pub mod errors;
pub mod handle;
pub mod metadata;
pub mod output;
pub mod request;
pub mod validator;

// Re-export the primitive layer for callers that want to read keys back
pub extern crate keysmith_crypto as crypto;

pub use config::KeysmithConfig;
pub use converter::EncodedKeyPair;
pub use errors::{KeysmithError, Result};
pub use metadata::Metadata;
pub use request::{KeyGenerationRequest, OutputFormat, Scheme};

/// Everything produced for a successful request
#[derive(Debug, Clone)]
pub struct GeneratedKeys {
    pub keys: EncodedKeyPair,
    pub metadata: Metadata,
}

impl GeneratedKeys {
    /// Public, private and metadata download files
    pub fn files(&self) -> Result<Vec<output::OutputFile>> {
        output::files(&self.keys, &self.metadata)
    }
}

/// Validates, generates, converts and describes a key pair
///
/// Nothing is returned on failure: a rejected or failed request yields neither
/// keys nor metadata.
///
/// ```no_run
/// use keysmith::{KeyGenerationRequest, KeysmithConfig, generate_key_pair};
///
/// # async fn run() -> keysmith::Result<()> {
/// let request = KeyGenerationRequest::parse("ECDSA", "P-256", "pem", None)?;
/// let generated = generate_key_pair(&request, &KeysmithConfig::default()).await?;
/// assert!(generated.keys.public_key.starts_with("-----BEGIN PUBLIC KEY-----"));
/// # Ok(())
/// # }
/// ```
pub async fn generate_key_pair(
    request: &KeyGenerationRequest,
    config: &KeysmithConfig,
) -> Result<GeneratedKeys> {
    let validated = validator::validate_request(request)?;
    let handle = dispatcher::generate(&validated, config).await?;

    let keys = converter::convert(&handle, validated.format(), validated.passphrase(), config).await?;
    let metadata = metadata::build(validated.spec(), validated.format(), keys.passphrase_protected);

    info!(
        "Generated {} key pair as {} (fingerprint {})",
        validated.spec(),
        validated.format(),
        keys.fingerprint
    );

    Ok(GeneratedKeys { keys, metadata })
}
