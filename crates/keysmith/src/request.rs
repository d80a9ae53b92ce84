//! Key generation request types

use std::{fmt, str::FromStr};

use keysmith_crypto::KeyType;
use serde::{Deserialize, Serialize};

use crate::errors::KeysmithError;

/// Asymmetric signature scheme family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    #[serde(rename = "RSA")]
    Rsa,
    #[serde(rename = "ECDSA")]
    Ecdsa,
    #[serde(rename = "EdDSA")]
    EdDsa,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scheme::Rsa => write!(f, "RSA"),
            Scheme::Ecdsa => write!(f, "ECDSA"),
            Scheme::EdDsa => write!(f, "EdDSA"),
        }
    }
}

impl FromStr for Scheme {
    type Err = KeysmithError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "rsa" => Ok(Scheme::Rsa),
            "ecdsa" => Ok(Scheme::Ecdsa),
            "eddsa" => Ok(Scheme::EdDsa),
            _ => Err(KeysmithError::Validation(format!(
                "Unsupported key type: {value}. Must be one of RSA, ECDSA, EdDSA"
            ))),
        }
    }
}

/// Output encoding for the generated key pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    #[serde(rename = "PEM")]
    Pem,
    #[serde(rename = "JWK")]
    Jwk,
    #[serde(rename = "SSH")]
    Ssh,
    #[serde(rename = "OpenPGP")]
    OpenPgp,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Pem,
        OutputFormat::Jwk,
        OutputFormat::Ssh,
        OutputFormat::OpenPgp,
    ];

    /// True if the private key can be passphrase protected in this format
    pub fn supports_private_key_encryption(&self) -> bool {
        !matches!(self, OutputFormat::Jwk)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputFormat::Pem => write!(f, "PEM"),
            OutputFormat::Jwk => write!(f, "JWK"),
            OutputFormat::Ssh => write!(f, "SSH"),
            OutputFormat::OpenPgp => write!(f, "OpenPGP"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = KeysmithError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "pem" => Ok(OutputFormat::Pem),
            "jwk" => Ok(OutputFormat::Jwk),
            "ssh" | "openssh" => Ok(OutputFormat::Ssh),
            "openpgp" | "pgp" => Ok(OutputFormat::OpenPgp),
            _ => Err(KeysmithError::Validation(format!(
                "Unsupported output format: {value}. Must be one of PEM, JWK, SSH, OpenPGP"
            ))),
        }
    }
}

/// Named curves usable with ECDSA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    P256,
    P384,
}

/// Named curves usable with EdDSA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdCurve {
    Ed25519,
    Ed448,
}

/// Fully resolved key parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySpec {
    Rsa { bits: usize },
    Ecdsa(EcCurve),
    EdDsa(EdCurve),
}

impl KeySpec {
    pub fn scheme(&self) -> Scheme {
        match self {
            KeySpec::Rsa { .. } => Scheme::Rsa,
            KeySpec::Ecdsa(_) => Scheme::Ecdsa,
            KeySpec::EdDsa(_) => Scheme::EdDsa,
        }
    }

    /// Primitive-level key type
    pub fn key_type(&self) -> KeyType {
        match self {
            KeySpec::Rsa { bits } => KeyType::Rsa(*bits),
            KeySpec::Ecdsa(EcCurve::P256) => KeyType::P256,
            KeySpec::Ecdsa(EcCurve::P384) => KeyType::P384,
            KeySpec::EdDsa(EdCurve::Ed25519) => KeyType::Ed25519,
            KeySpec::EdDsa(EdCurve::Ed448) => KeyType::Ed448,
        }
    }

    /// Size or curve as shown to users and used in file names (`2048`, `P-256`, `Ed25519`)
    pub fn size_label(&self) -> String {
        match self {
            KeySpec::Rsa { bits } => bits.to_string(),
            _ => self.key_type().to_string(),
        }
    }
}

impl fmt::Display for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.scheme(), self.size_label())
    }
}

/// Raw request as collected from the user
#[derive(Clone, PartialEq, Eq)]
pub struct KeyGenerationRequest {
    pub scheme: Scheme,
    /// Bit length for RSA, named curve for ECDSA/EdDSA
    pub size_or_curve: String,
    pub output_format: OutputFormat,
    pub passphrase: Option<String>,
}

impl KeyGenerationRequest {
    pub fn new(
        scheme: Scheme,
        size_or_curve: impl Into<String>,
        output_format: OutputFormat,
        passphrase: Option<String>,
    ) -> Self {
        KeyGenerationRequest {
            scheme,
            size_or_curve: size_or_curve.into(),
            output_format,
            passphrase,
        }
    }

    /// Builds a request from the string values a UI collects
    ///
    /// Unknown schemes or output formats are rejected with a validation error.
    /// Size/curve legality is left to [crate::validator::validate].
    pub fn parse(
        scheme: &str,
        size_or_curve: &str,
        output_format: &str,
        passphrase: Option<&str>,
    ) -> Result<Self, KeysmithError> {
        Ok(KeyGenerationRequest {
            scheme: scheme.parse()?,
            size_or_curve: size_or_curve.trim().to_string(),
            output_format: output_format.parse()?,
            passphrase: passphrase.map(str::to_string),
        })
    }

    /// The passphrase, with an empty string treated as "no protection requested"
    pub fn effective_passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref().filter(|p| !p.is_empty())
    }
}

// Keeps the passphrase out of logs
impl fmt::Debug for KeyGenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("KeyGenerationRequest")
            .field("scheme", &self.scheme)
            .field("size_or_curve", &self.size_or_curve)
            .field("output_format", &self.output_format)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A request that passed the validator
///
/// Only [crate::validator::validate_request] constructs this, so holding one
/// proves the compatibility matrix and passphrase policy were checked.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub(crate) spec: KeySpec,
    pub(crate) format: OutputFormat,
    pub(crate) passphrase: Option<String>,
}

impl ValidatedRequest {
    pub fn spec(&self) -> KeySpec {
        self.spec
    }

    pub fn scheme(&self) -> Scheme {
        self.spec.scheme()
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref()
    }

    /// True if the private key will actually be passphrase protected
    pub fn protects_private_key(&self) -> bool {
        self.passphrase.is_some() && self.format.supports_private_key_encryption()
    }
}

// Keeps the passphrase out of logs
impl fmt::Debug for ValidatedRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ValidatedRequest")
            .field("spec", &self.spec)
            .field("format", &self.format)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parsing_is_case_insensitive() {
        assert_eq!("ssh".parse::<OutputFormat>().unwrap(), OutputFormat::Ssh);
        assert_eq!("JWK".parse::<OutputFormat>().unwrap(), OutputFormat::Jwk);
        assert_eq!("OpenPGP".parse::<OutputFormat>().unwrap(), OutputFormat::OpenPgp);
        assert_eq!("pgp".parse::<OutputFormat>().unwrap(), OutputFormat::OpenPgp);
    }

    #[test]
    fn unknown_output_format_is_a_validation_error() {
        let err = "der".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, KeysmithError::Validation(_)));
        assert!(err.to_string().contains("PEM, JWK, SSH, OpenPGP"));
    }

    #[test]
    fn empty_passphrase_means_none() {
        let request = KeyGenerationRequest::parse("RSA", "2048", "pem", Some("")).unwrap();
        assert_eq!(request.effective_passphrase(), None);
    }

    #[test]
    fn size_labels() {
        assert_eq!(KeySpec::Rsa { bits: 3072 }.size_label(), "3072");
        assert_eq!(KeySpec::Ecdsa(EcCurve::P384).size_label(), "P-384");
        assert_eq!(KeySpec::EdDsa(EdCurve::Ed25519).size_label(), "Ed25519");
    }

    #[test]
    fn debug_redacts_passphrase() {
        let request =
            KeyGenerationRequest::parse("ECDSA", "P-256", "pem", Some("hunter2hunter2")).unwrap();
        let printed = format!("{request:?}");

        assert!(!printed.contains("hunter2hunter2"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains("P-256"));
    }

    #[test]
    fn rsa_key_type_carries_bits() {
        assert_eq!(KeySpec::Rsa { bits: 4096 }.key_type(), KeyType::Rsa(4096));
    }
}
