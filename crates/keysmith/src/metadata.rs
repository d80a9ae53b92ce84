/*!
 * Metadata builder
 *
 * Descriptive, non-secret record attached to every generated key pair. The
 * `security`, `usage` and `compatibility` sections are table lookups on the
 * key spec and output format.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::request::{EcCurve, EdCurve, KeySpec, OutputFormat, Scheme};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(rename = "type")]
    pub key_type: Scheme,
    /// Bit length for RSA, curve name otherwise
    pub size: String,
    pub format: OutputFormat,
    pub generated_timestamp: DateTime<Utc>,
    pub has_passphrase: bool,
    pub security: SecurityInfo,
    pub usage: UsageInfo,
    pub compatibility: CompatibilityInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityInfo {
    /// Approximate symmetric-equivalent strength
    pub strength_bits: u16,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageInfo {
    pub recommended_uses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityInfo {
    pub tools: Vec<String>,
}

/// Builds metadata stamped with the current time
pub fn build(spec: KeySpec, format: OutputFormat, has_passphrase: bool) -> Metadata {
    build_at(spec, format, has_passphrase, Utc::now())
}

/// Builds metadata with an explicit generation timestamp
pub fn build_at(
    spec: KeySpec,
    format: OutputFormat,
    has_passphrase: bool,
    generated_timestamp: DateTime<Utc>,
) -> Metadata {
    Metadata {
        key_type: spec.scheme(),
        size: spec.size_label(),
        format,
        generated_timestamp,
        has_passphrase,
        security: security(spec),
        usage: usage(spec.scheme(), format),
        compatibility: compatibility(format),
    }
}

fn security(spec: KeySpec) -> SecurityInfo {
    let (strength_bits, recommendation) = match spec {
        KeySpec::Rsa { bits } if bits >= 4096 => {
            (140, "Strong; suitable for long-lived keys beyond 2030")
        }
        KeySpec::Rsa { bits } if bits >= 3072 => {
            (128, "Recommended RSA size for use beyond 2030")
        }
        KeySpec::Rsa { .. } => (
            112,
            "Acceptable until 2030; prefer 3072 bits or larger for new long-lived keys",
        ),
        KeySpec::Ecdsa(EcCurve::P256) => (128, "Recommended for general use"),
        KeySpec::Ecdsa(EcCurve::P384) => (192, "High security; suitable for long-lived keys"),
        KeySpec::EdDsa(EdCurve::Ed25519) => (128, "Recommended for general use"),
        KeySpec::EdDsa(EdCurve::Ed448) => (224, "High security; limited tool support"),
    };

    SecurityInfo {
        strength_bits,
        recommendation: recommendation.into(),
    }
}

fn usage(scheme: Scheme, format: OutputFormat) -> UsageInfo {
    let uses: &[&str] = match (scheme, format) {
        (_, OutputFormat::Ssh) => &["SSH authentication", "Git over SSH", "Commit signing"],
        (_, OutputFormat::OpenPgp) => &["Email signing", "File signing", "Software release signing"],
        (Scheme::Rsa, OutputFormat::Jwk) => &["JWT signing (RS256)", "Key exchange (RSA-OAEP)"],
        (Scheme::Ecdsa, OutputFormat::Jwk) => &["JWT signing (ES256/ES384)", "OAuth / OpenID Connect"],
        (Scheme::Rsa, _) => &["TLS certificates", "Code signing", "Document signing"],
        (Scheme::Ecdsa, _) => &["TLS certificates", "Code signing", "IoT device identity"],
        (Scheme::EdDsa, _) => &["Digital signatures", "File signing"],
    };

    UsageInfo {
        recommended_uses: uses.iter().map(|u| u.to_string()).collect(),
    }
}

fn compatibility(format: OutputFormat) -> CompatibilityInfo {
    let tools: &[&str] = match format {
        OutputFormat::Pem => &["OpenSSL", "Java keytool", "Node.js crypto", "Python cryptography"],
        OutputFormat::Jwk => &["Web Crypto API", "jose", "Auth0", "Keycloak"],
        OutputFormat::Ssh => &["OpenSSH", "PuTTY", "GitHub", "GitLab"],
        OutputFormat::OpenPgp => &["GnuPG", "OpenPGP.js", "Thunderbird", "Kleopatra"],
    };

    CompatibilityInfo {
        tools: tools.iter().map(|t| t.to_string()).collect(),
    }
}
