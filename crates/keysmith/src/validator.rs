/*!
 * Parameter validation
 *
 * Checks a [KeyGenerationRequest] against the scheme/size/format compatibility
 * matrix and the passphrase policy. Rules are evaluated in order and the first
 * failing rule's message is returned.
 */

use tracing::debug;

use crate::{
    errors::{KeysmithError, Result},
    request::{EcCurve, EdCurve, KeyGenerationRequest, KeySpec, OutputFormat, Scheme, ValidatedRequest},
};

pub const RSA_KEY_SIZES: [usize; 3] = [2048, 3072, 4096];
pub const MIN_PASSPHRASE_LENGTH: usize = 8;

/// Outcome of [validate]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    fn valid() -> Self {
        ValidationResult {
            is_valid: true,
            message: None,
        }
    }

    fn invalid(message: String) -> Self {
        ValidationResult {
            is_valid: false,
            message: Some(message),
        }
    }
}

/// Validates a request without raising an error
pub fn validate(request: &KeyGenerationRequest) -> ValidationResult {
    match validate_request(request) {
        Ok(_) => ValidationResult::valid(),
        Err(KeysmithError::Validation(message)) => ValidationResult::invalid(message),
        Err(other) => ValidationResult::invalid(other.to_string()),
    }
}

/// Validates a request and resolves it into a [ValidatedRequest]
pub fn validate_request(request: &KeyGenerationRequest) -> Result<ValidatedRequest> {
    let result = resolve(request);
    match &result {
        Ok(validated) => debug!("Request validated: {:?}", validated),
        Err(e) => debug!("Request rejected: {}", e),
    }
    result
}

fn resolve(request: &KeyGenerationRequest) -> Result<ValidatedRequest> {
    let size_or_curve = request.size_or_curve.trim();

    let spec = match request.scheme {
        Scheme::Rsa => {
            let bits = size_or_curve
                .parse::<usize>()
                .ok()
                .filter(|bits| RSA_KEY_SIZES.contains(bits))
                .ok_or_else(|| {
                    KeysmithError::Validation("RSA key size must be 2048/3072/4096 bits".into())
                })?;
            KeySpec::Rsa { bits }
        }
        Scheme::Ecdsa => match size_or_curve {
            "P-256" => KeySpec::Ecdsa(EcCurve::P256),
            "P-384" => KeySpec::Ecdsa(EcCurve::P384),
            _ => {
                return Err(KeysmithError::Validation(format!(
                    "ECDSA curve must be P-256/P-384, got ({size_or_curve})"
                )));
            }
        },
        Scheme::EdDsa => match size_or_curve {
            "Ed25519" => KeySpec::EdDsa(EdCurve::Ed25519),
            "Ed448" => KeySpec::EdDsa(EdCurve::Ed448),
            _ => {
                return Err(KeysmithError::Validation(format!(
                    "EdDSA curve must be Ed25519/Ed448, got ({size_or_curve})"
                )));
            }
        },
    };

    // Rule 4 (known output format) is enforced when the format is parsed into
    // an OutputFormat, see OutputFormat::from_str
    let format = request.output_format;

    if format == OutputFormat::Ssh && spec == KeySpec::EdDsa(EdCurve::Ed448) {
        return Err(KeysmithError::Validation(
            "SSH format only supports RSA, ECDSA, or Ed25519 (there is no standard SSH encoding for Ed448)".into(),
        ));
    }

    if format == OutputFormat::Jwk && spec.scheme() == Scheme::EdDsa {
        return Err(KeysmithError::Validation(
            "JWK format only supports RSA and ECDSA keys".into(),
        ));
    }

    let passphrase = request.effective_passphrase();
    if let Some(passphrase) = passphrase
        && format.supports_private_key_encryption()
        && passphrase.chars().count() < MIN_PASSPHRASE_LENGTH
    {
        return Err(KeysmithError::Validation(format!(
            "Passphrase must be at least {MIN_PASSPHRASE_LENGTH} characters"
        )));
    }

    Ok(ValidatedRequest {
        spec,
        format,
        passphrase: passphrase.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(scheme: Scheme, size: &str, format: OutputFormat, pass: Option<&str>) -> KeyGenerationRequest {
        KeyGenerationRequest::new(scheme, size, format, pass.map(str::to_string))
    }

    #[test]
    fn rsa_sizes() {
        for bits in ["2048", "3072", "4096"] {
            assert!(validate(&request(Scheme::Rsa, bits, OutputFormat::Pem, None)).is_valid);
        }

        for bits in ["0", "1024", "2047", "2049", "8192", "abc", ""] {
            let result = validate(&request(Scheme::Rsa, bits, OutputFormat::Pem, None));
            assert!(!result.is_valid, "{bits} should be rejected");
            assert!(result.message.unwrap().contains("2048/3072/4096"));
        }
    }

    #[test]
    fn ecdsa_curves() {
        assert!(validate(&request(Scheme::Ecdsa, "P-256", OutputFormat::Pem, None)).is_valid);
        assert!(validate(&request(Scheme::Ecdsa, "P-384", OutputFormat::Jwk, None)).is_valid);

        for curve in ["P-192", "P-521", "secp256k1", "Ed25519"] {
            let result = validate(&request(Scheme::Ecdsa, curve, OutputFormat::Pem, None));
            assert!(!result.is_valid);
            assert!(result.message.unwrap().contains("P-256/P-384"));
        }
    }

    #[test]
    fn eddsa_curves() {
        assert!(validate(&request(Scheme::EdDsa, "Ed25519", OutputFormat::Pem, None)).is_valid);
        assert!(validate(&request(Scheme::EdDsa, "Ed448", OutputFormat::OpenPgp, None)).is_valid);

        let result = validate(&request(Scheme::EdDsa, "X25519", OutputFormat::Pem, None));
        assert!(!result.is_valid);
        assert!(result.message.unwrap().contains("Ed25519/Ed448"));
    }

    #[test]
    fn ssh_rejects_ed448_only() {
        assert!(validate(&request(Scheme::EdDsa, "Ed25519", OutputFormat::Ssh, None)).is_valid);
        assert!(validate(&request(Scheme::Rsa, "2048", OutputFormat::Ssh, None)).is_valid);
        assert!(validate(&request(Scheme::Ecdsa, "P-384", OutputFormat::Ssh, None)).is_valid);

        let result = validate(&request(Scheme::EdDsa, "Ed448", OutputFormat::Ssh, None));
        assert!(!result.is_valid);
        assert!(result.message.unwrap().contains("Ed25519"));
    }

    #[test]
    fn jwk_rejects_eddsa() {
        for curve in ["Ed25519", "Ed448"] {
            let result = validate(&request(Scheme::EdDsa, curve, OutputFormat::Jwk, None));
            assert!(!result.is_valid);
            assert!(result.message.unwrap().contains("JWK"));
        }
    }

    #[test]
    fn passphrase_length_boundary() {
        let seven = validate(&request(Scheme::Ecdsa, "P-256", OutputFormat::Pem, Some("1234567")));
        assert!(!seven.is_valid);
        assert!(seven.message.unwrap().contains("at least 8"));

        assert!(validate(&request(Scheme::Ecdsa, "P-256", OutputFormat::Pem, Some("12345678"))).is_valid);
        assert!(validate(&request(Scheme::Ecdsa, "P-256", OutputFormat::Pem, Some(""))).is_valid);
    }

    #[test]
    fn passphrase_length_applies_to_every_encrypting_format() {
        for format in [OutputFormat::Pem, OutputFormat::Ssh, OutputFormat::OpenPgp] {
            assert!(!validate(&request(Scheme::Rsa, "2048", format, Some("short"))).is_valid);
        }
        // JWK can't carry an encrypted private key, so the passphrase is not checked
        assert!(validate(&request(Scheme::Rsa, "2048", OutputFormat::Jwk, Some("short"))).is_valid);
    }

    #[test]
    fn first_failing_rule_wins() {
        // Bad curve and short passphrase: the curve message is reported
        let result = validate(&request(Scheme::Ecdsa, "P-192", OutputFormat::Pem, Some("abc")));
        assert!(result.message.unwrap().contains("P-256/P-384"));
    }

    #[test]
    fn empty_passphrase_is_dropped() {
        let validated =
            validate_request(&request(Scheme::Rsa, "2048", OutputFormat::Pem, Some(""))).unwrap();
        assert_eq!(validated.passphrase(), None);
        assert!(!validated.protects_private_key());
    }

    #[test]
    fn debug_output_redacts_passphrase() {
        let validated = validate_request(&request(
            Scheme::Rsa,
            "2048",
            OutputFormat::Pem,
            Some("supersecret"),
        ))
        .unwrap();
        let debug = format!("{validated:?}");
        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("<redacted>"));
    }
}
