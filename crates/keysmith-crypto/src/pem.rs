//! SPKI / PKCS#8 PEM codec
//!
//! Public keys are always written as SubjectPublicKeyInfo (`PUBLIC KEY`).
//! Private keys are written as PKCS#8 (`PRIVATE KEY`), or, when a passphrase
//! is supplied, as PKCS#8 `EncryptedPrivateKeyInfo` (`ENCRYPTED PRIVATE KEY`)
//! using PBES2 with scrypt and AES-256-CBC.

use base64::{Engine, prelude::BASE64_STANDARD_NO_PAD};
use pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::{CryptoError, error::Result};

pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";
pub const ENCRYPTED_PRIVATE_KEY_LABEL: &str = "ENCRYPTED PRIVATE KEY";

/// Encodes a public key as an SPKI PEM block
pub fn public_key_pem<K: EncodePublicKey>(key: &K, line_ending: LineEnding) -> Result<String> {
    key.to_public_key_pem(line_ending)
        .map_err(|e| CryptoError::Encoding(format!("Couldn't encode SPKI PEM: {e}")))
}

/// Encodes a public key as SPKI DER bytes
pub fn public_key_der<K: EncodePublicKey>(key: &K) -> Result<Vec<u8>> {
    key.to_public_key_der()
        .map(|doc| doc.as_bytes().to_vec())
        .map_err(|e| CryptoError::Encoding(format!("Couldn't encode SPKI DER: {e}")))
}

/// Encodes a private key as a PKCS#8 PEM block, encrypted if a passphrase is given
pub fn private_key_pem<K: EncodePrivateKey>(
    key: &K,
    passphrase: Option<&str>,
    line_ending: LineEnding,
) -> Result<Zeroizing<String>> {
    match passphrase {
        Some(passphrase) => key
            .to_pkcs8_encrypted_pem(OsRng, passphrase.as_bytes(), line_ending)
            .map_err(|e| CryptoError::Encoding(format!("Couldn't encrypt PKCS#8 PEM: {e}"))),
        None => key
            .to_pkcs8_pem(line_ending)
            .map_err(|e| CryptoError::Encoding(format!("Couldn't encode PKCS#8 PEM: {e}"))),
    }
}

/// Decodes an SPKI PEM block back into a public key
pub fn decode_public_key_pem<K: DecodePublicKey>(pem: &str) -> Result<K> {
    K::from_public_key_pem(pem)
        .map_err(|e| CryptoError::Decoding(format!("Couldn't decode SPKI PEM: {e}")))
}

/// Decodes a PKCS#8 PEM block, decrypting it first if a passphrase is given
pub fn decode_private_key_pem<K: DecodePrivateKey>(pem: &str, passphrase: Option<&str>) -> Result<K> {
    match passphrase {
        Some(passphrase) => K::from_pkcs8_encrypted_pem(pem, passphrase.as_bytes())
            .map_err(|e| CryptoError::Decoding(format!("Couldn't decrypt PKCS#8 PEM: {e}"))),
        None => K::from_pkcs8_pem(pem)
            .map_err(|e| CryptoError::Decoding(format!("Couldn't decode PKCS#8 PEM: {e}"))),
    }
}

/// SHA-256 fingerprint of SPKI DER bytes, formatted like OpenSSH (`SHA256:<base64>`)
pub fn spki_fingerprint(der: &[u8]) -> String {
    format!("SHA256:{}", BASE64_STANDARD_NO_PAD.encode(Sha256::digest(der)))
}

/// Returns the label of the first PEM block in `text` (e.g. `PRIVATE KEY`)
pub fn pem_label(text: &str) -> Option<&str> {
    let start = text.find("-----BEGIN ")? + "-----BEGIN ".len();
    let end = text[start..].find("-----")?;
    Some(&text[start..start + end])
}
