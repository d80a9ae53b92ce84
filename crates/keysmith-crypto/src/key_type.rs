//! Key type enumeration

use std::fmt;

/// Key algorithms and named curves understood by the primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// RSA with the modulus length in bits
    Rsa(usize),
    P256,
    P384,
    Ed25519,
    Ed448,
}

impl KeyType {
    /// Lowercase curve name as used by OpenPGP tooling (`ed25519`, `p-256`, ...)
    pub fn openpgp_name(&self) -> String {
        self.to_string().to_lowercase()
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KeyType::Rsa(_) => write!(f, "RSA"),
            KeyType::P256 => write!(f, "P-256"),
            KeyType::P384 => write!(f, "P-384"),
            KeyType::Ed25519 => write!(f, "Ed25519"),
            KeyType::Ed448 => write!(f, "Ed448"),
        }
    }
}
