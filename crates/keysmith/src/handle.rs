//! Key pair handles produced by the dispatcher
//!
//! A handle records which primitive family produced the key material. The
//! converter matches on it exhaustively, so every output format has to say
//! what it does for both origins.

use keysmith_crypto::{KeyType, openpgp, p256, p384, rsa};

use crate::request::{EcCurve, EdCurve, KeySpec};

/// Key pair produced by a native asymmetric-key primitive
#[derive(Debug, Clone)]
pub enum NativeKeyPair {
    Rsa(rsa::KeyPair),
    P256(p256::KeyPair),
    P384(p384::KeyPair),
}

impl NativeKeyPair {
    pub fn spec(&self) -> KeySpec {
        match self {
            NativeKeyPair::Rsa(keypair) => KeySpec::Rsa {
                bits: keypair.bits(),
            },
            NativeKeyPair::P256(_) => KeySpec::Ecdsa(EcCurve::P256),
            NativeKeyPair::P384(_) => KeySpec::Ecdsa(EcCurve::P384),
        }
    }
}

/// Result of a single generation request, held only while converting
#[derive(Debug, Clone)]
pub enum KeyPairHandle {
    Native(NativeKeyPair),
    OpenPgp(openpgp::KeyPair),
}

impl KeyPairHandle {
    pub fn spec(&self) -> KeySpec {
        match self {
            KeyPairHandle::Native(native) => native.spec(),
            KeyPairHandle::OpenPgp(keypair) => openpgp_spec(keypair),
        }
    }

    pub fn is_openpgp(&self) -> bool {
        matches!(self, KeyPairHandle::OpenPgp(_))
    }
}

fn openpgp_spec(keypair: &openpgp::KeyPair) -> KeySpec {
    match keypair.key_type {
        KeyType::Rsa(bits) => KeySpec::Rsa { bits },
        KeyType::P256 => KeySpec::Ecdsa(EcCurve::P256),
        KeyType::P384 => KeySpec::Ecdsa(EcCurve::P384),
        KeyType::Ed25519 => KeySpec::EdDsa(EdCurve::Ed25519),
        KeyType::Ed448 => KeySpec::EdDsa(EdCurve::Ed448),
    }
}
