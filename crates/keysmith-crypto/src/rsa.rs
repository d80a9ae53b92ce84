//! RSA key operations

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use rand::rngs::OsRng;
use rsa::{
    BigUint, RsaPrivateKey, RsaPublicKey,
    traits::{PrivateKeyParts, PublicKeyParts},
};

use crate::{CryptoError, JWK, Params, RSAParams, error::Result};

/// Fixed public exponent (F4)
pub const PUBLIC_EXPONENT: u32 = 65_537;

/// Generated RSA key pair
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub private_key: RsaPrivateKey,
    pub public_key: RsaPublicKey,
}

impl KeyPair {
    /// Modulus length in bits
    pub fn bits(&self) -> usize {
        self.public_key.n().bits()
    }

    /// Public JWK (`kty`, `n`, `e`)
    pub fn public_jwk(&self) -> JWK {
        public_jwk(&self.public_key)
    }

    /// Private JWK including the CRT parameters
    pub fn private_jwk(&self) -> Result<JWK> {
        let key = &self.private_key;
        let primes = key.primes();
        if primes.len() != 2 {
            return Err(CryptoError::KeyError(format!(
                "Expected a two-prime RSA key, got {} primes",
                primes.len()
            )));
        }

        let dp = key
            .dp()
            .ok_or_else(|| CryptoError::KeyError("RSA key is missing dP".into()))?;
        let dq = key
            .dq()
            .ok_or_else(|| CryptoError::KeyError("RSA key is missing dQ".into()))?;
        let qi = key
            .crt_coefficient()
            .ok_or_else(|| CryptoError::KeyError("RSA key is missing qInv".into()))?;

        Ok(JWK {
            key_id: None,
            params: Params::RSA(RSAParams {
                n: encode_uint(key.n()),
                e: encode_uint(key.e()),
                d: Some(encode_uint(key.d())),
                p: Some(encode_uint(&primes[0])),
                q: Some(encode_uint(&primes[1])),
                dp: Some(encode_uint(dp)),
                dq: Some(encode_uint(dq)),
                qi: Some(encode_uint(&qi)),
            }),
        })
    }
}

/// Generates an RSA key pair with the given modulus length and e = 65537
pub fn generate(bits: usize) -> Result<KeyPair> {
    let exponent = BigUint::from(PUBLIC_EXPONENT);
    let mut private_key = RsaPrivateKey::new_with_exp(&mut OsRng, bits, &exponent)
        .map_err(|e| CryptoError::KeyError(format!("RSA-{bits} generation failed: {e}")))?;
    private_key
        .precompute()
        .map_err(|e| CryptoError::KeyError(format!("RSA-{bits} CRT precompute failed: {e}")))?;

    let public_key = RsaPublicKey::from(&private_key);

    Ok(KeyPair {
        private_key,
        public_key,
    })
}

/// Generates a public JWK from an RSA public key
pub fn public_jwk(key: &RsaPublicKey) -> JWK {
    JWK {
        key_id: None,
        params: Params::RSA(RSAParams {
            n: encode_uint(key.n()),
            e: encode_uint(key.e()),
            d: None,
            p: None,
            q: None,
            dp: None,
            dq: None,
            qi: None,
        }),
    }
}

fn encode_uint(value: &BigUint) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(value.to_bytes_be())
}
