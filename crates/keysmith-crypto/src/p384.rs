//! P-384 (secp384r1) key operations

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use p384::{EncodedPoint, PublicKey, SecretKey, elliptic_curve::sec1::ToEncodedPoint};
use rand::rngs::OsRng;

use crate::{CryptoError, ECParams, JWK, Params, error::Result};

/// Generated key pair with its private JWK
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
    pub jwk: JWK,
}

/// Generates a random P-384 key pair
pub fn generate() -> Result<KeyPair> {
    let secret_key = SecretKey::random(&mut OsRng);
    let public_key = secret_key.public_key();

    let (x, y) = coordinates(&public_key.to_encoded_point(false))?;

    Ok(KeyPair {
        jwk: JWK {
            key_id: None,
            params: Params::EC(ECParams {
                curve: "P-384".to_string(),
                x,
                y,
                d: Some(BASE64_URL_SAFE_NO_PAD.encode(secret_key.to_bytes())),
            }),
        },
        secret_key,
        public_key,
    })
}

fn coordinates(ep: &EncodedPoint) -> Result<(String, String)> {
    let x = ep
        .x()
        .ok_or_else(|| CryptoError::KeyError("Couldn't get X coordinate".into()))?;
    let y = ep
        .y()
        .ok_or_else(|| CryptoError::KeyError("Couldn't get Y coordinate".into()))?;

    Ok((
        BASE64_URL_SAFE_NO_PAD.encode(x.as_slice()),
        BASE64_URL_SAFE_NO_PAD.encode(y.as_slice()),
    ))
}
