//! P-256 (secp256r1/prime256v1) key operations

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use p256::{EncodedPoint, PublicKey, SecretKey, elliptic_curve::sec1::ToEncodedPoint};
use rand::rngs::OsRng;

use crate::{CryptoError, ECParams, JWK, Params, error::Result};

/// Generated key pair with its private JWK
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
    pub jwk: JWK,
}

/// Generates a random P-256 key pair
pub fn generate() -> Result<KeyPair> {
    let secret_key = SecretKey::random(&mut OsRng);
    let public_key = secret_key.public_key();

    let (x, y) = coordinates(&public_key.to_encoded_point(false))?;

    Ok(KeyPair {
        jwk: JWK {
            key_id: None,
            params: Params::EC(ECParams {
                curve: "P-256".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwk_matches_key_material() {
        let keypair = generate().unwrap();
        let point = keypair.public_key.to_encoded_point(false);

        if let Params::EC(params) = &keypair.jwk.params {
            assert_eq!(params.curve, "P-256");
            assert_eq!(
                BASE64_URL_SAFE_NO_PAD.decode(&params.x).unwrap(),
                point.x().unwrap().as_slice()
            );
            assert_eq!(
                BASE64_URL_SAFE_NO_PAD.decode(&params.y).unwrap(),
                point.y().unwrap().as_slice()
            );

            let d = BASE64_URL_SAFE_NO_PAD.decode(params.d.as_ref().unwrap()).unwrap();
            assert_eq!(d.len(), 32);
            assert_eq!(SecretKey::from_slice(&d).unwrap().public_key(), keypair.public_key);
        } else {
            panic!("Expected EC params");
        }
    }

    #[test]
    fn keys_are_random() {
        let a = generate().unwrap();
        let b = generate().unwrap();
        assert_ne!(a.public_key, b.public_key);
    }
}
