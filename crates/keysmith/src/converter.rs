/*!
 * Format conversion
 *
 * Renders a [KeyPairHandle] into PEM, JWK, SSH or OpenPGP text. The public half
 * never depends on the passphrase; only the private half is encrypted.
 *
 * | origin  | PEM               | JWK   | SSH                                | OpenPGP            |
 * |---------|-------------------|-------|------------------------------------|--------------------|
 * | native  | SPKI / PKCS#8     | JWK   | OpenSSH public, PKCS#8 or OpenSSH  | regenerated        |
 * | OpenPGP | armored blocks    | error | `ssh-ed25519` line, armored secret | armored blocks     |
 */

use keysmith_crypto::{
    JWK, LineEnding, openpgp,
    pem::{self, public_key_der},
    ssh::{self, private_key_openssh},
};
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::{
    config::KeysmithConfig,
    dispatcher,
    errors::{KeysmithError, Result},
    handle::{KeyPairHandle, NativeKeyPair},
    request::OutputFormat,
};

/// Public/private key text in the requested encoding
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncodedKeyPair {
    #[zeroize(skip)]
    pub public_key: String,
    pub private_key: String,
    #[zeroize(skip)]
    pub format: OutputFormat,
    /// Public key fingerprint (`SHA256:...` for PEM/JWK/SSH, hex for OpenPGP)
    #[zeroize(skip)]
    pub fingerprint: String,
    /// True if `private_key` is passphrase protected
    #[zeroize(skip)]
    pub passphrase_protected: bool,
}

impl std::fmt::Debug for EncodedKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedKeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("format", &self.format)
            .field("fingerprint", &self.fingerprint)
            .field("passphrase_protected", &self.passphrase_protected)
            .finish()
    }
}

/// Converts a key pair handle into the requested output format
///
/// An empty passphrase is treated as no passphrase. Asking for OpenPGP output
/// from a native key pair generates a new, unrelated OpenPGP key with the same
/// parameters.
pub async fn convert(
    handle: &KeyPairHandle,
    format: OutputFormat,
    passphrase: Option<&str>,
    config: &KeysmithConfig,
) -> Result<EncodedKeyPair> {
    let passphrase = passphrase.filter(|p| !p.is_empty()).map(str::to_string);

    let handle = match (handle, format) {
        (KeyPairHandle::Native(native), OutputFormat::OpenPgp) => {
            warn!(
                "OpenPGP output requested for a native {} key pair: generating a new OpenPGP key, \
                 it will not match the native key material",
                native.spec()
            );
            KeyPairHandle::OpenPgp(dispatcher::generate_openpgp_async(native.spec(), config).await?)
        }
        (handle, _) => handle.clone(),
    };

    let config = config.clone();
    tokio::task::spawn_blocking(move || render(&handle, format, passphrase.as_deref(), &config))
        .await
        .map_err(|e| KeysmithError::Conversion(format!("Conversion task failed: {e}")))?
}

/// Synchronous rendering, expensive when a passphrase is given (scrypt,
/// bcrypt-pbkdf or OpenPGP S2K)
fn render(
    handle: &KeyPairHandle,
    format: OutputFormat,
    passphrase: Option<&str>,
    config: &KeysmithConfig,
) -> Result<EncodedKeyPair> {
    debug!(
        "Rendering {} key pair as {} (passphrase: {})",
        handle.spec(),
        format,
        passphrase.is_some()
    );

    match handle {
        KeyPairHandle::Native(native) => match format {
            OutputFormat::Pem => native_pem(native, passphrase, config.line_ending),
            OutputFormat::Jwk => native_jwk(native, passphrase),
            OutputFormat::Ssh => native_ssh(native, passphrase, config),
            OutputFormat::OpenPgp => Err(KeysmithError::Conversion(
                "Native key pairs must be regenerated through the OpenPGP primitive".into(),
            )),
        },
        KeyPairHandle::OpenPgp(keypair) => match format {
            OutputFormat::Pem | OutputFormat::OpenPgp => openpgp_armored(keypair, format, passphrase),
            OutputFormat::Jwk => Err(KeysmithError::Conversion(
                "JWK format only supports RSA and ECDSA keys; OpenPGP key pairs can't be expressed as JWK"
                    .into(),
            )),
            OutputFormat::Ssh => openpgp_ssh(keypair, passphrase, config),
        },
    }
}

// ****************************************************************************
// Native key pairs
// ****************************************************************************

fn native_pem(
    native: &NativeKeyPair,
    passphrase: Option<&str>,
    line_ending: LineEnding,
) -> Result<EncodedKeyPair> {
    let public_key = match native {
        NativeKeyPair::Rsa(keypair) => pem::public_key_pem(&keypair.public_key, line_ending)?,
        NativeKeyPair::P256(keypair) => pem::public_key_pem(&keypair.public_key, line_ending)?,
        NativeKeyPair::P384(keypair) => pem::public_key_pem(&keypair.public_key, line_ending)?,
    };

    let private_key = native_private_pem(native, passphrase, line_ending)?;

    Ok(EncodedKeyPair {
        public_key,
        private_key: private_key.to_string(),
        format: OutputFormat::Pem,
        fingerprint: native_fingerprint(native)?,
        passphrase_protected: passphrase.is_some(),
    })
}

fn native_private_pem(
    native: &NativeKeyPair,
    passphrase: Option<&str>,
    line_ending: LineEnding,
) -> Result<Zeroizing<String>> {
    let pem = match native {
        NativeKeyPair::Rsa(keypair) => {
            pem::private_key_pem(&keypair.private_key, passphrase, line_ending)?
        }
        NativeKeyPair::P256(keypair) => {
            pem::private_key_pem(&keypair.secret_key, passphrase, line_ending)?
        }
        NativeKeyPair::P384(keypair) => {
            pem::private_key_pem(&keypair.secret_key, passphrase, line_ending)?
        }
    };
    Ok(pem)
}

fn native_fingerprint(native: &NativeKeyPair) -> Result<String> {
    let der = match native {
        NativeKeyPair::Rsa(keypair) => public_key_der(&keypair.public_key)?,
        NativeKeyPair::P256(keypair) => public_key_der(&keypair.public_key)?,
        NativeKeyPair::P384(keypair) => public_key_der(&keypair.public_key)?,
    };
    Ok(pem::spki_fingerprint(&der))
}

fn native_jwk(native: &NativeKeyPair, passphrase: Option<&str>) -> Result<EncodedKeyPair> {
    if passphrase.is_some() {
        warn!("Passphrase ignored: JWK has no encrypted private key form");
    }

    let (public, private): (JWK, JWK) = match native {
        NativeKeyPair::Rsa(keypair) => (keypair.public_jwk(), keypair.private_jwk()?),
        NativeKeyPair::P256(keypair) => (keypair.jwk.to_public(), keypair.jwk.clone()),
        NativeKeyPair::P384(keypair) => (keypair.jwk.to_public(), keypair.jwk.clone()),
    };

    Ok(EncodedKeyPair {
        public_key: public.to_json_pretty()?,
        private_key: private.to_json_pretty()?,
        format: OutputFormat::Jwk,
        fingerprint: native_fingerprint(native)?,
        passphrase_protected: false,
    })
}

fn native_ssh(
    native: &NativeKeyPair,
    passphrase: Option<&str>,
    config: &KeysmithConfig,
) -> Result<EncodedKeyPair> {
    let keypair_data = match native {
        NativeKeyPair::Rsa(keypair) => ssh::rsa_keypair(keypair)?,
        NativeKeyPair::P256(keypair) => ssh::p256_keypair(keypair),
        NativeKeyPair::P384(keypair) => ssh::p384_keypair(keypair),
    };
    let ssh_key = ssh::private_key(keypair_data, &config.ssh_comment)?;

    // Without a passphrase the private half is plain PKCS#8, which OpenSSH also reads
    let private_key = match passphrase {
        Some(_) => private_key_openssh(&ssh_key, passphrase, config.line_ending)?,
        None => native_private_pem(native, None, config.line_ending)?,
    };

    Ok(EncodedKeyPair {
        public_key: ssh::public_key_line(ssh_key.public_key())?,
        private_key: private_key.to_string(),
        format: OutputFormat::Ssh,
        fingerprint: ssh::fingerprint(ssh_key.public_key()),
        passphrase_protected: passphrase.is_some(),
    })
}

// ****************************************************************************
// OpenPGP key pairs
// ****************************************************************************

fn openpgp_armored(
    keypair: &openpgp::KeyPair,
    format: OutputFormat,
    passphrase: Option<&str>,
) -> Result<EncodedKeyPair> {
    let private_key = keypair.armored_private(passphrase)?;

    Ok(EncodedKeyPair {
        public_key: keypair.armored_public()?,
        private_key: private_key.to_string(),
        format,
        fingerprint: keypair.fingerprint(),
        passphrase_protected: passphrase.is_some(),
    })
}

fn openpgp_ssh(
    keypair: &openpgp::KeyPair,
    passphrase: Option<&str>,
    config: &KeysmithConfig,
) -> Result<EncodedKeyPair> {
    let raw = keypair.ed25519_public_bytes().map_err(|_| {
        KeysmithError::Conversion(format!(
            "SSH output from an OpenPGP key pair is only available for Ed25519, not {}",
            keypair.key_type
        ))
    })?;
    let public = ssh::ed25519_public_key(&raw, &config.ssh_comment)?;

    // No OpenSSH Ed25519 private encoding is derived from OpenPGP secret
    // material, the armored secret key is carried instead
    let private_key = keypair.armored_private(passphrase)?;

    Ok(EncodedKeyPair {
        public_key: ssh::public_key_line(&public)?,
        private_key: private_key.to_string(),
        format: OutputFormat::Ssh,
        fingerprint: ssh::fingerprint(&public),
        passphrase_protected: passphrase.is_some(),
    })
}
