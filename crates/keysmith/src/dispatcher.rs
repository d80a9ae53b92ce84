/*!
 * Key generation dispatch
 *
 * Picks the primitive that generates the key material:
 * - OpenPGP output always goes through the OpenPGP primitive, whatever the scheme
 * - EdDSA always goes through the OpenPGP primitive
 * - RSA and ECDSA otherwise use the native primitives
 *
 * Generation runs on the blocking thread pool; RSA-4096 prime search can take
 * seconds.
 */

use std::time::Instant;

use keysmith_crypto::{CryptoError, openpgp, p256, p384, rsa};
use tracing::{debug, info};

use crate::{
    config::KeysmithConfig,
    errors::{KeysmithError, Result},
    handle::{KeyPairHandle, NativeKeyPair},
    request::{EcCurve, KeySpec, OutputFormat, ValidatedRequest},
};

/// Which primitive family backs a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Native,
    OpenPgp,
}

impl Primitive {
    /// Format-driven first, then scheme-driven
    pub fn for_request(spec: KeySpec, format: OutputFormat) -> Self {
        match (spec, format) {
            (_, OutputFormat::OpenPgp) => Primitive::OpenPgp,
            (KeySpec::EdDsa(_), _) => Primitive::OpenPgp,
            (KeySpec::Rsa { .. } | KeySpec::Ecdsa(_), _) => Primitive::Native,
        }
    }
}

/// Generates the key pair for a validated request
pub async fn generate(request: &ValidatedRequest, config: &KeysmithConfig) -> Result<KeyPairHandle> {
    let spec = request.spec();
    let primitive = Primitive::for_request(spec, request.format());

    info!(
        "Generating {} key pair for {} output ({:?} primitive)",
        spec,
        request.format(),
        primitive
    );

    let started = Instant::now();
    let handle = match primitive {
        Primitive::Native => {
            let native = run_blocking(spec, move || generate_native(spec)).await?;
            KeyPairHandle::Native(native)
        }
        Primitive::OpenPgp => {
            let user_id = config.user_id();
            let keypair = run_blocking(spec, move || generate_openpgp(spec, &user_id)).await?;
            KeyPairHandle::OpenPgp(keypair)
        }
    };

    debug!("{} key pair generated in {:?}", spec, started.elapsed());
    Ok(handle)
}

/// Generates an OpenPGP key pair for `spec` on the blocking pool
pub(crate) async fn generate_openpgp_async(
    spec: KeySpec,
    config: &KeysmithConfig,
) -> Result<openpgp::KeyPair> {
    let user_id = config.user_id();
    run_blocking(spec, move || generate_openpgp(spec, &user_id)).await
}

async fn run_blocking<T, F>(spec: KeySpec, task: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|e| {
        KeysmithError::generation(spec.scheme(), format!("Generation task failed: {e}"))
    })?
}

fn generate_native(spec: KeySpec) -> Result<NativeKeyPair> {
    let scheme = spec.scheme();
    let failed = |e: CryptoError| KeysmithError::generation(scheme, e.to_string());

    let native = match spec {
        KeySpec::Rsa { bits } => NativeKeyPair::Rsa(rsa::generate(bits).map_err(failed)?),
        KeySpec::Ecdsa(EcCurve::P256) => NativeKeyPair::P256(p256::generate().map_err(failed)?),
        KeySpec::Ecdsa(EcCurve::P384) => NativeKeyPair::P384(p384::generate().map_err(failed)?),
        KeySpec::EdDsa(_) => {
            return Err(KeysmithError::generation(
                scheme,
                "EdDSA keys are only available from the OpenPGP primitive",
            ));
        }
    };
    Ok(native)
}

fn generate_openpgp(spec: KeySpec, user_id: &str) -> Result<openpgp::KeyPair> {
    openpgp::generate(spec.key_type(), user_id)
        .map_err(|e| KeysmithError::generation(spec.scheme(), e.to_string()))
}
