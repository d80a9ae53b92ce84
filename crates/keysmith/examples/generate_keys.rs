/*!
*   Generates a key pair and prints it to STDOUT, or writes the public, private
*   and metadata files to a directory.
*
*   RUST_LOG=keysmith=debug cargo run --example generate_keys -- -s ecdsa -z P-256 -f ssh
*/

use std::{fs, path::PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use keysmith::{
    KeyGenerationRequest, KeysmithConfig, OutputFormat, Scheme, generate_key_pair,
};
use tracing_subscriber::filter;

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, arg_required_else_help(true))]
struct Args {
    /// Signature scheme
    #[arg(value_enum, short, long, required = true)]
    scheme: SchemeArg,

    /// RSA bit length (2048, 3072, 4096) or curve name (P-256, P-384, Ed25519, Ed448)
    #[arg(short = 'z', long, required = true)]
    size: String,

    /// Output format
    #[arg(value_enum, short, long, default_value = "pem")]
    format: FormatArg,

    /// Passphrase protecting the private key (at least 8 characters)
    #[arg(short, long)]
    passphrase: Option<String>,

    /// JSON configuration file (user identity, SSH comment, line ending)
    #[arg(short, long)]
    config: Option<String>,

    /// Write the files into this directory instead of printing them
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, ValueEnum)]
enum SchemeArg {
    /// RSA (2048/3072/4096 bits)
    Rsa,

    /// ECDSA over NIST P-256 or P-384
    Ecdsa,

    /// EdDSA over Ed25519 or Ed448
    Eddsa,
}

#[derive(Clone, Debug, ValueEnum)]
enum FormatArg {
    /// SPKI / PKCS#8
    Pem,

    /// JSON Web Key
    Jwk,

    /// OpenSSH
    Ssh,

    /// OpenPGP armored key blocks
    Openpgp,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // construct a subscriber that prints formatted traces to stdout
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter::EnvFilter::from_default_env())
        .finish();
    // use that subscriber to process traces emitted after this point
    tracing::subscriber::set_global_default(subscriber).expect("Logging failed, exiting...");

    let config = match &args.config {
        Some(path) => KeysmithConfig::load_file(path)?,
        None => KeysmithConfig::default(),
    };

    let scheme = match args.scheme {
        SchemeArg::Rsa => Scheme::Rsa,
        SchemeArg::Ecdsa => Scheme::Ecdsa,
        SchemeArg::Eddsa => Scheme::EdDsa,
    };
    let format = match args.format {
        FormatArg::Pem => OutputFormat::Pem,
        FormatArg::Jwk => OutputFormat::Jwk,
        FormatArg::Ssh => OutputFormat::Ssh,
        FormatArg::Openpgp => OutputFormat::OpenPgp,
    };

    let request = KeyGenerationRequest::new(scheme, args.size, format, args.passphrase);
    let generated = generate_key_pair(&request, &config).await?;

    match args.out_dir {
        Some(dir) => {
            fs::create_dir_all(&dir)?;
            for file in generated.files()? {
                let path = dir.join(&file.name);
                fs::write(&path, &file.contents)?;
                println!("Wrote {}", path.display());
            }
        }
        None => {
            println!("Public Key");
            println!("==========");
            println!("{}", generated.keys.public_key);
            println!();
            println!("Private Key");
            println!("===========");
            println!("{}", generated.keys.private_key);
            println!();
            println!("Fingerprint : {}", generated.keys.fingerprint);
            println!("Metadata    : {}", serde_json::to_string_pretty(&generated.metadata)?);
        }
    }

    Ok(())
}
