//! Download file naming and packaging
//!
//! Files are named `{scheme}_{size}_{timestamp}_{role}.{ext}`, e.g.
//! `rsa_2048_20250102030405_private.pem`.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    converter::EncodedKeyPair,
    errors::{KeysmithError, Result},
    metadata::Metadata,
    request::{OutputFormat, Scheme},
};

/// Which of the three download files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Public,
    Private,
    Metadata,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FileRole::Public => write!(f, "public"),
            FileRole::Private => write!(f, "private"),
            FileRole::Metadata => write!(f, "metadata"),
        }
    }
}

/// A named file ready to be written or offered for download
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct OutputFile {
    #[zeroize(skip)]
    pub name: String,
    #[zeroize(skip)]
    pub role: FileRole,
    pub contents: String,
}

impl fmt::Debug for OutputFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("OutputFile")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("len", &self.contents.len())
            .finish()
    }
}

pub fn file_extension(format: OutputFormat, role: FileRole) -> &'static str {
    match (role, format) {
        (FileRole::Metadata, _) | (_, OutputFormat::Jwk) => "json",
        (_, OutputFormat::OpenPgp) => "asc",
        (FileRole::Public, OutputFormat::Ssh) => "pub",
        (FileRole::Private, OutputFormat::Ssh) => "key",
        (_, OutputFormat::Pem) => "pem",
    }
}

pub fn file_name(
    scheme: Scheme,
    size: &str,
    generated: DateTime<Utc>,
    format: OutputFormat,
    role: FileRole,
) -> String {
    format!(
        "{}_{}_{}_{}.{}",
        scheme.to_string().to_lowercase(),
        size,
        generated.format("%Y%m%d%H%M%S"),
        role,
        file_extension(format, role)
    )
}

/// Public, private and metadata files for one generated key pair
pub fn files(keys: &EncodedKeyPair, metadata: &Metadata) -> Result<Vec<OutputFile>> {
    let name = |role| {
        file_name(
            metadata.key_type,
            &metadata.size,
            metadata.generated_timestamp,
            keys.format,
            role,
        )
    };

    let metadata_json = serde_json::to_string_pretty(metadata)
        .map_err(|e| KeysmithError::Conversion(format!("Couldn't serialize metadata: {e}")))?;

    Ok(vec![
        OutputFile {
            name: name(FileRole::Public),
            role: FileRole::Public,
            contents: keys.public_key.clone(),
        },
        OutputFile {
            name: name(FileRole::Private),
            role: FileRole::Private,
            contents: keys.private_key.clone(),
        },
        OutputFile {
            name: name(FileRole::Metadata),
            role: FileRole::Metadata,
            contents: metadata_json,
        },
    ])
}
