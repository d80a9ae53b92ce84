/*!
 * Keysmith configuration options
 */

use std::{fs::File, io::BufReader, path::Path};

use keysmith_crypto::LineEnding;
use serde::Deserialize;

use crate::errors::{KeysmithError, Result};

const DEFAULT_USER_NAME: &str = "Keysmith User";
const DEFAULT_USER_EMAIL: &str = "user@example.com";
const DEFAULT_SSH_COMMENT: &str = "keysmith-generated-key";

#[derive(Clone, Debug)]
pub struct KeysmithConfig {
    /// Name placed in the OpenPGP user id
    pub user_name: String,
    /// Email placed in the OpenPGP user id
    pub user_email: String,
    /// Comment appended to OpenSSH keys
    pub ssh_comment: String,
    pub line_ending: LineEnding,
}

impl KeysmithConfig {
    /// Returns a builder for `KeysmithConfig`
    /// Example:
    /// ```
    /// use keysmith::config::KeysmithConfig;
    ///
    /// let config = KeysmithConfig::builder().build().unwrap();
    /// ```
    pub fn builder() -> KeysmithConfigBuilder {
        KeysmithConfigBuilder::default()
    }

    /// OpenPGP user id (`Name <email>`)
    pub fn user_id(&self) -> String {
        format!("{} <{}>", self.user_name, self.user_email)
    }

    /// Loads a configuration from a JSON file, missing fields use defaults
    ///
    /// ```json
    /// { "user_name": "Alice", "user_email": "alice@example.com", "line_ending": "crlf" }
    /// ```
    pub fn load_file(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Err(KeysmithError::Config(format!(
                "Config file ({path}) doesn't exist"
            )));
        }

        let file = File::open(path)
            .map_err(|err| KeysmithError::Config(format!("Couldn't open file ({path}): {err}")))?;
        let raw: ConfigFile = serde_json::from_reader(BufReader::new(file))
            .map_err(|err| KeysmithError::Config(format!("Couldn't deserialize JSON: {err}")))?;

        raw.into_builder()?.build()
    }
}

impl Default for KeysmithConfig {
    fn default() -> Self {
        KeysmithConfig {
            user_name: DEFAULT_USER_NAME.into(),
            user_email: DEFAULT_USER_EMAIL.into(),
            ssh_comment: DEFAULT_SSH_COMMENT.into(),
            line_ending: LineEnding::LF,
        }
    }
}

/// Builder for `KeysmithConfig`.
/// Example:
/// ```
/// use keysmith::config::KeysmithConfig;
///
/// let config = KeysmithConfig::builder()
///     .with_user("Alice", "alice@example.com")
///     .with_ssh_comment("alice@laptop")
///     .build()
///     .unwrap();
/// assert_eq!(config.user_id(), "Alice <alice@example.com>");
/// ```
#[derive(Default)]
pub struct KeysmithConfigBuilder {
    /// Default: "Keysmith User"
    user_name: Option<String>,

    /// Default: "user@example.com"
    user_email: Option<String>,

    /// Default: "keysmith-generated-key"
    ssh_comment: Option<String>,

    /// Default: LF
    line_ending: Option<LineEnding>,
}

impl KeysmithConfigBuilder {
    /// Default starting constructor for `KeysmithConfigBuilder`
    pub fn new() -> KeysmithConfigBuilder {
        KeysmithConfigBuilder::default()
    }

    /// Build the `KeysmithConfig` from the builder
    pub fn build(self) -> Result<KeysmithConfig> {
        let defaults = KeysmithConfig::default();

        let user_email = self.user_email.unwrap_or(defaults.user_email);
        if !user_email.contains('@') || user_email.contains(['<', '>']) {
            return Err(KeysmithError::Config(format!(
                "Invalid user email ({user_email})"
            )));
        }

        let ssh_comment = self.ssh_comment.unwrap_or(defaults.ssh_comment);
        if ssh_comment.contains(['\n', '\r']) {
            return Err(KeysmithError::Config(
                "SSH comment must be a single line".into(),
            ));
        }

        Ok(KeysmithConfig {
            user_name: self.user_name.unwrap_or(defaults.user_name),
            user_email,
            ssh_comment,
            line_ending: self.line_ending.unwrap_or(defaults.line_ending),
        })
    }

    /// Identity placed on generated OpenPGP keys
    pub fn with_user(mut self, name: &str, email: &str) -> Self {
        self.user_name = Some(name.into());
        self.user_email = Some(email.into());
        self
    }

    pub fn with_ssh_comment(mut self, comment: &str) -> Self {
        self.ssh_comment = Some(comment.into());
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = Some(line_ending);
        self
    }
}

/// On-disk representation of the configuration
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    user_name: Option<String>,
    user_email: Option<String>,
    ssh_comment: Option<String>,
    line_ending: Option<String>,
}

impl ConfigFile {
    fn into_builder(self) -> Result<KeysmithConfigBuilder> {
        let line_ending = match self.line_ending.as_deref().map(str::to_ascii_lowercase) {
            None => None,
            Some(le) if le == "lf" => Some(LineEnding::LF),
            Some(le) if le == "crlf" => Some(LineEnding::CRLF),
            Some(le) => {
                return Err(KeysmithError::Config(format!(
                    "Unknown line ending ({le}), expected lf or crlf"
                )));
            }
        };

        Ok(KeysmithConfigBuilder {
            user_name: self.user_name,
            user_email: self.user_email,
            ssh_comment: self.ssh_comment,
            line_ending,
        })
    }
}
