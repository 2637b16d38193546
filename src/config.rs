//! Persistence of the single [`ModelConfig`] record.
//!
//! The record lives in an INI file under the `[ModelConfig]` section:
//!
//! ```ini
//! [ModelConfig]
//! platform = DeepSeek
//! api_key = sk-...
//! model = deepseek-model-1
//! ```
//!
//! Every save rewrites the whole file through a temp file in the same
//! directory followed by a rename, so a reader never observes a partially
//! written record.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ini::{EscapePolicy, Ini, ParseOption, WriteOption};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Section holding the record.
pub const SECTION: &str = "ModelConfig";

const KEY_PLATFORM: &str = "platform";
const KEY_API_KEY: &str = "api_key";
const KEY_MODEL: &str = "model";

/// The persisted record: chosen platform, secret key, and model.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub platform: String,
    pub api_key: String,
    pub model: String,
}

impl ModelConfig {
    pub fn new(
        platform: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// The API key with all but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        mask_secret(&self.api_key)
    }
}

// Keep the key out of logs and panic messages.
impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("platform", &self.platform)
            .field("api_key", &self.masked_api_key())
            .field("model", &self.model)
            .finish()
    }
}

/// Mask a secret for display, keeping at most the last four characters.
pub fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= 4 {
        return "•".repeat(len);
    }
    let tail: String = secret.chars().skip(len - 4).collect();
    format!("{}{}", "•".repeat(len - 4), tail)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: ini::ParseError,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Durable save/restore of exactly one [`ModelConfig`].
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record.
    ///
    /// Returns `Ok(None)` when the file does not exist or has no
    /// `[ModelConfig]` section.  Keys missing from the section load as empty
    /// strings.
    pub fn load(&self) -> Result<Option<ModelConfig>, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No config file");
                return Ok(None);
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        // Values are literal: no quote stripping, no backslash escapes.
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(&text, opt).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;

        let Some(section) = ini.section(Some(SECTION)) else {
            debug!(path = %self.path.display(), "Config file has no [{SECTION}] section");
            return Ok(None);
        };

        let field = |key: &str| section.get(key).unwrap_or_default().to_string();
        Ok(Some(ModelConfig {
            platform: field(KEY_PLATFORM),
            api_key: field(KEY_API_KEY),
            model: field(KEY_MODEL),
        }))
    }

    /// Overwrite the file with `config`.
    ///
    /// Values are written verbatim.  Leading and trailing whitespace does not
    /// survive a reload, so callers store trimmed values.
    ///
    /// On failure the previous file, if any, is left untouched.
    pub fn save(&self, config: &ModelConfig) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.with_section(Some(SECTION))
            .set(KEY_PLATFORM, config.platform.as_str())
            .set(KEY_API_KEY, config.api_key.as_str())
            .set(KEY_MODEL, config.model.as_str());

        let mut buf = Vec::new();
        let opt = WriteOption {
            kv_separator: " = ",
            escape_policy: EscapePolicy::Nothing,
            ..WriteOption::default()
        };
        ini.write_to_opt(&mut buf, opt)
            .and_then(|()| self.replace_file(&buf))
            .map_err(|source| ConfigError::Write {
                path: self.path.clone(),
                source,
            })?;

        info!(
            path = %self.path.display(),
            platform = %config.platform,
            model = %config.model,
            "Saved model config"
        );
        Ok(())
    }

    fn replace_file(&self, bytes: &[u8]) -> io::Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        // NamedTempFile is created owner-only on Unix, and the mode survives
        // the rename.
        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}
