use crate::error::{RotateError, RotateResult};
use crate::status::{DEFAULT_CONTACT_MESSAGE, MessageSet, MessageStyle};
use serde::{Deserialize, Serialize};
use log::{debug, warn};
use std::path::{Path, PathBuf};

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_SECRET_ID_TEMPLATE: &str = "User_{profile}_AccessKey";

/// Runtime settings for a rotation run.
///
/// Built from defaults, then an optional JSON file, then CLI flags.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RotateConfig {
    #[serde(default = "default_region")]
    pub region: String,
    /// Shared credentials file that receives the key pair
    #[serde(default = "default_credentials_file")]
    pub credentials_file: PathBuf,
    /// Shared config file consulted when checking that a profile exists
    #[serde(default = "default_config_file")]
    pub config_file: PathBuf,
    /// Secret id pattern; `{profile}` is replaced with the profile name
    #[serde(default = "default_secret_id_template")]
    pub secret_id_template: String,
    #[serde(default = "default_contact_message")]
    pub contact_message: String,
    #[serde(default)]
    pub style: MessageStyle,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn aws_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".aws"),
        None => {
            warn!("Could not determine home directory, using ./.aws");
            PathBuf::from(".aws")
        }
    }
}

fn default_credentials_file() -> PathBuf {
    aws_dir().join("credentials")
}

fn default_config_file() -> PathBuf {
    aws_dir().join("config")
}

fn default_secret_id_template() -> String {
    DEFAULT_SECRET_ID_TEMPLATE.to_string()
}

fn default_contact_message() -> String {
    DEFAULT_CONTACT_MESSAGE.to_string()
}

impl Default for RotateConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            credentials_file: default_credentials_file(),
            config_file: default_config_file(),
            secret_id_template: default_secret_id_template(),
            contact_message: default_contact_message(),
            style: MessageStyle::default(),
        }
    }
}

impl RotateConfig {
    /// Load a JSON config file; missing fields take their defaults
    pub fn from_file(path: &Path) -> RotateResult<Self> {
        let path = expand_path(path)?;
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| RotateError::Config(format!("{}: {e}", path.display())))?;
        let mut config: RotateConfig = serde_json::from_str(&raw)
            .map_err(|e| RotateError::Config(format!("{}: {e}", path.display())))?;
        config.expand_paths()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Expand `~` and environment variables in the file paths
    pub fn expand_paths(&mut self) -> RotateResult<()> {
        self.credentials_file = expand_path(&self.credentials_file)?;
        self.config_file = expand_path(&self.config_file)?;
        Ok(())
    }

    pub fn messages(&self) -> MessageSet {
        MessageSet::new(self.style, self.contact_message.clone())
    }
}

fn expand_path(path: &Path) -> RotateResult<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .map_err(|e| RotateError::Config(format!("cannot expand {}: {e}", path.display())))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
