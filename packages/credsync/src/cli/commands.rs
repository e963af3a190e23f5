//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

use crate::config::RotateConfig;
use crate::error::RotateResult;
use crate::status::MessageStyle;

#[derive(Debug, Parser)]
#[command(name = "rotate-access-keys")]
#[command(about = "Sync the active access key pair for a profile from AWS Secrets Manager")]
pub struct Cli {
    /// Profile name that corresponds to a managed service account credential, e.g. "SRV-podaac-dev-swot"
    pub profile: String,

    /// Secrets Manager region (default: us-east-1)
    #[arg(long)]
    pub region: Option<String>,

    /// Credentials file to update (default: ~/.aws/credentials)
    #[arg(long)]
    pub credentials_file: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Status line wording
    #[arg(long, value_enum)]
    pub style: Option<MessageStyle>,

    /// Exit with status 1 when the credentials could not be synced
    #[arg(long)]
    pub strict_exit: bool,
}

impl Cli {
    /// Defaults, then the config file, then flags
    pub fn resolve_config(&self) -> RotateResult<RotateConfig> {
        let mut config = match &self.config {
            Some(path) => RotateConfig::from_file(path)?,
            None => RotateConfig::default(),
        };

        if let Some(region) = &self.region {
            config.region = region.clone();
        }
        if let Some(path) = &self.credentials_file {
            config.credentials_file = path.clone();
        }
        if let Some(style) = self.style {
            config.style = style;
        }

        config.expand_paths()?;
        Ok(config)
    }
}
