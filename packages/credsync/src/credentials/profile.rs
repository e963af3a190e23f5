use crate::credentials::store::CredentialsFile;
use log::debug;
use std::path::{Path, PathBuf};

/// Decides whether a profile has a local authentication context
///
/// A profile counts as configured when the credentials file has a
/// `[<profile>]` section or the config file has `[profile <profile>]`
/// (`[default]` for the default profile).
#[derive(Clone, Debug)]
pub struct ProfileLocator {
    credentials_file: PathBuf,
    config_file: PathBuf,
}

impl ProfileLocator {
    pub fn new(credentials_file: impl Into<PathBuf>, config_file: impl Into<PathBuf>) -> Self {
        Self {
            credentials_file: credentials_file.into(),
            config_file: config_file.into(),
        }
    }

    pub fn is_configured(&self, profile: &str) -> bool {
        section_exists(&self.credentials_file, profile)
            || section_exists(&self.config_file, &config_section_name(profile))
    }
}

fn config_section_name(profile: &str) -> String {
    if profile == "default" {
        profile.to_string()
    } else {
        format!("profile {profile}")
    }
}

fn section_exists(path: &Path, section: &str) -> bool {
    match CredentialsFile::load(path) {
        Ok(file) => file.has_section(section),
        Err(e) => {
            debug!("Profile lookup skipped {}: {e}", path.display());
            false
        }
    }
}
