//! Secrets store access
//!
//! Contains AWS client setup, the raw payload schema and the fetcher that
//! turns a profile name into a normalized [`CredentialSecret`].

pub mod client;
pub mod fetcher;
pub mod types;

pub use client::{AwsSecretsInterface, SecretSource};
pub use fetcher::SecretFetcher;
pub use types::{AwsError, CredentialSecret, KeyStatus, PayloadError, RawSecret, parse_create_date};

use crate::config::RotateConfig;
use crate::credentials::ProfileLocator;
use crate::error::FetchError;

/// Build a fetcher backed by Secrets Manager in `region`, authenticating as
/// `profile_name`
pub async fn connect(
    profile_name: &str,
    region: &str,
    config: &RotateConfig,
) -> Result<SecretFetcher<AwsSecretsInterface>, FetchError> {
    let locator = ProfileLocator::new(&config.credentials_file, &config.config_file);

    let mut interface = AwsSecretsInterface::new(region.to_string(), profile_name.to_string())
        .with_profile_files(&config.credentials_file, &config.config_file);
    interface
        .initialize()
        .await
        .map_err(|e| FetchError::unavailable(profile_name, e.to_string()))?;

    Ok(SecretFetcher::new(
        interface,
        locator,
        config.secret_id_template.clone(),
    ))
}

/// Fetch the current key pair for `profile_name` from Secrets Manager in `region`
///
/// The secret is read with credentials from the profile itself; an
/// unconfigured profile fails before any request is made.
pub async fn fetch(
    profile_name: &str,
    region: &str,
    config: &RotateConfig,
) -> Result<CredentialSecret, FetchError> {
    connect(profile_name, region, config)
        .await?
        .fetch(profile_name)
        .await
}
