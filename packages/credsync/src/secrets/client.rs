//! AWS client setup and the secret lookup seam
//!
//! Contains AWS client initialization, credential handling, and region configuration.

use std::future::Future;
use std::path::{Path, PathBuf};

use aws_config::Region;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_runtime::env_config::file::{EnvConfigFileKind, EnvConfigFiles};
use aws_sdk_secretsmanager::Client;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata};
use zeroize::Zeroizing;

use super::types::AwsError;

/// Anything that can return a secret's string value by id
pub trait SecretSource {
    fn secret_string(
        &self,
        secret_id: &str,
    ) -> impl Future<Output = Result<Zeroizing<String>, AwsError>>;
}

/// Interface for interacting with AWS Secrets Manager
#[derive(Debug, Clone)]
pub struct AwsSecretsInterface {
    pub(crate) client: Option<Client>,
    pub(crate) region: String,
    pub(crate) profile: String,
    profile_files: Option<(PathBuf, PathBuf)>,
}

impl AwsSecretsInterface {
    /// Create a new AWS Secrets Manager interface
    pub fn new(region: String, profile: String) -> Self {
        AwsSecretsInterface {
            client: None,
            region,
            profile,
            profile_files: None,
        }
    }

    /// Read profile credentials from these files instead of the SDK defaults
    pub fn with_profile_files(mut self, credentials_file: &Path, config_file: &Path) -> Self {
        self.profile_files = Some((credentials_file.to_path_buf(), config_file.to_path_buf()));
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Initialize the AWS Secrets Manager client
    pub async fn initialize(&mut self) -> Result<(), AwsError> {
        let region = Region::new(self.region.clone());
        let mut provider = ProfileFileCredentialsProvider::builder().profile_name(&self.profile);

        if let Some((credentials_file, config_file)) = &self.profile_files {
            let files = EnvConfigFiles::builder()
                .with_file(EnvConfigFileKind::Credentials, credentials_file)
                .with_file(EnvConfigFileKind::Config, config_file)
                .build();
            provider = provider.profile_files(files);
        }

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(provider.build())
            .region(region)
            .load()
            .await;

        self.client = Some(Client::new(&config));
        Ok(())
    }

    /// Get a secret value by name
    pub async fn get_secret_value(&self, secret_name: &str) -> Result<Zeroizing<String>, AwsError> {
        let client = self.client.as_ref().ok_or(AwsError::ClientNotInitialized)?;

        let result = client
            .get_secret_value()
            .secret_id(secret_name)
            .send()
            .await
            .map_err(|e| {
                let detail = DisplayErrorContext(&e).to_string();
                match e.as_service_error() {
                    Some(service) if service.is_resource_not_found_exception() => {
                        AwsError::SecretNotFound(secret_name.to_string())
                    }
                    Some(service) if service.code() == Some("AccessDeniedException") => {
                        AwsError::AccessDenied(detail)
                    }
                    _ => AwsError::SdkOperationError(detail),
                }
            })?;

        let secret_string = result
            .secret_string()
            .ok_or_else(|| AwsError::EmptySecret(secret_name.to_string()))?
            .to_string();

        Ok(Zeroizing::new(secret_string))
    }
}

impl SecretSource for AwsSecretsInterface {
    async fn secret_string(&self, secret_id: &str) -> Result<Zeroizing<String>, AwsError> {
        self.get_secret_value(secret_id).await
    }
}
