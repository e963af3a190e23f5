use credsync_common::LoggingTransformer;
use log::warn;

use super::client::SecretSource;
use super::types::CredentialSecret;
use crate::credentials::ProfileLocator;
use crate::error::FetchError;

/// Resolves a profile to its current credential secret
pub struct SecretFetcher<S> {
    source: S,
    locator: ProfileLocator,
    secret_id_template: String,
}

impl<S: SecretSource> SecretFetcher<S> {
    pub fn new(source: S, locator: ProfileLocator, secret_id_template: String) -> Self {
        Self {
            source,
            locator,
            secret_id_template,
        }
    }

    pub fn secret_id(&self, profile: &str) -> String {
        self.secret_id_template.replace("{profile}", profile)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Look up and normalize the secret for `profile`. Nothing is retried.
    pub async fn fetch(&self, profile: &str) -> Result<CredentialSecret, FetchError> {
        if !self.locator.is_configured(profile) {
            return Err(FetchError::ProfileNotConfigured {
                profile: profile.to_string(),
            });
        }

        let secret_id = self.secret_id(profile);
        let payload = self.source.secret_string(&secret_id).await.map_err(|e| {
            LoggingTransformer::log_secret_lookup(&secret_id, false);
            FetchError::unavailable(profile, e.to_string())
        })?;
        LoggingTransformer::log_secret_lookup(&secret_id, true);

        let secret = CredentialSecret::parse(&payload)
            .map_err(|e| FetchError::unavailable(profile, e.to_string()))?;

        if !secret.is_active() {
            warn!(
                "Secret {secret_id} reports key {} as {:?}",
                LoggingTransformer::fingerprint(&secret.aws_access_key_id),
                secret.status
            );
        }
        if secret.profile_name != profile {
            warn!(
                "Secret {secret_id} belongs to \"{}\", not \"{profile}\"",
                secret.profile_name
            );
        }

        Ok(secret)
    }
}
