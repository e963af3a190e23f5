//! Secret payload schema and AWS error definitions

use chrono::{DateTime, NaiveDateTime, Utc};
use secrecy::SecretString;
use serde::Deserialize;

/// Error type for Secrets Manager operations
#[derive(Debug, thiserror::Error)]
pub enum AwsError {
    #[error("Client not initialized")]
    ClientNotInitialized,

    #[error("Secret not found: {0}")]
    SecretNotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Secret has no string value: {0}")]
    EmptySecret(String),

    #[error("SDK operation error: {0}")]
    SdkOperationError(String),
}

/// Errors turning a secret string into a [`CredentialSecret`]
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("malformed secret payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unrecognized CreateDate: {0}")]
    CreateDate(String),
}

/// Access key status as reported by IAM
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum KeyStatus {
    Active,
    Inactive,
}

/// Secret payload with the provider's field names
#[derive(Deserialize)]
pub struct RawSecret {
    #[serde(rename = "UserName")]
    pub user_name: String,
    #[serde(rename = "AccessKeyId")]
    pub access_key_id: String,
    #[serde(rename = "SecretAccessKey")]
    pub secret_access_key: String,
    #[serde(rename = "CreateDate")]
    pub create_date: String,
    #[serde(rename = "Status")]
    pub status: KeyStatus,
}

/// Normalized credential secret
#[derive(Debug)]
pub struct CredentialSecret {
    pub profile_name: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: SecretString,
    pub created: DateTime<Utc>,
    pub status: KeyStatus,
}

impl CredentialSecret {
    /// Parse a `SecretString` JSON payload
    pub fn parse(payload: &str) -> Result<Self, PayloadError> {
        let raw: RawSecret = serde_json::from_str(payload)?;
        Self::from_raw(raw)
    }

    /// Rename provider fields into the normalized schema
    pub fn from_raw(raw: RawSecret) -> Result<Self, PayloadError> {
        let created = parse_create_date(&raw.create_date)?;
        Ok(CredentialSecret {
            profile_name: raw.user_name,
            aws_access_key_id: raw.access_key_id,
            aws_secret_access_key: SecretString::from(raw.secret_access_key),
            created,
            status: raw.status,
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == KeyStatus::Active
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]+HH:MM`, and naive UTC forms
pub fn parse_create_date(value: &str) -> Result<DateTime<Utc>, PayloadError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    Err(PayloadError::CreateDate(value.to_string()))
}
