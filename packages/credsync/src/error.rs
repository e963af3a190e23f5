use std::path::PathBuf;

/// Failures while obtaining the current key pair from the secrets store
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("profile \"{profile}\" has no local authentication context")]
    ProfileNotConfigured { profile: String },
    #[error("secret for profile \"{profile}\" is unavailable: {reason}")]
    SecretUnavailable { profile: String, reason: String },
}

impl FetchError {
    pub fn unavailable(profile: &str, reason: impl Into<String>) -> Self {
        FetchError::SecretUnavailable {
            profile: profile.to_string(),
            reason: reason.into(),
        }
    }

    pub fn profile(&self) -> &str {
        match self {
            FetchError::ProfileNotConfigured { profile }
            | FetchError::SecretUnavailable { profile, .. } => profile,
        }
    }
}

/// Failures reading, parsing or writing the local credentials file
#[derive(Debug, thiserror::Error)]
pub enum CredentialsFileError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("Section [{0}] not found")]
    SectionMissing(String),
    #[error("Key {key} not found in section [{section}]")]
    KeyMissing { section: String, key: String },
    #[error("Persist failed for {path}: {message}")]
    Persist { path: PathBuf, message: String },
}

impl CredentialsFileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CredentialsFileError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors that stop a run before any profile work starts
#[derive(Debug, thiserror::Error)]
pub enum RotateError {
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type RotateResult<T> = Result<T, RotateError>;
