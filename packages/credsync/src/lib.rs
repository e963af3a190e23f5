//! Synchronize rotated AWS access keys into the local credentials file
//!
//! The current key pair for a profile lives in AWS Secrets Manager under
//! `User_<profile>_AccessKey`. [`secrets`] fetches and normalizes it,
//! [`reconcile`] writes it into the profile's section of the shared
//! credentials file unless the stored access key id already matches, and
//! [`cli`] ties the two together for the `rotate-access-keys` binary.

pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod reconcile;
pub mod secrets;
pub mod status;

pub use cli::{Cli, Outcome};
pub use config::RotateConfig;
pub use credentials::{CredentialsFile, ProfileLocator};
pub use error::{CredentialsFileError, FetchError, RotateError, RotateResult};
pub use reconcile::{Status, apply, reconcile};
pub use secrets::{CredentialSecret, KeyStatus, SecretFetcher, SecretSource};
pub use status::{MessageSet, MessageStyle, StatusKind, StatusReporter};
