//! Local reconciliation
//!
//! Brings one profile section of the credentials file in line with the
//! fetched key pair. Matching access key ids mean nothing is written;
//! otherwise both key fields are replaced and the whole file is swapped in
//! atomically. Any failure leaves the file as it was.

use credsync_common::LoggingTransformer;
use std::io::Write;
use std::path::Path;

use crate::credentials::{ACCESS_KEY_ID, CredentialsFile};
use crate::error::CredentialsFileError;
use crate::status::{StatusKind, StatusReporter};

/// Result of reconciling one profile
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    NoChange,
    Rotated,
    Error,
}

impl Status {
    fn kind(self) -> StatusKind {
        match self {
            Status::NoChange => StatusKind::NoChange,
            Status::Rotated => StatusKind::Rotated,
            Status::Error => StatusKind::ReconcileFailed,
        }
    }
}

/// Compare and, if needed, overwrite the profile's key pair. Prints nothing.
pub fn apply(
    profile_name: &str,
    access_key_id: &str,
    secret_access_key: &str,
    credentials_file_path: &Path,
) -> Result<Status, CredentialsFileError> {
    let mut file = CredentialsFile::load(credentials_file_path)?;

    if file.get(profile_name, ACCESS_KEY_ID)? == access_key_id {
        LoggingTransformer::log_credentials_update(profile_name, access_key_id, false);
        return Ok(Status::NoChange);
    }

    file.set_key_pair(profile_name, access_key_id, secret_access_key)?;
    file.persist()?;

    LoggingTransformer::log_credentials_update(profile_name, access_key_id, true);
    Ok(Status::Rotated)
}

/// [`apply`], then print exactly one status line for the outcome
pub fn reconcile<W: Write>(
    profile_name: &str,
    access_key_id: &str,
    secret_access_key: &str,
    credentials_file_path: &Path,
    reporter: &mut StatusReporter<W>,
) -> Status {
    let status = apply(
        profile_name,
        access_key_id,
        secret_access_key,
        credentials_file_path,
    )
    .unwrap_or_else(|e| {
        LoggingTransformer::log_failure("reconcile", &e);
        Status::Error
    });

    reporter.report(status.kind(), profile_name);
    status
}
