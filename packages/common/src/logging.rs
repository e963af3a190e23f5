//! Structured logging infrastructure
//!
//! Provides env_logger-based logging with secure handling of credential
//! identifiers and proper integration with the standard log crate.

use log::{debug, error, info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging infrastructure using `env_logger`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Output goes to stderr so stdout stays reserved for status lines.
    /// Configure logging levels via `RUST_LOG`:
    /// - `RUST_LOG=debug` - Enable all debug logs
    /// - `RUST_LOG=info` - Enable info and above
    /// - `RUST_LOG=credsync=debug` - Module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_secs()
                .target(env_logger::Target::Stderr)
                .init();

            debug!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Use this in test modules to avoid initialization conflicts
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a secrets store lookup without exposing anything but the secret id
    pub fn log_secret_lookup(secret_id: &str, success: bool) {
        if success {
            info!("Secret lookup succeeded: {secret_id}");
        } else {
            warn!("Secret lookup failed: {secret_id}");
        }
    }

    /// Log a credentials file change for a profile
    ///
    /// Access key ids are fingerprinted, never logged verbatim.
    pub fn log_credentials_update(profile: &str, access_key_id: &str, written: bool) {
        let key_hash = Self::fingerprint(access_key_id);
        if written {
            info!("Credentials updated: profile {profile} (key_hash: {key_hash})");
        } else {
            debug!("Credentials already current: profile {profile} (key_hash: {key_hash})");
        }
    }

    /// Log a failure with its rendered message and debug form
    pub fn log_failure(operation: &str, err: &dyn std::error::Error) {
        error!("{}", Self::describe_failure(operation, err));
    }

    /// Text logged by [`log_failure`](Self::log_failure)
    pub fn describe_failure(operation: &str, err: &dyn std::error::Error) -> String {
        format!("{operation} failed: {err} (detail: {err:?})")
    }

    /// Short SHA-256 fingerprint of a credential identifier.
    ///
    /// Returns `#` followed by the first 12 hex characters of the digest.
    pub fn fingerprint(value: &str) -> String {
        let hash = Sha256::digest(value.as_bytes());
        let hex_hash = format!("{hash:x}");
        format!("#{}", &hex_hash[..12])
    }
}
