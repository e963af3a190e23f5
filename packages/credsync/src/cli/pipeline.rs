//! Fetch → reconcile → outcome

use credsync_common::LoggingTransformer;
use log::info;
use secrecy::ExposeSecret;
use std::io::Write;
use std::path::Path;

use super::commands::Cli;
use crate::error::FetchError;
use crate::reconcile::{Status, reconcile};
use crate::secrets::{self, SecretFetcher, SecretSource};
use crate::status::{MessageSet, StatusKind, StatusReporter};

/// Terminal state of one invocation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    NoChange,
    Rotated,
    FetchFailed,
    ReconcileFailed,
    ConfigFailed,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::NoChange | Outcome::Rotated)
    }

    /// Process exit status. Handled failures exit 0 unless `strict` is set.
    pub fn exit_status(self, strict: bool) -> u8 {
        if strict && !self.is_success() { 1 } else { 0 }
    }
}

impl From<Status> for Outcome {
    fn from(status: Status) -> Self {
        match status {
            Status::NoChange => Outcome::NoChange,
            Status::Rotated => Outcome::Rotated,
            Status::Error => Outcome::ReconcileFailed,
        }
    }
}

fn fetch_failure_kind(err: &FetchError) -> StatusKind {
    match err {
        FetchError::ProfileNotConfigured { .. } => StatusKind::ProfileNotConfigured,
        FetchError::SecretUnavailable { .. } => StatusKind::SecretUnavailable,
    }
}

/// Run one rotation with an already constructed fetcher
///
/// Prints exactly one status line whichever terminal state is reached.
pub async fn run_rotation<S: SecretSource, W: Write>(
    profile: &str,
    fetcher: &SecretFetcher<S>,
    credentials_file: &Path,
    reporter: &mut StatusReporter<W>,
) -> Outcome {
    let secret = match fetcher.fetch(profile).await {
        Ok(secret) => secret,
        Err(e) => {
            LoggingTransformer::log_failure("fetch", &e);
            reporter.report(fetch_failure_kind(&e), e.profile());
            return Outcome::FetchFailed;
        }
    };

    reconcile(
        &secret.profile_name,
        &secret.aws_access_key_id,
        secret.aws_secret_access_key.expose_secret(),
        credentials_file,
        reporter,
    )
    .into()
}

/// Entry point used by the binary: resolve config, talk to AWS, write stdout
pub async fn run(cli: Cli) -> Outcome {
    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            LoggingTransformer::log_failure("configuration", &e);
            StatusReporter::stdout(MessageSet::default())
                .report(StatusKind::ConfigurationInvalid, &cli.profile);
            return Outcome::ConfigFailed;
        }
    };

    info!(
        "Syncing profile {} into {} (region {})",
        cli.profile,
        config.credentials_file.display(),
        config.region
    );

    let mut reporter = StatusReporter::stdout(config.messages());
    let fetcher = match secrets::connect(&cli.profile, &config.region, &config).await {
        Ok(fetcher) => fetcher,
        Err(e) => {
            LoggingTransformer::log_failure("connect", &e);
            reporter.report(fetch_failure_kind(&e), e.profile());
            return Outcome::FetchFailed;
        }
    };

    run_rotation(&cli.profile, &fetcher, &config.credentials_file, &mut reporter).await
}
