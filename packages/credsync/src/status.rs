//! Timestamped status lines
//!
//! Every invocation prints exactly one line of the form
//! `[YYYY-MM-DD HH:MM:SS] <message>` (UTC, no fractional seconds). The
//! wording comes from a [`MessageSet`], selected by [`MessageStyle`].

use chrono::Utc;
use log::warn;
use serde::{Deserialize, Serialize};
use std::io::{self, Stdout, Write};

/// `strftime` pattern for the status line prefix
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default support hint appended to every failure message
pub const DEFAULT_CONTACT_MESSAGE: &str =
    "Please contact podaac@podaac.jpl.nasa.gov for assistance.";

/// Current UTC time without fractional seconds or zone suffix
pub fn timestamp_now() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Wording used for status lines
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MessageStyle {
    /// `NO CHANGES` / `KEYS ROTATED` wording
    #[default]
    Classic,
    /// `OK! ... profile ...` wording
    Profile,
}

/// What a status line reports
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    NoChange,
    Rotated,
    ReconcileFailed,
    ProfileNotConfigured,
    SecretUnavailable,
    ConfigurationInvalid,
}

impl StatusKind {
    pub fn is_failure(self) -> bool {
        !matches!(self, StatusKind::NoChange | StatusKind::Rotated)
    }
}

#[derive(Clone, Debug)]
pub struct MessageSet {
    style: MessageStyle,
    contact: String,
}

impl Default for MessageSet {
    fn default() -> Self {
        Self::new(MessageStyle::default(), DEFAULT_CONTACT_MESSAGE)
    }
}

impl MessageSet {
    pub fn new(style: MessageStyle, contact: impl Into<String>) -> Self {
        Self {
            style,
            contact: contact.into(),
        }
    }

    pub fn style(&self) -> MessageStyle {
        self.style
    }

    /// Message body for `kind`, without the timestamp prefix
    pub fn render(&self, kind: StatusKind, profile: &str) -> String {
        let body = match (self.style, kind) {
            (MessageStyle::Classic, StatusKind::NoChange) => {
                format!("NO CHANGES, Local credentials for \"{profile}\" are current.")
            }
            (MessageStyle::Classic, StatusKind::Rotated) => format!(
                "KEYS ROTATED, Local credentials for \"{profile}\" were rotated successfully."
            ),
            (MessageStyle::Classic, StatusKind::ReconcileFailed) => {
                format!("ERROR! Local credentials for \"{profile}\" may be expired.")
            }
            (MessageStyle::Classic, StatusKind::ProfileNotConfigured) => {
                format!("ERROR! Local credentials are not stored for \"{profile}\".")
            }
            (MessageStyle::Classic, StatusKind::SecretUnavailable) => format!(
                "ERROR! Local credentials for \"{profile}\" are expired or otherwise invalid."
            ),
            (MessageStyle::Classic, StatusKind::ConfigurationInvalid) => {
                format!("ERROR! Configuration for \"{profile}\" could not be loaded.")
            }
            (MessageStyle::Profile, StatusKind::NoChange) => format!(
                "OK! Local credentials for the \"{profile}\" profile are the latest currently available."
            ),
            (MessageStyle::Profile, StatusKind::Rotated) => format!(
                "OK! Local credentials for the \"{profile}\" profile were updated successfully."
            ),
            (MessageStyle::Profile, StatusKind::ReconcileFailed) => format!(
                "ERROR! Local credentials for the \"{profile}\" profile may be expired."
            ),
            (MessageStyle::Profile, StatusKind::ProfileNotConfigured) => format!(
                "ERROR! Local credentials are not stored for the \"{profile}\" profile."
            ),
            (MessageStyle::Profile, StatusKind::SecretUnavailable) => format!(
                "ERROR! Local credentials for the \"{profile}\" profile are expired or otherwise invalid."
            ),
            (MessageStyle::Profile, StatusKind::ConfigurationInvalid) => format!(
                "ERROR! Configuration for the \"{profile}\" profile could not be loaded."
            ),
        };

        if kind.is_failure() && !self.contact.is_empty() {
            format!("{body} {}", self.contact)
        } else {
            body
        }
    }
}

/// Writes status lines to a sink (stdout in the binary)
pub struct StatusReporter<W: Write> {
    out: W,
    messages: MessageSet,
}

impl StatusReporter<Stdout> {
    pub fn stdout(messages: MessageSet) -> Self {
        Self::new(io::stdout(), messages)
    }
}

impl<W: Write> StatusReporter<W> {
    pub fn new(out: W, messages: MessageSet) -> Self {
        Self { out, messages }
    }

    /// Print one timestamped line and return it
    pub fn report(&mut self, kind: StatusKind, profile: &str) -> String {
        let line = format!(
            "[{}] {}",
            timestamp_now(),
            self.messages.render(kind, profile)
        );

        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            warn!("Failed to write status line: {e}");
        }

        line
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
