//! Local shared credentials file
//!
//! Section-based INI store holding one key pair per profile, plus the
//! profile lookup used to decide whether a profile is configured at all.

pub mod atomic;
pub mod profile;
pub mod store;

pub use atomic::atomic_replace;
pub use profile::ProfileLocator;
pub use store::{ACCESS_KEY_ID, CredentialsFile, SECRET_ACCESS_KEY};
