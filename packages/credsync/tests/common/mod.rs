#![allow(dead_code)]

use chrono::NaiveDateTime;
use credsync::secrets::{AwsError, SecretSource};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use zeroize::Zeroizing;

pub const CREDENTIALS: &str = "\
[default]
aws_access_key_id = AKIADEFAULT
aws_secret_access_key = DEFAULTSECRET

[ci-bot]
aws_access_key_id = AKIA1
aws_secret_access_key = OLD
region = us-west-2
";

pub fn payload(user: &str, key_id: &str, secret: &str, status: &str) -> String {
    format!(
        r#"{{"UserName":"{user}","AccessKeyId":"{key_id}","SecretAccessKey":"{secret}","CreateDate":"2024-05-01 12:00:00+00:00","Status":"{status}"}}"#
    )
}

/// Temp dir holding a credentials file and an empty config file
pub struct Workspace {
    pub dir: TempDir,
    pub credentials: PathBuf,
    pub config: PathBuf,
}

impl Workspace {
    pub fn new(credentials: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let credentials_path = dir.path().join("credentials");
        let config_path = dir.path().join("config");
        std::fs::write(&credentials_path, credentials).expect("Failed to write credentials");
        std::fs::write(&config_path, "").expect("Failed to write config");
        Self {
            dir,
            credentials: credentials_path,
            config: config_path,
        }
    }

    pub fn read_credentials(&self) -> Vec<u8> {
        std::fs::read(&self.credentials).expect("Failed to read credentials")
    }

    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dir.path())
            .expect("Failed to list temp dir")
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub enum Stubbed {
    Payload(String),
    AccessDenied,
}

/// In-memory secrets store
#[derive(Default)]
pub struct StubSource {
    secrets: HashMap<String, Stubbed>,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn with(mut self, secret_id: &str, value: Stubbed) -> Self {
        self.secrets.insert(secret_id.to_string(), value);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SecretSource for StubSource {
    async fn secret_string(&self, secret_id: &str) -> Result<Zeroizing<String>, AwsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.secrets.get(secret_id) {
            Some(Stubbed::Payload(p)) => Ok(Zeroizing::new(p.clone())),
            Some(Stubbed::AccessDenied) => Err(AwsError::AccessDenied(format!(
                "not authorized to perform secretsmanager:GetSecretValue on {secret_id}"
            ))),
            None => Err(AwsError::SecretNotFound(secret_id.to_string())),
        }
    }
}

/// Asserts `line` starts with `[YYYY-MM-DD HH:MM:SS] `
pub fn assert_timestamp_prefix(line: &str) {
    assert!(line.starts_with('['), "missing '[': {line}");
    assert_eq!(&line[20..22], "] ", "bad prefix: {line}");
    NaiveDateTime::parse_from_str(&line[1..20], "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|e| panic!("bad timestamp in {line}: {e}"));
}

pub fn lines(output: Vec<u8>) -> Vec<String> {
    String::from_utf8(output)
        .expect("status output is utf-8")
        .lines()
        .map(str::to_string)
        .collect()
}
