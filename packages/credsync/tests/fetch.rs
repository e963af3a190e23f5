//! Secret fetching against an in-memory store

mod common;

use common::{StubSource, Stubbed, Workspace, payload, CREDENTIALS};
use credsync::config::DEFAULT_SECRET_ID_TEMPLATE;
use credsync::secrets::{CredentialSecret, PayloadError, parse_create_date};
use credsync::{FetchError, KeyStatus, ProfileLocator, RotateConfig, SecretFetcher};
use secrecy::ExposeSecret;

fn fetcher(ws: &Workspace, source: StubSource) -> SecretFetcher<StubSource> {
    SecretFetcher::new(
        source,
        ProfileLocator::new(&ws.credentials, &ws.config),
        DEFAULT_SECRET_ID_TEMPLATE.to_string(),
    )
}

#[tokio::test]
async fn fetch_normalizes_provider_fields() {
    let ws = Workspace::new(CREDENTIALS);
    let source = StubSource::default().with(
        "User_ci-bot_AccessKey",
        Stubbed::Payload(payload("ci-bot", "AKIA2", "NEW/secret+1", "Active")),
    );
    let fetcher = fetcher(&ws, source);

    let secret = fetcher.fetch("ci-bot").await.expect("fetch");

    assert_eq!(secret.profile_name, "ci-bot");
    assert_eq!(secret.aws_access_key_id, "AKIA2");
    assert_eq!(secret.aws_secret_access_key.expose_secret(), "NEW/secret+1");
    assert_eq!(secret.status, KeyStatus::Active);
    assert_eq!(secret.created.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    assert_eq!(fetcher.source().calls(), 1);
}

#[tokio::test]
async fn secret_id_follows_naming_convention() {
    let ws = Workspace::new(CREDENTIALS);
    let fetcher = fetcher(&ws, StubSource::default());
    assert_eq!(fetcher.secret_id("SRV-podaac-dev-swot"), "User_SRV-podaac-dev-swot_AccessKey");
}

#[tokio::test]
async fn access_denied_is_secret_unavailable() {
    let ws = Workspace::new(CREDENTIALS);
    let source = StubSource::default().with("User_ci-bot_AccessKey", Stubbed::AccessDenied);

    match fetcher(&ws, source).fetch("ci-bot").await {
        Err(FetchError::SecretUnavailable { profile, reason }) => {
            assert_eq!(profile, "ci-bot");
            assert!(reason.contains("Access denied"), "reason: {reason}");
        }
        other => panic!("expected SecretUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_secret_is_secret_unavailable() {
    let ws = Workspace::new(CREDENTIALS);

    let err = fetcher(&ws, StubSource::default())
        .fetch("ci-bot")
        .await
        .expect_err("no secret stored");
    assert!(matches!(err, FetchError::SecretUnavailable { .. }));
}

#[tokio::test]
async fn unconfigured_profile_never_reaches_the_store() {
    let ws = Workspace::new(CREDENTIALS);
    let source = StubSource::default().with(
        "User_ghost_AccessKey",
        Stubbed::Payload(payload("ghost", "AKIA9", "S", "Active")),
    );
    let fetcher = fetcher(&ws, source);

    match fetcher.fetch("ghost").await {
        Err(FetchError::ProfileNotConfigured { profile }) => assert_eq!(profile, "ghost"),
        other => panic!("expected ProfileNotConfigured, got {other:?}"),
    }
    assert_eq!(fetcher.source().calls(), 0);
}

#[tokio::test]
async fn profile_from_config_file_counts_as_configured() {
    let ws = Workspace::new(CREDENTIALS);
    std::fs::write(&ws.config, "[profile sso-user]\nsso_session = corp\n").expect("config");
    let source = StubSource::default().with(
        "User_sso-user_AccessKey",
        Stubbed::Payload(payload("sso-user", "AKIA3", "S", "Active")),
    );

    let secret = fetcher(&ws, source).fetch("sso-user").await.expect("fetch");
    assert_eq!(secret.aws_access_key_id, "AKIA3");
}

#[tokio::test]
async fn malformed_payload_is_secret_unavailable() {
    let ws = Workspace::new(CREDENTIALS);
    let source = StubSource::default().with(
        "User_ci-bot_AccessKey",
        Stubbed::Payload(r#"{"UserName":"ci-bot","AccessKeyId":"AKIA2"}"#.to_string()),
    );

    let err = fetcher(&ws, source).fetch("ci-bot").await.expect_err("incomplete");
    assert!(matches!(err, FetchError::SecretUnavailable { .. }));
}

#[tokio::test]
async fn inactive_key_is_still_returned() {
    let ws = Workspace::new(CREDENTIALS);
    let source = StubSource::default().with(
        "User_ci-bot_AccessKey",
        Stubbed::Payload(payload("ci-bot", "AKIA2", "NEW", "Inactive")),
    );

    let secret = fetcher(&ws, source).fetch("ci-bot").await.expect("fetch");
    assert_eq!(secret.status, KeyStatus::Inactive);
    assert!(!secret.is_active());
}

#[test]
fn create_date_formats() {
    let expected = "2024-05-01T12:00:00+00:00";
    for value in [
        "2024-05-01T12:00:00Z",
        "2024-05-01T12:00:00+00:00",
        "2024-05-01 12:00:00+00:00",
        "2024-05-01 14:00:00+02:00",
        "2024-05-01 12:00:00",
    ] {
        let parsed = parse_create_date(value).unwrap_or_else(|e| panic!("{value}: {e}"));
        assert_eq!(parsed.to_rfc3339(), expected, "input {value}");
    }

    let fractional = parse_create_date("2024-05-01 12:00:00.250000+00:00").expect("fractional");
    assert_eq!(fractional.timestamp_subsec_millis(), 250);

    assert!(matches!(
        parse_create_date("May 1st"),
        Err(PayloadError::CreateDate(_))
    ));
}

#[test]
fn unknown_status_is_rejected() {
    let err = CredentialSecret::parse(&payload("ci-bot", "AKIA2", "NEW", "Pending"))
        .expect_err("unknown status");
    assert!(matches!(err, PayloadError::Json(_)));
}

#[test]
fn debug_output_redacts_secret_key() {
    let secret =
        CredentialSecret::parse(&payload("ci-bot", "AKIA2", "TOPSECRETVALUE", "Active")).expect("parse");
    assert!(!format!("{secret:?}").contains("TOPSECRETVALUE"));
}

#[tokio::test]
async fn aws_fetch_rejects_unconfigured_profile_before_any_request() {
    let ws = Workspace::new(CREDENTIALS);
    let config = RotateConfig {
        credentials_file: ws.credentials.clone(),
        config_file: ws.config.clone(),
        ..Default::default()
    };

    let err = credsync::secrets::fetch("ghost", "us-east-1", &config)
        .await
        .expect_err("ghost has no section");
    assert!(matches!(err, FetchError::ProfileNotConfigured { .. }));

    let fetcher = credsync::secrets::connect("ci-bot", "eu-west-1", &config)
        .await
        .expect("connect");
    assert_eq!(fetcher.source().region(), "eu-west-1");
    assert_eq!(fetcher.source().profile(), "ci-bot");
}
