//! End-to-end report runs: mock service in, HTML file out.

mod common;

use chrono::{NaiveDate, NaiveDateTime};
use common::{MockService, PASSWORD, USER, list_entry};
use std::path::Path;
use ttresults::cli::{ReportRequest, run_report};
use ttresults::client::ClientError;
use ttresults::config::{AppConfig, ReportConfig, ServiceConfig};
use ttresults::error::AppError;
use ttresults_core::EventCount;

fn updated() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2011, 3, 14)
        .and_then(|d| d.and_hms_opt(18, 5, 0))
        .expect("valid date")
}

fn request(service: ServiceConfig, password: &str, output: &Path) -> ReportRequest {
    ReportRequest {
        user: USER.to_string(),
        password: password.to_string(),
        contact_name: "Rick".to_string(),
        contact_email: "rick@example.com".to_string(),
        config: AppConfig {
            service,
            report: ReportConfig {
                output: output.to_path_buf(),
                ..ReportConfig::default()
            },
        },
    }
}

#[tokio::test]
async fn test_successful_run_writes_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("index.html");
    let service = common::spawn(MockService::standard()).await;

    let summary = run_report(&request(service, PASSWORD, &output), updated())
        .await
        .expect("report");

    assert_eq!(summary.rows, 5);
    assert_eq!(summary.riders, 4);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.groups, 2);
    assert_eq!(summary.ranked, 3);
    assert_eq!(summary.events, Some(EventCount::One));

    let html = std::fs::read_to_string(&output).expect("report written");
    assert_eq!(html.len(), summary.bytes);
    assert!(html.contains("<title>2011 Indoor TT Results</title>"));
    assert!(html.contains(r#"id="MEN_30_34""#));
    assert!(html.contains(r#"id="WOMEN_30_34""#));
    assert!(html.contains("Last updated on 03&#x2F;14&#x2F;2011 at 06:05 PM"));
    assert!(html.contains("mailto:rick@example.com"));
    assert!(!html.contains("Erin"));

    // Bill's 19:55 beats Alan's 20:10.
    let bill = html.find("Bill").expect("Bill listed");
    let alan = html.find("Alan").expect("Alan listed");
    assert!(bill < alan);
}

#[tokio::test]
async fn test_ungroupable_row_keeps_single_event_ranking() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("index.html");
    let mut mock = MockService::standard();
    mock.rows.push(list_entry(&[
        ("ridername", "Kid"),
        ("gender", "M"),
        ("age", "7"),
        ("tt1results", "30:00.00"),
        ("tt2results", "31:00.00"),
        ("cumulative2", "1:01:00.00"),
    ]));
    let service = common::spawn(mock).await;

    let summary = run_report(&request(service, PASSWORD, &output), updated())
        .await
        .expect("report");

    assert_eq!(summary.events, Some(EventCount::One));
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.ranked, 3);

    let html = std::fs::read_to_string(&output).expect("report written");
    assert!(!html.contains("TT #2 Time"));
    assert!(!html.contains("No results posted yet."));
}

#[tokio::test]
async fn test_invalid_credentials_write_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("index.html");
    let service = common::spawn(MockService::standard()).await;

    let err = run_report(&request(service, "wrong", &output), updated())
        .await
        .expect_err("must fail");

    assert!(matches!(
        err,
        AppError::Client(ClientError::AuthenticationFailed)
    ));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_missing_spreadsheet_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("index.html");
    let service = common::spawn(MockService {
        spreadsheets: Vec::new(),
        ..MockService::standard()
    })
    .await;

    let err = run_report(&request(service, PASSWORD, &output), updated())
        .await
        .expect_err("must fail");

    assert!(matches!(
        err,
        AppError::Client(ClientError::SpreadsheetNotFound(_))
    ));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_missing_output_directory_fails_before_fetch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("missing").join("index.html");

    let err = run_report(
        &request(common::unreachable().await, PASSWORD, &output),
        updated(),
    )
    .await
    .expect_err("must fail");

    assert!(matches!(err, AppError::Io(_)));
}

#[tokio::test]
async fn test_rerun_is_byte_identical() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = dir.path().join("first.html");
    let second = dir.path().join("second.html");
    let service = common::spawn(MockService::standard()).await;

    run_report(&request(service.clone(), PASSWORD, &first), updated())
        .await
        .expect("first run");
    run_report(&request(service, PASSWORD, &second), updated())
        .await
        .expect("second run");

    let a = std::fs::read(&first).expect("first");
    let b = std::fs::read(&second).expect("second");
    assert_eq!(a, b);
}
