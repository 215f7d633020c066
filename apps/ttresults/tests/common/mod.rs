//! In-process mock of the spreadsheet service, served by axum on an
//! ephemeral port.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{Map, Value, json};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use ttresults::config::ServiceConfig;

pub const USER: &str = "coach@example.com";
pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "DQAAAGgA-test-token";
pub const SHEET: &str = "2011_TTSeries_Reg_Results";
pub const SHEET_KEY: &str = "0AkR2011";

/// What the mock serves.
#[derive(Debug, Clone, Default)]
pub struct MockService {
    /// (title, key) pairs in feed order.
    pub spreadsheets: Vec<(String, String)>,
    /// Worksheet ids per spreadsheet key.
    pub worksheets: BTreeMap<String, Vec<String>>,
    /// List-feed entries of the first worksheet.
    pub rows: Vec<Value>,
    /// Answer login with 200 but no `Auth=` line.
    pub omit_auth_line: bool,
    /// Answer every feed request with 401.
    pub reject_token: bool,
    /// Status for the list feed instead of 200.
    pub list_status: Option<u16>,
}

/// One list-feed entry with `gsx$` cells.
pub fn list_entry(cells: &[(&str, &str)]) -> Value {
    let mut entry = Map::new();
    entry.insert("id".to_string(), json!({"$t": "https://feeds/list/row"}));
    for (column, text) in cells {
        entry.insert(format!("gsx${column}"), json!({ "$t": text }));
    }
    Value::Object(entry)
}

fn rider(name: &str, gender: &str, age: &str, tt1: &str) -> Value {
    list_entry(&[
        ("ridername", name),
        ("gender", gender),
        ("age", age),
        ("city", "Austin"),
        ("state", "TX"),
        ("club", "ABD Cycling"),
        ("tt1results", tt1),
    ])
}

impl MockService {
    /// One spreadsheet, one worksheet, a header row and four riders
    /// (one of them without a gender).
    pub fn standard() -> Self {
        let mut worksheets = BTreeMap::new();
        worksheets.insert(SHEET_KEY.to_string(), vec!["od6".to_string()]);
        Self {
            spreadsheets: vec![
                ("Club Roster".to_string(), "0AkRoster".to_string()),
                (SHEET.to_string(), SHEET_KEY.to_string()),
            ],
            worksheets,
            rows: vec![
                rider("RIDER NAME", "GENDER", "AGE", "TT #1"),
                rider("Alan", "M", "32", "20:10.00"),
                rider("Bill", "M", "34", "19:55.00"),
                rider("Cara", "F", "33", "22:00.00"),
                rider("Erin", "", "40", "25:00.00"),
            ],
            ..Self::default()
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

fn authorized(mock: &MockService, headers: &HeaderMap) -> bool {
    let auth = headers.get("authorization").and_then(|v| v.to_str().ok());
    let version = headers.get("gdata-version").and_then(|v| v.to_str().ok());
    !mock.reject_token
        && auth == Some(format!("GoogleLogin auth={TOKEN}").as_str())
        && version == Some("3.0")
}

fn feed(entries: Vec<Value>) -> Response {
    Json(json!({ "feed": { "entry": entries } })).into_response()
}

async fn login(
    State(mock): State<Arc<MockService>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let field = |name: &str| form.get(name).map(String::as_str);
    let valid = field("Email") == Some(USER)
        && field("Passwd") == Some(PASSWORD)
        && field("accountType") == Some("HOSTED_OR_GOOGLE")
        && field("service") == Some("wise");
    if !valid {
        return (StatusCode::FORBIDDEN, "Error=BadAuthentication\n").into_response();
    }
    if mock.omit_auth_line {
        return "SID=abc\nLSID=def\n".into_response();
    }
    format!("SID=abc\nLSID=def\nAuth={TOKEN}\n").into_response()
}

async fn spreadsheets(State(mock): State<Arc<MockService>>, headers: HeaderMap) -> Response {
    if !authorized(&mock, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let entries = mock
        .spreadsheets
        .iter()
        .map(|(title, key)| {
            json!({
                "id": {"$t": format!("https://feeds/spreadsheets/private/full/{key}")},
                "title": {"$t": title},
            })
        })
        .collect();
    feed(entries)
}

async fn worksheets(
    State(mock): State<Arc<MockService>>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&mock, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let entries = mock
        .worksheets
        .get(&key)
        .map(|ids| {
            ids.iter()
                .map(|id| {
                    json!({
                        "id": {"$t": format!("https://feeds/worksheets/{key}/private/full/{id}")},
                        "title": {"$t": "Sheet1"},
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    feed(entries)
}

async fn list(
    State(mock): State<Arc<MockService>>,
    Path((key, worksheet)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&mock, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if let Some(status) = mock.list_status {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, "backend unavailable").into_response();
    }
    let known = mock
        .worksheets
        .get(&key)
        .is_some_and(|ids| ids.contains(&worksheet));
    if !known {
        return StatusCode::NOT_FOUND.into_response();
    }
    feed(mock.rows.clone())
}

// =============================================================================
// SERVER
// =============================================================================

/// Serve `mock` on 127.0.0.1 and return a service config pointing at it.
pub async fn spawn(mock: MockService) -> ServiceConfig {
    let router = Router::new()
        .route("/accounts/ClientLogin", post(login))
        .route("/feeds/spreadsheets/private/full", get(spreadsheets))
        .route("/feeds/worksheets/{key}/private/full", get(worksheets))
        .route("/feeds/list/{key}/{worksheet}/private/full", get(list))
        .with_state(Arc::new(mock));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock service");
    let addr = listener.local_addr().expect("mock address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock service");
    });

    ServiceConfig {
        auth_url: format!("http://{addr}/accounts/ClientLogin"),
        feeds_url: format!("http://{addr}/feeds"),
        source: "ttresults tests".to_string(),
    }
}

/// A service config pointing at a port nothing listens on.
pub async fn unreachable() -> ServiceConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);

    ServiceConfig {
        auth_url: format!("http://{addr}/accounts/ClientLogin"),
        feeds_url: format!("http://{addr}/feeds"),
        source: "ttresults tests".to_string(),
    }
}
