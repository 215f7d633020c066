//! # Spreadsheet Client
//!
//! Talks to the GData-style spreadsheet service: log in, find the
//! spreadsheet by title, take its first worksheet, and download the rows.
//!
//! Every call is awaited in order. There are no retries.

use crate::config::ServiceConfig;
use serde::Deserialize;
use serde_json::{Map, Value};
use ttresults_core::RawRow;

const GDATA_VERSION: &str = "3.0";
const ACCOUNT_TYPE: &str = "HOSTED_OR_GOOGLE";
const SERVICE_NAME: &str = "wise";
const COLUMN_PREFIX: &str = "gsx$";

/// Errors from the spreadsheet service.
#[derive(Debug)]
pub enum ClientError {
    /// Credentials rejected, or a feed answered 401.
    AuthenticationFailed,
    /// No spreadsheet with the requested title.
    SpreadsheetNotFound(String),
    /// The spreadsheet has no worksheets.
    WorksheetNotFound(String),
    /// Cannot reach the service.
    ConnectionFailed(String),
    /// Any other non-success status.
    ServerError(u16, String),
    /// Failed to parse response body.
    ParseError(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed => {
                write!(f, "Authentication failed: check the username and password")
            }
            Self::SpreadsheetNotFound(name) => write!(f, "Spreadsheet '{name}' not found"),
            Self::WorksheetNotFound(name) => {
                write!(f, "Spreadsheet '{name}' has no worksheets")
            }
            Self::ConnectionFailed(url) => write!(f, "Cannot connect to {url}"),
            Self::ServerError(status, msg) => write!(f, "Server error ({status}): {msg}"),
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

// =============================================================================
// FEED DOCUMENTS
// =============================================================================

#[derive(Debug, Deserialize)]
struct FeedDocument {
    feed: Feed,
}

#[derive(Debug, Default, Deserialize)]
struct Feed {
    #[serde(default)]
    entry: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    id: TextNode,
    #[serde(default)]
    title: Option<TextNode>,
}

#[derive(Debug, Deserialize)]
struct TextNode {
    #[serde(rename = "$t")]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ListDocument {
    feed: ListFeed,
}

#[derive(Debug, Deserialize)]
struct ListFeed {
    #[serde(default)]
    entry: Vec<Map<String, Value>>,
}

impl Entry {
    /// The trailing path segment of the entry id.
    fn key(&self) -> &str {
        self.id.text.rsplit('/').next().unwrap_or_default()
    }
}

/// Turn one list-feed entry into a row: every `gsx$<column>` with a `$t`
/// string becomes a cell named `<column>`.
fn entry_to_row(entry: &Map<String, Value>) -> RawRow {
    entry
        .iter()
        .filter_map(|(name, value)| {
            let column = name.strip_prefix(COLUMN_PREFIX)?;
            let text = value.get("$t")?.as_str()?;
            Some((column.to_string(), text.to_string()))
        })
        .collect()
}

/// Pull the token out of a `key=value` login response body.
fn parse_auth_token(body: &str) -> Option<String> {
    body.lines()
        .filter_map(|line| line.trim().split_once('='))
        .find(|(key, _)| *key == "Auth")
        .map(|(_, token)| token.to_string())
        .filter(|token| !token.is_empty())
}

// =============================================================================
// CLIENT
// =============================================================================

/// HTTP client for the spreadsheet feeds.
#[derive(Clone)]
pub struct SpreadsheetClient {
    http: reqwest::Client,
    service: ServiceConfig,
    token: Option<String>,
}

impl SpreadsheetClient {
    /// Create an unauthenticated client for the given service.
    pub fn new(service: ServiceConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            service,
            token: None,
        }
    }

    /// Whether [`login`](Self::login) has succeeded.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Send a request and handle connection errors.
    async fn send(
        &self,
        req: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<reqwest::Response, ClientError> {
        req.send()
            .await
            .map_err(|e| ClientError::ConnectionFailed(format!("{url}: {e}")))
    }

    /// Log in and keep the token for later feed requests.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let url = self.service.auth_url.clone();
        let form = [
            ("accountType", ACCOUNT_TYPE),
            ("Email", email),
            ("Passwd", password),
            ("service", SERVICE_NAME),
            ("source", self.service.source.as_str()),
        ];
        let req = self.http.post(&url).form(&form);
        let resp = self.send(req, &url).await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ClientError::AuthenticationFailed);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::ServerError(status.as_u16(), body));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))?;
        let token = parse_auth_token(&body).ok_or(ClientError::AuthenticationFailed)?;
        self.token = Some(token);
        tracing::debug!("Logged in to {}", url);
        Ok(())
    }

    /// GET a feed with the auth headers and decode it.
    async fn get_feed<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let token = self
            .token
            .as_deref()
            .ok_or(ClientError::AuthenticationFailed)?;
        let url = format!(
            "{}/{}?alt=json",
            self.service.feeds_url.trim_end_matches('/'),
            path
        );
        let req = self
            .http
            .get(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("GoogleLogin auth={token}"),
            )
            .header("GData-Version", GDATA_VERSION);
        let resp = self.send(req, &url).await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::AuthenticationFailed);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::ServerError(status.as_u16(), body));
        }
        resp.json::<T>()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))
    }

    /// Key of the first spreadsheet titled `name`.
    pub async fn find_spreadsheet(&self, name: &str) -> Result<String, ClientError> {
        let doc: FeedDocument = self.get_feed("spreadsheets/private/full").await?;
        doc.feed
            .entry
            .iter()
            .find(|entry| entry.title.as_ref().is_some_and(|t| t.text == name))
            .map(|entry| entry.key().to_string())
            .ok_or_else(|| ClientError::SpreadsheetNotFound(name.to_string()))
    }

    /// Id of the first worksheet in the spreadsheet.
    pub async fn first_worksheet(&self, key: &str, name: &str) -> Result<String, ClientError> {
        let doc: FeedDocument = self
            .get_feed(&format!("worksheets/{key}/private/full"))
            .await?;
        doc.feed
            .entry
            .first()
            .map(|entry| entry.key().to_string())
            .ok_or_else(|| ClientError::WorksheetNotFound(name.to_string()))
    }

    /// All rows of a worksheet, in sheet order.
    pub async fn list_rows(&self, key: &str, worksheet: &str) -> Result<Vec<RawRow>, ClientError> {
        let doc: ListDocument = self
            .get_feed(&format!("list/{key}/{worksheet}/private/full"))
            .await?;
        Ok(doc.feed.entry.iter().map(entry_to_row).collect())
    }

    /// Log in, locate `spreadsheet`, and download its first worksheet.
    pub async fn fetch_rows(
        &mut self,
        email: &str,
        password: &str,
        spreadsheet: &str,
    ) -> Result<Vec<RawRow>, ClientError> {
        self.login(email, password).await?;
        let key = self.find_spreadsheet(spreadsheet).await?;
        tracing::debug!("Spreadsheet '{}' has key {}", spreadsheet, key);
        let worksheet = self.first_worksheet(&key, spreadsheet).await?;
        let rows = self.list_rows(&key, &worksheet).await?;
        tracing::info!("Fetched {} rows from '{}'", rows.len(), spreadsheet);
        Ok(rows)
    }
}

// =============================================================================
// TESTS
// =============================================================================
