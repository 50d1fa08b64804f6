//! Shared reqwest plumbing for the REST adapters.
//!
//! Owns the base URL, client timeout, request correlation header, and the
//! translation of transport outcomes into [`HttpFailure`].

use std::fmt;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::debug;
use url::Url;
use uuid::Uuid;

use super::dto::ApiErrorDto;

const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Error returned when the configured API base URL is unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiBaseUrlError {
    /// The text is not a URL.
    Invalid { message: String },
    /// The URL is not an `http` or `https` URL with a path.
    UnsupportedScheme { scheme: String },
}

impl fmt::Display for ApiBaseUrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { message } => write!(f, "invalid API base URL: {message}"),
            Self::UnsupportedScheme { scheme } => {
                write!(f, "API base URL must use http or https (got {scheme})")
            }
        }
    }
}

impl std::error::Error for ApiBaseUrlError {}

/// Validated root of the REST API, e.g. `http://localhost:8080/api`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBaseUrl(Url);

impl ApiBaseUrl {
    /// Parse and validate a base URL.
    ///
    /// # Examples
    /// ```
    /// use medimanager::outbound::http::ApiBaseUrl;
    ///
    /// assert!(ApiBaseUrl::parse("http://localhost:8080/api").is_ok());
    /// assert!(ApiBaseUrl::parse("mailto:ops@example.com").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ApiBaseUrlError> {
        let url = Url::parse(raw.trim()).map_err(|err| ApiBaseUrlError::Invalid {
            message: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ApiBaseUrlError::UnsupportedScheme {
                scheme: url.scheme().to_owned(),
            });
        }
        Ok(Self(url))
    }

    /// Append path segments, percent-encoding each one.
    pub fn join<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.0.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl fmt::Display for ApiBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Transport outcome shared by every adapter before port-specific mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum HttpFailure {
    Transport(String),
    Timeout(String),
    Status { status: StatusCode, body: Vec<u8> },
}

impl HttpFailure {
    fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }

    fn from_status(status: StatusCode, body: &[u8]) -> Self {
        Self::Status {
            status,
            body: body.to_vec(),
        }
    }
}

/// Reqwest client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: ApiBaseUrl,
}

impl ApiClient {
    /// Build a client whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: ApiBaseUrl, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &ApiBaseUrl {
        &self.base_url
    }

    /// Pair an already configured reqwest client with `base_url`.
    #[cfg(test)]
    pub(super) fn with_http_client(client: Client, base_url: ApiBaseUrl) -> Self {
        Self { client, base_url }
    }

    pub(super) fn http(&self) -> &Client {
        &self.client
    }

    /// Send `request` and return the body of a 2xx response.
    pub(super) async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, HttpFailure> {
        let request_id = Uuid::new_v4();
        let response = request
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .send()
            .await
            .map_err(|err| HttpFailure::from_reqwest(&err))?;

        let status = response.status();
        debug!(
            %request_id,
            url = %response.url(),
            status = status.as_u16(),
            "collaborator responded"
        );
        let body = response
            .bytes()
            .await
            .map_err(|err| HttpFailure::from_reqwest(&err))?;
        if !status.is_success() {
            return Err(HttpFailure::from_status(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

/// Message for a rejected save: the backend's `message` field when the body
/// carries one, otherwise a generic API status line.
pub(super) fn save_failure_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ApiErrorDto>(body)
        .ok()
        .and_then(|dto| dto.message)
        .map(|message| message.trim().to_owned())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("API error! status: {}", status.as_u16()))
}

/// Message for a failed fetch or delete; the body is not consulted.
pub(super) fn http_failure_message(status: StatusCode) -> String {
    format!("HTTP error! status: {}", status.as_u16())
}

/// First line of a text body, for short free-text replies.
pub(super) fn text_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(PREVIEW_CHAR_LIMIT)
        .collect()
}
