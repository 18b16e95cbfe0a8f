//! Error types shared by every endpoint.

use crate::transport::TransportError;
use serde::Deserialize;

/// Error body Hyperion returns with non-2xx responses.
///
/// ```json
/// { "statusCode": 400, "error": "Bad Request", "message": "querystring/account must be string" }
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HyperionErrorBody {
    #[serde(rename = "statusCode")]
    pub status_code: Option<u16>,
    pub error: Option<String>,
    pub message: Option<String>,
    pub code: Option<String>,
}

/// A response the API layer could not turn into a result.
///
/// Either the server answered with a non-success status (`parse` is `None`),
/// or it answered with success but the body did not match the expected shape
/// (`parse` holds the decoder's message). `content` is always the raw body.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}", describe(.status, .content, .parse.as_deref()))]
pub struct ApiError {
    pub status: u16,
    pub content: String,
    pub parse: Option<String>,
}

fn describe(status: &u16, content: &str, parse: Option<&str>) -> String {
    match parse {
        Some(detail) => format!("failed to parse response (HTTP {status}): {detail}"),
        None => format!("HTTP {status}: {content}"),
    }
}

impl ApiError {
    pub fn from_status(status: u16, content: impl Into<String>) -> Self {
        Self {
            status,
            content: content.into(),
            parse: None,
        }
    }

    pub fn from_parse(status: u16, content: impl Into<String>, source: &serde_json::Error) -> Self {
        Self {
            status,
            content: content.into(),
            parse: Some(source.to_string()),
        }
    }

    /// Returns `true` if the body arrived with a success status but could not
    /// be decoded.
    pub fn is_parse_failure(&self) -> bool {
        self.parse.is_some()
    }

    pub fn is_not_found(&self) -> bool {
        self.parse.is_none() && self.status == 404
    }

    pub fn is_server_error(&self) -> bool {
        self.parse.is_none() && (500..600).contains(&self.status)
    }

    /// Decodes the Hyperion error body, if the content has that shape.
    pub fn body(&self) -> Option<HyperionErrorBody> {
        serde_json::from_str::<HyperionErrorBody>(&self.content)
            .ok()
            .filter(|body| body.message.is_some() || body.error.is_some())
    }

    /// The server's error message (`message`, else `error`) when available.
    pub fn message(&self) -> Option<String> {
        let body = self.body()?;
        body.message.or(body.error)
    }
}

/// Client error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// HTTP status for API and parse failures; `None` when the request never
    /// produced a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(_) => None,
            Self::Api(api) => Some(api.status),
        }
    }

    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(api) => Some(api),
            Self::Transport(_) => None,
        }
    }

    pub fn is_parse_failure(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_parse_failure)
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
