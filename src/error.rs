//! Error types for the eBay API client.
//!
//! Every public call returns [`Result<T>`]. The [`Error`] variants separate
//! failures raised before anything hits the wire (bad paths, body encoding),
//! transport failures, undecodable success bodies, structured API errors and
//! authentication failures, so callers can match on the kind they care about.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// A specialized `Result` type for eBay API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all eBay API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The relative path handed to the request builder starts with `/`.
    #[error("invalid path {0:?}: relative paths must not start with '/'")]
    InvalidPath(String),

    /// The request body could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The relative path could not be resolved against the base URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The call was canceled through its [`Context`](crate::Context).
    #[error("request canceled")]
    Canceled,

    /// The call did not complete before its [`Context`](crate::Context) deadline.
    #[error("request deadline exceeded")]
    Timeout,

    /// A successful response body did not decode into the expected type.
    #[error("failed to decode response body: {0}")]
    Decoding(#[source] serde_json::Error),

    /// The API answered with a non-2xx status.
    #[error("API error: {0}")]
    Api(Box<ErrorData>),

    /// An access token could not be obtained or refreshed.
    #[error("token error: {0}")]
    Token(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Client configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A header name or value supplied by the caller is not valid HTTP.
    #[error("invalid header: {0}")]
    InvalidHeader(String),
}

impl Error {
    /// Returns `true` for failures at the network layer, including
    /// cancellation and deadline expiry.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Canceled | Error::Timeout)
    }

    /// Returns `true` if no token could be obtained for the call.
    pub fn is_token_error(&self) -> bool {
        matches!(self, Error::Token(_))
    }

    /// Returns `true` if the API answered with a non-2xx status.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api(_))
    }

    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(data) => Some(data.status),
            _ => None,
        }
    }

    /// Structured error payload of an API error.
    pub fn api_errors(&self) -> Option<&ErrorData> {
        match self {
            Error::Api(data) => Some(data),
            _ => None,
        }
    }

    /// Returns `true` if this is an API error whose payload contains any of
    /// `codes`.
    pub fn has_code(&self, codes: &[i64]) -> bool {
        self.api_errors().is_some_and(|data| data.contains_any(codes))
    }

    pub(crate) fn token<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Token(Box::new(err))
    }
}

/// Checks whether `err` carries any of the given eBay error codes.
///
/// `None` stands for "no error" and never matches. Errors other than
/// [`Error::Api`] never match either.
///
/// # Example
///
/// ```
/// use ebay_rs::error::{is_error, Error};
///
/// let result: Result<(), Error> = Err(Error::Canceled);
/// assert!(!is_error(result.as_ref().err(), &[11001]));
/// assert!(!is_error(None, &[11001]));
/// ```
pub fn is_error(err: Option<&Error>, codes: &[i64]) -> bool {
    err.is_some_and(|e| e.has_code(codes))
}

/// One error reported by the eBay API.
///
/// All fields are optional on the wire and default to empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorEntry {
    /// Numeric error code
    pub error_id: i64,
    /// Domain the error originated in (e.g. "API_BROWSE")
    pub domain: String,
    /// Subdomain within the domain
    pub sub_domain: String,
    /// Category ("REQUEST", "APPLICATION", "BUSINESS")
    pub category: String,
    /// Short description
    pub message: String,
    /// Detailed description
    pub long_message: String,
    /// Request elements the error refers to
    pub input_ref_ids: Vec<String>,
    /// Response elements the error refers to
    pub output_ref_ids: Vec<String>,
    /// Name/value pairs giving extra context
    pub parameters: Vec<ErrorParameter>,
}

/// A name/value pair attached to an [`ErrorEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorParameter {
    /// Parameter name
    pub name: String,
    /// Parameter value
    pub value: String,
}

/// Structured payload of a non-2xx response.
///
/// Holds the decoded `errors`/`warnings` arrays together with the response
/// status and a dump of the request that caused it. When the body is not
/// valid JSON both lists stay empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorData {
    /// Errors reported by the API
    pub errors: Vec<ErrorEntry>,
    /// Warnings reported alongside the errors
    pub warnings: Vec<ErrorEntry>,
    /// HTTP status code of the response
    #[serde(skip)]
    pub status: u16,
    /// Dump of the originating request
    #[serde(skip)]
    pub request_dump: String,
}

impl ErrorData {
    /// Decode an error response body.
    ///
    /// `errors` and `warnings` are decoded independently, so a malformed
    /// `warnings` list does not cost the error codes. Anything that does not
    /// decode is left empty; `status` and `request_dump` are left for the
    /// caller to fill in.
    pub fn from_body(body: &[u8]) -> Self {
        let document = match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(serde_json::Value::Object(document)) => document,
            Ok(_) => {
                debug!("error response body is not a JSON object");
                return Self::default();
            }
            Err(err) => {
                debug!(error = %err, "error response body is not JSON");
                return Self::default();
            }
        };

        Self {
            errors: entries(&document, "errors"),
            warnings: entries(&document, "warnings"),
            ..Default::default()
        }
    }

    /// Returns `true` if any error entry has one of `codes`.
    pub fn contains_any(&self, codes: &[i64]) -> bool {
        self.errors
            .iter()
            .any(|entry| codes.contains(&entry.error_id))
    }
}

fn entries(document: &serde_json::Map<String, serde_json::Value>, field: &str) -> Vec<ErrorEntry> {
    let Some(value) = document.get(field) else {
        return Vec::new();
    };
    serde_json::from_value(value.clone()).unwrap_or_else(|err| {
        debug!(field, error = %err, "ignoring malformed entries in error response");
        Vec::new()
    })
}

impl fmt::Display for ErrorData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}\n{:?}", self.status, self.request_dump, self.errors)
    }
}

impl std::error::Error for ErrorData {}

impl From<ErrorData> for Error {
    fn from(data: ErrorData) -> Self {
        Error::Api(Box::new(data))
    }
}
