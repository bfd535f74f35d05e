//! Typed error system for the catalog SDK.
//!
//! Every failure surfaced by the data-access layer falls in one of three
//! families: transport (no usable response), schema (the server answered with
//! GraphQL errors) or local (request/response encoding, catalog mismatch).

use crate::typed::GraphQLError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Typed error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    // Transport errors
    NetworkError,
    Timeout,
    ConnectionRefused,
    HttpError,
    HttpsNotSupported,
    InvalidUrl,
    InvalidResponse,

    // Schema errors
    ExecutionError,
    ValidationError,
    NotFound,
    NoData,

    // Local errors
    SerializeError,
    DeserializeError,
    SchemaMismatch,
    InvalidRequest,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::ConnectionRefused => "CONNECTION_REFUSED",
            Self::HttpError => "HTTP_ERROR",
            Self::HttpsNotSupported => "HTTPS_NOT_SUPPORTED",
            Self::InvalidUrl => "INVALID_URL",
            Self::InvalidResponse => "INVALID_RESPONSE",
            Self::ExecutionError => "EXECUTION_ERROR",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::NoData => "NO_DATA",
            Self::SerializeError => "SERIALIZE_ERROR",
            Self::DeserializeError => "DESERIALIZE_ERROR",
            Self::SchemaMismatch => "SCHEMA_MISMATCH",
            Self::InvalidRequest => "INVALID_REQUEST",
        }
    }

    /// Returns true if no GraphQL response was obtained.
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::NetworkError
                | Self::Timeout
                | Self::ConnectionRefused
                | Self::HttpError
                | Self::HttpsNotSupported
                | Self::InvalidUrl
                | Self::InvalidResponse
        )
    }

    /// Returns true if the server answered with structured errors.
    pub const fn is_schema(&self) -> bool {
        matches!(
            self,
            Self::ExecutionError | Self::ValidationError | Self::NotFound | Self::NoData
        )
    }

    /// Maps a server-side error classification (`extensions.classification`).
    pub fn from_classification(classification: &str) -> Self {
        match classification {
            "NOT_FOUND" => Self::NotFound,
            "BAD_REQUEST" | "ValidationError" | "InvalidSyntax" => Self::ValidationError,
            _ => Self::ExecutionError,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// SDK error.
#[derive(Error, Debug, Clone)]
#[error("[{code}] {message}")]
pub struct SdkError {
    /// Typed error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// GraphQL errors exactly as the server reported them.
    pub graphql_errors: Vec<GraphQLError>,
    /// Extension data for debugging.
    pub extensions: Option<HashMap<String, serde_json::Value>>,
}

impl SdkError {
    /// Creates a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            graphql_errors: Vec::new(),
            extensions: None,
        }
    }

    /// Builds a schema-level error from the server's error list.
    ///
    /// The code follows the first error's classification; all errors are kept.
    pub fn from_graphql(errors: Vec<GraphQLError>) -> Self {
        let (code, message) = match errors.first() {
            Some(first) => (
                first
                    .classification()
                    .map_or(ErrorCode::ExecutionError, ErrorCode::from_classification),
                first.message.clone(),
            ),
            None => (ErrorCode::ExecutionError, "Unknown GraphQL error".to_string()),
        };
        Self {
            code,
            message,
            graphql_errors: errors,
            extensions: None,
        }
    }

    /// Adds extension data.
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let extensions = self.extensions.get_or_insert_with(HashMap::new);
        if let Ok(v) = serde_json::to_value(value) {
            extensions.insert(key.into(), v);
        }
        self
    }

    // Convenience constructors

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkError, message)
    }

    /// Creates a timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorCode::Timeout, "Request timed out")
    }

    /// Creates a serialization error.
    pub fn serialize(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializeError, message)
    }

    /// Creates a deserialization error.
    pub fn deserialize(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DeserializeError, message)
    }

    /// Creates a not found error.
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::new(ErrorCode::NotFound, format!("{} not found", resource))
    }

    /// Returns true if no GraphQL response was obtained.
    pub fn is_transport(&self) -> bool {
        self.code.is_transport()
    }

    /// Returns true if the server answered with structured errors.
    pub fn is_schema(&self) -> bool {
        self.code.is_schema()
    }
}

impl Serialize for SdkError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("SdkError", 4)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("message", &self.message)?;
        if !self.graphql_errors.is_empty() {
            state.serialize_field("errors", &self.graphql_errors)?;
        }
        if let Some(ref ext) = self.extensions {
            state.serialize_field("extensions", ext)?;
        }
        state.end()
    }
}

/// Type alias for SDK results.
pub type SdkResult<T> = std::result::Result<T, SdkError>;

/// Result extension for mapping foreign errors with a code.
pub trait ResultExt<T> {
    /// Maps the error to an SdkError with the given code.
    fn map_sdk_err(self, code: ErrorCode) -> SdkResult<T>;

    /// Maps the error to an SdkError with the given code and message.
    fn map_sdk_err_with(self, code: ErrorCode, message: impl Into<String>) -> SdkResult<T>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn map_sdk_err(self, code: ErrorCode) -> SdkResult<T> {
        self.map_err(|e| SdkError::new(code, e.to_string()))
    }

    fn map_sdk_err_with(self, code: ErrorCode, message: impl Into<String>) -> SdkResult<T> {
        self.map_err(|e| {
            SdkError::new(code, message).with_extension("original_error", e.to_string())
        })
    }
}
