//! Error types for jsonrpc2
//!
//! Two layers of errors live here:
//!
//! - **Error**: the crate-wide error type used inside the dispatcher
//!   (built with thiserror)
//! - **ErrorObject**: the `error` member of a response as it appears on the
//!   wire
//!
//! # Reserved Error Codes
//!
//! | Code   | Meaning                        | Message                                        |
//! |--------|--------------------------------|------------------------------------------------|
//! | -32700 | malformed top-level payload    | `parse error`                                  |
//! | -32600 | missing method or bad version  | `provided JSON is not a valid Request object`  |
//! | -32601 | method not registered          | `method not found`                             |
//! | -32602 | params do not fit the handler  | `invalid method params`                        |
//! | -32603 | handler failure, encode error  | the failure's own text, or `internal error`    |
//!
//! Messages are fixed per code class. Details about *why* a request was
//! rejected stay in `Error` (and in logs); they do not leak onto the wire,
//! with the deliberate exception of handler failure text.
//!
//! # Examples
//!
//! ```rust
//! use jsonrpc2_core::{Error, ErrorCode};
//!
//! let error = Error::MethodNotFound("unknownMethod".into());
//! let wire = error.to_error_object();
//!
//! assert_eq!(wire.code, ErrorCode::MethodNotFound.code());
//! assert_eq!(wire.message, "method not found");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for jsonrpc2 operations
pub type Result<T> = std::result::Result<T, Error>;

/// The five error codes reserved by JSON-RPC 2.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
}

impl ErrorCode {
    /// Numeric wire value
    pub const fn code(self) -> i64 {
        match self {
            ErrorCode::ParseError => -32700,
            ErrorCode::InvalidRequest => -32600,
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::InternalError => -32603,
        }
    }

    /// Fixed message sent for this class
    pub const fn message(self) -> &'static str {
        match self {
            ErrorCode::ParseError => "parse error",
            ErrorCode::InvalidRequest => "provided JSON is not a valid Request object",
            ErrorCode::MethodNotFound => "method not found",
            ErrorCode::InvalidParams => "invalid method params",
            ErrorCode::InternalError => "internal error",
        }
    }
}

/// Crate-wide error type
///
/// Every variant maps onto exactly one wire error through
/// [`Error::to_error_object`]. The `String` payloads carry diagnostic detail
/// for logs; the wire message for the protocol classes is fixed.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The top-level payload is not JSON, or is empty
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("method not found: {0}")]
    MethodNotFound(String),

    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// A handler failed; the text is what the caller sees
    #[error("{0}")]
    Internal(String),

    /// A value could not be encoded to JSON
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("batch size limit exceeded: limit={limit}, actual={actual}")]
    BatchSizeExceeded { limit: usize, actual: usize },

    /// A ready-made wire error, passed through untouched
    #[error("JSON-RPC error: {0}")]
    JsonRpc(#[from] ErrorObject),
}

impl Error {
    /// The reserved code class this error is reported under
    pub fn code(&self) -> i64 {
        match self {
            Error::Parse(_) => ErrorCode::ParseError.code(),
            Error::InvalidRequest(_) | Error::BatchSizeExceeded { .. } => {
                ErrorCode::InvalidRequest.code()
            }
            Error::MethodNotFound(_) => ErrorCode::MethodNotFound.code(),
            Error::InvalidParams(_) => ErrorCode::InvalidParams.code(),
            Error::Internal(_) | Error::Serialization(_) => ErrorCode::InternalError.code(),
            Error::JsonRpc(obj) => obj.code,
        }
    }

    /// Build the wire error for this failure
    pub fn to_error_object(&self) -> ErrorObject {
        match self {
            Error::Parse(_) => ErrorObject::parse_error(),
            Error::InvalidRequest(_) => ErrorObject::invalid_request(),
            Error::MethodNotFound(_) => ErrorObject::method_not_found(),
            Error::InvalidParams(_) => ErrorObject::invalid_params(),
            Error::Internal(msg) | Error::Serialization(msg) => ErrorObject::internal_error(msg),
            Error::BatchSizeExceeded { limit, actual } => ErrorObject::invalid_request()
                .with_data(serde_json::json!({ "limit": limit, "actual": actual })),
            Error::JsonRpc(obj) => obj.clone(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// JSON-RPC 2.0 error object, the `error` member of a failed response
///
/// `data` is omitted from the wire when `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Reserved code (-32700 to -32603) or an application-defined one
    pub code: i64,

    /// Fixed message for protocol errors, the failure text for handler errors
    pub message: String,

    /// Optional structured detail, e.g. `{"limit":..,"actual":..}` for an
    /// oversized batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ErrorObject {
    /// Arbitrary wire error; raw handlers use this for application codes
    ///
    /// ```rust
    /// use jsonrpc2_core::ErrorObject;
    ///
    /// let busy = ErrorObject::new(-32000, "server busy");
    /// assert_eq!(busy.to_string(), "[-32000] server busy");
    /// ```
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Error object for a reserved code with its fixed message
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code.code(), code.message())
    }

    /// Attach structured detail
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn parse_error() -> Self {
        Self::from_code(ErrorCode::ParseError)
    }

    pub fn invalid_request() -> Self {
        Self::from_code(ErrorCode::InvalidRequest)
    }

    pub fn method_not_found() -> Self {
        Self::from_code(ErrorCode::MethodNotFound)
    }

    pub fn invalid_params() -> Self {
        Self::from_code(ErrorCode::InvalidParams)
    }

    /// Internal error carrying a specific message (e.g. a handler's failure text)
    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError.code(), msg)
    }

    /// Internal error with the generic message
    pub fn generic_internal_error() -> Self {
        Self::from_code(ErrorCode::InternalError)
    }
}

impl std::fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorObject {}
