//! JSON-RPC 2.0 envelopes
//!
//! The wire shapes handled by the dispatcher:
//!
//! ```text
//! Request:  {"jsonrpc":"2.0","id":"<string>","method":"<string>","params":<any>}
//! Success:  {"jsonrpc":"2.0","id":"<string>","result":<any>}
//! Failure:  {"jsonrpc":"2.0","id":"<string>","error":{"code":<int>,"message":"<string>"}}
//! ```
//!
//! Struct field order is the wire order, so serialized envelopes are
//! byte-for-byte predictable.
//!
//! # Encoded values
//!
//! Both `params` and `result` are held as [`RawValue`]. Params stay encoded
//! until the handler is known, so a bad params shape is reported as
//! "invalid params" instead of failing the whole payload. Results are
//! encoded by the handler adapter in the field order of the handler's own
//! result type.

use crate::error::ErrorObject;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// The only protocol version accepted in `jsonrpc`.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request envelope
///
/// Every field defaults when absent, so `{}` decodes into a zero-valued
/// request which validation later rejects as an invalid request.
///
/// # Examples
///
/// ```rust
/// use jsonrpc2_core::Request;
///
/// let req: Request = serde_json::from_str(
///     r#"{"jsonrpc":"2.0","id":"7","method":"hello","params":{"name":"user"}}"#,
/// ).unwrap();
///
/// assert!(req.is_valid());
/// assert_eq!(req.params.unwrap().get(), r#"{"name":"user"}"#);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Request {
    /// Protocol version, must be exactly "2.0"
    #[serde(default)]
    pub jsonrpc: String,
    /// Correlation id echoed back in the response
    #[serde(default)]
    pub id: String,
    /// Name of the registered handler to invoke
    #[serde(default)]
    pub method: String,
    /// Still-encoded parameters; `None` when absent or `null`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Box<RawValue>>,
}

impl Request {
    /// Create a "2.0" request
    pub fn new(
        id: impl Into<String>,
        method: impl Into<String>,
        params: Option<Box<RawValue>>,
    ) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.into(),
            method: method.into(),
            params,
        }
    }

    /// A request is well-formed when it names a method and speaks "2.0"
    pub fn is_valid(&self) -> bool {
        self.jsonrpc == JSONRPC_VERSION && !self.method.is_empty()
    }
}

/// JSON-RPC 2.0 response envelope
///
/// Exactly one of `result` and `error` is set. Use [`Response::success`]
/// and [`Response::error`] to build responses; both fix `jsonrpc` to "2.0".
///
/// # Examples
///
/// ```rust
/// use jsonrpc2_core::{ErrorObject, Response};
/// use serde_json::value::to_raw_value;
///
/// let ok = Response::success(to_raw_value(&42).unwrap(), "1");
/// assert!(ok.is_success());
///
/// let failed = Response::error(ErrorObject::method_not_found(), "2");
/// assert!(failed.is_error());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Always "2.0"
    pub jsonrpc: String,
    /// Id of the originating request, empty when it could not be determined
    #[serde(default)]
    pub id: String,
    /// Encoded handler result, present on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Box<RawValue>>,
    /// Wire error, present on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
}

impl Response {
    /// Successful response carrying an already-encoded result
    ///
    /// ```rust
    /// use jsonrpc2_core::Response;
    /// use serde_json::value::RawValue;
    ///
    /// let result = RawValue::from_string(r#"{"greet":"Hello user"}"#.to_string()).unwrap();
    /// let resp = Response::success(result, "1");
    /// assert_eq!(
    ///     serde_json::to_string(&resp).unwrap(),
    ///     r#"{"jsonrpc":"2.0","id":"1","result":{"greet":"Hello user"}}"#
    /// );
    /// ```
    pub fn success(result: Box<RawValue>, id: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.into(),
            result: Some(result),
            error: None,
        }
    }

    /// Failed response; use an empty id when the request's id is unknown
    ///
    /// ```rust
    /// use jsonrpc2_core::{ErrorObject, Response};
    ///
    /// let resp = Response::error(ErrorObject::parse_error(), "");
    /// assert_eq!(
    ///     serde_json::to_string(&resp).unwrap(),
    ///     r#"{"jsonrpc":"2.0","id":"","error":{"code":-32700,"message":"parse error"}}"#
    /// );
    /// ```
    pub fn error(error: ErrorObject, id: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.into(),
            result: None,
            error: Some(error),
        }
    }

    /// True when `result` is set, including a `null` result
    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }

    /// True when `error` is set
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::value::to_raw_value;

    #[test]
    fn test_request_defaults_missing_fields() {
        let req: Request = serde_json::from_str("{}").unwrap();
        assert_eq!(req.jsonrpc, "");
        assert_eq!(req.id, "");
        assert_eq!(req.method, "");
        assert!(req.params.is_none());
        assert!(!req.is_valid());
    }

    #[test]
    fn test_request_validity() {
        let mut req = Request::new("1", "hello", None);
        assert!(req.is_valid());

        req.jsonrpc = "1.0".to_string();
        assert!(!req.is_valid());

        let unnamed = Request::new("1", "", None);
        assert!(!unnamed.is_valid());
    }

    #[test]
    fn test_request_null_params_are_absent() {
        let req: Request =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":"1","method":"m","params":null}"#)
                .unwrap();
        assert!(req.params.is_none());
    }

    #[test]
    fn test_request_keeps_params_encoded() {
        let req: Request = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":"1","method":"m","params":{"b":1, "a":[true]}}"#,
        )
        .unwrap();
        assert_eq!(req.params.unwrap().get(), r#"{"b":1, "a":[true]}"#);
    }

    #[test]
    fn test_request_serialization_field_order() {
        let req = Request::new("9", "sum", Some(to_raw_value(&[1, 2]).unwrap()));
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(
            json,
            r#"{"jsonrpc":"2.0","id":"9","method":"sum","params":[1,2]}"#
        );
    }

    #[test]
    fn test_response_success_wire_shape() {
        let resp = Response::success(to_raw_value(&"pong").unwrap(), "1");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"jsonrpc":"2.0","id":"1","result":"pong"}"#);
        assert!(resp.is_success());
        assert!(!resp.is_error());
    }

    #[test]
    fn test_response_error_wire_shape() {
        let resp = Response::error(ErrorObject::invalid_params(), "3");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(
            json,
            r#"{"jsonrpc":"2.0","id":"3","error":{"code":-32602,"message":"invalid method params"}}"#
        );
        assert!(resp.is_error());
        assert!(resp.result.is_none());
    }

    #[test]
    fn test_response_null_result_is_still_success() {
        let resp = Response::success(to_raw_value(&()).unwrap(), "1");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"jsonrpc":"2.0","id":"1","result":null}"#);
    }
}
