//! Request normalizer and response encoder
//!
//! # Decoding
//!
//! [`parse`] turns a raw payload into a [`Normalized`] sequence of requests.
//! Failure happens in two tiers:
//!
//! 1. **Top level**: the payload is empty, not JSON, or neither an object
//!    nor an array. The whole call fails with [`Error::Parse`] and no
//!    request is produced.
//! 2. **Per element**: one element of the sequence does not look like a
//!    request. It becomes a [`MalformedRequest`] in place, and its siblings
//!    are unaffected.
//!
//! A payload whose first significant byte is `[` is a batch, one starting
//! with `{` is a single request, wrapped internally as a one-element
//! sequence. Any other top-level value is a parse error. The original shape is kept in [`Normalized::is_batch`] so the
//! response mirrors it.
//!
//! # Encoding
//!
//! [`encode`] is infallible from the caller's point of view: if
//! serialization fails, a generic internal error payload is returned.

use crate::error::{Error, ErrorObject, Result};
use crate::types::{Request, Response};
use serde_json::value::RawValue;

const PARSE_ERROR_FALLBACK: &[u8] =
    br#"{"jsonrpc":"2.0","id":"","error":{"code":-32700,"message":"parse error"}}"#;
const INTERNAL_ERROR_FALLBACK: &[u8] =
    br#"{"jsonrpc":"2.0","id":"","error":{"code":-32603,"message":"internal error"}}"#;

/// A batch element that could not be decoded into a [`Request`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRequest {
    /// Id salvaged from the element when it is an object with a string `id`
    pub id: String,
    /// Decoder diagnostic, for logs only
    pub reason: String,
}

/// One element of a normalized payload
pub type RequestItem = std::result::Result<Request, MalformedRequest>;

/// The payload after top-level decoding
#[derive(Debug)]
pub struct Normalized {
    /// Whether the payload was a JSON array
    pub is_batch: bool,
    /// Elements in payload order
    pub items: Vec<RequestItem>,
}

impl Normalized {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Decode a raw payload into individual requests
///
/// # Errors
///
/// Returns [`Error::Parse`] for empty or whitespace-only input, for a
/// top-level value that is neither an object nor an array, and for input
/// that is not valid JSON. Malformed *elements* never produce an
/// error here.
///
/// # Examples
///
/// ```rust
/// use jsonrpc2_core::codec;
///
/// let normalized = codec::parse(br#"[1, {"jsonrpc":"2.0","id":"a","method":"m"}]"#).unwrap();
/// assert!(normalized.is_batch);
/// assert!(normalized.items[0].is_err());
/// assert!(normalized.items[1].is_ok());
///
/// assert!(codec::parse(b"[1, 2").is_err());
/// ```
pub fn parse(payload: &[u8]) -> Result<Normalized> {
    let first = payload
        .iter()
        .copied()
        .find(|b| !is_json_whitespace(*b))
        .ok_or_else(|| Error::Parse("empty payload".to_string()))?;

    let is_batch = match first {
        b'[' => true,
        b'{' => false,
        _ => return Err(Error::Parse("payload is neither an object nor an array".to_string())),
    };
    let elements: Vec<Box<RawValue>> = if is_batch {
        serde_json::from_slice(payload).map_err(|e| Error::Parse(e.to_string()))?
    } else {
        vec![serde_json::from_slice(payload).map_err(|e| Error::Parse(e.to_string()))?]
    };

    let items = elements.iter().map(|raw| decode_request(raw)).collect();

    Ok(Normalized { is_batch, items })
}

/// Decode one element into a request
pub fn decode_request(raw: &RawValue) -> RequestItem {
    serde_json::from_str::<Request>(raw.get()).map_err(|e| MalformedRequest {
        id: salvage_id(raw),
        reason: e.to_string(),
    })
}

/// Best-effort recovery of a string `id` from an element that failed to decode
fn salvage_id(raw: &RawValue) -> String {
    serde_json::from_str::<serde_json::Value>(raw.get())
        .ok()
        .and_then(|value| value.get("id").and_then(|id| id.as_str()).map(str::to_owned))
        .unwrap_or_default()
}

fn is_json_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Encode responses in the shape of the original payload
///
/// A non-batch payload with exactly one response encodes as a single object.
/// Everything else, including an empty batch and a batch of one, encodes as
/// an array in the given order.
pub fn encode(responses: &[Response], is_batch: bool) -> Vec<u8> {
    let encoded = match (is_batch, responses) {
        (false, [single]) => encode_response(single),
        _ => encode_batch_responses(responses),
    };

    encoded.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to encode responses");
        internal_error_payload()
    })
}

pub fn encode_response(resp: &Response) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(resp)?)
}

pub fn encode_batch_responses(responses: &[Response]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(responses)?)
}

/// The single response sent when the top-level payload cannot be decoded
pub fn parse_error_payload() -> Vec<u8> {
    encode_response(&Response::error(ErrorObject::parse_error(), ""))
        .unwrap_or_else(|_| PARSE_ERROR_FALLBACK.to_vec())
}

/// The single response sent when encoding itself fails
pub fn internal_error_payload() -> Vec<u8> {
    encode_response(&Response::error(ErrorObject::generic_internal_error(), ""))
        .unwrap_or_else(|_| INTERNAL_ERROR_FALLBACK.to_vec())
}
