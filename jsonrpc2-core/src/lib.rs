//! Core JSON-RPC 2.0 envelopes and wire codec for jsonrpc2
//!
//! This crate holds everything the dispatcher needs that does not depend on
//! handlers:
//!
//! - **Types**: request and response envelopes
//! - **Error handling**: the reserved error codes, wire error objects and the
//!   crate-wide `Error` type
//! - **Codec**: the request normalizer (single vs batch detection) and the
//!   response encoder
//! - **Context**: the request-scoped value handed to every handler
//! - **Observability**: OpenTelemetry/tracing bootstrap for host processes
//!
//! The crate is transport-agnostic: it turns bytes into envelopes and
//! envelopes back into bytes, nothing more.
//!
//! # Example
//!
//! ```rust
//! use jsonrpc2_core::codec;
//!
//! let payload = br#"[{"jsonrpc":"2.0","id":"1","method":"ping"}]"#;
//! let normalized = codec::parse(payload).unwrap();
//!
//! assert!(normalized.is_batch);
//! assert_eq!(normalized.items.len(), 1);
//! ```

pub mod codec;
pub mod context;
pub mod error;
pub mod observability;
pub mod types;

pub use context::Context;
pub use error::{Error, ErrorCode, ErrorObject, Result};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use types::{Request, Response, JSONRPC_VERSION};
