//! jsonrpc2 - Transport-agnostic JSON-RPC 2.0 dispatcher
//!
//! This is the convenience crate that re-exports the jsonrpc2 sub-crates.
//!
//! # Architecture
//!
//! - **jsonrpc2-core**: envelopes, error codes, codec, context, observability
//! - **jsonrpc2-dispatch**: handler adapters, registry, dispatch engine,
//!   batch modes, configuration, metrics
//! - **jsonrpc2-macros**: the `#[handler]` attribute
//!
//! The dispatcher only sees bytes. Reading requests from a socket, an HTTP
//! body or a queue, and writing the returned bytes back, is up to the host.
//!
//! # Quick Start
//!
//! ```rust
//! use jsonrpc2::{handler, Context, Dispatcher};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Deserialize)]
//! struct HelloParams { name: String }
//!
//! #[derive(Serialize)]
//! struct HelloResult { greet: String }
//!
//! #[handler]
//! async fn hello(_ctx: Context, params: HelloParams) -> Result<HelloResult, String> {
//!     Ok(HelloResult { greet: format!("Hello {}", params.name) })
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.register("hello", hello())?;
//!
//! let response = dispatcher
//!     .dispatch_message(
//!         &Context::new(),
//!         br#"{"jsonrpc":"2.0","id":"1","method":"hello","params":{"name":"user"}}"#,
//!     )
//!     .await;
//!
//! assert_eq!(
//!     response,
//!     br#"{"jsonrpc":"2.0","id":"1","result":{"greet":"Hello user"}}"#.to_vec()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! The `#[handler]` expansion refers to `jsonrpc2_dispatch` by name, so
//! crates using the macro through this facade also depend on
//! `jsonrpc2-dispatch` directly.

pub use jsonrpc2_core as core;
pub use jsonrpc2_dispatch as dispatch;
pub use jsonrpc2_macros as macros;

pub use jsonrpc2_core::{Context, Error, ErrorCode, ErrorObject, Request, Response, Result};
pub use jsonrpc2_dispatch::{
    from_fn, from_typed_fn, BatchMode, DispatchMetrics, Dispatcher, DispatcherConfig, Handler,
    RegistrationError,
};
pub use jsonrpc2_macros::handler;
