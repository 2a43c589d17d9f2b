//! Transport-agnostic JSON-RPC 2.0 dispatcher
//!
//! Register typed async handlers under method names, then hand raw request
//! payloads to [`Dispatcher::dispatch_message`] and write the returned bytes
//! back on whatever transport delivered them.
//!
//! # Core Features
//!
//! - **Typed handlers**: `async fn(Context, P) -> Result<R, E>` with params
//!   decoded and results encoded by serde
//! - **Single and batch payloads**: one response per element, in order; a
//!   one-element batch is still answered with an array
//! - **Reserved error codes**: -32700, -32600, -32601, -32602 and -32603
//! - **Batch modes**: sequential (default) or concurrent handler execution
//! - **Batch size limit** and **internal error masking**, both optional
//! - **Observability**: `tracing` spans per payload and per request, plus
//!   OpenTelemetry metrics through [`DispatchMetrics`]
//!
//! # Quick Start
//!
//! ```rust
//! use jsonrpc2_core::Context;
//! use jsonrpc2_dispatch::{from_typed_fn, Dispatcher};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut dispatcher = Dispatcher::new();
//! dispatcher
//!     .register("sum", from_typed_fn(|_ctx: Context, nums: Vec<i64>| async move {
//!         Ok::<_, String>(nums.iter().sum::<i64>())
//!     }))
//!     .unwrap();
//!
//! let out = dispatcher
//!     .dispatch_message(&Context::new(), br#"[{"jsonrpc":"2.0","id":"a","method":"sum","params":[1,2]}]"#)
//!     .await;
//! assert_eq!(out, br#"[{"jsonrpc":"2.0","id":"a","result":3}]"#.to_vec());
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`handler`]: the `Handler` trait and typed/raw adapters
//! - [`registry`]: method name → handler map
//! - [`dispatcher`]: validation, resolution and invocation
//! - [`batch`]: batch execution modes and size limits
//! - [`config`]: dispatcher options and environment loading
//! - [`metrics`]: OpenTelemetry instruments

pub mod batch;
pub mod config;
pub mod dispatcher;
pub mod handler;
pub mod metrics;
pub mod registry;

pub use batch::{BatchMode, BatchProcessor, ParseBatchModeError};
pub use config::DispatcherConfig;
pub use dispatcher::Dispatcher;
pub use handler::{from_fn, from_typed_fn, Handler, HandlerResult};
pub use metrics::DispatchMetrics;
pub use registry::{RegistrationError, Registry};
