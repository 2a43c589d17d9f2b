//! The dispatch engine
//!
//! [`Dispatcher::dispatch_message`] is the whole pipeline:
//!
//! ```text
//! bytes -> codec::parse -> [Request] -> handle (per element) -> [Response] -> codec::encode -> bytes
//! ```
//!
//! # Validation Order
//!
//! For each request the first failing check decides the response:
//!
//! 1. `jsonrpc != "2.0"` or empty `method` → -32600
//! 2. method not registered → -32601
//! 3. params do not decode into the handler's type → -32602
//! 4. handler returns an error → -32603 with the handler's text
//! 5. otherwise the handler's result
//!
//! A payload that is not JSON at all is answered with a single -32700
//! response with an empty id, whatever its intended shape.

use crate::batch::BatchProcessor;
use crate::config::DispatcherConfig;
use crate::handler::Handler;
use crate::metrics::UNKNOWN_METHOD;
use crate::registry::{Registry, RegistrationError};
use jsonrpc2_core::codec::{self, Normalized, RequestItem};
use jsonrpc2_core::{Context, Error, ErrorCode, ErrorObject, Request, Response, Result};
use serde_json::value::RawValue;
use std::time::Instant;

/// JSON-RPC 2.0 dispatcher
///
/// Register every handler first, then dispatch. Registration takes
/// `&mut self` and dispatch takes `&self`, so the two cannot interleave;
/// clone the dispatcher (cheap) or put it in an `Arc` to share it between
/// tasks.
///
/// # Examples
///
/// ```rust
/// use jsonrpc2_core::Context;
/// use jsonrpc2_dispatch::{from_typed_fn, Dispatcher};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Deserialize)]
/// struct HelloParams { name: String }
///
/// #[derive(Serialize)]
/// struct HelloResult { greet: String }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut dispatcher = Dispatcher::new();
/// dispatcher
///     .register("hello", from_typed_fn(|_ctx: Context, p: HelloParams| async move {
///         Ok::<_, String>(HelloResult { greet: format!("Hello {}", p.name) })
///     }))
///     .unwrap();
///
/// let response = dispatcher
///     .dispatch_message(
///         &Context::new(),
///         br#"{"jsonrpc":"2.0","id":"1","method":"hello","params":{"name":"user"}}"#,
///     )
///     .await;
///
/// assert_eq!(
///     response,
///     br#"{"jsonrpc":"2.0","id":"1","result":{"greet":"Hello user"}}"#.to_vec()
/// );
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    registry: Registry,
    config: DispatcherConfig,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            registry: Registry::new(),
            config,
        }
    }

    /// Register a handler; duplicates and empty names are rejected
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: Box<dyn Handler>,
    ) -> std::result::Result<(), RegistrationError> {
        let name = name.into();
        match self.registry.register(name.clone(), handler) {
            Ok(()) => {
                tracing::debug!(method = %name, "Handler registered");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(method = %name, error = %e, "Handler registration rejected");
                Err(e)
            }
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Answer a raw payload with a raw payload
    ///
    /// Never fails: every problem is reported as an encoded error response.
    #[tracing::instrument(skip(self, ctx, payload), fields(payload_len = payload.len()))]
    pub async fn dispatch_message(&self, ctx: &Context, payload: &[u8]) -> Vec<u8> {
        let Normalized { is_batch, items } = match codec::parse(payload) {
            Ok(normalized) => normalized,
            Err(e) => {
                tracing::warn!(error = %e, "Rejecting unparsable payload");
                if let Some(metrics) = &self.config.metrics {
                    metrics.record_parse_failure();
                    metrics.record_error(ErrorCode::ParseError.code());
                }
                return codec::parse_error_payload();
            }
        };

        let processor = self.config.batch_processor();
        if is_batch {
            if let Err(e) = processor.check_size(items.len()) {
                tracing::warn!(error = %e, "Rejecting oversized batch");
                self.record_error(e.code());
                let response = Response::error(e.to_error_object(), "");
                return codec::encode(&[response], false);
            }
            if let Some(metrics) = &self.config.metrics {
                metrics.record_batch(items.len() as u64, &processor.mode().to_string());
            }
        }

        let responses = self.respond_all(&processor, ctx, items).await;
        codec::encode(&responses, is_batch)
    }

    async fn respond_all(
        &self,
        processor: &BatchProcessor,
        ctx: &Context,
        items: Vec<RequestItem>,
    ) -> Vec<Response> {
        processor
            .process_batch(items, move |item| self.respond(ctx, item))
            .await
    }

    /// Turn one normalized element into its response
    async fn respond(&self, ctx: &Context, item: RequestItem) -> Response {
        let request = match item {
            Ok(request) => request,
            Err(malformed) => {
                tracing::debug!(id = %malformed.id, reason = %malformed.reason, "Malformed request");
                self.record_error(ErrorCode::InvalidRequest.code());
                return Response::error(ErrorObject::invalid_request(), malformed.id);
            }
        };

        let start = Instant::now();
        let outcome = self.handle(ctx, &request).await;

        if let Some(metrics) = &self.config.metrics {
            let method = if self.registry.contains(&request.method) {
                request.method.as_str()
            } else {
                UNKNOWN_METHOD
            };
            let status = if outcome.is_ok() { "success" } else { "error" };
            metrics.record_request(method, status, start.elapsed().as_secs_f64());
        }

        match outcome {
            Ok(result) => Response::success(result, request.id),
            Err(e) => {
                self.record_error(e.code());
                Response::error(self.error_object(&e), request.id)
            }
        }
    }

    /// Validate, resolve and invoke a single request
    ///
    /// Returns the handler's encoded result, or the error that decides the
    /// response's error object.
    #[tracing::instrument(skip(self, ctx, request), fields(method = %request.method, id = %request.id))]
    pub async fn handle(&self, ctx: &Context, request: &Request) -> Result<Box<RawValue>> {
        if !request.is_valid() {
            return Err(Error::InvalidRequest(format!(
                "jsonrpc={:?}, method={:?}",
                request.jsonrpc, request.method
            )));
        }

        let handler = self
            .registry
            .get(&request.method)
            .ok_or_else(|| Error::MethodNotFound(request.method.clone()))?;

        let result = handler.call(ctx.clone(), request.params.as_deref()).await;
        if let Err(e) = &result {
            tracing::debug!(error = %e, "Request failed");
        }
        result
    }

    fn error_object(&self, error: &Error) -> ErrorObject {
        match error {
            Error::Internal(_) | Error::Serialization(_) if self.config.mask_internal_errors => {
                ErrorObject::generic_internal_error()
            }
            _ => error.to_error_object(),
        }
    }

    fn record_error(&self, code: i64) {
        if let Some(metrics) = &self.config.metrics {
            metrics.record_error(code);
        }
    }
}
