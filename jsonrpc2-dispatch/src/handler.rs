//! Handler trait and adapters
//!
//! Every registered method is stored as a `dyn Handler`: a uniform adapter
//! from `(Context, still-encoded params)` to an encoded result or an
//! [`Error`]. Typed user functions are wrapped into that shape at
//! registration time, so the registry never needs to know the params or
//! result types and no runtime signature inspection takes place.
//!
//! # Creating Handlers
//!
//! 1. **from_typed_fn**: `async fn(Context, P) -> Result<R, E>` with
//!    `P: Deserialize`, `R: Serialize`, `E: Display`
//! 2. **from_fn**: raw handlers over `serde_json::Value`
//! 3. **#[handler] macro** (jsonrpc2-macros): generates a `from_typed_fn`
//!    factory and checks the function shape at compile time
//!
//! # Error Mapping
//!
//! The adapter reports, in order of occurrence:
//! - params that do not decode into `P` as [`Error::InvalidParams`]
//! - a handler failure as [`Error::Internal`] with the failure's text
//! - a result that does not encode as [`Error::Serialization`]
//!
//! # Examples
//!
//! ```rust
//! use jsonrpc2_core::Context;
//! use jsonrpc2_dispatch::from_typed_fn;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Deserialize)]
//! struct AddParams { a: i32, b: i32 }
//!
//! #[derive(Serialize)]
//! struct AddResult { sum: i32 }
//!
//! let handler = from_typed_fn(|_ctx: Context, p: AddParams| async move {
//!     Ok::<_, std::convert::Infallible>(AddResult { sum: p.a + p.b })
//! });
//! ```

use jsonrpc2_core::{Context, Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::value::{to_raw_value, RawValue};
use serde_json::Value;
use std::fmt::Display;
use std::future::{self, Future};
use std::marker::PhantomData;
use std::pin::Pin;

/// Boxed future returned by [`Handler::call`]
pub type HandlerResult = Pin<Box<dyn Future<Output = Result<Box<RawValue>>> + Send>>;

/// Uniform, type-erased handler stored in the registry
///
/// Implementations decode `params` synchronously, before the returned
/// future is created, so the future does not borrow the request.
pub trait Handler: Send + Sync {
    /// Invoke the handler
    ///
    /// `params` is `None` when the request carried no params (or `null`);
    /// adapters decode that case from JSON `null`.
    fn call(&self, ctx: Context, params: Option<&RawValue>) -> HandlerResult;
}

/// Decode params into the handler's declared type
fn decode_params<P: DeserializeOwned>(params: Option<&RawValue>) -> Result<P> {
    let encoded = params.map_or("null", RawValue::get);
    serde_json::from_str(encoded).map_err(|e| Error::InvalidParams(e.to_string()))
}

/// Adapter produced by [`from_typed_fn`]
pub struct TypedHandler<P, R, E, F> {
    func: F,
    _types: PhantomData<fn(P) -> (R, E)>,
}

impl<P, R, E, F, Fut> Handler for TypedHandler<P, R, E, F>
where
    P: DeserializeOwned + Send + 'static,
    R: Serialize + Send + 'static,
    E: Display + Send + 'static,
    F: Fn(Context, P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<R, E>> + Send + 'static,
{
    fn call(&self, ctx: Context, params: Option<&RawValue>) -> HandlerResult {
        let params: P = match decode_params(params) {
            Ok(params) => params,
            Err(e) => return Box::pin(future::ready(Err(e))),
        };

        let pending = (self.func)(ctx, params);
        Box::pin(async move {
            let result = pending.await.map_err(|e| Error::Internal(e.to_string()))?;
            Ok(to_raw_value(&result)?)
        })
    }
}

/// Wrap a typed async function into a registrable handler
///
/// This is the statically typed registration path: the compiler checks
/// that the function takes a context and a deserializable params type and
/// returns a `Result` whose error can be displayed.
pub fn from_typed_fn<P, R, E, F, Fut>(func: F) -> Box<dyn Handler>
where
    P: DeserializeOwned + Send + 'static,
    R: Serialize + Send + 'static,
    E: Display + Send + 'static,
    F: Fn(Context, P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<R, E>> + Send + 'static,
{
    Box::new(TypedHandler {
        func,
        _types: PhantomData,
    })
}

/// Adapter produced by [`from_fn`]
pub struct RawHandler<F> {
    func: F,
}

impl<F, Fut> Handler for RawHandler<F>
where
    F: Fn(Context, Option<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    fn call(&self, ctx: Context, params: Option<&RawValue>) -> HandlerResult {
        let params = match params.map(|raw| serde_json::from_str::<Value>(raw.get())) {
            None => None,
            Some(Ok(value)) => Some(value),
            Some(Err(e)) => return Box::pin(future::ready(Err(Error::InvalidParams(e.to_string())))),
        };

        let pending = (self.func)(ctx, params);
        Box::pin(async move {
            let value = pending.await?;
            Ok(to_raw_value(&value)?)
        })
    }
}

/// Wrap an async function over raw JSON values
///
/// Unlike [`from_typed_fn`], errors are reported under their own code, so a
/// raw handler can answer with `Error::InvalidParams` or a custom
/// `ErrorObject` after inspecting the params itself.
///
/// ```rust
/// use jsonrpc2_core::{Context, Error};
/// use jsonrpc2_dispatch::from_fn;
///
/// let echo = from_fn(|_ctx: Context, params| async move {
///     params.ok_or_else(|| Error::InvalidParams("params required".into()))
/// });
/// ```
pub fn from_fn<F, Fut>(func: F) -> Box<dyn Handler>
where
    F: Fn(Context, Option<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Box::new(RawHandler { func })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonrpc2_core::ErrorObject;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct AddParams {
        a: i32,
        b: i32,
    }

    #[derive(Serialize)]
    struct AddResult {
        sum: i32,
    }

    fn adder() -> Box<dyn Handler> {
        from_typed_fn(|_ctx: Context, params: AddParams| async move {
            Ok::<_, String>(AddResult {
                sum: params.a + params.b,
            })
        })
    }

    fn raw(json: &str) -> Box<RawValue> {
        RawValue::from_string(json.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_typed_handler() {
        let params = raw(r#"{"a": 5, "b": 3}"#);
        let result = adder()
            .call(Context::new(), Some(&params))
            .await
            .unwrap();

        assert_eq!(result.get(), r#"{"sum":8}"#);
    }

    #[tokio::test]
    async fn test_typed_handler_invalid_params() {
        let params = raw("1");
        let result = adder().call(Context::new(), Some(&params)).await;
        assert!(matches!(result, Err(Error::InvalidParams(_))));
    }

    #[tokio::test]
    async fn test_typed_handler_missing_params() {
        let result = adder().call(Context::new(), None).await;
        assert!(matches!(result, Err(Error::InvalidParams(_))));
    }

    #[tokio::test]
    async fn test_unit_params_accept_missing_params() {
        let handler = from_typed_fn(|_ctx: Context, _: ()| async {
            Ok::<_, String>("pong")
        });
        let result = handler.call(Context::new(), None).await.unwrap();
        assert_eq!(result.get(), r#""pong""#);
    }

    #[tokio::test]
    async fn test_typed_handler_failure_text() {
        let handler = from_typed_fn(|_ctx: Context, _: AddParams| async {
            Err::<AddResult, _>("im broken")
        });
        let params = raw(r#"{"a":1,"b":2}"#);

        match handler.call(Context::new(), Some(&params)).await {
            Err(Error::Internal(msg)) => assert_eq!(msg, "im broken"),
            other => panic!("Expected Internal error, got {:?}", other.map(|r| r.get().to_string())),
        }
    }

    #[tokio::test]
    async fn test_handler_sees_context() {
        let handler = from_typed_fn(|ctx: Context, _: ()| async move {
            Ok::<_, String>(ctx.value("user").cloned())
        });
        let ctx = Context::new().with_value("user", serde_json::json!("alice"));

        let result = handler.call(ctx, None).await.unwrap();
        assert_eq!(result.get(), r#""alice""#);
    }

    #[tokio::test]
    async fn test_raw_handler_echo() {
        let handler = from_fn(|_ctx: Context, params| async move {
            Ok(serde_json::json!({ "echo": params }))
        });
        let params = raw("[1,2]");

        let result = handler.call(Context::new(), Some(&params)).await.unwrap();
        assert_eq!(result.get(), r#"{"echo":[1,2]}"#);

        let empty = handler.call(Context::new(), None).await.unwrap();
        assert_eq!(empty.get(), r#"{"echo":null}"#);
    }

    #[tokio::test]
    async fn test_raw_handler_keeps_error_code() {
        let handler = from_fn(|_ctx: Context, _params| async {
            Err(Error::JsonRpc(ErrorObject::new(-32000, "busy")))
        });

        let err = handler.call(Context::new(), None).await.unwrap_err();
        assert_eq!(err.code(), -32000);
    }
}
