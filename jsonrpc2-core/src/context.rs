//! Request-scoped context passed to every handler
//!
//! The dispatcher hands the caller's [`Context`] to each handler untouched.
//! It is how a host propagates values (an authenticated user, a trace id)
//! and cooperative cancellation into handler code.
//!
//! Cloning is cheap: values sit behind an `Arc` and cancellation is a shared
//! `CancellationToken`, so a clone observes cancellation of the original and
//! vice versa.
//!
//! # Examples
//!
//! ```rust
//! use jsonrpc2_core::Context;
//! use serde_json::json;
//!
//! let ctx = Context::new().with_value("user", json!("alice"));
//! assert_eq!(ctx.value("user"), Some(&json!("alice")));
//!
//! let handle = ctx.clone();
//! handle.cancel();
//! assert!(ctx.is_cancelled());
//! ```

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct Context {
    values: Arc<HashMap<String, Value>>,
    cancellation: CancellationToken,
}

impl Context {
    /// An empty, never-cancelled context
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a value, replacing any previous value under `key`
    ///
    /// Clones made before this call do not see the new value.
    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        Arc::make_mut(&mut self.values).insert(key.into(), value);
        self
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Signal cancellation to every clone of this context
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Resolves once [`Context::cancel`] has been called
    pub async fn cancelled(&self) {
        self.cancellation.cancelled().await
    }
}
