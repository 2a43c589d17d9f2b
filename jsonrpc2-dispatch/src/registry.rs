//! Method name → handler registry
//!
//! The registry is populated at startup and read during dispatch. It has no
//! removal or replacement operation: registering a name twice is rejected
//! and the first handler stays active.
//!
//! # Thread Safety
//!
//! Registries are cheaply cloneable (`Arc`-based). Registration needs
//! `&mut self`; lookups need `&self`. Once registration is over, a registry
//! (or the dispatcher that owns it) can be shared across tasks without any
//! locking.
//!
//! # Examples
//!
//! ```rust
//! use jsonrpc2_core::Context;
//! use jsonrpc2_dispatch::{from_typed_fn, Registry, RegistrationError};
//!
//! let mut registry = Registry::new();
//! registry
//!     .register("ping", from_typed_fn(|_ctx: Context, _: ()| async { Ok::<_, String>("pong") }))
//!     .unwrap();
//!
//! let again = registry.register("ping", from_typed_fn(|_ctx: Context, _: ()| async { Ok::<_, String>(1) }));
//! assert_eq!(again.unwrap_err(), RegistrationError::Duplicate("ping".into()));
//! ```

use crate::handler::Handler;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Why a handler was not registered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("handler with name {0} is already registered")]
    Duplicate(String),

    /// An empty method is always an invalid request, so it could never be called
    #[error("handler name must not be empty")]
    EmptyName,
}

/// Method name → handler map owned by a [`Dispatcher`](crate::Dispatcher)
#[derive(Clone, Default)]
pub struct Registry {
    handlers: Arc<HashMap<String, Arc<dyn Handler>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under `name`
    ///
    /// On error the registry is left untouched.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: Box<dyn Handler>,
    ) -> Result<(), RegistrationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistrationError::EmptyName);
        }
        if self.handlers.contains_key(&name) {
            return Err(RegistrationError::Duplicate(name));
        }

        Arc::make_mut(&mut self.handlers).insert(name, Arc::from(handler));
        Ok(())
    }

    /// Look up the handler for a method
    pub fn get(&self, name: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(name).cloned()
    }

    /// Whether a handler is registered under `name`
    ///
    /// ```rust
    /// use jsonrpc2_core::Context;
    /// use jsonrpc2_dispatch::{from_typed_fn, Registry};
    ///
    /// let mut registry = Registry::new();
    /// registry
    ///     .register("ping", from_typed_fn(|_ctx: Context, _: ()| async { Ok::<_, String>("pong") }))
    ///     .unwrap();
    ///
    /// assert!(registry.contains("ping"));
    /// assert!(!registry.contains("pong"));
    /// assert_eq!(registry.len(), 1);
    /// ```
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered method names, sorted
    pub fn methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = self.handlers.keys().cloned().collect();
        methods.sort();
        methods
    }

    /// Number of registered methods
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True until the first successful registration
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("methods", &self.methods())
            .finish()
    }
}
