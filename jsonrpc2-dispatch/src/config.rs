//! Dispatcher configuration
//!
//! ```rust
//! use jsonrpc2_dispatch::{BatchMode, DispatcherConfig};
//!
//! let config = DispatcherConfig::default()
//!     .with_batch_mode(BatchMode::Concurrent)
//!     .with_max_batch_size(50)
//!     .with_mask_internal_errors(true);
//! assert_eq!(config.max_batch_size, Some(50));
//! ```
//!
//! # Environment Variables
//!
//! [`DispatcherConfig::from_env`] reads:
//! - `JSONRPC2_BATCH_MODE`: `sequential` or `concurrent`
//! - `JSONRPC2_MAX_BATCH_SIZE`: positive integer
//! - `JSONRPC2_MASK_INTERNAL_ERRORS`: `true`/`false` (also `1`/`0`, `yes`/`no`)
//!
//! Unparsable values are ignored with a warning and the default is kept.

use crate::batch::{BatchMode, BatchProcessor};
use crate::metrics::DispatchMetrics;
use std::fmt;
use std::sync::Arc;

pub const ENV_BATCH_MODE: &str = "JSONRPC2_BATCH_MODE";
pub const ENV_MAX_BATCH_SIZE: &str = "JSONRPC2_MAX_BATCH_SIZE";
pub const ENV_MASK_INTERNAL_ERRORS: &str = "JSONRPC2_MASK_INTERNAL_ERRORS";

#[derive(Clone, Default)]
pub struct DispatcherConfig {
    pub batch_mode: BatchMode,

    /// Largest accepted batch; `None` means unlimited
    pub max_batch_size: Option<usize>,

    /// Replace handler failure text with "internal error" on the wire
    pub mask_internal_errors: bool,

    pub metrics: Option<Arc<DispatchMetrics>>,
}

impl DispatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `JSONRPC2_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_BATCH_MODE) {
            match raw.parse() {
                Ok(mode) => config.batch_mode = mode,
                Err(e) => tracing::warn!(error = %e, "Ignoring {}", ENV_BATCH_MODE),
            }
        }

        if let Some(raw) = lookup(ENV_MAX_BATCH_SIZE) {
            match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => config.max_batch_size = Some(limit),
                _ => tracing::warn!(value = %raw, "Ignoring {}", ENV_MAX_BATCH_SIZE),
            }
        }

        if let Some(raw) = lookup(ENV_MASK_INTERNAL_ERRORS) {
            match parse_flag(&raw) {
                Some(mask) => config.mask_internal_errors = mask,
                None => tracing::warn!(value = %raw, "Ignoring {}", ENV_MASK_INTERNAL_ERRORS),
            }
        }

        config
    }

    pub fn with_batch_mode(mut self, mode: BatchMode) -> Self {
        self.batch_mode = mode;
        self
    }

    pub fn with_max_batch_size(mut self, limit: usize) -> Self {
        self.max_batch_size = Some(limit);
        self
    }

    pub fn with_mask_internal_errors(mut self, mask: bool) -> Self {
        self.mask_internal_errors = mask;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<DispatchMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub(crate) fn batch_processor(&self) -> BatchProcessor {
        BatchProcessor::with_limit(self.batch_mode, self.max_batch_size)
    }
}

impl fmt::Debug for DispatcherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatcherConfig")
            .field("batch_mode", &self.batch_mode)
            .field("max_batch_size", &self.max_batch_size)
            .field("mask_internal_errors", &self.mask_internal_errors)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DispatcherConfig::default();
        assert_eq!(config.batch_mode, BatchMode::Sequential);
        assert_eq!(config.max_batch_size, None);
        assert!(!config.mask_internal_errors);
        assert!(config.metrics.is_none());
    }

    #[test]
    fn test_from_lookup() {
        let config = DispatcherConfig::from_lookup(lookup(&[
            (ENV_BATCH_MODE, "concurrent"),
            (ENV_MAX_BATCH_SIZE, " 25 "),
            (ENV_MASK_INTERNAL_ERRORS, "yes"),
        ]));

        assert_eq!(config.batch_mode, BatchMode::Concurrent);
        assert_eq!(config.max_batch_size, Some(25));
        assert!(config.mask_internal_errors);
    }

    #[test]
    fn test_from_lookup_ignores_garbage() {
        let config = DispatcherConfig::from_lookup(lookup(&[
            (ENV_BATCH_MODE, "sideways"),
            (ENV_MAX_BATCH_SIZE, "0"),
            (ENV_MASK_INTERNAL_ERRORS, "maybe"),
        ]));

        assert_eq!(config.batch_mode, BatchMode::Sequential);
        assert_eq!(config.max_batch_size, None);
        assert!(!config.mask_internal_errors);
    }

    #[test]
    fn test_builder_and_processor() {
        let config = DispatcherConfig::new()
            .with_batch_mode(BatchMode::Concurrent)
            .with_max_batch_size(3);

        let processor = config.batch_processor();
        assert_eq!(processor.mode(), BatchMode::Concurrent);
        assert_eq!(processor.max_size(), Some(3));
        assert!(format!("{config:?}").contains("max_batch_size: Some(3)"));
    }
}
