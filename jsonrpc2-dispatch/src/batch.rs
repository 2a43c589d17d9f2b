//! Batch execution
//!
//! A batch is answered with one response per element, in element order.
//! [`BatchMode`] only decides how handlers are driven while producing those
//! responses:
//!
//! - **Sequential**: each element is handled to completion before the next
//!   one starts
//! - **Concurrent**: all elements are polled together on the calling task;
//!   responses are still collected in element order
//!
//! No task is spawned in either mode. A handler that never completes stalls
//! its whole batch.
//!
//! # Size Limiting
//!
//! An optional maximum batch size rejects oversized batches before any
//! handler runs.
//!
//! ```rust
//! use jsonrpc2_dispatch::{BatchMode, BatchProcessor};
//!
//! let processor = BatchProcessor::with_limit(BatchMode::Concurrent, Some(100));
//! assert!(processor.check_size(100).is_ok());
//! assert!(processor.check_size(101).is_err());
//! ```

use futures::future::join_all;
use jsonrpc2_core::codec::RequestItem;
use jsonrpc2_core::{Error, Response, Result};
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use thiserror::Error;

/// How the handlers of one batch are driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    /// One element after another, in order
    Sequential,

    /// All elements polled together; use when handlers are independent
    Concurrent,
}

impl Default for BatchMode {
    fn default() -> Self {
        BatchMode::Sequential
    }
}

impl fmt::Display for BatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchMode::Sequential => f.write_str("sequential"),
            BatchMode::Concurrent => f.write_str("concurrent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown batch mode: {0} (expected \"sequential\" or \"concurrent\")")]
pub struct ParseBatchModeError(String);

impl FromStr for BatchMode {
    type Err = ParseBatchModeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(BatchMode::Sequential),
            "concurrent" | "parallel" => Ok(BatchMode::Concurrent),
            _ => Err(ParseBatchModeError(s.to_string())),
        }
    }
}

/// Drives the elements of a batch through a per-element responder
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    mode: BatchMode,
    max_size: Option<usize>,
}

impl BatchProcessor {
    pub fn new(mode: BatchMode) -> Self {
        Self {
            mode,
            max_size: None,
        }
    }

    pub fn with_limit(mode: BatchMode, max_size: Option<usize>) -> Self {
        Self { mode, max_size }
    }

    pub fn mode(&self) -> BatchMode {
        self.mode
    }

    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    /// Reject batches above the configured limit
    pub fn check_size(&self, actual: usize) -> Result<()> {
        match self.max_size {
            Some(limit) if actual > limit => Err(Error::BatchSizeExceeded { limit, actual }),
            _ => Ok(()),
        }
    }

    /// Produce one response per element, in element order
    #[tracing::instrument(skip(self, items, respond), fields(batch_size = items.len(), mode = %self.mode))]
    pub async fn process_batch<F, Fut>(&self, items: Vec<RequestItem>, mut respond: F) -> Vec<Response>
    where
        F: FnMut(RequestItem) -> Fut,
        Fut: Future<Output = Response>,
    {
        let responses = match self.mode {
            BatchMode::Sequential => {
                let mut responses = Vec::with_capacity(items.len());
                for item in items {
                    responses.push(respond(item).await);
                }
                responses
            }
            BatchMode::Concurrent => join_all(items.into_iter().map(respond)).await,
        };

        tracing::debug!(response_count = responses.len(), "Batch processing completed");
        responses
    }
}
