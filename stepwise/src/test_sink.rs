//! In-memory sink for running surveys without a network.
//!
//! `TestSink` records every delivered submission so tests can inspect what the
//! wizard sent. A failing sink rejects every delivery with a transport error.
//!
//! # Example
//!
//! ```rust,ignore
//! use stepwise::{TestSink, Wizard};
//!
//! let sink = TestSink::new();
//! wizard.submit(&sink).await?;
//!
//! assert_eq!(sink.deliveries(), 1);
//! assert_eq!(sink.delivered()[0].get("postcode"), Some("SW1A 1AA"));
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use crate::{ResponseSink, SubmissionRecord};

/// A sink that keeps delivered records in memory.
///
/// Clones share the same record list.
#[derive(Debug, Clone, Default)]
pub struct TestSink {
    delivered: Arc<Mutex<Vec<SubmissionRecord>>>,
    failure: Option<String>,
}

/// Error type for TestSink.
#[derive(Debug, thiserror::Error)]
pub enum TestSinkError {
    #[error("Transport failure: {0}")]
    Transport(String),
}

impl TestSink {
    /// Create a sink that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that fails every delivery with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Records accepted so far, oldest first.
    pub fn delivered(&self) -> Vec<SubmissionRecord> {
        self.records().clone()
    }

    /// Number of delivery attempts that were accepted.
    pub fn deliveries(&self) -> usize {
        self.records().len()
    }

    fn records(&self) -> std::sync::MutexGuard<'_, Vec<SubmissionRecord>> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ResponseSink for TestSink {
    type Error = TestSinkError;

    async fn deliver(&self, record: &SubmissionRecord) -> Result<(), Self::Error> {
        if let Some(message) = &self.failure {
            return Err(TestSinkError::Transport(message.clone()));
        }
        self.records().push(record.clone());
        Ok(())
    }
}
