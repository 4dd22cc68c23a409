use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Pipeline stage a diagnostic entry originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestStage {
    Load,
    Structured,
    Manual,
    Classify,
}

impl fmt::Display for IngestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestStage::Load => write!(f, "load"),
            IngestStage::Structured => write!(f, "structured"),
            IngestStage::Manual => write!(f, "manual"),
            IngestStage::Classify => write!(f, "classify"),
        }
    }
}

/// One human-readable entry in the ordered parse-attempt log.
///
/// Diagnostics travel with the result instead of being scraped out of a
/// global logging facility; the presentation layer renders them as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseAttempt {
    pub stage: IngestStage,
    pub message: String,
}

impl ParseAttempt {
    pub fn new(stage: IngestStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

/// Observational progress feedback for the UI. Checkpoint values are
/// fixed percentages; reporting is not part of the correctness
/// contract.
pub trait ProgressSink: Send + Sync {
    fn progress(&self, percent: u8);
}

/// Sink that discards progress updates.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn progress(&self, _percent: u8) {}
}

/// Cooperative cancellation for an ingestion run. A new upload
/// supersedes interest in a prior run; the driver checks the token
/// between stages to avoid wasted work.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_token() {
        let token = CancelToken::new();
        assert!(!token.is_canceled());
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_canceled());
    }
}
