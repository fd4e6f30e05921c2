pub mod reporter;
pub mod sink;

use thiserror::Error;

use crate::session::result::ResultSummary;

/// Observable outcome of the last submission.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ReportStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Failed(String),
}

impl ReportStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Idle => "",
            ReportStatus::Pending => "saving",
            ReportStatus::Success => "saved",
            ReportStatus::Failed(_) => "failed",
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, ReportStatus::Success | ReportStatus::Failed(_))
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("collector responded with status {0}")]
    Status(u16),
    #[error("network support is disabled in this build")]
    NetworkDisabled,
    #[error("could not encode summary: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Destination of a final summary. Called off the session's thread.
pub trait ResultSink: Send + Sync + 'static {
    fn submit(&self, summary: &ResultSummary) -> Result<(), ReportError>;
}

/// Hands a summary to a sink without waiting for the outcome.
pub trait ResultReporter {
    fn report(&mut self, summary: &ResultSummary);
}
