use crate::report::{ReportError, ResultSink};
use crate::session::result::ResultSummary;

/// Records the summary in the log only.
pub struct LogSink;

impl ResultSink for LogSink {
    fn submit(&self, summary: &ResultSummary) -> Result<(), ReportError> {
        tracing::info!(
            participant = summary.participant_label.as_deref().unwrap_or("-"),
            wpm = summary.wpm,
            accuracy = summary.accuracy,
            timestamp = %summary.timestamp.to_rfc3339(),
            "result recorded"
        );
        Ok(())
    }
}

/// POSTs the summary as JSON to a remote collector.
pub struct HttpSink {
    url: String,
    #[cfg(feature = "network")]
    client: reqwest::blocking::Client,
}

impl HttpSink {
    #[cfg(feature = "network")]
    pub fn new(url: &str) -> Result<Self, ReportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| ReportError::Request(e.to_string()))?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    #[cfg(not(feature = "network"))]
    pub fn new(url: &str) -> Result<Self, ReportError> {
        Ok(Self {
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ResultSink for HttpSink {
    #[cfg(feature = "network")]
    fn submit(&self, summary: &ResultSummary) -> Result<(), ReportError> {
        let body = serde_json::to_string(summary)?;
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| ReportError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ReportError::Status(status.as_u16()))
        }
    }

    #[cfg(not(feature = "network"))]
    fn submit(&self, _summary: &ResultSummary) -> Result<(), ReportError> {
        Err(ReportError::NetworkDisabled)
    }
}
