use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::typing::TypingSession;

/// Final record handed to the result sink.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    #[serde(default)]
    pub participant_label: Option<String>,
    pub wpm: u32,
    pub accuracy: u32,
    pub timestamp: DateTime<Utc>,
}

impl ResultSummary {
    pub fn from_session(session: &TypingSession) -> Self {
        Self {
            participant_label: session.participant_label().map(|s| s.to_string()),
            wpm: session.wpm,
            accuracy: session.accuracy,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn serializes_camel_case_with_iso_timestamp() {
        let summary = ResultSummary {
            participant_label: Some("blue team".to_string()),
            wpm: 42,
            accuracy: 97,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["participantLabel"], "blue team");
        assert_eq!(json["wpm"], 42);
        assert_eq!(json["accuracy"], 97);
        assert_eq!(json["timestamp"], "2024-05-01T12:30:00Z");
    }

    #[test]
    fn missing_label_deserializes_as_none() {
        let summary: ResultSummary = serde_json::from_str(
            r#"{"wpm": 10, "accuracy": 100, "timestamp": "2024-05-01T12:30:00Z"}"#,
        )
        .unwrap();
        assert!(summary.participant_label.is_none());
    }
}
