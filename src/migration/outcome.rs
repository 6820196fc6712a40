use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal state of one processed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Failed,
    Skipped,
}

/// Immutable record of what happened to a single item. The engine records
/// exactly one entry per item per run; the full sequence forms the outcome
/// log, appended in completion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeEntry {
    pub source_id: String,
    pub source_name: String,
    /// Empty when no destination object exists for this item.
    pub dest_id: String,
    pub dest_name: String,
    pub timestamp: DateTime<Utc>,
    pub status: OutcomeStatus,
    /// Present iff status is `Failed`.
    pub error: Option<String>,
}

impl OutcomeEntry {
    pub fn success(
        source_id: impl Into<String>,
        source_name: impl Into<String>,
        dest_id: impl Into<String>,
        dest_name: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            source_name: source_name.into(),
            dest_id: dest_id.into(),
            dest_name: dest_name.into(),
            timestamp: Utc::now(),
            status: OutcomeStatus::Success,
            error: None,
        }
    }

    pub fn skipped(
        source_id: impl Into<String>,
        source_name: impl Into<String>,
        existing_dest_id: impl Into<String>,
        dest_name: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            source_name: source_name.into(),
            dest_id: existing_dest_id.into(),
            dest_name: dest_name.into(),
            timestamp: Utc::now(),
            status: OutcomeStatus::Skipped,
            error: None,
        }
    }

    pub fn failed(
        source_id: impl Into<String>,
        source_name: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            source_name: source_name.into(),
            dest_id: String::new(),
            dest_name: String::new(),
            timestamp: Utc::now(),
            status: OutcomeStatus::Failed,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_entry_carries_message_and_empty_dest() {
        let entry = OutcomeEntry::failed("f1", "a.txt", "quota exceeded");
        assert_eq!(entry.status, OutcomeStatus::Failed);
        assert_eq!(entry.error.as_deref(), Some("quota exceeded"));
        assert!(entry.dest_id.is_empty());
        assert!(entry.dest_name.is_empty());
    }

    #[test]
    fn non_failed_entries_have_no_error() {
        assert!(OutcomeEntry::success("f1", "a.txt", "c1", "a.txt").error.is_none());
        assert!(OutcomeEntry::skipped("f1", "a.txt", "c1", "a.txt").error.is_none());
    }
}
