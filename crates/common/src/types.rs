use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Review statuses the API documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// Wire code used by the review API.
    pub fn code(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One submission's review status, validated against the status catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub name: String,
    pub status: HomeworkStatus,
}

/// Decoded body of a poll response, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct PollResult(pub serde_json::Value);

impl PollResult {
    pub fn body(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for PollResult {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// The last notified status, kept in memory by the poll loop only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportState {
    pub name: String,
    pub message: String,
}

impl ReportState {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Initial state at loop start. A formatted message is never empty, so this
    /// never equals a state built from a real record.
    pub fn sentinel() -> Self {
        Self::default()
    }

    pub fn is_sentinel(&self) -> bool {
        self.message.is_empty()
    }
}

/// Lower bound (unix seconds) passed as `from_date` to the next poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor(pub i64);

impl Cursor {
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    /// Resolve the bound to send; zero means "now".
    pub fn resolve(self) -> i64 {
        if self.0 <= 0 {
            Utc::now().timestamp()
        } else {
            self.0
        }
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
