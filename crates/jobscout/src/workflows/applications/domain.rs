use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for tracked applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Status lifecycle for a tracked application.
///
/// The documented graph: `applied -> interview -> {offer, rejected}`,
/// `applied -> rejected`, and any state may move to `withdrawn`. `offer`,
/// `rejected`, and `withdrawn` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Interview,
    Offer,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }

    /// Parses the wire representation. Unknown values surface upstream as
    /// `InvalidStatus`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "applied" => Some(ApplicationStatus::Applied),
            "interview" => Some(ApplicationStatus::Interview),
            "offer" => Some(ApplicationStatus::Offer),
            "rejected" => Some(ApplicationStatus::Rejected),
            "withdrawn" => Some(ApplicationStatus::Withdrawn),
            _ => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Offer | ApplicationStatus::Rejected | ApplicationStatus::Withdrawn
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Append-only audit entry recorded for every status change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub status: ApplicationStatus,
    pub timestamp: DateTime<Utc>,
    pub note: String,
}

/// A user-initiated application and its audit timeline.
///
/// Invariants: the timeline is never empty, and its final entry's status
/// equals `status`. `match_score` is a snapshot taken at creation and never
/// recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub owner_user_id: String,
    pub job_id: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub apply_url: String,
    pub match_score: u8,
    pub status: ApplicationStatus,
    pub timeline: Vec<TimelineEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields captured when the user reports applying to a posting. The owner
/// comes from the session layer, not the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub job_id: String,
    pub job_title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub apply_url: String,
    #[serde(default)]
    pub match_score: u8,
}
