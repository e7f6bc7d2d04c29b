//! Proposal model: a professional's bid on an open task.

use chrono::{DateTime, Utc};
use gig_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "proposal_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProposalStatus::Pending => "PENDING",
            ProposalStatus::Accepted => "ACCEPTED",
            ProposalStatus::Rejected => "REJECTED",
            ProposalStatus::Withdrawn => "WITHDRAWN",
        };
        f.write_str(s)
    }
}

/// At most one proposal exists per (task, professional) pair. The
/// accepted_at/rejected_at timestamps are mutually exclusive: set on
/// transition, cleared on the reverse transition.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: Id,
    pub task_id: Id,
    pub professional_id: Id,
    pub message: String,
    pub proposed_amount: Option<f64>,
    pub estimated_duration: Option<String>,
    pub status: ProposalStatus,
    pub accepted_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identifiable for Proposal {
    fn id(&self) -> Id {
        self.id
    }
}
