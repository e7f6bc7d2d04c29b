//! Contact query model: the public inbox with an admin response workflow.

use chrono::{DateTime, Utc};
use gig_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "query_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryStatus {
    Pending,
    InProgress,
    Resolved,
    Closed,
}

impl QueryStatus {
    /// Resolved and closed queries accept no further responses.
    pub fn is_settled(&self) -> bool {
        matches!(self, QueryStatus::Resolved | QueryStatus::Closed)
    }
}

impl std::fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            QueryStatus::Pending => "PENDING",
            QueryStatus::InProgress => "IN_PROGRESS",
            QueryStatus::Resolved => "RESOLVED",
            QueryStatus::Closed => "CLOSED",
        };
        f.write_str(s)
    }
}

/// Submitted by unauthenticated visitors; answered by admins.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactQuery {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    /// GENERAL, TECHNICAL, BILLING, PARTNERSHIP, FEEDBACK, OTHER
    pub query_type: Option<String>,
    pub message: String,
    pub status: QueryStatus,
    pub admin_response: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub responded_by: Option<Id>,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for ContactQuery {
    fn id(&self) -> Id {
        self.id
    }
}
