//! Review model: a post-engagement rating between two task participants.

use chrono::{DateTime, Utc};
use gig_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

/// At most one review exists per (task, reviewer, reviewee) triple.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Id,
    pub task_id: Id,
    pub reviewer_id: Id,
    pub reviewee_id: Id,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Computed rating aggregate for a user's exposed profile. A missing
/// average (no reviews) is distinct from a zero rating.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub review_count: i64,
    pub average_rating: Option<f64>,
}

impl Identifiable for Review {
    fn id(&self) -> Id {
        self.id
    }
}
