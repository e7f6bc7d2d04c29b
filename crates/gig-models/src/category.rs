//! Task category model

use chrono::{DateTime, Utc};
use gig_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

/// Category record for task classification. Names are unique
/// case-insensitively; referenced categories are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identifiable for Category {
    fn id(&self) -> Id {
        self.id
    }
}
