//! Task lifecycle model

use chrono::{DateTime, Utc};
use gig_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

/// Task status lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
    Closed,
}

impl TaskStatus {
    /// IN_PROGRESS and COMPLETED both require a resolved professional.
    pub fn requires_professional(&self) -> bool {
        matches!(self, TaskStatus::InProgress | TaskStatus::Completed)
    }

    /// Terminal for assignment purposes: no professional may be assigned.
    pub fn is_terminal_for_assignment(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Cancelled)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskStatus::Open => "OPEN",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Cancelled => "CANCELLED",
            TaskStatus::Closed => "CLOSED",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "task_priority", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

/// A unit of work posted by a client, classified by category.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub client_id: Id,
    pub category_id: Id,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub deadline: Option<DateTime<Utc>>,
    /// Comma-separated skill list
    pub required_skills: Option<String>,
    pub location: Option<String>,
    pub is_remote: bool,
    pub estimated_duration: Option<String>,
    pub assigned_professional_id: Option<Id>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// A user participates in a task as its client or its assigned
    /// professional.
    pub fn is_participant(&self, user_id: Id) -> bool {
        self.client_id == user_id || self.assigned_professional_id == Some(user_id)
    }

    /// Whether the given actor may manage this task (the owning client, or
    /// an admin which is checked separately by the caller).
    pub fn is_owned_by(&self, user_id: Id) -> bool {
        self.client_id == user_id
    }
}

/// Validates the budget range invariant: min must not exceed max when both
/// are present.
pub fn budget_range_valid(min: Option<f64>, max: Option<f64>) -> bool {
    match (min, max) {
        (Some(min), Some(max)) => min <= max,
        _ => true,
    }
}

impl Identifiable for Task {
    fn id(&self) -> Id {
        self.id
    }
}
