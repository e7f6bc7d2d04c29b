//! Task repository
//!
//! Deleting a task cascades to its proposals and reviews inside one
//! transaction; there is no ORM-level cascade magic to rely on.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gig_core::traits::Id;
use gig_models::{Task, TaskPriority, TaskStatus};
use sqlx::PgPool;

use crate::repository::{RepositoryError, RepositoryResult};

const TASK_COLUMNS: &str = "id, title, description, client_id, category_id, budget_min, \
     budget_max, status, priority, deadline, required_skills, location, is_remote, \
     estimated_duration, assigned_professional_id, completed_at, created_at, updated_at";

/// DTO for creating a task
#[derive(Debug, Clone)]
pub struct CreateTaskDto {
    pub title: String,
    pub description: String,
    pub client_id: Id,
    pub category_id: Id,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub deadline: Option<DateTime<Utc>>,
    pub required_skills: Option<String>,
    pub location: Option<String>,
    pub is_remote: bool,
    pub estimated_duration: Option<String>,
    pub assigned_professional_id: Option<Id>,
}

/// Status mutation applied by the task lifecycle service. The assignee is
/// only overwritten when supplied; completed_at is only stamped when
/// supplied.
#[derive(Debug, Clone)]
pub struct TaskStatusUpdate {
    pub status: TaskStatus,
    pub assigned_professional_id: Option<Id>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Listing filters with AND semantics; an absent filter is no constraint.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub category_id: Option<Id>,
    pub client_id: Option<Id>,
}

/// Task store interface consumed by the service layer
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Task>>;
    async fn create(&self, dto: CreateTaskDto) -> RepositoryResult<Task>;
    async fn list(&self, filter: TaskFilter) -> RepositoryResult<Vec<Task>>;
    async fn update_status(&self, id: Id, update: TaskStatusUpdate) -> RepositoryResult<Task>;
    /// COMPLETED tasks where the user is the assigned professional.
    async fn count_completed_for_professional(&self, professional_id: Id) -> RepositoryResult<i64>;
    /// Deletes the task together with its proposals and reviews.
    async fn delete(&self, id: Id) -> RepositoryResult<()>;
}

/// Postgres-backed task repository
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for TaskRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Task>> {
        let row = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, dto: CreateTaskDto) -> RepositoryResult<Task> {
        let row = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (
                title, description, client_id, category_id, budget_min, budget_max,
                status, priority, deadline, required_skills, location, is_remote,
                estimated_duration, assigned_professional_id, created_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, NOW()
            )
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.client_id)
        .bind(dto.category_id)
        .bind(dto.budget_min)
        .bind(dto.budget_max)
        .bind(dto.status)
        .bind(dto.priority)
        .bind(dto.deadline)
        .bind(&dto.required_skills)
        .bind(&dto.location)
        .bind(dto.is_remote)
        .bind(&dto.estimated_duration)
        .bind(dto.assigned_professional_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self, filter: TaskFilter) -> RepositoryResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, Task>(&format!(
            r#"
            SELECT {TASK_COLUMNS} FROM tasks
            WHERE ($1::task_status IS NULL OR status = $1)
              AND ($2::BIGINT IS NULL OR category_id = $2)
              AND ($3::BIGINT IS NULL OR client_id = $3)
            ORDER BY id DESC
            "#
        ))
        .bind(filter.status)
        .bind(filter.category_id)
        .bind(filter.client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn update_status(&self, id: Id, update: TaskStatusUpdate) -> RepositoryResult<Task> {
        let row = sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks SET
                status = $1,
                assigned_professional_id = COALESCE($2, assigned_professional_id),
                completed_at = COALESCE($3, completed_at),
                updated_at = NOW()
            WHERE id = $4
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(update.status)
        .bind(update.assigned_professional_id)
        .bind(update.completed_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Task with id {} not found", id)))?;

        Ok(row)
    }

    async fn count_completed_for_professional(&self, professional_id: Id) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tasks WHERE assigned_professional_id = $1 AND status = 'COMPLETED'",
        )
        .bind(professional_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM reviews WHERE task_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM proposals WHERE task_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Task with id {} not found",
                id
            )));
        }

        tx.commit().await?;
        Ok(())
    }
}
