//! Proposal repository
//!
//! Accepting a proposal writes the proposal and its parent task in one
//! transaction. Nothing serializes two concurrent accepts on the same task
//! beyond the row locks inside each transaction; the later commit overwrites
//! the assignee.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gig_core::traits::Id;
use gig_models::{Proposal, ProposalStatus};
use sqlx::PgPool;

use crate::repository::{RepositoryError, RepositoryResult};

const PROPOSAL_COLUMNS: &str = "id, task_id, professional_id, message, proposed_amount, \
     estimated_duration, status, accepted_at, rejected_at, created_at, updated_at";

/// DTO for creating a proposal
#[derive(Debug, Clone)]
pub struct CreateProposalDto {
    pub task_id: Id,
    pub professional_id: Id,
    pub message: String,
    pub proposed_amount: Option<f64>,
    pub estimated_duration: Option<String>,
}

/// Listing filter: task takes precedence when both ids are supplied.
#[derive(Debug, Clone, Default)]
pub struct ProposalFilter {
    pub task_id: Option<Id>,
    pub professional_id: Option<Id>,
}

/// Proposal store interface consumed by the service layer
#[async_trait]
pub trait ProposalStore: Send + Sync {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Proposal>>;
    async fn create(&self, dto: CreateProposalDto) -> RepositoryResult<Proposal>;
    async fn exists_for_pair(&self, task_id: Id, professional_id: Id) -> RepositoryResult<bool>;
    async fn list(&self, filter: ProposalFilter) -> RepositoryResult<Vec<Proposal>>;
    /// Marks the proposal ACCEPTED and assigns its professional to the
    /// parent task (status IN_PROGRESS), all in one transaction.
    async fn accept(&self, id: Id, task_id: Id, professional_id: Id, now: DateTime<Utc>)
        -> RepositoryResult<Proposal>;
    /// Writes status and both transition timestamps exactly as given.
    async fn set_status_with_timestamps(
        &self,
        id: Id,
        status: ProposalStatus,
        accepted_at: Option<DateTime<Utc>>,
        rejected_at: Option<DateTime<Utc>>,
    ) -> RepositoryResult<Proposal>;
    /// Plain status write; timestamps untouched.
    async fn set_status(&self, id: Id, status: ProposalStatus) -> RepositoryResult<Proposal>;
}

/// Postgres-backed proposal repository
pub struct ProposalRepository {
    pool: PgPool,
}

impl ProposalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProposalStore for ProposalRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Proposal>> {
        let row = sqlx::query_as::<_, Proposal>(&format!(
            "SELECT {PROPOSAL_COLUMNS} FROM proposals WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, dto: CreateProposalDto) -> RepositoryResult<Proposal> {
        let row = sqlx::query_as::<_, Proposal>(&format!(
            r#"
            INSERT INTO proposals (task_id, professional_id, message, proposed_amount,
                                   estimated_duration, status, created_at)
            VALUES ($1, $2, $3, $4, $5, 'PENDING', NOW())
            RETURNING {PROPOSAL_COLUMNS}
            "#
        ))
        .bind(dto.task_id)
        .bind(dto.professional_id)
        .bind(&dto.message)
        .bind(dto.proposed_amount)
        .bind(&dto.estimated_duration)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn exists_for_pair(&self, task_id: Id, professional_id: Id) -> RepositoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM proposals WHERE task_id = $1 AND professional_id = $2)",
        )
        .bind(task_id)
        .bind(professional_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list(&self, filter: ProposalFilter) -> RepositoryResult<Vec<Proposal>> {
        let rows = if let Some(task_id) = filter.task_id {
            sqlx::query_as::<_, Proposal>(&format!(
                "SELECT {PROPOSAL_COLUMNS} FROM proposals WHERE task_id = $1 ORDER BY id"
            ))
            .bind(task_id)
            .fetch_all(&self.pool)
            .await?
        } else if let Some(professional_id) = filter.professional_id {
            sqlx::query_as::<_, Proposal>(&format!(
                "SELECT {PROPOSAL_COLUMNS} FROM proposals WHERE professional_id = $1 ORDER BY id"
            ))
            .bind(professional_id)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Proposal>(&format!(
                "SELECT {PROPOSAL_COLUMNS} FROM proposals ORDER BY id"
            ))
            .fetch_all(&self.pool)
            .await?
        };

        Ok(rows)
    }

    async fn accept(
        &self,
        id: Id,
        task_id: Id,
        professional_id: Id,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Proposal> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, Proposal>(&format!(
            r#"
            UPDATE proposals SET
                status = 'ACCEPTED',
                accepted_at = $1,
                rejected_at = NULL,
                updated_at = NOW()
            WHERE id = $2
            RETURNING {PROPOSAL_COLUMNS}
            "#
        ))
        .bind(now)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Proposal with id {} not found", id)))?;

        sqlx::query(
            r#"
            UPDATE tasks SET
                assigned_professional_id = $1,
                status = 'IN_PROGRESS',
                updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(professional_id)
        .bind(task_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    async fn set_status_with_timestamps(
        &self,
        id: Id,
        status: ProposalStatus,
        accepted_at: Option<DateTime<Utc>>,
        rejected_at: Option<DateTime<Utc>>,
    ) -> RepositoryResult<Proposal> {
        let row = sqlx::query_as::<_, Proposal>(&format!(
            r#"
            UPDATE proposals SET
                status = $1,
                accepted_at = $2,
                rejected_at = $3,
                updated_at = NOW()
            WHERE id = $4
            RETURNING {PROPOSAL_COLUMNS}
            "#
        ))
        .bind(status)
        .bind(accepted_at)
        .bind(rejected_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Proposal with id {} not found", id)))?;

        Ok(row)
    }

    async fn set_status(&self, id: Id, status: ProposalStatus) -> RepositoryResult<Proposal> {
        let row = sqlx::query_as::<_, Proposal>(&format!(
            r#"
            UPDATE proposals SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {PROPOSAL_COLUMNS}
            "#
        ))
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Proposal with id {} not found", id)))?;

        Ok(row)
    }
}
