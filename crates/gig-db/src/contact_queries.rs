//! Contact query repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gig_core::traits::Id;
use gig_models::{ContactQuery, QueryStatus};
use sqlx::PgPool;

use crate::repository::{RepositoryError, RepositoryResult};

const QUERY_COLUMNS: &str = "id, name, email, mobile, query_type, message, status, \
     admin_response, responded_at, responded_by, created_at";

/// DTO for submitting a contact query
#[derive(Debug, Clone)]
pub struct CreateContactQueryDto {
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub query_type: Option<String>,
    pub message: String,
}

/// DTO for the admin response
#[derive(Debug, Clone)]
pub struct RespondDto {
    pub admin_response: String,
    pub status: QueryStatus,
    pub responded_by: Id,
    pub responded_at: DateTime<Utc>,
}

/// Contact query store interface
#[async_trait]
pub trait ContactQueryStore: Send + Sync {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<ContactQuery>>;
    async fn create(&self, dto: CreateContactQueryDto) -> RepositoryResult<ContactQuery>;
    async fn list(&self, status: Option<QueryStatus>) -> RepositoryResult<Vec<ContactQuery>>;
    async fn respond(&self, id: Id, dto: RespondDto) -> RepositoryResult<ContactQuery>;
}

/// Postgres-backed contact query repository
pub struct ContactQueryRepository {
    pool: PgPool,
}

impl ContactQueryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactQueryStore for ContactQueryRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<ContactQuery>> {
        let row = sqlx::query_as::<_, ContactQuery>(&format!(
            "SELECT {QUERY_COLUMNS} FROM contact_queries WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, dto: CreateContactQueryDto) -> RepositoryResult<ContactQuery> {
        let row = sqlx::query_as::<_, ContactQuery>(&format!(
            r#"
            INSERT INTO contact_queries (name, email, mobile, query_type, message, status, created_at)
            VALUES ($1, $2, $3, $4, $5, 'PENDING', NOW())
            RETURNING {QUERY_COLUMNS}
            "#
        ))
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.mobile)
        .bind(&dto.query_type)
        .bind(&dto.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self, status: Option<QueryStatus>) -> RepositoryResult<Vec<ContactQuery>> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, ContactQuery>(&format!(
                    "SELECT {QUERY_COLUMNS} FROM contact_queries WHERE status = $1 ORDER BY id DESC"
                ))
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ContactQuery>(&format!(
                    "SELECT {QUERY_COLUMNS} FROM contact_queries ORDER BY id DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    async fn respond(&self, id: Id, dto: RespondDto) -> RepositoryResult<ContactQuery> {
        let row = sqlx::query_as::<_, ContactQuery>(&format!(
            r#"
            UPDATE contact_queries SET
                admin_response = $1,
                status = $2,
                responded_by = $3,
                responded_at = $4
            WHERE id = $5
            RETURNING {QUERY_COLUMNS}
            "#
        ))
        .bind(&dto.admin_response)
        .bind(dto.status)
        .bind(dto.responded_by)
        .bind(dto.responded_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            RepositoryError::NotFound(format!("Contact query with id {} not found", id))
        })?;

        Ok(row)
    }
}
