//! Review repository

use async_trait::async_trait;
use gig_core::traits::Id;
use gig_models::{RatingSummary, Review};
use sqlx::PgPool;

use crate::repository::RepositoryResult;

const REVIEW_COLUMNS: &str =
    "id, task_id, reviewer_id, reviewee_id, rating, comment, created_at";

/// DTO for creating a review
#[derive(Debug, Clone)]
pub struct CreateReviewDto {
    pub task_id: Id,
    pub reviewer_id: Id,
    pub reviewee_id: Id,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Review store interface consumed by the service layer
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn create(&self, dto: CreateReviewDto) -> RepositoryResult<Review>;
    async fn exists_for_triple(
        &self,
        task_id: Id,
        reviewer_id: Id,
        reviewee_id: Id,
    ) -> RepositoryResult<bool>;
    async fn list_for_reviewee(&self, reviewee_id: Id) -> RepositoryResult<Vec<Review>>;
    /// Count and mean rating for a reviewee; average is None with no reviews.
    async fn rating_summary(&self, reviewee_id: Id) -> RepositoryResult<RatingSummary>;
}

/// Postgres-backed review repository
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewStore for ReviewRepository {
    async fn create(&self, dto: CreateReviewDto) -> RepositoryResult<Review> {
        let row = sqlx::query_as::<_, Review>(&format!(
            r#"
            INSERT INTO reviews (task_id, reviewer_id, reviewee_id, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(dto.task_id)
        .bind(dto.reviewer_id)
        .bind(dto.reviewee_id)
        .bind(dto.rating)
        .bind(&dto.comment)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn exists_for_triple(
        &self,
        task_id: Id,
        reviewer_id: Id,
        reviewee_id: Id,
    ) -> RepositoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reviews
                WHERE task_id = $1 AND reviewer_id = $2 AND reviewee_id = $3
            )
            "#,
        )
        .bind(task_id)
        .bind(reviewer_id)
        .bind(reviewee_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_for_reviewee(&self, reviewee_id: Id) -> RepositoryResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE reviewee_id = $1 ORDER BY id DESC"
        ))
        .bind(reviewee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn rating_summary(&self, reviewee_id: Id) -> RepositoryResult<RatingSummary> {
        let (review_count, average_rating) = sqlx::query_as::<_, (i64, Option<f64>)>(
            "SELECT COUNT(*), AVG(rating)::DOUBLE PRECISION FROM reviews WHERE reviewee_id = $1",
        )
        .bind(reviewee_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(RatingSummary {
            review_count,
            average_rating,
        })
    }
}
