//! Category repository

use async_trait::async_trait;
use gig_core::traits::Id;
use gig_models::Category;
use sqlx::PgPool;

use crate::repository::RepositoryResult;

const CATEGORY_COLUMNS: &str = "id, name, description, is_active, created_at, updated_at";

/// DTO for creating a category
#[derive(Debug, Clone)]
pub struct CreateCategoryDto {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating a category
#[derive(Debug, Clone)]
pub struct UpdateCategoryDto {
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Category store interface
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Category>>;
    async fn find_all(&self) -> RepositoryResult<Vec<Category>>;
    async fn create(&self, dto: CreateCategoryDto) -> RepositoryResult<Category>;
    async fn update(&self, id: Id, dto: UpdateCategoryDto) -> RepositoryResult<Category>;
    /// Case-insensitive name existence check, optionally excluding a row
    /// (used when renaming a category onto itself).
    async fn exists_by_name(&self, name: &str, exclude_id: Option<Id>) -> RepositoryResult<bool>;
}

/// Postgres-backed category repository
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Category>> {
        let row = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(&self, dto: CreateCategoryDto) -> RepositoryResult<Category> {
        let row = sqlx::query_as::<_, Category>(&format!(
            r#"
            INSERT INTO categories (name, description, is_active, created_at)
            VALUES ($1, $2, TRUE, NOW())
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: Id, dto: UpdateCategoryDto) -> RepositoryResult<Category> {
        let row = sqlx::query_as::<_, Category>(&format!(
            r#"
            UPDATE categories SET
                name = $1,
                description = $2,
                is_active = COALESCE($3, is_active),
                updated_at = NOW()
            WHERE id = $4
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.is_active)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn exists_by_name(&self, name: &str, exclude_id: Option<Id>) -> RepositoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM categories
                WHERE LOWER(name) = LOWER($1) AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
