//! User repository
//!
//! Database operations for user accounts and professional profiles.

use async_trait::async_trait;
use gig_core::traits::Id;
use gig_models::{User, UserRole};
use sqlx::PgPool;

use crate::repository::RepositoryResult;

const USER_COLUMNS: &str = "id, full_name, email, password_hash, mobile, role, bio, \
     profile_picture_url, is_verified, is_active, location, primary_category, \
     skills, hourly_rate, created_at, updated_at";

/// DTO for creating a user
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub full_name: String,
    /// Pre-normalized: trimmed and lowercased
    pub email: String,
    pub password_hash: String,
    pub mobile: Option<String>,
    pub role: UserRole,
    pub bio: Option<String>,
}

/// DTO for updating professional-only profile attributes
#[derive(Debug, Clone)]
pub struct ProfessionalProfileDto {
    pub primary_category: Option<String>,
    /// Comma-joined, pre-trimmed skill list
    pub skills: Option<String>,
    pub hourly_rate: Option<f64>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub mobile: Option<String>,
}

/// User store interface consumed by the service layer
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn email_exists(&self, email: &str) -> RepositoryResult<bool>;
    async fn create(&self, dto: CreateUserDto) -> RepositoryResult<User>;
    async fn list(&self, role: Option<UserRole>) -> RepositoryResult<Vec<User>>;
    async fn update_professional_profile(
        &self,
        id: Id,
        dto: ProfessionalProfileDto,
    ) -> RepositoryResult<User>;
}

/// Postgres-backed user repository
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn email_exists(&self, email: &str) -> RepositoryResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn create(&self, dto: CreateUserDto) -> RepositoryResult<User> {
        let row = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (full_name, email, password_hash, mobile, role, bio,
                               is_verified, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, TRUE, NOW())
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&dto.full_name)
        .bind(&dto.email)
        .bind(&dto.password_hash)
        .bind(&dto.mobile)
        .bind(dto.role)
        .bind(&dto.bio)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self, role: Option<UserRole>) -> RepositoryResult<Vec<User>> {
        let rows = match role {
            Some(role) => {
                sqlx::query_as::<_, User>(&format!(
                    "SELECT {USER_COLUMNS} FROM users WHERE role = $1 ORDER BY id"
                ))
                .bind(role)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, User>(&format!(
                    "SELECT {USER_COLUMNS} FROM users ORDER BY id"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    async fn update_professional_profile(
        &self,
        id: Id,
        dto: ProfessionalProfileDto,
    ) -> RepositoryResult<User> {
        let row = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET
                primary_category = $1,
                skills = $2,
                hourly_rate = $3,
                bio = $4,
                location = $5,
                mobile = $6,
                updated_at = NOW()
            WHERE id = $7
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&dto.primary_category)
        .bind(&dto.skills)
        .bind(dto.hourly_rate)
        .bind(&dto.bio)
        .bind(&dto.location)
        .bind(&dto.mobile)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
