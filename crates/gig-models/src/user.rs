//! User account model

use chrono::{DateTime, Utc};
use gig_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

/// Account role. Immutable after creation; there is no promotion flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Client,
    Professional,
    Admin,
}

impl UserRole {
    /// Clients and admins may post tasks.
    pub fn can_post_tasks(&self) -> bool {
        matches!(self, UserRole::Client | UserRole::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UserRole::Client => "CLIENT",
            UserRole::Professional => "PROFESSIONAL",
            UserRole::Admin => "ADMIN",
        };
        f.write_str(s)
    }
}

/// User account record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub full_name: String,
    /// Stored trimmed and lowercased; unique.
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub mobile: Option<String>,
    pub role: UserRole,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    // Professional-only profile attributes
    pub location: Option<String>,
    pub primary_category: Option<String>,
    /// Comma-separated skill list
    pub skills: Option<String>,
    pub hourly_rate: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Canonical form for stored emails: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Identifiable for User {
    fn id(&self) -> Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_can_post_tasks() {
        assert!(UserRole::Client.can_post_tasks());
        assert!(UserRole::Admin.can_post_tasks());
        assert!(!UserRole::Professional.can_post_tasks());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn test_role_display() {
        assert_eq!(UserRole::Professional.to_string(), "PROFESSIONAL");
    }
}
