//! Registration and login
//!
//! Emails are stored trimmed and lowercased; login normalizes the same way
//! so credentials match regardless of casing. Failed logins never reveal
//! whether the email or the password was wrong.

use std::sync::Arc;

use gig_auth::{hash_password, verify_password, JwtService};
use gig_db::{CreateUserDto, UserStore};
use gig_models::{normalize_email, User, UserRole};
use tracing::info;

use crate::error::{ServiceError, ServiceResult};
use crate::users::{UserProfile, UserService};

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub mobile: Option<String>,
    pub role: UserRole,
    pub bio: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A fresh credential plus the authenticated profile.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub token: String,
    pub expires_at: i64,
    pub user: UserProfile,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    user_service: UserService,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, user_service: UserService, jwt: JwtService) -> Self {
        Self {
            users,
            user_service,
            jwt,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthOutcome> {
        let email = normalize_email(&request.email);

        if self.users.email_exists(&email).await? {
            return Err(ServiceError::conflict("Email already in use"));
        }

        let password_hash = hash_password(&request.password)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        let user = self
            .users
            .create(CreateUserDto {
                full_name: request.full_name,
                email,
                password_hash,
                mobile: request.mobile,
                role: request.role,
                bio: request.bio,
            })
            .await?;

        info!(user_id = user.id, role = %user.role, "user registered");
        self.outcome(user).await
    }

    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthOutcome> {
        let email = normalize_email(&request.email);

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("Invalid email or password".into()))?;

        let matches = verify_password(&request.password, &user.password_hash)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        if !matches {
            return Err(ServiceError::Unauthorized("Invalid email or password".into()));
        }

        info!(user_id = user.id, "user logged in");
        self.outcome(user).await
    }

    async fn outcome(&self, user: User) -> ServiceResult<AuthOutcome> {
        let token = self
            .jwt
            .create_token(user.id, user.role, &user.email)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        let expires_at = self.jwt.expiration_timestamp();
        let profile = self.user_service.profile(user).await?;

        Ok(AuthOutcome {
            token,
            expires_at,
            user: profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemReviewStore, MemTaskStore, MemUserStore};

    fn service() -> AuthService {
        let users = MemUserStore::with_users(vec![]);
        let user_service =
            UserService::new(users.clone(), MemReviewStore::new(), MemTaskStore::with_tasks(vec![]));
        AuthService::new(users, user_service, JwtService::new(b"test-secret", 3600))
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            full_name: "Alice".into(),
            email: " Alice@Example.COM ".into(),
            password: "hunter42".into(),
            mobile: None,
            role: UserRole::Client,
            bio: None,
        }
    }

    #[tokio::test]
    async fn test_register_normalizes_email_and_issues_token() {
        let svc = service();
        let outcome = svc.register(register_request()).await.unwrap();
        assert_eq!(outcome.user.user.email, "alice@example.com");
        assert!(!outcome.token.is_empty());
        assert!(outcome.expires_at > chrono::Utc::now().timestamp());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let svc = service();
        svc.register(register_request()).await.unwrap();

        let mut second = register_request();
        second.email = "alice@example.com".into();
        let err = svc.register(second).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref m) if m == "Email already in use"));
    }

    #[tokio::test]
    async fn test_login_with_case_varied_email() {
        let svc = service();
        svc.register(register_request()).await.unwrap();

        let outcome = svc
            .login(LoginRequest {
                email: "ALICE@example.com".into(),
                password: "hunter42".into(),
            })
            .await
            .unwrap();
        assert_eq!(outcome.user.user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let svc = service();
        svc.register(register_request()).await.unwrap();

        let err = svc
            .login(LoginRequest {
                email: "alice@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(ref m)
            if m == "Invalid email or password"));
    }

    #[tokio::test]
    async fn test_login_rejects_unknown_email() {
        let svc = service();
        let err = svc
            .login(LoginRequest {
                email: "nobody@example.com".into(),
                password: "x".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let svc = service();
        let outcome = svc.register(register_request()).await.unwrap();
        assert_ne!(outcome.user.user.password_hash, "hunter42");
        assert!(outcome.user.user.password_hash.starts_with("$argon2"));
    }
}
