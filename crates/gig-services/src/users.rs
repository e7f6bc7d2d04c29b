//! User profile service
//!
//! Profiles are the user record enriched with aggregate rating data and, for
//! professionals, the count of completed projects.

use std::sync::Arc;

use gig_core::traits::Id;
use gig_db::{ProfessionalProfileDto, ReviewStore, TaskStore, UserStore};
use gig_models::{User, UserRole};
use serde::Serialize;
use tracing::info;

use crate::actor::Actor;
use crate::error::{ServiceError, ServiceResult};

/// A user together with their rating aggregates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub review_count: i64,
    pub average_rating: Option<f64>,
    pub completed_projects: i64,
}

/// Input for updating a professional's profile.
#[derive(Debug, Clone)]
pub struct ProfessionalProfileUpdate {
    pub primary_category: Option<String>,
    pub skills: Option<Vec<String>>,
    pub hourly_rate: Option<f64>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub mobile: Option<String>,
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    reviews: Arc<dyn ReviewStore>,
    tasks: Arc<dyn TaskStore>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserStore>,
        reviews: Arc<dyn ReviewStore>,
        tasks: Arc<dyn TaskStore>,
    ) -> Self {
        Self {
            users,
            reviews,
            tasks,
        }
    }

    pub async fn get(&self, id: Id) -> ServiceResult<UserProfile> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;
        self.profile(user).await
    }

    pub async fn me(&self, actor: Actor) -> ServiceResult<UserProfile> {
        self.get(actor.id).await
    }

    pub async fn list(&self, role: Option<UserRole>) -> ServiceResult<Vec<UserProfile>> {
        let users = self.users.list(role).await?;
        let mut profiles = Vec::with_capacity(users.len());
        for user in users {
            profiles.push(self.profile(user).await?);
        }
        Ok(profiles)
    }

    /// Writes the professional-only profile fields. Skills are supplied as a
    /// list and stored comma-joined; blanks are dropped.
    pub async fn update_professional_profile(
        &self,
        actor: Actor,
        update: ProfessionalProfileUpdate,
    ) -> ServiceResult<UserProfile> {
        let user = self
            .users
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", actor.id))?;

        if user.role != UserRole::Professional {
            return Err(ServiceError::conflict(
                "Only professionals can update their profile",
            ));
        }

        let skills = update.skills.map(|list| {
            list.iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(",")
        });

        let updated = self
            .users
            .update_professional_profile(
                user.id,
                ProfessionalProfileDto {
                    primary_category: update.primary_category,
                    skills,
                    hourly_rate: update.hourly_rate,
                    bio: update.bio,
                    location: update.location,
                    mobile: update.mobile,
                },
            )
            .await?;

        info!(user_id = updated.id, "professional profile updated");
        self.profile(updated).await
    }

    pub(crate) async fn profile(&self, user: User) -> ServiceResult<UserProfile> {
        let summary = self.reviews.rating_summary(user.id).await?;
        let completed_projects = if user.role == UserRole::Professional {
            self.tasks.count_completed_for_professional(user.id).await?
        } else {
            0
        };

        Ok(UserProfile {
            user,
            review_count: summary.review_count,
            average_rating: summary.average_rating,
            completed_projects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{task, user, MemReviewStore, MemTaskStore, MemUserStore};
    use gig_db::CreateReviewDto;
    use gig_models::TaskStatus;

    async fn service_with_data() -> UserService {
        let mut done = task(1, 1, 10, TaskStatus::Completed);
        done.assigned_professional_id = Some(2);
        let tasks = MemTaskStore::with_tasks(vec![done]);
        let users = MemUserStore::with_users(vec![
            user(1, UserRole::Client),
            user(2, UserRole::Professional),
        ]);
        let reviews = MemReviewStore::new();
        reviews
            .create(CreateReviewDto {
                task_id: 1,
                reviewer_id: 1,
                reviewee_id: 2,
                rating: 4,
                comment: None,
            })
            .await
            .unwrap();
        reviews
            .create(CreateReviewDto {
                task_id: 1,
                reviewer_id: 3,
                reviewee_id: 2,
                rating: 5,
                comment: None,
            })
            .await
            .unwrap();
        UserService::new(users, reviews, tasks)
    }

    #[tokio::test]
    async fn test_profile_aggregates() {
        let svc = service_with_data().await;
        let profile = svc.get(2).await.unwrap();
        assert_eq!(profile.review_count, 2);
        assert_eq!(profile.average_rating, Some(4.5));
        assert_eq!(profile.completed_projects, 1);
    }

    #[tokio::test]
    async fn test_profile_without_reviews() {
        let svc = service_with_data().await;
        let profile = svc.get(1).await.unwrap();
        assert_eq!(profile.review_count, 0);
        assert_eq!(profile.average_rating, None);
        assert_eq!(profile.completed_projects, 0);
    }

    #[tokio::test]
    async fn test_update_profile_joins_skills() {
        let svc = service_with_data().await;
        let profile = svc
            .update_professional_profile(
                Actor::new(2, UserRole::Professional),
                ProfessionalProfileUpdate {
                    primary_category: Some("Plumbing".into()),
                    skills: Some(vec!["pipes ".into(), "".into(), " welding".into()]),
                    hourly_rate: Some(40.0),
                    bio: None,
                    location: None,
                    mobile: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(profile.user.skills.as_deref(), Some("pipes,welding"));
        assert_eq!(profile.user.skill_list(), vec!["pipes", "welding"]);
    }

    #[tokio::test]
    async fn test_update_profile_rejects_non_professional() {
        let svc = service_with_data().await;
        let err = svc
            .update_professional_profile(
                Actor::new(1, UserRole::Client),
                ProfessionalProfileUpdate {
                    primary_category: None,
                    skills: None,
                    hourly_rate: None,
                    bio: None,
                    location: None,
                    mobile: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref m)
            if m == "Only professionals can update their profile"));
    }

    #[tokio::test]
    async fn test_list_by_role() {
        let svc = service_with_data().await;
        let professionals = svc.list(Some(UserRole::Professional)).await.unwrap();
        assert_eq!(professionals.len(), 1);
        assert_eq!(professionals[0].user.id, 2);
    }
}
