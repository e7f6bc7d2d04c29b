//! Review service
//!
//! Reviews are exchanged between the two participants of a task (client and
//! assigned professional) and are unique per (task, reviewer, reviewee).

use std::sync::Arc;

use gig_core::traits::Id;
use gig_db::{CreateReviewDto, ReviewStore, TaskStore, UserStore};
use gig_models::Review;
use tracing::info;

use crate::actor::Actor;
use crate::error::{ServiceError, ServiceResult};

/// Input for submitting a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub task_id: Id,
    pub reviewee_id: Id,
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Clone)]
pub struct ReviewService {
    reviews: Arc<dyn ReviewStore>,
    tasks: Arc<dyn TaskStore>,
    users: Arc<dyn UserStore>,
}

impl ReviewService {
    pub fn new(
        reviews: Arc<dyn ReviewStore>,
        tasks: Arc<dyn TaskStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            reviews,
            tasks,
            users,
        }
    }

    pub async fn create(&self, actor: Actor, input: NewReview) -> ServiceResult<Review> {
        let task = self
            .tasks
            .find_by_id(input.task_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Task", input.task_id))?;

        self.users
            .find_by_id(input.reviewee_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", input.reviewee_id))?;

        if actor.id == input.reviewee_id {
            return Err(ServiceError::bad_request(
                "Reviewer and reviewee cannot be the same",
            ));
        }

        if !task.is_participant(actor.id) || !task.is_participant(input.reviewee_id) {
            return Err(ServiceError::bad_request(
                "Only participants of the task can review each other",
            ));
        }

        if self
            .reviews
            .exists_for_triple(task.id, actor.id, input.reviewee_id)
            .await?
        {
            return Err(ServiceError::conflict(
                "Review already submitted for this task and user",
            ));
        }

        let review = self
            .reviews
            .create(CreateReviewDto {
                task_id: task.id,
                reviewer_id: actor.id,
                reviewee_id: input.reviewee_id,
                rating: input.rating,
                comment: input.comment,
            })
            .await?;

        info!(
            review_id = review.id,
            task_id = task.id,
            reviewer_id = actor.id,
            "review submitted"
        );
        Ok(review)
    }

    pub async fn list_for_user(&self, reviewee_id: Id) -> ServiceResult<Vec<Review>> {
        self.users
            .find_by_id(reviewee_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", reviewee_id))?;
        Ok(self.reviews.list_for_reviewee(reviewee_id).await?)
    }
}
