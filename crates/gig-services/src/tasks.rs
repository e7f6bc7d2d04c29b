//! Task lifecycle service
//!
//! Tasks are created by clients (or admins), optionally pre-assigned to a
//! professional, and moved through their status lifecycle by the owning
//! client or an admin.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use gig_core::traits::Id;
use gig_db::{CategoryStore, CreateTaskDto, TaskFilter, TaskStatusUpdate, TaskStore, UserStore};
use gig_models::{budget_range_valid, Task, TaskPriority, TaskStatus, UserRole};
use tracing::info;

use crate::actor::Actor;
use crate::error::{ServiceError, ServiceResult};

/// Input for posting a task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub category_id: Id,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub priority: Option<TaskPriority>,
    pub deadline: Option<DateTime<Utc>>,
    pub required_skills: Option<String>,
    pub location: Option<String>,
    pub is_remote: bool,
    pub estimated_duration: Option<String>,
    pub assigned_professional_id: Option<Id>,
}

#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
    users: Arc<dyn UserStore>,
    categories: Arc<dyn CategoryStore>,
}

impl TaskService {
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        users: Arc<dyn UserStore>,
        categories: Arc<dyn CategoryStore>,
    ) -> Self {
        Self {
            tasks,
            users,
            categories,
        }
    }

    pub async fn create(&self, actor: Actor, input: NewTask) -> ServiceResult<Task> {
        if !actor.role.can_post_tasks() {
            return Err(ServiceError::bad_request(
                "Only clients or admins can post tasks",
            ));
        }

        if !budget_range_valid(input.budget_min, input.budget_max) {
            return Err(ServiceError::bad_request(
                "Minimum budget cannot exceed maximum budget",
            ));
        }

        self.categories
            .find_by_id(input.category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", input.category_id))?;

        if let Some(professional_id) = input.assigned_professional_id {
            self.require_professional(professional_id).await?;
        }

        let status = if input.assigned_professional_id.is_some() {
            TaskStatus::InProgress
        } else {
            TaskStatus::Open
        };

        let task = self
            .tasks
            .create(CreateTaskDto {
                title: input.title,
                description: input.description,
                client_id: actor.id,
                category_id: input.category_id,
                budget_min: input.budget_min,
                budget_max: input.budget_max,
                status,
                priority: input.priority.unwrap_or_default(),
                deadline: input.deadline,
                required_skills: input.required_skills,
                location: input.location,
                is_remote: input.is_remote,
                estimated_duration: input.estimated_duration,
                assigned_professional_id: input.assigned_professional_id,
            })
            .await?;

        info!(task_id = task.id, client_id = actor.id, "task created");
        Ok(task)
    }

    pub async fn get(&self, id: Id) -> ServiceResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Task", id))
    }

    pub async fn list(&self, filter: TaskFilter) -> ServiceResult<Vec<Task>> {
        Ok(self.tasks.list(filter).await?)
    }

    /// Moves a task to a new status. Statuses that imply active work require
    /// an assignee, either already on the task or supplied with the call.
    pub async fn update_status(
        &self,
        actor: Actor,
        id: Id,
        status: TaskStatus,
        assigned_professional_id: Option<Id>,
    ) -> ServiceResult<Task> {
        let task = self.get(id).await?;
        self.authorize_client(&actor, &task)?;

        // Only statuses that imply active work look at the supplied
        // professional; a cancel or close ignores it entirely.
        let assigned_professional_id = if status.requires_professional() {
            if let Some(professional_id) = assigned_professional_id {
                self.require_professional(professional_id).await?;
            }
            if task.assigned_professional_id.is_none() && assigned_professional_id.is_none() {
                return Err(ServiceError::bad_request(format!(
                    "Assign a professional before moving task to {}",
                    status
                )));
            }
            assigned_professional_id
        } else {
            None
        };

        let completed_at = if status == TaskStatus::Completed {
            Some(Utc::now())
        } else {
            None
        };

        let updated = self
            .tasks
            .update_status(
                id,
                TaskStatusUpdate {
                    status,
                    assigned_professional_id,
                    completed_at,
                },
            )
            .await?;

        info!(task_id = id, status = %status, "task status updated");
        Ok(updated)
    }

    /// Assigns a professional directly, without going through a proposal.
    /// An OPEN task moves to IN_PROGRESS; any other assignable status is
    /// kept as-is.
    pub async fn assign_professional(
        &self,
        actor: Actor,
        id: Id,
        professional_id: Id,
    ) -> ServiceResult<Task> {
        let task = self.get(id).await?;
        self.authorize_client(&actor, &task)?;

        if task.status.is_terminal_for_assignment() {
            return Err(ServiceError::bad_request(format!(
                "Cannot assign a professional to a {} task",
                task.status
            )));
        }

        self.require_professional(professional_id).await?;

        let status = if task.status == TaskStatus::Open {
            TaskStatus::InProgress
        } else {
            task.status
        };

        let updated = self
            .tasks
            .update_status(
                id,
                TaskStatusUpdate {
                    status,
                    assigned_professional_id: Some(professional_id),
                    completed_at: None,
                },
            )
            .await?;

        info!(task_id = id, professional_id, "professional assigned");
        Ok(updated)
    }

    pub async fn delete(&self, actor: Actor, id: Id) -> ServiceResult<()> {
        let task = self.get(id).await?;
        self.authorize_client(&actor, &task)?;

        self.tasks.delete(id).await?;
        info!(task_id = id, "task deleted");
        Ok(())
    }

    fn authorize_client(&self, actor: &Actor, task: &Task) -> ServiceResult<()> {
        if !actor.owns_or_admin(task.client_id) {
            return Err(ServiceError::bad_request(
                "Only the task's client or an admin can update this task",
            ));
        }
        Ok(())
    }

    async fn require_professional(&self, id: Id) -> ServiceResult<()> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;
        if user.role != UserRole::Professional {
            return Err(ServiceError::bad_request(format!(
                "User {} is not a professional",
                id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{category, task, user, MemCategoryStore, MemTaskStore, MemUserStore};

    fn service() -> (TaskService, Arc<MemTaskStore>) {
        let tasks = MemTaskStore::with_tasks(vec![]);
        let users = MemUserStore::with_users(vec![
            user(1, UserRole::Client),
            user(2, UserRole::Professional),
            user(3, UserRole::Admin),
            user(4, UserRole::Client),
        ]);
        let categories = MemCategoryStore::with_categories(vec![category(10, "Plumbing")]);
        (
            TaskService::new(tasks.clone(), users, categories),
            tasks,
        )
    }

    fn new_task() -> NewTask {
        NewTask {
            title: "Fix the sink".into(),
            description: "Leaky kitchen sink".into(),
            category_id: 10,
            budget_min: Some(50.0),
            budget_max: Some(100.0),
            priority: None,
            deadline: None,
            required_skills: None,
            location: None,
            is_remote: false,
            estimated_duration: None,
            assigned_professional_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_open_without_assignee() {
        let (svc, _) = service();
        let created = svc
            .create(Actor::new(1, UserRole::Client), new_task())
            .await
            .unwrap();
        assert_eq!(created.status, TaskStatus::Open);
        assert_eq!(created.client_id, 1);
        assert_eq!(created.priority, TaskPriority::Medium);
    }

    #[tokio::test]
    async fn test_create_with_assignee_starts_in_progress() {
        let (svc, _) = service();
        let mut input = new_task();
        input.assigned_professional_id = Some(2);
        let created = svc
            .create(Actor::new(1, UserRole::Client), input)
            .await
            .unwrap();
        assert_eq!(created.status, TaskStatus::InProgress);
        assert_eq!(created.assigned_professional_id, Some(2));
    }

    #[tokio::test]
    async fn test_create_rejects_professional_poster() {
        let (svc, _) = service();
        let err = svc
            .create(Actor::new(2, UserRole::Professional), new_task())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(ref m)
            if m == "Only clients or admins can post tasks"));
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_budget() {
        let (svc, _) = service();
        let mut input = new_task();
        input.budget_min = Some(200.0);
        input.budget_max = Some(100.0);
        let err = svc
            .create(Actor::new(1, UserRole::Client), input)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(ref m)
            if m == "Minimum budget cannot exceed maximum budget"));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_category() {
        let (svc, _) = service();
        let mut input = new_task();
        input.category_id = 99;
        let err = svc
            .create(Actor::new(1, UserRole::Client), input)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Category", id: 99 }));
    }

    #[tokio::test]
    async fn test_create_rejects_non_professional_assignee() {
        let (svc, _) = service();
        let mut input = new_task();
        input.assigned_professional_id = Some(4);
        let err = svc
            .create(Actor::new(1, UserRole::Client), input)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(ref m)
            if m == "User 4 is not a professional"));
    }

    #[tokio::test]
    async fn test_update_status_requires_owner_or_admin() {
        let (svc, tasks) = service();
        tasks.create_seed(task(5, 1, 10, TaskStatus::Open)).await;

        let err = svc
            .update_status(Actor::new(4, UserRole::Client), 5, TaskStatus::Cancelled, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(ref m)
            if m == "Only the task's client or an admin can update this task"));

        svc.update_status(Actor::new(3, UserRole::Admin), 5, TaskStatus::Cancelled, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_status_needs_assignee_for_in_progress() {
        let (svc, tasks) = service();
        tasks.create_seed(task(5, 1, 10, TaskStatus::Open)).await;

        let err = svc
            .update_status(Actor::new(1, UserRole::Client), 5, TaskStatus::InProgress, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(ref m)
            if m == "Assign a professional before moving task to IN_PROGRESS"));

        let updated = svc
            .update_status(Actor::new(1, UserRole::Client), 5, TaskStatus::InProgress, Some(2))
            .await
            .unwrap();
        assert_eq!(updated.assigned_professional_id, Some(2));
    }

    #[tokio::test]
    async fn test_cancel_ignores_supplied_professional() {
        let (svc, tasks) = service();
        tasks.create_seed(task(5, 1, 10, TaskStatus::Open)).await;

        // User 4 is a client; a cancel carrying their id still succeeds and
        // leaves the assignment untouched.
        let updated = svc
            .update_status(Actor::new(1, UserRole::Client), 5, TaskStatus::Cancelled, Some(4))
            .await
            .unwrap();
        assert_eq!(updated.status, TaskStatus::Cancelled);
        assert_eq!(updated.assigned_professional_id, None);
    }

    #[tokio::test]
    async fn test_update_status_stamps_completed_at() {
        let (svc, tasks) = service();
        let mut seed = task(5, 1, 10, TaskStatus::InProgress);
        seed.assigned_professional_id = Some(2);
        tasks.create_seed(seed).await;

        let updated = svc
            .update_status(Actor::new(1, UserRole::Client), 5, TaskStatus::Completed, None)
            .await
            .unwrap();
        assert_eq!(updated.status, TaskStatus::Completed);
        assert!(updated.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_assign_professional_moves_open_to_in_progress() {
        let (svc, tasks) = service();
        tasks.create_seed(task(5, 1, 10, TaskStatus::Open)).await;

        let updated = svc
            .assign_professional(Actor::new(1, UserRole::Client), 5, 2)
            .await
            .unwrap();
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert_eq!(updated.assigned_professional_id, Some(2));
    }

    #[tokio::test]
    async fn test_assign_professional_rejects_terminal_task() {
        let (svc, tasks) = service();
        tasks.create_seed(task(5, 1, 10, TaskStatus::Completed)).await;

        let err = svc
            .assign_professional(Actor::new(1, UserRole::Client), 5, 2)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(ref m)
            if m == "Cannot assign a professional to a COMPLETED task"));
    }

    #[tokio::test]
    async fn test_delete_requires_owner() {
        let (svc, tasks) = service();
        tasks.create_seed(task(5, 1, 10, TaskStatus::Open)).await;

        let err = svc
            .delete(Actor::new(2, UserRole::Professional), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));

        svc.delete(Actor::new(1, UserRole::Client), 5).await.unwrap();
        assert!(svc.get(5).await.is_err());
    }

    #[tokio::test]
    async fn test_get_missing_task() {
        let (svc, _) = service();
        let err = svc.get(77).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Task", id: 77 }));
    }
}
