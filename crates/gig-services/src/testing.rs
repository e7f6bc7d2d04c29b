//! In-memory store implementations and entity factories for service tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gig_core::traits::Id;
use gig_db::{
    CategoryStore, ContactQueryStore, CreateCategoryDto, CreateContactQueryDto, CreateProposalDto,
    CreateReviewDto, CreateTaskDto, CreateUserDto, ProfessionalProfileDto, ProposalFilter,
    ProposalStore, RepositoryError, RepositoryResult, RespondDto, ReviewStore, TaskFilter,
    TaskStatusUpdate, TaskStore, UpdateCategoryDto, UserStore,
};
use gig_models::{
    Category, ContactQuery, Proposal, ProposalStatus, QueryStatus, RatingSummary, Review, Task,
    TaskPriority, TaskStatus, User, UserRole,
};

pub fn user(id: Id, role: UserRole) -> User {
    User {
        id,
        full_name: format!("User {}", id),
        email: format!("user{}@example.com", id),
        password_hash: "$argon2id$stub".into(),
        mobile: None,
        role,
        bio: None,
        profile_picture_url: None,
        is_verified: false,
        is_active: true,
        location: None,
        primary_category: None,
        skills: None,
        hourly_rate: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

pub fn category(id: Id, name: &str) -> Category {
    Category {
        id,
        name: name.into(),
        description: None,
        is_active: true,
        created_at: Utc::now(),
        updated_at: None,
    }
}

pub fn task(id: Id, client_id: Id, category_id: Id, status: TaskStatus) -> Task {
    Task {
        id,
        title: format!("Task {}", id),
        description: "A task".into(),
        client_id,
        category_id,
        budget_min: None,
        budget_max: None,
        status,
        priority: TaskPriority::Medium,
        deadline: None,
        required_skills: None,
        location: None,
        is_remote: false,
        estimated_duration: None,
        assigned_professional_id: None,
        completed_at: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

pub fn contact_query(id: Id, status: QueryStatus) -> ContactQuery {
    ContactQuery {
        id,
        name: "Visitor".into(),
        email: "visitor@example.com".into(),
        mobile: None,
        query_type: Some("GENERAL".into()),
        message: "Hello".into(),
        status,
        admin_response: None,
        responded_at: None,
        responded_by: None,
        created_at: Utc::now(),
    }
}

#[derive(Default)]
pub struct MemUserStore {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl MemUserStore {
    pub fn with_users(users: Vec<User>) -> Arc<Self> {
        let max_id = users.iter().map(|u| u.id).max().unwrap_or(0);
        let store = Self {
            users: Mutex::new(users),
            next_id: AtomicI64::new(max_id + 1),
        };
        Arc::new(store)
    }
}

#[async_trait]
impl UserStore for MemUserStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> RepositoryResult<bool> {
        Ok(self.users.lock().unwrap().iter().any(|u| u.email == email))
    }

    async fn create(&self, dto: CreateUserDto) -> RepositoryResult<User> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut created = user(id, dto.role);
        created.full_name = dto.full_name;
        created.email = dto.email;
        created.password_hash = dto.password_hash;
        created.mobile = dto.mobile;
        created.bio = dto.bio;
        self.users.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list(&self, role: Option<UserRole>) -> RepositoryResult<Vec<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| role.map_or(true, |r| u.role == r))
            .cloned()
            .collect())
    }

    async fn update_professional_profile(
        &self,
        id: Id,
        dto: ProfessionalProfileDto,
    ) -> RepositoryResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("User with id {} not found", id)))?;
        user.primary_category = dto.primary_category;
        user.skills = dto.skills;
        user.hourly_rate = dto.hourly_rate;
        user.bio = dto.bio;
        user.location = dto.location;
        user.mobile = dto.mobile;
        user.updated_at = Some(Utc::now());
        Ok(user.clone())
    }
}

#[derive(Default)]
pub struct MemCategoryStore {
    categories: Mutex<Vec<Category>>,
    next_id: AtomicI64,
}

impl MemCategoryStore {
    pub fn with_categories(categories: Vec<Category>) -> Arc<Self> {
        let max_id = categories.iter().map(|c| c.id).max().unwrap_or(0);
        Arc::new(Self {
            categories: Mutex::new(categories),
            next_id: AtomicI64::new(max_id + 1),
        })
    }
}

#[async_trait]
impl CategoryStore for MemCategoryStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Category>> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Category>> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn create(&self, dto: CreateCategoryDto) -> RepositoryResult<Category> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut created = category(id, &dto.name);
        created.description = dto.description;
        self.categories.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: Id, dto: UpdateCategoryDto) -> RepositoryResult<Category> {
        let mut categories = self.categories.lock().unwrap();
        let cat = categories.iter_mut().find(|c| c.id == id).ok_or_else(|| {
            RepositoryError::NotFound(format!("Category with id {} not found", id))
        })?;
        cat.name = dto.name;
        cat.description = dto.description;
        if let Some(active) = dto.is_active {
            cat.is_active = active;
        }
        cat.updated_at = Some(Utc::now());
        Ok(cat.clone())
    }

    async fn exists_by_name(&self, name: &str, exclude_id: Option<Id>) -> RepositoryResult<bool> {
        Ok(self.categories.lock().unwrap().iter().any(|c| {
            c.name.eq_ignore_ascii_case(name) && exclude_id.map_or(true, |ex| c.id != ex)
        }))
    }
}

#[derive(Default)]
pub struct MemTaskStore {
    tasks: Mutex<Vec<Task>>,
    next_id: AtomicI64,
}

impl MemTaskStore {
    pub fn with_tasks(tasks: Vec<Task>) -> Arc<Self> {
        let max_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        Arc::new(Self {
            tasks: Mutex::new(tasks),
            next_id: AtomicI64::new(max_id + 1),
        })
    }

    pub fn get(&self, id: Id) -> Option<Task> {
        self.tasks.lock().unwrap().iter().find(|t| t.id == id).cloned()
    }

    pub async fn create_seed(&self, task: Task) {
        self.tasks.lock().unwrap().push(task);
    }
}

#[async_trait]
impl TaskStore for MemTaskStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Task>> {
        Ok(self.get(id))
    }

    async fn create(&self, dto: CreateTaskDto) -> RepositoryResult<Task> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Task {
            id,
            title: dto.title,
            description: dto.description,
            client_id: dto.client_id,
            category_id: dto.category_id,
            budget_min: dto.budget_min,
            budget_max: dto.budget_max,
            status: dto.status,
            priority: dto.priority,
            deadline: dto.deadline,
            required_skills: dto.required_skills,
            location: dto.location,
            is_remote: dto.is_remote,
            estimated_duration: dto.estimated_duration,
            assigned_professional_id: dto.assigned_professional_id,
            completed_at: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.tasks.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list(&self, filter: TaskFilter) -> RepositoryResult<Vec<Task>> {
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| filter.status.map_or(true, |s| t.status == s))
            .filter(|t| filter.category_id.map_or(true, |c| t.category_id == c))
            .filter(|t| filter.client_id.map_or(true, |c| t.client_id == c))
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: Id, update: TaskStatusUpdate) -> RepositoryResult<Task> {
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Task with id {} not found", id)))?;
        task.status = update.status;
        if update.assigned_professional_id.is_some() {
            task.assigned_professional_id = update.assigned_professional_id;
        }
        if update.completed_at.is_some() {
            task.completed_at = update.completed_at;
        }
        task.updated_at = Some(Utc::now());
        Ok(task.clone())
    }

    async fn count_completed_for_professional(&self, professional_id: Id) -> RepositoryResult<i64> {
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| {
                t.assigned_professional_id == Some(professional_id)
                    && t.status == TaskStatus::Completed
            })
            .count() as i64)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(RepositoryError::NotFound(format!(
                "Task with id {} not found",
                id
            )));
        }
        Ok(())
    }
}

/// Proposal store that mirrors the cross-entity accept transaction by
/// holding the task store it writes through.
pub struct MemProposalStore {
    proposals: Mutex<Vec<Proposal>>,
    next_id: AtomicI64,
    tasks: Arc<MemTaskStore>,
}

impl MemProposalStore {
    pub fn new(tasks: Arc<MemTaskStore>) -> Arc<Self> {
        Arc::new(Self {
            proposals: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            tasks,
        })
    }

    pub fn get(&self, id: Id) -> Option<Proposal> {
        self.proposals
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }
}

#[async_trait]
impl ProposalStore for MemProposalStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Proposal>> {
        Ok(self.get(id))
    }

    async fn create(&self, dto: CreateProposalDto) -> RepositoryResult<Proposal> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Proposal {
            id,
            task_id: dto.task_id,
            professional_id: dto.professional_id,
            message: dto.message,
            proposed_amount: dto.proposed_amount,
            estimated_duration: dto.estimated_duration,
            status: ProposalStatus::Pending,
            accepted_at: None,
            rejected_at: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.proposals.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn exists_for_pair(&self, task_id: Id, professional_id: Id) -> RepositoryResult<bool> {
        Ok(self
            .proposals
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.task_id == task_id && p.professional_id == professional_id))
    }

    async fn list(&self, filter: ProposalFilter) -> RepositoryResult<Vec<Proposal>> {
        let proposals = self.proposals.lock().unwrap();
        let rows = if let Some(task_id) = filter.task_id {
            proposals.iter().filter(|p| p.task_id == task_id).cloned().collect()
        } else if let Some(professional_id) = filter.professional_id {
            proposals
                .iter()
                .filter(|p| p.professional_id == professional_id)
                .cloned()
                .collect()
        } else {
            proposals.clone()
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
        let updated = {
            let mut proposals = self.proposals.lock().unwrap();
            let proposal = proposals.iter_mut().find(|p| p.id == id).ok_or_else(|| {
                RepositoryError::NotFound(format!("Proposal with id {} not found", id))
            })?;
            proposal.status = ProposalStatus::Accepted;
            proposal.accepted_at = Some(now);
            proposal.rejected_at = None;
            proposal.updated_at = Some(now);
            proposal.clone()
        };

        self.tasks
            .update_status(
                task_id,
                TaskStatusUpdate {
                    status: TaskStatus::InProgress,
                    assigned_professional_id: Some(professional_id),
                    completed_at: None,
                },
            )
            .await?;

        Ok(updated)
    }

    async fn set_status_with_timestamps(
        &self,
        id: Id,
        status: ProposalStatus,
        accepted_at: Option<DateTime<Utc>>,
        rejected_at: Option<DateTime<Utc>>,
    ) -> RepositoryResult<Proposal> {
        let mut proposals = self.proposals.lock().unwrap();
        let proposal = proposals.iter_mut().find(|p| p.id == id).ok_or_else(|| {
            RepositoryError::NotFound(format!("Proposal with id {} not found", id))
        })?;
        proposal.status = status;
        proposal.accepted_at = accepted_at;
        proposal.rejected_at = rejected_at;
        proposal.updated_at = Some(Utc::now());
        Ok(proposal.clone())
    }

    async fn set_status(&self, id: Id, status: ProposalStatus) -> RepositoryResult<Proposal> {
        let mut proposals = self.proposals.lock().unwrap();
        let proposal = proposals.iter_mut().find(|p| p.id == id).ok_or_else(|| {
            RepositoryError::NotFound(format!("Proposal with id {} not found", id))
        })?;
        proposal.status = status;
        proposal.updated_at = Some(Utc::now());
        Ok(proposal.clone())
    }
}

#[derive(Default)]
pub struct MemReviewStore {
    reviews: Mutex<Vec<Review>>,
    next_id: AtomicI64,
}

impl MemReviewStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            reviews: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        })
    }
}

#[async_trait]
impl ReviewStore for MemReviewStore {
    async fn create(&self, dto: CreateReviewDto) -> RepositoryResult<Review> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Review {
            id,
            task_id: dto.task_id,
            reviewer_id: dto.reviewer_id,
            reviewee_id: dto.reviewee_id,
            rating: dto.rating,
            comment: dto.comment,
            created_at: Utc::now(),
        };
        self.reviews.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn exists_for_triple(
        &self,
        task_id: Id,
        reviewer_id: Id,
        reviewee_id: Id,
    ) -> RepositoryResult<bool> {
        Ok(self.reviews.lock().unwrap().iter().any(|r| {
            r.task_id == task_id && r.reviewer_id == reviewer_id && r.reviewee_id == reviewee_id
        }))
    }

    async fn list_for_reviewee(&self, reviewee_id: Id) -> RepositoryResult<Vec<Review>> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.reviewee_id == reviewee_id)
            .cloned()
            .collect())
    }

    async fn rating_summary(&self, reviewee_id: Id) -> RepositoryResult<RatingSummary> {
        let reviews = self.reviews.lock().unwrap();
        let ratings: Vec<i32> = reviews
            .iter()
            .filter(|r| r.reviewee_id == reviewee_id)
            .map(|r| r.rating)
            .collect();
        let review_count = ratings.len() as i64;
        let average_rating = if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<i32>() as f64 / ratings.len() as f64)
        };
        Ok(RatingSummary {
            review_count,
            average_rating,
        })
    }
}

#[derive(Default)]
pub struct MemContactQueryStore {
    queries: Mutex<Vec<ContactQuery>>,
    next_id: AtomicI64,
}

impl MemContactQueryStore {
    pub fn with_queries(queries: Vec<ContactQuery>) -> Arc<Self> {
        let max_id = queries.iter().map(|q| q.id).max().unwrap_or(0);
        Arc::new(Self {
            queries: Mutex::new(queries),
            next_id: AtomicI64::new(max_id + 1),
        })
    }
}

#[async_trait]
impl ContactQueryStore for MemContactQueryStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<ContactQuery>> {
        Ok(self
            .queries
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == id)
            .cloned())
    }

    async fn create(&self, dto: CreateContactQueryDto) -> RepositoryResult<ContactQuery> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = ContactQuery {
            id,
            name: dto.name,
            email: dto.email,
            mobile: dto.mobile,
            query_type: dto.query_type,
            message: dto.message,
            status: QueryStatus::Pending,
            admin_response: None,
            responded_at: None,
            responded_by: None,
            created_at: Utc::now(),
        };
        self.queries.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list(&self, status: Option<QueryStatus>) -> RepositoryResult<Vec<ContactQuery>> {
        Ok(self
            .queries
            .lock()
            .unwrap()
            .iter()
            .filter(|q| status.map_or(true, |s| q.status == s))
            .cloned()
            .collect())
    }

    async fn respond(&self, id: Id, dto: RespondDto) -> RepositoryResult<ContactQuery> {
        let mut queries = self.queries.lock().unwrap();
        let query = queries.iter_mut().find(|q| q.id == id).ok_or_else(|| {
            RepositoryError::NotFound(format!("Contact query with id {} not found", id))
        })?;
        query.admin_response = Some(dto.admin_response);
        query.status = dto.status;
        query.responded_by = Some(dto.responded_by);
        query.responded_at = Some(dto.responded_at);
        Ok(query.clone())
    }
}
