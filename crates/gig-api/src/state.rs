//! Application state shared across handlers
//!
//! All services are constructed once over the connection pool; handlers
//! clone the state cheaply per request.

use std::sync::Arc;

use gig_auth::JwtService;
use gig_core::config::AuthConfig;
use gig_db::{
    CategoryRepository, CategoryStore, ContactQueryRepository, ContactQueryStore,
    ProposalRepository, ProposalStore, ReviewRepository, ReviewStore, TaskRepository, TaskStore,
    UserRepository, UserStore,
};
use gig_services::{
    AuthService, CategoryService, ContactQueryService, ProposalService, ReviewService,
    TaskService, UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub users: UserService,
    pub categories: CategoryService,
    pub tasks: TaskService,
    pub proposals: ProposalService,
    pub reviews: ReviewService,
    pub contact_queries: ContactQueryService,
    pub jwt: JwtService,
    pub(crate) user_store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(pool: PgPool, auth_config: &AuthConfig) -> Self {
        let user_store: Arc<dyn UserStore> = Arc::new(UserRepository::new(pool.clone()));
        let category_store: Arc<dyn CategoryStore> =
            Arc::new(CategoryRepository::new(pool.clone()));
        let task_store: Arc<dyn TaskStore> = Arc::new(TaskRepository::new(pool.clone()));
        let proposal_store: Arc<dyn ProposalStore> =
            Arc::new(ProposalRepository::new(pool.clone()));
        let review_store: Arc<dyn ReviewStore> = Arc::new(ReviewRepository::new(pool.clone()));
        let query_store: Arc<dyn ContactQueryStore> = Arc::new(ContactQueryRepository::new(pool));

        let jwt = JwtService::new(
            auth_config.jwt_secret.as_bytes(),
            auth_config.token_expiration_seconds,
        );

        let users = UserService::new(
            user_store.clone(),
            review_store.clone(),
            task_store.clone(),
        );
        let auth = AuthService::new(user_store.clone(), users.clone(), jwt.clone());

        Self {
            auth,
            users,
            categories: CategoryService::new(category_store.clone()),
            tasks: TaskService::new(task_store.clone(), user_store.clone(), category_store),
            proposals: ProposalService::new(proposal_store, task_store.clone()),
            reviews: ReviewService::new(review_store, task_store, user_store.clone()),
            contact_queries: ContactQueryService::new(query_store, user_store.clone()),
            jwt,
            user_store,
        }
    }
}
