//! API routes

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::error::attach_request_path;
use crate::handlers::{auth, categories, contact_queries, proposals, reviews, tasks, users};
use crate::state::AppState;

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn(attach_request_path))
}

fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_router())
        .nest("/categories", categories_router())
        .nest("/tasks", tasks_router())
        .nest("/proposals", proposals_router())
        .nest("/reviews", reviews_router())
        .nest("/contact-queries", contact_queries_router())
        .nest("/users", users_router())
}

fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
}

fn categories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list).post(categories::create))
        .route("/:id", get(categories::get).put(categories::update))
}

fn tasks_router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list).post(tasks::create))
        .route("/:id", get(tasks::get).delete(tasks::delete))
        .route("/:id/status", post(tasks::update_status))
        .route("/:id/assign", post(tasks::assign))
}

fn proposals_router() -> Router<AppState> {
    Router::new()
        .route("/", get(proposals::list).post(proposals::create))
        .route("/:id", get(proposals::get))
        .route("/:id/status", post(proposals::update_status))
}

fn reviews_router() -> Router<AppState> {
    Router::new().route("/", get(reviews::list).post(reviews::create))
}

fn contact_queries_router() -> Router<AppState> {
    Router::new()
        .route("/", get(contact_queries::list).post(contact_queries::submit))
        .route("/:id", get(contact_queries::get))
        .route("/:id/respond", post(contact_queries::respond))
}

fn users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/:id", get(users::get))
        .route(
            "/me/professional-profile",
            put(users::update_professional_profile),
        )
}
