//! # gig-api
//!
//! REST handlers for Gigsly RS: JSON in camelCase over `/api`, Bearer JWT
//! auth resolved per request into an explicit actor.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
