//! Request handlers, one module per resource

pub mod auth;
pub mod categories;
pub mod contact_queries;
pub mod proposals;
pub mod reviews;
pub mod tasks;
pub mod users;
