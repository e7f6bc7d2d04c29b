//! Domain model for Gigsly RS
//!
//! Entities are plain structs with explicit foreign-key fields; there is no
//! in-memory object graph. Status enums carry the transition helpers used by
//! the service layer.

pub mod category;
pub mod contact_query;
pub mod proposal;
pub mod review;
pub mod task;
pub mod user;

pub use category::Category;
pub use contact_query::{ContactQuery, QueryStatus};
pub use proposal::{Proposal, ProposalStatus};
pub use review::{RatingSummary, Review};
pub use task::{budget_range_valid, Task, TaskPriority, TaskStatus};
pub use user::{normalize_email, User, UserRole};
