//! Business-rule services for Gigsly RS
//!
//! Every operation that needs authorization takes an explicit [`Actor`];
//! there is no ambient current-user lookup. Services load entities through
//! the store traits, check invariants, mutate, and return domain values.

pub mod actor;
pub mod auth;
pub mod categories;
pub mod contact_queries;
pub mod error;
pub mod proposals;
pub mod reviews;
pub mod tasks;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

pub use actor::Actor;
pub use auth::{AuthOutcome, AuthService, LoginRequest, RegisterRequest};
pub use categories::{CategoryService, NewCategory, UpdateCategory};
pub use contact_queries::{ContactQueryService, NewContactQuery, QueryResponse};
pub use error::{ServiceError, ServiceResult};
pub use proposals::{NewProposal, ProposalService};
pub use reviews::{NewReview, ReviewService};
pub use tasks::{NewTask, TaskService};
pub use users::{ProfessionalProfileUpdate, UserProfile, UserService};
