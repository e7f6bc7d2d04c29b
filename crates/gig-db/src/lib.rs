//! Persistence layer for Gigsly RS
//!
//! PostgreSQL repositories built on SQLx. Each entity gets an object-safe
//! store trait so the service layer can run against in-memory substitutes in
//! tests, plus a Postgres-backed implementation.

pub mod categories;
pub mod contact_queries;
pub mod pool;
pub mod proposals;
pub mod repository;
pub mod reviews;
pub mod tasks;
pub mod users;

pub use categories::{CategoryRepository, CategoryStore, CreateCategoryDto, UpdateCategoryDto};
pub use contact_queries::{ContactQueryRepository, ContactQueryStore, CreateContactQueryDto, RespondDto};
pub use pool::Database;
pub use proposals::{CreateProposalDto, ProposalFilter, ProposalRepository, ProposalStore};
pub use repository::{RepositoryError, RepositoryResult};
pub use reviews::{CreateReviewDto, ReviewRepository, ReviewStore};
pub use tasks::{CreateTaskDto, TaskFilter, TaskRepository, TaskStatusUpdate, TaskStore};
pub use users::{CreateUserDto, ProfessionalProfileDto, UserRepository, UserStore};
