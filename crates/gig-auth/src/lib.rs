//! Authentication for Gigsly RS
//!
//! JWT bearer credentials and one-way password hashing. Opaque to the
//! service layer: services receive an already-resolved actor.

pub mod jwt;
pub mod password;

pub use jwt::{extract_bearer_token, Claims, JwtError, JwtService};
pub use password::{hash_password, verify_password, PasswordError};
