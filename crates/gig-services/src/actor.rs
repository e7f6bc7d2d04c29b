//! The authenticated identity performing an operation.
//!
//! Authorization is a pure function of (actor, entity); the transport layer
//! resolves the actor once and passes it into every service call.

use gig_core::traits::Id;
use gig_models::{User, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Id,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: Id, role: UserRole) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// The owning client of an entity, or an admin.
    pub fn owns_or_admin(&self, owner_id: Id) -> bool {
        self.id == owner_id || self.is_admin()
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
        }
    }
}
