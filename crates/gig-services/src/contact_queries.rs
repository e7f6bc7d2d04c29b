//! Contact query service
//!
//! Visitors (not necessarily registered users) submit support queries; admins
//! respond and settle them.

use std::sync::Arc;

use chrono::Utc;
use gig_core::traits::Id;
use gig_db::{ContactQueryStore, CreateContactQueryDto, RespondDto, UserStore};
use gig_models::{ContactQuery, QueryStatus, UserRole};
use tracing::info;

use crate::actor::Actor;
use crate::error::{ServiceError, ServiceResult};

/// Input for submitting a contact query. Unauthenticated.
#[derive(Debug, Clone)]
pub struct NewContactQuery {
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub query_type: Option<String>,
    pub message: String,
}

/// An admin's response to a query.
#[derive(Debug, Clone)]
pub struct QueryResponse {
    pub admin_response: String,
    pub status: QueryStatus,
}

#[derive(Clone)]
pub struct ContactQueryService {
    queries: Arc<dyn ContactQueryStore>,
    users: Arc<dyn UserStore>,
}

impl ContactQueryService {
    pub fn new(queries: Arc<dyn ContactQueryStore>, users: Arc<dyn UserStore>) -> Self {
        Self { queries, users }
    }

    pub async fn submit(&self, input: NewContactQuery) -> ServiceResult<ContactQuery> {
        let query = self
            .queries
            .create(CreateContactQueryDto {
                name: input.name,
                email: input.email,
                mobile: input.mobile,
                query_type: input.query_type,
                message: input.message,
            })
            .await?;

        info!(query_id = query.id, "contact query submitted");
        Ok(query)
    }

    pub async fn get(&self, id: Id) -> ServiceResult<ContactQuery> {
        self.queries
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Contact query", id))
    }

    pub async fn list(&self, status: Option<QueryStatus>) -> ServiceResult<Vec<ContactQuery>> {
        Ok(self.queries.list(status).await?)
    }

    /// Records an admin response and moves the query to the given status.
    /// Settled queries cannot be responded to again.
    pub async fn respond(
        &self,
        actor: Actor,
        id: Id,
        response: QueryResponse,
    ) -> ServiceResult<ContactQuery> {
        let query = self.get(id).await?;

        if query.status.is_settled() {
            return Err(ServiceError::bad_request("Query already resolved or closed"));
        }

        let responder = self
            .users
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", actor.id))?;
        if responder.role != UserRole::Admin {
            return Err(ServiceError::bad_request("Only admins can respond to queries"));
        }

        let updated = self
            .queries
            .respond(
                id,
                RespondDto {
                    admin_response: response.admin_response,
                    status: response.status,
                    responded_by: responder.id,
                    responded_at: Utc::now(),
                },
            )
            .await?;

        info!(query_id = id, status = %updated.status, "contact query responded");
        Ok(updated)
    }
}
