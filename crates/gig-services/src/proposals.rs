//! Proposal workflow service
//!
//! Professionals submit proposals to open tasks; the task's client (or an
//! admin) accepts or rejects them. Accepting a proposal assigns the
//! professional and moves the task to IN_PROGRESS in the same transaction.

use std::sync::Arc;

use chrono::Utc;
use gig_core::traits::Id;
use gig_db::{CreateProposalDto, ProposalFilter, ProposalStore, TaskStore};
use gig_models::{Proposal, ProposalStatus, Task, TaskStatus, UserRole};
use tracing::info;

use crate::actor::Actor;
use crate::error::{ServiceError, ServiceResult};

/// Input for submitting a proposal.
#[derive(Debug, Clone)]
pub struct NewProposal {
    pub task_id: Id,
    pub message: String,
    pub proposed_amount: Option<f64>,
    pub estimated_duration: Option<String>,
}

#[derive(Clone)]
pub struct ProposalService {
    proposals: Arc<dyn ProposalStore>,
    tasks: Arc<dyn TaskStore>,
}

impl ProposalService {
    pub fn new(proposals: Arc<dyn ProposalStore>, tasks: Arc<dyn TaskStore>) -> Self {
        Self { proposals, tasks }
    }

    pub async fn create(&self, actor: Actor, input: NewProposal) -> ServiceResult<Proposal> {
        let task = self.load_task(input.task_id).await?;

        if task.status != TaskStatus::Open {
            return Err(ServiceError::bad_request(
                "Cannot submit proposal to task that is not open",
            ));
        }

        if actor.role != UserRole::Professional {
            return Err(ServiceError::bad_request(
                "Only professionals can submit proposals",
            ));
        }

        if actor.id == task.client_id {
            return Err(ServiceError::bad_request(
                "Client cannot submit proposal to their own task",
            ));
        }

        if self
            .proposals
            .exists_for_pair(task.id, actor.id)
            .await?
        {
            return Err(ServiceError::conflict(
                "Proposal already exists for this task and professional",
            ));
        }

        let proposal = self
            .proposals
            .create(CreateProposalDto {
                task_id: task.id,
                professional_id: actor.id,
                message: input.message,
                proposed_amount: input.proposed_amount,
                estimated_duration: input.estimated_duration,
            })
            .await?;

        info!(
            proposal_id = proposal.id,
            task_id = task.id,
            professional_id = actor.id,
            "proposal submitted"
        );
        Ok(proposal)
    }

    pub async fn get(&self, id: Id) -> ServiceResult<Proposal> {
        self.proposals
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Proposal", id))
    }

    pub async fn list(&self, filter: ProposalFilter) -> ServiceResult<Vec<Proposal>> {
        Ok(self.proposals.list(filter).await?)
    }

    /// Transitions a proposal. Only the owning task's client or an admin may
    /// do this. ACCEPTED also assigns the professional to the task.
    pub async fn update_status(
        &self,
        actor: Actor,
        id: Id,
        status: ProposalStatus,
    ) -> ServiceResult<Proposal> {
        let proposal = self.get(id).await?;
        let task = self.load_task(proposal.task_id).await?;

        if !actor.owns_or_admin(task.client_id) {
            return Err(ServiceError::bad_request(
                "Only the task's client or an admin can update this proposal",
            ));
        }

        let now = Utc::now();
        let updated = match status {
            ProposalStatus::Accepted => {
                self.proposals
                    .accept(proposal.id, task.id, proposal.professional_id, now)
                    .await?
            }
            ProposalStatus::Rejected => {
                self.proposals
                    .set_status_with_timestamps(proposal.id, status, None, Some(now))
                    .await?
            }
            ProposalStatus::Pending => {
                self.proposals
                    .set_status_with_timestamps(proposal.id, status, None, None)
                    .await?
            }
            ProposalStatus::Withdrawn => self.proposals.set_status(proposal.id, status).await?,
        };

        info!(proposal_id = id, status = %status, "proposal status updated");
        Ok(updated)
    }

    async fn load_task(&self, id: Id) -> ServiceResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Task", id))
    }
}
