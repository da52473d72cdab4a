//! Contract review and the sign/decline decision.
//!
//! The desk loads whichever contract the session hands off, renders its
//! terms, and commits exactly one of two terminal decisions. It never
//! re-derives status locally: the service's refusal of an invalid
//! transition is authoritative and is surfaced verbatim.

use crate::render::{render_terms, TermsDocument};
use crate::session::Session;
use crate::signature::SignaturePad;
use api::service::{ApiError, ContractService};
use api::types::{Contract, ContractStatus};
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum SigningError {
    #[error("{message}")]
    Validation { message: String },

    #[error("Please draw your signature")]
    EmptySignature,

    #[error("No contract selected.")]
    NoContractSelected,

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type SigningResult<T> = Result<T, SigningError>;

/// What the review page currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ReviewState {
    /// No contract handed off; nothing to review.
    #[default]
    Idle,
    /// A contract is selected but the fetch failed; the page stays in its
    /// load-pending visuals.
    Pending,
    Ready(Contract),
}

/// Details entered by the signing party.
#[derive(Debug, Clone, Default)]
pub struct SignerDetails {
    pub name: String,
    pub email: String,
    pub agreed_to_terms: bool,
}

#[derive(Debug, Default)]
pub struct SigningDesk {
    state: ReviewState,
}

impl SigningDesk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    pub fn contract(&self) -> Option<&Contract> {
        match &self.state {
            ReviewState::Ready(contract) => Some(contract),
            _ => None,
        }
    }

    /// Fetch the session's selected contract. Fetch failures are logged and
    /// leave the page load-pending; no selection is a no-op.
    pub async fn load_for_review(
        &mut self,
        service: &dyn ContractService,
        session: &Session,
    ) -> &ReviewState {
        let Some(contract_id) = session.selected_contract() else {
            self.state = ReviewState::Idle;
            return &self.state;
        };

        match service.contract(contract_id).await {
            Ok(contract) => {
                info!("Loaded contract {} for review", contract.id);
                self.state = ReviewState::Ready(contract);
            }
            Err(err) => {
                error!("Failed to load contract {} for review: {}", contract_id, err);
                self.state = ReviewState::Pending;
            }
        }
        &self.state
    }

    /// Terms of the loaded contract, rendered in reading order.
    pub fn terms(&self) -> Option<TermsDocument> {
        self.contract().map(render_terms)
    }

    /// Commit the sign decision: requires signer details, agreement, and a
    /// non-blank signature. On success the selection is cleared.
    pub async fn sign(
        &mut self,
        service: &dyn ContractService,
        session: &mut Session,
        signer: &SignerDetails,
        pad: &SignaturePad,
    ) -> SigningResult<Contract> {
        if signer.name.trim().is_empty()
            || signer.email.trim().is_empty()
            || !signer.agreed_to_terms
        {
            return Err(SigningError::Validation {
                message: "Please fill in all required fields and agree to the terms"
                    .to_string(),
            });
        }

        if pad.is_blank() {
            return Err(SigningError::EmptySignature);
        }

        let contract_id = session
            .selected_contract()
            .ok_or(SigningError::NoContractSelected)?
            .to_string();

        let contract = service
            .update_status(&contract_id, ContractStatus::Signed)
            .await?;

        session.clear_selection();
        self.state = ReviewState::Idle;
        info!("Contract {} signed by {}", contract.id, signer.name.trim());

        Ok(contract)
    }

    /// Commit the decline decision. Without explicit confirmation this is a
    /// no-op. On success the selection is cleared.
    pub async fn decline(
        &mut self,
        service: &dyn ContractService,
        session: &mut Session,
        confirmed: bool,
    ) -> SigningResult<Option<Contract>> {
        if !confirmed {
            return Ok(None);
        }

        let contract_id = session
            .selected_contract()
            .ok_or(SigningError::NoContractSelected)?
            .to_string();

        let contract = service
            .update_status(&contract_id, ContractStatus::Declined)
            .await?;

        session.clear_selection();
        self.state = ReviewState::Idle;
        info!("Contract {} declined", contract.id);

        Ok(Some(contract))
    }
}
