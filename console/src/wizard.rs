//! The multi-step contract creation wizard.
//!
//! Three ordered steps: type selection, terms entry, review. Navigation is
//! gated (step 1 requires a selected type) and all state stays local until
//! `submit`, the sole point of network effect: client lookup, optional
//! provisioning, contract creation, then the send transition, each awaited
//! sequentially with a failure aborting the remaining steps.

use crate::render::{self, TermsSection};
use crate::session::Session;
use api::service::{ApiError, ContractService};
use api::types::{
    AccountInfo, Clause, Clauses, Contract, ContractCreate, ContractType, RegisterRequest,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const FIRST_STEP: u8 = 1;
pub const REVIEW_STEP: u8 = 3;

// Auto-provisioned counterparty accounts get this placeholder credential.
const PLACEHOLDER_PASSWORD: &str = "default123";

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("{message}")]
    Validation { message: String },

    #[error("Could not find or register the client. Please ensure the client has an account.")]
    IdentityResolution { email: String },

    #[error("You must be logged in to create a contract.")]
    NotSignedIn,

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type WizardResult<T> = Result<T, WizardError>;

/// Raw form input, as entered. The amount stays currency-formatted text
/// until submission.
#[derive(Debug, Clone, Default)]
pub struct ContractForm {
    pub title: String,
    pub client_name: String,
    pub client_email: String,
    pub amount: String,
    pub due_date: Option<NaiveDate>,
    pub description: String,
}

/// Human-readable preview of the in-progress contract, recomputed from form
/// state whenever the review step is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractPreview {
    pub title: String,
    pub client: String,
    pub amount: String,
    pub due_date: String,
    pub prepared_on: String,
    pub sections: Vec<TermsSection>,
}

#[derive(Debug, Clone)]
pub struct ContractWizard {
    step: u8,
    selected_type: Option<ContractType>,
    clauses: Clauses,
    pub form: ContractForm,
}

impl Default for ContractWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractWizard {
    pub fn new() -> Self {
        Self {
            step: FIRST_STEP,
            selected_type: None,
            clauses: Clauses::default(),
            form: ContractForm::default(),
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn selected_type(&self) -> Option<ContractType> {
        self.selected_type
    }

    pub fn clauses(&self) -> Clauses {
        self.clauses
    }

    /// Exactly one type may be selected; selecting a new one replaces the
    /// prior selection.
    pub fn select_type(&mut self, contract_type: ContractType) {
        self.selected_type = Some(contract_type);
    }

    /// Flip a clause toggle. Returns a refreshed preview when the wizard is
    /// on the review step, so the caller can re-render immediately.
    pub fn toggle_clause(&mut self, clause: Clause) -> Option<ContractPreview> {
        self.clauses.toggle(clause);
        if self.step == REVIEW_STEP {
            Some(self.preview())
        } else {
            None
        }
    }

    /// Move forward one step. Leaving step 1 requires a selected type;
    /// advancing past the review step is a no-op.
    pub fn advance(&mut self) -> WizardResult<u8> {
        if self.step == FIRST_STEP && self.selected_type.is_none() {
            return Err(WizardError::Validation {
                message: "Please select a contract type".to_string(),
            });
        }
        if self.step < REVIEW_STEP {
            self.step += 1;
        }
        Ok(self.step)
    }

    /// Move back one step; a no-op on step 1.
    pub fn retreat(&mut self) -> u8 {
        if self.step > FIRST_STEP {
            self.step -= 1;
        }
        self.step
    }

    pub fn on_review_step(&self) -> bool {
        self.step == REVIEW_STEP
    }

    pub fn preview(&self) -> ContractPreview {
        let amount = parse_amount(&self.form.amount);
        let due_date = self.form.due_date.map(start_of_day);

        let mut sections = Vec::new();
        if self.clauses.payment {
            sections.push(render::payment_terms(amount, due_date));
        }
        if self.clauses.liability {
            sections.push(render::liability_limitation());
        }
        if self.clauses.confidentiality {
            sections.push(render::confidentiality());
        }
        if self.clauses.termination {
            sections.push(render::termination());
        }

        ContractPreview {
            title: fallback(&self.form.title, "Service Agreement"),
            client: fallback(&self.form.client_name, "Client"),
            amount: fallback(&self.form.amount, "$0"),
            due_date: render::format_due(due_date),
            prepared_on: render::format_date(Utc::now()),
            sections,
        }
    }

    /// Validate the form, resolve the counterparty, then create and send the
    /// contract. Returns the contract as the service last reported it.
    pub async fn submit(
        &self,
        service: &dyn ContractService,
        session: &Session,
    ) -> WizardResult<Contract> {
        let title = self.form.title.trim();
        let client_email = self.form.client_email.trim();

        if title.is_empty() || client_email.is_empty() {
            return Err(WizardError::Validation {
                message: "Please fill in the contract title and client email.".to_string(),
            });
        }

        let identity = session.identity().ok_or(WizardError::NotSignedIn)?;

        let client = self.resolve_client(service, client_email).await?;

        let amount = parse_amount(&self.form.amount);
        let due_date = self
            .form
            .due_date
            .map(start_of_day)
            .unwrap_or_else(Utc::now);

        let request = ContractCreate::new(
            title,
            self.selected_type.unwrap_or(ContractType::Custom),
            &identity.id,
            &client.user_id,
        )
        .with_description(self.form.description.trim())
        .with_amount(amount)
        .with_due_date(due_date)
        .with_clauses(self.clauses);

        let created = service.create_contract(&request).await?;
        debug!("Created contract {}, requesting send", created.id);

        let sent = service.send_contract(&created.id).await?;
        info!("Contract {} sent to {}", sent.id, client_email);

        Ok(sent)
    }

    /// Resolve the client identity by email, provisioning an account when
    /// none exists. Lookup faults are treated like absence; registration
    /// refusals (including "already exists") fall back to a second lookup.
    async fn resolve_client(
        &self,
        service: &dyn ContractService,
        email: &str,
    ) -> WizardResult<AccountInfo> {
        if let Ok(Some(account)) = service.client_by_email(email).await {
            return Ok(account);
        }

        let name = {
            let entered = self.form.client_name.trim();
            if entered.is_empty() {
                email.split('@').next().unwrap_or(email).to_string()
            } else {
                entered.to_string()
            }
        };

        let request = RegisterRequest::new(name, email, PLACEHOLDER_PASSWORD);
        if let Err(err) = service.register_client(&request).await {
            warn!("Client provisioning for {} failed: {}", email, err);
        }

        if let Ok(Some(account)) = service.client_by_email(email).await {
            return Ok(account);
        }

        Err(WizardError::IdentityResolution {
            email: email.to_string(),
        })
    }
}

/// Parse a currency-formatted amount, stripping `$` and `,`. Malformed input
/// falls back to 0; amounts are never negative.
pub fn parse_amount(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    cleaned.parse::<f64>().unwrap_or(0.0).max(0.0)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn fallback(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}
