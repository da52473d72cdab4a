//! Session context shared between the workflow components.
//!
//! The session holds the authenticated identity and the selected-contract
//! handoff slot, with explicit read/write/clear operations. It persists as a
//! JSON file between console invocations; within one invocation it has a
//! single writer (the active command).

use api::types::{LoginResponse, Role};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("You must be signed in first")]
    NotSignedIn,

    #[error("Session store error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session store corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// The authenticated account, as returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<LoginResponse> for Identity {
    fn from(response: LoginResponse) -> Self {
        Self {
            id: response.user_id,
            name: response.name,
            email: response.email,
            role: response.role,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    identity: Option<Identity>,
    selected_contract: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_in(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn require_identity(&self) -> SessionResult<&Identity> {
        self.identity.as_ref().ok_or(SessionError::NotSignedIn)
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|identity| identity.role)
    }

    /// Hand off which contract the signing page should load.
    pub fn select_contract(&mut self, contract_id: impl Into<String>) {
        self.selected_contract = Some(contract_id.into());
    }

    pub fn selected_contract(&self) -> Option<&str> {
        self.selected_contract.as_deref()
    }

    /// Cleared after a terminal decision is committed.
    pub fn clear_selection(&mut self) {
        self.selected_contract = None;
    }

    pub fn log_out(&mut self) {
        self.identity = None;
        self.selected_contract = None;
    }

    /// Load a session from disk. A missing file is a fresh session.
    pub fn load(path: &Path) -> SessionResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> SessionResult<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
