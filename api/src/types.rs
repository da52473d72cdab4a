use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Client,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Client => write!(f, "client"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Draft,
    Sent,
    Signed,
    Declined,
}

impl ContractStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ContractStatus::Signed | ContractStatus::Declined)
    }

    pub fn can_transition_to(&self, next: ContractStatus) -> bool {
        matches!(
            (self, next),
            (ContractStatus::Draft, ContractStatus::Sent)
                | (ContractStatus::Sent, ContractStatus::Signed)
                | (ContractStatus::Sent, ContractStatus::Declined)
        )
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractStatus::Draft => write!(f, "draft"),
            ContractStatus::Sent => write!(f, "sent"),
            ContractStatus::Signed => write!(f, "signed"),
            ContractStatus::Declined => write!(f, "declined"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    Service,
    Consulting,
    Nda,
    Custom,
}

impl ContractType {
    // Unknown categories fall back to "custom".
    fn parse_lenient(raw: &str) -> Self {
        match raw {
            "service" => ContractType::Service,
            "consulting" => ContractType::Consulting,
            "nda" => ContractType::Nda,
            _ => ContractType::Custom,
        }
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractType::Service => write!(f, "service"),
            ContractType::Consulting => write!(f, "consulting"),
            ContractType::Nda => write!(f, "nda"),
            ContractType::Custom => write!(f, "custom"),
        }
    }
}

impl std::str::FromStr for ContractType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

impl<'de> Deserialize<'de> for ContractType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&raw))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Clause {
    Payment,
    Liability,
    Confidentiality,
    Termination,
}

impl Clause {
    pub const ALL: [Clause; 4] = [
        Clause::Payment,
        Clause::Liability,
        Clause::Confidentiality,
        Clause::Termination,
    ];
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Clauses {
    pub payment: bool,
    pub liability: bool,
    pub confidentiality: bool,
    pub termination: bool,
}

impl Clauses {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_included(&self, clause: Clause) -> bool {
        match clause {
            Clause::Payment => self.payment,
            Clause::Liability => self.liability,
            Clause::Confidentiality => self.confidentiality,
            Clause::Termination => self.termination,
        }
    }

    pub fn set(&mut self, clause: Clause, included: bool) {
        match clause {
            Clause::Payment => self.payment = included,
            Clause::Liability => self.liability = included,
            Clause::Confidentiality => self.confidentiality = included,
            Clause::Termination => self.termination = included,
        }
    }

    pub fn toggle(&mut self, clause: Clause) -> bool {
        let flipped = !self.is_included(clause);
        self.set(clause, flipped);
        flipped
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub contract_type: ContractType,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub clauses: Clauses,
    pub status: ContractStatus,
    pub user_id: String,
    pub client_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContractCreate {
    pub title: String,
    #[serde(rename = "type")]
    pub contract_type: ContractType,
    pub description: String,
    pub amount: f64,
    pub due_date: DateTime<Utc>,
    pub clauses: Clauses,
    pub user_id: String,
    pub client_id: String,
}

impl ContractCreate {
    pub fn new(
        title: impl Into<String>,
        contract_type: ContractType,
        user_id: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            contract_type,
            description: String::new(),
            amount: 0.0,
            due_date: Utc::now(),
            clauses: Clauses::default(),
            user_id: user_id.into(),
            client_id: client_id.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn with_clauses(mut self, clauses: Clauses) -> Self {
        self.clauses = clauses;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusUpdate {
    pub status: ContractStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountInfo {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub success: bool,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}
