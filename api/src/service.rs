use crate::types::{
    AccountInfo, Contract, ContractCreate, ContractStatus, LoginRequest, LoginResponse,
    RegisterRequest, Role,
};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("{message}")]
    Rejected { message: String },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    #[error("Authentication failed")]
    Authentication,

    #[error("Unknown error: {message}")]
    Unknown { message: String },
}

impl ApiError {
    // Transport faults get the generic "server unreachable" treatment in the
    // UI; everything else carries the backend's own message.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Network(_) | ApiError::ServiceUnavailable { .. }
        )
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait ContractService: Send + Sync {
    async fn register_user(&self, request: &RegisterRequest) -> ApiResult<()>;

    async fn register_client(&self, request: &RegisterRequest) -> ApiResult<()>;

    async fn login(&self, role: Role, request: &LoginRequest) -> ApiResult<LoginResponse>;

    /// Resolve an account id from an email address. Absence is signaled by a
    /// non-success response, not an error body, so it surfaces as `Ok(None)`.
    async fn client_by_email(&self, email: &str) -> ApiResult<Option<AccountInfo>>;

    async fn create_contract(&self, request: &ContractCreate) -> ApiResult<Contract>;

    async fn send_contract(&self, contract_id: &str) -> ApiResult<Contract>;

    async fn contract(&self, contract_id: &str) -> ApiResult<Contract>;

    async fn update_status(
        &self,
        contract_id: &str,
        status: ContractStatus,
    ) -> ApiResult<Contract>;

    async fn contracts_for_user(&self, user_id: &str) -> ApiResult<Vec<Contract>>;

    async fn contracts_for_client(&self, client_id: &str) -> ApiResult<Vec<Contract>>;

    async fn health_check(&self) -> ApiResult<()>;

    fn service_name(&self) -> &'static str;
}
