pub mod config;
pub mod http;
pub mod service;
pub mod types;

pub use config::ServiceConfig;
pub use http::HttpContractService;
pub use service::{ApiError, ApiResult, ContractService};
pub use types::{
    AccountInfo, Clause, Clauses, Contract, ContractCreate, ContractStatus, ContractType,
    LoginRequest, LoginResponse, RegisterRequest, Role, StatusUpdate,
};

pub mod prelude {
    pub use crate::config::*;
    pub use crate::http::*;
    pub use crate::service::*;
    pub use crate::types::*;
}
