use crate::config::ServiceConfig;
use crate::service::{ApiError, ApiResult, ContractService};
use crate::types::{
    AccountInfo, Contract, ContractCreate, ContractStatus, LoginRequest, LoginResponse,
    RegisterRequest, Role, StatusUpdate,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, error, info};

/// Error body returned by the contract service on non-success responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

pub struct HttpContractService {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl HttpContractService {
    pub fn new(config: ServiceConfig) -> ApiResult<Self> {
        config
            .validate()
            .map_err(|message| ApiError::Unknown { message })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Unknown {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    pub fn with_default_config() -> ApiResult<Self> {
        Self::new(ServiceConfig::default())
    }

    fn handle_http_error(err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::ServiceUnavailable {
                message: "Request timeout".to_string(),
            }
        } else if err.is_connect() {
            ApiError::ServiceUnavailable {
                message: "Cannot connect to contract service".to_string(),
            }
        } else {
            ApiError::Network(err)
        }
    }

    fn error_from_response(status: StatusCode, detail: Option<String>, resource: &str) -> ApiError {
        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound {
                resource: resource.to_string(),
            },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Authentication,
            StatusCode::SERVICE_UNAVAILABLE => ApiError::ServiceUnavailable {
                message: detail.unwrap_or_else(|| "Contract service unavailable".to_string()),
            },
            StatusCode::BAD_REQUEST => ApiError::Rejected {
                message: detail.unwrap_or_else(|| "Request rejected by contract service".to_string()),
            },
            _ => ApiError::Unknown {
                message: format!(
                    "Contract service error ({}): {}",
                    status,
                    detail.unwrap_or_default()
                ),
            },
        }
    }

    async fn rejection(response: reqwest::Response, resource: &str) -> ApiError {
        let status = response.status();
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail);
        Self::error_from_response(status, detail, resource)
    }
}

#[async_trait]
impl ContractService for HttpContractService {
    async fn register_user(&self, request: &RegisterRequest) -> ApiResult<()> {
        let url = format!("{}/register/user", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(Self::handle_http_error)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, "user registration").await);
        }

        info!("Registered user account for {}", request.email);
        Ok(())
    }

    async fn register_client(&self, request: &RegisterRequest) -> ApiResult<()> {
        let url = format!("{}/register/client", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(Self::handle_http_error)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, "client registration").await);
        }

        info!("Registered client account for {}", request.email);
        Ok(())
    }

    async fn login(&self, role: Role, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let url = format!("{}/login/{}", self.config.base_url, role);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(Self::handle_http_error)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Authentication);
        }

        if !response.status().is_success() {
            return Err(Self::rejection(response, "login").await);
        }

        response.json().await.map_err(Self::handle_http_error)
    }

    async fn client_by_email(&self, email: &str) -> ApiResult<Option<AccountInfo>> {
        debug!("Looking up client account for {}", email);

        let url = format!("{}/clients/by-email", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("email", email)])
            .send()
            .await
            .map_err(Self::handle_http_error)?;

        // Absence is a plain 404, not a fault.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Self::rejection(response, "client account").await);
        }

        let account: AccountInfo = response.json().await.map_err(Self::handle_http_error)?;
        Ok(Some(account))
    }

    async fn create_contract(&self, request: &ContractCreate) -> ApiResult<Contract> {
        debug!("Creating contract \"{}\"", request.title);

        let url = format!("{}/contracts/", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(Self::handle_http_error)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, "contract").await);
        }

        let contract: Contract = response.json().await.map_err(Self::handle_http_error)?;
        info!("Created contract {} in draft", contract.id);
        Ok(contract)
    }

    async fn send_contract(&self, contract_id: &str) -> ApiResult<Contract> {
        debug!("Sending contract {}", contract_id);

        let url = format!("{}/contracts/{}/send", self.config.base_url, contract_id);

        let response = self
            .client
            .put(&url)
            .send()
            .await
            .map_err(Self::handle_http_error)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, "contract").await);
        }

        let contract: Contract = response.json().await.map_err(Self::handle_http_error)?;
        info!("Contract {} sent to client", contract.id);
        Ok(contract)
    }

    async fn contract(&self, contract_id: &str) -> ApiResult<Contract> {
        debug!("Fetching contract {}", contract_id);

        let url = format!("{}/contracts/{}", self.config.base_url, contract_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::handle_http_error)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, "contract").await);
        }

        response.json().await.map_err(Self::handle_http_error)
    }

    async fn update_status(
        &self,
        contract_id: &str,
        status: ContractStatus,
    ) -> ApiResult<Contract> {
        debug!("Requesting transition of contract {} to {}", contract_id, status);

        let url = format!("{}/contracts/{}/status", self.config.base_url, contract_id);

        let response = self
            .client
            .patch(&url)
            .json(&StatusUpdate { status })
            .send()
            .await
            .map_err(Self::handle_http_error)?;

        if !response.status().is_success() {
            let err = Self::rejection(response, "contract").await;
            error!("Status transition rejected for {}: {}", contract_id, err);
            return Err(err);
        }

        let contract: Contract = response.json().await.map_err(Self::handle_http_error)?;
        info!("Contract {} is now {}", contract.id, contract.status);
        Ok(contract)
    }

    async fn contracts_for_user(&self, user_id: &str) -> ApiResult<Vec<Contract>> {
        let url = format!("{}/contracts/user/{}", self.config.base_url, user_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::handle_http_error)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, "contracts").await);
        }

        response.json().await.map_err(Self::handle_http_error)
    }

    async fn contracts_for_client(&self, client_id: &str) -> ApiResult<Vec<Contract>> {
        let url = format!("{}/contracts/client/{}", self.config.base_url, client_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::handle_http_error)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, "contracts").await);
        }

        response.json().await.map_err(Self::handle_http_error)
    }

    async fn health_check(&self) -> ApiResult<()> {
        debug!("Performing health check");

        let url = format!("{}/health", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::handle_http_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::ServiceUnavailable {
                message: format!("Health check failed: {}", response.status()),
            })
        }
    }

    fn service_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_service_creation() {
        let config = ServiceConfig::default();
        let service = HttpContractService::new(config);
        assert!(service.is_ok());
        assert_eq!(service.unwrap().service_name(), "http");
    }

    #[test]
    fn test_service_rejects_invalid_config() {
        let config = ServiceConfig::default().with_base_url("not-a-url");
        assert!(HttpContractService::new(config).is_err());

        let config = ServiceConfig::default().with_timeout(Duration::from_secs(0));
        assert!(HttpContractService::new(config).is_err());
    }

    #[test]
    fn test_service_with_default_config() {
        assert!(HttpContractService::with_default_config().is_ok());
    }

    #[test]
    fn test_error_mapping() {
        let err = HttpContractService::error_from_response(
            StatusCode::NOT_FOUND,
            Some("Contract not found".to_string()),
            "contract",
        );
        assert!(matches!(err, ApiError::NotFound { resource } if resource == "contract"));

        let err = HttpContractService::error_from_response(
            StatusCode::BAD_REQUEST,
            Some("Cannot sign — contract status is 'declined' (must be 'sent')".to_string()),
            "contract",
        );
        match err {
            ApiError::Rejected { message } => {
                assert!(message.contains("must be 'sent'"));
            }
            other => panic!("expected Rejected, got {:?}", other),
        }

        let err =
            HttpContractService::error_from_response(StatusCode::UNAUTHORIZED, None, "login");
        assert!(matches!(err, ApiError::Authentication));

        let err = HttpContractService::error_from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            None,
            "contract",
        );
        assert!(matches!(err, ApiError::Unknown { .. }));
    }

    #[test]
    fn test_rejected_message_is_verbatim() {
        let detail = "Cannot send — contract status is 'sent' (must be 'draft')";
        let err = HttpContractService::error_from_response(
            StatusCode::BAD_REQUEST,
            Some(detail.to_string()),
            "contract",
        );
        assert_eq!(err.to_string(), detail);
    }
}
