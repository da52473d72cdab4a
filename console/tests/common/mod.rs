//! Shared test double for the contract service: records every request and
//! plays back scripted behavior.

// Each test binary exercises a different slice of this module.
#![allow(dead_code)]

use api::prelude::*;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    RegisterClient { email: String },
    ClientLookup { email: String },
    CreateContract { title: String },
    SendContract { contract_id: String },
    FetchContract { contract_id: String },
    UpdateStatus { contract_id: String, status: ContractStatus },
}

#[derive(Default)]
pub struct RecordingService {
    pub calls: Mutex<Vec<Call>>,
    pub last_create: Mutex<Option<ContractCreate>>,
    known_clients: Mutex<HashMap<String, AccountInfo>>,
    next_client: Mutex<u32>,
    provisioning_enabled: bool,
    fail_send: bool,
    fail_fetch: bool,
    reject_updates: Option<String>,
    stored_contract: Mutex<Option<Contract>>,
}

impl RecordingService {
    pub fn new() -> Self {
        Self {
            provisioning_enabled: true,
            ..Self::default()
        }
    }

    pub fn with_known_client(self, email: &str, client_id: &str) -> Self {
        self.known_clients.lock().unwrap().insert(
            email.to_string(),
            AccountInfo {
                user_id: client_id.to_string(),
                name: "Known Client".to_string(),
                email: email.to_string(),
            },
        );
        self
    }

    pub fn with_contract(self, contract: Contract) -> Self {
        *self.stored_contract.lock().unwrap() = Some(contract);
        self
    }

    pub fn failing_provisioning(mut self) -> Self {
        self.provisioning_enabled = false;
        self
    }

    pub fn failing_send(mut self) -> Self {
        self.fail_send = true;
        self
    }

    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    pub fn rejecting_updates(mut self, detail: &str) -> Self {
        self.reject_updates = Some(detail.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn requested_statuses(&self) -> Vec<ContractStatus> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::UpdateStatus { status, .. } => Some(status),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn sample_contract(id: &str, status: ContractStatus, clauses: Clauses) -> Contract {
    Contract {
        id: id.to_string(),
        title: "Acme MSA".to_string(),
        contract_type: ContractType::Consulting,
        description: Some("Consulting engagement".to_string()),
        amount: 5000.0,
        due_date: None,
        clauses,
        status,
        user_id: "user-1".to_string(),
        client_id: "client-1".to_string(),
        created_at: Utc::now(),
        signed_at: None,
    }
}

#[async_trait]
impl ContractService for RecordingService {
    async fn register_user(&self, _request: &RegisterRequest) -> ApiResult<()> {
        Ok(())
    }

    async fn register_client(&self, request: &RegisterRequest) -> ApiResult<()> {
        self.record(Call::RegisterClient {
            email: request.email.clone(),
        });

        if !self.provisioning_enabled {
            return Err(ApiError::Rejected {
                message: "Email already registered".to_string(),
            });
        }

        let mut next = self.next_client.lock().unwrap();
        *next += 1;
        let account = AccountInfo {
            user_id: format!("client-{}", *next),
            name: request.name.clone(),
            email: request.email.clone(),
        };
        self.known_clients
            .lock()
            .unwrap()
            .insert(request.email.clone(), account);
        Ok(())
    }

    async fn login(&self, role: Role, request: &LoginRequest) -> ApiResult<LoginResponse> {
        Ok(LoginResponse {
            success: true,
            user_id: "user-1".to_string(),
            name: "Test Account".to_string(),
            email: request.email.clone(),
            role,
        })
    }

    async fn client_by_email(&self, email: &str) -> ApiResult<Option<AccountInfo>> {
        self.record(Call::ClientLookup {
            email: email.to_string(),
        });
        Ok(self.known_clients.lock().unwrap().get(email).cloned())
    }

    async fn create_contract(&self, request: &ContractCreate) -> ApiResult<Contract> {
        self.record(Call::CreateContract {
            title: request.title.clone(),
        });
        *self.last_create.lock().unwrap() = Some(request.clone());

        let contract = Contract {
            id: "contract-1".to_string(),
            title: request.title.clone(),
            contract_type: request.contract_type,
            description: Some(request.description.clone()),
            amount: request.amount,
            due_date: Some(request.due_date),
            clauses: request.clauses,
            status: ContractStatus::Draft,
            user_id: request.user_id.clone(),
            client_id: request.client_id.clone(),
            created_at: Utc::now(),
            signed_at: None,
        };
        *self.stored_contract.lock().unwrap() = Some(contract.clone());
        Ok(contract)
    }

    async fn send_contract(&self, contract_id: &str) -> ApiResult<Contract> {
        self.record(Call::SendContract {
            contract_id: contract_id.to_string(),
        });

        if self.fail_send {
            return Err(ApiError::ServiceUnavailable {
                message: "Cannot connect to contract service".to_string(),
            });
        }

        let mut stored = self.stored_contract.lock().unwrap();
        let contract = stored.as_mut().ok_or_else(|| ApiError::NotFound {
            resource: "contract".to_string(),
        })?;
        contract.status = ContractStatus::Sent;
        Ok(contract.clone())
    }

    async fn contract(&self, contract_id: &str) -> ApiResult<Contract> {
        self.record(Call::FetchContract {
            contract_id: contract_id.to_string(),
        });

        if self.fail_fetch {
            return Err(ApiError::ServiceUnavailable {
                message: "Request timeout".to_string(),
            });
        }

        self.stored_contract
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ApiError::NotFound {
                resource: "contract".to_string(),
            })
    }

    async fn update_status(
        &self,
        contract_id: &str,
        status: ContractStatus,
    ) -> ApiResult<Contract> {
        self.record(Call::UpdateStatus {
            contract_id: contract_id.to_string(),
            status,
        });

        if let Some(detail) = &self.reject_updates {
            return Err(ApiError::Rejected {
                message: detail.clone(),
            });
        }

        let mut stored = self.stored_contract.lock().unwrap();
        let contract = stored.as_mut().ok_or_else(|| ApiError::NotFound {
            resource: "contract".to_string(),
        })?;
        contract.status = status;
        if status == ContractStatus::Signed {
            contract.signed_at = Some(Utc::now());
        }
        Ok(contract.clone())
    }

    async fn contracts_for_user(&self, _user_id: &str) -> ApiResult<Vec<Contract>> {
        Ok(self.stored_contract.lock().unwrap().clone().into_iter().collect())
    }

    async fn contracts_for_client(&self, _client_id: &str) -> ApiResult<Vec<Contract>> {
        Ok(self.stored_contract.lock().unwrap().clone().into_iter().collect())
    }

    async fn health_check(&self) -> ApiResult<()> {
        Ok(())
    }

    fn service_name(&self) -> &'static str {
        "recording"
    }
}
