use rocket::serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::ProviderInfo;
use crate::provider::ProviderError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: i64,
    pub message: String,
}

impl From<&ProviderError> for ErrorBody {
    fn from(e: &ProviderError) -> Self {
        Self {
            code: e.code(),
            message: e.to_string(),
        }
    }
}

/// Body of `POST /api/v1/request`: `{"result": ...}` or `{"error": {...}}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestOutcome {
    Success { result: Value },
    Failure { error: ErrorBody },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GlobalSlot {
    pub is_meta_mask: bool,
    pub selected_address: String,
    pub chain_id: String,
    pub network_version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProvidersResponse {
    pub global_slot: Option<GlobalSlot>,
    pub announcements: Vec<ProviderInfo>,
}
