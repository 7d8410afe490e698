//! API request/response models

use serde::{Deserialize, Serialize};

use crate::api::error::ApiResult;
use crate::api::middleware::validate_required;
use crate::db::NewItem;

/// Body of `POST /items`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateItemRequest {
    /// Item name (required, non-empty)
    #[serde(default)]
    pub name: Option<String>,

    /// Item description (optional)
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateItemRequest {
    /// Validate the request and turn it into insertable values
    pub fn into_new_item(self) -> ApiResult<NewItem> {
        validate_required(self.name.as_deref(), "Name")?;
        Ok(NewItem {
            name: self.name.unwrap_or_default(),
            description: self.description,
        })
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

impl HealthResponse {
    pub fn up() -> Self {
        Self {
            status: "OK".to_string(),
            message: "Backend is up and running".to_string(),
            version: crate::version().to_string(),
        }
    }
}
