//! Response bodies of the claims service

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use core_kernel::ClaimReference;
use domain_claims::FieldId;

/// Body of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub time: Option<String>,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// Body of `GET /api/claims/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredClaim {
    /// Claim record as stored by the server, keyed by payload key
    pub data: Map<String, Value>,
    #[serde(default)]
    pub pdf_path: Option<String>,
    #[serde(default)]
    pub pdf_hash: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl StoredClaim {
    /// Server-assigned identifier
    pub fn claim_id(&self) -> Option<ClaimReference> {
        self.data.get("id").and_then(Value::as_str).map(ClaimReference::from)
    }

    /// Stored value of a form field
    pub fn field(&self, field: FieldId) -> Option<&str> {
        self.data.get(field.payload_key()).and_then(Value::as_str)
    }

    /// Weather summary the server attached, if any
    pub fn weather_summary(&self) -> Option<&Value> {
        self.data.get("weather_summary")
    }
}
