//! Wire payloads for the leader's lock API.

use serde::{Deserialize, Serialize};

/// Response body for endpoints that return a single value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueResponse {
    pub value: String,
}

/// Request body for a compare-and-swap on `GET /lock/{key}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasRequest {
    pub old: String,
    pub new: String,
}

/// Response body for a compare-and-swap on `GET /lock/{key}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasResponse {
    pub value: String,
    pub swapped: bool,
}
