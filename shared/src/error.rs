use serde::{Serialize, Deserialize};

pub const VOTE_NOT_FOUND: &str = "Vote not found";
pub const STORAGE_ERROR: &str = "Storage error";

/// Body of every failed API response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
