use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

pub type VoteId = u64;

pub const FIRST_VOTE_ID: VoteId = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteRecord {
    pub id: VoteId,
    pub title: String,
    pub content: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Everything the data file holds: the records in insertion order and the
/// counter the next record's id is taken from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreState {
    #[serde(rename = "votes")]
    pub records: Vec<VoteRecord>,
    #[serde(rename = "nextId")]
    pub next_id: VoteId,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: FIRST_VOTE_ID,
        }
    }
}

impl StoreState {
    pub fn find(&self, id: VoteId) -> Option<&VoteRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn position(&self, id: VoteId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    pub fn max_id(&self) -> Option<VoteId> {
        self.records.iter().map(|record| record.id).max()
    }

    /// Records newest first. Equal timestamps fall back to the id, which
    /// grows with creation order.
    pub fn newest_first(&self) -> Vec<VoteRecord> {
        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| {
            b.created_at.cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        sorted
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateVoteRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateVoteRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfo {
    pub message: String,
    pub endpoints: BTreeMap<String, String>,
}
