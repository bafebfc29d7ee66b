use shared::models::*;
use shared::validation::{ValidationError, ValidationPolicy};
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use crate::persistence::{Persistence, PersistenceError};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Vote {0} not found")]
    NotFound(VoteId),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("No vote ids left after {0}")]
    IdsExhausted(VoteId),
}

/// The authoritative copy of every vote.
///
/// Mutations hold the write lock while they build the next state, save it
/// and swap it in. A failed save leaves the in-memory state as it was, so
/// memory never runs ahead of disk and `next_id` never moves backwards.
pub struct Store {
    state: RwLock<StoreState>,
    persistence: Box<dyn Persistence>,
    policy: ValidationPolicy,
}

impl Store {
    pub async fn open(
        persistence: impl Persistence + 'static,
        policy: ValidationPolicy,
    ) -> Result<Self, PersistenceError> {
        let state = persistence.load().await?;
        Ok(Self {
            state: RwLock::new(state),
            persistence: Box::new(persistence),
            policy,
        })
    }

    #[instrument(skip(self, request))]
    pub async fn create(&self, request: &CreateVoteRequest) -> Result<VoteRecord, StoreError> {
        let fields = (self.policy.create)(request)?;

        let mut current = self.state.write().await;
        let following = current
            .next_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted(current.next_id))?;

        let mut next = current.clone();
        let record = VoteRecord {
            id: next.next_id,
            title: fields.title,
            content: fields.content,
            created_at: OffsetDateTime::now_utc(),
        };
        next.next_id = following;
        next.records.push(record.clone());

        self.commit(&mut current, next).await?;
        debug!(id = record.id, "Created vote");
        Ok(record)
    }

    pub async fn list(&self) -> Vec<VoteRecord> {
        self.state.read().await.newest_first()
    }

    pub async fn get(&self, id: VoteId) -> Option<VoteRecord> {
        self.state.read().await.find(id).cloned()
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: VoteId, request: &UpdateVoteRequest) -> Result<VoteRecord, StoreError> {
        let fields = (self.policy.update)(request)?;

        let mut current = self.state.write().await;
        let index = current.position(id).ok_or(StoreError::NotFound(id))?;

        let mut next = current.clone();
        let record = &mut next.records[index];
        record.title = fields.title;
        record.content = fields.content;
        let updated = record.clone();

        self.commit(&mut current, next).await?;
        debug!(id, "Updated vote");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: VoteId) -> Result<VoteRecord, StoreError> {
        let mut current = self.state.write().await;
        let index = current.position(id).ok_or(StoreError::NotFound(id))?;

        let mut next = current.clone();
        let removed = next.records.remove(index);

        self.commit(&mut current, next).await?;
        debug!(id, "Deleted vote");
        Ok(removed)
    }

    /// Writes the current state again without changing it.
    pub async fn flush(&self) -> Result<(), PersistenceError> {
        let current = self.state.write().await;
        self.persistence.save(&current).await
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    pub async fn snapshot(&self) -> StoreState {
        self.state.read().await.clone()
    }

    async fn commit(&self, current: &mut StoreState, next: StoreState) -> Result<(), StoreError> {
        self.persistence.save(&next).await?;
        *current = next;
        Ok(())
    }
}
