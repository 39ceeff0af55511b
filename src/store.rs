use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Event, EventDraft, EventPatch};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("event {0} not found")]
    NotFound(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("supabase api error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("local storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
}

/// Backend-neutral CRUD over the `events` collection.
///
/// Implemented by the hosted table ([`SupabaseStore`](crate::supabase::SupabaseStore))
/// and the on-disk fallback ([`LocalStore`](crate::db::LocalStore)).
#[async_trait]
pub trait EventStore: Send + Sync {
    /// All events. The hosted table returns them newest first; the fallback
    /// returns them in stored order.
    async fn list_events(&self) -> Result<Vec<Event>, StoreError>;

    /// A single event by id, or `None` when no row matches.
    async fn get_event(&self, id: &str) -> Result<Option<Event>, StoreError>;

    /// Persist a new event. The store assigns the id and stamps
    /// `created_at`/`updated_at` with the same instant.
    async fn create_event(&self, draft: EventDraft) -> Result<Event, StoreError>;

    /// Merge `patch` into the event and stamp `updated_at`.
    async fn update_event(&self, id: &str, patch: EventPatch) -> Result<Event, StoreError>;

    /// Remove an event by id.
    async fn delete_event(&self, id: &str) -> Result<bool, StoreError>;
}
