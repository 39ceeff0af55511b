use tracing::{error, warn};

use crate::config::AppConfig;
use crate::db::LocalStore;
use crate::models::{Event, EventDraft, EventPatch};
use crate::store::{EventStore, StoreError};
use crate::supabase::SupabaseStore;
use crate::utils;

/// CRUD over the event collection, hosted table first with a local fallback.
///
/// - One attempt per backend per call: remote, then local. No retries.
/// - Reads never fail: a double list failure yields no events, a double get
///   failure yields `None`.
/// - Writes report success when either backend accepts them; only a fallback
///   write failure reaches the caller.
pub struct EventService<R: EventStore = SupabaseStore, L: EventStore = LocalStore> {
    remote: Option<R>,
    local: L,
}

impl EventService<SupabaseStore, LocalStore> {
    /// Wire the production stores. The remote store is built only when
    /// `use_remote` is set, and then requires the supabase url and anon key.
    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let remote = if config.use_remote {
            Some(SupabaseStore::from_config(config)?)
        } else {
            None
        };
        let local = match &config.database_path {
            Some(path) => {
                utils::ensure_parent(path);
                LocalStore::open(path)?
            }
            None => LocalStore::open_default()?,
        };
        Ok(Self { remote, local })
    }
}

impl<R: EventStore, L: EventStore> EventService<R, L> {
    pub fn new(remote: Option<R>, local: L) -> Self {
        Self { remote, local }
    }

    pub async fn list_events(&self) -> Vec<Event> {
        if let Some(remote) = &self.remote {
            match remote.list_events().await {
                Ok(events) => return events,
                Err(err) => {
                    warn!(error = %err, "remote list failed, falling back to local store")
                }
            }
        }
        match self.local.list_events().await {
            Ok(events) => events,
            Err(err) => {
                error!(error = %err, "local list failed");
                Vec::new()
            }
        }
    }

    pub async fn get_event(&self, id: &str) -> Option<Event> {
        if let Some(remote) = &self.remote {
            match remote.get_event(id).await {
                Ok(event) => return event,
                Err(err) => {
                    warn!(id, error = %err, "remote get failed, falling back to local store")
                }
            }
        }
        match self.local.get_event(id).await {
            Ok(event) => event,
            Err(err) => {
                error!(id, error = %err, "local get failed");
                None
            }
        }
    }

    pub async fn create_event(&self, draft: EventDraft) -> Result<Event, StoreError> {
        if let Some(remote) = &self.remote {
            match remote.create_event(draft.clone()).await {
                Ok(event) => return Ok(event),
                Err(err) => {
                    warn!(error = %err, "remote create failed, falling back to local store")
                }
            }
        }
        match self.local.create_event(draft).await {
            Ok(event) => Ok(event),
            Err(err) => {
                error!(error = %err, "local create failed");
                Err(err)
            }
        }
    }

    pub async fn update_event(&self, id: &str, patch: EventPatch) -> Result<Event, StoreError> {
        if let Some(remote) = &self.remote {
            match remote.update_event(id, patch.clone()).await {
                Ok(event) => return Ok(event),
                Err(err) => {
                    warn!(id, error = %err, "remote update failed, falling back to local store")
                }
            }
        }
        match self.local.update_event(id, patch).await {
            Ok(event) => Ok(event),
            Err(err) => {
                error!(id, error = %err, "local update failed");
                Err(err)
            }
        }
    }

    pub async fn delete_event(&self, id: &str) -> Result<bool, StoreError> {
        if let Some(remote) = &self.remote {
            match remote.delete_event(id).await {
                Ok(deleted) => return Ok(deleted),
                Err(err) => {
                    warn!(id, error = %err, "remote delete failed, falling back to local store")
                }
            }
        }
        match self.local.delete_event(id).await {
            Ok(deleted) => Ok(deleted),
            Err(err) => {
                error!(id, error = %err, "local delete failed");
                Err(err)
            }
        }
    }
}
