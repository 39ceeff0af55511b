use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;

use crate::models::{Event, EventDraft, EventPatch};
use crate::store::{EventStore, StoreError};
use crate::utils;

/// Key the whole event collection is stored under, as one JSON array.
pub const STORAGE_KEY: &str = "smart_event_planner_events";

pub struct LocalStore {
    conn: Mutex<Connection>,
}

impl LocalStore {
    pub fn open_default() -> Result<Self, StoreError> {
        let path = utils::database_path();
        utils::ensure_parent(&path);
        Self::open(path)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv(
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn load(conn: &Connection) -> Result<Vec<Event>, StoreError> {
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()?;
        match value {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(conn: &Connection, events: &[Event]) -> Result<(), StoreError> {
        let value = serde_json::to_string(events)?;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![STORAGE_KEY, value],
        )?;
        Ok(())
    }

    // Epoch-millis string, suffixed when two creates land in the same millisecond.
    fn next_id(events: &[Event], millis: i64) -> String {
        let base = millis.to_string();
        if !events.iter().any(|event| event.id == base) {
            return base;
        }
        let mut n = 1;
        loop {
            let candidate = format!("{base}-{n}");
            if !events.iter().any(|event| event.id == candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[async_trait]
impl EventStore for LocalStore {
    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let conn = self.conn.lock().await;
        Self::load(&conn)
    }

    async fn get_event(&self, id: &str) -> Result<Option<Event>, StoreError> {
        let conn = self.conn.lock().await;
        let events = Self::load(&conn)?;
        Ok(events.into_iter().find(|event| event.id == id))
    }

    async fn create_event(&self, draft: EventDraft) -> Result<Event, StoreError> {
        let conn = self.conn.lock().await;
        let mut events = Self::load(&conn)?;
        let now = Utc::now();
        let id = Self::next_id(&events, now.timestamp_millis());
        let event = draft.into_event(id, now);
        events.insert(0, event.clone());
        Self::save(&conn, &events)?;
        Ok(event)
    }

    async fn update_event(&self, id: &str, patch: EventPatch) -> Result<Event, StoreError> {
        let conn = self.conn.lock().await;
        let mut events = Self::load(&conn)?;
        let event = events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        patch.apply(event);
        event.updated_at = Utc::now();
        let updated = event.clone();
        Self::save(&conn, &events)?;
        Ok(updated)
    }

    async fn delete_event(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.conn.lock().await;
        let mut events = Self::load(&conn)?;
        events.retain(|event| event.id != id);
        Self::save(&conn, &events)?;
        // Mirrors the hosted table: deleting an absent id still reports success.
        Ok(true)
    }
}
