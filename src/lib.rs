//! Data access for the event planner: a hosted Postgres table is the source
//! of truth, with an on-disk fallback store when it cannot be reached.

pub mod config;
pub mod db;
pub mod models;
pub mod service;
pub mod store;
pub mod supabase;
pub mod utils;

pub use config::AppConfig;
pub use db::{LocalStore, STORAGE_KEY};
pub use models::{Event, EventDraft, EventPatch};
pub use service::EventService;
pub use store::{EventStore, StoreError};
pub use supabase::SupabaseStore;
