use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;

use crate::config::AppConfig;
use crate::models::{Event, EventDraft, EventPatch};
use crate::store::{EventStore, StoreError};

const TABLE: &str = "events";

pub struct SupabaseStore {
    client: Client,
    base_url: String,
    anon_key: String,
}

#[derive(Serialize)]
struct InsertPayload<'a> {
    #[serde(flatten)]
    draft: &'a EventDraft,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct PatchPayload<'a> {
    #[serde(flatten)]
    patch: &'a EventPatch,
    // The table trigger overwrites this server-side on update.
    updated_at: DateTime<Utc>,
}

impl SupabaseStore {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let base_url = config
            .supabase_url
            .as_ref()
            .ok_or_else(|| StoreError::Config("missing supabase url".to_string()))?
            .trim()
            .to_string();
        if base_url.is_empty() {
            return Err(StoreError::Config("missing supabase url".to_string()));
        }

        let anon_key = config
            .supabase_anon_key
            .as_ref()
            .ok_or_else(|| StoreError::Config("missing supabase anon key".to_string()))?
            .trim()
            .to_string();
        if anon_key.is_empty() {
            return Err(StoreError::Config("missing supabase anon key".to_string()));
        }

        Ok(Self::new(base_url, anon_key))
    }

    fn table_url(&self) -> Result<Url, StoreError> {
        Url::parse(&format!("{}/rest/v1/{}", self.base_url, TABLE))
            .map_err(|err| StoreError::Config(format!("invalid supabase url: {err}")))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    async fn ensure_success(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }

    // PostgREST answers every row-returning request with a JSON array.
    async fn read_rows(response: Response) -> Result<Vec<Event>, StoreError> {
        let body = response
            .text()
            .await
            .map_err(|err| StoreError::Http(err.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl EventStore for SupabaseStore {
    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let mut url = self.table_url()?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "created_at.desc");

        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|err| StoreError::Http(err.to_string()))?;
        let response = Self::ensure_success(response).await?;
        Self::read_rows(response).await
    }

    async fn get_event(&self, id: &str) -> Result<Option<Event>, StoreError> {
        let mut url = self.table_url()?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("id", &format!("eq.{id}"))
            .append_pair("limit", "1");

        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|err| StoreError::Http(err.to_string()))?;
        let response = Self::ensure_success(response).await?;
        let rows = Self::read_rows(response).await?;
        Ok(rows.into_iter().next())
    }

    async fn create_event(&self, draft: EventDraft) -> Result<Event, StoreError> {
        let url = self.table_url()?;
        let now = Utc::now();
        let payload = InsertPayload {
            draft: &draft,
            created_at: now,
            updated_at: now,
        };

        let response = self
            .request(Method::POST, url)
            .header("Prefer", "return=representation")
            .json(&payload)
            .send()
            .await
            .map_err(|err| StoreError::Http(err.to_string()))?;
        let response = Self::ensure_success(response).await?;
        let status = response.status().as_u16();
        let rows = Self::read_rows(response).await?;
        rows.into_iter().next().ok_or(StoreError::Api {
            status,
            message: "insert returned no rows".to_string(),
        })
    }

    async fn update_event(&self, id: &str, patch: EventPatch) -> Result<Event, StoreError> {
        let mut url = self.table_url()?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        let payload = PatchPayload {
            patch: &patch,
            updated_at: Utc::now(),
        };

        let response = self
            .request(Method::PATCH, url)
            .header("Prefer", "return=representation")
            .json(&payload)
            .send()
            .await
            .map_err(|err| StoreError::Http(err.to_string()))?;
        let response = Self::ensure_success(response).await?;
        let rows = Self::read_rows(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn delete_event(&self, id: &str) -> Result<bool, StoreError> {
        let mut url = self.table_url()?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        let response = self
            .request(Method::DELETE, url)
            .send()
            .await
            .map_err(|err| StoreError::Http(err.to_string()))?;
        Self::ensure_success(response).await?;
        Ok(true)
    }
}
