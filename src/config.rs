use std::{env, fs, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub use_remote: bool,
    pub database_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_anon_key: None,
            use_remote: true,
            database_path: None,
        }
    }
}

impl AppConfig {
    /// Config file under the data dir, then environment overrides on top.
    pub fn load() -> Self {
        let mut config = read_config(&utils::config_path()).unwrap_or_default();
        if let Some(url) = env_override("SUPABASE_URL") {
            config.supabase_url = Some(url);
        }
        if let Some(key) = env_override("SUPABASE_ANON_KEY") {
            config.supabase_anon_key = Some(key);
        }
        config
    }
}

fn read_config(path: &Path) -> Option<AppConfig> {
    let contents = fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

fn env_override(name: &str) -> Option<String> {
    let value = env::var(name).ok()?;
    let value = value.trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"supabase_url": "https://demo.supabase.co"}"#).unwrap();
        assert_eq!(
            config.supabase_url.as_deref(),
            Some("https://demo.supabase.co")
        );
        assert!(config.use_remote);
        assert!(config.database_path.is_none());
    }

    #[test]
    fn use_remote_can_be_disabled() {
        let config: AppConfig = serde_json::from_str(r#"{"use_remote": false}"#).unwrap();
        assert!(!config.use_remote);
    }
}
