use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Id of the `<script type="application/json">` element carrying deployment config.
pub const CONFIG_ELEMENT_ID: &str = "library-client-config";

/// Placeholder substituted with the folder id in [`ClientConfig::parse_path`].
const FOLDER_PLACEHOLDER: &str = "{folder_id}";

/// Known server deployments. They differ only in endpoint paths, field names
/// and a few UI defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// `/api/v1/library` returning `{data: [{folder_id, filename, ...}]}`
    #[default]
    Library,
    /// `/api/v1/files` returning `{files: [{folder, name, size_mb, path, ...}]}`
    Files,
}

/// Client configuration: where the endpoints live and how listing records are shaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server origin. `None` means the page's own origin.
    pub base_url: Option<String>,
    pub listing_path: String,
    /// Key of the item array inside the listing response.
    pub collection_key: String,
    /// Item field holding the folder identifier.
    pub id_field: String,
    /// Item field holding the display name.
    pub name_field: String,
    pub search_path: String,
    /// Per-folder parse endpoint; `{folder_id}` is replaced with the encoded id.
    pub parse_path: String,
    pub clear_path: String,
    pub default_start_from: i64,
    pub default_items_per_page: i64,
    pub status_hide_ms: u64,
    /// Whether `error` status messages disappear on their own.
    pub auto_hide_errors: bool,
    pub search_refresh_delay_ms: u64,
    pub clear_refresh_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::preset(Preset::Library)
    }
}

impl ClientConfig {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Library => Self {
                base_url: None,
                listing_path: "/api/v1/library".to_string(),
                collection_key: "data".to_string(),
                id_field: "folder_id".to_string(),
                name_field: "filename".to_string(),
                search_path: "/parse/articles".to_string(),
                parse_path: "/api/v1/parse_local/{folder_id}".to_string(),
                clear_path: "/api/v1/files/clear".to_string(),
                default_start_from: 0,
                default_items_per_page: 5,
                status_hide_ms: 4000,
                auto_hide_errors: true,
                search_refresh_delay_ms: 0,
                clear_refresh_delay_ms: 1000,
            },
            Preset::Files => Self {
                listing_path: "/api/v1/files".to_string(),
                collection_key: "files".to_string(),
                id_field: "folder".to_string(),
                name_field: "name".to_string(),
                default_items_per_page: 12,
                status_hide_ms: 5000,
                auto_hide_errors: false,
                search_refresh_delay_ms: 500,
                ..Self::preset(Preset::Library)
            },
        }
    }

    /// Parse a JSON config document: an optional `preset` plus field overrides.
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| ClientError::Config(e.to_string()))?;
        let serde_json::Value::Object(mut overrides) = overrides else {
            return Err(ClientError::Config("expected a JSON object".to_string()));
        };

        let preset = match overrides.remove("preset") {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| ClientError::Config(format!("preset: {e}")))?,
            None => Preset::default(),
        };

        let mut merged = serde_json::to_value(Self::preset(preset))
            .map_err(|e| ClientError::Config(e.to_string()))?;
        if let serde_json::Value::Object(base) = &mut merged {
            base.extend(overrides);
        }

        let config: Self = serde_json::from_value(merged)
            .map_err(|e| ClientError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the page.
    /// Returns `Default` if the config element is missing or unparseable.
    pub fn load() -> Self {
        let Some(text) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content())
        else {
            tracing::debug!("No #{CONFIG_ELEMENT_ID} element, using library preset");
            return Self::default();
        };

        match Self::from_json(&text) {
            Ok(config) => {
                tracing::info!(listing = %config.listing_path, "Loaded client config");
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse #{CONFIG_ELEMENT_ID}: {e}, using library preset");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.parse_path.contains(FOLDER_PLACEHOLDER) {
            return Err(ClientError::Config(format!(
                "parse_path must contain {FOLDER_PLACEHOLDER}"
            )));
        }
        for (name, value) in [
            ("collection_key", &self.collection_key),
            ("id_field", &self.id_field),
            ("name_field", &self.name_field),
        ] {
            if value.is_empty() {
                return Err(ClientError::Config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    /// Parse endpoint for one folder.
    pub fn parse_path(&self, folder_id: &str) -> String {
        self.parse_path
            .replace(FOLDER_PLACEHOLDER, &urlencoding::encode(folder_id))
    }

    pub fn status_hide_delay(&self) -> Duration {
        Duration::from_millis(self.status_hide_ms)
    }

    pub fn search_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.search_refresh_delay_ms)
    }

    pub fn clear_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.clear_refresh_delay_ms)
    }
}
