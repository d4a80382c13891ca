use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::core::HttpClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

// ============================================================================
// Library Items
// ============================================================================

/// Server-side folder grouping a document's raw and derived files.
///
/// Servers send it as either a string or a number; it is kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FolderId(pub String);

impl FolderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FolderId {
    fn from(s: &str) -> Self {
        FolderId(s.to_string())
    }
}

/// Text excerpts for an already-parsed document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Previews {
    pub article: String,
    pub annotation: String,
    pub summary: String,
}

/// One downloaded document as listed by the server
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryItem {
    pub folder_id: FolderId,
    pub name: String,
    pub has_txt: bool,
    pub previews: Previews,
    pub size_mb: Option<f64>,
    pub path: Option<String>,
}

impl LibraryItem {
    /// Decode one listing record using the deployment's field names.
    pub fn from_json(raw: &Value, config: &ClientConfig) -> Result<Self> {
        let Value::Object(fields) = raw else {
            return Err(ClientError::Decode("listing entry is not an object".to_string()));
        };

        let folder_id = match fields.get(&config.id_field) {
            Some(Value::String(s)) => FolderId(s.clone()),
            Some(Value::Number(n)) => FolderId(n.to_string()),
            _ => {
                return Err(ClientError::Decode(format!(
                    "listing entry is missing `{}`",
                    config.id_field
                )))
            }
        };

        let name = fields
            .get(&config.name_field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| folder_id.to_string());

        let previews = match fields.get("previews") {
            Some(v @ Value::Object(_)) => serde_json::from_value(v.clone())?,
            _ => Previews::default(),
        };

        Ok(Self {
            folder_id,
            name,
            has_txt: fields.get("has_txt").and_then(Value::as_bool).unwrap_or(false),
            previews,
            size_mb: fields.get("size_mb").and_then(Value::as_f64),
            path: fields.get("path").and_then(Value::as_str).map(str::to_string),
        })
    }
}

/// Extract the item collection from a listing response.
/// A missing or `null` collection is an empty library; unreadable entries
/// are skipped so the rest of the library stays visible.
pub fn decode_listing(body: &Value, config: &ClientConfig) -> Result<Vec<LibraryItem>> {
    match body.get(&config.collection_key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(entries)) => Ok(entries
            .iter()
            .enumerate()
            .filter_map(|(index, raw)| match LibraryItem::from_json(raw, config) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(index, "Skipping listing entry: {}", e);
                    None
                }
            })
            .collect()),
        Some(_) => Err(ClientError::Decode(format!(
            "`{}` is not a list",
            config.collection_key
        ))),
    }
}

// ============================================================================
// Search / Download
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub search_query: String,
    pub start_from: i64,
    pub items_per_page: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleResult {
    pub title: String,
    pub pdf_link: String,
    pub download_status: String,
    pub download_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub message: Option<String>,
    pub results: Vec<ArticleResult>,
}

// ============================================================================
// Clear
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearResponse {
    pub cleared: Option<u64>,
}

/// Decode an optional JSON body; empty or non-JSON bodies give the default.
fn lenient_body<T: for<'de> Deserialize<'de> + Default>(body: &str) -> T {
    if body.trim().is_empty() {
        return T::default();
    }
    serde_json::from_str(body).unwrap_or_else(|e| {
        tracing::debug!("Ignoring unreadable response body: {e}");
        T::default()
    })
}

// ============================================================================
// API
// ============================================================================

/// Server operations the library view depends on.
#[async_trait(?Send)]
pub trait LibraryApi {
    /// List all downloaded documents
    async fn list_items(&self) -> Result<Vec<LibraryItem>>;

    /// Search and download articles on the server
    async fn search_articles(&self, request: &SearchRequest) -> Result<SearchResponse>;

    /// Extract text from the files of one folder
    async fn parse_local(&self, folder_id: &FolderId) -> Result<()>;

    /// Delete every downloaded file
    async fn clear_files(&self) -> Result<ClearResponse>;
}

/// [`LibraryApi`] over HTTP, shaped by a [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct HttpLibraryApi {
    http: HttpClient,
    config: ClientConfig,
}

impl HttpLibraryApi {
    pub fn new(config: ClientConfig) -> Self {
        let http = match &config.base_url {
            Some(base) => HttpClient::new(base.clone()),
            None => HttpClient::for_page_origin(),
        };
        Self { http, config }
    }
}

#[async_trait(?Send)]
impl LibraryApi for HttpLibraryApi {
    async fn list_items(&self) -> Result<Vec<LibraryItem>> {
        let body = self.http.get_json(&self.config.listing_path).await?;
        decode_listing(&body, &self.config)
    }

    async fn search_articles(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let body = self.http.post_json(&self.config.search_path, request).await?;
        Ok(lenient_body(&body))
    }

    async fn parse_local(&self, folder_id: &FolderId) -> Result<()> {
        let path = self.config.parse_path(folder_id.as_str());
        self.http.post_empty(&path).await?;
        Ok(())
    }

    async fn clear_files(&self) -> Result<ClearResponse> {
        let body = self.http.delete(&self.config.clear_path).await?;
        Ok(lenient_body(&body))
    }
}
