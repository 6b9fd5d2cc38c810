//! # HTTP Collaborator
//!
//! reqwest client for the back-office API.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET {base}/customers?q=<raw query>   → customer records               │
//! │  GET {base}/vendors?q=<raw query>     → vendor records                 │
//! │  GET {base}/services                  → [{ value, label }]             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Authentication headers are attached by the surrounding application
//! (through a custom `reqwest::Client`), not here.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use tripdesk_core::{EntityKind, ServiceOption};

use crate::backend::{CatalogSource, EntitySearchBackend, SearchPayload};
use crate::config::LookupConfig;
use crate::error::{LookupError, LookupResult};
use crate::records::{decode_candidates, decode_services};

/// Back-office API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    server_filtered: bool,
}

impl ApiClient {
    /// Builds a client from the lookup configuration.
    pub fn new(config: &LookupConfig) -> LookupResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| LookupError::InvalidConfig(e.to_string()))?;

        Self::with_client(http, config)
    }

    /// Uses a caller-supplied client (auth headers, proxies, ...).
    pub fn with_client(http: Client, config: &LookupConfig) -> LookupResult<Self> {
        Ok(ApiClient {
            http,
            base: config.base_url()?,
            server_filtered: config.search.server_filtered,
        })
    }

    /// `{base}/{path}`, keeping any path prefix the base URL carries.
    fn endpoint(&self, path: &str) -> LookupResult<Url> {
        let joined = format!("{}/{}", self.base.as_str().trim_end_matches('/'), path);
        Ok(Url::parse(&joined)?)
    }

    async fn get_json(&self, url: Url, query: Option<&str>) -> LookupResult<Value> {
        let mut request = self.http.get(url.clone());
        if let Some(q) = query {
            request = request.query(&[("q", q)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::HttpStatus {
                status: status.as_u16(),
                path: url.path().to_string(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl EntitySearchBackend for ApiClient {
    async fn search(&self, kind: EntityKind, query: &str) -> LookupResult<SearchPayload> {
        let url = self.endpoint(kind.collection())?;
        debug!(%kind, query, "GET {}", url);

        let body = self.get_json(url, Some(query)).await?;
        let page = decode_candidates(kind, body)?;

        Ok(SearchPayload {
            candidates: page.records,
            server_filtered: page.filtered.unwrap_or(self.server_filtered),
        })
    }
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn fetch_services(&self) -> LookupResult<Vec<ServiceOption>> {
        let url = self.endpoint("services")?;
        debug!("GET {}", url);

        let body = self.get_json(url, None).await?;
        decode_services(body)
    }
}
