//! Application state shared by every request.

use reqwest::Client;
use tierlink_catalog::{CatalogClient, CatalogResult};
use tierlink_core::Config;

/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pooled HTTP client; per-request catalog clients share it.
    pub http_client: Client,
}

impl AppState {
    pub fn new(config: Config, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Catalog client for one request, authenticated with the caller's token.
    pub fn catalog_client(&self, auth_token: &str) -> CatalogResult<CatalogClient> {
        CatalogClient::new(
            self.http_client.clone(),
            &self.config.catalog_api_url,
            &self.config.catalog_app_id,
            auth_token,
        )
    }
}
