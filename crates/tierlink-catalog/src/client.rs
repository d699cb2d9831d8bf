//! HTTP client for the catalog REST API.
//!
//! One [`CatalogClient`] is built per inbound request because the auth token
//! arrives with the request. The underlying `reqwest::Client` is shared and
//! pooled; it is created once at startup with [`build_http_client`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use std::time::Duration;
use tierlink_core::models::{
    BulkCopyRequest, BulkCopyResponse, CollectionItem, CustomAction, FileSet, Format, Job,
    NewCustomAction, ObjectType, Page, StorageRecord,
};

use crate::api::CatalogApi;
use crate::error::{CatalogError, CatalogResult};

pub const ASSETS_PATH: &str = "/API/assets/v1";
pub const FILES_PATH: &str = "/API/files/v1";
pub const JOBS_PATH: &str = "/API/jobs/v1";

const APP_ID_HEADER: &str = "App-ID";
const AUTH_TOKEN_HEADER: &str = "Auth-Token";

/// Build the shared, pooled HTTP client used for every catalog call.
pub fn build_http_client(timeout: Duration) -> CatalogResult<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Catalog client bound to one application id and one user auth token.
#[derive(Clone, Debug)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
    app_id: String,
    auth_token: String,
}

impl CatalogClient {
    pub fn new(client: Client, base_url: &str, app_id: &str, auth_token: &str) -> CatalogResult<Self> {
        if app_id.trim().is_empty() {
            return Err(CatalogError::MissingCredentials("app id"));
        }
        if auth_token.trim().is_empty() {
            return Err(CatalogError::MissingCredentials("auth token"));
        }

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id: app_id.to_string(),
            auth_token: auth_token.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a path (or an absolute `next_url`) against the base URL.
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(APP_ID_HEADER, self.app_id.as_str())
            .header(AUTH_TOKEN_HEADER, self.auth_token.as_str())
    }

    /// Send a request and log it. Status handling is left to the caller.
    async fn send(&self, method: &str, url: &str, request: RequestBuilder) -> CatalogResult<Response> {
        let response = self.apply_auth(request).send().await?;
        tracing::debug!(
            method = method,
            url = %url,
            status = response.status().as_u16(),
            "Catalog request"
        );
        Ok(response)
    }

    async fn error_for(response: Response) -> CatalogError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        CatalogError::Remote { status, body }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> CatalogResult<T> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| CatalogError::Decode(e.to_string()))
    }

    /// GET request with optional query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> CatalogResult<T> {
        match self.get_optional(path, query).await? {
            Some(body) => Ok(body),
            None => Err(CatalogError::Remote {
                status: StatusCode::NOT_FOUND.as_u16(),
                body: format!("{} not found", path),
            }),
        }
    }

    /// GET request where 404 means "absent" rather than failure.
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> CatalogResult<Option<T>> {
        let url = self.build_url(path);
        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = self.send("GET", &url, request).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::error_for(response).await);
        }

        Ok(Some(Self::decode(response).await?))
    }

    /// GET every page of a listing, following `next_url` until it is absent.
    pub async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> CatalogResult<Vec<T>> {
        let mut items = Vec::new();
        let mut page: Page<T> = self.get(path, query).await?;

        loop {
            items.append(&mut page.objects);
            match page.next_url.take() {
                Some(next) if !next.is_empty() => {
                    page = self.get(&next, &[]).await?;
                }
                _ => break,
            }
        }

        Ok(items)
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> CatalogResult<T> {
        let url = self.build_url(path);
        let request = self.client.post(&url).json(body);

        let response = self.send("POST", &url, request).await?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        Self::decode(response).await
    }

    /// DELETE request. Returns Ok(()) on success; the response body is ignored.
    pub async fn delete(&self, path: &str) -> CatalogResult<()> {
        let url = self.build_url(path);
        let request = self.client.delete(&url);

        let response = self.send("DELETE", &url, request).await?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        Ok(())
    }

    /// Every custom action registered in the catalog.
    pub async fn get_custom_actions(&self) -> CatalogResult<Vec<CustomAction>> {
        self.get_all(&format!("{}/custom_actions/", ASSETS_PATH), &[])
            .await
    }

    /// Register a POST custom action that calls `url` with the shared secret header.
    pub async fn add_action(
        &self,
        context: &str,
        app_id: &str,
        url: &str,
        title: &str,
        shared_secret: &str,
    ) -> CatalogResult<CustomAction> {
        let body = NewCustomAction::post(context, app_id, url, title, shared_secret);
        self.post_json(
            &format!("{}/custom_actions/{}/", ASSETS_PATH, segment(context)),
            &body,
        )
        .await
    }

    pub async fn delete_action(&self, action: &CustomAction) -> CatalogResult<()> {
        self.delete(&format!(
            "{}/custom_actions/{}/{}",
            ASSETS_PATH,
            segment(&action.context),
            segment(&action.id)
        ))
        .await
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn get_storage(&self, storage_id: &str) -> CatalogResult<Option<StorageRecord>> {
        let path = format!("{}/storages/{}/", FILES_PATH, segment(storage_id));
        let body: Option<serde_json::Value> = self.get_optional(&path, &[]).await?;

        let record = match body {
            Some(mut value) => {
                let candidate = match value.as_object_mut().and_then(|map| map.remove("objects")) {
                    Some(serde_json::Value::Array(mut objects)) if !objects.is_empty() => {
                        Some(objects.swap_remove(0))
                    }
                    Some(_) => None,
                    None if value.get("id").is_some() => Some(value),
                    None => None,
                };
                candidate
                    .map(serde_json::from_value::<StorageRecord>)
                    .transpose()
                    .map_err(|e| CatalogError::Decode(e.to_string()))?
            }
            None => None,
        };

        Ok(record)
    }

    async fn get_format(
        &self,
        asset_id: &str,
        format_name: &str,
    ) -> CatalogResult<Option<Format>> {
        let path = format!(
            "{}/assets/{}/formats/{}/",
            FILES_PATH,
            segment(asset_id),
            segment(format_name)
        );
        self.get_optional(&path, &[]).await
    }

    async fn get_file_sets(
        &self,
        asset_id: &str,
        format_id: &str,
        storage_id: &str,
    ) -> CatalogResult<Vec<FileSet>> {
        let path = format!(
            "{}/assets/{}/formats/{}/storages/{}/file_sets/",
            FILES_PATH,
            segment(asset_id),
            segment(format_id),
            segment(storage_id)
        );
        self.get_all(&path, &[]).await
    }

    async fn delete_and_purge_file_set(
        &self,
        asset_id: &str,
        file_set_id: &str,
    ) -> CatalogResult<()> {
        let path = format!(
            "{}/assets/{}/file_sets/{}/",
            FILES_PATH,
            segment(asset_id),
            segment(file_set_id)
        );
        self.delete(&path).await?;
        self.delete(&format!("{}purge/", path)).await
    }

    async fn copy_bulk(
        &self,
        object_ids: &[String],
        object_type: ObjectType,
        format_name: &str,
        target_storage_id: &str,
    ) -> CatalogResult<String> {
        let path = format!("{}/storages/{}/bulk/", FILES_PATH, segment(target_storage_id));
        let body = BulkCopyRequest {
            object_ids,
            object_type,
            format_name,
        };
        let response: BulkCopyResponse = self.post_json(&path, &body).await?;
        Ok(response.job_id)
    }

    async fn get_job(&self, job_id: &str) -> CatalogResult<Job> {
        self.get(&format!("{}/jobs/{}/", JOBS_PATH, segment(job_id)), &[])
            .await
    }

    async fn get_collection_contents(
        &self,
        collection_id: &str,
        object_types: &[ObjectType],
    ) -> CatalogResult<Vec<CollectionItem>> {
        let path = format!(
            "{}/collections/{}/contents/",
            ASSETS_PATH,
            segment(collection_id)
        );
        let types = object_types
            .iter()
            .map(ObjectType::as_str)
            .collect::<Vec<_>>()
            .join(",");
        self.get_all(&path, &[("object_types", types)]).await
    }
}
