//! Custom-action endpoint.
//!
//! Mounted as the router fallback so every path reaches the same validation
//! pipeline: method, body, storages, context, then path. The shared secret is
//! checked beforehand by the auth middleware.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tierlink_catalog::{CatalogApi, CatalogClient};
use tierlink_core::models::{Action, ActionPayload, ActionRequest, StorageRecord};
use tierlink_core::{parse_format_names, AppError};
use tierlink_services::{TransferOrchestrator, TransferOutcome, TransferPlan};

/// Query parameters carried by registered custom-action URLs.
#[derive(Debug, Default, Deserialize)]
pub struct ActionQuery {
    pub ll_storage_id: Option<String>,
    pub b2_storage_id: Option<String>,
    pub formats: Option<String>,
}

impl ActionQuery {
    /// Unparseable query strings are treated as empty.
    fn from_uri(uri: &Uri) -> Self {
        Query::<ActionQuery>::try_from_uri(uri)
            .map(|Query(query)| query)
            .unwrap_or_default()
    }
}

async fn resolve_storage(
    client: &CatalogClient,
    role: &str,
    storage_id: Option<&str>,
) -> Result<StorageRecord, HttpAppError> {
    let storage_id = storage_id.filter(|id| !id.is_empty()).ok_or_else(|| {
        AppError::Configuration(format!("No {} storage id in request or configuration", role))
    })?;

    client.get_storage(storage_id).await?.ok_or_else(|| {
        HttpAppError(AppError::Configuration(format!(
            "{} storage {} not found",
            role, storage_id
        )))
    })
}

pub async fn handle_action(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<impl IntoResponse, HttpAppError> {
    let start = Instant::now();

    if method != Method::POST {
        return Err(AppError::MethodNotAllowed(method.to_string()).into());
    }

    let payload = ActionPayload::from_body(&body)?;
    let client = state.catalog_client(payload.auth_token()?)?;

    let query = ActionQuery::from_uri(&uri);
    let config = &state.config;
    let edge_storage = resolve_storage(
        &client,
        "edge",
        query
            .ll_storage_id
            .as_deref()
            .or(config.edge_storage_id.as_deref()),
    )
    .await?;
    let object_storage = resolve_storage(
        &client,
        "object",
        query
            .b2_storage_id
            .as_deref()
            .or(config.object_storage_id.as_deref()),
    )
    .await?;

    payload.context()?;
    let action = Action::from_path(uri.path())
        .ok_or_else(|| AppError::NotFound(format!("Unknown action path {}", uri.path())))?;
    let request = payload.into_request()?;

    let format_names = query
        .formats
        .as_deref()
        .map(parse_format_names)
        .filter(|names| !names.is_empty())
        .unwrap_or_else(|| config.format_names.clone());

    tracing::info!(
        action = %action,
        context = %request.context,
        assets = request.asset_ids.len(),
        collections = request.collection_ids.len(),
        formats = %format_names.join(","),
        edge_storage_id = %edge_storage.id,
        object_storage_id = %object_storage.id,
        "Accepted custom action"
    );

    let plan = TransferPlan {
        format_names,
        edge_storage_id: edge_storage.id,
        object_storage_id: object_storage.id,
        sync_add: config.synchronous_processing,
    };
    let orchestrator = TransferOrchestrator::new(Arc::new(client))
        .with_poll_interval(config.job_poll_interval());

    if action == Action::Add && !config.synchronous_processing {
        tokio::spawn(async move {
            dispatch(orchestrator, action, request, plan).await;
        });
    } else {
        dispatch(orchestrator, action, request, plan).await;
    }

    tracing::debug!(
        action = %action,
        duration_ms = start.elapsed().as_millis() as u64,
        "Custom action handled"
    );

    Ok((StatusCode::OK, "OK"))
}

/// Run the orchestration and log its outcome. Failures never change the response.
async fn dispatch(
    orchestrator: TransferOrchestrator,
    action: Action,
    request: ActionRequest,
    plan: TransferPlan,
) {
    match orchestrator.run(action, &request, &plan).await {
        Ok(TransferOutcome::Copied { succeeded: true }) => {
            tracing::info!(action = %action, "Copy jobs submitted");
        }
        Ok(TransferOutcome::Copied { succeeded: false }) => {
            tracing::warn!(action = %action, "Copy jobs finished unsuccessfully");
        }
        Ok(TransferOutcome::Archived { file_sets_deleted }) => {
            tracing::info!(
                action = %action,
                file_sets_deleted,
                "Archived to object storage and removed edge copies"
            );
        }
        Ok(TransferOutcome::ArchiveFailed) => {
            tracing::error!(
                action = %action,
                "Archive copy failed, edge copies were not removed"
            );
        }
        Ok(TransferOutcome::NothingToDo) => {
            tracing::warn!(action = %action, "No formats to process");
        }
        Err(e) => {
            tracing::error!(action = %action, error = %e, "Custom action failed");
        }
    }
}
