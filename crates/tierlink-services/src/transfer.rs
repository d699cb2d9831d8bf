//! Copy/delete orchestration between the edge and object storage tiers.
//!
//! `add` submits one bulk copy job per (format, object group) towards edge storage.
//! `remove` archives the first format to object storage, waits for those jobs, and
//! only when every job succeeded deletes and purges the edge copies.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tierlink_catalog::{CatalogApi, CatalogResult};
use tierlink_core::models::{Action, ActionRequest, CollectionItem, JobStatus, ObjectType};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const CONTENT_TYPES: [ObjectType; 2] = [ObjectType::Collections, ObjectType::Assets];

/// Storage targets and format list for one request.
#[derive(Debug, Clone)]
pub struct TransferPlan {
    pub format_names: Vec<String>,
    pub edge_storage_id: String,
    pub object_storage_id: String,
    /// Wait for add-path jobs instead of returning after submission.
    pub sync_add: bool,
}

/// What a dispatched action ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Add: jobs submitted (and, when waited on, whether they all succeeded).
    Copied { succeeded: bool },
    /// Remove: archive copy succeeded and edge file sets were deleted.
    Archived { file_sets_deleted: usize },
    /// Remove: at least one archive job did not succeed; nothing was deleted.
    ArchiveFailed,
    /// No format names to work with.
    NothingToDo,
}

#[derive(Clone)]
pub struct TransferOrchestrator {
    catalog: Arc<dyn CatalogApi>,
    poll_interval: Duration,
}

impl TransferOrchestrator {
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self {
            catalog,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Run `action` for `request` according to `plan`.
    pub async fn run(
        &self,
        action: Action,
        request: &ActionRequest,
        plan: &TransferPlan,
    ) -> CatalogResult<TransferOutcome> {
        if plan.format_names.is_empty() {
            tracing::warn!(action = %action, "No format names configured, nothing to do");
            return Ok(TransferOutcome::NothingToDo);
        }

        match action {
            Action::Add => {
                let succeeded = self
                    .copy_files(
                        request,
                        &plan.format_names,
                        &plan.edge_storage_id,
                        plan.sync_add,
                    )
                    .await?;
                Ok(TransferOutcome::Copied { succeeded })
            }
            Action::Remove => {
                let archived = self
                    .copy_files(
                        request,
                        &plan.format_names[..1],
                        &plan.object_storage_id,
                        true,
                    )
                    .await?;
                if !archived {
                    tracing::warn!(
                        object_storage_id = %plan.object_storage_id,
                        "Archive copy did not succeed, keeping edge copies"
                    );
                    return Ok(TransferOutcome::ArchiveFailed);
                }

                let file_sets_deleted = self
                    .delete_files(request, &plan.format_names, &plan.edge_storage_id)
                    .await?;
                Ok(TransferOutcome::Archived { file_sets_deleted })
            }
        }
    }

    /// Submit bulk copy jobs for every format, assets before collections.
    ///
    /// With `sync`, waits for the jobs in submission order and returns `false` as soon
    /// as one of them ends unsuccessfully.
    pub async fn copy_files(
        &self,
        request: &ActionRequest,
        format_names: &[String],
        target_storage_id: &str,
        sync: bool,
    ) -> CatalogResult<bool> {
        let mut job_ids = Vec::new();

        for format_name in format_names {
            let groups = [
                (ObjectType::Assets, &request.asset_ids),
                (ObjectType::Collections, &request.collection_ids),
            ];
            for (object_type, object_ids) in groups {
                if object_ids.is_empty() {
                    continue;
                }
                let job_id = self
                    .catalog
                    .copy_bulk(object_ids, object_type, format_name, target_storage_id)
                    .await?;
                tracing::info!(
                    job_id = %job_id,
                    object_type = %object_type,
                    objects = object_ids.len(),
                    format_name = %format_name,
                    target_storage_id = %target_storage_id,
                    "Submitted bulk copy job"
                );
                job_ids.push(job_id);
            }
        }

        if !sync {
            return Ok(true);
        }

        for job_id in &job_ids {
            let status = self.wait_for_job(job_id).await?;
            if !status.is_success() {
                tracing::warn!(job_id = %job_id, status = %status, "Copy job did not succeed");
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Poll a job at the fixed interval until it reaches a terminal state.
    async fn wait_for_job(&self, job_id: &str) -> CatalogResult<JobStatus> {
        loop {
            tokio::time::sleep(self.poll_interval).await;
            let job = self.catalog.get_job(job_id).await?;
            tracing::debug!(job_id = %job_id, status = %job.status, "Polled copy job");
            if job.status.is_done() {
                return Ok(job.status);
            }
        }
    }

    /// Delete and purge every file set of `format_names` on `storage_id` for the
    /// requested assets, then for every asset reachable from the requested collections.
    /// Returns the number of file sets removed.
    pub async fn delete_files(
        &self,
        request: &ActionRequest,
        format_names: &[String],
        storage_id: &str,
    ) -> CatalogResult<usize> {
        let mut deleted = 0;

        for asset_id in &request.asset_ids {
            deleted += self
                .delete_asset_files(asset_id, format_names, storage_id)
                .await?;
        }

        for collection_id in &request.collection_ids {
            deleted += self
                .delete_collection_files(collection_id, format_names, storage_id)
                .await?;
        }

        Ok(deleted)
    }

    async fn delete_asset_files(
        &self,
        asset_id: &str,
        format_names: &[String],
        storage_id: &str,
    ) -> CatalogResult<usize> {
        let mut deleted = 0;

        for format_name in format_names {
            let Some(format) = self.catalog.get_format(asset_id, format_name).await? else {
                tracing::debug!(
                    asset_id = %asset_id,
                    format_name = %format_name,
                    "Asset has no such format, nothing to delete"
                );
                continue;
            };

            let file_sets = self
                .catalog
                .get_file_sets(asset_id, &format.id, storage_id)
                .await?;
            for file_set in file_sets {
                self.catalog
                    .delete_and_purge_file_set(asset_id, &file_set.id)
                    .await?;
                tracing::info!(
                    asset_id = %asset_id,
                    file_set_id = %file_set.id,
                    format_name = %format_name,
                    storage_id = %storage_id,
                    "Deleted and purged file set"
                );
                deleted += 1;
            }
        }

        Ok(deleted)
    }

    /// Walk a collection tree depth-first in listing order: a subcollection is
    /// entered as soon as it is listed, before its later siblings. Each collection
    /// is visited at most once, so a cyclic hierarchy still terminates.
    async fn delete_collection_files(
        &self,
        collection_id: &str,
        format_names: &[String],
        storage_id: &str,
    ) -> CatalogResult<usize> {
        let mut deleted = 0;
        let mut visited = HashSet::from([collection_id.to_string()]);
        let root = self
            .catalog
            .get_collection_contents(collection_id, &CONTENT_TYPES)
            .await?;
        let mut stack = vec![root.into_iter()];

        loop {
            let Some(items) = stack.last_mut() else {
                break;
            };
            let Some(item) = items.next() else {
                stack.pop();
                continue;
            };

            match item {
                CollectionItem::Asset { id } => {
                    deleted += self.delete_asset_files(&id, format_names, storage_id).await?;
                }
                CollectionItem::Collection { id } => {
                    if !visited.insert(id.clone()) {
                        tracing::warn!(collection_id = %id, "Collection already visited, skipping");
                        continue;
                    }
                    let children = self
                        .catalog
                        .get_collection_contents(&id, &CONTENT_TYPES)
                        .await?;
                    stack.push(children.into_iter());
                }
                CollectionItem::Other => {}
            }
        }

        Ok(deleted)
    }
}
