//! In-memory catalog for testing

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tierlink_catalog::{CatalogApi, CatalogError, CatalogResult};
use tierlink_core::models::{
    CollectionItem, FileSet, Format, Job, JobStatus, ObjectType, StorageRecord,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkCall {
    pub object_ids: Vec<String>,
    pub object_type: ObjectType,
    pub format_name: String,
    pub target_storage_id: String,
}

/// Every call the orchestrator made, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCatalogCall {
    GetStorage(String),
    GetFormat { asset_id: String, format_name: String },
    GetFileSets { asset_id: String, format_id: String, storage_id: String },
    DeleteAndPurge { asset_id: String, file_set_id: String },
    CopyBulk(BulkCall),
    GetJob(String),
    GetCollectionContents(String),
}

/// Mock catalog. Unscripted jobs report `FINISHED`; scripted jobs walk their status
/// list and then repeat the last entry.
#[derive(Clone, Default)]
#[allow(clippy::type_complexity)]
pub struct FakeCatalog {
    calls: Arc<Mutex<Vec<FakeCatalogCall>>>,
    formats: Arc<Mutex<HashMap<(String, String), Format>>>,
    file_sets: Arc<Mutex<HashMap<(String, String, String), Vec<FileSet>>>>,
    collections: Arc<Mutex<HashMap<String, Vec<CollectionItem>>>>,
    job_scripts: Arc<Mutex<HashMap<String, VecDeque<JobStatus>>>>,
    next_job: Arc<Mutex<u32>>,
    bulk_failure: Arc<Mutex<Option<u16>>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_format(&self, asset_id: &str, format_name: &str, format_id: &str) {
        self.formats.lock().unwrap().insert(
            (asset_id.to_string(), format_name.to_string()),
            Format {
                id: format_id.to_string(),
                name: Some(format_name.to_string()),
            },
        );
    }

    pub fn add_file_sets(&self, asset_id: &str, format_id: &str, storage_id: &str, ids: &[&str]) {
        self.file_sets.lock().unwrap().insert(
            (
                asset_id.to_string(),
                format_id.to_string(),
                storage_id.to_string(),
            ),
            ids.iter()
                .map(|id| FileSet {
                    id: id.to_string(),
                    name: None,
                })
                .collect(),
        );
    }

    pub fn add_collection(&self, collection_id: &str, items: Vec<CollectionItem>) {
        self.collections
            .lock()
            .unwrap()
            .insert(collection_id.to_string(), items);
    }

    pub fn script_job(&self, job_id: &str, statuses: &[JobStatus]) {
        self.job_scripts
            .lock()
            .unwrap()
            .insert(job_id.to_string(), statuses.iter().copied().collect());
    }

    /// Make every bulk copy fail with the given HTTP status.
    pub fn fail_bulk_with(&self, status: u16) {
        *self.bulk_failure.lock().unwrap() = Some(status);
    }

    pub fn calls(&self) -> Vec<FakeCatalogCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn bulk_calls(&self) -> Vec<BulkCall> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                FakeCatalogCall::CopyBulk(bulk) => Some(bulk),
                _ => None,
            })
            .collect()
    }

    pub fn polled_jobs(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                FakeCatalogCall::GetJob(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn deleted_file_sets(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                FakeCatalogCall::DeleteAndPurge {
                    asset_id,
                    file_set_id,
                } => Some((asset_id, file_set_id)),
                _ => None,
            })
            .collect()
    }

    pub fn visited_collections(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                FakeCatalogCall::GetCollectionContents(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: FakeCatalogCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn get_storage(&self, storage_id: &str) -> CatalogResult<Option<StorageRecord>> {
        self.record(FakeCatalogCall::GetStorage(storage_id.to_string()));
        Ok(Some(StorageRecord {
            id: storage_id.to_string(),
            name: None,
            purpose: None,
        }))
    }

    async fn get_format(
        &self,
        asset_id: &str,
        format_name: &str,
    ) -> CatalogResult<Option<Format>> {
        self.record(FakeCatalogCall::GetFormat {
            asset_id: asset_id.to_string(),
            format_name: format_name.to_string(),
        });
        Ok(self
            .formats
            .lock()
            .unwrap()
            .get(&(asset_id.to_string(), format_name.to_string()))
            .cloned())
    }

    async fn get_file_sets(
        &self,
        asset_id: &str,
        format_id: &str,
        storage_id: &str,
    ) -> CatalogResult<Vec<FileSet>> {
        self.record(FakeCatalogCall::GetFileSets {
            asset_id: asset_id.to_string(),
            format_id: format_id.to_string(),
            storage_id: storage_id.to_string(),
        });
        Ok(self
            .file_sets
            .lock()
            .unwrap()
            .get(&(
                asset_id.to_string(),
                format_id.to_string(),
                storage_id.to_string(),
            ))
            .cloned()
            .unwrap_or_default())
    }

    async fn delete_and_purge_file_set(
        &self,
        asset_id: &str,
        file_set_id: &str,
    ) -> CatalogResult<()> {
        self.record(FakeCatalogCall::DeleteAndPurge {
            asset_id: asset_id.to_string(),
            file_set_id: file_set_id.to_string(),
        });
        Ok(())
    }

    async fn copy_bulk(
        &self,
        object_ids: &[String],
        object_type: ObjectType,
        format_name: &str,
        target_storage_id: &str,
    ) -> CatalogResult<String> {
        self.record(FakeCatalogCall::CopyBulk(BulkCall {
            object_ids: object_ids.to_vec(),
            object_type,
            format_name: format_name.to_string(),
            target_storage_id: target_storage_id.to_string(),
        }));

        if let Some(status) = *self.bulk_failure.lock().unwrap() {
            return Err(CatalogError::Remote {
                status,
                body: "bulk copy rejected".to_string(),
            });
        }

        let mut next = self.next_job.lock().unwrap();
        *next += 1;
        Ok(format!("job-{}", *next))
    }

    async fn get_job(&self, job_id: &str) -> CatalogResult<Job> {
        self.record(FakeCatalogCall::GetJob(job_id.to_string()));
        let mut scripts = self.job_scripts.lock().unwrap();
        let status = match scripts.get_mut(job_id) {
            Some(script) if script.len() > 1 => script.pop_front().unwrap_or(JobStatus::Finished),
            Some(script) => script.front().copied().unwrap_or(JobStatus::Finished),
            None => JobStatus::Finished,
        };
        Ok(Job {
            id: job_id.to_string(),
            status,
        })
    }

    async fn get_collection_contents(
        &self,
        collection_id: &str,
        _object_types: &[ObjectType],
    ) -> CatalogResult<Vec<CollectionItem>> {
        self.record(FakeCatalogCall::GetCollectionContents(
            collection_id.to_string(),
        ));
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection_id)
            .cloned()
            .unwrap_or_default())
    }
}
