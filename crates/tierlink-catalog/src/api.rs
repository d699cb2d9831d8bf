//! Catalog abstraction trait
//!
//! The orchestrator only talks to the catalog through [`CatalogApi`], so tests can
//! substitute an in-memory catalog for the HTTP client.

use async_trait::async_trait;
use tierlink_core::models::{CollectionItem, FileSet, Format, Job, ObjectType, StorageRecord};

use crate::error::CatalogResult;

#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Look up a storage by id. `None` when the catalog does not know it.
    async fn get_storage(&self, storage_id: &str) -> CatalogResult<Option<StorageRecord>>;

    /// Look up a named format on an asset. `None` when the asset has no such format.
    async fn get_format(&self, asset_id: &str, format_name: &str)
        -> CatalogResult<Option<Format>>;

    /// All file sets of an asset format on one storage, across every page.
    async fn get_file_sets(
        &self,
        asset_id: &str,
        format_id: &str,
        storage_id: &str,
    ) -> CatalogResult<Vec<FileSet>>;

    /// Delete a file set, then purge it.
    async fn delete_and_purge_file_set(&self, asset_id: &str, file_set_id: &str)
        -> CatalogResult<()>;

    /// Submit a bulk copy of one format for a group of objects. Returns the job id.
    async fn copy_bulk(
        &self,
        object_ids: &[String],
        object_type: ObjectType,
        format_name: &str,
        target_storage_id: &str,
    ) -> CatalogResult<String>;

    async fn get_job(&self, job_id: &str) -> CatalogResult<Job>;

    /// Direct children of a collection restricted to `object_types`, across every page.
    async fn get_collection_contents(
        &self,
        collection_id: &str,
        object_types: &[ObjectType],
    ) -> CatalogResult<Vec<CollectionItem>>;
}
