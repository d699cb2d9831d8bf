use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Storage record as returned by the files API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Format {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileSet {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Status of a catalog background job.
///
/// Unknown states deserialize to [`JobStatus::Unknown`] and are treated as still running.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Ready,
    Started,
    InProgress,
    Waiting,
    Finished,
    Skipped,
    Failed,
    Aborted,
    #[default]
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Terminal states: the job will not change any more.
    pub fn is_done(&self) -> bool {
        matches!(
            self,
            JobStatus::Finished | JobStatus::Skipped | JobStatus::Failed | JobStatus::Aborted
        )
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Finished | JobStatus::Skipped)
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            JobStatus::Ready => "READY",
            JobStatus::Started => "STARTED",
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::Waiting => "WAITING",
            JobStatus::Finished => "FINISHED",
            JobStatus::Skipped => "SKIPPED",
            JobStatus::Failed => "FAILED",
            JobStatus::Aborted => "ABORTED",
            JobStatus::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub status: JobStatus,
}

/// Object type accepted by the bulk copy endpoint and collection content filters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Assets,
    Collections,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Assets => "assets",
            ObjectType::Collections => "collections",
        }
    }
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// One entry of a collection's contents listing, tagged by `object_type`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "object_type")]
pub enum CollectionItem {
    #[serde(rename = "collections")]
    Collection { id: String },
    #[serde(rename = "assets")]
    Asset { id: String },
    #[serde(other)]
    Other,
}

/// One page of a paginated listing. `next_url` is relative to the catalog base URL.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub objects: Vec<T>,
    #[serde(default)]
    pub next_url: Option<String>,
}

/// Body of `POST files/storages/{id}/bulk/`.
#[derive(Debug, Clone, Serialize)]
pub struct BulkCopyRequest<'a> {
    pub object_ids: &'a [String],
    pub object_type: ObjectType,
    pub format_name: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkCopyResponse {
    pub job_id: String,
}
