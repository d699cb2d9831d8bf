use thiserror::Error;
use tierlink_core::AppError;

/// Catalog API errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog request failed with status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Failed to send request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse response as JSON: {0}")]
    Decode(String),

    #[error("Missing catalog credentials: {0}")]
    MissingCredentials(&'static str),
}

impl CatalogError {
    /// HTTP status reported by the catalog, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Remote { status, .. } => Some(*status),
            CatalogError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Remote { status, body } => AppError::Remote { status, body },
            CatalogError::MissingCredentials(what) => {
                AppError::BadRequest(format!("Missing {}", what))
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}
