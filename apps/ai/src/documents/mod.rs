// CV documents held in object storage: location parsing, fetch and text extraction.

pub mod extract;
pub mod s3;

use thiserror::Error;

/// Documents larger than this are refused before extraction.
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid document location '{0}'")]
    InvalidLocation(String),

    #[error("document location '{0}' has no bucket and S3_BUCKET is not set")]
    MissingBucket(String),

    #[error("failed to fetch document: {0}")]
    Fetch(String),

    #[error("document is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("unsupported document format (expected PDF or UTF-8 text)")]
    UnsupportedFormat,

    #[error("failed to extract document text: {0}")]
    Extraction(String),
}
