use thiserror::Error;

pub type Result<T, E = AssetError> = std::result::Result<T, E>;

/// Failures surfaced by the resolution-and-fetch pipeline.
///
/// `HttpError` and `IoError` are both transfer failures; the split keeps
/// the underlying source intact for callers that care which side of the
/// transfer fell over.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Version not found: '{0}' is not listed in the version manifest")]
    VersionNotFound(String),

    #[error("Asset index not found in the metadata for version '{0}'")]
    AssetIndexNotFound(String),

    #[error("Object hash '{0}' is too short to derive a path prefix")]
    MalformedHash(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed document: {0}")]
    ParseError(#[from] serde_json::Error),
}
