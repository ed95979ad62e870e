use crate::error::Result;
use crate::mojang::{VersionManifest, VersionMetadata};
use std::path::Path;

/// The HTTP capability consumed by the fetch pipeline. [`crate::mojang::MojangClient`]
/// is the production implementation; tests substitute an in-memory one.
pub trait DownloadClient {
    fn version_manifest(&self) -> impl Future<Output = Result<VersionManifest>> + Send;

    fn version_metadata(&self, url: &str) -> impl Future<Output = Result<VersionMetadata>> + Send;

    /// Raw body of the asset-index document. The caller persists it
    /// verbatim before parsing.
    fn asset_index(&self, url: &str) -> impl Future<Output = Result<String>> + Send;

    fn download_object(&self, url: &str, path: &Path) -> impl Future<Output = Result<()>> + Send;
}
