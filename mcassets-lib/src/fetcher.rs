use crate::download_client::DownloadClient;
use crate::error::{AssetError, Result};
use crate::events::{Notifier, Progress};
use crate::mojang::AssetIndex;
use crate::store::{AssetStore, hash_prefix};

pub const DEFAULT_RESOURCES_URL: &str = "https://resources.download.minecraft.net";

/// One resolution-and-fetch run: which version, and optionally where
/// objects are served from instead of Mojang's CDN.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub version: String,
    pub base_url: Option<String>,
}

impl FetchRequest {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn resources_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_RESOURCES_URL)
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSummary {
    /// Version id as resolved from the manifest
    pub version_id: String,
    /// Id of the asset index the metadata pointed at
    pub index_id: String,
    /// Number of objects downloaded
    pub objects: usize,
    /// Total declared size of those objects in bytes
    pub bytes: u64,
}

/// Resolves `request.version` through the Mojang metadata chain and
/// mirrors every object of its asset index into `store`.
///
/// Progress snapshots and the terminal `Done` are published on
/// `notifier`; failures are returned as [`AssetError`] and additionally
/// mirrored as an `Error` event, so passive subscribers observe them.
/// An unresolved version or missing asset index is fatal, and the first
/// failed transfer aborts the remaining downloads.
pub async fn fetch_assets<C: DownloadClient>(
    store: &AssetStore,
    request: &FetchRequest,
    client: &C,
    notifier: &Notifier,
) -> Result<FetchSummary> {
    match run(store, request, client, notifier).await {
        Ok(summary) => Ok(summary),
        Err(err) => {
            notifier.error(&err);
            Err(err)
        }
    }
}

async fn run<C: DownloadClient>(
    store: &AssetStore,
    request: &FetchRequest,
    client: &C,
    notifier: &Notifier,
) -> Result<FetchSummary> {
    let manifest = client.version_manifest().await?;
    // An entry without a metadata URL is as unresolvable as a missing one.
    let version = manifest
        .find(&request.version)
        .filter(|v| !v.url.is_empty())
        .ok_or_else(|| AssetError::VersionNotFound(request.version.clone()))?;
    tracing::debug!(id = %version.id, url = %version.url, "resolved version metadata");

    let metadata = client.version_metadata(&version.url).await?;
    let index_ref = metadata
        .asset_index
        .filter(|index_ref| !index_ref.url.is_empty())
        .ok_or_else(|| AssetError::AssetIndexNotFound(version.id.clone()))?;

    let raw = client.asset_index(&index_ref.url).await?;
    let index_path = store.index_path(&index_ref.id);
    tokio::fs::write(&index_path, &raw).await?;
    // Parse what actually landed on disk, not the in-memory body.
    let raw = tokio::fs::read_to_string(&index_path).await?;
    let index: AssetIndex = serde_json::from_str(&raw)?;

    let base_url = request.resources_url().trim_end_matches('/');
    let total = index.objects.len();
    let mut current = 0;
    let mut bytes = 0u64;
    tracing::debug!(index = %index_ref.id, total, "asset index persisted");

    for (name, object) in &index.objects {
        let prefix = hash_prefix(&object.hash)?;
        let url = format!("{base_url}/{prefix}/{hash}", hash = object.hash);
        let path = store.object_path(&object.hash)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        client.download_object(&url, &path).await?;

        current += 1;
        bytes += object.size;
        tracing::trace!(%name, hash = %object.hash, "object downloaded");
        notifier.progress(Progress::new(current, total));
    }

    notifier.done();

    Ok(FetchSummary {
        version_id: version.id.clone(),
        index_id: index_ref.id,
        objects: total,
        bytes,
    })
}
