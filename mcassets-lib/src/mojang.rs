use crate::download_client::DownloadClient;
use crate::error::Result;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::io::AsyncWriteExt;

pub const VERSION_MANIFEST_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest.json";

/// Top-level index of every known version id and where its metadata lives.
/// Fetched fresh on every run, never persisted.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct VersionManifest {
    pub latest: LatestVersions,
    pub versions: Vec<ManifestVersion>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LatestVersions {
    pub release: String,
    pub snapshot: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ManifestVersion {
    pub id: String,
    /// "release", "snapshot", "old_beta", "old_alpha"
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    #[serde(rename = "releaseTime")]
    pub release_time: DateTime<Utc>,
}

/// Per-version metadata document. Only the asset-index pointer is
/// consumed; it is optional so that its absence is a domain error rather
/// than a deserialization failure.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct VersionMetadata {
    #[serde(rename = "assetIndex")]
    pub asset_index: Option<AssetIndexRef>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AssetIndexRef {
    pub id: String,
    pub url: String,
}

/// Mapping from logical asset name to content descriptor. A `BTreeMap`
/// keeps enumeration order stable, so progress numbering is reproducible
/// across runs.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AssetIndex {
    pub objects: BTreeMap<String, AssetObject>,
}

/// Identifies one downloadable object by content hash. The hash is the
/// sole identity; there is no separate object id.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AssetObject {
    pub hash: String,
    pub size: u64,
}

impl VersionManifest {
    /// Finds the manifest entry for a version id.
    pub fn find(&self, id: &str) -> Option<&ManifestVersion> {
        self.versions.iter().find(|v| v.id == id)
    }
}

/// Production [`DownloadClient`] against Mojang's launcher-meta and
/// resource endpoints.
pub struct MojangClient {
    client: Client,
}

impl MojangClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(concat!("mcassets/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }
}

impl Default for MojangClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadClient for MojangClient {
    async fn version_manifest(&self) -> Result<VersionManifest> {
        let response = self.client.get(VERSION_MANIFEST_URL).send().await?;
        let manifest = response.error_for_status()?.json().await?;
        Ok(manifest)
    }

    async fn version_metadata(&self, url: &str) -> Result<VersionMetadata> {
        let response = self.client.get(url).send().await?;
        let metadata = response.error_for_status()?.json().await?;
        Ok(metadata)
    }

    async fn asset_index(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let body = response.error_for_status()?.text().await?;
        Ok(body)
    }

    async fn download_object(&self, url: &str, path: &Path) -> Result<()> {
        let response = self.client.get(url).send().await?.error_for_status()?;

        let mut file = tokio::fs::File::create(path).await?;
        let mut stream = response.bytes_stream();

        use futures_util::StreamExt;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
        }

        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST_JSON: &str = r#"{
        "latest": {"release": "1.16.5", "snapshot": "21w03a"},
        "versions": [
            {"id": "21w03a", "type": "snapshot", "url": "https://x/21w03a.json",
             "time": "2021-01-20T14:56:29+00:00", "releaseTime": "2021-01-20T14:56:29+00:00"},
            {"id": "1.16.5", "type": "release", "url": "https://x/1.16.5.json",
             "time": "2021-01-14T16:09:14+00:00", "releaseTime": "2021-01-14T16:05:32+00:00"}
        ]
    }"#;

    #[test]
    fn test_manifest_lookup_resolves_recorded_url() {
        let manifest: VersionManifest = serde_json::from_str(MANIFEST_JSON).unwrap();

        let version = manifest.find("1.16.5").unwrap();
        assert_eq!(version.url, "https://x/1.16.5.json");
        assert_eq!(version.kind, "release");

        assert!(manifest.find("1.16.6").is_none());
        assert_eq!(manifest.latest.release, "1.16.5");
    }

    #[test]
    fn test_metadata_asset_index_is_optional() {
        let metadata: VersionMetadata = serde_json::from_str(
            r#"{"assetIndex": {"id": "abc", "url": "https://x/abc.json", "sha1": "da39a3ee"}}"#,
        )
        .unwrap();
        let index_ref = metadata.asset_index.unwrap();
        assert_eq!(index_ref.id, "abc");
        assert_eq!(index_ref.url, "https://x/abc.json");

        let bare: VersionMetadata = serde_json::from_str(r#"{"downloads": {}}"#).unwrap();
        assert!(bare.asset_index.is_none());
    }

    #[test]
    fn test_index_objects_enumerate_in_sorted_order() {
        let index: AssetIndex = serde_json::from_str(
            r#"{"objects": {
                "minecraft/sounds/b.ogg": {"hash": "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb", "size": 2},
                "minecraft/sounds/a.ogg": {"hash": "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "size": 1}
            }}"#,
        )
        .unwrap();

        let names: Vec<&str> = index.objects.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["minecraft/sounds/a.ogg", "minecraft/sounds/b.ogg"]);
        assert_eq!(index.objects["minecraft/sounds/a.ogg"].size, 1);
    }
}
