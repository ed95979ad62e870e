use crate::download_client::DownloadClient;
use crate::error::{AssetError, Result};
use crate::fetcher::DEFAULT_RESOURCES_URL;
use crate::mojang::{
    AssetIndexRef, LatestVersions, ManifestVersion, VersionManifest, VersionMetadata,
};
use std::collections::HashMap;
use std::io;
use std::path::Path;

pub const OBJECT_HASH: &str = "0123456789abcdef0123456789abcdef01234567";
pub const OBJECT_BYTES: &[u8] = b"0123456789";

/// Raw body of the one-object fixture index, kept byte-exact so tests can
/// assert on the persisted file.
pub const INDEX_BODY: &str = r#"{"objects":{"minecraft/sounds/random/click.ogg":{"hash":"0123456789abcdef0123456789abcdef01234567","size":10}}}"#;

/// Serves the metadata chain from in-memory fixtures keyed by URL.
/// Unknown URLs fail like a dead remote, so abort paths are testable.
pub struct MockDownloadClient {
    pub manifest: VersionManifest,
    pub metadata: HashMap<String, VersionMetadata>,
    pub indexes: HashMap<String, String>,
    pub objects: HashMap<String, Vec<u8>>,
}

impl MockDownloadClient {
    /// One-version, one-object fixture: manifest entry `1.16.5` pointing
    /// at metadata whose asset index `abc` lists a single object.
    pub fn fixture() -> Self {
        let mut mock = Self::with_index_body(INDEX_BODY.to_string());
        mock.objects.insert(
            object_url(DEFAULT_RESOURCES_URL, OBJECT_HASH),
            OBJECT_BYTES.to_vec(),
        );
        mock
    }

    /// Fixture whose index lists `count` objects with distinct hash
    /// prefixes, every one of them downloadable.
    pub fn with_object_count(count: usize) -> Self {
        let mut objects = serde_json::Map::new();
        let mut remote = HashMap::new();

        for i in 0..count {
            let hash = nth_hash(i);
            remote.insert(object_url(DEFAULT_RESOURCES_URL, &hash), vec![b'x']);
            objects.insert(
                format!("fixtures/{i:03}.bin"),
                serde_json::json!({ "hash": hash, "size": 1 }),
            );
        }

        let body = serde_json::json!({ "objects": objects }).to_string();
        let mut mock = Self::with_index_body(body);
        mock.objects = remote;
        mock
    }

    /// Removes the remote side of the `i`-th object, turning its download
    /// into a transfer failure.
    pub fn drop_object(mut self, i: usize) -> Self {
        self.objects
            .remove(&object_url(DEFAULT_RESOURCES_URL, &nth_hash(i)));
        self
    }

    /// Strips the asset-index pointer from every metadata document.
    pub fn without_asset_index(mut self) -> Self {
        for metadata in self.metadata.values_mut() {
            metadata.asset_index = None;
        }
        self
    }

    /// Re-keys every object fixture onto a different base URL, emulating a
    /// mirror for base-URL-override tests.
    pub fn rehome_objects(mut self, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        self.objects = self
            .objects
            .into_iter()
            .map(|(url, bytes)| {
                (
                    url.replacen(DEFAULT_RESOURCES_URL, base_url, 1),
                    bytes,
                )
            })
            .collect();
        self
    }

    fn with_index_body(body: String) -> Self {
        let manifest = VersionManifest {
            latest: LatestVersions {
                release: "1.16.5".to_string(),
                snapshot: "21w03a".to_string(),
            },
            versions: vec![
                manifest_version(
                    "21w03a",
                    "snapshot",
                    "https://x/21w03a.json",
                    "2021-01-20T14:56:29Z",
                ),
                manifest_version(
                    "1.16.5",
                    "release",
                    "https://x/1.16.5.json",
                    "2021-01-14T16:05:32Z",
                ),
            ],
        };

        let metadata = HashMap::from([(
            "https://x/1.16.5.json".to_string(),
            VersionMetadata {
                asset_index: Some(AssetIndexRef {
                    id: "abc".to_string(),
                    url: "https://x/abc.json".to_string(),
                }),
            },
        )]);

        let indexes = HashMap::from([("https://x/abc.json".to_string(), body)]);

        Self {
            manifest,
            metadata,
            indexes,
            objects: HashMap::new(),
        }
    }
}

impl DownloadClient for MockDownloadClient {
    async fn version_manifest(&self) -> Result<VersionManifest> {
        Ok(self.manifest.clone())
    }

    async fn version_metadata(&self, url: &str) -> Result<VersionMetadata> {
        self.metadata.get(url).cloned().ok_or_else(|| not_found(url))
    }

    async fn asset_index(&self, url: &str) -> Result<String> {
        self.indexes.get(url).cloned().ok_or_else(|| not_found(url))
    }

    async fn download_object(&self, url: &str, path: &Path) -> Result<()> {
        let bytes = self.objects.get(url).ok_or_else(|| not_found(url))?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

fn object_url(base_url: &str, hash: &str) -> String {
    format!("{base_url}/{}/{hash}", &hash[..2])
}

fn nth_hash(i: usize) -> String {
    format!("{i:02x}").repeat(20)
}

fn manifest_version(id: &str, kind: &str, url: &str, release_time: &str) -> ManifestVersion {
    ManifestVersion {
        id: id.to_string(),
        kind: kind.to_string(),
        url: url.to_string(),
        release_time: release_time.parse().expect("fixture timestamp"),
    }
}

fn not_found(url: &str) -> AssetError {
    io::Error::new(io::ErrorKind::NotFound, format!("no fixture for {url}")).into()
}
