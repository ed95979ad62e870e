use crate::error::{AssetError, Result};
use std::path::{Path, PathBuf};

/// Local content-addressable layout for one assets root.
///
/// Index documents land at `indexes/<id>.json`, objects at
/// `objects/<hash[0:2]>/<hash>`. The layout mirrors the remote one, so a
/// local path is derivable from a hash alone.
#[derive(Debug, Clone)]
pub struct AssetStore {
    /// Root directory of the assets tree
    pub root: PathBuf,

    /// Directory holding persisted asset-index documents
    pub indexes_dir: PathBuf,

    /// Two-level hash-keyed object directory
    pub objects_dir: PathBuf,
}

impl AssetStore {
    pub fn new_for_path(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            indexes_dir: root.join("indexes"),
            objects_dir: root.join("objects"),
        }
    }

    /// Sets up the store at `root`, creating the directory tree if absent.
    /// Safe to call repeatedly against the same root.
    pub fn setup(root: &Path) -> Result<Self> {
        let store = Self::new_for_path(root);

        std::fs::create_dir_all(&store.indexes_dir)?;
        std::fs::create_dir_all(&store.objects_dir)?;

        Ok(store)
    }

    pub fn default_root() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"))
            .join("mcassets")
    }

    pub fn index_path(&self, index_id: &str) -> PathBuf {
        self.indexes_dir.join(format!("{index_id}.json"))
    }

    /// Local path for an object. The full hash is the filename, under its
    /// two-character prefix directory.
    pub fn object_path(&self, hash: &str) -> Result<PathBuf> {
        let prefix = hash_prefix(hash)?;
        Ok(self.objects_dir.join(prefix).join(hash))
    }
}

/// First two characters of a content hash, shared by the remote URL and
/// the local layout.
pub fn hash_prefix(hash: &str) -> Result<&str> {
    hash.get(..2)
        .ok_or_else(|| AssetError::MalformedHash(hash.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0123456789abcdef0123456789abcdef01234567";

    #[test]
    fn test_setup_is_idempotent() -> Result<()> {
        let tmp_dir = tempfile::tempdir()?;
        let root = tmp_dir.path().join("assets");

        let store = AssetStore::setup(&root)?;
        assert!(store.indexes_dir.is_dir());
        assert!(store.objects_dir.is_dir());

        // A second setup against the same root must not fail or disturb
        // the existing tree.
        let marker = store.objects_dir.join("keep");
        std::fs::write(&marker, b"x")?;
        let again = AssetStore::setup(&root)?;
        assert_eq!(again.root, store.root);
        assert!(marker.exists());

        Ok(())
    }

    #[test]
    fn test_path_layout() {
        let store = AssetStore::new_for_path(Path::new("/data/mcassets"));

        assert_eq!(
            store.index_path("abc"),
            Path::new("/data/mcassets/indexes/abc.json")
        );
        assert_eq!(
            store.object_path(HASH).unwrap(),
            Path::new("/data/mcassets/objects/01").join(HASH)
        );
    }

    #[test]
    fn test_hash_prefix() {
        assert_eq!(hash_prefix(HASH).unwrap(), "01");
        assert!(matches!(
            hash_prefix("f"),
            Err(AssetError::MalformedHash(_))
        ));
        // Not sliceable at a char boundary either.
        assert!(hash_prefix("€€").is_err());
    }
}
