// 🖼️ Image Store - Obverse/reverse photos for collection coins
// Objects live under {owner}/{unix_millis}_{side}.{ext} and are never overwritten

use anyhow::{bail, Context, Result};
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSide {
    Obverse,
    Reverse,
}

impl ImageSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSide::Obverse => "obverse",
            ImageSide::Reverse => "reverse",
        }
    }
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq)]
pub struct StoredImage {
    /// Object key relative to the store root
    pub key: String,
    pub url: String,
}

pub struct ImageStore {
    root: PathBuf,
    public_base_url: Option<String>,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: Option<String>) -> Self {
        ImageStore {
            root: root.into(),
            public_base_url: public_base_url.map(|url| url.trim_end_matches('/').to_string()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Copy a local file into the store
    pub fn store(&self, owner: &str, side: ImageSide, source: &Path) -> Result<StoredImage> {
        let bytes = fs::read(source)
            .with_context(|| format!("Failed to read image {}", source.display()))?;

        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("bin");

        self.store_bytes(owner, side, extension, &bytes)
    }

    /// Write raw image bytes under a fresh key
    pub fn store_bytes(
        &self,
        owner: &str,
        side: ImageSide,
        extension: &str,
        bytes: &[u8],
    ) -> Result<StoredImage> {
        let key = object_key(owner, side, extension, Utc::now().timestamp_millis());
        let path = self.root.join(&key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                bail!("Image already exists: {}", key)
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to create {}", path.display())),
        };
        file.write_all(bytes)?;

        info!(key = %key, size = bytes.len(), "Stored image");

        Ok(StoredImage {
            url: self.public_url(&key),
            key,
        })
    }

    /// Public URL for an object key (local path when no base URL is configured)
    pub fn public_url(&self, key: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}", base, key),
            None => self.root.join(key).display().to_string(),
        }
    }
}

/// `{owner}/{millis}_{side}.{ext}`
pub fn object_key(owner: &str, side: ImageSide, extension: &str, millis: i64) -> String {
    format!("{}/{}_{}.{}", owner, millis, side.as_str(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_layout() {
        assert_eq!(
            object_key("local", ImageSide::Reverse, "png", 1700000000000),
            "local/1700000000000_reverse.png"
        );
    }

    #[test]
    fn test_store_copies_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("front.jpg");
        fs::write(&source, b"jpeg-bytes").unwrap();

        let store = ImageStore::new(dir.path().join("images"), None);
        let stored = store.store("collector", ImageSide::Obverse, &source).unwrap();

        assert!(stored.key.starts_with("collector/"));
        assert!(stored.key.ends_with("_obverse.jpg"));
        let written = fs::read(store.root().join(&stored.key)).unwrap();
        assert_eq!(written, b"jpeg-bytes");
        assert_eq!(stored.url, store.root().join(&stored.key).display().to_string());
    }

    #[test]
    fn test_missing_extension_defaults_to_bin() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("scan");
        fs::write(&source, b"raw").unwrap();

        let store = ImageStore::new(dir.path().join("images"), None);
        let stored = store.store("local", ImageSide::Reverse, &source).unwrap();
        assert!(stored.key.ends_with("_reverse.bin"));
    }

    #[test]
    fn test_public_url_with_base() {
        let store = ImageStore::new("/tmp/unused", Some("https://cdn.example.com/coins/".to_string()));
        assert_eq!(
            store.public_url("local/1_obverse.png"),
            "https://cdn.example.com/coins/local/1_obverse.png"
        );
    }

    #[test]
    fn test_existing_object_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path(), None);

        // Occupy every key this call could produce within a few milliseconds
        let now = Utc::now().timestamp_millis();
        for millis in now..now + 1000 {
            let path = dir.path().join(object_key("local", ImageSide::Obverse, "png", millis));
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, b"original").unwrap();
        }

        let result = store.store_bytes("local", ImageSide::Obverse, "png", b"replacement");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }
}
