// ⚙️ Configuration - Environment variables with logged defaults

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

pub const DEFAULT_OWNER: &str = "local";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Root for the database and images
    pub data_dir: PathBuf,
    pub database_path: PathBuf,
    pub images_dir: PathBuf,
    pub image_base_url: Option<String>,
    /// Collection owner id
    pub owner: String,
    /// Catalog file; None means the bundled sample
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (tests pass a map)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_dir = var("COIN_CATALOG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                let dir = default_data_dir();
                info!("COIN_CATALOG_HOME not set, using default: {}", dir.display());
                dir
            });

        let database_path = var("COIN_CATALOG_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("collection.db"));

        let images_dir = var("COIN_CATALOG_IMAGES")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("images"));

        let owner = var("COIN_CATALOG_OWNER").unwrap_or_else(|| DEFAULT_OWNER.to_string());

        Config {
            data_dir,
            database_path,
            images_dir,
            image_base_url: var("COIN_CATALOG_IMAGE_BASE_URL"),
            owner,
            catalog_path: var("COIN_CATALOG_FILE").map(PathBuf::from),
        }
    }

    /// Create the data and image directories
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.data_dir, &self.images_dir] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        if let Some(parent) = self.database_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    match ProjectDirs::from("", "", "coin-catalog") {
        Some(dirs) => dirs.data_dir().to_path_buf(),
        None => {
            warn!("No home directory found, using ./.coin-catalog");
            PathBuf::from(".coin-catalog")
        }
    }
}
