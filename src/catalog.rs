// 📚 Catalog - Owned, id-unique sequence of reference coins
// Passed explicitly into the filter engine; swap the source without touching filtering

use crate::coin::CoinRecord;
use crate::filter::{self, FilterCriteria};
use crate::sample::sample_coins;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate coin id in catalog: {0}")]
    DuplicateId(String),

    #[error("Unsupported catalog format: {0} (expected .json or .csv)")]
    UnsupportedFormat(String),

    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid CSV catalog: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone)]
pub struct Catalog {
    coins: Vec<CoinRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(coins: Vec<CoinRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for coin in &coins {
            if !seen.insert(coin.id.as_str()) {
                return Err(CatalogError::DuplicateId(coin.id.clone()));
            }
        }

        Ok(Catalog { coins })
    }

    /// The bundled Indian rupee sample set
    pub fn sample() -> Self {
        Catalog {
            coins: sample_coins(),
        }
    }

    /// Load a catalog file. `.json` holds an array of coins, `.csv` one coin per row.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        let mut coins: Vec<CoinRecord> = match extension.as_str() {
            "json" => {
                let content = std::fs::read_to_string(path)?;
                serde_json::from_str(&content)?
            }
            "csv" => {
                let mut rdr = csv::Reader::from_path(path)?;
                rdr.deserialize().collect::<Result<Vec<_>, _>>()?
            }
            _ => return Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        };

        for coin in &mut coins {
            coin.normalize_optionals();
        }

        info!(path = %path.display(), count = coins.len(), "Loaded catalog");
        Self::new(coins)
    }

    pub fn coins(&self) -> &[CoinRecord] {
        &self.coins
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// Detail-view lookup
    pub fn find_by_id(&self, id: &str) -> Option<&CoinRecord> {
        self.coins.iter().find(|coin| coin.id == id)
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&CoinRecord> {
        let result = filter::filter(&self.coins, criteria);
        debug!(
            shown = result.len(),
            total = self.coins.len(),
            active = criteria.active_filters(),
            "Filtered catalog"
        );
        result
    }

    pub fn distinct_denominations(&self) -> Vec<String> {
        filter::distinct_denominations(&self.coins)
    }

    pub fn distinct_mint_cities(&self) -> Vec<String> {
        filter::distinct_mint_cities(&self.coins)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::CoinStatus;
    use std::io::Write;

    #[test]
    fn test_sample_catalog() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.len(), 6);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.find_by_id("6").unwrap().denomination, "₹75");
        assert!(catalog.find_by_id("99").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut coins = sample_coins();
        coins[2].id = "1".to_string();

        let err = Catalog::new(coins).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(ref id) if id == "1"));
    }

    #[test]
    fn test_facets_reflect_full_catalog_after_filtering() {
        let catalog = Catalog::sample();
        let narrowed = catalog.filter(&FilterCriteria::new().with_denomination("₹10"));
        assert_eq!(narrowed.len(), 1);

        // Facets stay wide so the user can widen the filter again
        assert_eq!(catalog.distinct_denominations().len(), 6);
        assert_eq!(catalog.distinct_mint_cities().len(), 4);
    }

    #[test]
    fn test_load_json_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coins.json");
        std::fs::write(&path, serde_json::to_string(&sample_coins()).unwrap()).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.coins(), Catalog::sample().coins());
    }

    #[test]
    fn test_load_csv_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coins.csv");

        let mut writer = csv::Writer::from_path(&path).unwrap();
        for coin in sample_coins().into_iter().take(2) {
            writer.serialize(coin).unwrap();
        }
        writer.flush().unwrap();
        drop(writer);

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        let first = catalog.find_by_id("1").unwrap();
        assert_eq!(first.status, CoinStatus::Active);
        assert!(first.commemorative_note.is_none());
    }

    #[test]
    fn test_load_unknown_extension_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coins.xml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "<coins/>").unwrap();

        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFormat(_)));
    }
}
