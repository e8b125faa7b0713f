// Coin Catalog - Core Library
// Exposes all modules for use in the CLI, the explorer, and tests

pub mod coin;
pub mod sample;
pub mod catalog;
pub mod filter;
pub mod validation;
pub mod collection;
pub mod images;
pub mod config;

// Re-export commonly used types
pub use coin::{CoinRecord, CoinStatus, COMMEMORATIVE_ISSUE, REGULAR_ISSUE};
pub use catalog::{Catalog, CatalogError};
pub use filter::{
    FilterCriteria, Selection, StatusFilter, ViewMode,
    filter, distinct_denominations, distinct_mint_cities, cycle_selection,
};
pub use validation::{ValidationError, ValidationResult, validate_new_coin};
pub use collection::{
    CollectionCoin, CollectionError, CoinImages, NewCoin, Event, ImportSummary,
    setup_database, add_coin, get_all_coins, get_coin, delete_coin, count_coins,
    import_csv, insert_event, get_events_for_entity,
};
pub use images::{ImageSide, ImageStore, StoredImage};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
