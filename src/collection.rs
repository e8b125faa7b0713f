// 🗄️ Collection Store - The collector's own coins in SQLite
// Add / list / view / delete, with an append-only audit trail of every change

use crate::validation::{validate_new_coin, ValidationError};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("{}", first_message(.0))]
    Invalid(Vec<ValidationError>),

    #[error("Coin not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Import failed: {0}")]
    Csv(#[from] csv::Error),
}

fn first_message(errors: &[ValidationError]) -> String {
    errors
        .first()
        .map(|e| e.to_string())
        .unwrap_or_else(|| "Invalid coin".to_string())
}

// ============================================================================
// MODELS
// ============================================================================

/// Add-coin form payload. Only `name` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCoin {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub denomination: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub metal: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub diameter: Option<f64>,
    #[serde(default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub edge_design: Option<String>,
    #[serde(default)]
    pub mint_mark: Option<String>,
    #[serde(default)]
    pub obverse_design: Option<String>,
    #[serde(default)]
    pub reverse_design: Option<String>,
    #[serde(default)]
    pub issue_type: Option<String>,
    #[serde(default)]
    pub security_features: Option<String>,
}

impl NewCoin {
    /// Trim the name and turn blank optional text into None
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        for field in [
            &mut self.country,
            &mut self.denomination,
            &mut self.metal,
            &mut self.shape,
            &mut self.edge_design,
            &mut self.mint_mark,
            &mut self.obverse_design,
            &mut self.reverse_design,
            &mut self.issue_type,
            &mut self.security_features,
        ] {
            if field.as_deref().map_or(false, |s| s.trim().is_empty()) {
                *field = None;
            }
        }
        self
    }

    /// Duplicate-detection hash for imports (not identity)
    pub fn compute_import_hash(&self, owner: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!(
            "{}|{}|{}|{}|{}|{}",
            owner,
            self.name,
            self.country.as_deref().unwrap_or(""),
            self.denomination.as_deref().unwrap_or(""),
            self.year.map(|y| y.to_string()).unwrap_or_default(),
            self.mint_mark.as_deref().unwrap_or(""),
        ));
        format!("{:x}", hasher.finalize())
    }
}

/// Image URLs attached when a coin is added
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinImages {
    pub obverse_url: Option<String>,
    pub reverse_url: Option<String>,
}

/// A coin in the collector's collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionCoin {
    /// Stable identity (UUID)
    pub id: String,
    pub owner: String,
    pub name: String,
    pub country: Option<String>,
    pub denomination: Option<String>,
    pub year: Option<i32>,
    pub metal: Option<String>,
    pub weight: Option<f64>,
    pub diameter: Option<f64>,
    pub shape: Option<String>,
    pub edge_design: Option<String>,
    pub mint_mark: Option<String>,
    pub obverse_design: Option<String>,
    pub reverse_design: Option<String>,
    pub issue_type: Option<String>,
    pub security_features: Option<String>,
    pub obverse_image_url: Option<String>,
    pub reverse_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Event for audit trail
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Event {
    pub event_id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub entity_type: String,
    pub entity_id: String,
    pub data: serde_json::Value,
    pub actor: String,
}

impl Event {
    pub fn new(
        event_type: &str,
        entity_type: &str,
        entity_id: &str,
        data: serde_json::Value,
        actor: &str,
    ) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event_type: event_type.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
            data,
            actor: actor.to_string(),
        }
    }
}

/// Outcome of a CSV import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub duplicates: usize,
    pub invalid: usize,
}

// ============================================================================
// SCHEMA
// ============================================================================

pub fn setup_database(conn: &Connection) -> Result<(), CollectionError> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS coins (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            coin_uuid TEXT UNIQUE NOT NULL,
            owner TEXT NOT NULL,
            name TEXT NOT NULL,
            country TEXT,
            denomination TEXT,
            year INTEGER,
            metal TEXT,
            weight REAL,
            diameter REAL,
            shape TEXT,
            edge_design TEXT,
            mint_mark TEXT,
            obverse_design TEXT,
            reverse_design TEXT,
            issue_type TEXT,
            security_features TEXT,
            obverse_image_url TEXT,
            reverse_image_url TEXT,
            -- Set only for imported rows; NULLs never collide
            import_hash TEXT UNIQUE,
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id TEXT UNIQUE NOT NULL,
            timestamp TEXT NOT NULL,
            event_type TEXT NOT NULL,
            entity_type TEXT NOT NULL,
            entity_id TEXT NOT NULL,
            data TEXT NOT NULL,
            actor TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_coins_owner_created ON coins(owner, created_at)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_entity ON events(entity_type, entity_id)",
        [],
    )?;

    Ok(())
}

// ============================================================================
// COINS
// ============================================================================

const COIN_COLUMNS: &str = "coin_uuid, owner, name, country, denomination, year, metal,
    weight, diameter, shape, edge_design, mint_mark, obverse_design, reverse_design,
    issue_type, security_features, obverse_image_url, reverse_image_url, created_at";

/// Validate and insert a coin, logging a `coin_added` event
pub fn add_coin(
    conn: &Connection,
    owner: &str,
    coin: &NewCoin,
    images: CoinImages,
) -> Result<CollectionCoin, CollectionError> {
    let coin = coin.clone().normalized();
    validate_new_coin(&coin).map_err(CollectionError::Invalid)?;

    let stored = build_coin(owner, coin, images);

    let tx = conn.unchecked_transaction()?;
    insert_coin(&tx, &stored, None)?;
    tx.commit()?;

    info!(id = %stored.id, owner = %owner, "Added coin to collection");
    Ok(stored)
}

fn build_coin(owner: &str, coin: NewCoin, images: CoinImages) -> CollectionCoin {
    CollectionCoin {
        id: uuid::Uuid::new_v4().to_string(),
        owner: owner.to_string(),
        name: coin.name,
        country: coin.country,
        denomination: coin.denomination,
        year: coin.year,
        metal: coin.metal,
        weight: coin.weight,
        diameter: coin.diameter,
        shape: coin.shape,
        edge_design: coin.edge_design,
        mint_mark: coin.mint_mark,
        obverse_design: coin.obverse_design,
        reverse_design: coin.reverse_design,
        issue_type: coin.issue_type,
        security_features: coin.security_features,
        obverse_image_url: images.obverse_url,
        reverse_image_url: images.reverse_url,
        // Stored with microsecond precision
        created_at: Utc::now().trunc_subsecs(6),
    }
}

fn insert_coin(
    conn: &Connection,
    coin: &CollectionCoin,
    import_hash: Option<&str>,
) -> Result<(), CollectionError> {
    conn.execute(
        &format!(
            "INSERT INTO coins ({}, import_hash)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
            COIN_COLUMNS
        ),
        params![
            coin.id,
            coin.owner,
            coin.name,
            coin.country,
            coin.denomination,
            coin.year,
            coin.metal,
            coin.weight,
            coin.diameter,
            coin.shape,
            coin.edge_design,
            coin.mint_mark,
            coin.obverse_design,
            coin.reverse_design,
            coin.issue_type,
            coin.security_features,
            coin.obverse_image_url,
            coin.reverse_image_url,
            // Fixed precision keeps text ordering chronological
            coin.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            import_hash,
        ],
    )?;

    let event = Event::new(
        "coin_added",
        "coin",
        &coin.id,
        serde_json::json!({
            "name": coin.name,
            "denomination": coin.denomination,
            "imported": import_hash.is_some(),
        }),
        &coin.owner,
    );
    insert_event(conn, &event)
}

fn row_to_coin(row: &Row) -> rusqlite::Result<CollectionCoin> {
    let created_at_str: String = row.get(18)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(18, rusqlite::types::Type::Text, Box::new(e))
        })?
        .with_timezone(&Utc);

    Ok(CollectionCoin {
        id: row.get(0)?,
        owner: row.get(1)?,
        name: row.get(2)?,
        country: row.get(3)?,
        denomination: row.get(4)?,
        year: row.get(5)?,
        metal: row.get(6)?,
        weight: row.get(7)?,
        diameter: row.get(8)?,
        shape: row.get(9)?,
        edge_design: row.get(10)?,
        mint_mark: row.get(11)?,
        obverse_design: row.get(12)?,
        reverse_design: row.get(13)?,
        issue_type: row.get(14)?,
        security_features: row.get(15)?,
        obverse_image_url: row.get(16)?,
        reverse_image_url: row.get(17)?,
        created_at,
    })
}

/// All coins of an owner, newest first
pub fn get_all_coins(conn: &Connection, owner: &str) -> Result<Vec<CollectionCoin>, CollectionError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM coins
         WHERE owner = ?1
         ORDER BY created_at DESC, id DESC",
        COIN_COLUMNS
    ))?;

    let coins = stmt
        .query_map([owner], row_to_coin)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(coins)
}

pub fn get_coin(conn: &Connection, id: &str) -> Result<Option<CollectionCoin>, CollectionError> {
    let coin = conn
        .query_row(
            &format!("SELECT {} FROM coins WHERE coin_uuid = ?1", COIN_COLUMNS),
            [id],
            row_to_coin,
        )
        .optional()?;

    Ok(coin)
}

/// Delete a coin, logging a `coin_deleted` event
pub fn delete_coin(conn: &Connection, id: &str) -> Result<(), CollectionError> {
    let coin = get_coin(conn, id)?.ok_or_else(|| CollectionError::NotFound(id.to_string()))?;

    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM coins WHERE coin_uuid = ?1", [id])?;

    let event = Event::new(
        "coin_deleted",
        "coin",
        id,
        serde_json::json!({ "name": coin.name }),
        &coin.owner,
    );
    insert_event(&tx, &event)?;
    tx.commit()?;

    info!(id = %id, "Deleted coin from collection");
    Ok(())
}

pub fn count_coins(conn: &Connection, owner: &str) -> Result<i64, CollectionError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM coins WHERE owner = ?1",
        [owner],
        |row| row.get(0),
    )?;

    Ok(count)
}

// ============================================================================
// IMPORT
// ============================================================================

/// Import coins from a CSV file with a header row matching `NewCoin` fields.
/// Importing the same rows twice inserts nothing the second time.
/// Rows that fail to parse or validate are counted and skipped; the import
/// is all-or-nothing for read and database failures.
pub fn import_csv(conn: &Connection, owner: &str, csv_path: &Path) -> Result<ImportSummary, CollectionError> {
    let mut rdr = csv::Reader::from_path(csv_path)?;
    let mut summary = ImportSummary::default();

    let tx = conn.unchecked_transaction()?;

    for (line, result) in rdr.deserialize::<NewCoin>().enumerate() {
        let coin = match result {
            Ok(coin) => coin.normalized(),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!(row = line + 1, error = %e, "Skipping unreadable row");
                summary.invalid += 1;
                continue;
            }
        };

        if let Err(errors) = validate_new_coin(&coin) {
            warn!(row = line + 1, error = %first_message(&errors), "Skipping invalid row");
            summary.invalid += 1;
            continue;
        }

        let hash = coin.compute_import_hash(owner);
        let stored = build_coin(owner, coin, CoinImages::default());

        match insert_coin(&tx, &stored, Some(&hash)) {
            Ok(()) => summary.inserted += 1,
            Err(CollectionError::Database(rusqlite::Error::SqliteFailure(err, _)))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                summary.duplicates += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tx.commit()?;

    info!(
        path = %csv_path.display(),
        inserted = summary.inserted,
        duplicates = summary.duplicates,
        invalid = summary.invalid,
        "Imported collection CSV"
    );

    Ok(summary)
}

// ============================================================================
// AUDIT TRAIL
// ============================================================================

pub fn insert_event(conn: &Connection, event: &Event) -> Result<(), CollectionError> {
    let data_json = serde_json::to_string(&event.data)?;

    conn.execute(
        "INSERT INTO events (
            event_id, timestamp, event_type, entity_type, entity_id, data, actor
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            event.event_id,
            event.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            event.event_type,
            event.entity_type,
            event.entity_id,
            data_json,
            event.actor,
        ],
    )?;

    Ok(())
}

/// Events for one entity, oldest first
pub fn get_events_for_entity(
    conn: &Connection,
    entity_type: &str,
    entity_id: &str,
) -> Result<Vec<Event>, CollectionError> {
    let mut stmt = conn.prepare(
        "SELECT event_id, timestamp, event_type, entity_type, entity_id, data, actor
         FROM events
         WHERE entity_type = ?1 AND entity_id = ?2
         ORDER BY timestamp ASC, id ASC",
    )?;

    let events = stmt
        .query_map(params![entity_type, entity_id], |row| {
            let timestamp_str: String = row.get(1)?;
            let data_json: String = row.get(5)?;

            Ok(Event {
                event_id: row.get(0)?,
                timestamp: DateTime::parse_from_rfc3339(&timestamp_str)
                    .map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            1,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?
                    .with_timezone(&Utc),
                event_type: row.get(2)?,
                entity_type: row.get(3)?,
                entity_id: row.get(4)?,
                data: serde_json::from_str(&data_json).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        5,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?,
                actor: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(events)
}

// ============================================================================
// TESTS
// ============================================================================
