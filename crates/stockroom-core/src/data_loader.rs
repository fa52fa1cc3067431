//! Data-driven inventory loading from JSON.
//!
//! Feature-gated behind `data-loader`. Provides JSON deserialization into a
//! `Vec<Item>` for shelves defined in data files. Loading performs no range
//! validation: the engine, not the loader, governs quality bounds.

use std::path::{Path, PathBuf};

use crate::item::Item;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// JSON data structures
// ---------------------------------------------------------------------------

/// Top-level shelf data structure for JSON deserialization.
#[derive(Debug, serde::Deserialize)]
pub struct StockData {
    #[serde(default)]
    pub items: Vec<ItemData>,
}

/// JSON representation of a stock item.
#[derive(Debug, serde::Deserialize)]
pub struct ItemData {
    pub name: String,
    pub sell_in: i32,
    pub quality: i32,
}

impl From<ItemData> for Item {
    fn from(data: ItemData) -> Self {
        Item::new(data.name, data.sell_in, data.quality)
    }
}

// ---------------------------------------------------------------------------
// Loading functions
// ---------------------------------------------------------------------------

/// Parse a shelf from a JSON string.
pub fn parse_items(json: &str) -> Result<Vec<Item>, DataLoadError> {
    let data: StockData = serde_json::from_str(json)?;
    Ok(data.items.into_iter().map(Item::from).collect())
}

/// Load a shelf from a JSON file on disk.
pub fn load_items_from_path(path: impl AsRef<Path>) -> Result<Vec<Item>, DataLoadError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_items(&json)
}
