//! # Backup Codec
//!
//! Serializes/deserializes the full catalog + ledger snapshot to and from a
//! portable JSON document for manual export/import.
//!
//! ## Document Shape
//! ```json
//! {
//!   "stocks": [ ... ],
//!   "sales": [ ... ],
//!   "exportDate": "2026-08-07T14:03:11Z",
//!   "version": "1.0"
//! }
//! ```
//!
//! Import validates only that `stocks` is present and is a sequence: no deep
//! schema validation. `sales`, `exportDate`, and `version` may be absent and
//! default. On acceptance the document wholesale-replaces the current shop
//! state (destructive); a document that passes the shape check but whose
//! entries cannot be decoded is rejected whole rather than half-imported.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use sole_core::types::{SaleRecord, StockItem};

use crate::error::{StoreError, StoreResult};

/// Version stamp written into exported documents.
pub const BACKUP_VERSION: &str = "1.0";

/// Content type of an exported backup.
pub const BACKUP_CONTENT_TYPE: &str = "application/json";

// =============================================================================
// Document
// =============================================================================

/// The portable backup document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub stocks: Vec<StockItem>,

    #[serde(default)]
    pub sales: Vec<SaleRecord>,

    #[serde(default)]
    pub export_date: Option<DateTime<Utc>>,

    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    BACKUP_VERSION.to_string()
}

impl BackupDocument {
    /// Builds an export document from a snapshot, stamped with now.
    pub fn export(stocks: &[StockItem], sales: &[SaleRecord]) -> Self {
        BackupDocument {
            stocks: stocks.to_vec(),
            sales: sales.to_vec(),
            export_date: Some(Utc::now()),
            version: BACKUP_VERSION.to_string(),
        }
    }

    /// Serializes the document to JSON text.
    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and shape-checks a backup document.
    ///
    /// The only validation the format promises is shallow: the text must be
    /// JSON and `stocks` must be present and a sequence. Anything beyond
    /// that (an entry that can't decode into an entity) also rejects the
    /// document, because import is all-or-nothing.
    pub fn parse(json: &str) -> StoreResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| StoreError::malformed(format!("not valid JSON: {e}")))?;

        match value.get("stocks") {
            None => return Err(StoreError::malformed("missing 'stocks' field")),
            Some(stocks) if !stocks.is_array() => {
                return Err(StoreError::malformed("'stocks' must be a sequence"))
            }
            Some(_) => {}
        }

        serde_json::from_value(value).map_err(|e| StoreError::malformed(e.to_string()))
    }
}

// =============================================================================
// Filename Helper
// =============================================================================

/// Export filename for the given calendar date.
pub fn export_filename(date: NaiveDate) -> String {
    format!("sole-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Export filename for today's local date (user-friendly default).
pub fn export_filename_today() -> String {
    export_filename(Local::now().date_naive())
}

// =============================================================================
// Unit Tests
// =============================================================================
