//! # sole-store: State Container & Persistence for Sole POS
//!
//! This crate owns the live shop state and everything that crosses the
//! persistence boundary. Business rules live in `sole-core`; this crate
//! commits their results.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sole POS Data Flow                               │
//! │                                                                         │
//! │  UI action (sell / refund / edit / import)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     sole-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     Shop      │    │ CatalogStore  │    │ SalesLedger  │  │   │
//! │  │   │  (shop.rs)    │───►│ (catalog.rs)  │    │ (ledger.rs)  │  │   │
//! │  │   │ atomic commits│    │  stock items  │    │ sale records │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │                                                     │   │
//! │  │   ┌───────▼───────┐    ┌───────────────────────────────────┐  │   │
//! │  │   │ BackupDocument│    │ SnapshotStore: FileStore/Memory   │  │   │
//! │  │   │  (backup.rs)  │    │        (persistence.rs)           │  │   │
//! │  │   └───────────────┘    └───────────────────────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sole-core: reconcile (validate/apply) + stats (fold snapshots)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`shop`] - The state container and its atomic operations
//! - [`catalog`] - Catalog Store (stock items)
//! - [`ledger`] - Sales Ledger (sale records)
//! - [`backup`] - Portable export/import document
//! - [`persistence`] - SnapshotStore trait + file/in-memory backends
//! - [`config`] - Shop configuration (env + defaults)
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sole_store::persistence::{FileStore, SnapshotStore};
//! use sole_store::shop::Shop;
//! use sole_store::config::ShopConfig;
//!
//! let config = ShopConfig::from_env();
//! let store = FileStore::new(&config.data_dir);
//!
//! let mut shop = Shop::load_or_default(&store, &config.snapshot_key);
//! // ... record sales, refunds, edits ...
//! shop.persist(&store, &config.snapshot_key)?;
//! # Ok::<(), sole_store::error::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backup;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ledger;
pub mod persistence;
pub mod shop;

// =============================================================================
// Re-exports
// =============================================================================

pub use backup::{BackupDocument, BACKUP_CONTENT_TYPE, BACKUP_VERSION};
pub use catalog::CatalogStore;
pub use config::ShopConfig;
pub use error::{StoreError, StoreResult};
pub use ledger::SalesLedger;
pub use persistence::{FileStore, MemoryStore, SnapshotStore};
pub use shop::Shop;
