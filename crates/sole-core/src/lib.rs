//! # sole-core: Pure Business Logic for Sole POS
//!
//! This crate is the **heart** of Sole POS, a small-business inventory and
//! point-of-sale tracker for a shoe retailer. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sole POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (external)                          │   │
//! │  │    Catalog UI ──► Sell UI ──► Dashboard UI ──► Backup UI        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                sole-store (state container)                     │   │
//! │  │    Shop: Catalog Store + Sales Ledger + Backup + Snapshots      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sole-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ reconcile │  │   stats   │  │   │
//! │  │   │ StockItem │  │   Money   │  │   sale    │  │ dashboard │  │   │
//! │  │   │SaleRecord │  │  (cents)  │  │  refund   │  │  trends   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (StockItem, StockVariant, SaleRecord, drafts)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`reconcile`] - Sale/refund reconciliation engine
//! - [`stats`] - Dashboard statistics aggregator
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: reconciliation never mutates its input: it returns
//!    replacement values the caller commits
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64) to avoid float errors
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use sole_core::reconcile;
//! use sole_core::types::{SaleLineInput, StockDraft, StockItem, VariantDraft};
//!
//! let stock = StockItem::from_draft(StockDraft {
//!     name: "Runner Daily".to_string(),
//!     unit_cost_cents: 15000, // $150.00
//!     variants: vec![VariantDraft {
//!         id: Some("v1".to_string()),
//!         size: "38".to_string(),
//!         color: "Black".to_string(),
//!         quantity: 1,
//!     }],
//!     ..StockDraft::default()
//! })
//! .unwrap();
//!
//! let records = reconcile::attempt_sale(
//!     &stock,
//!     &[SaleLineInput {
//!         variant_id: "v1".to_string(),
//!         quantity: 1,
//!         price_per_unit_cents: 20000, // $200.00
//!     }],
//! )
//! .unwrap();
//!
//! assert_eq!(records[0].total_revenue_cents, 20000);
//! assert_eq!(records[0].profit_cents, 5000);
//!
//! let updated = reconcile::apply_sale(&stock, &records);
//! assert_eq!(updated.current_quantity, 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod reconcile;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sole_core::Money` instead of
// `use sole_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use reconcile::{RefundOutcome, RefundStockEffect};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a stock item name.
///
/// ## Business Reason
/// Keeps catalog rows and receipts readable. Matches the frontend's input
/// limit so the two layers never disagree.
pub const MAX_NAME_LEN: usize = 200;

/// Number of calendar days in the dashboard's daily profit trend, counting
/// today. The trend output is always exactly this long (dense, gap-free,
/// oldest first) so chart rendering never has to fill holes.
pub const TREND_WINDOW_DAYS: usize = 7;

/// Number of rows on the best-sellers board.
pub const BEST_SELLERS_LIMIT: usize = 5;

/// Bucket label for sales whose stock item has no category, or whose stock
/// item no longer exists.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Display name for best-seller rows whose stock item was deleted after the
/// sales were recorded. The ledger outlives the catalog on purpose.
pub const MISSING_STOCK_LABEL: &str = "(deleted item)";
