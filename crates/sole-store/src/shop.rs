//! # Shop State Container
//!
//! The single owner of live application state: the catalog and the ledger,
//! mutated only through the operations below.
//!
//! ## Commit Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sale / Refund Commit Flow                          │
//! │                                                                         │
//! │  record_sale(stock_id, lines)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  reconcile::attempt_sale ── Err? ──► return, state byte-identical      │
//! │       │ Ok(records)                                                     │
//! │       ▼                                                                 │
//! │  reconcile::apply_sale → replacement StockItem                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog.replace + ledger.append   ← ONE in-memory unit, no           │
//! │       │                              observable intermediate state     │
//! │       ▼                                                                 │
//! │  caller persists the whole snapshot afterwards (or not - memory is    │
//! │  the source of truth either way)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single-threaded, synchronous, request/response: every operation runs to
//! completion before the next is invoked, so no locking or transaction log
//! is needed. Both collections are updated before control returns to any
//! persistence step, so a crash between the two can never leave a
//! reconciliation half-applied on disk.

use tracing::{debug, info, warn};

use sole_core::stats::{self, BestSeller, CategoryProfit, DailyProfit, DashboardStats};
use sole_core::types::{SaleLineInput, SaleRecord, StockDraft, StockItem};
use sole_core::{reconcile, RefundStockEffect};

use crate::backup::BackupDocument;
use crate::catalog::CatalogStore;
use crate::error::{StoreError, StoreResult};
use crate::ledger::SalesLedger;
use crate::persistence::SnapshotStore;

/// Live shop state: catalog + ledger.
#[derive(Debug, Clone, Default)]
pub struct Shop {
    catalog: CatalogStore,
    ledger: SalesLedger,
}

impl Shop {
    /// Creates an empty shop.
    pub fn new() -> Self {
        Shop::default()
    }

    /// Read access to the catalog.
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Read access to the ledger.
    pub fn ledger(&self) -> &SalesLedger {
        &self.ledger
    }

    // =========================================================================
    // Catalog Operations
    // =========================================================================

    /// Registers a new stock lot.
    pub fn add_stock(&mut self, draft: StockDraft) -> StoreResult<&StockItem> {
        self.catalog.add(draft)
    }

    /// Edits (replaces) a stock lot.
    pub fn edit_stock(&mut self, id: &str, draft: StockDraft) -> StoreResult<&StockItem> {
        self.catalog.edit(id, draft)
    }

    /// Deletes a stock lot.
    ///
    /// Existing sale records keep their `stock_id`; from now on they show up
    /// under fallback labels in the statistics and refund ledger-only.
    pub fn delete_stock(&mut self, id: &str) -> StoreResult<StockItem> {
        self.catalog.remove(id)
    }

    // =========================================================================
    // Sale / Refund
    // =========================================================================

    /// Records a multi-line sale against one stock item.
    ///
    /// All-or-nothing: any rejected line rejects the batch, leaving both the
    /// catalog and the ledger exactly as they were. On success the ledger
    /// append and the stock replacement commit together.
    pub fn record_sale(
        &mut self,
        stock_id: &str,
        lines: &[SaleLineInput],
    ) -> StoreResult<Vec<SaleRecord>> {
        debug!(stock_id = %stock_id, lines = lines.len(), "record_sale");

        let stock = self
            .catalog
            .get(stock_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Stock item", stock_id))?;

        let records = reconcile::attempt_sale(&stock, lines)?;
        let updated = reconcile::apply_sale(&stock, &records);

        // Commit point: both effects or neither
        self.catalog.replace(updated)?;
        self.ledger.append(records.clone());

        info!(
            stock_id = %stock_id,
            records = records.len(),
            revenue = records.iter().map(|r| r.total_revenue_cents).sum::<i64>(),
            "Sale recorded"
        );
        Ok(records)
    }

    /// Refunds one sale record.
    ///
    /// Unconditional once confirmed: the record leaves the ledger even when
    /// the stock item no longer exists. An unknown id is "nothing to refund"
    /// and returns `Ok(None)` without touching anything.
    pub fn refund_sale(&mut self, sale_id: &str) -> StoreResult<Option<SaleRecord>> {
        let Some(sale) = self.ledger.get(sale_id).cloned() else {
            debug!(sale_id = %sale_id, "Refund for unknown sale record, no-op");
            return Ok(None);
        };

        let outcome = reconcile::refund(&sale, self.catalog.get(&sale.stock_id));

        match outcome.effect {
            RefundStockEffect::VariantRestocked => {}
            RefundStockEffect::StockMissing => {
                debug!(sale_id = %sale_id, "Stock item gone, refund reverses ledger only");
            }
            RefundStockEffect::AggregateOnly => {
                // Known inconsistency: current_quantity now exceeds the
                // variant sum because the sold variant row was deleted.
                // Flagged here rather than repaired; see DESIGN.md.
                warn!(
                    sale_id = %sale_id,
                    stock_id = %sale.stock_id,
                    "Refunded variant no longer exists; aggregate quantity restored without a backing variant"
                );
            }
        }

        if let Some(updated) = outcome.updated_stock {
            self.catalog.replace(updated)?;
        }
        self.ledger.remove(sale_id);

        info!(sale_id = %sale_id, quantity = sale.quantity_sold, "Sale refunded");
        Ok(Some(sale))
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Headline dashboard figures for today.
    pub fn dashboard(&self) -> DashboardStats {
        stats::dashboard(self.catalog.items(), self.ledger.records())
    }

    /// Profit breakdown by current category.
    pub fn profit_by_category(&self) -> Vec<CategoryProfit> {
        stats::profit_by_category(self.catalog.items(), self.ledger.records())
    }

    /// Dense daily profit trend over the trailing window.
    pub fn daily_profit_trend(&self) -> Vec<DailyProfit> {
        stats::daily_profit_trend(self.ledger.records())
    }

    /// Top sellers by units sold.
    pub fn best_sellers(&self) -> Vec<BestSeller> {
        stats::best_sellers(self.catalog.items(), self.ledger.records())
    }

    // =========================================================================
    // Backup
    // =========================================================================

    /// Builds the export document for the current snapshot.
    pub fn export_backup(&self) -> BackupDocument {
        BackupDocument::export(self.catalog.items(), self.ledger.records())
    }

    /// Wholesale-replaces the shop state with a backup document.
    /// Destructive: whatever was in the catalog and ledger is gone.
    pub fn import_backup(&mut self, document: BackupDocument) {
        info!(
            stocks = document.stocks.len(),
            sales = document.sales.len(),
            version = %document.version,
            "Importing backup, replacing current state"
        );
        self.catalog.replace_all(document.stocks);
        self.ledger.replace_all(document.sales);
    }

    /// Parses and imports backup JSON. The current state is only replaced
    /// once the document has been accepted whole.
    pub fn import_backup_json(&mut self, json: &str) -> StoreResult<()> {
        let document = BackupDocument::parse(json)?;
        self.import_backup(document);
        Ok(())
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Loads a shop from the snapshot store, falling back to an empty shop
    /// when the key is absent or the stored bytes don't parse.
    pub fn load_or_default(store: &impl SnapshotStore, key: &str) -> Shop {
        let bytes = match store.load(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(key = %key, "No snapshot found, starting empty");
                return Shop::new();
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Snapshot load failed, starting empty");
                return Shop::new();
            }
        };

        match std::str::from_utf8(&bytes)
            .map_err(|e| StoreError::malformed(e.to_string()))
            .and_then(BackupDocument::parse)
        {
            Ok(document) => {
                let mut shop = Shop::new();
                shop.catalog.replace_all(document.stocks);
                shop.ledger.replace_all(document.sales);
                info!(
                    key = %key,
                    stocks = shop.catalog.len(),
                    sales = shop.ledger.len(),
                    "Snapshot loaded"
                );
                shop
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Snapshot corrupt, starting empty");
                Shop::new()
            }
        }
    }

    /// Persists the whole snapshot.
    ///
    /// A failed save (quota or otherwise) is surfaced to the caller and does
    /// not touch the in-memory state, which remains the source of truth.
    pub fn persist(&self, store: &impl SnapshotStore, key: &str) -> StoreResult<()> {
        let json = self.export_backup().to_json()?;
        store.save(key, json.as_bytes())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use sole_core::types::VariantDraft;
    use sole_core::CoreError;

    /// One lot: $150.00 unit cost, 38/Black ×1, 43/White ×4.
    fn seed_shop() -> (Shop, String) {
        let mut shop = Shop::new();
        let stock_id = shop
            .add_stock(StockDraft {
                name: "Runner Daily".to_string(),
                category: Some("Running".to_string()),
                unit_cost_cents: 15000,
                variants: vec![
                    VariantDraft {
                        id: Some("v1".to_string()),
                        size: "38".to_string(),
                        color: "Black".to_string(),
                        quantity: 1,
                    },
                    VariantDraft {
                        id: Some("v2".to_string()),
                        size: "43".to_string(),
                        color: "White".to_string(),
                        quantity: 4,
                    },
                ],
                ..StockDraft::default()
            })
            .unwrap()
            .id
            .clone();
        (shop, stock_id)
    }

    fn line(variant_id: &str, quantity: i64, price_cents: i64) -> SaleLineInput {
        SaleLineInput {
            variant_id: variant_id.to_string(),
            quantity,
            price_per_unit_cents: price_cents,
        }
    }

    fn assert_invariant(stock: &StockItem) {
        assert_eq!(
            stock.current_quantity,
            stock.variant_quantity_sum(),
            "current_quantity must equal the variant sum"
        );
    }

    #[test]
    fn test_sale_commits_ledger_and_stock_together() {
        let (mut shop, stock_id) = seed_shop();

        let records = shop
            .record_sale(&stock_id, &[line("v1", 1, 20000)])
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].total_revenue_cents, 20000);
        assert_eq!(records[0].profit_cents, 5000);
        assert_eq!(shop.ledger().len(), 1);

        let stock = shop.catalog().get(&stock_id).unwrap();
        assert_eq!(stock.find_variant("v1").unwrap().quantity, 0);
        assert_eq!(stock.current_quantity, 4);
        assert_invariant(stock);
    }

    #[test]
    fn test_failed_sale_changes_nothing() {
        let (mut shop, stock_id) = seed_shop();

        // Line 1 alone would succeed; line 2 overdraws. Both must stay
        // unapplied and the ledger must stay empty.
        let err = shop
            .record_sale(&stock_id, &[line("v2", 2, 18000), line("v1", 2, 20000)])
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::InsufficientStock { .. })
        ));

        assert_eq!(shop.ledger().len(), 0);
        let stock = shop.catalog().get(&stock_id).unwrap();
        assert_eq!(stock.find_variant("v1").unwrap().quantity, 1);
        assert_eq!(stock.find_variant("v2").unwrap().quantity, 4);
        assert_eq!(stock.current_quantity, 5);
    }

    #[test]
    fn test_sale_against_unknown_stock() {
        let (mut shop, _) = seed_shop();
        let err = shop.record_sale("ghost", &[line("v1", 1, 100)]).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_refund_restores_presale_state() {
        let (mut shop, stock_id) = seed_shop();
        let before = shop.catalog().get(&stock_id).unwrap().clone();

        let records = shop
            .record_sale(&stock_id, &[line("v2", 3, 18000)])
            .unwrap();
        let refunded = shop.refund_sale(&records[0].id).unwrap().unwrap();
        assert_eq!(refunded.id, records[0].id);

        // Ledger entry gone, quantities back to pre-sale values
        assert_eq!(shop.ledger().len(), 0);
        let stock = shop.catalog().get(&stock_id).unwrap();
        assert_eq!(
            stock.find_variant("v2").unwrap().quantity,
            before.find_variant("v2").unwrap().quantity
        );
        assert_eq!(stock.current_quantity, before.current_quantity);
        assert_invariant(stock);
    }

    #[test]
    fn test_refund_unknown_record_is_noop() {
        let (mut shop, stock_id) = seed_shop();
        shop.record_sale(&stock_id, &[line("v1", 1, 20000)]).unwrap();

        assert!(shop.refund_sale("ghost").unwrap().is_none());
        assert_eq!(shop.ledger().len(), 1);
    }

    #[test]
    fn test_refund_after_stock_delete_reverses_ledger_only() {
        let (mut shop, stock_id) = seed_shop();
        let records = shop
            .record_sale(&stock_id, &[line("v1", 1, 20000)])
            .unwrap();

        shop.delete_stock(&stock_id).unwrap();
        // Delete does not cascade: the record is still there, dangling
        assert_eq!(shop.ledger().len(), 1);

        let refunded = shop.refund_sale(&records[0].id).unwrap();
        assert!(refunded.is_some());
        assert_eq!(shop.ledger().len(), 0);
        assert!(shop.catalog().is_empty());
    }

    /// Known deviation: refunding a sale whose variant row was deleted by an
    /// edit restores the aggregate only, leaving `current_quantity` above
    /// the variant sum.
    #[test]
    fn test_refund_with_deleted_variant_breaks_invariant_as_designed() {
        let (mut shop, stock_id) = seed_shop();
        let records = shop
            .record_sale(&stock_id, &[line("v1", 1, 20000)])
            .unwrap();

        // Edit away the 38/Black row
        shop.edit_stock(
            &stock_id,
            StockDraft {
                name: "Runner Daily".to_string(),
                category: Some("Running".to_string()),
                unit_cost_cents: 15000,
                variants: vec![VariantDraft {
                    id: Some("v2".to_string()),
                    size: "43".to_string(),
                    color: "White".to_string(),
                    quantity: 4,
                }],
                ..StockDraft::default()
            },
        )
        .unwrap();

        shop.refund_sale(&records[0].id).unwrap();

        let stock = shop.catalog().get(&stock_id).unwrap();
        assert_eq!(stock.current_quantity, 5);
        assert_eq!(stock.variant_quantity_sum(), 4);
        assert!(stock.current_quantity > stock.variant_quantity_sum());
    }

    #[test]
    fn test_unit_cost_edit_never_rewrites_history() {
        let (mut shop, stock_id) = seed_shop();
        let records = shop
            .record_sale(&stock_id, &[line("v1", 1, 20000)])
            .unwrap();
        assert_eq!(records[0].profit_cents, 5000);

        shop.edit_stock(
            &stock_id,
            StockDraft {
                name: "Runner Daily".to_string(),
                category: Some("Running".to_string()),
                unit_cost_cents: 19000, // cost went up
                variants: vec![VariantDraft {
                    id: Some("v2".to_string()),
                    size: "43".to_string(),
                    color: "White".to_string(),
                    quantity: 4,
                }],
                ..StockDraft::default()
            },
        )
        .unwrap();

        let record = shop.ledger().get(&records[0].id).unwrap();
        assert_eq!(record.profit_cents, 5000);
        assert_eq!(record.total_revenue_cents, 20000);
        assert_eq!(shop.dashboard().total_profit_cents, 5000);
    }

    #[test]
    fn test_export_import_round_trip() {
        let (mut shop, stock_id) = seed_shop();
        shop.record_sale(&stock_id, &[line("v2", 2, 18000)]).unwrap();

        let json = shop.export_backup().to_json().unwrap();

        let mut restored = Shop::new();
        restored.import_backup_json(&json).unwrap();

        assert_eq!(restored.catalog().items(), shop.catalog().items());
        assert_eq!(restored.ledger().records(), shop.ledger().records());
    }

    #[test]
    fn test_import_wholesale_replaces_state() {
        let (mut shop, stock_id) = seed_shop();
        shop.record_sale(&stock_id, &[line("v1", 1, 20000)]).unwrap();

        shop.import_backup_json(r#"{"stocks": []}"#).unwrap();

        assert!(shop.catalog().is_empty());
        assert!(shop.ledger().is_empty());
    }

    #[test]
    fn test_rejected_import_preserves_state() {
        let (mut shop, stock_id) = seed_shop();
        shop.record_sale(&stock_id, &[line("v1", 1, 20000)]).unwrap();

        let err = shop.import_backup_json(r#"{"sales": []}"#).unwrap_err();
        assert!(matches!(err, StoreError::MalformedBackup(_)));

        assert_eq!(shop.catalog().len(), 1);
        assert_eq!(shop.ledger().len(), 1);
    }

    #[test]
    fn test_persist_and_load_round_trip() {
        let (mut shop, stock_id) = seed_shop();
        shop.record_sale(&stock_id, &[line("v2", 1, 18000)]).unwrap();

        let store = MemoryStore::new();
        shop.persist(&store, "shop").unwrap();

        let loaded = Shop::load_or_default(&store, "shop");
        assert_eq!(loaded.catalog().items(), shop.catalog().items());
        assert_eq!(loaded.ledger().records(), shop.ledger().records());
    }

    #[test]
    fn test_quota_failure_surfaces_and_memory_survives() {
        let (mut shop, stock_id) = seed_shop();
        shop.record_sale(&stock_id, &[line("v2", 1, 18000)]).unwrap();

        let store = MemoryStore::with_quota(8); // far too small for a snapshot
        let err = shop.persist(&store, "shop").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { .. }));

        // The in-memory state is the source of truth and is untouched
        assert_eq!(shop.catalog().len(), 1);
        assert_eq!(shop.ledger().len(), 1);
    }

    #[test]
    fn test_load_tolerates_absent_and_corrupt_snapshots() {
        let store = MemoryStore::new();
        assert!(Shop::load_or_default(&store, "shop").catalog().is_empty());

        store.save("shop", b"{ not json").unwrap();
        let shop = Shop::load_or_default(&store, "shop");
        assert!(shop.catalog().is_empty());
        assert!(shop.ledger().is_empty());
    }

    #[test]
    fn test_dashboard_reads_through_shop() {
        let (mut shop, stock_id) = seed_shop();
        shop.record_sale(&stock_id, &[line("v1", 1, 20000)]).unwrap();

        let stats = shop.dashboard();
        assert_eq!(stats.total_inventory_count, 4);
        assert_eq!(stats.total_revenue_cents, 20000);
        assert_eq!(stats.total_profit_cents, 5000);
        assert_eq!(stats.sales_today, 1);

        let sellers = shop.best_sellers();
        assert_eq!(sellers.len(), 1);
        assert_eq!(sellers[0].name, "Runner Daily");

        let by_category = shop.profit_by_category();
        assert_eq!(by_category[0].category, "Running");
    }
}
