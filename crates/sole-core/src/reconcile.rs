//! # Reconciliation Engine
//!
//! The rules that keep variant-level quantities, aggregate quantities, sale
//! records, and derived financial statistics mutually consistent.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sale Reconciliation                              │
//! │                                                                         │
//! │  Sell form (lines)                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  attempt_sale(stock, lines)                                            │
//! │       ├── drop lines with qty <= 0 / blank variant id ("not entered")  │
//! │       ├── nothing left?            → EmptySale                         │
//! │       ├── unknown variant id?      → UnknownVariant                    │
//! │       ├── grouped qty > available? → InsufficientStock (whole batch)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<SaleRecord>  (size/color snapshots, frozen revenue + profit)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply_sale(stock, records) → replacement StockItem                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller commits ledger append + stock replacement TOGETHER             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation and application are split on purpose: `attempt_sale` is the
//! only place a sale can fail, so by the time `apply_sale` runs the caller
//! can commit both effects as one logical unit with no failure path between
//! them: a rejected batch leaves stock and ledger byte-for-byte untouched.

use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{SaleLineInput, SaleRecord, StockItem};
use crate::validation::validate_sale_price_cents;

// =============================================================================
// Sale Path
// =============================================================================

/// Validates a sale attempt against current stock and produces the sale
/// records for it.
///
/// All-or-nothing: any failure rejects the whole batch, and nothing is
/// mutated here; the input stock item is only read.
///
/// Lines in one call are logically atomic but each record carries its own
/// `sale_date`; distinct timestamps within a batch are tolerated if the
/// clock advances, not deduplicated.
pub fn attempt_sale(stock: &StockItem, lines: &[SaleLineInput]) -> CoreResult<Vec<SaleRecord>> {
    // Untouched form rows are "not entered", not an error
    let entered: Vec<&SaleLineInput> = lines
        .iter()
        .filter(|line| line.quantity > 0 && !line.variant_id.trim().is_empty())
        .collect();

    if entered.is_empty() {
        return Err(CoreError::EmptySale);
    }

    for line in &entered {
        validate_sale_price_cents(line.price_per_unit_cents)?;
    }

    // Group requested quantity per variant: two lines for the same variant
    // must not each pass the stock check individually
    let mut requested: BTreeMap<&str, i64> = BTreeMap::new();
    for line in &entered {
        *requested.entry(line.variant_id.as_str()).or_insert(0) += line.quantity;
    }

    for (variant_id, qty) in &requested {
        let variant = stock
            .find_variant(variant_id)
            .ok_or_else(|| CoreError::UnknownVariant {
                variant_id: variant_id.to_string(),
            })?;

        if *qty > variant.quantity {
            return Err(CoreError::InsufficientStock {
                variant_id: variant.id.clone(),
                size: variant.size.clone(),
                color: variant.color.clone(),
                available: variant.quantity,
                requested: *qty,
            });
        }
    }

    // Every line checked out: emit one record per entered line, snapshotting
    // the variant attributes so history survives later edits and deletes
    let mut records = Vec::with_capacity(entered.len());
    for line in &entered {
        let variant = stock
            .find_variant(&line.variant_id)
            .ok_or_else(|| CoreError::UnknownVariant {
                variant_id: line.variant_id.clone(),
            })?;
        let price = Money::from_cents(line.price_per_unit_cents);
        let margin = price - stock.unit_cost();

        records.push(SaleRecord {
            id: Uuid::new_v4().to_string(),
            stock_id: stock.id.clone(),
            variant_id: Some(variant.id.clone()),
            size: Some(variant.size.clone()),
            color: Some(variant.color.clone()),
            quantity_sold: line.quantity,
            sale_price_cents: line.price_per_unit_cents,
            sale_date: Utc::now(),
            total_revenue_cents: price.multiply_quantity(line.quantity).cents(),
            profit_cents: margin.multiply_quantity(line.quantity).cents(),
        });
    }

    Ok(records)
}

/// Applies already-validated sale records to a stock item, returning the
/// replacement value.
///
/// Caller guarantees homogeneity: every record references this stock item.
/// Quantities are floored at 0 (a defensive clamp, not a validation path);
/// validation already happened in [`attempt_sale`]. The caller must commit
/// the returned item and the ledger append together or not at all.
pub fn apply_sale(stock: &StockItem, records: &[SaleRecord]) -> StockItem {
    let mut updated = stock.clone();

    for variant in &mut updated.variants {
        let sold: i64 = records
            .iter()
            .filter(|r| r.variant_id.as_deref() == Some(variant.id.as_str()))
            .map(|r| r.quantity_sold)
            .sum();
        variant.quantity = (variant.quantity - sold).max(0);
    }

    updated.sync_current_quantity();
    updated
}

// =============================================================================
// Refund Path
// =============================================================================

/// How a refund touched (or could not touch) the stock side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefundStockEffect {
    /// The sold variant still exists; its quantity was restored.
    VariantRestocked,

    /// The variant row was deleted since the sale; only the aggregate
    /// `current_quantity` grew, leaving it above the variant sum. A known
    /// inconsistency the design tolerates rather than resolves; callers
    /// should surface it, not repair it.
    AggregateOnly,

    /// The stock item itself was deleted; only the ledger side is reversed.
    StockMissing,
}

/// The paired mutation a refund produces.
pub struct RefundOutcome {
    /// Id of the sale record to remove from the ledger. Removal is
    /// unconditional once the refund is confirmed.
    pub record_id: String,

    /// Replacement stock item, when the item still exists.
    pub updated_stock: Option<StockItem>,

    /// What happened on the stock side.
    pub effect: RefundStockEffect,
}

/// Reverses a sale record.
///
/// The ledger removal always happens; the stock restoration is best-effort
/// against whatever still exists. Stock can only grow here, so there is no
/// upper-bound check beyond integer range.
pub fn refund(sale: &SaleRecord, stock: Option<&StockItem>) -> RefundOutcome {
    let Some(stock) = stock else {
        return RefundOutcome {
            record_id: sale.id.clone(),
            updated_stock: None,
            effect: RefundStockEffect::StockMissing,
        };
    };

    let mut updated = stock.clone();
    let target = sale
        .variant_id
        .as_deref()
        .and_then(|id| updated.variants.iter_mut().find(|v| v.id == id));

    let effect = match target {
        Some(variant) => {
            variant.quantity += sale.quantity_sold;
            updated.sync_current_quantity();
            RefundStockEffect::VariantRestocked
        }
        None => {
            // Variant row was deleted by a later edit: restore the aggregate
            // directly, without a backing variant. current_quantity now
            // exceeds the variant sum; deliberate, see RefundStockEffect.
            updated.current_quantity += sale.quantity_sold;
            RefundStockEffect::AggregateOnly
        }
    };

    RefundOutcome {
        record_id: sale.id.clone(),
        updated_stock: Some(updated),
        effect,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VariantDraft;

    /// One lot: $150.00 unit cost, 42/Black ×1, 43/White ×4.
    fn fixture_stock() -> StockItem {
        let mut item = StockItem::from_draft(crate::types::StockDraft {
            name: "Runner Daily".to_string(),
            category: Some("Running".to_string()),
            description: None,
            image_url: None,
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
        })
        .unwrap();
        item.id = "stock-1".to_string();
        item
    }

    fn line(variant_id: &str, quantity: i64, price_cents: i64) -> SaleLineInput {
        SaleLineInput {
            variant_id: variant_id.to_string(),
            quantity,
            price_per_unit_cents: price_cents,
        }
    }

    #[test]
    fn test_single_line_sale_freezes_revenue_and_profit() {
        let stock = fixture_stock();

        let records = attempt_sale(&stock, &[line("v1", 1, 20000)]).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.stock_id, "stock-1");
        assert_eq!(record.variant_id.as_deref(), Some("v1"));
        assert_eq!(record.size.as_deref(), Some("38"));
        assert_eq!(record.color.as_deref(), Some("Black"));
        assert_eq!(record.total_revenue_cents, 20000);
        assert_eq!(record.profit_cents, 5000); // ($200 − $150) × 1

        let updated = apply_sale(&stock, &records);
        assert_eq!(updated.find_variant("v1").unwrap().quantity, 0);
        assert_eq!(updated.current_quantity, 4);
        assert_eq!(updated.current_quantity, updated.variant_quantity_sum());
    }

    #[test]
    fn test_overdraw_rejects_whole_batch() {
        let stock = fixture_stock();

        let err = attempt_sale(&stock, &[line("v1", 2, 20000)]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 1,
                requested: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_second_line_overdraw_leaves_first_unapplied() {
        let stock = fixture_stock();

        // Line 1 alone is fine; line 2 overdraws. The whole attempt fails and
        // nothing was mutated: attempt_sale never touches the stock item.
        let err = attempt_sale(&stock, &[line("v2", 2, 18000), line("v1", 2, 20000)]);
        assert!(matches!(
            err,
            Err(CoreError::InsufficientStock { ref variant_id, .. }) if variant_id == "v1"
        ));
        assert_eq!(stock.find_variant("v1").unwrap().quantity, 1);
        assert_eq!(stock.find_variant("v2").unwrap().quantity, 4);
        assert_eq!(stock.current_quantity, 5);
    }

    #[test]
    fn test_lines_for_same_variant_are_summed_before_the_stock_check() {
        let stock = fixture_stock();

        // 3 + 2 = 5 > 4 available, even though each line alone would pass
        let err = attempt_sale(&stock, &[line("v2", 3, 18000), line("v2", 2, 18000)]);
        assert!(matches!(
            err,
            Err(CoreError::InsufficientStock {
                available: 4,
                requested: 5,
                ..
            })
        ));
    }

    #[test]
    fn test_untouched_rows_are_discarded_not_errors() {
        let stock = fixture_stock();

        let records = attempt_sale(
            &stock,
            &[
                line("", 3, 0),       // blank variant: not entered
                line("v2", 0, 18000), // zero quantity: not entered
                line("v2", 2, 18000),
            ],
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity_sold, 2);
    }

    #[test]
    fn test_all_rows_untouched_is_an_empty_sale() {
        let stock = fixture_stock();

        let err = attempt_sale(&stock, &[line("", 1, 100), line("v2", -3, 100)]);
        assert!(matches!(err, Err(CoreError::EmptySale)));
    }

    #[test]
    fn test_unknown_variant_rejects_batch() {
        let stock = fixture_stock();

        let err = attempt_sale(&stock, &[line("ghost", 1, 20000)]);
        assert!(matches!(err, Err(CoreError::UnknownVariant { .. })));
    }

    #[test]
    fn test_negative_price_rejects_batch() {
        let stock = fixture_stock();

        let err = attempt_sale(&stock, &[line("v1", 1, -5)]);
        assert!(matches!(err, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_multi_line_sale_emits_one_record_per_line() {
        let stock = fixture_stock();

        let records =
            attempt_sale(&stock, &[line("v1", 1, 20000), line("v2", 2, 18000)]).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.stock_id == "stock-1"));

        let updated = apply_sale(&stock, &records);
        assert_eq!(updated.find_variant("v1").unwrap().quantity, 0);
        assert_eq!(updated.find_variant("v2").unwrap().quantity, 2);
        assert_eq!(updated.current_quantity, 2);
    }

    #[test]
    fn test_apply_sale_clamps_at_zero() {
        let stock = fixture_stock();

        // Over-large input must clamp, never go negative: this is the
        // defensive path, validation already happened in attempt_sale
        let mut records = attempt_sale(&stock, &[line("v1", 1, 20000)]).unwrap();
        records[0].quantity_sold = 99;

        let updated = apply_sale(&stock, &records);
        assert_eq!(updated.find_variant("v1").unwrap().quantity, 0);
        assert_eq!(updated.current_quantity, 4);
    }

    #[test]
    fn test_refund_restores_variant_and_aggregate() {
        let stock = fixture_stock();
        let records = attempt_sale(&stock, &[line("v2", 3, 18000)]).unwrap();
        let after_sale = apply_sale(&stock, &records);
        assert_eq!(after_sale.current_quantity, 2);

        let outcome = refund(&records[0], Some(&after_sale));
        assert_eq!(outcome.effect, RefundStockEffect::VariantRestocked);
        assert_eq!(outcome.record_id, records[0].id);

        let restored = outcome.updated_stock.unwrap();
        assert_eq!(restored.find_variant("v2").unwrap().quantity, 4);
        assert_eq!(restored.current_quantity, 5);
        assert_eq!(restored.current_quantity, restored.variant_quantity_sum());
    }

    #[test]
    fn test_refund_after_stock_delete_is_ledger_only() {
        let stock = fixture_stock();
        let records = attempt_sale(&stock, &[line("v1", 1, 20000)]).unwrap();

        let outcome = refund(&records[0], None);
        assert_eq!(outcome.effect, RefundStockEffect::StockMissing);
        assert!(outcome.updated_stock.is_none());
        assert_eq!(outcome.record_id, records[0].id);
    }

    /// Known deviation from the derived invariant: when the sold variant row
    /// was deleted by a later edit, the refund grows `current_quantity`
    /// without a backing variant, so the total exceeds the variant sum.
    /// Tolerated by design; the store layer logs it.
    #[test]
    fn test_refund_with_deleted_variant_grows_aggregate_only() {
        let stock = fixture_stock();
        let records = attempt_sale(&stock, &[line("v1", 1, 20000)]).unwrap();
        let mut after_sale = apply_sale(&stock, &records);

        // An edit removed the 38/Black row entirely
        after_sale.variants.retain(|v| v.id != "v1");
        after_sale.sync_current_quantity();
        assert_eq!(after_sale.current_quantity, 4);

        let outcome = refund(&records[0], Some(&after_sale));
        assert_eq!(outcome.effect, RefundStockEffect::AggregateOnly);

        let degraded = outcome.updated_stock.unwrap();
        assert_eq!(degraded.current_quantity, 5);
        assert_eq!(degraded.variant_quantity_sum(), 4);
        assert!(degraded.current_quantity > degraded.variant_quantity_sum());
    }

    #[test]
    fn test_refund_reverses_a_sale_exactly() {
        let stock = fixture_stock();
        let before = stock.clone();

        let records = attempt_sale(&stock, &[line("v2", 2, 18000)]).unwrap();
        let after_sale = apply_sale(&stock, &records);
        let outcome = refund(&records[0], Some(&after_sale));
        let restored = outcome.updated_stock.unwrap();

        assert_eq!(
            restored.find_variant("v2").unwrap().quantity,
            before.find_variant("v2").unwrap().quantity
        );
        assert_eq!(restored.current_quantity, before.current_quantity);
    }

    #[test]
    fn test_zero_price_sale_records_negative_profit() {
        let stock = fixture_stock();

        let records = attempt_sale(&stock, &[line("v1", 1, 0)]).unwrap();
        assert_eq!(records[0].total_revenue_cents, 0);
        assert_eq!(records[0].profit_cents, -15000);
    }

    #[test]
    fn test_apply_sale_ignores_foreign_variant_records() {
        // Records whose variant id matches nothing on the item leave every
        // variant untouched; only the canonical recompute runs
        let stock = fixture_stock();
        let record = SaleRecord {
            id: "r-x".to_string(),
            stock_id: stock.id.clone(),
            variant_id: Some("elsewhere".to_string()),
            size: None,
            color: None,
            quantity_sold: 3,
            sale_price_cents: 1000,
            sale_date: Utc::now(),
            total_revenue_cents: 3000,
            profit_cents: -42000,
        };

        let updated = apply_sale(&stock, &[record]);
        assert_eq!(updated.current_quantity, stock.current_quantity);
        assert_eq!(updated.find_variant("v1").unwrap().quantity, 1);
    }
}
