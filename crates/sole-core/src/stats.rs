//! # Statistics Aggregator
//!
//! Dashboard figures derived by folding over `(stocks, sales)` snapshots.
//!
//! Everything here is a pure function recomputed on every read: no caching,
//! no incremental maintenance. Recomputation is linear in ledger size, which
//! is fine at the scale of a single small shop.
//!
//! ## Calendar Semantics
//! "Today" and the daily buckets use the **local calendar date** (year/month/
//! day in the observer's time zone), not UTC and not elapsed-24h windows. A
//! sale rung up at 23:59 local belongs to that day no matter the UTC offset.
//! Each time-sensitive function has an `*_at(..., today)` form so tests can
//! pin the date; the plain form reads the local clock.
//!
//! ## Attribution Asymmetry
//! The category breakdown looks up the stock item's **current** category at
//! aggregation time, unlike the size/color snapshots frozen on SaleRecord:
//! editing an item's category retroactively moves its historical sales to
//! the new bucket. That asymmetry is intentional here; see DESIGN.md.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{SaleRecord, StockItem};
use crate::{BEST_SELLERS_LIMIT, MISSING_STOCK_LABEL, TREND_WINDOW_DAYS, UNCATEGORIZED_LABEL};

// =============================================================================
// Output Types
// =============================================================================

/// Headline dashboard figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardStats {
    /// Σ current_quantity over all stock items.
    pub total_inventory_count: i64,

    /// Σ current_quantity × unit_cost (valuation at cost, not at sale price).
    pub total_inventory_value_cents: i64,

    /// Σ frozen per-sale revenue. Unaffected by later unit-cost edits.
    pub total_revenue_cents: i64,

    /// Σ frozen per-sale profit. Unaffected by later unit-cost edits.
    pub total_profit_cents: i64,

    /// Count of sales whose local calendar date is today's local date.
    pub sales_today: usize,
}

/// One category bucket of the profit breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryProfit {
    pub category: String,
    pub revenue_cents: i64,
    pub profit_cents: i64,
}

/// One day of the trailing profit trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailyProfit {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub profit_cents: i64,
    pub sales_count: usize,
}

/// One row of the best-sellers board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BestSeller {
    pub stock_id: String,
    /// Current item name, or the fallback label when the item was deleted.
    pub name: String,
    pub quantity_sold: i64,
    pub total_revenue_cents: i64,
}

// =============================================================================
// Aggregation
// =============================================================================

/// A sale's local calendar date.
fn local_sale_date(sale_date: &DateTime<Utc>) -> NaiveDate {
    sale_date.with_timezone(&Local).date_naive()
}

/// Headline figures for the current local date.
pub fn dashboard(stocks: &[StockItem], sales: &[SaleRecord]) -> DashboardStats {
    dashboard_at(stocks, sales, Local::now().date_naive())
}

/// Headline figures with `today` pinned (deterministic form).
pub fn dashboard_at(stocks: &[StockItem], sales: &[SaleRecord], today: NaiveDate) -> DashboardStats {
    DashboardStats {
        total_inventory_count: stocks.iter().map(|s| s.current_quantity).sum(),
        total_inventory_value_cents: stocks.iter().map(|s| s.inventory_value().cents()).sum(),
        total_revenue_cents: sales.iter().map(|s| s.total_revenue_cents).sum(),
        total_profit_cents: sales.iter().map(|s| s.profit_cents).sum(),
        sales_today: sales
            .iter()
            .filter(|s| local_sale_date(&s.sale_date) == today)
            .count(),
    }
}

/// Profit and revenue grouped by the referenced item's current category.
///
/// Sales whose stock item is gone, and sales of items without a category,
/// land in the uncategorized bucket. Buckets sort by profit, highest first.
pub fn profit_by_category(stocks: &[StockItem], sales: &[SaleRecord]) -> Vec<CategoryProfit> {
    let mut buckets: BTreeMap<String, (i64, i64)> = BTreeMap::new();

    for sale in sales {
        let category = stocks
            .iter()
            .find(|s| s.id == sale.stock_id)
            .and_then(|s| s.category.clone())
            .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string());

        let bucket = buckets.entry(category).or_insert((0, 0));
        bucket.0 += sale.total_revenue_cents;
        bucket.1 += sale.profit_cents;
    }

    let mut out: Vec<CategoryProfit> = buckets
        .into_iter()
        .map(|(category, (revenue_cents, profit_cents))| CategoryProfit {
            category,
            revenue_cents,
            profit_cents,
        })
        .collect();
    out.sort_by(|a, b| b.profit_cents.cmp(&a.profit_cents));
    out
}

/// Daily profit over the trailing window ending today (local dates).
pub fn daily_profit_trend(sales: &[SaleRecord]) -> Vec<DailyProfit> {
    daily_profit_trend_at(sales, Local::now().date_naive())
}

/// Daily profit with `today` pinned (deterministic form).
///
/// The output is dense and gap-free: exactly [`TREND_WINDOW_DAYS`] entries,
/// one per calendar day including today, oldest first, with zero rows for
/// days that had no sales; chart renderers must never see a sparse series.
pub fn daily_profit_trend_at(sales: &[SaleRecord], today: NaiveDate) -> Vec<DailyProfit> {
    let mut days: BTreeMap<NaiveDate, (i64, usize)> = (0..TREND_WINDOW_DAYS)
        .map(|back| (today - Duration::days(back as i64), (0, 0)))
        .collect();

    for sale in sales {
        if let Some(bucket) = days.get_mut(&local_sale_date(&sale.sale_date)) {
            bucket.0 += sale.profit_cents;
            bucket.1 += 1;
        }
    }

    days.into_iter()
        .map(|(date, (profit_cents, sales_count))| DailyProfit {
            date,
            profit_cents,
            sales_count,
        })
        .collect()
}

/// Top sellers by units sold, all time.
///
/// Groups sales by `stock_id`, sums quantity and revenue, sorts by quantity
/// descending and truncates to [`BEST_SELLERS_LIMIT`]. Deleted items keep
/// their sales under the fallback name.
pub fn best_sellers(stocks: &[StockItem], sales: &[SaleRecord]) -> Vec<BestSeller> {
    let mut totals: BTreeMap<&str, (i64, i64)> = BTreeMap::new();

    for sale in sales {
        let entry = totals.entry(sale.stock_id.as_str()).or_insert((0, 0));
        entry.0 += sale.quantity_sold;
        entry.1 += sale.total_revenue_cents;
    }

    let mut out: Vec<BestSeller> = totals
        .into_iter()
        .map(|(stock_id, (quantity_sold, total_revenue_cents))| BestSeller {
            stock_id: stock_id.to_string(),
            name: stocks
                .iter()
                .find(|s| s.id == stock_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| MISSING_STOCK_LABEL.to_string()),
            quantity_sold,
            total_revenue_cents,
        })
        .collect();

    out.sort_by(|a, b| b.quantity_sold.cmp(&a.quantity_sold));
    out.truncate(BEST_SELLERS_LIMIT);
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
