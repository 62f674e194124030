//! # Domain Types
//!
//! Core domain types used throughout Sole POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   StockItem     │   │  StockVariant   │   │   SaleRecord    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name, category │──►│  size, color    │   │  stock_id (weak)│       │
//! │  │  unit_cost      │   │  quantity       │   │  size/color snap│       │
//! │  │  current_qty    │   └─────────────────┘   │  revenue, profit│       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   StockDraft    │   │  VariantDraft   │   │  SaleLineInput  │       │
//! │  │  operator input │   │  one size/color │   │  one sale line  │       │
//! │  │  for add/edit   │   │  row in a form  │   │  on the sell UI │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `SaleRecord` copies the variant's `size`/`color` and freezes revenue and
//! profit at the moment of sale. Later edits to the stock item (including its
//! unit cost) never alter history; deleting the item leaves the record with a
//! dangling `stock_id`, which is expected and permanent.
//!
//! ## Derived Invariant
//! `StockItem::current_quantity` must always equal the sum of its variants'
//! quantities. It is recomputed by [`StockItem::sync_current_quantity`], the
//! single canonical reconciliation point, after every structural change to
//! `variants`, and never assigned independently anywhere else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::validate_stock_draft;

// =============================================================================
// Stock Variant
// =============================================================================

/// One size/color SKU within a stock item, carrying its own quantity.
///
/// `size` and `color` are free text: the shop sells whatever the supplier
/// prints on the box, so the model does not normalize or enumerate them.
/// Uniqueness of `(size, color)` within an item is a caller responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockVariant {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Shoe size as entered ("42", "9.5", "38 2/3", ...).
    pub size: String,

    /// Colorway as entered ("Black", "Triple White", ...).
    pub color: String,

    /// Units currently in stock for this variant. Never negative.
    pub quantity: i64,
}

// =============================================================================
// Stock Item
// =============================================================================

/// One purchased lot of a product, split into size/color variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in the catalog and on the dashboard.
    pub name: String,

    /// Optional category ("Running", "Sneakers", ...). Absent items land in
    /// the uncategorized bucket of the category breakdown.
    pub category: Option<String>,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Optional image location; capture and compression happen outside the core.
    pub image_url: Option<String>,

    /// When the lot was acquired. Immutable after creation.
    #[ts(as = "String")]
    pub purchase_date: DateTime<Utc>,

    /// Total units acquired. Set once at creation, preserved through edits.
    pub initial_quantity: i64,

    /// Units currently in stock across all variants.
    /// Derived: must equal the variant quantity sum (see module docs).
    pub current_quantity: i64,

    /// Acquisition cost per unit in cents, uniform across variants.
    /// Editable; historical sale profit is unaffected by later edits.
    pub unit_cost_cents: i64,

    /// `initial_quantity × unit_cost` frozen at creation. Represents sunk
    /// cost, distinct from current inventory value, and is never recomputed.
    pub total_cost_cents: i64,

    /// Variants in insertion order (insertion order is display order).
    pub variants: Vec<StockVariant>,
}

impl StockItem {
    /// Builds a new stock item from a validated draft.
    ///
    /// ## What This Derives
    /// - fresh UUIDs for the item and every variant row
    /// - `purchase_date` = now
    /// - `initial_quantity` = `current_quantity` = variant quantity sum
    /// - `total_cost` = `initial_quantity × unit_cost` (frozen here, forever)
    pub fn from_draft(draft: StockDraft) -> CoreResult<Self> {
        validate_stock_draft(&draft)?;

        let variants: Vec<StockVariant> = draft
            .variants
            .into_iter()
            .map(VariantDraft::into_variant)
            .collect();
        let initial_quantity: i64 = variants.iter().map(|v| v.quantity).sum();

        Ok(StockItem {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            category: draft.category,
            description: draft.description,
            image_url: draft.image_url,
            purchase_date: Utc::now(),
            initial_quantity,
            current_quantity: initial_quantity,
            unit_cost_cents: draft.unit_cost_cents,
            total_cost_cents: draft.unit_cost_cents * initial_quantity,
            variants,
        })
    }

    /// Produces the replacement item for an edit.
    ///
    /// Descriptive fields, unit cost, and the variant list come from the
    /// draft; `id`, `purchase_date`, `initial_quantity`, and `total_cost`
    /// are preserved from the existing item. A draft variant carrying the id
    /// of an existing row keeps that identity (so sales recorded against it
    /// still match); rows without an id are treated as new.
    pub fn apply_edit(&self, draft: StockDraft) -> CoreResult<Self> {
        validate_stock_draft(&draft)?;

        let variants: Vec<StockVariant> = draft
            .variants
            .into_iter()
            .map(VariantDraft::into_variant)
            .collect();

        let mut updated = StockItem {
            id: self.id.clone(),
            name: draft.name.trim().to_string(),
            category: draft.category,
            description: draft.description,
            image_url: draft.image_url,
            purchase_date: self.purchase_date,
            initial_quantity: self.initial_quantity,
            current_quantity: 0,
            unit_cost_cents: draft.unit_cost_cents,
            total_cost_cents: self.total_cost_cents,
            variants,
        };
        updated.sync_current_quantity();
        Ok(updated)
    }

    /// Returns the acquisition cost per unit as Money.
    #[inline]
    pub fn unit_cost(&self) -> Money {
        Money::from_cents(self.unit_cost_cents)
    }

    /// Returns the frozen total acquisition cost as Money.
    #[inline]
    pub fn total_cost(&self) -> Money {
        Money::from_cents(self.total_cost_cents)
    }

    /// Current inventory value of this lot, at cost (not at sale price).
    #[inline]
    pub fn inventory_value(&self) -> Money {
        self.unit_cost().multiply_quantity(self.current_quantity)
    }

    /// Sum of quantities over all variants.
    pub fn variant_quantity_sum(&self) -> i64 {
        self.variants.iter().map(|v| v.quantity).sum()
    }

    /// The single canonical reconciliation point for the derived invariant:
    /// recomputes `current_quantity` from the variant list.
    ///
    /// Call after every structural change to `variants`. The one tolerated
    /// exception is the degraded refund path, which bypasses this on purpose
    /// (see `reconcile::refund`).
    pub fn sync_current_quantity(&mut self) {
        self.current_quantity = self.variant_quantity_sum();
    }

    /// Looks up a variant by id.
    pub fn find_variant(&self, variant_id: &str) -> Option<&StockVariant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// An immutable record of one variant's sale transaction, potentially one of
/// several emitted from a single multi-line sale.
///
/// The record is the system's financial ledger entry: it survives deletion of
/// the stock item or variant it references, and is destroyed only by an
/// explicit refund of this exact record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Weak back-reference to the sold stock item. May dangle after delete.
    pub stock_id: String,

    /// Weak back-reference to the sold variant. May dangle after an edit.
    pub variant_id: Option<String>,

    /// Size at time of sale (frozen).
    pub size: Option<String>,

    /// Color at time of sale (frozen).
    pub color: Option<String>,

    /// Quantity sold. Always positive.
    pub quantity_sold: i64,

    /// Unit sale price in cents at time of sale (frozen).
    pub sale_price_cents: i64,

    /// When the sale happened. Immutable.
    #[ts(as = "String")]
    pub sale_date: DateTime<Utc>,

    /// `quantity_sold × sale_price`, computed once and stored.
    pub total_revenue_cents: i64,

    /// `(sale_price − unit_cost at sale time) × quantity_sold`, computed once
    /// and stored. Later unit-cost edits never change it.
    pub profit_cents: i64,
}

impl SaleRecord {
    /// Returns the unit sale price as Money.
    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents)
    }

    /// Returns the frozen revenue as Money.
    #[inline]
    pub fn total_revenue(&self) -> Money {
        Money::from_cents(self.total_revenue_cents)
    }

    /// Returns the frozen profit as Money.
    #[inline]
    pub fn profit(&self) -> Money {
        Money::from_cents(self.profit_cents)
    }
}

// =============================================================================
// Input Types
// =============================================================================

/// One row of the sell form: which variant, how many, at what price.
///
/// Rows with `quantity <= 0` or a blank `variant_id` are treated as
/// "not entered" and discarded by the engine, not reported as errors.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleLineInput {
    pub variant_id: String,
    pub quantity: i64,
    pub price_per_unit_cents: i64,
}

/// One size/color row of the stock add/edit form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VariantDraft {
    /// Present when editing an existing row; keeps the variant's identity so
    /// prior sales still match it for refunds.
    pub id: Option<String>,
    pub size: String,
    pub color: String,
    pub quantity: i64,
}

impl VariantDraft {
    fn into_variant(self) -> StockVariant {
        StockVariant {
            id: self
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            size: self.size.trim().to_string(),
            color: self.color.trim().to_string(),
            quantity: self.quantity,
        }
    }
}

/// Operator input for adding or editing a stock item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockDraft {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub unit_cost_cents: i64,
    pub variants: Vec<VariantDraft>,
}

impl StockDraft {
    /// Merges a best-effort suggestion from the image-classification
    /// collaborator, filling only the fields the operator left blank.
    ///
    /// The collaborator is optional enrichment: absence or failure never
    /// blocks stock creation, and everything stays user-editable afterwards.
    pub fn apply_suggestion(&mut self, suggestion: &ItemSuggestion) {
        if self.name.trim().is_empty() {
            if let Some(name) = &suggestion.name {
                self.name = name.clone();
            }
        }
        if self.category.is_none() {
            self.category = suggestion.category.clone();
        }
        if self.description.is_none() {
            self.description = suggestion.description.clone();
        }
    }
}

/// Best-effort `{name, category, description}` triple returned by the
/// out-of-scope image-classification collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemSuggestion {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
