//! # Catalog Store
//!
//! Holds the set of stock items and their variants.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Store Operations                            │
//! │                                                                         │
//! │  Operator Action           Method              State Change             │
//! │  ───────────────           ──────              ────────────             │
//! │  Register a new lot ─────► add(draft) ───────► items.push(item)        │
//! │  Edit a lot ─────────────► edit(id, draft) ──► items[i] = replacement  │
//! │  Delete a lot ───────────► remove(id) ───────► items.remove(i)         │
//! │  Engine commit ──────────► replace(item) ────► items[i] = item         │
//! │                                                                         │
//! │  Insertion order is display order. Deleting an item does NOT cascade   │
//! │  to sale records - the ledger outlives the catalog by design.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use sole_core::types::{StockDraft, StockItem};

use crate::error::{StoreError, StoreResult};

/// In-memory store of stock items, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    items: Vec<StockItem>,
}

impl CatalogStore {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        CatalogStore { items: Vec::new() }
    }

    /// Registers a new stock lot from an operator draft.
    ///
    /// The draft is validated and the derived fields (`initial_quantity`,
    /// `current_quantity`, `total_cost`) are computed here, once, at
    /// creation time.
    pub fn add(&mut self, draft: StockDraft) -> StoreResult<&StockItem> {
        let item = StockItem::from_draft(draft)?;
        debug!(id = %item.id, name = %item.name, units = item.initial_quantity, "Adding stock item");

        let index = self.items.len();
        self.items.push(item);
        Ok(&self.items[index])
    }

    /// Replaces an item's editable fields from a draft.
    ///
    /// Preserves `id`, `purchase_date`, `initial_quantity`, and the frozen
    /// `total_cost`; recomputes `current_quantity` from the draft's variants.
    pub fn edit(&mut self, id: &str, draft: StockDraft) -> StoreResult<&StockItem> {
        let index = self.index_of(id)?;
        let updated = self.items[index].apply_edit(draft)?;
        debug!(id = %id, name = %updated.name, "Editing stock item");

        self.items[index] = updated;
        Ok(&self.items[index])
    }

    /// Removes an item from the catalog and returns it.
    ///
    /// No cascade: sale records referencing this item keep their (now
    /// dangling) `stock_id` permanently.
    pub fn remove(&mut self, id: &str) -> StoreResult<StockItem> {
        let index = self.index_of(id)?;
        debug!(id = %id, "Removing stock item");
        Ok(self.items.remove(index))
    }

    /// Commits a replacement item produced by the reconciliation engine.
    pub fn replace(&mut self, item: StockItem) -> StoreResult<()> {
        let index = self.index_of(&item.id)?;
        self.items[index] = item;
        Ok(())
    }

    /// Looks up an item by id.
    pub fn get(&self, id: &str) -> Option<&StockItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// All items, in insertion (display) order.
    pub fn items(&self) -> &[StockItem] {
        &self.items
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Wholesale replacement, used by backup import.
    pub(crate) fn replace_all(&mut self, items: Vec<StockItem>) {
        self.items = items;
    }

    fn index_of(&self, id: &str) -> StoreResult<usize> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| StoreError::not_found("Stock item", id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sole_core::types::VariantDraft;

    fn draft(name: &str) -> StockDraft {
        StockDraft {
            name: name.to_string(),
            unit_cost_cents: 9000,
            variants: vec![VariantDraft {
                id: None,
                size: "41".to_string(),
                color: "White".to_string(),
                quantity: 4,
            }],
            ..StockDraft::default()
        }
    }

    #[test]
    fn test_add_and_get() {
        let mut catalog = CatalogStore::new();
        let id = catalog.add(draft("Court Classic")).unwrap().id.clone();

        let item = catalog.get(&id).unwrap();
        assert_eq!(item.name, "Court Classic");
        assert_eq!(item.current_quantity, 4);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut catalog = CatalogStore::new();
        catalog.add(draft("First")).unwrap();
        catalog.add(draft("Second")).unwrap();
        catalog.add(draft("Third")).unwrap();

        let names: Vec<&str> = catalog.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let mut catalog = CatalogStore::new();
        catalog.add(draft("First")).unwrap();
        let id = catalog.add(draft("Second")).unwrap().id.clone();

        let mut edit = draft("Second, renamed");
        edit.unit_cost_cents = 12000;
        catalog.edit(&id, edit).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.items()[1].name, "Second, renamed");
        assert_eq!(catalog.items()[1].unit_cost_cents, 12000);
    }

    #[test]
    fn test_remove_unknown_id_errors() {
        let mut catalog = CatalogStore::new();
        assert!(matches!(
            catalog.remove("ghost"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_remove_returns_the_item() {
        let mut catalog = CatalogStore::new();
        let id = catalog.add(draft("Court Classic")).unwrap().id.clone();

        let removed = catalog.remove(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(catalog.is_empty());
    }
}
