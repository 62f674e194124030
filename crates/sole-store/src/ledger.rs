//! # Sales Ledger
//!
//! The ordered, append-mostly list of sale records, the system's source of
//! truth for financial history.
//!
//! Records arrive in batches (one multi-line sale emits several) and leave
//! one at a time, only through an explicit refund of that exact record.
//! Nothing else ever mutates a record: revenue and profit were frozen at
//! sale time and stay frozen.

use tracing::debug;

use sole_core::types::SaleRecord;

/// In-memory sales ledger, in recording order.
#[derive(Debug, Clone, Default)]
pub struct SalesLedger {
    records: Vec<SaleRecord>,
}

impl SalesLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        SalesLedger {
            records: Vec::new(),
        }
    }

    /// Appends a batch of records emitted by one sale.
    pub fn append(&mut self, records: Vec<SaleRecord>) {
        debug!(count = records.len(), "Appending sale records");
        self.records.extend(records);
    }

    /// Removes a record by id (refund path). Returns the removed record,
    /// or `None` when there is nothing to refund.
    pub fn remove(&mut self, id: &str) -> Option<SaleRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        debug!(id = %id, "Removing sale record");
        Some(self.records.remove(index))
    }

    /// Looks up a record by id.
    pub fn get(&self, id: &str) -> Option<&SaleRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// All records, in recording order.
    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    /// Number of records in the ledger.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Wholesale replacement, used by backup import.
    pub(crate) fn replace_all(&mut self, records: Vec<SaleRecord>) {
        self.records = records;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: &str) -> SaleRecord {
        SaleRecord {
            id: id.to_string(),
            stock_id: "s1".to_string(),
            variant_id: Some("v1".to_string()),
            size: Some("42".to_string()),
            color: Some("Black".to_string()),
            quantity_sold: 1,
            sale_price_cents: 20000,
            sale_date: Utc::now(),
            total_revenue_cents: 20000,
            profit_cents: 5000,
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let mut ledger = SalesLedger::new();
        ledger.append(vec![record("a"), record("b")]);
        ledger.append(vec![record("c")]);

        let ids: Vec<&str> = ledger.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_by_id() {
        let mut ledger = SalesLedger::new();
        ledger.append(vec![record("a"), record("b")]);

        let removed = ledger.remove("a").unwrap();
        assert_eq!(removed.id, "a");
        assert_eq!(ledger.len(), 1);
        assert!(ledger.get("a").is_none());
    }

    #[test]
    fn test_remove_unknown_is_none() {
        let mut ledger = SalesLedger::new();
        assert!(ledger.remove("ghost").is_none());
    }
}
