//! # Validation Module
//!
//! Input validation for stock drafts and sale lines.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust)                                           │
//! │  ├── Draft validation before a StockItem is built                      │
//! │  └── Price sanity on sale lines                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Reconciliation engine                                        │
//! │  └── Stock-level checks (unknown variant, insufficient stock)          │
//! │                                                                         │
//! │  Defense in depth: each layer catches different errors                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Size and color are deliberately NOT validated here: they are free-text
//! attributes straight off the supplier's box, and `(size, color)` uniqueness
//! within an item is a caller responsibility, not a model rule.

use crate::error::ValidationError;
use crate::types::StockDraft;
use crate::MAX_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a stock item name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a unit cost in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (donated or promotional stock)
pub fn validate_unit_cost_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit cost".to_string(),
        });
    }

    Ok(())
}

/// Validates a sale price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (giveaways still reduce stock and record negative profit)
pub fn validate_sale_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "sale price".to_string(),
        });
    }

    Ok(())
}

/// Validates a variant quantity on a draft row.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed: an operator may register a size that is sold out at
///   acquisition time, or zero out a row during an edit
pub fn validate_variant_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Draft Validator
// =============================================================================

/// Validates a whole stock draft before a StockItem is built from it.
pub fn validate_stock_draft(draft: &StockDraft) -> ValidationResult<()> {
    validate_item_name(&draft.name)?;
    validate_unit_cost_cents(draft.unit_cost_cents)?;

    for variant in &draft.variants {
        validate_variant_quantity(variant.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
