//! # Error Types
//!
//! Domain-specific error types for sole-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sole-core errors (this file)                                          │
//! │  ├── CoreError        - Reconciliation failures (sale path)            │
//! │  └── ValidationError  - Input validation failures (drafts)             │
//! │                                                                         │
//! │  sole-store errors (separate crate)                                    │
//! │  └── StoreError       - Backup/storage failures                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → caller/UI            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (variant id, quantities, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core reconciliation errors.
///
/// Every sale-path error rejects the whole batch: a sale attempt either
/// applies all of its lines or none of them.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A sale attempt contained no usable line items.
    ///
    /// ## When This Occurs
    /// - Every line had quantity <= 0 or a blank variant id
    /// - The operator submitted an untouched sale form
    #[error("Sale has no valid line items")]
    EmptySale,

    /// A sale line references a variant that does not exist on the item.
    ///
    /// ## When This Occurs
    /// - The variant row was deleted by an edit while the sale form was open
    /// - A stale id arrived from an imported backup
    #[error("Unknown variant: {variant_id}")]
    UnknownVariant { variant_id: String },

    /// Requested quantity exceeds what the variant has in stock.
    ///
    /// ## When This Occurs
    /// - Multiple lines for the same variant sum past its quantity
    /// - The stock level changed since the operator last looked
    ///
    /// ## User Workflow
    /// ```text
    /// Sell (size 42 / Black, qty: 5)
    ///      │
    ///      ▼
    /// Check variant stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { size: "42", color: "Black", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 left in 42/Black"
    /// ```
    #[error("Insufficient stock for {size}/{color}: available {available}, requested {requested}")]
    InsufficientStock {
        variant_id: String,
        size: String,
        color: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a stock draft or sale input doesn't meet
/// requirements. Used for early validation before reconciliation runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
