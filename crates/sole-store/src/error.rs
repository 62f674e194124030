//! # Store Error Types
//!
//! Error types for state-container and persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (sole-core)          io::Error / serde_json::Error          │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  StoreError (this module) ← adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller/UI displays a user-facing message                              │
//! │                                                                         │
//! │  Sale-path errors reject the whole batch. Storage errors are           │
//! │  surfaced for acknowledgment and never roll back the in-memory        │
//! │  snapshot - memory stays the source of truth.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use sole_core::CoreError;

/// State-container and persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the shop state.
    ///
    /// ## When This Occurs
    /// - Selling against a stock id that was deleted
    /// - Editing an item removed on another screen
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Imported backup document doesn't have the required shape.
    ///
    /// ## When This Occurs
    /// - `stocks` field missing, or present but not a sequence
    /// - The file isn't JSON at all
    /// - An entry can't be decoded into an entity (import is all-or-nothing)
    #[error("Malformed backup document: {0}")]
    MalformedBackup(String),

    /// Persistence write failed because the backend is out of room.
    ///
    /// Surfaced to the user, not treated as data loss: the in-memory state
    /// is untouched and remains the source of truth.
    #[error("Storage quota exceeded while saving '{key}'")]
    QuotaExceeded { key: String },

    /// Persistence backend I/O failure other than quota.
    #[error("Storage I/O failed: {0}")]
    Io(String),

    /// Serializing the snapshot or backup document failed.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Reconciliation error (wraps CoreError).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a MalformedBackup error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        StoreError::MalformedBackup(reason.into())
    }
}

/// Convert I/O errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// ErrorKind::StorageFull → StoreError::QuotaExceeded (key filled by caller)
/// Other                  → StoreError::Io
/// ```
/// The quota variant is mapped where the key is known (see `FileStore`);
/// this blanket conversion covers the rest.
impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::not_found("Stock item", "abc");
        assert_eq!(err.to_string(), "Stock item not found: abc");

        let err = StoreError::QuotaExceeded {
            key: "shop".to_string(),
        };
        assert_eq!(err.to_string(), "Storage quota exceeded while saving 'shop'");
    }

    #[test]
    fn test_core_error_passes_through() {
        let err: StoreError = CoreError::EmptySale.into();
        assert_eq!(err.to_string(), "Sale has no valid line items");
    }
}
