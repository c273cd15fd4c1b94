//! Error types for the board engine

use std::path::PathBuf;
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board commands, configuration and seed loading.
///
/// The drag engine never produces these: stale or ineligible gestures are
/// no-ops, not errors.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Item (card, spacer or stack) not found
    #[error("item not found: {id}")]
    ItemNotFound { id: String },

    /// The id resolves, but to the wrong kind of item
    #[error("{id} is not a {expected}")]
    WrongKind { id: String, expected: &'static str },

    /// Duplicate ID
    #[error("duplicate {item_type} ID: {id}")]
    DuplicateId { item_type: String, id: String },

    /// A stack holding fewer than two cards
    #[error("stack '{id}' has {count} cards, at least 2 are required")]
    InvalidStack { id: String, count: usize },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Seed file with an extension we cannot parse
    #[error("unsupported board file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// The async session task is gone
    #[error("board session has shut down")]
    SessionClosed,

    /// Configuration extraction failed
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl BoardError {
    /// Create an item-not-found error
    pub fn not_found(id: impl ToString) -> Self {
        Self::ItemNotFound { id: id.to_string() }
    }

    /// Create a wrong-kind error
    pub fn wrong_kind(id: impl ToString, expected: &'static str) -> Self {
        Self::WrongKind {
            id: id.to_string(),
            expected,
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate ID error
    pub fn duplicate_id(item_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            item_type: item_type.into(),
            id: id.into(),
        }
    }

    /// Check if this error means the referenced entity is gone
    pub fn is_stale_reference(&self) -> bool {
        matches!(self, Self::ColumnNotFound { .. } | Self::ItemNotFound { .. })
    }
}

impl From<figment::Error> for BoardError {
    fn from(error: figment::Error) -> Self {
        Self::Config(Box::new(error))
    }
}
