//! Error types for schema lookups.

use thiserror::Error;

/// Error type for schema lookups.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Referenced type is neither declared nor a built-in primitive.
    #[error("type '{name}' referenced by '{referenced_by}' not found")]
    TypeNotFound {
        /// Type name.
        name: String,
        /// Entity holding the reference.
        referenced_by: String,
    },
}

impl SchemaError {
    /// Creates a type not found error.
    pub fn type_not_found(name: impl Into<String>, referenced_by: impl Into<String>) -> Self {
        Self::TypeNotFound {
            name: name.into(),
            referenced_by: referenced_by.into(),
        }
    }
}
