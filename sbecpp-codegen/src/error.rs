//! Error types for code generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Output directory creation or artifact write failed.
    #[error("IO error on '{}': {source}", .path.display())]
    Io {
        /// Path being created or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Unknown type reference.
    #[error("unknown type '{type_name}' referenced by '{referenced_by}'")]
    UnknownType {
        /// Type name.
        type_name: String,
        /// Entity holding the reference.
        referenced_by: String,
    },

    /// Two entities map to the same artifact, the same artifact name up to
    /// case, or the same include guard.
    #[error("'{first}' and '{second}' collide on '{artifact}'")]
    ArtifactCollision {
        /// Shared artifact name, case-folded name or include guard.
        artifact: String,
        /// First entity.
        first: String,
        /// Second entity.
        second: String,
    },

    /// Renderer failure.
    #[error("failed to render '{artifact}': {message}")]
    Render {
        /// Artifact being rendered.
        artifact: String,
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a render error.
    pub fn render(artifact: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            artifact: artifact.into(),
            message: message.into(),
        }
    }
}

impl From<sbecpp_schema::SchemaError> for CodegenError {
    fn from(err: sbecpp_schema::SchemaError) -> Self {
        match err {
            sbecpp_schema::SchemaError::TypeNotFound {
                name,
                referenced_by,
            } => Self::UnknownType {
                type_name: name,
                referenced_by,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_maps_to_unknown_type() {
        let err: CodegenError = sbecpp_schema::SchemaError::type_not_found("Px", "Quote").into();
        assert!(matches!(
            &err,
            CodegenError::UnknownType { type_name, referenced_by }
                if type_name == "Px" && referenced_by == "Quote"
        ));
        assert_eq!(err.to_string(), "unknown type 'Px' referenced by 'Quote'");
    }

    #[test]
    fn test_io_error_names_path() {
        let err = CodegenError::io(
            "/out/Shape.h",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/out/Shape.h"));
    }
}
