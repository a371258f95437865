//! Error types for styled components.

use std::path::PathBuf;

/// Result type alias for styling operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while styling components.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The wrap target is not a tag, a component, or a styled component.
    #[error("`styled` takes either an element name or a component, got '{target}'")]
    InvalidWrapTarget { target: String },

    /// A styled component was rendered without a style injector in context.
    #[error("No style injector in render context; wrap the tree in a StyleProvider")]
    MissingInjector,

    /// A style document had an unexpected shape.
    #[error("Invalid style: {message}")]
    InvalidStyle { message: String },

    /// JSON syntax error in a style document.
    #[error("Failed to parse style JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error.
    #[error("Failed to read style file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an invalid wrap target error.
    pub fn invalid_wrap_target(target: impl Into<String>) -> Self {
        Self::InvalidWrapTarget {
            target: target.into(),
        }
    }

    /// Create an invalid style error.
    pub fn invalid_style(message: impl Into<String>) -> Self {
        Self::InvalidStyle {
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_target_message() {
        let err = Error::invalid_wrap_target("42");
        assert_eq!(
            err.to_string(),
            "`styled` takes either an element name or a component, got '42'"
        );
    }

    #[test]
    fn io_error_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::io("styles/app.json", source);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("styles/app.json"));
    }
}
