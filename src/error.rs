//! Error types for inlining operations
//!
//! Every failure that aborts a run is a variant of [`InlinerError`]. Benign
//! conditions (a reference to an asset that was never captured, a text file
//! that is not UTF-8) are handled where they occur and never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for inlining operations
pub type InlinerResult<T> = Result<T, InlinerError>;

/// Error types for inlining operations
#[derive(Debug, Error)]
pub enum InlinerError {
    /// The asset directory could not be listed
    #[error("Failed to read asset directory {}: {source}", path.display())]
    AssetDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single asset could not be read
    #[error("Failed to read asset {}: {source}", path.display())]
    AssetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The explicitly requested inline file has no `<html>` root element
    #[error("The file '{0}' does not seem to be an html file")]
    NotHtml(String),

    /// The explicitly requested inline file is not in the asset directory
    #[error("The file '{0}' was not found in the asset directory")]
    InlineFileNotFound(String),

    /// No HTML document was found anywhere in the asset directory
    #[error("Could not find any html file to inline in folder: {}", .0.display())]
    NoDocument(PathBuf),

    /// A stylesheet imports itself, directly or through other stylesheets
    #[error("Cyclic @import detected: {}", chain.join(" -> "))]
    CyclicImport { chain: Vec<String> },

    /// The rewritten document could not be serialized
    #[error("Failed to serialize document: {0}")]
    Serialize(#[source] std::io::Error),
}

impl InlinerError {
    /// Check if the error was caused by the contents of the asset directory
    /// rather than by the filesystem
    #[must_use]
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            InlinerError::NotHtml(_)
                | InlinerError::NoDocument(_)
                | InlinerError::CyclicImport { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic_import_message_shows_chain() {
        let err = InlinerError::CyclicImport {
            chain: vec!["a.css".into(), "b.css".into(), "a.css".into()],
        };
        assert_eq!(
            err.to_string(),
            "Cyclic @import detected: a.css -> b.css -> a.css"
        );
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_io_errors_are_not_malformed_input() {
        let err = InlinerError::AssetRead {
            path: PathBuf::from("/tmp/x.png"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!err.is_malformed_input());
        assert!(err.to_string().contains("/tmp/x.png"));
    }
}
