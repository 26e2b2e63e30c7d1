//! Error types for archive packaging.

use swerve_model::ModelError;
use thiserror::Error;

/// Errors that abort a whole import or export.
///
/// Problems with a single archive entry are not errors; they are reported
/// per entry in [`ArchiveContents`](crate::ArchiveContents).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArchiveError {
    /// The zip container could not be read or written.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error while writing archive contents.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be serialized.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ArchiveError {
    /// Returns a short message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Zip(_) => "Failed to read ZIP file. See the log for details.",
            Self::Io(_) => "Could not write the archive.",
            Self::Model(_) => "A configuration document could not be serialized.",
        }
    }
}

/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;
