//! Zip import and export of a full swerve drive configuration.
//!
//! The archive layout is fixed by [`ARCHIVE_MANIFEST`]: two files under
//! `swerve/` and six under `swerve/modules/`.

pub mod error;
pub mod export;
pub mod import;
pub mod manifest;

pub use error::{ArchiveError, Result};
pub use export::{ExportOptions, export_archive};
pub use import::{ArchiveContents, EntryOutcome, ImportedEntry, read_archive};
pub use manifest::{
    ARCHIVE_DIRECTORIES, ARCHIVE_MANIFEST, ARCHIVE_ROOT, DEFAULT_ARCHIVE_NAME, ManifestEntry,
    archive_path, reference_path,
};
