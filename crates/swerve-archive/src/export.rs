//! Archive export.

use std::io::{Cursor, Write};

use swerve_model::DocumentName;
use tracing::{debug, info};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::Result;
use crate::manifest::{ARCHIVE_DIRECTORIES, ARCHIVE_MANIFEST};

/// Settings for writing an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub compression: CompressionMethod,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }
}

impl ExportOptions {
    #[must_use]
    pub fn with_compression(mut self, compression: CompressionMethod) -> Self {
        self.compression = compression;
        self
    }

    /// Store entries as-is.
    #[must_use]
    pub fn without_compression(self) -> Self {
        self.with_compression(CompressionMethod::Stored)
    }
}

/// Package the current text of every document into a zip archive.
///
/// `text_for` supplies the serialized text of each document; it is called
/// once per manifest entry, in archive order.
pub fn export_archive<F>(mut text_for: F, options: &ExportOptions) -> Result<Vec<u8>>
where
    F: FnMut(DocumentName) -> String,
{
    let file_options = SimpleFileOptions::default().compression_method(options.compression);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for directory in ARCHIVE_DIRECTORIES {
        writer.add_directory(directory, file_options)?;
    }

    for entry in &ARCHIVE_MANIFEST {
        let text = text_for(entry.document);
        writer.start_file(entry.path, file_options)?;
        writer.write_all(text.as_bytes())?;
        debug!(path = entry.path, bytes = text.len(), "wrote archive entry");
    }

    let bytes = writer.finish()?.into_inner();
    info!(
        documents = ARCHIVE_MANIFEST.len(),
        bytes = bytes.len(),
        "exported configuration archive"
    );
    Ok(bytes)
}
