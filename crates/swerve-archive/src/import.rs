//! Archive import.
//!
//! Every mapped path is read and parsed before anything is handed back, and
//! each entry succeeds or fails on its own: a missing or malformed entry
//! never stops the others.

use std::io::{Cursor, Read, Seek};

use swerve_model::{Document, DocumentName};
use tracing::{debug, error, info};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::Result;
use crate::manifest::ARCHIVE_MANIFEST;

/// What was found at one mapped path.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    Loaded(Document),
    /// The path is absent; the document is left as it is.
    Missing,
    /// The entry exists but could not be read or is not a JSON object.
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedEntry {
    pub document: DocumentName,
    pub path: &'static str,
    pub outcome: EntryOutcome,
}

/// Parsed contents of an archive, one entry per manifest path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchiveContents {
    pub entries: Vec<ImportedEntry>,
}

impl ArchiveContents {
    pub fn loaded(&self) -> impl Iterator<Item = (DocumentName, &Document)> {
        self.entries.iter().filter_map(|entry| match &entry.outcome {
            EntryOutcome::Loaded(document) => Some((entry.document, document)),
            _ => None,
        })
    }

    pub fn missing(&self) -> impl Iterator<Item = &ImportedEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.outcome == EntryOutcome::Missing)
    }

    pub fn malformed(&self) -> impl Iterator<Item = &ImportedEntry> {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.outcome, EntryOutcome::Malformed(_)))
    }

    #[must_use]
    pub fn outcome(&self, document: DocumentName) -> Option<&EntryOutcome> {
        self.entries
            .iter()
            .find(|entry| entry.document == document)
            .map(|entry| &entry.outcome)
    }
}

/// Open an archive and parse every mapped document in it.
///
/// Fails only when the archive itself cannot be opened.
pub fn read_archive(bytes: &[u8]) -> Result<ArchiveContents> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    debug!(entries = archive.len(), "opened configuration archive");

    let entries: Vec<ImportedEntry> = ARCHIVE_MANIFEST
        .iter()
        .map(|entry| {
            let outcome = read_entry(&mut archive, entry.path);
            match &outcome {
                EntryOutcome::Loaded(document) => {
                    debug!(path = entry.path, keys = document.len(), "parsed archive entry");
                }
                EntryOutcome::Missing => debug!(path = entry.path, "archive entry absent"),
                EntryOutcome::Malformed(reason) => {
                    error!(path = entry.path, error = %reason, "failed to parse archive entry");
                }
            }
            ImportedEntry {
                document: entry.document,
                path: entry.path,
                outcome,
            }
        })
        .collect();

    let contents = ArchiveContents { entries };
    info!(
        loaded = contents.loaded().count(),
        missing = contents.missing().count(),
        malformed = contents.malformed().count(),
        "read configuration archive"
    );
    Ok(contents)
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> EntryOutcome {
    let mut file = match archive.by_name(path) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return EntryOutcome::Missing,
        Err(err) => return EntryOutcome::Malformed(err.to_string()),
    };

    let mut text = String::new();
    if let Err(err) = file.read_to_string(&mut text) {
        return EntryOutcome::Malformed(err.to_string());
    }

    match Document::from_json_str(&text) {
        Ok(document) => EntryOutcome::Loaded(document),
        Err(err) => EntryOutcome::Malformed(err.to_string()),
    }
}
