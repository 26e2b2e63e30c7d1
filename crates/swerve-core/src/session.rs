//! The editing session: forms plus the text currently shown for each
//! document.
//!
//! Refreshing re-encodes every form and swaps in the new text only when it
//! changed. Importing reads the whole archive first, decodes every document
//! that loaded, then refreshes once.

use std::collections::BTreeMap;

use swerve_archive::{EntryOutcome, ExportOptions, export_archive, read_archive};
use swerve_form::{
    DecodeSummary, FormStore, VerifyReport, decode_document, encode_form_text, verify_form,
};
use swerve_model::{Document, DocumentName};
use tracing::{debug, info, info_span, warn};

use crate::error::Result;

/// How one document fared during an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    Applied(DecodeSummary),
    Missing,
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentImport {
    pub document: DocumentName,
    pub path: &'static str,
    pub status: ImportStatus,
}

/// Outcome of importing an archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub documents: Vec<DocumentImport>,
    /// Documents whose displayed text changed in the final refresh.
    pub changed: Vec<DocumentName>,
}

impl ImportReport {
    #[must_use]
    pub fn applied(&self) -> usize {
        self.documents
            .iter()
            .filter(|doc| matches!(doc.status, ImportStatus::Applied(_)))
            .count()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.documents
            .iter()
            .any(|doc| matches!(doc.status, ImportStatus::Malformed(_)))
    }
}

/// Owns the form store and the displayed text of every document.
#[derive(Debug)]
pub struct EditorSession<S> {
    store: S,
    displayed: BTreeMap<DocumentName, String>,
    export_options: ExportOptions,
}

impl<S: FormStore> EditorSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            displayed: BTreeMap::new(),
            export_options: ExportOptions::default(),
        }
    }

    #[must_use]
    pub fn with_export_options(mut self, options: ExportOptions) -> Self {
        self.export_options = options;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Text currently shown for a document; empty before the first refresh.
    #[must_use]
    pub fn displayed_text(&self, document: DocumentName) -> &str {
        self.displayed.get(&document).map_or("", String::as_str)
    }

    /// Re-encode one document. Returns true when its displayed text changed.
    pub fn refresh(&mut self, document: DocumentName) -> Result<bool> {
        let encoded = encode_form_text(&self.store, document.as_str())?;
        if self.displayed_text(document) == encoded.text {
            return Ok(false);
        }
        debug!(document = %document, "displayed text updated");
        self.displayed.insert(document, encoded.text);
        Ok(true)
    }

    /// Re-encode every document, returning those whose text changed.
    pub fn refresh_all(&mut self) -> Result<Vec<DocumentName>> {
        let mut changed = Vec::new();
        for document in DocumentName::ALL {
            if self.refresh(document)? {
                changed.push(document);
            }
        }
        Ok(changed)
    }

    /// Encode the current document for a form without touching the display.
    pub fn encode(&self, document: DocumentName) -> Result<Document> {
        Ok(encode_form_text(&self.store, document.as_str())?.document)
    }

    /// Refresh, then package the displayed text of every document.
    pub fn export_archive(&mut self) -> Result<Vec<u8>> {
        self.refresh_all()?;
        let displayed = &self.displayed;
        let bytes = export_archive(
            |document| displayed.get(&document).cloned().unwrap_or_default(),
            &self.export_options,
        )?;
        Ok(bytes)
    }

    /// Import an archive into the forms.
    ///
    /// An archive that cannot be opened is an error and nothing changes.
    /// Otherwise absent entries leave their forms alone, malformed entries
    /// are reported and skipped, and every loaded document is decoded before
    /// a single refresh of all documents.
    pub fn import_archive(&mut self, bytes: &[u8]) -> Result<ImportReport> {
        let span = info_span!("import", bytes = bytes.len());
        let _guard = span.enter();

        let contents = read_archive(bytes)?;
        let mut report = ImportReport::default();

        for entry in contents.entries {
            let status = match entry.outcome {
                EntryOutcome::Loaded(document) => ImportStatus::Applied(decode_document(
                    &mut self.store,
                    entry.document.as_str(),
                    &document,
                )),
                EntryOutcome::Missing => ImportStatus::Missing,
                EntryOutcome::Malformed(reason) => {
                    warn!(path = entry.path, "skipping malformed document");
                    ImportStatus::Malformed(reason)
                }
            };
            report.documents.push(DocumentImport {
                document: entry.document,
                path: entry.path,
                status,
            });
        }

        report.changed = self.refresh_all()?;
        info!(
            applied = report.applied(),
            changed = report.changed.len(),
            "import complete"
        );
        Ok(report)
    }

    /// Decode reference documents into their forms and check every field
    /// took the expected value.
    pub fn verify_documents(
        &mut self,
        documents: &[(DocumentName, Document)],
    ) -> Result<Vec<VerifyReport>> {
        let mut reports = Vec::with_capacity(documents.len());
        for (name, document) in documents {
            decode_document(&mut self.store, name.as_str(), document);
            let report = verify_form(&self.store, name.as_str(), document);
            info!(
                document = %name,
                passed = report.passed(),
                failed = report.failed(),
                "verified document"
            );
            reports.push(report);
        }
        self.refresh_all()?;
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swerve_form::{FormField, MemoryFormStore};

    fn session() -> EditorSession<MemoryFormStore> {
        let store = MemoryFormStore::new()
            .with_form(
                "swervedrive",
                vec![
                    FormField::text("maxSpeed", "4.5"),
                    FormField::text("imu_type", "pigeon2"),
                    FormField::text("imu_id", "13"),
                    FormField::text("imu_canbus", "").with_explicit_null(true),
                    FormField::checkbox("invertedIMU", false),
                ],
            )
            .with_form(
                "pidfproperties",
                vec![
                    FormField::text("drive_p", "0.0020645"),
                    FormField::text("drive_iz", "0"),
                    FormField::text("angle_p", "0.01"),
                ],
            );
        EditorSession::new(store)
    }

    #[test]
    fn refresh_only_reports_changes() {
        let mut session = session();
        assert_eq!(session.refresh_all().unwrap().len(), DocumentName::ALL.len());
        assert!(session.refresh_all().unwrap().is_empty());

        session
            .store_mut()
            .field_mut("pidfproperties", "angle_p")
            .unwrap()
            .value = "0.02".to_string();
        assert_eq!(
            session.refresh_all().unwrap(),
            vec![DocumentName::PidfProperties]
        );
        assert!(
            session
                .displayed_text(DocumentName::PidfProperties)
                .contains("0.02")
        );
    }

    #[test]
    fn drivetrain_text() {
        let mut session = session();
        session.refresh(DocumentName::SwerveDrive).unwrap();
        insta::assert_snapshot!(session.displayed_text(DocumentName::SwerveDrive), @r#"
        {
          "maxSpeed": 4.5,
          "imu": {
            "type": "pigeon2",
            "id": 13,
            "canbus": null
          },
          "invertedIMU": false,
          "modules": [
            "frontleft.json",
            "frontright.json",
            "backleft.json",
            "backright.json"
          ]
        }
        "#);
    }

    #[test]
    fn unopenable_archive_changes_nothing() {
        let mut session = session();
        session.refresh_all().unwrap();
        let before = session.store().clone();
        assert!(session.import_archive(b"PK\x03\x04 broken").is_err());
        assert_eq!(session.store(), &before);
    }
}
