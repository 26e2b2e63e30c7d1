//! File-based workflows behind the CLI commands.
//!
//! Each workflow loads the forms file into an [`EditorSession`], runs one
//! operation, and writes any results back to disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use swerve_archive::{ExportOptions, reference_path};
use swerve_core::{EditorSession, ImportReport, SessionError};
use swerve_form::{MemoryFormStore, VerifyReport};
use swerve_model::{Document, DocumentName};
use tracing::{info, info_span};

/// Read a forms file.
pub fn load_forms(path: &Path) -> Result<MemoryFormStore> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read forms file {}", path.display()))?;
    MemoryFormStore::from_json_str(&text)
        .with_context(|| format!("parse forms file {}", path.display()))
}

/// Write a forms file.
pub fn save_forms(path: &Path, store: &MemoryFormStore) -> Result<()> {
    let text = store.to_json_text().context("serialize forms")?;
    fs::write(path, text).with_context(|| format!("write forms file {}", path.display()))
}

/// Encoded text of one document, or of all of them in refresh order.
pub fn encode_documents(
    store: MemoryFormStore,
    only: Option<DocumentName>,
) -> Result<Vec<(DocumentName, String)>> {
    let mut session = EditorSession::new(store);
    session.refresh_all().context("encode documents")?;
    let documents: Vec<DocumentName> = match only {
        Some(document) => vec![document],
        None => DocumentName::ALL.to_vec(),
    };
    Ok(documents
        .into_iter()
        .map(|document| (document, session.displayed_text(document).to_string()))
        .collect())
}

/// Export the forms as a zip archive. Returns the archive size in bytes.
pub fn export_to_file(forms: &Path, output: &Path, options: ExportOptions) -> Result<usize> {
    let span = info_span!("export", output = %output.display());
    let _guard = span.enter();

    let mut session = EditorSession::new(load_forms(forms)?).with_export_options(options);
    let bytes = session.export_archive().context("build archive")?;
    fs::write(output, &bytes).with_context(|| format!("write archive {}", output.display()))?;
    info!(bytes = bytes.len(), "archive written");
    Ok(bytes.len())
}

/// Result of importing an archive into a forms file.
#[derive(Debug)]
pub struct ImportOutcome {
    pub report: ImportReport,
    pub saved_to: PathBuf,
}

/// Import an archive into a forms file, saving to `output` or in place.
pub fn import_from_file(
    forms: &Path,
    archive: &Path,
    output: Option<&Path>,
) -> Result<ImportOutcome> {
    let bytes =
        fs::read(archive).with_context(|| format!("read archive {}", archive.display()))?;
    let mut session = EditorSession::new(load_forms(forms)?);
    let report = session
        .import_archive(&bytes)
        .map_err(|err| {
            let hint = match &err {
                SessionError::Archive(archive_err) => archive_err.user_message().to_string(),
                SessionError::Model(_) => "Failed to encode the imported forms.".to_string(),
            };
            anyhow::Error::new(err).context(hint)
        })
        .with_context(|| format!("import {}", archive.display()))?;

    let saved_to = output.unwrap_or(forms).to_path_buf();
    save_forms(&saved_to, session.store())?;
    Ok(ImportOutcome { report, saved_to })
}

/// Load the eight reference documents from an extracted `swerve/`
/// directory. Every document must be present.
pub fn load_reference_documents(dir: &Path) -> Result<Vec<(DocumentName, Document)>> {
    DocumentName::ALL
        .into_iter()
        .map(|document| {
            let path = dir.join(reference_path(document));
            let text = fs::read_to_string(&path)
                .with_context(|| format!("read reference {}", path.display()))?;
            let parsed = Document::from_json_str(&text)
                .with_context(|| format!("parse reference {}", path.display()))?;
            Ok((document, parsed))
        })
        .collect()
}

/// Decode the reference documents into the forms and check every field.
pub fn verify_against(forms: &Path, reference_dir: &Path) -> Result<Vec<VerifyReport>> {
    let documents = load_reference_documents(reference_dir)?;
    let mut session = EditorSession::new(load_forms(forms)?);
    session
        .verify_documents(&documents)
        .context("verify documents")
}
