use std::path::PathBuf;

use anyhow::Result;
use swerve_archive::{ARCHIVE_MANIFEST, DEFAULT_ARCHIVE_NAME, ExportOptions};
use swerve_cli::workflow::{
    encode_documents, export_to_file, import_from_file, load_forms, verify_against,
};
use tracing::info;

use crate::cli::{EncodeArgs, ExportArgs, ImportArgs, VerifyArgs};
use crate::summary::{print_documents, print_import_report, print_verify_reports};

/// Print encoded documents. Always succeeds once encoded.
pub fn run_encode(args: &EncodeArgs) -> Result<bool> {
    let store = load_forms(&args.forms)?;
    let encoded = encode_documents(store, args.document)?;
    if args.document.is_some() {
        for (_, text) in &encoded {
            println!("{text}");
        }
    } else {
        for (document, text) in &encoded {
            println!("// {}", swerve_archive::archive_path(*document));
            println!("{text}");
        }
    }
    Ok(true)
}

pub fn run_export(args: &ExportArgs) -> Result<bool> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE_NAME));
    let options = if args.no_compress {
        ExportOptions::default().without_compression()
    } else {
        ExportOptions::default()
    };
    let bytes = export_to_file(&args.forms, &output, options)?;
    println!(
        "Wrote {} documents ({bytes} bytes) to {}",
        ARCHIVE_MANIFEST.len(),
        output.display()
    );
    Ok(true)
}

/// Import an archive. Fails the run when any entry was malformed.
pub fn run_import(args: &ImportArgs) -> Result<bool> {
    let outcome = import_from_file(&args.forms, &args.archive, args.output.as_deref())?;
    print_import_report(&outcome.report);
    println!("Forms saved to {}", outcome.saved_to.display());
    Ok(!outcome.report.has_errors())
}

/// Run the verification harness. Fails the run when any check failed.
pub fn run_verify(args: &VerifyArgs) -> Result<bool> {
    let reports = verify_against(&args.forms, &args.reference_dir)?;
    print_verify_reports(&reports);
    let failed: usize = reports.iter().map(swerve_form::VerifyReport::failed).sum();
    info!(failed, "verification finished");
    Ok(failed == 0)
}

pub fn run_documents() -> Result<bool> {
    print_documents();
    Ok(true)
}
