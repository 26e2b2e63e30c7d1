//! Fixed mapping between documents and archive paths.

use swerve_model::DocumentName;

/// Top-level directory of every archive.
pub const ARCHIVE_ROOT: &str = "swerve/";

/// Directory entries written ahead of the files, parents first.
pub const ARCHIVE_DIRECTORIES: [&str; 2] = ["swerve/", "swerve/modules/"];

/// File name offered when saving an exported archive.
pub const DEFAULT_ARCHIVE_NAME: &str = "YAGSL Config.zip";

/// One document's location inside the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestEntry {
    pub path: &'static str,
    pub document: DocumentName,
}

const fn entry(path: &'static str, document: DocumentName) -> ManifestEntry {
    ManifestEntry { path, document }
}

/// Every document and its archive path, in archive order.
pub const ARCHIVE_MANIFEST: [ManifestEntry; 8] = [
    entry(
        "swerve/controllerproperties.json",
        DocumentName::ControllerProperties,
    ),
    entry("swerve/swervedrive.json", DocumentName::SwerveDrive),
    entry(
        "swerve/modules/physicalproperties.json",
        DocumentName::PhysicalProperties,
    ),
    entry("swerve/modules/frontleft.json", DocumentName::FrontLeft),
    entry("swerve/modules/frontright.json", DocumentName::FrontRight),
    entry("swerve/modules/backleft.json", DocumentName::BackLeft),
    entry("swerve/modules/backright.json", DocumentName::BackRight),
    entry(
        "swerve/modules/pidfproperties.json",
        DocumentName::PidfProperties,
    ),
];

/// Archive path of a document.
#[must_use]
pub fn archive_path(document: DocumentName) -> &'static str {
    ARCHIVE_MANIFEST
        .iter()
        .find(|entry| entry.document == document)
        .map_or("", |entry| entry.path)
}

/// Path of a document relative to an extracted `swerve/` directory, such as
/// `modules/frontleft.json`.
#[must_use]
pub fn reference_path(document: DocumentName) -> &'static str {
    let path = archive_path(document);
    path.strip_prefix(ARCHIVE_ROOT).unwrap_or(path)
}
