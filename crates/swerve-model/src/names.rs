//! The eight documents that make up a swerve drive configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// File names listed under `modules` in the drivetrain document, in the
/// order the drivetrain expects them.
pub const MODULE_FILES: [&str; 4] = [
    "frontleft.json",
    "frontright.json",
    "backleft.json",
    "backright.json",
];

/// Name of a configuration document and of the form that edits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentName {
    SwerveDrive,
    PhysicalProperties,
    FrontLeft,
    FrontRight,
    BackLeft,
    BackRight,
    ControllerProperties,
    PidfProperties,
}

impl DocumentName {
    /// All documents in refresh order.
    pub const ALL: [DocumentName; 8] = [
        Self::SwerveDrive,
        Self::PhysicalProperties,
        Self::FrontLeft,
        Self::FrontRight,
        Self::BackLeft,
        Self::BackRight,
        Self::ControllerProperties,
        Self::PidfProperties,
    ];

    /// Form and document name as used in field stores and file names.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SwerveDrive => "swervedrive",
            Self::PhysicalProperties => "physicalproperties",
            Self::FrontLeft => "frontleft",
            Self::FrontRight => "frontright",
            Self::BackLeft => "backleft",
            Self::BackRight => "backright",
            Self::ControllerProperties => "controllerproperties",
            Self::PidfProperties => "pidfproperties",
        }
    }

    /// Look up a document by its form name.
    #[must_use]
    pub fn from_form(form: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.as_str() == form)
    }

    /// Whether this is the top-level drivetrain document.
    #[must_use]
    pub const fn is_drivetrain(&self) -> bool {
        matches!(self, Self::SwerveDrive)
    }

    /// Whether this document describes a single physical module.
    #[must_use]
    pub const fn is_module(&self) -> bool {
        matches!(
            self,
            Self::FrontLeft | Self::FrontRight | Self::BackLeft | Self::BackRight
        )
    }
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_form(&s.to_ascii_lowercase())
            .ok_or_else(|| ModelError::UnknownDocument(s.to_string()))
    }
}
