//! Editor session for swerve drive configurations.

pub mod error;
pub mod session;

pub use error::{Result, SessionError};
pub use session::{DocumentImport, EditorSession, ImportReport, ImportStatus};
