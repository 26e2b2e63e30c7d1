//! Document model for swerve drive configuration files.
//!
//! A configuration is a set of eight named JSON documents. Each document is
//! edited through a flat form whose field names encode the nesting of the
//! document (`field`, `group_field`, `group_subgroup_field`).

pub mod error;
pub mod field;
pub mod names;
pub mod numeric;
pub mod value;

pub use error::{ModelError, Result};
pub use field::{FIELD_SEPARATOR, FieldPath, is_bus_identifier, join_field_name};
pub use names::{DocumentName, MODULE_FILES};
pub use numeric::{coerce_field_text, is_numeric, parse_numeric};
pub use value::{Document, Value};
