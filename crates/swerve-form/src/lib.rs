//! Mapping between flat forms and nested configuration documents.
//!
//! [`encode_form`] reads a form from a [`FormStore`] and builds a
//! [`Document`](swerve_model::Document); [`decode_document`] writes a
//! document back into the form. [`verify_form`] checks that a decoded form
//! holds what the document says.

pub mod decode;
pub mod encode;
pub mod store;
pub mod verify;

pub use decode::{DecodeSummary, decode_document, leaf_write};
pub use encode::{EncodedDocument, encode_form, encode_form_text, field_value};
pub use store::{FieldKind, FieldWrite, FormField, FormStore, MemoryFormStore};
pub use verify::{CheckOutcome, FieldCheck, VerifyReport, verify_form};
