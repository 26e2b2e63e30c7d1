//! Document to form decoding.

use swerve_model::{Document, Value, is_bus_identifier, join_field_name};
use tracing::debug;

use crate::store::{FieldKind, FieldWrite, FormStore};

/// What a decode pass did to a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Number of fields written.
    pub written: usize,
    /// Flattened names with no matching field in the form.
    pub missing: Vec<String>,
}

/// Write every leaf of `document` into the matching field of `form`.
///
/// Nested documents are flattened into `group_subgroup_field` names at any
/// depth; lists flatten with their index as the key. Leaves without a
/// matching field are skipped.
pub fn decode_document<S: FormStore + ?Sized>(
    store: &mut S,
    form: &str,
    document: &Document,
) -> DecodeSummary {
    let mut summary = DecodeSummary::default();
    decode_entries(store, form, "", document, &mut summary);
    debug!(
        form,
        written = summary.written,
        missing = summary.missing.len(),
        "decoded document"
    );
    summary
}

fn decode_entries<S: FormStore + ?Sized>(
    store: &mut S,
    form: &str,
    prefix: &str,
    document: &Document,
    summary: &mut DecodeSummary,
) {
    for (key, value) in document.iter() {
        decode_value(store, form, join_field_name(prefix, key), value, summary);
    }
}

fn decode_value<S: FormStore + ?Sized>(
    store: &mut S,
    form: &str,
    name: String,
    value: &Value,
    summary: &mut DecodeSummary,
) {
    match value {
        Value::Nested(nested) => decode_entries(store, form, &name, nested, summary),
        Value::List(items) => {
            for (index, item) in items.iter().enumerate() {
                let item_name = join_field_name(&name, &index.to_string());
                decode_value(store, form, item_name, item, summary);
            }
        }
        leaf => {
            let Some(target) = store.field(form, &name) else {
                debug!(form, field = %name, "no matching field");
                summary.missing.push(name);
                return;
            };
            let write = leaf_write(target.kind, &name, leaf);
            if store.set_field(form, &name, write) {
                summary.written += 1;
            }
        }
    }
}

/// Field update for a leaf value.
///
/// Checkboxes take the value's truthiness. Other fields always drop a
/// previous explicit-null marker, except that `null` written into a
/// bus-identifier field sets empty text and re-sets the marker.
pub fn leaf_write(kind: FieldKind, name: &str, value: &Value) -> FieldWrite {
    match kind {
        FieldKind::Checkbox => FieldWrite::Checked(value.is_truthy()),
        FieldKind::Text if matches!(value, Value::Null) && is_bus_identifier(name) => {
            FieldWrite::Text {
                text: String::new(),
                explicit_null: true,
            }
        }
        FieldKind::Text => FieldWrite::Text {
            text: value.to_field_text(),
            explicit_null: false,
        },
    }
}
