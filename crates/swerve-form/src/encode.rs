//! Form to document encoding.

use swerve_model::{
    Document, DocumentName, FieldPath, MODULE_FILES, Result, Value, coerce_field_text,
    is_bus_identifier,
};
use tracing::{debug, warn};

use crate::store::{FormField, FormStore};

/// Key of the synthesized module list in the drivetrain document.
const MODULES_KEY: &str = "modules";

/// A freshly encoded document together with its display text.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedDocument {
    pub document: Document,
    pub text: String,
}

/// Document value of a non-checkbox field.
///
/// A bus-identifier field with its explicit-null marker set is `null` no
/// matter what text it holds; everything else goes through
/// [`coerce_field_text`].
pub fn field_value(field: &FormField) -> Value {
    if field.explicit_null && is_bus_identifier(&field.name) {
        Value::Null
    } else {
        coerce_field_text(&field.value)
    }
}

/// Build the document for `form` from the store's current fields.
///
/// Value fields are placed first using up to two levels of nesting. Every
/// checkbox is placed afterwards with single-level nesting, checked or not,
/// so unchecked boxes still show up as `false`.
pub fn encode_form<S: FormStore + ?Sized>(store: &S, form: &str) -> Document {
    let fields = store.fields(form);
    let mut document = Document::new();

    for field in fields
        .iter()
        .filter(|field| !field.is_checkbox() && !field.disabled)
    {
        let path = FieldPath::parse(&field.name);
        place(&mut document, &path, field_value(field));
    }

    for field in fields.iter().filter(|field| field.is_checkbox()) {
        let path = FieldPath::parse_single_level(&field.name);
        place(&mut document, &path, Value::Bool(field.checked));
    }

    if DocumentName::from_form(form).is_some_and(|name| name.is_drivetrain()) {
        let modules = MODULE_FILES.iter().copied().map(Value::from).collect();
        document.insert(MODULES_KEY, Value::List(modules));
    }

    debug!(form, fields = fields.len(), keys = document.len(), "encoded form");
    document
}

/// Encode a form and render its two-space indented JSON text.
pub fn encode_form_text<S: FormStore + ?Sized>(store: &S, form: &str) -> Result<EncodedDocument> {
    let document = encode_form(store, form);
    let text = document.to_json_text()?;
    Ok(EncodedDocument { document, text })
}

fn place(document: &mut Document, path: &FieldPath<'_>, value: Value) {
    let mut target = document;
    for key in [path.group, path.subgroup].into_iter().flatten() {
        if target.get(key).is_some_and(|existing| existing.as_document().is_none()) {
            warn!(field = %path, key, "scalar value replaced by group");
        }
        target = target.group_mut(key);
    }
    if target.get(path.field).is_some_and(|existing| existing.as_document().is_some()) {
        warn!(field = %path, "group replaced by scalar value");
    }
    target.insert(path.field, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryFormStore;

    fn store(form: &str, fields: Vec<FormField>) -> MemoryFormStore {
        MemoryFormStore::new().with_form(form, fields)
    }

    #[test]
    fn places_values_by_name() {
        let store = store(
            "frontleft",
            vec![
                FormField::text("inverted", "abc"),
                FormField::text("drive_id", "11"),
                FormField::text("conversionFactors_drive_factor", "0.047"),
            ],
        );
        let doc = encode_form(&store, "frontleft");
        assert_eq!(doc.get("inverted"), Some(&Value::from("abc")));
        assert_eq!(doc.get_path(&["drive", "id"]), Some(&Value::Number(11.0)));
        assert_eq!(
            doc.get_path(&["conversionFactors", "drive", "factor"]),
            Some(&Value::Number(0.047))
        );
    }

    #[test]
    fn deep_value_names_use_last_segment_as_leaf() {
        let store = store(
            "frontleft",
            vec![FormField::text("conversionFactors_drive_gear_ratio", "6.75")],
        );
        let doc = encode_form(&store, "frontleft");
        assert_eq!(
            doc.get_path(&["conversionFactors", "drive", "ratio"]),
            Some(&Value::Number(6.75))
        );
        assert_eq!(doc.get_path(&["conversionFactors", "drive", "gear_ratio"]), None);
    }

    #[test]
    fn empty_text_is_null() {
        let doc = encode_form(&store("x", vec![FormField::text("a_b", "")]), "x");
        assert_eq!(doc.get_path(&["a", "b"]), Some(&Value::Null));
    }

    #[test]
    fn bus_identifier_null_marker_wins_over_text() {
        let store = store(
            "frontleft",
            vec![
                FormField::text("drive_canbus", "rio").with_explicit_null(true),
                FormField::text("angle_canbus", "rio"),
                FormField::text("encoder_id", "3").with_explicit_null(true),
                FormField::text("canbus", "").with_explicit_null(true),
            ],
        );
        let doc = encode_form(&store, "frontleft");
        assert_eq!(doc.get_path(&["drive", "canbus"]), Some(&Value::Null));
        assert_eq!(doc.get_path(&["angle", "canbus"]), Some(&Value::from("rio")));
        assert_eq!(doc.get_path(&["encoder", "id"]), Some(&Value::Number(3.0)));
        assert_eq!(doc.get("canbus"), Some(&Value::Null));
    }

    #[test]
    fn unchecked_checkboxes_encode_as_false() {
        let store = store(
            "swervedrive",
            vec![
                FormField::checkbox("imu_inverted", false),
                FormField::checkbox("enabled", true),
                FormField::checkbox("module_absolute_encoder_inverted", false),
            ],
        );
        let doc = encode_form(&store, "swervedrive");
        assert_eq!(doc.get_path(&["imu", "inverted"]), Some(&Value::Bool(false)));
        assert_eq!(doc.get("enabled"), Some(&Value::Bool(true)));
        assert_eq!(
            doc.get_path(&["module", "absolute_encoder_inverted"]),
            Some(&Value::Bool(false))
        );
    }

    #[test]
    fn disabled_value_fields_are_skipped() {
        let store = store(
            "x",
            vec![
                FormField::text("a", "1").with_disabled(true),
                FormField::checkbox("b", true).with_disabled(true),
            ],
        );
        let doc = encode_form(&store, "x");
        assert_eq!(doc.get("a"), None);
        assert_eq!(doc.get("b"), Some(&Value::Bool(true)));
    }

    #[test]
    fn drivetrain_always_lists_modules() {
        let doc = encode_form(&MemoryFormStore::new(), "swervedrive");
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"modules":["frontleft.json","frontright.json","backleft.json","backright.json"]}"#
        );
        let other = encode_form(&MemoryFormStore::new(), "frontleft");
        assert!(other.is_empty());
    }

    #[test]
    fn form_modules_field_is_overridden() {
        let store = store("swervedrive", vec![FormField::text("modules", "custom")]);
        let doc = encode_form(&store, "swervedrive");
        assert!(matches!(doc.get("modules"), Some(Value::List(items)) if items.len() == 4));
    }
}
