//! Encode/decode round-trip properties of the field naming convention.

use proptest::prelude::*;

use swerve_form::{FormField, FormStore, MemoryFormStore, decode_document, encode_form};
use swerve_model::{Value, coerce_field_text};

const FORM: &str = "physicalproperties";

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,7}"
}

fn field_text() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..100_000).prop_map(|n| n.to_string()),
        (-5000i32..5000).prop_map(|n| format!("{}.25", n)),
        "[a-zA-Z ]{1,12}",
        Just(String::new()),
    ]
}

/// Encode a single-field form, decode into an empty copy of the form, and
/// return the encoded value plus the text the decoder wrote back.
fn round_trip(name: &str, text: &str) -> (Option<Value>, String, swerve_model::Document) {
    let source = MemoryFormStore::new().with_form(FORM, vec![FormField::text(name, text)]);
    let document = encode_form(&source, FORM);

    let mut target = MemoryFormStore::new().with_form(FORM, vec![FormField::text(name, "stale")]);
    let summary = decode_document(&mut target, FORM, &document);
    assert_eq!(summary.written, 1);
    let restored = target.field(FORM, name).unwrap().value;

    let path = swerve_model::FieldPath::parse(name);
    let keys: Vec<&str> = path.keys().collect();
    (document.get_path(&keys).cloned(), restored, document)
}

proptest! {
    #[test]
    fn top_level_fields_round_trip(field in segment(), text in field_text()) {
        let (value, restored, document) = round_trip(&field, &text);
        prop_assert_eq!(document.len(), 1);
        prop_assert_eq!(value, Some(coerce_field_text(&text)));
        prop_assert_eq!(restored, coerce_field_text(&text).to_field_text());
    }

    #[test]
    fn group_fields_round_trip(group in segment(), field in segment(), text in field_text()) {
        let name = format!("{group}_{field}");
        let (value, restored, document) = round_trip(&name, &text);
        prop_assert!(document.get(&group).and_then(Value::as_document).is_some());
        prop_assert_eq!(value, Some(coerce_field_text(&text)));
        prop_assert_eq!(restored, coerce_field_text(&text).to_field_text());
    }

    #[test]
    fn subgroup_fields_round_trip(
        group in segment(),
        subgroup in segment(),
        field in segment(),
        text in field_text(),
    ) {
        let name = format!("{group}_{subgroup}_{field}");
        let (value, restored, _) = round_trip(&name, &text);
        prop_assert_eq!(value, Some(coerce_field_text(&text)));
        prop_assert_eq!(restored, coerce_field_text(&text).to_field_text());
    }

    #[test]
    fn checkboxes_round_trip(group in segment(), field in segment(), checked in any::<bool>()) {
        let name = format!("{group}_{field}");
        let source = MemoryFormStore::new()
            .with_form(FORM, vec![FormField::checkbox(name.as_str(), checked)]);
        let document = encode_form(&source, FORM);
        prop_assert_eq!(
            document.get_path(&[group.as_str(), field.as_str()]),
            Some(&Value::Bool(checked))
        );

        let mut target = MemoryFormStore::new()
            .with_form(FORM, vec![FormField::checkbox(name.as_str(), !checked)]);
        decode_document(&mut target, FORM, &document);
        prop_assert_eq!(target.field(FORM, &name).unwrap().checked, checked);
    }
}

#[test]
fn whole_form_round_trips() {
    let fields = vec![
        FormField::text("robotmass", "50"),
        FormField::text("optimalVoltage", "12"),
        FormField::text("wheelGripCoefficientOfFriction", "1.19"),
        FormField::text("conversionFactors_drive_gearRatio", "6.75"),
        FormField::text("conversionFactors_drive_diameter", "4"),
        FormField::text("conversionFactors_angle_gearRatio", "21.4285714286"),
        FormField::text("currentLimit_drive", "40"),
        FormField::text("rampRate_angle", ""),
        FormField::text("encoder_canbus", "").with_explicit_null(true),
        FormField::text("motor_type", "sparkmax"),
        FormField::checkbox("inverted_drive", false),
        FormField::checkbox("inverted_angle", true),
    ];
    let source = MemoryFormStore::new().with_form(FORM, fields.clone());
    let document = encode_form(&source, FORM);

    let blank: Vec<FormField> = fields
        .iter()
        .map(|field| {
            let mut blank = field.clone();
            if field.is_checkbox() {
                blank.checked = !field.checked;
            } else {
                blank.value = "junk".to_string();
            }
            blank.explicit_null = false;
            blank
        })
        .collect();
    let mut target = MemoryFormStore::new().with_form(FORM, blank);
    let summary = decode_document(&mut target, FORM, &document);

    assert_eq!(summary.written, fields.len());
    assert!(summary.missing.is_empty());
    assert_eq!(target.fields(FORM), fields);
}
