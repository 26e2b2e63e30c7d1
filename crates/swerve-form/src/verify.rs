//! Checks that a form holds what a document says after decoding.
//!
//! Used to verify archive imports against reference documents: every
//! non-list leaf of the document is compared with the field it maps to.

use std::fmt;

use swerve_model::{Document, Value, is_bus_identifier, join_field_name};

use crate::store::{FormField, FormStore};

/// Result of comparing one field against its expected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    FieldNotFound,
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    ValueMismatch {
        expected: String,
        actual: String,
    },
}

impl CheckOutcome {
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.write_str("ok"),
            Self::FieldNotFound => f.write_str("field not found"),
            Self::TypeMismatch { expected, actual } => {
                write!(f, "type mismatch: expected {expected}, got {actual}")
            }
            Self::ValueMismatch { expected, actual } => {
                write!(f, "value mismatch: expected {expected:?}, got {actual:?}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    pub field: String,
    pub outcome: CheckOutcome,
}

/// Field checks for one form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub form: String,
    pub checks: Vec<FieldCheck>,
}

impl VerifyReport {
    #[must_use]
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|check| check.outcome.is_pass()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.checks.len() - self.passed()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FieldCheck> {
        self.checks.iter().filter(|check| !check.outcome.is_pass())
    }
}

/// Compare every non-list leaf of `document` with the fields of `form`.
pub fn verify_form<S: FormStore + ?Sized>(store: &S, form: &str, document: &Document) -> VerifyReport {
    let mut report = VerifyReport {
        form: form.to_string(),
        checks: Vec::new(),
    };
    collect_checks(store, form, "", document, &mut report.checks);
    report
}

fn collect_checks<S: FormStore + ?Sized>(
    store: &S,
    form: &str,
    prefix: &str,
    document: &Document,
    checks: &mut Vec<FieldCheck>,
) {
    for (key, value) in document.iter() {
        let name = join_field_name(prefix, key);
        match value {
            Value::Nested(nested) => collect_checks(store, form, &name, nested, checks),
            Value::List(_) => {}
            expected => {
                let outcome = match store.field(form, &name) {
                    Some(field) => compare(&observed_value(&field), expected),
                    None => CheckOutcome::FieldNotFound,
                };
                checks.push(FieldCheck {
                    field: name,
                    outcome,
                });
            }
        }
    }
}

/// What the form shows for a field: checkbox state, `null` for marked bus
/// identifiers, otherwise the raw text.
fn observed_value(field: &FormField) -> Value {
    if field.is_checkbox() {
        Value::Bool(field.checked)
    } else if field.explicit_null && is_bus_identifier(&field.name) {
        Value::Null
    } else {
        Value::Text(field.value.clone())
    }
}

fn is_null_like(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Text(text) => text.is_empty(),
        _ => false,
    }
}

fn compare(actual: &Value, expected: &Value) -> CheckOutcome {
    // Empty text and null are the same thing in a form
    if (matches!(expected, Value::Null) && is_null_like(actual))
        || (matches!(actual, Value::Null) && is_null_like(expected))
    {
        return CheckOutcome::Passed;
    }

    match (actual, expected) {
        (Value::Text(text), _) => {
            let expected_text = expected.to_field_text();
            if *text == expected_text {
                CheckOutcome::Passed
            } else {
                CheckOutcome::ValueMismatch {
                    expected: expected_text,
                    actual: text.clone(),
                }
            }
        }
        (Value::Bool(checked), Value::Bool(wanted)) if checked == wanted => CheckOutcome::Passed,
        (Value::Bool(checked), Value::Bool(wanted)) => CheckOutcome::ValueMismatch {
            expected: wanted.to_string(),
            actual: checked.to_string(),
        },
        _ => CheckOutcome::TypeMismatch {
            expected: expected.type_name(),
            actual: actual.type_name(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_document;
    use crate::store::MemoryFormStore;

    #[test]
    fn decoded_form_verifies() {
        let document = Document::from_json_str(
            r#"{"drive":{"id":4,"canbus":null},"inverted":true,"name":"fl","modules":["a"]}"#,
        )
        .unwrap();
        let mut store = MemoryFormStore::new().with_form(
            "frontleft",
            vec![
                FormField::text("drive_id", ""),
                FormField::text("drive_canbus", "x"),
                FormField::checkbox("inverted", false),
                FormField::text("name", ""),
            ],
        );
        decode_document(&mut store, "frontleft", &document);
        let report = verify_form(&store, "frontleft", &document);
        assert_eq!(report.checks.len(), 4);
        assert_eq!(report.failed(), 0, "{:?}", report.checks);
    }

    #[test]
    fn reports_missing_and_mismatched_fields() {
        let document =
            Document::from_json_str(r#"{"a":1,"b":true,"c":"x","d":null}"#).unwrap();
        let store = MemoryFormStore::new().with_form(
            "f",
            vec![
                FormField::text("a", "2"),
                FormField::text("b", "true"),
                FormField::checkbox("c", true),
            ],
        );
        let report = verify_form(&store, "f", &document);
        let outcome = |name: &str| {
            report
                .checks
                .iter()
                .find(|check| check.field == name)
                .map(|check| check.outcome.clone())
                .unwrap()
        };
        assert_eq!(
            outcome("a"),
            CheckOutcome::ValueMismatch {
                expected: "1".to_string(),
                actual: "2".to_string()
            }
        );
        assert_eq!(outcome("b"), CheckOutcome::Passed);
        assert_eq!(
            outcome("c"),
            CheckOutcome::TypeMismatch {
                expected: "string",
                actual: "boolean"
            }
        );
        assert_eq!(outcome("d"), CheckOutcome::FieldNotFound);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failures().count(), 3);
    }
}
