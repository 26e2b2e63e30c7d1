//! Form field state.
//!
//! A [`FormStore`] owns the fields of every named form. Encoding reads
//! snapshots from it and decoding writes through it, so the core never
//! depends on where the fields actually live.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Kind of input element behind a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Any input holding text (text boxes, number inputs, selects).
    #[default]
    Text,
    Checkbox,
}

/// Snapshot of one form input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    /// Raw text; ignored for checkboxes.
    #[serde(default)]
    pub value: String,
    /// Checked state; only meaningful for checkboxes.
    #[serde(default, skip_serializing_if = "is_false")]
    pub checked: bool,
    /// Marks a bus-identifier field as `null` even though its text is empty.
    #[serde(default, skip_serializing_if = "is_false")]
    pub explicit_null: bool,
    /// Disabled inputs are left out of the encoded value set.
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl FormField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Checkbox,
            checked,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_explicit_null(mut self, explicit_null: bool) -> Self {
        self.explicit_null = explicit_null;
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn is_checkbox(&self) -> bool {
        self.kind == FieldKind::Checkbox
    }

    /// Apply a decoder write to this field.
    pub fn apply(&mut self, write: FieldWrite) {
        match write {
            FieldWrite::Checked(checked) => self.checked = checked,
            FieldWrite::Text {
                text,
                explicit_null,
            } => {
                self.value = text;
                self.explicit_null = explicit_null;
            }
        }
    }
}

/// A single field update produced by the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldWrite {
    Checked(bool),
    Text { text: String, explicit_null: bool },
}

/// Access to the fields of named forms.
pub trait FormStore {
    /// Snapshot of every field of `form` in document order. Unknown forms
    /// have no fields.
    fn fields(&self, form: &str) -> Vec<FormField>;

    /// Snapshot of a single field.
    fn field(&self, form: &str, name: &str) -> Option<FormField> {
        self.fields(form).into_iter().find(|field| field.name == name)
    }

    /// Write to a field. Returns false when the field does not exist.
    fn set_field(&mut self, form: &str, name: &str, write: FieldWrite) -> bool;
}

/// In-memory form store, serializable as the CLI's forms file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryFormStore {
    forms: IndexMap<String, Vec<FormField>>,
}

impl MemoryFormStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style form registration.
    #[must_use]
    pub fn with_form(mut self, form: impl Into<String>, fields: Vec<FormField>) -> Self {
        self.insert_form(form, fields);
        self
    }

    pub fn insert_form(&mut self, form: impl Into<String>, fields: Vec<FormField>) {
        self.forms.insert(form.into(), fields);
    }

    #[must_use]
    pub fn form(&self, form: &str) -> Option<&[FormField]> {
        self.forms.get(form).map(Vec::as_slice)
    }

    pub fn form_names(&self) -> impl Iterator<Item = &str> {
        self.forms.keys().map(String::as_str)
    }

    pub fn field_mut(&mut self, form: &str, name: &str) -> Option<&mut FormField> {
        self.forms
            .get_mut(form)?
            .iter_mut()
            .find(|field| field.name == name)
    }

    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json_text(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl FormStore for MemoryFormStore {
    fn fields(&self, form: &str) -> Vec<FormField> {
        self.form(form).map(<[FormField]>::to_vec).unwrap_or_default()
    }

    fn field(&self, form: &str, name: &str) -> Option<FormField> {
        self.form(form)?
            .iter()
            .find(|field| field.name == name)
            .cloned()
    }

    fn set_field(&mut self, form: &str, name: &str, write: FieldWrite) -> bool {
        match self.field_mut(form, name) {
            Some(field) => {
                field.apply(write);
                true
            }
            None => false,
        }
    }
}
