//! Structural form-field names.
//!
//! Field names encode where a value lives in its document:
//!
//! | name                   | location                      |
//! |------------------------|-------------------------------|
//! | `field`                | `doc[field]`                  |
//! | `group_field`          | `doc[group][field]`           |
//! | `group_subgroup_field` | `doc[group][subgroup][field]` |
//!
//! The first two separators pick the group and subgroup. The leaf is the
//! part after the last separator, so `group_subgroup_gear_ratio` lands at
//! `doc[group][subgroup][ratio]`. Checkboxes are the exception, see
//! [`FieldPath::parse_single_level`].

use std::fmt;

/// Separator between structural parts of a field name.
pub const FIELD_SEPARATOR: char = '_';

/// Substring (case-insensitive) that marks a field as a CAN bus identifier.
const BUS_IDENTIFIER_MARKER: &str = "canbus";

/// Returns true for fields that carry a hardware bus ID and support an
/// explicit `null` distinct from empty text.
pub fn is_bus_identifier(name: &str) -> bool {
    name.to_lowercase().contains(BUS_IDENTIFIER_MARKER)
}

/// Location of a field's value inside its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath<'a> {
    pub group: Option<&'a str>,
    pub subgroup: Option<&'a str>,
    pub field: &'a str,
}

impl<'a> FieldPath<'a> {
    /// Parse a value field name, honouring up to two levels of nesting.
    /// Separators past the second are dropped along with the text before
    /// the last one.
    pub fn parse(name: &'a str) -> Self {
        let Some((group, rest)) = name.split_once(FIELD_SEPARATOR) else {
            return Self::top_level(name);
        };
        match rest.split_once(FIELD_SEPARATOR) {
            Some((subgroup, remainder)) => Self {
                group: Some(group),
                subgroup: Some(subgroup),
                field: remainder
                    .rsplit_once(FIELD_SEPARATOR)
                    .map_or(remainder, |(_, leaf)| leaf),
            },
            None => Self {
                group: Some(group),
                subgroup: None,
                field: rest,
            },
        }
    }

    /// Parse a checkbox field name. Checkboxes nest at most one level, so
    /// everything after the first separator is the leaf name.
    pub fn parse_single_level(name: &'a str) -> Self {
        match name.split_once(FIELD_SEPARATOR) {
            Some((group, field)) => Self {
                group: Some(group),
                subgroup: None,
                field,
            },
            None => Self::top_level(name),
        }
    }

    fn top_level(name: &'a str) -> Self {
        Self {
            group: None,
            subgroup: None,
            field: name,
        }
    }

    /// Keys from the document root down to the leaf.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.group
            .into_iter()
            .chain(self.subgroup)
            .chain(std::iter::once(self.field))
    }
}

impl fmt::Display for FieldPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for key in self.keys() {
            if !first {
                write!(f, "{FIELD_SEPARATOR}")?;
            }
            f.write_str(key)?;
            first = false;
        }
        Ok(())
    }
}

/// Extend a flattened key prefix with one more key.
pub fn join_field_name(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}{FIELD_SEPARATOR}{key}")
    }
}
