//! Numeric coercion of form text.
//!
//! A field holds a number only when its whole trimmed text is a finite
//! decimal literal. Partial prefixes such as `12abc` and whitespace-only text
//! stay text.

use crate::value::Value;

/// Parse a complete decimal literal, ignoring surrounding whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent (`3`, `-0.5`, `.25`, `1e3`). Rejects empty or
/// whitespace-only text, named values like `inf` or `NaN`, radix prefixes,
/// and anything that overflows to infinity.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return None;
    }

    // f64's parser also accepts "inf"/"nan"; only plain literals count here.
    // Hex, `Infinity` and overflowing literals are kept as text on purpose
    // instead of collapsing to 0 or null in the written document.
    if !trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Check if form text represents a number.
pub fn is_numeric(text: &str) -> bool {
    parse_numeric(text).is_some()
}

/// Coerce raw form text into a document value.
///
/// Numbers win, then empty text becomes `null`, otherwise the text is kept
/// unchanged (untrimmed).
pub fn coerce_field_text(text: &str) -> Value {
    if let Some(number) = parse_numeric(text) {
        Value::Number(number)
    } else if text.is_empty() {
        Value::Null
    } else {
        Value::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_numbers() {
        assert_eq!(parse_numeric("3.14"), Some(3.14));
        assert_eq!(parse_numeric("-456"), Some(-456.0));
        assert_eq!(parse_numeric("+7"), Some(7.0));
        assert_eq!(parse_numeric(".25"), Some(0.25));
        assert_eq!(parse_numeric("5."), Some(5.0));
    }

    #[test]
    fn test_exponent() {
        assert_eq!(parse_numeric("1e3"), Some(1000.0));
        assert_eq!(parse_numeric("2.5E-2"), Some(0.025));
        assert_eq!(parse_numeric("1e"), None);
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(parse_numeric("  12  "), Some(12.0));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("  "), None);
        assert_eq!(parse_numeric("\t\n"), None);
    }

    #[test]
    fn test_partial_prefix_is_not_numeric() {
        assert!(!is_numeric("12abc"));
        assert!(!is_numeric("1 2"));
        assert!(!is_numeric("1.2.3"));
        assert!(!is_numeric("."));
    }

    #[test]
    fn test_named_values_are_text() {
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("Infinity"));
        assert!(!is_numeric("NaN"));
        assert!(!is_numeric("0x1F"));
        assert!(!is_numeric("1e400"));
    }

    #[test]
    fn test_coerce() {
        assert_eq!(coerce_field_text("42"), Value::Number(42.0));
        assert_eq!(coerce_field_text(""), Value::Null);
        assert_eq!(coerce_field_text("neo"), Value::Text("neo".to_string()));
        assert_eq!(coerce_field_text("  "), Value::Text("  ".to_string()));
        assert_eq!(coerce_field_text(" 8 "), Value::Number(8.0));
    }

    #[test]
    fn test_non_decimal_literals_keep_their_text() {
        assert_eq!(coerce_field_text("0x1F"), Value::Text("0x1F".to_string()));
        assert_eq!(
            coerce_field_text("Infinity"),
            Value::Text("Infinity".to_string())
        );
        assert_eq!(coerce_field_text("1e400"), Value::Text("1e400".to_string()));
    }
}
