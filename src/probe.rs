//! Pure predicates for building assertion verdicts over slot values.
//!
//! None of these fail a test on their own; they answer a question or report
//! that the question does not apply to the value's kind.

#![allow(missing_docs)]
#![allow(clippy::cast_precision_loss)]

use std::cmp::Ordering;

use regex::Regex;

use crate::args::coercion::Numeric;
use crate::args::{Value, ValueKind};
use crate::core::errors::{Result, UnderstudyError};

/// How many of the listed names must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    All,
    Any,
    No,
}

/// Structural equality, recursing into composites.
#[must_use]
pub fn deep_equal(actual: &Value, expected: &Value) -> bool {
    actual == expected
}

#[must_use]
pub const fn kind_of(value: &Value) -> ValueKind {
    value.kind()
}

#[must_use]
pub const fn is_nil(value: &Value) -> bool {
    value.is_nil()
}

/// Present and not nil.
#[must_use]
pub const fn exists(value: Option<&Value>) -> bool {
    matches!(value, Some(v) if !v.is_nil())
}

/// Zero value of its kind: `false`, numeric zero, empty text or sequence,
/// nil, or a record whose fields are all zero.
#[must_use]
pub fn is_zero(value: &Value) -> bool {
    match value {
        Value::Nil => true,
        Value::Wildcard | Value::Error(_) => false,
        Value::Bool(v) => !v,
        Value::Str(v) => v.is_empty(),
        Value::Bytes(v) => v.is_empty(),
        Value::Strings(v) => v.is_empty(),
        Value::List(v) => v.is_empty(),
        Value::Map(v) => v.is_empty(),
        Value::Record(record) => record.fields.iter().all(|(_, field)| is_zero(field)),
        Value::Slot(slot) => is_zero(&slot.get()),
        numeric => Numeric::from_value(Some(numeric)).is_ok_and(|n| n.to_f64() == 0.0),
    }
}

/// Ordering of two numeric values across widths and signedness. `None` when
/// either side is NaN.
pub fn compare_numeric(actual: &Value, expected: &Value) -> Result<Option<Ordering>> {
    let left = numeric_operand(actual)?;
    let right = numeric_operand(expected)?;
    Ok(match (left, right) {
        (Numeric::Int(a), Numeric::Int(b)) => Some(a.cmp(&b)),
        (Numeric::Uint(a), Numeric::Uint(b)) => Some(a.cmp(&b)),
        (Numeric::Int(a), Numeric::Uint(b)) => Some(i128::from(a).cmp(&i128::from(b))),
        (Numeric::Uint(a), Numeric::Int(b)) => Some(i128::from(a).cmp(&i128::from(b))),
        (a, b) => a.to_f64().partial_cmp(&b.to_f64()),
    })
}

pub fn greater_than(actual: &Value, bound: f64) -> Result<bool> {
    Ok(numeric_operand(actual)?.to_f64() > bound)
}

pub fn less_than(actual: &Value, bound: f64) -> Result<bool> {
    Ok(numeric_operand(actual)?.to_f64() < bound)
}

/// Inclusive range check.
pub fn within(actual: &Value, low: f64, high: f64) -> Result<bool> {
    let value = numeric_operand(actual)?.to_f64();
    Ok(low <= value && value <= high)
}

/// Substring test over the textual form.
#[must_use]
pub fn contains_text(actual: &Value, needle: &str) -> bool {
    actual.to_string().contains(needle)
}

/// Regex test over the textual form.
pub fn matches_regex(actual: &Value, pattern: &str) -> Result<bool> {
    let regex = Regex::new(pattern).map_err(|error| UnderstudyError::InvalidRegex {
        pattern: pattern.to_string(),
        details: error.to_string(),
    })?;
    Ok(regex.is_match(&actual.to_string()))
}

pub fn has_key(actual: &Value, key: &str) -> Result<bool> {
    match actual {
        Value::Map(map) => Ok(map.contains_key(key)),
        other => Err(UnderstudyError::NotAContainer {
            found: other.kind(),
        }),
    }
}

pub fn has_keys(actual: &Value, listing: Listing, keys: &[&str]) -> Result<bool> {
    let Value::Map(map) = actual else {
        return Err(UnderstudyError::NotAContainer {
            found: actual.kind(),
        });
    };
    Ok(apply_listing(listing, keys, |key| map.contains_key(key)))
}

pub fn has_property(actual: &Value, name: &str) -> Result<bool> {
    match actual {
        Value::Record(record) => Ok(record.field(name).is_some()),
        other => Err(UnderstudyError::NotAContainer {
            found: other.kind(),
        }),
    }
}

pub fn has_properties(actual: &Value, listing: Listing, names: &[&str]) -> Result<bool> {
    let Value::Record(record) = actual else {
        return Err(UnderstudyError::NotAContainer {
            found: actual.kind(),
        });
    };
    Ok(apply_listing(listing, names, |name| {
        record.field(name).is_some()
    }))
}

fn apply_listing(listing: Listing, names: &[&str], present: impl Fn(&str) -> bool) -> bool {
    match listing {
        Listing::All => names.iter().all(|name| present(name)),
        Listing::Any => names.iter().any(|name| present(name)),
        Listing::No => !names.iter().any(|name| present(name)),
    }
}

fn numeric_operand(value: &Value) -> Result<Numeric> {
    // Text parses for extraction but is not a number for comparisons.
    if !value.kind().is_numeric() {
        return Err(UnderstudyError::NotNumeric {
            found: value.kind(),
        });
    }
    Numeric::from_value(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::OutSlot;

    fn person() -> Value {
        Value::record("person", [("name", Value::from("ada")), ("age", Value::from(36))])
    }

    #[test]
    fn deep_equality_recurses() {
        assert!(deep_equal(&person(), &person()));
        assert!(!deep_equal(
            &person(),
            &Value::record("person", [("name", Value::from("ada")), ("age", Value::from(37))])
        ));
    }

    #[test]
    fn numeric_comparison_spans_widths() {
        assert_eq!(
            compare_numeric(&Value::from(-1_i8), &Value::from(u64::MAX)).unwrap(),
            Some(Ordering::Less)
        );
        assert_eq!(
            compare_numeric(&Value::from(3_u16), &Value::from(3_i64)).unwrap(),
            Some(Ordering::Equal)
        );
        assert_eq!(
            compare_numeric(&Value::from(2.5_f32), &Value::from(2_i32)).unwrap(),
            Some(Ordering::Greater)
        );
        assert_eq!(
            compare_numeric(&Value::from(f64::NAN), &Value::from(1)).unwrap(),
            None
        );
        assert_eq!(
            compare_numeric(&Value::from("3"), &Value::from(3))
                .unwrap_err()
                .code(),
            "UDY-2005"
        );
    }

    #[test]
    fn bounds() {
        let value = Value::from(10_u32);
        assert!(greater_than(&value, 9.5).unwrap());
        assert!(less_than(&value, 10.5).unwrap());
        assert!(within(&value, 10.0, 10.0).unwrap());
        assert!(!within(&value, 11.0, 12.0).unwrap());
    }

    #[test]
    fn zero_values() {
        assert!(is_zero(&Value::Nil));
        assert!(is_zero(&Value::from(0.0)));
        assert!(is_zero(&Value::from("")));
        assert!(is_zero(&Value::record("r", [("a", 0), ("b", 0)])));
        assert!(is_zero(&Value::Slot(OutSlot::new(false))));
        assert!(!is_zero(&Value::from(1)));
        assert!(!is_zero(&Value::error("")));
    }

    #[test]
    fn existence() {
        assert!(exists(Some(&Value::from(0))));
        assert!(!exists(Some(&Value::Nil)));
        assert!(!exists(None));
        assert!(is_nil(&Value::Nil));
        assert_eq!(kind_of(&person()), ValueKind::Record);
    }

    #[test]
    fn text_probes() {
        let value = Value::from("The quick brown fox");
        assert!(contains_text(&value, "quick"));
        assert!(matches_regex(&value, r"^The \w+ brown").unwrap());
        assert!(!matches_regex(&value, r"^fox").unwrap());
        assert_eq!(matches_regex(&value, "(").unwrap_err().code(), "UDY-1008");
    }

    #[test]
    fn key_probes() {
        let map = Value::map([("x", 10), ("y", 11), ("z", 12)]);
        assert!(has_key(&map, "x").unwrap());
        assert!(!has_key(&map, "w").unwrap());
        assert!(has_keys(&map, Listing::All, &["x", "y"]).unwrap());
        assert!(!has_keys(&map, Listing::All, &["x", "w"]).unwrap());
        assert!(has_keys(&map, Listing::Any, &["w", "z"]).unwrap());
        assert!(has_keys(&map, Listing::No, &["a", "b"]).unwrap());
        assert!(!has_keys(&map, Listing::No, &["a", "x"]).unwrap());
        assert_eq!(has_key(&person(), "x").unwrap_err().code(), "UDY-1007");
    }

    #[test]
    fn property_probes() {
        let record = person();
        assert!(has_property(&record, "name").unwrap());
        assert!(!has_property(&record, "email").unwrap());
        assert!(has_properties(&record, Listing::All, &["name", "age"]).unwrap());
        assert!(has_properties(&record, Listing::No, &["email"]).unwrap());
        assert!(has_property(&Value::from(1), "name").is_err());
    }
}
