//! Semantic comparison of JSON documents.
//!
//! Two documents are equal when they parse to the same tree: object key order and
//! whitespace are ignored, array order is not. Numbers compare by value, so `1`
//! and `1.0` are equal. Integers compare exactly, two floats compare as `f64`,
//! and an integer equals a float only when the float is integral and denotes the
//! same integer, so `9007199254740993` does not equal `9007199254740992.0`.
//!
//! Inputs are parsed left first. If the left document is malformed its error is
//! returned and the right document is never looked at.

use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::Serialize;
use serde_json::{Number, Value};
use strum_macros::Display as StrumDisplay;
use tracing::{debug, trace};

use crate::error::PolicyError;
use crate::types::JsonKind;

/// Which of the two compared documents something belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Why two values at the same path are not equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Mismatch {
    Kind { left: JsonKind, right: JsonKind },
    Value { left: Value, right: Value },
    Length { left: usize, right: usize },
    MissingKey { key: String, present_in: Side },
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Mismatch::Kind { left, right } => write!(f, "kind differs: {left} vs {right}"),
            Mismatch::Value { left, right } => write!(f, "value differs: {left} vs {right}"),
            Mismatch::Length { left, right } => {
                write!(f, "array length differs: {left} vs {right}")
            }
            Mismatch::MissingKey { key, present_in } => {
                write!(f, "key `{key}` only present on the {present_in}")
            }
        }
    }
}

/// The first point where two documents diverge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Difference {
    /// Location in `$.Statement[0].Action` form. `$` is the document root; keys
    /// that are not plain identifiers are quoted, as in `$.Condition.Bool["aws:SecureTransport"]`.
    pub path: String,
    #[serde(flatten)]
    pub mismatch: Mismatch,
}

impl Display for Difference {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}: {}", self.path, self.mismatch)
    }
}

#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

fn render_path(segments: &[Segment<'_>]) -> String {
    let mut path = String::from("$");
    for segment in segments {
        match segment {
            Segment::Key(key) if is_plain_key(key) => {
                path.push('.');
                path.push_str(key);
            }
            Segment::Key(key) => {
                path.push('[');
                path.push_str(&Value::String(key.to_string()).to_string());
                path.push(']');
            }
            Segment::Index(index) => {
                path.push('[');
                path.push_str(&index.to_string());
                path.push(']');
            }
        }
    }
    path
}

/// Keys written as `.key`; anything else is quoted as `["key"]`.
fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Compare two JSON documents for semantic equality.
///
/// Example:
/// ```rust
/// use iampolicy_core::equal;
/// assert!(equal(br#"{"a":1,"b":2}"#, br#"{"b": 2, "a": 1}"#).unwrap());
/// assert!(!equal(br#"{"a":"aye"}"#, br#"{"a":"bee"}"#).unwrap());
/// ```
pub fn equal(left: &[u8], right: &[u8]) -> Result<bool, PolicyError> {
    Ok(difference(left, right)?.is_none())
}

/// Compare two JSON documents and report the first divergence, if any.
///
/// Object keys are visited in sorted order and array elements by index, so the
/// reported difference does not depend on how either document was formatted.
pub fn difference(left: &[u8], right: &[u8]) -> Result<Option<Difference>, PolicyError> {
    let left = parse(left, Side::Left)?;
    let right = parse(right, Side::Right)?;

    let found = difference_values(&left, &right);
    debug!(
        event = "Compare",
        phase = "Result",
        equal = found.is_none(),
        difference = ?found.as_ref().map(ToString::to_string)
    );
    Ok(found)
}

/// [`equal`] for documents that are already parsed.
pub fn equal_values(left: &Value, right: &Value) -> bool {
    difference_values(left, right).is_none()
}

/// [`difference`] for documents that are already parsed.
pub fn difference_values(left: &Value, right: &Value) -> Option<Difference> {
    let mut path = Vec::new();
    first_difference(left, right, &mut path)
}

fn parse(bytes: &[u8], side: Side) -> Result<Value, PolicyError> {
    serde_json::from_slice(bytes)
        .inspect(|_| trace!(event = "Compare", phase = "Parsed", side = %side, bytes = bytes.len()))
        .map_err(|err| {
            debug!(event = "Compare", phase = "Parse", side = %side, error = %err);
            PolicyError::Syntax(err)
        })
}

fn first_difference<'a>(
    left: &'a Value,
    right: &'a Value,
    path: &mut Vec<Segment<'a>>,
) -> Option<Difference> {
    let mismatch = match (left, right) {
        (Value::Object(l), Value::Object(r)) => {
            for key in l.keys().chain(r.keys()).unique().sorted() {
                let (lv, rv) = match (l.get(key), r.get(key)) {
                    (Some(lv), Some(rv)) => (lv, rv),
                    (lv, _) => {
                        let present_in = if lv.is_some() { Side::Left } else { Side::Right };
                        return Some(Difference {
                            path: render_path(path),
                            mismatch: Mismatch::MissingKey {
                                key: key.clone(),
                                present_in,
                            },
                        });
                    }
                };

                path.push(Segment::Key(key));
                let found = first_difference(lv, rv, path);
                path.pop();
                if found.is_some() {
                    return found;
                }
            }
            return None;
        }
        (Value::Array(l), Value::Array(r)) => {
            if l.len() != r.len() {
                Mismatch::Length {
                    left: l.len(),
                    right: r.len(),
                }
            } else {
                for (index, (lv, rv)) in l.iter().zip(r).enumerate() {
                    path.push(Segment::Index(index));
                    let found = first_difference(lv, rv, path);
                    path.pop();
                    if found.is_some() {
                        return found;
                    }
                }
                return None;
            }
        }
        (Value::Number(l), Value::Number(r)) if numbers_equal(l, r) => return None,
        (Value::String(l), Value::String(r)) if l == r => return None,
        (Value::Bool(l), Value::Bool(r)) if l == r => return None,
        (Value::Null, Value::Null) => return None,
        (l, r) if JsonKind::of(l) == JsonKind::of(r) => Mismatch::Value {
            left: l.clone(),
            right: r.clone(),
        },
        (l, r) => Mismatch::Kind {
            left: JsonKind::of(l),
            right: JsonKind::of(r),
        },
    };

    Some(Difference {
        path: render_path(path),
        mismatch,
    })
}

/// Integers compare exactly and floats compare as `f64`. An integer and a float
/// are equal only when the float is integral and has the same integer value.
fn numbers_equal(left: &Number, right: &Number) -> bool {
    match (integer_value(left), integer_value(right)) {
        (Some(l), Some(r)) => l == r,
        (Some(int), None) => right.as_f64().and_then(integral_float) == Some(int),
        (None, Some(int)) => left.as_f64().and_then(integral_float) == Some(int),
        (None, None) => left.as_f64() == right.as_f64(),
    }
}

fn integer_value(number: &Number) -> Option<i128> {
    number
        .as_i64()
        .map(i128::from)
        .or_else(|| number.as_u64().map(i128::from))
}

fn integral_float(value: f64) -> Option<i128> {
    // i128::MAX is just below 2^127
    let in_range = value.abs() < 2f64.powi(127);
    (value.is_finite() && value.fract() == 0.0 && in_range).then(|| value as i128)
}
