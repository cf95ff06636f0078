//! A JSON attribute holding "a string or a list of strings".
//!
//! IAM-style policy languages allow `Action`, `Resource` and principal values to
//! be written either as `"s3:GetObject"` or as `["s3:GetObject", "s3:PutObject"]`.
//! [`StrOrSlice`] keeps the logical contents as an ordered list and picks the
//! wire shape from the element count alone:
//!
//! - exactly one element: a bare JSON string
//! - any other count, including zero: a JSON array

use std::fmt::{self, Display, Formatter, Result as FmtResult};
use std::ops::Deref;

use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use utoipa::openapi::schema::{ArrayBuilder, ObjectBuilder, OneOfBuilder, Schema, Type};
use utoipa::openapi::RefOr;
use utoipa::{PartialSchema, ToSchema};

/// An ordered list of strings with the singular-collapse wire convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct StrOrSlice(Vec<String>);

/// Wire shape of a [`StrOrSlice`], derived purely from its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cardinality<'a> {
    One(&'a str),
    Many(&'a [String]),
}

impl StrOrSlice {
    pub fn new() -> Self {
        StrOrSlice(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, value: impl Into<String>) {
        self.0.push(value.into());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// True when the value would be written as a bare string.
    pub fn is_single(&self) -> bool {
        matches!(self.cardinality(), Cardinality::One(_))
    }

    fn cardinality(&self) -> Cardinality<'_> {
        match self.0.as_slice() {
            [one] => Cardinality::One(one),
            many => Cardinality::Many(many),
        }
    }
}

impl Deref for StrOrSlice {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<String>> for StrOrSlice {
    fn from(values: Vec<String>) -> Self {
        StrOrSlice(values)
    }
}

impl From<String> for StrOrSlice {
    fn from(value: String) -> Self {
        StrOrSlice(vec![value])
    }
}

impl From<&str> for StrOrSlice {
    fn from(value: &str) -> Self {
        StrOrSlice(vec![value.to_string()])
    }
}

impl<const N: usize> From<[&str; N]> for StrOrSlice {
    fn from(values: [&str; N]) -> Self {
        values.into_iter().collect()
    }
}

impl From<StrOrSlice> for Vec<String> {
    fn from(value: StrOrSlice) -> Self {
        value.0
    }
}

impl<S: Into<String>> FromIterator<S> for StrOrSlice {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        StrOrSlice(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for StrOrSlice {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StrOrSlice {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Renders the compact wire form, e.g. `"a"` or `["a","b"]`.
impl Display for StrOrSlice {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl Serialize for StrOrSlice {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.cardinality() {
            Cardinality::One(value) => ser.serialize_str(value),
            Cardinality::Many(values) => ser.collect_seq(values),
        }
    }
}

struct StrOrSliceVisitor;

impl<'de> Visitor<'de> for StrOrSliceVisitor {
    type Value = StrOrSlice;

    fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("a string or a list of strings")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(StrOrSlice(vec![value.to_string()]))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(StrOrSlice(vec![value]))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element::<String>()? {
            values.push(value);
        }
        Ok(StrOrSlice(values))
    }
}

impl<'de> Deserialize<'de> for StrOrSlice {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        de.deserialize_any(StrOrSliceVisitor)
    }
}

impl PartialSchema for StrOrSlice {
    fn schema() -> RefOr<Schema> {
        OneOfBuilder::new()
            .item(ObjectBuilder::new().schema_type(Type::String))
            .item(ArrayBuilder::new().items(ObjectBuilder::new().schema_type(Type::String)))
            .into()
    }
}

impl ToSchema for StrOrSlice {}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use yare::parameterized;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[parameterized(
        empty = { &[], "[]" },
        single = { &["test"], r#""test""# },
        pair = { &["test", "slice"], r#"["test","slice"]"# },
        triple = { &["a", "b", "c"], r#"["a","b","c"]"# },
        single_empty_string = { &[""], r#""""# },
    )]
    fn test_wire_shape(values: &[&str], expected: &str) {
        let field = StrOrSlice::from(strings(values));
        let encoded = serde_json::to_string(&field).unwrap();
        assert_eq!(encoded, expected);
        assert_eq!(field.is_single(), values.len() == 1);

        let decoded: StrOrSlice = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, field);
    }

    #[parameterized(
        bare_string = { r#""x""#, &["x"] },
        list = { r#"["x", "y"]"#, &["x", "y"] },
        one_element_list = { r#"["x"]"#, &["x"] },
        empty_list = { "[]", &[] },
        escaped = { r#""arn:aws:s3:::bucket/*""#, &["arn:aws:s3:::bucket/*"] },
    )]
    fn test_decode_accepts(input: &str, expected: &[&str]) {
        let decoded: StrOrSlice = serde_json::from_str(input).unwrap();
        assert_eq!(decoded.as_slice(), strings(expected).as_slice());
    }

    #[parameterized(
        object = { r#"{"a": 1}"#, "invalid type: map, expected a string or a list of strings" },
        number = { "42", "invalid type: integer `42`, expected a string or a list of strings" },
        boolean = { "true", "invalid type: boolean `true`, expected a string or a list of strings" },
        null = { "null", "invalid type: null, expected a string or a list of strings" },
        non_string_element = { r#"["x", 1]"#, "invalid type: integer `1`, expected a string" },
        nested_list = { r#"[["x"]]"#, "invalid type: sequence, expected a string" },
    )]
    fn test_decode_rejects(input: &str, expected_message: &str) {
        let err = serde_json::from_str::<StrOrSlice>(input).unwrap_err();
        assert!(err.is_data(), "expected a data error, got {err}");
        assert!(
            err.to_string().starts_with(expected_message),
            "unexpected message: {err}"
        );
    }

    #[test]
    fn test_one_element_list_collapses_on_reencode() {
        let decoded: StrOrSlice = serde_json::from_str(r#"["only"]"#).unwrap();
        assert_snapshot!(decoded.to_string(), @r#""only""#);
    }

    #[test]
    fn test_preserves_order_and_duplicates() {
        let field = StrOrSlice::from(["b", "a", "b"]);
        let decoded: StrOrSlice = serde_json::from_str(&field.to_string()).unwrap();
        assert_eq!(decoded.into_vec(), strings(&["b", "a", "b"]));
    }

    #[test]
    fn test_push_changes_wire_shape() {
        let mut field = StrOrSlice::new();
        assert_snapshot!(field.to_string(), @"[]");
        field.push("s3:GetObject");
        assert_snapshot!(field.to_string(), @r#""s3:GetObject""#);
        field.push("s3:PutObject");
        assert_snapshot!(field.to_string(), @r#"["s3:GetObject","s3:PutObject"]"#);
    }

    #[test]
    fn test_iteration_and_deref() {
        let field: StrOrSlice = vec!["a", "b"].into_iter().collect();
        assert_eq!(field.len(), 2);
        assert_eq!(field.first().map(String::as_str), Some("a"));
        let joined: Vec<&str> = (&field).into_iter().map(String::as_str).collect();
        assert_eq!(joined, vec!["a", "b"]);
        let owned: Vec<String> = field.into_iter().collect();
        assert_eq!(owned, strings(&["a", "b"]));
    }

    #[test]
    fn test_inside_struct_matches_field_wise_collapse() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Pair {
            #[serde(rename = "SS0")]
            ss0: StrOrSlice,
            #[serde(rename = "SS1")]
            ss1: StrOrSlice,
        }

        let pair = Pair {
            ss0: StrOrSlice::from("test"),
            ss1: StrOrSlice::from(["test", "slice"]),
        };
        assert_snapshot!(
            serde_json::to_string(&pair).unwrap(),
            @r#"{"SS0":"test","SS1":["test","slice"]}"#
        );

        let decoded: Pair =
            serde_json::from_str(r#"{"SS0": "test", "SS1": ["test", "slice"]}"#).unwrap();
        assert_eq!(decoded.ss0, pair.ss0);
        assert_eq!(decoded.ss1, pair.ss1);
    }

    #[test]
    fn test_schema_is_one_of() {
        let schema = serde_json::to_value(StrOrSlice::schema()).unwrap();
        let variants = schema["oneOf"].as_array().unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0]["type"], "string");
        assert_eq!(variants[1]["type"], "array");
    }
}
