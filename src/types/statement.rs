//! A single rule within a policy document.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::str_or_slice::StrOrSlice;

/// Condition block: operator -> condition key -> value(s). Carried through untouched.
pub type ConditionMap = Map<String, Value>;

pub const EFFECT_ALLOW: &str = "Allow";
pub const EFFECT_DENY: &str = "Deny";

/// One statement of an IAM-style policy.
///
/// `Effect` is always written, even when empty. Every other attribute is left out
/// of the output when it is unset or empty. Nothing here checks that `Effect` is
/// a known value or that `Action` and `NotAction` are not both present.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,

    #[serde(default)]
    pub effect: String,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "StrOrSlice::is_empty"
    )]
    pub action: StrOrSlice,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "StrOrSlice::is_empty"
    )]
    pub not_action: StrOrSlice,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "StrOrSlice::is_empty"
    )]
    pub resource: StrOrSlice,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "StrOrSlice::is_empty"
    )]
    pub not_resource: StrOrSlice,

    /// Principals keyed by principal type, e.g. `"AWS"` or `"Service"`.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub principal: BTreeMap<String, StrOrSlice>,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub not_principal: BTreeMap<String, StrOrSlice>,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Map::is_empty"
    )]
    #[schema(value_type = Object)]
    pub condition: ConditionMap,
}

/// Lists and maps decode `null` the same way as an absent key.
fn null_as_empty<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(de).map(Option::unwrap_or_default)
}

impl Statement {
    pub fn new(effect: impl Into<String>) -> Self {
        Statement {
            effect: effect.into(),
            ..Default::default()
        }
    }

    pub fn allow() -> Self {
        Self::new(EFFECT_ALLOW)
    }

    pub fn deny() -> Self {
        Self::new(EFFECT_DENY)
    }

    pub fn with_sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<StrOrSlice>) -> Self {
        self.action = action.into();
        self
    }

    pub fn with_not_action(mut self, not_action: impl Into<StrOrSlice>) -> Self {
        self.not_action = not_action.into();
        self
    }

    pub fn with_resource(mut self, resource: impl Into<StrOrSlice>) -> Self {
        self.resource = resource.into();
        self
    }

    pub fn with_not_resource(mut self, not_resource: impl Into<StrOrSlice>) -> Self {
        self.not_resource = not_resource.into();
        self
    }

    /// Add (or replace) the principals of one principal type.
    pub fn with_principal(
        mut self,
        principal_type: impl Into<String>,
        principals: impl Into<StrOrSlice>,
    ) -> Self {
        self.principal.insert(principal_type.into(), principals.into());
        self
    }

    pub fn with_not_principal(
        mut self,
        principal_type: impl Into<String>,
        principals: impl Into<StrOrSlice>,
    ) -> Self {
        self.not_principal.insert(principal_type.into(), principals.into());
        self
    }

    /// Add (or replace) one condition operator block, e.g. `"StringEquals"`.
    pub fn with_condition(mut self, operator: impl Into<String>, block: Value) -> Self {
        self.condition.insert(operator.into(), block);
        self
    }
}
