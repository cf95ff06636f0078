//! Policy documents.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::codec;
use crate::error::PolicyError;

use super::statement::Statement;

/// The current policy-language version string.
pub const VERSION_2012_10_17: &str = "2012-10-17";
/// The legacy policy-language version string.
pub const VERSION_2008_10_17: &str = "2008-10-17";

/// An IAM-style policy document.
///
/// Both keys are always written. `Statement` is `null` while no statement list has
/// been set, and `[]` once an empty list has been set explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Policy {
    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub statement: Option<Vec<Statement>>,
}

impl Policy {
    /// Create a policy with the given version and no statement list.
    pub fn new(version: impl Into<String>) -> Self {
        Policy {
            version: version.into(),
            statement: None,
        }
    }

    pub fn with_statement(mut self, statement: Statement) -> Self {
        self.add_statement(statement);
        self
    }

    pub fn add_statement(&mut self, statement: Statement) {
        self.statement.get_or_insert_with(Vec::new).push(statement);
    }

    /// The statements, or an empty slice when the list is unset.
    pub fn statements(&self) -> &[Statement] {
        self.statement.as_deref().unwrap_or_default()
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, PolicyError> {
        codec::decode(bytes)
    }

    pub fn to_json(&self) -> Result<Vec<u8>, PolicyError> {
        codec::encode(self)
    }
}
