//! Data model types for IAM-style policy documents.
//!
//! Wire names follow the AWS policy grammar: `Version`, `Statement`, `Sid`,
//! `Effect`, `Action`/`NotAction`, `Resource`/`NotResource`,
//! `Principal`/`NotPrincipal` and `Condition`.

mod json_kind;
mod policy;
mod statement;
mod str_or_slice;

pub use json_kind::JsonKind;
pub use policy::{Policy, VERSION_2008_10_17, VERSION_2012_10_17};
pub use statement::{ConditionMap, EFFECT_ALLOW, EFFECT_DENY, Statement};
pub use str_or_slice::StrOrSlice;
