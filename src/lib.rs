// src/lib.rs
pub use codec::{Format, decode, encode, encode_with};
pub use compare::{
    Difference, Mismatch, Side, difference, difference_values, equal, equal_values,
};
pub use error::PolicyError;
pub use types::{
    ConditionMap, EFFECT_ALLOW, EFFECT_DENY, JsonKind, Policy, Statement, StrOrSlice,
    VERSION_2008_10_17, VERSION_2012_10_17,
};

mod codec;
mod compare;
mod error;
mod types;
