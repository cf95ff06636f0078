use serde::Serialize;
use serde::de::DeserializeOwned;
use strum_macros::{Display, EnumString};
use tracing::{debug, trace};

use crate::error::PolicyError;

/// Output layout for [`encode_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Format {
    /// No whitespace. This is the canonical wire form.
    #[default]
    Compact,
    /// Two-space indentation, for humans.
    Pretty,
}

/// Serialize `value` to compact JSON bytes.
///
/// Example:
/// ```rust
/// use iampolicy_core::{Policy, encode};
/// let bytes = encode(&Policy::new("12")).unwrap();
/// assert_eq!(bytes, br#"{"Version":"12","Statement":null}"#);
/// ```
pub fn encode<T>(value: &T) -> Result<Vec<u8>, PolicyError>
where
    T: Serialize + ?Sized,
{
    encode_with(value, Format::Compact)
}

pub fn encode_with<T>(value: &T, format: Format) -> Result<Vec<u8>, PolicyError>
where
    T: Serialize + ?Sized,
{
    let bytes = match format {
        Format::Compact => serde_json::to_vec(value),
        Format::Pretty => serde_json::to_vec_pretty(value),
    }
    .map_err(PolicyError::Encode)?;

    trace!(event = "Encode", format = %format, bytes = bytes.len());
    Ok(bytes)
}

/// Deserialize exactly one JSON document from `bytes` into `T`.
///
/// Malformed input (including trailing characters) yields
/// [`PolicyError::Syntax`]; well-formed input of the wrong shape yields
/// [`PolicyError::TypeMismatch`] carrying the path of the offending field.
///
/// Example:
/// ```rust
/// use iampolicy_core::{StrOrSlice, decode};
/// let field: StrOrSlice = decode(br#""x""#).unwrap();
/// assert_eq!(field.as_slice(), ["x".to_string()]);
/// ```
pub fn decode<T>(bytes: &[u8]) -> Result<T, PolicyError>
where
    T: DeserializeOwned,
{
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut de).inspect_err(|err| {
        debug!(event = "Decode", phase = "Error", path = %err.path(), error = %err.inner());
    })?;
    de.end()?;

    trace!(event = "Decode", phase = "Done", bytes = bytes.len());
    Ok(value)
}
