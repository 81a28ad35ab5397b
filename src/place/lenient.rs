//! Field decoders for documents written by older or hand-edited clients.
//!
//! A stored `null` reads as the field's default, and ratings of any shape
//! are coerced into `0..=MAX_RATING`. A record is only dropped when its
//! body is not an object or a field has an incompatible type.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::RatingInput;

/// `null` (or an absent field, with `#[serde(default)]`) becomes `T::default()`.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Numbers and numeric strings are clamped; anything else is unrated.
pub fn rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let input = match Value::deserialize(deserializer)? {
        Value::Number(n) => RatingInput::Number(n.as_f64().unwrap_or(0.0)),
        Value::String(text) => RatingInput::Text(text),
        _ => return Ok(0),
    };
    Ok(input.coerce())
}
