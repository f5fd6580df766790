//! Lenient deserializers for persisted documents.
//!
//! Older documents were written by hand-rolled code that was not consistent about ids
//! (numbers or strings) or empty maps (missing, `null`, or `{}`). These helpers accept all
//! of those shapes and normalize them on load.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            RawId::Number(id) => Ok(id),
            RawId::Text(text) => text
                .trim()
                .parse::<u64>()
                .map_err(|e| E::custom(format!("invalid id '{}': {}", text, e))),
        }
    }
}

/// Deserializes a Discord id stored either as a number or as a numeric string.
pub fn id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer)?.into_u64()
}

/// Optional variant of [`id`]; `null` and missing keys become `None`.
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer)?
        .map(RawId::into_u64)
        .transpose()
}

/// Treats an explicit `null` the same as a missing key.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
