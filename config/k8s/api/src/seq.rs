use serde::{Deserialize, Deserializer};

/// Decodes a sequence, treating an explicit `null` as empty.
///
/// Documents written by Go clients encode a nil slice as `null`. A missing
/// key is still reported as missing unless the field also has a default.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
