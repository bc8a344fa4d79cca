//! Deserializers for backend fields whose shape varies between responses.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// `null` deserializes to the type's default instead of failing.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `"2021-04-01T00:00:00.000Z"` and keeps only the date part.
pub(crate) fn date_only<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: String = null_default(deserializer)?;
    Ok(raw.split('T').next().unwrap_or_default().to_string())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CountRepr {
    Number(u64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Accepts a number, a numeric string, an empty string or `null`. Negative,
/// fractional or otherwise unusable values become `None` instead of failing.
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<CountRepr>::deserialize(deserializer)?;
    Ok(match repr {
        Some(CountRepr::Number(n)) => u32::try_from(n).ok(),
        Some(CountRepr::Float(f)) => {
            let whole = f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX);
            whole.then_some(f as u32)
        }
        Some(CountRepr::Text(s)) => s.trim().parse().ok(),
        Some(CountRepr::Other(_)) | None => None,
    })
}

/// Empty strings are treated as missing.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
