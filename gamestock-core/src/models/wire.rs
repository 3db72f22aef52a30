//! Lenient decoding helpers for server representations.
//!
//! The server leaves most columns nullable and stores listing stock as text,
//! so decoding maps `null` to the type's default and accepts numeric strings.

use serde::de::{self, Deserializer};
use serde::Deserialize;

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Integer that may arrive as a JSON number, a numeric string, or `null`.
pub(crate) fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_int(deserializer)?.unwrap_or(0))
}

/// Like `lenient_int`, but `null` and blank strings stay absent.
pub(crate) fn lenient_opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Numeric>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Numeric::Int(n)) => Ok(Some(n)),
        Some(Numeric::Float(f)) if f.fract() == 0.0 => Ok(Some(f as i64)),
        Some(Numeric::Float(f)) => Err(de::Error::custom(format!("expected integer, got {}", f))),
        Some(Numeric::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Numeric::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected integer, got '{}'", s))),
    }
}

/// Float that may arrive as a JSON number, a numeric string, or `null`.
pub(crate) fn lenient_float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Numeric>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Numeric::Int(n)) => Ok(n as f64),
        Some(Numeric::Float(f)) => Ok(f),
        Some(Numeric::Text(s)) if s.trim().is_empty() => Ok(0.0),
        Some(Numeric::Text(s)) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected number, got '{}'", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default, deserialize_with = "lenient_int")]
        count: i64,
        #[serde(default, deserialize_with = "lenient_float")]
        amount: f64,
    }

    #[test]
    fn test_nulls_become_defaults() {
        let s: Sample =
            serde_json::from_str(r#"{"name": null, "count": null, "amount": null}"#).unwrap();
        assert_eq!(s.name, "");
        assert_eq!(s.count, 0);
        assert_eq!(s.amount, 0.0);
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let s: Sample =
            serde_json::from_str(r#"{"name": "x", "count": "42", "amount": "19.99"}"#).unwrap();
        assert_eq!(s.count, 42);
        assert_eq!(s.amount, 19.99);
    }

    #[test]
    fn test_non_numeric_string_rejected() {
        let result: Result<Sample, _> = serde_json::from_str(r#"{"count": "lots"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_fields_default() {
        let s: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(s.count, 0);
    }
}
