//! `deserialize_with` helpers for payloads the client only displays. A field
//! the backend sends as `null` or in an unexpected type degrades to its
//! default instead of failing the whole entity.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `null` becomes `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any value that does not decode as `T` becomes `None`.
pub(crate) fn or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Whole-won amount from any non-negative JSON number or numeric string.
/// Fractions are rounded.
pub(crate) fn amount<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_u64().or_else(|| whole(number.as_f64())),
        Value::String(text) => whole(text.trim().parse::<f64>().ok()),
        _ => None,
    };
    Ok(amount)
}

fn whole(value: Option<f64>) -> Option<u64> {
    value
        .filter(|value| value.is_finite() && *value >= 0.0)
        .map(|value| value.round() as u64)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Fixture {
        #[serde(deserialize_with = "null_as_default")]
        tags: Vec<String>,
        #[serde(deserialize_with = "amount")]
        amount: Option<u64>,
        #[serde(deserialize_with = "or_none")]
        count: Option<u32>,
    }

    #[test]
    fn test_nulls_fall_back_to_defaults() {
        let actual: Fixture =
            serde_json::from_value(json!({"tags": null, "amount": null, "count": null})).unwrap();

        assert_eq!(actual, Fixture::default());
    }

    #[test]
    fn test_amount_accepts_any_number() {
        let fixtures = vec![
            (json!(5000), Some(5000)),
            (json!(5000.0), Some(5000)),
            (json!(1999.6), Some(2000)),
            (json!("12000"), Some(12000)),
            (json!(-3), None),
            (json!("free"), None),
        ];

        for (input, expected) in fixtures {
            let actual: Fixture = serde_json::from_value(json!({"amount": input})).unwrap();
            assert_eq!(actual.amount, expected, "Failed for input: {input}");
        }
    }

    #[test]
    fn test_mistyped_value_becomes_none() {
        let actual: Fixture = serde_json::from_value(json!({"count": "many"})).unwrap();
        assert_eq!(actual.count, None);
    }
}
