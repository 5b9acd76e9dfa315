//! Lenient deserializers for records written by other clients.

use serde::{Deserialize, Deserializer};

/// `null` and missing fields both decode to the type's default.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a string or a JSON number and keeps its text form.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        String(String),
        Integer(i64),
        Float(f64),
        Null(()),
    }

    Ok(match Text::deserialize(deserializer)? {
        Text::String(value) => value,
        Text::Integer(value) => value.to_string(),
        Text::Float(value) => value.to_string(),
        Text::Null(()) => String::new(),
    })
}

/// Accepts whole or fractional JSON numbers, rounding to the nearest
/// integer. `null` decodes to zero. Negative values are rejected.
pub fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + Default,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Null(()),
    }

    let value = match Number::deserialize(deserializer)? {
        Number::Unsigned(value) => value,
        Number::Float(value) if value.is_finite() && value >= 0.0 => value.round() as u64,
        Number::Signed(value) => {
            return Err(serde::de::Error::custom(format!(
                "expected a non-negative number, got {value}"
            )));
        }
        Number::Float(value) => {
            return Err(serde::de::Error::custom(format!(
                "expected a non-negative number, got {value}"
            )));
        }
        Number::Null(()) => return Ok(T::default()),
    };

    T::try_from(value).map_err(|_| serde::de::Error::custom(format!("{value} is out of range")))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Times {
        #[serde(default, deserialize_with = "super::whole_number")]
        minutes: u32,
        #[serde(default, deserialize_with = "super::whole_number")]
        servings: u16,
    }

    #[test]
    fn test_whole_number_rounds_fractions() {
        let times: Times =
            serde_json::from_value(json!({ "minutes": 12.5, "servings": 3.2 })).unwrap();

        assert_eq!(times.minutes, 13);
        assert_eq!(times.servings, 3);
    }

    #[test]
    fn test_whole_number_defaults() {
        let times: Times = serde_json::from_value(json!({ "minutes": null })).unwrap();

        assert_eq!(times.minutes, 0);
        assert_eq!(times.servings, 0);
    }

    #[test]
    fn test_whole_number_rejects_negative_and_overflow() {
        assert!(serde_json::from_value::<Times>(json!({ "minutes": -5 })).is_err());
        assert!(serde_json::from_value::<Times>(json!({ "minutes": -0.5 })).is_err());
        assert!(serde_json::from_value::<Times>(json!({ "servings": 70000 })).is_err());
    }
}
