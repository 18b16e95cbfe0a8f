//! Field-level serde adapters shared by the response types.

/// Integers that nodeos emits either as JSON numbers or as decimal strings,
/// depending on magnitude and node version.
///
/// Serializes back as a plain number. Anything that is not an integer (a float,
/// a non-numeric string, `null`, an object) is rejected.
pub(crate) mod number_or_string {
    use serde::de::{self, Deserialize, Deserializer};
    use serde::{Serialize, Serializer};
    use serde_json::Value;
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        match Value::deserialize(deserializer)? {
            Value::Number(number) => number
                .to_string()
                .parse()
                .map_err(|e| de::Error::custom(format!("invalid integer {number}: {e}"))),
            Value::String(text) => text
                .trim()
                .parse()
                .map_err(|e| de::Error::custom(format!("invalid integer string {text:?}: {e}"))),
            other => Err(de::Error::custom(format!(
                "expected an integer or an integer string, found {other}"
            ))),
        }
    }

    pub fn serialize<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        value.serialize(serializer)
    }
}

/// [`number_or_string`] for optional fields: `null` is `None`.
pub(crate) mod option_number_or_string {
    use serde::de::{Deserialize, Deserializer, IntoDeserializer};
    use serde::{Serialize, Serializer};
    use serde_json::Value;
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            value => super::number_or_string::deserialize(value.into_deserializer())
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        value.serialize(serializer)
    }
}
