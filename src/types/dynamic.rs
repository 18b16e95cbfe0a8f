//! Schema-variable JSON fields.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// A field whose shape varies between Hyperion versions, contracts or chains.
///
/// Primitives are kept as primitives; arrays and objects are kept as raw JSON in
/// [`Dynamic::Structured`] so nothing is lost when the value is serialized
/// again. A missing or `null` field is [`Dynamic::Absent`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Dynamic {
    #[default]
    Absent,
    Bool(bool),
    Number(Number),
    String(String),
    Structured(Value),
}

impl Dynamic {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) => n.as_u64(),
            Self::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Looks up a key of a structured object payload.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Structured(value) => value.get(key),
            _ => None,
        }
    }

    /// Decodes the payload into a typed record.
    ///
    /// Works for any variant; `Absent` decodes like JSON `null`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_value())
    }

    /// The payload as raw JSON.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Absent => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Structured(value) => value.clone(),
        }
    }
}

impl From<Value> for Dynamic {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            structured @ (Value::Array(_) | Value::Object(_)) => Self::Structured(structured),
        }
    }
}

impl From<Dynamic> for Value {
    fn from(value: Dynamic) -> Self {
        match value {
            Dynamic::Absent => Value::Null,
            Dynamic::Bool(b) => Value::Bool(b),
            Dynamic::Number(n) => Value::Number(n),
            Dynamic::String(s) => Value::String(s),
            Dynamic::Structured(value) => value,
        }
    }
}

impl<'de> Deserialize<'de> for Dynamic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

impl Serialize for Dynamic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Structured(value) => value.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
    #[serde(default)]
    struct Holder {
        #[serde(skip_serializing_if = "Dynamic::is_absent")]
        data: Dynamic,
    }

    #[test]
    fn classifies_values() {
        assert_eq!(Dynamic::from(json!(null)), Dynamic::Absent);
        assert_eq!(Dynamic::from(json!(true)).as_bool(), Some(true));
        assert_eq!(Dynamic::from(json!(42)).as_u64(), Some(42));
        assert_eq!(Dynamic::from(json!("42")).as_u64(), Some(42));
        assert_eq!(Dynamic::from(json!("eosio")).as_str(), Some("eosio"));
        assert!(matches!(
            Dynamic::from(json!([1, 2])),
            Dynamic::Structured(_)
        ));
    }

    #[test]
    fn missing_field_is_absent_and_stays_missing() {
        let holder: Holder = serde_json::from_str("{}").expect("deserialize");
        assert!(holder.data.is_absent());
        assert_eq!(serde_json::to_value(&holder).expect("serialize"), json!({}));
    }

    #[test]
    fn structured_payload_is_preserved() {
        let raw = json!({"data": {"from": "alice", "to": "bob", "memo": "", "nested": [1, {"a": null}]}});
        let holder: Holder = serde_json::from_value(raw.clone()).expect("deserialize");
        assert_eq!(holder.data.get("from"), Some(&json!("alice")));
        assert_eq!(serde_json::to_value(&holder).expect("serialize"), raw);
    }

    #[test]
    fn decode_into_typed_record() {
        #[derive(Deserialize)]
        struct Transfer {
            from: String,
            quantity: String,
        }

        let data = Dynamic::from(json!({"from": "alice", "quantity": "1.0000 EOS"}));
        let transfer: Transfer = data.decode().expect("decode");
        assert_eq!(transfer.from, "alice");
        assert_eq!(transfer.quantity, "1.0000 EOS");
        assert!(Dynamic::from(json!("x")).decode::<Transfer>().is_err());
    }
}
