//! Custom serialization for Record.
//!
//! The fetch layer hands over flat JSON arrays of objects. Each object maps
//! onto one [`Record`]:
//! - Integers become `Value::Int`, other numbers `Value::Float`
//! - Strings stay strings, including ISO timestamps, so comparisons and
//!   substring search see exactly what the backend sent
//! - Nested objects become `Value::Record`, arrays `Value::List`

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Record;
use super::Value;

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Deserialization
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object representing a list record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();
        while let Some(key) = map.next_key::<String>()? {
            let value: serde_json::Value = map.next_value()?;
            record.fields.insert(key, Value::from(value));
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_flat_object() {
        let json = r#"{
            "id": 3,
            "title": "Launch day",
            "rating": 4.5,
            "is_published": false,
            "published_at": null,
            "created_at": "2024-05-01T08:00:00Z"
        }"#;

        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.get("id"), Some(&Value::Int(3)));
        assert_eq!(record.get("rating"), Some(&Value::Float(4.5)));
        assert_eq!(record.get("is_published"), Some(&Value::Bool(false)));
        assert_eq!(record.get("published_at"), Some(&Value::Null));
        assert_eq!(
            record.get("created_at"),
            Some(&Value::from("2024-05-01T08:00:00Z"))
        );
    }

    #[test]
    fn test_deserialize_nested() {
        let json = r#"{"author": {"name": "Ada"}, "tags": ["news", "launch"]}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        let author = record.get_record("author").unwrap().unwrap();
        assert_eq!(author.get_string("name").unwrap(), Some("Ada"));
        assert_eq!(
            record.get("tags"),
            Some(&Value::List(vec![Value::from("news"), Value::from("launch")]))
        );
    }

    #[test]
    fn test_deserialize_array_of_records() {
        let json = r#"[{"id": 1}, {"id": 2}]"#;
        let records: Vec<Record> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_serialize_keeps_nulls() {
        let record = Record::new().set("a", Value::Null).set("b", 1i64);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"a":null,"b":1}"#);
    }
}
