//! Dynamic list record

use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;

use super::Value;
use crate::error::FieldError;

/// One row of a list screen.
///
/// Records hold field values as a `BTreeMap<String, Value>` and never assume
/// a schema beyond the fields a table configuration references. Typed getter
/// methods provide checked access for predicates that need it.
///
/// # Example
///
/// ```
/// use listview_lib::model::Record;
///
/// let record = Record::new()
///     .set("title", "Launch day")
///     .set("is_published", true);
///
/// assert_eq!(record.get_string("title").unwrap(), Some("Launch day"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub(crate) fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the `id` field, if present and not null.
    pub fn id(&self) -> Option<&Value> {
        self.fields.get("id").filter(|v| !v.is_null())
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the field is missing or holds a falsy value.
    pub fn is_falsy(&self, field: &str) -> bool {
        self.fields.get(field).is_none_or(Value::is_falsy)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Returns a mutable reference to all fields.
    pub fn fields_mut(&mut self) -> &mut BTreeMap<String, Value> {
        &mut self.fields
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets an integer field value.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Gets an f64 field value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Float(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(*n as f64)), // Allow widening
            Some(other) => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Gets a date-time field value.
    ///
    /// Strings are accepted when they parse as a timestamp, since the fetch
    /// layer delivers timestamps as JSON strings. Naive timestamps are UTC.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::DateTime(dt)) => Ok(Some(*dt)),
            Some(Value::String(s)) => parse_timestamp(s)
                .map(Some)
                .ok_or_else(|| FieldError::unparseable(field, s.as_str(), "datetime")),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "datetime",
                other.type_name(),
            )),
        }
    }

    /// Gets a nested record field value.
    pub fn get_record(&self, field: &str) -> Result<Option<&Record>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Record(r)) => Ok(Some(r.as_ref())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "record",
                other.type_name(),
            )),
        }
    }
}

/// Parses RFC 3339, `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD` timestamps.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let record = Record::new()
            .set("title", "Hello")
            .set("views", 10i64)
            .set("excerpt", Value::Null);

        assert_eq!(record.get_string("title").unwrap(), Some("Hello"));
        assert_eq!(record.get_int("views").unwrap(), Some(10));
        assert_eq!(record.get_float("views").unwrap(), Some(10.0));
        assert_eq!(record.get_string("excerpt").unwrap(), None);
        assert!(matches!(
            record.get_string("missing"),
            Err(FieldError::Missing { .. })
        ));
        assert!(matches!(
            record.get_bool("title"),
            Err(FieldError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_datetime_from_string() {
        let record = Record::new().set("published_at", "2024-03-01T12:00:00Z");
        let dt = record.get_datetime("published_at").unwrap().unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-01T12:00:00+00:00");

        let naive = Record::new().set("published_at", "2024-03-01 12:00:00");
        assert_eq!(naive.get_datetime("published_at").unwrap(), Some(dt));

        let date = Record::new().set("published_at", "2024-03-01");
        let midnight = date.get_datetime("published_at").unwrap().unwrap();
        assert_eq!(midnight.to_rfc3339(), "2024-03-01T00:00:00+00:00");

        let bad = Record::new().set("published_at", "yesterday");
        assert_eq!(
            bad.get_datetime("published_at"),
            Err(FieldError::unparseable("published_at", "yesterday", "datetime"))
        );
    }

    #[test]
    fn test_id_skips_null() {
        assert!(Record::new().set("id", Value::Null).id().is_none());
        assert_eq!(Record::new().set("id", 7i64).id(), Some(&Value::Int(7)));
    }

    #[test]
    fn test_is_falsy_missing_field() {
        let record = Record::new().set("count", 0i64);
        assert!(record.is_falsy("count"));
        assert!(record.is_falsy("nope"));
    }
}
