//! Errors from typed access to list record fields

/// A record field could not be read as the requested type.
///
/// List records are schema-free, so every typed read can fail. Predicates and
/// cell renderers usually treat these errors as "no value".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Record has no field '{field}'")]
    Missing { field: String },

    #[error("Field '{field}' has type {actual}, expected {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A string field that should hold a timestamp does not parse as one.
    #[error("Field '{field}' value '{value}' is not a valid {expected}")]
    Unparseable {
        field: String,
        value: String,
        expected: &'static str,
    },
}

impl FieldError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    pub fn unparseable(field: impl Into<String>, value: impl Into<String>, expected: &'static str) -> Self {
        Self::Unparseable {
            field: field.into(),
            value: value.into(),
            expected,
        }
    }

    /// Returns the name of the field the error is about.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::TypeMismatch { field, .. } | Self::Unparseable { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(FieldError::missing("title").to_string(), "Record has no field 'title'");
        assert_eq!(
            FieldError::type_mismatch("views", "int", "string").to_string(),
            "Field 'views' has type string, expected int"
        );
        assert_eq!(
            FieldError::unparseable("published_at", "soon", "datetime").to_string(),
            "Field 'published_at' value 'soon' is not a valid datetime"
        );
    }

    #[test]
    fn test_field_name() {
        assert_eq!(FieldError::missing("id").field(), "id");
        assert_eq!(FieldError::unparseable("end_date", "x", "datetime").field(), "end_date");
    }
}
