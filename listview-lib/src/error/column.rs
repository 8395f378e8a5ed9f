//! Column definition errors

/// Error raised when a column set is malformed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColumnError {
    /// Two columns share a key, which would collide as cell render keys.
    #[error("duplicate column key '{0}'")]
    Duplicate(String),
}
