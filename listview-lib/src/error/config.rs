//! Table configuration errors
//!
//! These are authoring defects in a configuration, surfaced when the
//! configuration is built rather than when it is first applied to data.

/// Error raised while building or loading a table configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Two filter descriptors share the same key.
    #[error("duplicate filter key '{0}'")]
    DuplicateFilterKey(String),

    /// A filter descriptor has an empty key.
    #[error("filter '{label}' has an empty key")]
    EmptyFilterKey { label: String },

    /// A custom filter names a predicate that is not registered.
    #[error("filter '{filter}' references unknown predicate '{name}'")]
    UnknownPredicate { filter: String, name: String },

    /// A custom filter does not name any predicate.
    #[error("custom filter '{filter}' has no predicate")]
    MissingPredicate { filter: String },

    /// The configuration names a custom search that is not registered.
    #[error("unknown custom search '{0}'")]
    UnknownSearch(String),

    /// The configuration document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),
}
