//! Sort configuration and the row comparator.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Record;

/// Sort direction for ordering rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the lowercase tag (`"asc"` / `"desc"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// A field the user may sort by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub key: String,
    pub label: String,
}

impl SortOption {
    /// Creates a new sort option.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// The active ordering of a list.
///
/// # Example
///
/// ```
/// use listview_lib::query::{Direction, SortConfig};
///
/// let sort = SortConfig::desc("created_at");
/// assert_eq!(sort.to_value(), "created_at-desc");
/// assert_eq!(SortConfig::parse("created_at-desc"), Some(sort));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: String,
    pub direction: Direction,
}

impl SortConfig {
    /// Creates a sort on `key` in `direction`.
    pub fn new(key: impl Into<String>, direction: Direction) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// Creates an ascending sort on a field.
    pub fn asc(key: impl Into<String>) -> Self {
        Self::new(key, Direction::Asc)
    }

    /// Creates a descending sort on a field.
    pub fn desc(key: impl Into<String>) -> Self {
        Self::new(key, Direction::Desc)
    }

    /// Encodes the sort as a selector value, `{key}-{direction}`.
    pub fn to_value(&self) -> String {
        format!("{}-{}", self.key, self.direction)
    }

    /// Decodes a selector value produced by [`to_value`](Self::to_value).
    ///
    /// Splits on the last `-`, so keys may themselves contain dashes.
    pub fn parse(value: &str) -> Option<Self> {
        let (key, direction) = value.rsplit_once('-')?;
        if key.is_empty() {
            return None;
        }
        Some(Self::new(key, direction.parse().ok()?))
    }

    /// Compares two records under this sort.
    ///
    /// Falsy values (missing, null, `false`, `0`, `""`) always sort last, in
    /// both directions, and compare equal to each other. The direction only
    /// orders the non-falsy values among themselves.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let a = a.get(&self.key).filter(|v| !v.is_falsy());
        let b = b.get(&self.key).filter(|v| !v.is_falsy());

        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => match self.direction {
                Direction::Asc => a.compare(b),
                Direction::Desc => b.compare(a),
            },
        }
    }
}
