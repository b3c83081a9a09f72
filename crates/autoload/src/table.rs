//! Row and table abstractions for pre-decoded management tables.
//!
//! A table is a snapshot mapping of row key to row. Row keys are OID
//! suffixes (`"12"`, `"12.1"`, `"10.1.1.1"`); rows are field-value pairs
//! keyed by column name.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Key-value tuple representing a column and its value.
pub type FieldValue = (String, String);

/// Collection of column-value pairs for one row.
pub type FieldValues = Vec<FieldValue>;

/// Helper trait for working with field-value collections.
pub trait FieldValuesExt {
    /// Gets the value for a field, if present.
    fn get_field(&self, field: &str) -> Option<&str>;

    /// Gets the value for a field, returning the default if not present.
    fn get_field_or<'a>(&'a self, field: &str, default: &'a str) -> &'a str;

    /// Checks if a field exists.
    fn has_field(&self, field: &str) -> bool;
}

impl FieldValuesExt for FieldValues {
    fn get_field(&self, field: &str) -> Option<&str> {
        self.iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v.as_str())
    }

    fn get_field_or<'a>(&'a self, field: &str, default: &'a str) -> &'a str {
        self.get_field(field).unwrap_or(default)
    }

    fn has_field(&self, field: &str) -> bool {
        self.iter().any(|(f, _)| f == field)
    }
}

/// Builds a FieldValues collection from key-value pairs.
#[macro_export]
macro_rules! field_values {
    ($($field:expr => $value:expr),* $(,)?) => {
        vec![
            $(($field.to_string(), $value.to_string()),)*
        ]
    };
}

/// Row key: a dotted OID suffix.
///
/// Keys order component-wise, numeric components numerically, so `"2"`
/// sorts before `"10"` and `"12.2"` before `"12.10"`. Numerically equal
/// components with different spellings (`"1"`, `"01"`) fall back to text
/// order, so two keys compare equal only when they are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey(String);

impl RowKey {
    pub fn new(key: impl Into<String>) -> Self {
        RowKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dotted components of the key.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// The key as a single integer index, if it is one.
    pub fn as_index(&self) -> Option<u32> {
        self.0.parse().ok()
    }

    /// The leading run of digits of the key (`"12"` for `"12.3"`).
    pub fn leading_index(&self) -> Option<u32> {
        let digits: String = self.0.chars().take_while(char::is_ascii_digit).collect();
        digits.parse().ok()
    }
}

impl Ord for RowKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut lhs = self.components();
        let mut rhs = other.components();
        loop {
            match (lhs.next(), rhs.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(a), Some(b)) => {
                    let ord = match (a.parse::<u64>(), b.parse::<u64>()) {
                        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
                        _ => a.cmp(b),
                    };
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
            }
        }
    }
}

impl PartialOrd for RowKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowKey {
    fn from(s: &str) -> Self {
        RowKey(s.to_string())
    }
}

impl From<String> for RowKey {
    fn from(s: String) -> Self {
        RowKey(s)
    }
}

impl From<u32> for RowKey {
    fn from(index: u32) -> Self {
        RowKey(index.to_string())
    }
}

/// An immutable-by-convention snapshot of one management table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: BTreeMap<RowKey, FieldValues>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a row.
    pub fn insert(&mut self, key: impl Into<RowKey>, row: FieldValues) {
        self.rows.insert(key.into(), row);
    }

    pub fn get(&self, key: impl Into<RowKey>) -> Option<&FieldValues> {
        self.rows.get(&key.into())
    }

    /// Reads one column of one row.
    pub fn field(&self, key: impl Into<RowKey>, field: &str) -> Option<&str> {
        self.get(key).and_then(|row| row.get_field(field))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&RowKey, &FieldValues)> {
        self.rows.iter()
    }
}

impl FromIterator<(RowKey, FieldValues)> for Table {
    fn from_iter<I: IntoIterator<Item = (RowKey, FieldValues)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
