// EventSift - GPL-3.0-or-later
// This file is part of EventSift.
//
// Copyright (C) 2025 EventSift contributors
//
// EventSift is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// EventSift is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with EventSift.  If not, see <https://www.gnu.org/licenses/>.

//! Flat key-value records and the record sets built from them.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use std::borrow::Cow;

/// A scalar field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Number(serde_json::Number),
    /// Canonical temporal value produced by the timestamp normalizer
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Coerce the value to text for comparisons. Null has no text.
    #[must_use]
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Null => None,
            Self::Text(text) => Some(Cow::Borrowed(text)),
            Self::Number(number) => Some(Cow::Owned(number.to_string())),
            Self::Timestamp(ts) => Some(Cow::Owned(
                ts.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            )),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Text(flag.to_string()),
            serde_json::Value::Number(number) => Self::Number(number),
            serde_json::Value::String(text) => Self::Text(text),
            // Multi-value fields are kept as their compact JSON text
            nested @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Self::Text(nested.to_string())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Self::Number(number.into())
    }
}

/// One flat, sparse log entry. Field order is kept as loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Text of a field, or `None` when the field is absent or null
    #[must_use]
    pub fn text(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).and_then(Value::as_text)
    }

    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Ordered collection of records with no enforced schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    #[must_use]
    pub const fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Whether any record in the set carries `name` (column semantics)
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.records.iter().any(|record| record.has_field(name))
    }

    /// Copy of the records whose mask entry is `true`, order preserved
    #[must_use]
    pub fn select(&self, mask: &[bool]) -> Self {
        self.records
            .iter()
            .zip(mask)
            .filter(|(_, keep)| **keep)
            .map(|(record, _)| record.clone())
            .collect()
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_coercion() {
        assert_eq!(Value::from("4625").as_text().as_deref(), Some("4625"));
        assert_eq!(Value::from(4625_i64).as_text().as_deref(), Some("4625"));
        assert_eq!(Value::Null.as_text(), None);
        assert_eq!(
            Value::from(serde_json::json!(true)).as_text().as_deref(),
            Some("true")
        );
        assert_eq!(
            Value::from(serde_json::json!(["a", "b"])).as_text().as_deref(),
            Some(r#"["a","b"]"#)
        );
    }

    #[test]
    fn test_field_presence_is_set_wide() {
        let set = RecordSet::new(vec![
            Record::new().with("source", "a"),
            Record::new().with("sourcetype", "b"),
        ]);
        assert!(set.has_field("source"));
        assert!(set.has_field("sourcetype"));
        assert!(!set.has_field("query"));
    }

    #[test]
    fn test_select_preserves_order() {
        let set: RecordSet = (0..5_i64).map(|i| Record::new().with("n", i)).collect();
        let picked = set.select(&[true, false, true, false, true]);
        let ns: Vec<_> = picked
            .iter()
            .filter_map(|r| r.text("n").map(Cow::into_owned))
            .collect();
        assert_eq!(ns, vec!["0", "2", "4"]);
    }
}
