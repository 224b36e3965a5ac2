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

//! Timestamp normalization for the `_time` field.

use super::record::{Record, RecordSet, Value};
use chrono::{DateTime, NaiveDateTime, Utc};

/// The recognized timestamp field
pub const TIME_FIELD: &str = "_time";

// Offset-carrying layouts seen in Splunk exports besides plain RFC 3339
const ZONED_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

// Zone-less layouts, read as UTC
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Return a copy of `records` with `_time` coerced to [`Value::Timestamp`].
/// Unparseable values become [`Value::Null`]; other fields pass through.
#[must_use]
pub fn normalize_timestamps(records: &RecordSet) -> RecordSet {
    if !records.has_field(TIME_FIELD) {
        return records.clone();
    }

    let normalized: RecordSet = records.iter().map(normalize_record).collect();
    let unparsed = normalized
        .iter()
        .filter(|record| record.get(TIME_FIELD).is_some_and(Value::is_null))
        .count();
    if unparsed > 0 {
        tracing::debug!("{unparsed} records have no usable {TIME_FIELD} value");
    }
    normalized
}

fn normalize_record(record: &Record) -> Record {
    record
        .iter()
        .map(|(name, value)| {
            if name == TIME_FIELD {
                (name, normalize_value(value))
            } else {
                (name, value.clone())
            }
        })
        .collect()
}

/// Normalize a single timestamp value. Already-normalized values are kept.
#[must_use]
pub fn normalize_value(value: &Value) -> Value {
    let parsed = match value {
        Value::Timestamp(ts) => Some(*ts),
        Value::Text(text) => parse_timestamp(text),
        Value::Number(number) => number.as_f64().and_then(from_epoch_seconds),
        Value::Null => None,
    };
    parsed.map_or(Value::Null, Value::Timestamp)
}

/// Parse the timestamp layouts found in event exports
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive_text = text
        .strip_suffix(" UTC")
        .or_else(|| text.strip_suffix('Z'))
        .unwrap_or(text);
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(naive_text, format) {
            return Some(naive.and_utc());
        }
    }

    text.parse::<f64>().ok().and_then(from_epoch_seconds)
}

fn from_epoch_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
    DateTime::from_timestamp(whole as i64, nanos)
}
