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

use super::record::{Record, RecordSet};
use crate::error::LoadError;
use serde_json::Value as JsonValue;
use std::path::Path;

/// Key under which Splunk-style exports wrap the actual event
const RESULT_KEY: &str = "result";

/// Load a JSON export (array document or newline-delimited values) from disk
pub fn load_records(path: &Path) -> Result<RecordSet, LoadError> {
    let start_time = std::time::Instant::now();
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Read {} bytes from {}", contents.len(), path.display());

    let records = parse_records(&contents).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        "Loaded {} records from {} in {:?}",
        records.len(),
        path.display(),
        start_time.elapsed()
    );
    Ok(records)
}

/// Parse every JSON value in `contents`; top-level arrays are flattened
pub fn parse_records(contents: &str) -> Result<RecordSet, serde_json::Error> {
    let mut entries = Vec::new();
    for value in serde_json::Deserializer::from_str(contents).into_iter::<JsonValue>() {
        match value? {
            JsonValue::Array(items) => entries.extend(items),
            entry @ (JsonValue::Null
            | JsonValue::Bool(_)
            | JsonValue::Number(_)
            | JsonValue::String(_)
            | JsonValue::Object(_)) => entries.push(entry),
        }
    }

    let total = entries.len();
    let records: Vec<Record> = entries.into_iter().filter_map(record_from_entry).collect();
    let skipped = total - records.len();
    if skipped > 0 {
        tracing::debug!("Skipped {skipped} entries that are not objects");
    }
    Ok(RecordSet::new(records))
}

/// Unwrap `{"result": {...}}` entries; plain objects pass through
fn record_from_entry(entry: JsonValue) -> Option<Record> {
    let JsonValue::Object(mut object) = entry else {
        return None;
    };

    if matches!(object.get(RESULT_KEY), Some(JsonValue::Object(_))) {
        if let Some(JsonValue::Object(inner)) = object.remove(RESULT_KEY) {
            object = inner;
        }
    }

    Some(object.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_result_wrapper_and_flat_entries() {
        let doc = r#"[
            {"preview": false, "result": {"source": "WinEventLog:Security", "EventCode": "4625"}},
            {"sourcetype": "stream:dns", "query": "example.com"},
            "not a record",
            42,
            {"result": "scalar result keeps the wrapper"}
        ]"#;
        let records = parse_records(doc).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(
            records.records()[0].text("EventCode").as_deref(),
            Some("4625")
        );
        assert!(!records.records()[0].has_field("preview"));
        assert_eq!(
            records.records()[1].text("query").as_deref(),
            Some("example.com")
        );
        assert!(records.records()[2].has_field("result"));
    }

    #[test]
    fn test_newline_delimited_export() {
        let doc = "{\"result\": {\"a\": 1}}\n{\"b\": null}\n\n[{\"c\": \"x\"}]\n";
        let records = parse_records(doc).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.records()[1].get("b").is_some_and(|v| v.is_null()));
    }

    #[test]
    fn test_stream_skips_scalars_between_records() {
        let doc = "42\n[{\"a\": 1}, \"text\", {\"b\": 2}]\nnull\n{\"result\": {\"c\": 3}}\n";
        let records = parse_records(doc).unwrap();

        assert_eq!(records.len(), 3);
        assert!(records.records()[0].has_field("a"));
        assert!(records.records()[1].has_field("b"));
        assert!(records.records()[2].has_field("c"));
    }

    #[test]
    fn test_field_order_is_preserved() {
        let records = parse_records(r#"[{"z": 1, "a": 2, "m": 3}]"#).unwrap();
        let names: Vec<_> = records.records()[0].iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_records("").unwrap().is_empty());
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse_records(r#"[{"a": 1},"#).is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"result": {{"query": "a.example.com"}}}}]"#).unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_records(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }
}
