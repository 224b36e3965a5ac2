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

//! Split a mixed export into Windows events and DNS queries.
//!
//! Field presence is judged over the whole record set: a field "exists" when
//! any record carries it, and records lacking it simply fail the value test.

use crate::parser::RecordSet;

/// Case-sensitive marker in `source`/`sourcetype` of Windows event log records
pub const WINDOWS_MARKER: &str = "WinEventLog";

/// Case-insensitive marker in `sourcetype`/`source` of DNS records
pub const DNS_MARKER: &str = "dns";

const WINDOWS_SIGNAL_FIELDS: [&str; 2] = ["source", "sourcetype"];
const DNS_SIGNAL_FIELDS: [&str; 2] = ["sourcetype", "source"];

/// Fields whose presence anywhere in the set marks the whole set as DNS
pub const DNS_HINT_FIELDS: [&str; 5] = ["query", "query_name", "domain", "dest_dns", "dns_query"];

/// The two typed subsets derived from one record set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedView {
    pub windows_events: RecordSet,
    pub dns_queries: RecordSet,
}

/// First candidate field present in `records`, in candidate order
#[must_use]
pub fn first_present_field<'a>(records: &RecordSet, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .find(|candidate| records.has_field(candidate))
}

/// Partition `records`. Never fails; a record may land in both subsets or neither.
#[must_use]
pub fn classify(records: &RecordSet) -> ClassifiedView {
    let view = ClassifiedView {
        windows_events: records.select(&windows_mask(records)),
        dns_queries: records.select(&dns_mask(records)),
    };
    tracing::info!(
        "Classified {} records: {} Windows events, {} DNS queries",
        records.len(),
        view.windows_events.len(),
        view.dns_queries.len()
    );
    view
}

fn windows_mask(records: &RecordSet) -> Vec<bool> {
    let Some(field) = first_present_field(records, &WINDOWS_SIGNAL_FIELDS) else {
        tracing::debug!("No source/sourcetype field, no Windows events");
        return vec![false; records.len()];
    };

    records
        .iter()
        .map(|record| {
            record
                .text(field)
                .is_some_and(|text| text.contains(WINDOWS_MARKER))
        })
        .collect()
}

fn dns_mask(records: &RecordSet) -> Vec<bool> {
    if let Some(field) = first_present_field(records, &DNS_SIGNAL_FIELDS) {
        return records
            .iter()
            .map(|record| {
                record
                    .text(field)
                    .is_some_and(|text| text.to_lowercase().contains(DNS_MARKER))
            })
            .collect();
    }

    // Coarse: one answer for the entire set, not per record
    let hinted = first_present_field(records, &DNS_HINT_FIELDS);
    tracing::debug!("No sourcetype/source field, DNS hint field: {hinted:?}");
    vec![hinted.is_some(); records.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Record;

    fn keys(set: &RecordSet) -> Vec<String> {
        set.iter()
            .filter_map(|r| r.text("id").map(std::borrow::Cow::into_owned))
            .collect()
    }

    #[test]
    fn test_source_field_drives_both_detectors() {
        let set = RecordSet::new(vec![
            Record::new().with("id", "1").with("source", "WinEventLog:Security"),
            Record::new().with("id", "2").with("source", "stream:DNS"),
            Record::new().with("id", "3").with("source", "winEventLog:lowercase"),
            Record::new().with("id", "4").with("source", "WinEventLog:System"),
        ]);
        let view = classify(&set);

        assert_eq!(keys(&view.windows_events), vec!["1", "4"]);
        assert_eq!(keys(&view.dns_queries), vec!["2"]);
    }

    #[test]
    fn test_sourcetype_wins_for_dns_and_source_wins_for_windows() {
        let set = RecordSet::new(vec![
            Record::new()
                .with("id", "1")
                .with("source", "WinEventLog:Security")
                .with("sourcetype", "stream:dns"),
            Record::new().with("id", "2").with("sourcetype", "WinEventLog:Security"),
        ]);
        let view = classify(&set);

        // `source` exists in the set, so record 2 is judged by its missing `source`
        assert_eq!(keys(&view.windows_events), vec!["1"]);
        assert_eq!(keys(&view.dns_queries), vec!["1"]);
    }

    #[test]
    fn test_sourcetype_only() {
        let set = RecordSet::new(vec![
            Record::new().with("id", "1").with("sourcetype", "WinEventLog:Security"),
            Record::new().with("id", "2").with("sourcetype", "Stream:DNS"),
        ]);
        let view = classify(&set);

        assert_eq!(keys(&view.windows_events), vec!["1"]);
        assert_eq!(keys(&view.dns_queries), vec!["2"]);
    }

    #[test]
    fn test_hint_fields_mark_entire_set() {
        let set = RecordSet::new(vec![
            Record::new().with("id", "1").with("query", "a.example.com"),
            Record::new().with("id", "2").with("EventCode", "4625"),
        ]);
        let view = classify(&set);

        assert!(view.windows_events.is_empty());
        assert_eq!(keys(&view.dns_queries), vec!["1", "2"]);
    }

    #[test]
    fn test_no_signal_at_all() {
        let set = RecordSet::new(vec![Record::new().with("id", "1").with("foo", "bar")]);
        let view = classify(&set);
        assert!(view.windows_events.is_empty());
        assert!(view.dns_queries.is_empty());
    }

    #[test]
    fn test_null_source_never_matches() {
        let set = RecordSet::new(vec![
            Record::new().with("id", "1").with("source", crate::parser::Value::Null),
        ]);
        let view = classify(&set);
        assert!(view.windows_events.is_empty());
        assert!(view.dns_queries.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(classify(&RecordSet::default()), ClassifiedView::default());
    }

    #[test]
    fn test_first_present_field() {
        let set = RecordSet::new(vec![
            Record::new().with("event_id", "1"),
            Record::new().with("EventID", "2"),
        ]);
        assert_eq!(
            first_present_field(&set, &["EventCode", "EventID", "event_id"]),
            Some("EventID")
        );
        assert_eq!(first_present_field(&set, &["missing"]), None);
    }
}
