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

//! Single-pass batch driver: normalize, classify, score, aggregate.

use crate::anomaly::{create_scorers, run_scorer};
use crate::classify::classify;
use crate::config::HeuristicConfig;
use crate::core::{aggregate, Ranking};
use crate::parser::{normalize_timestamps, RecordSet, Value, TIME_FIELD};
use chrono::{DateTime, Utc};

/// Everything one run produces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub windows: Ranking,
    pub dns: Ranking,
    pub combined: Ranking,
    /// Earliest and latest normalized `_time`, if any record had one
    pub time_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

/// Run the whole pipeline over one in-memory record set
#[must_use]
pub fn analyze(records: &RecordSet, config: &HeuristicConfig) -> Analysis {
    let start_time = std::time::Instant::now();

    let normalized = normalize_timestamps(records);
    let time_range = calculate_time_range(&normalized);
    let view = classify(&normalized);

    let (windows_scorer, dns_scorer) = create_scorers(config);
    let windows = run_scorer(&windows_scorer, &view.windows_events);
    let dns = run_scorer(&dns_scorer, &view.dns_queries);
    let combined = aggregate(windows.iter().chain(dns.iter()));

    tracing::info!(
        "Analysis of {} records took {:?}: {} combined rows",
        records.len(),
        start_time.elapsed(),
        combined.len()
    );

    Analysis {
        windows,
        dns,
        combined,
        time_range,
    }
}

fn calculate_time_range(records: &RecordSet) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    records
        .iter()
        .filter_map(|record| match record.get(TIME_FIELD) {
            Some(Value::Timestamp(ts)) => Some(*ts),
            Some(Value::Null | Value::Text(_) | Value::Number(_)) | None => None,
        })
        .fold(None, |range, ts| {
            Some(range.map_or((ts, ts), |(first, last)| (first.min(ts), last.max(ts))))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Category, RankedEntry};
    use crate::parser::{parse_records, Record};

    const MIXED_EXPORT: &str = r#"[
        {"result": {"_time": "2016-08-10 21:46:33.000 UTC", "source": "WinEventLog:Security", "sourcetype": "WinEventLog:Security", "EventCode": "4625"}},
        {"result": {"_time": "2016-08-10 21:47:00.000 UTC", "source": "WinEventLog:Security", "sourcetype": "WinEventLog:Security", "EventCode": "4625"}},
        {"result": {"_time": "2016-08-10 21:48:12.000 UTC", "source": "WinEventLog:Security", "sourcetype": "WinEventLog:Security", "EventCode": "4688"}},
        {"result": {"_time": "2016-08-10 21:49:00.000 UTC", "source": "WinEventLog:System", "sourcetype": "WinEventLog:System", "EventCode": "7036"}},
        {"result": {"_time": "2016-08-10 21:50:00.000 UTC", "source": "stream:dns", "sourcetype": "stream:dns", "query": "www.example.com"}},
        {"result": {"_time": "2016-08-10 21:51:00.000 UTC", "source": "stream:dns", "sourcetype": "stream:dns", "query": "www.example.com"}},
        {"result": {"_time": "2016-08-10 21:52:00.000 UTC", "source": "stream:dns", "sourcetype": "stream:dns", "query": "cdn.example.com"}},
        {"result": {"_time": "not a time", "source": "stream:dns", "sourcetype": "stream:dns", "query": "a1b2c3d4e5f6.x.y.z.tunnel.evil.biz"}},
        {"preview": true}
    ]"#;

    #[test]
    fn test_mixed_export() {
        let records = parse_records(MIXED_EXPORT).unwrap();
        let analysis = analyze(&records, &HeuristicConfig::default());

        assert_eq!(
            analysis.windows.entries(),
            &[
                RankedEntry::new(Category::WinEventLog, "Failed logon (4625)", 2),
                RankedEntry::new(Category::WinEventLog, "Process created (4688)", 1),
            ]
        );
        assert_eq!(
            analysis.dns.entries(),
            &[
                RankedEntry::new(Category::DnsRareDomains, "evil.biz", 1),
                RankedEntry::new(
                    Category::DnsWeirdSubdomains,
                    "a1b2c3d4e5f6.x.y.z.tunnel.evil.biz",
                    1
                ),
            ]
        );
        assert_eq!(analysis.combined.len(), 4);
        assert_eq!(analysis.combined.entries()[0].count, 2);

        let (first, last) = analysis.time_range.unwrap();
        assert_eq!(first.to_rfc3339(), "2016-08-10T21:46:33+00:00");
        assert_eq!(last.to_rfc3339(), "2016-08-10T21:52:00+00:00");
    }

    #[test]
    fn test_empty_input() {
        let analysis = analyze(&RecordSet::default(), &HeuristicConfig::default());
        assert_eq!(analysis, Analysis::default());
    }

    #[test]
    fn test_time_range_ignores_order_and_bad_values() {
        let records: RecordSet = [
            "2016-08-10 21:50:00.000 UTC",
            "garbage",
            "2016-08-10 21:40:00.000 UTC",
            "2016-08-10 21:45:00.000 UTC",
        ]
        .into_iter()
        .map(|time| Record::new().with(TIME_FIELD, time))
        .collect();

        let (first, last) = analyze(&records, &HeuristicConfig::default())
            .time_range
            .unwrap();
        assert_eq!(first.to_rfc3339(), "2016-08-10T21:40:00+00:00");
        assert_eq!(last.to_rfc3339(), "2016-08-10T21:50:00+00:00");
    }

    #[test]
    fn test_config_knobs_reach_scorers() {
        let records = parse_records(MIXED_EXPORT).unwrap();
        let mut config = HeuristicConfig::default();
        config.dns.rare_domain_max_count = 3;

        let analysis = analyze(&records, &config);
        let rare: Vec<_> = analysis
            .dns
            .iter()
            .filter(|e| e.category == Category::DnsRareDomains)
            .map(|e| (e.key.as_str(), e.count))
            .collect();
        assert_eq!(rare, vec![("example.com", 3), ("evil.biz", 1)]);
    }
}
