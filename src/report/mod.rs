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

//! Writes ranking tables (CSV) and top-10 bar charts (SVG) to an output directory.

pub mod chart;

use crate::core::{RankedEntry, Ranking};
use crate::error::ReportError;
use crate::pipeline::Analysis;
use chart::{render_bar_chart, Bar, MAX_BARS};
use std::path::{Path, PathBuf};

/// CSV header shared by every table
pub const TABLE_HEADER: [&str; 3] = ["category", "key", "count"];

/// File names and chart title for one ranking
struct Artifact {
    table: &'static str,
    chart: &'static str,
    title: &'static str,
    /// Prefix bar labels with their category
    qualified_labels: bool,
}

const WINDOWS_ARTIFACT: Artifact = Artifact {
    table: "win_suspicious_top.csv",
    chart: "win_top10.svg",
    title: "Top-10 suspicious WinEventLog events",
    qualified_labels: false,
};

const DNS_ARTIFACT: Artifact = Artifact {
    table: "dns_suspicious_top.csv",
    chart: "dns_top10.svg",
    title: "Top-10 suspicious DNS events",
    qualified_labels: false,
};

const COMBINED_ARTIFACT: Artifact = Artifact {
    table: "combined_top.csv",
    chart: "combined_top10.svg",
    title: "Top-10 suspicious events (combined)",
    qualified_labels: true,
};

/// Persists an [`Analysis`] under one output directory
pub struct ReportSink {
    output_dir: PathBuf,
    charts: bool,
}

impl ReportSink {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            charts: true,
        }
    }

    /// Skip chart rendering, tables only
    #[must_use]
    pub const fn without_charts(mut self) -> Self {
        self.charts = false;
        self
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write all tables and non-empty charts; returns the paths written
    pub fn write(&self, analysis: &Analysis) -> Result<Vec<PathBuf>, ReportError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| ReportError::OutputDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let mut written = Vec::new();
        for (artifact, ranking) in [
            (&WINDOWS_ARTIFACT, &analysis.windows),
            (&DNS_ARTIFACT, &analysis.dns),
            (&COMBINED_ARTIFACT, &analysis.combined),
        ] {
            let table_path = self.output_dir.join(artifact.table);
            write_table(&table_path, ranking)?;
            written.push(table_path);

            if !self.charts {
                continue;
            }
            if ranking.is_empty() {
                tracing::debug!("Skipping {}: no rows", artifact.chart);
                continue;
            }
            let chart_path = self.output_dir.join(artifact.chart);
            write_chart(&chart_path, artifact, ranking)?;
            written.push(chart_path);
        }

        tracing::info!(
            "Wrote {} report files to {}",
            written.len(),
            self.output_dir.display()
        );
        Ok(written)
    }
}

/// Write `ranking` as CSV; an empty ranking still gets its header
pub fn write_table(path: &Path, ranking: &Ranking) -> Result<(), ReportError> {
    let to_error = |source: csv::Error| ReportError::Table {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(to_error)?;
    writer.write_record(TABLE_HEADER).map_err(to_error)?;
    for entry in ranking {
        writer
            .write_record([
                entry.category.as_str(),
                entry.key.as_str(),
                entry.count.to_string().as_str(),
            ])
            .map_err(to_error)?;
    }
    writer.flush().map_err(|e| to_error(e.into()))?;
    Ok(())
}

fn write_chart(path: &Path, artifact: &Artifact, ranking: &Ranking) -> Result<(), ReportError> {
    let bars: Vec<Bar> = ranking
        .top(MAX_BARS)
        .into_iter()
        .map(|entry| chart_bar(entry, artifact.qualified_labels))
        .collect();

    std::fs::write(path, render_bar_chart(artifact.title, &bars)).map_err(|source| {
        ReportError::Chart {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn chart_bar(entry: &RankedEntry, qualified: bool) -> Bar {
    Bar {
        label: if qualified {
            entry.qualified_key()
        } else {
            entry.key.clone()
        },
        count: entry.count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{aggregate, Category, Tally};

    fn sample_analysis() -> Analysis {
        let windows = Ranking::from_tally(
            Category::WinEventLog,
            Tally::from_iter(["Failed logon (4625)", "Failed logon (4625)"]),
            None,
        );
        let combined = aggregate(windows.iter());
        Analysis {
            windows,
            dns: Ranking::empty(),
            combined,
            time_range: None,
        }
    }

    #[test]
    fn test_writes_tables_and_non_empty_charts() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output");
        let written = ReportSink::new(&out).write(&sample_analysis()).unwrap();

        let names: Vec<_> = written
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                "win_suspicious_top.csv",
                "win_top10.svg",
                "dns_suspicious_top.csv",
                "combined_top.csv",
                "combined_top10.svg",
            ]
        );

        let table = std::fs::read_to_string(out.join("win_suspicious_top.csv")).unwrap();
        assert_eq!(
            table,
            "category,key,count\nWinEventLog,Failed logon (4625),2\n"
        );
        let empty = std::fs::read_to_string(out.join("dns_suspicious_top.csv")).unwrap();
        assert_eq!(empty, "category,key,count\n");
        assert!(!out.join("dns_top10.svg").exists());

        let combined_chart = std::fs::read_to_string(out.join("combined_top10.svg")).unwrap();
        assert!(combined_chart.contains("WinEventLog | Failed logon (4625)"));
    }

    #[test]
    fn test_without_charts() {
        let dir = tempfile::tempdir().unwrap();
        let written = ReportSink::new(dir.path())
            .without_charts()
            .write(&sample_analysis())
            .unwrap();
        assert_eq!(written.len(), 3);
        assert!(written.iter().all(|p| p.extension().is_some_and(|e| e == "csv")));
    }

    #[test]
    fn test_keys_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        let ranking = Ranking::from_tally(
            Category::DnsWeirdSubdomains,
            Tally::from_iter(["a,b"]),
            None,
        );
        write_table(&path, &ranking).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "category,key,count\nDNS (weird subdomains),\"a,b\",1\n"
        );
    }
}
