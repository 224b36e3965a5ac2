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

//! DNS query heuristics: rare registrable domains and structurally weird names.

use crate::anomaly::scorer::SubsetScorer;
use crate::classify::first_present_field;
use crate::config::DnsThresholds;
use crate::core::{Category, Ranking, Tally};
use crate::parser::RecordSet;
use fancy_regex::Regex;
use std::sync::LazyLock;

/// Structured query-name fields, highest priority first
pub const QUERY_FIELDS: [&str; 7] = [
    "query",
    "query_name",
    "dns_query",
    "dest_dns",
    "Domain",
    "domain",
    "QueryName",
];

/// Unstructured text fields searched for a domain when no query field exists
pub const RAW_TEXT_FIELDS: [&str; 3] = ["Message", "_raw", "body"];

// Two or more labels followed by an alphabetic final label
const DOMAIN_PATTERN: &str = r"[a-zA-Z0-9\-]{1,63}(?:\.[a-zA-Z0-9\-]{1,63})+\.[a-zA-Z]{2,}";

static DOMAIN_SHAPE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(DOMAIN_PATTERN)
        .map_err(|e| tracing::warn!("Domain pattern disabled: {e}"))
        .ok()
});

/// Derived structure of one query name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFeatures {
    pub qname: String,
    /// Last two labels; not a public-suffix lookup (`co.uk` is a "domain")
    pub domain: String,
    pub length: usize,
    pub dot_count: usize,
    pub digit_count: usize,
}

impl QueryFeatures {
    /// Extract the query name from field text and derive its features
    #[must_use]
    pub fn from_field_text(text: &str) -> Self {
        Self::from_qname(extract_qname(text))
    }

    #[must_use]
    pub fn from_qname(qname: String) -> Self {
        Self {
            domain: registrable_domain(&qname),
            length: qname.chars().count(),
            dot_count: qname.matches('.').count(),
            digit_count: qname.chars().filter(char::is_ascii_digit).count(),
            qname,
        }
    }

    /// Any single threshold is enough
    #[must_use]
    pub const fn is_weird(&self, thresholds: &DnsThresholds) -> bool {
        self.length >= thresholds.min_qname_length
            || self.dot_count >= thresholds.min_dot_count
            || self.digit_count >= thresholds.min_digit_count
    }
}

/// First domain-shaped substring of `text`, or the whole text; trimmed and lowercased
#[must_use]
pub fn extract_qname(text: &str) -> String {
    let found = DOMAIN_SHAPE
        .as_ref()
        .and_then(|pattern| pattern.find(text).ok().flatten())
        .map(|m| m.as_str());
    found.unwrap_or(text).trim().to_lowercase()
}

/// Crude eTLD+1: names with more than two labels keep their last two
#[must_use]
pub fn registrable_domain(qname: &str) -> String {
    let trimmed = qname.trim_matches('.').to_lowercase();
    let labels: Vec<&str> = trimmed.split('.').collect();
    if labels.len() <= 2 {
        return trimmed;
    }
    labels[labels.len() - 2..].join(".")
}

/// Ranks DNS queries by domain rarity and by name structure
pub struct DnsHeuristicScorer {
    thresholds: DnsThresholds,
}

impl DnsHeuristicScorer {
    #[must_use]
    pub const fn new(thresholds: DnsThresholds) -> Self {
        Self { thresholds }
    }

    /// Domains seen at most `rare_domain_max_count` times across the subset
    fn rare_domains(&self, queries: &[QueryFeatures]) -> Ranking {
        let mut totals: Tally<&str> = queries.iter().map(|q| q.domain.as_str()).collect();
        let max_count = self.thresholds.rare_domain_max_count;
        totals.retain(|domain, count| !domain.is_empty() && count <= max_count);

        Ranking::from_tally(
            Category::DnsRareDomains,
            totals,
            Some(self.thresholds.top_n),
        )
    }

    fn weird_subdomains(&self, queries: &[QueryFeatures]) -> Ranking {
        let weird: Tally<&str> = queries
            .iter()
            .filter(|q| q.is_weird(&self.thresholds))
            .map(|q| q.qname.as_str())
            .collect();

        Ranking::from_tally(
            Category::DnsWeirdSubdomains,
            weird,
            Some(self.thresholds.top_n),
        )
    }
}

impl Default for DnsHeuristicScorer {
    fn default() -> Self {
        Self::new(DnsThresholds::default())
    }
}

impl SubsetScorer for DnsHeuristicScorer {
    fn name(&self) -> &'static str {
        "DNS"
    }

    fn score(&self, records: &RecordSet) -> Ranking {
        if records.is_empty() {
            return Ranking::empty();
        }

        let field = first_present_field(records, &QUERY_FIELDS)
            .or_else(|| first_present_field(records, &RAW_TEXT_FIELDS));
        let Some(field) = field else {
            tracing::debug!("No query name or raw text field in DNS records");
            return Ranking::empty();
        };
        tracing::debug!("Using {field} as the query name source");

        let queries: Vec<QueryFeatures> = records
            .iter()
            .filter_map(|record| record.text(field))
            .map(|text| QueryFeatures::from_field_text(&text))
            .filter(|query| !query.qname.is_empty())
            .collect();

        Ranking::concat([self.rare_domains(&queries), self.weird_subdomains(&queries)])
    }
}
