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

//! Ranked (category, key, count) rows and the tally that produces them.

use indexmap::IndexMap;
use std::fmt;
use std::hash::Hash;

/// Which heuristic produced a ranking row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Catalog hit for a known Windows event identifier
    WinEventLog,
    /// Raw identifier frequency, used when the catalog matches nothing
    WinEventLogByFrequency,
    DnsRareDomains,
    DnsWeirdSubdomains,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WinEventLog => "WinEventLog",
            Self::WinEventLogByFrequency => "WinEventLog (top by frequency)",
            Self::DnsRareDomains => "DNS (rare domains)",
            Self::DnsWeirdSubdomains => "DNS (weird subdomains)",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a ranking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub category: Category,
    /// Rule label, domain or query name
    pub key: String,
    /// Always at least 1
    pub count: u64,
}

impl RankedEntry {
    #[must_use]
    pub fn new(category: Category, key: impl Into<String>, count: u64) -> Self {
        Self {
            category,
            key: key.into(),
            count,
        }
    }

    /// `"<category> | <key>"`, used where rows of several categories mix
    #[must_use]
    pub fn qualified_key(&self) -> String {
        format!("{} | {}", self.category, self.key)
    }
}

/// Insertion-ordered occurrence counter.
///
/// Ties keep first-seen order when ranked, since the ranking sort is stable.
#[derive(Debug, Clone)]
pub struct Tally<K> {
    counts: IndexMap<K, u64>,
}

impl<K: Hash + Eq> Tally<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }

    pub fn add(&mut self, key: K) {
        self.add_count(key, 1);
    }

    pub fn add_count(&mut self, key: K, count: u64) {
        *self.counts.entry(key).or_insert(0) += count;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Drop keys for which `keep` returns false
    pub fn retain(&mut self, mut keep: impl FnMut(&K, u64) -> bool) {
        self.counts.retain(|key, count| keep(key, *count));
    }

    /// Keys with their counts, highest count first
    #[must_use]
    pub fn into_ranked(self) -> Vec<(K, u64)> {
        let mut ranked: Vec<(K, u64)> = self.counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl<K: Hash + Eq> Default for Tally<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Self::new();
        for key in iter {
            tally.add(key);
        }
        tally
    }
}

/// Rows sorted by count descending, built fresh by each scorer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
    entries: Vec<RankedEntry>,
}

impl Ranking {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Rank a tally under one category, optionally keeping only the top `limit`
    #[must_use]
    pub fn from_tally<K>(category: Category, tally: Tally<K>, limit: Option<usize>) -> Self
    where
        K: Hash + Eq + Into<String>,
    {
        let ranked = tally.into_ranked();
        let keep = limit.unwrap_or(ranked.len());
        Self {
            entries: ranked
                .into_iter()
                .take(keep)
                .map(|(key, count)| RankedEntry::new(category, key, count))
                .collect(),
        }
    }

    /// Append rankings back to back without re-sorting
    #[must_use]
    pub fn concat(parts: impl IntoIterator<Item = Self>) -> Self {
        Self {
            entries: parts.into_iter().flat_map(|part| part.entries).collect(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` highest rows, stable for equal counts
    #[must_use]
    pub fn top(&self, n: usize) -> Vec<&RankedEntry> {
        let mut rows: Vec<&RankedEntry> = self.entries.iter().collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows.truncate(n);
        rows
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a RankedEntry;
    type IntoIter = std::slice::Iter<'a, RankedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Merge rows by (category, key), summing counts, highest total first
#[must_use]
pub fn aggregate<'a>(rows: impl IntoIterator<Item = &'a RankedEntry>) -> Ranking {
    let mut totals: Tally<(Category, &'a str)> = Tally::new();
    for row in rows {
        totals.add_count((row.category, row.key.as_str()), row.count);
    }

    Ranking {
        entries: totals
            .into_ranked()
            .into_iter()
            .map(|((category, key), count)| RankedEntry::new(category, key, count))
            .collect(),
    }
}
