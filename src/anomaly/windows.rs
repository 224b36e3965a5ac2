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

use crate::anomaly::catalog;
use crate::anomaly::scorer::SubsetScorer;
use crate::classify::first_present_field;
use crate::config::WindowsOptions;
use crate::core::{Category, Ranking, Tally};
use crate::parser::RecordSet;
use std::borrow::Cow;

/// Candidate identifier fields, highest priority first
pub const IDENTIFIER_FIELDS: [&str; 4] = ["EventCode", "signature_id", "EventID", "event_id"];

/// Counts catalog hits among Windows events.
///
/// When the identifier field exists but no value is in the catalog, the most
/// frequent raw identifiers are reported instead so the table is never empty
/// for a dataset with a different event vocabulary.
pub struct WindowsRuleScorer {
    fallback_top_n: usize,
}

impl WindowsRuleScorer {
    #[must_use]
    pub const fn new(options: &WindowsOptions) -> Self {
        Self {
            fallback_top_n: options.fallback_top_n,
        }
    }
}

impl Default for WindowsRuleScorer {
    fn default() -> Self {
        Self::new(&WindowsOptions::default())
    }
}

impl SubsetScorer for WindowsRuleScorer {
    fn name(&self) -> &'static str {
        "WinEventLog"
    }

    fn score(&self, records: &RecordSet) -> Ranking {
        if records.is_empty() {
            return Ranking::empty();
        }

        let Some(field) = first_present_field(records, &IDENTIFIER_FIELDS) else {
            tracing::debug!("No event identifier field among {IDENTIFIER_FIELDS:?}");
            return Ranking::empty();
        };
        tracing::debug!("Using {field} as the event identifier");

        let identifiers: Vec<String> = records
            .iter()
            .filter_map(|record| record.text(field))
            .map(Cow::into_owned)
            .collect();

        let hits: Tally<&'static str> = identifiers
            .iter()
            .filter_map(|identifier| catalog::label(identifier))
            .collect();

        if hits.is_empty() {
            tracing::info!(
                "No catalog identifiers among {} events, ranking raw {field} frequency",
                identifiers.len()
            );
            let frequency: Tally<String> = identifiers.into_iter().collect();
            return Ranking::from_tally(
                Category::WinEventLogByFrequency,
                frequency,
                Some(self.fallback_top_n),
            );
        }

        Ranking::from_tally(Category::WinEventLog, hits, None)
    }
}
