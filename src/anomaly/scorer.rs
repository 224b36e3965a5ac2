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

use crate::core::Ranking;
use crate::parser::RecordSet;

/// Trait for the per-source ranking heuristics
pub trait SubsetScorer {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Rank one classified subset. Unusable input yields an empty ranking.
    fn score(&self, records: &RecordSet) -> Ranking;
}

/// Run a scorer and log what it produced
#[must_use]
pub fn run_scorer(scorer: &dyn SubsetScorer, records: &RecordSet) -> Ranking {
    let start_time = std::time::Instant::now();
    let ranking = scorer.score(records);
    tracing::info!(
        "{} scorer ranked {} rows from {} records in {:?}",
        scorer.name(),
        ranking.len(),
        records.len(),
        start_time.elapsed()
    );
    ranking
}
