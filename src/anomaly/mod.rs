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

pub mod catalog;
pub mod dns;
pub mod scorer;
pub mod windows;

use crate::config::HeuristicConfig;
use dns::DnsHeuristicScorer;
use windows::WindowsRuleScorer;

pub use scorer::{run_scorer, SubsetScorer};

/// Build the Windows and DNS scorers from the configured knobs
#[must_use]
pub fn create_scorers(config: &HeuristicConfig) -> (WindowsRuleScorer, DnsHeuristicScorer) {
    (
        WindowsRuleScorer::new(&config.windows),
        DnsHeuristicScorer::new(config.dns.clone()),
    )
}
