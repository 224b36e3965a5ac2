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

//! `EventSift` classifies a mixed Windows event log / DNS query export and
//! ranks suspicious entries with fixed heuristic rules.

pub mod anomaly;
pub mod classify;
pub mod config;
pub mod core;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod report;

pub use config::HeuristicConfig;
pub use pipeline::{analyze, Analysis};
