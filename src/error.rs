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

//! Fatal error types. Data-shape problems never end up here; they degrade
//! to empty or fallback rankings instead.

use std::path::PathBuf;
use thiserror::Error;

/// The input document could not be turned into a record set
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read input {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// An output artifact could not be written
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write table {}: {source}", .path.display())]
    Table { path: PathBuf, source: csv::Error },

    #[error("cannot write chart {}: {source}", .path.display())]
    Chart {
        path: PathBuf,
        source: std::io::Error,
    },
}
