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

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Fixed DNS heuristic thresholds; exposed only for calibration
pub const DEFAULT_MIN_QNAME_LENGTH: usize = 40;
pub const DEFAULT_MIN_DOT_COUNT: usize = 5;
pub const DEFAULT_MIN_DIGIT_COUNT: usize = 10;
pub const DEFAULT_RARE_DOMAIN_MAX_COUNT: u64 = 2;
pub const DEFAULT_TOP_N: usize = 10;

/// Heuristic knobs, read from the user config directory when present
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HeuristicConfig {
    #[serde(default)]
    pub dns: DnsThresholds,

    #[serde(default)]
    pub windows: WindowsOptions,
}

/// A query name is "weird" when any one threshold is reached
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DnsThresholds {
    pub min_qname_length: usize,
    pub min_dot_count: usize,
    pub min_digit_count: usize,
    /// Domains seen at most this many times are rare
    pub rare_domain_max_count: u64,
    /// Rows kept per DNS ranking
    pub top_n: usize,
}

impl Default for DnsThresholds {
    fn default() -> Self {
        Self {
            min_qname_length: DEFAULT_MIN_QNAME_LENGTH,
            min_dot_count: DEFAULT_MIN_DOT_COUNT,
            min_digit_count: DEFAULT_MIN_DIGIT_COUNT,
            rare_domain_max_count: DEFAULT_RARE_DOMAIN_MAX_COUNT,
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WindowsOptions {
    /// Rows kept when falling back to raw identifier frequency
    pub fallback_top_n: usize,
}

impl Default for WindowsOptions {
    fn default() -> Self {
        Self {
            fallback_top_n: DEFAULT_TOP_N,
        }
    }
}

impl HeuristicConfig {
    /// Get the path to the per-user config file
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|config_dir| config_dir.join("eventsift").join("config.json"))
    }

    /// Load config from `explicit` or the per-user path, falling back to defaults.
    /// A broken config file is reported and ignored.
    #[must_use]
    pub fn load(explicit: Option<&Path>) -> Self {
        let Some(path) = explicit
            .map(Path::to_path_buf)
            .or_else(|| Self::config_path().filter(|path| path.exists()))
        else {
            tracing::info!("No config found, using default heuristics");
            return Self::default();
        };

        Self::load_from(&path).map_or_else(
            |e| {
                tracing::warn!("Ignoring config {}: {e:#}", path.display());
                Self::default()
            },
            |config| {
                tracing::info!("Loaded heuristic config from {}", path.display());
                config
            },
        )
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Save config as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!("Saved heuristic config to {}", path.display());
        Ok(())
    }
}
