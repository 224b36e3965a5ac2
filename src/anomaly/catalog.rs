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

//! Known Windows security event identifiers and their report labels.

/// Identifier → label. Static; not configurable at runtime.
pub const RULE_CATALOG: [(&str, &str); 19] = [
    // Logons
    ("4625", "Failed logon (4625)"),
    ("4624", "Successful logon (4624) - check anomalies"),
    ("4648", "Logon with explicit creds (4648)"),
    ("4672", "Special privileges assigned (4672)"),
    // Account and group management
    ("4720", "User account created (4720)"),
    ("4722", "User enabled (4722)"),
    ("4723", "Password change attempt (4723)"),
    ("4724", "Password reset attempt (4724)"),
    ("4728", "Added to privileged group (4728)"),
    ("4732", "Added to local group (4732)"),
    ("4756", "Added to universal group (4756)"),
    // Processes, services, scheduled tasks
    ("4688", "Process created (4688)"),
    ("4697", "Service installed (4697)"),
    ("7045", "Service created (7045)"),
    ("4698", "Scheduled task created (4698)"),
    ("4699", "Scheduled task deleted (4699)"),
    // Audit log
    ("1102", "Audit log cleared (1102)"),
    ("4719", "Audit policy changed (4719)"),
    ("4703", "User right adjusted (4703)"),
];

/// Label for a catalog identifier
#[must_use]
pub fn label(identifier: &str) -> Option<&'static str> {
    RULE_CATALOG
        .iter()
        .find(|(id, _)| *id == identifier)
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(label("4625"), Some("Failed logon (4625)"));
        assert_eq!(label("1102"), Some("Audit log cleared (1102)"));
        assert_eq!(label("9999"), None);
        assert_eq!(label(" 4625"), None);
    }

    #[test]
    fn test_identifiers_are_unique() {
        let mut ids: Vec<_> = RULE_CATALOG.iter().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), RULE_CATALOG.len());
    }
}
