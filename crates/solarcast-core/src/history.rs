// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of SolarCast.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use crate::types::HistoryEntry;
use serde::Serialize;

/// Successful predictions of the running session, oldest first
///
/// Append-only: entries are never removed, replaced or deduplicated, and
/// the store lives exactly as long as the session that owns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Chart series in insertion order (x = radiation, y = power output)
    pub fn series(&self) -> Vec<(f64, f64)> {
        self.entries.iter().map(HistoryEntry::point).collect()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a SessionHistory {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
