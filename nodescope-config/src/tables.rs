//! Category-keyed selection containers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Per-category enable flags. Categories without an entry are disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToggleTable<C: Category> {
    entries: BTreeMap<C, bool>,
}

impl<C: Category> ToggleTable<C> {
    pub fn is_enabled(&self, category: C) -> bool {
        self.entries.get(&category).copied().unwrap_or(false)
    }

    /// Enabled categories in tag order.
    pub fn enabled(&self) -> impl Iterator<Item = C> + '_ {
        self.entries
            .iter()
            .filter(|(_, on)| **on)
            .map(|(category, _)| *category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (C, bool)> + '_ {
        self.entries.iter().map(|(category, on)| (*category, *on))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C: Category> Default for ToggleTable<C> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<C: Category> FromIterator<(C, bool)> for ToggleTable<C> {
    fn from_iter<I: IntoIterator<Item = (C, bool)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Categories enabled by being listed. Order and duplicates are kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionList<C: Category> {
    members: Vec<C>,
}

impl<C: Category> SelectionList<C> {
    pub fn contains(&self, category: C) -> bool {
        self.members.contains(&category)
    }

    pub fn as_slice(&self) -> &[C] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<C: Category> Default for SelectionList<C> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

impl<C: Category> FromIterator<C> for SelectionList<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Cache, Checkpoint, SystemTracker};

    #[test]
    fn absent_toggle_is_disabled() {
        let table: ToggleTable<SystemTracker> =
            [(SystemTracker::Cpu, true), (SystemTracker::FreeMem, false)]
                .into_iter()
                .collect();

        assert!(table.is_enabled(SystemTracker::Cpu));
        assert!(!table.is_enabled(SystemTracker::FreeMem));
        assert!(!table.is_enabled(SystemTracker::DriveUsedBytes));
        assert_eq!(table.enabled().collect::<Vec<_>>(), vec![SystemTracker::Cpu]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn empty_toggle_table_enables_nothing() {
        let table = ToggleTable::<Cache>::default();
        assert!(table.is_empty());
        assert!(Cache::ALL.iter().all(|c| !table.is_enabled(*c)));
    }

    #[test]
    fn selection_list_keeps_declared_order() {
        let list: SelectionList<Checkpoint> =
            [Checkpoint::Writer, Checkpoint::Chaser, Checkpoint::Writer]
                .into_iter()
                .collect();

        assert_eq!(
            list.as_slice(),
            &[Checkpoint::Writer, Checkpoint::Chaser, Checkpoint::Writer]
        );
        assert!(list.contains(Checkpoint::Chaser));
        assert!(!list.contains(Checkpoint::Epoch));
    }
}
