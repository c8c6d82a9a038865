//! Case-study selection.

use vigil_types::{CaseCatalog, CaseRecord};

/// Result of a selection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Selection moved to the requested case.
    Selected,
    /// The requested case was already selected.
    Unchanged,
    /// The index was out of range; selection is untouched.
    Rejected,
}

/// One row of the case library list.
#[derive(Debug, Clone, Copy)]
pub struct CaseEntry<'a> {
    pub index: usize,
    pub case: &'a CaseRecord,
    pub selected: bool,
}

/// Holds the case catalog and the index of the case being viewed.
///
/// The selected index always addresses a case: out-of-range requests are
/// ignored rather than clamped.
#[derive(Debug, Clone)]
pub struct CaseStudyExplorer {
    catalog: CaseCatalog,
    selected: usize,
}

impl CaseStudyExplorer {
    #[must_use]
    pub fn new(catalog: CaseCatalog) -> Self {
        Self {
            catalog,
            selected: 0,
        }
    }

    pub fn select(&mut self, index: usize) -> SelectOutcome {
        if index >= self.catalog.len() {
            tracing::debug!(
                index,
                len = self.catalog.len(),
                "Ignoring out-of-range case selection"
            );
            return SelectOutcome::Rejected;
        }
        if index == self.selected {
            return SelectOutcome::Unchanged;
        }
        self.selected = index;
        SelectOutcome::Selected
    }

    pub fn select_id(&mut self, id: &str) -> SelectOutcome {
        match self.catalog.position(id) {
            Some(index) => self.select(index),
            None => SelectOutcome::Rejected,
        }
    }

    pub fn select_next(&mut self) -> SelectOutcome {
        self.select(self.selected.saturating_add(1))
    }

    pub fn select_previous(&mut self) -> SelectOutcome {
        match self.selected.checked_sub(1) {
            Some(index) => self.select(index),
            None => SelectOutcome::Rejected,
        }
    }

    #[must_use]
    pub fn current(&self) -> &CaseRecord {
        &self.catalog.as_slice()[self.selected]
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn catalog(&self) -> &CaseCatalog {
        &self.catalog
    }

    pub fn entries(&self) -> impl Iterator<Item = CaseEntry<'_>> + '_ {
        self.catalog
            .iter()
            .enumerate()
            .map(move |(index, case)| CaseEntry {
                index,
                case,
                selected: index == self.selected,
            })
    }
}
