//! Labelled target registry for one assignment round.

use std::collections::BTreeMap;

use crate::cell::Cell;
use crate::error::Error;

/// A mapping from a unique label to a target cell.
///
/// Iteration is in label order, which keeps every assignment strategy
/// deterministic. Duplicate registration of a label is rejected and the
/// first registration retained.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetSet {
    targets: BTreeMap<char, Cell>,
}

impl TargetSet {
    /// Create an empty target set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `label` at `cell`.
    ///
    /// Returns [`Error::DuplicateTargetLabel`] if the label is already
    /// present; the existing entry is kept.
    pub fn register(&mut self, label: char, cell: Cell) -> Result<(), Error> {
        if self.targets.contains_key(&label) {
            return Err(Error::DuplicateTargetLabel(label));
        }
        self.targets.insert(label, cell);
        Ok(())
    }

    /// The cell registered under `label`, if any.
    pub fn get(&self, label: char) -> Option<Cell> {
        self.targets.get(&label).copied()
    }

    /// Remove and return the cell registered under `label`.
    pub fn remove(&mut self, label: char) -> Option<Cell> {
        self.targets.remove(&label)
    }

    /// Whether `label` is registered.
    pub fn contains(&self, label: char) -> bool {
        self.targets.contains_key(&label)
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether no targets are registered.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Iterate over `(label, cell)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (char, Cell)> + '_ {
        self.targets.iter().map(|(&label, &cell)| (label, cell))
    }

    /// All labels in order.
    pub fn labels(&self) -> impl Iterator<Item = char> + '_ {
        self.targets.keys().copied()
    }
}

impl FromIterator<(char, Cell)> for TargetSet {
    /// Collect targets, keeping the first cell seen for each label.
    fn from_iter<I: IntoIterator<Item = (char, Cell)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (label, cell) in iter {
            let _ = set.register(label, cell);
        }
        set
    }
}
