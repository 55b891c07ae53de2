//! Selection state: the per-set usage vector of a restriction.
//!
//! Every set in a SIL lattice has one of four usage levels recorded in a
//! [`SelectionVector`] (the "useSet" vector). The vector's length always
//! equals the lattice's total set count; restrictions enforce this at
//! construction.
//!
//! This module provides:
//! - [`SetState`], a one-byte enum of the four usage levels.
//! - [`SelectionVector`], a checked, element-wise comparable wrapper with
//!   the bulk mutators host pipelines use to re-pose a restriction.
//! - An aggregate combinator used by the compact (array/matrix) collection
//!   encodings to answer usage queries over a run of sets without
//!   materializing each one.

use serde::{Deserialize, Serialize};

use crate::sil_error::SilError;

/// Usage level of a single set under the current restriction.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[repr(u8)]
pub enum SetState {
    /// No part of the set is in the selection.
    #[default]
    NoneUsed = 0,
    /// Mixed: some descendants on, some off.
    SomeUsed = 1,
    /// The whole set is in the selection.
    AllUsed = 2,
    /// Fully used, but attributed to a different process/rank. Only the
    /// all-procs domain-list variant treats this as collectable.
    AllUsedOtherProc = 3,
}

impl SetState {
    /// True for every level except `NoneUsed`.
    #[inline]
    pub fn is_used(self) -> bool {
        self != SetState::NoneUsed
    }

    /// Combine the states of a run of sets into one aggregate level.
    ///
    /// A uniform run aggregates to its common state; any mixture aggregates
    /// to `SomeUsed`. An empty run aggregates to `AllUsed` (vacuously fully
    /// used), which keeps the uses-all predicates' vacuous-truth law intact
    /// for empty compact encodings.
    pub fn aggregate<I>(states: I) -> SetState
    where
        I: IntoIterator<Item = SetState>,
    {
        let mut iter = states.into_iter();
        let Some(first) = iter.next() else {
            return SetState::AllUsed;
        };
        for s in iter {
            if s != first {
                return SetState::SomeUsed;
            }
        }
        first
    }
}

/// Per-set usage vector: one [`SetState`] entry per set index.
///
/// # Invariants
///
/// - The length equals the owning lattice's set count. [`crate::restriction::Restriction::new`]
///   checks this once; indexing by ids obtained from the same lattice is
///   then always in bounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SelectionVector {
    states: Vec<SetState>,
}

impl SelectionVector {
    /// A vector of `len` entries, all set to `state`.
    pub fn uniform(len: usize, state: SetState) -> Self {
        Self {
            states: vec![state; len],
        }
    }

    /// A vector of `len` entries, all `AllUsed`.
    pub fn all_used(len: usize) -> Self {
        Self::uniform(len, SetState::AllUsed)
    }

    /// A vector of `len` entries, all `NoneUsed`.
    pub fn none_used(len: usize) -> Self {
        Self::uniform(len, SetState::NoneUsed)
    }

    /// Wrap an explicit state list.
    pub fn from_states(states: Vec<SetState>) -> Self {
        Self { states }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the vector has zero entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Checked lookup of the state for set `id`.
    ///
    /// # Errors
    /// Returns `Err(SetIndexOutOfRange)` if `id >= len()`.
    pub fn state(&self, id: usize) -> Result<SetState, SilError> {
        self.states
            .get(id)
            .copied()
            .ok_or(SilError::SetIndexOutOfRange {
                index: id,
                bound: self.states.len(),
            })
    }

    /// Checked assignment of the state for set `id`.
    ///
    /// # Errors
    /// Returns `Err(SetIndexOutOfRange)` if `id >= len()`.
    pub fn set(&mut self, id: usize, state: SetState) -> Result<(), SilError> {
        let bound = self.states.len();
        let slot = self
            .states
            .get_mut(id)
            .ok_or(SilError::SetIndexOutOfRange { index: id, bound })?;
        *slot = state;
        Ok(())
    }

    /// Overwrite every entry with `state`.
    pub fn fill(&mut self, state: SetState) {
        self.states.fill(state);
    }

    /// The raw state slice, in set-index order.
    #[inline]
    pub fn states(&self) -> &[SetState] {
        &self.states
    }
}

impl std::ops::Index<usize> for SelectionVector {
    type Output = SetState;

    /// Unchecked-style indexing for traversal-internal use; ids obtained
    /// from the lattice a restriction was validated against are in bounds.
    #[inline]
    fn index(&self, id: usize) -> &SetState {
        &self.states[id]
    }
}

impl FromIterator<SetState> for SelectionVector {
    fn from_iter<I: IntoIterator<Item = SetState>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}
