//! Restrictions: a lattice, a top set, and a per-set selection vector.
//!
//! A restriction describes which subsets of a dataset are currently "in".
//! The lattice is borrowed (it is owned by metadata-loading code and
//! outlives all queries); the selection vector is owned by the restriction
//! so host pipelines can re-pose it between stages. All query algorithms
//! live on [`RestrictionTraverser`].

pub mod traverser;

mod materials;
mod worklist;

pub use traverser::{EnumerationQuery, MaterialQuery, RestrictionTraverser, SpeciesQuery};

use crate::lattice::SilLattice;
use crate::selection::SelectionVector;
use crate::sil_error::SilError;

/// A SIL lattice plus a selection state: the unit queries run against.
#[derive(Clone, Debug)]
pub struct Restriction<'a> {
    lattice: &'a SilLattice,
    top_set: usize,
    selection: SelectionVector,
}

impl<'a> Restriction<'a> {
    /// A restriction rooted at the lattice's own top set.
    ///
    /// # Errors
    /// Returns `Err(SelectionLengthMismatch)` if `selection` does not have
    /// exactly one entry per lattice set.
    pub fn new(lattice: &'a SilLattice, selection: SelectionVector) -> Result<Self, SilError> {
        Self::with_top_set(lattice, lattice.top_set(), selection)
    }

    /// A restriction rooted at an explicit `top_set`.
    ///
    /// # Errors
    /// - `SelectionLengthMismatch` if `selection` length differs from the
    ///   lattice's set count,
    /// - `SetIndexOutOfRange` if `top_set` is unknown (an empty lattice
    ///   with an empty selection is allowed, with `top_set == 0`).
    pub fn with_top_set(
        lattice: &'a SilLattice,
        top_set: usize,
        selection: SelectionVector,
    ) -> Result<Self, SilError> {
        if selection.len() != lattice.num_sets() {
            return Err(SilError::SelectionLengthMismatch {
                got: selection.len(),
                want: lattice.num_sets(),
            });
        }
        if top_set >= lattice.num_sets() && !(top_set == 0 && lattice.num_sets() == 0) {
            return Err(SilError::SetIndexOutOfRange {
                index: top_set,
                bound: lattice.num_sets(),
            });
        }
        Ok(Self {
            lattice,
            top_set,
            selection,
        })
    }

    #[inline]
    pub fn lattice(&self) -> &'a SilLattice {
        self.lattice
    }

    #[inline]
    pub fn top_set(&self) -> usize {
        self.top_set
    }

    #[inline]
    pub fn selection(&self) -> &SelectionVector {
        &self.selection
    }

    /// Mutable access for hosts re-posing the selection between stages.
    ///
    /// The borrow checker prevents mutation while a traverser holds this
    /// restriction, which is exactly the "no mutation concurrent with an
    /// in-flight traversal" contract.
    #[inline]
    pub fn selection_mut(&mut self) -> &mut SelectionVector {
        &mut self.selection
    }

    /// Weak equality between two restrictions of the *same* lattice.
    ///
    /// False when set counts or top sets differ, otherwise an element-wise
    /// comparison of the selection vectors. Deliberately not a structural
    /// equivalence: the caller asserts both restrictions reference the same
    /// underlying lattice, and this is not checked. Used upstream to detect
    /// identical selection requests for pipeline caching.
    pub fn equals(&self, other: &Restriction<'_>) -> bool {
        self.selection.len() == other.selection.len()
            && self.top_set == other.top_set
            && self.selection.states() == other.selection.states()
    }
}
