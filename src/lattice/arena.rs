//! `SilLattice`: dense arena for sets, collections, arrays and matrices.
//!
//! The lattice is owned by metadata-loading code and consumed read-only by
//! restriction queries. Sets, collections and the compact encodings live in
//! flat vectors addressed by dense indices; the traverser borrows the arena,
//! so no reference-counted handles are needed and the arena outlives all
//! queries.
//!
//! # Invariants
//!
//! - Every collection index stored in a set's `maps_out` is valid.
//! - Every source handle (array index, matrix index + column) stored in a
//!   collection is valid, and every explicit subset id is `< num_sets()`.
//! - The top set index is valid whenever the lattice has any sets.
//!
//! The builder methods check these at insertion time, so accessors taking
//! indices produced by the arena itself cannot go out of bounds.

use serde::{Deserialize, Serialize};

use crate::lattice::collection::{CollectionSource, SilCollection};
use crate::lattice::compact::{SilArray, SilMatrix};
use crate::lattice::set::SilSet;
use crate::sil_error::SilError;

/// Resolved view of a collection's backing, produced by
/// [`SilLattice::classify_source`].
#[derive(Debug)]
pub enum SourceView<'a> {
    /// Discrete child list.
    Explicit(&'a [usize]),
    /// Contiguous run encoded by an array.
    Array(&'a SilArray),
    /// One column of a matrix.
    Matrix(&'a SilMatrix, usize),
}

/// Ordered child ids of a collection, whatever its backing.
#[derive(Debug, Clone)]
pub enum SubsetIds<'a> {
    Explicit(std::slice::Iter<'a, usize>),
    Run(std::ops::Range<usize>),
}

impl Iterator for SubsetIds<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            SubsetIds::Explicit(iter) => iter.next().copied(),
            SubsetIds::Run(range) => range.next(),
        }
    }
}

/// The subset inclusion lattice arena.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilLattice {
    sets: Vec<SilSet>,
    collections: Vec<SilCollection>,
    arrays: Vec<SilArray>,
    matrices: Vec<SilMatrix>,
    top_set: usize,
}

impl SilLattice {
    /// An empty lattice. Populate with `add_set` / `add_collection` /
    /// `add_array` / `add_matrix`, then mark the root with `set_top`.
    pub fn new() -> Self {
        Self::default()
    }

    //=== Builder seam (used by host loaders and tests) ===

    /// Append a set and return its dense index.
    pub fn add_set(&mut self, set: SilSet) -> usize {
        self.sets.push(set);
        self.sets.len() - 1
    }

    /// Append `count` sets named `prefix0..prefixN`, optionally chunk-bearing
    /// starting at `first_chunk`, and return the index of the first.
    ///
    /// This is how compact (array/matrix) runs get their backing entries.
    pub fn add_set_run(
        &mut self,
        prefix: &str,
        count: usize,
        first_chunk: Option<u32>,
    ) -> usize {
        let first = self.sets.len();
        for i in 0..count {
            let chunk = first_chunk.map(|c| c + i as u32);
            self.sets.push(SilSet::new(format!("{prefix}{i}"), chunk));
        }
        first
    }

    /// Append an array encoding.
    ///
    /// # Errors
    /// Returns `Err(SetIndexOutOfRange)` if the array's run extends past the
    /// sets added so far; add the backing sets first.
    pub fn add_array(&mut self, array: SilArray) -> Result<usize, SilError> {
        let end = array.set_ids().end;
        if end > self.sets.len() {
            return Err(SilError::SetIndexOutOfRange {
                index: end.saturating_sub(1),
                bound: self.sets.len(),
            });
        }
        self.arrays.push(array);
        Ok(self.arrays.len() - 1)
    }

    /// Append a matrix encoding.
    ///
    /// # Errors
    /// Returns `Err(SetIndexOutOfRange)` if the matrix's cell range extends
    /// past the sets added so far; add the backing sets first.
    pub fn add_matrix(&mut self, matrix: SilMatrix) -> Result<usize, SilError> {
        let end = matrix.first_set() + matrix.num_sets();
        if end > self.sets.len() {
            return Err(SilError::SetIndexOutOfRange {
                index: end.saturating_sub(1),
                bound: self.sets.len(),
            });
        }
        self.matrices.push(matrix);
        Ok(self.matrices.len() - 1)
    }

    /// Append `collection` and record it as an outgoing map of `parent`.
    ///
    /// Returns the collection's index.
    ///
    /// # Errors
    /// - `SetIndexOutOfRange` if `parent` or any explicit subset id is
    ///   unknown,
    /// - `ArrayIndexOutOfRange` / `MatrixIndexOutOfRange` for dangling
    ///   source handles,
    /// - `MatrixColumnOutOfRange` if the column exceeds the matrix.
    pub fn add_collection(
        &mut self,
        parent: usize,
        collection: SilCollection,
    ) -> Result<usize, SilError> {
        let num_sets = self.sets.len();
        if parent >= num_sets {
            return Err(SilError::SetIndexOutOfRange {
                index: parent,
                bound: num_sets,
            });
        }
        match collection.source() {
            CollectionSource::Explicit { subsets } => {
                for &id in subsets {
                    if id >= num_sets {
                        return Err(SilError::SetIndexOutOfRange {
                            index: id,
                            bound: num_sets,
                        });
                    }
                }
            }
            CollectionSource::Array { array } => {
                if *array >= self.arrays.len() {
                    return Err(SilError::ArrayIndexOutOfRange {
                        index: *array,
                        bound: self.arrays.len(),
                    });
                }
            }
            CollectionSource::Matrix { matrix, column } => {
                let Some(m) = self.matrices.get(*matrix) else {
                    return Err(SilError::MatrixIndexOutOfRange {
                        index: *matrix,
                        bound: self.matrices.len(),
                    });
                };
                if *column >= m.columns() {
                    return Err(SilError::MatrixColumnOutOfRange {
                        column: *column,
                        bound: m.columns(),
                    });
                }
            }
        }
        self.collections.push(collection);
        let index = self.collections.len() - 1;
        self.sets[parent].push_map_out(index);
        Ok(index)
    }

    /// Mark `id` as the distinguished top set queries start from.
    ///
    /// # Errors
    /// Returns `Err(SetIndexOutOfRange)` for an unknown id.
    pub fn set_top(&mut self, id: usize) -> Result<(), SilError> {
        if id >= self.sets.len() {
            return Err(SilError::SetIndexOutOfRange {
                index: id,
                bound: self.sets.len(),
            });
        }
        self.top_set = id;
        Ok(())
    }

    //=== Accessor operations consumed by the traverser ===

    /// Total number of sets in the lattice.
    #[inline]
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Checked set lookup.
    ///
    /// # Errors
    /// Returns `Err(SetIndexOutOfRange)` if `id >= num_sets()`.
    pub fn set(&self, id: usize) -> Result<&SilSet, SilError> {
        self.sets.get(id).ok_or(SilError::SetIndexOutOfRange {
            index: id,
            bound: self.sets.len(),
        })
    }

    /// Checked collection lookup.
    ///
    /// # Errors
    /// Returns `Err(CollectionIndexOutOfRange)` for an unknown index.
    pub fn collection(&self, index: usize) -> Result<&SilCollection, SilError> {
        self.collections
            .get(index)
            .ok_or(SilError::CollectionIndexOutOfRange {
                index,
                bound: self.collections.len(),
            })
    }

    /// External chunk/domain id of set `id`, if any.
    ///
    /// # Errors
    /// Returns `Err(SetIndexOutOfRange)` if `id >= num_sets()`.
    pub fn chunk_of(&self, id: usize) -> Result<Option<u32>, SilError> {
        Ok(self.set(id)?.chunk())
    }

    /// Cheap existence check: does set `id` have any outgoing maps?
    ///
    /// Unknown ids answer `false`; traversals use this to skip leaves
    /// without materializing a full set lookup.
    #[inline]
    pub fn set_has_maps_out(&self, id: usize) -> bool {
        self.sets.get(id).is_some_and(|s| !s.is_leaf())
    }

    /// Resolve a collection's backing to concrete handles.
    ///
    /// # Errors
    /// Returns `Err(CollectionIndexOutOfRange)` for an unknown index. The
    /// handles inside a stored collection are valid by construction.
    pub fn classify_source(&self, index: usize) -> Result<SourceView<'_>, SilError> {
        Ok(self.source_view(self.collection(index)?))
    }

    /// Index of the distinguished top set.
    #[inline]
    pub fn top_set(&self) -> usize {
        self.top_set
    }

    /// All sets, in index order.
    #[inline]
    pub fn sets(&self) -> &[SilSet] {
        &self.sets
    }

    /// All collections, in index order.
    #[inline]
    pub fn collections(&self) -> &[SilCollection] {
        &self.collections
    }

    /// All arrays, in index order.
    #[inline]
    pub fn arrays(&self) -> &[SilArray] {
        &self.arrays
    }

    /// All matrices, in index order.
    #[inline]
    pub fn matrices(&self) -> &[SilMatrix] {
        &self.matrices
    }

    /// Ordered child ids of collection `index`, whatever its backing:
    /// the explicit list, the array run, or the matrix column cells.
    ///
    /// # Panics
    /// Panics if `index` is out of range, like slice indexing; use
    /// [`classify_source`](Self::classify_source) for a checked variant.
    pub fn subset_ids(&self, index: usize) -> SubsetIds<'_> {
        match self.source_view(&self.collections[index]) {
            SourceView::Explicit(subsets) => SubsetIds::Explicit(subsets.iter()),
            SourceView::Array(array) => SubsetIds::Run(array.set_ids()),
            SourceView::Matrix(matrix, column) => SubsetIds::Run(matrix.column_set_ids(column)),
        }
    }

    /// Resolve handles for a collection already borrowed from this arena.
    pub(crate) fn source_view<'a>(&'a self, collection: &'a SilCollection) -> SourceView<'a> {
        match collection.source() {
            CollectionSource::Explicit { subsets } => SourceView::Explicit(subsets.as_slice()),
            CollectionSource::Array { array } => SourceView::Array(&self.arrays[*array]),
            CollectionSource::Matrix { matrix, column } => {
                SourceView::Matrix(&self.matrices[*matrix], *column)
            }
        }
    }
}
