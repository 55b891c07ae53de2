//! Compact collection encodings: arrays and matrices.
//!
//! Large decompositions (hundreds of thousands of domains, domain-by-material
//! cross products) are encoded as contiguous runs of set indices instead of
//! per-child lists. Both encodings answer the usage queries the traverser
//! needs directly against a selection vector, so callers never iterate their
//! members one discrete set at a time.

use serde::{Deserialize, Serialize};

use crate::selection::{SelectionVector, SetState};

/// A contiguous run of `count` sets starting at index `first_set`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilArray {
    name: String,
    first_set: usize,
    count: usize,
}

impl SilArray {
    pub fn new(name: impl Into<String>, first_set: usize, count: usize) -> Self {
        Self {
            name: name.into(),
            first_set,
            count,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ids of the member sets, in lattice order.
    #[inline]
    pub fn set_ids(&self) -> std::ops::Range<usize> {
        self.first_set..self.first_set + self.count
    }

    /// Aggregate usage of the whole run under `selection`.
    ///
    /// Uniform runs aggregate to their common state, mixtures to
    /// `SomeUsed`; see [`SetState::aggregate`].
    pub fn state(&self, selection: &SelectionVector) -> SetState {
        SetState::aggregate(self.set_ids().map(|id| selection[id]))
    }
}

/// A column-major 2-D grid of sets: each column is one collection's member
/// run, each row is shared across columns (e.g. one material per row, one
/// domain per column; cell `(column, row)` is "that material restricted to
/// that domain").
///
/// # Invariants
///
/// - `row_names.len() == rows`.
/// - Cells occupy the contiguous index range
///   `first_set .. first_set + rows * columns`, column-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilMatrix {
    name: String,
    first_set: usize,
    rows: usize,
    columns: usize,
    row_names: Vec<String>,
}

impl SilMatrix {
    pub fn new(
        name: impl Into<String>,
        first_set: usize,
        columns: usize,
        row_names: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            first_set,
            rows: row_names.len(),
            columns,
            row_names,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Names shared by every column's rows, in row order.
    #[inline]
    pub fn row_names(&self) -> &[String] {
        &self.row_names
    }

    /// Total number of cell sets encoded by this matrix.
    #[inline]
    pub fn num_sets(&self) -> usize {
        self.rows * self.columns
    }

    /// First cell id of the grid.
    #[inline]
    pub fn first_set(&self) -> usize {
        self.first_set
    }

    /// The ids of column `column`'s member sets, in row order.
    ///
    /// Column-major layout makes each column a contiguous run. `column`
    /// must be `< columns()`; collection construction validates this.
    #[inline]
    pub fn column_set_ids(&self, column: usize) -> std::ops::Range<usize> {
        debug_assert!(column < self.columns);
        let start = self.first_set + column * self.rows;
        start..start + self.rows
    }

    /// Aggregate usage of column `column` under `selection`.
    pub fn column_state(&self, column: usize, selection: &SelectionVector) -> SetState {
        SetState::aggregate(self.column_set_ids(column).map(|id| selection[id]))
    }

    /// The row names selected in column `column`, plus whether a genuine
    /// partial selection is in effect (some rows on, some off).
    pub fn column_material_list(
        &self,
        column: usize,
        selection: &SelectionVector,
    ) -> (Vec<String>, bool) {
        let mut names = Vec::new();
        let mut off = 0usize;
        for (row, id) in self.column_set_ids(column).enumerate() {
            if selection[id].is_used() {
                names.push(self.row_names[row].clone());
            } else {
                off += 1;
            }
        }
        let needs_selection = !names.is_empty() && off > 0;
        (names, needs_selection)
    }
}
