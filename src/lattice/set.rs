//! `SilSet`: a node in the subset inclusion lattice.
//!
//! Sets are stored in a dense arena and addressed by `usize` index
//! (`0..num_sets`). A set carries a human-readable name, an optional
//! external chunk/domain id, and the indices of the collections mapping out
//! of it. A set with no outgoing maps is a leaf.

use serde::{Deserialize, Serialize};

/// A node in the lattice: a domain, a material region, a species bin, or
/// the whole mesh.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilSet {
    name: String,
    chunk: Option<u32>,
    maps_out: Vec<usize>,
}

impl SilSet {
    /// Create a set with no outgoing maps yet.
    pub fn new(name: impl Into<String>, chunk: Option<u32>) -> Self {
        Self {
            name: name.into(),
            chunk,
            maps_out: Vec::new(),
        }
    }

    /// Human-readable name (a material name for material subsets).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// External chunk/domain id, if this set resolves to a data partition.
    ///
    /// All subsets of a chunk-bearing set share its id, so traversals stop
    /// descending once a chunk is found.
    #[inline]
    pub fn chunk(&self) -> Option<u32> {
        self.chunk
    }

    /// Indices of the collections mapping out of this set, in lattice order.
    #[inline]
    pub fn maps_out(&self) -> &[usize] {
        &self.maps_out
    }

    /// Whether this set has no outgoing maps.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.maps_out.is_empty()
    }

    pub(crate) fn push_map_out(&mut self, collection: usize) {
        self.maps_out.push(collection);
    }
}
