//! Collections: role-tagged groupings of child sets.
//!
//! A collection groups a parent set's children into a named category. Its
//! membership is backed either by an explicit list of child set indices or
//! compactly by an [`crate::lattice::compact::SilArray`] /
//! [`crate::lattice::compact::SilMatrix`]; the backing is a tagged union
//! matched exhaustively at each use site.

use serde::{Deserialize, Serialize};

/// Category role of a collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CollectionRole {
    /// No special meaning to the traverser.
    #[default]
    Generic,
    /// Decomposition into chunk-bearing domains.
    Domain,
    /// Decomposition into material regions.
    Material,
    /// Decomposition into species bins.
    Species,
    /// A user-facing enumerated grouping.
    Enumeration,
}

/// Backing storage of a collection's membership.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionSource {
    /// An explicit, ordered list of child set indices.
    Explicit { subsets: Vec<usize> },
    /// A contiguous run of sets encoded by an array in the arena.
    Array { array: usize },
    /// One column of a matrix in the arena.
    Matrix { matrix: usize, column: usize },
}

/// A named, role-tagged grouping of child sets reachable from a parent set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilCollection {
    name: String,
    role: CollectionRole,
    source: CollectionSource,
}

impl SilCollection {
    /// A collection backed by an explicit subset list.
    pub fn explicit(
        name: impl Into<String>,
        role: CollectionRole,
        subsets: Vec<usize>,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            source: CollectionSource::Explicit { subsets },
        }
    }

    /// A collection backed by array `array` in the arena.
    pub fn from_array(name: impl Into<String>, role: CollectionRole, array: usize) -> Self {
        Self {
            name: name.into(),
            role,
            source: CollectionSource::Array { array },
        }
    }

    /// A collection backed by column `column` of matrix `matrix`.
    pub fn from_matrix(
        name: impl Into<String>,
        role: CollectionRole,
        matrix: usize,
        column: usize,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            source: CollectionSource::Matrix { matrix, column },
        }
    }

    /// Category name (the enumeration name for enumeration collections).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn role(&self) -> CollectionRole {
        self.role
    }

    #[inline]
    pub fn source(&self) -> &CollectionSource {
        &self.source
    }

    /// The explicit subset list, or `None` for compact backings.
    pub fn explicit_subsets(&self) -> Option<&[usize]> {
        match &self.source {
            CollectionSource::Explicit { subsets } => Some(subsets),
            _ => None,
        }
    }
}
