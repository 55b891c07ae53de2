//! SilError: Unified error type for sil-restrict public APIs
//!
//! This error type is used throughout the sil-restrict library to provide
//! robust, non-panicking error handling for all public APIs. Every index
//! error carries the offending value together with the valid bound so
//! callers can report the misuse without re-deriving context.

use thiserror::Error;

/// Unified error type for SIL restriction operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SilError {
    /// A set id outside `[0, num_sets)` was passed to a lattice accessor.
    #[error("set index {index} out of range (lattice has {bound} sets)")]
    SetIndexOutOfRange { index: usize, bound: usize },
    /// A collection index outside the arena's collection table.
    #[error("collection index {index} out of range (lattice has {bound} collections)")]
    CollectionIndexOutOfRange { index: usize, bound: usize },
    /// An array handle outside the arena's array table.
    #[error("array index {index} out of range (lattice has {bound} arrays)")]
    ArrayIndexOutOfRange { index: usize, bound: usize },
    /// A matrix handle outside the arena's matrix table.
    #[error("matrix index {index} out of range (lattice has {bound} matrices)")]
    MatrixIndexOutOfRange { index: usize, bound: usize },
    /// A matrix column outside the matrix's column count.
    #[error("matrix column {column} out of range (matrix has {bound} columns)")]
    MatrixColumnOutOfRange { column: usize, bound: usize },
    /// `enumeration(i)` was called with `i >= enumeration_count()`.
    #[error("enumeration index {index} out of range (top set has {bound} enumeration collections)")]
    EnumerationIndexOutOfRange { index: usize, bound: usize },
    /// A chunk id beyond the material cache's slot array.
    #[error("chunk {chunk} out of range ({bound} chunk slots recorded)")]
    ChunkOutOfRange { chunk: u32, bound: usize },
    /// Improper use: the chunk slot exists but the traversal never recorded
    /// a material list for it.
    #[error("no material list recorded for chunk {chunk}")]
    UnknownChunk { chunk: u32 },
    /// A restriction was constructed with a selection vector whose length
    /// differs from the lattice's set count.
    #[error("selection vector has {got} entries, lattice has {want} sets")]
    SelectionLengthMismatch { got: usize, want: usize },
}
