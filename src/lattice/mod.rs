//! Top-level module for the subset inclusion lattice structure.
//!
//! This module provides the read-only view restriction queries are built on:
//! - Set and collection records and their role tags
//! - Array and matrix compact encodings
//! - The `SilLattice` arena with the accessor operations traversals consume
//!
//! Lattices are assembled by database/metadata loaders through the arena's
//! builder methods; queries never mutate them.

pub mod arena;
pub mod collection;
pub mod compact;
pub mod set;

pub use arena::{SilLattice, SourceView, SubsetIds};
pub use collection::{CollectionRole, CollectionSource, SilCollection};
pub use compact::{SilArray, SilMatrix};
pub use set::SilSet;
