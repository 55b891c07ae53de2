//! # sil-restrict
//!
//! sil-restrict is a Rust library for answering subset-selection queries over a
//! Subset Inclusion Lattice (SIL): the DAG describing how a scientific dataset's
//! domains, materials, species and other groupings nest and relate. Given a
//! lattice, a top set, and a per-set selection state, it computes domain lists,
//! uses-all predicates, species/enumeration selections, and cached
//! material-per-chunk lookups for filters and pickers in post-processing
//! pipelines.
//!
//! ## Features
//! - Dense arena lattice with sets, role-tagged collections, and compact
//!   array/matrix encodings for very large decompositions
//! - Per-set selection states (`NoneUsed`/`SomeUsed`/`AllUsed`/`AllUsedOtherProc`)
//!   with checked, element-wise comparable vectors
//! - A restriction traverser with deterministic outputs: domain lists are
//!   sorted and deduplicated, everything else comes back in lattice order
//! - Lazily built, build-once material-search cache per traverser
//! - Serde support on the whole data model for persisting restrictions
//!
//! ## Determinism
//!
//! All traversals visit children in collection-then-subset-list order exactly
//! as stored in the lattice; no randomness anywhere. Callers must not mutate
//! a restriction's selection concurrently with an in-flight traversal; the
//! borrow checker enforces this for safe code.
//!
//! ## Usage
//! Add `sil-restrict` as a dependency in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! sil-restrict = "0.3"
//! ```
//!
//! Lattices and selection vectors are built and owned by database/metadata
//! loading code; queries borrow them read-only. A traverser is cheap and may
//! be constructed per query or reused; one traverser per query context, with
//! external serialization if shared across threads.

// Re-export our major subsystems:
pub mod lattice;
pub mod restriction;
pub mod selection;
pub mod sil_error;

pub use sil_error::SilError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::lattice::{
        CollectionRole, CollectionSource, SilArray, SilCollection, SilLattice, SilMatrix, SilSet,
        SourceView,
    };
    pub use crate::restriction::{
        EnumerationQuery, MaterialQuery, Restriction, RestrictionTraverser, SpeciesQuery,
    };
    pub use crate::selection::{SelectionVector, SetState};
    pub use crate::sil_error::SilError;
}
