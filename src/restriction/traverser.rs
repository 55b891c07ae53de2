//! `RestrictionTraverser`: query algorithms over a restriction.
//!
//! All queries are stateless-per-call graph walks starting at the
//! restriction's top set, consulting the selection vector for every set
//! reached. The one piece of persistent state is the lazily built
//! material-search cache, constructed at most once per traverser behind a
//! `OnceCell` (the build-once-reuse pattern used for derived-topology
//! caches elsewhere in this ecosystem).
//!
//! Output determinism: domain lists are sorted and deduplicated;
//! enumeration/species flags and material names come back in lattice order.

use itertools::Itertools;
use once_cell::sync::OnceCell;

use crate::lattice::{CollectionRole, SilLattice, SourceView};
use crate::restriction::Restriction;
use crate::restriction::materials::MaterialCache;
use crate::restriction::worklist::{MaskedWorklist, Worklist};
use crate::selection::{SelectionVector, SetState};
use crate::sil_error::SilError;

/// One enumeration-role grouping of the top set: which of its values are
/// selected, in lattice order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumerationQuery {
    /// Category name of the enumeration collection.
    pub name: String,
    /// One flag per child set, true iff its state is not `NoneUsed`.
    pub selected: Vec<bool>,
}

impl EnumerationQuery {
    /// True iff at least one enumeration value is off.
    pub fn is_restricted(&self) -> bool {
        self.selected.iter().any(|&on| !on)
    }
}

/// Species selection of the top set, in lattice order.
///
/// If the top set carries more than one species-role collection, the result
/// reflects the last one iterated. This is a documented limitation, not
/// something callers should rely on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpeciesQuery {
    /// One flag per species subset, true iff its state is not `NoneUsed`.
    pub selected: Vec<bool>,
}

impl SpeciesQuery {
    /// True iff at least one species is off.
    pub fn is_restricted(&self) -> bool {
        self.selected.iter().any(|&on| !on)
    }
}

/// Borrowed view of one chunk's cached material selection.
#[derive(Clone, Copy, Debug)]
pub struct MaterialQuery<'a> {
    /// Names of the materials selected for the chunk, in lattice order.
    pub names: &'a [String],
    /// Whether material selection is actually needed: false when all of the
    /// chunk's materials are used, or none are (selection is then a no-op).
    pub needs_selection: bool,
}

/// Stateless-per-call query engine over one [`Restriction`].
///
/// Cheap to construct; may be built per query or reused. If an instance is
/// shared across threads, callers serialize access externally; the design
/// assumes one traverser per query context.
pub struct RestrictionTraverser<'a> {
    restriction: &'a Restriction<'a>,
    material_cache: OnceCell<MaterialCache>,
}

impl<'a> RestrictionTraverser<'a> {
    pub fn new(restriction: &'a Restriction<'a>) -> Self {
        Self {
            restriction,
            material_cache: OnceCell::new(),
        }
    }

    #[inline]
    fn lattice(&self) -> &'a SilLattice {
        self.restriction.lattice()
    }

    #[inline]
    fn selection(&self) -> &SelectionVector {
        self.restriction.selection()
    }

    //=== Direct per-set accessors ===

    /// Whether set `id` is used at all under this restriction.
    ///
    /// # Errors
    /// Returns `Err(SetIndexOutOfRange)` if `id >= num_sets()`.
    pub fn uses_data(&self, id: usize) -> Result<bool, SilError> {
        Ok(self.uses_set_data(id)?.is_used())
    }

    /// The raw selection state of set `id`.
    ///
    /// # Errors
    /// Returns `Err(SetIndexOutOfRange)` if `id >= num_sets()`.
    pub fn uses_set_data(&self, id: usize) -> Result<SetState, SilError> {
        if id >= self.lattice().num_sets() {
            return Err(SilError::SetIndexOutOfRange {
                index: id,
                bound: self.lattice().num_sets(),
            });
        }
        self.selection().state(id)
    }

    //=== Enumeration and species extraction ===

    /// Number of enumeration-role collections mapping out of the top set.
    pub fn enumeration_count(&self) -> usize {
        self.top_maps_out()
            .iter()
            .filter(|&&c| self.lattice().collections()[c].role() == CollectionRole::Enumeration)
            .count()
    }

    /// The `index`-th enumeration-role collection of the top set.
    ///
    /// # Errors
    /// Returns `Err(EnumerationIndexOutOfRange)` if
    /// `index >= enumeration_count()`; callers are expected to consult
    /// [`enumeration_count`](Self::enumeration_count) first.
    pub fn enumeration(&self, index: usize) -> Result<EnumerationQuery, SilError> {
        let lattice = self.lattice();
        let mut remaining = index;
        for &c in self.top_maps_out() {
            let collection = &lattice.collections()[c];
            if collection.role() != CollectionRole::Enumeration {
                continue;
            }
            if remaining > 0 {
                remaining -= 1;
                continue;
            }
            let selected = lattice
                .subset_ids(c)
                .map(|id| self.selection()[id].is_used())
                .collect();
            return Ok(EnumerationQuery {
                name: collection.name().to_string(),
                selected,
            });
        }
        Err(SilError::EnumerationIndexOutOfRange {
            index,
            bound: self.enumeration_count(),
        })
    }

    /// Species selection across the top set's species-role collections.
    ///
    /// With several species collections, the last one iterated wins; with
    /// none, the result is empty and unrestricted.
    pub fn species(&self) -> SpeciesQuery {
        let lattice = self.lattice();
        let mut query = SpeciesQuery::default();
        for &c in self.top_maps_out() {
            if lattice.collections()[c].role() != CollectionRole::Species {
                continue;
            }
            query.selected = lattice
                .subset_ids(c)
                .map(|id| self.selection()[id].is_used())
                .collect();
        }
        query
    }

    //=== Domain lists ===

    /// Sorted, duplicate-free list of the chunk ids selected on this
    /// process (states `AllUsed` and `SomeUsed`).
    pub fn domain_list(&self) -> Vec<u32> {
        self.domain_list_impl(false)
    }

    /// Sorted, duplicate-free list of the chunk ids selected across all
    /// processes (additionally collects `AllUsedOtherProc`).
    pub fn domain_list_all_procs(&self) -> Vec<u32> {
        self.domain_list_impl(true)
    }

    fn domain_list_impl(&self, all_procs: bool) -> Vec<u32> {
        let lattice = self.lattice();
        if lattice.num_sets() == 0 {
            return Vec::new();
        }
        let selection = self.selection();
        let mut found = Vec::new();
        let mut worklist = Worklist::seeded(self.restriction.top_set());
        while let Some(id) = worklist.next() {
            let state = selection[id];
            if state == SetState::NoneUsed {
                continue;
            }
            let set = &lattice.sets()[id];
            if let Some(chunk) = set.chunk() {
                // A chunk-bearing set is a leaf of this walk: all of its
                // subsets share the same chunk id.
                let collect = match state {
                    SetState::AllUsed | SetState::SomeUsed => true,
                    SetState::AllUsedOtherProc => all_procs,
                    SetState::NoneUsed => false,
                };
                if collect {
                    found.push(chunk);
                }
            } else {
                for &c in set.maps_out() {
                    // Only discrete outgoing maps; compact encodings do not
                    // contribute to the descent here.
                    if let Some(subsets) = lattice.collections()[c].explicit_subsets() {
                        worklist.extend(subsets.iter().copied());
                    }
                }
            }
        }
        found.sort_unstable();
        found.into_iter().dedup().collect()
    }

    //=== Uses-all predicates ===

    /// Whether every set reachable from the top set is used, with compact
    /// encodings required to aggregate to `AllUsed`.
    pub fn uses_all_data(&self) -> bool {
        let lattice = self.lattice();
        if lattice.num_sets() == 0 {
            return true;
        }
        let selection = self.selection();
        let mut worklist = Worklist::seeded(self.restriction.top_set());
        while let Some(id) = worklist.next() {
            if !selection[id].is_used() {
                return false;
            }
            for &c in lattice.sets()[id].maps_out() {
                match lattice.source_view(&lattice.collections()[c]) {
                    SourceView::Explicit(subsets) => {
                        worklist.extend(subsets.iter().copied());
                    }
                    SourceView::Array(array) => {
                        if array.state(selection) != SetState::AllUsed {
                            return false;
                        }
                    }
                    SourceView::Matrix(matrix, column) => {
                        if matrix.column_state(column, selection) != SetState::AllUsed {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }

    /// Whether every domain in the top set's domain-role collection is used.
    ///
    /// With no domain collection the mesh is assumed single-domain and the
    /// answer is `true`. Shallow: only the immediate domain collection is
    /// consulted, never nested assemblies.
    pub fn uses_all_domains(&self) -> bool {
        let lattice = self.lattice();
        for &c in self.top_maps_out() {
            if lattice.collections()[c].role() != CollectionRole::Domain {
                continue;
            }
            return lattice
                .subset_ids(c)
                .all(|id| self.selection()[id].is_used());
        }
        true
    }

    /// Whether every material in the top set's material-role collections is
    /// used. Vacuously true with no material collections, or when a
    /// previously built material cache came up empty.
    ///
    /// Shallow, like [`species`](Self::species): only the top set's
    /// immediate outgoing collections are inspected.
    pub fn uses_all_materials(&self) -> bool {
        if let Some(cache) = self.material_cache.get() {
            if cache.is_empty() {
                return true;
            }
        }
        let lattice = self.lattice();
        for &c in self.top_maps_out() {
            if lattice.collections()[c].role() != CollectionRole::Material {
                continue;
            }
            if !lattice
                .subset_ids(c)
                .all(|id| self.selection()[id].is_used())
            {
                return false;
            }
        }
        true
    }

    //=== Material lookup ===

    /// The cached material selection for `chunk`, building the cache on
    /// first use.
    ///
    /// When the walk recorded no materials for any chunk, every query
    /// answers an empty list with `needs_selection == false`.
    ///
    /// # Errors
    /// - `ChunkOutOfRange` if `chunk` lies beyond the recorded chunk slots,
    /// - `UnknownChunk` (logged at `warn!`) if the restriction never
    ///   visited a material list for `chunk`.
    pub fn materials(&self, chunk: u32) -> Result<MaterialQuery<'_>, SilError> {
        let cache = self.material_cache();
        if cache.is_empty() {
            return Ok(MaterialQuery {
                names: &[],
                needs_selection: false,
            });
        }
        cache.lookup(chunk).map(|(names, needs_selection)| MaterialQuery {
            names,
            needs_selection,
        })
    }

    fn material_cache(&self) -> &MaterialCache {
        self.material_cache
            .get_or_init(|| self.prepare_material_searches())
    }

    /// Single-pass walk recording every chunk's selected material names.
    ///
    /// Each set is enqueued at most once; the cache is indexed by chunk and
    /// must not see a set's materials twice.
    fn prepare_material_searches(&self) -> MaterialCache {
        let lattice = self.lattice();
        let selection = self.selection();
        let mut cache = MaterialCache::default();
        if lattice.num_sets() == 0 {
            return cache;
        }
        log::debug!(
            "building material cache over {} sets from top set {}",
            lattice.num_sets(),
            self.restriction.top_set()
        );
        let mut worklist =
            MaskedWorklist::seeded(self.restriction.top_set(), lattice.num_sets());
        while let Some(id) = worklist.next() {
            if !selection[id].is_used() {
                continue;
            }
            if !lattice.set_has_maps_out(id) {
                continue;
            }
            let set = &lattice.sets()[id];
            let chunk = set.chunk();
            for &c in set.maps_out() {
                let collection = &lattice.collections()[c];
                if collection.role() != CollectionRole::Material {
                    // Non-material maps are how the walk reaches deeper
                    // chunks, through any backing.
                    for sub in lattice.subset_ids(c) {
                        worklist.push(sub);
                    }
                    continue;
                }
                // Materials cannot be attributed to a composite set that
                // lacks a chunk id.
                let Some(chunk) = chunk else {
                    continue;
                };
                match lattice.source_view(collection) {
                    SourceView::Matrix(matrix, column) => {
                        let (names, needs) = matrix.column_material_list(column, selection);
                        cache.add_material_list(chunk, names, needs);
                    }
                    SourceView::Explicit(_) | SourceView::Array(_) => {
                        let mut names = Vec::new();
                        let mut off = 0usize;
                        for sub in lattice.subset_ids(c) {
                            if selection[sub].is_used() {
                                names.push(lattice.sets()[sub].name().to_string());
                            } else {
                                off += 1;
                            }
                        }
                        let needs = !names.is_empty() && off > 0;
                        cache.add_material_list(chunk, names, needs);
                    }
                }
            }
        }
        cache
    }

    /// Outgoing collection indices of the top set; empty for an empty
    /// lattice.
    fn top_maps_out(&self) -> &'a [usize] {
        let lattice = self.lattice();
        match lattice.sets().get(self.restriction.top_set()) {
            Some(set) => set.maps_out(),
            None => &[],
        }
    }
}
