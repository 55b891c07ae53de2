#![allow(dead_code)]
use sil_restrict::prelude::*;

/// Wrap an explicit state list.
pub fn states(s: &[SetState]) -> SelectionVector {
    SelectionVector::from_states(s.to_vec())
}

/// Top set (index 0) over one Domain collection with three chunk-bearing
/// leaves, chunks {10, 11, 12} at indices {1, 2, 3}.
pub fn three_domain_lattice() -> SilLattice {
    let mut lat = SilLattice::new();
    let top = lat.add_set(SilSet::new("whole", None));
    let d10 = lat.add_set(SilSet::new("domain10", Some(10)));
    let d11 = lat.add_set(SilSet::new("domain11", Some(11)));
    let d12 = lat.add_set(SilSet::new("domain12", Some(12)));
    lat.add_collection(
        top,
        SilCollection::explicit("domains", CollectionRole::Domain, vec![d10, d11, d12]),
    )
    .unwrap();
    lat.set_top(top).unwrap();
    lat
}

/// Top set (0) -> Domain collection -> one domain set with chunk 5 (index 1)
/// -> Material collection with subsets "mat1","mat2","mat3" (indices 2..5).
pub fn one_chunk_material_lattice() -> SilLattice {
    let mut lat = SilLattice::new();
    let top = lat.add_set(SilSet::new("whole", None));
    let d5 = lat.add_set(SilSet::new("domain5", Some(5)));
    let m1 = lat.add_set(SilSet::new("mat1", Some(5)));
    let m2 = lat.add_set(SilSet::new("mat2", Some(5)));
    let m3 = lat.add_set(SilSet::new("mat3", Some(5)));
    lat.add_collection(
        top,
        SilCollection::explicit("domains", CollectionRole::Domain, vec![d5]),
    )
    .unwrap();
    lat.add_collection(
        d5,
        SilCollection::explicit("materials", CollectionRole::Material, vec![m1, m2, m3]),
    )
    .unwrap();
    lat.set_top(top).unwrap();
    lat
}

/// Two chunk-bearing domains (chunks 0 and 1), each with its own two-material
/// collection. Layout: top 0, domains {1, 2}, materials of chunk 0 at {3, 4}
/// ("copper","steel"), materials of chunk 1 at {5, 6}.
pub fn two_chunk_material_lattice() -> SilLattice {
    let mut lat = SilLattice::new();
    let top = lat.add_set(SilSet::new("whole", None));
    let d0 = lat.add_set(SilSet::new("domain0", Some(0)));
    let d1 = lat.add_set(SilSet::new("domain1", Some(1)));
    let c0 = lat.add_set(SilSet::new("copper", Some(0)));
    let s0 = lat.add_set(SilSet::new("steel", Some(0)));
    let c1 = lat.add_set(SilSet::new("copper", Some(1)));
    let s1 = lat.add_set(SilSet::new("steel", Some(1)));
    lat.add_collection(
        top,
        SilCollection::explicit("domains", CollectionRole::Domain, vec![d0, d1]),
    )
    .unwrap();
    lat.add_collection(
        d0,
        SilCollection::explicit("materials", CollectionRole::Material, vec![c0, s0]),
    )
    .unwrap();
    lat.add_collection(
        d1,
        SilCollection::explicit("materials", CollectionRole::Material, vec![c1, s1]),
    )
    .unwrap();
    lat.set_top(top).unwrap();
    lat
}

/// Build a flat lattice from `(chunk, state)` leaves under an AllUsed top
/// set, returning the lattice and the matching selection vector.
pub fn leaf_lattice(leaves: &[(u32, SetState)]) -> (SilLattice, SelectionVector) {
    let mut lat = SilLattice::new();
    let top = lat.add_set(SilSet::new("whole", None));
    let ids: Vec<usize> = leaves
        .iter()
        .enumerate()
        .map(|(i, &(chunk, _))| lat.add_set(SilSet::new(format!("domain{i}"), Some(chunk))))
        .collect();
    lat.add_collection(
        top,
        SilCollection::explicit("domains", CollectionRole::Domain, ids),
    )
    .unwrap();
    lat.set_top(top).unwrap();

    let mut sel = vec![SetState::AllUsed];
    sel.extend(leaves.iter().map(|&(_, s)| s));
    (lat, SelectionVector::from_states(sel))
}
