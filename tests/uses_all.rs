mod util;
use sil_restrict::prelude::*;
use util::*;

use SetState::*;

#[test]
fn fully_selected_uses_everything() {
    let lat = three_domain_lattice();
    let r = Restriction::new(&lat, SelectionVector::all_used(4)).unwrap();
    let t = RestrictionTraverser::new(&r);
    assert!(t.uses_all_data());
    assert!(t.uses_all_domains());
    assert!(t.uses_all_materials());
}

#[test]
fn none_used_leaf_fails_data_and_domains() {
    let lat = three_domain_lattice();
    let r = Restriction::new(&lat, states(&[AllUsed, AllUsed, NoneUsed, SomeUsed])).unwrap();
    let t = RestrictionTraverser::new(&r);
    assert!(!t.uses_all_data());
    assert!(!t.uses_all_domains());
}

#[test]
fn some_used_leaves_pass_uses_all_data() {
    // Only NoneUsed fails a discretely reached set; a SomeUsed leaf does
    // not, since its own subsets are what carry the partiality.
    let lat = three_domain_lattice();
    let r = Restriction::new(&lat, states(&[AllUsed, AllUsed, SomeUsed, AllUsed])).unwrap();
    let t = RestrictionTraverser::new(&r);
    assert!(t.uses_all_data());
    assert!(t.uses_all_domains());
}

#[test]
fn no_domain_collection_assumes_single_domain() {
    let mut lat = SilLattice::new();
    let top = lat.add_set(SilSet::new("whole", None));
    let s = lat.add_set(SilSet::new("interior", None));
    lat.add_collection(
        top,
        SilCollection::explicit("regions", CollectionRole::Generic, vec![s]),
    )
    .unwrap();
    lat.set_top(top).unwrap();

    let r = Restriction::new(&lat, states(&[AllUsed, NoneUsed])).unwrap();
    let t = RestrictionTraverser::new(&r);
    assert!(t.uses_all_domains(), "single-domain assumption");
    assert!(!t.uses_all_data(), "the generic region still counts here");
}

#[test]
fn uses_all_domains_is_shallow() {
    // Partiality below the domain collection is invisible to the shallow
    // check: only the immediate children are consulted.
    let mut lat = SilLattice::new();
    let top = lat.add_set(SilSet::new("whole", None));
    let d = lat.add_set(SilSet::new("domain0", Some(0)));
    let sub = lat.add_set(SilSet::new("half", None));
    lat.add_collection(
        top,
        SilCollection::explicit("domains", CollectionRole::Domain, vec![d]),
    )
    .unwrap();
    lat.add_collection(
        d,
        SilCollection::explicit("halves", CollectionRole::Generic, vec![sub]),
    )
    .unwrap();
    lat.set_top(top).unwrap();

    let r = Restriction::new(&lat, states(&[AllUsed, SomeUsed, NoneUsed])).unwrap();
    let t = RestrictionTraverser::new(&r);
    assert!(t.uses_all_domains());
}

#[test]
fn array_backed_collection_must_aggregate_to_all_used() {
    let mut lat = SilLattice::new();
    let top = lat.add_set(SilSet::new("whole", None));
    let first = lat.add_set_run("block", 3, Some(0));
    let arr = lat.add_array(SilArray::new("blocks", first, 3)).unwrap();
    lat.add_collection(
        top,
        SilCollection::from_array("blocks", CollectionRole::Domain, arr),
    )
    .unwrap();
    lat.set_top(top).unwrap();

    let all = Restriction::new(&lat, SelectionVector::all_used(4)).unwrap();
    assert!(RestrictionTraverser::new(&all).uses_all_data());

    let partial =
        Restriction::new(&lat, states(&[AllUsed, AllUsed, NoneUsed, AllUsed])).unwrap();
    assert!(!RestrictionTraverser::new(&partial).uses_all_data());
}

#[test]
fn matrix_backed_collection_checks_its_column_only() {
    // 2 columns x 2 rows; the collection is column 0; partiality confined
    // to column 1 does not fail it.
    let mut lat = SilLattice::new();
    let top = lat.add_set(SilSet::new("whole", None));
    let first = lat.add_set_run("cell", 4, None);
    let m = lat
        .add_matrix(SilMatrix::new(
            "dom x mat",
            first,
            2,
            vec!["m0".into(), "m1".into()],
        ))
        .unwrap();
    lat.add_collection(
        top,
        SilCollection::from_matrix("mats0", CollectionRole::Material, m, 0),
    )
    .unwrap();
    lat.set_top(top).unwrap();

    let sel = states(&[AllUsed, AllUsed, AllUsed, NoneUsed, AllUsed]);
    let r = Restriction::new(&lat, sel).unwrap();
    assert!(RestrictionTraverser::new(&r).uses_all_data());

    let sel = states(&[AllUsed, NoneUsed, AllUsed, AllUsed, AllUsed]);
    let r = Restriction::new(&lat, sel).unwrap();
    assert!(!RestrictionTraverser::new(&r).uses_all_data());
}

#[test]
fn uses_all_materials_shallow_scan() {
    let mut lat = SilLattice::new();
    let top = lat.add_set(SilSet::new("whole", None));
    let m1 = lat.add_set(SilSet::new("mat1", None));
    let m2 = lat.add_set(SilSet::new("mat2", None));
    lat.add_collection(
        top,
        SilCollection::explicit("materials", CollectionRole::Material, vec![m1, m2]),
    )
    .unwrap();
    lat.set_top(top).unwrap();

    let r = Restriction::new(&lat, states(&[AllUsed, AllUsed, NoneUsed])).unwrap();
    assert!(!RestrictionTraverser::new(&r).uses_all_materials());

    let r = Restriction::new(&lat, states(&[AllUsed, AllUsed, SomeUsed])).unwrap();
    assert!(RestrictionTraverser::new(&r).uses_all_materials());
}

#[test]
fn uses_all_materials_fast_path_after_empty_cache() {
    // No materials anywhere: once the cache is built (empty), the fast path
    // answers true without re-scanning.
    let lat = three_domain_lattice();
    let r = Restriction::new(&lat, states(&[AllUsed, NoneUsed, NoneUsed, NoneUsed])).unwrap();
    let t = RestrictionTraverser::new(&r);
    let q = t.materials(0).unwrap();
    assert!(q.names.is_empty());
    assert!(t.uses_all_materials());
}

#[test]
fn vacuous_truth_without_relevant_roles() {
    // No Domain, Material, or compact collections at all.
    let mut lat = SilLattice::new();
    let top = lat.add_set(SilSet::new("whole", None));
    lat.set_top(top).unwrap();
    let r = Restriction::new(&lat, states(&[AllUsed])).unwrap();
    let t = RestrictionTraverser::new(&r);
    assert!(t.uses_all_data());
    assert!(t.uses_all_domains());
    assert!(t.uses_all_materials());
}
