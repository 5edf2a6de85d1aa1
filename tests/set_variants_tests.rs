//! Integration tests for the five variants: the absent-set contract,
//! conversions between variants, and cross-variant equality.

use polyset::{Collection, EmptySet, FrozenSet, Mutability, MutableSet, SingletonSet, SyncSet};
use rstest::rstest;

// =============================================================================
// Absent-set contract
// =============================================================================

#[rstest]
fn test_absent_sets_answer_queries_as_empty() {
    let frozen: FrozenSet<i32> = FrozenSet::absent();
    let mutable: MutableSet<i32> = MutableSet::absent();
    let sync: SyncSet<i32> = SyncSet::absent();
    let singleton: SingletonSet<i32> = SingletonSet::absent();
    let empty: EmptySet<i32> = EmptySet::absent();

    assert_eq!(frozen.len(), 0);
    assert_eq!(mutable.len(), 0);
    assert_eq!(sync.len(), 0);
    assert_eq!(singleton.len(), 0);
    assert_eq!(empty.len(), 0);

    assert!(!frozen.contains(&1));
    assert!(!mutable.contains(&1));
    assert!(!sync.contains(&1));
    assert!(!singleton.contains(&1));
    assert!(!empty.contains(&1));

    assert!(frozen.to_vec().is_empty());
    assert_eq!(mutable.fold(3, |accumulator, _| accumulator + 1), 3);
    assert_eq!(sync.min_by(|left, right| left.cmp(right)), None);
}

#[rstest]
fn test_mutators_on_absent_mutable_are_noops() {
    let mut mutable: MutableSet<i32> = MutableSet::absent();
    assert!(!mutable.insert(1));
    mutable.insert_all([1, 2, 3]);
    mutable.remove_where(|_| true);
    mutable.clear();
    assert!(mutable.is_absent());
    assert_eq!(mutable.len(), 0);
}

#[rstest]
fn test_mutators_on_absent_sync_are_noops() {
    let sync: SyncSet<i32> = SyncSet::absent();
    assert!(!sync.insert(1));
    sync.insert_all([1, 2]);
    assert!(!sync.remove(&1));
    sync.clear();
    assert!(sync.is_absent());
}

#[rstest]
fn test_visit_on_absent_completes_immediately() {
    let frozen: FrozenSet<i32> = FrozenSet::absent();
    let mut visited = 0;
    let completed = Collection::visit(&frozen, &mut |_| {
        visited += 1;
        true
    });
    assert!(completed);
    assert_eq!(visited, 0);
}

// =============================================================================
// Cross-variant equality (absent == empty, every pairing)
// =============================================================================

#[rstest]
fn test_every_empty_or_absent_pairing_is_equal() {
    let values: Vec<polyset::Set<i32>> = vec![
        EmptySet::new().into(),
        EmptySet::absent().into(),
        SingletonSet::absent().into(),
        FrozenSet::new().into(),
        FrozenSet::absent().into(),
        MutableSet::new().into(),
        MutableSet::absent().into(),
        SyncSet::new().into(),
        SyncSet::absent().into(),
    ];
    for left in &values {
        for right in &values {
            assert!(left.equals(right), "{left:?} should equal {right:?}");
        }
    }
}

#[rstest]
fn test_populated_sets_compare_by_membership_only() {
    let frozen: FrozenSet<i32> = [1, 2].into();
    let mutable: MutableSet<i32> = [2, 1].into();
    let sync: SyncSet<i32> = [1, 2].into();
    let singleton = SingletonSet::new(1);

    assert_eq!(frozen, mutable);
    assert_eq!(mutable, sync);
    assert_eq!(sync, frozen);
    assert_ne!(frozen, singleton);
    assert_eq!(singleton, FrozenSet::from([1]));
}

#[rstest]
fn test_absent_does_not_equal_populated() {
    let absent: FrozenSet<i32> = FrozenSet::absent();
    let populated: FrozenSet<i32> = [1].into();
    assert_ne!(absent, populated);
}

// =============================================================================
// Conversions and capability negotiation
// =============================================================================

#[rstest]
fn test_empty_to_mutable_then_insert() {
    let mut set = EmptySet::<i32>::new().to_mutable();
    assert!(set.insert(5));
    assert_eq!(set, FrozenSet::from([5]));
    assert!(set.mutability().is_mutable());
}

#[rstest]
fn test_freeze_thaw_roundtrip() {
    let mutable: MutableSet<i32> = [1, 2, 3].into();
    let frozen = mutable.to_frozen();
    let thawed = frozen.to_mutable();
    assert_eq!(mutable, frozen);
    assert_eq!(frozen, thawed);
    assert_eq!(thawed.mutability(), Mutability::Mutable);
}

#[rstest]
fn test_to_synchronized_copies_contents() {
    let frozen: FrozenSet<i32> = [1, 2].into();
    let sync = frozen.to_synchronized();
    assert_eq!(sync.mutability(), Mutability::Synchronized);
    sync.insert(3);
    assert_eq!(sync.len(), 3);
    assert_eq!(frozen.len(), 2); // source untouched
}

#[rstest]
fn test_singleton_conversions() {
    let singleton = SingletonSet::new(7);
    assert_eq!(singleton.to_frozen(), FrozenSet::from([7]));
    assert_eq!(singleton.to_mutable(), FrozenSet::from([7]));
    assert_eq!(singleton.to_synchronized(), FrozenSet::from([7]));
    assert!(SingletonSet::<i32>::absent().to_frozen().is_absent());
}

// =============================================================================
// Shape stability
// =============================================================================

#[rstest]
fn test_clear_empties_but_never_absents() {
    let mut mutable: MutableSet<i32> = [1, 2].into();
    mutable.clear();
    assert!(!mutable.is_absent());
    assert!(mutable.is_empty());

    let sync: SyncSet<i32> = [1, 2].into();
    sync.clear();
    assert!(!sync.is_absent());
    assert!(sync.is_empty());
}

#[rstest]
fn test_display_formats_like_a_set() {
    let empty: EmptySet<i32> = EmptySet::new();
    let singleton = SingletonSet::new(7);
    let frozen: FrozenSet<i32> = [5].into();
    assert_eq!(format!("{empty}"), "{}");
    assert_eq!(format!("{singleton}"), "{7}");
    assert_eq!(format!("{frozen}"), "{5}");
}
