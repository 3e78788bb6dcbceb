//! Property tests for the tracked-file registry

use mizuna_core::{Error, TrackBatch, TrackRegistry};
use proptest::prelude::*;
use std::collections::HashMap;

fn local_path() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a.txt", "b.txt", "figures/fig1.pdf", "out/table.tex"])
        .prop_map(str::to_string)
}

fn destination() -> impl Strategy<Value = String> {
    "[a-z]{1,6}(/[a-z]{1,6}){0,2}\\.(pdf|tex|txt)"
}

proptest! {
    #[test]
    fn last_registration_wins(ops in prop::collection::vec((local_path(), destination()), 1..30)) {
        let mut registry = TrackRegistry::new();
        let mut expected = HashMap::new();

        for (local, dest) in &ops {
            registry.register(local, Some(dest.as_str())).unwrap();
            expected.insert(local.clone(), dest.clone());
        }

        prop_assert_eq!(registry.count(), expected.len());
        for (local, dest) in &expected {
            prop_assert_eq!(&registry.get(local).unwrap().destination, dest);
        }
    }

    #[test]
    fn invalid_batch_mutates_nothing(
        valid in prop::collection::vec(local_path(), 0..5),
        position in 0usize..5,
    ) {
        let mut registry = TrackRegistry::new();
        registry.register("keep.txt", None).unwrap();
        let before = registry.clone();

        let mut paths = valid;
        let position = position.min(paths.len());
        paths.insert(position, String::new());

        let err = registry.register_batch(TrackBatch::from_paths(paths)).unwrap_err();
        prop_assert!(matches!(err, Error::Validation { .. }), "expected Validation error, got {:?}", err);
        prop_assert_eq!(registry, before);
    }
}

#[test]
fn empty_batch_is_rejected() {
    let mut registry = TrackRegistry::new();
    let err = registry
        .register_batch(TrackBatch::from_paths(Vec::<String>::new()))
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn batch_from_map_applies_every_entry() {
    let mut registry = TrackRegistry::new();
    let map = std::collections::BTreeMap::from([
        ("a.txt", "docs/a.txt"),
        ("b.txt", ""),
    ]);

    assert_eq!(registry.register_batch(TrackBatch::from_map(map)).unwrap(), 2);
    assert_eq!(registry.get("a.txt").unwrap().destination, "docs/a.txt");
    assert_eq!(registry.get("b.txt").unwrap().destination, "b.txt");
}
