//! Property tests for the validation rules and the item store

#![allow(clippy::unwrap_used)] // Test code can unwrap

use checklist_testing::properties::{any_text, blank_text, non_blank_text};
use proptest::prelude::*;
use std::collections::HashSet;
use todo::{IdPolicy, ItemStore, TodoId, validate_subtitle, validate_title};

#[derive(Clone, Debug)]
enum Op {
    Add,
    Remove(usize),
    Toggle(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Add),
        1 => any::<usize>().prop_map(Op::Remove),
        1 => any::<usize>().prop_map(Op::Toggle),
    ]
}

/// Picks an existing id by index, or an id that was never issued
fn pick(store: &ItemStore, index: usize) -> TodoId {
    store
        .list()
        .get(index % (store.count() + 1))
        .map_or(TodoId::new(u32::MAX), |item| item.id)
}

proptest! {
    #[test]
    fn title_in_range_and_not_blank_is_valid(title in non_blank_text(3..=50)) {
        prop_assert!(validate_title(&title));
    }

    #[test]
    fn title_too_short_is_invalid(title in any_text(0..=2)) {
        prop_assert!(!validate_title(&title));
    }

    #[test]
    fn title_too_long_is_invalid(title in any_text(51..=80)) {
        prop_assert!(!validate_title(&title));
    }

    #[test]
    fn blank_title_is_invalid(title in blank_text(50)) {
        prop_assert!(!validate_title(&title));
    }

    #[test]
    fn subtitle_up_to_limit_and_not_blank_is_valid(subtitle in non_blank_text(1..=120)) {
        prop_assert!(validate_subtitle(&subtitle));
    }

    #[test]
    fn subtitle_over_limit_is_invalid(subtitle in any_text(121..=160)) {
        prop_assert!(!validate_subtitle(&subtitle));
    }

    #[test]
    fn blank_subtitle_is_invalid(subtitle in blank_text(120)) {
        prop_assert!(!validate_subtitle(&subtitle));
    }

    #[test]
    fn add_then_find_returns_submitted_text(
        title in non_blank_text(3..=50),
        subtitle in non_blank_text(1..=120),
    ) {
        let mut store = ItemStore::default();

        let item = store.add(title.clone(), subtitle.clone()).unwrap();
        let found = store.find_by_id(item.id).unwrap();

        prop_assert_eq!(&found.title, &title);
        prop_assert_eq!(&found.subtitle, &subtitle);
        prop_assert!(!found.done);
    }

    #[test]
    fn update_preserves_id_and_done(
        done in any::<bool>(),
        title in non_blank_text(3..=50),
        subtitle in non_blank_text(1..=120),
    ) {
        let mut store = ItemStore::default();
        let id = store.add("Original", "details").unwrap().id;
        if done {
            store.toggle_done(id).unwrap();
        }

        let updated = store.update(id, title.clone(), subtitle.clone()).unwrap();

        prop_assert_eq!(updated.id, id);
        prop_assert_eq!(updated.done, done);
        prop_assert_eq!(updated.title, title);
        prop_assert_eq!(updated.subtitle, subtitle);
    }

    #[test]
    fn monotonic_ids_are_never_reissued(ops in prop::collection::vec(op(), 1..40)) {
        let mut store = ItemStore::new(IdPolicy::Monotonic);
        let mut issued = HashSet::new();

        for op in ops {
            match op {
                Op::Add => {
                    let item = store.add("Some item", "details").unwrap();
                    prop_assert!(issued.insert(item.id), "id {} issued twice", item.id);
                },
                Op::Remove(index) => {
                    let id = pick(&store, index);
                    store.remove(id).unwrap();
                    prop_assert!(store.find_by_id(id).is_none());
                },
                Op::Toggle(index) => {
                    let id = pick(&store, index);
                    let _ = store.toggle_done(id);
                },
            }
        }
    }

    #[test]
    fn every_successful_mutation_publishes_a_new_revision(
        ops in prop::collection::vec(op(), 1..40),
    ) {
        let mut store = ItemStore::default();
        let mut snapshots = store.subscribe();

        for op in ops {
            let before = store.state().revision;
            let changed = match op {
                Op::Add => store.add("Some item", "details").is_ok(),
                Op::Remove(index) => store.remove(pick(&store, index)).unwrap().is_some(),
                Op::Toggle(index) => store.toggle_done(pick(&store, index)).is_ok(),
            };

            prop_assert!(snapshots.has_changed().unwrap());
            let published = snapshots.borrow_and_update().revision;
            prop_assert_eq!(published, store.state().revision);
            if changed {
                prop_assert_eq!(published, before + 1);
            } else {
                prop_assert_eq!(published, before);
            }
        }
    }

    #[test]
    fn toggle_twice_restores_done(ops in prop::collection::vec(op(), 0..20), index in any::<usize>()) {
        let mut store = ItemStore::default();
        store.add("First item", "details").unwrap();
        for op in ops {
            match op {
                Op::Add => { store.add("Some item", "details").unwrap(); },
                Op::Remove(i) => { store.remove(pick(&store, i)).unwrap(); },
                Op::Toggle(i) => { let _ = store.toggle_done(pick(&store, i)); },
            }
        }
        prop_assume!(store.count() > 0);
        let item = store.list()[index % store.count()].clone();

        store.toggle_done(item.id).unwrap();
        let restored = store.toggle_done(item.id).unwrap();

        prop_assert_eq!(restored.done, item.done);
    }
}
