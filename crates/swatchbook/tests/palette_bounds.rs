//! Bound and cursor behavior of the palette list.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use swatchbook::color::Color;
use swatchbook::{CapacityError, ListConfig, SelectionList};

fn blacks(count: usize) -> Vec<Color> {
    vec![Color::BLACK; count]
}

fn assert_invariants(list: &SelectionList<Color>) {
    let len = list.len();
    assert!(list.min_count() <= list.max_count());
    assert!(list.min_count() <= len && len <= list.max_count());
    if len > 0 {
        let current = list.current_index().expect("non-empty list has a cursor");
        assert!(current < len);
        assert!(list.min_count() >= 1);
    }
}

#[test]
fn duplicating_stops_at_maximum() {
    let list = SelectionList::with_config(blacks(1), ListConfig::default().with_max_count(3));

    assert_eq!(list.duplicate(Color::BLACK), Ok(1));
    assert_eq!(list.duplicate(Color::BLACK), Ok(1));
    assert!(!list.can_insert());
    assert_eq!(
        list.duplicate(Color::BLACK),
        Err(CapacityError::AtMaximum { max_count: 3 })
    );

    assert_eq!(list.items(), blacks(3));
    assert_invariants(&list);
}

#[test]
fn removing_stops_at_minimum() {
    let list = SelectionList::with_config(
        vec![Color::RED, Color::GREEN, Color::BLUE, Color::YELLOW],
        ListConfig::default().with_min_count(2),
    );

    assert_eq!(list.remove(0), Ok(Color::RED));
    assert_eq!(list.remove(0), Ok(Color::GREEN));
    assert!(!list.can_remove());
    assert_eq!(list.remove(0), Err(CapacityError::AtMinimum { min_count: 2 }));

    assert_eq!(list.items(), vec![Color::BLUE, Color::YELLOW]);
    assert_invariants(&list);
}

#[test]
fn bounds_are_derived_on_construction_and_reset() {
    let list = SelectionList::new(blacks(5));
    assert_eq!((list.min_count(), list.max_count()), (1, 64));

    list.reset(blacks(5), ListConfig::default().with_min_count(0));
    assert_eq!(list.min_count(), 1);

    let list = SelectionList::with_config(blacks(5), ListConfig::default().with_min_count(10));
    assert_eq!(list.min_count(), 5);

    list.reset(blacks(5), ListConfig::default().with_max_count(1));
    assert_eq!(list.max_count(), 5);

    list.reset(
        blacks(5),
        ListConfig::default().with_min_count(2).with_max_count(15),
    );
    assert_eq!((list.min_count(), list.max_count()), (2, 15));
    assert_invariants(&list);
}

#[test]
fn invariants_hold_across_mixed_edits() {
    let list = SelectionList::with_config(
        vec![Color::RED, Color::GREEN, Color::BLUE],
        ListConfig::default()
            .with_current_index(2)
            .with_min_count(1)
            .with_max_count(5),
    );

    enum Edit {
        Duplicate,
        RemoveLast,
        RemoveFirst,
        RemoveCurrent,
        InsertFront,
        Select(usize),
    }

    let edits = [
        Edit::Duplicate,
        Edit::RemoveLast,
        Edit::Select(99),
        Edit::RemoveFirst,
        Edit::InsertFront,
        Edit::RemoveCurrent,
        Edit::RemoveFirst,
        Edit::RemoveFirst,
    ];

    for edit in edits {
        match edit {
            Edit::Duplicate => {
                let _ = list.duplicate(Color::WHITE);
            }
            Edit::RemoveLast => {
                let _ = list.remove(list.len() - 1);
            }
            Edit::RemoveFirst => {
                let _ = list.remove(0);
            }
            Edit::RemoveCurrent => {
                let _ = list.remove(list.current_index().unwrap_or(0));
            }
            Edit::InsertFront => {
                let _ = list.insert(Color::GRAY, 0);
            }
            Edit::Select(index) => list.select(index),
        }
        assert_invariants(&list);
    }
    assert_eq!(list.len(), 1);
}

#[test]
fn failed_edits_do_not_notify() {
    let list = SelectionList::with_config(
        blacks(2),
        ListConfig::default().with_min_count(2).with_max_count(2),
    );
    let notified = Arc::new(AtomicUsize::new(0));

    let n = notified.clone();
    list.content_changed.connect(move |_| {
        n.fetch_add(1, Ordering::SeqCst);
    });
    let n = notified.clone();
    list.selection_changed.connect(move |_| {
        n.fetch_add(1, Ordering::SeqCst);
    });

    assert!(list.insert(Color::WHITE, 0).is_err());
    assert!(list.duplicate(Color::WHITE).is_err());
    assert!(list.remove(1).is_err());

    assert_eq!(notified.load(Ordering::SeqCst), 0);
}
