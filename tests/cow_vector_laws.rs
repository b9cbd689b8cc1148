#![cfg(feature = "persistent")]
//! Property-based tests for CowVector laws.
//!
//! This module checks update and insert against `Vec` as a model, and
//! reference counts of shared values across arbitrary operation sequences.

use cowvec::persistent::{Boxed, CowVector};
use proptest::prelude::*;

// =============================================================================
// Operation Model
// =============================================================================

#[derive(Debug, Clone)]
enum Operation {
    Update { position: usize, value: usize },
    Insert { position: usize, value: usize },
    Updated { position: usize, value: usize },
    Snapshot,
    DropSnapshot,
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => (any::<usize>(), 0..POOL_SIZE)
            .prop_map(|(position, value)| Operation::Update { position, value }),
        2 => (any::<usize>(), 0..POOL_SIZE)
            .prop_map(|(position, value)| Operation::Insert { position, value }),
        1 => (any::<usize>(), 0..POOL_SIZE)
            .prop_map(|(position, value)| Operation::Updated { position, value }),
        1 => Just(Operation::Snapshot),
        1 => Just(Operation::DropSnapshot),
    ]
}

const POOL_SIZE: usize = 6;

/// Counts how often each pooled value occurs across the given vectors.
fn occurrences(pool: &[Boxed<usize>], vectors: &[&CowVector<Boxed<usize>>]) -> Vec<usize> {
    let mut counts = vec![0; pool.len()];
    for vector in vectors {
        for index in 0..vector.len() {
            if let Some(element) = vector.get(index) {
                counts[**element] += 1;
            }
        }
    }
    counts
}

// =============================================================================
// Laws
// =============================================================================

proptest! {
    /// Get-Update Law: the updated slot reads back the new value
    #[test]
    fn prop_get_update_law(
        elements in prop::collection::vec(any::<i32>(), 1..50),
        seed in any::<usize>(),
        value in any::<i32>(),
    ) {
        let index = seed % elements.len();
        let vector = CowVector::from_vec(elements.clone());

        let updated = vector.update(index, value);

        prop_assert_eq!(updated.get(index), Some(&value));
        for other in (0..elements.len()).filter(|&other| other != index) {
            prop_assert_eq!(updated.get(other), Some(&elements[other]));
        }
    }

    /// Update behaves like `Vec` indexing or `push` at the end
    #[test]
    fn prop_update_matches_vec_model(
        elements in prop::collection::vec(any::<i16>(), 1..40),
        seed in any::<usize>(),
        value in any::<i16>(),
    ) {
        let index = seed % (elements.len() + 1);
        let mut model = elements.clone();
        if index == model.len() {
            model.push(value);
        } else {
            model[index] = value;
        }

        let updated = CowVector::from_vec(elements).update(index, value);

        prop_assert_eq!(updated.to_vec(), model);
    }

    /// Insert behaves like `Vec::insert` and leaves no spare capacity
    #[test]
    fn prop_insert_matches_vec_model(
        elements in prop::collection::vec(any::<i16>(), 0..40),
        seed in any::<usize>(),
        value in any::<i16>(),
    ) {
        let index = seed % (elements.len() + 1);
        let mut model = elements.clone();
        model.insert(index, value);

        let inserted = CowVector::from_vec(elements).insert(index, value);

        prop_assert_eq!(inserted.capacity(), model.len());
        prop_assert_eq!(inserted.to_vec(), model);
    }

    /// Snapshot Law: another owner never observes an update
    #[test]
    fn prop_shared_snapshot_is_unchanged(
        elements in prop::collection::vec(any::<i32>(), 1..40),
        seed in any::<usize>(),
        value in any::<i32>(),
        insert in any::<bool>(),
    ) {
        let index = seed % (elements.len() + 1);
        let vector = CowVector::from_vec(elements.clone());
        let snapshot = vector.clone();

        let changed = if insert {
            vector.insert(index, value)
        } else {
            vector.update(index, value)
        };

        prop_assert!(!changed.ptr_eq(&snapshot));
        prop_assert!(snapshot.is_unique());
        prop_assert_eq!(snapshot.to_vec(), elements);
    }

    /// Growth Law: appending to a full vector doubles its capacity
    #[test]
    fn prop_append_to_full_vector_doubles_capacity(
        elements in prop::collection::vec(any::<u8>(), 1..64),
        value in any::<u8>(),
    ) {
        let length = elements.len();

        let grown = CowVector::from_vec(elements).update(length, value);

        prop_assert_eq!(grown.capacity(), length * 2);
        prop_assert_eq!(grown.len(), length + 1);
        prop_assert_eq!(grown.get(length), Some(&value));
        for reserved in (length + 1)..(length * 2) {
            prop_assert_eq!(grown.slot(reserved), Some(None));
        }
    }

    /// Length never exceeds capacity
    #[test]
    fn prop_length_within_capacity(
        operations in prop::collection::vec(operation_strategy(), 0..60),
    ) {
        let mut vector = CowVector::with_capacity(1);
        for operation in operations {
            vector = match operation {
                Operation::Update { position, value } => {
                    let index = position % (vector.len() + 1);
                    vector.update(index, value)
                }
                Operation::Insert { position, value } => {
                    let index = position % (vector.len() + 1);
                    vector.insert(index, value)
                }
                Operation::Updated { .. } | Operation::Snapshot | Operation::DropSnapshot => vector,
            };
            prop_assert!(vector.len() <= vector.capacity());
        }
    }

    /// Conservation Law: every pooled value's count equals one (the pool's
    /// own handle) plus its occurrences in every live vector
    #[test]
    fn prop_reference_counts_are_conserved(
        operations in prop::collection::vec(operation_strategy(), 0..60),
    ) {
        let pool: Vec<Boxed<usize>> = (0..POOL_SIZE).map(Boxed::new).collect();
        let mut vector = CowVector::from_vec(vec![pool[0].duplicate()]);
        let mut snapshots: Vec<CowVector<Boxed<usize>>> = Vec::new();

        for operation in operations {
            match operation {
                Operation::Update { position, value } => {
                    let index = position % (vector.len() + 1);
                    vector = vector.update(index, pool[value].duplicate());
                }
                Operation::Insert { position, value } => {
                    let index = position % (vector.len() + 1);
                    vector = vector.insert(index, pool[value].duplicate());
                }
                Operation::Updated { position, value } => {
                    if !vector.is_empty() {
                        let index = position % vector.len();
                        snapshots.push(vector.updated(index, pool[value].duplicate()));
                    }
                }
                Operation::Snapshot => snapshots.push(vector.clone()),
                Operation::DropSnapshot => {
                    snapshots.pop();
                }
            }

            // Shared buffers are counted once per buffer, not per handle
            let mut distinct: Vec<&CowVector<Boxed<usize>>> = vec![&vector];
            for snapshot in &snapshots {
                if !distinct.iter().any(|seen| seen.ptr_eq(snapshot)) {
                    distinct.push(snapshot);
                }
            }
            let counts = occurrences(&pool, &distinct);
            for (value, count) in pool.iter().zip(counts) {
                prop_assert_eq!(value.strong_count(), 1 + count);
            }
        }

        drop(vector);
        drop(snapshots);
        prop_assert!(pool.iter().all(Boxed::is_unique));
    }
}
