//! Invariants shared by all four list variants, checked through the
//! public API only.

use linkage::{
    CircularDoublyLinkedList, CircularSinglyLinkedList, DoublyLinkedList, IndexedValue,
    OutOfBounds, SinglyLinkedList,
};

/// Exercises one variant through a macro so every list type runs the
/// identical scenario.
macro_rules! variant_suite {
    ($mod_name:ident, $list:ty) => {
        mod $mod_name {
            use super::*;

            fn collect(list: &$list) -> Vec<u64> {
                list.iter().copied().collect()
            }

            #[test]
            fn size_tracks_every_mutation() {
                let mut list = <$list>::new();
                assert_eq!(list.len(), 0);

                list.insert_tail(1);
                assert_eq!(list.len(), 1);
                list.insert_head(0);
                assert_eq!(list.len(), 2);
                list.insert_at(5, 2).unwrap();
                assert_eq!(list.len(), 3);

                list.delete_at(2).unwrap();
                assert_eq!(list.len(), 2);
                list.delete_head();
                assert_eq!(list.len(), 1);
                list.delete_tail();
                assert_eq!(list.len(), 0);
                assert!(list.is_empty());
            }

            #[test]
            fn lifecycle_round_trip() {
                let mut list = <$list>::new();
                assert!(!list.is_initialized());

                list.insert_tail(7);
                assert!(list.is_initialized());

                assert_eq!(list.delete_head(), Some(7));
                assert!(!list.is_initialized());

                // Reusable after emptying
                list.insert_head(8);
                assert!(list.is_initialized());
                assert_eq!(list.get_at(1), Ok(Some(&8)));
            }

            #[test]
            fn insert_tail_get_at_round_trip() {
                let mut list = <$list>::new();
                for v in 1..=10u64 {
                    list.insert_tail(v);
                }
                for i in 1..=10usize {
                    assert_eq!(list.get_at(i), Ok(Some(&(i as u64))));
                }
            }

            #[test]
            fn boundary_errors_leave_len_unchanged() {
                let mut list = <$list>::new();
                for v in [1, 2, 3] {
                    list.insert_tail(v);
                }

                assert_eq!(
                    list.insert_at(9, 0),
                    Err(OutOfBounds { index: 0, len: 3 })
                );
                assert_eq!(
                    list.insert_at(9, 5),
                    Err(OutOfBounds { index: 5, len: 3 })
                );
                assert_eq!(list.delete_at(4), Err(OutOfBounds { index: 4, len: 3 }));
                assert_eq!(list.get_at(0), Err(OutOfBounds { index: 0, len: 3 }));

                assert_eq!(list.len(), 3);
                assert_eq!(collect(&list), vec![1, 2, 3]);
            }

            #[test]
            fn uninitialized_reads_are_none_not_errors() {
                let list = <$list>::new();
                assert_eq!(list.get_at(1), Ok(None));
                assert_eq!(list.get_at(99), Ok(None));
            }

            #[test]
            fn batch_delete_one_three_six_on_five() {
                let mut list = <$list>::new();
                for v in [10, 20, 30, 40, 50] {
                    list.insert_tail(v);
                }

                let report = list.delete_batch(&[1, 3, 6]);

                assert_eq!(report.deleted.len(), 2);
                assert_eq!(report.skipped, vec![6]);
                assert_eq!(list.len(), 3);
                assert_eq!(report.deleted[0], IndexedValue::new(1, 10));
                assert_eq!(report.deleted[1], IndexedValue::new(3, 40));
            }

            #[test]
            fn batch_insert_on_empty_skips_everything() {
                let mut list = <$list>::new();
                let report =
                    list.insert_batch(vec![IndexedValue::new(1, 1), IndexedValue::new(2, 2)]);

                assert!(report.inserted.is_empty());
                assert_eq!(report.skipped.len(), 2);
                assert!(list.is_empty());
            }

            #[test]
            fn batch_insert_unsorted_input_is_sorted_first() {
                let mut list = <$list>::new();
                for v in [10, 20, 30] {
                    list.insert_tail(v);
                }

                let report = list.insert_batch(vec![
                    IndexedValue::new(3, 25),
                    IndexedValue::new(1, 5),
                ]);

                assert_eq!(report.inserted.len(), 2);
                assert_eq!(collect(&list), vec![5, 10, 25, 20, 30]);
            }

            #[test]
            fn clears_are_idempotent() {
                let mut list = <$list>::new();
                for v in [1, 2, 3] {
                    list.insert_tail(v);
                }

                list.clear();
                list.clear();
                assert!(list.is_empty());
                assert!(!list.is_initialized());

                for v in [4, 5] {
                    list.insert_tail(v);
                }
                list.clear_deep();
                list.clear_deep();
                assert!(list.is_empty());
                assert!(!list.is_initialized());
            }

            #[test]
            fn handles_stay_valid_across_unrelated_removals() {
                let mut list = <$list>::new();
                list.insert_tail(1);
                let second = list.insert_tail(2);
                list.insert_tail(3);

                list.delete_head();
                list.delete_tail();
                assert_eq!(list.get(second), Some(&2));
            }

            #[test]
            fn stale_handle_lookup_is_none() {
                let mut list = <$list>::new();
                let only = list.insert_tail(1);
                list.delete_head();
                assert_eq!(list.get(only), None);
            }
        }
    };
}

variant_suite!(singly, SinglyLinkedList<u64>);
variant_suite!(doubly, DoublyLinkedList<u64>);
variant_suite!(circular_singly, CircularSinglyLinkedList<u64>);
variant_suite!(circular_doubly, CircularDoublyLinkedList<u64>);

mod ring_closure {
    use super::*;

    #[test]
    fn singly_ring_returns_to_head_after_n_hops() {
        let mut list: CircularSinglyLinkedList<u64> = CircularSinglyLinkedList::new();
        for v in [1, 2, 3, 4, 5] {
            list.insert_tail(v);
        }

        let head = list.head_index().unwrap();
        let mut current = head;
        for _ in 0..list.len() {
            current = list.next_index(current).unwrap();
        }
        assert_eq!(current, head);
    }

    #[test]
    fn doubly_ring_closes_both_directions() {
        let mut list: CircularDoublyLinkedList<u64> = CircularDoublyLinkedList::new();
        for v in [1, 2, 3, 4, 5] {
            list.insert_tail(v);
        }

        let head = list.head_index().unwrap();
        let tail = list.tail_index().unwrap();
        assert_eq!(list.next_index(tail), Some(head));
        assert_eq!(list.prev_index(head), Some(tail));

        let mut current = head;
        for _ in 0..list.len() {
            current = list.prev_index(current).unwrap();
        }
        assert_eq!(current, head);
    }

    #[test]
    fn ring_stays_closed_under_churn() {
        let mut list: CircularDoublyLinkedList<u64> = CircularDoublyLinkedList::new();
        for v in 0..8u64 {
            list.insert_tail(v);
        }
        list.delete_head();
        list.delete_tail();
        list.delete_at(3).unwrap();
        list.insert_at(99, 2).unwrap();

        let head = list.head_index().unwrap();
        let mut current = head;
        for _ in 0..list.len() {
            current = list.next_index(current).unwrap();
        }
        assert_eq!(current, head);
    }

    #[test]
    fn non_circular_tails_terminate() {
        let mut singly: SinglyLinkedList<u64> = SinglyLinkedList::new();
        let mut doubly: DoublyLinkedList<u64> = DoublyLinkedList::new();
        for v in [1, 2, 3] {
            singly.insert_tail(v);
            doubly.insert_tail(v);
        }

        assert_eq!(singly.next_index(singly.tail_index().unwrap()), None);
        assert_eq!(doubly.next_index(doubly.tail_index().unwrap()), None);
        assert_eq!(doubly.prev_index(doubly.head_index().unwrap()), None);
    }
}
