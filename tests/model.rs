//! Model test: random operation sequences against a `VecDeque` oracle.
//!
//! Each list variant must agree with the oracle on the value sequence,
//! the length, and the lifecycle flag after every single step.

use std::collections::VecDeque;

use proptest::prelude::*;

use linkage::{
    CircularDoublyLinkedList, CircularSinglyLinkedList, DoublyLinkedList, SinglyLinkedList,
};

#[derive(Debug, Clone)]
enum Op {
    InsertHead(u64),
    InsertTail(u64),
    InsertAt(u64, usize),
    DeleteHead,
    DeleteTail,
    DeleteAt(usize),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u64>().prop_map(Op::InsertHead),
        3 => any::<u64>().prop_map(Op::InsertTail),
        2 => (any::<u64>(), 0..12usize).prop_map(|(v, i)| Op::InsertAt(v, i)),
        2 => Just(Op::DeleteHead),
        2 => Just(Op::DeleteTail),
        2 => (0..12usize).prop_map(Op::DeleteAt),
        1 => Just(Op::Clear),
    ]
}

/// Applies one op to the oracle, mirroring the 1-based contract.
fn apply_oracle(oracle: &mut VecDeque<u64>, op: &Op) {
    match *op {
        Op::InsertHead(v) => oracle.push_front(v),
        Op::InsertTail(v) => oracle.push_back(v),
        Op::InsertAt(v, i) => {
            if i >= 1 && i <= oracle.len() + 1 {
                oracle.insert(i - 1, v);
            }
        }
        Op::DeleteHead => {
            oracle.pop_front();
        }
        Op::DeleteTail => {
            oracle.pop_back();
        }
        Op::DeleteAt(i) => {
            if i >= 1 && i <= oracle.len() {
                oracle.remove(i - 1);
            }
        }
        Op::Clear => oracle.clear(),
    }
}

macro_rules! model_check {
    ($list:expr, $oracle:expr, $ops:expr) => {{
        let list = $list;
        let oracle = $oracle;
        for op in $ops {
            let len_before = list.len();
            match *op {
                Op::InsertHead(v) => {
                    list.insert_head(v);
                }
                Op::InsertTail(v) => {
                    list.insert_tail(v);
                }
                Op::InsertAt(v, i) => {
                    let result = list.insert_at(v, i);
                    let in_range = i >= 1 && i <= len_before + 1;
                    prop_assert_eq!(result.is_ok(), in_range);
                }
                Op::DeleteHead => {
                    prop_assert_eq!(list.delete_head(), oracle.front().copied());
                }
                Op::DeleteTail => {
                    prop_assert_eq!(list.delete_tail(), oracle.back().copied());
                }
                Op::DeleteAt(i) => {
                    let result = list.delete_at(i);
                    let in_range = i >= 1 && i <= len_before;
                    prop_assert_eq!(result.is_ok(), in_range);
                    if in_range {
                        prop_assert_eq!(result.ok(), oracle.get(i - 1).copied());
                    }
                }
                Op::Clear => list.clear(),
            }
            apply_oracle(oracle, op);

            prop_assert_eq!(list.len(), oracle.len());
            prop_assert_eq!(list.is_initialized(), !oracle.is_empty());
            let got: Vec<u64> = list.iter().copied().collect();
            let want: Vec<u64> = oracle.iter().copied().collect();
            prop_assert_eq!(got, want);
        }
    }};
}

proptest! {
    #[test]
    fn singly_matches_oracle(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        let mut oracle: VecDeque<u64> = VecDeque::new();
        model_check!(&mut list, &mut oracle, &ops);
    }

    #[test]
    fn doubly_matches_oracle(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut list: DoublyLinkedList<u64> = DoublyLinkedList::new();
        let mut oracle: VecDeque<u64> = VecDeque::new();
        model_check!(&mut list, &mut oracle, &ops);
    }

    #[test]
    fn circular_singly_matches_oracle(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut list: CircularSinglyLinkedList<u64> = CircularSinglyLinkedList::new();
        let mut oracle: VecDeque<u64> = VecDeque::new();
        model_check!(&mut list, &mut oracle, &ops);

        // The ring invariant holds whenever the list is non-empty
        if let Some(tail) = list.tail_index() {
            prop_assert_eq!(list.next_index(tail), list.head_index());
        }
    }

    #[test]
    fn circular_doubly_matches_oracle(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut list: CircularDoublyLinkedList<u64> = CircularDoublyLinkedList::new();
        let mut oracle: VecDeque<u64> = VecDeque::new();
        model_check!(&mut list, &mut oracle, &ops);

        if let (Some(head), Some(tail)) = (list.head_index(), list.tail_index()) {
            prop_assert_eq!(list.next_index(tail), Some(head));
            prop_assert_eq!(list.prev_index(head), Some(tail));
        }
    }
}
