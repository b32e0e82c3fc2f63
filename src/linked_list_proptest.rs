#![cfg(test)]

// Property tests for LinkedList against a VecDeque model.

use crate::error::ListError;
use crate::linked_list::LinkedList;
use proptest::prelude::*;
use std::collections::VecDeque;

#[derive(Clone, Debug)]
enum Op {
    PushFront(i32),
    PushBack(i32),
    PopFront,
    PopBack,
    Get(usize),
    Set(usize, i32),
    Reverse,
    // Remove every element divisible by the modulus with one cursor pass.
    RemoveMultiplesOf(i32),
    Extend(Vec<i32>),
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::PushFront),
        4 => any::<i32>().prop_map(Op::PushBack),
        2 => Just(Op::PopFront),
        2 => Just(Op::PopBack),
        2 => (0usize..12).prop_map(Op::Get),
        1 => (0usize..12, any::<i32>()).prop_map(|(i, v)| Op::Set(i, v)),
        1 => Just(Op::Reverse),
        1 => (2i32..5).prop_map(Op::RemoveMultiplesOf),
        1 => proptest::collection::vec(any::<i32>(), 0..4).prop_map(Op::Extend),
        1 => Just(Op::Clear),
    ]
}

// Property: state-machine equivalence with VecDeque.
// - len() equals successful pushes minus successful pops;
// - pops on an empty list fail with Empty, indexing past the end with IndexOutOfBounds;
// - get(i) matches logical order; front/back agree with the model;
// - a cursor pass that removes at the current position visits each element once
//   and removes exactly the matching ones.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_matches_vecdeque(ops in proptest::collection::vec(arb_op(), 1..80)) {
        let mut sut: LinkedList<i32> = LinkedList::new();
        let mut model: VecDeque<i32> = VecDeque::new();

        for op in ops {
            match op {
                Op::PushFront(v) => { sut.push_front(v); model.push_front(v); }
                Op::PushBack(v) => { sut.push_back(v); model.push_back(v); }
                Op::PopFront => {
                    prop_assert_eq!(sut.pop_front(), model.pop_front().ok_or(ListError::Empty));
                }
                Op::PopBack => {
                    prop_assert_eq!(sut.pop_back(), model.pop_back().ok_or(ListError::Empty));
                }
                Op::Get(i) => {
                    let expected = model
                        .get(i)
                        .ok_or(ListError::IndexOutOfBounds { index: i, len: model.len() });
                    prop_assert_eq!(sut.get(i), expected);
                }
                Op::Set(i, v) => {
                    match (sut.get_mut(i), model.get_mut(i)) {
                        (Ok(a), Some(b)) => { *a = v; *b = v; }
                        (Err(ListError::IndexOutOfBounds { .. }), None) => {}
                        (a, b) => prop_assert!(false, "get_mut mismatch: {:?} vs {:?}", a, b),
                    }
                }
                Op::Reverse => {
                    sut.reverse();
                    model.make_contiguous().reverse();
                }
                Op::RemoveMultiplesOf(m) => {
                    let mut visited = Vec::new();
                    let mut cursor = sut.cursor_mut();
                    while let Some(&v) = cursor.current() {
                        visited.push(v);
                        if v % m == 0 {
                            prop_assert_eq!(cursor.remove_current(), Some(v));
                        } else {
                            cursor.move_next();
                        }
                    }
                    prop_assert_eq!(&visited, &model.iter().copied().collect::<Vec<_>>());
                    model.retain(|v| v % m != 0);
                }
                Op::Extend(vs) => {
                    sut.extend(vs.iter().copied());
                    model.extend(vs);
                }
                Op::Clear => { sut.clear(); model.clear(); }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(sut.front().ok(), model.front());
            prop_assert_eq!(sut.back().ok(), model.back());
            prop_assert!(sut.iter().eq(model.iter()));
        }
    }
}

// Property: reverse is its own inverse and preserves length.
proptest! {
    #[test]
    fn prop_reverse_twice_is_identity(values in proptest::collection::vec(any::<i32>(), 0..40)) {
        let mut l: LinkedList<i32> = values.iter().copied().collect();
        l.reverse();
        prop_assert!(l.iter().eq(values.iter().rev()));
        l.reverse();
        prop_assert!(l.iter().eq(values.iter()));
        prop_assert_eq!(l.len(), values.len());
    }

    #[test]
    fn prop_clone_equals_source(values in proptest::collection::vec(any::<i32>(), 0..40)) {
        let l: LinkedList<i32> = values.iter().copied().collect();
        let c = l.clone();
        prop_assert_eq!(&c, &l);
        prop_assert_eq!(c.into_iter().collect::<Vec<_>>(), values);
    }
}
