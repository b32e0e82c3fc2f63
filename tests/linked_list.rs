// LinkedList integration tests over the public surface.
//
// Core invariants exercised:
// - Count: len() equals successful pushes minus successful pops.
// - Order: indexed access matches logical order after mixed front/back pushes.
// - Cursor removal: removing at the cursor skips only the removed element.
use chain_hashmap::{LinkedList, ListError};

// Test: pop on an empty list, then a single push/pop.
// Verifies: pop_front fails with Empty; push_back(5) then pop_front returns 5
// and leaves the list empty.
#[test]
fn empty_pop_then_roundtrip_single_element() {
    let mut l = LinkedList::new();
    assert_eq!(l.pop_front(), Err(ListError::Empty));
    l.push_back(5);
    assert_eq!(l.pop_front(), Ok(5));
    assert!(l.is_empty());
}

// Test: mixed pushes and pops keep the count and order.
#[test]
fn count_tracks_pushes_minus_pops() {
    let mut l = LinkedList::new();
    let mut pushes = 0usize;
    let mut pops = 0usize;
    for i in 0..20 {
        if i % 2 == 0 {
            l.push_back(i);
        } else {
            l.push_front(i);
        }
        pushes += 1;
        if i % 5 == 4 && l.pop_back().is_ok() {
            pops += 1;
        }
        assert_eq!(l.len(), pushes - pops);
    }
    let v: Vec<i32> = l.iter().copied().collect();
    for (i, x) in v.iter().enumerate() {
        assert_eq!(l.get(i), Ok(x));
    }
    assert_eq!(
        l.get(v.len()),
        Err(ListError::IndexOutOfBounds {
            index: v.len(),
            len: v.len()
        })
    );
}

// Test: filtering with a cursor mirrors `Vec::retain`.
#[test]
fn cursor_filter_matches_retain() {
    let values: Vec<u32> = (0..50).map(|i| (i * 37) % 23).collect();
    let mut l: LinkedList<u32> = values.iter().copied().collect();

    let mut c = l.cursor_mut();
    while let Some(&v) = c.current() {
        if v % 2 == 1 {
            c.remove_current();
        } else {
            c.move_next();
        }
    }

    let mut expected = values.clone();
    expected.retain(|v| v % 2 == 0);
    assert_eq!(l.iter().copied().collect::<Vec<_>>(), expected);
    assert_eq!(l.len(), expected.len());
}

// Test: reverse then iterate by mutable reference and by value.
#[test]
fn reverse_and_consume() {
    let mut l: LinkedList<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    l.reverse();
    for s in &mut l {
        s.make_ascii_uppercase();
    }
    assert_eq!(l.into_iter().collect::<Vec<_>>(), vec!["C", "B", "A"]);
}

// Test: moving a list transfers the chain and leaves the source empty.
#[test]
fn move_out_with_take() {
    let mut a: LinkedList<_> = (0..3).collect();
    let b = std::mem::take(&mut a);
    assert!(a.is_empty());
    assert_eq!(a.front(), Err(ListError::Empty));
    assert_eq!(b.len(), 3);
    assert_eq!(b.back(), Ok(&2));
}
