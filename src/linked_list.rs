//! LinkedList: singly linked sequence with a link-slot cursor.
//!
//! Nodes are boxed and owned by their predecessor (the first node by the
//! list head). `CursorMut` holds the link slot that references its current
//! node rather than the node itself, so removing at the cursor only rewrites
//! that slot and never walks back to find a predecessor.

use crate::error::ListError;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::{Index, IndexMut};

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

impl<T> Node<T> {
    fn boxed(value: T, next: Link<T>) -> Box<Self> {
        Box::new(Node { value, next })
    }
}

pub struct LinkedList<T> {
    head: Link<T>,
    len: usize, // number of nodes reachable from `head`
}

impl<T> LinkedList<T> {
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn front(&self) -> Result<&T, ListError> {
        self.head
            .as_deref()
            .map(|n| &n.value)
            .ok_or(ListError::Empty)
    }

    pub fn front_mut(&mut self) -> Result<&mut T, ListError> {
        self.head
            .as_deref_mut()
            .map(|n| &mut n.value)
            .ok_or(ListError::Empty)
    }

    /// Last element. Walks the whole chain.
    pub fn back(&self) -> Result<&T, ListError> {
        self.iter().last().ok_or(ListError::Empty)
    }

    /// Last element, mutably. Walks the whole chain.
    pub fn back_mut(&mut self) -> Result<&mut T, ListError> {
        self.iter_mut().last().ok_or(ListError::Empty)
    }

    pub fn push_front(&mut self, value: T) {
        let next = self.head.take();
        self.head = Some(Node::boxed(value, next));
        self.len += 1;
    }

    /// Append at the tail. Walks the whole chain to reach the tail slot.
    pub fn push_back(&mut self, value: T) {
        *self.link_at(self.len) = Some(Node::boxed(value, None));
        self.len += 1;
    }

    pub fn pop_front(&mut self) -> Result<T, ListError> {
        let node = self.head.take().ok_or(ListError::Empty)?;
        let Node { value, next } = *node;
        self.head = next;
        self.len -= 1;
        Ok(value)
    }

    /// Remove the last element. Walks to the slot holding the last node.
    pub fn pop_back(&mut self) -> Result<T, ListError> {
        if self.len == 0 {
            return Err(ListError::Empty);
        }
        let node = self.link_at(self.len - 1).take().ok_or(ListError::Empty)?;
        let Node { value, .. } = *node;
        self.len -= 1;
        Ok(value)
    }

    pub fn get(&self, index: usize) -> Result<&T, ListError> {
        let len = self.len;
        self.iter()
            .nth(index)
            .ok_or(ListError::IndexOutOfBounds { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, ListError> {
        let len = self.len;
        self.iter_mut()
            .nth(index)
            .ok_or(ListError::IndexOutOfBounds { index, len })
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Drop every node. The chain is unlinked iteratively so long lists do
    /// not recurse through `Box` drops.
    pub fn clear(&mut self) {
        let mut rest = self.head.take();
        while let Some(mut node) = rest {
            rest = node.next.take();
        }
        self.len = 0;
    }

    /// Reverse the chain in place by relinking; no node is reallocated.
    pub fn reverse(&mut self) {
        if self.len <= 1 {
            return;
        }
        let mut reversed: Link<T> = None;
        let mut rest = self.head.take();
        while let Some(mut node) = rest {
            rest = node.next.take();
            node.next = reversed;
            reversed = Some(node);
        }
        self.head = reversed;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
            remaining: self.len,
        }
    }

    /// Cursor positioned on the first element (or at the end if empty).
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            link: Some(&mut self.head),
            len: &mut self.len,
        }
    }

    // Slot referencing the node at `index`; `index == len` is the empty tail slot.
    fn link_at(&mut self, index: usize) -> &mut Link<T> {
        let mut link = &mut self.head;
        for _ in 0..index {
            match link {
                Some(node) => link = &mut node.next,
                None => break,
            }
        }
        link
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy: every node is cloned, order preserved.
impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T> Index<usize> for LinkedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> IndexMut<usize> for LinkedList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

/// Appends at the tail, walking the chain once for the whole batch.
impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut added = 0;
        let mut tail = self.link_at(self.len);
        for value in iter {
            tail = &mut tail.insert(Node::boxed(value, None)).next;
            added += 1;
        }
        self.len += added;
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

/// Forward iterator over shared references, in chain order.
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Forward iterator over mutable references, in chain order.
pub struct IterMut<'a, T> {
    next: Option<&'a mut Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            self.remaining -= 1;
            &mut node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator; pops from the front.
pub struct IntoIter<T>(LinkedList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    #[inline]
    fn next(&mut self) -> Option<T> {
        self.0.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;
    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

/// Position handle into a list.
///
/// The cursor holds the link slot that references the current node (the
/// list head, or the `next` link of the preceding node). Removing at the
/// cursor relinks that slot to the removed node's successor, which leaves
/// the cursor on the following element. Past the last element the slot is
/// empty and the cursor is at the end.
///
/// The cursor mutably borrows its list, so no other handle can observe the
/// list while it is being relinked.
pub struct CursorMut<'a, T> {
    // Always `Some` between calls; taken only while advancing.
    link: Option<&'a mut Link<T>>,
    len: &'a mut usize,
}

impl<'a, T> CursorMut<'a, T> {
    pub fn current(&self) -> Option<&T> {
        self.link.as_deref()?.as_deref().map(|n| &n.value)
    }

    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.link.as_deref_mut()?.as_deref_mut().map(|n| &mut n.value)
    }

    pub fn is_end(&self) -> bool {
        self.current().is_none()
    }

    /// Step to the next element. No-op at the end.
    pub fn move_next(&mut self) {
        if let Some(link) = self.link.take() {
            self.link = Some(match link {
                Some(node) => &mut node.next,
                None => link,
            });
        }
    }

    /// Unlink the current node in O(1) and return its element. The cursor
    /// then refers to the element that followed the removed one.
    pub fn remove_current(&mut self) -> Option<T> {
        let link = self.link.as_deref_mut()?;
        let node = link.take()?;
        let Node { value, next } = *node;
        *link = next;
        *self.len -= 1;
        Some(value)
    }

    /// Length of the underlying list.
    pub fn list_len(&self) -> usize {
        *self.len
    }
}
