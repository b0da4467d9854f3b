use std::ptr::NonNull;

use super::chain::Node;

/// Positional cache over a [`Chain`](super::chain::Chain): `slots[i]` is the
/// i-th node from the head.
///
/// Holds no ownership. Lookups are O(1); inserting or removing anywhere but
/// the end shifts the tail of the vector.
pub struct PositionalIndex<E> {
    slots: Vec<NonNull<Node<E>>>,
}

impl<E> PositionalIndex<E> {
    pub fn new() -> Self {
        PositionalIndex { slots: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, pos: usize) -> Option<NonNull<Node<E>>> {
        self.slots.get(pos).copied()
    }

    pub fn insert(&mut self, pos: usize, node: NonNull<Node<E>>) {
        self.slots.insert(pos, node);
    }

    pub fn remove(&mut self, pos: usize) -> Option<NonNull<Node<E>>> {
        if pos < self.slots.len() {
            Some(self.slots.remove(pos))
        } else {
            None
        }
    }

    pub fn pop(&mut self) -> Option<NonNull<Node<E>>> {
        self.slots.pop()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
impl<E> PositionalIndex<E> {
    /// Throws the cache away and recomputes it from a full traversal
    pub fn rebuild(&mut self, chain: &super::chain::Chain<E>) {
        self.slots = chain.node_ptrs();
    }

    pub fn as_slice(&self) -> &[NonNull<Node<E>>] {
        &self.slots
    }
}
