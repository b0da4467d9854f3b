/// Doubly linked chain of heap nodes.
///
/// Ownership runs forward: a node is reachable, and freed, only by walking
/// `next` from `head`. `prev` and `tail` are back-references that are never
/// used to release anything. Every node is leaked out of its `Box` on
/// insertion and rebuilt into one exactly once, on removal, so all the
/// pointers handed out (index slots, `prev`, `tail`) share one provenance.
use std::{marker::PhantomData, ptr::NonNull};

pub type Link<E> = Option<NonNull<Node<E>>>;

pub struct Node<E> {
    pub data: E,
    pub next: Link<E>,
    pub prev: Link<E>,
}

impl<E> Node<E> {
    /// A detached node
    pub fn new(data: E) -> Self {
        Node {
            data,
            next: None,
            prev: None,
        }
    }

    pub fn with_neighbors(data: E, prev: Link<E>, next: Link<E>) -> Self {
        Node { data, next, prev }
    }

    /// Replaces both neighbor references, returning the old ones
    pub fn relink(&mut self, prev: Link<E>, next: Link<E>) -> (Link<E>, Link<E>) {
        let old_prev = std::mem::replace(&mut self.prev, prev);
        let old_next = std::mem::replace(&mut self.next, next);
        (old_prev, old_next)
    }

    fn into_link(self) -> NonNull<Node<E>> {
        NonNull::from(Box::leak(Box::new(self)))
    }
}

pub struct Chain<E> {
    head: Link<E>,
    tail: Link<E>,
    _marker: PhantomData<Box<Node<E>>>,
}

impl<E> Chain<E> {
    pub fn new() -> Self {
        Chain {
            head: None,
            tail: None,
            _marker: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    // Safety for the accessors below: `head` and `tail` always point at live
    // nodes owned by this chain, and the returned borrow is tied to `self`.

    pub fn front(&self) -> Option<&E> {
        self.head.map(|node| unsafe { &(*node.as_ptr()).data })
    }

    pub fn front_mut(&mut self) -> Option<&mut E> {
        self.head.map(|node| unsafe { &mut (*node.as_ptr()).data })
    }

    pub fn back(&self) -> Option<&E> {
        self.tail.map(|node| unsafe { &(*node.as_ptr()).data })
    }

    pub fn back_mut(&mut self) -> Option<&mut E> {
        self.tail.map(|node| unsafe { &mut (*node.as_ptr()).data })
    }

    /// Links a new head and returns a pointer to it
    pub fn push_front(&mut self, data: E) -> NonNull<Node<E>> {
        let node = Node::with_neighbors(data, None, self.head).into_link();
        match self.head {
            Some(old_head) => unsafe { (*old_head.as_ptr()).prev = Some(node) },
            None => self.tail = Some(node),
        }
        self.head = Some(node);
        node
    }

    /// Links a new tail and returns a pointer to it
    pub fn push_back(&mut self, data: E) -> NonNull<Node<E>> {
        let mut node = Node::new(data);
        node.prev = self.tail;
        let node = node.into_link();
        match self.tail {
            Some(old_tail) => unsafe { (*old_tail.as_ptr()).next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        node
    }

    /// Links a new node directly in front of `at`.
    ///
    /// # Safety
    ///
    /// `at` must be a live node of this chain.
    pub unsafe fn insert_before(&mut self, at: NonNull<Node<E>>, data: E) -> NonNull<Node<E>> {
        let Some(prev) = (*at.as_ptr()).prev else {
            return self.push_front(data);
        };

        let node = Node::with_neighbors(data, Some(prev), Some(at)).into_link();
        (*prev.as_ptr()).next = Some(node);
        (*at.as_ptr()).prev = Some(node);
        node
    }

    /// Unlinks `node`, frees it and hands back its data.
    ///
    /// # Safety
    ///
    /// `node` must be a live node of this chain; it is dangling afterwards.
    pub unsafe fn unlink(&mut self, node: NonNull<Node<E>>) -> E {
        let mut boxed = Box::from_raw(node.as_ptr());
        let (prev, next) = boxed.relink(None, None);
        match prev {
            Some(prev) => (*prev.as_ptr()).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => (*next.as_ptr()).prev = prev,
            None => self.tail = prev,
        }
        boxed.data
    }

    pub fn pop_front(&mut self) -> Option<E> {
        let head = self.head?;
        Some(unsafe { self.unlink(head) })
    }

    pub fn pop_back(&mut self) -> Option<E> {
        let tail = self.tail?;
        Some(unsafe { self.unlink(tail) })
    }

    pub fn clear(&mut self) {
        let mut node = self.head.take();
        self.tail = None;
        while let Some(n) = node {
            let boxed = unsafe { Box::from_raw(n.as_ptr()) };
            node = boxed.next;
        }
    }

    pub fn iter(&self) -> Links<'_, E> {
        Links {
            current: self.head,
            _marker: PhantomData,
        }
    }
}

// Avoid stack overflow
impl<E> Drop for Chain<E> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Borrowing head-to-tail walk over a chain
pub struct Links<'a, E> {
    current: Link<E>,
    _marker: PhantomData<&'a Node<E>>,
}

impl<'a, E> Iterator for Links<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| unsafe {
            let node = &*node.as_ptr();
            self.current = node.next;
            &node.data
        })
    }
}

#[cfg(test)]
impl<E> Chain<E> {
    /// Pointers to every node, head to tail
    pub fn node_ptrs(&self) -> Vec<NonNull<Node<E>>> {
        let mut ptrs = Vec::new();
        let mut current = self.head;
        while let Some(node) = current {
            ptrs.push(node);
            current = unsafe { (*node.as_ptr()).next };
        }
        ptrs
    }

    /// Asserts head/tail/prev/next agree, returning the node count
    pub fn check_links(&self) -> usize {
        let mut count = 0;
        let mut expected_prev: Link<E> = None;
        let mut current = self.head;
        while let Some(node) = current {
            let node_ref = unsafe { &*node.as_ptr() };
            assert_eq!(node_ref.prev, expected_prev, "broken prev link at {}", count);
            expected_prev = Some(node);
            current = node_ref.next;
            count += 1;
        }
        assert_eq!(self.tail, expected_prev, "tail does not match last node");
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<E: Clone>(chain: &Chain<E>) -> Vec<E> {
        chain.iter().cloned().collect()
    }

    #[test]
    fn test_node_constructors() {
        let node = Node::new(7);
        assert_eq!(node.data, 7);
        assert!(node.prev.is_none());
        assert!(node.next.is_none());

        let mut first = Node::new(1);
        let mut third = Node::new(3);
        let first_ptr = NonNull::from(&mut first);
        let third_ptr = NonNull::from(&mut third);
        let second = Node::with_neighbors(2, Some(first_ptr), Some(third_ptr));
        assert_eq!(second.prev, Some(first_ptr));
        assert_eq!(second.next, Some(third_ptr));
    }

    #[test]
    fn test_node_relink() {
        let mut a = Node::new(1);
        let mut b = Node::new(2);
        let a_ptr = NonNull::from(&mut a);
        let b_ptr = NonNull::from(&mut b);

        let mut node = Node::with_neighbors(0, None, Some(a_ptr));
        let (prev, next) = node.relink(Some(b_ptr), None);
        assert!(prev.is_none());
        assert_eq!(next, Some(a_ptr));
        assert_eq!(node.prev, Some(b_ptr));
        assert!(node.next.is_none());
    }

    #[test]
    fn test_push_and_pop() {
        let mut chain = Chain::new();
        assert!(chain.is_empty());
        chain.push_front(2);
        chain.push_front(1);
        chain.push_back(3);
        assert_eq!(chain.check_links(), 3);
        assert_eq!(collect(&chain), vec![1, 2, 3]);
        assert_eq!(chain.front(), Some(&1));
        assert_eq!(chain.back(), Some(&3));

        assert_eq!(chain.pop_back(), Some(3));
        assert_eq!(chain.pop_front(), Some(1));
        assert_eq!(chain.check_links(), 1);
        assert_eq!(chain.front(), chain.back());
        assert_eq!(chain.pop_back(), Some(2));
        assert_eq!(chain.pop_back(), None);
        assert_eq!(chain.pop_front(), None);
        assert_eq!(chain.check_links(), 0);
    }

    #[test]
    fn test_insert_before_and_unlink() {
        let mut chain = Chain::new();
        let a = chain.push_back('a');
        let c = chain.push_back('c');
        unsafe {
            let b = chain.insert_before(c, 'b');
            chain.insert_before(a, '_');
            assert_eq!(chain.check_links(), 4);
            assert_eq!(collect(&chain), vec!['_', 'a', 'b', 'c']);

            assert_eq!(chain.unlink(b), 'b');
            assert_eq!(chain.unlink(c), 'c');
            assert_eq!(chain.check_links(), 2);
            assert_eq!(chain.back(), Some(&'a'));
            assert_eq!(chain.unlink(a), 'a');
        }
        assert_eq!(collect(&chain), vec!['_']);
        assert_eq!(chain.check_links(), 1);
    }

    #[test]
    fn test_unlink_head() {
        let mut chain = Chain::new();
        let a = chain.push_back(1);
        chain.push_back(2);
        assert_eq!(unsafe { chain.unlink(a) }, 1);
        assert_eq!(chain.check_links(), 1);
        assert_eq!(chain.front(), Some(&2));
    }

    #[test]
    fn test_handles_survive_end_mutation() {
        let mut chain = Chain::new();
        let middle = chain.push_back(5);
        chain.push_front(4);
        chain.push_back(6);
        *chain.front_mut().unwrap() = 40;
        *chain.back_mut().unwrap() = 60;
        assert_eq!(unsafe { (*middle.as_ptr()).data }, 5);
        assert_eq!(unsafe { chain.unlink(middle) }, 5);
        assert_eq!(collect(&chain), vec![40, 60]);
    }

    #[test]
    fn test_node_ptrs_follow_order() {
        let mut chain = Chain::new();
        let ptrs: Vec<_> = (0..5).map(|i| chain.push_back(i)).collect();
        assert_eq!(chain.node_ptrs(), ptrs);
    }

    #[test]
    fn test_long_chain_drop() {
        let mut chain = Chain::new();
        for i in 0..200_000 {
            chain.push_front(i);
        }
        drop(chain);
    }
}
