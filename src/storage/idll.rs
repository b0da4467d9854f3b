use std::fmt::{self, Debug, Display};

use crate::coredef::error::{err, Result, Status, StatusCode};
use crate::utils::{chain::Chain, index::PositionalIndex};

/// An indexed doubly linked list.
///
/// Elements live in a chain of owned nodes; a parallel positional index
/// points at every node so `get(i)` is O(1). Both ends mutate in O(1) on the
/// chain, while the index pays an O(n) shift for anything but a tail change.
///
/// Nodes are linked with raw pointers, so the list is neither `Send`
/// nor `Sync`:
///
/// ```compile_fail
/// fn assert_send<T: Send>() {}
/// assert_send::<idll::IdlList<i32>>();
/// ```
///
/// ```
/// use idll::IdlList;
///
/// let mut list = IdlList::new();
/// list.add_front(1);
/// list.append_back(3);
/// list.insert_at(1, 2).unwrap();
///
/// assert_eq!(list.to_string(), "[1,2,3]");
/// assert_eq!(list.get(1), Ok(&2));
/// assert_eq!(list.remove_back(), Ok(3));
/// ```
pub struct IdlList<E> {
    chain: Chain<E>,
    index: PositionalIndex<E>,
    size: usize,
}

impl<E> IdlList<E> {
    pub fn new() -> Self {
        IdlList {
            chain: Chain::new(),
            index: PositionalIndex::new(),
            size: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Links `elem` so that it ends up at `pos`. `pos` must be `<= size`.
    fn splice_in(&mut self, pos: usize, elem: E) {
        let node = if pos == self.size {
            self.chain.push_back(elem)
        } else {
            match self.index.get(pos) {
                // Safety: index slots point at live nodes of `self.chain`
                Some(at) => unsafe { self.chain.insert_before(at, elem) },
                None => unreachable!("index out of sync at {}", pos),
            }
        };
        self.index.insert(pos, node);
        self.size += 1;
        debug_assert_eq!(self.index.len(), self.size);
    }

    /// Unlinks the element at `pos`. `pos` must be `< size`.
    fn splice_out(&mut self, pos: usize) -> E {
        let data = if pos == 0 {
            self.index.remove(0);
            self.chain.pop_front()
        } else if pos + 1 == self.size {
            self.index.pop();
            self.chain.pop_back()
        } else {
            self.index
                .remove(pos)
                .map(|node| unsafe { self.chain.unlink(node) })
        };
        let Some(data) = data else {
            unreachable!("index out of sync at {}", pos);
        };
        self.size -= 1;
        debug_assert_eq!(self.index.len(), self.size);
        debug_assert_eq!(self.chain.is_empty(), self.size == 0);
        data
    }

    fn check_index(&self, index: usize, bound: usize) -> Result<()> {
        if index >= bound {
            return err(
                StatusCode::IndexOutOfRange(index),
                &format!("index {} out of range for size {}", index, self.size),
            );
        }
        Ok(())
    }

    fn empty() -> Status {
        Status::new(StatusCode::EmptyContainer, "list is empty")
    }

    pub fn add_front(&mut self, elem: E) {
        self.splice_in(0, elem);
    }

    /// Inserts `elem` so that it sits at `index`; `index == size` appends.
    pub fn insert_at(&mut self, index: usize, elem: E) -> Result<()> {
        self.check_index(index, self.size + 1)?;
        self.splice_in(index, elem);
        Ok(())
    }

    pub fn append_back(&mut self, elem: E) {
        self.splice_in(self.size, elem);
    }

    pub fn get(&self, index: usize) -> Result<&E> {
        self.check_index(index, self.size)?;
        match self.index.get(index) {
            // Safety: every slot points at a live node owned by `self.chain`
            Some(node) => Ok(unsafe { &(*node.as_ptr()).data }),
            None => unreachable!("index out of sync at {}", index),
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut E> {
        self.check_index(index, self.size)?;
        match self.index.get(index) {
            Some(node) => Ok(unsafe { &mut (*node.as_ptr()).data }),
            None => unreachable!("index out of sync at {}", index),
        }
    }

    pub fn front(&self) -> Result<&E> {
        self.chain.front().ok_or_else(Self::empty)
    }

    pub fn front_mut(&mut self) -> Result<&mut E> {
        self.chain.front_mut().ok_or_else(Self::empty)
    }

    pub fn back(&self) -> Result<&E> {
        self.chain.back().ok_or_else(Self::empty)
    }

    pub fn back_mut(&mut self) -> Result<&mut E> {
        self.chain.back_mut().ok_or_else(Self::empty)
    }

    pub fn remove_front(&mut self) -> Result<E> {
        if self.is_empty() {
            return Err(Self::empty());
        }
        Ok(self.splice_out(0))
    }

    pub fn remove_back(&mut self) -> Result<E> {
        if self.is_empty() {
            return Err(Self::empty());
        }
        Ok(self.splice_out(self.size - 1))
    }

    pub fn remove_at(&mut self, index: usize) -> Result<E> {
        self.check_index(index, self.size)?;
        Ok(self.splice_out(index))
    }

    /// Removes the first element matching `pred`, scanning from the head.
    /// Returns whether anything was removed.
    pub fn remove_first_by<F>(&mut self, pred: F) -> bool
    where
        F: FnMut(&E) -> bool,
    {
        match self.chain.iter().position(pred) {
            Some(pos) => {
                self.splice_out(pos);
                true
            }
            None => false,
        }
    }

    /// Drops every element
    pub fn clear(&mut self) {
        self.chain.clear();
        self.index.clear();
        self.size = 0;
    }
}

impl<E: PartialEq> IdlList<E> {
    /// Removes the first element equal to `elem`. Matching is by value.
    pub fn remove_value(&mut self, elem: &E) -> bool {
        self.remove_first_by(|e| e == elem)
    }

    pub fn position(&self, elem: &E) -> Option<usize> {
        self.chain.iter().position(|e| e == elem)
    }

    pub fn contains(&self, elem: &E) -> bool {
        self.position(elem).is_some()
    }
}

impl<E> Default for IdlList<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders as `[e1,e2,...,en]`
impl<E: Display> Display for IdlList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, elem) in self.chain.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", elem)?;
        }
        write!(f, "]")
    }
}

impl<E: Debug> Debug for IdlList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.chain.iter()).finish()
    }
}
