//! idll: an indexed doubly linked list
//!
//! A chain of owned nodes paired with a positional index, giving O(1)
//! access at both ends and O(1) lookup by position.
//!
//! ```
//! use idll::{IdlList, StatusCode};
//!
//! let mut list = IdlList::new();
//! list.add_front(1);
//! list.add_front(2);
//! list.add_front(3);
//! assert_eq!(list.to_string(), "[3,2,1]");
//!
//! assert_eq!(list.remove_at(1), Ok(2));
//! assert!(list.remove_value(&3));
//! assert_eq!(list.to_string(), "[1]");
//!
//! let status = list.get(5).unwrap_err();
//! assert_eq!(status.code, StatusCode::IndexOutOfRange(5));
//! ```
//!

mod coredef;
mod storage;
mod utils;

pub use coredef::error::{Result, Status, StatusCode};

pub use storage::idll::IdlList;
