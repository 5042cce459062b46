//! An ordered set based on an AVL tree augmented with subtree sizes.
//!
//! Besides the usual logarithmic insertion, removal, and lookup, the size stored in every node
//! lets the set find the item of any rank, and in particular its median, in `O(log n)` time
//! without walking its items.
//!
//! ```
//! use avl_median::Set;
//!
//! let mut set = Set::new();
//!
//! for item in 1..8 {
//!     set.insert(item);
//! }
//!
//! assert_eq!(set.median(), Ok(4));
//! assert!(set.remove(&7));
//! assert_eq!(set.median(), Ok(3));
//! assert_eq!(set.median_pair(), Ok((&3, &4)));
//! ```

#![deny(missing_docs)]

mod average;
mod balance;
mod error;
mod node;
#[cfg(feature = "ordered_iter")] mod ordered_iter;
#[cfg(feature = "quickcheck")] mod quickcheck;
pub mod set;

use compare::Compare;

pub use average::Average;
pub use error::{Error, Result};
pub use set::Set;

/// A collection of unique items that can be grown, shrunk, queried, and walked in order.
pub trait MutableSet<T> {
    /// The iterator returned by [`iter`](#tymethod.iter).
    type Iter<'a>: Iterator<Item=&'a T> where Self: 'a, T: 'a;

    /// Adds the item, returning `true` if it was not already present.
    fn insert(&mut self, item: T) -> bool;

    /// Removes the item, returning `true` if it was present.
    fn remove(&mut self, item: &T) -> bool;

    /// Checks if the item is present.
    fn contains(&self, item: &T) -> bool;

    /// Returns the number of items.
    fn len(&self) -> usize;

    /// Checks if there are no items.
    fn is_empty(&self) -> bool { self.len() == 0 }

    /// Returns an iterator over the items in ascending order.
    fn iter(&self) -> Self::Iter<'_>;
}

impl<T, C> MutableSet<T> for Set<T, C> where C: Compare<T> {
    type Iter<'a> = set::Iter<'a, T> where Self: 'a, T: 'a;

    fn insert(&mut self, item: T) -> bool { Set::insert(self, item) }
    fn remove(&mut self, item: &T) -> bool { Set::remove(self, item) }
    fn contains(&self, item: &T) -> bool { Set::contains(self, item) }
    fn len(&self) -> usize { Set::len(self) }
    fn is_empty(&self) -> bool { Set::is_empty(self) }
    fn iter(&self) -> set::Iter<T> { Set::iter(self) }
}
