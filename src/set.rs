//! An ordered set based on a size-augmented AVL tree.

use compare::{Compare, Natural};
use std::cmp::Ordering;
use std::cmp::Ordering::*;
use std::fmt::{self, Debug};
use std::hash::{self, Hash};
use std::iter;
use super::average::Average;
use super::balance;
use super::error::{Error, Result};
use super::node::{self, Dir, Left, Link, Node, Right};

/// An ordered set based on an AVL tree whose nodes also cache the size of their subtree.
///
/// Insertion, removal, and membership tests take `O(log n)` time, as do the rank queries
/// [`select`](#method.select) and [`median`](#method.median).
///
/// The behavior of this set is undefined if an item's ordering relative to any other item changes
/// while the item is in the set. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
#[derive(Clone)]
pub struct Set<T, C = Natural<T>> where C: Compare<T> {
    root: Link<T>,
    cmp: C,
}

impl<T> Set<T> where T: Ord {
    /// Creates an empty set ordered according to the natural order of its items.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl_median::Set::new();
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut it = set.iter();
    /// assert_eq!(it.next(), Some(&1));
    /// assert_eq!(it.next(), Some(&2));
    /// assert_eq!(it.next(), Some(&3));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { Set::with_cmp(compare::natural()) }
}

impl<T, C> Set<T, C> where C: Compare<T> {
    /// Creates an empty set ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut set = avl_median::Set::with_cmp(natural().rev());
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut it = set.iter();
    /// assert_eq!(it.next(), Some(&3));
    /// assert_eq!(it.next(), Some(&2));
    /// assert_eq!(it.next(), Some(&1));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn with_cmp(cmp: C) -> Self { Set { root: None, cmp: cmp } }

    /// Checks if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl_median::Set::new();
    /// assert!(set.is_empty());
    ///
    /// set.insert(2);
    /// assert!(!set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool { self.root.is_none() }

    /// Returns the number of items in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl_median::Set::new();
    /// assert_eq!(set.len(), 0);
    ///
    /// set.insert(2);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize { balance::size(&self.root) }

    /// Returns the height of the set's tree: `-1` if the set is empty, `0` for a single item.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl_median::Set::new();
    /// assert_eq!(set.height(), -1);
    ///
    /// set.extend(1..8);
    /// assert_eq!(set.height(), 2);
    /// ```
    pub fn height(&self) -> isize { balance::height(&self.root) }

    /// Returns a reference to the set's comparator.
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Removes all items from the set.
    pub fn clear(&mut self) { self.root = None; }

    /// Inserts an item into the set, returning `true` if the set did not already contain an equal
    /// item.
    ///
    /// An equal item already in the set is left in place; the given item is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl_median::Set::new();
    /// assert!(!set.contains(&1));
    /// assert!(set.insert(1));
    /// assert!(set.contains(&1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, item: T) -> bool {
        let mut inserted = false;
        self.root = Some(node::insert(self.root.take(), &self.cmp, item, &mut inserted));
        inserted
    }

    /// Removes the given item from the set, returning `true` if the set contained the item.
    ///
    /// Removing an item that is not in the set leaves the set unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl_median::Set::new();
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// assert!(set.remove(&1));
    /// assert_eq!(set.len(), 2);
    /// assert!(!set.contains(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, item: &Q) -> bool where C: Compare<Q, T> {
        self.take(item).is_some()
    }

    /// Removes the given item from the set and returns it, or `None` if the set did not contain
    /// the item.
    pub fn take<Q: ?Sized>(&mut self, item: &Q) -> Option<T> where C: Compare<Q, T> {
        let (root, removed) = node::remove(self.root.take(), &self.cmp, item);
        self.root = root;
        removed
    }

    /// Checks if the set contains the given item.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl_median::Set::new();
    /// assert!(!set.contains(&1));
    /// set.insert(1);
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<Q: ?Sized>(&self, item: &Q) -> bool where C: Compare<Q, T> {
        self.get(item).is_some()
    }

    /// Returns a reference to the set's item that is equal to the given item, or `None` if the
    /// set does not contain the item.
    pub fn get<Q: ?Sized>(&self, item: &Q) -> Option<&T> where C: Compare<Q, T> {
        node::get(&self.root, &self.cmp, item)
    }

    /// Returns a reference to the set's minimum item, or `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: avl_median::Set<_> = vec![3, 1, 2].into_iter().collect();
    /// assert_eq!(set.first(), Some(&1));
    /// assert_eq!(set.last(), Some(&3));
    /// ```
    pub fn first(&self) -> Option<&T> { Left::extremum(&self.root).map(|node| &node.item) }

    /// Returns a reference to the set's maximum item, or `None` if the set is empty.
    pub fn last(&self) -> Option<&T> { Right::extremum(&self.root).map(|node| &node.item) }

    /// Returns a reference to the item of the given zero-based rank, or `None` if `rank` is not
    /// less than the set's length.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: avl_median::Set<_> = vec![30, 10, 20].into_iter().collect();
    /// assert_eq!(set.select(0), Some(&10));
    /// assert_eq!(set.select(2), Some(&30));
    /// assert_eq!(set.select(3), None);
    /// ```
    pub fn select(&self, rank: usize) -> Option<&T> {
        let len = self.len();
        if rank >= len { return None; }
        node::select_offset(&self.root, len as isize - 1 - 2 * rank as isize)
    }

    /// Returns references to the set's two middle items, which coincide when the set has an odd
    /// number of items.
    ///
    /// This is the median for item types that cannot be averaged.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyCollection` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set: avl_median::Set<_> = vec!["b", "d", "a", "c"].into_iter().collect();
    /// assert_eq!(set.median_pair(), Ok((&"b", &"c")));
    ///
    /// set.insert("e");
    /// assert_eq!(set.median_pair(), Ok((&"c", &"c")));
    /// ```
    pub fn median_pair(&self) -> Result<(&T, &T)> {
        let (lower, upper) = if self.len() % 2 == 1 { (0, 0) } else { (1, -1) };
        let lower = node::select_offset(&self.root, lower).ok_or(Error::EmptyCollection)?;
        let upper = node::select_offset(&self.root, upper).ok_or(Error::EmptyCollection)?;
        Ok((lower, upper))
    }

    /// Returns the set's median: its middle item if it has an odd number of items, or the
    /// average of its two middle items otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyCollection` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_median::{Error, Set};
    ///
    /// let mut set = Set::new();
    /// assert_eq!(set.median(), Err(Error::EmptyCollection));
    ///
    /// set.insert(1);
    /// set.insert(4);
    /// assert_eq!(set.median(), Ok(2));
    ///
    /// set.insert(9);
    /// assert_eq!(set.median(), Ok(4));
    /// ```
    pub fn median(&self) -> Result<T> where T: Average + Clone {
        let (lower, upper) = self.median_pair()?;
        Ok(if self.len() % 2 == 1 { lower.clone() } else { lower.average(upper) })
    }

    /// Returns the set's items by depth, for drawing the shape of its tree.
    ///
    /// Layer `d` holds `2^d` slots in left-to-right order, with `None` marking a position that
    /// has no node. The last layer is the deepest one that holds an item.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: avl_median::Set<_> = vec![1, 2, 3, 4].into_iter().collect();
    ///
    /// assert_eq!(set.layers(), vec![
    ///     vec![Some(&2)],
    ///     vec![Some(&1), Some(&3)],
    ///     vec![None, None, None, Some(&4)],
    /// ]);
    /// ```
    pub fn layers(&self) -> Vec<Vec<Option<&T>>> { node::layers(&self.root) }

    /// Returns an iterator over the set.
    ///
    /// The iterator yields the items in ascending order according to the set's comparator. Each
    /// call starts a fresh traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl_median::Set::new();
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// assert_eq!(set.iter().collect::<Vec<_>>(), [&1, &2, &3]);
    /// assert_eq!(set.iter().rev().collect::<Vec<_>>(), [&3, &2, &1]);
    /// ```
    pub fn iter(&self) -> Iter<T> {
        Iter(node::Iter::new(self.root.as_deref(), self.len()))
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &Link<T> { &self.root }
}

impl<T, C> Debug for Set<T, C> where T: Debug, C: Compare<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.debug_set().entries(self).finish() }
}

impl<T, C> Default for Set<T, C> where C: Compare<T> + Default {
    fn default() -> Self { Set::with_cmp(Default::default()) }
}

impl<T, C> Extend<T> for Set<T, C> where C: Compare<T> {
    fn extend<I: IntoIterator<Item=T>>(&mut self, it: I) {
        for item in it { self.insert(item); }
    }
}

impl<T, C> iter::FromIterator<T> for Set<T, C> where C: Compare<T> + Default {
    fn from_iter<I: IntoIterator<Item=T>>(it: I) -> Self {
        let mut set: Self = Default::default();
        set.extend(it);
        set
    }
}

impl<T, C> Hash for Set<T, C> where T: Hash, C: Compare<T> {
    fn hash<H: hash::Hasher>(&self, h: &mut H) {
        for item in self.iter() { item.hash(h); }
    }
}

impl<'a, T, C> IntoIterator for &'a Set<T, C> where C: Compare<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

impl<T, C> IntoIterator for Set<T, C> where C: Compare<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Returns an iterator that consumes the set.
    ///
    /// The iterator yields the items in ascending order according to the set's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl_median::Set::new();
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut it = set.into_iter();
    /// assert_eq!(it.next(), Some(1));
    /// assert_eq!(it.next_back(), Some(3));
    /// assert_eq!(it.next(), Some(2));
    /// assert_eq!(it.next(), None);
    /// ```
    fn into_iter(mut self) -> IntoIter<T> {
        let len = self.len();
        IntoIter(node::Iter::new(self.root.take(), len))
    }
}

impl<T, C> PartialEq for Set<T, C> where C: Compare<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() &&
            self.iter().zip(other.iter()).all(|(l, r)| self.cmp.compares_eq(l, r))
    }
}

impl<T, C> Eq for Set<T, C> where C: Compare<T> {}

impl<T, C> PartialOrd for Set<T, C> where C: Compare<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(Ord::cmp(self, other)) }
}

impl<T, C> Ord for Set<T, C> where C: Compare<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut l = self.iter();
        let mut r = other.iter();

        loop {
            match (l.next(), r.next()) {
                (None, None) => return Equal,
                (None, Some(_)) => return Less,
                (Some(_), None) => return Greater,
                (Some(l), Some(r)) => match self.cmp.compare(l, r) {
                    Equal => {}
                    non_eq => return non_eq,
                },
            }
        }
    }
}

/// An iterator that consumes the set.
///
/// The iterator yields the items in ascending order according to the set's comparator.
///
/// # Examples
///
/// Acquire through the `IntoIterator` trait:
///
/// ```
/// let mut set = avl_median::Set::new();
///
/// set.insert(2);
/// set.insert(1);
/// set.insert(3);
///
/// for item in set {
///     println!("{:?}", item);
/// }
/// ```
pub struct IntoIter<T>(node::Iter<Box<Node<T>>>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> { self.0.next_back() }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// An iterator over the set.
///
/// The iterator yields the items in ascending order according to the set's comparator.
///
/// # Examples
///
/// Acquire through [`Set::iter`](struct.Set.html#method.iter) or the `IntoIterator` trait:
///
/// ```
/// let mut set = avl_median::Set::new();
///
/// set.insert(2);
/// set.insert(1);
/// set.insert(3);
///
/// for item in &set {
///     println!("{:?}", item);
/// }
/// ```
pub struct Iter<'a, T: 'a>(node::Iter<&'a Node<T>>);

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self { Iter(self.0.clone()) }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<&'a T> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> { self.0.next_back() }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

#[cfg(test)]
mod test {
    use compare::{natural, Compare};
    use crate::error::Error;
    use super::Set;

    #[test]
    fn ascending_inserts_track_median() {
        let mut set = Set::new();
        let mut medians = vec![];

        for item in 1..8 {
            set.insert(item);
            medians.push(set.median().unwrap());
        }

        assert_eq!(medians, [1, 1, 2, 2, 3, 3, 4]);
    }

    #[test]
    fn descending_inserts_match_ascending_height() {
        let ascending: Set<u32> = (1..8).collect();
        let descending: Set<u32> = (1..8).rev().collect();

        assert_eq!(ascending.height(), 2);
        assert_eq!(descending.height(), 2);
        assert_eq!(ascending, descending);
        assert_eq!(ascending.layers(), descending.layers());
    }

    #[test]
    fn median_of_empty_set_fails() {
        let set = Set::<i32>::new();

        assert_eq!(set.median(), Err(Error::EmptyCollection));
        assert_eq!(set.median_pair(), Err(Error::EmptyCollection));
        assert_eq!(Error::EmptyCollection.to_string(), "the collection is empty");
    }

    #[test]
    fn empty_set_queries() {
        let set = Set::<i32>::new();

        assert!(!set.contains(&1));
        assert_eq!(set.len(), 0);
        assert_eq!(set.iter().next(), None);
        assert_eq!(set.first(), None);
        assert_eq!(set.last(), None);
        assert_eq!(set.select(0), None);
        assert!(set.layers().is_empty());
    }

    #[test]
    fn discard_missing_item_changes_nothing() {
        let mut set: Set<u32> = (1..8).collect();
        let layers = set.layers().into_iter()
            .map(|layer| layer.into_iter().map(|item| item.cloned()).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        assert!(!set.remove(&100));
        assert_eq!(set.len(), 7);
        assert_eq!(set.iter().cloned().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(set.height(), 2);
        assert_eq!(set.layers().into_iter()
            .map(|layer| layer.into_iter().map(|item| item.cloned()).collect::<Vec<_>>())
            .collect::<Vec<_>>(), layers);
    }

    #[test]
    fn insert_then_remove_all() {
        let mut set: Set<u32> = (1..16).collect();
        assert_eq!(set.len(), 15);

        for item in 1..16 {
            assert!(set.remove(&item));
            assert_eq!(set.len(), 15 - item as usize);
        }

        assert!(set.is_empty());
        assert_eq!(set.height(), -1);
    }

    #[test]
    fn medians_while_removing() {
        let mut set: Set<u32> = (1..16).collect();
        let mut medians = vec![];

        for item in 2..15 {
            set.remove(&item);
            medians.push(set.median().unwrap());
        }

        assert_eq!(medians, [8, 9, 9, 10, 10, 11, 11, 12, 12, 13, 13, 14, 8]);
        assert_eq!(set.iter().cloned().collect::<Vec<_>>(), [1, 15]);
    }

    #[test]
    fn float_median_averages() {
        let mut set = Set::with_cmp(|l: &f64, r: &f64| l.partial_cmp(r).unwrap());
        set.insert(1.0);
        set.insert(2.0);
        assert_eq!(set.median(), Ok(1.5));

        set.insert(10.0);
        assert_eq!(set.median(), Ok(2.0));
    }

    #[test]
    fn reversed_comparator() {
        let set: Set<u32, _> = {
            let mut set = Set::with_cmp(natural().rev());
            set.extend(vec![1, 2, 3, 4]);
            set
        };

        assert!(set.cmp().compares_gt(&1, &2));
        assert_eq!(set.iter().cloned().collect::<Vec<_>>(), [4, 3, 2, 1]);
        assert_eq!(set.first(), Some(&4));
        assert_eq!(set.select(1), Some(&3));
        assert_eq!(set.median_pair(), Ok((&3, &2)));
    }

    #[test]
    fn take_returns_stored_item() {
        let mut set: Set<u32> = (1..4).collect();
        assert_eq!(set.take(&2), Some(2));
        assert_eq!(set.take(&2), None);
        assert_eq!(set.get(&3), Some(&3));
    }

    #[test]
    fn debug_formats_as_set() {
        let set: Set<u32> = vec![3, 1, 2].into_iter().collect();
        assert_eq!(format!("{:?}", set), "{1, 2, 3}");
        assert_eq!(format!("{:?}", Set::<u32>::new()), "{}");
    }

    #[test]
    fn clear_empties_set() {
        let mut set: Set<u32> = (1..10).collect();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.median(), Err(Error::EmptyCollection));
    }

    #[test]
    fn iterators_are_exact_size() {
        let set: Set<u32> = (1..6).collect();
        let mut it = set.iter();
        assert_eq!(it.len(), 5);
        it.next();
        it.next_back();
        assert_eq!(it.len(), 3);
        assert_eq!(it.clone().collect::<Vec<_>>(), [&2, &3, &4]);

        let mut it = set.clone().into_iter();
        assert_eq!(it.next_back(), Some(5));
        assert_eq!(it.len(), 4);
        assert_eq!(it.collect::<Vec<_>>(), [1, 2, 3, 4]);
    }
}
