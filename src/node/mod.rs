mod iter;


use compare::Compare;
use std::cmp::Ordering::*;
use std::collections::VecDeque;
use std::mem;
use crate::balance::{rebalance, size};

pub use self::iter::Iter;

pub type Link<T> = Option<Box<Node<T>>>;

#[derive(Clone)]
pub struct Node<T> {
    pub left: Link<T>,
    pub right: Link<T>,
    pub height: isize,
    pub size: usize,
    pub item: T,
}

impl<T> Node<T> {
    pub fn new(item: T) -> Self { Node { left: None, right: None, height: 0, size: 1, item: item } }
}

/// Inserts the item into the subtree unless an equal item is already present, returning the
/// rebalanced subtree root.
///
/// `inserted` is set to `true` if a new leaf was created.
pub fn insert<T, C>(link: Link<T>, cmp: &C, item: T, inserted: &mut bool) -> Box<Node<T>>
    where C: Compare<T> {

    let mut node = match link {
        None => {
            *inserted = true;
            return Box::new(Node::new(item));
        }
        Some(node) => node,
    };

    match cmp.compare(&item, &node.item) {
        Equal => return node,
        Less => node.left = Some(insert(node.left.take(), cmp, item, inserted)),
        Greater => node.right = Some(insert(node.right.take(), cmp, item, inserted)),
    }

    rebalance(node)
}

/// Removes the item equal to the given one from the subtree, returning the rebalanced subtree
/// root and the removed item, if any.
///
/// An internal node is never unlinked directly: its item is swapped with its in-order
/// predecessor (or successor, if it has no left child) and the removal continues in that
/// subtree, so the node that is finally freed is always a leaf.
pub fn remove<T, C, Q: ?Sized>(link: Link<T>, cmp: &C, item: &Q) -> (Link<T>, Option<T>)
    where C: Compare<Q, T> {

    let mut node = match link {
        None => return (None, None),
        Some(node) => node,
    };

    let removed = match cmp.compare(item, &node.item) {
        Less => remove_from::<Left, _, _, _>(&mut node, cmp, item),
        Greater => remove_from::<Right, _, _, _>(&mut node, cmp, item),
        Equal =>
            if node.left.is_some() {
                Left::swap_neighbor(&mut node);
                remove_from::<Left, _, _, _>(&mut node, cmp, item)
            } else if node.right.is_some() {
                Right::swap_neighbor(&mut node);
                remove_from::<Right, _, _, _>(&mut node, cmp, item)
            } else {
                let Node { item, .. } = *node;
                return (None, Some(item));
            },
    };

    (Some(rebalance(node)), removed)
}

fn remove_from<D, T, C, Q: ?Sized>(node: &mut Node<T>, cmp: &C, item: &Q) -> Option<T>
    where D: Dir, C: Compare<Q, T> {

    let (child, removed) = remove(D::forward_mut(node).take(), cmp, item);
    *D::forward_mut(node) = child;
    removed
}

pub fn get<'a, T, C, Q: ?Sized>(mut link: &'a Link<T>, cmp: &C, item: &Q) -> Option<&'a T>
    where C: Compare<Q, T> {

    while let Some(ref node) = *link {
        match cmp.compare(item, &node.item) {
            Equal => return Some(&node.item),
            Less => link = &node.left,
            Greater => link = &node.right,
        }
    }

    None
}

/// Returns the item whose count of strictly greater items minus its count of strictly smaller
/// items equals `offset`, or `None` if no item has that offset.
///
/// In a tree of `n` items the item of rank `r` has offset `n - 1 - 2 * r`, so the median of an
/// odd-sized tree has offset `0` and the two middle items of an even-sized tree have offsets `1`
/// (lower) and `-1` (upper).
pub fn select_offset<T>(link: &Link<T>, offset: isize) -> Option<&T> {
    let mut node = link.as_ref()?;

    // Running counts over the whole tree, not just the current subtree.
    let mut less = size(&node.left) as isize;
    let mut greater = size(&node.right) as isize;

    while greater - less != offset {
        if greater - less > offset {
            greater -= size(&node.right) as isize;
            node = node.right.as_ref()?;
            less += 1 + size(&node.left) as isize;
            greater += size(&node.right) as isize;
        } else {
            less -= size(&node.left) as isize;
            node = node.left.as_ref()?;
            greater += 1 + size(&node.right) as isize;
            less += size(&node.left) as isize;
        }
    }

    Some(&node.item)
}

/// Returns the subtree's items by depth, with `None` marking absent positions.
///
/// Layer `d` always holds `2^d` slots. The walk stops at the first layer without any items.
pub fn layers<T>(link: &Link<T>) -> Vec<Vec<Option<&T>>> {
    let mut layers = vec![];
    let mut queue = VecDeque::new();
    queue.push_back(link.as_ref());

    loop {
        let mut layer = Vec::with_capacity(queue.len());

        for _ in 0..queue.len() {
            match queue.pop_front() {
                Some(Some(node)) => {
                    layer.push(Some(&node.item));
                    queue.push_back(node.left.as_ref());
                    queue.push_back(node.right.as_ref());
                }
                _ => {
                    layer.push(None);
                    queue.push_back(None);
                    queue.push_back(None);
                }
            }
        }

        if layer.iter().all(Option::is_none) { return layers; }
        layers.push(layer);
    }
}

pub trait Dir: Sized {
    type Opposite: Dir<Opposite=Self>;

    fn forward<T>(node: &Node<T>) -> &Link<T>;
    fn forward_mut<T>(node: &mut Node<T>) -> &mut Link<T>;
    fn forward_and_item_mut<T>(node: &mut Node<T>) -> (&mut Link<T>, &mut T);

    /// Returns the last node reached by following this direction from the given link.
    fn extremum<T>(link: &Link<T>) -> Option<&Node<T>> {
        let mut node = link.as_deref()?;

        while let Some(child) = Self::forward(node).as_deref() {
            node = child;
        }

        Some(node)
    }

    /// Swaps the given item with the item of the extremum of the given subtree.
    fn swap_extremum<T>(link: &mut Link<T>, item: &mut T) {
        if let Some(ref mut node) = *link {
            if Self::forward(node).is_some() {
                Self::swap_extremum(Self::forward_mut(node), item);
            } else {
                mem::swap(&mut node.item, item);
            }
        }
    }

    /// Swaps the node's item with its in-order neighbor on this side: the predecessor for
    /// `Left` and the successor for `Right`.
    fn swap_neighbor<T>(node: &mut Node<T>) {
        let (child, item) = Self::forward_and_item_mut(node);
        Self::Opposite::swap_extremum(child, item);
    }
}

pub enum Left {}

impl Dir for Left {
    type Opposite = Right;

    fn forward<T>(node: &Node<T>) -> &Link<T> { &node.left }
    fn forward_mut<T>(node: &mut Node<T>) -> &mut Link<T> { &mut node.left }

    fn forward_and_item_mut<T>(node: &mut Node<T>) -> (&mut Link<T>, &mut T) {
        (&mut node.left, &mut node.item)
    }
}

pub enum Right {}

impl Dir for Right {
    type Opposite = Left;

    fn forward<T>(node: &Node<T>) -> &Link<T> { &node.right }
    fn forward_mut<T>(node: &mut Node<T>) -> &mut Link<T> { &mut node.right }

    fn forward_and_item_mut<T>(node: &mut Node<T>) -> (&mut Link<T>, &mut T) {
        (&mut node.right, &mut node.item)
    }
}
