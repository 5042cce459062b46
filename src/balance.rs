//! Height and size bookkeeping, rotations, and the AVL retrace step.
//!
//! Every function here takes ownership of a subtree root and returns the root that should take
//! its place, so callers always overwrite their own child link with the result.

use log::trace;
use std::cmp;
use crate::node::{Link, Node};

/// Returns the height of the given subtree, or `-1` if it is empty.
pub fn height<T>(link: &Link<T>) -> isize { link.as_ref().map_or(-1, |node| node.height) }

/// Returns the number of items in the given subtree.
pub fn size<T>(link: &Link<T>) -> usize { link.as_ref().map_or(0, |node| node.size) }

/// Returns `height(right) - height(left)` for the given node.
pub fn balance_factor<T>(node: &Node<T>) -> isize { height(&node.right) - height(&node.left) }

/// Recomputes the node's cached height and size from its children, which must already be
/// up to date.
pub fn update<T>(node: &mut Node<T>) {
    node.height = 1 + cmp::max(height(&node.left), height(&node.right));
    node.size = 1 + size(&node.left) + size(&node.right);
}

/// Rotates the node to the left, if possible, returning the new subtree root.
pub fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut right = match node.right.take() {
        None => return node,
        Some(right) => right,
    };

    node.right = right.left.take();
    update(&mut node);
    right.left = Some(node);
    update(&mut right);
    right
}

/// Rotates the node to the right, if possible, returning the new subtree root.
pub fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut left = match node.left.take() {
        None => return node,
        Some(left) => left,
    };

    node.left = left.right.take();
    update(&mut node);
    left.right = Some(node);
    update(&mut left);
    left
}

/// Refreshes the node after one of its children was replaced and rotates it back into balance
/// if its balance factor left `[-1, 1]`.
pub fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    update(&mut node);

    let factor = balance_factor(&node);

    if factor > 1 {
        if node.right.as_ref().map_or(0, |right| balance_factor(right)) < 0 {
            trace!("right-left rotation at node of height {}", node.height);
            node.right = node.right.take().map(rotate_right);
        } else {
            trace!("left rotation at node of height {}", node.height);
        }

        rotate_left(node)
    } else if factor < -1 {
        if node.left.as_ref().map_or(0, |left| balance_factor(left)) > 0 {
            trace!("left-right rotation at node of height {}", node.height);
            node.left = node.left.take().map(rotate_left);
        } else {
            trace!("right rotation at node of height {}", node.height);
        }

        rotate_right(node)
    } else {
        node
    }
}
