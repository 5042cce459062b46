use std::collections::VecDeque;
use self::visit::{Seen, Visit};
use super::Node;

/// A handle on a node that an inorder walk can split into its item and its children.
pub trait NodeRef: Sized {
    type Item;
    fn item(self) -> Self::Item;
    fn left(&mut self) -> Option<Self>;
    fn right(&mut self) -> Option<Self>;
}

impl<'a, T> NodeRef for &'a Node<T> {
    type Item = &'a T;
    fn item(self) -> &'a T { &self.item }
    fn left(&mut self) -> Option<&'a Node<T>> { self.left.as_deref() }
    fn right(&mut self) -> Option<&'a Node<T>> { self.right.as_deref() }
}

impl<T> NodeRef for Box<Node<T>> {
    type Item = T;
    fn item(self) -> T { self.item }
    fn left(&mut self) -> Option<Box<Node<T>>> { self.left.take() }
    fn right(&mut self) -> Option<Box<Node<T>>> { self.right.take() }
}

/// An inorder walk that can be consumed from both ends.
///
/// Ascending iteration works on the back of `visits` and descending iteration on its front, so
/// each end only ever pushes the children it has not handed to the other end.
#[derive(Clone)]
pub struct Iter<N> where N: NodeRef {
    visits: VecDeque<Visit<N>>,
    size: usize,
}

impl<N> Iter<N> where N: NodeRef {
    pub fn new(root: Option<N>, size: usize) -> Iter<N> {
        Iter { visits: root.into_iter().map(Visit::new).collect(), size: size }
    }
}

enum Op<T> {
    Push(Option<T>),
    PopPush(Option<T>),
    Pop,
}

impl<N> Iterator for Iter<N> where N: NodeRef {
    type Item = N::Item;

    fn next(&mut self) -> Option<N::Item> {
        loop {
            let op = match self.visits.back_mut() {
                None => return None,
                Some(visit) => match visit.seen() {
                    Seen::N | Seen::R => Op::Push(visit.left()),
                    Seen::L => Op::PopPush(visit.right()),
                    Seen::B => Op::Pop,
                },
            };

            match op {
                Op::Push(node) =>
                    if let Some(node) = node { self.visits.push_back(Visit::new(node)); },
                Op::PopPush(node) => {
                    let visit = self.visits.pop_back()?;
                    if let Some(node) = node { self.visits.push_back(Visit::new(node)); }
                    self.size -= 1;
                    return Some(visit.item());
                }
                Op::Pop => {
                    let visit = self.visits.pop_back()?;
                    self.size -= 1;
                    return Some(visit.item());
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.size, Some(self.size)) }
}

impl<N> DoubleEndedIterator for Iter<N> where N: NodeRef {
    fn next_back(&mut self) -> Option<N::Item> {
        loop {
            let op = match self.visits.front_mut() {
                None => return None,
                Some(visit) => match visit.seen() {
                    Seen::N | Seen::L => Op::Push(visit.right()),
                    Seen::R => Op::PopPush(visit.left()),
                    Seen::B => Op::Pop,
                },
            };

            match op {
                Op::Push(node) =>
                    if let Some(node) = node { self.visits.push_front(Visit::new(node)); },
                Op::PopPush(node) => {
                    let visit = self.visits.pop_front()?;
                    if let Some(node) = node { self.visits.push_front(Visit::new(node)); }
                    self.size -= 1;
                    return Some(visit.item());
                }
                Op::Pop => {
                    let visit = self.visits.pop_front()?;
                    self.size -= 1;
                    return Some(visit.item());
                }
            }
        }
    }
}

impl<N> ExactSizeIterator for Iter<N> where N: NodeRef {}

mod visit {
    #[derive(Clone)]
    pub struct Visit<N> where N: super::NodeRef {
        node: N,
        seen: Seen,
    }

    impl<N> Visit<N> where N: super::NodeRef {
        pub fn new(node: N) -> Visit<N> { Visit { node: node, seen: Seen::N } }

        pub fn left(&mut self) -> Option<N> {
            match self.seen {
                Seen::N => { self.seen = Seen::L; self.node.left() }
                Seen::R => { self.seen = Seen::B; self.node.left() }
                Seen::L | Seen::B => None,
            }
        }

        pub fn right(&mut self) -> Option<N> {
            match self.seen {
                Seen::N => { self.seen = Seen::R; self.node.right() }
                Seen::L => { self.seen = Seen::B; self.node.right() }
                Seen::R | Seen::B => None,
            }
        }

        pub fn item(self) -> N::Item { self.node.item() }

        pub fn seen(&self) -> Seen { self.seen }
    }

    /// Which of a node's children have already been pushed.
    #[derive(Clone, Copy)]
    pub enum Seen {
        N,
        L,
        R,
        B,
    }
}
