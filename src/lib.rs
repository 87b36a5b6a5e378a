//! A red-black tree whose ordering is decided by the caller.
//!
//! Every ordered operation takes the comparator as an argument, so the same
//! [`Tree`] can hold payloads that have no [`Ord`] implementation at all, and
//! duplicates are kept (an equal payload lands to the right of the ones
//! already present).
//!
//! ```
//! use rbnoir::Tree;
//!
//! let mut tree = Tree::new();
//! for k in [1, 3, 2, 5, 4] {
//!     tree.insert(k, i32::cmp)?;
//! }
//!
//! let mut seen = vec![];
//! tree.traverse_inorder(|node| seen.push(*node.value()));
//! assert_eq!(seen, [1, 2, 3, 4, 5]);
//!
//! assert_eq!(tree.delete(&3, i32::cmp), Some(3));
//! assert!(tree.search(&3, i32::cmp).is_none());
//! # Ok::<(), rbnoir::Error>(())
//! ```
mod alloc;
#[cfg(test)]
mod check;
mod data;
mod error;
mod iter;
mod node;
mod root;
mod traverse;
mod tree;

use std::{marker::PhantomData, ptr::NonNull};

pub use data::Data;
pub use error::{Error, Result};
pub use iter::{IntoIter, Iter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red = 0,
    Black = 1,
}

impl From<usize> for Color {
    fn from(color: usize) -> Color {
        match color {
            0 => Color::Red,
            _ => Color::Black,
        }
    }
}

/// Which child slot of its parent a node hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Left,
    Right,
}

pub(crate) type NodePtr<T> = Option<NonNull<Node<T>>>;

/// Null-tolerant accessors: an absent node reads as black with no relatives,
/// and writes to an absent node are dropped.
pub(crate) trait NodePtrExt {
    type Value;

    fn color(&self) -> Color;
    fn is_black(&self) -> bool;
    fn is_red(&self) -> bool;
    fn left(&self) -> NodePtr<Self::Value>;
    fn parent(&self) -> NodePtr<Self::Value>;
    fn right(&self) -> NodePtr<Self::Value>;
    fn set_color(&mut self, color: Color);
    fn set_left(&mut self, left: NodePtr<Self::Value>);
    fn set_parent(&mut self, parent: NodePtr<Self::Value>);
    fn set_right(&mut self, right: NodePtr<Self::Value>);
}

impl<T> NodePtrExt for NodePtr<T> {
    type Value = T;

    #[inline(always)]
    fn color(&self) -> Color {
        self.map_or(Color::Black, |v| unsafe { v.as_ref() }.color())
    }

    #[inline(always)]
    fn is_black(&self) -> bool {
        self.color() == Color::Black
    }

    #[inline(always)]
    fn is_red(&self) -> bool {
        self.color() == Color::Red
    }

    #[inline(always)]
    fn left(&self) -> NodePtr<T> {
        self.and_then(|v| unsafe { v.as_ref() }.left)
    }

    #[inline(always)]
    fn parent(&self) -> NodePtr<T> {
        self.and_then(|v| unsafe { v.as_ref() }.parent_ptr())
    }

    #[inline(always)]
    fn right(&self) -> NodePtr<T> {
        self.and_then(|v| unsafe { v.as_ref() }.right)
    }

    #[inline(always)]
    fn set_color(&mut self, color: Color) {
        if let Some(node) = self {
            unsafe { node.as_mut() }.set_color(color);
        }
    }

    #[inline(always)]
    fn set_left(&mut self, left: NodePtr<T>) {
        if let Some(node) = self {
            unsafe { node.as_mut() }.left = left;
        }
    }

    #[inline(always)]
    fn set_parent(&mut self, parent: NodePtr<T>) {
        if let Some(node) = self {
            unsafe { node.as_mut() }.set_parent(parent);
        }
    }

    #[inline(always)]
    fn set_right(&mut self, right: NodePtr<T>) {
        if let Some(node) = self {
            unsafe { node.as_mut() }.right = right;
        }
    }
}

/// A tree node: a payload plus its links.
///
/// Nodes handed out by the tree are always borrowed from it; a detached node
/// can be built with [`Node::new`] or [`Node::boxed`] and given to
/// [`Tree::insert_node`].
#[repr(C)]
pub struct Node<T> {
    // The parent pointer with the color in the lowest bit.
    pub(crate) parent_color: *mut Node<T>,
    pub(crate) right: NodePtr<T>,
    pub(crate) left: NodePtr<T>,
    value: T,
}

/// The balancing half of the tree: owns the root link and performs every
/// rotation and recoloring. It neither allocates nor frees.
pub(crate) struct Root<T> {
    root: NodePtr<T>,
}

/// An ordered collection of `T` kept balanced as a red-black tree.
pub struct Tree<T> {
    root: Root<T>,
    len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

// SAFETY: the tree exclusively owns its nodes; raw pointers never escape
// except as borrows tied to the tree's lifetime.
unsafe impl<T: Send> Send for Tree<T> {}
unsafe impl<T: Sync> Sync for Tree<T> {}
