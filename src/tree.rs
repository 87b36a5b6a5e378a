use std::{
    cmp::Ordering::{self, *},
    fmt::Debug,
    marker::PhantomData,
    ptr::NonNull,
};

use log::{debug, trace};

use crate::{Direction, Node, NodePtr, Result, Root, Tree, alloc};

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for Tree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Tree<T> {
    pub const fn new() -> Self {
        Tree {
            root: Root::new(),
            len: 0,
            _marker: PhantomData,
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn root(&self) -> Option<&Node<T>> {
        self.root.root().map(|n| unsafe { n.as_ref() })
    }

    /// The smallest payload, if any.
    pub fn first(&self) -> Option<&T> {
        self.root.first().map(|n| unsafe { n.as_ref() }.value())
    }

    /// The largest payload, if any. Among duplicates, the last inserted.
    pub fn last(&self) -> Option<&T> {
        self.root.last().map(|n| unsafe { n.as_ref() }.value())
    }

    /// The number of nodes on the longest root-to-leaf path; 0 when empty.
    pub fn depth(&self) -> usize {
        fn depth_of<T>(node: NodePtr<T>) -> usize {
            node.map_or(0, |n| {
                let n = unsafe { n.as_ref() };
                1 + depth_of(n.left).max(depth_of(n.right))
            })
        }
        depth_of(self.root.root())
    }

    /// Moves `value` into a new node and links it in `cmp` order.
    ///
    /// Equal payloads are kept: the new one goes after every payload already
    /// comparing equal to it. On allocation failure the tree is unchanged and
    /// `value` is dropped.
    pub fn insert<F>(&mut self, value: T, cmp: F) -> Result<()>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let node = alloc::try_alloc_node(value)?;
        self.link_node(node, cmp);
        Ok(())
    }

    /// Links a node built with [`Node::new`]/[`Node::boxed`]; see
    /// [`Tree::insert`].
    pub fn insert_node<F>(&mut self, node: Box<Node<T>>, cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.link_node(node, cmp);
    }

    /// Finds a node whose payload compares equal to `key`.
    ///
    /// With duplicates present, any one of the equal nodes may be returned.
    pub fn search<Q, F>(&self, key: &Q, cmp: F) -> Option<&Node<T>>
    where
        Q: ?Sized,
        F: FnMut(&Q, &T) -> Ordering,
    {
        self.search_ptr(key, cmp).map(|n| unsafe { n.as_ref() })
    }

    pub fn get<Q, F>(&self, key: &Q, cmp: F) -> Option<&T>
    where
        Q: ?Sized,
        F: FnMut(&Q, &T) -> Ordering,
    {
        self.search(key, cmp).map(Node::value)
    }

    pub fn contains<Q, F>(&self, key: &Q, cmp: F) -> bool
    where
        Q: ?Sized,
        F: FnMut(&Q, &T) -> Ordering,
    {
        self.search_ptr(key, cmp).is_some()
    }

    /// Removes one payload comparing equal to `key` and hands it back.
    /// Returns `None`, leaving the tree as it was, when nothing matches.
    pub fn delete<Q, F>(&mut self, key: &Q, cmp: F) -> Option<T>
    where
        Q: ?Sized,
        F: FnMut(&Q, &T) -> Ordering,
    {
        let Some(node) = self.search_ptr(key, cmp) else {
            debug!("delete: no payload matches the key");
            return None;
        };
        Some(self.remove_node(node))
    }

    pub fn pop_first(&mut self) -> Option<T> {
        let first = self.root.first()?;
        Some(self.remove_node(first))
    }

    pub fn pop_last(&mut self) -> Option<T> {
        let last = self.root.last()?;
        Some(self.remove_node(last))
    }

    /// Drops every node, children before parents.
    pub fn clear(&mut self) {
        let mut current = self.root.root();
        if current.is_none() {
            return;
        }
        debug!("clearing a tree of {} nodes", self.len);

        // The path from the root never outgrows the red-black height bound.
        let bound = 2 * (usize::BITS - self.len.leading_zeros()) as usize;
        let mut directions = Vec::with_capacity(bound);
        while let Some(node) = current {
            let node_ref = unsafe { node.as_ref() };
            if node_ref.left.is_some() {
                current = node_ref.left;
                directions.push(Direction::Left);
                continue;
            }
            if node_ref.right.is_some() {
                current = node_ref.right;
                directions.push(Direction::Right);
                continue;
            }
            current = node_ref.parent_ptr();
            // drop; don't go through erase => no rebalancing overhead.
            if let Some(mut parent) = current {
                let parent = unsafe { parent.as_mut() };
                match directions.pop() {
                    Some(Direction::Left) => parent.left = None,
                    Some(Direction::Right) => parent.right = None,
                    None => {}
                }
            }
            // SAFETY: node is a leaf cut off from its parent.
            drop(unsafe { alloc::own_back(node) });
        }

        self.root.set_root(None);
        self.len = 0;
    }
}

// Private.
impl<T> Tree<T> {
    fn link_node<F>(&mut self, mut node: Box<Node<T>>, mut cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        node.reset();

        // The node stays boxed while cmp runs, a panicking cmp frees it.
        let mut parent = None;
        let mut direction = Direction::Left;
        let mut cursor = self.root.root();
        while let Some(candidate) = cursor {
            parent = cursor;
            let candidate = unsafe { candidate.as_ref() };
            if cmp(node.value(), candidate.value()) == Less {
                direction = Direction::Left;
                cursor = candidate.left;
            } else {
                direction = Direction::Right;
                cursor = candidate.right;
            }
        }

        let node = NonNull::from(Box::leak(node));
        match parent {
            // SAFETY: the descent stopped at parent's empty direction slot.
            Some(parent) => unsafe { Node::link(node, parent, direction) },
            None => self.root.set_root(Some(node)),
        }
        self.root.insert_fixup(node);
        self.len += 1;
        trace!("linked a node, len is now {}", self.len);
    }

    fn search_ptr<Q, F>(&self, key: &Q, mut cmp: F) -> NodePtr<T>
    where
        Q: ?Sized,
        F: FnMut(&Q, &T) -> Ordering,
    {
        let mut node = self.root.root();
        while let Some(candidate) = node {
            let candidate = unsafe { candidate.as_ref() };
            match cmp(key, candidate.value()) {
                Equal => break,
                Greater => node = candidate.right,
                Less => node = candidate.left,
            }
        }
        node
    }

    fn remove_node(&mut self, node: NonNull<Node<T>>) -> T {
        let victim = self.root.erase(node);
        self.len -= 1;
        trace!("unlinked a node, len is now {}", self.len);
        // SAFETY: erase detached victim; linked nodes are always leaked
        // boxes.
        unsafe { alloc::own_back(victim) }.into_value()
    }
}
