use std::{
    fmt::Debug,
    ptr::{self, NonNull},
};

use crate::{Color, Direction, Node, NodePtr, Result, alloc};

// Public API.
impl<T> Node<T> {
    /// A detached red node holding `value`.
    pub fn new(value: T) -> Self {
        Node {
            parent_color: ptr::null_mut(),
            right: None,
            left: None,
            value,
        }
    }

    /// Like [`Node::new`], but on the heap and reporting allocation failure
    /// instead of aborting.
    pub fn boxed(value: T) -> Result<Box<Self>> {
        alloc::try_alloc_node(value)
    }

    #[inline(always)]
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    #[inline(always)]
    pub fn color(&self) -> Color {
        Color::from(self.parent_color.addr() & 1)
    }

    #[inline(always)]
    pub fn is_black(&self) -> bool {
        self.color() == Color::Black
    }

    #[inline(always)]
    pub fn is_red(&self) -> bool {
        self.color() == Color::Red
    }

    pub fn left(&self) -> Option<&Node<T>> {
        // SAFETY: children are owned by self and outlive the borrow.
        self.left.map(|n| unsafe { n.as_ref() })
    }

    pub fn right(&self) -> Option<&Node<T>> {
        // SAFETY: children are owned by self and outlive the borrow.
        self.right.map(|n| unsafe { n.as_ref() })
    }

    pub fn parent(&self) -> Option<&Node<T>> {
        // SAFETY: a linked node's parent lives as long as the tree that
        // lends out self.
        self.parent_ptr().map(|n| unsafe { n.as_ref() })
    }

    /// The in-order successor.
    pub fn next(&self) -> Option<&Node<T>> {
        self.next_ptr().map(|n| unsafe { n.as_ref() })
    }

    /// The in-order predecessor.
    pub fn prev(&self) -> Option<&Node<T>> {
        self.prev_ptr().map(|n| unsafe { n.as_ref() })
    }
}

// Crate API.
impl<T> Node<T> {
    #[inline(always)]
    pub(crate) fn parent_ptr(&self) -> NodePtr<T> {
        NonNull::new(self.parent_color.map_addr(|p| p & !1))
    }

    #[inline(always)]
    pub(crate) fn set_parent(&mut self, parent: NodePtr<T>) {
        self.set_parent_and_color(parent, self.color());
    }

    #[inline(always)]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.set_parent_and_color(self.parent_ptr(), color);
    }

    #[inline(always)]
    pub(crate) fn set_parent_and_color(&mut self, parent: NodePtr<T>, color: Color) {
        self.parent_color = parent
            .map_or(ptr::null_mut(), NonNull::as_ptr)
            .map_addr(|p| p | color as usize);
    }

    /// Forgets every link and turns the node red again.
    pub(crate) fn reset(&mut self) {
        self.parent_color = ptr::null_mut();
        self.left = None;
        self.right = None;
    }

    /// Hangs `node` under `parent` as a red leaf.
    ///
    /// # Safety
    ///
    /// Both pointers must be live, `node` must be detached and the
    /// `direction` slot of `parent` must be empty.
    pub(crate) unsafe fn link(mut node: NonNull<Self>, mut parent: NonNull<Self>, direction: Direction) {
        // SAFETY: delegated to the caller; the two &mut never overlap since
        // node is detached and therefore distinct from parent.
        unsafe {
            let node_ref = node.as_mut();
            node_ref.reset();
            node_ref.set_parent_and_color(Some(parent), Color::Red);
            let parent = parent.as_mut();
            match direction {
                Direction::Left => parent.left = Some(node),
                Direction::Right => parent.right = Some(node),
            }
        }
    }

    pub(crate) fn next_ptr(&self) -> NodePtr<T> {
        // If we have a right-hand child, go down and then left as far as we
        // can.
        if let Some(mut current) = self.right {
            // SAFETY: every linked child is live.
            while let Some(left) = unsafe { current.as_ref() }.left {
                current = left;
            }
            return Some(current);
        }
        // No right-hand children. Everything down and left is smaller than
        // us, so the successor is the first ancestor we reach from its left
        // side.
        let mut node = NonNull::from(self);
        let mut parent = self.parent_ptr();
        while let Some(p) = parent {
            // SAFETY: every linked parent is live.
            let p_ref = unsafe { p.as_ref() };
            if p_ref.right != Some(node) {
                break;
            }
            node = p;
            parent = p_ref.parent_ptr();
        }
        parent
    }

    pub(crate) fn prev_ptr(&self) -> NodePtr<T> {
        // Mirror of next_ptr: down and right inside the left subtree, or up
        // until we arrive from the right side.
        if let Some(mut current) = self.left {
            // SAFETY: every linked child is live.
            while let Some(right) = unsafe { current.as_ref() }.right {
                current = right;
            }
            return Some(current);
        }
        let mut node = NonNull::from(self);
        let mut parent = self.parent_ptr();
        while let Some(p) = parent {
            // SAFETY: every linked parent is live.
            let p_ref = unsafe { p.as_ref() };
            if p_ref.left != Some(node) {
                break;
            }
            node = p;
            parent = p_ref.parent_ptr();
        }
        parent
    }

    pub(crate) fn value_ptr(node: NonNull<Self>) -> *mut T {
        // SAFETY: projecting a field of a live node, no reference is created.
        unsafe { &raw mut (*node.as_ptr()).value }
    }
}

impl<T> Debug for Node<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:?}::({:?})", self.color(), self.value))
    }
}
