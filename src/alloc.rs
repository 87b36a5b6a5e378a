use std::{
    alloc::{Layout, alloc},
    ptr::NonNull,
};

use log::warn;

use crate::{Error, Node, Result};

/// Moves `value` into a fresh, detached, red node.
///
/// On failure `value` is dropped and nothing is allocated.
pub(crate) fn try_alloc_node<T>(value: T) -> Result<Box<Node<T>>> {
    let layout = Layout::new::<Node<T>>();
    let Some(node) = NonNull::new(raw_alloc(layout).cast::<Node<T>>()) else {
        warn!("node allocation of {} bytes failed", layout.size());
        return Err(Error::AllocationFailure {
            what: "a tree node",
            size: layout.size(),
        });
    };
    // SAFETY: node is valid for writes and properly aligned for Node<T>; it
    // was allocated with the global allocator and Layout::new::<Node<T>>,
    // which is exactly what Box expects.
    unsafe {
        node.as_ptr().write(Node::new(value));
        Ok(Box::from_raw(node.as_ptr()))
    }
}

/// # Safety
///
/// `node` must have been leaked from a `Box<Node<T>>` and must be unlinked
/// from any tree; ownership returns to the caller.
pub(crate) unsafe fn own_back<T>(node: NonNull<Node<T>>) -> Box<Node<T>> {
    unsafe { Box::from_raw(node.as_ptr()) }
}

fn raw_alloc(layout: Layout) -> *mut u8 {
    #[cfg(test)]
    if failpoint::take() {
        return std::ptr::null_mut();
    }
    // SAFETY: Node<T> carries three pointers, its layout is never zero-sized.
    unsafe { alloc(layout) }
}
