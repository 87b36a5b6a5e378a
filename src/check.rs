//! Red-black invariant checks shared by the unit tests.
use std::{cmp::Ordering, fmt::Debug, ptr};

use crate::{Node, Tree};

/// Panics unless `tree` is a valid red-black tree ordered by `cmp`.
/// Returns the black-height of the root.
pub(crate) fn assert_invariants<T, F>(tree: &Tree<T>, mut cmp: F) -> usize
where
    T: Debug,
    F: FnMut(&T, &T) -> Ordering,
{
    if let Some(root) = tree.root() {
        assert!(root.is_black(), "root has to be black");
        assert!(root.parent().is_none(), "root cannot have a parent");
    }
    let black_height = validate_node(tree.root());

    let mut count = 0;
    tree.traverse_inorder(|_| count += 1);
    assert_eq!(tree.len(), count, "len and node count disagree");

    let values: Vec<&T> = tree.iter().collect();
    for pair in values.windows(2) {
        assert_ne!(
            Ordering::Greater,
            cmp(pair[0], pair[1]),
            "in-order walk is out of order: {:?}",
            pair
        );
    }
    black_height
}

fn validate_node<T>(node: Option<&Node<T>>) -> usize {
    let Some(node) = node else {
        return 0;
    };
    for child in [node.left(), node.right()].into_iter().flatten() {
        let parent = child.parent().expect("child without a parent");
        assert!(ptr::eq(parent, node), "child points at the wrong parent");
        assert!(
            node.is_black() || child.is_black(),
            "cannot have two red nodes in a row"
        );
    }
    let left = validate_node(node.left());
    let right = validate_node(node.right());
    assert_eq!(left, right, "black height of all paths has to be equal");
    left + usize::from(node.is_black())
}
