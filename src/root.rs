use std::ptr::{self, NonNull};

use super::{Color, Node, NodePtr, NodePtrExt, Root};

impl<T> Root<T> {
    pub(crate) const fn new() -> Self {
        Root { root: None }
    }

    #[inline(always)]
    pub(crate) fn root(&self) -> NodePtr<T> {
        self.root
    }

    #[inline(always)]
    pub(crate) fn set_root(&mut self, root: NodePtr<T>) {
        self.root = root;
    }

    pub(crate) fn first(&self) -> NodePtr<T> {
        let mut n = self.root?;
        while let Some(left) = unsafe { n.as_ref() }.left {
            n = left;
        }
        Some(n)
    }

    pub(crate) fn last(&self) -> NodePtr<T> {
        let mut n = self.root?;
        while let Some(right) = unsafe { n.as_ref() }.right {
            n = right;
        }
        Some(n)
    }

    /// Promotes `x`'s right child into `x`'s place.
    ///
    /// ```text
    ///     p                 p
    ///     |                 |
    ///     x                 y
    ///    / \      -->      / \
    ///   a   y             x   c
    ///      / \           / \
    ///     b   c         a   b
    /// ```
    ///
    /// Colors are left alone.
    ///
    /// # Panics
    ///
    /// Panics if `x` is absent or has no right child.
    pub(crate) fn rotate_left(&mut self, mut x: NodePtr<T>) {
        let mut y = x.right();
        assert!(y.is_some(), "rotate_left needs a right child");
        let parent = x.parent();

        let mut b = y.left();
        x.set_right(b);
        b.set_parent(x);

        y.set_parent(parent);
        self.change_child(x, y, parent);

        y.set_left(x);
        x.set_parent(y);
    }

    /// Mirror of [`Root::rotate_left`]: promotes `x`'s left child.
    ///
    /// # Panics
    ///
    /// Panics if `x` is absent or has no left child.
    pub(crate) fn rotate_right(&mut self, mut x: NodePtr<T>) {
        let mut y = x.left();
        assert!(y.is_some(), "rotate_right needs a left child");
        let parent = x.parent();

        let mut b = y.right();
        x.set_left(b);
        b.set_parent(x);

        y.set_parent(parent);
        self.change_child(x, y, parent);

        y.set_right(x);
        x.set_parent(y);
    }

    /// Restores the invariants after `node` was linked as a red leaf.
    pub(crate) fn insert_fixup(&mut self, node: NonNull<Node<T>>) {
        let mut node: NodePtr<T> = Some(node);

        loop {
            /*
             * Loop invariant: node is red.
             *
             * A black parent (or no parent, node being the root) means
             * there is no red-red violation left to fix.
             */
            let mut parent = node.parent();
            if parent.is_black() {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let mut gparent = parent.parent();

            if parent == gparent.left() {
                let mut uncle = gparent.right();
                if uncle.is_red() {
                    /*
                     * Case A - the uncle is red (color flips).
                     *
                     *       G            g
                     *      / \          / \
                     *     p   u  -->   P   U
                     *    /            /
                     *   n            n
                     *
                     * g's parent might be red, recurse at g.
                     */
                    parent.set_color(Color::Black);
                    uncle.set_color(Color::Black);
                    gparent.set_color(Color::Red);
                    node = gparent;
                    continue;
                }

                if node == parent.right() {
                    /*
                     * Case B - inner grandchild (left rotate at parent).
                     *
                     *      G             G
                     *     / \           / \
                     *    p   U  -->    n   U
                     *     \           /
                     *      n         p
                     *
                     * Still a red-red violation, now an outer one.
                     */
                    self.rotate_left(parent);
                    node = parent;
                    parent = node.parent();
                }

                /*
                 * Case C - outer grandchild (right rotate at gparent).
                 *
                 *        G           P
                 *       / \         / \
                 *      p   U  -->  n   g
                 *     /                 \
                 *    n                   U
                 */
                parent.set_color(Color::Black);
                gparent.set_color(Color::Red);
                self.rotate_right(gparent);
                break;
            } else {
                let mut uncle = gparent.left();
                if uncle.is_red() {
                    /* Case A - color flips */
                    parent.set_color(Color::Black);
                    uncle.set_color(Color::Black);
                    gparent.set_color(Color::Red);
                    node = gparent;
                    continue;
                }

                if node == parent.left() {
                    /* Case B - right rotate at parent */
                    self.rotate_right(parent);
                    node = parent;
                    parent = node.parent();
                }

                /* Case C - left rotate at gparent */
                parent.set_color(Color::Black);
                gparent.set_color(Color::Red);
                self.rotate_left(gparent);
                break;
            }
        }

        self.root.set_color(Color::Black);
    }

    /// Unlinks `node` and rebalances.
    ///
    /// When `node` has two children its payload is swapped with its
    /// predecessor's and the predecessor is unlinked instead. Either way the
    /// returned node is detached and holds the payload `node` had on entry.
    pub(crate) fn erase(&mut self, node: NonNull<Node<T>>) -> NonNull<Node<T>> {
        let mut victim = node;
        // SAFETY: node is linked in this tree, hence live.
        let node_ref = unsafe { node.as_ref() };
        if node_ref.left.is_some() && node_ref.right.is_some() {
            // With a left subtree the predecessor is its rightmost node.
            if let Some(pred) = node_ref.prev_ptr() {
                // SAFETY: two distinct live nodes; only the payloads move.
                unsafe { ptr::swap(Node::value_ptr(node), Node::value_ptr(pred)) };
                victim = pred;
            }
        }

        let victim_ptr: NodePtr<T> = Some(victim);
        let mut child = victim_ptr.left().or(victim_ptr.right());
        let parent = victim_ptr.parent();

        if child.is_some() {
            /*
             * One child: it must be red and victim black. Splice it in and
             * let the fixup paint it black.
             *
             *     (p)          (p)
             *      |            |
             *      V    -->     c
             *      |
             *      c
             */
            child.set_parent(parent);
            self.change_child(victim_ptr, child, parent);
            if victim_ptr.is_black() {
                self.erase_fixup(child);
            }
        } else if parent.is_none() {
            self.root = None;
        } else {
            /*
             * A leaf. A black one leaves a double-black hole; repair it
             * while the leaf still marks where the hole is, then cut it off.
             */
            if victim_ptr.is_black() {
                self.erase_fixup(victim_ptr);
            }
            let mut parent = victim_ptr.parent();
            if parent.left() == victim_ptr {
                parent.set_left(None);
            } else if parent.right() == victim_ptr {
                parent.set_right(None);
            }
        }

        // SAFETY: victim is unlinked now and exclusively ours.
        unsafe { victim.as_mut() }.reset();
        victim
    }

    /// Clears a double-black deficiency sitting at `node`.
    fn erase_fixup(&mut self, mut node: NodePtr<T>) {
        while node != self.root && node.is_black() {
            /*
             * Loop invariants:
             * - node is black and not the root
             * - paths through node are one black short of the paths
             *   through its sibling, which therefore exists.
             */
            let mut parent = node.parent();
            if node == parent.left() {
                let mut sibling = parent.right();
                if sibling.is_red() {
                    /*
                     * Case 1 - left rotate at parent
                     *
                     *     P               S
                     *    / \             / \
                     *   N   s    -->    p   Sr
                     *      / \         / \
                     *     Sl  Sr      N   Sl
                     */
                    sibling.set_color(Color::Black);
                    parent.set_color(Color::Red);
                    self.rotate_left(parent);
                    sibling = parent.right();
                }

                if sibling.left().is_black() && sibling.right().is_black() {
                    /*
                     * Case 2 - sibling color flip
                     * (p could be either color here)
                     *
                     *    (p)           (p)
                     *    / \           / \
                     *   N   S    -->  N   s
                     *      / \           / \
                     *     Sl  Sr        Sl  Sr
                     *
                     * The deficiency moves up to p.
                     */
                    sibling.set_color(Color::Red);
                    node = parent;
                    continue;
                }

                if sibling.right().is_black() {
                    /*
                     * Case 3 - right rotate at sibling
                     *
                     *   (p)           (p)
                     *   / \           / \
                     *  N   S    -->  N   Sl
                     *     / \             \
                     *    sl  Sr            s
                     *                       \
                     *                        Sr
                     */
                    sibling.left().set_color(Color::Black);
                    sibling.set_color(Color::Red);
                    self.rotate_right(sibling);
                    sibling = parent.right();
                }

                /*
                 * Case 4 - left rotate at parent + color flips
                 * (p and sl could be either color here)
                 *
                 *      (p)             (s)
                 *      / \             / \
                 *     N   S     -->   P   Sr
                 *        / \         / \
                 *      (sl) sr      N  (sl)
                 */
                sibling.set_color(parent.color());
                parent.set_color(Color::Black);
                sibling.right().set_color(Color::Black);
                self.rotate_left(parent);
                node = self.root;
            } else {
                let mut sibling = parent.left();
                if sibling.is_red() {
                    /* Case 1 - right rotate at parent */
                    sibling.set_color(Color::Black);
                    parent.set_color(Color::Red);
                    self.rotate_right(parent);
                    sibling = parent.left();
                }

                if sibling.left().is_black() && sibling.right().is_black() {
                    /* Case 2 - sibling color flip */
                    sibling.set_color(Color::Red);
                    node = parent;
                    continue;
                }

                if sibling.left().is_black() {
                    /* Case 3 - left rotate at sibling */
                    sibling.right().set_color(Color::Black);
                    sibling.set_color(Color::Red);
                    self.rotate_left(sibling);
                    sibling = parent.left();
                }

                /* Case 4 - right rotate at parent + color flips */
                sibling.set_color(parent.color());
                parent.set_color(Color::Black);
                sibling.left().set_color(Color::Black);
                self.rotate_right(parent);
                node = self.root;
            }
        }

        node.set_color(Color::Black);
    }

    fn change_child(&mut self, old: NodePtr<T>, new: NodePtr<T>, parent: NodePtr<T>) {
        if let Some(mut parent) = parent {
            let parent = unsafe { parent.as_mut() };
            if parent.left == old {
                parent.left = new;
            } else {
                parent.right = new;
            }
        } else {
            self.root = new;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::alloc;
    use pretty_assertions::assert_eq;

    fn leaf(value: i32) -> NonNull<Node<i32>> {
        NonNull::from(Box::leak(alloc::try_alloc_node(value).unwrap()))
    }

    fn value(node: NodePtr<i32>) -> Option<i32> {
        node.map(|n| *unsafe { n.as_ref() }.value())
    }

    fn free(root: &mut Root<i32>) {
        let mut stack: Vec<NodePtr<i32>> = vec![root.root()];
        while let Some(node) = stack.pop() {
            if let Some(node) = node {
                stack.push(Some(node).left());
                stack.push(Some(node).right());
                drop(unsafe { alloc::own_back(node) });
            }
        }
        root.set_root(None);
    }

    //      x
    //     / \
    //    a   y
    //       / \
    //      b   c
    fn sample() -> (Root<i32>, [NonNull<Node<i32>>; 5]) {
        let [a, x, b, y, c] = [leaf(1), leaf(2), leaf(3), leaf(4), leaf(5)];
        let mut root = Root::new();
        root.set_root(Some(x));
        unsafe {
            Node::link(a, x, crate::Direction::Left);
            Node::link(y, x, crate::Direction::Right);
            Node::link(b, y, crate::Direction::Left);
            Node::link(c, y, crate::Direction::Right);
        }
        (root, [a, x, b, y, c])
    }

    #[test]
    fn rotate_left_then_right_restores_shape() {
        let (mut root, [a, x, b, y, c]) = sample();

        root.rotate_left(Some(x));
        assert_eq!(Some(4), value(root.root()));
        assert_eq!(None, value(Some(y).parent()));
        assert_eq!(Some(2), value(Some(y).left()));
        assert_eq!(Some(5), value(Some(y).right()));
        assert_eq!(Some(1), value(Some(x).left()));
        assert_eq!(Some(3), value(Some(x).right()));
        assert_eq!(Some(2), value(Some(b).parent()));
        assert_eq!(Some(4), value(Some(x).parent()));

        root.rotate_right(Some(y));
        assert_eq!(Some(2), value(root.root()));
        assert_eq!(Some(1), value(Some(x).left()));
        assert_eq!(Some(4), value(Some(x).right()));
        assert_eq!(Some(3), value(Some(y).left()));
        assert_eq!(Some(4), value(Some(b).parent()));
        assert_eq!(Some(2), value(Some(a).parent()));
        assert_eq!(Some(4), value(Some(c).parent()));

        free(&mut root);
    }

    #[test]
    fn rotation_keeps_colors() {
        let (mut root, [_, x, _, y, _]) = sample();
        Some(x).set_color(Color::Black);
        Some(y).set_color(Color::Red);

        root.rotate_left(Some(x));
        assert_eq!(Color::Black, Some(x).color());
        assert_eq!(Color::Red, Some(y).color());

        free(&mut root);
    }

    #[test]
    fn rotate_below_the_root_relinks_the_parent() {
        let (mut root, [_, x, _, y, c]) = sample();
        root.rotate_left(Some(y));
        assert_eq!(Some(2), value(root.root()));
        assert_eq!(Some(5), value(Some(x).right()));
        assert_eq!(Some(2), value(Some(c).parent()));
        assert_eq!(Some(4), value(Some(c).left()));

        free(&mut root);
    }

    #[test]
    #[should_panic(expected = "rotate_left needs a right child")]
    fn rotate_left_without_right_child_panics() {
        let (mut root, [a, ..]) = sample();
        root.rotate_left(Some(a));
    }

    #[test]
    #[should_panic(expected = "rotate_right needs a left child")]
    fn rotate_right_without_left_child_panics() {
        let (mut root, [_, _, _, _, c]) = sample();
        root.rotate_right(Some(c));
    }
}
