use std::collections::VecDeque;

use crate::{Node, Tree};

/// Depth-first and breadth-first walks handing each node to a visitor.
///
/// The walks borrow the tree immutably, so a visitor can't restructure it
/// mid-walk. The depth-first ones recurse, which is bounded by
/// [`Tree::depth`]; use [`Tree::iter`] for a walk that doesn't.
impl<T> Tree<T> {
    /// Node, then left subtree, then right subtree.
    pub fn traverse_preorder<F>(&self, mut visit: F)
    where
        F: FnMut(&Node<T>),
    {
        fn walk<T, F: FnMut(&Node<T>)>(node: Option<&Node<T>>, visit: &mut F) {
            if let Some(node) = node {
                visit(node);
                walk(node.left(), visit);
                walk(node.right(), visit);
            }
        }
        walk(self.root(), &mut visit);
    }

    /// Left subtree, then node, then right subtree: ascending `cmp` order.
    pub fn traverse_inorder<F>(&self, mut visit: F)
    where
        F: FnMut(&Node<T>),
    {
        fn walk<T, F: FnMut(&Node<T>)>(node: Option<&Node<T>>, visit: &mut F) {
            if let Some(node) = node {
                walk(node.left(), visit);
                visit(node);
                walk(node.right(), visit);
            }
        }
        walk(self.root(), &mut visit);
    }

    /// Both subtrees before the node.
    pub fn traverse_postorder<F>(&self, mut visit: F)
    where
        F: FnMut(&Node<T>),
    {
        fn walk<T, F: FnMut(&Node<T>)>(node: Option<&Node<T>>, visit: &mut F) {
            if let Some(node) = node {
                walk(node.left(), visit);
                walk(node.right(), visit);
                visit(node);
            }
        }
        walk(self.root(), &mut visit);
    }

    /// Breadth-first, left to right within a level.
    pub fn traverse_levelorder<F>(&self, mut visit: F)
    where
        F: FnMut(&Node<T>),
    {
        self.traverse_levels(|_, node| visit(node));
    }

    /// Like [`Tree::traverse_levelorder`], also passing the level of each
    /// node (the root is level 0).
    pub fn traverse_levels<F>(&self, mut visit: F)
    where
        F: FnMut(usize, &Node<T>),
    {
        let Some(root) = self.root() else {
            return;
        };
        let mut queue = VecDeque::with_capacity(self.len());
        queue.push_back(root);

        let mut level = 0;
        while !queue.is_empty() {
            // Everything queued right now sits on the same level.
            for _ in 0..queue.len() {
                let Some(node) = queue.pop_front() else {
                    break;
                };
                visit(level, node);
                queue.extend(node.left());
                queue.extend(node.right());
            }
            level += 1;
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{Color, Node, Tree};
    use pretty_assertions::assert_eq;

    fn tree_of(keys: impl IntoIterator<Item = i32>) -> Tree<i32> {
        let mut tree = Tree::new();
        for k in keys {
            tree.insert(k, i32::cmp).unwrap();
        }
        tree
    }

    fn collect(walk: impl FnOnce(&mut dyn FnMut(&Node<i32>))) -> Vec<i32> {
        let mut out = vec![];
        walk(&mut |n| out.push(*n.value()));
        out
    }

    fn level_of(node: &Node<i32>) -> usize {
        std::iter::successors(node.parent(), |n| n.parent()).count()
    }

    #[test]
    fn empty_tree_visits_nothing() {
        let tree = Tree::<i32>::new();
        assert_eq!(Vec::<i32>::new(), collect(|v| tree.traverse_preorder(v)));
        assert_eq!(Vec::<i32>::new(), collect(|v| tree.traverse_inorder(v)));
        assert_eq!(Vec::<i32>::new(), collect(|v| tree.traverse_postorder(v)));
        assert_eq!(Vec::<i32>::new(), collect(|v| tree.traverse_levelorder(v)));
    }

    #[test]
    fn orders_on_a_small_tree() {
        //      2
        //     / \
        //    1   4
        //       / \
        //      3   5
        let tree = tree_of([1, 3, 2, 5, 4]);
        assert_eq!(vec![2, 1, 4, 3, 5], collect(|v| tree.traverse_preorder(v)));
        assert_eq!(vec![1, 2, 3, 4, 5], collect(|v| tree.traverse_inorder(v)));
        assert_eq!(vec![1, 3, 5, 4, 2], collect(|v| tree.traverse_postorder(v)));
        assert_eq!(vec![2, 1, 4, 3, 5], collect(|v| tree.traverse_levelorder(v)));
    }

    #[test]
    fn levelorder_goes_level_by_level() {
        let tree = tree_of((0..100).map(|i| (i * 37) % 101));
        let mut levels = vec![];
        tree.traverse_levelorder(|n| levels.push(level_of(n)));

        assert_eq!(tree.len(), levels.len());
        assert_eq!(0, levels[0]);
        assert!(levels.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(tree.depth(), levels[levels.len() - 1] + 1);
    }

    #[test]
    fn levels_match_parent_chains() {
        let tree = tree_of(1..=10);
        let mut rows: Vec<Vec<i32>> = vec![];
        tree.traverse_levels(|level, n| {
            assert_eq!(level_of(n), level);
            if rows.len() == level {
                rows.push(vec![]);
            }
            rows[level].push(*n.value());
        });
        assert_eq!(
            vec![vec![4], vec![2, 6], vec![1, 3, 5, 8], vec![7, 9], vec![10]],
            rows
        );
    }

    #[test]
    fn visitor_sees_colors() {
        let tree = tree_of(1..=10);
        let mut reds = vec![];
        tree.traverse_inorder(|n| {
            if n.color() == Color::Red {
                reds.push(*n.value());
            }
        });
        assert_eq!(vec![8, 10], reds);
    }

    #[test]
    fn postorder_visits_children_first() {
        let tree = tree_of(0..50);
        let mut seen = std::collections::HashSet::new();
        tree.traverse_postorder(|n| {
            for child in [n.left(), n.right()].into_iter().flatten() {
                assert!(seen.contains(child.value()));
            }
            seen.insert(*n.value());
        });
        assert_eq!(50, seen.len());
    }
}
