use std::{iter::FusedIterator, marker::PhantomData};

use crate::{Node, NodePtr, Tree};

impl<T> Tree<T> {
    /// Gets an iterator over the payloads, in ascending `cmp` order.
    ///
    /// It walks successor links instead of recursing, so it is safe on trees
    /// of any depth.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbnoir::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2, i32::cmp)?;
    /// tree.insert(1, i32::cmp)?;
    ///
    /// let values: Vec<_> = tree.iter().copied().collect();
    /// assert_eq!(values, [1, 2]);
    /// # Ok::<(), rbnoir::Error>(())
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            first: self.root.first(),
            last: self.root.last(),
            len: self.len,
            _phantom: PhantomData,
        }
    }
}

pub struct Iter<'a, T> {
    first: NodePtr<T>,
    last: NodePtr<T>,
    len: usize,
    _phantom: PhantomData<&'a Node<T>>,
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: the tree is borrowed for 'a, so every node stays put.
        let n = unsafe { self.first?.as_ref() };
        self.len -= 1;
        self.first = n.next_ptr();
        Some(n.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: the tree is borrowed for 'a, so every node stays put.
        let n = unsafe { self.last?.as_ref() };
        self.len -= 1;
        self.last = n.prev_ptr();
        Some(n.value())
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            first: self.first,
            last: self.last,
            len: self.len,
            _phantom: PhantomData,
        }
    }
}

/// An owning iterator draining the tree from both ends.
pub struct IntoIter<T>(Tree<T>);

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }

    fn last(mut self) -> Option<T> {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.0.pop_last()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.0.len
    }
}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod test {
    use crate::Tree;
    use pretty_assertions::assert_eq;

    #[test]
    fn iter_empty() {
        let tree = Tree::<usize>::new();
        assert_eq!(None, tree.iter().next());
        assert_eq!(None, tree.iter().next_back());
    }

    #[test]
    fn iter() {
        let mut tree = Tree::new();
        for i in (0..128).rev() {
            tree.insert(i, i32::cmp).unwrap();
        }
        let mut iter = tree.iter();
        assert_eq!(128, iter.len());
        for i in 0..128 {
            assert_eq!(Some(&i), iter.next());
        }
        assert_eq!(None, iter.next());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn iter_from_both_ends_meets_in_the_middle() {
        let mut tree = Tree::new();
        for i in [5, 1, 4, 2, 3] {
            tree.insert(i, i32::cmp).unwrap();
        }
        let mut iter = tree.iter();
        assert_eq!(Some(&1), iter.next());
        assert_eq!(Some(&5), iter.next_back());
        assert_eq!(Some(&2), iter.next());
        assert_eq!(Some(&4), iter.next_back());
        assert_eq!(Some(&3), iter.next());
        assert_eq!(None, iter.next_back());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn iter_rev() {
        let mut tree = Tree::new();
        for i in 0..64 {
            tree.insert(i, i32::cmp).unwrap();
        }
        let values: Vec<i32> = tree.iter().rev().copied().collect();
        assert_eq!((0..64).rev().collect::<Vec<_>>(), values);
    }

    #[test]
    fn min_and_max_ignore_the_tree_order() {
        let mut tree = Tree::new();
        for i in [1, 5, 3] {
            tree.insert(i, |a: &i32, b: &i32| b.cmp(a)).unwrap();
        }
        assert_eq!(vec![5, 3, 1], tree.iter().copied().collect::<Vec<_>>());
        assert_eq!(Some(&1), tree.iter().min());
        assert_eq!(Some(&5), tree.iter().max());
        assert_eq!(Some(&1), tree.iter().last());
    }

    #[test]
    fn for_loop() {
        let mut tree = Tree::new();
        for s in ["hundo", "zero", "forty_two"] {
            tree.insert(s.to_string(), String::cmp).unwrap();
        }

        let mut borrowed = vec![];
        for s in &tree {
            borrowed.push(s.clone());
        }
        assert_eq!(vec!["forty_two", "hundo", "zero"], borrowed);

        let owned: Vec<String> = tree.into_iter().rev().collect();
        assert_eq!(vec!["zero", "hundo", "forty_two"], owned);
    }

    #[test]
    fn into_iter_empty() {
        let tree = Tree::<()>::new();
        assert_eq!(0, tree.into_iter().count());
    }
}
