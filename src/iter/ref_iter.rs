use crate::{interval::Interval, node::Node};

/// Borrows each unique interval stored in an [`IntervalTree`], in ascending
/// [`Interval`] order (lower bound first, then upper bound).
///
/// The stack holds at most one node per level, bounding its size by the
/// tree height.
///
/// [`IntervalTree`]: crate::IntervalTree
#[derive(Debug)]
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        let mut this = Self { stack: vec![] };

        // The smallest interval lives at the end of the left edge.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: &'a Node<T>) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            self.stack.push(v);
            ptr = v.left();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Interval<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.stack.pop()?;

        // Every interval ordered after "v" but before its nearest stacked
        // ancestor lives in the right subtree.
        if let Some(right) = v.right() {
            self.push_subtree(right);
        }

        Some(v.interval())
    }
}
