use crate::{interval::Interval, node::Node};

/// Consumes an [`IntervalTree`], moving each stored interval out in ascending
/// [`Interval`] order.
///
/// Nodes are detached from their children as they are visited and dropped
/// once their interval is yielded.
///
/// [`IntervalTree`]: crate::IntervalTree
#[derive(Debug)]
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Option<Box<Node<T>>>) -> Self {
        let mut this = Self { stack: vec![] };

        // The smallest interval lives at the end of the left edge.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: Box<Node<T>>) {
        let mut ptr = Some(subtree_root);

        while let Some(mut v) = ptr {
            ptr = v.take_left();
            self.stack.push(v);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = Interval<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut v = self.stack.pop()?;

        // Detach the right subtree before yielding; its intervals order
        // after "v".
        if let Some(right) = v.take_right() {
            self.push_subtree(right);
        }

        Some(v.into_interval())
    }
}
