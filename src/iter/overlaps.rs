use crate::{interval::Interval, node::Node};

/// An ascending iterator over the stored intervals that overlap a query
/// interval.
///
/// Subtrees whose maximum upper bound falls below the query's lower bound are
/// never visited.
///
/// The yielded intervals borrow from the tree (`'a`) only; the query (`'q`)
/// need not outlive them.
#[derive(Debug)]
pub struct Overlapping<'a, 'q, T> {
    query: &'q Interval<T>,
    stack: Vec<&'a Node<T>>,
}

impl<'a, 'q, T> Overlapping<'a, 'q, T>
where
    T: Ord,
{
    pub(crate) fn new(root: Option<&'a Node<T>>, query: &'q Interval<T>) -> Self {
        let mut this = Self {
            stack: vec![],
            query,
        };

        // Descend down the left side of the tree, pushing all the internal
        // nodes onto the stack until the left-most leaf is reached.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: &'a Node<T>) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            if v.subtree_max() < self.query.lower() {
                // Prune this subtree rooted at "v" from the search.
                //
                // No interval in this subtree extends far enough to reach the
                // query interval.
                break;
            }

            self.stack.push(v);
            ptr = v.left();
        }
    }
}

impl<'a, T> Iterator for Overlapping<'a, '_, T>
where
    T: Ord,
{
    type Item = &'a Interval<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.stack.pop()?;

            if v.interval().lower() > self.query.upper() {
                // Prune this node and the right subtree from the search.
                //
                // All values in the right subtree start strictly after the
                // query interval ends.
                continue;
            }

            // Push the right subtree to be visited next.
            if let Some(right) = v.right() {
                self.push_subtree(right);
            }

            // Yield this node if it overlaps with the query interval.
            if v.interval().overlaps(self.query) {
                return Some(v.interval());
            }
        }
    }
}
