use std::fmt::Debug;

use crate::{
    error::InvariantViolation,
    node::{balance, height, Node},
};

/// Assert the BST, AVL and interval tree properties of every node in the
/// subtree rooted at `root`, ensuring the tree is well-formed.
pub(crate) fn check_subtree<T>(root: Option<&Node<T>>) -> Result<(), InvariantViolation>
where
    T: Ord + Debug,
{
    let Some(root) = root else {
        return Ok(());
    };

    // Perform a pre-order traversal of the tree, carrying the exclusive
    // bounds every interval in the visited subtree must order between.
    let mut stack = vec![(root, None, None)];
    while let Some((n, after, before)) = stack.pop() {
        check_order(n, after, before)?;
        check_node(n)?;

        // Prepare to visit the children
        if let Some(left) = n.left() {
            stack.push((left, after, Some(n)));
        }
        if let Some(right) = n.right() {
            stack.push((right, Some(n), before));
        }
    }

    Ok(())
}

/// Invariants 1 & 2: every left descendant of a node orders strictly before
/// it, and every right descendant strictly after it.
///
/// `after` is the nearest ancestor `n` is a right descendant of, and `before`
/// the nearest ancestor it is a left descendant of.
fn check_order<T>(
    n: &Node<T>,
    after: Option<&Node<T>>,
    before: Option<&Node<T>>,
) -> Result<(), InvariantViolation>
where
    T: Ord + Debug,
{
    if let Some(ancestor) = before {
        if n.interval() >= ancestor.interval() {
            return Err(InvariantViolation::LeftOrder {
                node: format!("{:?}", ancestor.interval()),
                child: format!("{:?}", n.interval()),
            });
        }
    }

    if let Some(ancestor) = after {
        if n.interval() <= ancestor.interval() {
            return Err(InvariantViolation::RightOrder {
                node: format!("{:?}", ancestor.interval()),
                child: format!("{:?}", n.interval()),
            });
        }
    }

    Ok(())
}

fn check_node<T>(n: &Node<T>) -> Result<(), InvariantViolation>
where
    T: Ord + Debug,
{
    // Invariant 3: the height of this node is always +1 of the maximum child
    // height.
    let want_height = height(n.left()).max(height(n.right())) + 1;
    if n.height() != want_height {
        return Err(InvariantViolation::Height {
            node: format!("{:?}", n.interval()),
            cached: n.height(),
            want: want_height,
        });
    }

    // Invariant 4: the absolute height difference between the left subtree and
    // right subtree (the "balance factor") cannot exceed 1.
    let balance = balance(n);
    if balance.abs() > 1 {
        return Err(InvariantViolation::Unbalanced {
            node: format!("{:?}", n.interval()),
            balance,
        });
    }

    // Invariant 5: the subtree max of "n" must be equal to either the largest
    // of the two child subtree maxes, or its own upper bound.
    let want_max = n
        .left()
        .map(|v| v.subtree_max())
        .max(n.right().map(|v| v.subtree_max()))
        .max(Some(n.interval().upper()));
    if want_max != Some(n.subtree_max()) {
        return Err(InvariantViolation::SubtreeMax {
            node: format!("{:?}", n.interval()),
            cached: format!("{:?}", n.subtree_max()),
            want: want_max.map(|v| format!("{v:?}")).unwrap_or_default(),
        });
    }

    Ok(())
}
