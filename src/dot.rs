//! Graphviz rendering of the tree structure, for debugging.

use std::fmt::{Display, Write};

use crate::{
    node::{balance, Node},
    tree::IntervalTree,
};

impl<T> IntervalTree<T>
where
    T: Display,
{
    /// Write a Graphviz `digraph` describing the current tree structure to
    /// `buf`.
    ///
    /// Each node is rendered as a record holding its interval, the maximum
    /// upper bound of its subtree, its height and its balance factor, with
    /// `L`/`R` ports linking it to its children.
    pub fn write_dot<W>(&self, buf: &mut W) -> std::fmt::Result
    where
        W: Write,
    {
        writeln!(buf, "digraph {{")?;
        writeln!(buf, r#"bgcolor = "transparent";"#)?;
        writeln!(
            buf,
            r#"node [shape = record; style = filled; fontname = Monospace; fontsize = 12; fillcolor = white;];"#
        )?;

        if let Some(root) = self.root() {
            recurse(root, buf)?;
        }

        writeln!(buf, "}}")
    }

    /// Render the tree structure as a Graphviz `digraph`.
    ///
    /// ```
    /// use interval_avl::{Interval, IntervalTree};
    ///
    /// let mut t = IntervalTree::new();
    /// t.insert(Interval::new(1, 2).unwrap());
    ///
    /// assert!(t.to_dot().contains(r#""[1, 2]" [label="#));
    /// ```
    pub fn to_dot(&self) -> String {
        let mut buf = String::new();

        // Writing to a String never fails.
        let _ = self.write_dot(&mut buf);

        buf
    }
}

fn recurse<T, W>(n: &Node<T>, buf: &mut W) -> std::fmt::Result
where
    W: Write,
    T: Display,
{
    writeln!(
        buf,
        r#""{}" [label="<f0> {} | {{ max={} | h={} | b={} }} | <l> L | <r> R"];"#,
        n.interval(),
        n.interval(),
        n.subtree_max(),
        n.height(),
        balance(n),
    )?;

    for (port, v) in [("l", n.left()), ("r", n.right())] {
        match v {
            Some(v) => {
                writeln!(buf, r#""{}":{} -> "{}";"#, n.interval(), port, v.interval())?;
                recurse(v, buf)?;
            }
            None => {
                writeln!(
                    buf,
                    r#""null_{}_{}" [shape=point,style=invis];"#,
                    n.interval(),
                    port
                )?;
                writeln!(
                    buf,
                    r#""{}":{} -> "null_{}_{}" [style=invis];"#,
                    n.interval(),
                    port,
                    n.interval(),
                    port
                )?;
            }
        };
    }

    Ok(())
}
