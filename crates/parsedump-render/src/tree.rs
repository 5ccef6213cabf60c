//! Box-drawn layout of a parse tree.

use std::io;

use parsedump_syntax::{Leaf, Node, Position, Tree};
use unicode_width::UnicodeWidthStr as _;

use crate::glyphs::{Glyphs, TreeGlyphs};

/// Narrowest line and column fields of the position gutter.
const MIN_LINE_DIGITS: usize = 4;
const MIN_COLUMN_DIGITS: usize = 3;

/// When a node with a single child shares its line with that child.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum InlinePolicy {
    /// Every single-child node is inlined.
    Always,
    /// Only nodes whose chain runs unbranched down to a leaf are inlined.
    #[default]
    OnlyDirectLine,
    /// Nothing is inlined; every node with children gets a frame.
    Never,
}

/// Renders a [`Tree`] one leaf or leaf production per line.
#[derive(Clone, Debug)]
pub struct TreeRenderer {
    glyphs: TreeGlyphs,
    policy: InlinePolicy,
    positions: bool,
}

impl TreeRenderer {
    pub fn new(glyphs: Glyphs, policy: InlinePolicy) -> Self {
        Self { glyphs: glyphs.tree, policy, positions: false }
    }

    /// Prefix every line with the `(line:column)` of the node it starts.
    pub fn with_positions(mut self, positions: bool) -> Self {
        self.positions = positions;
        self
    }

    pub fn render(&self, root: &Tree, out: &mut dyn io::Write) -> io::Result<()> {
        let gutter = self.positions.then(|| Gutter::fit(root));
        tracing::debug!(policy = ?self.policy, ?gutter, "rendering tree");

        write_gutter(out, gutter, root.position())?;
        match root {
            Tree::Leaf(leaf) => writeln!(out, "{}", leaf.text),
            Tree::Node(node) => self.node(out, gutter, "", node),
        }
    }

    pub fn render_to_string(&self, root: &Tree) -> String {
        let mut buf = Vec::new();
        self.render(root, &mut buf).expect("writing to a `Vec` cannot fail");
        String::from_utf8(buf).expect("rendered tree is UTF-8")
    }

    fn tree(
        &self,
        out: &mut dyn io::Write,
        gutter: Option<Gutter>,
        prefix: &str,
        tree: &Tree,
    ) -> io::Result<()> {
        match tree {
            Tree::Leaf(leaf) => self.leaf(out, leaf),
            Tree::Node(node) => self.node(out, gutter, prefix, node),
        }
    }

    fn leaf(&self, out: &mut dyn io::Write, leaf: &Leaf) -> io::Result<()> {
        writeln!(out, "{}{}", self.glyphs.leaf, leaf.text)
    }

    fn node(
        &self,
        out: &mut dyn io::Write,
        gutter: Option<Gutter>,
        prefix: &str,
        node: &Node,
    ) -> io::Result<()> {
        let Some((last, rest)) = node.children.split_last() else {
            return self.leaf_production(out, node);
        };

        if node.non_terminal_children() == 0 && self.policy != InlinePolicy::Never {
            return self.leaf_production(out, node);
        }

        let g = &self.glyphs;
        if rest.is_empty() && self.inlines(node) {
            tracing::trace!(label = %node.label, "inlining");
            write!(out, "{}{}{}", g.leaf, node.label, g.one_child)?;
            let prefix = format!("{prefix}{}", " ".repeat(node.label.width() + 2));
            return self.tree(out, gutter, &prefix, last);
        }

        writeln!(out, "{}{}{}", g.frame_open, node.label, g.frame_close)?;
        write_gutter(out, gutter, None)?;
        writeln!(
            out,
            "{prefix}{}{}{}{}",
            g.frame_left,
            g.frame_branch,
            repeat(g.frame_fill, node.label.width().saturating_sub(1)),
            g.frame_right,
        )?;

        let middle = format!("{prefix} {}", g.vertical);
        for child in rest {
            write_gutter(out, gutter, child.position())?;
            write!(out, "{prefix} {}", g.middle)?;
            self.tree(out, gutter, &middle, child)?;
        }

        write_gutter(out, gutter, last.position())?;
        write!(out, "{prefix} {}", g.last)?;
        self.tree(out, gutter, &format!("{prefix}  "), last)
    }

    /// A node without non-terminal children, shown with its terminals' text.
    fn leaf_production(&self, out: &mut dyn io::Write, node: &Node) -> io::Result<()> {
        let g = &self.glyphs;
        write!(out, "{}{}", g.leaf, node.label)?;

        if !node.children.is_empty() {
            let text = node
                .children
                .iter()
                .filter_map(Tree::as_leaf)
                .map(|leaf| leaf.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            write!(out, "{}{}{text}", g.one_child, g.leaf)?;
        }

        writeln!(out)
    }

    fn inlines(&self, node: &Node) -> bool {
        match self.policy {
            InlinePolicy::Always => true,
            InlinePolicy::OnlyDirectLine => node.is_direct_line(),
            InlinePolicy::Never => false,
        }
    }
}

/// Field widths of the `(line:column) ` gutter.
///
/// Sized once per tree from its widest leaf position, so every line of a
/// rendering starts its tree glyphs in the same column.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Gutter {
    line: usize,
    column: usize,
}

impl Gutter {
    fn fit(root: &Tree) -> Self {
        root.leaves().filter_map(|leaf| leaf.position).fold(
            Gutter { line: MIN_LINE_DIGITS, column: MIN_COLUMN_DIGITS },
            |gutter, Position { line, column }| Gutter {
                line: gutter.line.max(digits(line)),
                column: gutter.column.max(digits(column)),
            },
        )
    }

    /// Parentheses, colon and the trailing space included.
    fn width(self) -> usize {
        self.line + self.column + 4
    }
}

fn write_gutter(
    out: &mut dyn io::Write,
    gutter: Option<Gutter>,
    position: Option<Position>,
) -> io::Result<()> {
    let Some(gutter) = gutter else {
        return Ok(());
    };

    match position {
        Some(Position { line, column }) => write!(
            out,
            "({line:>lw$}:{column:<cw$}) ",
            lw = gutter.line,
            cw = gutter.column,
        ),
        None => write!(out, "{:width$}", "", width = gutter.width()),
    }
}

fn digits(n: u32) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}

fn repeat(ch: char, count: usize) -> String {
    std::iter::repeat_n(ch, count).collect()
}

#[cfg(test)]
mod tests {
    use expect_test::{Expect, expect};

    use super::*;

    fn render(policy: InlinePolicy, tree: &Tree, expect: Expect) {
        let actual = TreeRenderer::new(Glyphs::UNICODE, policy).render_to_string(tree);
        expect.assert_eq(&actual);
    }

    fn sum() -> Tree {
        Tree::node("expr", [Tree::leaf("1"), Tree::leaf("+")])
    }

    /// `prog -> stmt -> expr`, where `expr` branches three ways.
    fn program() -> Tree {
        Tree::node(
            "prog",
            [Tree::node(
                "stmt",
                [Tree::node(
                    "expr",
                    [
                        Tree::node("atom", [Tree::leaf("1")]),
                        Tree::leaf("+"),
                        Tree::node("atom", [Tree::leaf("2")]),
                    ],
                )],
            )],
        )
    }

    /// `decl` with an unbranched `name -> ident -> x` chain.
    fn declaration() -> Tree {
        Tree::node(
            "decl",
            [Tree::node("name", [Tree::node("ident", [Tree::leaf("x")])]), Tree::leaf(";")],
        )
    }

    #[test]
    fn never_frames_terminal_children() {
        render(
            InlinePolicy::Never,
            &sum(),
            expect![[r#"
                ╮expr╭
                ╰┬───╯
                 ├╴1
                 ╰╴+
            "#]],
        );
    }

    #[test]
    fn leaf_production() {
        render(
            InlinePolicy::Always,
            &sum(),
            expect![[r#"
                ╴expr╶╴1 +
            "#]],
        );
    }

    #[test]
    fn always_inlines_single_children() {
        render(
            InlinePolicy::Always,
            &program(),
            expect![[r#"
                ╴prog╶╴stmt╶╮expr╭
                            ╰┬───╯
                             ├╴atom╶╴1
                             ├╴+
                             ╰╴atom╶╴2
            "#]],
        );
    }

    #[test]
    fn direct_line_does_not_inline_branching_chain() {
        render(
            InlinePolicy::OnlyDirectLine,
            &program(),
            expect![[r#"
                ╮prog╭
                ╰┬───╯
                 ╰╮stmt╭
                  ╰┬───╯
                   ╰╮expr╭
                    ╰┬───╯
                     ├╴atom╶╴1
                     ├╴+
                     ╰╴atom╶╴2
            "#]],
        );
    }

    #[test]
    fn never_inlines() {
        render(
            InlinePolicy::Never,
            &program(),
            expect![[r#"
                ╮prog╭
                ╰┬───╯
                 ╰╮stmt╭
                  ╰┬───╯
                   ╰╮expr╭
                    ╰┬───╯
                     ├╮atom╭
                     │╰┬───╯
                     │ ╰╴1
                     ├╴+
                     ╰╮atom╭
                      ╰┬───╯
                       ╰╴2
            "#]],
        );
    }

    #[test]
    fn direct_line_inlines_unbranched_chain() {
        render(
            InlinePolicy::OnlyDirectLine,
            &declaration(),
            expect![[r#"
                ╮decl╭
                ╰┬───╯
                 ├╴name╶╴ident╶╴x
                 ╰╴;
            "#]],
        );
        assert_eq!(
            TreeRenderer::new(Glyphs::UNICODE, InlinePolicy::Always)
                .render_to_string(&declaration()),
            TreeRenderer::new(Glyphs::UNICODE, InlinePolicy::OnlyDirectLine)
                .render_to_string(&declaration()),
        );

        render(
            InlinePolicy::Never,
            &declaration(),
            expect![[r#"
                ╮decl╭
                ╰┬───╯
                 ├╮name╭
                 │╰┬───╯
                 │ ╰╮ident╭
                 │  ╰┬────╯
                 │   ╰╴x
                 ╰╴;
            "#]],
        );
    }

    #[test]
    fn positions() {
        let tree = Tree::node(
            "expr",
            [
                Tree::node("atom", [Tree::leaf_at("1", 1, 0)]),
                Tree::leaf_at("+", 1, 2),
                Tree::node("empty", []),
            ],
        );
        let actual = TreeRenderer::new(Glyphs::UNICODE, InlinePolicy::OnlyDirectLine)
            .with_positions(true)
            .render_to_string(&tree);

        expect![[r#"
            (   1:0  ) ╮expr╭
                       ╰┬───╯
            (   1:0  )  ├╴atom╶╴1
            (   1:2  )  ├╴+
                        ╰╴empty
        "#]]
        .assert_eq(&actual);
    }

    #[test]
    fn gutter_widens_for_large_positions() {
        let tree = Tree::node("expr", [Tree::leaf_at("a", 12345, 0), Tree::leaf_at("b", 1, 4000)]);
        let actual = TreeRenderer::new(Glyphs::UNICODE, InlinePolicy::Never)
            .with_positions(true)
            .render_to_string(&tree);

        expect![[r#"
            (12345:0   ) ╮expr╭
                         ╰┬───╯
            (12345:0   )  ├╴a
            (    1:4000)  ╰╴b
        "#]]
        .assert_eq(&actual);

        for line in actual.lines() {
            let gutter = line.chars().take(13).collect::<String>();
            assert!(gutter.ends_with(") ") || gutter.trim().is_empty(), "{line:?}");
        }
    }

    #[test]
    fn ascii() {
        let actual =
            TreeRenderer::new(Glyphs::ASCII, InlinePolicy::Never).render_to_string(&sum());

        expect![[r#"
            .expr.
            '+---'
             +-1
             \-+
        "#]]
        .assert_eq(&actual);
    }

    #[test]
    fn leaf_root_is_undecorated() {
        render(InlinePolicy::Never, &Tree::leaf("x"), expect!["x\n"]);
    }

    #[test]
    fn childless_root() {
        render(InlinePolicy::Never, &Tree::node("empty", []), expect!["╴empty\n"]);
    }

    #[test]
    fn wide_labels_align() {
        render(
            InlinePolicy::Always,
            &Tree::node("式", [Tree::node("項", [Tree::leaf("1"), Tree::node("空", [])])]),
            expect![[r#"
                ╴式╶╮項╭
                    ╰┬─╯
                     ├╴1
                     ╰╴空
            "#]],
        );
    }

    /// Lines a tree should take, derived from its shape alone.
    fn expected_lines(tree: &Tree, policy: InlinePolicy) -> usize {
        let node = match tree {
            Tree::Leaf(_) => return 1,
            Tree::Node(node) => node,
        };

        let production = node.non_terminal_children() == 0 && policy != InlinePolicy::Never;
        if node.children.is_empty() || production {
            return 1;
        }

        let inlined = match policy {
            InlinePolicy::Always => node.children.len() == 1,
            InlinePolicy::OnlyDirectLine => node.children.len() == 1 && node.is_direct_line(),
            InlinePolicy::Never => false,
        };
        let children = node.children.iter().map(|child| expected_lines(child, policy)).sum();
        if inlined { children } else { 2 + children }
    }

    #[test]
    fn line_count_follows_shape() {
        let trees = [sum(), program(), declaration(), Tree::leaf("x"), Tree::node("empty", [])];
        let policies = [InlinePolicy::Always, InlinePolicy::OnlyDirectLine, InlinePolicy::Never];

        for tree in &trees {
            for policy in policies {
                let rendered = TreeRenderer::new(Glyphs::UNICODE, policy).render_to_string(tree);
                assert_eq!(rendered.lines().count(), expected_lines(tree, policy), "{policy:?}");
            }
        }
    }

    #[test]
    fn never_gives_every_leaf_its_own_line() {
        for tree in [sum(), program(), declaration()] {
            let rendered =
                TreeRenderer::new(Glyphs::UNICODE, InlinePolicy::Never).render_to_string(&tree);
            let leaf_lines =
                rendered.lines().filter(|line| !line.ends_with(['╭', '╯'])).count();
            assert_eq!(leaf_lines, tree.leaves().count());
        }
    }
}
