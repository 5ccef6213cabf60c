//! Border and connector glyph presets.

/// Glyphs for both renderers. Pick [`Glyphs::UNICODE`] or [`Glyphs::ASCII`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Glyphs {
    pub tree: TreeGlyphs,
    pub table: TableGlyphs,
}

/// Connectors drawn by the tree renderer.
///
/// A node with several children is framed like this (Unicode preset):
///
/// ```text
/// ╮expr╭
/// ╰┬───╯
///  ├╴1
///  ╰╴+
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TreeGlyphs {
    /// Left of a framed label.
    pub frame_open: char,
    /// Right of a framed label.
    pub frame_close: char,
    /// First glyph of the line under a framed label.
    pub frame_left: char,
    /// Where the children's branch leaves the frame.
    pub frame_branch: char,
    /// Fills the rest of the label width.
    pub frame_fill: char,
    /// Last glyph of the line under a framed label.
    pub frame_right: char,
    /// Continues a branch past a child that has later siblings.
    pub vertical: char,
    /// Branch to a child with later siblings.
    pub middle: char,
    /// Branch to the last child.
    pub last: char,
    /// Precedes a leaf, a leaf production or an inlined label.
    pub leaf: char,
    /// Follows an inlined label or a leaf production with terminals.
    pub one_child: char,
}

/// Border glyphs of one horizontal table rule.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BorderGlyphs {
    pub left: char,
    pub horizontal: char,
    pub division: char,
    pub right: char,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TableGlyphs {
    pub top: BorderGlyphs,
    /// Rule between the header and the body.
    pub header: BorderGlyphs,
    pub bottom: BorderGlyphs,
    pub outer_vertical: char,
    pub inner_vertical: char,
}

impl Glyphs {
    pub const UNICODE: Self = Self {
        tree: TreeGlyphs {
            frame_open: '╮',
            frame_close: '╭',
            frame_left: '╰',
            frame_branch: '┬',
            frame_fill: '─',
            frame_right: '╯',
            vertical: '│',
            middle: '├',
            last: '╰',
            leaf: '╴',
            one_child: '╶',
        },
        table: TableGlyphs {
            top: BorderGlyphs { left: '╔', horizontal: '═', division: '╤', right: '╗' },
            header: BorderGlyphs { left: '╠', horizontal: '═', division: '╪', right: '╣' },
            bottom: BorderGlyphs { left: '╚', horizontal: '═', division: '╧', right: '╝' },
            outer_vertical: '║',
            inner_vertical: '│',
        },
    };

    pub const ASCII: Self = Self {
        tree: TreeGlyphs {
            frame_open: '.',
            frame_close: '.',
            frame_left: '\'',
            frame_branch: '+',
            frame_fill: '-',
            frame_right: '\'',
            vertical: '|',
            middle: '+',
            last: '\\',
            leaf: '-',
            one_child: '-',
        },
        table: TableGlyphs {
            top: BorderGlyphs { left: '+', horizontal: '-', division: '+', right: '+' },
            header: BorderGlyphs { left: '+', horizontal: '-', division: '+', right: '+' },
            bottom: BorderGlyphs { left: '+', horizontal: '-', division: '+', right: '+' },
            outer_vertical: '|',
            inner_vertical: '|',
        },
    };
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::UNICODE
    }
}
