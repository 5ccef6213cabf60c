//! Bordered token table with one column per channel.

use std::io;

use parsedump_syntax::{Channels, Token, Vocabulary};
use unicode_width::UnicodeWidthStr as _;

use crate::escape::escape;
use crate::glyphs::{BorderGlyphs, Glyphs, TableGlyphs};

/// Index, line and column come first and are right-aligned.
const NUMERIC_COLUMNS: usize = 3;

/// Display cells of one token: index, line, column, one cell per channel,
/// and the text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// Display width of every column, wide enough for the header and every row
/// measured so far.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnWidths(Vec<usize>);

impl ColumnWidths {
    pub fn new(header: &Row) -> Self {
        Self(header.cells.iter().map(|cell| cell.width()).collect())
    }

    /// Widens columns to fit `row`. Widths never shrink.
    pub fn grow(&mut self, row: &Row) {
        for (width, cell) in self.0.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.width());
        }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// Renders tokens as a table, one row per token.
pub struct TableRenderer<'a> {
    glyphs: TableGlyphs,
    channels: &'a Channels,
    vocabulary: &'a dyn Vocabulary,
}

impl<'a> TableRenderer<'a> {
    pub fn new(glyphs: Glyphs, channels: &'a Channels, vocabulary: &'a dyn Vocabulary) -> Self {
        Self { glyphs: glyphs.table, channels, vocabulary }
    }

    /// `#`, `lin`, `col`, the channel names, then `text`.
    pub fn header(&self) -> Row {
        let mut cells = Vec::with_capacity(self.channels.len() + NUMERIC_COLUMNS + 1);
        cells.extend(["#", "lin", "col"].map(String::from));
        cells.extend(self.channels.names().iter().cloned());
        cells.push("text".to_owned());
        Row { cells }
    }

    /// Cells for the `index`-th token, counting from 1.
    pub fn row(&self, index: usize, token: &Token) -> Row {
        let mut cells = Vec::with_capacity(self.channels.len() + NUMERIC_COLUMNS + 1);
        cells.push(index.to_string());
        cells.push(token.line.to_string());
        cells.push(token.column.to_string());

        let column = self.channels.column(token.channel);
        let name = self.vocabulary.display_name(token.kind);
        cells.extend(
            (0..self.channels.len())
                .map(|idx| if column == Some(idx) { name.to_string() } else { String::new() }),
        );

        let text = if self.vocabulary.has_literal(token.kind) {
            String::new()
        } else {
            escape(&token.text)
        };
        cells.push(text);

        Row { cells }
    }

    /// Writes the table: top border, header, divider, rows, bottom border.
    ///
    /// Rows are collected before anything is written, since every column
    /// must be measured first.
    pub fn render<'t>(
        &self,
        tokens: impl IntoIterator<Item = &'t Token>,
        out: &mut dyn io::Write,
    ) -> io::Result<()> {
        let header = self.header();
        let rows = tokens
            .into_iter()
            .enumerate()
            .map(|(idx, token)| self.row(idx + 1, token))
            .collect::<Vec<_>>();

        let mut widths = ColumnWidths::new(&header);
        for row in &rows {
            widths.grow(row);
        }
        tracing::debug!(rows = rows.len(), widths = ?widths.as_slice(), "rendering token table");

        let g = &self.glyphs;
        border(out, &widths, g.top)?;
        self.cells(out, &widths, &header, 0)?;
        border(out, &widths, g.header)?;
        for row in &rows {
            self.cells(out, &widths, row, NUMERIC_COLUMNS)?;
        }
        border(out, &widths, g.bottom)
    }

    pub fn render_to_string<'t>(&self, tokens: impl IntoIterator<Item = &'t Token>) -> String {
        let mut buf = Vec::new();
        self.render(tokens, &mut buf).expect("writing to a `Vec` cannot fail");
        String::from_utf8(buf).expect("rendered table is UTF-8")
    }

    /// Writes one row; the first `right_aligned` cells are right-aligned.
    fn cells(
        &self,
        out: &mut dyn io::Write,
        widths: &ColumnWidths,
        row: &Row,
        right_aligned: usize,
    ) -> io::Result<()> {
        let g = &self.glyphs;
        write!(out, "{}", g.outer_vertical)?;

        for (idx, (cell, &width)) in row.cells.iter().zip(widths.as_slice()).enumerate() {
            let fill = width.saturating_sub(cell.width());
            if idx < right_aligned {
                write!(out, "{:fill$}{cell}", "")?;
            } else {
                write!(out, "{cell}{:fill$}", "")?;
            }

            let last = idx + 1 == row.cells.len();
            let separator = if last { g.outer_vertical } else { g.inner_vertical };
            write!(out, "{separator}")?;
        }

        writeln!(out)
    }
}

fn border(out: &mut dyn io::Write, widths: &ColumnWidths, glyphs: BorderGlyphs) -> io::Result<()> {
    let rules = widths
        .as_slice()
        .iter()
        .map(|&width| repeat(glyphs.horizontal, width))
        .collect::<Vec<_>>()
        .join(&glyphs.division.to_string());
    writeln!(out, "{}{rules}{}", glyphs.left, glyphs.right)
}

fn repeat(ch: char, count: usize) -> String {
    std::iter::repeat_n(ch, count).collect()
}
