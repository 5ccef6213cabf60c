//! Fixed-width, box-drawn renderings of parse trees and token streams,
//! meant for reading while debugging a grammar.

mod escape;
mod glyphs;
mod table;
mod tree;

pub use escape::{SPACE_MARKER, escape};
pub use glyphs::{BorderGlyphs, Glyphs, TableGlyphs, TreeGlyphs};
pub use table::{ColumnWidths, Row, TableRenderer};
pub use tree::{InlinePolicy, TreeRenderer};
