//! Read-only model of the artifacts a parser hands over for inspection:
//! a labeled parse tree and a flat token stream.
//!
//! Nothing here parses source text. Trees and tokens are built by the caller,
//! either directly, through [`Builder`], or from JSON dumps.

mod builder;
mod error;
mod token;
mod tree;

/// Event-driven construction of a `Tree`.
pub use builder::Builder;
pub use error::LoadError;
/// Token stream types and the lookup tables used to label them.
pub use token::{Channels, MAX_KIND_GAP, Token, TokenDump, Vocabulary, VocabularyTable};
/// Parse tree types.
pub use tree::{Leaf, Leaves, Node, Position, Tree};
