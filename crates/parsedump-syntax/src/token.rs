use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::LoadError;

/// A token as reported by the lexer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Token type identifier, looked up in a [`Vocabulary`].
    pub kind: u32,
    #[serde(default)]
    pub channel: u32,
    /// 1-based line.
    pub line: u32,
    /// 0-based column.
    pub column: u32,
    pub text: String,
}

impl Token {
    pub fn new(kind: u32, line: u32, column: u32, text: impl Into<String>) -> Self {
        Self { kind, channel: 0, line, column, text: text.into() }
    }

    pub fn on_channel(mut self, channel: u32) -> Self {
        self.channel = channel;
        self
    }
}

/// How far past the number of `.tokens` entries a kind may lie.
pub const MAX_KIND_GAP: usize = 256;

/// Names for token types.
pub trait Vocabulary {
    /// Human-readable name of `kind`.
    fn display_name(&self, kind: u32) -> Cow<'_, str>;

    /// Whether `kind` always has the same spelling, making its text redundant.
    fn has_literal(&self, kind: u32) -> bool;
}

/// Vocabulary backed by per-kind name tables, indexed by token kind.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct VocabularyTable {
    #[serde(default)]
    pub symbolic: Vec<Option<String>>,
    #[serde(default)]
    pub literal: Vec<Option<String>>,
}

impl VocabularyTable {
    pub fn new(symbolic: Vec<Option<String>>, literal: Vec<Option<String>>) -> Self {
        Self { symbolic, literal }
    }

    pub fn symbolic_name(&self, kind: u32) -> Option<&str> {
        self.symbolic.get(kind as usize)?.as_deref()
    }

    pub fn literal_name(&self, kind: u32) -> Option<&str> {
        self.literal.get(kind as usize)?.as_deref()
    }

    /// Parses a `.tokens` file as written by ANTLR.
    ///
    /// Each non-blank line is `NAME=kind` or `'literal'=kind`. A kind may
    /// appear once with a name and once with a literal. Kinds are dense in
    /// practice, so a kind more than [`MAX_KIND_GAP`] past the number of
    /// entries is rejected rather than allocated.
    pub fn from_tokens_file(text: &str) -> Result<Self, LoadError> {
        let mut entries = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let error = |message: &str| LoadError::Vocabulary {
                line: idx + 1,
                message: message.to_owned(),
            };

            let (name, kind) =
                line.rsplit_once('=').ok_or_else(|| error("expected `name=kind`"))?;
            let kind: u32 = kind
                .trim()
                .parse()
                .map_err(|err| error(&format!("token kind is not a number: {err}")))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(error("empty token name"));
            }

            entries.push((idx + 1, name, kind));
        }

        let limit = entries.len() + MAX_KIND_GAP;
        let mut vocabulary = Self::default();
        for (line, name, kind) in entries {
            let kind = kind as usize;
            if kind > limit {
                return Err(LoadError::Vocabulary {
                    line,
                    message: format!("token kind {kind} is out of range (at most {limit})"),
                });
            }

            let table = if name.len() >= 2 && name.starts_with('\'') && name.ends_with('\'') {
                &mut vocabulary.literal
            } else {
                &mut vocabulary.symbolic
            };
            if table.len() <= kind {
                table.resize(kind + 1, None);
            }
            table[kind] = Some(name.to_owned());
        }

        tracing::debug!(
            symbolic = vocabulary.symbolic.len(),
            literal = vocabulary.literal.len(),
            "loaded vocabulary"
        );
        Ok(vocabulary)
    }
}

impl Vocabulary for VocabularyTable {
    fn display_name(&self, kind: u32) -> Cow<'_, str> {
        match self.symbolic_name(kind).or_else(|| self.literal_name(kind)) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(kind.to_string()),
        }
    }

    fn has_literal(&self, kind: u32) -> bool {
        self.literal_name(kind).is_some()
    }
}

/// Token channels: their display names and where each raw channel id goes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Channels {
    names: Vec<String>,
    map: Vec<Option<usize>>,
}

impl Channels {
    /// `map[channel]` is the index into `names` that `channel` is shown under.
    pub fn new(names: Vec<String>, map: Vec<Option<usize>>) -> Result<Self, LoadError> {
        for (channel, column) in map.iter().enumerate() {
            if let Some(column) = *column {
                if column >= names.len() {
                    return Err(LoadError::ChannelColumn { channel, column, len: names.len() });
                }
            }
        }

        Ok(Self { names, map })
    }

    /// Ordered channel names, one per table column.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column index for a raw channel id, `None` if it is not shown.
    pub fn column(&self, channel: u32) -> Option<usize> {
        self.map.get(channel as usize).copied().flatten()
    }
}

impl Default for Channels {
    fn default() -> Self {
        Self { names: vec!["DEFAULT".to_owned(), "HIDDEN".to_owned()], map: vec![Some(0), Some(1)] }
    }
}

impl<'de> Deserialize<'de> for Channels {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            names: Vec<String>,
            map: Vec<Option<usize>>,
        }

        let Raw { names, map } = Raw::deserialize(deserializer)?;
        Self::new(names, map).map_err(serde::de::Error::custom)
    }
}

/// A token stream together with the tables needed to label it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TokenDump {
    #[serde(default)]
    pub vocabulary: VocabularyTable,
    #[serde(default)]
    pub channels: Channels,
    pub tokens: Vec<Token>,
}

impl TokenDump {
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        let dump: Self = serde_json::from_str(text)?;
        tracing::debug!(
            tokens = dump.tokens.len(),
            channels = dump.channels.len(),
            "decoded token dump"
        );
        Ok(dump)
    }
}
