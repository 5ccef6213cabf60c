use std::io::{self, BufWriter, Write as _};

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use parsedump_render::{Glyphs, InlinePolicy, TableRenderer, TreeRenderer};
use parsedump_syntax::{TokenDump, Tree, VocabularyTable};
use tracing::Level;

/// Pretty-prints parse trees and token streams dumped by a parser.
#[derive(Parser)]
#[command(version)]
struct Options {
    #[command(subcommand)]
    command: Command,

    /// Draw with ASCII characters instead of box-drawing ones.
    #[arg(long, global = true)]
    ascii: bool,

    /// Log to stderr; repeat for more detail.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Render a JSON tree dump.
    Tree {
        path: Utf8PathBuf,

        /// Which single-child nodes share a line with their child.
        #[arg(long, value_enum, default_value_t = Inline::DirectLine)]
        inline: Inline,

        /// Prefix every line with the source position of its node.
        #[arg(long)]
        positions: bool,
    },
    /// Render a JSON token dump as a table.
    Tokens {
        path: Utf8PathBuf,

        /// ANTLR `.tokens` file to name token types with, replacing the
        /// dump's own vocabulary.
        #[arg(long)]
        vocabulary: Option<Utf8PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Inline {
    Always,
    DirectLine,
    Never,
}

impl From<Inline> for InlinePolicy {
    fn from(inline: Inline) -> Self {
        match inline {
            Inline::Always => InlinePolicy::Always,
            Inline::DirectLine => InlinePolicy::OnlyDirectLine,
            Inline::Never => InlinePolicy::Never,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse();
    init_logging(options.verbose);

    let glyphs = if options.ascii { Glyphs::ASCII } else { Glyphs::UNICODE };
    let mut out = BufWriter::new(io::stdout().lock());

    match options.command {
        Command::Tree { path, inline, positions } => {
            let tree = Tree::from_json(&read(&path)?)
                .with_context(|| format!("failed to load tree from `{path}`"))?;

            TreeRenderer::new(glyphs, inline.into())
                .with_positions(positions)
                .render(&tree, &mut out)?;
        }
        Command::Tokens { path, vocabulary } => {
            let mut dump = TokenDump::from_json(&read(&path)?)
                .with_context(|| format!("failed to load tokens from `{path}`"))?;

            if let Some(vocabulary) = vocabulary {
                dump.vocabulary = VocabularyTable::from_tokens_file(&read(&vocabulary)?)
                    .with_context(|| format!("failed to load vocabulary from `{vocabulary}`"))?;
            }

            TableRenderer::new(glyphs, &dump.channels, &dump.vocabulary)
                .render(&dump.tokens, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn read(path: &Utf8Path) -> anyhow::Result<String> {
    tracing::debug!(%path, "reading");
    std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt().with_max_level(level).with_writer(io::stderr).init();
}
