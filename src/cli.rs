//! CLI argument definitions using clap with subcommand architecture

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{CommentStyle, NullablePolicy};

/// Documentation comment templates from single-line declarations
#[derive(Parser, Debug)]
#[command(name = "docblock")]
#[command(about = "Turns a declaration line into a documentation comment template")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ~/.config/docblock/config.toml)
    #[arg(long, global = true, value_name = "FILE", env = "DOCBLOCK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands for docblock
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the documentation comment for a declaration
    #[command(visible_alias = "r")]
    Render(RenderArgs),

    /// Print the parsed symbol record as JSON
    #[command(visible_alias = "p")]
    Parse(ParseArgs),

    /// List supported language identifiers
    Languages,
}

// ============================================
// Shared Input
// ============================================

/// Where the declaration line comes from
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Declaration line (read from stdin when omitted)
    #[arg(value_name = "LINE")]
    pub line: Option<String>,

    /// Language identifier (php, javascript, typescriptreact, ...)
    #[arg(short, long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Read the declaration from a file; the language defaults to its extension
    #[arg(long, value_name = "PATH", conflicts_with = "line")]
    pub file: Option<PathBuf>,

    /// 1-based line of `--file` holding the declaration (default: first non-blank)
    #[arg(short = 'n', long, value_name = "N", requires = "file")]
    pub line_number: Option<usize>,
}

// ============================================
// Render Subcommand
// ============================================

/// Arguments for the render command
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format
    #[arg(short, long, default_value = "snippet", value_enum)]
    pub format: RenderFormat,

    /// Minimum gutter between aligned columns
    #[arg(long, value_name = "N")]
    pub column_spacing: Option<usize>,

    /// Comment delimiter style
    #[arg(long, value_enum)]
    pub style: Option<StyleArg>,

    /// How nullable types are written
    #[arg(long, value_enum)]
    pub nullable: Option<NullableArg>,

    /// Omit the @return row
    #[arg(long)]
    pub no_return_tag: bool,
}

/// Arguments for the parse command
#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// How nullable types are written
    #[arg(long, value_enum)]
    pub nullable: Option<NullableArg>,
}

/// Render output formats
#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum RenderFormat {
    /// Snippet text with ${N:...} tab-stops
    #[default]
    Snippet,
    /// Plain text as shown before editing
    #[value(alias = "plain")]
    Text,
    /// Symbol record, snippet and text as JSON
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum StyleArg {
    /// The language's usual block comment
    Default,
    /// The language's alternate comment (e.g. `///` lines)
    Alternate,
}

impl From<StyleArg> for CommentStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Default => CommentStyle::Default,
            StyleArg::Alternate => CommentStyle::Alternate,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum NullableArg {
    /// `?int` becomes `int|null`
    Union,
    /// `?int` becomes `mixed`
    Mixed,
}

impl From<NullableArg> for NullablePolicy {
    fn from(arg: NullableArg) -> Self {
        match arg {
            NullableArg::Union => NullablePolicy::Union,
            NullableArg::Mixed => NullablePolicy::Mixed,
        }
    }
}
