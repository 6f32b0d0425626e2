//! docblock-engine: Documentation comment templates from declaration lines
//!
//! This library turns a single line of source code (a function, class or
//! variable declaration) into a structured `Symbol` and renders it as a
//! documentation comment with aligned tags and `${N:text}` tab-stops.
//!
//! # Supported Languages
//!
//! - C, C++
//! - Java
//! - PHP
//! - JavaScript, JSX, Vue
//! - TypeScript, TSX
//! - SCSS, Sass
//!
//! # Example
//!
//! ```
//! use docblock_engine::{generate, Settings};
//!
//! let snippet = generate("javascript", "function foo(arg1, arg2) {", &Settings::default())?;
//! assert!(snippet.starts_with("/**\n * ${1:[foo description]}"));
//! # Ok::<(), docblock_engine::DocblockError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod detectors;
pub mod error;
pub mod lang;
pub mod lexer;
pub mod render;
pub mod schema;

// Re-export commonly used types
pub use cli::{Cli, Commands, RenderFormat};
pub use config::{CommentStyle, LineEnding, NullablePolicy, Settings};
pub use detectors::{parse_tokens, CommentDelimiters, Grammar, Language};
pub use error::{DocblockError, Result};
pub use lang::Lang;
pub use lexer::{tokenize, Token, TokenKind};
pub use render::{render, strip_placeholders, Docblock};
pub use schema::{Parameter, ReturnInfo, Symbol, SymbolKind};

/// Parse one declaration line into a symbol record
///
/// Never fails: an unrecognized or incomplete line yields a partial record.
pub fn parse_line(lang: Lang, line: &str, settings: &Settings) -> Symbol {
    let tokens = tokenize(line);
    parse_tokens(lang.language(), &tokens, settings)
}

/// Parse and render one declaration line
pub fn render_line(lang: Lang, line: &str, settings: &Settings) -> Docblock {
    let symbol = parse_line(lang, line, settings);
    render(&symbol, lang.grammar(), settings)
}

/// Snippet text of the documentation comment for `line` in the language `lang_id`
///
/// Fails only when `lang_id` names no supported language.
pub fn generate(lang_id: &str, line: &str, settings: &Settings) -> Result<String> {
    let lang = Lang::from_id(lang_id)?;
    Ok(render_line(lang, line, settings).snippet())
}
