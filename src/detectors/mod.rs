//! Language-specific declaration detectors
//!
//! This module contains the declaration parser and its per-language
//! bindings. Each detector knows how to recognize class, function and
//! variable declarations in the token stream of one source line.
//!
//! # Architecture
//!
//! The detector system has three layers:
//!
//! 1. **Grammar definitions** (`grammar.rs`): Per-language keyword sets,
//!    built-in types, identifier patterns and comment delimiters.
//!
//! 2. **Generic parser** (`generic.rs`): The shared state machine and the
//!    `Language` capability trait whose default handlers are driven by a
//!    `Grammar`.
//!
//! 3. **Language detectors**: Implementations of `Language` that override
//!    the handlers where syntax diverges (type-before-name, sigils,
//!    annotations, arrow functions).
//!
//! # Supported Languages
//!
//! - `c_family`: C, C++
//! - `java`: Java
//! - `php`: PHP
//! - `javascript`: JavaScript, JSX, Vue
//! - `typescript`: TypeScript, TSX
//! - `scss`: SCSS, Sass
//!
//! # Adding a New Language
//!
//! 1. Add a `Grammar` in `grammar.rs`
//! 2. Add a detector implementing `Language`, overriding only what differs
//! 3. Add a `Lang` variant in `lang.rs`

pub mod c_family;
pub mod common;
pub mod generic;
pub mod grammar;
pub mod java;
pub mod javascript;
pub mod php;
pub mod scss;
pub mod typescript;

// Re-export key types for convenience
pub use generic::{parse_tokens, Language, ParseState};
pub use grammar::{get_grammar, CommentDelimiters, Grammar};
