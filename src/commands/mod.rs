//! Command modules for the docblock CLI
//!
//! Each command module implements a single top-level command:
//! - `render` - Render the documentation comment for a declaration
//! - `parse` - Print the parsed symbol record
//! - `languages` - List supported language identifiers
//!
//! All command handlers take their respective `Args` struct from `cli.rs`
//! and a shared `CommandContext` carrying the loaded settings.

pub mod languages;
pub mod parse;
pub mod render;

// Re-export command handlers for easy access
pub use languages::run_languages;
pub use parse::run_parse;
pub use render::run_render;

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::cli::{Cli, InputArgs};
use crate::config::Settings;
use crate::error::{DocblockError, Result};
use crate::lang::Lang;

/// Shared context passed to all command handlers
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// Settings from the configuration file, before command-line overrides
    pub settings: Settings,
    /// Show verbose output
    pub verbose: bool,
}

impl CommandContext {
    /// Create a new CommandContext from CLI args
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            settings: load_settings(cli.config.as_deref()),
            verbose: cli.verbose,
        }
    }
}

fn load_settings(path: Option<&Path>) -> Settings {
    match path {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
}

/// Resolve the declaration line and its language from the input arguments
pub fn read_input(input: &InputArgs) -> Result<(Lang, String)> {
    if let Some(path) = &input.file {
        if !path.exists() {
            return Err(DocblockError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let source = fs::read_to_string(path)?;
        let lang = match &input.lang {
            Some(id) => Lang::from_id(id)?,
            None => Lang::from_path(path)?,
        };
        let line = match input.line_number {
            Some(number) => source.lines().nth(number.saturating_sub(1)),
            None => source.lines().find(|line| !line.trim().is_empty()),
        };
        debug!(
            path = %path.display(),
            language = lang.name(),
            found = line.is_some(),
            "Read declaration from file"
        );
        return Ok((lang, line.unwrap_or_default().to_string()));
    }

    let lang = Lang::from_id(input.lang.as_deref().unwrap_or("none"))?;
    let line = match &input.line {
        Some(line) => line.clone(),
        None => {
            let mut buffer = String::new();
            io::stdin().read_line(&mut buffer)?;
            buffer.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    Ok((lang, line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_read_input_from_argument() {
        let input = InputArgs {
            line: Some("let foo;".to_string()),
            lang: Some("js".to_string()),
            ..Default::default()
        };
        let (lang, line) = read_input(&input).unwrap();
        assert_eq!(lang, Lang::JavaScript);
        assert_eq!(line, "let foo;");
    }

    #[test]
    fn test_read_input_missing_file() {
        let input = InputArgs {
            file: Some(PathBuf::from("/nonexistent/Widget.java")),
            ..Default::default()
        };
        assert!(matches!(
            read_input(&input),
            Err(DocblockError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_read_input_unknown_language() {
        let input = InputArgs {
            line: Some("let foo;".to_string()),
            lang: Some("cobol".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            read_input(&input),
            Err(DocblockError::UnsupportedLanguage { .. })
        ));
    }
}
