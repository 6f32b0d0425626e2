//! Docblock configuration management.
//!
//! Handles the configuration file at:
//! - Linux/macOS: ~/.config/docblock/config.toml
//! - Windows: %APPDATA%\docblock\config.toml
//!
//! Configuration is read-only input to the parser and renderer. A missing
//! file, an unreadable file, or an invalid value never fails a request: each
//! bad value falls back to its documented default and a warning is logged.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::detectors::grammar::{get_grammar, CommentDelimiters, Grammar};

/// Which of a language's two comment styles to render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStyle {
    #[default]
    Default,
    Alternate,
}

/// How a type marked nullable (`?int`) is written in the rendered block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullablePolicy {
    /// `?int` becomes `int|null`
    #[default]
    Union,
    /// `?int` becomes `mixed`
    Mixed,
}

/// Line ending used to join rendered lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

/// Docblock settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Minimum gutter between aligned columns
    #[serde(default = "default_column_spacing")]
    pub column_spacing: usize,

    /// Emit `@return` rows for functions
    #[serde(default = "default_return_tag")]
    pub default_return_tag: bool,

    #[serde(default)]
    pub comment_style: CommentStyle,

    #[serde(default)]
    pub nullable_types: NullablePolicy,

    /// Overrides the language's end-of-line convention
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_ending: Option<LineEnding>,

    /// Per-language comment delimiter overrides, keyed by grammar name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub comments: BTreeMap<String, CommentDelimiters>,
}

fn default_column_spacing() -> usize {
    2
}

fn default_return_tag() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            column_spacing: default_column_spacing(),
            default_return_tag: default_return_tag(),
            comment_style: CommentStyle::default(),
            nullable_types: NullablePolicy::default(),
            line_ending: None,
            comments: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Default configuration file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("docblock").join("config.toml"))
    }

    /// Load configuration from the default path
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) => {
                tracing::warn!("Failed to read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse configuration text, keeping every valid key and defaulting the rest
    pub fn from_toml_str(content: &str) -> Self {
        let table: toml::Table = match toml::from_str(content) {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!("Failed to parse config, using defaults: {}", e);
                return Self::default();
            }
        };

        let mut settings = Self::default();
        read_key(&table, "column_spacing", &mut settings.column_spacing);
        read_key(&table, "default_return_tag", &mut settings.default_return_tag);
        read_key(&table, "comment_style", &mut settings.comment_style);
        read_key(&table, "nullable_types", &mut settings.nullable_types);
        read_key(&table, "line_ending", &mut settings.line_ending);

        if let Some(toml::Value::Table(comments)) = table.get("comments") {
            for (language, value) in comments {
                let Some(grammar) = get_grammar(language) else {
                    tracing::warn!("Ignoring comment override for unknown language {}", language);
                    continue;
                };
                match value.clone().try_into::<CommentDelimiters>() {
                    Ok(delimiters) => {
                        settings.comments.insert(grammar.name.to_string(), delimiters);
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring comment override for {}: {}", language, e)
                    }
                }
            }
        }

        for key in table.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                tracing::warn!("Unknown config key: {}", key);
            }
        }

        settings
    }

    /// Comment delimiters for a grammar: override first, then the selected style
    pub fn comment_for(&self, grammar: &Grammar) -> CommentDelimiters {
        if let Some(delimiters) = self.comments.get(grammar.name) {
            return delimiters.clone();
        }
        match self.comment_style {
            CommentStyle::Default => grammar.comment.to_delimiters(),
            CommentStyle::Alternate => grammar.alternate_comment.to_delimiters(),
        }
    }

    pub fn eol_for(&self, grammar: &Grammar) -> &'static str {
        match self.line_ending {
            Some(ending) => ending.as_str(),
            None => grammar.eol,
        }
    }
}

const KNOWN_KEYS: &[&str] = &[
    "column_spacing",
    "default_return_tag",
    "comment_style",
    "nullable_types",
    "line_ending",
    "comments",
];

/// Overwrite `slot` with the table value under `key` if it deserializes
fn read_key<T: DeserializeOwned>(table: &toml::Table, key: &str, slot: &mut T) {
    let Some(value) = table.get(key) else { return };
    match value.clone().try_into::<T>() {
        Ok(parsed) => *slot = parsed,
        Err(e) => tracing::warn!("Invalid value for {}, using default: {}", key, e),
    }
}
