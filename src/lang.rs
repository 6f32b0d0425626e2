//! Language identification and detector lookup

use std::path::Path;

use crate::detectors::c_family::{C, CPP};
use crate::detectors::generic::Language;
use crate::detectors::grammar::Grammar;
use crate::detectors::java::JAVA;
use crate::detectors::javascript::JAVASCRIPT;
use crate::detectors::php::PHP;
use crate::detectors::scss::SCSS;
use crate::detectors::typescript::TYPESCRIPT;
use crate::error::{DocblockError, Result};

/// Supported programming languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    C,
    Cpp,
    Java,
    Php,
    JavaScript,
    TypeScript,
    Scss,
}

impl Lang {
    /// Every supported language, in listing order
    pub const ALL: &'static [Lang] = &[
        Self::C,
        Self::Cpp,
        Self::Java,
        Self::Php,
        Self::JavaScript,
        Self::TypeScript,
        Self::Scss,
    ];

    /// Resolve an editor language identifier (`php`, `typescriptreact`, ...)
    pub fn from_id(id: &str) -> Result<Self> {
        let lowered = id.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.ids().contains(&lowered.as_str()))
            .ok_or_else(|| DocblockError::UnsupportedLanguage {
                language: id.to_string(),
            })
    }

    /// Detect language from file path extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| DocblockError::UnsupportedLanguage {
                language: "none".to_string(),
            })?;

        Self::from_extension(ext)
    }

    /// Detect language from file extension string
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_lowercase().as_str() {
            "c" | "h" => Ok(Self::C),
            "cpp" | "cc" | "cxx" | "hpp" | "hxx" | "hh" => Ok(Self::Cpp),
            "java" => Ok(Self::Java),
            "php" | "phtml" => Ok(Self::Php),
            "js" | "mjs" | "cjs" | "jsx" | "vue" => Ok(Self::JavaScript),
            "ts" | "mts" | "cts" | "tsx" => Ok(Self::TypeScript),
            "scss" | "sass" => Ok(Self::Scss),
            _ => Err(DocblockError::UnsupportedLanguage {
                language: ext.to_string(),
            }),
        }
    }

    /// Get the canonical name of the language
    pub fn name(&self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Java => "java",
            Self::Php => "php",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Scss => "scss",
        }
    }

    /// Identifiers accepted by `from_id`; the canonical name comes first
    pub fn ids(&self) -> &'static [&'static str] {
        match self {
            Self::C => &["c", "h"],
            Self::Cpp => &["cpp", "c++"],
            Self::Java => &["java"],
            Self::Php => &["php"],
            Self::JavaScript => &["javascript", "js", "jsx", "javascriptreact", "vue"],
            Self::TypeScript => &["typescript", "ts", "tsx", "typescriptreact"],
            Self::Scss => &["scss", "sass"],
        }
    }

    /// Detector implementing this language's declaration syntax
    pub fn language(&self) -> &'static dyn Language {
        match self {
            Self::C => &C,
            Self::Cpp => &CPP,
            Self::Java => &JAVA,
            Self::Php => &PHP,
            Self::JavaScript => &JAVASCRIPT,
            Self::TypeScript => &TYPESCRIPT,
            Self::Scss => &SCSS,
        }
    }

    pub fn grammar(&self) -> &'static Grammar {
        self.language().grammar()
    }
}
