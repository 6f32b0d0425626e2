//! Language Grammar Definitions
//!
//! This module holds the per-language data the declaration parser runs on.
//! Instead of duplicating the state machine in each language module, we
//! describe what varies (keywords, built-in types, identifier shape, comment
//! delimiters) here and let the shared parser in `generic.rs` consult it.
//!
//! # Adding a New Language
//!
//! 1. Add a new `Grammar` static (e.g., `KOTLIN_GRAMMAR`)
//! 2. Fill in keyword sets, keeping them disjoint from `builtin_types`
//! 3. Add a language module implementing `Language` if the syntax diverges
//! 4. Register it in `lang.rs`

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Comment delimiters used to wrap a rendered block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDelimiters {
    /// Opening line, e.g. `/**`. Empty for line-comment styles.
    pub open: String,
    /// Prefix of every body line, e.g. ` * `
    pub prefix: String,
    /// Closing line, e.g. ` */`. Empty for line-comment styles.
    pub close: String,
}

impl CommentDelimiters {
    pub fn new(open: &str, prefix: &str, close: &str) -> Self {
        Self {
            open: open.to_string(),
            prefix: prefix.to_string(),
            close: close.to_string(),
        }
    }
}

/// Static form of `CommentDelimiters` so grammars can live in statics
#[derive(Debug, Clone, Copy)]
pub struct CommentSyntax {
    pub open: &'static str,
    pub prefix: &'static str,
    pub close: &'static str,
}

impl CommentSyntax {
    pub fn to_delimiters(&self) -> CommentDelimiters {
        CommentDelimiters::new(self.open, self.prefix, self.close)
    }
}

const BLOCK_COMMENT: CommentSyntax = CommentSyntax {
    open: "/**",
    prefix: " * ",
    close: " */",
};

const TRIPLE_SLASH_COMMENT: CommentSyntax = CommentSyntax {
    open: "",
    prefix: "/// ",
    close: "",
};

/// Keyword categories of a grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarCategory {
    Class,
    Function,
    Modifier,
    Variable,
    Type,
}

/// Language-specific keyword and formatting table
#[derive(Debug)]
pub struct Grammar {
    /// Language identifier
    pub name: &'static str,

    // =========================================================================
    // Declaration Keywords
    // =========================================================================
    /// Tokens introducing a class-like declaration
    /// e.g., ["class", "interface", "struct"]
    pub class_keywords: &'static [&'static str],

    /// Tokens introducing a function or method
    /// e.g., ["function", "@mixin"]
    pub function_keywords: &'static [&'static str],

    /// Visibility/storage modifiers skipped while looking for a name
    pub modifier_keywords: &'static [&'static str],

    /// Tokens introducing a variable or constant
    pub variable_keywords: &'static [&'static str],

    /// Primitive and built-in type names (disjoint from every keyword set)
    pub builtin_types: &'static [&'static str],

    /// Statement words that never begin a declaration (`return`, `if`)
    pub reserved_words: &'static [&'static str],

    // =========================================================================
    // Identifier Shape
    // =========================================================================
    /// Pattern an identifier token must satisfy
    pub identifier: &'static Lazy<Regex>,

    /// Capitalized identifiers are accepted as (user-defined) type names
    pub class_name_types: bool,

    /// Variables need a keyword (`let`, `const`); otherwise a bare
    /// variable-shaped token starts a variable declaration
    pub variable_keyword_required: bool,

    // =========================================================================
    // Type Syntax
    // =========================================================================
    /// Prefix marking a nullable type, e.g. PHP `?int`
    pub nullable_sigil: Option<&'static str>,

    /// Return types meaning "returns nothing"; they suppress `@return`
    pub void_types: &'static [&'static str],

    /// Method names that never document a return value
    pub constructor_names: &'static [&'static str],

    /// `*` and `&` after a type belong to it (C pointers and references)
    pub pointer_types: bool,

    // =========================================================================
    // Comment Formatting
    // =========================================================================
    pub comment: CommentSyntax,
    pub alternate_comment: CommentSyntax,
    pub eol: &'static str,

    /// Wrap types in braces (JSDoc / SassDoc `{type}`)
    pub type_braces: bool,

    /// Tag documenting a variable's type, if the language uses one
    pub variable_tag: Option<&'static str>,
}

impl Grammar {
    /// Membership test against one category, or against all of them
    pub fn matches(&self, text: &str, category: Option<GrammarCategory>) -> bool {
        match category {
            Some(GrammarCategory::Class) => self.class_keywords.contains(&text),
            Some(GrammarCategory::Function) => self.function_keywords.contains(&text),
            Some(GrammarCategory::Modifier) => self.modifier_keywords.contains(&text),
            Some(GrammarCategory::Variable) => self.variable_keywords.contains(&text),
            Some(GrammarCategory::Type) => self.builtin_types.contains(&text),
            None => self.is_keyword(text) || self.builtin_types.contains(&text),
        }
    }

    /// Reserved in the class, function, modifier or variable category
    pub fn is_keyword(&self, text: &str) -> bool {
        self.class_keywords.contains(&text)
            || self.function_keywords.contains(&text)
            || self.modifier_keywords.contains(&text)
            || self.variable_keywords.contains(&text)
    }

    pub fn is_reserved(&self, text: &str) -> bool {
        self.reserved_words.contains(&text)
    }

    pub fn is_identifier(&self, text: &str) -> bool {
        self.identifier.is_match(text)
    }

    /// Identifier-shaped and not reserved in any category
    pub fn is_name(&self, text: &str) -> bool {
        self.is_identifier(text) && !self.matches(text, None) && !self.is_reserved(text)
    }

    /// Built-in type, or a class-shaped identifier that is not a keyword
    pub fn is_type(&self, text: &str) -> bool {
        if self.builtin_types.contains(&text) {
            return true;
        }
        self.class_name_types && CLASS_NAME.is_match(text) && !self.is_keyword(text)
    }

    pub fn is_void(&self, type_name: &str) -> bool {
        self.void_types.contains(&type_name)
    }

    pub fn is_constructor(&self, name: &str) -> bool {
        self.constructor_names.contains(&name)
    }
}

// =============================================================================
// Identifier Patterns
// =============================================================================

/// Capitalized last segment, optionally namespaced (`Foo`, `\App\User`)
static CLASS_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\\?([\p{L}_][\p{L}\p{N}_]*\\)*\p{Lu}[\p{L}\p{N}_]*$").unwrap());

static C_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Java and JavaScript identifiers, any Unicode letter allowed
static UNICODE_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}_$][\p{L}\p{N}_$]*$").unwrap());

static PHP_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\\?[\p{L}_][\p{L}\p{N}_]*(\\[\p{L}_][\p{L}\p{N}_]*)*$").unwrap()
});

static SCSS_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}_][\p{L}\p{N}_-]*$").unwrap());

// =============================================================================
// C Family
// =============================================================================

const C_RESERVED: &[&str] = &[
    "return", "if", "else", "for", "while", "do", "switch", "case", "default", "break",
    "continue", "goto", "sizeof",
];

const C_TYPES: &[&str] = &[
    "void", "char", "short", "int", "long", "float", "double", "signed", "unsigned", "bool",
    "_Bool", "size_t", "ssize_t", "ptrdiff_t", "wchar_t", "FILE", "int8_t", "int16_t", "int32_t",
    "int64_t", "uint8_t", "uint16_t", "uint32_t", "uint64_t", "intptr_t", "uintptr_t",
];

pub static C_GRAMMAR: Grammar = Grammar {
    name: "c",
    class_keywords: &["struct", "union", "enum"],
    function_keywords: &[],
    modifier_keywords: &[
        "static", "extern", "inline", "const", "volatile", "register", "restrict", "typedef",
        "auto",
    ],
    variable_keywords: &[],
    builtin_types: C_TYPES,
    reserved_words: C_RESERVED,
    identifier: &C_IDENTIFIER,
    class_name_types: false,
    variable_keyword_required: false,
    nullable_sigil: None,
    void_types: &["void"],
    constructor_names: &[],
    pointer_types: true,
    comment: BLOCK_COMMENT,
    alternate_comment: TRIPLE_SLASH_COMMENT,
    eol: "\n",
    type_braces: false,
    variable_tag: None,
};

pub static CPP_GRAMMAR: Grammar = Grammar {
    name: "cpp",
    class_keywords: &["class", "struct", "union", "enum", "namespace"],
    function_keywords: &[],
    modifier_keywords: &[
        "static", "extern", "inline", "const", "volatile", "register", "typedef", "public",
        "private", "protected", "virtual", "override", "final", "explicit", "friend", "constexpr",
        "mutable", "template", "typename",
    ],
    variable_keywords: &[],
    builtin_types: &[
        "void", "char", "short", "int", "long", "float", "double", "signed", "unsigned", "bool",
        "auto", "size_t", "ssize_t", "ptrdiff_t", "wchar_t", "string", "int8_t", "int16_t",
        "int32_t", "int64_t", "uint8_t", "uint16_t", "uint32_t", "uint64_t",
    ],
    reserved_words: &[
        "return", "if", "else", "for", "while", "do", "switch", "case", "default", "break",
        "continue", "goto", "sizeof", "new", "delete", "throw", "try", "catch", "using",
        "co_return", "co_await", "co_yield",
    ],
    identifier: &C_IDENTIFIER,
    class_name_types: false,
    variable_keyword_required: false,
    nullable_sigil: None,
    void_types: &["void"],
    constructor_names: &[],
    pointer_types: true,
    comment: BLOCK_COMMENT,
    alternate_comment: TRIPLE_SLASH_COMMENT,
    eol: "\n",
    type_braces: false,
    variable_tag: None,
};

// =============================================================================
// Java
// =============================================================================

pub static JAVA_GRAMMAR: Grammar = Grammar {
    name: "java",
    class_keywords: &["class", "interface", "enum", "record", "@interface"],
    function_keywords: &[],
    modifier_keywords: &[
        "public", "private", "protected", "static", "final", "abstract", "synchronized", "native",
        "transient", "volatile", "strictfp", "default", "sealed",
    ],
    variable_keywords: &["var"],
    builtin_types: &[
        "void", "boolean", "byte", "char", "short", "int", "long", "float", "double", "String",
        "Object", "Integer", "Long", "Double", "Float", "Boolean", "Character", "Byte", "Short",
    ],
    reserved_words: &[
        "return", "if", "else", "for", "while", "do", "switch", "case", "break", "continue",
        "new", "throw", "try", "catch", "finally", "assert", "this", "super", "package",
        "import", "yield",
    ],
    identifier: &UNICODE_IDENTIFIER,
    class_name_types: true,
    variable_keyword_required: false,
    nullable_sigil: None,
    void_types: &["void"],
    constructor_names: &[],
    pointer_types: false,
    comment: BLOCK_COMMENT,
    alternate_comment: BLOCK_COMMENT,
    eol: "\n",
    type_braces: false,
    variable_tag: None,
};

// =============================================================================
// PHP
// =============================================================================

pub static PHP_GRAMMAR: Grammar = Grammar {
    name: "php",
    class_keywords: &["class", "interface", "trait", "enum"],
    function_keywords: &["function", "fn"],
    modifier_keywords: &[
        "public", "private", "protected", "static", "abstract", "final", "readonly", "var",
    ],
    variable_keywords: &["const"],
    builtin_types: &[
        "int", "integer", "float", "double", "string", "bool", "boolean", "array", "object",
        "callable", "iterable", "mixed", "void", "null", "never", "self", "parent", "false",
        "true", "resource",
    ],
    reserved_words: &[
        "return", "if", "else", "elseif", "for", "foreach", "while", "do", "switch", "case",
        "break", "continue", "new", "throw", "try", "catch", "finally", "echo", "print",
        "include", "include_once", "require", "require_once", "use", "namespace", "yield",
        "match",
    ],
    identifier: &PHP_IDENTIFIER,
    class_name_types: true,
    variable_keyword_required: false,
    nullable_sigil: Some("?"),
    void_types: &["void", "never"],
    constructor_names: &["__construct", "__destruct"],
    pointer_types: false,
    comment: BLOCK_COMMENT,
    alternate_comment: BLOCK_COMMENT,
    eol: "\n",
    type_braces: false,
    variable_tag: Some("@var"),
};

// =============================================================================
// JavaScript / TypeScript
// =============================================================================

const JS_RESERVED: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "catch", "return", "throw", "typeof",
    "instanceof", "new", "delete", "await", "yield", "with", "super", "in", "of", "import",
];

pub static JAVASCRIPT_GRAMMAR: Grammar = Grammar {
    name: "javascript",
    class_keywords: &["class"],
    function_keywords: &["function"],
    modifier_keywords: &["async", "static", "get", "set", "export", "default"],
    variable_keywords: &["var", "let", "const"],
    builtin_types: &[],
    reserved_words: JS_RESERVED,
    identifier: &UNICODE_IDENTIFIER,
    class_name_types: false,
    variable_keyword_required: true,
    nullable_sigil: None,
    void_types: &[],
    constructor_names: &["constructor"],
    pointer_types: false,
    comment: BLOCK_COMMENT,
    alternate_comment: BLOCK_COMMENT,
    eol: "\n",
    type_braces: true,
    variable_tag: None,
};

pub static TYPESCRIPT_GRAMMAR: Grammar = Grammar {
    name: "typescript",
    class_keywords: &["class", "interface", "enum", "type", "namespace"],
    function_keywords: &["function"],
    modifier_keywords: &[
        "async", "static", "get", "set", "export", "default", "public", "private", "protected",
        "readonly", "abstract", "declare", "override",
    ],
    variable_keywords: &["var", "let", "const"],
    builtin_types: &[
        "string", "number", "boolean", "any", "unknown", "void", "never", "object", "symbol",
        "bigint", "undefined", "null",
    ],
    reserved_words: JS_RESERVED,
    identifier: &UNICODE_IDENTIFIER,
    class_name_types: true,
    variable_keyword_required: true,
    nullable_sigil: None,
    void_types: &["void", "never"],
    constructor_names: &["constructor"],
    pointer_types: false,
    comment: BLOCK_COMMENT,
    alternate_comment: BLOCK_COMMENT,
    eol: "\n",
    type_braces: true,
    variable_tag: None,
};

// =============================================================================
// SCSS
// =============================================================================

pub static SCSS_GRAMMAR: Grammar = Grammar {
    name: "scss",
    class_keywords: &[],
    function_keywords: &["@function", "@mixin"],
    modifier_keywords: &[],
    variable_keywords: &[],
    builtin_types: &[
        "number", "string", "color", "list", "map", "bool", "boolean", "null", "function",
        "arglist",
    ],
    reserved_words: &[
        "@include", "@extend", "@use", "@forward", "@import", "@return", "@if", "@else",
        "@each", "@for", "@while", "@media", "@supports", "@at-root", "@debug", "@warn",
        "@error", "@content",
    ],
    identifier: &SCSS_IDENTIFIER,
    class_name_types: false,
    variable_keyword_required: false,
    nullable_sigil: None,
    void_types: &[],
    constructor_names: &[],
    pointer_types: false,
    comment: BLOCK_COMMENT,
    alternate_comment: TRIPLE_SLASH_COMMENT,
    eol: "\n",
    type_braces: true,
    variable_tag: Some("@type"),
};

// =============================================================================
// Grammar Lookup
// =============================================================================

/// Every bundled grammar
pub static GRAMMARS: &[&Grammar] = &[
    &C_GRAMMAR,
    &CPP_GRAMMAR,
    &JAVA_GRAMMAR,
    &PHP_GRAMMAR,
    &JAVASCRIPT_GRAMMAR,
    &TYPESCRIPT_GRAMMAR,
    &SCSS_GRAMMAR,
];

/// Get the grammar for a language by name
pub fn get_grammar(lang_name: &str) -> Option<&'static Grammar> {
    GRAMMARS
        .iter()
        .copied()
        .find(|g| g.name.eq_ignore_ascii_case(lang_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_lookup() {
        assert!(get_grammar("php").is_some());
        assert!(get_grammar("JavaScript").is_some());
        assert!(get_grammar("scss").is_some());
        assert!(get_grammar("cobol").is_none());
    }

    #[test]
    fn test_keywords_disjoint_from_types() {
        for grammar in GRAMMARS {
            for keyword in grammar
                .class_keywords
                .iter()
                .chain(grammar.function_keywords)
                .chain(grammar.modifier_keywords)
                .chain(grammar.variable_keywords)
            {
                assert!(
                    !grammar.builtin_types.contains(keyword),
                    "{}: '{}' is both a keyword and a type",
                    grammar.name,
                    keyword
                );
                assert!(
                    !grammar.is_reserved(keyword),
                    "{}: '{}' is both a keyword and a statement word",
                    grammar.name,
                    keyword
                );
            }
        }
    }

    #[test]
    fn test_statement_words_are_not_names() {
        assert!(!C_GRAMMAR.is_name("return"));
        assert!(!CPP_GRAMMAR.is_name("delete"));
        assert!(!JAVA_GRAMMAR.is_name("throw"));
        assert!(!JAVASCRIPT_GRAMMAR.is_name("typeof"));
        assert!(SCSS_GRAMMAR.is_reserved("@include"));
        assert!(C_GRAMMAR.is_name("return_value"));
    }

    #[test]
    fn test_non_ascii_identifiers() {
        assert!(JAVASCRIPT_GRAMMAR.is_name("café"));
        assert!(JAVA_GRAMMAR.is_name("größe"));
        assert!(JAVA_GRAMMAR.is_type("Größe"));
        assert!(PHP_GRAMMAR.is_name(r"\App\Café"));
        assert!(!C_GRAMMAR.is_name("café"));
    }

    #[test]
    fn test_is_name_rejects_reserved_words() {
        assert!(PHP_GRAMMAR.is_name("getUser"));
        assert!(!PHP_GRAMMAR.is_name("function"));
        assert!(!PHP_GRAMMAR.is_name("string"));
        assert!(!PHP_GRAMMAR.is_name("$user"));
        assert!(JAVASCRIPT_GRAMMAR.is_name("$scope"));
        assert!(!JAVASCRIPT_GRAMMAR.is_name("const"));
    }

    #[test]
    fn test_is_type_accepts_class_names() {
        assert!(JAVA_GRAMMAR.is_type("int"));
        assert!(JAVA_GRAMMAR.is_type("UserRepository"));
        assert!(!JAVA_GRAMMAR.is_type("userRepository"));
        assert!(PHP_GRAMMAR.is_type(r"\App\Models\User"));
        // No class-name convention in JavaScript
        assert!(!JAVASCRIPT_GRAMMAR.is_type("User"));
    }

    #[test]
    fn test_matches_by_category() {
        assert!(JAVA_GRAMMAR.matches("class", Some(GrammarCategory::Class)));
        assert!(!JAVA_GRAMMAR.matches("class", Some(GrammarCategory::Modifier)));
        assert!(JAVA_GRAMMAR.matches("public", None));
        assert!(JAVA_GRAMMAR.matches("int", None));
        assert!(!JAVA_GRAMMAR.matches("count", None));
    }
}
