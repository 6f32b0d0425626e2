//! Token stream for declaration lines
//!
//! Raw tokenization is handled entirely by logos. The parser only needs a
//! coarse classification (words, literals, and the punctuation that shapes a
//! declaration), so one lexer serves every supported language. Whitespace and
//! comments are dropped, but each token remembers whether whitespace preceded
//! it so captured default values can be re-assembled as readable text.

use logos::Logos;

/// Lexical classes produced by the logos lexer
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    Comment,

    /// Identifiers and keywords, including `$`/`@` sigils, `\` namespace
    /// separators, inner hyphens (`$primary-color`) and non-ASCII letters
    #[regex(r"[\p{L}_$@\\][\p{L}\p{N}_$\\-]*")]
    Word,

    #[regex(r"[0-9][0-9A-Za-z_.%]*")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    #[regex(r"`([^`\\]|\\.)*`")]
    String,

    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("<")]
    LessThan,
    #[token(">")]
    GreaterThan,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("=")]
    Equals,
    #[token("=>")]
    Arrow,
    #[token("?")]
    Question,
    #[token("...")]
    Ellipsis,
    #[token(".")]
    Dot,
    #[token("*")]
    Star,
    #[token("&")]
    Ampersand,
    #[token("|")]
    Pipe,

    #[regex(r"[-+/%!^~#]")]
    #[token("->")]
    #[token("::")]
    #[token("==")]
    #[token("!=")]
    Operator,

    /// Anything logos could not classify
    Unknown,
}

impl TokenKind {
    pub fn is_trivia(&self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment)
    }

    /// Brackets that change nesting depth
    pub fn is_open_group(&self) -> bool {
        matches!(self, Self::OpenParen | Self::OpenBrace | Self::OpenBracket)
    }

    pub fn is_close_group(&self) -> bool {
        matches!(self, Self::CloseParen | Self::CloseBrace | Self::CloseBracket)
    }
}

/// A single lexical token of a declaration line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw source text of the token
    pub value: String,
    /// Whitespace (or a comment) separated this token from the previous one
    pub space_before: bool,
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// Tokenize one line of source code
///
/// Never fails: characters logos cannot classify become `Unknown` tokens.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();
    let mut space_before = false;

    while let Some(result) = lexer.next() {
        let kind = result.unwrap_or(TokenKind::Unknown);
        if kind.is_trivia() {
            space_before = true;
            continue;
        }
        let slice = lexer.slice();

        // Hyphens only join words (`$primary-color`); trailing ones are operators (`i--`)
        let word_len = if kind == TokenKind::Word {
            slice.trim_end_matches('-').len()
        } else {
            slice.len()
        };
        tokens.push(Token {
            kind,
            value: slice[..word_len].to_string(),
            space_before,
        });
        for _ in word_len..slice.len() {
            tokens.push(Token {
                kind: TokenKind::Operator,
                value: "-".to_string(),
                space_before: false,
            });
        }
        space_before = false;
    }

    tokens
}

/// Join tokens back into text, keeping a single space wherever the source had whitespace
pub fn join_tokens<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> String {
    let mut text = String::new();
    for token in tokens {
        if token.space_before && !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&token.value);
    }
    text
}
