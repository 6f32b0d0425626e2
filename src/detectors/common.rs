//! Common utilities shared across all language detectors
//!
//! This module provides the token cursor the state machine walks with, plus
//! lookahead helpers (type suffixes, bracket matching, destructuring) that
//! are language-agnostic.

use crate::detectors::grammar::Grammar;
use crate::lexer::{join_tokens, Token, TokenKind};

// ============================================================================
// Cursor
// ============================================================================

/// Position in the token sequence of one line
///
/// Handlers may consume lookahead tokens with `advance`; the parse loop then
/// moves past whatever token is current when the handler returns.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// Token `offset` positions after the current one (`peek(1)` is the next token)
    pub fn peek(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + offset)
    }

    pub fn peek_is(&self, offset: usize, kind: TokenKind) -> bool {
        self.peek(offset).is_some_and(|t| t.kind == kind)
    }

    pub fn advance(&mut self) {
        self.pos += 1;
    }

    pub fn advance_by(&mut self, count: usize) {
        self.pos += count;
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Tokens from `offset` (relative to the current token) up to and including `end`
    pub fn slice(&self, offset: usize, end: usize) -> &'a [Token] {
        let start = (self.pos + offset).min(self.tokens.len());
        let end = (self.pos + end + 1).min(self.tokens.len());
        &self.tokens[start..end.max(start)]
    }
}

// ============================================================================
// Bracket Matching
// ============================================================================

/// Offset of the bracket closing the group opened at `peek(offset)`
///
/// Returns `None` when the token there is not an opening bracket or the group
/// is unterminated on this line.
pub fn matching_close(cursor: &Cursor, offset: usize) -> Option<usize> {
    let open = cursor.peek(offset)?;
    let close = match open.kind {
        TokenKind::OpenParen => TokenKind::CloseParen,
        TokenKind::OpenBrace => TokenKind::CloseBrace,
        TokenKind::OpenBracket => TokenKind::CloseBracket,
        TokenKind::LessThan => TokenKind::GreaterThan,
        _ => return None,
    };

    let mut depth = 0usize;
    let mut index = offset;
    while let Some(token) = cursor.peek(index) {
        if token.kind == open.kind {
            depth += 1;
        } else if token.kind == close {
            depth -= 1;
            if depth == 0 {
                return Some(index);
            }
        }
        index += 1;
    }
    None
}

/// Text of the bracketed group starting at the current token; the cursor
/// is left on its closing bracket
pub fn consume_group(cursor: &mut Cursor) -> Option<String> {
    let end = matching_close(cursor, 0)?;
    let text = join_tokens(cursor.slice(0, end));
    cursor.advance_by(end);
    Some(text)
}

// ============================================================================
// Type Syntax
// ============================================================================

/// Consume the suffixes following a type name: array brackets, generic
/// arguments, pointer/reference marks and union members
///
/// The cursor must be on the type name; it is left on the last consumed token.
pub fn type_suffix(grammar: &Grammar, cursor: &mut Cursor) -> String {
    let mut suffix = String::new();

    loop {
        let Some(next) = cursor.peek(1) else { break };
        match next.kind {
            TokenKind::OpenBracket if cursor.peek_is(2, TokenKind::CloseBracket) => {
                suffix.push_str("[]");
                cursor.advance_by(2);
            }
            TokenKind::LessThan => match matching_close(cursor, 1) {
                Some(end) => {
                    let generic: String = cursor
                        .slice(1, end)
                        .iter()
                        .map(|t| {
                            if t.kind == TokenKind::Comma {
                                ", ".to_string()
                            } else {
                                t.value.clone()
                            }
                        })
                        .collect();
                    suffix.push_str(&generic);
                    cursor.advance_by(end);
                }
                None => break,
            },
            TokenKind::Star | TokenKind::Ampersand if grammar.pointer_types => {
                suffix.push_str(&next.value);
                cursor.advance();
            }
            TokenKind::Pipe if cursor.peek(2).is_some_and(is_union_member) => {
                suffix.push('|');
                cursor.advance_by(2);
                if let Some(member) = cursor.current() {
                    suffix.push_str(&member.value);
                }
            }
            _ => break,
        }
    }

    suffix
}

fn is_union_member(token: &Token) -> bool {
    matches!(
        token.kind,
        TokenKind::Word | TokenKind::String | TokenKind::Number
    )
}

/// Names bound by a destructuring group (`{a, b, c}` or `[first, second]`)
///
/// The cursor must be on the opening bracket; it is left on the matching
/// close. A name is bound when it follows the opening bracket, a comma or a
/// rest marker; default values and renames inside the group are skipped.
pub fn destructured_names(grammar: &Grammar, cursor: &mut Cursor) -> Vec<String> {
    let end = match matching_close(cursor, 0) {
        Some(end) => end,
        None => return Vec::new(),
    };

    let group = cursor.slice(0, end);
    let mut names = Vec::new();
    let mut depth = 0usize;
    let mut expecting = false;

    for token in group {
        match token.kind {
            kind if kind.is_open_group() => {
                depth += 1;
                expecting = true;
            }
            kind if kind.is_close_group() => {
                depth = depth.saturating_sub(1);
                expecting = false;
            }
            TokenKind::Comma => expecting = true,
            TokenKind::Ellipsis => {}
            TokenKind::Word if expecting && grammar.is_identifier(&token.value) => {
                names.push(token.value.clone());
                expecting = false;
            }
            _ => expecting = false,
        }
    }

    cursor.advance_by(end);
    names
}

/// Strip string quotes from a literal token's text
pub fn unquote(text: &str) -> &str {
    let trimmed = text.trim();
    for quote in ['"', '\'', '`'] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::grammar::{C_GRAMMAR, JAVASCRIPT_GRAMMAR, JAVA_GRAMMAR};
    use crate::lexer::tokenize;

    #[test]
    fn test_matching_close_nested() {
        let tokens = tokenize("(a, (b, c), d) {");
        let cursor = Cursor::new(&tokens);
        assert_eq!(matching_close(&cursor, 0), Some(10));
        assert_eq!(matching_close(&cursor, 1), None);
    }

    #[test]
    fn test_matching_close_unterminated() {
        let tokens = tokenize("(a, b");
        let cursor = Cursor::new(&tokens);
        assert_eq!(matching_close(&cursor, 0), None);
    }

    #[test]
    fn test_type_suffix_generics_and_arrays() {
        let tokens = tokenize("Map<String, List<Integer>>[] values");
        let mut cursor = Cursor::new(&tokens);
        let suffix = type_suffix(&JAVA_GRAMMAR, &mut cursor);
        assert_eq!(suffix, "<String, List<Integer>>[]");
        assert_eq!(cursor.peek(1).map(|t| t.value.as_str()), Some("values"));
    }

    #[test]
    fn test_type_suffix_pointers_only_in_c() {
        let tokens = tokenize("char **argv");
        let mut cursor = Cursor::new(&tokens);
        assert_eq!(type_suffix(&C_GRAMMAR, &mut cursor), "**");

        let mut cursor = Cursor::new(&tokens);
        assert_eq!(type_suffix(&JAVA_GRAMMAR, &mut cursor), "");
    }

    #[test]
    fn test_destructured_names() {
        let tokens = tokenize("{a, b = 2, c: renamed, ...rest}, d");
        let mut cursor = Cursor::new(&tokens);
        let names = destructured_names(&JAVASCRIPT_GRAMMAR, &mut cursor);
        assert_eq!(names, vec!["a", "b", "c", "rest"]);
        assert_eq!(cursor.current().map(|t| t.kind), Some(TokenKind::CloseBrace));
    }

    #[test]
    fn test_consume_group() {
        let tokens = tokenize("{ id: number } = {}");
        let mut cursor = Cursor::new(&tokens);
        assert_eq!(consume_group(&mut cursor).as_deref(), Some("{ id: number }"));
        assert_eq!(cursor.peek(1).map(|t| t.kind), Some(TokenKind::Equals));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("'FOO'"), "FOO");
        assert_eq!(unquote("\"BAR\""), "BAR");
        assert_eq!(unquote("plain"), "plain");
    }
}
