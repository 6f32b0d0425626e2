//! Java language detector

use crate::detectors::c_family::parse_typed_function;
use crate::detectors::common::{matching_close, type_suffix, Cursor};
use crate::detectors::generic::{self, Language, ParseState};
use crate::detectors::grammar::{Grammar, JAVA_GRAMMAR};
use crate::lexer::TokenKind;

pub struct Java;

pub static JAVA: Java = Java;

impl Language for Java {
    fn grammar(&self) -> &'static Grammar {
        &JAVA_GRAMMAR
    }

    fn parse_class(&self, cursor: &mut Cursor, state: &mut ParseState) -> bool {
        if state.symbol.kind.is_none() && skip_prefix(cursor) {
            return true;
        }
        generic::parse_class(self, cursor, state)
    }

    fn parse_function(&self, cursor: &mut Cursor, state: &mut ParseState) -> bool {
        parse_typed_function(self, cursor, state) || generic::parse_function(self, cursor, state)
    }

    fn parse_parameters(&self, cursor: &mut Cursor, state: &mut ParseState) -> bool {
        // Parameter annotations: `@PathVariable("id") long id`
        if state.in_parameters() && !state.in_default_value() && skip_prefix(cursor) {
            return true;
        }
        generic::parse_parameters(self, cursor, state)
    }

    /// Qualified names are joined: `java.util.List<String>`
    fn capture_type(&self, cursor: &mut Cursor) -> Option<String> {
        let token = cursor.current()?;
        if !token.is_word() || !JAVA_GRAMMAR.is_identifier(&token.value) {
            return None;
        }
        let mut type_name = token.value.clone();
        while cursor.peek_is(1, TokenKind::Dot) {
            match cursor.peek(2) {
                Some(next) if next.is_word() => {
                    type_name.push('.');
                    type_name.push_str(&next.value);
                    cursor.advance_by(2);
                }
                _ => break,
            }
        }
        type_name.push_str(&type_suffix(&JAVA_GRAMMAR, cursor));
        Some(type_name)
    }

    fn starts_type(&self, cursor: &Cursor) -> bool {
        let Some(token) = cursor.current() else {
            return false;
        };
        if !token.is_word() {
            return false;
        }
        // Lower-case package prefix of a qualified type
        self.is_type(&token.value)
            || (self.is_name(&token.value) && cursor.peek_is(1, TokenKind::Dot))
    }
}

/// Skip annotations (with their arguments) and generic type parameter lists
///
/// Leaves the cursor on the last skipped token.
fn skip_prefix(cursor: &mut Cursor) -> bool {
    let Some(token) = cursor.current() else {
        return false;
    };
    if token.is(TokenKind::LessThan) {
        if let Some(end) = matching_close(cursor, 0) {
            cursor.advance_by(end);
            return true;
        }
        return false;
    }
    if token.is_word() && token.value.starts_with('@') && token.value != "@interface" {
        if let Some(end) = matching_close(cursor, 1) {
            cursor.advance_by(end);
        }
        return true;
    }
    false
}
