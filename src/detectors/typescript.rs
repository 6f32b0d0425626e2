//! TypeScript language detector
//!
//! JavaScript declaration forms plus `name: Type` annotations on parameters,
//! variables and return values. Types always follow names, so no token is
//! treated as a type unless a colon introduced it.

use crate::detectors::common::{consume_group, type_suffix, Cursor};
use crate::detectors::generic::{self, Language, ParseState};
use crate::detectors::grammar::{Grammar, TYPESCRIPT_GRAMMAR};
use crate::detectors::javascript;
use crate::lexer::TokenKind;
use crate::schema::SymbolKind;

pub struct TypeScript;

pub static TYPESCRIPT: TypeScript = TypeScript;

impl Language for TypeScript {
    fn grammar(&self) -> &'static Grammar {
        &TYPESCRIPT_GRAMMAR
    }

    fn parse_function(&self, cursor: &mut Cursor, state: &mut ParseState) -> bool {
        javascript::parse_function(self, cursor, state)
    }

    fn parse_parameters(&self, cursor: &mut Cursor, state: &mut ParseState) -> bool {
        if annotate_parameter(self, cursor, state) {
            return true;
        }
        javascript::parse_parameters(self, cursor, state)
    }

    fn parse_variable(&self, cursor: &mut Cursor, state: &mut ParseState) -> bool {
        if parse_annotated_variable(self, cursor, state) {
            return true;
        }
        javascript::parse_variable(self, cursor, state)
    }

    fn starts_type(&self, _cursor: &Cursor) -> bool {
        false
    }

    fn capture_type(&self, cursor: &mut Cursor) -> Option<String> {
        let token = cursor.current()?;
        let mut type_name = match token.kind {
            // Object literal and tuple types
            TokenKind::OpenBrace | TokenKind::OpenBracket => consume_group(cursor)?,
            // Function types: `(event: Event) => void`
            TokenKind::OpenParen => {
                let group = consume_group(cursor)?;
                if !cursor.peek_is(1, TokenKind::Arrow) {
                    return Some(group);
                }
                cursor.advance_by(2);
                match self.capture_type(cursor) {
                    Some(returns) => return Some(format!("{} => {}", group, returns)),
                    None => return Some(group),
                }
            }
            TokenKind::Word => {
                let mut name = token.value.clone();
                while cursor.peek_is(1, TokenKind::Dot) {
                    match cursor.peek(2) {
                        Some(next) if next.is_word() => {
                            name.push('.');
                            name.push_str(&next.value);
                            cursor.advance_by(2);
                        }
                        _ => break,
                    }
                }
                name
            }
            // Literal types: `'asc' | 'desc'`
            TokenKind::String | TokenKind::Number => token.value.clone(),
            _ => return None,
        };
        type_name.push_str(&type_suffix(&TYPESCRIPT_GRAMMAR, cursor));
        Some(type_name)
    }
}

/// `name: Type` and `name?: Type` inside a parameter list
///
/// Destructured groups keep their names but drop the group's annotation.
fn annotate_parameter<L: Language + ?Sized>(
    lang: &L,
    cursor: &mut Cursor,
    state: &mut ParseState,
) -> bool {
    if !state.in_parameters() || state.in_default_value() || state.depth != 1 {
        return false;
    }
    let Some(token) = cursor.current() else {
        return false;
    };

    match token.kind {
        TokenKind::Question => true,
        TokenKind::Colon => {
            let has_type = cursor.peek(1).is_some_and(|next| {
                !matches!(
                    next.kind,
                    TokenKind::Comma | TokenKind::CloseParen | TokenKind::Equals
                )
            });
            if !has_type {
                return true;
            }
            cursor.advance();
            let type_name = lang.capture_type(cursor);
            if !state.destructured {
                if let (Some(type_name), Some(parameter)) =
                    (type_name, state.last_parameter_mut())
                {
                    parameter.type_name = Some(type_name);
                }
            }
            true
        }
        _ => false,
    }
}

/// `let total: number`, class properties `private name?: string`
fn parse_annotated_variable<L: Language + ?Sized>(
    lang: &L,
    cursor: &mut Cursor,
    state: &mut ParseState,
) -> bool {
    let Some(token) = cursor.current() else {
        return false;
    };

    let annotated = cursor.peek_is(1, TokenKind::Colon)
        || (cursor.peek_is(1, TokenKind::Question) && cursor.peek_is(2, TokenKind::Colon));
    let names_here = match state.symbol.kind {
        None => token.is_word() && lang.is_name(&token.value) && annotated,
        Some(SymbolKind::Variable) => state.expecting_name && token.is_word(),
        _ => false,
    };
    if !names_here {
        return false;
    }

    state.set_kind(SymbolKind::Variable);
    generic::name_variable(state, &token.value);
    if cursor.peek_is(1, TokenKind::Question) {
        cursor.advance();
    }
    if cursor.peek_is(1, TokenKind::Colon) {
        cursor.advance_by(2);
        if let Some(type_name) = lang.capture_type(cursor) {
            state.set_return_type(type_name);
        }
    }
    true
}
