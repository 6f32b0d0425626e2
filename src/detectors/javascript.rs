//! JavaScript language detector
//!
//! Functions are declared many ways besides the `function` keyword: class
//! methods, object properties holding a function, and assignments of
//! function expressions or arrow functions. These handlers are shared with
//! the TypeScript detector.

use crate::detectors::common::{matching_close, Cursor};
use crate::detectors::generic::{self, Language, ParseState};
use crate::detectors::grammar::{Grammar, GrammarCategory, JAVASCRIPT_GRAMMAR};
use crate::lexer::TokenKind;
use crate::schema::{Parameter, SymbolKind};

pub struct JavaScript;

pub static JAVASCRIPT: JavaScript = JavaScript;

impl Language for JavaScript {
    fn grammar(&self) -> &'static Grammar {
        &JAVASCRIPT_GRAMMAR
    }

    fn parse_function(&self, cursor: &mut Cursor, state: &mut ParseState) -> bool {
        parse_function(self, cursor, state)
    }

    fn parse_parameters(&self, cursor: &mut Cursor, state: &mut ParseState) -> bool {
        parse_parameters(self, cursor, state)
    }

    fn parse_variable(&self, cursor: &mut Cursor, state: &mut ParseState) -> bool {
        parse_variable(self, cursor, state)
    }
}

pub fn parse_function<L: Language + ?Sized>(
    lang: &L,
    cursor: &mut Cursor,
    state: &mut ParseState,
) -> bool {
    if state.symbol.kind.is_none() && parse_function_start(lang, cursor, state) {
        return true;
    }
    generic::parse_function(lang, cursor, state)
}

/// Keywordless function starts
///
/// - `const handler = async (event) => {`
/// - `Foo.prototype.bar = function (a) {`
/// - `render(props) {` inside a class body
/// - `onClick: function (event) {` inside an object literal
fn parse_function_start<L: Language + ?Sized>(
    lang: &L,
    cursor: &mut Cursor,
    state: &mut ParseState,
) -> bool {
    let Some(token) = cursor.current() else {
        return false;
    };

    if lang
        .grammar()
        .matches(&token.value, Some(GrammarCategory::Variable))
    {
        let Some(name) = cursor.peek(1).filter(|t| lang.is_name(&t.value)) else {
            return false;
        };
        if !assigns_function(cursor, 2) {
            return false;
        }
        state.set_kind(SymbolKind::Function);
        state.set_name(&name.value);
        cursor.advance();
        return true;
    }

    if !lang.is_name(&token.value) {
        return false;
    }

    // Qualifiers are skipped so the last segment names the function
    if cursor.peek_is(1, TokenKind::Dot) {
        cursor.advance();
        return true;
    }

    if cursor.peek_is(1, TokenKind::OpenParen) || assigns_function(cursor, 1) {
        state.set_kind(SymbolKind::Function);
        state.set_name(&token.value);
        return true;
    }

    false
}

/// Whether `peek(offset)` is `=` or `:` followed by a function expression
pub fn assigns_function(cursor: &Cursor, offset: usize) -> bool {
    let Some(op) = cursor.peek(offset) else {
        return false;
    };
    if !matches!(op.kind, TokenKind::Equals | TokenKind::Colon) {
        return false;
    }

    let mut index = offset + 1;
    if cursor.peek(index).is_some_and(|t| t.value == "async") {
        index += 1;
    }
    let Some(value) = cursor.peek(index) else {
        return false;
    };

    match value.kind {
        TokenKind::Word if value.value == "function" => true,
        // `x => x * 2`
        TokenKind::Word => cursor.peek_is(index + 1, TokenKind::Arrow),
        // `(a, b) => a + b`, `(a: number): number => a`
        TokenKind::OpenParen => matching_close(cursor, index).is_some_and(|end| {
            cursor.peek_is(end + 1, TokenKind::Arrow) || cursor.peek_is(end + 1, TokenKind::Colon)
        }),
        _ => false,
    }
}

/// Adds the bare arrow parameter (`x => ...`) to the generic list handling
pub fn parse_parameters<L: Language + ?Sized>(
    lang: &L,
    cursor: &mut Cursor,
    state: &mut ParseState,
) -> bool {
    if state.symbol.is_kind(SymbolKind::Function)
        && !state.in_parameters()
        && !state.parameters_closed
    {
        if let Some(token) = cursor.current() {
            if lang.is_variable_name(&token.value) && cursor.peek_is(1, TokenKind::Arrow) {
                state.push_parameter(Parameter::named(token.value.clone()));
                state.parameters_closed = true;
                return true;
            }
        }
    }
    generic::parse_parameters(lang, cursor, state)
}

/// Adds bare assignments (`count = 0;`, class fields) to keyword declarations
pub fn parse_variable<L: Language + ?Sized>(
    lang: &L,
    cursor: &mut Cursor,
    state: &mut ParseState,
) -> bool {
    if let Some(token) = cursor.current() {
        if state.symbol.kind.is_none()
            && token.is_word()
            && lang.is_name(&token.value)
            && cursor.peek_is(1, TokenKind::Equals)
        {
            state.set_kind(SymbolKind::Variable);
            generic::name_variable(state, &token.value);
            return true;
        }
    }
    generic::parse_variable(lang, cursor, state)
}
