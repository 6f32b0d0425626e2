//! PHP language detector
//!
//! Variables carry a `$` sigil, types may be marked nullable with `?`, and
//! `define('NAME', ...)` declares a constant.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{NullablePolicy, Settings};
use crate::detectors::common::{unquote, Cursor};
use crate::detectors::generic::{self, Language, ParseState};
use crate::detectors::grammar::{Grammar, PHP_GRAMMAR};
use crate::lexer::TokenKind;
use crate::schema::SymbolKind;

static PHP_VARIABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$[\p{L}_][\p{L}\p{N}_]*$").unwrap());

pub struct Php;

pub static PHP: Php = Php;

impl Language for Php {
    fn grammar(&self) -> &'static Grammar {
        &PHP_GRAMMAR
    }

    fn parse_variable(&self, cursor: &mut Cursor, state: &mut ParseState) -> bool {
        if parse_define(cursor, state) {
            return true;
        }
        generic::parse_variable(self, cursor, state)
    }

    fn is_variable_name(&self, text: &str) -> bool {
        PHP_VARIABLE.is_match(text) && text != "$this"
    }

    fn finish(&self, state: &mut ParseState, settings: &Settings) {
        generic::finish(self, state, settings);
        for type_name in state.symbol.types_mut() {
            if let Some(rewritten) = apply_nullable_policy(type_name, settings.nullable_types) {
                *type_name = rewritten;
            }
        }
    }
}

/// `define('MAX_SIZE', 100);`
fn parse_define(cursor: &mut Cursor, state: &mut ParseState) -> bool {
    let Some(token) = cursor.current() else {
        return false;
    };
    if state.symbol.kind.is_some() || !token.value.eq_ignore_ascii_case("define") {
        return false;
    }
    if !cursor.peek_is(1, TokenKind::OpenParen) {
        return false;
    }
    let Some(name) = cursor.peek(2).filter(|t| t.is(TokenKind::String)) else {
        return false;
    };

    state.set_kind(SymbolKind::Variable);
    generic::name_variable(state, unquote(&name.value));
    cursor.advance_by(2);
    true
}

/// Rewrite a `?`-marked type per the configured policy
///
/// Returns `None` when the type is not marked nullable.
pub fn apply_nullable_policy(type_name: &str, policy: NullablePolicy) -> Option<String> {
    let inner = type_name.strip_prefix('?')?;
    Some(match policy {
        NullablePolicy::Union => format!("{}|null", inner),
        NullablePolicy::Mixed => "mixed".to_string(),
    })
}
