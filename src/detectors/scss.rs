//! SCSS language detector
//!
//! `@function` and `@mixin` declare callables, `$name` declares a variable,
//! and parameter defaults use `$param: value`. A mixin returns nothing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::detectors::common::Cursor;
use crate::detectors::generic::{self, Language, ParseState};
use crate::detectors::grammar::{Grammar, SCSS_GRAMMAR};
use crate::lexer::TokenKind;
use crate::schema::SymbolKind;

static SCSS_VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$[\p{L}_][\p{L}\p{N}_-]*$").unwrap());

pub struct Scss;

pub static SCSS: Scss = Scss;

impl Language for Scss {
    fn grammar(&self) -> &'static Grammar {
        &SCSS_GRAMMAR
    }

    fn parse_function(&self, cursor: &mut Cursor, state: &mut ParseState) -> bool {
        let handled = generic::parse_function(self, cursor, state);
        if handled && cursor.current().is_some_and(|t| t.value == "@mixin") {
            state.symbol.return_info.present = false;
        }
        handled
    }

    fn parse_parameters(&self, cursor: &mut Cursor, state: &mut ParseState) -> bool {
        // `$size: 12px` is a default value
        if state.in_parameters()
            && state.depth == 1
            && !state.in_default_value()
            && cursor.current().is_some_and(|t| t.is(TokenKind::Colon))
        {
            state.start_default_value();
            return true;
        }
        generic::parse_parameters(self, cursor, state)
    }

    fn parse_variable(&self, cursor: &mut Cursor, state: &mut ParseState) -> bool {
        // Only a leading `$name:` declares; `$name` anywhere else is a use
        let is_use = cursor.current().is_some_and(|t| self.is_variable_name(&t.value))
            && (cursor.position() > 0 || !cursor.peek_is(1, TokenKind::Colon));
        if state.symbol.kind.is_none() && is_use {
            return false;
        }
        generic::parse_variable(self, cursor, state)
    }

    fn is_variable_name(&self, text: &str) -> bool {
        SCSS_VARIABLE.is_match(text)
    }

    /// Values are untyped
    fn starts_type(&self, _cursor: &Cursor) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::lexer::tokenize;
    use crate::schema::{Parameter, Symbol};

    fn parse(line: &str) -> Symbol {
        generic::parse_tokens(&SCSS, &tokenize(line), &Settings::default())
    }

    #[test]
    fn test_function_with_defaults() {
        let symbol = parse("@function rem($size, $base: 16px) {");
        assert_eq!(symbol.name, "rem");
        assert_eq!(symbol.kind, Some(SymbolKind::Function));
        assert_eq!(
            symbol.parameters,
            vec![
                Parameter::named("$size"),
                Parameter {
                    name: "$base".into(),
                    value: "16px".into(),
                    type_name: None,
                },
            ]
        );
        assert!(symbol.return_info.present);
    }

    #[test]
    fn test_mixin_has_no_return() {
        let symbol = parse("@mixin theme($theme-color: #333, $args...) {");
        assert_eq!(symbol.name, "theme");
        assert!(!symbol.return_info.present);
        assert_eq!(symbol.parameters[0].name, "$theme-color");
        assert_eq!(symbol.parameters[0].value, "#333");
        assert_eq!(symbol.parameters[1].name, "$args");
    }

    #[test]
    fn test_variable() {
        let symbol = parse("$primary-color: #ff0000 !default;");
        assert_eq!(symbol.kind, Some(SymbolKind::Variable));
        assert_eq!(symbol.name, "$primary-color");
        assert!(!symbol.return_info.present);
    }

    #[test]
    fn test_selectors_are_not_declarations() {
        let symbol = parse(".button:hover {");
        assert_eq!(symbol.kind, None);
    }

    #[test]
    fn test_variable_uses_are_not_declarations() {
        for line in ["@include foo($a);", "color: $primary;", "@return $size * 2;", "$a + $b"] {
            let symbol = parse(line);
            assert_eq!(symbol.kind, None, "{}", line);
            assert!(symbol.name.is_empty(), "{}", line);
        }
    }
}
