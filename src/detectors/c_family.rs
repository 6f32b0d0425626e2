//! C/C++ language detector
//!
//! Types come before names, functions have no keyword, and a `struct X`
//! may be either a declaration or a type. Java shares the typed-function
//! recognition defined here.

use crate::detectors::common::{matching_close, type_suffix, Cursor};
use crate::detectors::generic::{self, Language, ParseState};
use crate::detectors::grammar::{Grammar, GrammarCategory, CPP_GRAMMAR, C_GRAMMAR};
use crate::lexer::TokenKind;
use crate::schema::SymbolKind;

pub struct CFamily {
    grammar: &'static Grammar,
}

pub static C: CFamily = CFamily {
    grammar: &C_GRAMMAR,
};

pub static CPP: CFamily = CFamily {
    grammar: &CPP_GRAMMAR,
};

impl Language for CFamily {
    fn grammar(&self) -> &'static Grammar {
        self.grammar
    }

    fn parse_class(&self, cursor: &mut Cursor, state: &mut ParseState) -> bool {
        if state.symbol.kind.is_none() && skip_template_header(cursor) {
            return true;
        }
        // `struct point *origin;` uses the struct as a type
        if state.symbol.kind.is_none() && self.starts_tagged_type(cursor) {
            if let Some(type_name) = self.capture_type(cursor) {
                state.pending_type = Some(type_name);
                return true;
            }
        }
        generic::parse_class(self, cursor, state)
    }

    fn parse_function(&self, cursor: &mut Cursor, state: &mut ParseState) -> bool {
        parse_typed_function(self, cursor, state) || generic::parse_function(self, cursor, state)
    }

    fn is_type(&self, text: &str) -> bool {
        self.grammar.is_type(text) || (text.ends_with("_t") && self.grammar.is_identifier(text))
    }

    fn starts_type(&self, cursor: &Cursor) -> bool {
        let Some(token) = cursor.current() else {
            return false;
        };
        if !token.is_word() {
            return false;
        }
        if self.is_type(&token.value) || self.starts_tagged_type(cursor) {
            return true;
        }
        // User typedefs: `Point origin`, `Node *next`, `Widget &w`
        self.is_name(&token.value)
            && cursor.peek(1).is_some_and(|next| {
                next.is_word() || matches!(next.kind, TokenKind::Star | TokenKind::Ampersand)
            })
    }

    fn capture_type(&self, cursor: &mut Cursor) -> Option<String> {
        let token = cursor.current()?;
        if self.starts_tagged_type(cursor) {
            cursor.advance();
            let tag = cursor.current()?;
            let suffix = type_suffix(self.grammar, cursor);
            return Some(format!("{} {}{}", token.value, tag.value, suffix));
        }
        if !token.is_word() || !self.grammar.is_identifier(&token.value) {
            return None;
        }
        let suffix = type_suffix(self.grammar, cursor);
        Some(format!("{}{}", token.value, suffix))
    }
}

impl CFamily {
    /// `struct X`, `union X` or `enum X` followed by more declaration
    fn starts_tagged_type(&self, cursor: &Cursor) -> bool {
        let is_tag = cursor
            .current()
            .is_some_and(|t| self.grammar.matches(&t.value, Some(GrammarCategory::Class)));
        is_tag
            && cursor.peek(1).is_some_and(|t| t.is_word())
            && cursor.peek(2).is_some_and(|t| {
                t.is_word() || matches!(t.kind, TokenKind::Star | TokenKind::Ampersand)
            })
    }
}

/// `template <typename T, size_t N>` ahead of a function or class
fn skip_template_header(cursor: &mut Cursor) -> bool {
    let is_template = cursor.current().is_some_and(|t| t.value == "template");
    if !is_template || !cursor.peek_is(1, TokenKind::LessThan) {
        return false;
    }
    match matching_close(cursor, 1) {
        Some(end) => {
            cursor.advance_by(end);
            true
        }
        None => false,
    }
}

/// Keywordless function recognition for languages that declare the return
/// type before the name
///
/// A name directly followed by `(` starts a function; the type seen before
/// it becomes the return type. Without one (constructors, K&R style) the
/// block has no `@return`.
pub fn parse_typed_function<L: Language + ?Sized>(
    lang: &L,
    cursor: &mut Cursor,
    state: &mut ParseState,
) -> bool {
    let Some(token) = cursor.current() else {
        return false;
    };

    if state.symbol.kind.is_none() {
        if !token.is_word() || !lang.is_name(&token.value) {
            return false;
        }
        // Qualified names: `Widget::resize(`
        if cursor.peek(1).is_some_and(|t| t.value == "::") {
            cursor.advance();
            return true;
        }
        if !cursor.peek_is(1, TokenKind::OpenParen) {
            return false;
        }
        state.set_kind(SymbolKind::Function);
        state.set_name(&token.value);
        match state.pending_type.take() {
            Some(type_name) => state.set_return_type(type_name),
            None => state.symbol.return_info.present = false,
        }
        return true;
    }

    // Constructor initializer lists: `Widget(int w) : width(w) {`
    if state.symbol.is_kind(SymbolKind::Function)
        && state.parameters_closed
        && token.is(TokenKind::Colon)
    {
        state.mark_done();
        return true;
    }

    false
}
