//! Generic Declaration Parser
//!
//! This module provides the language-agnostic state machine that turns the
//! token stream of one declaration line into a `Symbol`. Languages plug in
//! through the `Language` trait: every handler has a default implementation
//! here driven by the language's `Grammar`, and a language module overrides
//! only the handlers where its syntax diverges.
//!
//! # Usage
//!
//! ```ignore
//! use crate::detectors::generic::parse_tokens;
//! use crate::detectors::php::PHP;
//!
//! let symbol = parse_tokens(&PHP, &tokenize("function foo($a) {"), &settings);
//! ```
//!
//! # Dispatch
//!
//! Each token is offered to the handlers in order (class, function,
//! parameters, variable); the first one that claims it wins. Once `done` is
//! set and no parameter list is open, the remaining tokens are ignored.
//! Malformed lines are never an error: whatever was captured is returned.

use tracing::{debug, trace};

use crate::config::Settings;
use crate::detectors::common::{destructured_names, type_suffix, Cursor};
use crate::detectors::grammar::{Grammar, GrammarCategory};
use crate::lexer::{join_tokens, Token, TokenKind};
use crate::schema::{Parameter, Symbol, SymbolKind};

// =============================================================================
// Parse State
// =============================================================================

/// Accumulator for one parse run
///
/// Created fresh for every line and owned by that run alone.
#[derive(Debug, Default)]
pub struct ParseState {
    pub symbol: Symbol,

    /// The next name-shaped token names the declaration
    pub expecting_name: bool,
    /// Inside the parameter list, at a position where a new parameter starts
    pub expecting_parameter: bool,
    /// The last parameter has its type and still needs a name (or vice versa)
    pub expecting_parameter_type: bool,
    /// A return type annotation follows
    pub expecting_return_type: bool,
    pub done: bool,

    /// Bracket depth inside the parameter list; 0 when no list is open
    pub depth: usize,
    /// The first parameter list has been closed
    pub parameters_closed: bool,
    /// The current parameter came from a destructuring group
    pub destructured: bool,
    /// Tokens of the default value being collected for the last parameter
    default_value: Option<Vec<Token>>,

    /// Type seen ahead of the declaration name (`int count`, `?string $name`)
    pub pending_type: Option<String>,
    /// Nullable sigil waiting for the type it applies to
    pub pending_nullable: Option<&'static str>,
}

impl ParseState {
    pub fn in_parameters(&self) -> bool {
        self.depth > 0
    }

    pub fn in_default_value(&self) -> bool {
        self.default_value.is_some()
    }

    pub fn open_parameters(&mut self) {
        self.depth = 1;
        self.expecting_parameter = true;
        self.expecting_parameter_type = false;
        debug!("Parameter list opened");
    }

    pub fn close_parameters(&mut self) {
        self.finish_default_value();
        self.depth = 0;
        self.parameters_closed = true;
        self.expecting_parameter = false;
        self.expecting_parameter_type = false;
        self.destructured = false;
        debug!(count = self.symbol.parameters.len(), "Parameter list closed");
    }

    /// A comma at list level: the next token may start a new parameter
    pub fn next_parameter(&mut self) {
        self.finish_default_value();
        self.expecting_parameter = true;
        self.expecting_parameter_type = false;
        self.destructured = false;
    }

    pub fn push_parameter(&mut self, parameter: Parameter) {
        trace!(?parameter, "Parameter added");
        self.symbol.parameters.push(parameter);
    }

    pub fn last_parameter_mut(&mut self) -> Option<&mut Parameter> {
        self.symbol.parameters.last_mut()
    }

    pub fn start_default_value(&mut self) {
        self.default_value = Some(Vec::new());
    }

    pub fn push_default_token(&mut self, token: &Token) {
        if let Some(tokens) = self.default_value.as_mut() {
            tokens.push(token.clone());
        }
    }

    /// Store the collected default value on the last parameter
    ///
    /// Destructured parameters never carry a default.
    pub fn finish_default_value(&mut self) {
        let Some(tokens) = self.default_value.take() else {
            return;
        };
        if self.destructured {
            return;
        }
        let value = join_tokens(&tokens);
        if let Some(parameter) = self.last_parameter_mut() {
            parameter.value = value;
        }
    }

    /// Apply a pending nullable sigil to a freshly captured type
    pub fn take_type(&mut self, type_name: String) -> String {
        match self.pending_nullable.take() {
            Some(sigil) => format!("{}{}", sigil, type_name),
            None => type_name,
        }
    }

    pub fn set_kind(&mut self, kind: SymbolKind) -> bool {
        let changed = self.symbol.set_kind(kind);
        if changed {
            debug!(kind = kind.as_str(), "Declaration kind recognized");
        }
        changed
    }

    pub fn set_name(&mut self, name: &str) -> bool {
        let changed = self.symbol.set_name(name);
        if changed {
            self.expecting_name = false;
            debug!(name, "Declaration name captured");
        }
        changed
    }

    pub fn set_return_type(&mut self, type_name: String) {
        debug!(type_name = type_name.as_str(), "Type captured");
        self.symbol.return_info.type_name = Some(type_name);
    }

    pub fn mark_done(&mut self) {
        if !self.done {
            debug!("Declaration complete");
        }
        self.done = true;
    }
}

// =============================================================================
// Language Capabilities
// =============================================================================

/// Per-language capability interface over the shared state machine
///
/// Every method has a grammar-driven default; language modules override the
/// ones their syntax needs. Handlers return `true` when they claimed the
/// current token.
pub trait Language: Sync {
    fn grammar(&self) -> &'static Grammar;

    fn parse_class(&self, cursor: &mut Cursor, state: &mut ParseState) -> bool {
        parse_class(self, cursor, state)
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

    /// Identifier-shaped and not reserved
    fn is_name(&self, text: &str) -> bool {
        self.grammar().is_name(text)
    }

    fn is_type(&self, text: &str) -> bool {
        self.grammar().is_type(text)
    }

    /// Shape of a variable or parameter name (`$x` in sigil languages)
    fn is_variable_name(&self, text: &str) -> bool {
        self.is_name(text)
    }

    /// Whether a type begins at the current token
    fn starts_type(&self, cursor: &Cursor) -> bool {
        cursor
            .current()
            .is_some_and(|t| t.is_word() && self.is_type(&t.value))
    }

    /// Capture the type starting at the current token, including suffixes
    fn capture_type(&self, cursor: &mut Cursor) -> Option<String> {
        let token = cursor.current()?;
        if !token.is_word() {
            return None;
        }
        if !self.is_type(&token.value) && !self.grammar().is_identifier(&token.value) {
            return None;
        }
        let suffix = type_suffix(self.grammar(), cursor);
        Some(format!("{}{}", token.value, suffix))
    }

    /// Post-processing once the token stream is exhausted
    fn finish(&self, state: &mut ParseState, settings: &Settings) {
        finish(self, state, settings)
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

/// Run the state machine over one line's tokens
pub fn parse_tokens(language: &dyn Language, tokens: &[Token], settings: &Settings) -> Symbol {
    let mut state = ParseState::default();
    let mut cursor = Cursor::new(tokens);

    while let Some(token) = cursor.current() {
        if state.done && !state.in_parameters() {
            trace!(remaining = tokens.len() - cursor.position(), "Skipping tokens");
            break;
        }

        let claimed = language.parse_class(&mut cursor, &mut state)
            || language.parse_function(&mut cursor, &mut state)
            || language.parse_parameters(&mut cursor, &mut state)
            || language.parse_variable(&mut cursor, &mut state);
        trace!(token = token.value.as_str(), claimed, "Token dispatched");

        cursor.advance();
    }

    language.finish(&mut state, settings);
    state.symbol
}

// =============================================================================
// Default Handlers
// =============================================================================

/// Class keyword followed by the class name
pub fn parse_class<L: Language + ?Sized>(
    lang: &L,
    cursor: &mut Cursor,
    state: &mut ParseState,
) -> bool {
    let Some(token) = cursor.current() else {
        return false;
    };

    if state.symbol.kind.is_none()
        && lang
            .grammar()
            .matches(&token.value, Some(GrammarCategory::Class))
    {
        state.set_kind(SymbolKind::Class);
        state.expecting_name = true;
        return true;
    }

    if state.symbol.is_kind(SymbolKind::Class) && state.expecting_name && lang.is_name(&token.value)
    {
        state.set_name(&token.value);
        state.mark_done();
        return true;
    }

    false
}

/// Function keyword, name, and everything after the parameter list
pub fn parse_function<L: Language + ?Sized>(
    lang: &L,
    cursor: &mut Cursor,
    state: &mut ParseState,
) -> bool {
    let Some(token) = cursor.current() else {
        return false;
    };
    let grammar = lang.grammar();

    if state.symbol.kind.is_none() && grammar.matches(&token.value, Some(GrammarCategory::Function))
    {
        state.set_kind(SymbolKind::Function);
        state.expecting_name = true;
        return true;
    }

    if !state.symbol.is_kind(SymbolKind::Function) || state.in_parameters() {
        return false;
    }

    if state.expecting_name && !state.parameters_closed && token.is_word() {
        let called = cursor.peek_is(1, TokenKind::OpenParen);
        if lang.is_name(&token.value) || (called && grammar.is_identifier(&token.value)) {
            state.set_name(&token.value);
            return true;
        }
    }

    if state.expecting_return_type {
        if grammar.nullable_sigil == Some(token.value.as_str()) {
            state.pending_nullable = grammar.nullable_sigil;
            return true;
        }
        if let Some(type_name) = lang.capture_type(cursor) {
            let type_name = state.take_type(type_name);
            state.set_return_type(type_name);
            state.expecting_return_type = false;
            return true;
        }
    }

    if !state.parameters_closed {
        return false;
    }

    match token.kind {
        TokenKind::Colon if state.symbol.return_info.type_name.is_none() => {
            state.expecting_return_type = true;
            true
        }
        TokenKind::OpenBracket if cursor.peek_is(1, TokenKind::CloseBracket) => {
            if let Some(type_name) = state.symbol.return_info.type_name.as_mut() {
                type_name.push_str("[]");
            }
            cursor.advance();
            true
        }
        TokenKind::OpenBrace | TokenKind::Semicolon | TokenKind::Arrow => {
            state.mark_done();
            true
        }
        _ => false,
    }
}

/// Parameter list of a function: `(` ... `)`
pub fn parse_parameters<L: Language + ?Sized>(
    lang: &L,
    cursor: &mut Cursor,
    state: &mut ParseState,
) -> bool {
    let Some(token) = cursor.current() else {
        return false;
    };

    if !state.symbol.is_kind(SymbolKind::Function) {
        return false;
    }

    if !state.in_parameters() {
        if token.is(TokenKind::OpenParen) && !state.parameters_closed {
            state.open_parameters();
            return true;
        }
        return false;
    }

    if state.in_default_value() {
        collect_default_value(state, token);
        return true;
    }

    match token.kind {
        TokenKind::CloseParen if state.depth == 1 => {
            state.close_parameters();
            return true;
        }
        TokenKind::Comma if state.depth == 1 => {
            state.next_parameter();
            return true;
        }
        TokenKind::Equals if state.depth == 1 => {
            state.start_default_value();
            return true;
        }
        TokenKind::OpenBrace | TokenKind::OpenBracket
            if state.depth == 1 && state.expecting_parameter && !state.expecting_parameter_type =>
        {
            for name in destructured_names(lang.grammar(), cursor) {
                state.push_parameter(Parameter::named(name));
            }
            state.destructured = true;
            state.expecting_parameter = false;
            return true;
        }
        kind if kind.is_open_group() => {
            state.depth += 1;
            return true;
        }
        kind if kind.is_close_group() => {
            state.depth -= 1;
            return true;
        }
        _ => {}
    }

    // Nested brackets belong to a type or an expression
    if state.depth > 1 {
        return true;
    }

    let grammar = lang.grammar();
    if state.expecting_parameter && grammar.nullable_sigil == Some(token.value.as_str()) {
        state.pending_nullable = grammar.nullable_sigil;
        return true;
    }

    if state.expecting_parameter && !state.expecting_parameter_type && lang.starts_type(cursor) {
        if let Some(type_name) = lang.capture_type(cursor) {
            let type_name = state.take_type(type_name);
            state.push_parameter(Parameter::typed(type_name));
            state.expecting_parameter_type = true;
            return true;
        }
    }

    if state.expecting_parameter_type {
        if lang.is_variable_name(&token.value) {
            if let Some(parameter) = state.last_parameter_mut() {
                parameter.name = token.value.clone();
            }
            state.expecting_parameter_type = false;
            state.expecting_parameter = false;
            return true;
        }
        // Multi-word types (`unsigned int`) and variadic markers (`String...`)
        if token.is_word() && lang.is_type(&token.value) {
            if let Some(type_name) = state
                .last_parameter_mut()
                .and_then(|p| p.type_name.as_mut())
            {
                type_name.push(' ');
                type_name.push_str(&token.value);
                type_name.push_str(&type_suffix(grammar, cursor));
            }
            return true;
        }
        if token.is(TokenKind::Ellipsis) {
            if let Some(type_name) = state
                .last_parameter_mut()
                .and_then(|p| p.type_name.as_mut())
            {
                type_name.push_str("...");
            }
            return true;
        }
    }

    if state.expecting_parameter
        && !state.expecting_parameter_type
        && lang.is_variable_name(&token.value)
    {
        state.push_parameter(Parameter::named(token.value.clone()));
        state.expecting_parameter = false;
        return true;
    }

    // Modifiers, reference marks and rest markers inside the list
    true
}

/// Feed one token into the default value being collected
///
/// A comma at list level ends the value; the closing parenthesis of the
/// list ends the value and the list.
pub fn collect_default_value(state: &mut ParseState, token: &Token) {
    match token.kind {
        TokenKind::Comma if state.depth == 1 => state.next_parameter(),
        TokenKind::CloseParen if state.depth == 1 => state.close_parameters(),
        kind if kind.is_open_group() => {
            state.depth += 1;
            state.push_default_token(token);
        }
        kind if kind.is_close_group() => {
            state.depth = state.depth.saturating_sub(1).max(1);
            state.push_default_token(token);
        }
        _ => state.push_default_token(token),
    }
}

/// Variable keyword, or a bare variable-shaped token where no keyword is needed
pub fn parse_variable<L: Language + ?Sized>(
    lang: &L,
    cursor: &mut Cursor,
    state: &mut ParseState,
) -> bool {
    let Some(token) = cursor.current() else {
        return false;
    };
    let grammar = lang.grammar();

    match state.symbol.kind {
        None => {
            // Statements (`return x;`, `@include m;`) declare nothing
            if grammar.is_reserved(&token.value) {
                state.mark_done();
                return true;
            }
            if grammar.matches(&token.value, Some(GrammarCategory::Variable)) {
                state.set_kind(SymbolKind::Variable);
                state.expecting_name = true;
                return true;
            }
            if grammar.nullable_sigil == Some(token.value.as_str()) {
                state.pending_nullable = grammar.nullable_sigil;
                return true;
            }
            if lang.starts_type(cursor) {
                if let Some(type_name) = lang.capture_type(cursor) {
                    let type_name = state.take_type(type_name);
                    // Multi-word types: `unsigned long count`
                    state.pending_type = Some(match state.pending_type.take() {
                        Some(previous) => format!("{} {}", previous, type_name),
                        None => type_name,
                    });
                    return true;
                }
            }
            if !grammar.variable_keyword_required && lang.is_variable_name(&token.value) {
                state.set_kind(SymbolKind::Variable);
                name_variable(state, &token.value);
                return true;
            }
            false
        }
        Some(SymbolKind::Variable) if state.expecting_name && token.is_word() => {
            name_variable(state, &token.value);
            true
        }
        _ => false,
    }
}

/// Name a variable and attach any type seen before the name
pub fn name_variable(state: &mut ParseState, name: &str) {
    state.set_name(name);
    if let Some(type_name) = state.pending_type.take() {
        state.set_return_type(type_name);
    }
    state.mark_done();
}

// =============================================================================
// Post-processing
// =============================================================================

/// Grammar-driven cleanup shared by every language
///
/// - flushes a default value left open by an unterminated list
/// - drops `(void)`-style placeholders that declare no parameter
/// - clears `@return` for void return types and constructors
pub fn finish<L: Language + ?Sized>(lang: &L, state: &mut ParseState, _settings: &Settings) {
    let grammar = lang.grammar();
    state.finish_default_value();

    state.symbol.parameters.retain(|p| {
        !(p.name.is_empty() && p.type_name.as_deref().is_some_and(|t| grammar.is_void(t)))
    });

    if !state.symbol.is_kind(SymbolKind::Function) {
        return;
    }

    let returns_void = state
        .symbol
        .return_info
        .type_name
        .as_deref()
        .is_some_and(|t| grammar.is_void(t));
    if returns_void {
        state.symbol.return_info.present = false;
        state.symbol.return_info.type_name = None;
    }

    if grammar.is_constructor(&state.symbol.name) {
        state.symbol.return_info.present = false;
    }
}
