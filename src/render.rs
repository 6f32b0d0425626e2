//! Docblock renderer
//!
//! Turns a `Symbol` into a documentation comment with tab-stop placeholders
//! in the `${N:text}` snippet syntax. Placeholders are numbered from 1 in
//! emission order, which is the order the editor cycles through them.
//!
//! Rendering rules:
//! - Description line first, seeded with `[<name> description]`
//! - One `@param` row per parameter of a function
//! - A `@return` row when the symbol documents a return value
//! - A variable row (`@var`, `@type`) when the language uses one
//! - Tag, type and name columns are aligned; widths are measured on the
//!   visible text so the block stays aligned once placeholders expand

use tracing::debug;

use crate::config::Settings;
use crate::detectors::grammar::Grammar;
use crate::schema::{Symbol, SymbolKind};

const PARAM_TAG: &str = "@param";
const RETURN_TAG: &str = "@return";
const UNKNOWN_TYPE: &str = "[type]";

// ============================================================================
// Fields
// ============================================================================

/// One piece of rendered text in both of its forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Snippet syntax, with placeholders and escapes
    pub snippet: String,
    /// What the user sees before editing
    pub display: String,
}

impl Field {
    pub fn literal(text: &str) -> Self {
        Self {
            snippet: escape_literal(text),
            display: text.to_string(),
        }
    }

    fn spaces(count: usize) -> Self {
        Self::literal(&" ".repeat(count))
    }

    /// Visible width in characters
    pub fn width(&self) -> usize {
        self.display.chars().count()
    }

    /// Surround the field with literal text (`{` and `}` for typed tags)
    fn wrapped(self, open: &str, close: &str) -> Self {
        Self {
            snippet: format!("{}{}{}", escape_literal(open), self.snippet, escape_literal(close)),
            display: format!("{}{}{}", open, self.display, close),
        }
    }
}

/// Hands out sequentially numbered placeholders
#[derive(Debug)]
struct Placeholders {
    next: usize,
}

impl Placeholders {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn field(&mut self, text: &str) -> Field {
        let index = self.next;
        self.next += 1;
        Field {
            snippet: format!("${{{}:{}}}", index, escape_placeholder(text)),
            display: text.to_string(),
        }
    }

    fn count(&self) -> usize {
        self.next - 1
    }
}

/// Escape text placed inside a `${N:...}` placeholder
pub fn escape_placeholder(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '$' | '}') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escape literal snippet text
pub fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '$') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Convert a rendered snippet into the text shown before any tab-stop is edited
///
/// Placeholders are replaced by their default text and escapes are removed.
pub fn strip_placeholders(snippet: &str) -> String {
    let mut text = String::with_capacity(snippet.len());
    let mut chars = snippet.chars().peekable();
    let mut depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    text.push(escaped);
                }
            }
            '$' if chars.peek() == Some(&'{') => {
                chars.next();
                while chars.next_if(|c| c.is_ascii_digit()).is_some() {}
                chars.next_if_eq(&':');
                depth += 1;
            }
            '}' if depth > 0 => depth -= 1,
            _ => text.push(c),
        }
    }

    text
}

// ============================================================================
// Docblock
// ============================================================================

/// A rendered documentation comment
#[derive(Debug, Clone)]
pub struct Docblock {
    lines: Vec<Vec<Field>>,
    eol: &'static str,
    placeholders: usize,
}

impl Docblock {
    /// Snippet text with `${N:...}` tab-stops
    pub fn snippet(&self) -> String {
        self.join(|field| field.snippet.as_str())
    }

    /// Plain text as displayed before editing
    pub fn text(&self) -> String {
        self.join(|field| field.display.as_str())
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn join<'a>(&'a self, part: impl Fn(&'a Field) -> &'a str) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(&part).collect::<String>())
            .collect::<Vec<_>>()
            .join(self.eol)
    }
}

/// Tag rows before alignment
struct TagRow {
    tag: String,
    type_field: Option<Field>,
    name: Option<Field>,
    description: Option<Field>,
}

// ============================================================================
// Rendering
// ============================================================================

/// Render a symbol as a documentation comment for a grammar
pub fn render(symbol: &Symbol, grammar: &Grammar, settings: &Settings) -> Docblock {
    let mut placeholders = Placeholders::new();

    let summary = if symbol.has_name() {
        format!("[{} description]", symbol.name)
    } else {
        "[description]".to_string()
    };
    let description = placeholders.field(&summary);

    let mut sections: Vec<Vec<TagRow>> = Vec::new();

    if symbol.is_kind(SymbolKind::Function) && !symbol.parameters.is_empty() {
        let rows = symbol
            .parameters
            .iter()
            .map(|parameter| TagRow {
                tag: PARAM_TAG.to_string(),
                type_field: Some(type_field(
                    &mut placeholders,
                    grammar,
                    parameter.type_name.as_deref(),
                )),
                name: Some(Field::literal(&parameter.name)),
                description: Some(
                    placeholders.field(&format!("[{} description]", parameter.name)),
                ),
            })
            .collect();
        sections.push(rows);
    }

    let documents_return = symbol.return_info.present
        && settings.default_return_tag
        && symbol.kind.is_some_and(|kind| kind != SymbolKind::Variable);
    if documents_return {
        sections.push(vec![TagRow {
            tag: RETURN_TAG.to_string(),
            type_field: Some(type_field(
                &mut placeholders,
                grammar,
                symbol.return_info.type_name.as_deref(),
            )),
            name: None,
            description: Some(placeholders.field("[return description]")),
        }]);
    }

    if symbol.is_kind(SymbolKind::Variable) {
        if let Some(tag) = grammar.variable_tag {
            sections.push(vec![TagRow {
                tag: tag.to_string(),
                type_field: Some(type_field(
                    &mut placeholders,
                    grammar,
                    symbol.return_info.type_name.as_deref(),
                )),
                name: None,
                description: None,
            }]);
        }
    }

    let body = layout(description, sections, settings.column_spacing);
    let delimiters = settings.comment_for(grammar);

    let mut lines = Vec::with_capacity(body.len() + 2);
    if !delimiters.open.is_empty() {
        lines.push(vec![Field::literal(&delimiters.open)]);
    }
    for content in body {
        if content.is_empty() {
            lines.push(vec![Field::literal(delimiters.prefix.trim_end())]);
        } else {
            let mut line = vec![Field::literal(&delimiters.prefix)];
            line.extend(content);
            lines.push(line);
        }
    }
    if !delimiters.close.is_empty() {
        lines.push(vec![Field::literal(&delimiters.close)]);
    }

    debug!(
        name = symbol.name.as_str(),
        lines = lines.len(),
        placeholders = placeholders.count(),
        "Rendered docblock"
    );

    Docblock {
        lines,
        eol: settings.eol_for(grammar),
        placeholders: placeholders.count(),
    }
}

/// Type column: the captured type or `[type]`, braced where the language wants it
fn type_field(placeholders: &mut Placeholders, grammar: &Grammar, captured: Option<&str>) -> Field {
    let field = placeholders.field(captured.unwrap_or(UNKNOWN_TYPE));
    if grammar.type_braces {
        field.wrapped("{", "}")
    } else {
        field
    }
}

/// Body lines: description, then each section after a blank separator,
/// with tag, type and name columns padded to a common width
fn layout(description: Field, sections: Vec<Vec<TagRow>>, spacing: usize) -> Vec<Vec<Field>> {
    let rows = || sections.iter().flatten();
    let tag_width = rows().map(|r| r.tag.chars().count()).max().unwrap_or(0);
    let type_width = rows()
        .filter(|r| r.name.is_some())
        .filter_map(|r| r.type_field.as_ref().map(Field::width))
        .max()
        .unwrap_or(0);
    let name_width = rows()
        .filter_map(|r| r.name.as_ref().map(Field::width))
        .max()
        .unwrap_or(0);

    let mut lines = vec![vec![description]];
    for section in sections {
        lines.push(Vec::new());
        for row in section {
            let mut line = Vec::new();
            let has_more = row.type_field.is_some() || row.description.is_some();
            line.push(Field::literal(&row.tag));
            if has_more {
                line.push(Field::spaces(tag_width - row.tag.chars().count() + spacing));
            }

            let aligned = row.name.is_some();
            if let Some(type_field) = row.type_field {
                let width = type_field.width();
                line.push(type_field);
                if row.name.is_some() || row.description.is_some() {
                    let column = if aligned { type_width } else { width };
                    line.push(Field::spaces(column - width + spacing));
                }
            }
            if let Some(name) = row.name {
                let width = name.width();
                line.push(name);
                if row.description.is_some() {
                    line.push(Field::spaces(name_width - width + spacing));
                }
            }
            if let Some(description) = row.description {
                line.push(description);
            }
            lines.push(line);
        }
    }
    lines
}
