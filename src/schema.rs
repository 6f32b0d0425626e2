//! Symbol record produced by parsing one declaration line

use serde::{Deserialize, Serialize};

/// Declaration category of a parsed line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Class,
    Function,
    Variable,
}

impl SymbolKind {
    /// Whether a symbol of this kind documents a return value unless told otherwise
    pub fn returns_by_default(&self) -> bool {
        !matches!(self, Self::Variable)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Function => "function",
            Self::Variable => "variable",
        }
    }
}

/// One entry of a function's parameter list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name, empty until the name token is seen
    pub name: String,

    /// Default value source text, empty when none was declared
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,

    /// Declared type, if the line carried one
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl Parameter {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn typed(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Default::default()
        }
    }
}

/// Return (or variable) type information
///
/// For variables `present` is always false; a captured variable type is
/// still kept in `type_name` so the `@var` row can show it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnInfo {
    pub present: bool,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

/// Normalized summary of one declaration line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,

    /// `None` when no declaration was recognized
    pub kind: Option<SymbolKind>,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(rename = "return", default)]
    pub return_info: ReturnInfo,
}

impl Symbol {
    /// Set the kind once. Later attempts are ignored and return false.
    pub fn set_kind(&mut self, kind: SymbolKind) -> bool {
        if self.kind.is_some() {
            return false;
        }
        self.kind = Some(kind);
        self.return_info.present = kind.returns_by_default();
        true
    }

    /// Set the name once. Later attempts are ignored and return false.
    pub fn set_name(&mut self, name: &str) -> bool {
        if !self.name.is_empty() || name.is_empty() {
            return false;
        }
        self.name = name.to_string();
        true
    }

    pub fn is_kind(&self, kind: SymbolKind) -> bool {
        self.kind == Some(kind)
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    /// Every captured type string: parameters first, then the return/variable type
    pub fn types_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.parameters
            .iter_mut()
            .filter_map(|p| p.type_name.as_mut())
            .chain(self.return_info.type_name.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_set_once() {
        let mut symbol = Symbol::default();
        assert!(symbol.set_kind(SymbolKind::Function));
        assert!(!symbol.set_kind(SymbolKind::Class));
        assert_eq!(symbol.kind, Some(SymbolKind::Function));
        assert!(symbol.return_info.present);
    }

    #[test]
    fn test_variable_kind_has_no_return() {
        let mut symbol = Symbol::default();
        symbol.set_kind(SymbolKind::Variable);
        assert!(!symbol.return_info.present);
    }

    #[test]
    fn test_name_is_set_once() {
        let mut symbol = Symbol::default();
        assert!(!symbol.set_name(""));
        assert!(symbol.set_name("foo"));
        assert!(!symbol.set_name("bar"));
        assert_eq!(symbol.name, "foo");
    }

    #[test]
    fn test_json_field_names() {
        let mut symbol = Symbol::default();
        symbol.set_kind(SymbolKind::Function);
        symbol.set_name("foo");
        symbol.parameters.push(Parameter::typed("int"));
        symbol.return_info.type_name = Some("string".to_string());

        let json = serde_json::to_value(&symbol).unwrap();
        assert_eq!(json["kind"], "function");
        assert_eq!(json["parameters"][0]["type"], "int");
        assert_eq!(json["return"]["present"], true);
        assert_eq!(json["return"]["type"], "string");
    }
}
