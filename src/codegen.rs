//! Text-building helpers shared by every macro.
//!
//! All literal text that ends up inside emitted code (property names, error
//! messages, serialized constants) goes through [`quote`] or [`literal`], so
//! the escaping rules live in one place.

use serde_json::Value;

/// Quote `text` as a double-quoted string literal.
///
/// Uses JSON string rules, which are a subset of what JavaScript accepts:
/// quotes, backslashes and control characters are escaped.
pub fn quote(text: &str) -> String {
    Value::String(text.to_owned()).to_string()
}

/// Serialize a literal value (number, boolean, string, array, object, null).
pub fn literal(value: &Value) -> String {
    value.to_string()
}

/// Property key of an emitted assignment or definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Fixed property name, emitted quoted.
    Literal(String),
    /// Code evaluating to the property name at run time, emitted as-is.
    Expression(String),
}

impl Key {
    /// Marks a directive key argument as an expression.
    pub const SIGIL: char = '@';

    /// Read a key argument: `@expr` is an expression, anything else a name.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(Self::SIGIL) {
            Some(code) => Key::Expression(code.to_string()),
            None => Key::Literal(raw.to_string()),
        }
    }

    /// Text placed between the brackets / after the object in emitted code.
    pub fn render(&self) -> String {
        match self {
            Key::Literal(name) => quote(name),
            Key::Expression(code) => code.clone(),
        }
    }

    /// Human readable name used in emitted error messages.
    pub fn describe(&self) -> &str {
        match self {
            Key::Literal(name) | Key::Expression(name) => name,
        }
    }
}

impl From<&str> for Key {
    fn from(raw: &str) -> Self {
        Key::parse(raw)
    }
}
