//! Loosely typed value exchanged with UI controls

use serde::{Deserialize, Serialize};
use std::fmt;

/// The value a control holds. Controls for list parameters hold text, which
/// the converters split on the list delimiter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Variant {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    List(Vec<String>),
    #[default]
    Null,
}

impl Variant {
    /// Text form used by the text conversion path
    pub fn to_text(&self) -> String {
        match self {
            Variant::Null => String::new(),
            Variant::Bool(b) => b.to_string(),
            Variant::Int(i) => i.to_string(),
            Variant::Double(d) => d.to_string(),
            Variant::String(s) => s.clone(),
            Variant::List(items) => items.join(","),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Variant::Null)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<bool> for Variant {
    fn from(value: bool) -> Self {
        Variant::Bool(value)
    }
}

impl From<i32> for Variant {
    fn from(value: i32) -> Self {
        Variant::Int(i64::from(value))
    }
}

impl From<i64> for Variant {
    fn from(value: i64) -> Self {
        Variant::Int(value)
    }
}

impl From<f32> for Variant {
    fn from(value: f32) -> Self {
        Variant::Double(f64::from(value))
    }
}

impl From<f64> for Variant {
    fn from(value: f64) -> Self {
        Variant::Double(value)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::String(value.to_string())
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Variant::String(value)
    }
}

impl From<Vec<String>> for Variant {
    fn from(value: Vec<String>) -> Self {
        Variant::List(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::variant::*;

    #[test]
    fn test_text_forms() {
        assert_eq!(Variant::Null.to_text(), "");
        assert_eq!(Variant::from(true).to_text(), "true");
        assert_eq!(Variant::from(42).to_text(), "42");
        assert_eq!(Variant::from(2.5).to_text(), "2.5");
        assert_eq!(
            Variant::from(vec!["a".to_string(), "b".to_string()]).to_text(),
            "a,b"
        );
    }

    #[test]
    fn test_json_shape_is_untagged() {
        let parsed: Result<Vec<Variant>, _> = serde_json::from_str(r#"[true, 3, 1.5, "x", null]"#);
        assert!(parsed.is_ok_and(|v| v
            == vec![
                Variant::Bool(true),
                Variant::Int(3),
                Variant::Double(1.5),
                Variant::String("x".to_string()),
                Variant::Null,
            ]));
    }
}
