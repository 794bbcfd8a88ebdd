//! Parsed form of a parameter's type tag
//!
//! Tags are the element names used in CLI module descriptions: a base type,
//! optionally suffixed with `-vector` or `-enumeration`. Only the five base
//! types the bridge can wrap are represented; any other tag (`image`,
//! `geometry`, `file`, ...) does not parse.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseType {
    Integer,
    Float,
    Double,
    Boolean,
    String,
}

impl BaseType {
    pub const ALL: [BaseType; 5] = [
        BaseType::Integer,
        BaseType::Float,
        BaseType::Double,
        BaseType::Boolean,
        BaseType::String,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BaseType::Integer => "integer",
            BaseType::Float => "float",
            BaseType::Double => "double",
            BaseType::Boolean => "boolean",
            BaseType::String => "string",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        BaseType::ALL.into_iter().find(|b| b.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagShape {
    Scalar,
    Vector,
    Enumeration,
}

impl TagShape {
    pub const ALL: [TagShape; 3] = [TagShape::Scalar, TagShape::Vector, TagShape::Enumeration];

    fn suffix(&self) -> &'static str {
        match self {
            TagShape::Scalar => "",
            TagShape::Vector => "-vector",
            TagShape::Enumeration => "-enumeration",
        }
    }
}

/// A type tag split into base type and shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterKind {
    pub base: BaseType,
    pub shape: TagShape,
}

impl ParameterKind {
    pub const fn new(base: BaseType, shape: TagShape) -> Self {
        Self { base, shape }
    }

    /// Parse a tag such as `double-vector`. Matching is exact and
    /// case-sensitive, like the host's own tag comparison.
    pub fn parse(tag: &str) -> Option<Self> {
        let (base, shape) = if let Some(base) = tag.strip_suffix("-vector") {
            (base, TagShape::Vector)
        } else if let Some(base) = tag.strip_suffix("-enumeration") {
            (base, TagShape::Enumeration)
        } else {
            (tag, TagShape::Scalar)
        };
        BaseType::parse(base).map(|base| Self { base, shape })
    }

    /// Every base/shape combination, in a stable order
    pub fn all() -> impl Iterator<Item = ParameterKind> {
        BaseType::ALL.into_iter().flat_map(|base| {
            TagShape::ALL
                .into_iter()
                .map(move |shape| ParameterKind { base, shape })
        })
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base.as_str(), self.shape.suffix())
    }
}
