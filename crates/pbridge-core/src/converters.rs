//! Text and variant to typed value conversion
//!
//! Each supported value type implements [`Convert`]. Scalars parse the text
//! form of a value; lists split on [`LIST_DELIMITER`] and convert every field
//! with the element converter, left to right.
//!
//! The boolean converter is total: `"true"`, `"True"` and `"1"` are true and
//! every other input is false. Numeric converters reject malformed input.

use crate::errors::ConversionError;
use crate::variant::Variant;
use std::str::FromStr;

/// Separator between list elements in text form
pub const LIST_DELIMITER: char = ',';

/// Conversion into a strongly typed parameter value
pub trait Convert: Sized {
    /// Name of the target type used in error messages
    const TARGET: &'static str;

    fn from_text(text: &str) -> Result<Self, ConversionError>;

    fn from_variant(value: &Variant) -> Result<Self, ConversionError>;

    /// Text form that converts back to `self`
    fn to_text(&self) -> String;

    /// Variant a control should hold for this value
    fn to_variant(&self) -> Variant;
}

/// Convert text into `T`
pub fn convert_text<T: Convert>(text: &str) -> Result<T, ConversionError> {
    T::from_text(text)
}

/// Convert a variant into `T`
pub fn convert_variant<T: Convert>(value: &Variant) -> Result<T, ConversionError> {
    T::from_variant(value)
}

fn parse_number<T: FromStr>(text: &str, target: &'static str) -> Result<T, ConversionError> {
    text.trim().parse().map_err(|_| ConversionError::Parse {
        input: text.to_string(),
        target,
    })
}

/// Parse a floating point value, reporting overflow to infinity as a range
/// error. Literal `inf` and `nan` spellings are kept.
fn parse_float<T: FromStr>(
    text: &str,
    target: &'static str,
    is_finite: fn(&T) -> bool,
) -> Result<T, ConversionError> {
    let value: T = parse_number(text, target)?;
    let trimmed = text.trim().trim_start_matches(['+', '-']).to_ascii_lowercase();
    let literal = trimmed.starts_with("inf") || trimmed == "nan";
    if !literal && !is_finite(&value) {
        return Err(ConversionError::OutOfRange {
            value: text.trim().to_string(),
            target,
        });
    }
    Ok(value)
}

impl Convert for i32 {
    const TARGET: &'static str = "integer";

    fn from_text(text: &str) -> Result<Self, ConversionError> {
        // Parse wide first so overflow is reported as a range error
        let wide: i64 = parse_number(text, Self::TARGET)?;
        i32::try_from(wide).map_err(|_| ConversionError::OutOfRange {
            value: text.trim().to_string(),
            target: Self::TARGET,
        })
    }

    fn from_variant(value: &Variant) -> Result<Self, ConversionError> {
        match value {
            Variant::Int(i) => i32::try_from(*i).map_err(|_| ConversionError::OutOfRange {
                value: i.to_string(),
                target: Self::TARGET,
            }),
            Variant::Double(d) => {
                if !d.is_finite() {
                    return Err(ConversionError::Parse {
                        input: d.to_string(),
                        target: Self::TARGET,
                    });
                }
                let rounded = d.round();
                if rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
                    return Err(ConversionError::OutOfRange {
                        value: d.to_string(),
                        target: Self::TARGET,
                    });
                }
                Ok(rounded as i32)
            }
            Variant::Bool(b) => Ok(i32::from(*b)),
            other => Self::from_text(&other.to_text()),
        }
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn to_variant(&self) -> Variant {
        Variant::from(*self)
    }
}

impl Convert for f32 {
    const TARGET: &'static str = "float";

    fn from_text(text: &str) -> Result<Self, ConversionError> {
        parse_float(text, Self::TARGET, |v: &f32| v.is_finite())
    }

    fn from_variant(value: &Variant) -> Result<Self, ConversionError> {
        match value {
            Variant::Int(i) => Ok(*i as f32),
            Variant::Double(d) => {
                let narrowed = *d as f32;
                if d.is_finite() && !narrowed.is_finite() {
                    return Err(ConversionError::OutOfRange {
                        value: d.to_string(),
                        target: Self::TARGET,
                    });
                }
                Ok(narrowed)
            }
            Variant::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            other => Self::from_text(&other.to_text()),
        }
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn to_variant(&self) -> Variant {
        Variant::from(*self)
    }
}

impl Convert for f64 {
    const TARGET: &'static str = "double";

    fn from_text(text: &str) -> Result<Self, ConversionError> {
        parse_float(text, Self::TARGET, |v: &f64| v.is_finite())
    }

    fn from_variant(value: &Variant) -> Result<Self, ConversionError> {
        match value {
            Variant::Int(i) => Ok(*i as f64),
            Variant::Double(d) => Ok(*d),
            Variant::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            other => Self::from_text(&other.to_text()),
        }
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn to_variant(&self) -> Variant {
        Variant::from(*self)
    }
}

impl Convert for bool {
    const TARGET: &'static str = "boolean";

    fn from_text(text: &str) -> Result<Self, ConversionError> {
        Ok(matches!(text, "true" | "True" | "1"))
    }

    fn from_variant(value: &Variant) -> Result<Self, ConversionError> {
        match value {
            Variant::Bool(b) => Ok(*b),
            Variant::Int(i) => Ok(*i != 0),
            Variant::Double(d) => Ok(*d != 0.0),
            other => Self::from_text(&other.to_text()),
        }
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn to_variant(&self) -> Variant {
        Variant::from(*self)
    }
}

impl Convert for String {
    const TARGET: &'static str = "string";

    fn from_text(text: &str) -> Result<Self, ConversionError> {
        Ok(text.to_string())
    }

    fn from_variant(value: &Variant) -> Result<Self, ConversionError> {
        Ok(value.to_text())
    }

    fn to_text(&self) -> String {
        self.clone()
    }

    fn to_variant(&self) -> Variant {
        Variant::String(self.clone())
    }
}

impl<T: Convert> Convert for Vec<T> {
    const TARGET: &'static str = "list";

    fn from_text(text: &str) -> Result<Self, ConversionError> {
        text.split(LIST_DELIMITER)
            .enumerate()
            .map(|(index, field)| {
                T::from_text(field).map_err(|e| ConversionError::Element {
                    index,
                    source: Box::new(e),
                })
            })
            .collect()
    }

    // Lists are edited as text, so every variant goes through its text form
    fn from_variant(value: &Variant) -> Result<Self, ConversionError> {
        Self::from_text(&value.to_text())
    }

    fn to_text(&self) -> String {
        self.iter()
            .map(Convert::to_text)
            .collect::<Vec<_>>()
            .join(&LIST_DELIMITER.to_string())
    }

    fn to_variant(&self) -> Variant {
        Variant::String(self.to_text())
    }
}
