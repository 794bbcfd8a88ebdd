use thiserror::Error;

/// Failure to turn text or a variant into a typed value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Failed to parse '{input}' as {target}")]
    Parse { input: String, target: &'static str },

    #[error("Value {value} is out of range for {target}")]
    OutOfRange { value: String, target: &'static str },

    #[error("List element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<ConversionError>,
    },
}

fn multiple_prefix(multiple: &bool) -> &'static str {
    if *multiple {
        "multiple "
    } else {
        ""
    }
}

/// Errors raised while creating or editing parameter wrappers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
    #[error("Unknown parameter: {name} of type {}{tag}", multiple_prefix(.multiple))]
    UnrecognizedParameter {
        name: String,
        tag: String,
        multiple: bool,
    },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("'{value}' is not an allowed value for '{name}' (allowed: {allowed})")]
    NotAllowed {
        name: String,
        value: String,
        allowed: String,
    },

    #[error("Enumeration parameter '{0}' declares no elements")]
    EmptyEnumeration(String),
}

#[cfg(test)]
mod tests {
    use crate::errors::*;

    #[test]
    fn test_unrecognized_parameter_message() {
        let err = BridgeError::UnrecognizedParameter {
            name: "flags".to_string(),
            tag: "boolean".to_string(),
            multiple: true,
        };
        assert_eq!(err.to_string(), "Unknown parameter: flags of type multiple boolean");

        let err = BridgeError::UnrecognizedParameter {
            name: "input".to_string(),
            tag: "image".to_string(),
            multiple: false,
        };
        assert_eq!(err.to_string(), "Unknown parameter: input of type image");
    }

    #[test]
    fn test_conversion_passes_through_unchanged() {
        let inner = ConversionError::Parse {
            input: "abc".to_string(),
            target: "integer",
        };
        let err = BridgeError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(err, BridgeError::Conversion(inner));
    }
}
