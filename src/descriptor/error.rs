//! Wire decode errors and the fallback-carrying decode result.
//!
//! Decode failures are always returned to the caller, never swallowed.
//! Enumeration codecs alone pair a usable default with the error (see
//! [`Decoded`]); every other codec fails closed.

use std::fmt;

use thiserror::Error;

/// Errors produced while decoding descriptor wire JSON.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WireError {
    /// Wire bytes have the wrong JSON shape for the target type.
    #[error("{what} must be {expected}; got `{got}`")]
    MalformedShape {
        what: &'static str,
        expected: &'static str,
        got: String,
    },

    /// A string in neither the canonical nor the legacy-alias table.
    #[error("unrecognized {what} `{raw}`")]
    UnrecognizedValue { what: &'static str, raw: String },

    /// A required key is absent from the wire object.
    #[error("invalid {what}; must include a `{field}`")]
    MissingField {
        what: &'static str,
        field: &'static str,
    },

    /// No known polymorphic shape matches the payload.
    #[error("unrecognized {what} variant")]
    UnrecognizedVariant { what: &'static str },

    /// The wire object carries keys the schema does not bind.
    #[error("unknown {what} fields: {}", .fields.join(", "))]
    UnknownFields {
        what: &'static str,
        fields: Vec<String>,
    },

    /// Underlying JSON syntax or type failure.
    #[error("json decode failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Several ordered decode attempts all failed.
    #[error(transparent)]
    Multi(#[from] MultiError),
}

/// Ordered aggregate of failures from a multi-attempt decode.
///
/// Attempts are listed in the order they were tried, so the first entry is
/// always the preferred wire shape's failure.
#[derive(Debug)]
pub struct MultiError {
    context: &'static str,
    attempts: Vec<WireError>,
}

impl MultiError {
    pub(crate) fn new(context: &'static str, attempts: Vec<WireError>) -> Self {
        Self { context, attempts }
    }

    /// The failed attempts, in attempt order.
    pub fn attempts(&self) -> &[WireError] {
        &self.attempts
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.context)?;
        for (i, err) in self.attempts.iter().enumerate() {
            write!(f, "; [{}] {}", i + 1, err)?;
        }
        Ok(())
    }
}

impl std::error::Error for MultiError {}

/// Decode outcome that always carries a usable value.
///
/// Enumeration decoders tolerate forward/backward version skew in persisted
/// state by substituting the type's sentinel or default and reporting what
/// was wrong. Best-effort callers may read `value` and ignore `error`;
/// strict callers must inspect `error` before trusting the payload.
#[derive(Debug)]
pub struct Decoded<T> {
    pub value: T,
    pub error: Option<WireError>,
}

impl<T> Decoded<T> {
    pub(crate) fn clean(value: T) -> Self {
        Self { value, error: None }
    }

    pub(crate) fn flawed(value: T, error: WireError) -> Self {
        Self {
            value,
            error: Some(error),
        }
    }

    /// True when the input decoded without any reported flaw.
    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }

    /// Discard the fallback value and fail if the input was flawed.
    pub fn into_result(self) -> Result<T, WireError> {
        match self.error {
            None => Ok(self.value),
            Some(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_error_lists_attempts_in_order() {
        let err = MultiError::new(
            "could not decode thing in any supported way",
            vec![
                WireError::UnrecognizedValue {
                    what: "thing",
                    raw: "x".to_string(),
                },
                WireError::MissingField {
                    what: "thing",
                    field: "name",
                },
            ],
        );
        let text = err.to_string();
        assert!(text.starts_with("could not decode thing"));
        assert!(text.contains("[1] unrecognized thing `x`"));
        assert!(text.contains("[2] invalid thing; must include a `name`"));
    }

    #[test]
    fn decoded_into_result_keeps_flaw() {
        let clean = Decoded::clean(7u32);
        assert!(clean.is_clean());
        assert_eq!(clean.into_result().unwrap(), 7);

        let flawed = Decoded::flawed(
            0u32,
            WireError::UnrecognizedValue {
                what: "thing",
                raw: "x".to_string(),
            },
        );
        assert!(!flawed.is_clean());
        assert!(flawed.into_result().is_err());
    }
}
