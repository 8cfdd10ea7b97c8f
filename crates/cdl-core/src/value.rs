//! Numeric extraction from document text fragments.
//!
//! SOP parameters arrive as whitespace-delimited decimal tuples inside
//! element text (`<Slope>0.9491 0.9552 0.9853</Slope>`). Conversion follows
//! a deliberately lenient field-level policy: a token that fails to parse is
//! kept verbatim as text at its position and the failure is logged, so one
//! bad channel never discards the rest of the tuple. Scalar fields
//! (`Saturation`) convert as a whole and fail hard.

use std::fmt;

use serde::Serialize;
use tracing::error;

use crate::{CdlError, CdlResult};

/// One value extracted from a document text fragment.
///
/// Numeric tokens become [`Value::Num`]; tokens that do not convert keep
/// their original spelling as [`Value::Text`]. Serializes untagged, so JSON
/// output carries plain numbers for the common case.
///
/// # Example
///
/// ```rust
/// use cdl_core::value::{split_values, Value};
///
/// let values = split_values("0.9491 n/a 0.9853");
/// assert_eq!(values[0], Value::Num(0.9491));
/// assert_eq!(values[1], Value::Text("n/a".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Successfully converted floating-point token.
    Num(f32),
    /// Token retained verbatim after a failed conversion.
    Text(String),
}

impl Value {
    /// Returns the numeric value, or `None` for retained text.
    #[inline]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Num(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Returns `true` if the token converted to a number.
    #[inline]
    pub fn is_num(&self) -> bool {
        matches!(self, Self::Num(_))
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Num(n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Text(t) => f.write_str(t),
        }
    }
}

/// An ordered channel triple (R, G, B), always exactly three values.
pub type Triple = [Value; 3];

/// Builds an all-numeric [`Triple`].
#[inline]
pub fn num_triple(values: [f32; 3]) -> Triple {
    values.map(Value::Num)
}

/// Splits a text fragment on single-space separators into [`Value`]s.
///
/// Each token is attempted as a float; failures are logged at error level
/// and the token is kept as text at its position. The sequence is never
/// shortened and never fails as a whole.
pub fn split_values(text: &str) -> Vec<Value> {
    text.split(' ')
        .map(|token| match token.parse::<f32>() {
            Ok(n) => Value::Num(n),
            Err(_) => {
                error!(token, "error processing number for parameter");
                Value::Text(token.to_string())
            }
        })
        .collect()
}

/// Converts a text fragment into a channel [`Triple`].
///
/// The fragment is trimmed and split per [`split_values`]; anything other
/// than exactly three tokens is an error ([`CdlError::Tuple`]), since a
/// constructed triple is always length 3.
pub fn triple_from_text(text: &str) -> CdlResult<Triple> {
    let values = split_values(text.trim());
    let got = values.len();
    <[Value; 3]>::try_from(values).map_err(|_| CdlError::Tuple { expected: 3, got })
}

/// Converts a whole text fragment into a single float.
///
/// Unlike tuple extraction there is no per-token tolerance here; a fragment
/// that is not a number is a [`CdlError::Conversion`] error.
pub fn float_from_text(text: &str) -> CdlResult<f32> {
    let trimmed = text.trim();
    trimmed
        .parse()
        .map_err(|_| CdlError::Conversion(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_all_numeric() {
        let values = split_values("0.9491 0.9552 0.9853");
        assert_eq!(values.len(), 3);
        assert_eq!(values[0], Value::Num(0.9491));
        assert_eq!(values[1], Value::Num(0.9552));
        assert_eq!(values[2], Value::Num(0.9853));
    }

    #[test]
    fn split_keeps_bad_token_in_place() {
        let values = split_values("1.2 foo 0.9");
        assert_eq!(values[0], Value::Num(1.2));
        assert_eq!(values[1], Value::Text("foo".to_string()));
        assert_eq!(values[2], Value::Num(0.9));
    }

    #[test]
    fn triple_requires_three_tokens() {
        assert!(triple_from_text("1.0 1.0 1.0").is_ok());
        let err = triple_from_text("1.0 1.0").unwrap_err();
        assert!(matches!(err, CdlError::Tuple { expected: 3, got: 2 }));
        let err = triple_from_text("1 2 3 4").unwrap_err();
        assert!(matches!(err, CdlError::Tuple { expected: 3, got: 4 }));
    }

    #[test]
    fn triple_trims_surrounding_whitespace() {
        let triple = triple_from_text("  0.5 0.6 0.7 ").unwrap();
        assert_eq!(triple, num_triple([0.5, 0.6, 0.7]));
    }

    #[test]
    fn float_conversion() {
        assert_eq!(float_from_text(" 0.75 ").unwrap(), 0.75);
        let err = float_from_text("fast").unwrap_err();
        assert!(matches!(err, CdlError::Conversion(_)));
        assert!(err.to_string().contains("fast"));
    }

    #[test]
    fn value_display_roundtrips_text() {
        assert_eq!(Value::Num(0.9491).to_string(), "0.9491");
        assert_eq!(Value::Text("n/a".to_string()).to_string(), "n/a");
    }
}
