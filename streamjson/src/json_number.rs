// SPDX-License-Identifier: Apache-2.0

use core::fmt;

use crate::ParseError;

/// A decoded JSON number.
///
/// Spans without a fractional part or exponent become [`Number::Integer`];
/// everything else, and integers that overflow `i64`, become
/// [`Number::Float`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Validate and convert the accumulated numeric span.
    pub fn from_span(span: &str) -> Result<Number, ParseError> {
        validate(span.as_bytes())?;
        if is_integer(span.as_bytes()) {
            match from_ascii_i64(span.as_bytes()) {
                Ok(val) => return Ok(Number::Integer(val)),
                Err(IntegerError::Overflow) => {
                    log::debug!("integer {span} overflows i64, decoding as float");
                }
                Err(IntegerError::InvalidDigit) => return Err(ParseError::InvalidNumberFormat),
            }
        }
        match span.parse::<f64>() {
            Ok(val) if val.is_finite() => Ok(Number::Float(val)),
            _ => Err(ParseError::InvalidNumberFormat),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(val) => Some(*val),
            Number::Float(_) => None,
        }
    }

    /// Integers convert losslessly up to 2^53.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(val) => *val as f64,
            Number::Float(val) => *val,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        !self.is_integer()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(val) => write!(f, "{val}"),
            // Debug keeps a fraction or exponent so the text decodes as a float again
            Number::Float(val) if val.is_finite() => write!(f, "{val:?}"),
            Number::Float(_) => f.write_str("null"),
        }
    }
}

impl From<i64> for Number {
    fn from(val: i64) -> Self {
        Number::Integer(val)
    }
}

impl From<f64> for Number {
    fn from(val: f64) -> Self {
        Number::Float(val)
    }
}

/// Detects if a number byte slice represents an integer (no decimal point or exponent).
pub fn is_integer(bytes: &[u8]) -> bool {
    !bytes.iter().any(|&b| b == b'.' || b == b'e' || b == b'E')
}

#[derive(Debug, Clone, Copy)]
enum Num {
    Start,
    Sign,
    LeadingZero,
    BeforeDecimalPoint,
    Decimal,
    AfterDecimalPoint,
    Exponent,
    ExponentSign,
    AfterExponent,
}

/// Check `bytes` against `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
pub fn validate(bytes: &[u8]) -> Result<(), ParseError> {
    let mut state = Num::Start;
    for &b in bytes {
        state = match (state, b) {
            (Num::Start, b'-') => Num::Sign,
            (Num::Start | Num::Sign, b'0') => Num::LeadingZero,
            (Num::Start | Num::Sign, b'1'..=b'9') => Num::BeforeDecimalPoint,
            (Num::BeforeDecimalPoint, b'0'..=b'9') => Num::BeforeDecimalPoint,
            (Num::LeadingZero | Num::BeforeDecimalPoint, b'.') => Num::Decimal,
            (Num::Decimal | Num::AfterDecimalPoint, b'0'..=b'9') => Num::AfterDecimalPoint,
            (
                Num::LeadingZero | Num::BeforeDecimalPoint | Num::AfterDecimalPoint,
                b'e' | b'E',
            ) => Num::Exponent,
            (Num::Exponent, b'+' | b'-') => Num::ExponentSign,
            (Num::Exponent | Num::ExponentSign | Num::AfterExponent, b'0'..=b'9') => {
                Num::AfterExponent
            }
            _ => return Err(ParseError::InvalidNumberFormat),
        };
    }
    match state {
        Num::LeadingZero | Num::BeforeDecimalPoint | Num::AfterDecimalPoint | Num::AfterExponent => {
            Ok(())
        }
        _ => Err(ParseError::InvalidNumberFormat),
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum IntegerError {
    InvalidDigit,
    Overflow,
}

/// Panic-free base-10 parse of an already validated integer span.
/// Building the number negatively from the start correctly handles i64::MIN.
fn from_ascii_i64(src: &[u8]) -> Result<i64, IntegerError> {
    let (is_negative, digits) = match src {
        [b'-', rest @ ..] => (true, rest),
        _ => (false, src),
    };
    if digits.is_empty() {
        return Err(IntegerError::InvalidDigit);
    }

    let mut result: i64 = 0;
    for &byte in digits {
        let digit = match byte {
            b'0'..=b'9' => i64::from(byte - b'0'),
            _ => return Err(IntegerError::InvalidDigit),
        };
        result = result.checked_mul(10).ok_or(IntegerError::Overflow)?;
        result = if is_negative {
            result.checked_sub(digit)
        } else {
            result.checked_add(digit)
        }
        .ok_or(IntegerError::Overflow)?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(Number::from_span("0"), Ok(Number::Integer(0)));
        assert_eq!(Number::from_span("123"), Ok(Number::Integer(123)));
        assert_eq!(Number::from_span("-1"), Ok(Number::Integer(-1)));
        assert_eq!(Number::from_span("-0"), Ok(Number::Integer(0)));
        assert_eq!(
            Number::from_span("9223372036854775807"),
            Ok(Number::Integer(i64::MAX))
        );
        assert_eq!(
            Number::from_span("-9223372036854775808"),
            Ok(Number::Integer(i64::MIN))
        );
    }

    #[test]
    fn test_integer_overflow_degrades_to_float() {
        let number = Number::from_span("12345678901234567890").unwrap();
        assert_eq!(number, Number::Float(12345678901234567890.0));
        assert!(number.is_float());
        assert_eq!(number.as_i64(), None);
    }

    #[test]
    fn test_floats() {
        assert_eq!(Number::from_span("1.23"), Ok(Number::Float(1.23)));
        assert_eq!(Number::from_span("1.3e10"), Ok(Number::Float(1.3e10)));
        assert_eq!(Number::from_span("1.2e-3"), Ok(Number::Float(1.2e-3)));
        assert_eq!(Number::from_span("-1e-2"), Ok(Number::Float(-1e-2)));
        assert_eq!(Number::from_span("0E+2"), Ok(Number::Float(0.0)));
        // Exponent alone still selects the float representation
        assert_eq!(Number::from_span("1e2"), Ok(Number::Float(100.0)));
    }

    #[test]
    fn test_invalid_spans() {
        for span in [
            "1ea23", "+1", "-", "01", "1.", ".5", "1e", "1e+", "--1", "1-2", "1.2.3", "0x1", "",
            "1E5E5",
        ] {
            assert_eq!(
                Number::from_span(span),
                Err(ParseError::InvalidNumberFormat),
                "span {span:?}"
            );
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(
            Number::from_span("1e999"),
            Err(ParseError::InvalidNumberFormat)
        );
    }

    #[test]
    fn test_display_keeps_float_marker() {
        assert_eq!(Number::Integer(42).to_string(), "42");
        assert_eq!(Number::Float(1.0).to_string(), "1.0");
        assert_eq!(Number::Float(1.23).to_string(), "1.23");
        assert_eq!(Number::Float(1e300).to_string(), "1e300");
        assert_eq!(Number::Float(f64::NAN).to_string(), "null");
        let reparsed = Number::from_span(&Number::Float(1e300).to_string()).unwrap();
        assert_eq!(reparsed, Number::Float(1e300));
    }

    #[test]
    fn test_is_integer_detection() {
        assert!(is_integer(b"42"));
        assert!(is_integer(b"-123"));
        assert!(!is_integer(b"3.14"));
        assert!(!is_integer(b"1e10"));
        assert!(!is_integer(b"2.5E-3"));
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Number::Integer(3).as_f64(), 3.0);
        assert_eq!(Number::Float(2.5).as_f64(), 2.5);
    }
}
