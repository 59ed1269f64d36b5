//! Operands, operators, and number formatting.
//!
//! Operands keep the integer/float distinction of the text they were typed
//! as. Everything shown on screen goes through [`format_float`], which writes
//! the shortest decimal that round-trips, so whole results print as `9.0`
//! before [`remove_trailing_zero`] trims them to `9`.
//!
//! Integers above 2^53 do not survive the trip through `f64`: `9007199254740993`
//! displays as `9007199254740992`, and anything from `1e16` up switches to
//! exponent form (`1e+16`).

use crate::error::CalcError;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    #[error("not a number: {0:?}")]
    Invalid(String),
}

/// A parsed operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Integer(i64),
    Float(f64),
}

impl Operand {
    /// Parse entry or operand text.
    ///
    /// Text with a decimal point is a `Float`, except that trailing points
    /// are dropped first (`"5."` is `Integer(5)`). A lone sign or point
    /// means zero. Integers too large for `i64` become floats.
    pub fn parse(text: &str) -> Result<Self, NumberError> {
        let text = text.trim();
        if matches!(text, "" | "-" | "." | "-.") {
            return Ok(Operand::Integer(0));
        }

        let trimmed = text.trim_end_matches('.');
        let invalid = || NumberError::Invalid(text.to_string());
        if trimmed.contains('.') {
            return trimmed.parse::<f64>().map(Operand::Float).map_err(|_| invalid());
        }
        match trimmed.parse::<i64>() {
            Ok(n) => Ok(Operand::Integer(n)),
            Err(_) => trimmed.parse::<f64>().map(Operand::Float).map_err(|_| invalid()),
        }
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Operand::Integer(n) => n as f64,
            Operand::Float(x) => x,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Operand::Integer(n) => n == 0,
            Operand::Float(x) => x == 0.0,
        }
    }
}

/// The four binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Apply to two operands. Integer pairs stay integral unless the
    /// operation overflows; division always yields a float.
    pub fn apply(self, lhs: Operand, rhs: Operand) -> Result<Operand, CalcError> {
        if self == Operator::Divide {
            if rhs.is_zero() {
                return Err(if lhs.is_zero() {
                    CalcError::UndefinedResult
                } else {
                    CalcError::DivisionByZero
                });
            }
            return Ok(Operand::Float(lhs.to_f64() / rhs.to_f64()));
        }

        if let (Operand::Integer(a), Operand::Integer(b)) = (lhs, rhs) {
            let exact = match self {
                Operator::Add => a.checked_add(b),
                Operator::Subtract => a.checked_sub(b),
                Operator::Multiply => a.checked_mul(b),
                Operator::Divide => None,
            };
            if let Some(n) = exact {
                return Ok(Operand::Integer(n));
            }
        }

        let (a, b) = (lhs.to_f64(), rhs.to_f64());
        Ok(Operand::Float(match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide => a / b,
        }))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Shortest round-trip decimal text for `x`.
///
/// Fixed notation with at least one fractional digit for decimal exponents
/// in `-4..16`, exponent notation (`1.5e-05`, `1e+16`) outside it.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let sign = if x.is_sign_negative() { "-" } else { "" };
    if x == 0.0 {
        return format!("{}0.0", sign);
    }

    // `{:e}` gives the shortest round-trip digits, e.g. "1.2345e3".
    let sci = format!("{:e}", x.abs());
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if (-4..16).contains(&exp) {
        let point = exp + 1;
        if point <= 0 {
            let zeros = "0".repeat((-point) as usize);
            format!("{}0.{}{}", sign, zeros, digits)
        } else {
            let point = point as usize;
            if digits.len() <= point {
                let zeros = "0".repeat(point - digits.len());
                format!("{}{}{}.0", sign, digits, zeros)
            } else {
                format!("{}{}.{}", sign, &digits[..point], &digits[point..])
            }
        }
    } else {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        let mantissa = if digits.len() > 1 {
            format!("{}.{}", &digits[..1], &digits[1..])
        } else {
            digits
        };
        format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exp.abs())
    }
}

/// Float text of `text` with a trailing `.0` dropped: `"6"` and `"6.0"` give
/// `"6"`, `"1.5"` stays `"1.5"`.
pub fn remove_trailing_zero(text: &str) -> Result<String, NumberError> {
    let formatted = format_float(Operand::parse(text)?.to_f64());
    Ok(strip_point_zero(formatted))
}

/// Display text for a computed result.
pub fn normalize(value: Operand) -> String {
    strip_point_zero(format_float(value.to_f64()))
}

fn strip_point_zero(mut text: String) -> String {
    if text.ends_with(".0") {
        text.truncate(text.len() - 2);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!(Operand::parse("42").unwrap(), Operand::Integer(42));
        assert_eq!(Operand::parse("-7").unwrap(), Operand::Integer(-7));
        assert_eq!(Operand::parse("1.5").unwrap(), Operand::Float(1.5));
        assert_eq!(Operand::parse("5.").unwrap(), Operand::Integer(5));
        assert_eq!(Operand::parse(".25").unwrap(), Operand::Float(0.25));
        assert_eq!(Operand::parse("-.5").unwrap(), Operand::Float(-0.5));
    }

    #[test]
    fn test_parse_bare_sign_and_point_is_zero() {
        for text in ["", ".", "-", "-."] {
            assert_eq!(Operand::parse(text).unwrap(), Operand::Integer(0), "{text:?}");
        }
    }

    #[test]
    fn test_parse_oversized_integer_and_exponent() {
        assert_eq!(
            Operand::parse("99999999999999999999").unwrap(),
            Operand::Float(1e20)
        );
        assert_eq!(Operand::parse("1e+16").unwrap(), Operand::Float(1e16));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Operand::parse("Division by zero"),
            Err(NumberError::Invalid(_))
        ));
        assert!(Operand::parse("1.2.3").is_err());
    }

    #[test]
    fn test_format_float_fixed() {
        assert_eq!(format_float(9.0), "9.0");
        assert_eq!(format_float(1.5), "1.5");
        assert_eq!(format_float(-2.25), "-2.25");
        assert_eq!(format_float(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_float(1.0 / 3.0), "0.3333333333333333");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(1234.5), "1234.5");
        assert_eq!(format_float(1e15), "1000000000000000.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(-0.0), "-0.0");
    }

    #[test]
    fn test_format_float_exponent() {
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(1.5e17), "1.5e+17");
        assert_eq!(format_float(0.00001), "1e-05");
        assert_eq!(format_float(-2.5e-7), "-2.5e-07");
        assert_eq!(format_float(1e300), "1e+300");
    }

    #[test]
    fn test_format_float_non_finite() {
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_float(f64::NAN), "nan");
    }

    #[test]
    fn test_remove_trailing_zero() {
        assert_eq!(remove_trailing_zero("6").unwrap(), "6");
        assert_eq!(remove_trailing_zero("6.0").unwrap(), "6");
        assert_eq!(remove_trailing_zero("5.").unwrap(), "5");
        assert_eq!(remove_trailing_zero("1.50").unwrap(), "1.5");
        assert_eq!(remove_trailing_zero(".").unwrap(), "0");
        assert_eq!(remove_trailing_zero("1e16").unwrap(), "1e+16");
    }

    #[test]
    fn test_large_integer_precision_boundary() {
        // 2^53 + 1 is not representable as f64.
        assert_eq!(remove_trailing_zero("9007199254740993").unwrap(), "9007199254740992");
    }

    #[test]
    fn test_apply_integers_stay_integral() {
        let r = Operator::Add.apply(Operand::Integer(6), Operand::Integer(3)).unwrap();
        assert_eq!(r, Operand::Integer(9));
        assert_eq!(normalize(r), "9");

        let r = Operator::Multiply.apply(Operand::Integer(-4), Operand::Integer(5)).unwrap();
        assert_eq!(r, Operand::Integer(-20));
    }

    #[test]
    fn test_apply_overflow_falls_back_to_float() {
        let r = Operator::Multiply
            .apply(Operand::Integer(i64::MAX), Operand::Integer(2))
            .unwrap();
        assert!(matches!(r, Operand::Float(_)));
    }

    #[test]
    fn test_apply_mixed_and_division() {
        let r = Operator::Subtract.apply(Operand::Float(2.5), Operand::Integer(1)).unwrap();
        assert_eq!(r, Operand::Float(1.5));

        let r = Operator::Divide.apply(Operand::Integer(6), Operand::Integer(4)).unwrap();
        assert_eq!(normalize(r), "1.5");

        let r = Operator::Divide.apply(Operand::Integer(6), Operand::Integer(3)).unwrap();
        assert_eq!(r, Operand::Float(2.0));
        assert_eq!(normalize(r), "2");
    }

    #[test]
    fn test_division_by_zero_errors() {
        assert_eq!(
            Operator::Divide.apply(Operand::Integer(5), Operand::Integer(0)),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            Operator::Divide.apply(Operand::Integer(0), Operand::Float(0.0)),
            Err(CalcError::UndefinedResult)
        );
        assert_eq!(
            Operator::Divide.apply(Operand::Float(-0.0), Operand::Integer(0)),
            Err(CalcError::UndefinedResult)
        );
    }

    #[test]
    fn test_operator_symbols() {
        let symbols: String = Operator::ALL.iter().map(|op| op.symbol()).collect();
        assert_eq!(symbols, "+-*/");
        assert_eq!(Operator::Divide.to_string(), "/");
    }
}
