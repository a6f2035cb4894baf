use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Money amount represented as **integer cents**.
///
/// This is the only representation of an amount inside the engine and in the
/// database (`amount_minor`). Callers receive it back as a plain number via
/// [`Amount::as_f64`].
///
/// # Examples
///
/// ```rust
/// use engine::Amount;
///
/// let amount = Amount::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// assert_eq!(amount.as_f64(), 12.34);
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals instead of rounding):
///
/// ```rust
/// use engine::Amount;
///
/// assert_eq!("10".parse::<Amount>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<Amount>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<Amount>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct Amount(i64);

/// Why a string could not be read as an [`Amount`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmountError {
    Empty,
    NotANumber,
    TooManyDecimals,
    Overflow,
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Empty => "empty amount",
            Self::NotANumber => "invalid amount",
            Self::TooManyDecimals => "too many decimals",
            Self::Overflow => "amount too large",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for AmountError {}

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Largest magnitude in cents that survives [`Amount::as_f64`] unchanged
    /// (2^53). Parsing rejects anything beyond it.
    pub const MAX_CENTS: i64 = 1 << 53;

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Plain numeric value (`cents / 100`) handed to callers.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Amount> for i64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    /// At most 2 fractional digits are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or(AmountError::NotANumber)?;
        let frac_str = parts.next();
        if parts.next().is_some() {
            return Err(AmountError::NotANumber);
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(AmountError::NotANumber);
        }
        let units: i64 = units_str.parse().map_err(|_| AmountError::Overflow)?;

        let cents: i64 = match frac_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(AmountError::NotANumber);
                }
                // "10.50" and "10.500" are the same number; only significant
                // digits count against the limit.
                let significant = frac.trim_end_matches('0');
                if significant.len() > 2 {
                    return Err(AmountError::TooManyDecimals);
                }
                let padded = format!("{significant:0<2}");
                padded.parse::<i64>().map_err(|_| AmountError::NotANumber)?
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or(AmountError::Overflow)?;
        if total > Self::MAX_CENTS {
            return Err(AmountError::Overflow);
        }

        Ok(Amount(if negative { -total } else { total }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Amount::new(0).to_string(), "0.00");
        assert_eq!(Amount::new(1).to_string(), "0.01");
        assert_eq!(Amount::new(1050).to_string(), "10.50");
        assert_eq!(Amount::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Amount>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<Amount>().unwrap().cents(), 1050);
        assert_eq!("10,50".parse::<Amount>().unwrap().cents(), 1050);
        assert_eq!("-0.01".parse::<Amount>().unwrap().cents(), -1);
        assert_eq!("+1.00".parse::<Amount>().unwrap().cents(), 100);
        assert_eq!("  2.30 ".parse::<Amount>().unwrap().cents(), 230);
        assert_eq!("7.".parse::<Amount>().unwrap().cents(), 700);
    }

    #[test]
    fn parse_ignores_trailing_zero_decimals() {
        assert_eq!("1.500".parse::<Amount>().unwrap().cents(), 150);
        assert_eq!("3.000".parse::<Amount>().unwrap().cents(), 300);
    }

    #[test]
    fn parse_rejects_more_than_two_decimals() {
        assert_eq!("12.345".parse::<Amount>(), Err(AmountError::TooManyDecimals));
        assert_eq!("0.001".parse::<Amount>(), Err(AmountError::TooManyDecimals));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!("".parse::<Amount>(), Err(AmountError::Empty));
        assert_eq!("abc".parse::<Amount>(), Err(AmountError::NotANumber));
        assert_eq!("1.2.3".parse::<Amount>(), Err(AmountError::NotANumber));
        assert_eq!(".5".parse::<Amount>(), Err(AmountError::NotANumber));
        assert_eq!("1e3".parse::<Amount>(), Err(AmountError::NotANumber));
        assert_eq!(
            "99999999999999999999".parse::<Amount>(),
            Err(AmountError::Overflow)
        );
    }

    #[test]
    fn parse_stops_where_f64_loses_cents() {
        let max = "90071992547409.92".parse::<Amount>().unwrap();
        assert_eq!(max.cents(), Amount::MAX_CENTS);
        assert_eq!(max.as_f64(), 90_071_992_547_409.92);
        assert_eq!(
            "-90071992547409.92".parse::<Amount>().unwrap().cents(),
            -Amount::MAX_CENTS
        );

        assert_eq!(
            "90071992547409.93".parse::<Amount>(),
            Err(AmountError::Overflow)
        );
        assert_eq!(
            "-90071992547409.93".parse::<Amount>(),
            Err(AmountError::Overflow)
        );
    }

    #[test]
    fn as_f64_is_plain_number() {
        assert_eq!(Amount::new(100_000).as_f64(), 1000.0);
        assert_eq!(Amount::new(1234).as_f64(), 12.34);
    }
}
