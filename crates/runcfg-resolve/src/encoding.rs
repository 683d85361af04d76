//! Range bound encoding
//!
//! Cycle triggers take decimal bounds. Program-counter and instruction
//! triggers take hexadecimal digit strings, with one quirk kept for
//! compatibility with existing runtime documents: a hex string made only of
//! decimal digits is stored as the decimal integer it spells. `"10"` becomes
//! the number 10 (not 0x10) while `"a1"` stays the string `"a1"`.
//!
//! Both rules live here so the quirk has exactly one implementation.

use crate::params::RangeBound;

/// Why a single range bound was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoundError {
    /// Bound argument not supplied
    #[error("bound is missing")]
    Missing,

    /// Empty string
    #[error("bound is empty")]
    Empty,

    /// Non-digit content where a decimal integer is required
    #[error("bound is not a decimal integer")]
    NotDecimal,

    /// Character outside `0-9a-fA-F` where hex digits are required
    #[error("bound is not a hexadecimal digit string")]
    NotHex,

    /// Decimal value does not fit in 64 bits
    #[error("bound does not fit in 64 bits")]
    Overflow,
}

/// Parse a bound that must be a base-10 integer
///
/// Only ASCII digits are accepted: no sign, no whitespace, no separators.
///
/// # Errors
/// [`BoundError::Empty`], [`BoundError::NotDecimal`] or
/// [`BoundError::Overflow`]
pub fn parse_decimal_bound(raw: &str) -> Result<RangeBound, BoundError> {
    decimal_value(raw).map(RangeBound::Decimal)
}

/// Parse a bound that must be a hexadecimal digit string
///
/// Digit-only input is reinterpreted as a decimal integer; input with at
/// least one letter `a-f`/`A-F` is kept verbatim. The empty string has no
/// non-hex character and is kept verbatim as well.
///
/// # Errors
/// [`BoundError::NotHex`] or [`BoundError::Overflow`] (digit-only input too
/// large for 64 bits)
pub fn normalize_hex_bound(raw: &str) -> Result<RangeBound, BoundError> {
    if !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(BoundError::NotHex);
    }

    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        decimal_value(raw).map(RangeBound::Decimal)
    } else {
        Ok(RangeBound::HexDigits(raw.to_owned()))
    }
}

/// Strict unsigned decimal parse shared by every numeric argument
pub(crate) fn decimal_value(raw: &str) -> Result<u64, BoundError> {
    if raw.is_empty() {
        return Err(BoundError::Empty);
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BoundError::NotDecimal);
    }
    // digits only, so the only possible failure is overflow
    raw.parse::<u64>().map_err(|_| BoundError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hex(s: &str) -> RangeBound {
        RangeBound::HexDigits(s.to_string())
    }

    #[test]
    fn hex_letters_kept_as_string() {
        assert_eq!(normalize_hex_bound("ff"), Ok(hex("ff")));
        assert_eq!(normalize_hex_bound("DEADBEEF"), Ok(hex("DEADBEEF")));
    }

    #[test]
    fn hex_digits_only_become_decimal() {
        assert_eq!(normalize_hex_bound("10"), Ok(RangeBound::Decimal(10)));
        assert_eq!(normalize_hex_bound("0080"), Ok(RangeBound::Decimal(80)));
        assert_eq!(normalize_hex_bound("0"), Ok(RangeBound::Decimal(0)));
    }

    #[test]
    fn hex_mixed_kept_verbatim() {
        assert_eq!(normalize_hex_bound("a1"), Ok(hex("a1")));
        assert_eq!(normalize_hex_bound("80000000aB"), Ok(hex("80000000aB")));
        // leading zeros survive when a letter is present
        assert_eq!(normalize_hex_bound("00c0"), Ok(hex("00c0")));
    }

    #[test]
    fn hex_invalid_characters_rejected() {
        assert_eq!(normalize_hex_bound("0x10"), Err(BoundError::NotHex));
        assert_eq!(normalize_hex_bound("g1"), Err(BoundError::NotHex));
        assert_eq!(normalize_hex_bound("-1"), Err(BoundError::NotHex));
        assert_eq!(normalize_hex_bound(" a1"), Err(BoundError::NotHex));
    }

    #[test]
    fn hex_empty_kept_verbatim() {
        assert_eq!(normalize_hex_bound(""), Ok(hex("")));
        // decimal bounds still need a digit
        assert_eq!(parse_decimal_bound(""), Err(BoundError::Empty));
    }

    #[test]
    fn hex_digit_overflow_rejected() {
        assert_eq!(
            normalize_hex_bound("99999999999999999999"),
            Err(BoundError::Overflow)
        );
        // same length with a letter is just a string
        assert_eq!(
            normalize_hex_bound("9999999999999999999f"),
            Ok(hex("9999999999999999999f"))
        );
    }

    #[test]
    fn decimal_strict() {
        assert_eq!(parse_decimal_bound("1000"), Ok(RangeBound::Decimal(1000)));
        assert_eq!(parse_decimal_bound("a1"), Err(BoundError::NotDecimal));
        assert_eq!(parse_decimal_bound("+5"), Err(BoundError::NotDecimal));
        assert_eq!(parse_decimal_bound("1_000"), Err(BoundError::NotDecimal));
        assert_eq!(parse_decimal_bound(""), Err(BoundError::Empty));
    }

    proptest! {
        #[test]
        fn prop_digit_strings_are_decimal(n in 0u64..=u64::MAX) {
            prop_assert_eq!(normalize_hex_bound(&n.to_string()), Ok(RangeBound::Decimal(n)));
        }

        #[test]
        fn prop_lettered_hex_kept(s in "[0-9a-fA-F]{0,8}[a-fA-F][0-9a-fA-F]{0,8}") {
            prop_assert_eq!(normalize_hex_bound(&s), Ok(RangeBound::HexDigits(s.clone())));
        }

        #[test]
        fn prop_non_hex_rejected(
            prefix in "[0-9a-f]{0,4}",
            bad in "[g-zG-Z_ x-]",
            suffix in "[0-9a-f]{0,4}",
        ) {
            let raw = format!("{prefix}{bad}{suffix}");
            prop_assert_eq!(normalize_hex_bound(&raw), Err(BoundError::NotHex));
        }
    }
}
