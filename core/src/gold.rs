//! Gold amount parsing and compact formatting.
//!
//! Amounts accept an "M" (millions) suffix: "2.5M" parses to 2_500_000.
//! Formatting renders one decimal place, so the pair is lossy:
//! "2.34M" parses to 2_340_000, which formats back as "2.3M".

use crate::error::{RelayError, RelayResult};
use crate::types::Gold;

const MILLION: Gold = 1_000_000;

/// Parse a raw amount field. Case-insensitive, surrounding whitespace
/// ignored. With an "M" suffix the remainder is read as a decimal
/// number of millions and truncated toward zero; without one it must
/// be a plain integer.
pub fn parse_gold(raw: &str) -> RelayResult<Gold> {
    let val = raw.trim().to_uppercase();
    let invalid = || RelayError::InvalidAmount {
        raw: raw.trim().to_string(),
    };

    if let Some(mantissa) = val.strip_suffix('M') {
        let millions: f64 = mantissa.parse().map_err(|_| invalid())?;
        return Ok((millions * MILLION as f64) as Gold);
    }

    val.parse().map_err(|_| invalid())
}

/// Render a gold amount compactly. A million or more becomes millions
/// with one decimal place, a trailing ".0" dropped ("1M", "2.5M");
/// anything smaller is the plain decimal string.
pub fn format_gold(n: Gold) -> String {
    if n >= MILLION {
        let millions = format!("{:.1}", n as f64 / MILLION as f64);
        let trimmed = millions.strip_suffix(".0").unwrap_or(&millions);
        format!("{trimmed}M")
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelayError;

    #[test]
    fn parses_plain_integers() {
        assert_eq!(parse_gold("1500").unwrap(), 1500);
        assert_eq!(parse_gold("0").unwrap(), 0);
    }

    #[test]
    fn parses_million_suffix() {
        assert_eq!(parse_gold("2M").unwrap(), 2_000_000);
        assert_eq!(parse_gold("2.5M").unwrap(), 2_500_000);
    }

    #[test]
    fn suffix_is_case_insensitive_and_whitespace_tolerant() {
        assert_eq!(parse_gold(" 1m ").unwrap(), 1_000_000);
        assert_eq!(parse_gold("  750 ").unwrap(), 750);
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let err = parse_gold("abc").unwrap_err();
        assert!(
            matches!(err, RelayError::InvalidAmount { ref raw } if raw == "abc"),
            "expected InvalidAmount, got {err:?}"
        );
        assert!(parse_gold("1.5").is_err(), "bare decimals are not integers");
        assert!(parse_gold("").is_err());
    }

    #[test]
    fn negative_literals_pass_numeric_parsing() {
        // Shape-only validation: "-5" is numeric, so it parses.
        assert_eq!(parse_gold("-5").unwrap(), -5);
    }

    #[test]
    fn formats_below_a_million_as_plain_decimal() {
        assert_eq!(format_gold(500), "500");
        assert_eq!(format_gold(999_999), "999999");
    }

    #[test]
    fn formats_millions_with_one_decimal_place() {
        assert_eq!(format_gold(1_000_000), "1M");
        assert_eq!(format_gold(2_500_000), "2.5M");
        assert_eq!(format_gold(1_200_000), "1.2M");
    }

    #[test]
    fn parse_then_format_does_not_round_trip() {
        let parsed = parse_gold("2.34M").unwrap();
        assert_eq!(parsed, 2_340_000);
        assert_eq!(format_gold(parsed), "2.3M");
    }
}
