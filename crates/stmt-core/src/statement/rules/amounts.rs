//! Amount normalization for statement figures.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

lazy_static! {
    // Currency markers and separators seen in rendered statements.
    // The backtick is how some PDF fonts render the rupee glyph.
    static ref CURRENCY_NOISE: Regex = Regex::new(r"(?i)rs\.?|inr|[₹$€£`,\s]").unwrap();
}

/// Normalize a raw amount token ("₹ 1,23,456.78", "Rs. 500.00") to a decimal.
///
/// Returns `None` for empty or unparseable input and for values that are
/// not strictly positive; a zero due is indistinguishable from a missing one
/// in the source layouts.
pub fn normalize_amount(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let stripped = CURRENCY_NOISE.replace_all(raw, "");
    let mut cleaned: String = stripped
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned.ends_with('.') {
        cleaned.pop();
    }
    if cleaned.starts_with('.') {
        cleaned.insert(0, '0');
    }
    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned)
        .ok()
        .filter(|value| *value > Decimal::ZERO)
}

/// Format an amount with two decimals and comma thousands separators (12,345.67).
pub fn format_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount);
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let (integer_part, decimal_part) = match digits.split_once('.') {
        Some(parts) => parts,
        None => return s,
    };

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    format!("{}{}.{}", sign, formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_normalize_plain_and_grouped() {
        assert_eq!(normalize_amount("1234.56"), Some(dec("1234.56")));
        assert_eq!(normalize_amount("12,345.67"), Some(dec("12345.67")));
        assert_eq!(normalize_amount("1,00,000.00"), Some(dec("100000")));
        assert_eq!(normalize_amount("  50000  "), Some(dec("50000")));
    }

    #[test]
    fn test_normalize_currency_markers() {
        assert_eq!(normalize_amount("₹ 50,000.00"), Some(dec("50000.00")));
        assert_eq!(normalize_amount("Rs. 2,500.50"), Some(dec("2500.50")));
        assert_eq!(normalize_amount("$19.99"), Some(dec("19.99")));
        assert_eq!(normalize_amount("€ 7"), Some(dec("7")));
        assert_eq!(normalize_amount("` 1,200.00"), Some(dec("1200")));
        assert_eq!(normalize_amount("INR 300"), Some(dec("300")));
    }

    #[test]
    fn test_normalize_rejects_zero_and_garbage() {
        assert_eq!(normalize_amount(""), None);
        assert_eq!(normalize_amount("   "), None);
        assert_eq!(normalize_amount("0.00"), None);
        assert_eq!(normalize_amount("₹ 0"), None);
        assert_eq!(normalize_amount("N/A"), None);
        assert_eq!(normalize_amount(",,,"), None);
        assert_eq!(normalize_amount("1.2.3"), None);
    }

    #[test]
    fn test_normalize_tolerates_stray_characters() {
        assert_eq!(normalize_amount("1,234.00 Dr"), Some(dec("1234")));
        assert_eq!(normalize_amount("500."), Some(dec("500")));
        assert_eq!(normalize_amount(".75"), Some(dec("0.75")));
    }

    #[test]
    fn test_normalize_canonical_rendering_round_trips() {
        for value in ["0.01", "1", "37654.33", "100000.00", "999999999.99"] {
            let decimal = dec(value);
            assert_eq!(normalize_amount(&decimal.to_string()), Some(decimal));
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec("1234.56")), "1,234.56");
        assert_eq!(format_amount(dec("12345678.9")), "12,345,678.90");
        assert_eq!(format_amount(dec("999")), "999.00");
        assert_eq!(format_amount(dec("-1500")), "-1,500.00");
    }
}
