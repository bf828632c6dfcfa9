use std::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};

/// A numeric form field that may arrive as a JSON number or as display text
/// such as `"$1,250,000"`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DisplayNumber(pub f64);

impl DisplayNumber {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for DisplayNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DisplayNumberVisitor)
    }
}

struct DisplayNumberVisitor;

impl Visitor<'_> for DisplayNumberVisitor {
    type Value = DisplayNumber;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number or numeric text")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(DisplayNumber(value as f64))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(DisplayNumber(value as f64))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(DisplayNumber(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(DisplayNumber(parse_formatted_number(value)))
    }
}

/// Strips everything except digits, `.` and `-`, then reads the longest
/// leading decimal number. Text with no number in it reads as 0.
pub fn parse_formatted_number(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    leading_decimal(&cleaned)
        .parse::<f64>()
        .unwrap_or(0.0)
}

fn leading_decimal(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    &text[..end]
}

pub fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}

/// Vesting years from a form value. Fractional, zero or negative input has
/// no whole-year count and yields `None`.
pub fn whole_vesting_years(value: f64) -> Option<u32> {
    if value >= 1.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_formatted_number_strips_currency_and_separators() {
        assert_eq!(parse_formatted_number("$1,234.50"), 1234.5);
        assert_eq!(parse_formatted_number("10,000,000"), 10_000_000.0);
        assert_eq!(parse_formatted_number(" 6.85 % "), 6.85);
        assert_eq!(parse_formatted_number("-$500"), -500.0);
    }

    #[test]
    fn parse_formatted_number_maps_garbage_to_zero() {
        assert_eq!(parse_formatted_number("abc"), 0.0);
        assert_eq!(parse_formatted_number(""), 0.0);
        assert_eq!(parse_formatted_number("-"), 0.0);
        assert_eq!(parse_formatted_number("."), 0.0);
    }

    #[test]
    fn parse_formatted_number_reads_longest_leading_number() {
        assert_eq!(parse_formatted_number("1.2.3"), 1.2);
        assert_eq!(parse_formatted_number("12-3"), 12.0);
        assert_eq!(parse_formatted_number(".5"), 0.5);
        assert_eq!(parse_formatted_number("7."), 7.0);
    }

    #[test]
    fn display_number_accepts_numbers_and_text() {
        let values: Vec<DisplayNumber> =
            serde_json::from_str(r#"[120000, -3, 2.5, "$1,000", "n/a"]"#).expect("valid json");
        let values: Vec<f64> = values.into_iter().map(DisplayNumber::value).collect();
        assert_eq!(values, vec![120_000.0, -3.0, 2.5, 1_000.0, 0.0]);
    }

    #[test]
    fn whole_vesting_years_accepts_only_positive_integers() {
        assert_eq!(whole_vesting_years(4.0), Some(4));
        assert_eq!(whole_vesting_years(1.0), Some(1));
        assert_eq!(whole_vesting_years(4.7), None);
        assert_eq!(whole_vesting_years(0.0), None);
        assert_eq!(whole_vesting_years(-2.0), None);
        assert_eq!(whole_vesting_years(f64::NAN), None);
    }

    #[test]
    fn percent_to_fraction_divides_by_one_hundred() {
        assert_eq!(percent_to_fraction(35.0), 0.35);
        assert_eq!(percent_to_fraction(0.0), 0.0);
    }
}
