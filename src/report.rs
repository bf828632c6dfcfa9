//! Display formatting for projections: grouped currency amounts, one-decimal
//! rates and the plain-text report printed by the `project` command.

use std::fmt;

use crate::core::Projection;

/// Formats with en-US thousands separators and at most two fraction
/// digits, dropping trailing zeros: `200813.8` becomes `200,813.8`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.2}", value.abs());
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');
    let negative = value < 0.0 && rounded.bytes().any(|b| b.is_ascii_digit() && b != b'0');

    let mut out = String::with_capacity(rounded.len() + whole.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

pub fn format_currency(value: f64) -> String {
    let formatted = format_number(value);
    match formatted.strip_prefix('-') {
        Some(magnitude) => format!("-${magnitude}"),
        None => format!("${formatted}"),
    }
}

/// `rate` is already a percentage.
pub fn format_rate(rate: f64) -> String {
    format!("{rate:.1}%")
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub struct ProjectionReport<'a> {
    projection: &'a Projection,
}

impl<'a> ProjectionReport<'a> {
    pub fn new(projection: &'a Projection) -> Self {
        Self { projection }
    }
}

impl fmt::Display for ProjectionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let exit = &self.projection.exit_valuation;
        writeln!(f, "Exit Value (Capital Gains)")?;
        writeln!(f, "  Gross: {}", format_currency(exit.gross_exit_value))?;
        writeln!(
            f,
            "  Tax ({}): -{}",
            format_rate(exit.effective_rate),
            format_currency(exit.tax)
        )?;
        writeln!(f, "  Net: {}", format_currency(exit.net_exit_value))?;
        writeln!(f)?;

        writeln!(f, "Yearly Compensation")?;
        writeln!(
            f,
            "{:<8} {:>14} {:>14} {:>14} {:>14} {:>14} {:>16} {:>15}",
            "Year",
            "Base",
            "Equity",
            "Gross Total",
            "Tax",
            "Net Total",
            "Cumulative Net",
            "Effective Rate"
        )?;
        writeln!(f, "{}", "-".repeat(116))?;
        for row in &self.projection.yearly_schedule {
            writeln!(
                f,
                "{:<8} {:>14} {:>14} {:>14} {:>14} {:>14} {:>16} {:>15}",
                format!("Year {}", row.year),
                format_currency(row.base),
                format_currency(row.equity),
                format_currency(row.gross_total),
                format!("-{}", format_currency(row.tax)),
                format_currency(row.net_total),
                format_currency(row.cumulative_net_total),
                format_rate(row.effective_tax_rate)
            )?;
        }
        Ok(())
    }
}
