use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::config::DigitGrouping;

/// Millimetres per typographic point.
pub const PT_TO_MM: f32 = 0.352_778;

/// Millimetres per CSS pixel (96 dpi).
pub const PX_TO_MM: f32 = 25.4 / 96.0;

pub fn px_to_mm(px: f32) -> f32 {
    px * PX_TO_MM
}

/// Accounting-style amount: zero is `-`, negatives are parenthesised,
/// cents are shown only when present.
pub fn format_currency(amount: Decimal) -> String {
    format_currency_with(amount, DigitGrouping::Western)
}

pub fn format_currency_with(amount: Decimal, grouping: DigitGrouping) -> String {
    let rounded = amount.round_dp(2);
    if rounded.is_zero() {
        return "-".to_string();
    }

    let magnitude = rounded.abs();
    let whole = magnitude.trunc();
    let cents = ((magnitude - whole) * Decimal::ONE_HUNDRED)
        .to_u32()
        .unwrap_or(0);

    let mut text = group_digits(&whole.to_u128().unwrap_or(0).to_string(), grouping);
    if cents > 0 {
        text.push_str(&format!(".{cents:02}"));
    }

    if rounded.is_sign_negative() {
        format!("({text})")
    } else {
        text
    }
}

/// Per-share figures always carry two decimals.
pub fn format_per_share(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    if rounded.is_zero() {
        return "-".to_string();
    }
    let text = format!("{:.2}", rounded.abs());
    if rounded.is_sign_negative() {
        format!("({text})")
    } else {
        text
    }
}

pub fn format_percent(rate: Decimal) -> String {
    let pct = (rate * Decimal::ONE_HUNDRED).round_dp(2).normalize();
    format!("{pct}%")
}

fn group_digits(digits: &str, grouping: DigitGrouping) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let len = chars.len();
    let mut out = String::with_capacity(len + len / 2);

    for (i, ch) in chars.iter().enumerate() {
        let remaining = len - i;
        if i > 0 && needs_separator(remaining, grouping) {
            out.push(',');
        }
        out.push(*ch);
    }
    out
}

fn needs_separator(remaining: usize, grouping: DigitGrouping) -> bool {
    match grouping {
        DigitGrouping::Western => remaining % 3 == 0,
        // last group of three, then pairs: 12,34,567
        DigitGrouping::Indian => remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub width: f32,
    pub align: Align,
}

/// Split `available` width evenly across `count` columns; columns listed in
/// `amount_columns` are right-aligned.
pub fn equal_columns(available: f32, count: usize, amount_columns: &[usize]) -> Vec<ColumnSpec> {
    if count == 0 {
        return Vec::new();
    }
    let width = available / count as f32;
    (0..count)
        .map(|i| ColumnSpec {
            width,
            align: if amount_columns.contains(&i) {
                Align::Right
            } else {
                Align::Left
            },
        })
        .collect()
}

/// Like [`equal_columns`] but proportional to `weights`.
pub fn weighted_columns(available: f32, weights: &[f32], amount_columns: &[usize]) -> Vec<ColumnSpec> {
    let total: f32 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 {
        return equal_columns(available, weights.len(), amount_columns);
    }
    weights
        .iter()
        .enumerate()
        .map(|(i, w)| ColumnSpec {
            width: available * w / total,
            align: if amount_columns.contains(&i) {
                Align::Right
            } else {
                Align::Left
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_is_dash() {
        assert_eq!(format_currency(Decimal::ZERO), "-");
        assert_eq!(format_currency(dec!(0.001)), "-");
    }

    #[test]
    fn positive_is_grouped_without_sign() {
        assert_eq!(format_currency(dec!(350000)), "350,000");
        assert_eq!(format_currency(dec!(87500)), "87,500");
        assert_eq!(format_currency(dec!(999)), "999");
        assert_eq!(format_currency(dec!(1234567.5)), "1,234,567.50");
    }

    #[test]
    fn negative_is_parenthesised() {
        assert_eq!(format_currency(dec!(-262500)), "(262,500)");
        assert_eq!(format_currency(dec!(-0.5)), "(0.50)");
    }

    #[test]
    fn indian_grouping() {
        assert_eq!(
            format_currency_with(dec!(1234567), DigitGrouping::Indian),
            "12,34,567"
        );
        assert_eq!(
            format_currency_with(dec!(350000), DigitGrouping::Indian),
            "3,50,000"
        );
        assert_eq!(format_currency_with(dec!(999), DigitGrouping::Indian), "999");
        assert_eq!(
            format_currency_with(dec!(-1000), DigitGrouping::Indian),
            "(1,000)"
        );
    }

    #[test]
    fn per_share_and_percent() {
        assert_eq!(format_per_share(dec!(262.5)), "262.50");
        assert_eq!(format_per_share(dec!(-3)), "(3.00)");
        assert_eq!(format_percent(dec!(0.25)), "25%");
        assert_eq!(format_percent(dec!(0.04)), "4%");
    }

    #[test]
    fn equal_columns_split_width() {
        let cols = equal_columns(120.0, 3, &[1, 2]);
        assert_eq!(cols.len(), 3);
        assert!(cols.iter().all(|c| (c.width - 40.0).abs() < 1e-4));
        assert_eq!(cols[0].align, Align::Left);
        assert_eq!(cols[2].align, Align::Right);
        assert!(equal_columns(100.0, 0, &[]).is_empty());
    }

    #[test]
    fn px_conversion() {
        assert!((px_to_mm(96.0) - 25.4).abs() < 1e-4);
    }
}
