//! US-dollar formatting for salaries and totals.
//!
//! Two variants are used across the UI: whole dollars for per-employee
//! salaries (`$240,000`) and cents-precise for the monthly total
//! (`$20,000.00`).  Rounding is half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

const SYMBOL: char = '$';

/// Format `amount` as whole dollars, e.g. `$240,000`.
pub fn format_whole_dollars(amount: Decimal) -> String {
    format_with_places(amount, 0)
}

/// Format `amount` with exactly two decimal places, e.g. `$20,000.00`.
pub fn format_cents(amount: Decimal) -> String {
    format_with_places(amount, 2)
}

fn format_with_places(amount: Decimal, places: u32) -> String {
    let rounded = amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    // `-0.00` after rounding still prints as zero.
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.*}", places as usize, rounded.abs());

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + 6);
    if negative {
        out.push('-');
    }
    out.push(SYMBOL);
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Insert `,` every three digits from the right.
fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn whole_dollars_groups_thousands() {
        assert_eq!(format_whole_dollars(dec!(240000)), "$240,000");
        assert_eq!(format_whole_dollars(dec!(1234567)), "$1,234,567");
        assert_eq!(format_whole_dollars(dec!(999)), "$999");
        assert_eq!(format_whole_dollars(dec!(0)), "$0");
    }

    #[test]
    fn whole_dollars_rounds_half_away_from_zero() {
        assert_eq!(format_whole_dollars(dec!(1000.5)), "$1,001");
        assert_eq!(format_whole_dollars(dec!(1000.49)), "$1,000");
    }

    #[test]
    fn cents_always_two_places() {
        assert_eq!(format_cents(dec!(20000)), "$20,000.00");
        assert_eq!(format_cents(dec!(20001)), "$20,001.00");
        assert_eq!(format_cents(dec!(1)), "$1.00");
        assert_eq!(format_cents(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn cents_rounds_repeating_division() {
        // 100 / 12 = 8.3333…
        assert_eq!(format_cents(dec!(100) / dec!(12)), "$8.33");
        // 240001 / 12 = 20000.0833…
        assert_eq!(format_cents(dec!(240001) / dec!(12)), "$20,000.08");
        assert_eq!(format_cents(dec!(0.005)), "$0.01");
    }

    #[test]
    fn negatives_put_sign_before_symbol() {
        assert_eq!(format_cents(dec!(-1)), "-$1.00");
        assert_eq!(format_whole_dollars(dec!(-1500)), "-$1,500");
        assert_eq!(format_cents(dec!(-0.001)), "$0.00");
    }
}
