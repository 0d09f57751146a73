use rust_decimal::{Decimal, RoundingStrategy};

/// Currency amount with two fractional digits and thousands grouping, e.g. `1,234.50`.
pub fn money(value: Decimal) -> String {
    grouped(value, 2)
}

/// Currency amount prefixed with the dollar sign, e.g. `$1,234.50`.
pub fn dollars(value: Decimal) -> String {
    format!("${}", money(value))
}

/// Units are fractional quantities and keep two digits as well.
pub fn units(value: Decimal) -> String {
    grouped(value, 2)
}

/// Whole count with thousands grouping, e.g. `12,345`.
pub fn count(value: u64) -> String {
    group_digits(&value.to_string())
}

fn grouped(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    // no "-0.00"
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };

    let formatted = format!("{:.*}", dp as usize, rounded.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::with_capacity(formatted.len() + formatted.len() / 3 + 1);
    if rounded.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&group_digits(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
