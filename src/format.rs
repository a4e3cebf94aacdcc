use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const BAR_FILL: char = '█';
const BAR_EMPTY: char = '░';

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` with `"₹"` → `"₹1,234,567.89"`
pub(crate) fn format_amount(val: Decimal, symbol: &str) -> String {
    let rounded = val.round_dp(2);
    let abs = rounded.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if rounded < Decimal::ZERO {
        format!("-{symbol}{with_commas}.{dec_part}")
    } else {
        format!("{symbol}{with_commas}.{dec_part}")
    }
}

/// Signed percentage with one sign character, e.g. `+50%`, `-12.5%`, `0%`.
pub(crate) fn format_change(change: Decimal) -> String {
    let change = change.normalize();
    if change > Decimal::ZERO {
        format!("+{change}%")
    } else {
        format!("{change}%")
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max - 1).collect();
    format!("{truncated}…")
}

/// Text progress bar for a percentage in 0..=100, `width` cells wide.
pub(crate) fn progress_bar(percent: Decimal, width: usize) -> String {
    let clamped = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let filled = (clamped * Decimal::from(width) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);
    let mut bar = String::with_capacity(width * BAR_FILL.len_utf8());
    bar.extend(std::iter::repeat(BAR_FILL).take(filled));
    bar.extend(std::iter::repeat(BAR_EMPTY).take(width - filled));
    bar
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
