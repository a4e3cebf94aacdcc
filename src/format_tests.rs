#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("lunch", 10), "lunch");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("lunch", 5), "lunch");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("team lunch", 5), "team…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("lunch", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
    assert_eq!(truncate("café résumé", 5), "café…");
}

#[test]
fn test_truncate_one_char() {
    assert_eq!(truncate("ab", 1), "…");
    assert_eq!(truncate("a", 1), "a");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56), "₹"), "₹1,234.56");
}

#[test]
fn test_format_amount_other_symbol() {
    assert_eq!(format_amount(dec!(999.99), "$"), "$999.99");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0), "₹"), "₹0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50), "₹"), "-₹42.50");
}

#[test]
fn test_format_amount_large() {
    assert_eq!(format_amount(dec!(1234567.89), "₹"), "₹1,234,567.89");
    assert_eq!(format_amount(dec!(10000000), "₹"), "₹10,000,000.00");
}

#[test]
fn test_format_amount_pads_decimals() {
    assert_eq!(format_amount(dec!(1.5), "₹"), "₹1.50");
    assert_eq!(format_amount(dec!(5), "₹"), "₹5.00");
}

#[test]
fn test_format_amount_tiny_negative_rounds_to_unsigned_zero() {
    assert_eq!(format_amount(dec!(-0.001), "₹"), "₹0.00");
    assert_eq!(format_amount(dec!(-0.006), "₹"), "-₹0.01");
}

#[test]
fn test_format_amount_empty_symbol() {
    assert_eq!(format_amount(dec!(-99999.01), ""), "-99,999.01");
}

// ── format_change ─────────────────────────────────────────────

#[test]
fn test_format_change_signs() {
    assert_eq!(format_change(dec!(50)), "+50%");
    assert_eq!(format_change(dec!(-12.50)), "-12.5%");
    assert_eq!(format_change(dec!(0)), "0%");
}

// ── progress_bar ──────────────────────────────────────────────

#[test]
fn test_progress_bar_empty_and_full() {
    assert_eq!(progress_bar(dec!(0), 4), "░░░░");
    assert_eq!(progress_bar(dec!(100), 4), "████");
}

#[test]
fn test_progress_bar_partial() {
    assert_eq!(progress_bar(dec!(50), 10), "█████░░░░░");
}

#[test]
fn test_progress_bar_clamps() {
    assert_eq!(progress_bar(dec!(250), 3), "███");
    assert_eq!(progress_bar(dec!(-10), 3), "░░░");
}

#[test]
fn test_progress_bar_width_in_chars() {
    assert_eq!(progress_bar(dec!(37), 20).chars().count(), 20);
}
