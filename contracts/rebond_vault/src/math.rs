//! Overflow-safe arithmetic helpers for financial calculations.
//!
//! All functions use checked arithmetic and panic with
//! `RebondError::ArithmeticOverflow` on overflow/underflow/div-by-zero.

use rebond_errors::RebondError;
use soroban_sdk::{panic_with_error, Env};

pub const BPS_DENOM: i128 = 10_000;

/// Checked `u64` addition.
#[inline]
#[must_use]
pub fn add_u64(e: &Env, a: u64, b: u64) -> u64 {
    a.checked_add(b)
        .unwrap_or_else(|| panic_with_error!(e, RebondError::ArithmeticOverflow))
}

/// Checked `i128` addition.
#[inline]
#[must_use]
pub fn add_i128(e: &Env, a: i128, b: i128) -> i128 {
    a.checked_add(b)
        .unwrap_or_else(|| panic_with_error!(e, RebondError::ArithmeticOverflow))
}

/// Checked `i128` subtraction.
#[inline]
#[must_use]
pub fn sub_i128(e: &Env, a: i128, b: i128) -> i128 {
    a.checked_sub(b)
        .unwrap_or_else(|| panic_with_error!(e, RebondError::ArithmeticOverflow))
}

/// Checked `i128` multiplication.
#[inline]
#[must_use]
pub fn mul_i128(e: &Env, a: i128, b: i128) -> i128 {
    a.checked_mul(b)
        .unwrap_or_else(|| panic_with_error!(e, RebondError::ArithmeticOverflow))
}

/// Checked `i128` division.
#[inline]
#[must_use]
pub fn div_i128(e: &Env, a: i128, b: i128) -> i128 {
    a.checked_div(b)
        .unwrap_or_else(|| panic_with_error!(e, RebondError::ArithmeticOverflow))
}

/// Basis-point portion of an amount: `amount * bps / 10_000`.
#[inline]
#[must_use]
pub fn bps_of(e: &Env, amount: i128, bps: u32) -> i128 {
    div_i128(e, mul_i128(e, amount, bps as i128), BPS_DENOM)
}

/// Apply a basis-point fee: returns `(fee, net)`.
#[inline]
#[must_use]
pub fn apply_bps(e: &Env, amount: i128, bps: u32) -> (i128, i128) {
    let fee = bps_of(e, amount, bps);
    (fee, sub_i128(e, amount, fee))
}
