//! Profitability gate: decides whether a quoted bond beats both the
//! depositor's fixed discount floor and a dynamic floor derived from the
//! current staking reward rate.
//!
//! The dynamic floor approximates the minimum return needed to beat five
//! days of continuously compounded staking, redeemed just before each
//! compounding event. The constants and the integer truncation order are
//! load-bearing for compatibility; do not re-derive them.

use crate::math::BPS_DENOM;
use rebond_errors::RebondError;

/// Scale applied when deriving the per-period staking rate from the reward
/// distribution and circulating supply.
pub const STAKING_ROI_SCALE: i128 = 100_000;

/// Additive term of the blended divisor.
pub const GATE_BLEND_BASE: i128 = 60;

/// Multiplicative term of the blended divisor.
pub const GATE_BLEND_FACTOR: i128 = 2;

/// Divisor applied to the staking rate inside the blend, and the numerator
/// scale of the final floor.
pub const GATE_PERIOD_SCALE: i128 = 100;

/// Outcome of an accepted evaluation, kept for event data and tests.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Evaluation {
    /// Realized bond return in basis points.
    pub bonding_roi_bps: i128,
    /// Staking-derived market floor in basis points.
    pub minimum_bonding_bps: i128,
}

/// Evaluate a bond quote. Pure function of its inputs; the market floor is
/// time-varying, so this runs on every bonding attempt.
pub fn evaluate(
    committed: i128,
    payout: i128,
    staking_reward_rate: i128,
    circulating_supply: i128,
    minimum_discount_bps: u32,
) -> Result<Evaluation, RebondError> {
    if committed <= 0 {
        return Err(RebondError::InvalidAmount);
    }
    if payout <= committed {
        return Err(RebondError::NonPositiveReturn);
    }

    let bonding_roi_bps = payout
        .checked_mul(BPS_DENOM)
        .and_then(|v| v.checked_div(committed))
        .and_then(|v| v.checked_sub(BPS_DENOM))
        .ok_or(RebondError::ArithmeticOverflow)?;

    if bonding_roi_bps < minimum_discount_bps as i128 {
        return Err(RebondError::BelowUserFloor);
    }

    let minimum_bonding_bps =
        market_floor_bps(staking_reward_rate, circulating_supply)?;

    if bonding_roi_bps < minimum_bonding_bps {
        return Err(RebondError::BelowMarketFloor);
    }

    Ok(Evaluation {
        bonding_roi_bps,
        minimum_bonding_bps,
    })
}

/// The staking-derived floor:
/// `roi = rate * 100000 / supply`, `k = 2 * (60 + roi / 100)`,
/// `floor = 100 * roi / k`. Integer division truncates at each step.
pub fn market_floor_bps(
    staking_reward_rate: i128,
    circulating_supply: i128,
) -> Result<i128, RebondError> {
    let staking_roi_bps = staking_reward_rate
        .checked_mul(STAKING_ROI_SCALE)
        .and_then(|v| v.checked_div(circulating_supply))
        .ok_or(RebondError::ArithmeticOverflow)?;

    let k = staking_roi_bps
        .checked_div(GATE_PERIOD_SCALE)
        .and_then(|v| v.checked_add(GATE_BLEND_BASE))
        .and_then(|v| v.checked_mul(GATE_BLEND_FACTOR))
        .ok_or(RebondError::ArithmeticOverflow)?;

    staking_roi_bps
        .checked_mul(GATE_PERIOD_SCALE)
        .and_then(|v| v.checked_div(k))
        .ok_or(RebondError::ArithmeticOverflow)
}
