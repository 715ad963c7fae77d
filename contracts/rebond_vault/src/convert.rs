//! Asset converter: turns the vault's staked position into the principal a
//! bonding venue requires. Unstake-or-wrap, swap along the configured path,
//! and for liquidity-pair venues a swap-half-then-provide step whose unused
//! remainder is returned to the staked position.
//!
//! Every router call carries a short absolute deadline from the timestamp
//! read at operation start, bounding exposure to stale quotes. All steps run
//! inside one transaction; any panic rolls the whole commit back.

use crate::clients::{
    AmmRouterClient, AssetWrapperClient, DepositoryDescriptor, StakingVenueClient, VenueType,
};
use crate::math::{self, BPS_DENOM};
use crate::types::AssetConfig;
use rebond_errors::RebondError;
use soroban_sdk::{panic_with_error, token::TokenClient, Address, Env, Vec};

/// Absolute deadline window for router calls, in seconds.
pub const SWAP_DEADLINE: u64 = 60;

/// Protocol ceiling on the caller-supplied slippage tolerance.
pub const MAX_SLIPPAGE_BPS: u32 = 1_000;

/// Ledger-sequence window used for short-lived token allowances.
const ALLOWANCE_LEDGERS: u32 = 17_280;

fn allowance_expiry(e: &Env) -> u32 {
    e.ledger().sequence().saturating_add(ALLOWANCE_LEDGERS)
}

fn min_after_slippage(e: &Env, amount: i128, slippage_bps: u32) -> i128 {
    math::div_i128(
        e,
        math::mul_i128(e, amount, BPS_DENOM - slippage_bps as i128),
        BPS_DENOM,
    )
}

fn require_path(e: &Env, path: &Vec<Address>, from: &Address, to: &Address) {
    if path.len() < 2 {
        panic_with_error!(e, RebondError::InvalidPath);
    }
    let first = path.get(0).unwrap();
    let last = path.get(path.len() - 1).unwrap();
    if first != *from || last != *to {
        panic_with_error!(e, RebondError::InvalidPath);
    }
}

/// Swap `amount_in` of `path[0]` for `path[last]`, enforcing the quoted
/// output less `slippage_bps`. Returns the realized output.
fn swap(
    e: &Env,
    router: &AmmRouterClient,
    path: &Vec<Address>,
    amount_in: i128,
    slippage_bps: u32,
    deadline: u64,
) -> i128 {
    let this = e.current_contract_address();
    let quoted = router.quote(&amount_in, path);
    let expected = quoted
        .last()
        .unwrap_or_else(|| panic_with_error!(e, RebondError::UnexpectedSwapResult));
    let min_out = min_after_slippage(e, expected, slippage_bps);

    let token_in = path.get(0).unwrap();
    TokenClient::new(e, &token_in).approve(
        &this,
        &router.address,
        &amount_in,
        &allowance_expiry(e),
    );

    let amounts = router.swap_exact_in(&amount_in, &min_out, path, &this, &deadline);
    amounts
        .last()
        .unwrap_or_else(|| panic_with_error!(e, RebondError::UnexpectedSwapResult))
}

/// Convert `amount` of the vault's staked asset and commit it toward
/// `descriptor`'s principal. Returns `(principal_committed,
/// leftover_restaked)`, both measured in the venue's principal and the
/// staked asset respectively.
pub fn convert_and_commit(
    e: &Env,
    assets: &AssetConfig,
    descriptor: &DepositoryDescriptor,
    amount: i128,
    slippage_bps: u32,
) -> (i128, i128) {
    if slippage_bps > MAX_SLIPPAGE_BPS {
        panic_with_error!(e, RebondError::SlippageTooHigh);
    }

    let this = e.current_contract_address();
    let now = e.ledger().timestamp();
    let deadline = math::add_u64(e, now, SWAP_DEADLINE);

    let staked = TokenClient::new(e, &assets.staked_token);
    if staked.balance(&this) < amount {
        panic_with_error!(e, RebondError::InsufficientBalance);
    }

    // Step 1: acquire the swap source — wrapped form for venues quoted in
    // the wrapped asset, raw base asset otherwise.
    let (source_token, source_amount) = if descriptor.uses_wrapped_asset {
        staked.approve(&this, &assets.wrapper, &amount, &allowance_expiry(e));
        let wrapped = AssetWrapperClient::new(e, &assets.wrapper).wrap(&this, &amount);
        (assets.wrapped_token.clone(), wrapped)
    } else {
        staked.approve(&this, &assets.staking_venue, &amount, &allowance_expiry(e));
        StakingVenueClient::new(e, &assets.staking_venue).unstake(&this, &amount, &false);
        (assets.base_token.clone(), amount)
    };

    let router = AmmRouterClient::new(e, &descriptor.router);

    match descriptor.venue_type {
        VenueType::SingleAsset => {
            require_path(
                e,
                &descriptor.conversion_path,
                &source_token,
                &descriptor.principal_token,
            );
            let out = swap(
                e,
                &router,
                &descriptor.conversion_path,
                source_amount,
                slippage_bps,
                deadline,
            );
            (out, 0)
        }
        VenueType::LiquidityPair => {
            // Swap exactly half for the counter asset, then pool it with the
            // remaining half, biased to exhaust the counter side.
            require_path(
                e,
                &descriptor.conversion_path,
                &source_token,
                &descriptor.token_b,
            );
            let half = source_amount / 2;
            let keep = math::sub_i128(e, source_amount, half);
            let counter_received = swap(
                e,
                &router,
                &descriptor.conversion_path,
                half,
                slippage_bps,
                deadline,
            );

            let expiry = allowance_expiry(e);
            TokenClient::new(e, &descriptor.token_b).approve(
                &this,
                &descriptor.router,
                &counter_received,
                &expiry,
            );
            TokenClient::new(e, &source_token).approve(
                &this,
                &descriptor.router,
                &keep,
                &expiry,
            );

            let min_counter = min_after_slippage(e, counter_received, slippage_bps);
            let (_used_counter, used_source, lp_minted) = router.add_liquidity(
                &descriptor.token_b,
                &source_token,
                &counter_received,
                &keep,
                &min_counter,
                &0_i128,
                &this,
                &deadline,
            );

            let leftover = math::sub_i128(e, keep, used_source);
            let leftover_restaked = if leftover > 0 {
                restake_leftover(e, assets, descriptor, leftover)
            } else {
                0
            };
            (lp_minted, leftover_restaked)
        }
    }
}

/// Return an unused source-side remainder to the vault's staked position:
/// unwrap for wrapped venues, re-stake otherwise. Returns the amount
/// recovered in staked-asset units.
fn restake_leftover(
    e: &Env,
    assets: &AssetConfig,
    descriptor: &DepositoryDescriptor,
    leftover: i128,
) -> i128 {
    let this = e.current_contract_address();
    if descriptor.uses_wrapped_asset {
        TokenClient::new(e, &assets.wrapped_token).approve(
            &this,
            &assets.wrapper,
            &leftover,
            &allowance_expiry(e),
        );
        AssetWrapperClient::new(e, &assets.wrapper).unwrap(&this, &leftover)
    } else {
        TokenClient::new(e, &assets.base_token).approve(
            &this,
            &assets.staking_venue,
            &leftover,
            &allowance_expiry(e),
        );
        StakingVenueClient::new(e, &assets.staking_venue).stake(&this, &leftover);
        leftover
    }
}
