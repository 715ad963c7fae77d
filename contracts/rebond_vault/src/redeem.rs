//! Redemption engine: pulls matured value from a bonding venue, splits off
//! the fee, updates the ledger and returns the net proceeds to the vault's
//! staked position.
//!
//! Redemption is permissionless by design so an unavailable delegate can
//! never block it, and is an idempotent no-op when nothing is owed.

use crate::clients::{BondVenueClient, StakingVenueClient};
use crate::events;
use crate::ledger;
use crate::types::{AssetConfig, DataKey, VaultConfig};
use rebond_errors::RebondError;
use soroban_sdk::{panic_with_error, token::TokenClient, Address, Env};

fn config(e: &Env) -> VaultConfig {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(|| panic_with_error!(e, RebondError::NotInitialized))
}

fn assets(e: &Env) -> AssetConfig {
    e.storage()
        .instance()
        .get(&DataKey::Assets)
        .unwrap_or_else(|| panic_with_error!(e, RebondError::NotInitialized))
}

/// Redeem whatever the venue currently makes claimable for `depository`.
/// Returns the net amount after the fee; zero (without touching the ledger)
/// when no payout is outstanding or nothing has vested yet.
pub fn redeem_one(e: &Env, depository: &Address, remove_if_empty: bool) -> i128 {
    if ledger::outstanding_payout(e, depository) == 0 {
        return 0;
    }

    let this = e.current_contract_address();
    let gross = BondVenueClient::new(e, depository).redeem(&this, &false);
    if gross <= 0 {
        return 0;
    }

    // Ledger shrinks immediately after the venue call so a reentrant
    // observer can never see released value still recorded as outstanding.
    let net = ledger::record_redemption(e, depository, gross, remove_if_empty);
    let fee = gross - net;

    let cfg = config(e);
    let assets = assets(e);
    let base = TokenClient::new(e, &assets.base_token);
    if fee > 0 {
        base.transfer(&this, &cfg.fee_recipient, &fee);
    }
    if net > 0 {
        let expiry = e.ledger().sequence().saturating_add(17_280);
        base.approve(&this, &assets.staking_venue, &net, &expiry);
        StakingVenueClient::new(e, &assets.staking_venue).stake(&this, &net);
    }

    events::emit_bond_redeemed(e, depository, gross, fee, net);
    net
}

/// Redeem every depository currently in the active set, then compact.
/// The set is snapshotted before iterating since entries shrink under us.
pub fn redeem_all(e: &Env) {
    let snapshot = ledger::active_set(e);
    for depository in snapshot.iter() {
        redeem_one(e, &depository, false);
    }
    ledger::compact(e);
}
