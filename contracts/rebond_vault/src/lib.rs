#![no_std]

//! # Rebond Strategy Vault
//!
//! One isolated vault per depositor. Holds a yield-bearing staked asset,
//! converts slices of it into whatever principal a bonding venue requires,
//! commits that principal to a fixed-term bond when the return clears both
//! the depositor's discount floor and a staking-derived market floor, and
//! later redeems matured bonds back into the staked asset, skimming a fee.
//!
//! ## Security
//! - Checks-Effects-Interactions around every external venue call
//! - Explicit reentrancy lock on bond and redemption entry points
//! - Auth-gated mutations: depositor, delegate or admin per operation
//! - Overflow-safe arithmetic throughout

mod access;
mod convert;
mod events;
mod gate;
mod ledger;
mod math;
mod redeem;

pub mod clients;
pub mod types;

use clients::{BondVenueClient, RegistryClient, StakedTokenClient, StakingVenueClient};
use rebond_errors::RebondError;
use soroban_sdk::{
    contract, contractimpl, panic_with_error, token::TokenClient, Address, Env, Vec,
};
use types::{AccessMode, AssetConfig, BondRecord, BondTranche, DataKey, LedgerMode, VaultConfig};

pub use convert::{MAX_SLIPPAGE_BPS, SWAP_DEADLINE};
pub use gate::Evaluation;
pub use ledger::VESTING_PERIOD;

// ─── Helpers ───────────────────────────────────────────────────────────────

fn get_config(e: &Env) -> VaultConfig {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(|| panic_with_error!(e, RebondError::NotInitialized))
}

fn set_config(e: &Env, cfg: &VaultConfig) {
    e.storage().instance().set(&DataKey::Config, cfg);
}

fn get_asset_config(e: &Env) -> AssetConfig {
    e.storage()
        .instance()
        .get(&DataKey::Assets)
        .unwrap_or_else(|| panic_with_error!(e, RebondError::NotInitialized))
}

fn require_positive(e: &Env, amount: i128) {
    if amount <= 0 {
        panic_with_error!(e, RebondError::InvalidAmount);
    }
}

const ALLOWANCE_LEDGERS: u32 = 17_280;

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct RebondVault;

#[contractimpl]
impl RebondVault {
    // ── Setup ──────────────────────────────────────────────────────────────

    /// One-time initialization, normally driven by the registry.
    ///
    /// # Panics
    /// * `AlreadyInitialized` on a second call
    /// * `FeeTooHigh` if `fee_bps >= 10000`
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        e: Env,
        depositor: Address,
        delegate: Address,
        admin: Address,
        fee_recipient: Address,
        fee_bps: u32,
        minimum_discount_bps: u32,
        managed: bool,
        ledger_tranched: bool,
        staked_token: Address,
        base_token: Address,
        wrapped_token: Address,
        wrapper: Address,
        staking_venue: Address,
        registry: Address,
    ) {
        if e.storage().instance().has(&DataKey::Config) {
            panic_with_error!(&e, RebondError::AlreadyInitialized);
        }
        if fee_bps >= 10_000 {
            panic_with_error!(&e, RebondError::FeeTooHigh);
        }

        let cfg = VaultConfig {
            depositor: depositor.clone(),
            delegate: delegate.clone(),
            admin,
            fee_recipient,
            fee_bps,
            minimum_discount_bps,
            access_mode: if managed {
                AccessMode::Managed
            } else {
                AccessMode::Manual
            },
            ledger_mode: if ledger_tranched {
                LedgerMode::Tranched
            } else {
                LedgerMode::Merged
            },
        };
        set_config(&e, &cfg);
        e.storage().instance().set(
            &DataKey::Assets,
            &AssetConfig {
                staked_token,
                base_token,
                wrapped_token,
                wrapper,
                staking_venue,
                registry,
            },
        );

        events::emit_vault_initialized(&e, &depositor, &delegate);
    }

    // ── Depositor funds ────────────────────────────────────────────────────

    /// Pull `amount` of the staked asset from the depositor into the vault.
    pub fn deposit(e: Env, amount: i128) {
        let cfg = get_config(&e);
        cfg.depositor.require_auth();
        require_positive(&e, amount);

        let assets = get_asset_config(&e);
        let this = e.current_contract_address();
        TokenClient::new(&e, &assets.staked_token).transfer_from(
            &this,
            &cfg.depositor,
            &this,
            &amount,
        );

        events::emit_deposited(&e, &cfg.depositor, amount);
    }

    /// Return `amount` of the vault's free staked balance to the depositor.
    /// Bonded value cannot be withdrawn until it is redeemed.
    pub fn withdraw(e: Env, amount: i128) {
        let cfg = get_config(&e);
        cfg.depositor.require_auth();
        require_positive(&e, amount);

        let assets = get_asset_config(&e);
        let this = e.current_contract_address();
        let staked = TokenClient::new(&e, &assets.staked_token);
        if staked.balance(&this) < amount {
            panic_with_error!(&e, RebondError::InsufficientBalance);
        }
        staked.transfer(&this, &cfg.depositor, &amount);

        events::emit_withdrawn(&e, &cfg.depositor, amount);
    }

    // ── Bonding ────────────────────────────────────────────────────────────

    /// Convert `amount` of the staked asset and commit it to `depository`'s
    /// bond. The whole chain — unstake/wrap, swap, optional liquidity add,
    /// venue deposit, profitability check — is atomic: any failure rolls
    /// everything back.
    ///
    /// Returns the payout owed by the venue.
    pub fn bond(e: Env, depository: Address, amount: i128, slippage_bps: u32) -> i128 {
        let cfg = get_config(&e);
        access::require_bond_initiator(&e, &cfg);
        access::acquire_lock(&e);
        require_positive(&e, amount);

        let assets = get_asset_config(&e);
        let descriptor = RegistryClient::new(&e, &assets.registry).get_depository(&depository);
        if !descriptor.active {
            panic_with_error!(&e, RebondError::DepositoryInactive);
        }

        let (principal, leftover) =
            convert::convert_and_commit(&e, &assets, &descriptor, amount, slippage_bps);

        let this = e.current_contract_address();
        let venue = BondVenueClient::new(&e, &depository);
        let max_price = venue.bond_price();
        let expiry = e.ledger().sequence().saturating_add(ALLOWANCE_LEDGERS);
        TokenClient::new(&e, &descriptor.principal_token).approve(
            &this,
            &depository,
            &principal,
            &expiry,
        );
        let payout = venue.deposit(&this, &principal, &max_price, &this);

        // Profitability gate runs after the venue quotes the real payout;
        // a rejection unwinds the entire conversion.
        let committed = math::sub_i128(&e, amount, leftover);
        let (_, distribute, _, _) =
            StakingVenueClient::new(&e, &assets.staking_venue).epoch();
        let supply = StakedTokenClient::new(&e, &assets.staked_token).circulating_supply();
        if let Err(err) = gate::evaluate(
            committed,
            payout,
            distribute,
            supply,
            cfg.minimum_discount_bps,
        ) {
            panic_with_error!(&e, err);
        }

        ledger::record_bond(&e, &depository, payout, principal);
        events::emit_bond_created(&e, &depository, principal, payout, leftover);

        access::release_lock(&e);
        payout
    }

    /// Claim any pending staking rewards, then stake `amount` of the vault's
    /// idle base-token balance. Permissionless housekeeping: it can only
    /// move value into the vault's own staked position.
    pub fn stake_assets(e: Env, amount: i128) {
        require_positive(&e, amount);

        let assets = get_asset_config(&e);
        let this = e.current_contract_address();
        let staking = StakingVenueClient::new(&e, &assets.staking_venue);
        staking.claim(&this);

        let base = TokenClient::new(&e, &assets.base_token);
        if base.balance(&this) < amount {
            panic_with_error!(&e, RebondError::InsufficientBalance);
        }
        let expiry = e.ledger().sequence().saturating_add(ALLOWANCE_LEDGERS);
        base.approve(&this, &assets.staking_venue, &amount, &expiry);
        staking.stake(&this, &amount);

        events::emit_assets_staked(&e, amount);
    }

    // ── Redemption (permissionless) ────────────────────────────────────────

    /// Redeem whatever `depository` currently makes claimable. Idempotent:
    /// returns zero and leaves the ledger untouched when nothing is owed.
    pub fn redeem(e: Env, depository: Address) -> i128 {
        access::acquire_lock(&e);
        let net = redeem::redeem_one(&e, &depository, true);
        access::release_lock(&e);
        net
    }

    /// Redeem every active bond, then compact the active set.
    pub fn redeem_all(e: Env) {
        access::acquire_lock(&e);
        redeem::redeem_all(&e);
        access::release_lock(&e);
    }

    // ── Depositor configuration ────────────────────────────────────────────

    /// Toggle between manual and managed bonding. Depositor only.
    pub fn set_managed(e: Env, managed: bool) {
        let mut cfg = get_config(&e);
        cfg.depositor.require_auth();

        let new_mode = if managed {
            AccessMode::Managed
        } else {
            AccessMode::Manual
        };
        if cfg.access_mode == new_mode {
            panic_with_error!(&e, RebondError::StatusUnchanged);
        }
        cfg.access_mode = new_mode;
        set_config(&e, &cfg);

        events::emit_mode_changed(&e, &cfg.depositor, managed);
    }

    /// Change the minimum acceptable bond discount. Depositor only; the new
    /// value must differ from the current one.
    pub fn set_minimum_discount(e: Env, minimum_discount_bps: u32) {
        let mut cfg = get_config(&e);
        cfg.depositor.require_auth();

        if cfg.minimum_discount_bps == minimum_discount_bps {
            panic_with_error!(&e, RebondError::DiscountUnchanged);
        }
        let old = cfg.minimum_discount_bps;
        cfg.minimum_discount_bps = minimum_discount_bps;
        set_config(&e, &cfg);

        events::emit_discount_changed(&e, &cfg.depositor, old, minimum_discount_bps);
    }

    // ── Administrative (admin identity, e.g. the registry) ─────────────────

    /// Rotate the delegate. Admin only, enabling recovery from a compromised
    /// delegate key without granting the admin fund-movement rights.
    pub fn change_delegate(e: Env, new_delegate: Address) {
        let mut cfg = get_config(&e);
        cfg.admin.require_auth();

        cfg.delegate = new_delegate.clone();
        set_config(&e, &cfg);

        events::emit_delegate_changed(&e, &new_delegate);
    }

    /// Rotate the fee recipient. Admin only.
    pub fn change_fee_recipient(e: Env, new_recipient: Address) {
        let mut cfg = get_config(&e);
        cfg.admin.require_auth();

        cfg.fee_recipient = new_recipient.clone();
        set_config(&e, &cfg);

        events::emit_fee_recipient_changed(&e, &new_recipient);
    }

    // ── Views ──────────────────────────────────────────────────────────────

    pub fn get_config(e: Env) -> VaultConfig {
        get_config(&e)
    }

    pub fn get_assets(e: Env) -> AssetConfig {
        get_asset_config(&e)
    }

    /// Outstanding payout owed by one depository; zero when no bond exists.
    pub fn bonded_funds(e: Env, depository: Address) -> i128 {
        ledger::outstanding_payout(&e, &depository)
    }

    /// Sum of outstanding payouts across all active bonds.
    pub fn total_bonded_funds(e: Env) -> i128 {
        ledger::total_bonded_funds(&e)
    }

    /// Everything the vault manages: free staked balance, idle base balance
    /// and value still vesting in bonds.
    pub fn total_managed_funds(e: Env) -> i128 {
        let assets = get_asset_config(&e);
        let this = e.current_contract_address();
        let staked = TokenClient::new(&e, &assets.staked_token).balance(&this);
        let base = TokenClient::new(&e, &assets.base_token).balance(&this);
        let bonded = ledger::total_bonded_funds(&e);
        math::add_i128(&e, math::add_i128(&e, staked, base), bonded)
    }

    pub fn active_bond_count(e: Env) -> u32 {
        ledger::active_set(&e).len()
    }

    pub fn active_bonds(e: Env) -> Vec<Address> {
        ledger::active_set(&e)
    }

    /// Merged-mode record for a depository; zero record when no bond exists.
    pub fn get_bond(e: Env, depository: Address) -> BondRecord {
        ledger::get_bond(&e, &depository)
    }

    /// Tranched-mode records for a depository; empty when no bond exists.
    pub fn get_tranches(e: Env, depository: Address) -> Vec<BondTranche> {
        ledger::get_tranches(&e, &depository)
    }
}

#[cfg(test)]
mod test_helpers;
