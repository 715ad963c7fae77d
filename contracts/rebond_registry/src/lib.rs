#![no_std]

//! # Rebond Registry
//!
//! Central registry for the bonding strategy: maps bonding venues
//! ("depositories") to their routing metadata, provisions one isolated
//! strategy vault per depositor, and offers batched administrative fan-out
//! across all vaults.
//!
//! ## Features
//! - Depository descriptor CRUD with an enumerable live set
//! - One-to-one depositor-to-vault mapping
//! - Batched delegate/fee-recipient rotation and redeem-all, all-or-nothing
//! - Aggregate fund accounting across vaults
//!
//! ## Security
//! - Admin-controlled registration and metadata management
//! - Batches are pre-validated before any sub-call executes
//! - Emits events for all registry operations

pub mod types;
mod vault_client;

use rebond_errors::RebondError;
use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Env, Symbol, Vec};
use types::DataKey;
use vault_client::StrategyVaultClient;

pub use types::{DepositoryDescriptor, SharedParams, VenueType};

// ─── Helpers ───────────────────────────────────────────────────────────────

fn get_admin(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::Admin)
        .unwrap_or_else(|| panic_with_error!(e, RebondError::NotInitialized))
}

fn require_admin(e: &Env) -> Address {
    let admin = get_admin(e);
    admin.require_auth();
    admin
}

fn get_shared(e: &Env) -> SharedParams {
    e.storage()
        .instance()
        .get(&DataKey::Shared)
        .unwrap_or_else(|| panic_with_error!(e, RebondError::NotInitialized))
}

fn depositories(e: &Env) -> Vec<Address> {
    e.storage()
        .instance()
        .get(&DataKey::Depositories)
        .unwrap_or_else(|| Vec::new(e))
}

fn depositors(e: &Env) -> Vec<Address> {
    e.storage()
        .instance()
        .get(&DataKey::Depositors)
        .unwrap_or_else(|| Vec::new(e))
}

fn get_descriptor(e: &Env, id: &Address) -> DepositoryDescriptor {
    e.storage()
        .persistent()
        .get(&DataKey::Depository(id.clone()))
        .unwrap_or_else(|| panic_with_error!(e, RebondError::DepositoryNotFound))
}

fn vault_for(e: &Env, depositor: &Address) -> Address {
    e.storage()
        .persistent()
        .get(&DataKey::Vault(depositor.clone()))
        .unwrap_or_else(|| panic_with_error!(e, RebondError::UnknownDepositor))
}

/// Pre-validate a batch so no sub-call executes unless every entry resolves.
fn require_vaults(e: &Env, batch: &Vec<Address>) -> Vec<Address> {
    if batch.is_empty() {
        panic_with_error!(e, RebondError::EmptyBatch);
    }
    let mut vaults: Vec<Address> = Vec::new(e);
    for depositor in batch.iter() {
        vaults.push_back(vault_for(e, &depositor));
    }
    vaults
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct RebondRegistry;

#[contractimpl]
impl RebondRegistry {
    /// Initialize with an admin and the shared parameters every
    /// factory-created vault is bound to.
    ///
    /// # Panics
    /// * `AlreadyInitialized` on a second call
    /// * `FeeTooHigh` if `shared.fee_bps >= 10000`
    pub fn initialize(e: Env, admin: Address, shared: SharedParams) {
        if e.storage().instance().has(&DataKey::Admin) {
            panic_with_error!(&e, RebondError::AlreadyInitialized);
        }
        if shared.fee_bps >= 10_000 {
            panic_with_error!(&e, RebondError::FeeTooHigh);
        }
        admin.require_auth();

        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::Shared, &shared);

        e.events()
            .publish((Symbol::new(&e, "registry_initialized"),), admin);
    }

    // ── Depository metadata (admin-only CRUD) ──────────────────────────────

    /// List a bonding venue with its routing metadata. The venue's contract
    /// address is the depository identifier.
    #[allow(clippy::too_many_arguments)]
    pub fn add_depository(
        e: Env,
        id: Address,
        principal_token: Address,
        venue_type: VenueType,
        router: Address,
        token_a: Address,
        token_b: Address,
        conversion_path: Vec<Address>,
        uses_wrapped_asset: bool,
    ) -> DepositoryDescriptor {
        require_admin(&e);

        let key = DataKey::Depository(id.clone());
        if e.storage().persistent().has(&key) {
            panic_with_error!(&e, RebondError::DepositoryAlreadyListed);
        }
        if conversion_path.len() < 2 {
            panic_with_error!(&e, RebondError::InvalidPath);
        }

        let descriptor = DepositoryDescriptor {
            principal_token,
            venue_type,
            router,
            token_a,
            token_b,
            conversion_path,
            uses_wrapped_asset,
            active: true,
        };
        e.storage().persistent().set(&key, &descriptor);

        let mut live = depositories(&e);
        live.push_back(id.clone());
        e.storage().instance().set(&DataKey::Depositories, &live);

        e.events()
            .publish((Symbol::new(&e, "depository_added"), id), descriptor.clone());

        descriptor
    }

    /// Delist a bonding venue. The descriptor is deleted and the id leaves
    /// the enumerable set; a later `add_depository` may relist it.
    pub fn remove_depository(e: Env, id: Address) {
        require_admin(&e);

        let key = DataKey::Depository(id.clone());
        if !e.storage().persistent().has(&key) {
            panic_with_error!(&e, RebondError::DepositoryNotFound);
        }
        e.storage().persistent().remove(&key);

        let mut live = depositories(&e);
        if let Some(idx) = live.first_index_of(&id) {
            let last = live.len() - 1;
            if idx != last {
                let tail = live.get(last).unwrap();
                live.set(idx, tail);
            }
            live.pop_back();
            e.storage().instance().set(&DataKey::Depositories, &live);
        }

        e.events()
            .publish((Symbol::new(&e, "depository_removed"),), id);
    }

    /// Enable or disable a depository for new bonds. Rejects no-op changes.
    pub fn set_depository_active(e: Env, id: Address, active: bool) {
        require_admin(&e);

        let mut descriptor = get_descriptor(&e, &id);
        if descriptor.active == active {
            panic_with_error!(&e, RebondError::StatusUnchanged);
        }
        descriptor.active = active;
        e.storage()
            .persistent()
            .set(&DataKey::Depository(id.clone()), &descriptor);

        e.events()
            .publish((Symbol::new(&e, "depository_status"), id), active);
    }

    /// Replace a depository's conversion path.
    pub fn update_conversion_path(e: Env, id: Address, path: Vec<Address>) {
        require_admin(&e);

        if path.len() < 2 {
            panic_with_error!(&e, RebondError::InvalidPath);
        }
        let mut descriptor = get_descriptor(&e, &id);
        descriptor.conversion_path = path.clone();
        e.storage()
            .persistent()
            .set(&DataKey::Depository(id.clone()), &descriptor);

        e.events()
            .publish((Symbol::new(&e, "path_updated"), id), path);
    }

    /// Read contract consumed by every vault.
    pub fn get_depository(e: Env, id: Address) -> DepositoryDescriptor {
        get_descriptor(&e, &id)
    }

    pub fn get_all_depositories(e: Env) -> Vec<Address> {
        depositories(&e)
    }

    // ── Vault factory ──────────────────────────────────────────────────────

    /// Bind a freshly deployed, uninitialized vault to `depositor` and the
    /// registry's shared parameters. The registry installs itself as the
    /// vault's admin so batched fan-out carries contract-invoker auth.
    ///
    /// # Panics
    /// * `VaultAlreadyExists` if the depositor already owns a vault
    pub fn create_vault(
        e: Env,
        depositor: Address,
        vault: Address,
        minimum_discount_bps: u32,
        managed: bool,
        ledger_tranched: bool,
    ) -> Address {
        require_admin(&e);

        let key = DataKey::Vault(depositor.clone());
        if e.storage().persistent().has(&key) {
            panic_with_error!(&e, RebondError::VaultAlreadyExists);
        }

        let shared = get_shared(&e);
        StrategyVaultClient::new(&e, &vault).initialize(
            &depositor,
            &shared.delegate,
            &e.current_contract_address(),
            &shared.fee_recipient,
            &shared.fee_bps,
            &minimum_discount_bps,
            &managed,
            &ledger_tranched,
            &shared.staked_token,
            &shared.base_token,
            &shared.wrapped_token,
            &shared.wrapper,
            &shared.staking_venue,
            &e.current_contract_address(),
        );

        e.storage().persistent().set(&key, &vault);
        let mut all = depositors(&e);
        all.push_back(depositor.clone());
        e.storage().instance().set(&DataKey::Depositors, &all);

        e.events()
            .publish((Symbol::new(&e, "vault_created"), depositor), vault.clone());

        vault
    }

    /// Lookup the vault owned by `depositor`.
    pub fn vault_of(e: Env, depositor: Address) -> Address {
        vault_for(&e, &depositor)
    }

    pub fn get_all_depositors(e: Env) -> Vec<Address> {
        depositors(&e)
    }

    // ── Batched fan-out (all-or-nothing) ───────────────────────────────────

    /// Rotate the delegate on every listed depositor's vault.
    pub fn batch_change_delegate(e: Env, batch: Vec<Address>, new_delegate: Address) {
        require_admin(&e);

        let vaults = require_vaults(&e, &batch);
        for vault in vaults.iter() {
            StrategyVaultClient::new(&e, &vault).change_delegate(&new_delegate);
        }

        e.events().publish(
            (Symbol::new(&e, "delegates_rotated"),),
            (batch.len(), new_delegate),
        );
    }

    /// Rotate the fee recipient on every listed depositor's vault.
    pub fn batch_change_fee_recipient(e: Env, batch: Vec<Address>, new_recipient: Address) {
        require_admin(&e);

        let vaults = require_vaults(&e, &batch);
        for vault in vaults.iter() {
            StrategyVaultClient::new(&e, &vault).change_fee_recipient(&new_recipient);
        }

        e.events().publish(
            (Symbol::new(&e, "fee_recipients_rotated"),),
            (batch.len(), new_recipient),
        );
    }

    /// Trigger redemption on every listed depositor's vault. Permissionless,
    /// like the per-vault call.
    pub fn batch_redeem_all(e: Env, batch: Vec<Address>) {
        let vaults = require_vaults(&e, &batch);
        for vault in vaults.iter() {
            StrategyVaultClient::new(&e, &vault).redeem_all();
        }
    }

    // ── Aggregate accounting ───────────────────────────────────────────────

    /// Total managed funds summed across every vault from this registry.
    pub fn total_funds(e: Env) -> i128 {
        let mut total = 0_i128;
        for depositor in depositors(&e).iter() {
            let vault = vault_for(&e, &depositor);
            let funds = StrategyVaultClient::new(&e, &vault).total_managed_funds();
            total = total
                .checked_add(funds)
                .unwrap_or_else(|| panic_with_error!(&e, RebondError::ArithmeticOverflow));
        }
        total
    }

    // ── Admin ──────────────────────────────────────────────────────────────

    pub fn get_admin(e: Env) -> Address {
        get_admin(&e)
    }

    pub fn transfer_admin(e: Env, new_admin: Address) {
        require_admin(&e);
        e.storage().instance().set(&DataKey::Admin, &new_admin);

        e.events()
            .publish((Symbol::new(&e, "admin_transferred"),), new_admin);
    }
}
