//! Client interface for the vault surface the registry drives. Argument
//! order must stay in lockstep with `rebond_vault`'s entry points.

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "StrategyVaultClient")]
pub trait StrategyVault {
    #[allow(clippy::too_many_arguments)]
    fn initialize(
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
    );

    fn change_delegate(e: Env, new_delegate: Address);

    fn change_fee_recipient(e: Env, new_recipient: Address);

    fn redeem_all(e: Env);

    fn total_managed_funds(e: Env) -> i128;
}
