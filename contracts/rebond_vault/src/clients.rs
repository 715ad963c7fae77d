//! Client interfaces for the external collaborators the vault trades
//! against. Each trait generates a typed cross-contract client; tests
//! register mock contracts implementing the same surface.

use soroban_sdk::{contractclient, contracttype, Address, Env, Vec};

/// AMM router used for conversion swaps and liquidity provision.
#[contractclient(name = "AmmRouterClient")]
pub trait AmmRouter {
    /// Quote the output amounts along `path` for `amount_in`.
    fn quote(e: Env, amount_in: i128, path: Vec<Address>) -> Vec<i128>;

    /// Swap an exact input along `path`. Fails if the realized output is
    /// below `min_out` or `deadline` has passed.
    fn swap_exact_in(
        e: Env,
        amount_in: i128,
        min_out: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Vec<i128>;

    /// Provide liquidity to the `token_a`/`token_b` pool.
    /// Returns `(used_a, used_b, lp_minted)`.
    #[allow(clippy::too_many_arguments)]
    fn add_liquidity(
        e: Env,
        token_a: Address,
        token_b: Address,
        amount_a: i128,
        amount_b: i128,
        min_a: i128,
        min_b: i128,
        to: Address,
        deadline: u64,
    ) -> (i128, i128, i128);
}

/// Staking venue that locks the base asset and issues the staked receipt.
#[contractclient(name = "StakingVenueClient")]
pub trait StakingVenue {
    /// Current epoch: `(number, distribute_amount, period_length, period_end)`.
    fn epoch(e: Env) -> (u64, i128, u64, u64);

    fn stake(e: Env, from: Address, amount: i128);

    fn unstake(e: Env, from: Address, amount: i128, rebase: bool);

    fn claim(e: Env, recipient: Address);
}

/// Bonding venue: accepts a principal asset, owes a vesting payout.
#[contractclient(name = "BondVenueClient")]
pub trait BondVenue {
    /// Commit `amount` of principal at no worse than `max_price`.
    /// Returns the payout owed to `recipient`.
    fn deposit(e: Env, from: Address, amount: i128, max_price: i128, recipient: Address) -> i128;

    /// Release whatever is currently claimable for `recipient`.
    fn redeem(e: Env, recipient: Address, stake_result: bool) -> i128;

    fn bond_price(e: Env) -> i128;

    fn pending_payout_for(e: Env, depositor: Address) -> i128;
}

/// Converter between the staked asset and its wrapped representation.
#[contractclient(name = "AssetWrapperClient")]
pub trait AssetWrapper {
    fn wrap(e: Env, from: Address, amount: i128) -> i128;

    fn unwrap(e: Env, from: Address, amount: i128) -> i128;
}

/// Circulating-supply oracle exposed by the staked-asset token itself.
#[contractclient(name = "StakedTokenClient")]
pub trait StakedToken {
    fn circulating_supply(e: Env) -> i128;
}

/// How a depository's bonding venue is paid.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VenueType {
    SingleAsset,
    LiquidityPair,
}

/// Routing metadata for one bonding venue. Wire-compatible mirror of the
/// registry's descriptor type.
#[contracttype]
#[derive(Clone, Debug)]
pub struct DepositoryDescriptor {
    /// Token the venue is paid in; the pool token for liquidity pairs.
    pub principal_token: Address,
    pub venue_type: VenueType,
    pub router: Address,
    /// Swap-input side of the conversion.
    pub token_a: Address,
    /// Counter asset of the pair; equals `token_a` for single-asset venues.
    pub token_b: Address,
    pub conversion_path: Vec<Address>,
    pub uses_wrapped_asset: bool,
    pub active: bool,
}

/// Read surface of the depository registry consumed by the vault. Kept as a
/// client trait so tests can substitute a fake registry.
#[contractclient(name = "RegistryClient")]
pub trait Registry {
    fn get_depository(e: Env, id: Address) -> DepositoryDescriptor;
}
