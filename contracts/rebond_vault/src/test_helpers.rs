//! Shared test fixtures: mock collaborator contracts (staked token with a
//! supply oracle, staking venue, AMM router, bonding venue, wrapper, fake
//! registry) and a full-environment `setup`.

#![cfg(test)]

use crate::clients::{DepositoryDescriptor, VenueType};
use crate::{RebondVault, RebondVaultClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{contract, contractimpl, contracttype, vec, Address, Env, Vec};

/// Default depositor mint, large enough for every scenario.
pub const DEFAULT_MINT: i128 = 1_000_000;
/// Reserve minted to each mock venue so it can pay out.
pub const RESERVE: i128 = 1_000_000_000;
/// Default redemption fee: 5%.
pub const FEE_BPS: u32 = 500;
/// Default depositor discount floor: 7%.
pub const MIN_DISCOUNT_BPS: u32 = 700;
/// Default epoch distribution; with `SUPPLY` this yields a 384 bps market
/// floor (staking roi 500 bps, k = 130).
pub const DISTRIBUTE: i128 = 50;
pub const SUPPLY: i128 = 10_000;

fn expiry(e: &Env) -> u32 {
    e.ledger().sequence().saturating_add(100_000)
}

// ─── Mock staked token (token interface + circulating-supply oracle) ───────

#[contracttype]
pub enum StakedKey {
    Bal(Address),
    Allow(Address, Address),
    Supply,
}

#[contract]
pub struct MockStakedToken;

#[contractimpl]
impl MockStakedToken {
    pub fn mint(e: Env, to: Address, amount: i128) {
        let key = StakedKey::Bal(to);
        let bal: i128 = e.storage().instance().get(&key).unwrap_or(0);
        e.storage().instance().set(&key, &(bal + amount));
    }

    pub fn set_supply(e: Env, amount: i128) {
        e.storage().instance().set(&StakedKey::Supply, &amount);
    }

    pub fn circulating_supply(e: Env) -> i128 {
        e.storage().instance().get(&StakedKey::Supply).unwrap_or(0)
    }

    pub fn balance(e: Env, id: Address) -> i128 {
        e.storage().instance().get(&StakedKey::Bal(id)).unwrap_or(0)
    }

    pub fn allowance(e: Env, from: Address, spender: Address) -> i128 {
        e.storage()
            .instance()
            .get(&StakedKey::Allow(from, spender))
            .unwrap_or(0)
    }

    pub fn approve(e: Env, from: Address, spender: Address, amount: i128, _live_until: u32) {
        from.require_auth();
        e.storage()
            .instance()
            .set(&StakedKey::Allow(from, spender), &amount);
    }

    pub fn transfer(e: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        Self::move_balance(&e, &from, &to, amount);
    }

    pub fn transfer_from(e: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        let key = StakedKey::Allow(from.clone(), spender);
        let allowed: i128 = e.storage().instance().get(&key).unwrap_or(0);
        if allowed < amount {
            panic!("insufficient allowance");
        }
        e.storage().instance().set(&key, &(allowed - amount));
        Self::move_balance(&e, &from, &to, amount);
    }
}

impl MockStakedToken {
    fn move_balance(e: &Env, from: &Address, to: &Address, amount: i128) {
        let from_key = StakedKey::Bal(from.clone());
        let from_bal: i128 = e.storage().instance().get(&from_key).unwrap_or(0);
        if from_bal < amount {
            panic!("insufficient balance");
        }
        e.storage().instance().set(&from_key, &(from_bal - amount));
        let to_key = StakedKey::Bal(to.clone());
        let to_bal: i128 = e.storage().instance().get(&to_key).unwrap_or(0);
        e.storage().instance().set(&to_key, &(to_bal + amount));
    }
}

// ─── Mock staking venue ────────────────────────────────────────────────────

#[contracttype]
pub enum StakingKey {
    Base,
    Staked,
    Distribute,
}

#[contract]
pub struct MockStaking;

#[contractimpl]
impl MockStaking {
    pub fn init(e: Env, base: Address, staked: Address) {
        e.storage().instance().set(&StakingKey::Base, &base);
        e.storage().instance().set(&StakingKey::Staked, &staked);
    }

    pub fn set_distribute(e: Env, amount: i128) {
        e.storage().instance().set(&StakingKey::Distribute, &amount);
    }

    pub fn epoch(e: Env) -> (u64, i128, u64, u64) {
        let distribute: i128 = e
            .storage()
            .instance()
            .get(&StakingKey::Distribute)
            .unwrap_or(0);
        let now = e.ledger().timestamp();
        (1, distribute, 28_800, now + 28_800)
    }

    pub fn stake(e: Env, from: Address, amount: i128) {
        let this = e.current_contract_address();
        let base: Address = e.storage().instance().get(&StakingKey::Base).unwrap();
        let staked: Address = e.storage().instance().get(&StakingKey::Staked).unwrap();
        TokenClient::new(&e, &base).transfer_from(&this, &from, &this, &amount);
        TokenClient::new(&e, &staked).transfer(&this, &from, &amount);
    }

    pub fn unstake(e: Env, from: Address, amount: i128, _rebase: bool) {
        let this = e.current_contract_address();
        let base: Address = e.storage().instance().get(&StakingKey::Base).unwrap();
        let staked: Address = e.storage().instance().get(&StakingKey::Staked).unwrap();
        TokenClient::new(&e, &staked).transfer_from(&this, &from, &this, &amount);
        TokenClient::new(&e, &base).transfer(&this, &from, &amount);
    }

    pub fn claim(_e: Env, _recipient: Address) {}
}

// ─── Mock AMM router ───────────────────────────────────────────────────────

#[contracttype]
pub enum RouterKey {
    /// Output bps per input unit for a (token_in, token_out) pair.
    Rate(Address, Address),
    LpToken,
    /// Fraction of the b-side desired amount the pool consumes.
    UseBBps,
}

#[contract]
pub struct MockRouter;

#[contractimpl]
impl MockRouter {
    pub fn set_rate(e: Env, token_in: Address, token_out: Address, rate_bps: i128) {
        e.storage()
            .instance()
            .set(&RouterKey::Rate(token_in, token_out), &rate_bps);
    }

    pub fn set_liquidity(e: Env, lp_token: Address, use_b_bps: i128) {
        e.storage().instance().set(&RouterKey::LpToken, &lp_token);
        e.storage().instance().set(&RouterKey::UseBBps, &use_b_bps);
    }

    pub fn quote(e: Env, amount_in: i128, path: Vec<Address>) -> Vec<i128> {
        let out = Self::rate_out(&e, amount_in, &path);
        vec![&e, amount_in, out]
    }

    pub fn swap_exact_in(
        e: Env,
        amount_in: i128,
        min_out: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Vec<i128> {
        if deadline < e.ledger().timestamp() {
            panic!("router: deadline expired");
        }
        let out = Self::rate_out(&e, amount_in, &path);
        if out < min_out {
            panic!("router: insufficient output amount");
        }
        let this = e.current_contract_address();
        let token_in = path.get(0).unwrap();
        let token_out = path.get(path.len() - 1).unwrap();
        TokenClient::new(&e, &token_in).transfer_from(&this, &to, &this, &amount_in);
        TokenClient::new(&e, &token_out).transfer(&this, &to, &out);
        vec![&e, amount_in, out]
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_liquidity(
        e: Env,
        token_a: Address,
        token_b: Address,
        amount_a: i128,
        amount_b: i128,
        min_a: i128,
        min_b: i128,
        to: Address,
        deadline: u64,
    ) -> (i128, i128, i128) {
        if deadline < e.ledger().timestamp() {
            panic!("router: deadline expired");
        }
        let use_b_bps: i128 = e.storage().instance().get(&RouterKey::UseBBps).unwrap_or(10_000);
        let used_a = amount_a;
        let used_b = amount_b * use_b_bps / 10_000;
        if used_a < min_a || used_b < min_b {
            panic!("router: insufficient liquidity amounts");
        }
        let this = e.current_contract_address();
        TokenClient::new(&e, &token_a).transfer_from(&this, &to, &this, &used_a);
        TokenClient::new(&e, &token_b).transfer_from(&this, &to, &this, &used_b);
        let lp_token: Address = e.storage().instance().get(&RouterKey::LpToken).unwrap();
        let lp = used_a + used_b;
        TokenClient::new(&e, &lp_token).transfer(&this, &to, &lp);
        (used_a, used_b, lp)
    }
}

impl MockRouter {
    fn rate_out(e: &Env, amount_in: i128, path: &Vec<Address>) -> i128 {
        let first = path.get(0).unwrap();
        let last = path.get(path.len() - 1).unwrap();
        let rate: i128 = e
            .storage()
            .instance()
            .get(&RouterKey::Rate(first, last))
            .unwrap_or_else(|| panic!("router: no rate configured"));
        amount_in * rate / 10_000
    }
}

// ─── Mock bonding venue ────────────────────────────────────────────────────

#[contracttype]
pub enum VenueKey {
    Principal,
    Base,
    Price,
    PayoutBps,
    ClaimableBps,
    Owed(Address),
}

#[contract]
pub struct MockBondVenue;

#[contractimpl]
impl MockBondVenue {
    pub fn init(
        e: Env,
        principal: Address,
        base: Address,
        price: i128,
        payout_bps: i128,
        claimable_bps: i128,
    ) {
        e.storage().instance().set(&VenueKey::Principal, &principal);
        e.storage().instance().set(&VenueKey::Base, &base);
        e.storage().instance().set(&VenueKey::Price, &price);
        e.storage().instance().set(&VenueKey::PayoutBps, &payout_bps);
        e.storage()
            .instance()
            .set(&VenueKey::ClaimableBps, &claimable_bps);
    }

    pub fn set_claimable_bps(e: Env, claimable_bps: i128) {
        e.storage()
            .instance()
            .set(&VenueKey::ClaimableBps, &claimable_bps);
    }

    pub fn bond_price(e: Env) -> i128 {
        e.storage().instance().get(&VenueKey::Price).unwrap()
    }

    pub fn pending_payout_for(e: Env, depositor: Address) -> i128 {
        e.storage()
            .instance()
            .get(&VenueKey::Owed(depositor))
            .unwrap_or(0)
    }

    pub fn deposit(e: Env, from: Address, amount: i128, max_price: i128, recipient: Address) -> i128 {
        let price: i128 = e.storage().instance().get(&VenueKey::Price).unwrap();
        if price > max_price {
            panic!("venue: price moved");
        }
        let this = e.current_contract_address();
        let principal: Address = e.storage().instance().get(&VenueKey::Principal).unwrap();
        TokenClient::new(&e, &principal).transfer_from(&this, &from, &this, &amount);

        let payout_bps: i128 = e.storage().instance().get(&VenueKey::PayoutBps).unwrap();
        let payout = amount * payout_bps / 10_000;
        let key = VenueKey::Owed(recipient);
        let owed: i128 = e.storage().instance().get(&key).unwrap_or(0);
        e.storage().instance().set(&key, &(owed + payout));
        payout
    }

    pub fn redeem(e: Env, recipient: Address, _stake_result: bool) -> i128 {
        let key = VenueKey::Owed(recipient.clone());
        let owed: i128 = e.storage().instance().get(&key).unwrap_or(0);
        if owed == 0 {
            return 0;
        }
        let claimable_bps: i128 = e.storage().instance().get(&VenueKey::ClaimableBps).unwrap();
        let gross = owed * claimable_bps / 10_000;
        if gross == 0 {
            return 0;
        }
        e.storage().instance().set(&key, &(owed - gross));
        let this = e.current_contract_address();
        let base: Address = e.storage().instance().get(&VenueKey::Base).unwrap();
        TokenClient::new(&e, &base).transfer(&this, &recipient, &gross);
        gross
    }
}

// ─── Fake registry ─────────────────────────────────────────────────────────

#[contracttype]
pub enum RegKey {
    Depository(Address),
}

#[contract]
pub struct MockRegistry;

#[contractimpl]
impl MockRegistry {
    pub fn set_depository(e: Env, id: Address, descriptor: DepositoryDescriptor) {
        e.storage()
            .instance()
            .set(&RegKey::Depository(id), &descriptor);
    }

    pub fn get_depository(e: Env, id: Address) -> DepositoryDescriptor {
        e.storage()
            .instance()
            .get(&RegKey::Depository(id))
            .unwrap_or_else(|| panic!("registry: depository not listed"))
    }
}

// ─── Reentrant router (attacks the vault during a swap) ────────────────────

#[contracttype]
pub enum AttackKey {
    Target,
}

#[contract]
pub struct MockReentrantRouter;

#[contractimpl]
impl MockReentrantRouter {
    pub fn set_target(e: Env, vault: Address, depository: Address) {
        e.storage()
            .instance()
            .set(&AttackKey::Target, &(vault, depository));
    }

    pub fn quote(e: Env, amount_in: i128, _path: Vec<Address>) -> Vec<i128> {
        vec![&e, amount_in, amount_in]
    }

    pub fn swap_exact_in(
        e: Env,
        amount_in: i128,
        _min_out: i128,
        _path: Vec<Address>,
        _to: Address,
        _deadline: u64,
    ) -> Vec<i128> {
        let (vault, depository): (Address, Address) =
            e.storage().instance().get(&AttackKey::Target).unwrap();
        // Call back into the vault mid-conversion; the lock must reject it.
        RebondVaultClient::new(&e, &vault).bond(&depository, &1_i128, &0_u32);
        vec![&e, amount_in, amount_in]
    }
}

// ─── Full environment setup ────────────────────────────────────────────────

pub struct Setup<'a> {
    pub vault: RebondVaultClient<'a>,
    pub vault_id: Address,
    pub depositor: Address,
    pub delegate: Address,
    pub admin: Address,
    pub fee_recipient: Address,
    pub staked: MockStakedTokenClient<'a>,
    pub staked_id: Address,
    pub base: Address,
    pub dai: Address,
    pub counter: Address,
    pub lp: Address,
    pub wrapped: Address,
    pub wrapper_id: Address,
    pub staking: MockStakingClient<'a>,
    pub staking_id: Address,
    pub router: MockRouterClient<'a>,
    pub router_id: Address,
    pub registry: MockRegistryClient<'a>,
    pub registry_id: Address,
}

/// Manual-mode, merged-ledger vault with funded mocks.
pub fn setup(e: &Env) -> Setup<'_> {
    setup_with(e, false, false)
}

pub fn setup_with(e: &Env, managed: bool, tranched: bool) -> Setup<'_> {
    e.mock_all_auths();

    let depositor = Address::generate(e);
    let delegate = Address::generate(e);
    let admin = Address::generate(e);
    let fee_recipient = Address::generate(e);
    let token_admin = Address::generate(e);

    // Stellar assets: base, principal (dai), pair counter, LP, wrapped.
    let base = e
        .register_stellar_asset_contract_v2(token_admin.clone())
        .address();
    let dai = e
        .register_stellar_asset_contract_v2(token_admin.clone())
        .address();
    let counter = e
        .register_stellar_asset_contract_v2(token_admin.clone())
        .address();
    let lp = e
        .register_stellar_asset_contract_v2(token_admin.clone())
        .address();
    let wrapped = e
        .register_stellar_asset_contract_v2(token_admin.clone())
        .address();

    // Staked token carries the supply oracle, so it is a custom mock.
    let staked_id = e.register(MockStakedToken, ());
    let staked = MockStakedTokenClient::new(e, &staked_id);
    staked.mint(&depositor, &DEFAULT_MINT);
    staked.set_supply(&SUPPLY);

    let staking_id = e.register(MockStaking, ());
    let staking = MockStakingClient::new(e, &staking_id);
    staking.init(&base, &staked_id);
    staking.set_distribute(&DISTRIBUTE);
    staked.mint(&staking_id, &RESERVE);
    StellarAssetClient::new(e, &base).mint(&staking_id, &RESERVE);

    let wrapper_id = e.register(MockWrapper, ());
    let wrapper = MockWrapperClient::new(e, &wrapper_id);
    wrapper.init(&staked_id, &wrapped);
    staked.mint(&wrapper_id, &RESERVE);
    StellarAssetClient::new(e, &wrapped).mint(&wrapper_id, &RESERVE);

    let router_id = e.register(MockRouter, ());
    let router = MockRouterClient::new(e, &router_id);
    router.set_rate(&base, &dai, &10_000_i128);
    router.set_rate(&wrapped, &dai, &10_000_i128);
    router.set_rate(&base, &counter, &10_000_i128);
    router.set_liquidity(&lp, &10_000_i128);
    StellarAssetClient::new(e, &dai).mint(&router_id, &RESERVE);
    StellarAssetClient::new(e, &counter).mint(&router_id, &RESERVE);
    StellarAssetClient::new(e, &lp).mint(&router_id, &RESERVE);

    let registry_id = e.register(MockRegistry, ());
    let registry = MockRegistryClient::new(e, &registry_id);

    let vault_id = e.register(RebondVault, ());
    let vault = RebondVaultClient::new(e, &vault_id);
    vault.initialize(
        &depositor,
        &delegate,
        &admin,
        &fee_recipient,
        &FEE_BPS,
        &MIN_DISCOUNT_BPS,
        &managed,
        &tranched,
        &staked_id,
        &base,
        &wrapped,
        &wrapper_id,
        &staking_id,
        &registry_id,
    );

    // Let the vault pull depositor funds.
    staked.approve(&depositor, &vault_id, &DEFAULT_MINT, &expiry(e));

    Setup {
        vault,
        vault_id,
        depositor,
        delegate,
        admin,
        fee_recipient,
        staked,
        staked_id,
        base,
        dai,
        counter,
        lp,
        wrapped,
        wrapper_id,
        staking,
        staking_id,
        router,
        router_id,
        registry,
        registry_id,
    }
}

/// Register a funded single-asset bonding venue and list it in the fake
/// registry. Returns the depository id.
pub fn list_single_venue(e: &Env, s: &Setup, payout_bps: i128, claimable_bps: i128) -> Address {
    let venue_id = e.register(MockBondVenue, ());
    MockBondVenueClient::new(e, &venue_id).init(&s.dai, &s.base, &100_i128, &payout_bps, &claimable_bps);
    StellarAssetClient::new(e, &s.base).mint(&venue_id, &RESERVE);

    let descriptor = DepositoryDescriptor {
        principal_token: s.dai.clone(),
        venue_type: VenueType::SingleAsset,
        router: s.router_id.clone(),
        token_a: s.base.clone(),
        token_b: s.base.clone(),
        conversion_path: vec![e, s.base.clone(), s.dai.clone()],
        uses_wrapped_asset: false,
        active: true,
    };
    s.registry.set_depository(&venue_id, &descriptor);
    venue_id
}

/// Register a funded liquidity-pair venue; the pool consumes `use_b_bps` of
/// the source-side half, leaving the remainder to be restaked.
pub fn list_lp_venue(
    e: &Env,
    s: &Setup,
    payout_bps: i128,
    claimable_bps: i128,
    use_b_bps: i128,
) -> Address {
    s.router.set_liquidity(&s.lp, &use_b_bps);

    let venue_id = e.register(MockBondVenue, ());
    MockBondVenueClient::new(e, &venue_id).init(&s.lp, &s.base, &100_i128, &payout_bps, &claimable_bps);
    StellarAssetClient::new(e, &s.base).mint(&venue_id, &RESERVE);

    let descriptor = DepositoryDescriptor {
        principal_token: s.lp.clone(),
        venue_type: VenueType::LiquidityPair,
        router: s.router_id.clone(),
        token_a: s.base.clone(),
        token_b: s.counter.clone(),
        conversion_path: vec![e, s.base.clone(), s.counter.clone()],
        uses_wrapped_asset: false,
        active: true,
    };
    s.registry.set_depository(&venue_id, &descriptor);
    venue_id
}

/// Register a funded single-asset venue reached through the wrapped form of
/// the staked asset.
pub fn list_wrapped_venue(e: &Env, s: &Setup, payout_bps: i128, claimable_bps: i128) -> Address {
    let venue_id = e.register(MockBondVenue, ());
    MockBondVenueClient::new(e, &venue_id).init(&s.dai, &s.base, &100_i128, &payout_bps, &claimable_bps);
    StellarAssetClient::new(e, &s.base).mint(&venue_id, &RESERVE);

    let descriptor = DepositoryDescriptor {
        principal_token: s.dai.clone(),
        venue_type: VenueType::SingleAsset,
        router: s.router_id.clone(),
        token_a: s.wrapped.clone(),
        token_b: s.wrapped.clone(),
        conversion_path: vec![e, s.wrapped.clone(), s.dai.clone()],
        uses_wrapped_asset: true,
        active: true,
    };
    s.registry.set_depository(&venue_id, &descriptor);
    venue_id
}

// ─── Mock wrapper (staked <-> wrapped, 1:1) ────────────────────────────────

#[contracttype]
pub enum WrapKey {
    Staked,
    Wrapped,
}

#[contract]
pub struct MockWrapper;

#[contractimpl]
impl MockWrapper {
    pub fn init(e: Env, staked: Address, wrapped: Address) {
        e.storage().instance().set(&WrapKey::Staked, &staked);
        e.storage().instance().set(&WrapKey::Wrapped, &wrapped);
    }

    pub fn wrap(e: Env, from: Address, amount: i128) -> i128 {
        let this = e.current_contract_address();
        let staked: Address = e.storage().instance().get(&WrapKey::Staked).unwrap();
        let wrapped: Address = e.storage().instance().get(&WrapKey::Wrapped).unwrap();
        TokenClient::new(&e, &staked).transfer_from(&this, &from, &this, &amount);
        TokenClient::new(&e, &wrapped).transfer(&this, &from, &amount);
        amount
    }

    pub fn unwrap(e: Env, from: Address, amount: i128) -> i128 {
        let this = e.current_contract_address();
        let staked: Address = e.storage().instance().get(&WrapKey::Staked).unwrap();
        let wrapped: Address = e.storage().instance().get(&WrapKey::Wrapped).unwrap();
        TokenClient::new(&e, &wrapped).transfer_from(&this, &from, &this, &amount);
        TokenClient::new(&e, &staked).transfer(&this, &from, &amount);
        amount
    }
}
