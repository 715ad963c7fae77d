use soroban_sdk::{contracttype, Address, Vec};

/// How a depository's bonding venue is paid.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VenueType {
    SingleAsset,
    LiquidityPair,
}

/// Routing metadata for one bonding venue, keyed by the venue's contract
/// address. Read-shared by every vault; written only through the registry's
/// admin path.
#[contracttype]
#[derive(Clone, Debug)]
pub struct DepositoryDescriptor {
    /// Token the venue is paid in; the pool token for liquidity pairs.
    pub principal_token: Address,
    pub venue_type: VenueType,
    /// AMM router used for the conversion swaps.
    pub router: Address,
    /// Swap-input side of the conversion.
    pub token_a: Address,
    /// Counter asset of the pair; equals `token_a` for single-asset venues.
    pub token_b: Address,
    pub conversion_path: Vec<Address>,
    pub uses_wrapped_asset: bool,
    pub active: bool,
}

/// Shared parameters every factory-created vault is bound to.
#[contracttype]
#[derive(Clone, Debug)]
pub struct SharedParams {
    pub staked_token: Address,
    pub base_token: Address,
    pub wrapped_token: Address,
    pub wrapper: Address,
    pub staking_venue: Address,
    /// Default delegate installed in new vaults.
    pub delegate: Address,
    /// Default fee recipient installed in new vaults.
    pub fee_recipient: Address,
    /// Redemption fee in basis points, strictly below 10000.
    pub fee_bps: u32,
}

/// Storage keys for the registry contract.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Admin address.
    Admin,
    /// SharedParams.
    Shared,
    /// Descriptor per depository id.
    Depository(Address),
    /// Enumerable list of live depository ids.
    Depositories,
    /// Depositor -> vault address, one-to-one.
    Vault(Address),
    /// Enumerable list of depositors with vaults.
    Depositors,
}
