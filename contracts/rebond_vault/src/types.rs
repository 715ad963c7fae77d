use soroban_sdk::{contracttype, Address};

// ─── Access and ledger modes ───────────────────────────────────────────────

/// Who may initiate a bond for this vault.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AccessMode {
    /// Only the depositor may bond.
    Manual,
    /// Only the designated delegate may bond.
    Managed,
}

/// How repeated bonds against the same depository are tracked.
///
/// `Merged` keeps one record per depository whose vesting clock is
/// overwritten by each new bond. `Tranched` keeps one record per bond with
/// its own maturity, drained oldest-first on redemption.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LedgerMode {
    Merged,
    Tranched,
}

// ─── Configuration ─────────────────────────────────────────────────────────

/// Per-vault roles and strategy parameters, set at initialization.
#[contracttype]
#[derive(Clone, Debug)]
pub struct VaultConfig {
    /// Owner of the deposited funds.
    pub depositor: Address,
    /// Operator allowed to bond while in `Managed` mode.
    pub delegate: Address,
    /// Identity allowed to rotate delegate and fee recipient. Distinct from
    /// both depositor and delegate; for factory-created vaults this is the
    /// registry contract.
    pub admin: Address,
    /// Receives the redemption fee.
    pub fee_recipient: Address,
    /// Redemption fee in basis points, strictly below 10000.
    pub fee_bps: u32,
    /// Depositor-configured minimum bond return in basis points.
    pub minimum_discount_bps: u32,
    pub access_mode: AccessMode,
    pub ledger_mode: LedgerMode,
}

/// Addresses of the external collaborators this vault trades against.
#[contracttype]
#[derive(Clone, Debug)]
pub struct AssetConfig {
    /// Yield-bearing receipt asset held between bonds.
    pub staked_token: Address,
    /// Raw asset released by unstaking; bond payouts arrive in this token.
    pub base_token: Address,
    /// Wrapped representation of the staked asset.
    pub wrapped_token: Address,
    /// Converter between staked and wrapped form.
    pub wrapper: Address,
    pub staking_venue: Address,
    /// Registry holding depository descriptors.
    pub registry: Address,
}

// ─── Bond ledger records ───────────────────────────────────────────────────

/// Merged-mode bond state for one depository. A zero `outstanding_payout`
/// is logically "no bond"; the record is removed rather than stored at zero.
#[contracttype]
#[derive(Clone, Debug)]
pub struct BondRecord {
    /// Payout still owed by the bonding venue, in base-token units.
    pub outstanding_payout: i128,
    /// Principal committed across all merged bonds.
    pub principal_used: i128,
    /// End of the vesting clock. Overwritten by each new bond.
    pub vesting_end_time: u64,
    /// Amount still maturing toward full claimability.
    pub maturing: i128,
}

/// Tranched-mode bond state: one entry per bond, independent maturity.
#[contracttype]
#[derive(Clone, Debug)]
pub struct BondTranche {
    pub seq: u64,
    pub payout: i128,
    pub principal_used: i128,
    pub vesting_end_time: u64,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// VaultConfig.
    Config,
    /// AssetConfig.
    Assets,
    /// Merged-mode record per depository.
    Bond(Address),
    /// Tranched-mode record list per depository.
    Tranches(Address),
    /// Monotonic tranche sequence counter.
    TrancheSeq,
    /// Depositories with nonzero outstanding payout.
    ActiveBonds,
    /// Reentrancy lock, temporary storage only.
    Lock,
}
