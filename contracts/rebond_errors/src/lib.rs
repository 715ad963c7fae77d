#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups errors by domain for monitoring, alerting, and dashboards.
/// @dev    Off-chain consumers should switch on this value first, then on the
///         specific `RebondError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup and initialization errors (codes 1-99).
    Initialization,
    /// Caller identity and permission errors (codes 100-199).
    Authorization,
    /// Input validation errors (codes 200-299).
    Validation,
    /// Balance and funding errors (codes 300-399).
    Funds,
    /// Profitability-gate rejections (codes 400-499).
    Profitability,
    /// Asset conversion and routing errors (codes 500-599).
    Conversion,
    /// Bond ledger consistency errors (codes 600-699).
    Ledger,
    /// Registry and factory errors (codes 700-799).
    Registry,
    /// Reentrancy and defensive state errors (codes 800-899).
    State,
}

/// @title  RebondError
/// @notice Canonical error enum shared by all Rebond smart contracts.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///         Use the ErrorExt trait to retrieve the category and description.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization
///   200 - 299 : Validation
///   300 - 399 : Funds
///   400 - 499 : Profitability
///   500 - 599 : Conversion
///   600 - 699 : Ledger
///   700 - 799 : Registry
///   800 - 899 : State
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RebondError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    /// Contracts: registry, vault
    NotInitialized = 1,

    /// Contract has already been initialized and cannot be re-initialized.
    /// Contracts: registry, vault
    AlreadyInitialized = 2,

    // --- Authorization (100-199) ---
    /// Caller is not the admin.
    /// Contracts: registry, vault
    NotAdmin = 100,

    /// Caller is not the vault depositor.
    /// Contracts: vault
    NotDepositor = 101,

    /// Caller is not the vault delegate.
    /// Contracts: vault
    NotDelegate = 102,

    /// Caller may not initiate a bond in the vault's current access mode.
    /// Contracts: vault
    NotBondInitiator = 103,

    // --- Validation (200-299) ---
    /// Amount must be strictly positive.
    /// Contracts: registry, vault
    InvalidAmount = 200,

    /// Fee basis points must be below 10000.
    /// Contracts: registry, vault
    FeeTooHigh = 201,

    /// New minimum-discount value equals the current one.
    /// Contracts: vault
    DiscountUnchanged = 202,

    /// Slippage basis points out of the accepted range.
    /// Contracts: vault
    InvalidSlippage = 203,

    /// Batch operation received an empty list.
    /// Contracts: registry
    EmptyBatch = 204,

    /// Conversion path does not connect the source asset to the principal.
    /// Contracts: registry, vault
    InvalidPath = 205,

    /// Status flag already holds the requested value.
    /// Contracts: registry, vault
    StatusUnchanged = 206,

    // --- Funds (300-399) ---
    /// Vault balance is below the requested amount.
    /// Contracts: vault
    InsufficientBalance = 300,

    // --- Profitability (400-499) ---
    /// Bond payout does not exceed the committed amount.
    /// Contracts: vault
    NonPositiveReturn = 400,

    /// Bond return is below the depositor-configured discount floor.
    /// Contracts: vault
    BelowUserFloor = 401,

    /// Bond return is below the staking-derived market floor.
    /// Contracts: vault
    BelowMarketFloor = 402,

    // --- Conversion (500-599) ---
    /// Requested slippage tolerance exceeds the protocol ceiling.
    /// Contracts: vault
    SlippageTooHigh = 500,

    /// Router returned an empty or malformed amounts vector.
    /// Contracts: vault
    UnexpectedSwapResult = 501,

    // --- Ledger (600-699) ---
    /// Redemption would drive an outstanding payout negative.
    /// Contracts: vault
    OverRedemption = 600,

    /// No bond record exists for the given depository.
    /// Contracts: vault
    BondNotFound = 601,

    // --- Registry (700-799) ---
    /// Depositor already owns a vault from this registry.
    /// Contracts: registry
    VaultAlreadyExists = 700,

    /// No vault is registered for the given depositor.
    /// Contracts: registry
    UnknownDepositor = 701,

    /// No depository descriptor exists for the given identifier.
    /// Contracts: registry, vault
    DepositoryNotFound = 702,

    /// Depository exists but is disabled for new bonds.
    /// Contracts: vault
    DepositoryInactive = 703,

    /// A depository descriptor already exists for the given identifier.
    /// Contracts: registry
    DepositoryAlreadyListed = 704,

    // --- State (800-899) ---
    /// Reentrancy was detected; the call is rejected.
    /// Contracts: vault
    ReentrancyDetected = 800,

    /// Checked arithmetic overflowed or divided by zero.
    /// Contracts: registry, vault
    ArithmeticOverflow = 801,
}

/// Extension methods for mapping a `RebondError` to its category and a
/// human-readable description. Descriptions are stable and safe to surface
/// in monitoring pipelines.
pub trait ErrorExt {
    fn category(&self) -> ErrorCategory;
    fn description(&self) -> &'static str;
}

impl ErrorExt for RebondError {
    fn category(&self) -> ErrorCategory {
        match (*self as u32) / 100 {
            0 => ErrorCategory::Initialization,
            1 => ErrorCategory::Authorization,
            2 => ErrorCategory::Validation,
            3 => ErrorCategory::Funds,
            4 => ErrorCategory::Profitability,
            5 => ErrorCategory::Conversion,
            6 => ErrorCategory::Ledger,
            7 => ErrorCategory::Registry,
            _ => ErrorCategory::State,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            RebondError::NotInitialized => "contract not initialized",
            RebondError::AlreadyInitialized => "contract already initialized",
            RebondError::NotAdmin => "caller is not the admin",
            RebondError::NotDepositor => "caller is not the depositor",
            RebondError::NotDelegate => "caller is not the delegate",
            RebondError::NotBondInitiator => "caller may not initiate bonds",
            RebondError::InvalidAmount => "amount must be positive",
            RebondError::FeeTooHigh => "fee must be below 10000 bps",
            RebondError::DiscountUnchanged => "minimum discount unchanged",
            RebondError::InvalidSlippage => "invalid slippage tolerance",
            RebondError::EmptyBatch => "batch list is empty",
            RebondError::InvalidPath => "invalid conversion path",
            RebondError::StatusUnchanged => "status flag unchanged",
            RebondError::InsufficientBalance => "insufficient balance",
            RebondError::NonPositiveReturn => "payout does not exceed committed amount",
            RebondError::BelowUserFloor => "return below the user discount floor",
            RebondError::BelowMarketFloor => "return below the staking market floor",
            RebondError::SlippageTooHigh => "slippage above protocol ceiling",
            RebondError::UnexpectedSwapResult => "router returned unexpected result",
            RebondError::OverRedemption => "redemption exceeds outstanding payout",
            RebondError::BondNotFound => "no bond record for depository",
            RebondError::VaultAlreadyExists => "depositor already owns a vault",
            RebondError::UnknownDepositor => "no vault for depositor",
            RebondError::DepositoryNotFound => "depository not listed",
            RebondError::DepositoryInactive => "depository is disabled",
            RebondError::DepositoryAlreadyListed => "depository already listed",
            RebondError::ReentrancyDetected => "reentrancy detected",
            RebondError::ArithmeticOverflow => "arithmetic overflow",
        }
    }
}
