//! Vault access control: the manual/managed bond-initiation gate and the
//! per-operation reentrancy lock.

use crate::types::{AccessMode, DataKey, VaultConfig};
use rebond_errors::RebondError;
use soroban_sdk::{panic_with_error, Env};

/// Require the caller allowed to initiate a bond in the current mode:
/// the depositor in `Manual`, the delegate in `Managed`.
pub fn require_bond_initiator(e: &Env, cfg: &VaultConfig) {
    match cfg.access_mode {
        AccessMode::Manual => cfg.depositor.require_auth(),
        AccessMode::Managed => cfg.delegate.require_auth(),
    }
}

/// Take the exclusive operation lock. The flag lives in temporary storage,
/// so it cannot outlive the transaction that set it.
pub fn acquire_lock(e: &Env) {
    let locked: bool = e
        .storage()
        .temporary()
        .get(&DataKey::Lock)
        .unwrap_or(false);
    if locked {
        panic_with_error!(e, RebondError::ReentrancyDetected);
    }
    e.storage().temporary().set(&DataKey::Lock, &true);
}

/// Release the operation lock.
pub fn release_lock(e: &Env) {
    e.storage().temporary().remove(&DataKey::Lock);
}
