//! Bond ledger: per-depository record of outstanding payout, principal used
//! and vesting, plus the compact active set used for enumeration.
//!
//! Two strategies are supported, chosen at vault initialization:
//! `Merged` keeps one record per depository and overwrites the vesting clock
//! on repeated bonds; `Tranched` appends one record per bond and drains them
//! oldest-first on redemption.

use crate::math;
use crate::types::{BondRecord, BondTranche, DataKey, LedgerMode, VaultConfig};
use rebond_errors::RebondError;
use soroban_sdk::{panic_with_error, Address, Env, Vec};

/// Fixed vesting period: five days in seconds.
pub const VESTING_PERIOD: u64 = 432_000;

fn config(e: &Env) -> VaultConfig {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(|| panic_with_error!(e, RebondError::NotInitialized))
}

// ─── Active set ────────────────────────────────────────────────────────────

pub fn active_set(e: &Env) -> Vec<Address> {
    e.storage()
        .instance()
        .get(&DataKey::ActiveBonds)
        .unwrap_or_else(|| Vec::new(e))
}

fn save_active_set(e: &Env, set: &Vec<Address>) {
    e.storage().instance().set(&DataKey::ActiveBonds, set);
}

fn active_insert(e: &Env, depository: &Address) {
    let mut set = active_set(e);
    if !set.contains(depository) {
        set.push_back(depository.clone());
        save_active_set(e, &set);
    }
}

/// Swap-to-end-and-pop removal; order is not semantically meaningful.
fn active_remove(e: &Env, depository: &Address) {
    let mut set = active_set(e);
    if let Some(idx) = set.first_index_of(depository) {
        let last = set.len() - 1;
        if idx != last {
            let tail = set.get(last).unwrap();
            set.set(idx, tail);
        }
        set.pop_back();
        save_active_set(e, &set);
    }
}

// ─── Recording ─────────────────────────────────────────────────────────────

/// Record a successful bond. Inserts the depository into the active set if
/// absent and merges or appends per the configured ledger mode.
pub fn record_bond(e: &Env, depository: &Address, payout: i128, principal_used: i128) {
    let now = e.ledger().timestamp();
    let vesting_end = math::add_u64(e, now, VESTING_PERIOD);

    match config(e).ledger_mode {
        LedgerMode::Merged => {
            let key = DataKey::Bond(depository.clone());
            let mut rec: BondRecord =
                e.storage().persistent().get(&key).unwrap_or(BondRecord {
                    outstanding_payout: 0,
                    principal_used: 0,
                    vesting_end_time: 0,
                    maturing: 0,
                });
            rec.outstanding_payout = math::add_i128(e, rec.outstanding_payout, payout);
            rec.principal_used = math::add_i128(e, rec.principal_used, principal_used);
            rec.maturing = math::add_i128(e, rec.maturing, payout);
            // A repeat bond restarts the shared vesting clock.
            rec.vesting_end_time = vesting_end;
            e.storage().persistent().set(&key, &rec);
        }
        LedgerMode::Tranched => {
            let seq: u64 = e.storage().instance().get(&DataKey::TrancheSeq).unwrap_or(0);
            e.storage()
                .instance()
                .set(&DataKey::TrancheSeq, &(seq + 1));

            let key = DataKey::Tranches(depository.clone());
            let mut tranches: Vec<BondTranche> = e
                .storage()
                .persistent()
                .get(&key)
                .unwrap_or_else(|| Vec::new(e));
            tranches.push_back(BondTranche {
                seq,
                payout,
                principal_used,
                vesting_end_time: vesting_end,
            });
            e.storage().persistent().set(&key, &tranches);
        }
    }

    active_insert(e, depository);
}

/// Apply a gross redemption against the ledger. Returns the net amount after
/// the configured fee. `remove_if_empty` controls whether a zeroed entry is
/// evicted immediately or left for a later `compact` pass.
pub fn record_redemption(
    e: &Env,
    depository: &Address,
    gross: i128,
    remove_if_empty: bool,
) -> i128 {
    let cfg = config(e);
    let (_, net) = math::apply_bps(e, gross, cfg.fee_bps);

    match cfg.ledger_mode {
        LedgerMode::Merged => {
            let key = DataKey::Bond(depository.clone());
            let mut rec: BondRecord = e
                .storage()
                .persistent()
                .get(&key)
                .unwrap_or_else(|| panic_with_error!(e, RebondError::BondNotFound));
            if gross > rec.outstanding_payout {
                panic_with_error!(e, RebondError::OverRedemption);
            }
            rec.outstanding_payout -= gross;
            rec.maturing = if gross > rec.maturing {
                0
            } else {
                rec.maturing - gross
            };
            if rec.outstanding_payout == 0 {
                e.storage().persistent().remove(&key);
                if remove_if_empty {
                    active_remove(e, depository);
                }
            } else {
                e.storage().persistent().set(&key, &rec);
            }
        }
        LedgerMode::Tranched => {
            let key = DataKey::Tranches(depository.clone());
            let tranches: Vec<BondTranche> = e
                .storage()
                .persistent()
                .get(&key)
                .unwrap_or_else(|| panic_with_error!(e, RebondError::BondNotFound));

            // Tranches are appended chronologically; drain oldest-first.
            let mut remaining = gross;
            let mut kept: Vec<BondTranche> = Vec::new(e);
            for mut tranche in tranches.iter() {
                if remaining > 0 {
                    let consumed = if remaining >= tranche.payout {
                        tranche.payout
                    } else {
                        remaining
                    };
                    tranche.payout -= consumed;
                    remaining -= consumed;
                }
                if tranche.payout > 0 {
                    kept.push_back(tranche);
                }
            }
            if remaining > 0 {
                panic_with_error!(e, RebondError::OverRedemption);
            }
            if kept.is_empty() {
                e.storage().persistent().remove(&key);
                if remove_if_empty {
                    active_remove(e, depository);
                }
            } else {
                e.storage().persistent().set(&key, &kept);
            }
        }
    }

    net
}

/// Sweep the active set once, removing every entry whose outstanding payout
/// is zero. Used after bulk redemption so single redemptions of already
/// zeroed entries do not each pay the removal cost.
pub fn compact(e: &Env) {
    let set = active_set(e);
    let mut kept: Vec<Address> = Vec::new(e);
    for depository in set.iter() {
        if outstanding_payout(e, &depository) > 0 {
            kept.push_back(depository);
        }
    }
    save_active_set(e, &kept);
}

// ─── Views ─────────────────────────────────────────────────────────────────

/// Outstanding payout for one depository, zero when no bond exists.
pub fn outstanding_payout(e: &Env, depository: &Address) -> i128 {
    match config(e).ledger_mode {
        LedgerMode::Merged => e
            .storage()
            .persistent()
            .get::<_, BondRecord>(&DataKey::Bond(depository.clone()))
            .map(|rec| rec.outstanding_payout)
            .unwrap_or(0),
        LedgerMode::Tranched => {
            let tranches: Vec<BondTranche> = e
                .storage()
                .persistent()
                .get(&DataKey::Tranches(depository.clone()))
                .unwrap_or_else(|| Vec::new(e));
            let mut total = 0_i128;
            for tranche in tranches.iter() {
                total = math::add_i128(e, total, tranche.payout);
            }
            total
        }
    }
}

/// Sum of outstanding payouts across the active set.
pub fn total_bonded_funds(e: &Env) -> i128 {
    let mut total = 0_i128;
    for depository in active_set(e).iter() {
        total = math::add_i128(e, total, outstanding_payout(e, &depository));
    }
    total
}

/// Merged-mode record for a depository; zero record when no bond exists.
pub fn get_bond(e: &Env, depository: &Address) -> BondRecord {
    e.storage()
        .persistent()
        .get(&DataKey::Bond(depository.clone()))
        .unwrap_or(BondRecord {
            outstanding_payout: 0,
            principal_used: 0,
            vesting_end_time: 0,
            maturing: 0,
        })
}

/// Tranched-mode records for a depository; empty when no bond exists.
pub fn get_tranches(e: &Env, depository: &Address) -> Vec<BondTranche> {
    e.storage()
        .persistent()
        .get(&DataKey::Tranches(depository.clone()))
        .unwrap_or_else(|| Vec::new(e))
}
