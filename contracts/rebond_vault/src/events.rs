use soroban_sdk::{Address, Env, Symbol};

/// Emitted when the vault is initialized.
///
/// # Topics
/// * `Symbol` - "vault_initialized"
///
/// # Data
/// * `Address` - The depositor
/// * `Address` - The delegate
pub fn emit_vault_initialized(e: &Env, depositor: &Address, delegate: &Address) {
    let topics = (Symbol::new(e, "vault_initialized"),);
    e.events()
        .publish(topics, (depositor.clone(), delegate.clone()));
}

/// Emitted when the depositor adds staked-asset funds.
pub fn emit_deposited(e: &Env, depositor: &Address, amount: i128) {
    let topics = (Symbol::new(e, "deposited"), depositor.clone());
    e.events().publish(topics, amount);
}

/// Emitted when the depositor withdraws staked-asset funds.
pub fn emit_withdrawn(e: &Env, depositor: &Address, amount: i128) {
    let topics = (Symbol::new(e, "withdrawn"), depositor.clone());
    e.events().publish(topics, amount);
}

/// Emitted after a successful bond operation.
///
/// # Topics
/// * `Symbol` - "bond_created"
/// * `Address` - The depository bonded against
///
/// # Data
/// * `i128` - Principal committed to the venue
/// * `i128` - Payout owed by the venue
/// * `i128` - Leftover returned to the staked position
pub fn emit_bond_created(
    e: &Env,
    depository: &Address,
    principal: i128,
    payout: i128,
    leftover: i128,
) {
    let topics = (Symbol::new(e, "bond_created"), depository.clone());
    e.events().publish(topics, (principal, payout, leftover));
}

/// Emitted after a redemption settles.
///
/// # Topics
/// * `Symbol` - "bond_redeemed"
/// * `Address` - The depository redeemed from
///
/// # Data
/// * `i128` - Gross amount released by the venue
/// * `i128` - Fee forwarded to the fee recipient
/// * `i128` - Net amount re-staked for the vault
pub fn emit_bond_redeemed(e: &Env, depository: &Address, gross: i128, fee: i128, net: i128) {
    let topics = (Symbol::new(e, "bond_redeemed"), depository.clone());
    e.events().publish(topics, (gross, fee, net));
}

/// Emitted when idle base-token balance is staked.
pub fn emit_assets_staked(e: &Env, amount: i128) {
    let topics = (Symbol::new(e, "assets_staked"),);
    e.events().publish(topics, amount);
}

/// Emitted when the depositor toggles manual/managed mode.
pub fn emit_mode_changed(e: &Env, depositor: &Address, managed: bool) {
    let topics = (Symbol::new(e, "mode_changed"), depositor.clone());
    e.events().publish(topics, managed);
}

/// Emitted when the depositor changes the minimum discount floor.
pub fn emit_discount_changed(e: &Env, depositor: &Address, old_bps: u32, new_bps: u32) {
    let topics = (Symbol::new(e, "discount_changed"), depositor.clone());
    e.events().publish(topics, (old_bps, new_bps));
}

/// Emitted when the admin rotates the delegate.
pub fn emit_delegate_changed(e: &Env, new_delegate: &Address) {
    let topics = (Symbol::new(e, "delegate_changed"),);
    e.events().publish(topics, new_delegate.clone());
}

/// Emitted when the admin rotates the fee recipient.
pub fn emit_fee_recipient_changed(e: &Env, new_recipient: &Address) {
    let topics = (Symbol::new(e, "fee_recipient_changed"),);
    e.events().publish(topics, new_recipient.clone());
}
