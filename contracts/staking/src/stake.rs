//! Per-user stake records.
//!
//! Each `(pool, user)` pair owns a dense slot array of stake records. Records
//! carry a stable `id` assigned from a per-account counter; a full withdraw
//! frees the slot by swap-and-pop (the last record moves into the freed
//! index), so slot order carries no meaning — only the id identifies a stake
//! across its lifetime.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::pool::SHARE_PRECISION;

pub const SECONDS_PER_DAY: u64 = 86_400;

const USER: Symbol = symbol_short!("USER");

/// A single locked deposit.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserStake {
    /// Stable identifier, unique within the owning account.
    pub id: u64,
    /// Net deposited amount (after the deposit fee), plus compounded reward.
    pub amount: i128,
    pub lock_days: u32,
    pub multiplier_percent: u32,
    pub unlock_time: u64,
    /// `amount * acc_reward_per_share / SHARE_PRECISION` snapshot at the last
    /// checkpoint.
    pub reward_debt: i128,
}

/// Everything a user holds in one pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserAccount {
    pub total_amount: i128,
    pub next_stake_id: u64,
    pub stakes: Vec<UserStake>,
}

// ── Storage ──────────────────────────────────────────────────────────────────

fn account_key(pool_id: u32, user: &Address) -> (Symbol, u32, Address) {
    (USER, pool_id, user.clone())
}

pub fn get_account(env: &Env, pool_id: u32, user: &Address) -> Option<UserAccount> {
    env.storage().persistent().get(&account_key(pool_id, user))
}

pub fn store_account(env: &Env, pool_id: u32, user: &Address, account: &UserAccount) {
    env.storage()
        .persistent()
        .set(&account_key(pool_id, user), account);
}

pub fn new_account(env: &Env) -> UserAccount {
    UserAccount {
        total_amount: 0,
        next_stake_id: 0,
        stakes: Vec::new(env),
    }
}

// ── Slot arena ───────────────────────────────────────────────────────────────

/// Resolves a stake by its stable id. Returns the current slot index along
/// with the record.
pub fn find_stake(account: &UserAccount, stake_id: u64) -> Option<(u32, UserStake)> {
    for index in 0..account.stakes.len() {
        let stake = account.stakes.get_unchecked(index);
        if stake.id == stake_id {
            return Some((index, stake));
        }
    }
    None
}

/// Frees the slot at `index` by moving the last record into it.
pub fn remove_stake(account: &mut UserAccount, index: u32) {
    let last_index = account.stakes.len() - 1;
    if index != last_index {
        let last = account.stakes.get_unchecked(last_index);
        account.stakes.set(index, last);
    }
    account.stakes.pop_back();
}

// ── Stake math ───────────────────────────────────────────────────────────────

/// Multiplier percent for a lock duration; `None` for unsupported durations.
pub fn multiplier_for(lock_days: u32) -> Option<u32> {
    match lock_days {
        14 => Some(0),
        30 => Some(100),
        45 => Some(150),
        60 => Some(200),
        _ => None,
    }
}

/// Reward earned by a stake since its last checkpoint, under the given
/// accumulator value. Never negative: the debt was snapshot from a smaller
/// or equal accumulator.
pub fn pending_amount(stake: &UserStake, acc_reward_per_share: i128) -> i128 {
    stake.amount * acc_reward_per_share / SHARE_PRECISION - stake.reward_debt
}

/// Re-snapshots the debt so the stake starts earning from `acc` onwards.
pub fn reset_debt(stake: &mut UserStake, acc_reward_per_share: i128) {
    stake.reward_debt = stake.amount * acc_reward_per_share / SHARE_PRECISION;
}

/// Voting-weight contribution of a single stake:
/// `amount * (100 + multiplier) / 100`. The caller decides eligibility
/// (stakes past their withdraw window are excluded).
pub fn voting_weight(stake: &UserStake) -> i128 {
    stake.amount * (100 + stake.multiplier_percent as i128) / 100
}
