//! Per-pool reward accumulator.
//!
//! Each pool carries a lazily-updated `acc_reward_per_share` checkpoint in the
//! classic pull-based distribution style: reward accrued since the last update
//! is folded into the accumulator on every mutating call, and individual
//! stakes derive their pending value from `amount * acc − reward_debt` on
//! demand. Division rounds down, so dust stays with the pool and is never
//! paid out twice.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::schedule::{self, RewardWindow};

/// Scale factor for `acc_reward_per_share`.
pub const SHARE_PRECISION: i128 = 1_000_000_000_000;

const POOL: Symbol = symbol_short!("POOL");
const POOL_COUNT: Symbol = symbol_short!("N_POOLS");

/// A staking destination with its own accumulator and allocation weight.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u32,
    /// Token deposited into this pool. The first pool's asset is always the
    /// reward asset itself.
    pub asset: Address,
    /// This pool's share of the global emission, relative to the sum of all
    /// pools' points.
    pub alloc_point: i128,
    pub last_update_time: u64,
    /// Cumulative reward per deposited unit, scaled by [`SHARE_PRECISION`].
    /// Monotonically non-decreasing.
    pub acc_reward_per_share: i128,
    /// Sum of all live stake amounts plus redistributed fee shares.
    pub total_deposited: i128,
    pub unique_participants: u32,
}

// ── Storage ──────────────────────────────────────────────────────────────────

fn pool_key(pool_id: u32) -> (Symbol, u32) {
    (POOL, pool_id)
}

pub fn get_pool(env: &Env, pool_id: u32) -> Option<Pool> {
    env.storage().persistent().get(&pool_key(pool_id))
}

pub fn store_pool(env: &Env, pool: &Pool) {
    env.storage().persistent().set(&pool_key(pool.id), pool);
}

pub fn pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

/// Appends a new pool record and returns its id. Pools are never deleted.
pub fn append_pool(env: &Env, pool: &Pool) {
    store_pool(env, pool);
    env.storage().instance().set(&POOL_COUNT, &(pool.id + 1));
}

// ── Accumulator ──────────────────────────────────────────────────────────────

/// Folds reward accrued over `[last_update_time, now)` into the pool.
///
/// Returns the reward amount that could not be attributed to any participant
/// (the pool was empty), which the caller adds to the missed-reward
/// accumulator. A call with `now <= last_update_time` is a no-op, so repeated
/// updates at the same timestamp are idempotent.
pub fn advance(
    pool: &mut Pool,
    windows: &Vec<RewardWindow>,
    total_alloc_point: i128,
    now: u64,
) -> i128 {
    if now <= pool.last_update_time {
        return 0;
    }
    if total_alloc_point == 0 {
        pool.last_update_time = now;
        return 0;
    }

    let emitted = schedule::count_reward_amount(windows, pool.last_update_time, now);
    let pool_reward = emitted * pool.alloc_point / total_alloc_point;
    pool.last_update_time = now;

    if pool.total_deposited == 0 {
        return pool_reward;
    }

    pool.acc_reward_per_share += pool_reward * SHARE_PRECISION / pool.total_deposited;
    0
}

/// Accumulator value the pool would have after an [`advance`] at `now`,
/// without mutating anything. Used by the read-only pending paths.
pub fn projected_acc_per_share(
    pool: &Pool,
    windows: &Vec<RewardWindow>,
    total_alloc_point: i128,
    now: u64,
) -> i128 {
    if now <= pool.last_update_time || pool.total_deposited == 0 || total_alloc_point == 0 {
        return pool.acc_reward_per_share;
    }
    let emitted = schedule::count_reward_amount(windows, pool.last_update_time, now);
    let pool_reward = emitted * pool.alloc_point / total_alloc_point;
    pool.acc_reward_per_share + pool_reward * SHARE_PRECISION / pool.total_deposited
}
