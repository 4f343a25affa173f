#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::schedule::RewardWindow;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub reward_token: Address,
    pub start_time: u64,
    pub timestamp: u64,
}

/// Fired when a new pool is appended.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool_id: u32,
    pub asset: Address,
    pub alloc_point: i128,
    pub timestamp: u64,
}

/// Fired when a pool's allocation weight changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllocationSetEvent {
    pub pool_id: u32,
    pub alloc_point: i128,
    pub timestamp: u64,
}

/// Fired when a user deposits into a pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub user: Address,
    pub pool_id: u32,
    pub stake_id: u64,
    /// Net amount credited to the stake, after the deposit fee.
    pub amount: i128,
    pub unlock_time: u64,
    pub timestamp: u64,
}

/// Fired when a deposit fee is taken.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeTakenEvent {
    pub user: Address,
    pub pool_id: u32,
    pub fee: i128,
    pub pool_share: i128,
    pub timestamp: u64,
}

/// Fired when a user withdraws a full stake (principal plus reward).
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub user: Address,
    pub pool_id: u32,
    pub stake_id: u64,
    pub amount: i128,
    pub reward: i128,
    pub timestamp: u64,
}

/// Fired when a user harvests reward without touching principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsEvent {
    pub user: Address,
    pub pool_id: u32,
    pub stake_id: u64,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when harvested reward is folded back into a stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompoundedEarningsEvent {
    pub user: Address,
    pub pool_id: u32,
    pub stake_id: u64,
    /// Net amount added to the stake, after the fee.
    pub compounded: i128,
    pub new_stake_amount: i128,
    pub timestamp: u64,
}

/// Fired when a stake is relocked for a new duration.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RestakeEvent {
    pub user: Address,
    pub pool_id: u32,
    pub stake_id: u64,
    pub lock_days: u32,
    pub unlock_time: u64,
    pub timestamp: u64,
}

/// Fired when accumulated missed rewards are minted out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyMintEvent {
    pub recipient: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the deposit fee configuration changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositFeeSetEvent {
    pub percent: u32,
    pub precision: u32,
    pub timestamp: u64,
}

/// Fired when the withdraw-window length changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawWindowSetEvent {
    pub window_days: u32,
    pub timestamp: u64,
}

/// Fired when a reward window is appended to the schedule.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardWindowAddedEvent {
    pub window: RewardWindow,
    pub timestamp: u64,
}

/// Fired once per asset when collected protocol fees are claimed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeesClaimedEvent {
    pub to: Address,
    pub asset: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the circuit breaker is engaged.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HaltedEvent {
    pub caller: Address,
    pub timestamp: u64,
}

/// Fired when the circuit breaker is released.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResumedEvent {
    pub caller: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, reward_token: Address, start_time: u64) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            reward_token,
            start_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_added(env: &Env, pool_id: u32, asset: Address, alloc_point: i128) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool_id),
        PoolAddedEvent {
            pool_id,
            asset,
            alloc_point,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_allocation_set(env: &Env, pool_id: u32, alloc_point: i128) {
    env.events().publish(
        (symbol_short!("ALLOC_SET"), pool_id),
        AllocationSetEvent {
            pool_id,
            alloc_point,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit(
    env: &Env,
    user: Address,
    pool_id: u32,
    stake_id: u64,
    amount: i128,
    unlock_time: u64,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), user.clone(), pool_id),
        DepositEvent {
            user,
            pool_id,
            stake_id,
            amount,
            unlock_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_fee_taken(env: &Env, user: Address, pool_id: u32, fee: i128, pool_share: i128) {
    env.events().publish(
        (symbol_short!("FEE_TAKEN"), user.clone(), pool_id),
        FeeTakenEvent {
            user,
            pool_id,
            fee,
            pool_share,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw(
    env: &Env,
    user: Address,
    pool_id: u32,
    stake_id: u64,
    amount: i128,
    reward: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), user.clone(), pool_id),
        WithdrawEvent {
            user,
            pool_id,
            stake_id,
            amount,
            reward,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards(env: &Env, user: Address, pool_id: u32, stake_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("REWARDS"), user.clone(), pool_id),
        RewardsEvent {
            user,
            pool_id,
            stake_id,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_compounded(
    env: &Env,
    user: Address,
    pool_id: u32,
    stake_id: u64,
    compounded: i128,
    new_stake_amount: i128,
) {
    env.events().publish(
        (symbol_short!("COMPOUND"), user.clone(), pool_id),
        CompoundedEarningsEvent {
            user,
            pool_id,
            stake_id,
            compounded,
            new_stake_amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_restake(
    env: &Env,
    user: Address,
    pool_id: u32,
    stake_id: u64,
    lock_days: u32,
    unlock_time: u64,
) {
    env.events().publish(
        (symbol_short!("RESTAKE"), user.clone(), pool_id),
        RestakeEvent {
            user,
            pool_id,
            stake_id,
            lock_days,
            unlock_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_mint(env: &Env, recipient: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("EMRG_MINT"), recipient.clone()),
        EmergencyMintEvent {
            recipient,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit_fee_set(env: &Env, percent: u32, precision: u32) {
    env.events().publish(
        (symbol_short!("FEE_SET"),),
        DepositFeeSetEvent {
            percent,
            precision,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw_window_set(env: &Env, window_days: u32) {
    env.events().publish(
        (symbol_short!("WIN_SET"),),
        WithdrawWindowSetEvent {
            window_days,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_window_added(env: &Env, window: RewardWindow) {
    env.events().publish(
        (symbol_short!("SCHED_ADD"),),
        RewardWindowAddedEvent {
            window,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_fees_claimed(env: &Env, to: Address, asset: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("FEE_CLAIM"), to.clone()),
        FeesClaimedEvent {
            to,
            asset,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_halted(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("HALT"),),
        HaltedEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_resumed(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("RESUME"),),
        ResumedEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}
