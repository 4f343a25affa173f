#![no_std]

pub mod circuit_breaker;
pub mod events;
pub mod fee;
pub mod pool;
pub mod schedule;
pub mod stake;

use common::admin_gate;
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol, Vec};

use fee::DepositFeeConfig;
use pool::Pool;
use schedule::RewardWindow;
use stake::{UserAccount, UserStake, SECONDS_PER_DAY};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const START_TIME: Symbol = symbol_short!("START_T");
const WINDOWS: Symbol = symbol_short!("WINDOWS");
const FEE_CONFIG: Symbol = symbol_short!("FEE_CFG");
const WITHDRAW_WINDOW: Symbol = symbol_short!("WDW_DAYS");
const TOTAL_ALLOC: Symbol = symbol_short!("TOT_ALLOC");
const TOTAL_PAID_OUT: Symbol = symbol_short!("TOT_PAID");
// Collected fees are denominated in the paying pool's asset, so the counter
// is keyed per asset: (FEE_COLLECTED, asset) in persistent storage.
const FEE_COLLECTED: Symbol = symbol_short!("FEE_COLL");
const REDISTRIBUTED: Symbol = symbol_short!("REDIST");
const MISSED_REWARDS: Symbol = symbol_short!("MISSED");

/// The only pool in which compounding is permitted: its asset is the reward
/// token itself, so harvested reward can re-enter as principal.
const PRIMARY_POOL_ID: u32 = 0;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    EngineHalted = 4,
    InvalidPool = 5,
    InvalidAmount = 6,
    InvalidLockDuration = 7,
    NotUnlocked = 8,
    OutsideWithdrawWindow = 9,
    StakeNotFound = 10,
    NoStakeForUser = 11,
    CompoundOnlyInPrimaryPool = 12,
    NothingToCompound = 13,
    NoMissedRewards = 14,
    InvalidFeeConfig = 15,
    InvalidScheduleWindow = 16,
    FirstPoolAssetMustBeReward = 17,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct AllocationStakingContract;

#[contractimpl]
impl AllocationStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `reward_token`   – token minted as reward (and staked in pool 0).
    /// * `start_time`     – earliest timestamp any pool starts accruing.
    /// * `reward_windows` – the emission schedule, chronologically ordered
    ///                      non-overlapping `[start, end)` windows.
    /// * fee parameters   – see [`fee::DepositFeeConfig`]; the effective fee
    ///                      is bounded at 10%, checked here and on every later
    ///                      `set_deposit_fee`, never at deposit time.
    /// * `withdraw_window_days` – span after unlock during which a stake may
    ///                      be withdrawn before it auto-relocks.
    pub fn initialize(
        env: Env,
        owner: Address,
        reward_token: Address,
        start_time: u64,
        fee_percent: u32,
        fee_precision: u32,
        fee_pool_share_percent: u32,
        withdraw_window_days: u32,
        reward_windows: Vec<RewardWindow>,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        fee::validate_fee(fee_percent, fee_precision)?;
        fee::validate_pool_share(fee_pool_share_percent)?;
        schedule::validate_windows(&reward_windows)?;

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage().instance().set(&START_TIME, &start_time);
        env.storage().instance().set(&WINDOWS, &reward_windows);
        env.storage().instance().set(
            &FEE_CONFIG,
            &DepositFeeConfig {
                percent: fee_percent,
                precision: fee_precision,
                pool_share_percent: fee_pool_share_percent,
            },
        );
        env.storage()
            .instance()
            .set(&WITHDRAW_WINDOW, &withdraw_window_days);
        // Counters start absent and read as zero via unwrap_or(0).

        admin_gate::set_owner(&env, &owner);

        events::publish_initialized(&env, owner, reward_token, start_time);

        Ok(())
    }

    // ── Pool management ─────────────────────────────────────────────────────

    /// Append a new pool. The first pool's asset must be the reward token so
    /// that compounding and fee claims stay in one asset.
    pub fn add_pool(
        env: Env,
        caller: Address,
        alloc_point: i128,
        asset: Address,
        with_mass_update: bool,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;
        if alloc_point < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let pool_id = pool::pool_count(&env);
        if pool_id == PRIMARY_POOL_ID && asset != Self::reward_token(&env)? {
            return Err(ContractError::FirstPoolAssetMustBeReward);
        }

        if with_mass_update {
            Self::mass_update_pools(env.clone());
        }

        let now = env.ledger().timestamp();
        let start_time: u64 = env.storage().instance().get(&START_TIME).unwrap_or(0);
        let last_update_time = if start_time > now { start_time } else { now };

        let total_alloc = Self::total_alloc_point(&env) + alloc_point;
        env.storage().instance().set(&TOTAL_ALLOC, &total_alloc);

        pool::append_pool(
            &env,
            &Pool {
                id: pool_id,
                asset: asset.clone(),
                alloc_point,
                last_update_time,
                acc_reward_per_share: 0,
                total_deposited: 0,
                unique_participants: 0,
            },
        );

        events::publish_pool_added(&env, pool_id, asset, alloc_point);

        Ok(pool_id)
    }

    /// Change a pool's allocation weight. The pool accumulator is flushed at
    /// the old weight first so reward already accrued is never recomputed
    /// under the new one.
    pub fn set_allocation(
        env: Env,
        caller: Address,
        pool_id: u32,
        alloc_point: i128,
        with_mass_update: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;
        if alloc_point < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut target = pool::get_pool(&env, pool_id).ok_or(ContractError::InvalidPool)?;

        if with_mass_update {
            Self::mass_update_pools(env.clone());
            target = pool::get_pool(&env, pool_id).ok_or(ContractError::InvalidPool)?;
        } else {
            Self::sync_pool(&env, &mut target);
        }

        let total_alloc = Self::total_alloc_point(&env) - target.alloc_point + alloc_point;
        env.storage().instance().set(&TOTAL_ALLOC, &total_alloc);

        target.alloc_point = alloc_point;
        pool::store_pool(&env, &target);

        events::publish_allocation_set(&env, pool_id, alloc_point);

        Ok(())
    }

    // ── Accumulator maintenance ─────────────────────────────────────────────

    /// Flush a single pool's accumulator up to the current timestamp. Open to
    /// anyone; a stale pool only under-reports pending reward, never
    /// over-reports.
    pub fn update_pool(env: Env, pool_id: u32) -> Result<(), ContractError> {
        let mut target = pool::get_pool(&env, pool_id).ok_or(ContractError::InvalidPool)?;
        Self::sync_pool(&env, &mut target);
        pool::store_pool(&env, &target);
        Ok(())
    }

    /// Flush every pool. Pool order does not matter; accumulators are
    /// independent.
    pub fn mass_update_pools(env: Env) {
        for pool_id in 0..pool::pool_count(&env) {
            if let Some(mut target) = pool::get_pool(&env, pool_id) {
                Self::sync_pool(&env, &mut target);
                pool::store_pool(&env, &target);
            }
        }
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `raw_amount` of the pool's asset, locked for `lock_days`.
    ///
    /// The deposit fee comes off the top; the net amount is credited to a new
    /// stake whose reward debt is snapshot from the freshly updated
    /// accumulator, so no historical reward is claimable retroactively.
    /// Returns the new stake's stable id.
    pub fn deposit(
        env: Env,
        user: Address,
        pool_id: u32,
        raw_amount: i128,
        lock_days: u32,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        circuit_breaker::require_operating(&env)?;
        user.require_auth();

        if raw_amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let multiplier_percent =
            stake::multiplier_for(lock_days).ok_or(ContractError::InvalidLockDuration)?;
        let mut target = pool::get_pool(&env, pool_id).ok_or(ContractError::InvalidPool)?;

        Self::sync_pool(&env, &mut target);

        let split = fee::split(&Self::fee_config(&env), raw_amount);
        let net_amount = raw_amount - split.fee;

        token::Client::new(&env, &target.asset).transfer(
            &user,
            &env.current_contract_address(),
            &raw_amount,
        );

        if split.fee > 0 {
            target.total_deposited += split.pool_share;
            Self::bump_counter(&env, &REDISTRIBUTED, split.pool_share);
            Self::bump_collected_fees(&env, &target.asset, split.collected);
            events::publish_fee_taken(&env, user.clone(), pool_id, split.fee, split.pool_share);
        }

        let mut account = match stake::get_account(&env, pool_id, &user) {
            Some(account) => account,
            None => {
                target.unique_participants += 1;
                stake::new_account(&env)
            }
        };

        let now = env.ledger().timestamp();
        let unlock_time = now + lock_days as u64 * SECONDS_PER_DAY;
        let stake_id = account.next_stake_id;
        account.next_stake_id += 1;

        let mut record = UserStake {
            id: stake_id,
            amount: net_amount,
            lock_days,
            multiplier_percent,
            unlock_time,
            reward_debt: 0,
        };
        stake::reset_debt(&mut record, target.acc_reward_per_share);
        account.stakes.push_back(record);
        account.total_amount += net_amount;

        target.total_deposited += net_amount;

        stake::store_account(&env, pool_id, &user, &account);
        pool::store_pool(&env, &target);

        events::publish_deposit(&env, user, pool_id, stake_id, net_amount, unlock_time);

        Ok(stake_id)
    }

    /// Withdraw a stake in full: principal plus pending reward.
    ///
    /// Only permitted inside the withdraw window `[unlock, unlock + window)`.
    /// Before unlock the stake is locked; after the window it is auto-relocked
    /// and only a `restake` re-opens withdrawal.
    pub fn withdraw(
        env: Env,
        user: Address,
        pool_id: u32,
        stake_id: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        circuit_breaker::require_operating(&env)?;
        user.require_auth();

        let mut target = pool::get_pool(&env, pool_id).ok_or(ContractError::InvalidPool)?;
        let mut account =
            stake::get_account(&env, pool_id, &user).ok_or(ContractError::NoStakeForUser)?;
        let (index, record) =
            stake::find_stake(&account, stake_id).ok_or(ContractError::StakeNotFound)?;

        let now = env.ledger().timestamp();
        if now < record.unlock_time {
            return Err(ContractError::NotUnlocked);
        }
        if now >= record.unlock_time + Self::withdraw_window_seconds(&env) {
            return Err(ContractError::OutsideWithdrawWindow);
        }

        Self::sync_pool(&env, &mut target);

        let pending = stake::pending_amount(&record, target.acc_reward_per_share);

        token::Client::new(&env, &target.asset).transfer(
            &env.current_contract_address(),
            &user,
            &record.amount,
        );
        if pending > 0 {
            Self::mint_reward(&env, &user, pending)?;
            Self::bump_counter(&env, &TOTAL_PAID_OUT, pending);
        }

        account.total_amount -= record.amount;
        stake::remove_stake(&mut account, index);
        target.total_deposited -= record.amount;

        stake::store_account(&env, pool_id, &user, &account);
        pool::store_pool(&env, &target);

        events::publish_withdraw(&env, user, pool_id, stake_id, record.amount, pending);

        Ok(())
    }

    /// Harvest a stake's pending reward without touching principal. Allowed
    /// while the stake is still locked. Returns the amount paid, which may be
    /// zero.
    pub fn collect(
        env: Env,
        user: Address,
        pool_id: u32,
        stake_id: u64,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        circuit_breaker::require_operating(&env)?;
        user.require_auth();

        let mut target = pool::get_pool(&env, pool_id).ok_or(ContractError::InvalidPool)?;
        let mut account =
            stake::get_account(&env, pool_id, &user).ok_or(ContractError::NoStakeForUser)?;
        let (index, mut record) =
            stake::find_stake(&account, stake_id).ok_or(ContractError::StakeNotFound)?;

        Self::sync_pool(&env, &mut target);

        let pending = stake::pending_amount(&record, target.acc_reward_per_share);
        if pending > 0 {
            Self::mint_reward(&env, &user, pending)?;
            Self::bump_counter(&env, &TOTAL_PAID_OUT, pending);
        }
        stake::reset_debt(&mut record, target.acc_reward_per_share);
        account.stakes.set(index, record);

        stake::store_account(&env, pool_id, &user, &account);
        pool::store_pool(&env, &target);

        events::publish_rewards(&env, user, pool_id, stake_id, pending);

        Ok(pending)
    }

    /// Fold a stake's pending reward back into its principal.
    ///
    /// Only valid in the primary pool, whose asset is the reward token. The
    /// harvested amount re-enters through the deposit-fee path: the fee is
    /// split exactly as on deposit and only the net amount grows the stake.
    /// The full harvest is minted to the contract so later withdrawals are
    /// covered.
    pub fn compound(
        env: Env,
        user: Address,
        pool_id: u32,
        stake_id: u64,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        circuit_breaker::require_operating(&env)?;
        user.require_auth();

        if pool_id != PRIMARY_POOL_ID {
            return Err(ContractError::CompoundOnlyInPrimaryPool);
        }

        let mut target = pool::get_pool(&env, pool_id).ok_or(ContractError::InvalidPool)?;
        let mut account =
            stake::get_account(&env, pool_id, &user).ok_or(ContractError::NoStakeForUser)?;
        let (index, mut record) =
            stake::find_stake(&account, stake_id).ok_or(ContractError::StakeNotFound)?;

        Self::sync_pool(&env, &mut target);

        let pending = stake::pending_amount(&record, target.acc_reward_per_share);
        if pending == 0 {
            return Err(ContractError::NothingToCompound);
        }

        Self::mint_reward(&env, &env.current_contract_address(), pending)?;

        let split = fee::split(&Self::fee_config(&env), pending);
        let net_amount = pending - split.fee;

        if split.fee > 0 {
            target.total_deposited += split.pool_share;
            Self::bump_counter(&env, &REDISTRIBUTED, split.pool_share);
            Self::bump_collected_fees(&env, &target.asset, split.collected);
            events::publish_fee_taken(&env, user.clone(), pool_id, split.fee, split.pool_share);
        }

        record.amount += net_amount;
        stake::reset_debt(&mut record, target.acc_reward_per_share);
        let new_stake_amount = record.amount;
        account.stakes.set(index, record);
        account.total_amount += net_amount;
        target.total_deposited += net_amount;

        stake::store_account(&env, pool_id, &user, &account);
        pool::store_pool(&env, &target);

        events::publish_compounded(&env, user, pool_id, stake_id, net_amount, new_stake_amount);

        Ok(net_amount)
    }

    /// Relock an unlocked (or auto-relocked) stake for a new duration.
    /// Principal and reward debt are untouched; only the unlock time and
    /// multiplier change.
    pub fn restake(
        env: Env,
        user: Address,
        pool_id: u32,
        stake_id: u64,
        new_lock_days: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        circuit_breaker::require_operating(&env)?;
        user.require_auth();

        let multiplier_percent =
            stake::multiplier_for(new_lock_days).ok_or(ContractError::InvalidLockDuration)?;
        let mut target = pool::get_pool(&env, pool_id).ok_or(ContractError::InvalidPool)?;
        let mut account =
            stake::get_account(&env, pool_id, &user).ok_or(ContractError::NoStakeForUser)?;
        let (index, mut record) =
            stake::find_stake(&account, stake_id).ok_or(ContractError::StakeNotFound)?;

        let now = env.ledger().timestamp();
        if now < record.unlock_time {
            return Err(ContractError::NotUnlocked);
        }

        Self::sync_pool(&env, &mut target);
        pool::store_pool(&env, &target);

        let unlock_time = now + new_lock_days as u64 * SECONDS_PER_DAY;
        record.lock_days = new_lock_days;
        record.multiplier_percent = multiplier_percent;
        record.unlock_time = unlock_time;
        account.stakes.set(index, record);

        stake::store_account(&env, pool_id, &user, &account);

        events::publish_restake(&env, user, pool_id, stake_id, new_lock_days, unlock_time);

        Ok(())
    }

    // ── Missed-reward backfill ──────────────────────────────────────────────

    /// Mint the accumulated missed rewards (reward that accrued while a pool
    /// had zero deposits) to `recipient` and reset the counter.
    pub fn emergency_mint(
        env: Env,
        caller: Address,
        recipient: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        circuit_breaker::require_operating(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        // Bring every accumulator current first so nothing
        // accrued-but-unrecorded is left behind.
        Self::mass_update_pools(env.clone());

        let missed: i128 = env.storage().instance().get(&MISSED_REWARDS).unwrap_or(0);
        if missed == 0 {
            return Err(ContractError::NoMissedRewards);
        }
        env.storage().instance().set(&MISSED_REWARDS, &0i128);

        Self::mint_reward(&env, &recipient, missed)?;

        events::publish_emergency_mint(&env, recipient, missed);

        Ok(missed)
    }

    // ── Fee administration ──────────────────────────────────────────────────

    /// Update the deposit fee. Bounded at an effective 10%; validated here,
    /// never at deposit time.
    pub fn set_deposit_fee(
        env: Env,
        caller: Address,
        percent: u32,
        precision: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;
        fee::validate_fee(percent, precision)?;

        let mut config = Self::fee_config(&env);
        config.percent = percent;
        config.precision = precision;
        env.storage().instance().set(&FEE_CONFIG, &config);

        events::publish_deposit_fee_set(&env, percent, precision);

        Ok(())
    }

    /// Transfer the collected protocol fee share to `to` and reset the
    /// counters. Fees are held in the asset of the pool that paid them, so
    /// each asset settles in kind; pool principal is never touched. Returns
    /// the sum of the claimed amounts.
    pub fn claim_collected_fees(
        env: Env,
        caller: Address,
        to: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        circuit_breaker::require_operating(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let mut total: i128 = 0;
        for pool_id in 0..pool::pool_count(&env) {
            let Some(target) = pool::get_pool(&env, pool_id) else {
                continue;
            };
            // Pools sharing an asset settle on the first hit; the counter is
            // zero for the rest.
            let collected = Self::collected_fees(&env, &target.asset);
            if collected == 0 {
                continue;
            }
            env.storage()
                .persistent()
                .set(&(FEE_COLLECTED, target.asset.clone()), &0i128);

            token::Client::new(&env, &target.asset).transfer(
                &env.current_contract_address(),
                &to,
                &collected,
            );
            events::publish_fees_claimed(&env, to.clone(), target.asset, collected);
            total += collected;
        }

        if total == 0 {
            return Err(ContractError::InvalidAmount);
        }
        Ok(total)
    }

    // ── Schedule / window administration ────────────────────────────────────

    /// Append a reward window to the schedule. Appends extend the schedule
    /// forward only; covered history is immutable.
    pub fn add_reward_window(
        env: Env,
        caller: Address,
        window: RewardWindow,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let mut windows = Self::windows(&env);
        schedule::validate_append(&windows, &window)?;
        windows.push_back(window.clone());
        env.storage().instance().set(&WINDOWS, &windows);

        events::publish_reward_window_added(&env, window);

        Ok(())
    }

    /// Update the withdraw-window length. Takes effect for every stake's next
    /// window.
    pub fn set_withdraw_window(
        env: Env,
        caller: Address,
        window_days: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        env.storage().instance().set(&WITHDRAW_WINDOW, &window_days);

        events::publish_withdraw_window_set(&env, window_days);

        Ok(())
    }

    // ── Circuit breaker ─────────────────────────────────────────────────────

    /// Halt all balance-mutating operations. Reads and accumulator pokes stay
    /// available. Owner or any registered admin.
    pub fn halt(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_operator(&env, &caller)?;

        circuit_breaker::halt(&env);
        events::publish_halted(&env, caller);

        Ok(())
    }

    /// Release the circuit breaker.
    pub fn resume(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_operator(&env, &caller)?;

        circuit_breaker::resume(&env);
        events::publish_resumed(&env, caller);

        Ok(())
    }

    // ── Admin registry ──────────────────────────────────────────────────────

    pub fn add_admin(env: Env, caller: Address, admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;
        admin_gate::add_admin(&env, &admin);
        Ok(())
    }

    pub fn remove_admin(env: Env, caller: Address, admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;
        admin_gate::remove_admin(&env, &admin);
        Ok(())
    }

    pub fn is_admin(env: Env, who: Address) -> bool {
        admin_gate::is_admin(&env, &who)
    }

    pub fn get_all_admins(env: Env) -> Vec<Address> {
        admin_gate::get_all_admins(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        admin_gate::get_owner(&env).ok_or(ContractError::NotInitialized)
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// Pending reward for one stake, as if the pool accumulator were flushed
    /// at the current timestamp. Non-mutating.
    pub fn pending(
        env: Env,
        pool_id: u32,
        user: Address,
        stake_id: u64,
    ) -> Result<i128, ContractError> {
        let target = pool::get_pool(&env, pool_id).ok_or(ContractError::InvalidPool)?;
        let account =
            stake::get_account(&env, pool_id, &user).ok_or(ContractError::NoStakeForUser)?;
        let (_, record) =
            stake::find_stake(&account, stake_id).ok_or(ContractError::StakeNotFound)?;

        let acc = pool::projected_acc_per_share(
            &target,
            &Self::windows(&env),
            Self::total_alloc_point(&env),
            env.ledger().timestamp(),
        );
        Ok(stake::pending_amount(&record, acc))
    }

    /// Sum of pending reward over all of the user's stakes in one pool.
    pub fn total_pending(env: Env, pool_id: u32, user: Address) -> Result<i128, ContractError> {
        let target = pool::get_pool(&env, pool_id).ok_or(ContractError::InvalidPool)?;
        let account =
            stake::get_account(&env, pool_id, &user).ok_or(ContractError::NoStakeForUser)?;

        let acc = pool::projected_acc_per_share(
            &target,
            &Self::windows(&env),
            Self::total_alloc_point(&env),
            env.ledger().timestamp(),
        );
        let mut total: i128 = 0;
        for record in account.stakes.iter() {
            total += stake::pending_amount(&record, acc);
        }
        Ok(total)
    }

    /// The user's total live principal in one pool.
    pub fn deposited(env: Env, pool_id: u32, user: Address) -> Result<i128, ContractError> {
        pool::get_pool(&env, pool_id).ok_or(ContractError::InvalidPool)?;
        let account =
            stake::get_account(&env, pool_id, &user).ok_or(ContractError::NoStakeForUser)?;
        Ok(account.total_amount)
    }

    /// Forward-looking annualized yield for a pool, in basis points: reward
    /// projected over the next 365 days, scaled by the pool's allocation
    /// share, divided by current deposits. Zero for an empty pool.
    pub fn get_pool_apr(env: Env, pool_id: u32) -> Result<i128, ContractError> {
        let target = pool::get_pool(&env, pool_id).ok_or(ContractError::InvalidPool)?;
        if target.total_deposited == 0 {
            return Ok(0);
        }
        let total_alloc = Self::total_alloc_point(&env);
        if total_alloc == 0 {
            return Ok(0);
        }

        let now = env.ledger().timestamp();
        let year_reward =
            schedule::count_reward_amount(&Self::windows(&env), now, now + 365 * SECONDS_PER_DAY);
        Ok(year_reward * target.alloc_point / total_alloc * 10_000 / target.total_deposited)
    }

    /// Voting-weight metric over all of the user's stakes, across every pool:
    /// `amount * (100 + multiplier) / 100`, counting only stakes that have
    /// not yet passed their withdraw window (auto-relocked stakes contribute
    /// nothing until restaked).
    pub fn get_voting_power(env: Env, user: Address) -> i128 {
        let now = env.ledger().timestamp();
        let window = Self::withdraw_window_seconds(&env);

        let mut total: i128 = 0;
        for pool_id in 0..pool::pool_count(&env) {
            let Some(account) = stake::get_account(&env, pool_id, &user) else {
                continue;
            };
            for record in account.stakes.iter() {
                if now < record.unlock_time + window {
                    total += stake::voting_weight(&record);
                }
            }
        }
        total
    }

    pub fn pool_info(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        pool::get_pool(&env, pool_id).ok_or(ContractError::InvalidPool)
    }

    pub fn pool_length(env: Env) -> u32 {
        pool::pool_count(&env)
    }

    pub fn get_user_stake(
        env: Env,
        pool_id: u32,
        user: Address,
        stake_id: u64,
    ) -> Result<UserStake, ContractError> {
        let account =
            stake::get_account(&env, pool_id, &user).ok_or(ContractError::NoStakeForUser)?;
        stake::find_stake(&account, stake_id)
            .map(|(_, record)| record)
            .ok_or(ContractError::StakeNotFound)
    }

    /// All of the user's stakes in one pool; empty when the user never
    /// participated. Slot order is not meaningful.
    pub fn get_user_stakes(env: Env, pool_id: u32, user: Address) -> Vec<UserStake> {
        match stake::get_account(&env, pool_id, &user) {
            Some(account) => account.stakes,
            None => Vec::new(&env),
        }
    }

    /// Number of live stake records the user holds in one pool.
    pub fn user_stake_count(env: Env, pool_id: u32, user: Address) -> u32 {
        match stake::get_account(&env, pool_id, &user) {
            Some(account) => account.stakes.len(),
            None => 0,
        }
    }

    pub fn get_user_account(
        env: Env,
        pool_id: u32,
        user: Address,
    ) -> Result<UserAccount, ContractError> {
        stake::get_account(&env, pool_id, &user).ok_or(ContractError::NoStakeForUser)
    }

    pub fn get_reward_windows(env: Env) -> Vec<RewardWindow> {
        Self::windows(&env)
    }

    pub fn get_deposit_fee(env: Env) -> DepositFeeConfig {
        Self::fee_config(&env)
    }

    pub fn get_withdraw_window_days(env: Env) -> u32 {
        env.storage().instance().get(&WITHDRAW_WINDOW).unwrap_or(0)
    }

    pub fn get_total_alloc_point(env: Env) -> i128 {
        Self::total_alloc_point(&env)
    }

    pub fn total_paid_out(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_PAID_OUT).unwrap_or(0)
    }

    pub fn total_redistributed(env: Env) -> i128 {
        env.storage().instance().get(&REDISTRIBUTED).unwrap_or(0)
    }

    /// Protocol fee accrued and not yet claimed, denominated in `asset`.
    pub fn deposit_fee_collected(env: Env, asset: Address) -> i128 {
        Self::collected_fees(&env, &asset)
    }

    pub fn missed_rewards(env: Env) -> i128 {
        env.storage().instance().get(&MISSED_REWARDS).unwrap_or(0)
    }

    pub fn is_halted(env: Env) -> bool {
        circuit_breaker::is_halted(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// Multiplier percent for a lock duration.
    pub fn stake_multiplier(_env: Env, lock_days: u32) -> Result<u32, ContractError> {
        stake::multiplier_for(lock_days).ok_or(ContractError::InvalidLockDuration)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if !admin_gate::is_owner(env, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn require_operator(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if !admin_gate::is_operator(env, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn reward_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn windows(env: &Env) -> Vec<RewardWindow> {
        env.storage()
            .instance()
            .get(&WINDOWS)
            .unwrap_or(Vec::new(env))
    }

    fn fee_config(env: &Env) -> DepositFeeConfig {
        env.storage()
            .instance()
            .get(&FEE_CONFIG)
            .unwrap_or(DepositFeeConfig {
                percent: 0,
                precision: 0,
                pool_share_percent: 0,
            })
    }

    fn total_alloc_point(env: &Env) -> i128 {
        env.storage().instance().get(&TOTAL_ALLOC).unwrap_or(0)
    }

    fn withdraw_window_seconds(env: &Env) -> u64 {
        let days: u32 = env.storage().instance().get(&WITHDRAW_WINDOW).unwrap_or(0);
        days as u64 * SECONDS_PER_DAY
    }

    fn bump_counter(env: &Env, key: &Symbol, delta: i128) {
        if delta == 0 {
            return;
        }
        let current: i128 = env.storage().instance().get(key).unwrap_or(0);
        env.storage().instance().set(key, &(current + delta));
    }

    fn collected_fees(env: &Env, asset: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(FEE_COLLECTED, asset.clone()))
            .unwrap_or(0)
    }

    fn bump_collected_fees(env: &Env, asset: &Address, delta: i128) {
        if delta == 0 {
            return;
        }
        let key = (FEE_COLLECTED, asset.clone());
        let current: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        env.storage().persistent().set(&key, &(current + delta));
    }

    /// Flush one pool's accumulator; reward accrued while the pool was empty
    /// lands in the missed-reward accumulator instead.
    fn sync_pool(env: &Env, target: &mut Pool) {
        let missed = pool::advance(
            target,
            &Self::windows(env),
            Self::total_alloc_point(env),
            env.ledger().timestamp(),
        );
        Self::bump_counter(env, &MISSED_REWARDS, missed);
    }

    fn mint_reward(env: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
        token::StellarAssetClient::new(env, &Self::reward_token(env)?).mint(to, &amount);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_schedule;
