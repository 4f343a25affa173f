//! Deposit-fee computation and routing.
//!
//! A fee is taken on every deposit (and on compounded reward, which re-enters
//! through the same path). The fee splits into a share redistributed into the
//! pool's deposits and a share collected for the protocol; the split is exact
//! by construction (`pool_share + collected == fee`).

use soroban_sdk::contracttype;

use crate::ContractError;

/// Fee configuration, validated when set — never at deposit time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositFeeConfig {
    pub percent: u32,
    pub precision: u32,
    /// Portion of the fee (in percent) redistributed into the pool.
    pub pool_share_percent: u32,
}

/// Outcome of applying the fee to a raw amount.
pub struct FeeSplit {
    pub fee: i128,
    pub pool_share: i128,
    pub collected: i128,
}

/// The effective fee may never exceed 10%. A zero percent disables the fee
/// entirely (precision is then ignored, so `(0, 0)` is a valid "no fee"
/// configuration).
pub fn validate_fee(percent: u32, precision: u32) -> Result<(), ContractError> {
    if percent == 0 {
        return Ok(());
    }
    if precision == 0 || percent as u64 * 10 > precision as u64 {
        return Err(ContractError::InvalidFeeConfig);
    }
    Ok(())
}

pub fn validate_pool_share(pool_share_percent: u32) -> Result<(), ContractError> {
    if pool_share_percent > 100 {
        return Err(ContractError::InvalidFeeConfig);
    }
    Ok(())
}

/// Computes the fee on `raw_amount` and splits it. Integer division rounds
/// down at both steps; the collected share absorbs the remainder.
pub fn split(config: &DepositFeeConfig, raw_amount: i128) -> FeeSplit {
    if config.percent == 0 {
        return FeeSplit {
            fee: 0,
            pool_share: 0,
            collected: 0,
        };
    }
    let fee = raw_amount * config.percent as i128 / config.precision as i128;
    let pool_share = fee * config.pool_share_percent as i128 / 100;
    FeeSplit {
        fee,
        pool_share,
        collected: fee - pool_share,
    }
}
