//! Halt / resume circuit breaker.
//!
//! Halting freezes every balance-mutating entry point while leaving the
//! read paths and the accumulator-poke entry points open, so operators can
//! stop risk without losing observability.

use soroban_sdk::{symbol_short, Env, Symbol};

use crate::ContractError;

const HALTED: Symbol = symbol_short!("HALTED");

/// Guard: revert with `EngineHalted` while the breaker is engaged.
pub fn require_operating(env: &Env) -> Result<(), ContractError> {
    if is_halted(env) {
        return Err(ContractError::EngineHalted);
    }
    Ok(())
}

pub fn is_halted(env: &Env) -> bool {
    env.storage().instance().get(&HALTED).unwrap_or(false)
}

/// Engages the breaker. Authorization is the caller's responsibility.
pub fn halt(env: &Env) {
    env.storage().instance().set(&HALTED, &true);
}

/// Releases the breaker.
pub fn resume(env: &Env) {
    env.storage().instance().set(&HALTED, &false);
}
