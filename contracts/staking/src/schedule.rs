//! Piecewise-constant reward emission schedule.
//!
//! The schedule is an ordered list of non-overlapping, half-open
//! `[start_time, end_time)` windows, each carrying a per-second emission rate
//! scaled by [`REWARD_PRECISION`]. [`count_reward_amount`] integrates the
//! curve over an arbitrary interval; outside the covered range the schedule
//! contributes nothing, it never extrapolates.

use soroban_sdk::{contracttype, Vec};

use crate::ContractError;

/// Scale factor applied to `rate_per_second`. A window emitting one token
/// per second stores `1 * REWARD_PRECISION`.
pub const REWARD_PRECISION: i128 = 1_000_000_000_000;

/// A single segment of the emission curve.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardWindow {
    pub start_time: u64,
    pub end_time: u64,
    /// Emission per second, scaled by [`REWARD_PRECISION`].
    pub rate_per_second: i128,
}

/// Checks a full window list supplied at initialisation: every window must be
/// well-formed and the list chronologically ordered without overlap.
pub fn validate_windows(windows: &Vec<RewardWindow>) -> Result<(), ContractError> {
    let mut previous_end: u64 = 0;
    for window in windows.iter() {
        if window.start_time >= window.end_time || window.rate_per_second < 0 {
            return Err(ContractError::InvalidScheduleWindow);
        }
        if window.start_time < previous_end {
            return Err(ContractError::InvalidScheduleWindow);
        }
        previous_end = window.end_time;
    }
    Ok(())
}

/// Checks a window appended after initialisation. Appends may only extend the
/// schedule forward; rewriting covered history is not permitted.
pub fn validate_append(
    windows: &Vec<RewardWindow>,
    window: &RewardWindow,
) -> Result<(), ContractError> {
    if window.start_time >= window.end_time || window.rate_per_second < 0 {
        return Err(ContractError::InvalidScheduleWindow);
    }
    if let Some(last) = windows.last() {
        if window.start_time < last.end_time {
            return Err(ContractError::InvalidScheduleWindow);
        }
    }
    Ok(())
}

/// Total reward emitted over `[start, end)`.
///
/// Sums the intersected portion of every overlapping window:
/// `(overlap_end − overlap_start) * rate / REWARD_PRECISION`. Returns 0 when
/// `start >= end`. For `a <= b <= c` the result composes:
/// `count(a, c) == count(a, b) + count(b, c)` (exactly, when rates are
/// multiples of the precision).
pub fn count_reward_amount(windows: &Vec<RewardWindow>, start: u64, end: u64) -> i128 {
    if start >= end {
        return 0;
    }

    let mut total: i128 = 0;
    for window in windows.iter() {
        if window.end_time <= start {
            continue;
        }
        if window.start_time >= end {
            // Windows are chronologically ordered, nothing further overlaps.
            break;
        }

        let overlap_start = if window.start_time > start {
            window.start_time
        } else {
            start
        };
        let overlap_end = if window.end_time < end {
            window.end_time
        } else {
            end
        };

        let span = (overlap_end - overlap_start) as i128;
        total += span * window.rate_per_second / REWARD_PRECISION;
    }
    total
}
