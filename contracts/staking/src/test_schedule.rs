extern crate std;

use soroban_sdk::{vec, Env, Vec};

use crate::schedule::{
    count_reward_amount, validate_append, validate_windows, RewardWindow, REWARD_PRECISION,
};

fn window(start_time: u64, end_time: u64, rate: i128) -> RewardWindow {
    RewardWindow {
        start_time,
        end_time,
        rate_per_second: rate * REWARD_PRECISION,
    }
}

fn schedule(env: &Env) -> Vec<RewardWindow> {
    // 100..200 at 10/s, 200..300 at 20/s, gap, 400..500 at 5/s.
    vec![
        env,
        window(100, 200, 10),
        window(200, 300, 20),
        window(400, 500, 5),
    ]
}

// ── count_reward_amount ──────────────────────────────────────────────────────

#[test]
fn test_empty_interval_counts_zero() {
    let env = Env::default();
    let windows = schedule(&env);

    assert_eq!(count_reward_amount(&windows, 150, 150), 0);
    assert_eq!(count_reward_amount(&windows, 200, 150), 0);
}

#[test]
fn test_interval_outside_coverage_counts_zero() {
    let env = Env::default();
    let windows = schedule(&env);

    assert_eq!(count_reward_amount(&windows, 0, 100), 0);
    assert_eq!(count_reward_amount(&windows, 500, 900), 0);
    // Entirely inside the gap.
    assert_eq!(count_reward_amount(&windows, 310, 390), 0);
}

#[test]
fn test_interval_within_single_window() {
    let env = Env::default();
    let windows = schedule(&env);

    assert_eq!(count_reward_amount(&windows, 120, 170), 50 * 10);
}

#[test]
fn test_interval_clipped_at_window_edges() {
    let env = Env::default();
    let windows = schedule(&env);

    // Starts before coverage, ends mid-window.
    assert_eq!(count_reward_amount(&windows, 0, 150), 50 * 10);
    // Starts mid-window, ends far past coverage.
    assert_eq!(count_reward_amount(&windows, 450, 10_000), 50 * 5);
}

#[test]
fn test_interval_spanning_multiple_windows() {
    let env = Env::default();
    let windows = schedule(&env);

    // Second half of window one plus first half of window two.
    assert_eq!(count_reward_amount(&windows, 150, 250), 50 * 10 + 50 * 20);
    // Everything, gap included.
    assert_eq!(
        count_reward_amount(&windows, 0, 1_000),
        100 * 10 + 100 * 20 + 100 * 5
    );
}

#[test]
fn test_window_end_is_exclusive() {
    let env = Env::default();
    let windows = vec![&env, window(100, 200, 10)];

    // [100, 200) pays for exactly 100 seconds.
    assert_eq!(count_reward_amount(&windows, 100, 200), 100 * 10);
    assert_eq!(count_reward_amount(&windows, 100, 201), 100 * 10);
    assert_eq!(count_reward_amount(&windows, 199, 200), 10);
    assert_eq!(count_reward_amount(&windows, 200, 300), 0);
}

#[test]
fn test_count_composes_over_split_points() {
    let env = Env::default();
    let windows = schedule(&env);

    for split in [0u64, 100, 150, 200, 300, 350, 400, 450, 500, 600] {
        let whole = count_reward_amount(&windows, 0, 600);
        let left = count_reward_amount(&windows, 0, split);
        let right = count_reward_amount(&windows, split, 600);
        assert_eq!(whole, left + right);
    }
}

// ── validate_windows / validate_append ───────────────────────────────────────

#[test]
fn test_validate_accepts_ordered_disjoint_windows() {
    let env = Env::default();
    assert!(validate_windows(&schedule(&env)).is_ok());
    // Back-to-back windows are allowed; half-open ranges never double-pay.
    let windows = vec![&env, window(100, 200, 10), window(200, 300, 20)];
    assert!(validate_windows(&windows).is_ok());
    // Empty schedules are valid, they just emit nothing.
    let empty: Vec<RewardWindow> = vec![&env];
    assert!(validate_windows(&empty).is_ok());
}

#[test]
fn test_validate_rejects_malformed_window() {
    let env = Env::default();

    let inverted = vec![&env, window(200, 100, 10)];
    assert!(validate_windows(&inverted).is_err());

    let empty_span = vec![&env, window(100, 100, 10)];
    assert!(validate_windows(&empty_span).is_err());

    let negative_rate = vec![
        &env,
        RewardWindow {
            start_time: 100,
            end_time: 200,
            rate_per_second: -1,
        },
    ];
    assert!(validate_windows(&negative_rate).is_err());
}

#[test]
fn test_validate_rejects_overlap_and_disorder() {
    let env = Env::default();

    let overlapping = vec![&env, window(100, 250, 10), window(200, 300, 20)];
    assert!(validate_windows(&overlapping).is_err());

    let unordered = vec![&env, window(200, 300, 20), window(100, 200, 10)];
    assert!(validate_windows(&unordered).is_err());
}

#[test]
fn test_validate_append_forward_only() {
    let env = Env::default();
    let windows = schedule(&env);

    assert!(validate_append(&windows, &window(500, 600, 5)).is_ok());
    // A gap after the last window is fine.
    assert!(validate_append(&windows, &window(900, 950, 5)).is_ok());
    // Reaching back into covered history is not.
    assert!(validate_append(&windows, &window(450, 600, 5)).is_err());
    assert!(validate_append(&windows, &window(450, 460, 5)).is_err());
    // Appending to an empty schedule is unconstrained.
    let empty: Vec<RewardWindow> = vec![&env];
    assert!(validate_append(&empty, &window(0, 10, 1)).is_ok());
}
