//! Resource accumulator tests — tick arithmetic and the debit guard.

use empire_core::accumulator;
use empire_core::error::GameError;
use empire_core::state::Resource;

fn resource(amount: f64, per_second: f64, last_updated: i64) -> Resource {
    Resource { amount, per_second, last_updated }
}

/// Ticking forward never shrinks the pool.
#[test]
fn tick_is_monotone() {
    let mut r = resource(100.0, 3.0, 1_000);
    for gap in [0i64, 1, 250, 1_000, 3_600_000] {
        let before = r.amount;
        let now = r.last_updated + gap;
        accumulator::tick(&mut r, now);
        assert!(r.amount >= before, "Amount shrank over a {gap}ms tick");
    }
}

/// Two ticks of a then b seconds earn the same as one tick of a+b.
#[test]
fn split_ticks_compose() {
    let mut split = resource(0.0, 1.7, 0);
    accumulator::tick(&mut split, 4_300);
    accumulator::tick(&mut split, 4_300 + 2_900);

    let mut whole = resource(0.0, 1.7, 0);
    accumulator::tick(&mut whole, 7_200);

    assert!(
        (split.amount - whole.amount).abs() < 1e-9,
        "Split ticks earned {}, single tick earned {}",
        split.amount,
        whole.amount
    );
}

/// A zero-elapsed tick earns nothing but still stamps the clock.
#[test]
fn zero_elapsed_tick_stamps_and_earns_nothing() {
    let mut r = resource(50.0, 5.0, 2_000);
    let earned = accumulator::tick(&mut r, 2_000);

    assert_eq!(earned, 0.0);
    assert_eq!(r.amount, 50.0, "Zero elapsed must not change the amount");
    assert_eq!(r.last_updated, 2_000, "Clock stamped to now");
}

/// A backwards host clock clamps to zero rather than revoking resources.
#[test]
fn backwards_clock_clamps_to_zero() {
    let mut r = resource(50.0, 5.0, 10_000);
    let earned = accumulator::tick(&mut r, 4_000);

    assert_eq!(earned, 0.0, "Negative gap must earn nothing");
    assert_eq!(r.amount, 50.0);
    assert_eq!(r.last_updated, 4_000, "Clock re-stamped even going backwards");
}

/// Earnings scale linearly with the production rate.
#[test]
fn tick_earns_rate_times_elapsed() {
    let mut r = resource(0.0, 2.5, 0);
    let earned = accumulator::tick(&mut r, 8_000);
    assert_eq!(earned, 20.0, "2.5/sec over 8s is 20");
    assert_eq!(r.amount, 20.0);
}

/// Debit subtracts exactly when covered, including an exact-balance spend.
#[test]
fn debit_subtracts_when_covered() {
    let mut r = resource(12.0, 0.0, 0);
    accumulator::debit(&mut r, 7.5).expect("Covered debit");
    assert_eq!(r.amount, 4.5);

    accumulator::debit(&mut r, 4.5).expect("Exact-balance debit");
    assert_eq!(r.amount, 0.0);
}

/// An uncovered debit fails and leaves the pool untouched.
#[test]
fn debit_rejects_overdraft() {
    let mut r = resource(3.0, 0.0, 0);
    let err = accumulator::debit(&mut r, 3.001).unwrap_err();

    assert!(
        matches!(
            err,
            GameError::InsufficientResources { requested, available }
                if requested == 3.001 && available == 3.0
        ),
        "Unexpected error: {err}"
    );
    assert_eq!(r.amount, 3.0, "Failed debit must not touch the pool");
}

/// Manual additions are straight credits.
#[test]
fn add_credits_directly() {
    let mut r = resource(1.0, 0.0, 0);
    accumulator::add(&mut r, 1.0);
    accumulator::add(&mut r, 0.25);
    assert_eq!(r.amount, 2.25);
}
