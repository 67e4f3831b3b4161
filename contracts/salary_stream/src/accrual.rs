//! Linear accrual over a variable per-period amount sequence.
//!
//! All arithmetic is integer floor division. Whole periods advance the
//! bookkeeping counters; the in-progress period accrues proportionally to
//! elapsed seconds, and the amount already paid out of it is carried in
//! `fraction_paid` so a repeated evaluation never pays the same second
//! twice.

use soroban_sdk::Vec;

/// Outcome of evaluating a schedule at a point in time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Accrual {
    /// Whole periods fully elapsed since the last settlement.
    pub periods: u32,
    /// Amount accrued within the in-progress period, measured from the
    /// period's start.
    pub fraction: i128,
    /// Net amount owed now: whole periods plus fraction, minus the
    /// fraction already paid.
    pub payable: i128,
}

/// Evaluates the accrual of a schedule `elapsed` seconds after its last
/// settlement point.
pub fn evaluate(
    amounts: &Vec<i128>,
    withdrawn: u32,
    fraction_paid: i128,
    elapsed: u64,
    period_duration: u64,
) -> Accrual {
    let remaining = amounts.len() - withdrawn;
    let full = elapsed / period_duration;
    let periods = if full >= u64::from(remaining) {
        remaining
    } else {
        full as u32
    };

    let mut whole = 0i128;
    for i in withdrawn..withdrawn + periods {
        whole = whole
            .checked_add(amounts.get_unchecked(i))
            .expect("Amount overflow");
    }

    let fraction = if periods < remaining {
        let into_period = elapsed - u64::from(periods) * period_duration;
        let amount = amounts.get_unchecked(withdrawn + periods);
        amount
            .checked_mul(i128::from(into_period))
            .expect("Amount overflow")
            / i128::from(period_duration)
    } else {
        0
    };

    Accrual {
        periods,
        fraction,
        payable: whole + fraction - fraction_paid,
    }
}

/// True once every not-yet-withdrawn period has fully elapsed; no
/// unaccrued time remains and the schedule cannot be edited further.
pub fn is_ended(len: u32, withdrawn: u32, elapsed: u64, period_duration: u64) -> bool {
    elapsed / period_duration >= u64::from(len - withdrawn)
}
