//! Duration allocation inside a block.

use log::trace;

/// Converts speech units to whole milliseconds at `cps` units per second.
///
/// Rounds up and never returns less than one millisecond. Durations too
/// long to represent saturate at `u64::MAX`.
///
/// ```
/// # use squawk::timing::raw_duration_ms;
/// assert_eq!(raw_duration_ms(15, 15.0), 1000);
/// assert_eq!(raw_duration_ms(1, 3.0), 334);
/// assert_eq!(raw_duration_ms(0, 15.0), 1);
/// ```
pub fn raw_duration_ms(units: u32, cps: f64) -> u64 {
    let ms = (f64::from(units) * 1000.0 / cps).ceil();
    if ms.is_nan() || ms < 1.0 {
        1
    } else if ms >= u64::MAX as f64 {
        u64::MAX
    } else {
        ms as u64
    }
}

/// Fits raw durations of one rail into a block budget.
///
/// Durations that already fit are returned unchanged. Otherwise every value
/// is scaled by `budget / total` (floored, at least 1 ms) and the rounding
/// error is corrected so the sum equals the budget whenever the budget
/// leaves at least one millisecond per line.
///
/// ```
/// # use squawk::timing::fit_to_budget;
/// assert_eq!(fit_to_budget(&[400, 300], 1000), vec![400, 300]);
/// assert_eq!(fit_to_budget(&[40_000, 30_000, 20_000], 60_000), vec![26_667, 20_000, 13_333]);
/// ```
pub fn fit_to_budget(raw: &[u64], budget_ms: u64) -> Vec<u64> {
    let total: u128 = raw.iter().map(|&ms| u128::from(ms)).sum();
    if total <= u128::from(budget_ms) {
        return raw.to_vec();
    }

    let budget = u128::from(budget_ms);
    let mut remainders = Vec::with_capacity(raw.len());
    let mut scaled: Vec<u64> = raw
        .iter()
        .map(|&ms| {
            let share = u128::from(ms) * budget;
            remainders.push(share % total);
            // share / total <= budget, which fits in u64.
            u64::try_from(share / total).unwrap_or(budget_ms).max(1)
        })
        .collect();

    let sum: u64 = scaled.iter().sum();
    if sum > budget_ms {
        trim_excess(&mut scaled, sum - budget_ms);
    } else if sum < budget_ms {
        distribute_deficit(&mut scaled, &remainders, budget_ms - sum);
    }

    trace!(raw:?, scaled:?, budget_ms; "Fitted durations to budget");
    scaled
}

/// Removes `excess` milliseconds one at a time in left-to-right passes,
/// never going below 1 ms.
fn trim_excess(scaled: &mut [u64], mut excess: u64) {
    while excess > 0 {
        let mut trimmed = false;
        for value in scaled.iter_mut() {
            if excess == 0 {
                break;
            }
            if *value > 1 {
                *value -= 1;
                excess -= 1;
                trimmed = true;
            }
        }
        if !trimmed {
            break;
        }
    }
}

/// Adds `deficit` milliseconds one at a time, largest remainder first and
/// ties broken left to right.
fn distribute_deficit(scaled: &mut [u64], remainders: &[u128], mut deficit: u64) {
    if scaled.is_empty() {
        return;
    }

    let mut order: Vec<usize> = (0..scaled.len()).collect();
    // Stable sort keeps equal remainders in index order.
    order.sort_by(|&a, &b| remainders[b].cmp(&remainders[a]));

    for &idx in order.iter().cycle() {
        if deficit == 0 {
            break;
        }
        scaled[idx] += 1;
        deficit -= 1;
    }
}
