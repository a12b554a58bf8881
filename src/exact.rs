//! Exhaustive solver. It tries every opening order, so it's only practical for the sizes the
//! puzzle actually uses, but its answers are optimal and make a yardstick for the heuristic
//! search.

use std::collections::HashMap;

use crate::{prepare, DistanceIndex, Error, SearchConfig, ValveHandle, ValveSet, Volcano};

/// The most pressure that can be released by opening exactly each reachable set of valves.
pub fn best_per_set(
    volcano: &Volcano,
    index: &DistanceIndex,
    start: ValveHandle,
    minutes: u32,
) -> Result<HashMap<ValveSet, u64>, Error> {
    let interesting: Vec<ValveHandle> = volcano.interesting().collect();
    let mut best: HashMap<ValveSet, u64> = HashMap::new();
    let mut stack: Vec<(ValveHandle, u32, ValveSet, u64)> = vec![(start, minutes, ValveSet::new(), 0)];
    while let Some((cur, minutes_left, opened, total)) = stack.pop() {
        let entry = best.entry(opened).or_insert(0);
        *entry = (*entry).max(total);
        for &next in &interesting {
            if opened.contains(next) {
                continue;
            }
            let steps = index.distance(cur, next)?;
            if steps >= minutes_left {
                continue;
            }
            let left = minutes_left - steps - 1;
            let total = (left as u64)
                .checked_mul(volcano.flow(next) as u64)
                .and_then(|released| total.checked_add(released))
                .ok_or(Error::PressureOverflow)?;
            stack.push((next, left, opened.with(next), total));
        }
    }
    Ok(best)
}

pub fn exact_max_pressure(volcano: &Volcano, config: &SearchConfig) -> Result<u64, Error> {
    let (index, start) = prepare(volcano, config)?;
    let best = best_per_set(volcano, &index, start, config.minutes)?;
    Ok(best.values().copied().max().unwrap_or(0))
}

pub fn exact_max_pressure_with_helper(volcano: &Volcano, config: &SearchConfig) -> Result<u64, Error> {
    let (index, start) = prepare(volcano, config)?;
    let best = best_per_set(volcano, &index, start, config.helper_minutes)?;
    let mut ranked: Vec<(ValveSet, u64)> = best.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let mut best_sum: u64 = 0;
    for (i, &(a, a_total)) in ranked.iter().enumerate() {
        if a_total.saturating_mul(2) < best_sum {
            break;
        }
        // Ranked in descending order, so the first disjoint partner is the best one for `a`.
        for &(b, b_total) in &ranked[i..] {
            let sum = a_total.checked_add(b_total).ok_or(Error::PressureOverflow)?;
            if sum <= best_sum {
                break;
            }
            if a.is_disjoint(&b) {
                best_sum = sum;
                break;
            }
        }
    }
    Ok(best_sum)
}
