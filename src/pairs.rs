use log::debug;
use rayon::prelude::*;

use crate::sequence::Sequence;
use crate::Error;

/// Two valve-disjoint sequences, one per agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub total: u64,
    pub first: Sequence,
    pub second: Sequence,
    /// How many ranked entries were tried as the lower-ranked half of a pair before giving up.
    pub rows_scanned: usize,
}

/// Find the pair of archived sequences with no valve in common whose totals add up to the most.
///
/// Entries are ranked by total, and each entry is paired with every entry ranked at or above it.
/// Once an entry's own total drops below `cutoff` times the best sum found so far, the remaining
/// entries are assumed too small to matter and the scan stops. That's a heuristic: an
/// adversarial archive can hide a better pair below the cutoff. A `cutoff` of 0 scans every
/// pair.
///
/// Fails with [`Error::PressureOverflow`] if a pair's combined total doesn't fit in a u64.
pub fn combine_pairs(archive: &[(Sequence, u64)], cutoff: f64) -> Result<Option<Pair>, Error> {
    let mut ranked: Vec<&(Sequence, u64)> = archive.iter().collect();
    // Stable, so equal totals keep their archive order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    // (sum, outer, inner)
    let mut best: Option<(u64, usize, usize)> = None;
    let mut rows_scanned = 0;
    for (i, &(seq, total)) in ranked.iter().enumerate() {
        let best_sum = best.map_or(0, |(sum, _, _)| sum);
        if (*total as f64) < cutoff * best_sum as f64 {
            break;
        }
        rows_scanned += 1;

        let set = seq.set();
        let row_best = ranked[..=i].par_iter()
            .enumerate()
            .filter(|(_, (other, _))| set.is_disjoint(&other.set()))
            .map(|(j, (_, other_total))| {
                total.checked_add(*other_total)
                    .map(|sum| (sum, j))
                    .ok_or(Error::PressureOverflow)
            })
            .try_reduce_with(|a, b| Ok(if b.0 > a.0 || (b.0 == a.0 && b.1 < a.1) { b } else { a }))
            .transpose()?;
        if let Some((sum, j)) = row_best {
            if sum > best_sum || best.is_none() {
                best = Some((sum, i, j));
            }
        }
    }
    debug!("combined pairs: scanned {rows_scanned} of {} entries", ranked.len());

    Ok(best.map(|(total, i, j)| Pair {
        total,
        first: ranked[j].0.clone(),
        second: ranked[i].0.clone(),
        rows_scanned,
    }))
}
