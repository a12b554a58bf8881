//! How much pressure can be released from a volcano's valves before it erupts?
//!
//! A [`Volcano`] is a network of valves joined by tunnels. Walking a tunnel takes a minute and
//! so does opening a valve; an open valve releases its flow rate in pressure every minute for
//! the rest of the time budget. [`max_pressure`] answers the question for one agent working
//! alone, and [`max_pressure_with_helper`] for two agents that open disjoint sets of valves with
//! less time each.
//!
//! Both are built from the same parts:
//! 1. a [`DistanceIndex`] of hop counts from the start valve and every valve worth opening,
//! 2. [`evaluate`], which scores one opening order,
//! 3. a [`SequenceSearch`] that grows orders one valve per round while they still have time
//!    to spare,
//! 4. and, for two agents, [`combine_pairs`] over every order the search scored.
//!
//! The search and the pairing use heuristic cutoffs, so they're fast but not guaranteed
//! optimal. The [`exact`] module has a slower exhaustive solver to check them against.
//!
//! ```
//! use volcano::{max_pressure, SearchConfig, Volcano};
//!
//! let volcano: Volcano = "\
//! Valve AA has flow rate=0; tunnels lead to valves BB
//! Valve BB has flow rate=10; tunnels lead to valves AA"
//!     .parse()
//!     .unwrap();
//! let config = SearchConfig::default().with_minutes(5);
//! assert_eq!(max_pressure(&volcano, &config).unwrap(), 30);
//! ```

use log::info;

pub mod config;
pub mod distance;
pub mod error;
pub mod exact;
pub mod pairs;
pub mod search;
pub mod sequence;
pub mod valve_set;
pub mod volcano;

pub use crate::config::SearchConfig;
pub use crate::distance::DistanceIndex;
pub use crate::error::Error;
pub use crate::pairs::{combine_pairs, Pair};
pub use crate::search::{Archive, SearchOutcome, SequenceSearch};
pub use crate::sequence::{evaluate, Sequence, SequenceResult};
pub use crate::valve_set::ValveSet;
pub use crate::volcano::{Valve, ValveHandle, Volcano};

/// Index distances from the start valve and every interesting valve.
pub(crate) fn prepare(volcano: &Volcano, config: &SearchConfig) -> Result<(DistanceIndex, ValveHandle), Error> {
    let start = volcano.handle(&config.start)?;
    let index = DistanceIndex::build(volcano, volcano.interesting().chain([start]));
    Ok((index, start))
}

pub fn max_pressure(volcano: &Volcano, config: &SearchConfig) -> Result<u64, Error> {
    let (index, start) = prepare(volcano, config)?;
    let outcome = SequenceSearch::new(volcano, &index, start, config.minutes)
        .configure(config)
        .run()?;
    info!("best sequence {} releases {} in {} evaluations",
        outcome.best_sequence.display(volcano),
        outcome.best,
        outcome.evaluated);
    Ok(outcome.best)
}

pub fn max_pressure_with_helper(volcano: &Volcano, config: &SearchConfig) -> Result<u64, Error> {
    let (index, start) = prepare(volcano, config)?;
    let outcome = SequenceSearch::new(volcano, &index, start, config.helper_minutes)
        .configure(config)
        .keep_archive(true)
        .run()?;
    let archive = outcome.archive.unwrap_or_default();
    info!("searched {} sequences, best alone is {}", archive.len(), outcome.best);

    // The helper can always just stay put.
    let best = match combine_pairs(&archive, config.pair_cutoff)? {
        Some(pair) if pair.total > outcome.best => {
            info!("best pair {} and {} releases {}",
                pair.first.display(volcano),
                pair.second.display(volcano),
                pair.total);
            pair.total
        },
        _ => outcome.best,
    };
    Ok(best)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::volcano::test::EXAMPLE;

    #[test]
    fn test_max_pressure() {
        let volcano: Volcano = EXAMPLE.parse().unwrap();
        assert_eq!(max_pressure(&volcano, &SearchConfig::default()).unwrap(), 1651);
    }

    #[test]
    fn test_max_pressure_with_helper() {
        let volcano: Volcano = EXAMPLE.parse().unwrap();
        assert_eq!(max_pressure_with_helper(&volcano, &SearchConfig::default()).unwrap(), 1707);
    }

    #[test]
    fn test_looser_heuristics_agree_on_example() {
        let volcano: Volcano = EXAMPLE.parse().unwrap();
        let config = SearchConfig::default().with_extend_margin(0).with_pair_cutoff(0.0);
        assert_eq!(max_pressure(&volcano, &config).unwrap(), 1651);
        assert_eq!(max_pressure_with_helper(&volcano, &config).unwrap(), 1707);
    }

    #[test]
    fn test_unknown_start() {
        let volcano: Volcano = EXAMPLE.parse().unwrap();
        let config = SearchConfig::default().with_start("ZZ");
        assert_eq!(max_pressure(&volcano, &config), Err(Error::UnknownValve("ZZ".to_string())));
        assert_eq!(max_pressure_with_helper(&volcano, &config), Err(Error::UnknownValve("ZZ".to_string())));
    }

    #[test]
    fn test_other_start() {
        let volcano: Volcano = EXAMPLE.parse().unwrap();
        // Open JJ right away with 5 minutes left, then walk 3 steps to DD and open it with 1 left.
        let config = SearchConfig::default().with_start("JJ").with_minutes(6);
        assert_eq!(max_pressure(&volcano, &config).unwrap(), 5 * 21 + 20);
    }

    #[test]
    fn test_single_valve_helper_idles() {
        let input = "\
Valve AA has flow rate=0; tunnels lead to valves BB
Valve BB has flow rate=10; tunnels lead to valves AA";
        let volcano: Volcano = input.parse().unwrap();
        assert_eq!(max_pressure_with_helper(&volcano, &SearchConfig::default()).unwrap(), 24 * 10);
    }

    #[test]
    fn test_unreachable_valve() {
        // CC only leads to itself.
        let input = "\
Valve AA has flow rate=0; tunnels lead to valves BB
Valve BB has flow rate=10; tunnels lead to valves AA
Valve CC has flow rate=5; tunnels lead to valves CC";
        let volcano: Volcano = input.parse().unwrap();
        let config = SearchConfig::default();
        assert!(matches!(max_pressure(&volcano, &config), Err(Error::NotReachable { .. })));
        assert!(matches!(max_pressure_with_helper(&volcano, &config), Err(Error::NotReachable { .. })));
    }
}
