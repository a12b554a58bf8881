use log::{debug, warn};
use rayon::prelude::*;

use crate::sequence::{evaluate, Sequence};
use crate::{DistanceIndex, Error, SearchConfig, ValveHandle, Volcano};

/// Every sequence a search evaluated, with its total.
pub type Archive = Vec<(Sequence, u64)>;

/// Grows opening sequences one valve per round, keeping only the ones that leave enough time to
/// open another valve, and remembers the best total of any sequence evaluated along the way.
pub struct SequenceSearch<'a> {
    volcano: &'a Volcano,
    index: &'a DistanceIndex,
    start: ValveHandle,
    minutes: u32,
    margin: u32,
    max_evaluations: Option<usize>,
    keep_archive: bool,
    parallel: bool,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: u64,
    pub best_sequence: Sequence,
    pub evaluated: usize,
    pub rounds: usize,
    /// The evaluation budget ran out before the frontier did.
    pub truncated: bool,
    pub archive: Option<Archive>,
}

// What a worker accumulates over its share of a round's frontier.
#[derive(Default)]
struct Round {
    children: Vec<Sequence>,
    // (total, position in the frontier)
    best: Option<(u64, usize)>,
    archive: Archive,
}

impl Round {
    fn merge(mut self, other: Round) -> Round {
        self.children.extend(other.children);
        self.archive.extend(other.archive);
        self.best = better(self.best, other.best);
        self
    }
}

// Ties go to whichever came first in the frontier, so that the outcome doesn't depend on how the
// frontier was split between workers.
fn better(a: Option<(u64, usize)>, b: Option<(u64, usize)>) -> Option<(u64, usize)> {
    match (a, b) {
        (Some(a), Some(b)) => {
            if b.0 > a.0 || (b.0 == a.0 && b.1 < a.1) {
                Some(b)
            } else {
                Some(a)
            }
        },
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

impl<'a> SequenceSearch<'a> {
    pub fn new(
        volcano: &'a Volcano,
        index: &'a DistanceIndex,
        start: ValveHandle,
        minutes: u32,
    ) -> Self {
        SequenceSearch {
            volcano,
            index,
            start,
            minutes,
            margin: 2,
            max_evaluations: None,
            keep_archive: false,
            parallel: true,
        }
    }

    /// Take the margin and evaluation budget from `config`. The time budget is left alone.
    pub fn configure(mut self, config: &SearchConfig) -> Self {
        self.margin = config.extend_margin;
        self.max_evaluations = config.max_evaluations;
        self
    }

    pub fn keep_archive(mut self, keep: bool) -> Self {
        self.keep_archive = keep;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn run(&self) -> Result<SearchOutcome, Error> {
        let interesting: Vec<ValveHandle> = self.volcano.interesting().collect();
        let mut frontier: Vec<Sequence> = interesting.iter().map(|&vh| Sequence::single(vh)).collect();

        let mut best: u64 = 0;
        let mut best_sequence = Sequence::new();
        let mut evaluated: usize = 0;
        let mut rounds: usize = 0;
        let mut truncated = false;
        let mut archive: Archive = Vec::new();

        while !frontier.is_empty() {
            if let Some(max) = self.max_evaluations {
                if evaluated + frontier.len() > max {
                    warn!("stopping search after {evaluated} evaluations: next round has {} sequences, budget is {max}",
                        frontier.len());
                    truncated = true;
                    break;
                }
            }
            rounds += 1;
            debug!("round {rounds}: frontier={} best={best}", frontier.len());

            let round = if self.parallel {
                frontier.par_iter()
                    .enumerate()
                    .try_fold(Round::default, |acc, (i, seq)| self.visit(acc, i, seq, &interesting))
                    .try_reduce(Round::default, |a, b| Ok(a.merge(b)))?
            } else {
                frontier.iter()
                    .enumerate()
                    .try_fold(Round::default(), |acc, (i, seq)| self.visit(acc, i, seq, &interesting))?
            };

            evaluated += frontier.len();
            if let Some((total, i)) = round.best {
                if total > best {
                    best = total;
                    best_sequence = frontier[i].clone();
                }
            }
            archive.extend(round.archive);
            frontier = round.children;
        }

        Ok(SearchOutcome {
            best,
            best_sequence,
            evaluated,
            rounds,
            truncated,
            archive: self.keep_archive.then_some(archive),
        })
    }

    fn visit(
        &self,
        mut acc: Round,
        i: usize,
        seq: &Sequence,
        interesting: &[ValveHandle],
    ) -> Result<Round, Error> {
        let result = evaluate(self.volcano, self.index, seq, self.start, self.minutes, self.margin)?;
        acc.best = better(acc.best, Some((result.total, i)));
        if self.keep_archive {
            acc.archive.push((seq.clone(), result.total));
        }
        if result.extendable {
            acc.children.extend(interesting.iter()
                .filter(|&&vh| !seq.contains(vh))
                .map(|&vh| seq.extended(vh)));
        }
        Ok(acc)
    }
}
