use std::fmt;

use crate::{DistanceIndex, Error, ValveHandle, ValveSet, Volcano};

/// An ordered plan of distinct interesting valves to open.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Sequence {
    valves: Vec<ValveHandle>,
    set: ValveSet,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SequenceResult {
    pub feasible: bool,
    pub total: u64,
    pub minutes_left: u32,
    pub extendable: bool,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sequence of the given valves in order, skipping repeats. Every valve must have positive
    /// flow.
    pub fn from_valves(
        volcano: &Volcano,
        valves: impl IntoIterator<Item = ValveHandle>,
    ) -> Result<Self, Error> {
        let mut seq = Sequence::new();
        for vh in valves {
            if !volcano.is_interesting(vh) {
                return Err(Error::NotInteresting(volcano.name(vh).to_string()));
            }
            if !seq.contains(vh) {
                seq.valves.push(vh);
                seq.set.insert(vh);
            }
        }
        Ok(seq)
    }

    pub(crate) fn single(vh: ValveHandle) -> Self {
        Sequence { valves: vec![vh], set: ValveSet::new().with(vh) }
    }

    /// A copy of this sequence with `vh` appended. `vh` must be interesting and not already
    /// present.
    pub(crate) fn extended(&self, vh: ValveHandle) -> Self {
        debug_assert!(!self.set.contains(vh));
        let mut valves = Vec::with_capacity(self.valves.len() + 1);
        valves.extend_from_slice(&self.valves);
        valves.push(vh);
        Sequence { valves, set: self.set.with(vh) }
    }

    pub fn contains(&self, vh: ValveHandle) -> bool {
        self.set.contains(vh)
    }

    pub fn valves(&self) -> &[ValveHandle] {
        &self.valves
    }

    pub fn set(&self) -> ValveSet {
        self.set
    }

    pub fn len(&self) -> usize {
        self.valves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valves.is_empty()
    }

    pub fn display<'a>(&'a self, volcano: &'a Volcano) -> impl fmt::Display + 'a {
        NamedSequence { seq: self, volcano }
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.valves.iter()).finish()
    }
}

struct NamedSequence<'a> {
    seq: &'a Sequence,
    volcano: &'a Volcano,
}

impl fmt::Display for NamedSequence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, name) in self.volcano.names(self.seq.valves()).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}")?;
        }
        write!(f, "]")
    }
}

/// Walk `seq` from `start`, opening each valve in turn, and add up the pressure each one
/// releases over the minutes left after it's opened.
///
/// If some valve can't be reached with a minute to spare for opening it, the result is
/// infeasible and `total` only counts the valves before it. A feasible result is extendable when
/// more than `margin` minutes remain. A valve exactly `minutes_left` steps away counts as
/// unreachable, since there'd be no minute left to open it. A `steps > minutes_left` check
/// would let that step through and open the valve with -1 minutes left.
///
/// Fails with [`Error::PressureOverflow`] if the total doesn't fit in a u64.
pub fn evaluate(
    volcano: &Volcano,
    index: &DistanceIndex,
    seq: &Sequence,
    start: ValveHandle,
    minutes: u32,
    margin: u32,
) -> Result<SequenceResult, Error> {
    let mut cur = start;
    let mut minutes_left = minutes;
    let mut total: u64 = 0;
    let mut feasible = true;
    for &next in seq.valves() {
        let steps = index.distance(cur, next)?;
        if steps >= minutes_left {
            feasible = false;
            break;
        }
        minutes_left -= steps + 1;
        total = (minutes_left as u64)
            .checked_mul(volcano.flow(next) as u64)
            .and_then(|released| total.checked_add(released))
            .ok_or(Error::PressureOverflow)?;
        cur = next;
    }
    Ok(SequenceResult {
        feasible,
        total,
        minutes_left,
        extendable: feasible && minutes_left > margin,
    })
}
