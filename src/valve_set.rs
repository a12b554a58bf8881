use std::fmt;

use crate::ValveHandle;

/// A set of interesting valves, stored as a bitmask indexed by handle. Only handles of valves
/// with positive flow (see [`Volcano::is_interesting`](crate::Volcano::is_interesting)) have a
/// bit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ValveSet(u64);

impl ValveSet {
    pub fn new() -> Self {
        ValveSet(0)
    }

    fn bit(vh: ValveHandle) -> u64 {
        debug_assert!(vh.as_usize() < u64::BITS as usize, "valve {vh:?} has no bit");
        1 << vh.as_usize()
    }

    /// Valves without a bit are never members.
    pub fn contains(&self, vh: ValveHandle) -> bool {
        1u64.checked_shl(vh.as_usize() as u32)
            .is_some_and(|bit| self.0 & bit != 0)
    }

    pub fn with(&self, vh: ValveHandle) -> Self {
        ValveSet(self.0 | Self::bit(vh))
    }

    pub fn insert(&mut self, vh: ValveHandle) {
        self.0 |= Self::bit(vh);
    }

    pub fn is_disjoint(&self, other: &ValveSet) -> bool {
        self.0 & other.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<ValveHandle> for ValveSet {
    fn from_iter<I: IntoIterator<Item = ValveHandle>>(iter: I) -> Self {
        let mut set = ValveSet::new();
        for vh in iter {
            set.insert(vh);
        }
        set
    }
}

impl fmt::Debug for ValveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}
