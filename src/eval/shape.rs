//! Run-shape keys and per-role shape counters
//!
//! A [`RunShape`] is the small fixed-cardinality key `(length, live_ends,
//! split)`; a [`PatternMap`] counts how often each shape occurs for one role
//! and a [`PatternPair`] holds one map per playing role. Both containers are
//! plain arrays, so copying a pair for a speculative branch is a memcpy.

use std::fmt;

use crate::board::Role;

/// Longest tracked run; anything longer is folded into this bucket.
pub const MAX_RUN: u8 = 5;

const LENGTHS: usize = MAX_RUN as usize;
const ENDS: usize = 3;

/// Number of distinct shapes
pub const SHAPE_COUNT: usize = LENGTHS * ENDS * 2;

/// Shape of one run (or one-gap split run) along a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunShape {
    /// Stones in the run, 1..=5 where 5 means "five or more"
    pub length: u8,
    /// Ends bordered by an empty on-board cell (0..=2)
    pub live_ends: u8,
    /// Two runs joined across a single empty cell
    pub split: bool,
}

impl RunShape {
    /// Plain contiguous run; lengths above five fold into five
    #[inline]
    pub const fn plain(length: u8, live_ends: u8) -> Self {
        Self {
            length: if length > MAX_RUN { MAX_RUN } else { length },
            live_ends,
            split: false,
        }
    }

    #[inline]
    pub const fn split(length: u8, live_ends: u8) -> Self {
        Self {
            length,
            live_ends,
            split: true,
        }
    }

    /// Five or more in a row
    #[inline]
    pub fn is_five(self) -> bool {
        !self.split && self.length >= MAX_RUN
    }

    #[inline]
    fn index(self) -> usize {
        debug_assert!((1..=MAX_RUN).contains(&self.length));
        debug_assert!(self.live_ends <= 2);
        ((self.length as usize - 1) * ENDS + self.live_ends as usize) * 2 + self.split as usize
    }

    #[inline]
    fn from_index(idx: usize) -> Self {
        let split = idx % 2 == 1;
        let rest = idx / 2;
        Self {
            length: (rest / ENDS + 1) as u8,
            live_ends: (rest % ENDS) as u8,
            split,
        }
    }
}

impl fmt::Display for RunShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.split {
            write!(f, "({},{},split)", self.length, self.live_ends)
        } else {
            write!(f, "({},{})", self.length, self.live_ends)
        }
    }
}

/// Occurrence count per shape for one role
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PatternMap {
    counts: [u32; SHAPE_COUNT],
}

impl PatternMap {
    pub const fn new() -> Self {
        Self {
            counts: [0; SHAPE_COUNT],
        }
    }

    #[inline]
    pub fn count(&self, shape: RunShape) -> u32 {
        self.counts[shape.index()]
    }

    #[inline]
    pub fn add(&mut self, shape: RunShape) {
        self.counts[shape.index()] += 1;
    }

    #[inline]
    pub fn sub(&mut self, shape: RunShape) {
        let slot = &mut self.counts[shape.index()];
        debug_assert!(*slot > 0, "shape {shape} count underflow");
        *slot = slot.saturating_sub(1);
    }

    /// Shapes with a non-zero count
    pub fn iter(&self) -> impl Iterator<Item = (RunShape, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(idx, &c)| (RunShape::from_index(idx), c))
    }

    /// Any run of five or more
    #[inline]
    pub fn has_five(&self) -> bool {
        (0..ENDS).any(|ends| self.count(RunShape::plain(MAX_RUN, ends as u8)) > 0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }
}

impl Default for PatternMap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PatternMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(shape, count)| (shape.to_string(), count)))
            .finish()
    }
}

/// One [`PatternMap`] per playing role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternPair {
    maps: [PatternMap; 2],
}

impl PatternPair {
    pub const fn new() -> Self {
        Self {
            maps: [PatternMap::new(); 2],
        }
    }

    #[inline]
    pub fn get(&self, role: Role) -> &PatternMap {
        &self.maps[role.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, role: Role) -> &mut PatternMap {
        &mut self.maps[role.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_index_roundtrip_covers_all_slots() {
        let mut seen = [false; SHAPE_COUNT];
        for length in 1..=MAX_RUN {
            for live_ends in 0..=2 {
                for shape in [RunShape::plain(length, live_ends), RunShape::split(length, live_ends)] {
                    let idx = shape.index();
                    assert!(!seen[idx], "{shape} collides");
                    seen[idx] = true;
                    assert_eq!(RunShape::from_index(idx), shape);
                }
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_plain_folds_long_runs() {
        assert_eq!(RunShape::plain(7, 1), RunShape::plain(5, 1));
        assert!(RunShape::plain(6, 0).is_five());
        assert!(!RunShape::split(4, 2).is_five());
    }

    #[test]
    fn test_map_counts() {
        let mut map = PatternMap::new();
        assert!(map.is_empty());

        map.add(RunShape::plain(3, 2));
        map.add(RunShape::plain(3, 2));
        map.add(RunShape::split(4, 1));
        map.sub(RunShape::plain(3, 2));

        assert_eq!(map.count(RunShape::plain(3, 2)), 1);
        assert_eq!(map.count(RunShape::split(4, 1)), 1);
        assert_eq!(map.iter().count(), 2);
        assert!(!map.has_five());

        map.add(RunShape::plain(5, 0));
        assert!(map.has_five());
    }

    #[test]
    fn test_pair_isolated_copies() {
        let mut pair = PatternPair::new();
        pair.get_mut(Role::Engine).add(RunShape::plain(2, 2));

        let mut branch = pair;
        branch.get_mut(Role::Engine).add(RunShape::plain(2, 2));
        branch.get_mut(Role::Opponent).add(RunShape::plain(1, 1));

        assert_eq!(pair.get(Role::Engine).count(RunShape::plain(2, 2)), 1);
        assert!(pair.get(Role::Opponent).is_empty());
        assert_eq!(branch.get(Role::Engine).count(RunShape::plain(2, 2)), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(RunShape::plain(3, 2).to_string(), "(3,2)");
        assert_eq!(RunShape::split(4, 0).to_string(), "(4,0,split)");
    }
}
