//! Line scanning and incremental pattern maintenance
//!
//! Two ways to produce a [`PatternPair`]:
//!
//! - [`PatternPair::scan`] walks every line of the board in the 4 directions
//!   and records each run and each split run.
//! - [`PatternPair::update`] / [`PatternPair::remove`] patch an existing pair
//!   after a single cell changes, reading only the 4 lines through that cell.
//!
//! # Incremental update
//!
//! Every shape the scan records depends on a contiguous *window* of cells:
//! a run plus its two neighbours, or a split pair plus the cell before the
//! first run and the cell after the second. When one cell `p` changes, only
//! shapes whose window contains `p` can appear or disappear.
//!
//! For each direction the update walks two rays out of `p` (never reading `p`
//! itself), measuring per role:
//!
//! ```text
//!   ... tail_end | tail run | gap | run | p | run | gap | tail run | tail_end ...
//!                 <-------- back ray ------     ------ forward ray -------->
//! ```
//!
//! From the two rays it enumerates the shapes whose window contains `p` with
//! `p` empty, holding the role, or holding the other role. The update removes
//! the shapes for the old state of `p` and adds those for the new state, which
//! covers run extension, merging, closing an opposing live end and split-run
//! formation or consumption in one rule. The result equals a fresh scan.

use std::ops::RangeInclusive;

use super::shape::{PatternMap, PatternPair, RunShape, MAX_RUN};
use crate::board::{Board, Pos, Role, DIRECTIONS};

/// Combined lengths at which split runs are tracked
const SPLIT_LENGTHS: RangeInclusive<usize> = 3..=4;

#[inline]
fn plain(length: usize, live_ends: u8) -> RunShape {
    RunShape::plain(length.min(MAX_RUN as usize) as u8, live_ends)
}

#[inline]
fn split(length: usize, live_ends: u8, emit: &mut impl FnMut(RunShape)) {
    if SPLIT_LENGTHS.contains(&length) {
        emit(RunShape::split(length as u8, live_ends));
    }
}

impl PatternMap {
    /// Full-board scan of one role's shapes
    pub fn scan(board: &Board, role: Role) -> PatternMap {
        let mut map = PatternMap::new();
        for &(dx, dy) in &DIRECTIONS {
            for start in board.positions() {
                let (x, y) = start.coords();
                // Only walk from the first cell of each line
                if board.at(x - dx, y - dy).is_some() {
                    continue;
                }
                scan_line(board, (x, y), (dx, dy), role, &mut |shape| map.add(shape));
            }
        }
        map
    }
}

impl PatternPair {
    /// Full-board scan for both roles
    pub fn scan(board: &Board) -> PatternPair {
        let mut pair = PatternPair::new();
        for role in Role::PLAYERS {
            *pair.get_mut(role) = PatternMap::scan(board, role);
        }
        pair
    }

    /// Patterns after `role` plays at `pos`.
    ///
    /// `pos` must be empty on `board` (or already hold `role`); every other
    /// cell must match the position `self` describes.
    #[must_use]
    pub fn update(&self, board: &Board, pos: Pos, role: Role) -> PatternPair {
        let mut next = *self;
        next.shift(board, pos, Role::Empty, role);
        next
    }

    /// In-place form of [`PatternPair::update`]
    pub fn apply(&mut self, board: &Board, pos: Pos, role: Role) {
        self.shift(board, pos, Role::Empty, role);
    }

    /// Patch the pair after a `role` stone at `pos` is taken back
    pub fn remove(&mut self, board: &Board, pos: Pos, role: Role) {
        self.shift(board, pos, role, Role::Empty);
    }

    fn shift(&mut self, board: &Board, pos: Pos, from: Role, to: Role) {
        let origin = pos.coords();
        for role in Role::PLAYERS {
            let before = Center::of(from, role);
            let after = Center::of(to, role);
            let map = self.get_mut(role);
            for &(dx, dy) in &DIRECTIONS {
                let back = Ray::walk(board, origin, (-dx, -dy), role);
                let fwd = Ray::walk(board, origin, (dx, dy), role);
                window_shapes(before, &back, &fwd, |shape| map.sub(shape));
                window_shapes(after, &back, &fwd, |shape| map.add(shape));
            }
        }
    }
}

/// Walk one line and emit every run and split run of `role`
fn scan_line(
    board: &Board,
    (mut x, mut y): (i32, i32),
    (dx, dy): (i32, i32),
    role: Role,
    emit: &mut impl FnMut(RunShape),
) {
    let mut cells = Vec::with_capacity(board.size());
    while let Some(cell) = board.at(x, y) {
        cells.push(cell);
        x += dx;
        y += dy;
    }

    let is_open = |idx: Option<usize>| idx.and_then(|i| cells.get(i)) == Some(&Role::Empty);

    // (start, length) of the previous run on this line
    let mut prev: Option<(usize, usize)> = None;
    let mut i = 0;
    while i < cells.len() {
        if cells[i] != role {
            i += 1;
            continue;
        }
        let start = i;
        while i < cells.len() && cells[i] == role {
            i += 1;
        }
        let len = i - start;
        let left_open = is_open(start.checked_sub(1));
        let right_open = is_open(Some(i));
        emit(plain(len, left_open as u8 + right_open as u8));

        if let Some((prev_start, prev_len)) = prev {
            let one_gap = prev_start + prev_len + 1 == start && left_open;
            if one_gap {
                let outer = is_open(prev_start.checked_sub(1)) as u8 + right_open as u8;
                split(prev_len + len, outer, emit);
            }
        }
        prev = Some((start, len));
    }
}

/// State of the changed cell as seen by one role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Center {
    Empty,
    Own,
    Blocked,
}

impl Center {
    #[inline]
    fn of(cell: Role, role: Role) -> Center {
        if cell == Role::Empty {
            Center::Empty
        } else if cell == role {
            Center::Own
        } else {
            Center::Blocked
        }
    }
}

/// What one role sees walking away from the changed cell
#[derive(Debug, Clone, Copy, Default)]
struct Ray {
    /// Stones directly adjacent to the origin
    run: usize,
    /// Cell past `run` is empty
    open: bool,
    /// Stones past that single empty cell (0 unless `open`)
    tail: usize,
    /// Cell past `tail` is empty
    tail_open: bool,
}

impl Ray {
    fn walk(board: &Board, (x, y): (i32, i32), (dx, dy): (i32, i32), role: Role) -> Ray {
        let mut ray = Ray::default();
        let (mut cx, mut cy) = (x + dx, y + dy);
        while board.at(cx, cy) == Some(role) {
            ray.run += 1;
            cx += dx;
            cy += dy;
        }
        if board.at(cx, cy) != Some(Role::Empty) {
            return ray;
        }
        ray.open = true;
        cx += dx;
        cy += dy;
        while board.at(cx, cy) == Some(role) {
            ray.tail += 1;
            cx += dx;
            cy += dy;
        }
        ray.tail_open = board.at(cx, cy) == Some(Role::Empty);
        ray
    }
}

/// Emit the shapes whose window contains the origin cell, given its state
fn window_shapes(center: Center, back: &Ray, fwd: &Ray, mut emit: impl FnMut(RunShape)) {
    let emit = &mut emit;
    match center {
        Center::Own => {
            let merged = back.run + 1 + fwd.run;
            emit(plain(merged, back.open as u8 + fwd.open as u8));
            if fwd.open && fwd.tail > 0 {
                split(merged + fwd.tail, back.open as u8 + fwd.tail_open as u8, emit);
            }
            if back.open && back.tail > 0 {
                split(back.tail + merged, back.tail_open as u8 + fwd.open as u8, emit);
            }
        }
        Center::Empty | Center::Blocked => {
            let live = (center == Center::Empty) as u8;
            if back.run > 0 {
                emit(plain(back.run, back.open as u8 + live));
                if back.open && back.tail > 0 {
                    split(back.run + back.tail, back.tail_open as u8 + live, emit);
                }
            }
            if fwd.run > 0 {
                emit(plain(fwd.run, fwd.open as u8 + live));
                if fwd.open && fwd.tail > 0 {
                    split(fwd.run + fwd.tail, fwd.tail_open as u8 + live, emit);
                }
            }
            // The origin itself is the gap
            if live == 1 && back.run > 0 && fwd.run > 0 {
                split(back.run + fwd.run, back.open as u8 + fwd.open as u8, emit);
            }
        }
    }
}
