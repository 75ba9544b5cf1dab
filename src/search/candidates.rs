//! Ranked move generation
//!
//! Candidates are the empty cells in square rings around the last move,
//! scored by the position they would produce for the mover.

use crate::board::{Board, Pos, Role};
use crate::eval::{total_score, PatternPair};

/// An empty cell with the evaluation of playing it
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub pos: Pos,
    /// `total_score` of `patterns` for the mover
    pub score: f64,
    /// Pattern pair after the move
    pub patterns: PatternPair,
}

/// Preferred step sign along one axis: toward the side with more room
#[inline]
fn toward_room(coord: u8, size: usize) -> [i32; 2] {
    let c = coord as usize;
    if c <= size - 1 - c {
        [1, -1]
    } else {
        [-1, 1]
    }
}

/// Offsets of ring `k` (Chebyshev distance `k`), axis cells first
fn ring_offsets(k: i32, xs: [i32; 2], ys: [i32; 2]) -> Vec<(i32, i32)> {
    let mut offsets = Vec::with_capacity(8 * k as usize);
    offsets.extend([(k * xs[0], 0), (k * xs[1], 0), (0, k * ys[0]), (0, k * ys[1])]);

    for m in 1..=k {
        for &a in &xs {
            for &b in &ys {
                if m < k {
                    offsets.push((a * k, b * m));
                    offsets.push((a * m, b * k));
                } else {
                    offsets.push((a * k, b * k));
                }
            }
        }
    }
    offsets
}

/// Ranked empty cells around `last` for `role` to play.
///
/// Rings are scanned out to `2 * (spread + 2) - 1`, where `spread` is the
/// extent of the occupied area; if that finds nothing the scan continues to
/// the board edge. The result is stably sorted by score, best first, so ring
/// order breaks ties. Callers truncate to their own width.
pub fn candidates(board: &Board, pair: &PatternPair, role: Role, last: Pos) -> Vec<Candidate> {
    let size = board.size();
    let max_ring = size.saturating_sub(1);
    let limit = (2 * (board.spread() + 2) - 1).min(max_ring);

    let xs = toward_room(last.x, size);
    let ys = toward_room(last.y, size);
    let (lx, ly) = last.coords();

    let mut found = Vec::new();
    for k in 1..=max_ring {
        if k > limit && !found.is_empty() {
            break;
        }
        for (dx, dy) in ring_offsets(k as i32, xs, ys) {
            let Some(pos) = Pos::checked(lx + dx, ly + dy, size) else {
                continue;
            };
            if !board.is_empty(pos) {
                continue;
            }
            let patterns = pair.update(board, pos, role);
            found.push(Candidate {
                pos,
                score: total_score(&patterns, role),
                patterns,
            });
        }
    }

    found.sort_by(|a, b| b.score.total_cmp(&a.score));
    found
}
