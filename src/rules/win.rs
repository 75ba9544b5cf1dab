//! Direct five-in-a-row checks on the board
//!
//! The engine itself detects wins from pattern counts; these helpers read the
//! grid directly. The GUI uses them to highlight the winning line.

use crate::board::{Board, Pos, Role, DIRECTIONS};

/// Length of the run through `pos` along `(dx, dy)`, counting `pos` itself
fn run_through(board: &Board, pos: Pos, (dx, dy): (i32, i32), role: Role) -> (Pos, usize) {
    let (x, y) = pos.coords();
    let mut start = pos;
    let mut count = 1;

    let (mut cx, mut cy) = (x - dx, y - dy);
    while board.at(cx, cy) == Some(role) {
        start = Pos::new(cx as u8, cy as u8);
        count += 1;
        cx -= dx;
        cy -= dy;
    }

    let (mut cx, mut cy) = (x + dx, y + dy);
    while board.at(cx, cy) == Some(role) {
        count += 1;
        cx += dx;
        cy += dy;
    }

    (start, count)
}

/// Five-in-a-row check at a specific position.
///
/// Only checks the 4 lines through `pos`. No allocation.
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, role: Role) -> bool {
    if !board.contains(pos) || board.get(pos) != role || role == Role::Empty {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&dir| run_through(board, pos, dir, role).1 >= 5)
}

/// Stones of the first line of five or more passing through `pos`
pub fn find_five_line_at_pos(board: &Board, pos: Pos) -> Option<Vec<Pos>> {
    if !board.contains(pos) {
        return None;
    }
    let role = board.get(pos);
    if role == Role::Empty {
        return None;
    }

    for &(dx, dy) in &DIRECTIONS {
        let (start, count) = run_through(board, pos, (dx, dy), role);
        if count >= 5 {
            let (sx, sy) = start.coords();
            let line = (0..count as i32)
                .map(|i| Pos::new((sx + dx * i) as u8, (sy + dy * i) as u8))
                .collect();
            return Some(line);
        }
    }
    None
}

/// Find any line of five or more for `role`
pub fn find_five_positions(board: &Board, role: Role) -> Option<Vec<Pos>> {
    board
        .positions()
        .filter(|&pos| board.get(pos) == role)
        .find_map(|pos| find_five_line_at_pos(board, pos))
}

/// Check if there's 5+ in a row for the given role
pub fn has_five_in_row(board: &Board, role: Role) -> bool {
    board
        .positions()
        .any(|pos| has_five_at_pos(board, pos, role))
}

/// Winner by direct board inspection; the engine side is checked first
pub fn check_winner(board: &Board) -> Option<Role> {
    Role::PLAYERS
        .into_iter()
        .find(|&role| has_five_in_row(board, role))
}
