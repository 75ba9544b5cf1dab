//! Board structure with occupancy tracking

use std::ops::{Deref, DerefMut};

use super::{Pos, Role};
use crate::error::EngineError;

/// Square game board of `Role` cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Role>,
    /// Stones per row, indexed by y
    row_stones: Vec<u16>,
    /// Stones per column, indexed by x
    col_stones: Vec<u16>,
    stones: usize,
}

impl Board {
    /// Create an empty `size` x `size` board.
    ///
    /// Size limits are enforced by the engine facade, not here.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Role::Empty; size * size],
            row_stones: vec![0; size],
            col_stones: vec![0; size],
            stones: 0,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the role at a position known to be on the board
    #[inline]
    pub fn get(&self, pos: Pos) -> Role {
        self.cells[pos.to_index(self.size)]
    }

    /// Signed-coordinate read; `None` when off the board
    #[inline]
    pub fn at(&self, x: i32, y: i32) -> Option<Role> {
        if Pos::is_valid(x, y, self.size) {
            Some(self.cells[y as usize * self.size + x as usize])
        } else {
            None
        }
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }

    /// Check if position is on the board and empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.contains(pos) && self.get(pos) == Role::Empty
    }

    /// Place a stone on an empty cell
    pub fn place(&mut self, pos: Pos, role: Role) -> Result<(), EngineError> {
        if role == Role::Empty || !self.is_empty(pos) {
            let (x, y) = pos.coords();
            return Err(EngineError::InvalidMove { x, y });
        }
        self.set(pos, role);
        Ok(())
    }

    /// Clear an occupied cell, returning the role that was there
    pub fn remove(&mut self, pos: Pos) -> Result<Role, EngineError> {
        if !self.contains(pos) || self.get(pos) == Role::Empty {
            let (x, y) = pos.coords();
            return Err(EngineError::InvalidMove { x, y });
        }
        let role = self.get(pos);
        self.clear(pos);
        Ok(role)
    }

    /// Place a stone that is taken back when the returned guard drops
    pub fn play(&mut self, pos: Pos, role: Role) -> Result<MoveGuard<'_>, EngineError> {
        self.place(pos, role)?;
        Ok(MoveGuard { board: self, pos })
    }

    /// Empty every cell, keeping the size
    pub fn clear_all(&mut self) {
        self.cells.fill(Role::Empty);
        self.row_stones.fill(0);
        self.col_stones.fill(0);
        self.stones = 0;
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.stones
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.stones == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stones == self.cells.len()
    }

    /// Opening point: the middle cell, biased toward the origin on even sizes
    #[inline]
    pub fn center(&self) -> Pos {
        let mid = ((self.size - 1) / 2) as u8;
        Pos::new(mid, mid)
    }

    /// Largest extent of the occupied rows or columns (0 for one stone or none)
    pub fn spread(&self) -> usize {
        fn extent(counts: &[u16]) -> usize {
            let first = counts.iter().position(|&c| c > 0);
            let last = counts.iter().rposition(|&c| c > 0);
            match (first, last) {
                (Some(first), Some(last)) => last - first,
                _ => 0,
            }
        }
        extent(&self.row_stones).max(extent(&self.col_stones))
    }

    /// Iterate over every position of the board, row by row
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.cells.len()).map(move |idx| Pos::from_index(idx, self.size))
    }

    #[inline]
    fn set(&mut self, pos: Pos, role: Role) {
        self.cells[pos.to_index(self.size)] = role;
        self.row_stones[pos.y as usize] += 1;
        self.col_stones[pos.x as usize] += 1;
        self.stones += 1;
    }

    #[inline]
    fn clear(&mut self, pos: Pos) {
        self.cells[pos.to_index(self.size)] = Role::Empty;
        self.row_stones[pos.y as usize] -= 1;
        self.col_stones[pos.x as usize] -= 1;
        self.stones -= 1;
    }
}

/// A speculative stone on the board.
///
/// Dereferences to the board it was played on and clears its cell on drop,
/// so early returns and cutoffs cannot leave search stones behind.
pub struct MoveGuard<'a> {
    board: &'a mut Board,
    pos: Pos,
}

impl MoveGuard<'_> {
    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl Deref for MoveGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.board.clear(self.pos);
    }
}
