//! Board representation for Gomoku

pub mod board;


// Re-exports
pub use board::{Board, MoveGuard};

/// Smallest supported board edge
pub const MIN_BOARD_SIZE: usize = 5;
/// Largest supported board edge
pub const MAX_BOARD_SIZE: usize = 100;

/// The 4 undirected line axes as (dx, dy) steps
pub const DIRECTIONS: [(i32, i32); 4] = [
    (1, 0),  // Horizontal
    (0, 1),  // Vertical
    (1, 1),  // Diagonal
    (1, -1), // Anti-diagonal
];

/// Cell ownership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Empty,
    /// The side the engine plays for
    Engine,
    /// The other side
    Opponent,
}

impl Role {
    /// Both playing roles, in pattern-pair order
    pub const PLAYERS: [Role; 2] = [Role::Engine, Role::Opponent];

    /// Get the other playing role
    #[inline]
    pub fn opponent(self) -> Role {
        match self {
            Role::Engine => Role::Opponent,
            Role::Opponent => Role::Engine,
            Role::Empty => Role::Empty,
        }
    }

    /// Slot of a playing role inside per-role tables
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Role::Engine => 0,
            Role::Opponent => 1,
            Role::Empty => {
                debug_assert!(false, "Empty has no per-role slot");
                0
            }
        }
    }

    /// Numeric code used by manager protocols: 0 empty, 1 engine, 2 opponent
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Role::Empty => 0,
            Role::Engine => 1,
            Role::Opponent => 2,
        }
    }

    #[inline]
    pub fn from_code(code: u8) -> Option<Role> {
        match code {
            0 => Some(Role::Empty),
            1 => Some(Role::Engine),
            2 => Some(Role::Opponent),
            _ => None,
        }
    }
}

/// Position on the board; `x` is the column, `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
}

impl Pos {
    #[inline]
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Build from signed coordinates, rejecting anything outside `[0, size)`
    #[inline]
    pub fn checked(x: i32, y: i32, size: usize) -> Option<Pos> {
        if Pos::is_valid(x, y, size) {
            Some(Pos::new(x as u8, y as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.y as usize * size + self.x as usize
    }

    #[inline]
    pub fn from_index(idx: usize, size: usize) -> Self {
        Self {
            x: (idx % size) as u8,
            y: (idx / size) as u8,
        }
    }

    #[inline]
    pub fn is_valid(x: i32, y: i32, size: usize) -> bool {
        x >= 0 && (x as usize) < size && y >= 0 && (y as usize) < size
    }

    /// Signed coordinates, convenient for ray stepping
    #[inline]
    pub fn coords(self) -> (i32, i32) {
        (i32::from(self.x), i32::from(self.y))
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}
