use std::fmt;

/// A grid cell, addressed as (column, row).
///
/// Coordinates are signed: nothing stops the player from walking off the
/// parsed grid, so positions left of or above the board must be representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub fn new(col: i32, row: i32) -> Self {
        Position { col, row }
    }

    /// The neighbouring cell one step in `dir`.
    pub fn offset(self, dir: Direction) -> Position {
        let (dc, dr) = dir.delta();
        Position {
            col: self.col + dc,
            row: self.row + dr,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// The LURD move character for this direction.
    pub fn lurd(&self) -> char {
        match self {
            Direction::Left => 'l',
            Direction::Right => 'r',
            Direction::Up => 'u',
            Direction::Down => 'd',
        }
    }

    /// Decode a single LURD move character (case-insensitive).
    pub fn from_lurd(ch: char) -> Option<Direction> {
        let ch = ch.to_ascii_lowercase();
        ALL_DIRECTIONS.into_iter().find(|dir| dir.lurd() == ch)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
        }
    }
}

/// Decode a LURD move string, e.g. `"rrUl"`. Whitespace is ignored.
///
/// Returns the offending character if the string contains anything else.
pub fn parse_lurd(moves: &str) -> Result<Vec<Direction>, char> {
    moves
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| Direction::from_lurd(ch).ok_or(ch))
        .collect()
}
