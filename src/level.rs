use crate::parser::{self, ParseError, ParsedLevel};
use crate::position::{Direction, Position};
use log::trace;
use std::collections::HashSet;
use std::fmt;

/// What a call to [`Level::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The player walked onto an empty cell.
    Moved,
    /// The player pushed a box one cell.
    Pushed,
    /// Wall ahead, or the box ahead could not move. Nothing changed except
    /// the facing direction.
    Blocked,
}

impl StepOutcome {
    pub fn moved(&self) -> bool {
        !matches!(self, StepOutcome::Blocked)
    }
}

/// A single Sokoban level and the state of one play-through of it.
///
/// Cloning yields a fully independent copy, which is how a level is restarted:
/// keep a pristine instance around and clone it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    title: String,
    board: Vec<Vec<char>>,
    dimensions: (i32, i32),
    walls: HashSet<Position>,
    squares: HashSet<Position>,
    boxes: HashSet<Position>,
    player: Position,
    steps: usize,
    prev_dir: Direction,
}

impl Level {
    /// Build a level from raw text without any validation. Malformed text
    /// still yields a level (e.g. a missing player sits at `(0, 0)`).
    pub fn new(data: &str) -> Self {
        Self::from_parsed(parser::parse(data))
    }

    /// Like [`Level::new`], but rejects boards that cannot be played.
    pub fn try_new(data: &str) -> Result<Self, ParseError> {
        let parsed = parser::parse(data);
        parser::validate(&parsed)?;
        Ok(Self::from_parsed(parsed))
    }

    fn from_parsed(parsed: ParsedLevel) -> Self {
        Level {
            title: String::new(),
            board: parsed.board,
            dimensions: parsed.dimensions,
            walls: parsed.walls,
            squares: parsed.squares,
            boxes: parsed.boxes,
            player: parsed.player,
            steps: 0,
            prev_dir: Direction::Down,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The board rows as parsed (uppercased, empty lines removed). Does not
    /// reflect moves.
    pub fn board(&self) -> &[Vec<char>] {
        &self.board
    }

    pub fn dimensions(&self) -> (i32, i32) {
        self.dimensions
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Last attempted direction, whether or not the move went through.
    pub fn prev_dir(&self) -> Direction {
        self.prev_dir
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn boxes(&self) -> &HashSet<Position> {
        &self.boxes
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.walls.contains(&pos)
    }

    pub fn is_square(&self, pos: Position) -> bool {
        self.squares.contains(&pos)
    }

    pub fn is_box(&self, pos: Position) -> bool {
        self.boxes.contains(&pos)
    }

    pub fn is_player(&self, pos: Position) -> bool {
        self.player == pos
    }

    /// The cell next to the player in `dir`.
    pub fn get_next_position(&self, dir: Direction) -> Position {
        self.player.offset(dir)
    }

    /// Where a box at `from` lands when pushed in `dir`.
    pub fn box_next_position(&self, dir: Direction, from: Position) -> Position {
        from.offset(dir)
    }

    fn is_free(&self, pos: Position) -> bool {
        !self.is_wall(pos) && !self.is_box(pos)
    }

    /// Try to move the player one cell, pushing a box if one is in the way.
    ///
    /// Illegal moves are not errors: they return [`StepOutcome::Blocked`] and
    /// only update the facing direction. There is no bounds checking; cells
    /// outside the board are open floor.
    pub fn step(&mut self, dir: Direction) -> StepOutcome {
        self.prev_dir = dir;
        let next_player_pos = self.get_next_position(dir);

        let outcome = if self.is_free(next_player_pos) {
            self.player = next_player_pos;
            self.steps += 1;
            StepOutcome::Moved
        } else if self.is_box(next_player_pos) {
            let next_box_pos = self.box_next_position(dir, next_player_pos);
            if self.is_free(next_box_pos) {
                self.player = next_player_pos;
                self.steps += 1;
                self.boxes.remove(&next_player_pos);
                self.boxes.insert(next_box_pos);
                StepOutcome::Pushed
            } else {
                StepOutcome::Blocked
            }
        } else {
            StepOutcome::Blocked
        };

        trace!(
            "step {} -> {:?}, player={}, steps={}",
            dir, outcome, self.player, self.steps
        );
        outcome
    }

    /// True when the boxes sit exactly on the storage squares.
    pub fn is_completed(&self) -> bool {
        self.boxes == self.squares
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        for row in &self.board {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
