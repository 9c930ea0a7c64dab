use crate::position::Position;
use std::collections::HashSet;
use std::fmt;

/// Reasons a level is rejected by strict parsing.
///
/// Permissive parsing never produces these; it builds whatever state the text
/// describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No non-empty rows.
    Empty,
    NoPlayer,
    MultiplePlayers(usize),
    BoxGoalMismatch { boxes: usize, goals: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "Empty board"),
            ParseError::NoPlayer => write!(f, "No player found on board"),
            ParseError::MultiplePlayers(count) => {
                write!(f, "Multiple players found ({})", count)
            }
            ParseError::BoxGoalMismatch { boxes, goals } => write!(
                f,
                "Goal count ({}) does not match box count ({})",
                goals, boxes
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Everything extracted from the raw level text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLevel {
    pub board: Vec<Vec<char>>,
    /// (width, height). Width is one less than the longest row.
    pub dimensions: (i32, i32),
    pub walls: HashSet<Position>,
    pub squares: HashSet<Position>,
    pub boxes: HashSet<Position>,
    pub player: Position,
    /// How many `@`/`+` cells were seen; the last one wins.
    pub player_count: usize,
}

/// Parse level text.
///
/// Characters (case-insensitive):
/// - `#` = Wall
/// - `.` = Goal square
/// - `$` = Box
/// - `@` = Player
/// - `*` = Box on goal
/// - `+` = Player on goal
///
/// Anything else is open floor. Empty lines are dropped and do not count
/// towards the height. No validation is done here; see [`validate`].
pub fn parse(text: &str) -> ParsedLevel {
    let board: Vec<Vec<char>> = text
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().map(|ch| ch.to_ascii_uppercase()).collect())
        .collect();

    let height = board.len() as i32;
    let mut width = board.iter().map(|row| row.len()).max().unwrap_or(0) as i32;
    // The stored width never covers the last column of the longest row.
    width -= 1;

    let mut walls = HashSet::new();
    let mut squares = HashSet::new();
    let mut boxes = HashSet::new();
    let mut player = Position::default();
    let mut player_count = 0;

    for (row, cells) in board.iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            let pos = Position::new(col as i32, row as i32);
            match cell {
                '#' => {
                    walls.insert(pos);
                }
                '.' => {
                    squares.insert(pos);
                }
                '$' => {
                    boxes.insert(pos);
                }
                '@' => {
                    player = pos;
                    player_count += 1;
                }
                '+' => {
                    player = pos;
                    player_count += 1;
                    squares.insert(pos);
                }
                '*' => {
                    boxes.insert(pos);
                    squares.insert(pos);
                }
                _ => {}
            }
        }
    }

    ParsedLevel {
        board,
        dimensions: (width, height),
        walls,
        squares,
        boxes,
        player,
        player_count,
    }
}

/// Strict checks layered on top of [`parse`]. Accepting a level here never
/// changes the state `parse` produced for it.
pub fn validate(parsed: &ParsedLevel) -> Result<(), ParseError> {
    if parsed.board.is_empty() {
        return Err(ParseError::Empty);
    }
    match parsed.player_count {
        0 => return Err(ParseError::NoPlayer),
        1 => {}
        n => return Err(ParseError::MultiplePlayers(n)),
    }
    if parsed.boxes.len() != parsed.squares.len() {
        return Err(ParseError::BoxGoalMismatch {
            boxes: parsed.boxes.len(),
            goals: parsed.squares.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(col: i32, row: i32) -> Position {
        Position::new(col, row)
    }

    #[test]
    fn test_parse_basic_board() {
        let input = "####\n\
                     # .#\n\
                     #  ###\n\
                     #*@  #\n\
                     #  $ #\n\
                     #  ###\n\
                     ####";
        let parsed = parse(input);

        assert_eq!(parsed.dimensions, (5, 7));
        assert_eq!(parsed.player, pos(2, 3));
        assert_eq!(parsed.player_count, 1);
        assert_eq!(parsed.squares, HashSet::from([pos(2, 1), pos(1, 3)]));
        assert_eq!(parsed.boxes, HashSet::from([pos(1, 3), pos(3, 4)]));
        assert!(parsed.walls.contains(&pos(0, 0)));
        assert!(parsed.walls.contains(&pos(5, 3)));
        assert!(!parsed.walls.contains(&pos(1, 1)));
        assert_eq!(validate(&parsed), Ok(()));
    }

    #[test]
    fn test_single_of_each() {
        let parsed = parse("#@$.\n");
        assert_eq!(parsed.player, pos(1, 0));
        assert_eq!(parsed.walls, HashSet::from([pos(0, 0)]));
        assert_eq!(parsed.boxes, HashSet::from([pos(2, 0)]));
        assert_eq!(parsed.squares, HashSet::from([pos(3, 0)]));
        assert_eq!(parsed.dimensions.1, 1);
    }

    #[test]
    fn test_width_is_longest_row_minus_one() {
        // Preserved quirk: the longest row is 6 wide but width reports 5.
        let parsed = parse("####\n#@ $.#\n####");
        assert_eq!(parsed.dimensions, (5, 3));

        assert_eq!(parse("").dimensions, (-1, 0));
    }

    #[test]
    fn test_empty_lines_skipped() {
        let parsed = parse("\n\n####\n\n#@.#\n\n####\n\n");
        assert_eq!(parsed.board.len(), 3);
        assert_eq!(parsed.dimensions.1, 3);
        // Row indices count only kept lines.
        assert_eq!(parsed.player, pos(1, 1));
        assert_eq!(parsed.squares, HashSet::from([pos(2, 1)]));
    }

    #[test]
    fn test_uppercase_normalization() {
        let parsed = parse("#@x-#\n");
        assert_eq!(parsed.board[0], vec!['#', '@', 'X', '-', '#']);
        // Unknown characters are floor but still occupy a cell.
        assert_eq!(parsed.walls, HashSet::from([pos(0, 0), pos(4, 0)]));
    }

    #[test]
    fn test_player_on_goal() {
        let parsed = parse("####\n#$+ #\n#$. #\n####");
        assert_eq!(parsed.player, pos(2, 1));
        assert!(parsed.squares.contains(&pos(2, 1)));
        assert_eq!(parsed.squares.len(), 2);
    }

    #[test]
    fn test_box_on_goal() {
        let parsed = parse("#*@#");
        assert!(parsed.boxes.contains(&pos(1, 0)));
        assert!(parsed.squares.contains(&pos(1, 0)));
    }

    #[test]
    fn test_no_player_is_permissive() {
        let parsed = parse("####\n#  #\n####");
        assert_eq!(parsed.player, Position::default());
        assert_eq!(parsed.player_count, 0);
        assert_eq!(validate(&parsed), Err(ParseError::NoPlayer));
    }

    #[test]
    fn test_multiple_players_last_wins() {
        let parsed = parse("####\n#@@#\n####");
        assert_eq!(parsed.player, pos(2, 1));
        assert_eq!(validate(&parsed), Err(ParseError::MultiplePlayers(2)));
    }

    #[test]
    fn test_validate_empty() {
        assert_eq!(validate(&parse("\n\n")), Err(ParseError::Empty));
    }

    #[test]
    fn test_validate_goal_box_count() {
        let more_goals = parse("####\n#..#\n# $@#\n####");
        assert_eq!(
            validate(&more_goals),
            Err(ParseError::BoxGoalMismatch { boxes: 1, goals: 2 })
        );

        let balanced = parse("####\n#$.#\n# * #\n# @#\n####");
        assert_eq!(validate(&balanced), Ok(()));
    }
}
