use crate::level::Level;
use crate::position::{Direction, Position};

/// How the player is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerStyle {
    /// `@`, or `+` on a goal.
    Xsb,
    /// An arrow pointing the way the player last tried to move.
    Facing,
}

fn facing_glyph(dir: Direction) -> char {
    match dir {
        Direction::Left => '<',
        Direction::Right => '>',
        Direction::Up => '^',
        Direction::Down => 'v',
    }
}

fn cell_glyph(level: &Level, pos: Position, style: PlayerStyle) -> char {
    if level.is_player(pos) {
        match style {
            PlayerStyle::Facing => facing_glyph(level.prev_dir()),
            PlayerStyle::Xsb if level.is_square(pos) => '+',
            PlayerStyle::Xsb => '@',
        }
    } else if level.is_box(pos) {
        if level.is_square(pos) { '*' } else { '$' }
    } else if level.is_wall(pos) {
        '#'
    } else if level.is_square(pos) {
        '.'
    } else {
        ' '
    }
}

fn draw_board(level: &Level, style: PlayerStyle) -> String {
    let mut out = String::new();
    for (row, cells) in level.board().iter().enumerate() {
        let line: String = (0..cells.len())
            .map(|col| cell_glyph(level, Position::new(col as i32, row as i32), style))
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Draw the current state of the level in XSB notation, one line per board
/// row.
///
/// Each row is drawn as wide as it was in the level text. Trailing spaces are
/// trimmed.
pub fn render_board(level: &Level) -> String {
    draw_board(level, PlayerStyle::Xsb)
}

pub fn status_line(level: &Level) -> String {
    let placed = level
        .boxes()
        .iter()
        .filter(|&&pos| level.is_square(pos))
        .count();
    format!(
        "moves: {}  boxes: {}/{}  level: {}  facing: {}",
        level.steps(),
        placed,
        level.boxes().len(),
        level.title(),
        level.prev_dir()
    )
}

/// Play view: board with the player drawn as a facing arrow, then the status
/// line.
pub fn render(level: &Level) -> String {
    let mut out = draw_board(level, PlayerStyle::Facing);
    out.push_str(&status_line(level));
    out.push('\n');
    out
}
