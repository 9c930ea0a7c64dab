use crate::level::Level;
use crate::parser::ParseError;
use log::debug;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Error type for level loading operations.
#[derive(Debug)]
pub enum LevelError {
    /// IO error when reading from file
    Io(io::Error),
    /// A level failed strict validation (index is 1-based)
    InvalidLevel { index: usize, source: ParseError },
    /// The input did not contain a single level
    NoLevels,
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Io(err) => write!(f, "IO error: {}", err),
            LevelError::InvalidLevel { index, source } => {
                write!(f, "Invalid level {}: {}", index, source)
            }
            LevelError::NoLevels => write!(f, "No levels found"),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io(err) => Some(err),
            LevelError::InvalidLevel { source, .. } => Some(source),
            LevelError::NoLevels => None,
        }
    }
}

impl From<io::Error> for LevelError {
    fn from(err: io::Error) -> Self {
        LevelError::Io(err)
    }
}

/// How strictly level text is checked before play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Accept anything; odd boards produce odd (but playable) state.
    #[default]
    Permissive,
    /// Reject levels without exactly one player or with unequal box and goal
    /// counts.
    Strict,
}

/// Raw text of one level along with its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelBlock {
    pub title: String,
    pub data: String,
}

impl LevelBlock {
    pub fn build(&self, validation: Validation, index: usize) -> Result<Level, LevelError> {
        let mut level = match validation {
            Validation::Permissive => Level::new(&self.data),
            Validation::Strict => Level::try_new(&self.data)
                .map_err(|source| LevelError::InvalidLevel { index, source })?,
        };
        level.set_title(self.title.clone());
        Ok(level)
    }
}

/// Split XSB-formatted text into level blocks.
///
/// The XSB format uses:
/// - Lines starting with `;` as comments; the first comment before a level
///   is taken as its title
/// - Standard Sokoban characters (#, @, $, ., *, +, space)
/// - Empty lines between levels
///
/// Levels with no comment are titled `Level N`.
pub fn split_blocks(contents: &str) -> Vec<LevelBlock> {
    let mut blocks = Vec::new();
    let mut current_level = String::new();
    let mut pending_title: Option<String> = None;

    let mut flush = |current_level: &mut String, pending_title: &mut Option<String>| {
        if current_level.is_empty() {
            return;
        }
        let title = pending_title
            .take()
            .unwrap_or_else(|| format!("Level {}", blocks.len() + 1));
        blocks.push(LevelBlock {
            title,
            data: std::mem::take(current_level),
        });
    };

    for line in contents.lines() {
        let trimmed = line.trim_start();
        if let Some(comment) = trimmed.strip_prefix(';') {
            // A comment ends the level in progress
            flush(&mut current_level, &mut pending_title);
            let comment = comment.trim();
            if pending_title.is_none() && !comment.is_empty() {
                pending_title = Some(comment.to_string());
            }
            continue;
        }

        if line.trim().is_empty() {
            flush(&mut current_level, &mut pending_title);
            continue;
        }

        current_level.push_str(line);
        current_level.push('\n');
    }

    flush(&mut current_level, &mut pending_title);
    blocks
}

/// A collection of Sokoban levels.
#[derive(Debug, Clone)]
pub struct Levels {
    levels: Vec<Level>,
}

impl Levels {
    pub fn from_blocks(blocks: &[LevelBlock], validation: Validation) -> Result<Self, LevelError> {
        let levels = blocks
            .iter()
            .enumerate()
            .map(|(i, block)| block.build(validation, i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let levels = Levels { levels };
        if levels.is_empty() {
            return Err(LevelError::NoLevels);
        }
        debug!("loaded {} levels", levels.len());
        Ok(levels)
    }

    /// Parse XSB-formatted Sokoban levels from a string.
    pub fn from_text(contents: &str, validation: Validation) -> Result<Self, LevelError> {
        Self::from_blocks(&split_blocks(contents), validation)
    }

    /// Parse XSB-formatted Sokoban levels from a text file.
    pub fn from_file(path: impl AsRef<Path>, validation: Validation) -> Result<Self, LevelError> {
        let contents = fs::read_to_string(path)?;
        Self::from_text(&contents, validation)
    }

    /// Get the nth level (0-indexed).
    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL1: &str = "####
# .#
#  ###
#*@  #
#  $ #
#  ###
####";

    const LEVEL2: &str = "######
#    #
# #@ #
# $* #
# .* #
#    #
######";

    #[test]
    fn test_from_text_basic() {
        let xsb_content = format!("; First\n\n{}\n\n; Second\n\n{}\n", LEVEL1, LEVEL2);

        let levels = Levels::from_text(&xsb_content, Validation::Strict).unwrap();

        assert_eq!(levels.len(), 2);
        assert!(!levels.is_empty());
        assert_eq!(levels.get(0).unwrap().title(), "First");
        assert_eq!(levels.get(1).unwrap().title(), "Second");
        assert_eq!(levels.get(0).unwrap().dimensions(), (5, 7));
        assert_eq!(levels.get(1).unwrap().board().len(), 7);
        assert!(levels.get(2).is_none());
    }

    #[test]
    fn test_untitled_levels_are_numbered() {
        let xsb_content = format!("{}\n\n\n{}\n", LEVEL1, LEVEL2);
        let titles: Vec<String> = split_blocks(&xsb_content)
            .into_iter()
            .map(|block| block.title)
            .collect();
        assert_eq!(titles, vec!["Level 1", "Level 2"]);
    }

    #[test]
    fn test_first_comment_is_title() {
        let blocks = split_blocks("; Title\n; Author: someone\n#@$.#\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "Title");
        assert_eq!(blocks[0].data, "#@$.#\n");
    }

    #[test]
    fn test_comment_ends_level() {
        let blocks = split_blocks("#@$.#\n; Next\n#+*#\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].title, "Level 1");
        assert_eq!(blocks[1].title, "Next");
    }

    #[test]
    fn test_permissive_accepts_malformed() {
        let xsb_content = "; Broken\n\n####\n# .#\n#@@  #\n####\n";

        let levels = Levels::from_text(xsb_content, Validation::Permissive).unwrap();
        assert_eq!(levels.len(), 1);
    }

    #[test]
    fn test_strict_rejects_malformed() {
        let xsb_content = format!("; Good\n\n{}\n\n; Bad\n\n####\n# .#\n#@@  #\n####\n", LEVEL1);

        let result = Levels::from_text(&xsb_content, Validation::Strict);
        assert!(matches!(
            result.unwrap_err(),
            LevelError::InvalidLevel {
                index: 2,
                source: ParseError::MultiplePlayers(2)
            }
        ));
    }

    #[test]
    fn test_no_levels() {
        let result = Levels::from_text("; only a comment\n\n", Validation::Permissive);
        assert!(matches!(result.unwrap_err(), LevelError::NoLevels));
    }

    #[test]
    fn test_from_file_no_file() {
        let result = Levels::from_file("nonexistent_file.xsb", Validation::Permissive);
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), LevelError::Io(_)));
    }
}
