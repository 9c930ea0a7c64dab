use crate::level::{Level, StepOutcome};
use crate::levels::Levels;
use crate::position::Direction;
use log::{debug, info};

/// Input translated into gameplay terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    /// Start the current level over.
    Restart,
    /// Give up on the current level and go to the next one.
    Skip,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Stepped(StepOutcome),
    /// The move solved the level; the session has already moved on.
    LevelCompleted { title: String, steps: usize },
    Restarted,
    Advanced,
    /// No levels left to play.
    Finished,
    Quit,
}

/// Plays through a set of levels in order.
///
/// The level being played is always a clone of an untouched reference copy,
/// so restarting is just cloning again.
#[derive(Debug)]
pub struct Session {
    levels: Levels,
    index: usize,
    reference: Level,
    current: Level,
    finished: bool,
}

impl Session {
    /// Start at `start` (0-indexed). Returns `None` if there is no such level.
    ///
    /// Levels that are already solved as loaded are passed over, so the
    /// session may be finished right away.
    pub fn new(levels: Levels, start: usize) -> Option<Self> {
        let reference = levels.get(start)?.clone();
        let current = reference.clone();
        let mut session = Session {
            levels,
            index: start,
            reference,
            current,
            finished: false,
        };
        if session.current.is_completed() {
            info!("level {} is already solved, skipping", session.level_number());
            session.advance();
        } else {
            session.log_start();
        }
        Some(session)
    }

    fn log_start(&self) {
        info!(
            "starting level {}: {} ({:?})",
            self.level_number(),
            self.reference.title(),
            self.reference.dimensions()
        );
    }

    pub fn current(&self) -> &Level {
        &self.current
    }

    /// 1-based number of the level being played.
    pub fn level_number(&self) -> usize {
        self.index + 1
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn apply(&mut self, command: Command) -> SessionEvent {
        if command == Command::Quit {
            return SessionEvent::Quit;
        }
        if self.finished {
            return SessionEvent::Finished;
        }

        match command {
            Command::Move(dir) => {
                let outcome = self.current.step(dir);
                if !outcome.moved() {
                    debug!("move {} blocked at {}", dir, self.current.player());
                    return SessionEvent::Stepped(outcome);
                }
                if !self.current.is_completed() {
                    return SessionEvent::Stepped(outcome);
                }

                let title = self.current.title().to_string();
                let steps = self.current.steps();
                info!("level {} completed in {} steps", self.level_number(), steps);
                self.advance();
                SessionEvent::LevelCompleted { title, steps }
            }
            Command::Restart => {
                debug!("restarting level {}", self.level_number());
                self.current = self.reference.clone();
                SessionEvent::Restarted
            }
            Command::Skip => {
                info!("skipping level {}", self.level_number());
                if self.advance() {
                    SessionEvent::Advanced
                } else {
                    SessionEvent::Finished
                }
            }
            Command::Quit => SessionEvent::Quit,
        }
    }

    /// Load the next unsolved level. Returns false once the list is exhausted.
    fn advance(&mut self) -> bool {
        while let Some(next) = self.levels.get(self.index + 1) {
            self.index += 1;
            self.reference = next.clone();
            self.current = self.reference.clone();
            if self.current.is_completed() {
                info!("level {} is already solved, skipping", self.level_number());
                continue;
            }
            self.log_start();
            return true;
        }

        info!("no more levels");
        self.finished = true;
        false
    }
}
