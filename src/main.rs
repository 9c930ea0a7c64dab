mod config;
mod level;
mod levels;
mod parser;
mod position;
mod render;
mod session;

use clap::Parser;
use config::Config;
use levels::{Levels, Validation};
use log::{debug, info, warn};
use session::{Session, SessionEvent};
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "puzzlegame")]
#[command(about = "A Sokoban puzzle game", long_about = None)]
struct Args {
    /// Path to the levels file (XSB format)
    #[arg(value_name = "FILE")]
    levels_file: String,

    /// Level number to start at (1-indexed)
    #[arg(value_name = "LEVEL", default_value = "1")]
    level_start: usize,

    /// Replay a LURD move string on the starting level instead of playing
    #[arg(short, long)]
    moves: Option<String>,

    /// Path to a TOML config file with key bindings
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Reject malformed levels instead of loading them as-is
    #[arg(long, default_value = "false")]
    strict: bool,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

/// Apply a move string to one level and print where it ends up.
fn replay(session: &Session, moves: &str) {
    let directions = match position::parse_lurd(moves) {
        Ok(directions) => directions,
        Err(ch) => fail(format!("invalid move character '{}'", ch)),
    };

    let mut level = session.current().clone();
    for dir in directions {
        level.step(dir);
    }

    print!("{}", render::render(&level));
    println!(
        "level {}: {}",
        session.level_number(),
        if level.is_completed() { "completed" } else { "not completed" }
    );
}

/// Line-oriented play: every character of an input line is one key press.
fn play(mut session: Session, config: Config) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if session.is_finished() {
        println!("All levels done.");
        return Ok(());
    }

    println!("level {} of {}", session.level_number(), session.level_count());
    print!("{}", render::render(session.current()));
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        for key in line.chars().filter(|ch| !ch.is_whitespace()) {
            let Some(command) = config.command_for(key) else {
                warn!("unbound key '{}'", key);
                continue;
            };

            match session.apply(command) {
                SessionEvent::Quit => return Ok(()),
                SessionEvent::Finished => {
                    println!("All levels done.");
                    return Ok(());
                }
                SessionEvent::LevelCompleted { title, steps } => {
                    println!("Level '{}' completed in {} moves!", title, steps);
                    if session.is_finished() {
                        println!("All levels done.");
                        return Ok(());
                    }
                    println!("level {} of {}", session.level_number(), session.level_count());
                }
                SessionEvent::Advanced => {
                    println!("level {} of {}", session.level_number(), session.level_count());
                }
                SessionEvent::Stepped(_) | SessionEvent::Restarted => {}
            }
        }

        print!("{}", render::render(session.current()));
        stdout.flush()?;
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match Config::from_file(path) {
            Ok(config) => config,
            Err(e) => fail(format!("loading config {}: {}", path, e)),
        },
        None => Config::default(),
    };

    let validation = if args.strict || config.strict {
        Validation::Strict
    } else {
        Validation::Permissive
    };

    let levels = match Levels::from_file(&args.levels_file, validation) {
        Ok(levels) => levels,
        Err(e) => fail(format!("loading levels: {}", e)),
    };
    info!("loaded {} levels from {}", levels.len(), args.levels_file);
    for (i, level) in levels.iter().enumerate() {
        debug!("level {}: {}", i + 1, level.title());
    }

    if args.level_start == 0 {
        fail("level numbers must be at least 1");
    }

    let count = levels.len();
    let Some(session) = Session::new(levels, args.level_start - 1) else {
        fail(format!(
            "level {} not found (file contains {} levels)",
            args.level_start, count
        ));
    };

    match args.moves {
        Some(moves) => replay(&session, &moves),
        None => {
            if let Err(e) = play(session, config) {
                fail(e);
            }
        }
    }
}
