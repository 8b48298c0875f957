//! Mummy Maze terminal driver
//!
//! Plays a level catalog headlessly. Moves come from stdin (`w`/`a`/`s`/`d`,
//! `.` or an empty line to wait, `r` to restart the level, `q` to quit) or,
//! with `autoplay_seed` set, from the seeded autopilot.
//!
//! Usage: `mummy-maze [settings.json]`

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use mummy_maze::sim::{Autopilot, Direction, GameEvent, Session, TickInput, tick};
use mummy_maze::{LevelCatalog, Settings};

fn main() {
    env_logger::init();
    log::info!("Mummy Maze starting...");

    if let Err(e) = run() {
        log::error!("{e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("mummy-maze.json"));
    let settings = Settings::load(&path)?;

    let catalog = LevelCatalog::load(&settings.levels, settings.level_count)
        .with_context(|| format!("loading levels from {}", settings.levels.display()))?;
    let mut session = Session::with_start_level(catalog, settings.start_level)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&mut out, &session)?;

    match settings.autoplay_seed {
        Some(seed) => autoplay(&mut session, &settings, seed, &mut out),
        None => interactive(&mut session, &settings, &mut out),
    }
}

fn turn_input(settings: &Settings, turn: u32, direction: Option<Direction>) -> TickInput {
    TickInput {
        direction,
        gravity: settings.gravity_turn(turn),
        pursuit: settings.pursuit_turn(turn),
    }
}

fn interactive(session: &mut Session, settings: &Settings, out: &mut impl Write) -> anyhow::Result<()> {
    let mut turn = 0;
    for line in io::stdin().lock().lines() {
        let line = line?;
        let direction = match line.trim() {
            "w" => Some(Direction::Up),
            "s" => Some(Direction::Down),
            "a" => Some(Direction::Left),
            "d" => Some(Direction::Right),
            "." | "" => None,
            "r" => {
                session.restart_level();
                render(out, session)?;
                continue;
            }
            "q" => break,
            other => {
                writeln!(out, "unknown command {other:?}")?;
                continue;
            }
        };
        if session.phase().is_terminal() {
            writeln!(out, "press r to restart or q to quit")?;
            continue;
        }

        turn += 1;
        let events = tick(session, &turn_input(settings, turn, direction));
        report(out, &events)?;
        render(out, session)?;
        if settings.max_turns.is_some_and(|max| turn >= max) {
            break;
        }
    }
    Ok(())
}

fn autoplay(
    session: &mut Session,
    settings: &Settings,
    seed: u64,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut pilot = Autopilot::new(seed);
    let max_turns = settings.max_turns.unwrap_or(500);
    log::info!("Autoplay with seed {} for up to {} turns", pilot.seed(), max_turns);

    let mut played = 0;
    for turn in 1..=max_turns {
        let input = pilot.input(settings.gravity_turn(turn), settings.pursuit_turn(turn));
        let events = tick(session, &input);
        report(out, &events)?;
        played = turn;
        if session.phase().is_terminal() {
            break;
        }
    }

    render(out, session)?;
    writeln!(out, "Autoplay stopped after {played} turns: {:?}", session.phase())?;
    Ok(())
}

fn report(out: &mut impl Write, events: &[GameEvent]) -> io::Result<()> {
    for event in events.iter().filter(|e| e.is_notification()) {
        match event {
            GameEvent::GameOver(cause) => writeln!(out, "Game over: {cause:?}")?,
            GameEvent::LevelAdvanced { level } => writeln!(out, "On to level {}", level + 1)?,
            GameEvent::GameWon => writeln!(out, "Every level cleared!")?,
            _ => {}
        }
    }
    Ok(())
}

fn render(out: &mut impl Write, session: &Session) -> io::Result<()> {
    writeln!(
        out,
        "Level {}/{}  orbs left: {}",
        session.level_index() + 1,
        session.level_count(),
        session.remaining_goals()
    )?;
    writeln!(out, "{}", session.board().annotated())?;
    out.flush()
}
