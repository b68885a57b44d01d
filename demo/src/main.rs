//! `gridpath`: animate one A* search in the terminal.
//!
//! Usage: `gridpath [CONFIG]`, where CONFIG defaults to `gridpath.toml`.
//! Press `q` or `Esc` to stop the animation early.

mod config;

use std::error::Error;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use gridpath_core::Cell;
use gridpath_crossterm::{StepControl, TerminalDriver};
use gridpath_editor::{Board, Editor, mapgen};
use gridpath_paths::{Outcome, Search};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::config::{Config, endpoint_cell};

/// How a run ended.
enum RunEnd {
    Finished(Outcome),
    Stopped,
}

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("gridpath.toml"));
    let config = Config::load(&path)?;

    if config.logging.enabled {
        let level = config.logging.level_filter()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.logging.path)?;
        logger_builder(level, Box::new(file)).try_init()?;
    }
    log::info!("configuration from {}: {config:?}", path.display());

    let seed = config.obstacles.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);
    log::info!("seed {seed}");

    let mut editor = Editor::new(&config.editor_config())?;
    place_endpoints(&mut editor, &config, &mut rng)?;

    if config.obstacles.solvable {
        if !editor.randomize_solvable(&mut rng, config.obstacles.attempts)? {
            log::warn!("keeping an unsolvable layout");
        }
    } else {
        editor.randomize_obstacles(&mut rng)?;
    }

    let (grid, source, target) = editor.begin_run()?;
    let mut board = Board::new(&grid, Some(source), Some(target));
    let search = Search::new(&grid, source, target)?;
    let delay = Duration::from_millis(config.animation.step_delay_ms);

    let mut driver = TerminalDriver::new();
    driver.init()?;
    let end = animate(&mut driver, &mut board, search, delay, seed)?;

    let summary = match &end {
        RunEnd::Finished(Outcome::Found(path)) => {
            board.apply_path(path);
            format!("path found: {} steps", path.len() - 1)
        }
        RunEnd::Finished(Outcome::NotFound) => "no path".to_string(),
        RunEnd::Stopped => "stopped".to_string(),
    };
    log::info!("{summary}");

    if config.animation.hold_result && !matches!(end, RunEnd::Stopped) {
        driver.draw(&board, &format!("seed {seed}  {summary}  (press any key)"))?;
        driver.wait_key()?;
    }
    driver.close();
    editor.finish_run();

    println!("{summary} (seed {seed})");
    Ok(())
}

/// Logging setup. Records go to `out` only: the terminal belongs to the UI
/// while a run is drawn.
fn logger_builder(level: LevelFilter, out: Box<dyn Write + Send>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .target(env_logger::Target::Pipe(out))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        });
    builder
}

/// Place the endpoints from the config, picking free cells at random for
/// any that are unset.
fn place_endpoints(
    editor: &mut Editor,
    config: &Config,
    rng: &mut StdRng,
) -> Result<(), Box<dyn Error>> {
    let source = match config.endpoints.source {
        Some(xy) => endpoint_cell(editor.grid(), xy)?,
        None => random_cell(editor, rng, &[])?,
    };
    editor.set_source(source)?;

    let target = match config.endpoints.target {
        Some(xy) => endpoint_cell(editor.grid(), xy)?,
        None => random_cell(editor, rng, &[source])?,
    };
    editor.set_target(target)?;
    Ok(())
}

fn random_cell(
    editor: &Editor,
    rng: &mut StdRng,
    exclude: &[Cell],
) -> Result<Cell, Box<dyn Error>> {
    mapgen::random_free_cell(editor.grid(), rng, exclude)
        .ok_or_else(|| "grid has no free cell".into())
}

/// Play the search one step at a time until it finishes or the user stops it.
fn animate(
    driver: &mut TerminalDriver,
    board: &mut Board,
    mut search: Search<'_>,
    delay: Duration,
    seed: u64,
) -> Result<RunEnd, Box<dyn Error>> {
    driver.draw(board, &format!("seed {seed}  searching  (q to stop)"))?;

    while let Some(step) = search.next() {
        board.apply(step);
        let status = format!(
            "seed {seed}  step {}  frontier {}  (q to stop)",
            search.steps_taken(),
            search.frontier_len()
        );
        driver.draw(board, &status)?;
        if driver.wait_step(delay)? == StepControl::Stop {
            log::info!("run stopped after {} steps", search.steps_taken());
            return Ok(RunEnd::Stopped);
        }
    }

    let outcome = search.into_outcome();
    Ok(RunEnd::Finished(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use log::{Level, Log, Record};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn logger_writes_formatted_records_to_its_target() {
        let buf = SharedBuf::default();
        let logger = logger_builder(LevelFilter::Info, Box::new(buf.clone())).build();
        assert_eq!(logger.filter(), LevelFilter::Info);

        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("gridpath_paths::astar")
                .args(format_args!("found path of {} cells", 5))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("gridpath_paths::astar")
                .args(format_args!("hidden"))
                .build(),
        );
        logger.flush();

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text, "[INFO] gridpath_paths::astar - found path of 5 cells\n");
    }
}
