use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{
    settings_path, Settings, SettingsOverrides, DEFAULT_GRID, MAX_GRID, MIN_GRID,
    TERMINAL_SWIPE_THRESHOLD,
};
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::logging;
use grid_snake::renderer;
use grid_snake::scoring::Difficulty;
use grid_snake::session::Session;
use grid_snake::store::{records_path, Records};
use grid_snake::terminal_runtime::{install_panic_hook, TerminalSession};
use log::{info, warn, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about = "Snake on a square grid, in your terminal")]
struct Cli {
    /// Board side length in cells.
    #[arg(long, default_value_t = DEFAULT_GRID,
          value_parser = clap::value_parser!(u16).range(i64::from(MIN_GRID)..=i64::from(MAX_GRID)))]
    grid: u16,

    /// Difficulty; defaults to the last one played.
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Leave one edge and re-enter at the opposite one instead of dying.
    #[arg(long, overrides_with = "no_wrap_walls")]
    wrap_walls: bool,

    /// Die on the board edge even if wrap walls were saved.
    #[arg(long, overrides_with = "wrap_walls")]
    no_wrap_walls: bool,

    /// Speed up every few apples.
    #[arg(long, overrides_with = "no_speed_up")]
    speed_up: bool,

    /// Keep a constant speed even if speed-up was saved.
    #[arg(long, overrides_with = "speed_up")]
    no_speed_up: bool,

    /// Seed for reproducible apple placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Disable mouse drag steering.
    #[arg(long = "no-mouse")]
    no_mouse: bool,

    /// Log file path (defaults to the game's data directory).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log debug-level detail.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(error) = logging::init(&log_path, level) {
        eprintln!("Logging disabled: {error}");
    }

    let settings = effective_settings(&cli);
    let config = settings.game_config(cli.grid);
    if let Err(error) = config.validate() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, error));
    }

    let records_path = records_path();
    let records = Records::load_from(&records_path).unwrap_or_else(|error| {
        warn!("ignoring unreadable records: {error}");
        Records::default()
    });

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(config, rng)
        .with_records(records, Some(records_path))
        .with_theme(&settings.theme);
    info!(
        "starting {}x{} game, difficulty {:?}, wrap walls {}",
        config.grid, config.grid, config.difficulty, config.wrap_walls
    );

    install_panic_hook();
    let result = run(&mut session, !cli.no_mouse);

    let settings = Settings {
        theme: session.theme_id().to_owned(),
        ..settings
    };
    if let Err(error) = settings.save_to(&settings_path()) {
        warn!("failed to save settings: {error}");
    }
    result
}

/// Persisted settings with command-line overrides applied.
fn effective_settings(cli: &Cli) -> Settings {
    let settings = Settings::load_from(&settings_path()).unwrap_or_else(|error| {
        warn!("ignoring unreadable settings: {error}");
        Settings::default()
    });

    settings.with_overrides(SettingsOverrides {
        difficulty: cli.difficulty,
        wrap_walls: toggle(cli.wrap_walls, cli.no_wrap_walls),
        speed_up: toggle(cli.speed_up, cli.no_speed_up),
    })
}

/// Reads an `--x`/`--no-x` flag pair; neither given means no override.
fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn run(session: &mut Session, mouse: bool) -> io::Result<()> {
    let mut terminal = TerminalSession::enter(mouse)?;
    let mut input = InputHandler::new(TERMINAL_SWIPE_THRESHOLD);
    let mut last_tick = Instant::now();

    loop {
        terminal
            .terminal_mut()
            .draw(|frame| renderer::render_session(frame, session))?;

        let tick_interval = Duration::from_millis(session.state().tick_ms);
        let timeout = tick_interval
            .saturating_sub(last_tick.elapsed())
            .min(FRAME_INTERVAL);
        if let Some(game_input) = input.poll_input(timeout)? {
            if matches!(game_input, GameInput::Quit) {
                break;
            }
            session.handle_input(game_input);
        }

        if last_tick.elapsed() >= tick_interval {
            session.tick();
            last_tick = Instant::now();
        }
    }

    info!("quit with best score {}", session.records().best);
    Ok(())
}
