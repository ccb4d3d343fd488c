use std::path::PathBuf;

use log::{debug, info, warn};
use rand::rngs::StdRng;

use crate::config::{GameConfig, TOP_RUNS_SHOWN};
use crate::game::{GameState, GameStatus, StepEvent};
use crate::input::{Direction, GameInput};
use crate::store::{self, Records, RunRecord};
use crate::theme::{Theme, ThemeCatalog};

/// Host side of the game: owns the latest [`GameState`] and replaces it after
/// every engine call.
#[derive(Debug)]
pub struct Session {
    state: GameState,
    config: GameConfig,
    rng: StdRng,
    records: Records,
    records_path: Option<PathBuf>,
    /// Best score when the current run started.
    reference_best: u32,
    themes: ThemeCatalog,
}

impl Session {
    /// Starts a session with a fresh ready state. Records stay in memory
    /// until [`Session::with_records`] names a file.
    #[must_use]
    pub fn new(config: GameConfig, mut rng: StdRng) -> Self {
        let state = GameState::new(&config, &mut rng);
        Self {
            state,
            config,
            rng,
            records: Records::default(),
            records_path: None,
            reference_best: 0,
            themes: ThemeCatalog::default(),
        }
    }

    #[must_use]
    pub fn with_records(mut self, records: Records, path: Option<PathBuf>) -> Self {
        self.reference_best = records.best;
        self.records = records;
        self.records_path = path;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme_id: &str) -> Self {
        self.themes = ThemeCatalog::with_selected(theme_id);
        self
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn records(&self) -> &Records {
        &self.records
    }

    #[must_use]
    pub fn reference_best(&self) -> u32 {
        self.reference_best
    }

    /// Best recorded runs for the start screen.
    #[must_use]
    pub fn top_runs(&self) -> Vec<RunRecord> {
        self.records.top_runs(TOP_RUNS_SHOWN)
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        self.themes.current_theme()
    }

    #[must_use]
    pub fn theme_id(&self) -> &'static str {
        self.themes.current_id()
    }

    /// Applies one external input event. `Quit` is left to the caller.
    pub fn handle_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => self.steer(direction),
            GameInput::TogglePause => self.toggle_pause(),
            GameInput::Confirm => match self.state.status {
                GameStatus::Ready => self.state = self.state.start(),
                GameStatus::Dead => self.restart(),
                GameStatus::Running | GameStatus::Paused => {}
            },
            GameInput::Restart => self.restart(),
            GameInput::CycleTheme => {
                self.themes.select_next();
                debug!("theme switched to {}", self.themes.current_id());
            }
            GameInput::Quit => {}
        }
    }

    fn steer(&mut self, direction: Direction) {
        self.state = self.state.queue_direction(direction);
        self.state = match self.state.status {
            GameStatus::Ready => self.state.start(),
            GameStatus::Paused => self.state.resume(),
            _ => return,
        };
    }

    fn toggle_pause(&mut self) {
        self.state = match self.state.status {
            GameStatus::Ready => self.state.start(),
            GameStatus::Running => self.state.pause(),
            GameStatus::Paused => self.state.resume(),
            GameStatus::Dead => return,
        };
    }

    /// Throws the current run away and prepares a new one.
    pub fn restart(&mut self) {
        self.state = GameState::reset(&self.config, &mut self.rng);
        self.reference_best = self.records.best;
        debug!("run reset on a {}x{} board", self.config.grid, self.config.grid);
    }

    /// Advances the game by one tick. A score past the best is saved right
    /// away; the run itself is recorded when it ends.
    pub fn tick(&mut self) -> StepEvent {
        let (next, event) = self.state.step_with_event(&mut self.rng);
        self.state = next;

        match event {
            StepEvent::HitWall | StepEvent::HitSelf => self.finish_run(),
            StepEvent::Ate => self.raise_best(),
            StepEvent::SpedUp => {
                debug!("tick interval now {}ms", self.state.tick_ms);
                self.raise_best();
            }
            StepEvent::Idle | StepEvent::Moved => {}
        }
        event
    }

    fn raise_best(&mut self) {
        if self.records.raise_best(self.state.score) {
            debug!("best score raised to {}", self.state.score);
            self.save_records();
        }
    }

    fn finish_run(&mut self) {
        let score = self.state.score;
        self.records.record_run(score, store::now_ms());
        info!(
            "run ended ({:?}) with score {score}, length {}",
            self.state.death_reason,
            self.state.snake.len()
        );
        if score > self.reference_best {
            info!("new best score {score}");
        }
        self.save_records();
    }

    fn save_records(&self) {
        if let Some(path) = &self.records_path {
            if let Err(error) = self.records.save_to(path) {
                warn!("failed to save records: {error}");
            }
        }
    }
}
