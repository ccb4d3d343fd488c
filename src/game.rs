use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::apple::{free_cells, place_apple};
use crate::config::GameConfig;
use crate::input::Direction;
use crate::scoring::{points_for_apple, sped_up_tick_ms, Difficulty, APPLES_PER_SPEED_UP};
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
///
/// `Ready -> Running <-> Paused`, and only `Running -> Dead`. `Dead` is
/// absorbing; a new run needs a fresh state from [`GameState::reset`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Ready,
    Running,
    Paused,
    Dead,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathReason {
    Wall,
    SelfCollision,
}

/// What happened during one call to [`GameState::step_with_event`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepEvent {
    /// The game was not running; nothing changed.
    Idle,
    Moved,
    Ate,
    /// An apple was eaten and the tick interval shrank.
    SpedUp,
    HitWall,
    HitSelf,
}

/// Complete immutable game state for one run.
///
/// Every transition borrows the current value and returns the next one; the
/// host keeps the latest value in a single slot.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub grid: u16,
    pub snake: Snake,
    pub dir: Direction,
    pub queued_dir: Option<Direction>,
    pub apple: Position,
    /// Ticks left during which the tail stays put.
    pub growing: u32,
    pub score: u32,
    pub status: GameStatus,
    pub wrap_walls: bool,
    pub tick_ms: u64,
    pub base_tick_ms: u64,
    pub difficulty: Difficulty,
    pub growth_quantum: u32,
    pub speed_up: bool,
    pub apples_eaten: u32,
    pub death_reason: Option<DeathReason>,
}

impl GameState {
    /// Creates a ready-to-start run with a centred three-cell snake heading
    /// right.
    ///
    /// `config.grid` must be at least [`crate::config::MIN_GRID`]; smaller
    /// boards produce an overlapping or out-of-bounds snake.
    #[must_use]
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let snake = Snake::centered(config.grid);
        let apple = place_apple(config.grid, &snake, rng);
        let tick_ms = config.difficulty.tick_ms();

        Self {
            grid: config.grid,
            snake,
            dir: Direction::Right,
            queued_dir: None,
            apple,
            growing: 0,
            score: 0,
            status: GameStatus::Ready,
            wrap_walls: config.wrap_walls,
            tick_ms,
            base_tick_ms: tick_ms,
            difficulty: config.difficulty,
            growth_quantum: config.growth_quantum,
            speed_up: config.speed_up,
            apples_eaten: 0,
            death_reason: None,
        }
    }

    /// Discards the current run entirely and starts over.
    #[must_use]
    pub fn reset<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        Self::new(config, rng)
    }

    /// Requests a turn for the next tick.
    ///
    /// Reversals of the committed direction, and of a turn still waiting in
    /// the queue, are dropped. A dead game ignores input.
    #[must_use]
    pub fn queue_direction(&self, next: Direction) -> Self {
        if self.status == GameStatus::Dead || next.is_opposite(self.dir) {
            return self.clone();
        }
        if self.queued_dir.is_some_and(|queued| next.is_opposite(queued)) {
            return self.clone();
        }

        Self {
            queued_dir: Some(next),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn start(&self) -> Self {
        self.transition(GameStatus::Ready, GameStatus::Running)
    }

    #[must_use]
    pub fn pause(&self) -> Self {
        self.transition(GameStatus::Running, GameStatus::Paused)
    }

    #[must_use]
    pub fn resume(&self) -> Self {
        self.transition(GameStatus::Paused, GameStatus::Running)
    }

    fn transition(&self, from: GameStatus, to: GameStatus) -> Self {
        if self.status != from {
            return self.clone();
        }
        Self {
            status: to,
            ..self.clone()
        }
    }

    /// Advances the simulation by one tick.
    #[must_use]
    pub fn step<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        self.step_with_event(rng).0
    }

    /// Advances the simulation by one tick and reports what happened.
    pub fn step_with_event<R: Rng + ?Sized>(&self, rng: &mut R) -> (Self, StepEvent) {
        if self.status != GameStatus::Running {
            return (self.clone(), StepEvent::Idle);
        }

        let dir = self.queued_dir.unwrap_or(self.dir);
        let mut next_head = self.snake.head().offset(dir);

        if self.wrap_walls {
            next_head = next_head.wrapped(self.grid);
        } else if !next_head.is_within_bounds(self.grid) {
            return (self.died(dir, DeathReason::Wall), StepEvent::HitWall);
        }

        let will_grow = next_head == self.apple;
        // The tail only moves out of the way on a tick without growth.
        let tail_vacates = !will_grow && self.growing == 0;
        let hits_self = self.snake.occupies(next_head)
            && !(tail_vacates && next_head == self.snake.tail());
        if hits_self {
            return (
                self.died(dir, DeathReason::SelfCollision),
                StepEvent::HitSelf,
            );
        }

        let mut next = Self {
            dir,
            queued_dir: None,
            ..self.clone()
        };
        next.snake.push_head(next_head);

        let mut event = StepEvent::Moved;
        if will_grow {
            event = next.eat_apple(rng);
        }

        if next.growing > 0 {
            next.growing -= 1;
        } else {
            next.snake.drop_tail();
        }

        (next, event)
    }

    fn eat_apple<R: Rng + ?Sized>(&mut self, rng: &mut R) -> StepEvent {
        self.score += points_for_apple(self.difficulty, self.wrap_walls);
        self.growing += self.growth_quantum;
        self.apples_eaten += 1;
        self.apple = place_apple(self.grid, &self.snake, rng);

        if self.speed_up && self.apples_eaten % APPLES_PER_SPEED_UP == 0 {
            self.tick_ms = sped_up_tick_ms(self.tick_ms);
            return StepEvent::SpedUp;
        }
        StepEvent::Ate
    }

    fn died(&self, dir: Direction, reason: DeathReason) -> Self {
        Self {
            status: GameStatus::Dead,
            dir,
            queued_dir: None,
            death_reason: Some(reason),
            ..self.clone()
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.snake.head()
    }

    /// Returns true when the snake covers every cell, leaving no room for an
    /// apple.
    #[must_use]
    pub fn is_board_full(&self) -> bool {
        free_cells(self.grid, &self.snake).is_empty()
    }

    /// Current speed relative to the difficulty's base interval.
    #[must_use]
    pub fn speed_multiplier(&self) -> f64 {
        self.base_tick_ms as f64 / self.tick_ms.max(1) as f64
    }
}
