use grid_snake::config::GameConfig;
use grid_snake::game::{DeathReason, GameState, GameStatus, StepEvent};
use grid_snake::input::Direction;
use grid_snake::scoring::{points_for_apple, Difficulty};
use grid_snake::snake::{Position, Snake};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn stepwise_apple_collection_and_wall_collision() {
    let mut rng = StdRng::seed_from_u64(42);
    let config = GameConfig::new(6, Difficulty::Hard, false);
    let mut state = GameState::new(&config, &mut rng).start();
    state.snake = Snake::from_segments(vec![Position::new(0, 1), Position::new(1, 1)]);
    state.apple = Position::new(2, 1);

    let (next, event) = state.step_with_event(&mut rng);
    state = next;
    assert_eq!(event, StepEvent::Ate);
    assert_eq!(state.status, GameStatus::Running);
    assert_eq!(state.score, 22);
    assert_eq!(state.snake.len(), 3);
    assert_eq!(state.head(), Position::new(2, 1));

    state = state.queue_direction(Direction::Up).step(&mut rng);
    assert_eq!(state.status, GameStatus::Running);
    assert_eq!(state.head(), Position::new(2, 0));
    assert_eq!(state.snake.len(), 4);

    state = state.step(&mut rng);
    assert_eq!(state.status, GameStatus::Dead);
    assert_eq!(state.death_reason, Some(DeathReason::Wall));
    assert_eq!(state.dir, Direction::Up);
}

#[test]
fn same_seed_replays_identically() {
    let config = GameConfig::new(10, Difficulty::Normal, true).with_speed_up(true);
    let turns = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    let play = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = GameState::new(&config, &mut rng).start();
        let mut history = Vec::new();
        for tick in 0..200 {
            if tick % 7 == 0 {
                state = state.queue_direction(turns[(tick / 7) % turns.len()]);
            }
            state = state.step(&mut rng);
            history.push(state.clone());
        }
        history
    };

    assert_eq!(play(99), play(99));
}

#[test]
fn chasing_apples_on_wrapped_board_accumulates_score() {
    let config = GameConfig::new(8, Difficulty::Easy, true);
    let mut rng = StdRng::seed_from_u64(5);
    let mut state = GameState::new(&config, &mut rng).start();
    let per_apple = points_for_apple(Difficulty::Easy, true);

    let mut eaten = 0;
    for _ in 0..400 {
        if state.status != GameStatus::Running {
            break;
        }
        state = state.queue_direction(greedy_turn(&state));
        let (next, event) = state.step_with_event(&mut rng);
        if event == StepEvent::Ate {
            eaten += 1;
        }
        state = next;
    }

    assert!(eaten > 0);
    assert_eq!(state.score, eaten * per_apple);
}

/// Heads along the x axis first, then y, towards the apple.
fn greedy_turn(state: &GameState) -> Direction {
    let head = state.head();
    let wanted = if state.apple.x > head.x {
        Direction::Right
    } else if state.apple.x < head.x {
        Direction::Left
    } else if state.apple.y > head.y {
        Direction::Down
    } else {
        Direction::Up
    };
    if wanted.is_opposite(state.dir) {
        state.dir
    } else {
        wanted
    }
}
