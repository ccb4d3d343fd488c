use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use serde::{Deserialize, Serialize};

/// Default swipe distance, in pointer units, before a drag becomes a turn.
pub const DEFAULT_SWIPE_THRESHOLD: i32 = 18;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns true when `self` and `other` point in antiparallel directions.
    #[must_use]
    pub fn is_opposite(self, other: Self) -> bool {
        self.opposite() == other
    }

    /// Unit grid offset for one step; y grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    TogglePause,
    Restart,
    CycleTheme,
    Confirm,
    Quit,
}

/// Translates a key press into a game input.
///
/// Arrow keys and WASD steer, Space toggles pause, `r` restarts, `t` cycles
/// the theme, Enter confirms, `q`/Esc/Ctrl-C quit. Key releases are ignored so
/// terminals that report them do not double-fire.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(GameInput::Quit),
            _ => None,
        };
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            GameInput::Direction(Direction::Up)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            GameInput::Direction(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            GameInput::Direction(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            GameInput::Direction(Direction::Right)
        }
        KeyCode::Char(' ') => GameInput::TogglePause,
        KeyCode::Char('r') | KeyCode::Char('R') => GameInput::Restart,
        KeyCode::Char('t') | KeyCode::Char('T') => GameInput::CycleTheme,
        KeyCode::Enter => GameInput::Confirm,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Turns pointer drags into directions.
///
/// One press yields at most one direction: once the drag crosses the
/// threshold on either axis the dominant axis wins and tracking stops until
/// the next press.
#[derive(Debug, Clone, Copy)]
pub struct SwipeTracker {
    threshold: i32,
    origin: Option<(i32, i32)>,
}

impl SwipeTracker {
    #[must_use]
    pub fn new(threshold: i32) -> Self {
        Self {
            threshold: threshold.max(1),
            origin: None,
        }
    }

    pub fn press(&mut self, x: i32, y: i32) {
        self.origin = Some((x, y));
    }

    /// Feeds a pointer move; returns a direction once the swipe is recognised.
    pub fn drag(&mut self, x: i32, y: i32) -> Option<Direction> {
        let (start_x, start_y) = self.origin?;
        let dx = x - start_x;
        let dy = y - start_y;
        if dx.abs() < self.threshold && dy.abs() < self.threshold {
            return None;
        }

        self.origin = None;
        if dx.abs() > dy.abs() {
            Some(if dx > 0 { Direction::Right } else { Direction::Left })
        } else {
            Some(if dy > 0 { Direction::Down } else { Direction::Up })
        }
    }

    pub fn release(&mut self) {
        self.origin = None;
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

/// Polls the terminal for keyboard and mouse input.
#[derive(Debug)]
pub struct InputHandler {
    swipe: SwipeTracker,
}

impl InputHandler {
    #[must_use]
    pub fn new(swipe_threshold: i32) -> Self {
        Self {
            swipe: SwipeTracker::new(swipe_threshold),
        }
    }

    /// Waits up to `timeout` for one event and maps it to a game input.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        Ok(match event::read()? {
            Event::Key(key) => map_key(key),
            Event::Mouse(mouse) => self.map_mouse(mouse),
            _ => None,
        })
    }

    fn map_mouse(&mut self, mouse: MouseEvent) -> Option<GameInput> {
        let x = i32::from(mouse.column);
        let y = i32::from(mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe.press(x, y);
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.swipe.drag(x, y).map(GameInput::Direction)
            }
            MouseEventKind::Up(_) => {
                self.swipe.release();
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::{map_key, Direction, GameInput, SwipeTracker};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn only_antiparallel_directions_are_opposite() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        assert_eq!(
            map_key(press(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('a'))),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('S'))),
            Some(GameInput::Direction(Direction::Down))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('d'))),
            Some(GameInput::Direction(Direction::Right))
        );
    }

    #[test]
    fn commands_map_from_keys() {
        assert_eq!(
            map_key(press(KeyCode::Char(' '))),
            Some(GameInput::TogglePause)
        );
        assert_eq!(map_key(press(KeyCode::Char('r'))), Some(GameInput::Restart));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(map_key(release), None);
    }

    #[test]
    fn swipe_below_threshold_emits_nothing() {
        let mut swipe = SwipeTracker::new(18);
        swipe.press(100, 100);

        assert_eq!(swipe.drag(110, 90), None);
        assert!(swipe.is_tracking());
    }

    #[test]
    fn swipe_uses_dominant_axis_and_fires_once() {
        let mut swipe = SwipeTracker::new(18);
        swipe.press(100, 100);

        assert_eq!(swipe.drag(130, 110), Some(Direction::Right));
        assert_eq!(swipe.drag(200, 110), None);

        swipe.press(50, 50);
        assert_eq!(swipe.drag(45, 20), Some(Direction::Up));
    }

    #[test]
    fn swipe_release_cancels_tracking() {
        let mut swipe = SwipeTracker::new(18);
        swipe.press(0, 0);
        swipe.release();

        assert_eq!(swipe.drag(0, 40), None);
    }
}
