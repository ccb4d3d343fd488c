use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside a `grid`×`grid` board.
    #[must_use]
    pub fn is_within_bounds(self, grid: u16) -> bool {
        let side = i32::from(grid);
        self.x >= 0 && self.y >= 0 && self.x < side && self.y < side
    }

    /// Returns this position wrapped into the board on both axes.
    #[must_use]
    pub fn wrapped(self, grid: u16) -> Self {
        let side = i32::from(grid);
        Self {
            x: self.x.rem_euclid(side),
            y: self.y.rem_euclid(side),
        }
    }

    /// Returns the neighbouring cell one step towards `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Ordered snake body, tail first and head last.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a snake from explicit segments ordered tail to head.
    ///
    /// An empty list is replaced by a single cell at the origin so the body
    /// always has a head.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Self {
        let mut body = VecDeque::from(segments);
        if body.is_empty() {
            body.push_back(Position::new(0, 0));
        }
        Self { body }
    }

    /// Three horizontal cells centred on the board, head pointing right.
    #[must_use]
    pub fn centered(grid: u16) -> Self {
        let mid = i32::from(grid / 2);
        Self::from_segments(vec![
            Position::new(mid - 1, mid),
            Position::new(mid, mid),
            Position::new(mid + 1, mid),
        ])
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body.back().copied().unwrap_or(Position::new(0, 0))
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body.front().copied().unwrap_or(Position::new(0, 0))
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Pushes a new head cell.
    pub fn push_head(&mut self, position: Position) {
        self.body.push_back(position);
    }

    /// Drops the tail cell; a single-cell snake keeps its only segment.
    pub fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            let _ = self.body.pop_front();
        }
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from tail to head.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
