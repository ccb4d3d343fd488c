use std::collections::HashSet;

use rand::Rng;

use crate::snake::{Position, Snake};

/// Lists every cell of a `grid`×`grid` board not covered by the snake, in
/// row-major order.
#[must_use]
pub fn free_cells(grid: u16, snake: &Snake) -> Vec<Position> {
    let occupied: HashSet<Position> = snake.segments().copied().collect();
    let side = i32::from(grid);

    let mut candidates = Vec::new();
    for y in 0..side {
        for x in 0..side {
            let position = Position::new(x, y);
            if !occupied.contains(&position) {
                candidates.push(position);
            }
        }
    }
    candidates
}

/// Picks a uniformly random free cell for the next apple.
///
/// Draws `u` in `[0, 1)` and takes index `floor(u * free)`, which always
/// terminates. A full board has nowhere to go, so the head cell is returned.
#[must_use]
pub fn place_apple<R: Rng + ?Sized>(grid: u16, snake: &Snake, rng: &mut R) -> Position {
    let candidates = free_cells(grid, snake);
    if candidates.is_empty() {
        return snake.head();
    }

    let unit: f64 = rng.gen_range(0.0..1.0);
    let index = ((unit * candidates.len() as f64) as usize).min(candidates.len() - 1);
    candidates[index]
}
