//! Deterministic grid Snake.
//!
//! [`game::GameState`] is an immutable value advanced by pure transition
//! functions; everything else in the crate (input mapping, persistence,
//! rendering, the terminal runtime) is a thin host around it.

pub mod apple;
pub mod config;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod scoring;
pub mod session;
pub mod snake;
pub mod store;
pub mod terminal_runtime;
pub mod theme;
pub mod ui;
