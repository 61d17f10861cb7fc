//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The engine is a tick-driven state machine; callers own the timing loop and input.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{GameConfig, SpeedCurve};
pub use engine::{GameEngine, TickOutcome};
pub use state::{Cell, GameState, GameStatus, Snake};
