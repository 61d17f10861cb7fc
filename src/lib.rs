//! Snack Snake - the snake game from a focus timer's break screen
//!
//! This library provides:
//! - Core game logic: a tick-driven engine with no I/O (game module)
//! - Keyboard mapping for the terminal host (input module)
//! - TUI rendering (render module)
//! - Play clock and counters (metrics module)
//! - The terminal driver loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
