//! Retroboard CLI - replay drag gestures against a retrospective board
//!
//! The binary is a thin host around `retroboard-board`: it loads a seed
//! board and a script, drives a [`retroboard_board::BoardSession`] on a
//! virtual clock, and prints the board the session ends with.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod script;

pub use cli::{Cli, Commands, OutputFormat};
