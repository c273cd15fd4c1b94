//! Core types for the board engine

mod board;
mod ids;
mod item;

// Re-export all types
pub use board::{Board, Column};
pub use ids::EntityId;
pub use item::{Card, Item, ItemKind, Shrunk, Spacer, Stack};
