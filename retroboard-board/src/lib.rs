//! Retrospective board engine
//!
//! This crate holds the board model and everything that edits it: the drag
//! session controller that turns pointer gestures into live previews and
//! committed moves, card stacking and stack cycling, and the item commands
//! a host calls directly.
//!
//! ## Overview
//!
//! - **Copy-on-write boards** - A [`Board`] shares its columns; every edit
//!   produces a new board and snapshots stay untouched
//! - **Ids only** - Gestures carry ids, never geometry; translating pointer
//!   positions to ids is the host's job
//! - **No errors from dragging** - Stale or ineligible gestures are no-ops;
//!   only commands, configuration and seed loading return [`BoardError`]
//! - **Pluggable time** - The controller never sleeps; a [`Scheduler`] delivers
//!   its stacking and frame wakeups, on virtual time or on tokio
//!
//! ## Basic Usage
//!
//! ```rust
//! use retroboard_board::{Board, BoardConfig, BoardSession, DropOutcome};
//! use std::time::Duration;
//!
//! let mut session = BoardSession::virtual_time(Board::sample(), BoardConfig::default()).unwrap();
//!
//! // Hold card1 over card2 past the stacking delay, then drop it
//! session.drag_start("card1");
//! session.drag_over(Some("card2"));
//! session.advance(Duration::from_millis(700));
//! assert!(session.highlight().stacking_armed);
//!
//! let outcome = session.drag_end(Some("card2"));
//! assert!(matches!(outcome, DropOutcome::Committed(_)));
//! ```
//!
//! ## Item Commands
//!
//! ```rust
//! use retroboard_board::{card::AddCard, Board, BoardStore, Execute};
//!
//! let mut store = BoardStore::new(Board::sample()).unwrap();
//! let card = AddCard::new("col1", "Sam", "Retro notes").execute(&mut store).unwrap();
//! assert_eq!(card.content, "Retro notes");
//! ```

pub mod config;
pub mod content;
mod driver;
mod engine;
mod error;
pub mod grouping;
pub mod locate;
pub mod seed;
pub mod session;
mod store;
pub mod types;
mod validate;

// Command modules
pub mod card;
pub mod column;
pub mod item;
pub mod spacer;
pub mod stack;

pub use config::{BoardConfig, DropOutsidePolicy};
pub use driver::{spawn_session, SessionHandle, Snapshot, TokioScheduler};
pub use engine::{array_move, commit_drop, preview_move, Committed, DropIntent};
pub use error::{BoardError, Result};
pub use session::{
    BoardSession, DragController, DragState, DropOutcome, Gesture, Highlight, Scheduler,
    VirtualScheduler, Wakeup,
};
pub use stack::CycleDirection;
pub use store::{BoardStore, Execute};
pub use validate::{all_ids, validate};

// Re-export commonly used types
pub use types::{Board, Card, Column, EntityId, Item, ItemKind, Spacer, Stack};
