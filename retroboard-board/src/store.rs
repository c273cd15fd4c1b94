//! BoardStore - the single owner of the board state
//!
//! The store holds the current board and the per-stack display index. It
//! offers reads to anyone; writes come from the drag controller (preview,
//! revert, commit) and from item commands through [`Execute`].

use crate::engine::Committed;
use crate::error::Result;
use crate::types::{Board, EntityId, Item};
use crate::validate::validate;
use std::collections::HashMap;
use tracing::debug;

/// A command applied against the store.
///
/// Commands are plain structs with a constructor and `with_*` builders;
/// executing one either fully applies it or leaves the store unchanged.
pub trait Execute {
    /// Value handed back on success
    type Output;

    /// Apply the command
    fn execute(&self, store: &mut BoardStore) -> Result<Self::Output>;
}

/// Owner of the board state and stack display indices
#[derive(Debug, Clone, Default)]
pub struct BoardStore {
    board: Board,
    /// Which card of each stack is logically first after cycling
    display: HashMap<EntityId, usize>,
    /// Bumped on every board write
    revision: u64,
}

impl BoardStore {
    /// Create a store from seed data, rejecting seeds that break board invariants
    pub fn new(seed: Board) -> Result<Self> {
        validate(&seed)?;
        let display = seed
            .columns()
            .flat_map(|col| col.items.iter())
            .filter_map(Item::as_stack)
            .map(|stack| (stack.id.clone(), 0))
            .collect();
        Ok(Self {
            board: seed,
            display,
            revision: 0,
        })
    }

    /// Current board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Cheap copy of the current board
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    /// Number of board writes so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Display index of a stack
    pub fn display_index(&self, stack: &str) -> Option<usize> {
        self.display.get(stack).copied()
    }

    /// Apply a provisional board during drag-over, or restore a snapshot
    pub(crate) fn replace(&mut self, board: Board) {
        self.board = board;
        self.revision += 1;
    }

    /// Apply a committed drop and keep display indices in step with it
    pub(crate) fn commit(&mut self, board: Board, committed: &Committed) {
        self.board = board;
        self.revision += 1;
        if let Committed::Stacked { stack } = committed {
            self.display.insert(stack.clone(), 0);
        }
        debug!(?committed, "drop committed");
    }

    /// Direct write access for item commands
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        self.revision += 1;
        &mut self.board
    }

    pub(crate) fn set_display(&mut self, stack: EntityId, index: usize) {
        self.display.insert(stack, index);
    }

    pub(crate) fn forget_display(&mut self, stack: &str) {
        self.display.remove(stack);
    }

    /// Keep a stack's display index inside `0..len` after it shrank
    pub(crate) fn clamp_display(&mut self, stack: &str, len: usize) {
        if let Some(index) = self.display.get_mut(stack) {
            *index = if len == 0 { 0 } else { *index % len };
        }
    }
}
