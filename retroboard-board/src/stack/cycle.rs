//! CycleStack command

use super::{cycle, CycleDirection};
use crate::error::Result;
use crate::store::{BoardStore, Execute};
use crate::types::EntityId;
use serde::Deserialize;
use tracing::debug;

/// Rotate a stack one card forward or backward
#[derive(Debug, Clone, Deserialize)]
pub struct CycleStack {
    /// The stack to rotate
    pub stack: EntityId,
    pub direction: CycleDirection,
}

impl CycleStack {
    pub fn new(stack: impl Into<EntityId>, direction: CycleDirection) -> Self {
        Self {
            stack: stack.into(),
            direction,
        }
    }

    /// Show the next card
    pub fn next(stack: impl Into<EntityId>) -> Self {
        Self::new(stack, CycleDirection::Next)
    }

    /// Show the previous card
    pub fn prev(stack: impl Into<EntityId>) -> Self {
        Self::new(stack, CycleDirection::Prev)
    }
}

impl Execute for CycleStack {
    /// The stack's new display index
    type Output = usize;

    fn execute(&self, store: &mut BoardStore) -> Result<usize> {
        let (next, len) = cycle(store.board(), self.stack.as_str(), self.direction)?;
        let current = store.display_index(self.stack.as_str()).unwrap_or(0);
        let index = self.direction.step(current, len);

        store.replace(next);
        store.set_display(self.stack.clone(), index);
        debug!(stack = %self.stack, direction = ?self.direction, index, "stack cycled");
        Ok(index)
    }
}
