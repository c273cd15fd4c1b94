//! Unstack command

use super::unstack;
use crate::error::Result;
use crate::store::{BoardStore, Execute};
use crate::types::EntityId;
use serde::Deserialize;
use tracing::debug;

/// Split a stack back into individual cards at the stack's position
#[derive(Debug, Clone, Deserialize)]
pub struct Unstack {
    /// The stack to split
    pub stack: EntityId,
}

impl Unstack {
    pub fn new(stack: impl Into<EntityId>) -> Self {
        Self {
            stack: stack.into(),
        }
    }
}

impl Execute for Unstack {
    /// Ids of the freed cards, in the order they now appear
    type Output = Vec<EntityId>;

    fn execute(&self, store: &mut BoardStore) -> Result<Vec<EntityId>> {
        let freed = super::get_stack(store.board(), self.stack.as_str())?
            .cards()
            .iter()
            .map(|c| c.id.clone())
            .collect();
        let next = unstack(store.board(), self.stack.as_str())?;

        store.replace(next);
        store.forget_display(self.stack.as_str());
        debug!(stack = %self.stack, "stack split");
        Ok(freed)
    }
}
