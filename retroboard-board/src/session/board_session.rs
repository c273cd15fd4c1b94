//! BoardSession - one board, one drag controller

use super::scheduler::{Scheduler, VirtualScheduler, Wakeup};
use super::{DragController, DragState, DropOutcome, Gesture, Highlight};
use crate::config::BoardConfig;
use crate::error::Result;
use crate::stack::{CycleDirection, CycleStack, Unstack};
use crate::store::{BoardStore, Execute};
use crate::types::{Board, EntityId};
use std::time::Duration;
use tracing::trace;

/// A board store paired with the drag controller that edits it.
///
/// Gestures and wakeups go to the controller; item commands go straight to
/// the store through [`BoardSession::execute`]. Dropping the session cancels
/// every pending wakeup.
#[derive(Debug)]
pub struct BoardSession<S: Scheduler> {
    store: BoardStore,
    controller: DragController<S>,
}

impl<S: Scheduler> BoardSession<S> {
    /// Start a session on a seed board
    pub fn new(seed: Board, config: BoardConfig, scheduler: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store: BoardStore::new(seed)?,
            controller: DragController::new(scheduler, config),
        })
    }

    pub fn board(&self) -> &Board {
        self.store.board()
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    pub fn state(&self) -> &DragState {
        self.controller.state()
    }

    pub fn highlight(&self) -> Highlight {
        self.controller.highlight()
    }

    pub fn scheduler(&self) -> &S {
        self.controller.scheduler()
    }

    pub fn drag_start(&mut self, id: &str) {
        self.controller.drag_start(&self.store, id);
    }

    pub fn drag_over(&mut self, over: Option<&str>) {
        self.controller.drag_over(&mut self.store, over);
    }

    pub fn drag_end(&mut self, over: Option<&str>) -> DropOutcome {
        self.controller.drag_end(&mut self.store, over)
    }

    pub fn cancel(&mut self) -> DropOutcome {
        self.controller.cancel(&mut self.store)
    }

    pub fn wake(&mut self, wakeup: Wakeup) {
        self.controller.wake(&mut self.store, wakeup);
    }

    /// Dispatch a gesture. Returns the outcome for gestures that end a drag.
    pub fn apply(&mut self, gesture: &Gesture) -> Option<DropOutcome> {
        trace!(?gesture, "gesture");
        match gesture {
            Gesture::DragStart { id } => {
                self.drag_start(id.as_str());
                None
            }
            Gesture::DragOver { over } => {
                self.drag_over(over.as_ref().map(EntityId::as_str));
                None
            }
            Gesture::DragEnd { over } => Some(self.drag_end(over.as_ref().map(EntityId::as_str))),
            Gesture::Cancel => Some(self.cancel()),
        }
    }

    /// Run an item command against the store
    pub fn execute<C: Execute>(&mut self, command: &C) -> Result<C::Output> {
        command.execute(&mut self.store)
    }

    /// Rotate a stack; returns its new display index
    pub fn cycle_stack(&mut self, stack: &str, direction: CycleDirection) -> Result<usize> {
        self.execute(&CycleStack::new(stack, direction))
    }

    /// Split a stack into its cards
    pub fn unstack(&mut self, stack: &str) -> Result<Vec<EntityId>> {
        self.execute(&Unstack::new(stack))
    }

    /// Cancel pending wakeups and end any drag without touching the board
    pub fn dispose(&mut self) {
        self.controller.dispose();
    }

    /// Take the board out, ending the session
    pub fn into_board(mut self) -> Board {
        self.dispose();
        self.store.snapshot()
    }
}

impl BoardSession<VirtualScheduler> {
    /// Session on a virtual clock
    pub fn virtual_time(seed: Board, config: BoardConfig) -> Result<Self> {
        Self::new(seed, config, VirtualScheduler::new())
    }

    /// Move virtual time forward, firing due wakeups one at a time in order
    pub fn advance(&mut self, by: Duration) {
        let until = self.controller.scheduler().now() + by;
        while let Some(wakeup) = self.controller.scheduler_mut().pop_due(until) {
            self.wake(wakeup);
        }
        self.controller.scheduler_mut().settle(until);
    }
}
