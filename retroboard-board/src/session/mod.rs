//! Drag sessions: gestures in, board states and highlights out

mod board_session;
mod controller;
pub mod scheduler;

pub use board_session::BoardSession;
pub use controller::DragController;
pub use scheduler::{Scheduler, Token, VirtualScheduler, Wakeup};

use crate::engine::Committed;
use crate::types::EntityId;
use serde::{Deserialize, Serialize};

/// A gesture delivered by the host, already translated to ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum Gesture {
    DragStart {
        id: EntityId,
    },
    DragOver {
        #[serde(default)]
        over: Option<EntityId>,
    },
    DragEnd {
        #[serde(default)]
        over: Option<EntityId>,
    },
    Cancel,
}

/// Phase of the drag session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        active: EntityId,
    },
    DraggingWithPreview {
        active: EntityId,
        over: EntityId,
    },
    StackArmed {
        active: EntityId,
        over: EntityId,
    },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The dragged id, if a drag is in progress
    pub fn active(&self) -> Option<&EntityId> {
        match self {
            Self::Idle => None,
            Self::Dragging { active }
            | Self::DraggingWithPreview { active, .. }
            | Self::StackArmed { active, .. } => Some(active),
        }
    }

    /// The hovered id, if any
    pub fn over(&self) -> Option<&EntityId> {
        match self {
            Self::DraggingWithPreview { over, .. } | Self::StackArmed { over, .. } => Some(over),
            _ => None,
        }
    }
}

/// What the host needs to render drop-target affordances
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub active_id: Option<EntityId>,
    pub over_id: Option<EntityId>,
    pub stacking_armed: bool,
}

impl From<&DragState> for Highlight {
    fn from(state: &DragState) -> Self {
        Self {
            active_id: state.active().cloned(),
            over_id: state.over().cloned(),
            stacking_armed: matches!(state, DragState::StackArmed { .. }),
        }
    }
}

/// Result of ending a drag session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The board changed; see [`Committed`] for how
    Committed(Committed),
    /// The board is back to its pre-drag state
    Reverted,
    /// Dropped outside any target; the last preview stays
    KeptPreview,
    /// Nothing to do: dropped onto itself or an ineligible target
    NoOp,
    /// An id went stale during the drag; nothing was committed
    Abandoned,
    /// No drag was in progress
    Ignored,
}

impl DropOutcome {
    /// Check whether the drop committed a board change
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}
