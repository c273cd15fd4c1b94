//! Gesture scripts: a list of gestures and commands replayed in order

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use retroboard_board::locate::locate_deep;
use retroboard_board::{
    Board, BoardSession, CycleDirection, DropOutcome, EntityId, Gesture, VirtualScheduler,
};
use serde::Deserialize;
use tracing::{debug, info};

/// One line of a script
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Step {
    /// `gesture: drag_start | drag_over | drag_end | cancel`
    Gesture(Gesture),
    /// `wait:`, `cycle:` or `unstack:`
    Command(Command),
}

/// Non-gesture steps
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Advance the virtual clock
    Wait { ms: u64 },
    /// Rotate a stack, named by its id or by any card in it
    Cycle {
        stack: EntityId,
        #[serde(default = "default_direction")]
        direction: CycleDirection,
    },
    /// Split a stack, named by its id or by any card in it
    Unstack { stack: EntityId },
}

fn default_direction() -> CycleDirection {
    CycleDirection::Next
}

/// Read a script; `.json` is parsed as JSON, anything else as YAML
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<Step>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    let steps = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("invalid JSON script {}", path.display()))?,
        _ => serde_yaml_ng::from_str(&text)
            .with_context(|| format!("invalid YAML script {}", path.display()))?,
    };
    Ok(steps)
}

/// Run every step in order, stopping at the first failing command.
///
/// Returns the outcome of each gesture that ended a drag.
pub fn run(
    session: &mut BoardSession<VirtualScheduler>,
    steps: &[Step],
) -> Result<Vec<DropOutcome>> {
    let mut outcomes = Vec::new();
    for (index, step) in steps.iter().enumerate() {
        let number = index + 1;
        match step {
            Step::Gesture(gesture) => {
                if let Some(outcome) = session.apply(gesture) {
                    info!(step = number, ?outcome, "drag ended");
                    outcomes.push(outcome);
                }
            }
            Step::Command(Command::Wait { ms }) => {
                session.advance(Duration::from_millis(*ms));
                debug!(step = number, ms, "waited");
            }
            Step::Command(Command::Cycle { stack, direction }) => {
                let stack = stack_id(session.board(), stack)
                    .with_context(|| format!("step {number}: cycle"))?;
                let index = session
                    .cycle_stack(stack.as_str(), *direction)
                    .with_context(|| format!("step {number}: cycle {stack}"))?;
                debug!(step = number, %stack, index, "stack cycled");
            }
            Step::Command(Command::Unstack { stack }) => {
                let stack = stack_id(session.board(), stack)
                    .with_context(|| format!("step {number}: unstack"))?;
                let cards = session
                    .unstack(stack.as_str())
                    .with_context(|| format!("step {number}: unstack {stack}"))?;
                debug!(step = number, %stack, cards = cards.len(), "stack split");
            }
        }
    }
    Ok(outcomes)
}

/// Stacks made during a replay get fresh ids, so scripts may name one of
/// their cards instead.
fn stack_id(board: &Board, id: &EntityId) -> Result<EntityId> {
    let Some(location) = locate_deep(board, id.as_str()) else {
        bail!("no item with id {id}");
    };
    if location.slot.is_none() {
        return Ok(id.clone());
    }
    board
        .column_at(location.column)
        .and_then(|column| column.items.get(location.item))
        .map(|item| item.id().clone())
        .with_context(|| format!("no stack holds {id}"))
}
