//! DragController - the drag session state machine
//!
//! Owns every piece of transient drag state: the current phase, the pending
//! stacking timer, the pending frame and preview request, the last-preview
//! memo and the pre-drag snapshot. Board writes go through the store using
//! the engine's preview and commit entry points.

use super::scheduler::{Scheduler, Token, Wakeup};
use super::{DragState, DropOutcome, Highlight};
use crate::config::{BoardConfig, DropOutsidePolicy};
use crate::engine::{commit_drop, preview_move, undo_preview, DropIntent};
use crate::locate::{column_index_containing, locate_item, resolve, Resolved};
use crate::store::BoardStore;
use crate::types::{Board, EntityId, Item};
use tracing::{debug, trace};

/// A live-preview request waiting for the next frame
#[derive(Debug, Clone, PartialEq, Eq)]
struct PreviewRequest {
    active: EntityId,
    over: EntityId,
    column: EntityId,
}

impl PreviewRequest {
    /// Memo key: the hovered id together with the column it resolved to
    fn key(&self) -> (EntityId, EntityId) {
        (self.column.clone(), self.over.clone())
    }
}

/// Drag state machine driven by gestures and scheduler wakeups
#[derive(Debug)]
pub struct DragController<S: Scheduler> {
    scheduler: S,
    config: BoardConfig,
    state: DragState,
    next_token: u64,
    /// Pending stacking timer and the target it was started for
    stack_timer: Option<(Token, EntityId)>,
    frame: Option<Token>,
    pending_preview: Option<PreviewRequest>,
    last_preview: Option<(EntityId, EntityId)>,
    /// Board as it was when the drag started, or when it was last rebased
    snapshot: Option<Board>,
    /// Column id and index the dragged item started at
    origin: Option<(EntityId, usize)>,
    /// Store revision after the controller's own last write
    seen_revision: u64,
}

impl<S: Scheduler> DragController<S> {
    pub fn new(scheduler: S, config: BoardConfig) -> Self {
        Self {
            scheduler,
            config,
            state: DragState::Idle,
            next_token: 0,
            stack_timer: None,
            frame: None,
            pending_preview: None,
            last_preview: None,
            snapshot: None,
            origin: None,
            seen_revision: 0,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Descriptor for drop-target affordances
    pub fn highlight(&self) -> Highlight {
        Highlight::from(&self.state)
    }

    /// Begin dragging `id`. Unknown ids leave the controller idle.
    pub fn drag_start(&mut self, store: &BoardStore, id: &str) {
        if !self.state.is_idle() {
            debug!(active = ?self.state.active(), "drag start while dragging, dropping previous session");
            self.dispose();
        }
        if resolve(store.board(), id).is_none() {
            debug!(id, "drag start on unknown id ignored");
            return;
        }
        self.snapshot = Some(store.snapshot());
        self.origin = locate_item(store.board(), id).and_then(|(column, index)| {
            let column = store.board().column_at(column)?;
            Some((column.id.clone(), index))
        });
        self.seen_revision = store.revision();
        self.state = DragState::Dragging {
            active: EntityId::from(id),
        };
        trace!(id, "drag started");
    }

    /// Pointer moved over `over`, or over nothing
    pub fn drag_over(&mut self, store: &mut BoardStore, over: Option<&str>) {
        let Some(active) = self.state.active().cloned() else {
            trace!("drag over without a session ignored");
            return;
        };
        self.rebase_if_changed(store);
        if resolve(store.board(), active.as_str()).is_none() {
            self.abandon(active.as_str());
            return;
        }

        let Some(over) = over else {
            self.cancel_stack_timer();
            self.cancel_frame();
            self.last_preview = None;
            self.state = DragState::Dragging { active };
            return;
        };

        let board = store.board();
        let Some(target) = resolve(board, over) else {
            self.abandon(over);
            return;
        };

        if self.keeps_stacking_target(over) {
            trace!(over, "still hovering the same stack target");
            return;
        }

        self.cancel_stack_timer();
        let can_stack = active != *over
            && matches!(resolve(board, active.as_str()), Some(Resolved::Item(Item::Card(_))))
            && target.item().is_some_and(Item::accepts_stacking);
        let over = EntityId::from(over);
        if can_stack {
            let token = self.token();
            self.scheduler
                .schedule(Wakeup::StackArm(token), self.config.stack_delay());
            self.stack_timer = Some((token, over.clone()));
        }

        let column = column_index_containing(board, over.as_str())
            .and_then(|index| board.column_at(index))
            .map(|col| col.id.clone());
        self.state = DragState::DraggingWithPreview {
            active: active.clone(),
            over: over.clone(),
        };

        if let Some(column) = column {
            self.request_preview(
                store,
                PreviewRequest {
                    active,
                    over,
                    column,
                },
            );
        }
    }

    /// Release the dragged item over `over`, or over nothing
    pub fn drag_end(&mut self, store: &mut BoardStore, over: Option<&str>) -> DropOutcome {
        self.rebase_if_changed(store);
        let state = std::mem::take(&mut self.state);
        let snapshot = self.snapshot.take();
        self.origin = None;
        self.clear();

        let Some(active) = state.active().cloned() else {
            trace!("drag end without a session ignored");
            return DropOutcome::Ignored;
        };

        let Some(over) = over else {
            return match self.config.drop_outside {
                DropOutsidePolicy::Revert => {
                    if let Some(board) = snapshot {
                        store.replace(board);
                    }
                    debug!(%active, "dropped outside, reverted");
                    DropOutcome::Reverted
                }
                DropOutsidePolicy::Keep => {
                    debug!(%active, "dropped outside, keeping preview");
                    DropOutcome::KeptPreview
                }
            };
        };

        let current = store.board();
        if resolve(current, active.as_str()).is_none() || resolve(current, over).is_none() {
            debug!(%active, over, "drop references a stale id, abandoned");
            return DropOutcome::Abandoned;
        }
        if active == *over {
            restore(store, snapshot);
            return DropOutcome::NoOp;
        }

        // Previews are provisional: the drop is judged against the board the
        // drag started from.
        let board = snapshot.as_ref().unwrap_or(current);

        let intent = match &state {
            DragState::StackArmed { over: armed, .. } if armed == over => DropIntent::Stack,
            _ => DropIntent::Reorder,
        };
        match commit_drop(board, active.as_str(), over, intent) {
            Some((next, committed)) => {
                store.commit(next, &committed);
                DropOutcome::Committed(committed)
            }
            None => {
                debug!(%active, over, "drop changes nothing, preview discarded");
                restore(store, snapshot);
                DropOutcome::NoOp
            }
        }
    }

    /// Abort the drag and restore the pre-drag board
    pub fn cancel(&mut self, store: &mut BoardStore) -> DropOutcome {
        self.rebase_if_changed(store);
        let state = std::mem::take(&mut self.state);
        let snapshot = self.snapshot.take();
        self.origin = None;
        self.clear();

        if state.is_idle() {
            return DropOutcome::Ignored;
        }
        if let Some(board) = snapshot {
            store.replace(board);
        }
        debug!(active = ?state.active(), "drag cancelled");
        DropOutcome::Reverted
    }

    /// Handle a fired wakeup. Wakeups the controller no longer waits for do nothing.
    pub fn wake(&mut self, store: &mut BoardStore, wakeup: Wakeup) {
        match wakeup {
            Wakeup::StackArm(token) => self.arm(token),
            Wakeup::Frame(token) if self.frame == Some(token) => {
                self.frame = None;
                self.rebase_if_changed(store);
                if let Some(request) = self.pending_preview.take() {
                    self.apply_preview(store, request);
                }
            }
            Wakeup::Frame(token) => trace!(token = token.value(), "stale frame ignored"),
        }
    }

    /// Cancel everything still scheduled and forget the session
    pub fn dispose(&mut self) {
        self.clear();
        self.state = DragState::Idle;
        self.snapshot = None;
        self.origin = None;
    }

    fn arm(&mut self, token: Token) {
        let Some((pending, target)) = self.stack_timer.take() else {
            trace!(token = token.value(), "stale stack timer ignored");
            return;
        };
        if pending != token {
            self.stack_timer = Some((pending, target));
            trace!(token = token.value(), "stale stack timer ignored");
            return;
        }
        let DragState::DraggingWithPreview { active, over } = &self.state else {
            return;
        };
        if *over != target {
            return;
        }
        debug!(%active, %over, "stacking armed");
        self.state = DragState::StackArmed {
            active: active.clone(),
            over: target,
        };
        // The target must not move out from under the pointer once armed.
        self.pending_preview = None;
        self.cancel_frame();
    }

    /// A repeat hover over the current stack target keeps its timer or armed state
    fn keeps_stacking_target(&self, over: &str) -> bool {
        match &self.state {
            DragState::StackArmed { over: armed, .. } => armed == over,
            DragState::DraggingWithPreview { over: current, .. } => self
                .stack_timer
                .as_ref()
                .is_some_and(|(_, target)| target == over && current == over),
            _ => false,
        }
    }

    fn request_preview(&mut self, store: &mut BoardStore, request: PreviewRequest) {
        if self.last_preview.as_ref() == Some(&request.key()) {
            self.pending_preview = None;
            return;
        }
        if !self.config.throttle_previews {
            self.apply_preview(store, request);
            return;
        }
        self.pending_preview = Some(request);
        if self.frame.is_none() {
            let token = self.token();
            self.scheduler
                .schedule(Wakeup::Frame(token), self.config.frame_interval());
            self.frame = Some(token);
        }
    }

    fn apply_preview(&mut self, store: &mut BoardStore, request: PreviewRequest) {
        let still_hovering = matches!(
            &self.state,
            DragState::DraggingWithPreview { active, over } if *active == request.active && *over == request.over
        );
        if !still_hovering {
            return;
        }
        if let Some(next) = preview_move(
            store.board(),
            request.active.as_str(),
            request.over.as_str(),
        ) {
            store.replace(next);
            self.seen_revision = store.revision();
        }
        self.last_preview = Some(request.key());
    }

    /// A command edited the board mid-drag. Reverting to the old snapshot
    /// would undo it, so the starting point becomes the current board with
    /// the preview taken back out.
    fn rebase_if_changed(&mut self, store: &BoardStore) {
        if store.revision() == self.seen_revision {
            return;
        }
        let Some(active) = self.state.active() else {
            return;
        };
        debug!(revision = store.revision(), "board changed during drag, rebasing");
        let board = store.board();
        let start = self
            .origin
            .as_ref()
            .and_then(|origin| undo_preview(board, active.as_str(), origin))
            .unwrap_or_else(|| board.clone());
        self.snapshot = Some(start);
        self.seen_revision = store.revision();
        self.last_preview = None;
    }

    fn abandon(&mut self, id: &str) {
        debug!(id, "gesture references a stale id, session abandoned");
        self.dispose();
    }

    fn token(&mut self) -> Token {
        self.next_token += 1;
        Token::new(self.next_token)
    }

    fn cancel_stack_timer(&mut self) {
        if let Some((token, _)) = self.stack_timer.take() {
            self.scheduler.cancel(Wakeup::StackArm(token));
        }
    }

    fn cancel_frame(&mut self) {
        self.pending_preview = None;
        if let Some(token) = self.frame.take() {
            self.scheduler.cancel(Wakeup::Frame(token));
        }
    }

    /// Cancel pending wakeups and drop the preview memo
    fn clear(&mut self) {
        self.cancel_stack_timer();
        self.cancel_frame();
        self.last_preview = None;
    }
}

/// Put the drag-start board back unless the store already shows it
fn restore(store: &mut BoardStore, snapshot: Option<Board>) {
    if let Some(board) = snapshot {
        if store.board() != &board {
            store.replace(board);
        }
    }
}

impl<S: Scheduler> Drop for DragController<S> {
    fn drop(&mut self) {
        self.clear();
    }
}
