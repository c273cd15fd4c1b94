//! Async session driver
//!
//! Runs a [`BoardSession`] inside a tokio task. Timers are real
//! `tokio::time::sleep` tasks; gestures arrive over an mpsc channel and every
//! processed event publishes a fresh [`Snapshot`] on a watch channel.

use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::session::{BoardSession, DropOutcome, Gesture, Highlight, Scheduler, Wakeup};
use crate::types::Board;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Gestures buffered before `send` waits
const GESTURE_BUFFER: usize = 64;

/// Scheduler backed by one tokio sleep task per wakeup
#[derive(Debug)]
pub struct TokioScheduler {
    fired: mpsc::UnboundedSender<Wakeup>,
    timers: HashMap<Wakeup, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Fired wakeups are delivered on `fired`
    pub fn new(fired: mpsc::UnboundedSender<Wakeup>) -> Self {
        Self {
            fired,
            timers: HashMap::new(),
        }
    }

    /// Number of timers that have not fired or been cancelled
    pub fn pending_count(&self) -> usize {
        self.timers.values().filter(|t| !t.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, wakeup: Wakeup, delay: Duration) {
        self.timers.retain(|_, timer| !timer.is_finished());
        let fired = self.fired.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The session may already be gone.
            let _ = fired.send(wakeup);
        });
        self.timers.insert(wakeup, timer);
    }

    fn cancel(&mut self, wakeup: Wakeup) {
        if let Some(timer) = self.timers.remove(&wakeup) {
            timer.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.abort();
        }
    }
}

/// What the host renders after each processed event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub board: Board,
    pub highlight: Highlight,
    /// Outcome of the most recent drop or cancel
    #[serde(skip)]
    pub last_outcome: Option<DropOutcome>,
    /// Number of events processed so far
    pub revision: u64,
}

impl Snapshot {
    fn of<S: Scheduler>(session: &BoardSession<S>, revision: u64) -> Self {
        Self {
            board: session.board().clone(),
            highlight: session.highlight(),
            last_outcome: None,
            revision,
        }
    }
}

/// Host side of a running session
#[derive(Debug)]
pub struct SessionHandle {
    gestures: mpsc::Sender<Gesture>,
    snapshots: watch::Receiver<Snapshot>,
    task: Option<JoinHandle<Board>>,
}

impl SessionHandle {
    /// Queue a gesture for the session task
    pub async fn send(&self, gesture: Gesture) -> Result<()> {
        self.gestures
            .send(gesture)
            .await
            .map_err(|_| BoardError::SessionClosed)
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that sees every snapshot published from now on
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Wait until a snapshot with at least `revision` events is published
    pub async fn wait_for_revision(&mut self, revision: u64) -> Result<Snapshot> {
        let snapshot = self
            .snapshots
            .wait_for(|s| s.revision >= revision)
            .await
            .map_err(|_| BoardError::SessionClosed)?;
        Ok(snapshot.clone())
    }

    /// Close the gesture channel, let the task drain it and return the board
    pub async fn shutdown(mut self) -> Result<Board> {
        let task = self.task.take();
        drop(self);
        match task {
            Some(task) => task.await.map_err(|_| BoardError::SessionClosed),
            None => Err(BoardError::SessionClosed),
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            // Dropping the session cancels its timers.
            task.abort();
        }
    }
}

/// Start a session task on the current tokio runtime
pub fn spawn_session(seed: Board, config: BoardConfig) -> Result<SessionHandle> {
    let (fired_tx, fired_rx) = mpsc::unbounded_channel();
    let session = BoardSession::new(seed, config, TokioScheduler::new(fired_tx))?;
    let (gesture_tx, gesture_rx) = mpsc::channel(GESTURE_BUFFER);
    let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::of(&session, 0));

    let task = tokio::spawn(run(session, gesture_rx, fired_rx, snapshot_tx));
    debug!("board session started");

    Ok(SessionHandle {
        gestures: gesture_tx,
        snapshots: snapshot_rx,
        task: Some(task),
    })
}

async fn run(
    mut session: BoardSession<TokioScheduler>,
    mut gestures: mpsc::Receiver<Gesture>,
    mut fired: mpsc::UnboundedReceiver<Wakeup>,
    snapshots: watch::Sender<Snapshot>,
) -> Board {
    let mut revision = 0;
    loop {
        let outcome = tokio::select! {
            biased;
            gesture = gestures.recv() => match gesture {
                Some(gesture) => session.apply(&gesture),
                None => break,
            },
            Some(wakeup) = fired.recv() => {
                trace!(?wakeup, "timer fired");
                session.wake(wakeup);
                None
            }
        };

        revision += 1;
        let mut snapshot = Snapshot::of(&session, revision);
        snapshot.last_outcome = outcome;
        snapshots.send_replace(snapshot);
    }

    debug!(revision, "board session shutting down");
    session.into_board()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Committed;
    use crate::types::{Card, Column, Item};

    fn seed() -> Board {
        Board::new([Column::new("todo", "To Do")
            .with_item(Card::new("c1", "A", "one"))
            .with_item(Card::new("c2", "B", "two"))])
    }

    #[tokio::test(start_paused = true)]
    async fn test_hold_past_delay_stacks() {
        let mut handle = spawn_session(seed(), BoardConfig::default()).unwrap();
        handle.send(Gesture::DragStart { id: "c1".into() }).await.unwrap();
        handle
            .send(Gesture::DragOver {
                over: Some("c2".into()),
            })
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(700)).await;

        let armed = handle.wait_for_revision(2).await.unwrap();
        assert!(armed.highlight.stacking_armed);

        handle
            .send(Gesture::DragEnd {
                over: Some("c2".into()),
            })
            .await
            .unwrap();
        let board = handle.shutdown().await.unwrap();
        let items = &board.column_at(0).unwrap().items;
        assert_eq!(items.len(), 1);
        let Item::Stack(stack) = &items[0] else {
            panic!("expected a stack, got {:?}", items[0]);
        };
        assert_eq!(stack.cards()[0].id, "c2");
        assert_eq!(stack.cards()[1].id, "c1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_drop_reorders() {
        let mut handle = spawn_session(seed(), BoardConfig::default()).unwrap();
        handle.send(Gesture::DragStart { id: "c1".into() }).await.unwrap();
        handle
            .send(Gesture::DragOver {
                over: Some("c2".into()),
            })
            .await
            .unwrap();
        handle
            .send(Gesture::DragEnd {
                over: Some("c2".into()),
            })
            .await
            .unwrap();

        let done = handle.wait_for_revision(3).await.unwrap();
        assert!(matches!(
            done.last_outcome,
            Some(DropOutcome::Committed(Committed::Reordered { .. }))
        ));
        let ids: Vec<_> = done
            .board
            .column_at(0)
            .unwrap()
            .items
            .iter()
            .map(|i| i.id().to_string())
            .collect();
        assert_eq!(ids, ["c2", "c1"]);
        assert!(!done.highlight.stacking_armed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_after_shutdown_fails() {
        let handle = spawn_session(seed(), BoardConfig::default()).unwrap();
        let snapshots = handle.subscribe();
        let board = handle.shutdown().await.unwrap();
        assert_eq!(board, seed());
        assert!(snapshots.has_changed().is_err());
    }
}
