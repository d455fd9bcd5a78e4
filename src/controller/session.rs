//! Async session runtime
//!
//! Runs a controller on its own task. UI events arrive over an mpsc
//! channel; snapshots leave through a watch channel, which only ever
//! holds the latest one, so a slow reader skips stale snapshots instead
//! of replaying them. Events that queue up while a recomputation runs
//! are drained and applied together before the next pass.

use super::{FilterEvent, ReactivityController, Snapshot};
use crate::error::{Result, WildlifeError};

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::debug;

const EVENT_BUFFER: usize = 64;

#[derive(Debug)]
enum Message {
    Event(FilterEvent),
    /// Acknowledged once every earlier event has been applied
    Flush(oneshot::Sender<()>),
}

/// Client side of a running session
#[derive(Debug)]
pub struct SessionHandle {
    events: mpsc::Sender<Message>,
    snapshots: watch::Receiver<Arc<Snapshot>>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    /// Compute the initial snapshot and start the session task
    pub fn spawn(mut controller: ReactivityController) -> Self {
        let initial = controller.snapshot();
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);

        let task = tokio::spawn(run_session(controller, event_rx, snapshot_tx));

        Self {
            events: event_tx,
            snapshots: snapshot_rx,
            task,
        }
    }

    pub async fn send(&self, event: FilterEvent) -> Result<()> {
        self.events
            .send(Message::Event(event))
            .await
            .map_err(|_| WildlifeError::SessionClosed)
    }

    /// Most recent snapshot without waiting
    pub fn latest(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshots.borrow())
    }

    /// Wait for the next snapshot after the one last seen
    pub async fn changed(&mut self) -> Result<Arc<Snapshot>> {
        self.snapshots
            .changed()
            .await
            .map_err(|_| WildlifeError::SessionClosed)?;
        Ok(Arc::clone(&self.snapshots.borrow_and_update()))
    }

    /// Send an event and wait for the snapshot reflecting it.
    ///
    /// Returns the current snapshot unchanged when the event does not
    /// alter any input.
    pub async fn update(&mut self, event: FilterEvent) -> Result<Arc<Snapshot>> {
        self.send(event).await?;
        self.flush().await
    }

    /// Wait until every event sent so far has been applied
    pub async fn flush(&mut self) -> Result<Arc<Snapshot>> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.events
            .send(Message::Flush(ack_tx))
            .await
            .map_err(|_| WildlifeError::SessionClosed)?;
        ack_rx.await.map_err(|_| WildlifeError::SessionClosed)?;
        Ok(Arc::clone(&self.snapshots.borrow_and_update()))
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.snapshots.clone()
    }

    /// Stop the session task without applying queued events
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Stop accepting events and wait for the session task to finish
    pub async fn shutdown(self) -> Result<()> {
        drop(self.events);
        self.task.await.map_err(|e| WildlifeError::SessionFailed {
            reason: e.to_string(),
        })
    }
}

async fn run_session(
    mut controller: ReactivityController,
    mut events: mpsc::Receiver<Message>,
    snapshots: watch::Sender<Arc<Snapshot>>,
) {
    while let Some(first) = events.recv().await {
        let mut batch = vec![first];
        while let Ok(next) = events.try_recv() {
            batch.push(next);
        }

        let mut acks = Vec::new();
        let mut changes = Vec::with_capacity(batch.len());
        for message in batch {
            match message {
                Message::Event(event) => changes.push(event),
                Message::Flush(ack) => acks.push(ack),
            }
        }

        debug!("Applying {} coalesced events", changes.len());
        if let Some(snapshot) = controller.dispatch(changes) {
            snapshots.send_replace(snapshot);
        }

        for ack in acks {
            let _ = ack.send(());
        }
    }

    debug!(
        "Session closed after {} recomputations",
        controller.recomputations()
    );
}
