//! Migration progress events and event handling.
//!
//! The engine emits immutable events as items conclude so that observers
//! (a UI, a log sink) can follow a run live instead of waiting for the final
//! report. Handlers must tolerate concurrent completions within a window.

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use super::outcome::{OutcomeEntry, OutcomeStatus};
use super::progress::ProgressSnapshot;

/// Events that occur during a migration run.
#[derive(Debug, Clone)]
pub enum MigrationEvent {
    Started { total: u32 },
    ItemCompleted { entry: OutcomeEntry, snapshot: ProgressSnapshot },
    Completed { snapshot: ProgressSnapshot, cancelled: bool },
}

/// Observer of migration events.
pub trait MigrationEventHandler: Send + Sync {
    fn handle_event(&self, event: MigrationEvent);
}

/// Discards all events; used when the caller only wants the final report.
pub struct NoopEventHandler;

impl MigrationEventHandler for NoopEventHandler {
    fn handle_event(&self, _event: MigrationEvent) {}
}

/// Forwards events to multiple handlers.
#[derive(Default)]
pub struct CompositeEventHandler {
    handlers: Vec<Box<dyn MigrationEventHandler>>,
}

impl CompositeEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_handler<H: MigrationEventHandler + 'static>(&mut self, handler: H) {
        self.handlers.push(Box::new(handler));
    }
}

impl MigrationEventHandler for CompositeEventHandler {
    fn handle_event(&self, event: MigrationEvent) {
        for handler in &self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

/// Tracing-based event handler.
pub struct LoggingEventHandler;

impl MigrationEventHandler for LoggingEventHandler {
    fn handle_event(&self, event: MigrationEvent) {
        match event {
            MigrationEvent::Started { total } => {
                info!(total, "Migration started");
            }
            MigrationEvent::ItemCompleted { entry, snapshot } => match entry.status {
                OutcomeStatus::Success => {
                    info!(
                        source_id = %entry.source_id,
                        dest_id = %entry.dest_id,
                        processed = snapshot.processed,
                        total = snapshot.total,
                        "Item migrated"
                    );
                }
                OutcomeStatus::Skipped => {
                    info!(
                        source_id = %entry.source_id,
                        existing_id = %entry.dest_id,
                        "Item already at destination, skipped"
                    );
                }
                OutcomeStatus::Failed => {
                    warn!(
                        source_id = %entry.source_id,
                        error = entry.error.as_deref().unwrap_or(""),
                        "Item failed"
                    );
                }
            },
            MigrationEvent::Completed { snapshot, cancelled } => {
                if cancelled {
                    warn!(
                        processed = snapshot.processed,
                        total = snapshot.total,
                        "Migration cancelled before completion"
                    );
                } else if snapshot.failed > 0 {
                    error!(
                        succeeded = snapshot.succeeded,
                        failed = snapshot.failed,
                        skipped = snapshot.skipped,
                        "Migration completed with failures"
                    );
                } else {
                    info!(
                        succeeded = snapshot.succeeded,
                        skipped = snapshot.skipped,
                        "Migration completed"
                    );
                }
            }
        }
    }
}

/// Streams events over an unbounded channel; the receiving end typically
/// feeds a live progress display.
pub struct ChannelEventHandler {
    sender: mpsc::UnboundedSender<MigrationEvent>,
}

impl ChannelEventHandler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MigrationEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl MigrationEventHandler for ChannelEventHandler {
    fn handle_event(&self, event: MigrationEvent) {
        // A dropped receiver just means nobody is watching anymore.
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn channel_handler_streams_events_in_order() {
        let (handler, mut receiver) = ChannelEventHandler::new();
        handler.handle_event(MigrationEvent::Started { total: 1 });
        handler.handle_event(MigrationEvent::Completed {
            snapshot: ProgressSnapshot { total: 1, ..Default::default() },
            cancelled: false,
        });

        assert!(matches!(receiver.recv().await, Some(MigrationEvent::Started { total: 1 })));
        assert!(matches!(receiver.recv().await, Some(MigrationEvent::Completed { .. })));
    }

    #[test]
    fn channel_handler_tolerates_dropped_receiver() {
        let (handler, receiver) = ChannelEventHandler::new();
        drop(receiver);
        handler.handle_event(MigrationEvent::Started { total: 0 });
    }
}
