//! Migration engine: windowed, failure-isolated processing of a selection.

use std::sync::Arc;

use chrono::Utc;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::client::{ClientResult, ItemDescriptor, MetadataPatch, RemoteStore};
use crate::config::MigrationConfig;
use crate::errors::{MigrationError, MigrationResult};

use super::events::{MigrationEvent, MigrationEventHandler, NoopEventHandler};
use super::outcome::OutcomeEntry;
use super::progress::{ProgressSnapshot, ProgressTracker};

/// Final result of one run: the aggregate counts and the full outcome log.
/// A run that saw item failures is still a completed run; the caller decides
/// how to present partial failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationReport {
    pub snapshot: ProgressSnapshot,
    pub log: Vec<OutcomeEntry>,
    pub cancelled: bool,
}

/// Orchestrates copying a selection of items from a source store into one
/// destination folder. Items are processed in consecutive windows of
/// `window_size`; a window's items run concurrently and the whole window is
/// awaited before the next starts, bounding in-flight remote calls.
pub struct MigrationEngine {
    source: Arc<dyn RemoteStore>,
    dest: Arc<dyn RemoteStore>,
    config: MigrationConfig,
    events: Arc<dyn MigrationEventHandler>,
}

impl MigrationEngine {
    pub fn new(source: Arc<dyn RemoteStore>, dest: Arc<dyn RemoteStore>) -> Self {
        Self {
            source,
            dest,
            config: MigrationConfig::default(),
            events: Arc::new(NoopEventHandler),
        }
    }

    pub fn with_config(mut self, config: MigrationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_event_handler<H: MigrationEventHandler + 'static>(mut self, handler: H) -> Self {
        self.events = Arc::new(handler);
        self
    }

    /// Lists direct children of a source folder, for assembling a selection.
    /// The engine never recurses into folder contents on its own.
    pub async fn list_source(&self, folder_id: &str) -> ClientResult<Vec<ItemDescriptor>> {
        self.source.list_children(folder_id).await
    }

    /// Runs the migration. Setup problems fail the call before any item is
    /// touched; per-item remote failures are recorded in the log and never
    /// abort siblings or the batch. Cancellation is honored at window
    /// boundaries: in-flight items finish, further dispatch stops, and the
    /// partial report is returned.
    #[instrument(skip(self, selection, cancel), fields(items = selection.len()))]
    pub async fn migrate(
        &self,
        selection: Vec<ItemDescriptor>,
        dest_folder_id: &str,
        cancel: &CancellationToken,
    ) -> MigrationResult<MigrationReport> {
        self.config
            .validate()
            .map_err(MigrationError::setup)?;
        if dest_folder_id.is_empty() {
            return Err(MigrationError::setup("destination folder id must not be empty"));
        }

        let total = selection.len() as u32;
        let tracker = ProgressTracker::new(total);
        self.events.handle_event(MigrationEvent::Started { total });
        info!(total, dest_folder_id, window_size = self.config.window_size, "Starting migration run");

        let mut cancelled = false;
        for window in selection.chunks(self.config.window_size) {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            join_all(
                window
                    .iter()
                    .map(|item| self.process_item(item, dest_folder_id, &tracker)),
            )
            .await;
        }

        let snapshot = tracker.snapshot();
        self.events.handle_event(MigrationEvent::Completed { snapshot, cancelled });
        info!(
            succeeded = snapshot.succeeded,
            failed = snapshot.failed,
            skipped = snapshot.skipped,
            cancelled,
            "Migration run finished"
        );

        Ok(MigrationReport {
            snapshot,
            log: tracker.into_log().await,
            cancelled,
        })
    }

    /// Processes one item to a terminal outcome. Every error path ends in a
    /// recorded entry; this future itself never fails.
    async fn process_item(
        &self,
        item: &ItemDescriptor,
        dest_folder_id: &str,
        tracker: &ProgressTracker,
    ) {
        let entry = match self.migrate_item(item, dest_folder_id).await {
            Ok(entry) => entry,
            Err(error) => OutcomeEntry::failed(&item.id, &item.name, error.to_string()),
        };
        let snapshot = tracker.record(entry.clone()).await;
        self.events
            .handle_event(MigrationEvent::ItemCompleted { entry, snapshot });
    }

    /// Duplicate check, then the folder or file branch. The duplicate check
    /// runs first so a re-run never creates a second copy of an item that is
    /// already at the destination.
    async fn migrate_item(
        &self,
        item: &ItemDescriptor,
        dest_folder_id: &str,
    ) -> ClientResult<OutcomeEntry> {
        if let Some(existing_id) = self
            .dest
            .find_by_source_id(dest_folder_id, &item.id)
            .await?
        {
            return Ok(OutcomeEntry::skipped(&item.id, &item.name, existing_id, &item.name));
        }

        if item.is_folder() {
            let new_folder_id = self.dest.create_folder(&item.name, dest_folder_id).await?;
            self.dest
                .update_metadata(&new_folder_id, &self.provenance_patch(item))
                .await?;
            Ok(OutcomeEntry::success(&item.id, &item.name, new_folder_id, &item.name))
        } else {
            // Tag rides along in the copy request so the new object never
            // exists without its provenance property.
            let copied = self
                .dest
                .copy_item(&item.id, dest_folder_id, &self.provenance_patch(item))
                .await?;
            Ok(OutcomeEntry::success(&item.id, &item.name, copied.id, copied.name))
        }
    }

    fn provenance_patch(&self, item: &ItemDescriptor) -> MetadataPatch {
        let now = Utc::now().to_rfc3339();
        let note = if item.is_folder() {
            format!("[MIGRATION LOG] Original ID: {} | Migrated at: {}", item.id, now)
        } else {
            let size = item
                .size
                .map(|bytes| bytes.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            format!(
                "[MIGRATION LOG] Original ID: {} | Size: {} | Migrated: {}",
                item.id, size, now
            )
        };
        MetadataPatch::new(note).with_property(&self.config.provenance_key, &item.id)
    }
}
