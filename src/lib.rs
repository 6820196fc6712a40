//! Drive-to-drive migration engine.
//!
//! Copies a user-selected set of files and folders from one cloud drive
//! account into a folder on another, tagging every copy with the originating
//! item's id so that re-runs skip already-migrated items and a later
//! verification pass can re-derive sync state from the destination itself.

pub mod client;
pub mod config;
pub mod errors;
pub mod migration;

pub use client::{ClientError, ClientResult, DriveClient, ItemDescriptor, ItemKind, MetadataPatch, RemoteStore};
pub use config::MigrationConfig;
pub use errors::{MigrationError, MigrationResult};
pub use migration::{
    MigrationEngine, MigrationEvent, MigrationEventHandler, MigrationReport, OutcomeEntry,
    OutcomeStatus, ProgressSnapshot, verify_sync,
};
