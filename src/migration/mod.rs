pub mod engine;
pub mod events;
pub mod outcome;
pub mod progress;
pub mod verify;


pub use engine::{MigrationEngine, MigrationReport};
pub use events::{
    ChannelEventHandler, CompositeEventHandler, LoggingEventHandler, MigrationEvent,
    MigrationEventHandler,
};
pub use outcome::{OutcomeEntry, OutcomeStatus};
pub use progress::{ProgressSnapshot, ProgressTracker};
pub use verify::verify_sync;
