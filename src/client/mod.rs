// Remote drive client boundary.
//
// The engine consumes drives exclusively through the `RemoteStore` trait;
// `DriveClient` is the production implementation against the Google Drive v3
// REST API. Tokens are constructor inputs - the OAuth flow that produces them
// lives outside this crate.

pub mod drive;
pub mod errors;
pub mod store;
pub mod types;

pub use drive::DriveClient;
pub use errors::{ClientError, ClientResult};
pub use store::RemoteStore;
pub use types::{ItemDescriptor, ItemKind, MetadataPatch};
