use async_trait::async_trait;

use super::errors::ClientResult;
use super::types::{ItemDescriptor, MetadataPatch};

/// Operations the engine needs from a remote object store. `DriveClient` is
/// the production implementation; tests substitute an in-memory double.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// List the direct children of a folder (no recursion).
    async fn list_children(&self, folder_id: &str) -> ClientResult<Vec<ItemDescriptor>>;

    /// Fetch a single item's descriptor.
    async fn get_item(&self, item_id: &str) -> ClientResult<ItemDescriptor>;

    /// Create an empty folder under `parent_id`, returning the new folder id.
    async fn create_folder(&self, name: &str, parent_id: &str) -> ClientResult<String>;

    /// Server-side copy of `item_id` into `dest_parent_id`, applying `patch`
    /// as part of the copy request itself.
    async fn copy_item(
        &self,
        item_id: &str,
        dest_parent_id: &str,
        patch: &MetadataPatch,
    ) -> ClientResult<ItemDescriptor>;

    /// Patch description/properties of an existing item.
    async fn update_metadata(&self, item_id: &str, patch: &MetadataPatch) -> ClientResult<()>;

    /// Look up a child of `parent_id` whose provenance property equals
    /// `source_id`. Returns the matching object's id, if any.
    async fn find_by_source_id(
        &self,
        parent_id: &str,
        source_id: &str,
    ) -> ClientResult<Option<String>>;
}
