use std::collections::HashMap;

use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::config::DEFAULT_PROVENANCE_KEY;

use super::errors::{ClientError, ClientResult};
use super::store::RemoteStore;
use super::types::{ItemDescriptor, ItemKind, MetadataPatch, FOLDER_MIME_TYPE};
use async_trait::async_trait;

const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
const FILE_FIELDS: &str = "id,name,mimeType,size,modifiedTime,description,properties";

/// Google Drive v3 client bound to one account's access token.
#[derive(Clone)]
pub struct DriveClient {
    http_client: Client,
    base_url: String,
    token: String,
    provenance_key: String,
}

/// Wire shape of a Drive file resource. Drive reports `size` as a decimal
/// string, not a number.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    name: String,
    mime_type: Option<String>,
    size: Option<String>,
    modified_time: Option<String>,
    description: Option<String>,
    #[serde(default)]
    properties: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveApiErrorBody {
    error: Option<DriveApiError>,
}

#[derive(Debug, Deserialize)]
struct DriveApiError {
    message: Option<String>,
}

impl From<DriveFile> for ItemDescriptor {
    fn from(file: DriveFile) -> Self {
        let kind = match file.mime_type.as_deref() {
            Some(FOLDER_MIME_TYPE) => ItemKind::Folder,
            _ => ItemKind::File,
        };
        ItemDescriptor {
            id: file.id,
            kind,
            name: file.name,
            size: file.size.and_then(|s| s.parse().ok()),
            modified_time: file.modified_time,
            description: file.description,
            properties: file.properties,
        }
    }
}

impl DriveClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DRIVE_API_BASE)
    }

    /// Point the client at a non-default endpoint (local API emulators).
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::builder()
                .user_agent("drive-migrator/0.1")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            token: token.into(),
            provenance_key: DEFAULT_PROVENANCE_KEY.to_string(),
        }
    }

    pub fn with_provenance_key(mut self, key: impl Into<String>) -> Self {
        self.provenance_key = key.into();
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http_client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
    }

    /// Maps non-2xx responses to `ClientError`, surfacing the Drive error
    /// body's message when one is present.
    async fn check(&self, response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<DriveApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .and_then(|error| error.message)
            .unwrap_or_else(|| "Drive API error".to_string());

        warn!(status = status.as_u16(), %message, "Drive API call rejected");

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized { message });
        }
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn patch_body(patch: &MetadataPatch) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        if let Some(description) = &patch.description {
            body.insert("description".to_string(), json!(description));
        }
        if !patch.properties.is_empty() {
            body.insert("properties".to_string(), json!(patch.properties));
        }
        serde_json::Value::Object(body)
    }
}

#[async_trait]
impl RemoteStore for DriveClient {
    #[instrument(skip(self), err)]
    async fn list_children(&self, folder_id: &str) -> ClientResult<Vec<ItemDescriptor>> {
        let q = format!("'{}' in parents and trashed = false", folder_id);
        let fields = format!("files({})", FILE_FIELDS);
        let response = self
            .request(Method::GET, "/files")
            .query(&[("q", q.as_str()), ("fields", fields.as_str())])
            .send()
            .await?;
        let list: DriveFileList = self.check(response).await?.json().await?;
        debug!(folder_id, count = list.files.len(), "Listed folder children");
        Ok(list.files.into_iter().map(ItemDescriptor::from).collect())
    }

    #[instrument(skip(self), err)]
    async fn get_item(&self, item_id: &str) -> ClientResult<ItemDescriptor> {
        let response = self
            .request(Method::GET, &format!("/files/{}", item_id))
            .query(&[("fields", FILE_FIELDS)])
            .send()
            .await?;
        let file: DriveFile = self.check(response).await?.json().await?;
        Ok(file.into())
    }

    #[instrument(skip(self), err)]
    async fn create_folder(&self, name: &str, parent_id: &str) -> ClientResult<String> {
        let body = json!({
            "name": name,
            "mimeType": FOLDER_MIME_TYPE,
            "parents": [parent_id],
        });
        let response = self
            .request(Method::POST, "/files")
            .json(&body)
            .send()
            .await?;
        let file: DriveFile = self.check(response).await?.json().await?;
        debug!(name, new_id = %file.id, "Created destination folder");
        Ok(file.id)
    }

    #[instrument(skip(self, patch), err)]
    async fn copy_item(
        &self,
        item_id: &str,
        dest_parent_id: &str,
        patch: &MetadataPatch,
    ) -> ClientResult<ItemDescriptor> {
        let mut body = Self::patch_body(patch);
        body.as_object_mut()
            .expect("patch body is always an object")
            .insert("parents".to_string(), json!([dest_parent_id]));
        let response = self
            .request(Method::POST, &format!("/files/{}/copy", item_id))
            .query(&[("fields", FILE_FIELDS)])
            .json(&body)
            .send()
            .await?;
        let file: DriveFile = self.check(response).await?.json().await?;
        debug!(item_id, new_id = %file.id, "Copied item with metadata");
        Ok(file.into())
    }

    #[instrument(skip(self, patch), err)]
    async fn update_metadata(&self, item_id: &str, patch: &MetadataPatch) -> ClientResult<()> {
        let response = self
            .request(Method::PATCH, &format!("/files/{}", item_id))
            .json(&Self::patch_body(patch))
            .send()
            .await?;
        self.check(response).await?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn find_by_source_id(
        &self,
        parent_id: &str,
        source_id: &str,
    ) -> ClientResult<Option<String>> {
        let q = format!(
            "'{}' in parents and properties has {{ key='{}' and value='{}' }} and trashed = false",
            parent_id, self.provenance_key, source_id
        );
        let response = self
            .request(Method::GET, "/files")
            .query(&[("q", q.as_str()), ("fields", "files(id)")])
            .send()
            .await?;
        let list: DriveFileList = self.check(response).await?.json().await?;
        Ok(list.files.into_iter().next().map(|file| file.id))
    }
}
