use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Drive MIME type discriminating folders from everything else.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Kind of a selectable drive entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    File,
    Folder,
}

/// Immutable snapshot of one source-side file or folder, as listed from the
/// remote store. The engine only ever reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDescriptor {
    pub id: String,
    pub kind: ItemKind,
    pub name: String,
    pub size: Option<u64>,
    pub modified_time: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl ItemDescriptor {
    pub fn file(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ItemKind::File,
            name: name.into(),
            size: None,
            modified_time: None,
            description: None,
            properties: HashMap::new(),
        }
    }

    pub fn folder(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ItemKind::Folder,
            name: name.into(),
            size: None,
            modified_time: None,
            description: None,
            properties: HashMap::new(),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }
}

/// Metadata overrides attached to a copy or create operation. For copies the
/// patch rides along in the copy request itself so the new object never
/// exists without its provenance tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataPatch {
    pub description: Option<String>,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl MetadataPatch {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_kind_helpers() {
        assert!(ItemDescriptor::folder("d1", "Docs").is_folder());
        assert!(!ItemDescriptor::file("f1", "a.txt").is_folder());
    }

    #[test]
    fn patch_builder_sets_tag() {
        let patch = MetadataPatch::new("note").with_property("original_id", "f1");
        assert_eq!(patch.description.as_deref(), Some("note"));
        assert_eq!(patch.properties.get("original_id").map(String::as_str), Some("f1"));
    }
}
