use serde::{Deserialize, Serialize};

use super::kind::FileKind;

/// One catalog entry.
///
/// Serialized with the manifest's key names (`file`, `type`, `size`,
/// `uploadDate`). Keys this client does not know about are carried in
/// `extra` so a full manifest rewrite keeps them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(default)]
    pub title: String,

    #[serde(rename = "file")]
    pub path: String,

    #[serde(rename = "type", default)]
    pub extension: String,

    #[serde(rename = "size", default)]
    pub size_label: String,

    #[serde(rename = "uploadDate", default)]
    pub uploaded_at: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FileRecord {
    pub fn new(
        title: impl Into<String>,
        path: impl Into<String>,
        extension: impl Into<String>,
        size_label: impl Into<String>,
        uploaded_at: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            extension: extension.into(),
            size_label: size_label.into(),
            uploaded_at: uploaded_at.into(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn kind(&self) -> FileKind {
        if self.extension.is_empty() {
            FileKind::from_path(&self.path)
        } else {
            FileKind::from_extension(&self.extension)
        }
    }
}

/// The manifest document: an ordered array of records, insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub entries: Vec<FileRecord>,
}

impl Manifest {
    pub fn parse(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Pretty-printed body with two-space indentation.
    pub fn to_body(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }

    pub fn push(&mut self, record: FileRecord) {
        self.entries.push(record);
    }

    /// Drops every entry whose path equals `path`. Returns how many were
    /// removed.
    pub fn remove_path(&mut self, path: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|r| r.path != path);
        before - self.entries.len()
    }

    pub fn find(&self, path: &str) -> Option<&FileRecord> {
        self.entries.iter().find(|r| r.path == path)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
