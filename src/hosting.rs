//! Capability surface the catalog and commit paths need from a hosting
//! service: path-addressed content with revision markers, directory listing,
//! and low-level blob/tree/commit/ref primitives.

use crate::error::Result;
use crate::model::{ObjectId, Revision};
use crate::session::Session;

mod memory;

pub use self::memory::{HostCall, MemoryHost};

/// Git file mode for a regular, non-executable file.
pub const FILE_MODE: &str = "100644";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    pub path: String,
    pub revision: Revision,
    pub content: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectStat {
    pub path: String,
    pub revision: Revision,
    pub size: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Other,
}

impl EntryKind {
    pub fn from_wire(kind: &str) -> Self {
        match kind {
            "file" => EntryKind::File,
            "dir" => EntryKind::Dir,
            _ => EntryKind::Other,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
    pub kind: EntryKind,
    pub size: u64,
}

/// Head of the configured branch: its commit and that commit's root tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchTip {
    pub commit: ObjectId,
    pub tree: ObjectId,
}

/// One blob placed into a new tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: String,
    pub mode: String,
    pub blob: ObjectId,
}

impl TreeEntry {
    pub fn file(path: impl Into<String>, blob: ObjectId) -> Self {
        Self {
            path: path.into(),
            mode: FILE_MODE.to_string(),
            blob,
        }
    }
}

/// Reads accept an optional session (anonymous reads are allowed); writes
/// require one. Calls are blocking and independent; the trait holds no
/// cross-call state beyond what the host itself stores.
pub trait HostingApi {
    /// `Ok(None)` when nothing is stored at `path`.
    fn read_object(&self, session: Option<&Session>, path: &str) -> Result<Option<StoredObject>>;

    /// Like `read_object` without transferring the content.
    fn stat_object(&self, session: Option<&Session>, path: &str) -> Result<Option<ObjectStat>>;

    /// Entries directly under `path`; an absent directory lists as empty.
    fn list_directory(&self, session: Option<&Session>, path: &str)
    -> Result<Vec<DirectoryEntry>>;

    /// Creates or replaces the object at `path` in a single commit. When
    /// `previous` is given the host rejects the write unless it still matches.
    fn write_object(
        &self,
        session: &Session,
        path: &str,
        content: &[u8],
        message: &str,
        previous: Option<&Revision>,
    ) -> Result<Revision>;

    fn delete_object(
        &self,
        session: &Session,
        path: &str,
        message: &str,
        revision: &Revision,
    ) -> Result<()>;

    fn create_blob(&self, session: &Session, content: &[u8]) -> Result<ObjectId>;

    fn branch_tip(&self, session: &Session) -> Result<BranchTip>;

    /// New tree equal to `base_tree` plus `entries`.
    fn create_tree(
        &self,
        session: &Session,
        base_tree: &ObjectId,
        entries: &[TreeEntry],
    ) -> Result<ObjectId>;

    fn create_commit(
        &self,
        session: &Session,
        message: &str,
        tree: &ObjectId,
        parents: &[ObjectId],
    ) -> Result<ObjectId>;

    /// Moves the branch to `commit`. Fast-forward only.
    fn update_branch(&self, session: &Session, commit: &ObjectId) -> Result<()>;
}
