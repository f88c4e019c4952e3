use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use super::{BranchTip, DirectoryEntry, EntryKind, HostingApi, ObjectStat, StoredObject, TreeEntry};
use crate::error::{FileDockError, Result};
use crate::model::{ObjectId, Revision};
use crate::session::Session;

/// Which `HostingApi` method was invoked; recorded in call order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostCall {
    ReadObject,
    StatObject,
    ListDirectory,
    WriteObject,
    DeleteObject,
    CreateBlob,
    BranchTip,
    CreateTree,
    CreateCommit,
    UpdateBranch,
}

impl HostCall {
    fn is_read(self) -> bool {
        matches!(
            self,
            HostCall::ReadObject | HostCall::StatObject | HostCall::ListDirectory | HostCall::BranchTip
        )
    }
}

type Tree = BTreeMap<String, ObjectId>;

struct MemCommit {
    tree: ObjectId,
    parents: Vec<ObjectId>,
    message: String,
}

struct HostState {
    blobs: HashMap<ObjectId, Vec<u8>>,
    trees: HashMap<ObjectId, Tree>,
    commits: HashMap<ObjectId, MemCommit>,
    head: ObjectId,
    commit_seq: u64,
    calls: Vec<HostCall>,
    faults: HashMap<HostCall, String>,
}

/// In-process emulation of a single-branch git host.
///
/// Objects are content-addressed with blake3; the branch starts at an empty
/// root commit. Revision markers are blob ids, so rewriting identical content
/// keeps the marker. Every call is logged and any call kind can be made to
/// fail.
pub struct MemoryHost {
    state: Mutex<HostState>,
}

impl MemoryHost {
    pub fn new() -> Self {
        let empty = Tree::new();
        let tree_id = tree_id(&empty);
        let root = commit_id(&tree_id, &[], "initial", 0);

        let mut trees = HashMap::new();
        trees.insert(tree_id.clone(), empty);
        let mut commits = HashMap::new();
        commits.insert(
            root.clone(),
            MemCommit {
                tree: tree_id,
                parents: Vec::new(),
                message: "initial".to_string(),
            },
        );

        Self {
            state: Mutex::new(HostState {
                blobs: HashMap::new(),
                trees,
                commits,
                head: root,
                commit_seq: 1,
                calls: Vec::new(),
                faults: HashMap::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Stores `content` at `path` directly, bypassing the call log.
    pub fn seed(&self, path: &str, content: &[u8]) {
        let mut st = self.state();
        let blob = st.put_blob(content);
        let mut tree = st.head_tree().clone();
        tree.insert(path.to_string(), blob);
        st.commit_tree(tree, &format!("seed {}", path));
    }

    /// Content currently stored at `path` on the branch head.
    pub fn content(&self, path: &str) -> Option<Vec<u8>> {
        let st = self.state();
        let blob = st.head_tree().get(path)?;
        st.blobs.get(blob).cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        self.state().head_tree().keys().cloned().collect()
    }

    pub fn head(&self) -> ObjectId {
        self.state().head.clone()
    }

    /// Commit messages along the first-parent chain, newest first.
    pub fn history(&self) -> Vec<String> {
        let st = self.state();
        let mut out = Vec::new();
        let mut cursor = Some(st.head.clone());
        while let Some(id) = cursor {
            let Some(c) = st.commits.get(&id) else {
                break;
            };
            out.push(c.message.clone());
            cursor = c.parents.first().cloned();
        }
        out
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Makes every subsequent `call` fail with `message` until cleared.
    pub fn fail_on(&self, call: HostCall, message: &str) {
        self.state().faults.insert(call, message.to_string());
    }

    pub fn blob_count(&self) -> usize {
        self.state().blobs.len()
    }

    pub fn tree_count(&self) -> usize {
        self.state().trees.len()
    }

    pub fn commit_count(&self) -> usize {
        self.state().commits.len()
    }

    fn enter(&self, call: HostCall) -> Result<MutexGuard<'_, HostState>> {
        let mut st = self.state();
        st.calls.push(call);
        if let Some(message) = st.faults.get(&call) {
            let label = format!("{:?}", call);
            return Err(if call.is_read() {
                FileDockError::fetch(label, message.clone())
            } else {
                FileDockError::remote_write(label, message.clone())
            });
        }
        Ok(st)
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostState {
    fn head_tree(&self) -> &Tree {
        let commit = &self.commits[&self.head];
        &self.trees[&commit.tree]
    }

    fn put_blob(&mut self, content: &[u8]) -> ObjectId {
        let id = blob_id(content);
        self.blobs.entry(id.clone()).or_insert_with(|| content.to_vec());
        id
    }

    fn put_tree(&mut self, tree: Tree) -> ObjectId {
        let id = tree_id(&tree);
        self.trees.entry(id.clone()).or_insert(tree);
        id
    }

    fn put_commit(&mut self, tree: ObjectId, parents: Vec<ObjectId>, message: &str) -> ObjectId {
        let id = commit_id(&tree, &parents, message, self.commit_seq);
        self.commit_seq += 1;
        self.commits.insert(
            id.clone(),
            MemCommit {
                tree,
                parents,
                message: message.to_string(),
            },
        );
        id
    }

    fn commit_tree(&mut self, tree: Tree, message: &str) -> ObjectId {
        let tree = self.put_tree(tree);
        let parent = self.head.clone();
        let commit = self.put_commit(tree, vec![parent], message);
        self.head = commit.clone();
        commit
    }

    fn descends_from(&self, commit: &ObjectId, ancestor: &ObjectId) -> bool {
        let mut stack = vec![commit.clone()];
        let mut seen = BTreeSet::new();
        while let Some(id) = stack.pop() {
            if &id == ancestor {
                return true;
            }
            if !seen.insert(id.0.clone()) {
                continue;
            }
            if let Some(c) = self.commits.get(&id) {
                stack.extend(c.parents.iter().cloned());
            }
        }
        false
    }
}

impl HostingApi for MemoryHost {
    fn read_object(&self, _session: Option<&Session>, path: &str) -> Result<Option<StoredObject>> {
        let st = self.enter(HostCall::ReadObject)?;
        let Some(blob) = st.head_tree().get(path) else {
            return Ok(None);
        };
        Ok(Some(StoredObject {
            path: path.to_string(),
            revision: Revision(blob.0.clone()),
            content: st.blobs[blob].clone(),
        }))
    }

    fn stat_object(&self, _session: Option<&Session>, path: &str) -> Result<Option<ObjectStat>> {
        let st = self.enter(HostCall::StatObject)?;
        let Some(blob) = st.head_tree().get(path) else {
            return Ok(None);
        };
        Ok(Some(ObjectStat {
            path: path.to_string(),
            revision: Revision(blob.0.clone()),
            size: st.blobs[blob].len() as u64,
        }))
    }

    fn list_directory(
        &self,
        _session: Option<&Session>,
        path: &str,
    ) -> Result<Vec<DirectoryEntry>> {
        let st = self.enter(HostCall::ListDirectory)?;
        let dir = path.trim_matches('/');
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{}/", dir)
        };

        let mut out = Vec::new();
        let mut subdirs = BTreeSet::new();
        for (full, blob) in st.head_tree() {
            let Some(rest) = full.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((sub, _)) => {
                    if subdirs.insert(sub.to_string()) {
                        out.push(DirectoryEntry {
                            name: sub.to_string(),
                            path: format!("{}{}", prefix, sub),
                            kind: EntryKind::Dir,
                            size: 0,
                        });
                    }
                }
                None => out.push(DirectoryEntry {
                    name: rest.to_string(),
                    path: full.clone(),
                    kind: EntryKind::File,
                    size: st.blobs[blob].len() as u64,
                }),
            }
        }
        Ok(out)
    }

    fn write_object(
        &self,
        _session: &Session,
        path: &str,
        content: &[u8],
        message: &str,
        previous: Option<&Revision>,
    ) -> Result<Revision> {
        let mut st = self.enter(HostCall::WriteObject)?;
        let existing = st.head_tree().get(path).cloned();
        match (existing, previous) {
            (Some(current), Some(prev)) if current.0 != prev.0 => {
                return Err(FileDockError::remote_write(
                    "write object",
                    format!("{} is at {} but expected {}", path, current, prev.as_str()),
                ));
            }
            (Some(_), None) => {
                return Err(FileDockError::remote_write(
                    "write object",
                    "Invalid request.\n\n\"sha\" wasn't supplied.",
                ));
            }
            (None, Some(_)) => {
                return Err(FileDockError::remote_write(
                    "write object",
                    format!("{} does not exist", path),
                ));
            }
            _ => {}
        }

        let blob = st.put_blob(content);
        let mut tree = st.head_tree().clone();
        tree.insert(path.to_string(), blob.clone());
        st.commit_tree(tree, message);
        Ok(Revision(blob.0))
    }

    fn delete_object(
        &self,
        _session: &Session,
        path: &str,
        message: &str,
        revision: &Revision,
    ) -> Result<()> {
        let mut st = self.enter(HostCall::DeleteObject)?;
        let Some(current) = st.head_tree().get(path).cloned() else {
            return Err(FileDockError::NotFound(path.to_string()));
        };
        if current.0 != revision.0 {
            return Err(FileDockError::remote_write(
                "delete object",
                format!("{} is at {} but expected {}", path, current, revision.as_str()),
            ));
        }
        let mut tree = st.head_tree().clone();
        tree.remove(path);
        st.commit_tree(tree, message);
        Ok(())
    }

    fn create_blob(&self, _session: &Session, content: &[u8]) -> Result<ObjectId> {
        let mut st = self.enter(HostCall::CreateBlob)?;
        Ok(st.put_blob(content))
    }

    fn branch_tip(&self, _session: &Session) -> Result<BranchTip> {
        let st = self.enter(HostCall::BranchTip)?;
        let commit = st.head.clone();
        let tree = st.commits[&commit].tree.clone();
        Ok(BranchTip { commit, tree })
    }

    fn create_tree(
        &self,
        _session: &Session,
        base_tree: &ObjectId,
        entries: &[TreeEntry],
    ) -> Result<ObjectId> {
        let mut st = self.enter(HostCall::CreateTree)?;
        let Some(base) = st.trees.get(base_tree).cloned() else {
            return Err(FileDockError::remote_write(
                "create tree",
                format!("base tree {} not found", base_tree),
            ));
        };
        let mut tree = base;
        for e in entries {
            if !st.blobs.contains_key(&e.blob) {
                return Err(FileDockError::remote_write(
                    "create tree",
                    format!("blob {} not found", e.blob),
                ));
            }
            tree.insert(e.path.clone(), e.blob.clone());
        }
        Ok(st.put_tree(tree))
    }

    fn create_commit(
        &self,
        _session: &Session,
        message: &str,
        tree: &ObjectId,
        parents: &[ObjectId],
    ) -> Result<ObjectId> {
        let mut st = self.enter(HostCall::CreateCommit)?;
        if !st.trees.contains_key(tree) {
            return Err(FileDockError::remote_write(
                "create commit",
                format!("tree {} not found", tree),
            ));
        }
        if let Some(missing) = parents.iter().find(|p| !st.commits.contains_key(*p)) {
            return Err(FileDockError::remote_write(
                "create commit",
                format!("parent {} not found", missing),
            ));
        }
        Ok(st.put_commit(tree.clone(), parents.to_vec(), message))
    }

    fn update_branch(&self, _session: &Session, commit: &ObjectId) -> Result<()> {
        let mut st = self.enter(HostCall::UpdateBranch)?;
        if !st.commits.contains_key(commit) {
            return Err(FileDockError::remote_write(
                "update branch",
                format!("commit {} not found", commit),
            ));
        }
        let head = st.head.clone();
        if !st.descends_from(commit, &head) {
            return Err(FileDockError::remote_write(
                "update branch",
                "Update is not a fast forward",
            ));
        }
        st.head = commit.clone();
        Ok(())
    }
}

fn blob_id(content: &[u8]) -> ObjectId {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"blob\0");
    hasher.update(content);
    ObjectId(hasher.finalize().to_hex().to_string())
}

fn tree_id(tree: &Tree) -> ObjectId {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"tree\0");
    for (path, blob) in tree {
        hasher.update(path.as_bytes());
        hasher.update(b"\0");
        hasher.update(blob.as_str().as_bytes());
        hasher.update(b"\n");
    }
    ObjectId(hasher.finalize().to_hex().to_string())
}

fn commit_id(tree: &ObjectId, parents: &[ObjectId], message: &str, seq: u64) -> ObjectId {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"commit\0");
    hasher.update(tree.as_str().as_bytes());
    for p in parents {
        hasher.update(b"\nparent ");
        hasher.update(p.as_str().as_bytes());
    }
    hasher.update(b"\n");
    hasher.update(&seq.to_le_bytes());
    hasher.update(message.as_bytes());
    ObjectId(hasher.finalize().to_hex().to_string())
}

#[cfg(test)]
#[path = "../tests/hosting/memory_tests.rs"]
mod tests;
