use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::{FileDockError, Result};
use crate::hosting::{
    BranchTip, DirectoryEntry, EntryKind, HostingApi, ObjectStat, StoredObject, TreeEntry,
};
use crate::model::{HostConfig, ObjectId, Revision};
use crate::session::Session;

mod contents;
mod git_data;
mod http_client;
mod types;

use self::types::*;

/// `HostingApi` over the GitHub REST contents and git-data endpoints.
pub struct RemoteClient {
    host: HostConfig,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(host: HostConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("filedock/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FileDockError::fetch("http client", e.to_string()))?;
        Ok(Self { host, client })
    }
}

impl HostingApi for RemoteClient {
    fn read_object(&self, session: Option<&Session>, path: &str) -> Result<Option<StoredObject>> {
        let Some(item) = self.get_contents_file(session, path)? else {
            return Ok(None);
        };
        let content = decode_content(&item)?;
        Ok(Some(StoredObject {
            path: item.path,
            revision: Revision(item.sha),
            content,
        }))
    }

    fn stat_object(&self, session: Option<&Session>, path: &str) -> Result<Option<ObjectStat>> {
        Ok(self
            .get_contents_file(session, path)?
            .map(|item| ObjectStat {
                path: item.path,
                revision: Revision(item.sha),
                size: item.size,
            }))
    }

    fn list_directory(
        &self,
        session: Option<&Session>,
        path: &str,
    ) -> Result<Vec<DirectoryEntry>> {
        Ok(self
            .get_contents_dir(session, path)?
            .into_iter()
            .map(|item| DirectoryEntry {
                kind: EntryKind::from_wire(&item.kind),
                name: item.name,
                path: item.path,
                size: item.size,
            })
            .collect())
    }

    fn write_object(
        &self,
        session: &Session,
        path: &str,
        content: &[u8],
        message: &str,
        previous: Option<&Revision>,
    ) -> Result<Revision> {
        let body = PutContentsRequest {
            message: message.to_string(),
            content: BASE64.encode(content),
            sha: previous.map(|r| r.0.clone()),
            branch: self.host.branch.clone(),
        };
        let out = self.put_contents(session, path, &body)?;
        let sha = out
            .content
            .map(|c| c.sha)
            .ok_or_else(|| FileDockError::remote_write("write object", "response lacks content"))?;
        Ok(Revision(sha))
    }

    fn delete_object(
        &self,
        session: &Session,
        path: &str,
        message: &str,
        revision: &Revision,
    ) -> Result<()> {
        let body = DeleteContentsRequest {
            message: message.to_string(),
            sha: revision.0.clone(),
            branch: self.host.branch.clone(),
        };
        self.delete_contents(session, path, &body)
    }

    fn create_blob(&self, session: &Session, content: &[u8]) -> Result<ObjectId> {
        let body = CreateBlobRequest {
            content: BASE64.encode(content),
            encoding: "base64".to_string(),
        };
        Ok(ObjectId(self.post_blob(session, &body)?.sha))
    }

    fn branch_tip(&self, session: &Session) -> Result<BranchTip> {
        let commit = self.get_branch_ref(session)?.object.sha;
        let tree = self.get_commit(session, &commit)?.tree.sha;
        Ok(BranchTip {
            commit: ObjectId(commit),
            tree: ObjectId(tree),
        })
    }

    fn create_tree(
        &self,
        session: &Session,
        base_tree: &ObjectId,
        entries: &[TreeEntry],
    ) -> Result<ObjectId> {
        let body = CreateTreeRequest {
            base_tree: base_tree.0.clone(),
            tree: entries
                .iter()
                .map(|e| TreeItem {
                    path: e.path.clone(),
                    mode: e.mode.clone(),
                    kind: "blob".to_string(),
                    sha: e.blob.0.clone(),
                })
                .collect(),
        };
        Ok(ObjectId(self.post_tree(session, &body)?.sha))
    }

    fn create_commit(
        &self,
        session: &Session,
        message: &str,
        tree: &ObjectId,
        parents: &[ObjectId],
    ) -> Result<ObjectId> {
        let body = CreateCommitRequest {
            message: message.to_string(),
            tree: tree.0.clone(),
            parents: parents.iter().map(|p| p.0.clone()).collect(),
        };
        Ok(ObjectId(self.post_commit(session, &body)?.sha))
    }

    fn update_branch(&self, session: &Session, commit: &ObjectId) -> Result<()> {
        let body = UpdateRefRequest {
            sha: commit.0.clone(),
            force: false,
        };
        self.patch_branch_ref(session, &body)
    }
}

fn decode_content(item: &ContentsItem) -> Result<Vec<u8>> {
    match (item.encoding.as_deref(), item.content.as_deref()) {
        (Some("base64"), Some(encoded)) => {
            let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
            BASE64
                .decode(compact)
                .map_err(|e| FileDockError::fetch(item.path.clone(), format!("decode content: {}", e)))
        }
        (encoding, _) => Err(FileDockError::fetch(
            item.path.clone(),
            format!(
                "content not returned inline (encoding {})",
                encoding.unwrap_or("none")
            ),
        )),
    }
}

#[cfg(test)]
#[path = "tests/remote/decode_tests.rs"]
mod tests;
