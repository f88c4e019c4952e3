//! Low-level git objects: blobs, trees, commits and the branch ref.

use reqwest::Method;

use super::*;

impl RemoteClient {
    /// Single-ref read endpoint (`git/ref`); updates go through `git/refs`.
    fn branch_ref_url(&self, collection: &str) -> String {
        self.repo_url(&format!("/git/{}/heads/{}", collection, self.host.branch))
    }

    fn post_sha<B: serde::Serialize>(
        &self,
        session: &Session,
        suffix: &str,
        step: &str,
        body: &B,
    ) -> Result<ShaRef> {
        let resp = self
            .request(Method::POST, self.repo_url(suffix), Some(session))
            .json(body)
            .send()
            .map_err(|e| FileDockError::remote_write(step, e.to_string()))?;
        self.ensure_write_ok(resp, step)?
            .json()
            .map_err(|e| FileDockError::remote_write(step, format!("parse response: {}", e)))
    }

    pub(super) fn post_blob(&self, session: &Session, body: &CreateBlobRequest) -> Result<ShaRef> {
        self.post_sha(session, "/git/blobs", "create blob", body)
    }

    pub(super) fn post_tree(&self, session: &Session, body: &CreateTreeRequest) -> Result<ShaRef> {
        self.post_sha(session, "/git/trees", "create tree", body)
    }

    pub(super) fn post_commit(
        &self,
        session: &Session,
        body: &CreateCommitRequest,
    ) -> Result<ShaRef> {
        self.post_sha(session, "/git/commits", "create commit", body)
    }

    pub(super) fn get_branch_ref(&self, session: &Session) -> Result<GitRef> {
        let what = format!("branch {}", self.host.branch);
        let resp = self
            .request(Method::GET, self.branch_ref_url("ref"), Some(session))
            .send()
            .map_err(|e| FileDockError::fetch(what.as_str(), e.to_string()))?;
        self.ensure_read_ok(resp, &what)?
            .json()
            .map_err(|e| FileDockError::fetch(what.as_str(), format!("parse ref: {}", e)))
    }

    pub(super) fn get_commit(&self, session: &Session, sha: &str) -> Result<GitCommit> {
        let what = format!("commit {}", sha);
        let resp = self
            .request(
                Method::GET,
                self.repo_url(&format!("/git/commits/{}", sha)),
                Some(session),
            )
            .send()
            .map_err(|e| FileDockError::fetch(what.as_str(), e.to_string()))?;
        self.ensure_read_ok(resp, &what)?
            .json()
            .map_err(|e| FileDockError::fetch(what.as_str(), format!("parse commit: {}", e)))
    }

    pub(super) fn patch_branch_ref(&self, session: &Session, body: &UpdateRefRequest) -> Result<()> {
        let step = "update branch";
        let resp = self
            .request(Method::PATCH, self.branch_ref_url("refs"), Some(session))
            .json(body)
            .send()
            .map_err(|e| FileDockError::remote_write(step, e.to_string()))?;
        self.ensure_write_ok(resp, step)?;
        Ok(())
    }
}
