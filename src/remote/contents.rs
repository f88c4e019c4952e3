use reqwest::Method;
use reqwest::StatusCode;

use super::*;

impl RemoteClient {
    /// `Ok(None)` on 404.
    fn get_contents(
        &self,
        session: Option<&Session>,
        path: &str,
    ) -> Result<Option<ContentsResponse>> {
        let resp = self
            .request(Method::GET, self.contents_url(path, true)?, session)
            .send()
            .map_err(|e| FileDockError::fetch(path, e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let parsed = self
            .ensure_read_ok(resp, path)?
            .json::<ContentsResponse>()
            .map_err(|e| FileDockError::fetch(path, format!("parse contents: {}", e)))?;
        Ok(Some(parsed))
    }

    pub(super) fn get_contents_file(
        &self,
        session: Option<&Session>,
        path: &str,
    ) -> Result<Option<ContentsItem>> {
        match self.get_contents(session, path)? {
            None => Ok(None),
            Some(ContentsResponse::File(item)) => Ok(Some(item)),
            Some(ContentsResponse::Dir(_)) => {
                Err(FileDockError::fetch(path, "is a directory, not a file"))
            }
        }
    }

    pub(super) fn get_contents_dir(
        &self,
        session: Option<&Session>,
        path: &str,
    ) -> Result<Vec<ContentsItem>> {
        match self.get_contents(session, path)? {
            None => Ok(Vec::new()),
            Some(ContentsResponse::Dir(items)) => Ok(items),
            Some(ContentsResponse::File(_)) => {
                Err(FileDockError::fetch(path, "is a file, not a directory"))
            }
        }
    }

    pub(super) fn put_contents(
        &self,
        session: &Session,
        path: &str,
        body: &PutContentsRequest,
    ) -> Result<PutContentsResponse> {
        let step = format!("write {}", path);
        let resp = self
            .request(Method::PUT, self.contents_url(path, false)?, Some(session))
            .json(body)
            .send()
            .map_err(|e| FileDockError::remote_write(step.as_str(), e.to_string()))?;
        self.ensure_write_ok(resp, &step)?
            .json()
            .map_err(|e| FileDockError::remote_write(step.as_str(), format!("parse response: {}", e)))
    }

    pub(super) fn delete_contents(
        &self,
        session: &Session,
        path: &str,
        body: &DeleteContentsRequest,
    ) -> Result<()> {
        let step = format!("delete {}", path);
        let resp = self
            .request(Method::DELETE, self.contents_url(path, false)?, Some(session))
            .json(body)
            .send()
            .map_err(|e| FileDockError::remote_write(step.as_str(), e.to_string()))?;
        self.ensure_write_ok(resp, &step)?;
        Ok(())
    }
}
