use reqwest::StatusCode;
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION};

use crate::error::REJECTED_TOKEN_NOTE;

use super::*;

impl RemoteClient {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.host.api_base.trim_end_matches('/'), path)
    }

    pub(super) fn repo_url(&self, suffix: &str) -> String {
        self.url(&format!(
            "/repos/{}/{}{}",
            self.host.owner, self.host.repo, suffix
        ))
    }

    /// Contents URL with every path segment percent-encoded and the branch
    /// pinned through `ref`.
    pub(super) fn contents_url(&self, path: &str, with_ref: bool) -> Result<url::Url> {
        let mut u = url::Url::parse(&self.host.api_base)
            .map_err(|e| FileDockError::fetch("api base url", e.to_string()))?;
        u.path_segments_mut()
            .map_err(|_| FileDockError::fetch("api base url", "cannot hold a path"))?
            .pop_if_empty()
            .extend([
                "repos",
                self.host.owner.as_str(),
                self.host.repo.as_str(),
                "contents",
            ])
            .extend(path.split('/').filter(|s| !s.is_empty()));
        if with_ref {
            u.query_pairs_mut().append_pair("ref", &self.host.branch);
        }
        Ok(u)
    }

    pub(super) fn request(
        &self,
        method: reqwest::Method,
        url: impl reqwest::IntoUrl,
        session: Option<&Session>,
    ) -> RequestBuilder {
        let req = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/vnd.github+json");
        match session {
            Some(s) => req.header(AUTHORIZATION, s.authorization()),
            None => req,
        }
    }

    pub(super) fn ensure_read_ok(&self, resp: Response, what: &str) -> Result<Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        Err(FileDockError::fetch(what, api_message(resp)))
    }

    pub(super) fn ensure_write_ok(&self, resp: Response, step: &str) -> Result<Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        Err(FileDockError::remote_write(step, api_message(resp)))
    }
}

/// The host's `message` field when present, otherwise the status line.
fn api_message(resp: Response) -> String {
    let status = resp.status();
    let hint = match status {
        StatusCode::UNAUTHORIZED => format!(" ({})", REJECTED_TOKEN_NOTE),
        StatusCode::FORBIDDEN => " (token lacks access to this repository)".to_string(),
        _ => String::new(),
    };
    let message = resp
        .json::<ApiError>()
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status));
    format!("{}{}", message, hint)
}
