//! In-process stand-in for the GitHub contents and git-data endpoints,
//! backed by `MemoryHost` and served by axum on an ephemeral port.

#![allow(dead_code)]

use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::oneshot;

use filedock::hosting::{EntryKind, TreeEntry};
use filedock::model::{HostConfig, ObjectId, Revision};
use filedock::{FileDockError, HostingApi, MemoryHost, Session};

pub const OWNER: &str = "octo";
pub const REPO: &str = "files";
pub const TOKEN: &str = "test-token";

pub struct FakeGitHub {
    pub base_url: String,
    pub host: Arc<MemoryHost>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl FakeGitHub {
    /// Host settings pointing at this server.
    pub fn host_config(&self) -> HostConfig {
        let mut cfg = HostConfig::new(OWNER, REPO);
        cfg.api_base = self.base_url.clone();
        cfg.raw_base = format!("{}/raw", self.base_url);
        cfg
    }
}

impl Drop for FakeGitHub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub fn spawn_fake_github() -> Result<FakeGitHub> {
    let host = Arc::new(MemoryHost::new());

    let listener = std::net::TcpListener::bind("127.0.0.1:0").context("bind fake github")?;
    listener
        .set_nonblocking(true)
        .context("set listener nonblocking")?;
    let addr = listener.local_addr().context("fake github addr")?;

    let app = router(host.clone());
    let (tx, rx) = oneshot::channel::<()>();
    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("build fake github runtime");
        rt.block_on(async move {
            let listener =
                tokio::net::TcpListener::from_std(listener).expect("adopt fake github listener");
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await
                .expect("serve fake github");
        });
    });

    Ok(FakeGitHub {
        base_url: format!("http://{}", addr),
        host,
        shutdown: Some(tx),
    })
}

#[derive(Clone)]
struct AppState {
    host: Arc<MemoryHost>,
}

fn router(host: Arc<MemoryHost>) -> Router {
    Router::new()
        .route(
            "/repos/:owner/:repo/contents/*path",
            get(get_contents).put(put_contents).delete(delete_contents),
        )
        .route("/repos/:owner/:repo/git/blobs", post(create_blob))
        .route("/repos/:owner/:repo/git/trees", post(create_tree))
        .route("/repos/:owner/:repo/git/commits", post(create_commit))
        .route("/repos/:owner/:repo/git/commits/:sha", get(get_commit))
        .route("/repos/:owner/:repo/git/ref/heads/:branch", get(get_ref))
        .route("/repos/:owner/:repo/git/refs/heads/:branch", patch(update_ref))
        .with_state(AppState { host })
}

fn message(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "message": message.into() }))).into_response()
}

fn error_response(err: FileDockError) -> Response {
    match err {
        FileDockError::NotFound(_) => message(StatusCode::NOT_FOUND, "Not Found"),
        FileDockError::RemoteWrite { message: m, .. } if m.contains("wasn't supplied") => {
            message(StatusCode::UNPROCESSABLE_ENTITY, m)
        }
        FileDockError::RemoteWrite { message: m, .. } => message(StatusCode::CONFLICT, m),
        FileDockError::Fetch { message: m, .. } => message(StatusCode::INTERNAL_SERVER_ERROR, m),
        other => message(StatusCode::UNPROCESSABLE_ENTITY, other.to_string()),
    }
}

fn check_repo(owner: &str, repo: &str) -> Option<Response> {
    (owner != OWNER || repo != REPO).then(|| message(StatusCode::NOT_FOUND, "Not Found"))
}

/// `Ok(None)` for anonymous requests; a wrong token is rejected outright.
fn session_from(headers: &HeaderMap) -> std::result::Result<Option<Session>, Response> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let expected = format!("Bearer {}", TOKEN);
    if value.to_str().ok() != Some(expected.as_str()) {
        return Err(message(StatusCode::UNAUTHORIZED, "Bad credentials"));
    }
    Session::sign_in(TOKEN)
        .map(Some)
        .map_err(|e| message(StatusCode::UNAUTHORIZED, e.to_string()))
}

fn require_session(headers: &HeaderMap) -> std::result::Result<Session, Response> {
    session_from(headers)?
        .ok_or_else(|| message(StatusCode::UNAUTHORIZED, "Requires authentication"))
}

/// Base64 wrapped at 60 columns, as the real API returns it.
fn wrapped_base64(bytes: &[u8]) -> String {
    let encoded = BASE64.encode(bytes);
    let mut out = String::with_capacity(encoded.len() + encoded.len() / 60 + 1);
    for (i, c) in encoded.chars().enumerate() {
        if i > 0 && i % 60 == 0 {
            out.push('\n');
        }
        out.push(c);
    }
    out.push('\n');
    out
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

async fn get_contents(
    State(st): State<AppState>,
    Path((owner, repo, path)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Some(resp) = check_repo(&owner, &repo) {
        return resp;
    }
    let session = match session_from(&headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let path = path.trim_matches('/').to_string();

    match st.host.read_object(session.as_ref(), &path) {
        Ok(Some(obj)) => {
            return Json(json!({
                "type": "file",
                "name": file_name(&obj.path),
                "path": obj.path,
                "sha": obj.revision.as_str(),
                "size": obj.content.len(),
                "content": wrapped_base64(&obj.content),
                "encoding": "base64",
            }))
            .into_response();
        }
        Ok(None) => {}
        Err(err) => return error_response(err),
    }

    match st.host.list_directory(session.as_ref(), &path) {
        Ok(entries) if entries.is_empty() => message(StatusCode::NOT_FOUND, "Not Found"),
        Ok(entries) => {
            let items: Vec<_> = entries
                .into_iter()
                .map(|e| {
                    json!({
                        "type": if e.kind == EntryKind::Dir { "dir" } else { "file" },
                        "name": e.name,
                        "path": e.path,
                        "sha": "0000000000000000000000000000000000000000",
                        "size": e.size,
                    })
                })
                .collect();
            Json(items).into_response()
        }
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
struct PutBody {
    message: String,
    content: String,
    #[serde(default)]
    sha: Option<String>,
}

async fn put_contents(
    State(st): State<AppState>,
    Path((owner, repo, path)): Path<(String, String, String)>,
    headers: HeaderMap,
    Json(body): Json<PutBody>,
) -> Response {
    if let Some(resp) = check_repo(&owner, &repo) {
        return resp;
    }
    let session = match require_session(&headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let Ok(content) = BASE64.decode(body.content.as_bytes()) else {
        return message(StatusCode::UNPROCESSABLE_ENTITY, "content is not valid Base64");
    };
    let path = path.trim_matches('/').to_string();
    let previous = body.sha.map(Revision);
    let created = previous.is_none();

    match st
        .host
        .write_object(&session, &path, &content, &body.message, previous.as_ref())
    {
        Ok(revision) => {
            let status = if created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            let body = json!({
                "content": {
                    "type": "file",
                    "name": file_name(&path),
                    "path": path,
                    "sha": revision.as_str(),
                    "size": content.len(),
                },
                "commit": { "sha": st.host.head().as_str() },
            });
            (status, Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
struct DeleteBody {
    message: String,
    sha: String,
}

async fn delete_contents(
    State(st): State<AppState>,
    Path((owner, repo, path)): Path<(String, String, String)>,
    headers: HeaderMap,
    Json(body): Json<DeleteBody>,
) -> Response {
    if let Some(resp) = check_repo(&owner, &repo) {
        return resp;
    }
    let session = match require_session(&headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let path = path.trim_matches('/');
    match st
        .host
        .delete_object(&session, path, &body.message, &Revision(body.sha))
    {
        Ok(()) => Json(json!({ "commit": { "sha": st.host.head().as_str() } })).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
struct BlobBody {
    content: String,
    encoding: String,
}

async fn create_blob(
    State(st): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<BlobBody>,
) -> Response {
    if let Some(resp) = check_repo(&owner, &repo) {
        return resp;
    }
    let session = match require_session(&headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    if body.encoding != "base64" {
        return message(StatusCode::UNPROCESSABLE_ENTITY, "unsupported encoding");
    }
    let Ok(content) = BASE64.decode(body.content.as_bytes()) else {
        return message(StatusCode::UNPROCESSABLE_ENTITY, "content is not valid Base64");
    };
    match st.host.create_blob(&session, &content) {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "sha": id.as_str() }))).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
struct TreeItemBody {
    path: String,
    mode: String,
    sha: String,
}

#[derive(Deserialize)]
struct TreeBody {
    base_tree: String,
    tree: Vec<TreeItemBody>,
}

async fn create_tree(
    State(st): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<TreeBody>,
) -> Response {
    if let Some(resp) = check_repo(&owner, &repo) {
        return resp;
    }
    let session = match require_session(&headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let entries: Vec<TreeEntry> = body
        .tree
        .into_iter()
        .map(|item| TreeEntry {
            path: item.path,
            mode: item.mode,
            blob: ObjectId(item.sha),
        })
        .collect();
    match st
        .host
        .create_tree(&session, &ObjectId(body.base_tree), &entries)
    {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "sha": id.as_str() }))).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
struct CommitBody {
    message: String,
    tree: String,
    parents: Vec<String>,
}

async fn create_commit(
    State(st): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<CommitBody>,
) -> Response {
    if let Some(resp) = check_repo(&owner, &repo) {
        return resp;
    }
    let session = match require_session(&headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let parents: Vec<ObjectId> = body.parents.into_iter().map(ObjectId).collect();
    match st
        .host
        .create_commit(&session, &body.message, &ObjectId(body.tree), &parents)
    {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "sha": id.as_str() }))).into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_commit(
    State(st): State<AppState>,
    Path((owner, repo, sha)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Some(resp) = check_repo(&owner, &repo) {
        return resp;
    }
    let session = match require_session(&headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    // Only the branch head is resolvable here.
    match st.host.branch_tip(&session) {
        Ok(tip) if tip.commit.as_str() == sha => {
            Json(json!({ "sha": sha, "tree": { "sha": tip.tree.as_str() } })).into_response()
        }
        Ok(_) => message(StatusCode::NOT_FOUND, "Not Found"),
        Err(err) => error_response(err),
    }
}

async fn get_ref(
    State(st): State<AppState>,
    Path((owner, repo, branch)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Some(resp) = check_repo(&owner, &repo) {
        return resp;
    }
    let session = match require_session(&headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    if branch != "main" {
        return message(StatusCode::NOT_FOUND, "Not Found");
    }
    match st.host.branch_tip(&session) {
        Ok(tip) => Json(json!({
            "ref": "refs/heads/main",
            "object": { "type": "commit", "sha": tip.commit.as_str() },
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
struct UpdateRefBody {
    sha: String,
    #[serde(default)]
    force: bool,
}

async fn update_ref(
    State(st): State<AppState>,
    Path((owner, repo, branch)): Path<(String, String, String)>,
    headers: HeaderMap,
    Json(body): Json<UpdateRefBody>,
) -> Response {
    if let Some(resp) = check_repo(&owner, &repo) {
        return resp;
    }
    let session = match require_session(&headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    if branch != "main" {
        return message(StatusCode::NOT_FOUND, "Not Found");
    }
    if body.force {
        return message(StatusCode::UNPROCESSABLE_ENTITY, "force updates are not emulated");
    }
    match st.host.update_branch(&session, &ObjectId(body.sha)) {
        Ok(()) => Json(json!({
            "ref": "refs/heads/main",
            "object": { "type": "commit", "sha": st.host.head().as_str() },
        }))
        .into_response(),
        Err(FileDockError::RemoteWrite { message: m, .. }) => {
            message(StatusCode::UNPROCESSABLE_ENTITY, m)
        }
        Err(err) => error_response(err),
    }
}
