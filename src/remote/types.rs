//! Wire shapes of the GitHub contents and git-data endpoints.

/// One element of a contents response; a file read returns a single item, a
/// directory read returns an array of them (without `content`).
#[derive(Debug, serde::Deserialize)]
pub(super) struct ContentsItem {
    #[serde(rename = "type")]
    pub(super) kind: String,
    pub(super) name: String,
    pub(super) path: String,
    pub(super) sha: String,
    #[serde(default)]
    pub(super) size: u64,
    #[serde(default)]
    pub(super) content: Option<String>,
    #[serde(default)]
    pub(super) encoding: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub(super) enum ContentsResponse {
    Dir(Vec<ContentsItem>),
    File(ContentsItem),
}

#[derive(Debug, serde::Serialize)]
pub(super) struct PutContentsRequest {
    pub(super) message: String,
    pub(super) content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) sha: Option<String>,
    pub(super) branch: String,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct PutContentsResponse {
    #[serde(default)]
    pub(super) content: Option<ContentsItem>,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct DeleteContentsRequest {
    pub(super) message: String,
    pub(super) sha: String,
    pub(super) branch: String,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct CreateBlobRequest {
    pub(super) content: String,
    pub(super) encoding: String,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct ShaRef {
    pub(super) sha: String,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct GitRef {
    pub(super) object: ShaRef,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct GitCommit {
    pub(super) tree: ShaRef,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct TreeItem {
    pub(super) path: String,
    pub(super) mode: String,
    #[serde(rename = "type")]
    pub(super) kind: String,
    pub(super) sha: String,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct CreateTreeRequest {
    pub(super) base_tree: String,
    pub(super) tree: Vec<TreeItem>,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct CreateCommitRequest {
    pub(super) message: String,
    pub(super) tree: String,
    pub(super) parents: Vec<String>,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct UpdateRefRequest {
    pub(super) sha: String,
    pub(super) force: bool,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct ApiError {
    #[serde(default)]
    pub(super) message: Option<String>,
}
