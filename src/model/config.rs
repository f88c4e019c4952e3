use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_MANIFEST_PATH: &str = "data/files.json";
/// Uploads strictly larger than this go through the blob/tree/commit/ref path.
pub const DEFAULT_LARGE_FILE_THRESHOLD: u64 = 50 * 1024 * 1024;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub version: u32,

    #[serde(default)]
    pub host: Option<HostConfig>,
}

/// Where the catalog lives on the hosting service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_raw_base")]
    pub raw_base: String,

    pub owner: String,
    pub repo: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,

    /// Threshold in bytes; content of exactly this size still uses the
    /// single-call write.
    #[serde(default = "default_large_file_threshold")]
    pub large_file_threshold: u64,
}

impl HostConfig {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            api_base: default_api_base(),
            raw_base: default_raw_base(),
            owner: owner.into(),
            repo: repo.into(),
            branch: default_branch(),
            upload_dir: default_upload_dir(),
            manifest_path: default_manifest_path(),
            large_file_threshold: default_large_file_threshold(),
        }
    }

    /// File name of the manifest, used in commit messages.
    pub fn manifest_name(&self) -> &str {
        self.manifest_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.manifest_path)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorkspaceState {
    pub version: u32,

    /// Token of the signed-in session, keyed by `owner/repo`.
    #[serde(default)]
    pub session_tokens: std::collections::HashMap<String, String>,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_raw_base() -> String {
    DEFAULT_RAW_BASE.to_string()
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

fn default_upload_dir() -> String {
    DEFAULT_UPLOAD_DIR.to_string()
}

fn default_manifest_path() -> String {
    DEFAULT_MANIFEST_PATH.to_string()
}

fn default_large_file_threshold() -> u64 {
    DEFAULT_LARGE_FILE_THRESHOLD
}
