mod config;
mod ids;
mod kind;
mod record;

pub use self::config::{
    DEFAULT_API_BASE, DEFAULT_BRANCH, DEFAULT_LARGE_FILE_THRESHOLD, DEFAULT_MANIFEST_PATH,
    DEFAULT_RAW_BASE, DEFAULT_UPLOAD_DIR, HostConfig, WorkspaceConfig, WorkspaceState,
};
pub use self::ids::{ObjectId, Revision};
pub use self::kind::FileKind;
pub use self::record::{FileRecord, Manifest};

#[cfg(test)]
#[path = "../tests/model_tests.rs"]
mod tests;
