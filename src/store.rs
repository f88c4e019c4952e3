//! Local workspace state under `.filedock/`: host configuration in
//! `config.json` and session tokens in `state.json`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

mod setup;
mod tokens;

pub const STORE_DIR: &str = ".filedock";

#[derive(Clone, Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn store_dir(workspace_root: &Path) -> PathBuf {
        workspace_root.join(STORE_DIR)
    }

    /// Opens the nearest store at or above `start`.
    pub fn discover(start: &Path) -> Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("canonicalize {}", start.display()))?;
        for dir in start.ancestors() {
            if Self::store_dir(dir).is_dir() {
                log::debug!("using workspace at {}", dir.display());
                return Self::open(dir);
            }
        }
        anyhow::bail!("No {} directory found (run `filedock init`)", STORE_DIR)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
