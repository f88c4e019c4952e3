//! Commit construction: adds or removes one stored file and keeps the
//! manifest in step with it.

use time::OffsetDateTime;

use crate::catalog::{ManifestSnapshot, fetch_manifest};
use crate::error::{FileDockError, Result};
use crate::hosting::{HostingApi, TreeEntry};
use crate::model::{FileRecord, HostConfig, Manifest};
use crate::naming::{iso_timestamp, size_label, upload_path};
use crate::session::Session;

mod delete;
mod manifest_update;
mod upload;

/// Lifecycle of one operation. `Committed` and `Failed` are terminal; the
/// next operation on the same builder starts over from `Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationState {
    Idle,
    InFlight,
    Committed,
    Failed,
}

/// How an upload reaches the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadRoute {
    /// One contents write.
    SingleCall,
    /// Blob, tree and commit objects, then a branch update.
    LowLevel,
}

/// Content of exactly `threshold` bytes still takes the single call.
pub fn route_for(len: u64, threshold: u64) -> UploadRoute {
    if len <= threshold {
        UploadRoute::SingleCall
    } else {
        UploadRoute::LowLevel
    }
}

pub struct CommitBuilder<'a, H: HostingApi + ?Sized> {
    host: &'a H,
    config: &'a HostConfig,
    session: &'a Session,
    state: OperationState,
}

impl<'a, H: HostingApi + ?Sized> CommitBuilder<'a, H> {
    pub fn new(host: &'a H, config: &'a HostConfig, session: &'a Session) -> Self {
        Self {
            host,
            config,
            session,
            state: OperationState::Idle,
        }
    }

    /// State of the most recent operation.
    pub fn state(&self) -> OperationState {
        self.state
    }

    fn run<T>(&mut self, label: &str, f: impl FnOnce(&Self) -> Result<T>) -> Result<T> {
        self.state = OperationState::InFlight;
        log::debug!("{}: in flight", label);
        let out = f(&*self);
        self.state = match &out {
            Ok(_) => OperationState::Committed,
            Err(err) => {
                log::warn!("{}: failed: {}", label, err);
                OperationState::Failed
            }
        };
        if out.is_ok() {
            log::info!("{}: committed", label);
        }
        out
    }
}

#[cfg(test)]
#[path = "tests/commit_tests.rs"]
mod tests;
