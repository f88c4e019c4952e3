//! Catalog reconciliation: the manifest document merged with a live scan of
//! the upload directory, keyed by path.

use std::collections::HashMap;

use time::OffsetDateTime;

use crate::error::{FileDockError, Result};
use crate::hosting::{DirectoryEntry, EntryKind, HostingApi};
use crate::model::{FileRecord, HostConfig, Manifest, Revision};
use crate::naming::{extension_of, iso_timestamp, size_label, stamp_from_filename, title_from_filename};
use crate::session::Session;

#[derive(Clone, Debug)]
pub struct CatalogOptions {
    /// Also list the upload directory to pick up files the manifest misses.
    pub scan_directory: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            scan_directory: true,
        }
    }
}

/// The manifest as last read, with the revision a rewrite must present.
#[derive(Clone, Debug)]
pub struct ManifestSnapshot {
    pub manifest: Manifest,
    pub revision: Revision,
}

/// Reads and parses the manifest. `Ok(None)` when it does not exist yet.
pub fn fetch_manifest<H: HostingApi + ?Sized>(
    host: &H,
    config: &HostConfig,
    session: Option<&Session>,
) -> Result<Option<ManifestSnapshot>> {
    let Some(obj) = host.read_object(session, &config.manifest_path)? else {
        return Ok(None);
    };
    let manifest = Manifest::parse(&obj.content).map_err(|e| {
        FileDockError::fetch(config.manifest_path.as_str(), format!("parse manifest: {}", e))
    })?;
    Ok(Some(ManifestSnapshot {
        manifest,
        revision: obj.revision,
    }))
}

/// Builds the merged catalog. Never fails: a source that cannot be read
/// contributes nothing, so an unreachable host yields an empty catalog.
pub fn build_catalog<H: HostingApi + ?Sized>(
    host: &H,
    config: &HostConfig,
    session: Option<&Session>,
    options: &CatalogOptions,
) -> Vec<FileRecord> {
    let from_manifest = match fetch_manifest(host, config, session) {
        Ok(Some(snap)) => snap.manifest.entries,
        Ok(None) => {
            log::info!("no manifest at {} yet", config.manifest_path);
            Vec::new()
        }
        Err(err) => {
            log::warn!("ignoring manifest: {}", err);
            Vec::new()
        }
    };

    let from_scan = if options.scan_directory {
        match host.list_directory(session, &config.upload_dir) {
            Ok(entries) => scan_records(&entries, OffsetDateTime::now_utc()),
            Err(err) => {
                log::warn!("ignoring directory scan of {}: {}", config.upload_dir, err);
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    log::debug!(
        "catalog sources: manifest={} scan={}",
        from_manifest.len(),
        from_scan.len()
    );
    merge_records(from_scan, from_manifest)
}

/// Maps the file entries of a directory listing to records. `now` stands in
/// for the upload time of names that do not carry one.
pub fn scan_records(entries: &[DirectoryEntry], now: OffsetDateTime) -> Vec<FileRecord> {
    let fallback = iso_timestamp(now);
    entries
        .iter()
        .filter(|e| e.kind == EntryKind::File)
        .map(|e| {
            FileRecord::new(
                title_from_filename(&e.name),
                e.path.clone(),
                extension_of(&e.name).unwrap_or_default(),
                size_label(e.size),
                stamp_from_filename(&e.name).unwrap_or_else(|| fallback.clone()),
            )
        })
        .collect()
}

/// Merges by path. Scan records go in first; a manifest record with the same
/// path replaces the scan record in place, so order follows first insertion.
pub fn merge_records(scan: Vec<FileRecord>, manifest: Vec<FileRecord>) -> Vec<FileRecord> {
    let mut out: Vec<FileRecord> = Vec::with_capacity(scan.len() + manifest.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in scan.into_iter().chain(manifest) {
        match index.get(&record.path) {
            Some(&i) => out[i] = record,
            None => {
                index.insert(record.path.clone(), out.len());
                out.push(record);
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
