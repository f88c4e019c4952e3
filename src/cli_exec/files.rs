use std::path::Path;

use filedock::catalog::{CatalogOptions, build_catalog};
use filedock::commit::CommitBuilder;
use filedock::error::FileDockError;
use filedock::links::download_url;
use filedock::model::{FileRecord, HostConfig};
use filedock::remote::RemoteClient;
use filedock::session::Session;

use super::*;

fn client_for(store: &LocalStore) -> Result<(HostConfig, RemoteClient)> {
    let host = require_host(store)?;
    let client = RemoteClient::new(host.clone())?;
    Ok((host, client))
}

pub(super) fn handle_list_command(store: &LocalStore, json: bool, scan: bool) -> Result<()> {
    let (host, client) = client_for(store)?;
    let session = optional_session(store, &host)?;
    let catalog = build_catalog(
        &client,
        &host,
        session.as_ref(),
        &CatalogOptions {
            scan_directory: scan,
        },
    );

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&catalog).context("serialize catalog json")?
        );
    } else {
        print_catalog(&catalog);
    }
    Ok(())
}

pub(super) fn handle_upload_command(
    store: &LocalStore,
    file: &Path,
    title: &str,
    json: bool,
) -> Result<()> {
    let (host, client) = client_for(store)?;
    let session = open_session(store, &host)?;
    let content = std::fs::read(file).with_context(|| format!("read {}", file.display()))?;
    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    let record = CommitBuilder::new(&client, &host, &session)
        .upload(&content, title, extension)
        .map_err(with_login_hint)
        .with_context(|| format!("upload {}", file.display()))?;

    let listed = refresh(&client, &host, &session);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&record).context("serialize record json")?
        );
        // stdout stays a single JSON document
        eprintln!("{}", listed);
    } else {
        println!("Uploaded {} ({})", record.title, record.size_label);
        println!("path: {}", record.path);
        println!("{}", listed);
    }
    Ok(())
}

pub(super) fn handle_delete_command(store: &LocalStore, path: &str) -> Result<()> {
    let (host, client) = client_for(store)?;
    let session = open_session(store, &host)?;

    CommitBuilder::new(&client, &host, &session)
        .delete(path)
        .map_err(with_login_hint)
        .with_context(|| format!("delete {}", path))?;

    println!("Deleted {}", path);
    println!("{}", refresh(&client, &host, &session));
    Ok(())
}

pub(super) fn handle_url_command(store: &LocalStore, path: &str) -> Result<()> {
    let host = require_host(store)?;
    println!("{}", download_url(&host, path)?);
    Ok(())
}

/// Rebuilds the catalog after a write and returns the summary line.
fn refresh(client: &RemoteClient, host: &HostConfig, session: &Session) -> String {
    let catalog = build_catalog(client, host, Some(session), &CatalogOptions::default());
    format!("Catalog now lists {} file(s)", catalog.len())
}

fn with_login_hint(err: FileDockError) -> anyhow::Error {
    let rejected = err.is_rejected_token();
    let err = anyhow::Error::new(err);
    if rejected {
        err.context("sign in again with `filedock login --token ...`")
    } else {
        err
    }
}

fn print_catalog(catalog: &[FileRecord]) {
    if catalog.is_empty() {
        println!("No files");
        return;
    }
    for record in catalog {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            record.title,
            record.kind(),
            record.size_label,
            record.uploaded_at,
            record.path
        );
    }
}
