use anyhow::{Context, Result};
use clap::Parser;

use filedock::model::HostConfig;
use filedock::session::Session;
use filedock::store::LocalStore;

use crate::Commands;

/// Overrides the token stored by `filedock login`.
pub(crate) const TOKEN_ENV: &str = "FILEDOCK_TOKEN";

#[derive(Parser)]
#[command(name = "filedock")]
#[command(about = "Manage a file catalog stored in a git-hosted repository", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::cli_exec::handle_command(cli.command)
}

pub(crate) fn require_host(store: &LocalStore) -> Result<HostConfig> {
    let cfg = store.read_config()?;
    cfg.host.context(
        "no repository configured (run `filedock config set --owner ... --repo ...`)",
    )
}

fn resolve_token(store: &LocalStore, host: &HostConfig) -> Result<Option<String>> {
    if let Ok(token) = std::env::var(TOKEN_ENV)
        && !token.trim().is_empty()
    {
        log::debug!("using token from {}", TOKEN_ENV);
        return Ok(Some(token));
    }
    store.get_session_token(host)
}

/// Session for write commands; fails when nobody is signed in.
pub(crate) fn open_session(store: &LocalStore, host: &HostConfig) -> Result<Session> {
    let token = resolve_token(store, host)?.with_context(|| {
        format!(
            "not signed in (run `filedock login --token ...` or set {})",
            TOKEN_ENV
        )
    })?;
    Ok(Session::sign_in(&token)?)
}

/// Session for read commands, which also work anonymously.
pub(crate) fn optional_session(store: &LocalStore, host: &HostConfig) -> Result<Option<Session>> {
    match resolve_token(store, host)? {
        Some(token) => Ok(Some(Session::sign_in(&token)?)),
        None => Ok(None),
    }
}
