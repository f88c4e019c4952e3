use anyhow::{Context, Result};

use filedock::store::LocalStore;

use crate::{Commands, ConfigCommands, open_session, optional_session, require_host};

mod dispatch;
mod files;
mod identity;
mod local;
mod workspace;

pub(super) fn handle_command(command: Commands) -> Result<()> {
    dispatch::handle_command(command)
}
