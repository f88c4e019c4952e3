use super::files::{
    handle_delete_command, handle_list_command, handle_upload_command, handle_url_command,
};
use super::identity::{handle_login_command, handle_logout_command};
use super::local::{handle_config_command, handle_init_command};
use super::workspace::with_store;
use super::*;

pub(super) fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Init(args) => handle_init_command(args.force, args.path)?,
        Commands::Config { command } => with_store(|store| handle_config_command(store, command))?,
        Commands::Login(args) => with_store(|store| handle_login_command(store, &args.token))?,
        Commands::Logout => with_store(handle_logout_command)?,
        Commands::List(args) => {
            with_store(|store| handle_list_command(store, args.json, !args.no_scan))?
        }
        Commands::Upload(args) => {
            with_store(|store| handle_upload_command(store, &args.file, &args.title, args.json))?
        }
        Commands::Delete(args) => with_store(|store| handle_delete_command(store, &args.path))?,
        Commands::Url(args) => with_store(|store| handle_url_command(store, &args.path))?,
    }
    Ok(())
}
