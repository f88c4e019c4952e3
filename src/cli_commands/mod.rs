use clap::Subcommand;

use crate::ConfigCommands;

pub(crate) mod files;
pub(crate) mod identity;
pub(crate) mod local;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Initialize a workspace (.filedock)
    Init(local::InitArgs),

    /// Show or change the repository settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Sign in with a host-issued access token
    Login(identity::LoginArgs),

    /// Sign out (clear the stored token)
    Logout,

    /// List the catalog
    List(files::ListArgs),

    /// Upload a file and record it in the manifest
    Upload(files::UploadArgs),

    /// Delete a stored file and its manifest entry
    Delete(files::DeleteArgs),

    /// Print the download URL of a stored file
    Url(files::UrlArgs),
}
