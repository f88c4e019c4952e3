use std::path::PathBuf;

use clap::Args;

#[derive(Args)]
pub(crate) struct ListArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
    /// Only show what the manifest lists
    #[arg(long)]
    pub(crate) no_scan: bool,
}

#[derive(Args)]
pub(crate) struct UploadArgs {
    /// Local file to upload
    pub(crate) file: PathBuf,
    /// Display title
    #[arg(long)]
    pub(crate) title: String,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct DeleteArgs {
    /// Stored path, as shown by `filedock list`
    pub(crate) path: String,
}

#[derive(Args)]
pub(crate) struct UrlArgs {
    /// Stored path, as shown by `filedock list`
    pub(crate) path: String,
}
