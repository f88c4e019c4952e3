use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show the repository settings
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Change the repository settings; owner and repo are required the first time
    Set {
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        repo: Option<String>,
        #[arg(long)]
        branch: Option<String>,
        #[arg(long)]
        api_base: Option<String>,
        #[arg(long)]
        raw_base: Option<String>,
        #[arg(long)]
        upload_dir: Option<String>,
        #[arg(long)]
        manifest_path: Option<String>,
        /// Bytes; larger uploads go through git objects
        #[arg(long)]
        large_file_threshold: Option<u64>,
    },
}
