use std::path::PathBuf;

use filedock::model::HostConfig;

use super::*;

pub(super) fn handle_init_command(force: bool, path: Option<PathBuf>) -> Result<()> {
    let root = match path {
        Some(p) => p,
        None => std::env::current_dir().context("get current dir")?,
    };
    LocalStore::init(&root, force)?;
    println!("Initialized filedock workspace at {}", root.display());
    Ok(())
}

pub(super) fn handle_config_command(store: &LocalStore, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            let cfg = store.read_config()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&cfg.host).context("serialize config json")?
                );
            } else if let Some(host) = cfg.host {
                println!("repository: {}/{}", host.owner, host.repo);
                println!("branch: {}", host.branch);
                println!("api_base: {}", host.api_base);
                println!("raw_base: {}", host.raw_base);
                println!("upload_dir: {}", host.upload_dir);
                println!("manifest_path: {}", host.manifest_path);
                println!("large_file_threshold: {}", host.large_file_threshold);
            } else {
                println!("No repository configured");
            }
        }
        ConfigCommands::Set {
            owner,
            repo,
            branch,
            api_base,
            raw_base,
            upload_dir,
            manifest_path,
            large_file_threshold,
        } => {
            let mut cfg = store.read_config()?;
            let mut host = match cfg.host.take() {
                Some(host) => host,
                None => {
                    let (Some(owner), Some(repo)) = (owner.clone(), repo.clone()) else {
                        anyhow::bail!("--owner and --repo are required for the first `config set`");
                    };
                    HostConfig::new(owner, repo)
                }
            };

            if let Some(v) = owner {
                host.owner = v;
            }
            if let Some(v) = repo {
                host.repo = v;
            }
            if let Some(v) = branch {
                host.branch = v;
            }
            if let Some(v) = api_base {
                host.api_base = v;
            }
            if let Some(v) = raw_base {
                host.raw_base = v;
            }
            if let Some(v) = upload_dir {
                host.upload_dir = v;
            }
            if let Some(v) = manifest_path {
                host.manifest_path = v;
            }
            if let Some(v) = large_file_threshold {
                host.large_file_threshold = v;
            }
            if host.owner.trim().is_empty() || host.repo.trim().is_empty() {
                anyhow::bail!("owner and repo must not be empty");
            }

            cfg.host = Some(host);
            store.write_config(&cfg)?;
            println!("Configuration saved");
        }
    }
    Ok(())
}
