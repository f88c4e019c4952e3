use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::model::{WorkspaceConfig, WorkspaceState};

use super::{LocalStore, STORE_DIR, write_atomic};

const CONFIG_VERSION: u32 = 1;

impl LocalStore {
    pub fn open(workspace_root: &Path) -> Result<Self> {
        let root = Self::store_dir(workspace_root);
        if !root.is_dir() {
            return Err(anyhow!(
                "No {} directory found at {} (run `filedock init`)",
                STORE_DIR,
                root.display()
            ));
        }
        Ok(Self { root })
    }

    pub fn init(workspace_root: &Path, force: bool) -> Result<Self> {
        let root = Self::store_dir(workspace_root);
        if root.exists() && !force {
            return Err(anyhow!(
                "{} already exists at {} (use --force to re-init)",
                STORE_DIR,
                root.display()
            ));
        }
        fs::create_dir_all(&root).with_context(|| format!("create {}", root.display()))?;

        let store = Self { root };
        store.write_config(&WorkspaceConfig {
            version: CONFIG_VERSION,
            host: None,
        })?;
        store.write_state(&WorkspaceState {
            version: CONFIG_VERSION,
            ..WorkspaceState::default()
        })?;
        log::info!("initialized {}", store.root.display());
        Ok(store)
    }

    pub fn read_config(&self) -> Result<WorkspaceConfig> {
        let bytes = fs::read(self.root.join("config.json")).context("read config.json")?;
        let cfg: WorkspaceConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != CONFIG_VERSION {
            anyhow::bail!("unsupported workspace config version {}", cfg.version);
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &WorkspaceConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn read_state(&self) -> Result<WorkspaceState> {
        let path = self.root.join("state.json");
        if !path.exists() {
            return Ok(WorkspaceState {
                version: CONFIG_VERSION,
                ..WorkspaceState::default()
            });
        }
        let bytes = fs::read(&path).context("read state.json")?;
        let st: WorkspaceState = serde_json::from_slice(&bytes).context("parse state.json")?;
        if st.version != CONFIG_VERSION {
            anyhow::bail!("unsupported workspace state version {}", st.version);
        }
        Ok(st)
    }

    pub fn write_state(&self, st: &WorkspaceState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(st).context("serialize state")?;
        write_atomic(&self.root.join("state.json"), &bytes).context("write state.json")?;
        Ok(())
    }
}
