use anyhow::Result;

use crate::model::HostConfig;

use super::LocalStore;

impl LocalStore {
    pub fn session_token_key(host: &HostConfig) -> String {
        format!("{}/{}", host.owner, host.repo)
    }

    pub fn get_session_token(&self, host: &HostConfig) -> Result<Option<String>> {
        let st = self.read_state()?;
        Ok(st.session_tokens.get(&Self::session_token_key(host)).cloned())
    }

    pub fn set_session_token(&self, host: &HostConfig, token: &str) -> Result<()> {
        let mut st = self.read_state()?;
        st.session_tokens
            .insert(Self::session_token_key(host), token.to_string());
        self.write_state(&st)
    }

    /// Returns whether a token was stored.
    pub fn clear_session_token(&self, host: &HostConfig) -> Result<bool> {
        let mut st = self.read_state()?;
        let removed = st
            .session_tokens
            .remove(&Self::session_token_key(host))
            .is_some();
        if removed {
            self.write_state(&st)?;
        }
        Ok(removed)
    }
}
