//! Signed-in session context.
//!
//! A `Session` is created on sign-in and consumed on sign-out; every write
//! operation takes one explicitly. It only carries a host-issued token. The
//! host decides whether that token may write; nothing here authenticates.

use time::OffsetDateTime;

use crate::error::{FileDockError, Result};
use crate::naming::iso_timestamp;

#[derive(Clone)]
pub struct Session {
    token: String,
    signed_in_at: String,
}

impl Session {
    pub fn sign_in(token: &str) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(FileDockError::validation("access token is required"));
        }
        log::debug!("session signed in");
        Ok(Self {
            token: token.to_string(),
            signed_in_at: iso_timestamp(OffsetDateTime::now_utc()),
        })
    }

    pub fn sign_out(self) {
        log::debug!("session signed out (since {})", self.signed_in_at);
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn signed_in_at(&self) -> &str {
        &self.signed_in_at
    }

    pub(crate) fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("signed_in_at", &self.signed_in_at)
            .finish()
    }
}
