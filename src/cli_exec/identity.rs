use filedock::session::Session;

use super::*;

pub(super) fn handle_login_command(store: &LocalStore, token: &str) -> Result<()> {
    let host = require_host(store)?;
    let session = Session::sign_in(token)?;
    store
        .set_session_token(&host, session.token())
        .context("store session token in state.json")?;
    println!("Signed in to {}/{}", host.owner, host.repo);
    Ok(())
}

pub(super) fn handle_logout_command(store: &LocalStore) -> Result<()> {
    let host = require_host(store)?;
    let Some(token) = store.get_session_token(&host)? else {
        println!("Not signed in");
        return Ok(());
    };
    // A stored token that no longer parses is still cleared.
    if let Ok(session) = Session::sign_in(&token) {
        session.sign_out();
    }
    store
        .clear_session_token(&host)
        .context("clear session token in state.json")?;
    println!("Signed out of {}/{}", host.owner, host.repo);
    Ok(())
}
