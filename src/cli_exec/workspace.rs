use super::*;

pub(super) fn discover_store() -> Result<LocalStore> {
    LocalStore::discover(&std::env::current_dir().context("get current dir")?)
}

pub(super) fn with_store<F>(f: F) -> Result<()>
where
    F: FnOnce(&LocalStore) -> Result<()>,
{
    let store = discover_store()?;
    f(&store)
}
