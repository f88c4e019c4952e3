use url::Url;

use crate::error::{FileDockError, Result};
use crate::model::HostConfig;

/// Direct download location of a stored file:
/// `<raw_base>/<owner>/<repo>/<branch>/<path>`, each segment percent-encoded.
pub fn download_url(config: &HostConfig, path: &str) -> Result<Url> {
    let path = path.trim().trim_matches('/');
    if path.is_empty() {
        return Err(FileDockError::validation("a file path is required"));
    }

    let mut url = Url::parse(&config.raw_base)
        .map_err(|e| FileDockError::validation(format!("raw base {:?}: {}", config.raw_base, e)))?;
    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            FileDockError::validation(format!("raw base {:?} cannot carry a path", config.raw_base))
        })?;
        segments
            .pop_if_empty()
            .push(&config.owner)
            .push(&config.repo)
            .push(&config.branch)
            .extend(path.split('/'));
    }
    Ok(url)
}
