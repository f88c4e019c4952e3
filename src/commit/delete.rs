use super::*;

impl<'a, H: HostingApi + ?Sized> CommitBuilder<'a, H> {
    /// Removes the object at `path` and its manifest entry.
    pub fn delete(&mut self, path: &str) -> Result<()> {
        let path = path.trim();
        if path.is_empty() {
            return Err(FileDockError::validation("a file path is required"));
        }

        let label = format!("delete {}", path);
        self.run(&label, |b| {
            let stat = b
                .host
                .stat_object(Some(b.session), path)?
                .ok_or_else(|| FileDockError::NotFound(path.to_string()))?;

            // Read before deleting so a broken manifest stops us early.
            let snap = b.read_manifest()?;
            let title = snap
                .as_ref()
                .and_then(|s| s.manifest.find(path))
                .map(|r| r.title.clone())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| file_name(path).to_string());

            b.host.delete_object(
                b.session,
                path,
                &format!("Delete {}", title),
                &stat.revision,
            )?;
            b.remove_from_manifest(snap, path)?;
            Ok(())
        })
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
