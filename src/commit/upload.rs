use super::*;

impl<'a, H: HostingApi + ?Sized> CommitBuilder<'a, H> {
    /// Stores `content` under a fresh path derived from `title`, then records
    /// it in the manifest.
    pub fn upload(
        &mut self,
        content: &[u8],
        title: &str,
        original_extension: &str,
    ) -> Result<FileRecord> {
        self.upload_at(content, title, original_extension, OffsetDateTime::now_utc())
    }

    /// [`upload`](Self::upload) with an explicit clock reading.
    pub fn upload_at(
        &mut self,
        content: &[u8],
        title: &str,
        original_extension: &str,
        at: OffsetDateTime,
    ) -> Result<FileRecord> {
        let title = title.trim();
        let extension = original_extension.trim();
        validate_upload(title, extension)?;

        let label = format!("upload {}", title);
        self.run(&label, |b| {
            let path = upload_path(&b.config.upload_dir, title, extension, at);
            let message = format!("Add {}", title);
            let len = content.len() as u64;

            match route_for(len, b.config.large_file_threshold) {
                UploadRoute::SingleCall => {
                    log::debug!("writing {} ({} bytes) in one call", path, len);
                    b.host
                        .write_object(b.session, &path, content, &message, None)?;
                }
                UploadRoute::LowLevel => {
                    log::debug!("writing {} ({} bytes) through git objects", path, len);
                    b.commit_large(&path, content, &message)?;
                }
            }

            let record = FileRecord::new(
                title,
                path,
                extension.to_ascii_lowercase(),
                size_label(len),
                iso_timestamp(at),
            );
            b.append_to_manifest(record.clone())?;
            Ok(record)
        })
    }

    /// Blob, tree on top of the branch tip, commit, then branch update. A
    /// failure part-way leaves the objects created so far unreferenced on the
    /// host.
    fn commit_large(&self, path: &str, content: &[u8], message: &str) -> Result<()> {
        let blob = self.host.create_blob(self.session, content)?;
        log::debug!("created blob {}", blob);

        let tip = self.host.branch_tip(self.session)?;
        log::debug!("branch tip {} (tree {})", tip.commit, tip.tree);

        let tree = self
            .host
            .create_tree(self.session, &tip.tree, &[TreeEntry::file(path, blob)])?;
        log::debug!("created tree {}", tree);

        let commit = self
            .host
            .create_commit(self.session, message, &tree, &[tip.commit])?;
        log::debug!("created commit {}", commit);

        self.host.update_branch(self.session, &commit)?;
        log::debug!("branch {} now at {}", self.config.branch, commit);
        Ok(())
    }
}

fn validate_upload(title: &str, extension: &str) -> Result<()> {
    if title.is_empty() {
        return Err(FileDockError::validation("a file title is required"));
    }
    if extension.is_empty() {
        return Err(FileDockError::validation("the file has no extension"));
    }
    if extension.contains('/') || extension.contains('.') {
        return Err(FileDockError::validation(format!(
            "invalid extension {:?}",
            extension
        )));
    }
    Ok(())
}
