use super::*;

impl<'a, H: HostingApi + ?Sized> CommitBuilder<'a, H> {
    pub(super) fn read_manifest(&self) -> Result<Option<ManifestSnapshot>> {
        fetch_manifest(self.host, self.config, Some(self.session))
    }

    /// Appends `record`, creating the manifest when there is none yet.
    pub(super) fn append_to_manifest(&self, record: FileRecord) -> Result<()> {
        let name = self.config.manifest_name();
        match self.read_manifest()? {
            Some(mut snap) => {
                let message = format!("Update {} - add {}", name, record.title);
                snap.manifest.push(record);
                self.write_manifest(&snap.manifest, &message, Some(&snap))
            }
            None => {
                let message = format!("Create {} with {}", name, record.title);
                let manifest = Manifest {
                    entries: vec![record],
                };
                self.write_manifest(&manifest, &message, None)
            }
        }
    }

    /// Rewrites the manifest without `path`. Returns false, without writing,
    /// when `path` was not listed.
    pub(super) fn remove_from_manifest(
        &self,
        snap: Option<ManifestSnapshot>,
        path: &str,
    ) -> Result<bool> {
        let Some(mut snap) = snap else {
            log::info!("no manifest; nothing to remove for {}", path);
            return Ok(false);
        };
        if snap.manifest.remove_path(path) == 0 {
            log::info!("{} is not listed in the manifest", path);
            return Ok(false);
        }
        let message = format!(
            "Remove deleted file from {}",
            self.config.manifest_name()
        );
        self.write_manifest(&snap.manifest, &message, Some(&snap))?;
        Ok(true)
    }

    fn write_manifest(
        &self,
        manifest: &Manifest,
        message: &str,
        previous: Option<&ManifestSnapshot>,
    ) -> Result<()> {
        let body = manifest
            .to_body()
            .map_err(|e| FileDockError::remote_write("encode manifest", e.to_string()))?;
        self.host.write_object(
            self.session,
            &self.config.manifest_path,
            &body,
            message,
            previous.map(|s| &s.revision),
        )?;
        log::debug!(
            "manifest {} rewritten with {} entries",
            self.config.manifest_path,
            manifest.len()
        );
        Ok(())
    }
}
