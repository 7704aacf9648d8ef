use crate::upload::{ObjectSink, UploadError};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Writes objects as files under a directory.
pub struct LocalDirSink {
    dir: PathBuf,
}

impl LocalDirSink {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl ObjectSink for LocalDirSink {
    fn put(&self, key: &str, body: &[u8]) -> Result<(), UploadError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(key);
        fs::write(&path, body)?;

        info!(path = %path.display(), bytes = body.len(), "💾 Wrote dataset");
        Ok(())
    }

    fn describe(&self, key: &str) -> String {
        self.dir.join(key).display().to_string()
    }
}
