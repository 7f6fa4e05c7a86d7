use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json;
use tracing::{debug, warn};

use crate::model::session::Session;

/// Keeps the signed-in session between command invocations.
#[derive(Clone)]
pub struct FileSessionStore {
    file_path: PathBuf,
}

impl FileSessionStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        if let Some(dir) = file_path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed creating {}", dir.display()))?;
        }
        Ok(FileSessionStore { file_path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// A missing or unreadable file means nobody is logged in.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "discarding unreadable session file");
                Ok(None)
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, session)?;
        writer.flush()?;
        debug!(path = %self.file_path.display(), "session saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.file_path.exists() {
            fs::remove_file(&self.file_path)?;
        }
        Ok(())
    }
}
