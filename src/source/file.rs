use std::path::PathBuf;

use super::Source;
use crate::error::{Result, RosterError};

/// A roster file on the local filesystem
pub struct FileSource {
    locator: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            locator: path.display().to_string(),
            path,
        }
    }
}

impl Source for FileSource {
    fn locator(&self) -> &str {
        &self.locator
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).map_err(|source| RosterError::Read {
            locator: self.locator.clone(),
            source,
        })
    }
}
