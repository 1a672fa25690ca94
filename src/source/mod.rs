//! Retrieval of raw roster bytes from an opaque locator.

mod file;
mod http;

pub use file::FileSource;
pub use http::HttpSource;

use crate::error::Result;

/// Supplies the raw bytes of one roster
pub trait Source {
    /// The locator this source was opened with, used in errors and batch ids
    fn locator(&self) -> &str;

    fn fetch(&self) -> Result<Vec<u8>>;
}

/// Open a local path, or an `http://` / `https://` URL
pub fn open_source(locator: &str) -> Result<Box<dyn Source>> {
    if is_url(locator) {
        Ok(Box::new(HttpSource::new(locator)?))
    } else {
        Ok(Box::new(FileSource::new(locator)))
    }
}

fn is_url(locator: &str) -> bool {
    let lower = locator.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
