use reqwest::blocking::Client;
use std::io::Read;

use super::Source;
use crate::error::{Result, RosterError};

/// Upper bound on buffer preallocation from a server-reported length
const MAX_PREALLOCATION: u64 = 1024 * 1024;

/// A roster served over HTTP(S), e.g. a presigned object-storage URL
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("team-roster-to-sqlite")
            .build()
            .map_err(|source| RosterError::Download {
                locator: url.to_string(),
                source,
            })?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

impl Source for HttpSource {
    fn locator(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        let download_error = |source| RosterError::Download {
            locator: self.url.clone(),
            source,
        };

        let mut response = self
            .client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(download_error)?;

        let mut bytes = Vec::with_capacity(initial_capacity(response.content_length()));
        response
            .read_to_end(&mut bytes)
            .map_err(|source| RosterError::Read {
                locator: self.url.clone(),
                source,
            })?;

        log::debug!("Downloaded {} bytes from {}", bytes.len(), self.url);
        Ok(bytes)
    }
}

fn initial_capacity(content_length: Option<u64>) -> usize {
    content_length.unwrap_or(0).min(MAX_PREALLOCATION) as usize
}
