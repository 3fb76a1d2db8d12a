// Asset bootstrap module
// Downloads the status icons next to the plugin when they are missing

use crate::config::IconSource;
use crate::error::AssetError;
use log::info;
use std::fs;
use std::path::Path;

/// Source of raw asset bytes
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError>;
}

/// Plain blocking HTTP GET
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError> {
        let fetch_err = |source| AssetError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(fetch_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().map_err(fetch_err)?;
        Ok(bytes.to_vec())
    }
}

/// Make sure `path` exists, downloading it from `url` if it does not.
///
/// Returns `true` when a download happened. Existing files are never
/// touched or re-validated.
pub fn ensure_icon(path: &Path, url: &str, fetcher: &dyn Fetch) -> Result<bool, AssetError> {
    if path.exists() {
        return Ok(false);
    }

    info!("Icon not found at {}, downloading {}", path.display(), url);
    let bytes = fetcher.fetch(url)?;
    fs::write(path, &bytes).map_err(|source| AssetError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(true)
}

/// Bootstrap every icon in `sources`, stopping at the first failure
pub fn ensure_icons(sources: &[&IconSource], fetcher: &dyn Fetch) -> Result<(), AssetError> {
    for source in sources {
        ensure_icon(&source.path, &source.url, fetcher)?;
    }
    Ok(())
}
