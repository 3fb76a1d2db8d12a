// Error types module
// Typed failures for the display registry, canvas and asset bootstrap

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the host UI registry and canvas
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    #[error("no element registered under '{0}'")]
    NotFound(String),

    #[error("an element is already registered under '{0}'")]
    AlreadyRegistered(String),

    #[error("position ({x}, {y}) lies outside the {width}x{height} canvas")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Failures while bootstrapping icon assets
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
