// Configuration module
// Plugin settings and the display-inversion scan of the host config file

use crate::probe::{DEFAULT_PROBE_HOST, DEFAULT_PROBE_PORT, DEFAULT_PROBE_TIMEOUT};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Host configuration file scanned for the inversion flag
pub const HOST_CONFIG_PATH: &str = "/etc/pwnagotchi/config.toml";

const INVERT_TRUE: &str = "ui.invert = true";
const INVERT_FALSE: &str = "ui.invert = false";

const CONNECTED_ICON_FILE: &str = "internet-conection.png";
const CONNECTED_ICON_URL: &str =
    "https://raw.githubusercontent.com/NeonLightning/pwny/main/internet-conection.png";
const DISCONNECTED_ICON_FILE: &str = "internet-conection-off.png";
const DISCONNECTED_ICON_URL: &str =
    "https://raw.githubusercontent.com/NeonLightning/pwny/main/internet-conection-off.png";

/// A local icon file and where to download it from when missing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSource {
    pub path: PathBuf,
    pub url: String,
}

/// Everything the plugin needs to know about its environment
#[derive(Debug, Clone)]
pub struct Settings {
    /// Host config file scanned for `ui.invert`
    pub host_config: PathBuf,
    pub connected_icon: IconSource,
    pub disconnected_icon: IconSource,
    pub probe_host: String,
    pub probe_port: u16,
    pub probe_timeout: Duration,
    /// Top-left corner of the status icon
    pub icon_position: (u32, u32),
}

impl Settings {
    /// Settings with both icons stored under `asset_dir`
    pub fn with_asset_dir(asset_dir: &Path) -> Self {
        Self {
            host_config: PathBuf::from(HOST_CONFIG_PATH),
            connected_icon: IconSource {
                path: asset_dir.join(CONNECTED_ICON_FILE),
                url: CONNECTED_ICON_URL.to_string(),
            },
            disconnected_icon: IconSource {
                path: asset_dir.join(DISCONNECTED_ICON_FILE),
                url: DISCONNECTED_ICON_URL.to_string(),
            },
            probe_host: DEFAULT_PROBE_HOST.to_string(),
            probe_port: DEFAULT_PROBE_PORT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            icon_position: (225, 101),
        }
    }

    /// Icon source matching a connectivity result
    pub fn icon_for(&self, connected: bool) -> &IconSource {
        if connected {
            &self.connected_icon
        } else {
            &self.disconnected_icon
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_asset_dir(&default_asset_dir())
    }
}

/// Directory holding the running executable, falling back to the working directory
pub fn default_asset_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.canonicalize().ok())
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Scan the host config for the display inversion flag.
///
/// This is a textual scan, not a TOML parse: the first line containing
/// `ui.invert = true` or `ui.invert = false` decides the result, even if the
/// line is commented out. A missing file or no matching line yields `false`.
pub fn read_invert_flag(path: &Path) -> bool {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Config file not found: {}", path.display());
            return false;
        }
        Err(e) => {
            warn!("Could not open config file {}: {}", path.display(), e);
            return false;
        }
    };

    for line in BufReader::new(file).lines() {
        // A read error mid-file ends the scan like end of file does
        let Ok(line) = line else {
            break;
        };
        let line = line.trim();

        if line.contains(INVERT_TRUE) {
            debug!("Screen invert: true");
            return true;
        }
        if line.contains(INVERT_FALSE) {
            debug!("Screen invert: false");
            return false;
        }
    }

    false
}
