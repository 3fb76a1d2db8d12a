// inet-status - Internet connection status icon for on-device displays
// Probes connectivity and swaps a connected/disconnected icon in the host's UI registry

pub mod assets;
pub mod config;
pub mod error;
pub mod image_loader;
pub mod plugin;
pub mod probe;
pub mod state;
pub mod ui;
pub mod widgets;

pub use config::{read_invert_flag, Settings};
pub use error::{AssetError, UiError};
pub use plugin::{InternetConnection, Plugin, LABEL_KEY, STATUS_KEY};
pub use probe::{Probe, TcpProbe};
pub use state::ConnectivityState;
pub use ui::{Canvas, Registry, View, Widget};
