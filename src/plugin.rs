// Plugin module
// Host lifecycle hooks and the connectivity-driven icon controller

use crate::assets::{ensure_icons, Fetch, HttpFetcher};
use crate::config::{read_invert_flag, Settings};
use crate::error::UiError;
use crate::image_loader::{load_icon, IconImage};
use crate::probe::{Probe, TcpProbe};
use crate::state::ConnectivityState;
use crate::ui::{Registry, View, Widget};
use crate::widgets::{InetIcon, LabelPlaceholder};
use anyhow::{Context, Result};
use log::{debug, error, info};
use std::sync::Arc;

/// Registry key of the status icon
pub const STATUS_KEY: &str = "connection_status";
/// Registry key of the label placeholder
pub const LABEL_KEY: &str = "ineticon";

/// Lifecycle hooks a display host calls on its plugins
pub trait Plugin {
    fn name(&self) -> &'static str;

    /// One-time initialisation; an error aborts loading the plugin
    fn on_loaded(&mut self) -> Result<()>;

    fn on_ui_setup(&mut self, ui: &View);

    fn on_ui_update(&mut self, ui: &View);

    fn on_unload(&mut self, ui: &View);
}

/// Decoded icons, prepared at most once per plugin load
#[derive(Default)]
struct IconCache {
    connected: Option<Arc<IconImage>>,
    disconnected: Option<Arc<IconImage>>,
}

impl IconCache {
    fn get(&mut self, settings: &Settings, connected: bool, invert: bool) -> Result<Arc<IconImage>> {
        let slot = if connected {
            &mut self.connected
        } else {
            &mut self.disconnected
        };

        if let Some(image) = slot {
            return Ok(Arc::clone(image));
        }

        let image = Arc::new(load_icon(&settings.icon_for(connected).path, invert)?);
        *slot = Some(Arc::clone(&image));
        Ok(image)
    }

    fn clear(&mut self) {
        self.connected = None;
        self.disconnected = None;
    }
}

/// Shows whether the internet is reachable as an icon on the display
pub struct InternetConnection<P = TcpProbe, F = HttpFetcher> {
    settings: Settings,
    probe: P,
    fetcher: F,
    invert: bool,
    state: ConnectivityState,
    icons: IconCache,
}

impl InternetConnection {
    /// Plugin probing over TCP and downloading assets over HTTP
    pub fn new(settings: Settings) -> Self {
        let probe = TcpProbe::new(
            settings.probe_host.clone(),
            settings.probe_port,
            settings.probe_timeout,
        );
        Self::with_parts(settings, probe, HttpFetcher::new())
    }
}

impl<P: Probe, F: Fetch> InternetConnection<P, F> {
    pub fn with_parts(settings: Settings, probe: P, fetcher: F) -> Self {
        Self {
            settings,
            probe,
            fetcher,
            invert: false,
            state: ConnectivityState::Unset,
            icons: IconCache::default(),
        }
    }

    pub fn state(&self) -> ConnectivityState {
        self.state
    }

    pub fn invert(&self) -> bool {
        self.invert
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn icon_widget(&mut self, connected: bool) -> Result<Box<dyn Widget>> {
        let image = self
            .icons
            .get(&self.settings, connected, self.invert)
            .with_context(|| format!("Failed to prepare icon (connected: {})", connected))?;
        Ok(Box::new(InetIcon::new(image, self.settings.icon_position)))
    }

    /// Replace the status icon; the caller holds the registry lock
    fn swap_icon(registry: &mut Registry, icon: Box<dyn Widget>) {
        remove_if_present(registry, STATUS_KEY);
        if let Err(e) = registry.add_element(STATUS_KEY, icon) {
            error!("Error updating connection status: {}", e);
            debug!("{:?}", e);
        }
    }
}

/// Remove `key`, treating an absent element as already removed
fn remove_if_present(registry: &mut Registry, key: &str) {
    match registry.remove_element(key) {
        Ok(_) | Err(UiError::NotFound(_)) => {}
        Err(e) => error!("Error removing '{}': {}", key, e),
    }
}

impl<P: Probe, F: Fetch> Plugin for InternetConnection<P, F> {
    fn name(&self) -> &'static str {
        "InternetConnection"
    }

    fn on_loaded(&mut self) -> Result<()> {
        let settings = &self.settings;
        ensure_icons(
            &[&settings.connected_icon, &settings.disconnected_icon],
            &self.fetcher,
        )
        .context("Failed to bootstrap connection icons")?;

        self.invert = read_invert_flag(&settings.host_config);
        self.icons.clear();
        info!("Internet connection plugin loaded (invert: {})", self.invert);
        Ok(())
    }

    fn on_ui_setup(&mut self, ui: &View) {
        let connected = self.probe.is_internet_available();
        let icon = self.icon_widget(connected);
        let label = Box::new(LabelPlaceholder);

        // Without an icon the next update retries from Unset
        self.state = if icon.is_ok() {
            ConnectivityState::from_probe(connected)
        } else {
            ConnectivityState::Unset
        };

        ui.with_registry(|registry| {
            match icon {
                Ok(icon) => Self::swap_icon(registry, icon),
                Err(e) => {
                    error!("Error loading connection icon: {:#}", e);
                    debug!("{:?}", e);
                }
            }
            remove_if_present(registry, LABEL_KEY);
            if let Err(e) = registry.add_element(LABEL_KEY, label) {
                error!("Error adding label placeholder: {}", e);
            }
        });

        info!("Connection status set up (connected: {})", connected);
    }

    fn on_ui_update(&mut self, ui: &View) {
        if self.state == ConnectivityState::Unloaded {
            return;
        }

        let connected = self.probe.is_internet_available();
        if !self.state.is_transition(connected) {
            return;
        }

        debug!("Connectivity changed: {:?} -> connected: {}", self.state, connected);
        self.state = ConnectivityState::from_probe(connected);

        match self.icon_widget(connected) {
            Ok(icon) => ui.with_registry(|registry| Self::swap_icon(registry, icon)),
            Err(e) => {
                error!("Error updating connection status: {:#}", e);
                debug!("{:?}", e);
            }
        }
    }

    fn on_unload(&mut self, ui: &View) {
        ui.with_registry(|registry| {
            remove_if_present(registry, STATUS_KEY);
            remove_if_present(registry, LABEL_KEY);
        });

        self.state = ConnectivityState::Unloaded;
        info!("Internet connection plugin unloaded");
    }
}
