// Connectivity state module
// Last-known connectivity tracked by the display controller

/// What the controller currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityState {
    /// No probe acted upon yet
    #[default]
    Unset,
    Connected,
    Disconnected,
    /// Plugin unloaded; updates are ignored until the next setup
    Unloaded,
}

impl ConnectivityState {
    pub fn from_probe(connected: bool) -> Self {
        if connected {
            Self::Connected
        } else {
            Self::Disconnected
        }
    }

    /// Whether a probe result differs from what is displayed
    pub fn is_transition(self, connected: bool) -> bool {
        self != Self::from_probe(connected)
    }

    pub fn is_connected(self) -> Option<bool> {
        match self {
            Self::Connected => Some(true),
            Self::Disconnected => Some(false),
            Self::Unset | Self::Unloaded => None,
        }
    }
}
