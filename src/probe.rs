// Connectivity probe module
// Single-shot TCP reachability check against a well-known host

use log::debug;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

/// Default host used to decide whether the internet is reachable
pub const DEFAULT_PROBE_HOST: &str = "www.google.com";
/// Default port for the probe connection
pub const DEFAULT_PROBE_PORT: u16 = 80;
/// Default connect timeout for a single probe
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Something that can answer "is the internet reachable right now?"
pub trait Probe {
    fn is_internet_available(&self) -> bool;
}

impl<F> Probe for F
where
    F: Fn() -> bool,
{
    fn is_internet_available(&self) -> bool {
        self()
    }
}

/// Probe that opens (and immediately drops) a TCP connection
#[derive(Debug, Clone)]
pub struct TcpProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn addresses(&self) -> Vec<SocketAddr> {
        match (self.host.as_str(), self.port).to_socket_addrs() {
            Ok(addrs) => addrs.collect(),
            Err(e) => {
                debug!("Could not resolve {}: {}", self.host, e);
                Vec::new()
            }
        }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_HOST, DEFAULT_PROBE_PORT, DEFAULT_PROBE_TIMEOUT)
    }
}

impl Probe for TcpProbe {
    fn is_internet_available(&self) -> bool {
        connect_any(&self.addresses(), self.timeout)
    }
}

/// Try each address in turn until one accepts; all attempts share one deadline
fn connect_any(addrs: &[SocketAddr], timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;

    for addr in addrs {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            debug!("Probe timed out before trying {}", addr);
            return false;
        }

        match TcpStream::connect_timeout(addr, remaining) {
            Ok(_stream) => return true,
            Err(e) => debug!("Probe to {} failed: {}", addr, e),
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn reachable_listener_is_available() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let probe = TcpProbe::new("127.0.0.1", port, Duration::from_millis(500));
        assert!(probe.is_internet_available());
    }

    #[test]
    fn refused_connection_is_unavailable() {
        // Bind then drop to get a port nobody listens on
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let probe = TcpProbe::new("127.0.0.1", port, Duration::from_millis(500));
        assert!(!probe.is_internet_available());
    }

    #[test]
    fn unresolvable_host_is_unavailable() {
        let probe = TcpProbe::new("host.invalid", 80, Duration::from_millis(200));
        assert!(!probe.is_internet_available());
    }

    #[test]
    fn unroutable_address_respects_timeout() {
        // TEST-NET-1 is reserved and never answers
        let timeout = Duration::from_millis(300);
        let probe = TcpProbe::new("192.0.2.1", 80, timeout);

        let started = Instant::now();
        assert!(!probe.is_internet_available());
        assert!(started.elapsed() < timeout + Duration::from_secs(1));
    }

    #[test]
    fn later_address_is_tried_after_refusal() {
        let refused = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let open = listener.local_addr().unwrap();

        assert!(connect_any(&[refused, open], Duration::from_millis(500)));
        assert!(!connect_any(&[refused], Duration::from_millis(500)));
    }

    #[test]
    fn attempts_share_one_deadline() {
        let timeout = Duration::from_millis(300);
        let unroutable: Vec<SocketAddr> = (1..=4)
            .map(|i| SocketAddr::from(([192, 0, 2, i], 80)))
            .collect();

        let started = Instant::now();
        assert!(!connect_any(&unroutable, timeout));
        assert!(started.elapsed() < timeout + Duration::from_secs(1));
    }

    #[test]
    fn no_addresses_is_unavailable() {
        assert!(!connect_any(&[], Duration::from_millis(100)));
    }

    #[test]
    fn closures_are_probes() {
        let online = || true;
        let offline = || false;
        assert!(online.is_internet_available());
        assert!(!offline.is_internet_available());
    }

    #[test]
    fn default_targets_well_known_host() {
        let probe = TcpProbe::default();
        assert_eq!(probe.host, DEFAULT_PROBE_HOST);
        assert_eq!(probe.port, 80);
        assert_eq!(probe.timeout(), Duration::from_millis(500));
    }
}
