// Command line interface module
// Options for the reference host that drives the status plugin

use anyhow::{bail, Result};
use clap::Parser;
use inet_status::config::{default_asset_dir, HOST_CONFIG_PATH};
use inet_status::Settings;
use std::path::PathBuf;
use std::time::Duration;

/// inet-status - Show internet connectivity as an icon on a display canvas
#[derive(Parser, Debug)]
#[command(name = "inet-status")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host configuration file scanned for `ui.invert`
    #[arg(short, long, default_value = HOST_CONFIG_PATH)]
    pub config: PathBuf,

    /// Directory holding the status icons (defaults to the executable's directory)
    #[arg(short, long)]
    pub asset_dir: Option<PathBuf>,

    /// Host probed to decide connectivity
    #[arg(long, default_value = "www.google.com")]
    pub probe_host: String,

    /// Port probed on the probe host
    #[arg(long, default_value = "80")]
    pub probe_port: u16,

    /// Probe timeout in milliseconds
    #[arg(long, default_value = "500")]
    pub probe_timeout_ms: u64,

    /// Canvas width in pixels
    #[arg(long, default_value = "250")]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value = "122")]
    pub height: u32,

    /// Seconds between UI updates
    #[arg(short, long, default_value = "5", value_parser = parse_interval)]
    pub interval: u64,

    /// Number of UI updates before unloading (0 runs forever)
    #[arg(short = 'n', long, default_value = "0")]
    pub ticks: u64,

    /// Write every rendered frame to this PNG file
    #[arg(short, long, value_name = "PNG")]
    pub output: Option<PathBuf>,
}

/// Parsed arguments resolved into plugin settings and host options
#[derive(Debug)]
pub struct ParsedArgs {
    pub settings: Settings,
    pub width: u32,
    pub height: u32,
    pub interval: Duration,
    pub ticks: Option<u64>,
    pub output: Option<PathBuf>,
}

/// Parse the update interval and reject zero
fn parse_interval(s: &str) -> Result<u64, String> {
    let secs: u64 = s.parse().map_err(|_| "Invalid interval value")?;
    if secs == 0 {
        return Err("Interval must be at least 1 second".to_string());
    }
    Ok(secs)
}

/// Parse command line arguments into host options
pub fn parse_args() -> Result<ParsedArgs> {
    resolve(Args::parse())
}

fn resolve(args: Args) -> Result<ParsedArgs> {
    if args.width == 0 || args.height == 0 {
        bail!("Canvas size must be non-zero, got {}x{}", args.width, args.height);
    }

    let asset_dir = args.asset_dir.unwrap_or_else(default_asset_dir);
    let mut settings = Settings::with_asset_dir(&asset_dir);
    settings.host_config = args.config;
    settings.probe_host = args.probe_host;
    settings.probe_port = args.probe_port;
    settings.probe_timeout = Duration::from_millis(args.probe_timeout_ms);

    Ok(ParsedArgs {
        settings,
        width: args.width,
        height: args.height,
        interval: Duration::from_secs(args.interval),
        ticks: (args.ticks > 0).then_some(args.ticks),
        output: args.output,
    })
}
