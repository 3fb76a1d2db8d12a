// inet-status - Reference display host
// Loads the connection plugin and drives its lifecycle against an in-memory canvas

mod cli;

use anyhow::{Context, Result};
use inet_status::image_loader::encode_png;
use inet_status::{InternetConnection, Plugin, View};
use log::{info, warn};
use std::fs;
use std::path::Path;
use std::thread;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::parse_args()?;

    let mut plugin = InternetConnection::new(args.settings);
    info!("Loading plugin {}", plugin.name());
    plugin.on_loaded()?;

    let view = View::new(args.width, args.height);
    let (width, height) = view.dimensions();
    info!("Display canvas: {}x{}", width, height);

    plugin.on_ui_setup(&view);
    write_frame(&view, args.output.as_deref());

    let mut tick = 0u64;
    while args.ticks.map_or(true, |limit| tick < limit) {
        thread::sleep(args.interval);
        plugin.on_ui_update(&view);
        write_frame(&view, args.output.as_deref());
        tick += 1;
    }

    info!(
        "Exiting after {} updates (last connected: {:?})",
        tick,
        plugin.state().is_connected()
    );
    plugin.on_unload(&view);
    Ok(())
}

/// Render the view and persist it when an output path is configured
fn write_frame(view: &View, output: Option<&Path>) {
    let Some(path) = output else {
        return;
    };

    if let Err(e) = save_frame(view, path) {
        warn!("Could not write frame: {:#}", e);
    }
}

fn save_frame(view: &View, path: &Path) -> Result<()> {
    let png = encode_png(&view.render())?;
    fs::write(path, png).with_context(|| format!("Failed to write {}", path.display()))
}
