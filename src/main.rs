// stickpin - A pinnable sticker image overlay for Wayland
// Shows library images as floating always-on-top stickers that can be locked
// into click-through overlays

mod app;
mod cli;
mod compositor;
mod fade;
mod font;
mod gesture;
mod image_loader;
mod library;
mod menu;
mod model;
mod overlay;
mod persist;
mod pin;
mod prompt;
mod registry;
mod surface;
mod transform;
mod wayland;

use anyhow::Result;
use log::info;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args = cli::parse_args()?;
    info!(
        "Starting stickpin with image: {:?}, open: {:?}, all: {}",
        args.image_path, args.open, args.all
    );

    app::run(args)
}
