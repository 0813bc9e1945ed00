// Command line interface
// Argument parsing and stdin pipe handling

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

/// stickpin - A pinnable sticker image overlay for Wayland
#[derive(Parser, Debug)]
#[command(name = "stickpin")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Image file to show as a sticker (added to the library if new; image
    /// data can also be piped via stdin)
    #[arg(value_name = "IMAGE")]
    pub image_path: Option<PathBuf>,

    /// Open a saved library item by display name or id (repeatable)
    #[arg(short, long, value_name = "NAME")]
    pub open: Vec<String>,

    /// Open every item in the library
    #[arg(long)]
    pub all: bool,

    /// Override the window opacity in percent (0 - 100)
    #[arg(long, value_parser = parse_percent)]
    pub opacity: Option<u8>,

    /// Start pinned: click-through, always on top, no interaction
    #[arg(long)]
    pub pinned: bool,

    /// Use an alternate library file
    #[arg(long, value_name = "FILE")]
    pub library: Option<PathBuf>,
}

/// Parsed arguments with resolved image source
#[derive(Debug)]
pub struct ParsedArgs {
    pub image_path: Option<PathBuf>,
    pub image_data: Option<Vec<u8>>,
    pub open: Vec<String>,
    pub all: bool,
    pub opacity: Option<u8>,
    pub pinned: bool,
    pub library: Option<PathBuf>,
}

/// Parse an opacity percentage and ensure it's within the valid range
fn parse_percent(s: &str) -> Result<u8, String> {
    let percent: u8 = s.parse().map_err(|_| "Invalid opacity value")?;
    if percent > 100 {
        return Err("Opacity must be between 0 and 100".to_string());
    }
    Ok(percent)
}

/// Check if stdin has data available (is a pipe)
fn stdin_has_data() -> bool {
    !atty::is(atty::Stream::Stdin)
}

/// Read image data from stdin
fn read_stdin() -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Parse command line arguments and handle stdin input
pub fn parse_args() -> Result<ParsedArgs> {
    let args = Args::parse();

    let image_data = if stdin_has_data() {
        let data = read_stdin()?;
        if data.is_empty() {
            bail!("No data received from stdin");
        }
        Some(data)
    } else {
        None
    };

    if args.image_path.is_none() && image_data.is_none() && args.open.is_empty() && !args.all {
        bail!(
            "Nothing to show. Provide an image path, pipe image data to stdin, \
             or select saved items.\n\
             Usage: stickpin <IMAGE> [OPTIONS]\n\
             Or:    stickpin --open <NAME>\n\
             Or:    cat image.png | stickpin [OPTIONS]"
        );
    }

    Ok(ParsedArgs {
        image_path: args.image_path,
        image_data,
        open: args.open,
        all: args.all,
        opacity: args.opacity,
        pinned: args.pinned,
        library: args.library,
    })
}
