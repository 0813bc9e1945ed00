// Session orchestration
// Resolves which stickers to open and hands them to the Wayland host

use anyhow::{bail, Result};
use log::{info, warn};
use uuid::Uuid;

use crate::cli::ParsedArgs;
use crate::image_loader::{self, ImageData};
use crate::library::ImageLibrary;
use crate::model::ImageItem;
use crate::wayland;

/// A sticker fed from stdin: fully interactive but never persisted.
pub struct TransientSticker {
    pub item: ImageItem,
    pub image: ImageData,
}

pub fn run(args: ParsedArgs) -> Result<()> {
    let library = match &args.library {
        Some(path) => ImageLibrary::at(path),
        None => ImageLibrary::open_default()?,
    };
    let mut items = library.load();
    info!(
        "Library {} holds {} items",
        library.path().display(),
        items.len()
    );

    let transient = match &args.image_data {
        Some(data) => {
            // Piped images are decoded up front; the dispatch loop is not
            // running yet, so nothing blocks.
            let image = image_loader::load_bytes(data)?;
            let mut item = ImageItem::new("piped image", "<stdin>");
            apply_overrides(&mut item, &args);
            info!("Showing {}x{} sticker from stdin", image.width, image.height);
            Some(TransientSticker { item, image })
        }
        None => None,
    };

    let mut open_ids: Vec<Uuid> = Vec::new();

    if let Some(path) = &args.image_path {
        let id = match items.iter().find(|item| item.file_path == *path) {
            Some(item) => item.id,
            None => {
                let name = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let item = ImageItem::new(name, path.clone());
                info!("Adding {} to the library", path.display());
                let id = item.id;
                items.push(item);
                id
            }
        };
        open_ids.push(id);
    }

    for selector in &args.open {
        match find_item(&items, selector) {
            Some(id) => open_ids.push(id),
            None => warn!("No library item matches '{}'", selector),
        }
    }

    if args.all {
        open_ids.extend(items.iter().map(|item| item.id));
    }

    let mut seen = Vec::new();
    open_ids.retain(|id| {
        if seen.contains(id) {
            false
        } else {
            seen.push(*id);
            true
        }
    });

    if open_ids.is_empty() && transient.is_none() {
        bail!("No stickers to open");
    }

    // Stamp usage and apply one-shot overrides before the first save.
    for item in items.iter_mut().filter(|item| open_ids.contains(&item.id)) {
        apply_overrides(item, &args);
        item.touch();
    }
    if !open_ids.is_empty() {
        library.save(&items);
    }

    wayland::run(library, items, open_ids, transient)
}

fn apply_overrides(item: &mut ImageItem, args: &ParsedArgs) {
    if let Some(opacity) = args.opacity {
        item.opacity = opacity;
    }
    if args.pinned {
        item.is_pinned = true;
    }
}

/// Match a selector against item ids and display names, case-insensitively.
fn find_item(items: &[ImageItem], selector: &str) -> Option<Uuid> {
    if let Ok(id) = selector.parse::<Uuid>() {
        if items.iter().any(|item| item.id == id) {
            return Some(id);
        }
    }
    items
        .iter()
        .find(|item| item.display_name.eq_ignore_ascii_case(selector))
        .map(|item| item.id)
}
