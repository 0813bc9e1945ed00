// Image loading
// Decodes sticker images off the dispatch loop and hands results back to it

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::thread;

use image::DynamicImage;
use log::{debug, warn};
use smithay_client_toolkit::reexports::calloop::channel::Sender;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("image file not found: {0}")]
    Missing(PathBuf),
    #[error("failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
}

/// Decoded image ready for display.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Raw BGRA pixel data (4 bytes per pixel)
    pub bgra: Vec<u8>,
    /// Mipmap levels for faster downscaling (progressively half-sized versions)
    pub mipmaps: Vec<MipmapLevel>,
}

/// A single mipmap level
#[derive(Debug, Clone)]
pub struct MipmapLevel {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Result of a background decode, delivered on the dispatch loop.
#[derive(Debug)]
pub struct LoadResult {
    pub item_id: Uuid,
    pub result: Result<ImageData, LoadError>,
}

/// Decode an image file. Checks existence first so a moved or deleted file is
/// distinguishable from a corrupt one.
pub fn load_file(path: &Path) -> Result<ImageData, LoadError> {
    if !path.exists() {
        return Err(LoadError::Missing(path.to_path_buf()));
    }
    let data = fs::read(path).map_err(|e| LoadError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    load_bytes(&data).map_err(|e| match e {
        LoadError::Decode { message, .. } => LoadError::Decode {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })
}

/// Decode an image from raw bytes, auto-detecting the format.
pub fn load_bytes(data: &[u8]) -> Result<ImageData, LoadError> {
    let decode = || -> Result<DynamicImage, image::ImageError> {
        let format = image::guess_format(data)?;
        image::load(Cursor::new(data), format)
    };
    let img = decode().map_err(|e| LoadError::Decode {
        path: PathBuf::from("<memory>"),
        message: e.to_string(),
    })?;
    Ok(prepare(img))
}

/// Decode on a worker thread; the result crosses back to the dispatch loop
/// through the channel before any window state is touched.
pub fn spawn_load(item_id: Uuid, path: PathBuf, sender: Sender<LoadResult>) {
    thread::spawn(move || {
        debug!("Decoding {} in the background", path.display());
        let result = load_file(&path);
        if sender.send(LoadResult { item_id, result }).is_err() {
            warn!(
                "Dispatch loop gone before {} finished decoding",
                path.display()
            );
        }
    });
}

/// Convert to BGRA and build mipmaps.
fn prepare(img: DynamicImage) -> ImageData {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    // Wayland ARGB8888 is BGRA in little-endian memory order.
    let mut bgra = rgba.into_raw();
    for pixel in bgra.chunks_exact_mut(4) {
        pixel.swap(0, 2);
    }

    let mipmaps = generate_mipmaps(width, height, &bgra);

    ImageData {
        width,
        height,
        bgra,
        mipmaps,
    }
}

/// Generate progressively half-sized versions with a 2x2 box filter, used for
/// cheap downscaling while the window is much smaller than the source.
fn generate_mipmaps(width: u32, height: u32, data: &[u8]) -> Vec<MipmapLevel> {
    let mut mipmaps = Vec::new();
    let mut current_width = width;
    let mut current_height = height;
    let mut current_data = data.to_vec();

    while current_width > 64 && current_height > 64 && mipmaps.len() < 8 {
        let next_width = current_width / 2;
        let next_height = current_height / 2;
        if next_width < 32 || next_height < 32 {
            break;
        }

        let mut next_data = vec![0u8; (next_width * next_height * 4) as usize];
        for y in 0..next_height {
            for x in 0..next_width {
                let mut sums = [0u32; 4];
                for dy in 0..2 {
                    for dx in 0..2 {
                        let sx = (x * 2 + dx).min(current_width - 1);
                        let sy = (y * 2 + dy).min(current_height - 1);
                        let idx = ((sy * current_width + sx) * 4) as usize;
                        for (c, sum) in sums.iter_mut().enumerate() {
                            *sum += current_data[idx + c] as u32;
                        }
                    }
                }
                let dst = ((y * next_width + x) * 4) as usize;
                for (c, sum) in sums.iter().enumerate() {
                    next_data[dst + c] = (sum / 4) as u8;
                }
            }
        }

        mipmaps.push(MipmapLevel {
            width: next_width,
            height: next_height,
            data: next_data.clone(),
        });

        current_width = next_width;
        current_height = next_height;
        current_data = next_data;
    }

    mipmaps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut out = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn test_missing_file() {
        let err = load_file(Path::new("/nonexistent/sticker.png")).unwrap_err();
        assert!(matches!(err, LoadError::Missing(_)));
    }

    #[test]
    fn test_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"definitely not an image").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
    }

    #[test]
    fn test_decode_converts_to_bgra() {
        let data = load_bytes(&png_bytes(2, 2)).unwrap();
        assert_eq!((data.width, data.height), (2, 2));
        // RGBA (10,20,30,255) becomes BGRA (30,20,10,255).
        assert_eq!(&data.bgra[0..4], &[30, 20, 10, 255]);
    }

    #[test]
    fn test_small_images_have_no_mipmaps() {
        let data = load_bytes(&png_bytes(32, 32)).unwrap();
        assert!(data.mipmaps.is_empty());
    }

    #[test]
    fn test_mipmap_chain_halves() {
        let data = load_bytes(&png_bytes(256, 128)).unwrap();
        assert!(!data.mipmaps.is_empty());
        assert_eq!(data.mipmaps[0].width, 128);
        assert_eq!(data.mipmaps[0].height, 64);
        for level in &data.mipmaps {
            assert_eq!(level.data.len(), (level.width * level.height * 4) as usize);
        }
    }
}
