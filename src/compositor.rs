// Frame composition
// Builds each presented frame: aspect fit, rotation/flip, blending and chrome

use crate::font;
use crate::gesture::{handle_rect, ALL_HANDLES};
use crate::image_loader::ImageData;
use crate::menu::{ContextMenu, MENU_ITEM_HEIGHT, MENU_WIDTH};
use crate::transform::{Rect, StickerState};

/// Sentinel marking "present as transparent" pixels, BGRA. RGB(1,0,1) is
/// nearly-but-not-quite magenta; real images are not expected to contain it.
pub const SENTINEL_BGRA: [u8; 4] = [1, 0, 1, 255];

pub const BORDER_THICKNESS: u32 = 2;
/// Side length of the settings affordance square.
pub const SETTINGS_SIZE: u32 = 24;
const SETTINGS_MARGIN: i32 = 5;

// Chrome colors, BGRA.
const HOVER_BORDER: [u8; 4] = [255, 255, 255, 68];
const ROTATION_BORDER: [u8; 4] = [0, 200, 255, 100];
const ROTATION_HINT_COLOR: [u8; 4] = [0, 200, 255, 200];
const HANDLE_FILL: [u8; 4] = [255, 255, 255, 200];
const SETTINGS_BG: [u8; 4] = [30, 30, 30, 200];
const MENU_BG: [u8; 4] = [60, 60, 60, 230];
const MENU_BG_HOVER: [u8; 4] = [80, 180, 180, 230];
const MENU_BORDER: [u8; 4] = [100, 100, 100, 255];
const MENU_TEXT: [u8; 4] = [255, 255, 255, 255];

const ROTATION_HINT: &str = "Rotation Mode (R)";

/// Scaling quality: fast nearest-neighbor while a resize gesture is active,
/// bilinear everywhere else to keep the sentinel boundary clean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    Fast,
    High,
}

/// Everything one frame needs.
pub struct FrameParams<'a> {
    pub image: Option<&'a ImageData>,
    pub state: &'a StickerState,
    /// Effective alpha: fade ramp times persisted opacity.
    pub alpha: f32,
    pub hovered: bool,
    pub quality: Quality,
    pub menu: &'a ContextMenu,
}

/// Largest rectangle with the image's aspect ratio that fits the client area,
/// centered. Degenerate inputs produce an empty rectangle.
pub fn aspect_fit(client: (u32, u32), image: (u32, u32)) -> Rect {
    if client.0 == 0 || client.1 == 0 || image.0 == 0 || image.1 == 0 {
        return Rect::EMPTY;
    }

    let image_aspect = image.0 as f32 / image.1 as f32;
    let client_aspect = client.0 as f32 / client.1 as f32;

    let (width, height) = if image_aspect > client_aspect {
        let width = client.0;
        (width, (width as f32 / image_aspect) as u32)
    } else {
        let height = client.1;
        ((height as f32 * image_aspect) as u32, height)
    };

    let x = (client.0 as i32 - width as i32) / 2;
    let y = (client.1 as i32 - height as i32) / 2;
    Rect::new(x, y, width, height)
}

/// Placement of the settings affordance shown while hovered.
pub fn settings_rect(client: (u32, u32)) -> Rect {
    Rect::new(
        client.0 as i32 - SETTINGS_SIZE as i32 - SETTINGS_MARGIN,
        SETTINGS_MARGIN,
        SETTINGS_SIZE,
        SETTINGS_SIZE,
    )
}

/// Paint one frame into a BGRA canvas of `width` x `height`.
pub fn render_frame(canvas: &mut [u8], width: u32, height: u32, params: &FrameParams) {
    // Everything not painted over stays sentinel and presents as transparent.
    for pixel in canvas.chunks_exact_mut(4) {
        pixel.copy_from_slice(&SENTINEL_BGRA);
    }

    if let Some(image) = params.image {
        let fit = aspect_fit((width, height), (image.width, image.height));
        if !fit.is_empty() {
            draw_image(canvas, width, height, image, fit, params);
        }
    }

    let state = params.state;
    if params.hovered && !state.pinned {
        let border = if state.rotation_mode {
            ROTATION_BORDER
        } else {
            HOVER_BORDER
        };
        draw_border(canvas, width, height, border);

        if state.rotation_mode {
            draw_text(canvas, width, height, 5, 5, ROTATION_HINT, ROTATION_HINT_COLOR);
        } else {
            for handle in ALL_HANDLES {
                fill_rect(canvas, width, height, handle_rect(handle, (width, height)), HANDLE_FILL);
            }
        }

        draw_settings_affordance(canvas, width, height);
    }

    if params.menu.is_visible() {
        draw_menu(canvas, width, height, params.menu);
    }
}

/// Draw the image into its fit rectangle, applying rotation, flips and the
/// effective alpha. The transform is inverse-mapped per destination pixel.
fn draw_image(
    canvas: &mut [u8],
    width: u32,
    height: u32,
    image: &ImageData,
    fit: Rect,
    params: &FrameParams,
) {
    let state = params.state;
    let alpha = params.alpha.clamp(0.0, 1.0);
    let (src_w, src_h, src) = select_level(image, fit);

    let angle = state.rotation_angle();
    let transformed = angle != 0.0 || state.flip_horizontal || state.flip_vertical;

    if !transformed {
        // Fast path: straight scale into the fit rectangle.
        let x0 = fit.x.max(0);
        let y0 = fit.y.max(0);
        let x1 = (fit.x + fit.width as i32).min(width as i32);
        let y1 = (fit.y + fit.height as i32).min(height as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                let u = ((x - fit.x) as f32 + 0.5) / fit.width as f32 * src_w as f32;
                let v = ((y - fit.y) as f32 + 0.5) / fit.height as f32 * src_h as f32;
                let pixel = sample(src, src_w, src_h, u, v, params.quality);
                put_pixel(canvas, width, x, y, pixel, alpha);
            }
        }
        return;
    }

    let (cx, cy) = fit.center();
    let rad = (angle as f64).to_radians();
    let (sin, cos) = rad.sin_cos();

    for y in 0..height as i32 {
        for x in 0..width as i32 {
            // Pixel center back through the inverse transform: rotate by the
            // negative angle, then un-flip (flips are their own inverse).
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            let mut rx = dx * cos + dy * sin;
            let mut ry = -dx * sin + dy * cos;
            if state.flip_horizontal {
                rx = -rx;
            }
            if state.flip_vertical {
                ry = -ry;
            }
            let px = cx + rx;
            let py = cy + ry;

            let fx = px - fit.x as f64;
            let fy = py - fit.y as f64;
            if fx < 0.0 || fy < 0.0 || fx >= fit.width as f64 || fy >= fit.height as f64 {
                continue;
            }

            let u = fx as f32 / fit.width as f32 * src_w as f32;
            let v = fy as f32 / fit.height as f32 * src_h as f32;
            let pixel = sample(src, src_w, src_h, u, v, params.quality);
            put_pixel(canvas, width, x, y, pixel, alpha);
        }
    }
}

/// Pick the smallest mipmap level that still covers the fit rectangle.
fn select_level(image: &ImageData, fit: Rect) -> (u32, u32, &[u8]) {
    let needed = (fit.width as f32 / image.width as f32)
        .min(fit.height as f32 / image.height as f32);
    let mut best: (u32, u32, &[u8]) = (image.width, image.height, &image.bgra);
    for level in &image.mipmaps {
        let scale = level.width as f32 / image.width as f32;
        if scale >= needed {
            best = (level.width, level.height, &level.data);
        } else {
            break;
        }
    }
    best
}

fn sample(src: &[u8], src_w: u32, src_h: u32, u: f32, v: f32, quality: Quality) -> [u8; 4] {
    match quality {
        Quality::Fast => {
            let x = (u as u32).min(src_w - 1);
            let y = (v as u32).min(src_h - 1);
            let idx = ((y * src_w + x) * 4) as usize;
            [src[idx], src[idx + 1], src[idx + 2], src[idx + 3]]
        }
        Quality::High => sample_bilinear(src, src_w, src_h, u - 0.5, v - 0.5),
    }
}

fn sample_bilinear(src: &[u8], src_w: u32, src_h: u32, u: f32, v: f32) -> [u8; 4] {
    let u = u.max(0.0);
    let v = v.max(0.0);
    let x0 = (u as u32).min(src_w - 1);
    let y0 = (v as u32).min(src_h - 1);
    let x1 = (x0 + 1).min(src_w - 1);
    let y1 = (y0 + 1).min(src_h - 1);
    let fx = u - x0 as f32;
    let fy = v - y0 as f32;

    let at = |x: u32, y: u32| -> [f32; 4] {
        let idx = ((y * src_w + x) * 4) as usize;
        [
            src[idx] as f32,
            src[idx + 1] as f32,
            src[idx + 2] as f32,
            src[idx + 3] as f32,
        ]
    };

    let p00 = at(x0, y0);
    let p10 = at(x1, y0);
    let p01 = at(x0, y1);
    let p11 = at(x1, y1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] * (1.0 - fx) + p10[c] * fx;
        let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
        out[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Write a sampled pixel, scaling only its alpha channel.
fn put_pixel(canvas: &mut [u8], width: u32, x: i32, y: i32, pixel: [u8; 4], alpha: f32) {
    let idx = ((y as u32 * width + x as u32) * 4) as usize;
    canvas[idx] = pixel[0];
    canvas[idx + 1] = pixel[1];
    canvas[idx + 2] = pixel[2];
    canvas[idx + 3] = (pixel[3] as f32 * alpha) as u8;
}

fn draw_border(canvas: &mut [u8], width: u32, height: u32, color: [u8; 4]) {
    let t = BORDER_THICKNESS;
    fill_rect(canvas, width, height, Rect::new(0, 0, width, t), color);
    fill_rect(
        canvas,
        width,
        height,
        Rect::new(0, height as i32 - t as i32, width, t),
        color,
    );
    fill_rect(canvas, width, height, Rect::new(0, 0, t, height), color);
    fill_rect(
        canvas,
        width,
        height,
        Rect::new(width as i32 - t as i32, 0, t, height),
        color,
    );
}

fn draw_settings_affordance(canvas: &mut [u8], width: u32, height: u32) {
    let rect = settings_rect((width, height));
    fill_rect(canvas, width, height, rect, SETTINGS_BG);
    // Three bars suggesting a menu.
    for i in 0..3 {
        let bar = Rect::new(rect.x + 5, rect.y + 6 + i * 5, SETTINGS_SIZE - 10, 2);
        fill_rect(canvas, width, height, bar, MENU_TEXT);
    }
}

fn draw_menu(canvas: &mut [u8], width: u32, height: u32, menu: &ContextMenu) {
    let (menu_x, menu_y) = menu.pos();

    for (i, item) in menu.items().iter().enumerate() {
        let item_y = menu_y + (i as u32 * MENU_ITEM_HEIGHT) as i32;
        let bg = if menu.hover() == Some(i) {
            MENU_BG_HOVER
        } else {
            MENU_BG
        };
        fill_rect(
            canvas,
            width,
            height,
            Rect::new(menu_x, item_y, MENU_WIDTH, MENU_ITEM_HEIGHT),
            bg,
        );

        if item.checked {
            fill_rect(canvas, width, height, Rect::new(menu_x + 5, item_y + 10, 5, 5), MENU_TEXT);
        }
        draw_text(canvas, width, height, menu_x + 16, item_y + 9, &item.label, MENU_TEXT);
    }

    // Border around the whole menu.
    let menu_h = menu.height();
    for x in menu_x..menu_x + MENU_WIDTH as i32 {
        draw_pixel(canvas, width, height, x, menu_y, MENU_BORDER);
        draw_pixel(canvas, width, height, x, menu_y + menu_h as i32 - 1, MENU_BORDER);
    }
    for y in menu_y..menu_y + menu_h as i32 {
        draw_pixel(canvas, width, height, menu_x, y, MENU_BORDER);
        draw_pixel(canvas, width, height, menu_x + MENU_WIDTH as i32 - 1, y, MENU_BORDER);
    }
}

fn draw_text(
    canvas: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    text: &str,
    color: [u8; 4],
) {
    let mut cx = x;
    for c in text.chars() {
        let rows = font::glyph(c);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..font::GLYPH_WIDTH {
                if (bits >> (font::GLYPH_WIDTH - 1 - col)) & 1 != 0 {
                    draw_pixel(canvas, width, height, cx + col as i32, y + row as i32, color);
                }
            }
        }
        cx += font::GLYPH_ADVANCE as i32;
    }
}

fn fill_rect(canvas: &mut [u8], width: u32, height: u32, rect: Rect, color: [u8; 4]) {
    let x0 = rect.x.max(0);
    let y0 = rect.y.max(0);
    let x1 = (rect.x + rect.width as i32).min(width as i32);
    let y1 = (rect.y + rect.height as i32).min(height as i32);
    for y in y0..y1 {
        for x in x0..x1 {
            let idx = ((y as u32 * width + x as u32) * 4) as usize;
            canvas[idx..idx + 4].copy_from_slice(&color);
        }
    }
}

fn draw_pixel(canvas: &mut [u8], width: u32, height: u32, x: i32, y: i32, color: [u8; 4]) {
    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
        return;
    }
    let idx = ((y as u32 * width + x as u32) * 4) as usize;
    canvas[idx..idx + 4].copy_from_slice(&color);
}
