//! The application icon: a Poké Ball drawn pixel by pixel.
use image::imageops::{self, FilterType};
use image::{ImageResult, Rgba, RgbaImage};

use std::path::Path;

pub const SIZE: u32 = 1024;

/// ICO frames cannot be larger.
pub const ICO_SIZE: u32 = 256;

const OUTLINE: f32 = 20.0;
const DIVIDER: f32 = 40.0;

const TRANSPARENT: Rgba<u8> = Rgba([255, 255, 255, 0]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

pub fn draw(size: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| pixel(size, x, y))
}

fn pixel(size: u32, x: u32, y: u32) -> Rgba<u8> {
    let scale = size as f32 / SIZE as f32;
    let radius = size as f32 / 2.0;

    let dx = x as f32 + 0.5 - radius;
    let dy = y as f32 + 0.5 - radius;
    let distance = dx.hypot(dy);

    if distance <= (size / 9) as f32 {
        WHITE
    } else if distance <= (size / 6) as f32 {
        BLACK
    } else if dy.abs() <= DIVIDER * scale / 2.0 {
        BLACK
    } else if distance > radius {
        TRANSPARENT
    } else if distance > radius - OUTLINE * scale {
        BLACK
    } else if dy < 0.0 {
        RED
    } else {
        WHITE
    }
}

/// Writes `icon.png` and a downscaled `icon.ico` into `directory`.
pub fn save(directory: &Path) -> ImageResult<()> {
    let icon = draw(SIZE);
    icon.save(directory.join("icon.png"))?;

    let small = imageops::resize(&icon, ICO_SIZE, ICO_SIZE, FilterType::Lanczos3);
    small.save(directory.join("icon.ico"))?;

    log::info!("Saved icon.png and icon.ico in {}", directory.display());

    Ok(())
}
