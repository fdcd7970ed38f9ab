use std::sync::Arc;

use anyhow::Context;

use crate::foundation::{
    core::Canvas,
    error::{BadgeError, BadgeResult},
    math::premultiply_rgba8_in_place,
};

/// Decoded bitmap in premultiplied RGBA8 form.
///
/// Pixel storage is shared, so cloning is cheap and a loaded image is never mutated: a new
/// upload replaces the whole value.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl RasterImage {
    /// Build from straight-alpha RGBA8 pixels.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> BadgeResult<Self> {
        Canvas::new(width, height)?;
        if rgba.len() != width as usize * height as usize * 4 {
            return Err(BadgeError::decode(format!(
                "expected {} bytes for {width}x{height} RGBA8, got {}",
                width as usize * height as usize * 4,
                rgba.len()
            )));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }

    /// Native dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Decode encoded image bytes (PNG, JPEG, WebP, ...) and convert to premultiplied RGBA8.
///
/// Images wider or taller than `u16::MAX` are rejected; the rasterizer cannot draw them.
pub fn decode_image(bytes: &[u8]) -> BadgeResult<RasterImage> {
    if bytes.is_empty() {
        return Err(BadgeError::decode("image payload is empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| BadgeError::decode(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
        return Err(BadgeError::decode(format!(
            "image {width}x{height} exceeds the {} px surface limit",
            u16::MAX
        )));
    }
    RasterImage::from_straight_rgba8(width, height, rgba.into_raw())
}

/// Read and decode an image file.
pub fn load_image(path: &std::path::Path) -> BadgeResult<RasterImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read image bytes from '{}'", path.display()))?;
    decode_image(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
