use crate::foundation::error::{BadgeError, BadgeResult};

pub use kurbo::{Affine, Circle, Point, Rect, Size, Vec2};

/// Native pixel dimensions of an output surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting empty dimensions.
    pub fn new(width: u32, height: u32) -> BadgeResult<Self> {
        if width == 0 || height == 0 {
            return Err(BadgeError::validation("canvas dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Width as `f64`.
    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn h(self) -> f64 {
        f64::from(self.height)
    }

    /// Dimensions narrowed to the `u16` range accepted by the CPU rasterizer.
    pub fn to_u16(self) -> BadgeResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| BadgeError::validation("surface width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| BadgeError::validation("surface height exceeds u16"))?;
        Ok((w, h))
    }
}

/// Straight (non-premultiplied) RGBA8 color; serialized as a `#rrggbb[aa]` string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Opaque color from RGB components.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> BadgeResult<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| BadgeError::validation(format!("color '{s}' must start with '#'")))?;
        if hex.len() != 6 && hex.len() != 8 {
            return Err(BadgeError::validation(format!(
                "color '{s}' must be #rrggbb or #rrggbbaa"
            )));
        }

        let channel = |i: usize| -> BadgeResult<u8> {
            let pair = hex
                .get(i..i + 2)
                .ok_or_else(|| BadgeError::validation(format!("color '{s}' is not ascii hex")))?;
            u8::from_str_radix(pair, 16)
                .map_err(|_| BadgeError::validation(format!("color '{s}' is not valid hex")))
        };

        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a,
        })
    }

    /// Format as `#rrggbb` (opaque) or `#rrggbbaa`.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = BadgeError;

    fn try_from(s: String) -> BadgeResult<Self> {
        Self::from_hex(&s)
    }
}

impl From<Rgba8> for String {
    fn from(c: Rgba8) -> Self {
        c.to_hex()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
