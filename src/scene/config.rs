use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::{
        core::Rgba8,
        error::{BadgeError, BadgeResult},
        math::clamp_f64,
    },
    layout::text::SplitToken,
    placement::drag::OffsetPolicy,
    session::upload::RemovalFallback,
};

/// Placeholder replaced by the user's name in [`BadgeConfig::template`].
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Static badge configuration.
///
/// Loaded once (typically from JSON) and never modified while rendering. Every field has a
/// default, so a partial JSON document only overrides what it names.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    /// Background template image.
    pub background: PathBuf,
    /// Sentence template; must contain [`NAME_PLACEHOLDER`].
    pub template: String,
    /// Token drawn across the two font roles.
    pub split_token: SplitToken,
    /// Font sources.
    pub fonts: FontConfig,
    /// Geometry ratios relative to the background size.
    pub layout: LayoutRatios,
    /// Colors and stroke widths.
    pub palette: Palette,
    /// Allowed foreground scale range.
    pub scale: ScaleRange,
    /// Maximum name length in characters; longer input is truncated.
    pub max_name_chars: usize,
    /// Drag bounds for the foreground.
    pub offset_policy: OffsetPolicy,
    /// What an upload does when background removal fails.
    pub removal_fallback: RemovalFallback,
    /// Download and share metadata.
    pub export: ExportConfig,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            background: PathBuf::from("background.png"),
            template: "{name} is now officially part of the Web3 Talents Program!".to_string(),
            split_token: SplitToken::default(),
            fonts: FontConfig::default(),
            layout: LayoutRatios::default(),
            palette: Palette::default(),
            scale: ScaleRange::default(),
            max_name_chars: 30,
            offset_policy: OffsetPolicy::default(),
            removal_fallback: RemovalFallback::default(),
            export: ExportConfig::default(),
        }
    }
}

impl BadgeConfig {
    /// Read, parse and validate a JSON config file.
    ///
    /// Relative paths inside the file are resolved against the file's directory.
    pub fn from_path(path: &Path) -> BadgeResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let mut cfg = Self::from_json(&text)?;
        if let Some(dir) = path.parent() {
            cfg.resolve_relative_to(dir);
        }
        Ok(cfg)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(text: &str) -> BadgeResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| BadgeError::validation(format!("invalid config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Prefix relative asset paths with `dir`.
    pub fn resolve_relative_to(&mut self, dir: &Path) {
        for p in [
            &mut self.background,
            &mut self.fonts.primary,
            &mut self.fonts.fallback,
        ] {
            if p.is_relative() {
                *p = dir.join(&*p);
            }
        }
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> BadgeResult<()> {
        if !self.template.contains(NAME_PLACEHOLDER) {
            return Err(BadgeError::validation(format!(
                "template must contain '{NAME_PLACEHOLDER}'"
            )));
        }
        if self.max_name_chars == 0 {
            return Err(BadgeError::validation("max_name_chars must be > 0"));
        }
        if self.export.filename.trim().is_empty() {
            return Err(BadgeError::validation("export filename must be non-empty"));
        }
        self.split_token.validate()?;
        self.layout.validate()?;
        self.scale.validate()?;
        if !self.palette.accent_width_px.is_finite() || self.palette.accent_width_px < 0.0 {
            return Err(BadgeError::validation(
                "accent_width_px must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// The sentence for `name`.
    pub fn sentence_for(&self, name: &str) -> String {
        self.template.replace(NAME_PLACEHOLDER, name)
    }
}

/// Font files for the two font roles.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Display font (OTF/TTF).
    pub primary: PathBuf,
    /// Fallback font for glyphs the display font lacks.
    pub fallback: PathBuf,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            primary: PathBuf::from("HelloMissDi.otf"),
            fallback: PathBuf::from("fallback.ttf"),
        }
    }
}

/// Geometry ratios; widths scale with the background width, heights with its height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutRatios {
    /// Frame stroke width / background width.
    pub frame_width: f64,
    /// Horizontal text margin / background width.
    pub text_margin: f64,
    /// Font size / background width.
    pub font_size: f64,
    /// First baseline / background height.
    pub text_top: f64,
    /// Line advance / font size.
    pub line_height: f64,
    /// Circle centre y / background height.
    pub circle_center_y: f64,
    /// Background height / circle radius.
    pub circle_radius_divisor: f64,
    /// Foreground height at scale 1 / circle diameter.
    pub foreground_fill: f64,
}

impl Default for LayoutRatios {
    fn default() -> Self {
        Self {
            frame_width: 0.015,
            text_margin: 0.08,
            font_size: 0.055,
            text_top: 0.26,
            line_height: 1.25,
            circle_center_y: 0.6,
            circle_radius_divisor: 6.0,
            foreground_fill: 0.9,
        }
    }
}

impl LayoutRatios {
    fn validate(&self) -> BadgeResult<()> {
        let positive = [
            ("font_size", self.font_size),
            ("line_height", self.line_height),
            ("circle_radius_divisor", self.circle_radius_divisor),
            ("foreground_fill", self.foreground_fill),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(BadgeError::validation(format!(
                    "layout.{name} must be finite and > 0"
                )));
            }
        }
        let fractions = [
            ("frame_width", self.frame_width),
            ("text_top", self.text_top),
            ("circle_center_y", self.circle_center_y),
        ];
        for (name, v) in fractions {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(BadgeError::validation(format!(
                    "layout.{name} must be within [0, 1]"
                )));
            }
        }
        if !self.text_margin.is_finite() || !(0.0..0.5).contains(&self.text_margin) {
            return Err(BadgeError::validation(
                "layout.text_margin must be within [0, 0.5)",
            ));
        }
        Ok(())
    }
}

/// Colors and stroke widths.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Sentence color.
    pub text: Rgba8,
    /// Decorative frame color.
    pub frame: Rgba8,
    /// Whether the decorative frame is drawn.
    pub draw_frame: bool,
    /// Backdrop filled inside the circle.
    pub insert_fill: Rgba8,
    /// Circle border color.
    pub accent: Rgba8,
    /// Circle border width in pixels.
    pub accent_width_px: f64,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: Rgba8::WHITE,
            frame: Rgba8::WHITE,
            draw_frame: true,
            insert_fill: Rgba8::WHITE,
            accent: Rgba8::opaque(0x25, 0x63, 0xeb),
            accent_width_px: 16.0,
        }
    }
}

/// Inclusive scale bounds for the foreground.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScaleRange {
    /// Smallest scale.
    pub min: f64,
    /// Largest scale.
    pub max: f64,
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self { min: 0.6, max: 1.6 }
    }
}

impl ScaleRange {
    /// Clamp `scale` into range; non-finite input falls back to `1.0` clamped.
    pub fn clamp(self, scale: f64) -> f64 {
        let s = if scale.is_finite() { scale } else { 1.0 };
        clamp_f64(s, self.min, self.max)
    }

    fn validate(self) -> BadgeResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min <= 0.0 || self.min > self.max
        {
            return Err(BadgeError::validation(
                "scale range must satisfy 0 < min <= max",
            ));
        }
        Ok(())
    }
}

/// Download and share metadata.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File name used for downloads and shared files.
    pub filename: String,
    /// Share sheet title.
    pub share_title: String,
    /// Share sheet caption.
    pub share_text: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: "web3-talents.png".to_string(),
            share_title: "Web3 Talents".to_string(),
            share_text: "I\u{2019}m officially part of the Web3 Talents Program \u{1f680}".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
