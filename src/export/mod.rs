//! PNG encoding and delivery of finished badges.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::error::{BadgeError, BadgeResult},
    render::backend::RenderedBadge,
    scene::config::ExportConfig,
};

/// Result of a download or share attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The PNG was written to this path.
    Saved(PathBuf),
    /// The PNG was handed to a share target.
    Shared,
    /// Nothing was delivered: no PNG data, or no share target available.
    Skipped,
}

/// Encode `frame` as a straight-alpha RGBA8 PNG.
pub fn encode_png(frame: &RenderedBadge) -> BadgeResult<Vec<u8>> {
    let rgba = frame.to_straight_rgba8();
    let img = image::RgbaImage::from_raw(frame.width, frame.height, rgba)
        .ok_or_else(|| BadgeError::export("frame buffer does not match its dimensions"))?;
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| BadgeError::export(format!("encode png: {e}")))?;
    Ok(out.into_inner())
}

/// Directory downloads are written into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadDir {
    dir: PathBuf,
}

impl DownloadDir {
    /// Downloads go to `dir`, created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Write `png` as `filename`, replacing an existing file.
    pub fn save(&self, png: &[u8], filename: &str) -> BadgeResult<ExportOutcome> {
        if png.is_empty() {
            tracing::debug!("empty png; download skipped");
            return Ok(ExportOutcome::Skipped);
        }
        if filename.trim().is_empty() || Path::new(filename).file_name().is_none() {
            return Err(BadgeError::export(format!(
                "invalid download filename '{filename}'"
            )));
        }
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create download dir '{}'", self.dir.display()))?;
        let path = self.dir.join(filename);
        std::fs::write(&path, png).with_context(|| format!("write png '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = png.len(), "badge saved");
        Ok(ExportOutcome::Saved(path))
    }
}

/// What a share target receives.
#[derive(Clone, Copy, Debug)]
pub struct SharePayload<'a> {
    /// Share sheet title.
    pub title: &'a str,
    /// Caption accompanying the image.
    pub text: &'a str,
    /// File name of the attached image.
    pub filename: &'a str,
    /// Encoded PNG.
    pub png: &'a [u8],
}

/// A platform share facility that accepts image files.
pub trait ShareTarget {
    /// Hand `payload` to the platform.
    fn share(&mut self, payload: &SharePayload<'_>) -> BadgeResult<()>;
}

/// Share `png` via `target` using the metadata in `cfg`.
///
/// Skipped when no target is available or the buffer is empty.
pub fn share_png(
    target: Option<&mut dyn ShareTarget>,
    cfg: &ExportConfig,
    png: &[u8],
) -> BadgeResult<ExportOutcome> {
    let Some(target) = target else {
        tracing::debug!("no share target; share skipped");
        return Ok(ExportOutcome::Skipped);
    };
    if png.is_empty() {
        tracing::debug!("empty png; share skipped");
        return Ok(ExportOutcome::Skipped);
    }
    target.share(&SharePayload {
        title: &cfg.share_title,
        text: &cfg.share_text,
        filename: &cfg.filename,
        png,
    })?;
    Ok(ExportOutcome::Shared)
}

#[cfg(test)]
#[path = "../../tests/unit/export/mod.rs"]
mod tests;
