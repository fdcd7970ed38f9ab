use crate::{
    assets::{
        decode::{RasterImage, load_image},
        fonts::FontBook,
    },
    export::{DownloadDir, ExportOutcome, ShareTarget, encode_png, share_png},
    foundation::error::BadgeResult,
    layout::{geometry::InsertGeometry, text::TextBlock},
    placement::drag::{DisplayRect, PlacementController, to_canvas_space},
    removal::BackgroundRemover,
    render::{
        backend::{RenderedBadge, Typesetter},
        cpu::Compositor,
    },
    scene::{config::BadgeConfig, model::SceneState},
    session::upload::{UploadSession, UploadToken, prepare_cutout},
};

/// Result of finishing an upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The foreground was replaced.
    Applied {
        /// `false` when the original photo was used.
        background_removed: bool,
    },
    /// A newer upload was started; this result was dropped.
    Stale,
}

/// Interactive badge editor.
///
/// Owns the scene and every collaborator. Each state change re-renders the badge, so
/// [`Studio::frame`] always reflects the latest input.
pub struct Studio {
    config: BadgeConfig,
    scene: SceneState,
    placement: PlacementController,
    uploads: UploadSession,
    compositor: Compositor,
    typesetter: Box<dyn Typesetter>,
    frame: Option<RenderedBadge>,
}

impl std::fmt::Debug for Studio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Studio")
            .field("scene", &self.scene)
            .field("placement", &self.placement)
            .field("uploads", &self.uploads)
            .finish_non_exhaustive()
    }
}

impl Studio {
    /// Studio drawing text with `typesetter`. No background is loaded yet.
    pub fn new(config: BadgeConfig, typesetter: Box<dyn Typesetter>) -> BadgeResult<Self> {
        config.validate()?;
        Ok(Self {
            scene: SceneState::new(config.scale, config.max_name_chars),
            placement: PlacementController::new(config.offset_policy),
            uploads: UploadSession::default(),
            compositor: Compositor::new(config.clone()),
            typesetter,
            frame: None,
            config,
        })
    }

    /// Studio with fonts and background loaded from the paths in `config`.
    ///
    /// Fails fast when a font or the background cannot be loaded, before anything is drawn.
    pub fn open(config: BadgeConfig) -> BadgeResult<Self> {
        let fonts = FontBook::load(&config.fonts)?;
        let background = load_image(&config.background)?;
        let mut studio = Self::new(config, Box::new(fonts))?;
        studio.set_background(background)?;
        Ok(studio)
    }

    /// Configuration in use.
    pub fn config(&self) -> &BadgeConfig {
        &self.config
    }

    /// Current scene.
    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    /// Latest render, or `None` while no background is loaded.
    pub fn frame(&self) -> Option<&RenderedBadge> {
        self.frame.as_ref()
    }

    /// Install the background template.
    pub fn set_background(&mut self, background: RasterImage) -> BadgeResult<()> {
        self.apply(|scene| scene.set_background(background))
    }

    /// Update the name (truncated to the configured length).
    pub fn set_name(&mut self, name: &str) -> BadgeResult<()> {
        self.apply(|scene| scene.set_name(name))
    }

    /// Update the foreground scale. Returns the clamped value actually stored.
    pub fn set_scale(&mut self, scale: f64) -> BadgeResult<f64> {
        self.apply(|scene| scene.set_scale(scale))
    }

    /// Start a drag at a pointer position on the displayed surface.
    ///
    /// Returns `false` (and does nothing) until both a background and a foreground are loaded.
    pub fn pointer_down(&mut self, x: f64, y: f64, display: DisplayRect) -> BadgeResult<bool> {
        let (Some(canvas), Some(_)) = (self.scene.canvas(), self.scene.foreground()) else {
            return Ok(false);
        };
        let p = to_canvas_space(x, y, display, canvas.width, canvas.height)?;
        self.placement.begin_drag(p, self.scene.offset());
        Ok(true)
    }

    /// Continue a drag. Returns `true` when the offset changed.
    pub fn pointer_move(&mut self, x: f64, y: f64, display: DisplayRect) -> BadgeResult<bool> {
        if !self.placement.is_dragging() {
            return Ok(false);
        }
        let (Some(canvas), Some(fg)) = (self.scene.canvas(), self.scene.foreground()) else {
            return Ok(false);
        };
        let p = to_canvas_space(x, y, display, canvas.width, canvas.height)?;
        let size = InsertGeometry::for_canvas(canvas, &self.config.layout)
            .foreground_size(fg, self.scene.scale());
        let Some(offset) = self.placement.continue_drag(p, size, canvas) else {
            return Ok(false);
        };
        if offset == self.scene.offset() {
            return Ok(false);
        }
        self.apply(|scene| scene.set_offset(offset))?;
        Ok(true)
    }

    /// Release the pointer.
    pub fn pointer_up(&mut self) {
        self.placement.end_drag();
    }

    /// Register a new upload. Its result is applied only if no later upload starts first.
    pub fn begin_upload(&mut self) -> UploadToken {
        self.uploads.begin()
    }

    /// Remove the background of `photo` and, if `token` is still current, make it the foreground.
    ///
    /// On error the scene is left untouched and the upload is settled.
    #[tracing::instrument(skip_all, fields(token = token.get(), bytes = photo.len()))]
    pub fn finish_upload(
        &mut self,
        token: UploadToken,
        remover: &dyn BackgroundRemover,
        photo: &[u8],
    ) -> BadgeResult<UploadOutcome> {
        if !self.uploads.is_current(token) {
            self.uploads.complete(token);
            return Ok(UploadOutcome::Stale);
        }

        let prepared = prepare_cutout(remover, photo, self.config.removal_fallback);
        if !self.uploads.complete(token) {
            return Ok(UploadOutcome::Stale);
        }
        let cutout = prepared?;

        self.placement.end_drag();
        let ratios = self.config.layout;
        self.apply(|scene| scene.set_foreground(cutout.image, &ratios))?;
        Ok(UploadOutcome::Applied {
            background_removed: cutout.background_removed,
        })
    }

    /// Begin and finish an upload in one step.
    pub fn upload(
        &mut self,
        remover: &dyn BackgroundRemover,
        photo: &[u8],
    ) -> BadgeResult<UploadOutcome> {
        let token = self.begin_upload();
        self.finish_upload(token, remover, photo)
    }

    /// Sentence layout for the current name, or `None` when nothing would be drawn.
    pub fn layout_text(&mut self) -> BadgeResult<Option<TextBlock>> {
        self.compositor
            .layout_text(&self.scene, self.typesetter.as_mut())
    }

    /// Latest render encoded as PNG; empty when there is nothing to export.
    pub fn png(&self) -> BadgeResult<Vec<u8>> {
        match &self.frame {
            Some(frame) => encode_png(frame),
            None => Ok(Vec::new()),
        }
    }

    /// Save the latest render under the configured filename.
    pub fn download(&self, dir: &DownloadDir) -> BadgeResult<ExportOutcome> {
        dir.save(&self.png()?, &self.config.export.filename)
    }

    /// Share the latest render, when a share target is available.
    pub fn share(&self, target: Option<&mut dyn ShareTarget>) -> BadgeResult<ExportOutcome> {
        let Some(target) = target else {
            return Ok(ExportOutcome::Skipped);
        };
        share_png(Some(target), &self.config.export, &self.png()?)
    }

    /// Mutate the scene and re-render. If the render fails the previous scene is restored,
    /// so `frame` keeps matching `scene`.
    fn apply<T>(&mut self, change: impl FnOnce(&mut SceneState) -> T) -> BadgeResult<T> {
        let previous = self.scene.clone();
        let out = change(&mut self.scene);
        match self.compositor.render(&self.scene, self.typesetter.as_mut()) {
            Ok(frame) => {
                self.frame = frame;
                Ok(out)
            }
            Err(e) => {
                tracing::warn!(error = %e, "render failed; scene change rolled back");
                self.scene = previous;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/studio.rs"]
mod tests;
