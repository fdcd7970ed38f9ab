use crate::{
    assets::decode::{RasterImage, decode_image},
    foundation::error::{BadgeError, BadgeResult},
    removal::BackgroundRemover,
};

/// What an upload does when background removal produces no cutout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalFallback {
    /// Composite the original photo and log a warning.
    #[default]
    UseOriginal,
    /// Fail the upload with [`BadgeError::Removal`].
    Abort,
}

/// Identifies one initiated upload. Later uploads carry larger tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UploadToken(u64);

impl UploadToken {
    /// Raw sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Issues upload tokens and decides which completion may touch the scene.
///
/// Only the most recently *initiated* upload is applied. A completion is accepted at most once;
/// anything else is stale.
#[derive(Debug, Default)]
pub struct UploadSession {
    issued: u64,
    pending: Option<UploadToken>,
}

impl UploadSession {
    /// Start a new upload, superseding any upload still in flight.
    pub fn begin(&mut self) -> UploadToken {
        self.issued += 1;
        let token = UploadToken(self.issued);
        if let Some(prev) = self.pending.replace(token) {
            tracing::debug!(superseded = prev.get(), by = token.get(), "upload superseded");
        }
        token
    }

    /// Whether a completion carrying `token` would still be accepted.
    pub fn is_current(&self, token: UploadToken) -> bool {
        self.pending == Some(token)
    }

    /// Settle `token`. Returns `true` when its result should be applied.
    pub fn complete(&mut self, token: UploadToken) -> bool {
        if self.is_current(token) {
            self.pending = None;
            true
        } else {
            tracing::warn!(
                token = token.get(),
                latest = self.issued,
                "discarding stale upload result"
            );
            false
        }
    }

    /// Upload still waiting for completion, if any.
    pub fn pending(&self) -> Option<UploadToken> {
        self.pending
    }
}

/// Decoded foreground ready for the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Cutout {
    /// The image to composite.
    pub image: RasterImage,
    /// `false` when the original photo is used because removal failed.
    pub background_removed: bool,
}

/// Run `photo` through `remover` and decode the result.
///
/// A removal failure, or a cutout that does not decode, is handled per `fallback`. A photo that
/// itself does not decode is always a [`BadgeError::Decode`].
#[tracing::instrument(skip_all, fields(bytes = photo.len(), fallback = ?fallback))]
pub fn prepare_cutout(
    remover: &dyn BackgroundRemover,
    photo: &[u8],
    fallback: RemovalFallback,
) -> BadgeResult<Cutout> {
    if photo.is_empty() {
        return Err(BadgeError::decode("uploaded photo is empty"));
    }

    let failure = match remover.remove(photo).and_then(|bytes| decode_image(&bytes)) {
        Ok(image) => {
            return Ok(Cutout {
                image,
                background_removed: true,
            });
        }
        Err(e) => e,
    };

    match fallback {
        RemovalFallback::UseOriginal => {
            tracing::warn!(error = %failure, "background removal failed; using original photo");
            Ok(Cutout {
                image: decode_image(photo)?,
                background_removed: false,
            })
        }
        RemovalFallback::Abort => Err(match failure {
            BadgeError::Removal(_) => failure,
            other => BadgeError::removal(other.to_string()),
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/upload.rs"]
mod tests;
