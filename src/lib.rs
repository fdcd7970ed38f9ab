//! badgeforge composes personalized badge images.
//!
//! A fixed background template, a cut-out photo and a name go in; a PNG comes out. The
//! pipeline is deterministic:
//!
//! - Load a [`BadgeConfig`] and open a [`Studio`]
//! - Feed it a name, an upload (run through a [`BackgroundRemover`]), scale and drag input
//! - Read the rendered [`RenderedBadge`] or export it with [`DownloadDir`] / [`ShareTarget`]
//!
//! The [`Compositor`] can also be driven directly from a [`SceneState`] and any
//! [`Typesetter`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod export;
pub(crate) mod layout;
pub(crate) mod placement;
pub(crate) mod removal;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod session;

pub use crate::assets::decode::{RasterImage, decode_image, load_image};
pub use crate::assets::fonts::{FontBook, TextBrushRgba8};
pub use crate::foundation::core::{Affine, Canvas, Circle, Point, Rect, Rgba8, Size, Vec2};
pub use crate::foundation::error::{BadgeError, BadgeResult};

pub use crate::export::{
    DownloadDir, ExportOutcome, SharePayload, ShareTarget, encode_png, share_png,
};
pub use crate::layout::geometry::{FrameGeometry, InsertGeometry, TextAnchor};
pub use crate::layout::text::{
    FontRole, LayoutLine, PlacedRun, Segment, SplitToken, TextBlock, TextLayoutParams,
    TextMeasure, TextRun, layout_text, wrap_lines,
};
pub use crate::placement::drag::{DisplayRect, OffsetPolicy, PlacementController, to_canvas_space};
pub use crate::removal::{
    API_KEY_ENV, BackgroundRemover, DEFAULT_ENDPOINT, Passthrough, RemoveBgClient,
};
pub use crate::render::backend::{DrawStyle, RenderedBadge, Typesetter};
pub use crate::render::cpu::Compositor;
pub use crate::scene::config::{
    BadgeConfig, ExportConfig, FontConfig, LayoutRatios, NAME_PLACEHOLDER, Palette, ScaleRange,
};
pub use crate::scene::model::SceneState;
pub use crate::session::studio::{Studio, UploadOutcome};
pub use crate::session::upload::{
    Cutout, RemovalFallback, UploadSession, UploadToken, prepare_cutout,
};
