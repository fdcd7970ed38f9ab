use crate::foundation::{
    core::{Canvas, Point, Vec2},
    error::{BadgeError, BadgeResult},
    math::clamp_f64,
};

/// On-screen bounding box of the displayed surface, in pointer coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplayRect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Displayed width.
    pub width: f64,
    /// Displayed height.
    pub height: f64,
}

/// Map a pointer position into the surface's native pixel space.
///
/// The displayed element may be scaled to any size by its layout; the pointer position relative
/// to the element's box is rescaled by `surface / display` on each axis.
pub fn to_canvas_space(
    pointer_x: f64,
    pointer_y: f64,
    display: DisplayRect,
    surface_width: u32,
    surface_height: u32,
) -> BadgeResult<Point> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(display.width) || !valid(display.height) {
        return Err(BadgeError::validation(
            "display rect must have finite, positive size",
        ));
    }
    if !pointer_x.is_finite() || !pointer_y.is_finite() {
        return Err(BadgeError::validation("pointer coordinates must be finite"));
    }

    Ok(Point::new(
        (pointer_x - display.left) / display.width * f64::from(surface_width),
        (pointer_y - display.top) / display.height * f64::from(surface_height),
    ))
}

/// How far the foreground may be dragged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetPolicy {
    /// Any offset is accepted; only the circular clip bounds what is visible.
    #[default]
    Free,
    /// The foreground rectangle is kept inside the background bounds.
    ContainInBackground,
}

impl OffsetPolicy {
    /// Apply the policy to a proposed `offset` for a foreground of `size` on `canvas`.
    ///
    /// When the foreground is larger than the background on an axis it is pinned to the
    /// origin on that axis.
    pub fn apply(self, offset: Vec2, size: Vec2, canvas: Canvas) -> Vec2 {
        match self {
            Self::Free => offset,
            Self::ContainInBackground => Vec2::new(
                clamp_f64(offset.x, 0.0, canvas.w() - size.x),
                clamp_f64(offset.y, 0.0, canvas.h() - size.y),
            ),
        }
    }
}

/// Drag state for the foreground insert.
///
/// Positions passed in are already in surface space (see [`to_canvas_space`]).
#[derive(Clone, Debug, Default)]
pub struct PlacementController {
    policy: OffsetPolicy,
    anchor: Option<Vec2>,
}

impl PlacementController {
    /// Controller applying `policy` to every drag update.
    pub fn new(policy: OffsetPolicy) -> Self {
        Self {
            policy,
            anchor: None,
        }
    }

    /// The offset policy this controller enforces.
    pub fn policy(&self) -> OffsetPolicy {
        self.policy
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Start a drag at `p`, remembering where inside the foreground it was grabbed.
    pub fn begin_drag(&mut self, p: Point, offset: Vec2) {
        self.anchor = Some(Vec2::new(p.x - offset.x, p.y - offset.y));
    }

    /// New offset for pointer `p`, or `None` when no drag is active.
    pub fn continue_drag(
        &mut self,
        p: Point,
        foreground_size: Vec2,
        canvas: Canvas,
    ) -> Option<Vec2> {
        let anchor = self.anchor?;
        let proposed = Vec2::new(p.x - anchor.x, p.y - anchor.y);
        Some(self.policy.apply(proposed, foreground_size, canvas))
    }

    /// Stop dragging.
    pub fn end_drag(&mut self) {
        self.anchor = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/drag.rs"]
mod tests;
