//! Path builders for the balloon regions: rectangles rounded on one side, optionally
//! carrying a triangular tip on that side.

use engine_core::{Path, Rect};

/// Triangular tip protruding from a horizontal edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tip {
    /// Apex x coordinate.
    pub x: f32,
    /// Width of the tip where it meets the edge.
    pub base: f32,
    /// Distance from the edge to the apex.
    pub height: f32,
}

impl Tip {
    /// Left end of the base, kept on the straight part of an edge spanning `rect`
    /// so the tip never cuts into a rounded corner. The apex is left where it was.
    fn base_left(&self, rect: Rect, radius: f32) -> f32 {
        let min = rect.x + radius;
        let max = (rect.right() - radius - self.base).max(min);
        (self.x - self.base * 0.5).clamp(min, max)
    }
}

fn clamp_radius(rect: Rect, radius: f32) -> f32 {
    radius.max(0.0).min(rect.w * 0.5).min(rect.h)
}

/// Rectangle rounded at the top, flat at the bottom.
pub fn top_rounded_rect(rect: Rect, radius: f32) -> Path {
    let Rect { x, y, w, h } = rect;
    let r = clamp_radius(rect, radius);
    let mut p = Path::new();
    p.move_to(x + r, y)
        .arc_to([x + w, y], [x + w, y + r], r)
        .line_to(x + w, y + h)
        .line_to(x, y + h)
        .arc_to([x, y], [x + r, y], r)
        .close();
    p
}

/// Rectangle rounded at the top with `tip` pointing up out of the top edge, flat at the bottom.
pub fn top_rounded_rect_with_tip(rect: Rect, radius: f32, tip: Tip) -> Path {
    let Rect { x, y, w, h } = rect;
    let r = clamp_radius(rect, radius);
    let left = tip.base_left(rect, r);
    let mut p = Path::new();
    p.move_to(left, y)
        .line_to(tip.x, y - tip.height)
        .line_to(left + tip.base, y)
        .arc_to([x + w, y], [x + w, y + r], r)
        .line_to(x + w, y + h)
        .line_to(x, y + h)
        .arc_to([x, y], [x + r, y], r)
        .close();
    p
}

/// Rectangle flat at the top, rounded at the bottom.
pub fn bottom_rounded_rect(rect: Rect, radius: f32) -> Path {
    let Rect { x, y, w, h } = rect;
    let r = clamp_radius(rect, radius);
    let mut p = Path::new();
    p.move_to(x, y)
        .line_to(x + w, y)
        .arc_to([x + w, y + h], [x + w - r, y + h], r)
        .arc_to([x, y + h], [x, y + h - r], r)
        .close();
    p
}

/// Rectangle flat at the top, rounded at the bottom with `tip` pointing down out of the bottom edge.
pub fn bottom_rounded_rect_with_tip(rect: Rect, radius: f32, tip: Tip) -> Path {
    let Rect { x, y, w, h } = rect;
    let r = clamp_radius(rect, radius);
    let left = tip.base_left(rect, r);
    let mut p = Path::new();
    p.move_to(x, y)
        .line_to(x + w, y)
        .arc_to([x + w, y + h], [x + w - r, y + h], r)
        .line_to(left + tip.base, y + h)
        .line_to(tip.x, y + h + tip.height)
        .line_to(left, y + h)
        .arc_to([x, y + h], [x, y + h - r], r)
        .close();
    p
}
