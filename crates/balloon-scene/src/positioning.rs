//! Balloon placement relative to its target.
//!
//! A positioning pass is a pure function of the viewport, target and content
//! rects plus the tip height. Nothing is carried over between passes, so the
//! caller re-queries every rect right before calling [`compute_geometry`].
//!
//! Known edge case: vertical placement is a single comparison. A target with
//! no room below always goes above, even when there is no room above either,
//! which can push the balloon past the top of the viewport.

use engine_core::Rect;

/// Header height used when the header slot reports zero height.
pub const DEFAULT_HEADER_HEIGHT: f32 = 40.0;

/// Content padding on the edge without the tip.
pub const FLAT_EDGE_PADDING: f32 = 2.0;

/// Which balloon edge carries the tip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TipEdge {
    /// Tip on the top edge; the balloon sits below the target.
    North,
    /// Tip on the bottom edge; the balloon sits above the target.
    South,
}

/// Vertical padding applied to the content box so the slots clear the tip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentPadding {
    pub top: f32,
    pub bottom: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BalloonGeometry {
    /// Inline `top` of the balloon, in the viewport's coordinate space.
    pub top: f32,
    /// Inline `left` of the balloon.
    pub left: f32,
    /// Content width; also the raster surface's CSS width.
    pub width: f32,
    /// Content height; also the raster surface's CSS height.
    pub height: f32,
    pub tip_edge: TipEdge,
    /// Tip center as a fraction of `width`. Only meaningful within `[0, 1]`.
    pub arrow_fraction: f32,
    pub header_height: f32,
    pub padding: ContentPadding,
}

impl BalloonGeometry {
    /// Tip center in balloon-local CSS pixels.
    pub fn arrow_x(&self) -> f32 {
        self.width * self.arrow_fraction
    }

    /// Tip center in viewport coordinates.
    pub fn arrow_page_x(&self) -> f32 {
        self.left + self.arrow_x()
    }
}

/// Place a `content`-sized balloon against `target`, kept horizontally inside `viewport`.
pub fn compute_geometry(
    viewport: Rect,
    target: Rect,
    content: Rect,
    tip_height: f32,
    header_height_hint: f32,
) -> BalloonGeometry {
    let width = content.w;
    let height = content.h;

    let (top, tip_edge, padding) = if viewport.bottom() < target.bottom() + height {
        (
            target.top() - height,
            TipEdge::South,
            ContentPadding { top: FLAT_EDGE_PADDING, bottom: tip_height },
        )
    } else {
        (
            target.bottom(),
            TipEdge::North,
            ContentPadding { top: tip_height, bottom: FLAT_EDGE_PADDING },
        )
    };

    let arrow_page_x = target.center_x();
    let mut left = arrow_page_x - width * 0.5;
    let mut arrow_fraction = 0.5;
    if left < viewport.left() {
        left = viewport.left();
        arrow_fraction = (arrow_page_x - left) / width;
    } else if left + width > viewport.right() {
        left = viewport.right() - width;
        arrow_fraction = (arrow_page_x - left) / width;
    }

    let header_height = if header_height_hint > 0.0 {
        header_height_hint
    } else {
        DEFAULT_HEADER_HEIGHT
    };

    BalloonGeometry {
        top,
        left,
        width,
        height,
        tip_edge,
        arrow_fraction,
        header_height,
        padding,
    }
}
