//! Speech-bubble background: a header region and a body region stacked on one
//! raster surface, one of them carrying the tip.
//!
//! Each region is filled inside a clip that ends at the header/body seam, so
//! neither fill nor its shadow crosses into the other region. The seam is
//! snapped to a whole device pixel, which makes the two clips share one exact
//! row boundary.

use balloon_surface::RasterSurface;
use balloon_surface::shapes::{self, Tip};
use engine_core::{ColorLinPremul, Path, RasterError, Rect, ShadowSpec, dpi};

use crate::positioning::{BalloonGeometry, TipEdge};
use crate::style::BalloonStyle;

/// Room left below the body for its shadow when the tip is on top.
const NORTH_BOTTOM_ALLOWANCE: f32 = 6.0;
/// Room left below the tip when the tip is at the bottom.
const SOUTH_BOTTOM_ALLOWANCE: f32 = 1.0;
/// Room left above the header when the tip is at the bottom.
const SOUTH_TOP_ALLOWANCE: f32 = 1.0;
/// Shadow blur and vertical offset, in CSS pixels.
const SHADOW_BLUR: f32 = 5.0;
const SHADOW_OFFSET_Y: f32 = 1.0;
/// Border stroke width in CSS pixels (one device pixel at ratio 1).
const BORDER_WIDTH: f32 = 1.0;

/// Balloon paths in surface-local CSS pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct BalloonLayout {
    pub header: Path,
    pub body: Path,
    /// Row where the header region ends and the body begins.
    pub seam_y: f32,
    pub tip: Tip,
    pub width: f32,
    pub height: f32,
}

/// Build the header/body paths for `geometry`, or `None` when the content is
/// too small to hold both regions (not laid out yet).
pub fn balloon_layout(
    geometry: &BalloonGeometry,
    style: &BalloonStyle,
    pixel_ratio: f32,
) -> Option<BalloonLayout> {
    if !(geometry.width > 0.0 && geometry.height > 0.0) {
        return None;
    }
    let x = style.shadow_margin;
    let w = geometry.width - 2.0 * x;
    if w <= 0.0 {
        return None;
    }

    let tip = Tip {
        x: (geometry.width * geometry.arrow_fraction * pixel_ratio).round() / pixel_ratio,
        base: style.tip_base,
        height: style.tip_height,
    };
    let r = style.radius;

    let (top, seam_y, bottom) = match geometry.tip_edge {
        TipEdge::North => (
            style.tip_height,
            dpi::snap_to_device(style.tip_height + geometry.header_height, pixel_ratio),
            geometry.height - NORTH_BOTTOM_ALLOWANCE,
        ),
        TipEdge::South => (
            SOUTH_TOP_ALLOWANCE,
            dpi::snap_to_device(geometry.header_height, pixel_ratio),
            geometry.height - SOUTH_BOTTOM_ALLOWANCE - style.tip_height,
        ),
    };
    if seam_y <= top || bottom <= seam_y {
        return None;
    }

    let header_rect = Rect::new(x, top, w, seam_y - top);
    let body_rect = Rect::new(x, seam_y, w, bottom - seam_y);
    let (header, body) = match geometry.tip_edge {
        TipEdge::North => (
            shapes::top_rounded_rect_with_tip(header_rect, r, tip),
            shapes::bottom_rounded_rect(body_rect, r),
        ),
        TipEdge::South => (
            shapes::top_rounded_rect(header_rect, r),
            shapes::bottom_rounded_rect_with_tip(body_rect, r, tip),
        ),
    };

    Some(BalloonLayout {
        header,
        body,
        seam_y,
        tip,
        width: geometry.width,
        height: geometry.height,
    })
}

/// Owns the balloon's raster surface and repaints it for each geometry pass.
pub struct BalloonRenderer {
    surface: RasterSurface,
}

impl BalloonRenderer {
    pub fn new(pixel_ratio: f32) -> Self {
        Self {
            surface: RasterSurface::new(pixel_ratio),
        }
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.surface.pixel_ratio()
    }

    /// Resize the surface to the content size and redraw the balloon.
    ///
    /// Returns `Ok(false)` without touching the surface when the geometry is
    /// degenerate.
    pub fn paint(
        &mut self,
        geometry: &BalloonGeometry,
        style: &BalloonStyle,
    ) -> Result<bool, RasterError> {
        let ratio = self.surface.pixel_ratio();
        let Some(layout) = balloon_layout(geometry, style, ratio) else {
            log::debug!(
                "skipping balloon paint for {}x{} content",
                geometry.width,
                geometry.height
            );
            return Ok(false);
        };

        self.surface.resize(layout.width, layout.height)?;
        let mut canvas = self.surface.begin_frame();
        canvas.clear(ColorLinPremul::default());

        let shadow = ShadowSpec {
            offset: [0.0, SHADOW_OFFSET_Y * ratio],
            blur_radius: SHADOW_BLUR * ratio,
            color: style.shadow_color,
        };

        canvas.push_clip_rect(Rect::new(0.0, 0.0, layout.width, layout.seam_y));
        canvas.fill_path_with_shadow(layout.header.clone(), style.header_color, shadow);
        if style.stroke_border {
            canvas.stroke_path(layout.header.clone(), BORDER_WIDTH, style.border_color);
        }
        canvas.pop_clip();

        canvas.push_clip_rect(Rect::new(
            0.0,
            layout.seam_y,
            layout.width,
            layout.height - layout.seam_y,
        ));
        canvas.fill_path_with_shadow(layout.body.clone(), style.body_color, shadow);
        if style.stroke_border {
            canvas.stroke_path(layout.body, BORDER_WIDTH, style.border_color);
        }
        canvas.pop_clip();

        self.surface.end_frame(canvas)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::positioning::ContentPadding;

    fn geometry(tip_edge: TipEdge, arrow_fraction: f32) -> BalloonGeometry {
        BalloonGeometry {
            top: 0.0,
            left: 0.0,
            width: 280.0,
            height: 146.0,
            tip_edge,
            arrow_fraction,
            header_height: 40.0,
            padding: ContentPadding { top: 12.0, bottom: 2.0 },
        }
    }

    #[test]
    fn north_layout_puts_seam_below_tip_and_header() {
        let layout = balloon_layout(&geometry(TipEdge::North, 0.3), &BalloonStyle::default(), 1.0).unwrap();
        assert_eq!(layout.seam_y, 52.0);
        assert_eq!(layout.tip.x, 84.0);
        let header = layout.header.bounds().unwrap();
        let body = layout.body.bounds().unwrap();
        assert_eq!(header.y, 0.0);
        assert_eq!(header.bottom(), body.y);
        assert_eq!(body.bottom(), 140.0);
    }

    #[test]
    fn south_layout_hangs_tip_below_body() {
        let layout = balloon_layout(&geometry(TipEdge::South, 0.5), &BalloonStyle::default(), 2.0).unwrap();
        assert_eq!(layout.seam_y, 40.0);
        let header = layout.header.bounds().unwrap();
        let body = layout.body.bounds().unwrap();
        assert_eq!(header.y, 1.0);
        assert_eq!(header.bottom(), layout.seam_y);
        assert_eq!(body.y, layout.seam_y);
        assert_eq!(body.bottom(), 145.0);
    }

    #[test]
    fn tip_x_snaps_to_device_pixels() {
        let layout =
            balloon_layout(&geometry(TipEdge::North, 0.3013), &BalloonStyle::default(), 2.0).unwrap();
        // 280 * 0.3013 * 2 = 168.73 -> 169 device px
        assert_eq!(layout.tip.x, 84.5);
    }

    #[test]
    fn degenerate_content_has_no_layout() {
        let mut g = geometry(TipEdge::North, 0.5);
        g.width = 0.0;
        assert!(balloon_layout(&g, &BalloonStyle::default(), 1.0).is_none());

        let mut g = geometry(TipEdge::North, 0.5);
        g.height = 50.0; // header alone needs 52
        assert!(balloon_layout(&g, &BalloonStyle::default(), 1.0).is_none());
    }

    #[test]
    fn renderer_noops_on_zero_content() {
        let mut renderer = BalloonRenderer::new(2.0);
        let mut g = geometry(TipEdge::North, 0.5);
        g.height = 0.0;
        assert!(!renderer.paint(&g, &BalloonStyle::default()).unwrap());
        assert_eq!(renderer.surface().backing_size(), (0, 0));
    }

    #[test]
    fn border_is_stroked_only_when_enabled() {
        let g = geometry(TipEdge::North, 0.5);
        // Left edge of the header at x = 7, well below the top corner.
        let (x, y) = (7, 30);

        let mut plain = BalloonRenderer::new(1.0);
        plain.paint(&g, &BalloonStyle::default()).unwrap();
        assert_eq!(plain.surface().pixel_rgba(x, y), Some([0xcc, 0xcc, 0xcc, 255]));

        let style = BalloonStyle {
            stroke_border: true,
            border_color: ColorLinPremul::rgba(255, 0, 0, 255),
            ..BalloonStyle::default()
        };
        let mut stroked = BalloonRenderer::new(1.0);
        stroked.paint(&g, &style).unwrap();
        let [r, green, b, a] = stroked.surface().pixel_rgba(x, y).unwrap();
        assert_eq!(a, 255);
        assert!(
            u16::from(r) > u16::from(green) + 60 && u16::from(r) > u16::from(b) + 60,
            "expected a red border, got {:?}",
            [r, green, b, a]
        );

        // Interior is untouched by the stroke.
        assert_eq!(stroked.surface().pixel_rgba(140, 30), Some([0xcc, 0xcc, 0xcc, 255]));
    }

    #[test]
    fn renderer_sizes_surface_for_pixel_ratio() {
        let mut renderer = BalloonRenderer::new(2.0);
        assert!(renderer.paint(&geometry(TipEdge::South, 0.5), &BalloonStyle::default()).unwrap());
        assert_eq!(renderer.surface().css_size(), [280.0, 146.0]);
        assert_eq!(renderer.surface().backing_size(), (560, 292));
    }
}
