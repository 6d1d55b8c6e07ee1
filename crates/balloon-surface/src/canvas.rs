use engine_core::{
    ColorLinPremul, DisplayList, Painter, Path, Rect, ShadowSpec, Stroke, Transform2D, Viewport,
};

/// Builder for a single frame’s draw commands. Wraps `Painter` and adds canvas helpers.
///
/// Coordinates are CSS pixels; the root transform scales them by the surface's
/// pixel ratio. Shadow offsets and blur stay in device pixels.
pub struct Canvas {
    pub(crate) viewport: Viewport,
    pub(crate) painter: Painter,
    pub(crate) pixel_ratio: f32,
    pub(crate) css_size: [f32; 2],
}

impl Canvas {
    pub(crate) fn new(viewport: Viewport, css_size: [f32; 2], pixel_ratio: f32) -> Self {
        let mut painter = Painter::begin_frame(viewport);
        painter.push_transform(Transform2D::scale(pixel_ratio, pixel_ratio));
        Self {
            viewport,
            painter,
            pixel_ratio,
            css_size,
        }
    }

    pub fn viewport(&self) -> Viewport { self.viewport }

    pub fn pixel_ratio(&self) -> f32 { self.pixel_ratio }

    /// Surface size in CSS pixels.
    pub fn css_size(&self) -> [f32; 2] { self.css_size }

    /// Reset the whole surface to `color` (transparent clears like `clearRect`).
    pub fn clear(&mut self, color: ColorLinPremul) { self.painter.clear(color); }

    /// Fill a path with a solid color.
    pub fn fill_path(&mut self, path: Path, color: ColorLinPremul) {
        self.painter.fill_path(path, color);
    }

    /// Fill a path with a solid color over its own drop shadow.
    pub fn fill_path_with_shadow(&mut self, path: Path, color: ColorLinPremul, shadow: ShadowSpec) {
        self.painter.fill_path_with_shadow(path, color, shadow);
    }

    /// Stroke a path with uniform width (CSS pixels) and solid color.
    pub fn stroke_path(&mut self, path: Path, width: f32, color: ColorLinPremul) {
        self.painter.stroke_path(path, Stroke { width }, color);
    }

    /// Restrict subsequent draws to `rect` until the matching `pop_clip`.
    pub fn push_clip_rect(&mut self, rect: Rect) { self.painter.push_clip_rect(rect); }

    pub fn pop_clip(&mut self) { self.painter.pop_clip(); }

    pub fn push_transform(&mut self, t: Transform2D) { self.painter.push_transform(t); }

    pub fn pop_transform(&mut self) { self.painter.pop_transform(); }

    /// Commands recorded so far.
    pub fn display_list(&self) -> &DisplayList { self.painter.display_list() }

    pub(crate) fn finish(self) -> DisplayList { self.painter.finish() }
}
