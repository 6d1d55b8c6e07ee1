use std::path::Path as FsPath;

use engine_core::tiny_skia::Pixmap;
use engine_core::{RasterError, Viewport, dpi, encode_png, rasterize};

use crate::canvas::Canvas;

/// Offscreen raster target with a CSS-facing size and a device-pixel backing store.
///
/// Invariant: backing size = CSS size × pixel ratio (rounded to whole pixels).
/// A zero-sized surface has no backing pixmap and ignores frames.
pub struct RasterSurface {
    pixmap: Option<Pixmap>,
    css_width: f32,
    css_height: f32,
    pixel_ratio: f32,
}

impl RasterSurface {
    pub fn new(pixel_ratio: f32) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self {
            pixmap: None,
            css_width: 0.0,
            css_height: 0.0,
            pixel_ratio,
        }
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Display size in CSS pixels.
    pub fn css_size(&self) -> [f32; 2] {
        [self.css_width, self.css_height]
    }

    /// Backing-store size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        self.pixmap
            .as_ref()
            .map(|p| (p.width(), p.height()))
            .unwrap_or((0, 0))
    }

    /// Resize to `css_width × css_height`, reallocating (and clearing) the backing store.
    pub fn resize(&mut self, css_width: f32, css_height: f32) -> Result<(), RasterError> {
        self.css_width = css_width.max(0.0);
        self.css_height = css_height.max(0.0);
        let (w, h) = dpi::device_size(self.css_width, self.css_height, self.pixel_ratio);
        self.pixmap = if w == 0 || h == 0 {
            None
        } else {
            Some(Pixmap::new(w, h).ok_or(RasterError::Allocation(w, h))?)
        };
        Ok(())
    }

    pub fn begin_frame(&self) -> Canvas {
        let (width, height) = self.backing_size();
        Canvas::new(
            Viewport { width, height },
            [self.css_width, self.css_height],
            self.pixel_ratio,
        )
    }

    /// Rasterize the frame onto the backing store.
    pub fn end_frame(&mut self, canvas: Canvas) -> Result<(), RasterError> {
        let list = canvas.finish();
        match self.pixmap.as_mut() {
            Some(pixmap) => rasterize(&list, pixmap),
            None => {
                log::trace!("dropping frame for zero-sized surface");
                Ok(())
            }
        }
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Straight-alpha RGBA of a device pixel.
    pub fn pixel_rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let px = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some([px.red(), px.green(), px.blue(), px.alpha()])
    }

    pub fn save_png(&self, path: &FsPath) -> Result<(), RasterError> {
        let pixmap = self
            .pixmap
            .as_ref()
            .ok_or(RasterError::Allocation(0, 0))?;
        encode_png(pixmap, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{ColorLinPremul, Path};

    #[test]
    fn backing_store_tracks_pixel_ratio() {
        let mut surface = RasterSurface::new(2.0);
        surface.resize(280.0, 146.0).unwrap();
        assert_eq!(surface.css_size(), [280.0, 146.0]);
        assert_eq!(surface.backing_size(), (560, 292));
    }

    #[test]
    fn zero_size_surface_ignores_frames() {
        let mut surface = RasterSurface::new(1.0);
        surface.resize(0.0, 100.0).unwrap();
        assert_eq!(surface.backing_size(), (0, 0));
        let mut canvas = surface.begin_frame();
        let mut path = Path::new();
        path.move_to(0.0, 0.0).line_to(10.0, 0.0).line_to(10.0, 10.0).close();
        canvas.fill_path(path, ColorLinPremul::rgba(0, 0, 0, 255));
        assert!(surface.end_frame(canvas).is_ok());
        assert!(surface.pixel_rgba(0, 0).is_none());
    }

    #[test]
    fn canvas_draws_in_css_pixels() {
        let mut surface = RasterSurface::new(2.0);
        surface.resize(10.0, 10.0).unwrap();
        let mut canvas = surface.begin_frame();
        let mut path = Path::new();
        path.move_to(0.0, 0.0).line_to(5.0, 0.0).line_to(5.0, 5.0).line_to(0.0, 5.0).close();
        canvas.fill_path(path, ColorLinPremul::rgba(0, 0, 255, 255));
        surface.end_frame(canvas).unwrap();

        assert_eq!(surface.pixel_rgba(9, 9), Some([0, 0, 255, 255]));
        assert_eq!(surface.pixel_rgba(10, 10).map(|p| p[3]), Some(0));
    }
}
