//! balloon-surface: Canvas-style API and an offscreen raster surface on top of engine-core.

mod canvas;
pub mod shapes;
mod surface;

pub use canvas::Canvas;
pub use surface::RasterSurface;
