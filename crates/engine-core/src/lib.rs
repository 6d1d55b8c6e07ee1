//! engine-core: Core types and the CPU raster backend for the balloon widgets.
//!
//! Drawing is recorded into a [`DisplayList`] through a [`Painter`] and then
//! replayed onto a `tiny_skia::Pixmap` by [`rasterize`].

mod scene;
mod color;
mod display_list;
mod painter;
mod error;
pub mod dpi;
pub mod raster;

pub use scene::*;
pub use color::ColorParseError;
pub use display_list::*;
pub use painter::*;
pub use error::RasterError;
pub use raster::{rasterize, encode_png};

/// Re-export tiny-skia so downstream crates share the pixmap type identity.
pub use tiny_skia;
