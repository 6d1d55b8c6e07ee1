//! Minimal DPI helpers used across the engine to keep scaling consistent.
//!
//! Callers provide the platform scale factor (logical→physical) as `f32`;
//! nothing here queries a window or display.

/// Device ratios above this threshold are treated as high-density (2x) displays.
pub const HIGH_DENSITY_THRESHOLD: f32 = 1.6;

/// Quantize a reported device pixel ratio to the two raster densities the
/// balloon surfaces are drawn at: 2 on retina/UHD displays, 1 otherwise.
///
/// `backing_store_ratio` is the scale the host's raster backend already
/// applies on its own (1 for every modern backend).
#[inline]
pub fn quantize_pixel_ratio(device_pixel_ratio: f32, backing_store_ratio: f32) -> f32 {
    let device = if device_pixel_ratio.is_finite() && device_pixel_ratio > HIGH_DENSITY_THRESHOLD {
        2.0
    } else {
        1.0
    };
    let backing = if backing_store_ratio.is_finite() && backing_store_ratio > 0.0 {
        backing_store_ratio
    } else {
        1.0
    };
    device / backing
}

/// Snap a coordinate to the nearest device pixel for crisp edges at a given scale factor.
#[inline]
pub fn snap_to_device(v: f32, scale_factor: f32) -> f32 {
    let sf = if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    };
    (v * sf).round() / sf
}

/// Backing-store size in device pixels for a CSS-sized surface.
#[inline]
pub fn device_size(css_width: f32, css_height: f32, ratio: f32) -> (u32, u32) {
    let w = (css_width * ratio).round().max(0.0) as u32;
    let h = (css_height * ratio).round().max(0.0) as u32;
    (w, h)
}
