use engine_core::Rect;

/// Opaque handle for an element the balloon can point at.
///
/// Identity is all the dialog needs; the rect is looked up fresh on every
/// positioning pass because targets move and resize on their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetId(pub u64);

/// The host layout system, queried on every positioning pass.
///
/// All rects are `getBoundingClientRect()`-style boxes in CSS pixels.
pub trait LayoutHost {
    /// Containment area the balloon must stay inside (typically the document body).
    fn viewport_rect(&self) -> Rect;

    /// Current box of `target`, or `None` when the element is gone.
    fn target_rect(&self, target: TargetId) -> Option<Rect>;

    /// Box of the balloon content (header + body + buttons).
    fn content_rect(&self) -> Rect;

    /// Box of the header slot; zero height when the slot is empty.
    fn header_rect(&self) -> Rect;

    /// Raw device scale factor reported by the display.
    fn device_pixel_ratio(&self) -> f32 {
        1.0
    }

    /// The host theme's primary color as a CSS string, if it has one.
    fn primary_color(&self) -> Option<String> {
        None
    }
}
