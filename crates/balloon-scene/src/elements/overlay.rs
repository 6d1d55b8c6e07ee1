//! Open/close/backdrop capability shared by overlay widgets.
//!
//! Widgets wrap an [`Overlay`] instead of re-implementing its state. The
//! overlay reports every real state change as an [`OverlayEvent`]; calls that
//! change nothing report `None`.

/// State change reported by an overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayEvent {
    OpenedChanged(bool),
}

pub trait Overlay {
    fn opened(&self) -> bool;

    /// Ask the overlay to open. Overlays that open asynchronously return `None`
    /// here and deliver `OpenedChanged(true)` to the owning widget later.
    fn open(&mut self) -> Option<OverlayEvent>;

    fn close(&mut self) -> Option<OverlayEvent>;

    fn with_backdrop(&self) -> bool;

    fn set_with_backdrop(&mut self, on: bool);

    /// Pointer press outside the overlay. Overlays that dismiss on outside
    /// clicks close themselves and report it here.
    fn outside_click(&mut self) -> Option<OverlayEvent>;
}

/// Synchronous overlay: opens and closes immediately.
#[derive(Clone, Debug)]
pub struct BasicOverlay {
    opened: bool,
    with_backdrop: bool,
    /// Whether clicking outside the overlay closes it.
    pub close_on_outside_click: bool,
}

impl Default for BasicOverlay {
    fn default() -> Self {
        Self {
            opened: false,
            with_backdrop: false,
            close_on_outside_click: true,
        }
    }
}

impl BasicOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_close_on_outside_click(mut self, close: bool) -> Self {
        self.close_on_outside_click = close;
        self
    }
}

impl Overlay for BasicOverlay {
    fn opened(&self) -> bool {
        self.opened
    }

    fn open(&mut self) -> Option<OverlayEvent> {
        if self.opened {
            return None;
        }
        self.opened = true;
        Some(OverlayEvent::OpenedChanged(true))
    }

    fn close(&mut self) -> Option<OverlayEvent> {
        if !self.opened {
            return None;
        }
        self.opened = false;
        Some(OverlayEvent::OpenedChanged(false))
    }

    fn with_backdrop(&self) -> bool {
        self.with_backdrop
    }

    fn set_with_backdrop(&mut self, on: bool) {
        self.with_backdrop = on;
    }

    fn outside_click(&mut self) -> Option<OverlayEvent> {
        if self.close_on_outside_click {
            self.close()
        } else {
            None
        }
    }
}
