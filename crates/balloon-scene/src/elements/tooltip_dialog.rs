//! Tooltip dialog: an overlay that points a balloon at a target element.
//!
//! State machine:
//!
//! ```text
//! Closed --open(target)--> Opening --overlay opened--> Open
//! Open --resize--> RepositionPending --pass--> Open
//! Open --close / outside click / open(any target)--> Closed
//! ```
//!
//! `open` while already open always closes first and then reopens with the
//! new target, so the host sees a clean closed/opened pair.

use std::time::Instant;

use engine_core::dpi;

use balloon_surface::RasterSurface;

use crate::elements::balloon::BalloonRenderer;
use crate::elements::overlay::{BasicOverlay, Overlay, OverlayEvent};
use crate::host::{LayoutHost, TargetId};
use crate::positioning::{BalloonGeometry, ContentPadding, compute_geometry};
use crate::settle::{SettlePolicy, SettleTimers};
use crate::style::BalloonStyle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    /// Waiting for the overlay to report that it opened.
    Opening,
    Open,
    /// A resize arrived; the pass that handles it is running.
    RepositionPending,
}

/// Notification for the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogEvent {
    OpenedChanged(bool),
}

/// Inline styles the host applies to the balloon element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InlinePosition {
    pub top: f32,
    pub left: f32,
    pub padding: ContentPadding,
}

pub struct TooltipDialog<O: Overlay = BasicOverlay> {
    overlay: O,
    style: BalloonStyle,
    settle: SettlePolicy,
    timers: SettleTimers,
    renderer: BalloonRenderer,
    state: DialogState,
    target: Option<TargetId>,
    geometry: Option<BalloonGeometry>,
    events: Vec<DialogEvent>,
}

impl TooltipDialog<BasicOverlay> {
    /// Create a dialog on a [`BasicOverlay`]. The device pixel ratio is quantized
    /// once here and kept for the dialog's lifetime.
    pub fn new(style: BalloonStyle, settle: SettlePolicy, device_pixel_ratio: f32) -> Self {
        Self::with_overlay(BasicOverlay::new(), style, settle, device_pixel_ratio)
    }
}

impl<O: Overlay> TooltipDialog<O> {
    pub fn with_overlay(
        overlay: O,
        style: BalloonStyle,
        settle: SettlePolicy,
        device_pixel_ratio: f32,
    ) -> Self {
        let ratio = dpi::quantize_pixel_ratio(device_pixel_ratio, 1.0);
        Self {
            overlay,
            style,
            settle,
            timers: SettleTimers::new(),
            renderer: BalloonRenderer::new(ratio),
            state: DialogState::Closed,
            target: None,
            geometry: None,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DialogState::Open | DialogState::RepositionPending)
    }

    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    pub fn style(&self) -> &BalloonStyle {
        &self.style
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.renderer.pixel_ratio()
    }

    /// Geometry of the last positioning pass in the current open cycle.
    pub fn geometry(&self) -> Option<&BalloonGeometry> {
        self.geometry.as_ref()
    }

    pub fn inline_position(&self) -> Option<InlinePosition> {
        self.geometry.map(|g| InlinePosition {
            top: g.top,
            left: g.left,
            padding: g.padding,
        })
    }

    pub fn surface(&self) -> &RasterSurface {
        self.renderer.surface()
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut O {
        &mut self.overlay
    }

    pub fn settle_timers(&self) -> &SettleTimers {
        &self.timers
    }

    /// Drain notifications produced since the last call.
    pub fn take_events(&mut self) -> Vec<DialogEvent> {
        std::mem::take(&mut self.events)
    }

    /// Open pointing at `target`. Without a target this logs and does nothing.
    pub fn open<H: LayoutHost>(&mut self, target: Option<TargetId>, host: &H, now: Instant) {
        let Some(target) = target else {
            log::error!("tooltip dialog: open() called without a target");
            return;
        };

        if self.state != DialogState::Closed || self.overlay.opened() {
            log::debug!("tooltip dialog: reopening for {target:?}, closing first");
            self.close();
        }

        self.target = Some(target);
        self.state = DialogState::Opening;
        if let Some(event) = self.overlay.open() {
            self.handle_overlay_event(event, host, now);
        }
    }

    pub fn close(&mut self) {
        match self.overlay.close() {
            Some(event) => self.apply_overlay_close(event),
            // Overlay was already closed (e.g. still opening); settle our side anyway.
            None if self.state != DialogState::Closed => self.enter_closed(),
            None => {}
        }
    }

    /// Pointer press outside the balloon.
    pub fn outside_click(&mut self) {
        if let Some(event) = self.overlay.outside_click() {
            self.apply_overlay_close(event);
        }
    }

    /// Feed a state change reported later by an asynchronous overlay.
    pub fn handle_overlay_event<H: LayoutHost>(&mut self, event: OverlayEvent, host: &H, now: Instant) {
        match event {
            OverlayEvent::OpenedChanged(true) => {
                self.state = DialogState::Open;
                self.events.push(DialogEvent::OpenedChanged(true));
                log::debug!("tooltip dialog: open for {:?}", self.target);
                self.reposition(host);
                if self.is_open() {
                    self.timers.schedule(now, &self.settle);
                }
            }
            OverlayEvent::OpenedChanged(false) => self.enter_closed(),
        }
    }

    /// The content box changed size; recompute and repaint, then settle again.
    pub fn on_resize<H: LayoutHost>(&mut self, host: &H, now: Instant) {
        if !self.is_open() {
            return;
        }
        self.state = DialogState::RepositionPending;
        self.reposition(host);
        if self.state == DialogState::RepositionPending {
            self.state = DialogState::Open;
            self.timers.schedule(now, &self.settle);
        }
    }

    /// Run settle passes whose deadline has passed. Due passes are coalesced
    /// into one, since each pass fully recomputes. Returns how many were due.
    pub fn tick<H: LayoutHost>(&mut self, host: &H, now: Instant) -> usize {
        let due = self.timers.take_due(now);
        if due > 0 {
            log::trace!("tooltip dialog: {due} settle pass(es) due");
            self.reposition(host);
        }
        due
    }

    /// One positioning pass: query rects, compute geometry, repaint.
    /// Returns false when there was nothing to point at.
    fn reposition<H: LayoutHost>(&mut self, host: &H) -> bool {
        let Some(target) = self.target else {
            log::debug!("tooltip dialog: positioning pass without a target, closing");
            self.close();
            return false;
        };
        let Some(target_rect) = host.target_rect(target) else {
            log::debug!("tooltip dialog: target {target:?} is gone, closing");
            self.close();
            return false;
        };

        let geometry = compute_geometry(
            host.viewport_rect(),
            target_rect,
            host.content_rect(),
            self.style.tip_height,
            host.header_rect().h,
        );
        log::trace!("tooltip dialog: geometry {geometry:?}");
        self.geometry = Some(geometry);

        if let Err(err) = self.renderer.paint(&geometry, &self.style) {
            log::warn!("tooltip dialog: balloon paint failed: {err}");
        }
        true
    }

    fn apply_overlay_close(&mut self, event: OverlayEvent) {
        if event == OverlayEvent::OpenedChanged(false) {
            self.enter_closed();
        }
    }

    fn enter_closed(&mut self) {
        self.timers.cancel();
        self.target = None;
        self.geometry = None;
        self.overlay.set_with_backdrop(false);
        self.state = DialogState::Closed;
        self.events.push(DialogEvent::OpenedChanged(false));
        log::debug!("tooltip dialog: closed");
    }
}
