//! Popover input dialog: a tooltip balloon holding one text input plus
//! accept/delete buttons.
//!
//! [`PopoverDialog::connect`] opens the balloon on a target and hands back a
//! receiver that gets exactly one [`PopoverOutcome`] for that open cycle.

use std::sync::mpsc;
use std::time::Instant;

use balloon_config::BalloonConfig;
use serde_json::{Map, Value};

use crate::elements::overlay::{BasicOverlay, Overlay, OverlayEvent};
use crate::elements::tooltip_dialog::{DialogEvent, DialogState, TooltipDialog};
use crate::host::{LayoutHost, TargetId};
use crate::settle::SettlePolicy;
use crate::style::{self, BalloonStyle, StyleError};

/// How an open cycle ended.
#[derive(Clone, Debug, PartialEq)]
pub enum PopoverOutcome {
    /// Accept with a non-blank value. `response` is the response object with
    /// `inputValue` set.
    Accepted { response: Value, value: String },
    Deleted { response: Value },
    /// Closed without accept or delete.
    Dismissed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PopoverEvent {
    Resolved(PopoverOutcome),
    Closed,
    /// The host should move keyboard focus into the input.
    FocusInput,
}

/// Key pressed while the input has focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopoverKey {
    Enter,
    Other,
}

#[derive(Debug, Default)]
struct InputState {
    value: String,
    invalid: bool,
    error_message: Option<String>,
}

impl InputState {
    fn clear_error(&mut self) {
        self.invalid = false;
        self.error_message = None;
    }
}

pub struct PopoverDialog<O: Overlay = BasicOverlay> {
    dialog: TooltipDialog<O>,
    input_label: String,
    header_text: String,
    hide_delete: bool,
    blank_error: String,
    response: Map<String, Value>,
    input: InputState,
    pending: Option<mpsc::Sender<PopoverOutcome>>,
    events: Vec<PopoverEvent>,
}

impl PopoverDialog<BasicOverlay> {
    /// Build from configuration. The header takes the configured color, or the
    /// host's primary color when none is configured.
    pub fn from_config<H: LayoutHost>(config: &BalloonConfig, host: &H) -> Result<Self, StyleError> {
        let mut style = BalloonStyle::from_config(&config.tooltip)?;
        if let Some(header) = config.popover.header_color.clone().or_else(|| host.primary_color()) {
            style = style.with_header_color(style::color("popover.header_color", &header)?);
        }
        style = style.with_body_color(style::color("popover.body_color", &config.popover.body_color)?);

        let dialog = TooltipDialog::new(
            style,
            SettlePolicy::from_config(&config.settle),
            host.device_pixel_ratio(),
        );
        let popover = &config.popover;
        Ok(Self::new(dialog)
            .with_input_label(popover.input_label.clone())
            .with_header_text(popover.header_text.clone())
            .with_hide_delete(popover.hide_delete)
            .with_blank_error(popover.blank_error.clone()))
    }
}

impl<O: Overlay> PopoverDialog<O> {
    pub fn new(dialog: TooltipDialog<O>) -> Self {
        let defaults = balloon_config::PopoverConfig::default();
        Self {
            dialog,
            input_label: defaults.input_label,
            header_text: defaults.header_text,
            hide_delete: defaults.hide_delete,
            blank_error: defaults.blank_error,
            response: Map::new(),
            input: InputState::default(),
            pending: None,
            events: Vec::new(),
        }
    }

    pub fn with_input_label(mut self, label: impl Into<String>) -> Self {
        self.input_label = label.into();
        self
    }

    pub fn with_header_text(mut self, text: impl Into<String>) -> Self {
        self.header_text = text.into();
        self
    }

    pub fn with_hide_delete(mut self, hide: bool) -> Self {
        self.hide_delete = hide;
        self
    }

    pub fn with_blank_error(mut self, message: impl Into<String>) -> Self {
        self.blank_error = message.into();
        self
    }

    pub fn input_label(&self) -> &str {
        &self.input_label
    }

    pub fn header_text(&self) -> &str {
        &self.header_text
    }

    pub fn hide_delete(&self) -> bool {
        self.hide_delete
    }

    pub fn dialog(&self) -> &TooltipDialog<O> {
        &self.dialog
    }

    pub fn is_open(&self) -> bool {
        self.dialog.is_open()
    }

    /// Object echoed back in the outcome. Accept writes `inputValue` into it.
    pub fn response_object(&self) -> &Map<String, Value> {
        &self.response
    }

    pub fn set_response_object(&mut self, response: Map<String, Value>) {
        self.response = response;
    }

    pub fn input_value(&self) -> &str {
        &self.input.value
    }

    pub fn set_input_value(&mut self, value: impl Into<String>) {
        self.input.value = value.into();
    }

    pub fn is_invalid(&self) -> bool {
        self.input.invalid
    }

    pub fn error_message(&self) -> Option<&str> {
        self.input.error_message.as_deref()
    }

    pub fn take_events(&mut self) -> Vec<PopoverEvent> {
        std::mem::take(&mut self.events)
    }

    /// Open on `target` and return the receiver for this cycle's outcome.
    ///
    /// A previous cycle still waiting is resolved as dismissed first. Without a
    /// target, or when the target is gone by the first positioning pass, this
    /// returns `None`. An overlay that opens asynchronously still gets a
    /// receiver while it is opening.
    pub fn connect<H: LayoutHost>(
        &mut self,
        target: Option<TargetId>,
        host: &H,
        now: Instant,
    ) -> Option<mpsc::Receiver<PopoverOutcome>> {
        let Some(target) = target else {
            log::error!("popover dialog: connect() called without a target");
            return None;
        };

        self.open(target, host, now);
        if self.dialog.state() == DialogState::Closed {
            return None;
        }
        let (tx, rx) = mpsc::channel();
        self.pending = Some(tx);
        Some(rx)
    }

    pub fn open<H: LayoutHost>(&mut self, target: TargetId, host: &H, now: Instant) {
        self.dialog.open(Some(target), host, now);
        self.sync_dialog_events();
    }

    pub fn close(&mut self) {
        self.dialog.close();
        self.sync_dialog_events();
    }

    pub fn outside_click(&mut self) {
        self.dialog.outside_click();
        self.sync_dialog_events();
    }

    pub fn on_resize<H: LayoutHost>(&mut self, host: &H, now: Instant) {
        self.dialog.on_resize(host, now);
        self.sync_dialog_events();
    }

    /// Forward a late state change from an asynchronous overlay.
    pub fn handle_overlay_event<H: LayoutHost>(&mut self, event: OverlayEvent, host: &H, now: Instant) {
        self.dialog.handle_overlay_event(event, host, now);
        self.sync_dialog_events();
    }

    pub fn tick<H: LayoutHost>(&mut self, host: &H, now: Instant) -> usize {
        let due = self.dialog.tick(host, now);
        self.sync_dialog_events();
        due
    }

    /// Accept button. A blank input is flagged and the dialog stays open.
    pub fn accept(&mut self) -> bool {
        if self.input.value.is_empty() {
            self.input.invalid = true;
            self.input.error_message = Some(self.blank_error.clone());
            log::debug!("popover dialog: rejected blank input");
            return false;
        }

        self.response
            .insert("inputValue".to_string(), Value::String(self.input.value.clone()));
        self.resolve(PopoverOutcome::Accepted {
            response: Value::Object(self.response.clone()),
            value: self.input.value.clone(),
        });
        self.close();
        true
    }

    /// Delete button. Ignored when the button is hidden.
    pub fn delete(&mut self) -> bool {
        if self.hide_delete {
            return false;
        }
        self.resolve(PopoverOutcome::Deleted {
            response: Value::Object(self.response.clone()),
        });
        self.close();
        true
    }

    pub fn key_press(&mut self, key: PopoverKey) {
        match key {
            PopoverKey::Enter => {
                self.accept();
            }
            PopoverKey::Other => self.input.clear_error(),
        }
    }

    fn resolve(&mut self, outcome: PopoverOutcome) {
        if let Some(tx) = self.pending.take() {
            // The caller may have dropped the receiver; nothing to deliver to.
            let _ = tx.send(outcome.clone());
        }
        self.events.push(PopoverEvent::Resolved(outcome));
    }

    fn sync_dialog_events(&mut self) {
        for event in self.dialog.take_events() {
            match event {
                DialogEvent::OpenedChanged(true) => self.events.push(PopoverEvent::FocusInput),
                DialogEvent::OpenedChanged(false) => {
                    self.input.clear_error();
                    if self.pending.is_some() {
                        self.resolve(PopoverOutcome::Dismissed);
                    }
                    self.events.push(PopoverEvent::Closed);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::Rect;

    struct Host {
        primary: Option<String>,
    }

    impl LayoutHost for Host {
        fn viewport_rect(&self) -> Rect {
            Rect::new(0.0, 0.0, 800.0, 600.0)
        }
        fn target_rect(&self, target: TargetId) -> Option<Rect> {
            (target.0 != 0).then(|| Rect::new(100.0 * target.0 as f32, 50.0, 60.0, 20.0))
        }
        fn content_rect(&self) -> Rect {
            Rect::new(0.0, 0.0, 240.0, 130.0)
        }
        fn header_rect(&self) -> Rect {
            Rect::new(0.0, 0.0, 240.0, 36.0)
        }
        fn primary_color(&self) -> Option<String> {
            self.primary.clone()
        }
    }

    fn popover(host: &Host) -> PopoverDialog {
        PopoverDialog::from_config(&BalloonConfig::default(), host).unwrap()
    }

    #[test]
    fn config_colors_fall_back_to_host_primary() {
        let host = Host { primary: Some("#3366ff".into()) };
        let p = popover(&host);
        let style = p.dialog().style();
        assert_eq!(style.header_color.to_srgba_u8(), [0x33, 0x66, 0xff, 255]);
        assert_eq!(style.body_color.to_srgba_u8(), [255, 255, 255, 255]);
        assert_eq!(p.input_label(), "Description");
        assert_eq!(p.header_text(), "Create");

        let host = Host { primary: None };
        let p = popover(&host);
        assert_eq!(p.dialog().style().header_color.to_srgba_u8(), [0xcc, 0xcc, 0xcc, 255]);
    }

    #[test]
    fn connect_without_target_returns_nothing() {
        let host = Host { primary: None };
        let mut p = popover(&host);
        assert!(p.connect(None, &host, Instant::now()).is_none());
        assert!(!p.is_open());
        assert!(p.take_events().is_empty());
    }

    #[test]
    fn blank_accept_flags_the_input_and_stays_open() {
        let host = Host { primary: None };
        let mut p = popover(&host);
        let rx = p.connect(Some(TargetId(1)), &host, Instant::now()).unwrap();
        assert_eq!(p.take_events(), vec![PopoverEvent::FocusInput]);

        assert!(!p.accept());
        assert!(p.is_open());
        assert!(p.is_invalid());
        assert_eq!(p.error_message(), Some("This field cannot be blank."));
        assert!(rx.try_recv().is_err());

        p.key_press(PopoverKey::Other);
        assert!(!p.is_invalid());
        assert_eq!(p.error_message(), None);
    }

    #[test]
    fn enter_accepts_with_response_object() {
        let host = Host { primary: None };
        let mut p = popover(&host);
        let mut response = Map::new();
        response.insert("id".into(), Value::from(7));
        p.set_response_object(response);

        let rx = p.connect(Some(TargetId(2)), &host, Instant::now()).unwrap();
        p.set_input_value("lunch");
        p.key_press(PopoverKey::Enter);

        assert!(!p.is_open());
        assert_eq!(
            rx.try_recv().unwrap(),
            PopoverOutcome::Accepted {
                response: serde_json::json!({ "id": 7, "inputValue": "lunch" }),
                value: "lunch".into(),
            }
        );
        let events = p.take_events();
        assert_eq!(events.last(), Some(&PopoverEvent::Closed));
        assert!(!events.iter().any(|e| *e == PopoverEvent::Resolved(PopoverOutcome::Dismissed)));
    }

    #[test]
    fn hidden_delete_is_ignored() {
        let host = Host { primary: None };
        let mut p = popover(&host).with_hide_delete(true);
        let rx = p.connect(Some(TargetId(1)), &host, Instant::now()).unwrap();
        assert!(!p.delete());
        assert!(p.is_open());

        p.hide_delete = false;
        assert!(p.delete());
        assert!(matches!(rx.try_recv().unwrap(), PopoverOutcome::Deleted { .. }));
    }

    #[test]
    fn close_dismisses_and_clears_error() {
        let host = Host { primary: None };
        let mut p = popover(&host);
        let rx = p.connect(Some(TargetId(1)), &host, Instant::now()).unwrap();
        p.accept();
        assert!(p.is_invalid());

        p.close();
        assert!(!p.is_invalid());
        assert_eq!(rx.try_recv().unwrap(), PopoverOutcome::Dismissed);
        assert_eq!(p.take_events().last(), Some(&PopoverEvent::Closed));
    }

    #[test]
    fn reconnect_dismisses_previous_cycle() {
        let host = Host { primary: None };
        let mut p = popover(&host);
        let now = Instant::now();
        let first = p.connect(Some(TargetId(1)), &host, now).unwrap();
        let second = p.connect(Some(TargetId(3)), &host, now).unwrap();

        assert_eq!(first.try_recv().unwrap(), PopoverOutcome::Dismissed);
        assert!(second.try_recv().is_err());
        assert_eq!(p.dialog().target(), Some(TargetId(3)));
    }

    /// Overlay that reports opening later, like one waiting on an animation.
    #[derive(Default)]
    struct DeferredOverlay {
        opened: bool,
        with_backdrop: bool,
    }

    impl Overlay for DeferredOverlay {
        fn opened(&self) -> bool {
            self.opened
        }
        fn open(&mut self) -> Option<OverlayEvent> {
            None
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
            self.close()
        }
    }

    #[test]
    fn deferred_overlay_still_gets_an_outcome_channel() {
        let host = Host { primary: None };
        let dialog = TooltipDialog::with_overlay(
            DeferredOverlay::default(),
            BalloonStyle::default(),
            SettlePolicy::none(),
            1.0,
        );
        let mut p = PopoverDialog::new(dialog);
        let now = Instant::now();

        let rx = p.connect(Some(TargetId(1)), &host, now).unwrap();
        assert_eq!(p.dialog().state(), DialogState::Opening);
        assert!(p.take_events().is_empty());

        p.handle_overlay_event(OverlayEvent::OpenedChanged(true), &host, now);
        assert!(p.is_open());
        assert_eq!(p.take_events(), vec![PopoverEvent::FocusInput]);

        p.set_input_value("later");
        assert!(p.accept());
        assert!(matches!(
            rx.try_recv().unwrap(),
            PopoverOutcome::Accepted { value, .. } if value == "later"
        ));
    }

    #[test]
    fn connect_to_missing_target_closes_immediately() {
        let host = Host { primary: None };
        let mut p = popover(&host);
        assert!(p.connect(Some(TargetId(0)), &host, Instant::now()).is_none());
        assert!(!p.is_open());
    }
}
