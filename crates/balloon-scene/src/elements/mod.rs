//! Dialog elements. Geometry and painting live here; text and input widgets
//! inside the slots are up to the host.

pub mod balloon;
pub mod overlay;
pub mod popover_dialog;
pub mod tooltip_dialog;

pub use balloon::{BalloonLayout, BalloonRenderer, balloon_layout};
pub use overlay::{BasicOverlay, Overlay, OverlayEvent};
pub use popover_dialog::{PopoverDialog, PopoverEvent, PopoverKey, PopoverOutcome};
pub use tooltip_dialog::{DialogEvent, DialogState, InlinePosition, TooltipDialog};
