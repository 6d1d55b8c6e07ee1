//! balloon-scene: the tooltip balloon dialog and the popover input dialog built on it.
//!
//! Widgets never query a window or document directly. Everything they need
//! from the host layout system comes through [`LayoutHost`], and everything
//! they produce (inline position, raster surface, notifications) is read back
//! by the host.

pub mod elements;
mod host;
pub mod positioning;
pub mod settle;
mod style;

pub use elements::{
    BalloonRenderer, BasicOverlay, DialogEvent, DialogState, InlinePosition, Overlay,
    OverlayEvent, PopoverDialog, PopoverEvent, PopoverKey, PopoverOutcome, TooltipDialog,
};
pub use host::{LayoutHost, TargetId};
pub use positioning::{BalloonGeometry, ContentPadding, TipEdge, compute_geometry};
pub use settle::{SettlePolicy, SettleTimers};
pub use style::{BalloonStyle, StyleError};
