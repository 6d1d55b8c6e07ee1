use balloon_config::TooltipStyleConfig;
use engine_core::{ColorLinPremul, ColorParseError};
use thiserror::Error;

/// Rejected style configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error("invalid {field}: {source}")]
    Color {
        field: &'static str,
        #[source]
        source: ColorParseError,
    },

    #[error("{field} must be a finite, non-negative number (got {value})")]
    Dimension { field: &'static str, value: f32 },
}

/// Immutable balloon style, validated once at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BalloonStyle {
    pub radius: f32,
    pub tip_height: f32,
    pub tip_base: f32,
    pub header_color: ColorLinPremul,
    pub body_color: ColorLinPremul,
    pub border_color: ColorLinPremul,
    pub shadow_color: ColorLinPremul,
    /// Horizontal inset on each side that leaves room for the drop shadow.
    pub shadow_margin: f32,
    /// Outline the balloon with `border_color`. Off unless asked for.
    pub stroke_border: bool,
}

impl Default for BalloonStyle {
    fn default() -> Self {
        Self {
            radius: 8.0,
            tip_height: 12.0,
            tip_base: 20.0,
            header_color: ColorLinPremul::rgba(0xcc, 0xcc, 0xcc, 255),
            body_color: ColorLinPremul::rgba(0xee, 0xee, 0xee, 255),
            border_color: ColorLinPremul::rgba(0x66, 0x66, 0x66, 255),
            shadow_color: ColorLinPremul::rgba(0x55, 0x55, 0x55, 255),
            shadow_margin: 7.0,
            stroke_border: false,
        }
    }
}

fn dimension(field: &'static str, value: f32) -> Result<f32, StyleError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(StyleError::Dimension { field, value })
    }
}

pub(crate) fn color(field: &'static str, value: &str) -> Result<ColorLinPremul, StyleError> {
    ColorLinPremul::from_css(value).map_err(|source| StyleError::Color { field, source })
}

impl BalloonStyle {
    pub fn from_config(config: &TooltipStyleConfig) -> Result<Self, StyleError> {
        Ok(Self {
            radius: dimension("radius", config.radius)?,
            tip_height: dimension("tip_height", config.tip_height)?,
            tip_base: dimension("tip_base", config.tip_base)?,
            header_color: color("header_color", &config.header_color)?,
            body_color: color("body_color", &config.body_color)?,
            border_color: color("border_color", &config.border_color)?,
            shadow_color: color("shadow_color", &config.shadow_color)?,
            shadow_margin: dimension("shadow_margin", config.shadow_margin)?,
            stroke_border: config.stroke_border,
        })
    }

    pub fn with_header_color(mut self, color: ColorLinPremul) -> Self {
        self.header_color = color;
        self
    }

    pub fn with_body_color(mut self, color: ColorLinPremul) -> Self {
        self.body_color = color;
        self
    }
}
