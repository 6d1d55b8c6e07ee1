use crate::scene::*;

/// Size of the raster target in device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Reset every pixel of the target to the given color.
    Clear(ColorLinPremul),
    /// Filled path (solid color only)
    FillPath { path: Path, color: ColorLinPremul, transform: Transform2D },
    /// Stroked path with uniform width.
    StrokePath { path: Path, stroke: Stroke, color: ColorLinPremul, transform: Transform2D },
    /// Blurred, offset silhouette of a path. Emitted right before the matching `FillPath`
    /// so the fill lands on top of its own shadow.
    PathShadow { path: Path, spec: ShadowSpec, transform: Transform2D },
    /// Clip rect in the coordinate space of the transform active when it was pushed.
    PushClip { clip: ClipRect, transform: Transform2D },
    PopClip,
    PushTransform(Transform2D),
    PopTransform,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    pub viewport: Viewport,
    pub commands: Vec<Command>,
}

impl DisplayList {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of commands that put pixels on the target.
    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    Command::FillPath { .. } | Command::StrokePath { .. } | Command::PathShadow { .. }
                )
            })
            .count()
    }
}
