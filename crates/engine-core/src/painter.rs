use crate::display_list::{Command, DisplayList, Viewport};
use crate::scene::*;

/// Records drawing calls into a [`DisplayList`], tracking the transform stack and clip depth.
pub struct Painter {
    list: DisplayList,
    transform_stack: Vec<Transform2D>,
    clip_depth: usize,
}

impl Painter {
    pub fn begin_frame(viewport: Viewport) -> Self {
        Self {
            list: DisplayList {
                viewport,
                commands: Vec::new(),
            },
            transform_stack: vec![Transform2D::identity()],
            clip_depth: 0,
        }
    }

    pub fn current_transform(&self) -> Transform2D {
        self.transform_stack.last().copied().unwrap_or_default()
    }

    pub fn push_transform(&mut self, t: Transform2D) {
        // Compose with current transform so nested pushes multiply.
        let composed = self.current_transform().concat(t);
        self.list.commands.push(Command::PushTransform(composed));
        self.transform_stack.push(composed);
    }
    pub fn pop_transform(&mut self) {
        // The root identity is never popped.
        if self.transform_stack.len() > 1 {
            self.list.commands.push(Command::PopTransform);
            let _ = self.transform_stack.pop();
        }
    }

    pub fn push_clip_rect(&mut self, rect: Rect) {
        self.clip_depth += 1;
        let t = self.current_transform();
        self.list.commands.push(Command::PushClip {
            clip: ClipRect(rect),
            transform: t,
        });
    }
    pub fn pop_clip(&mut self) {
        if self.clip_depth > 0 {
            self.clip_depth -= 1;
            self.list.commands.push(Command::PopClip);
        }
    }

    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    pub fn clear(&mut self, color: ColorLinPremul) {
        self.list.commands.push(Command::Clear(color));
    }

    /// Fill a path with a solid color. For now we only support solid color fills for paths.
    pub fn fill_path(&mut self, path: Path, color: ColorLinPremul) {
        let t = self.current_transform();
        self.list.commands.push(Command::FillPath {
            path,
            color,
            transform: t,
        });
    }

    /// Fill a path and cast a drop shadow beneath it.
    pub fn fill_path_with_shadow(&mut self, path: Path, color: ColorLinPremul, spec: ShadowSpec) {
        let t = self.current_transform();
        self.list.commands.push(Command::PathShadow {
            path: path.clone(),
            spec,
            transform: t,
        });
        self.list.commands.push(Command::FillPath {
            path,
            color,
            transform: t,
        });
    }

    /// Stroke a path with uniform width and a solid color.
    pub fn stroke_path(&mut self, path: Path, stroke: Stroke, color: ColorLinPremul) {
        let t = self.current_transform();
        self.list.commands.push(Command::StrokePath {
            path,
            stroke,
            color,
            transform: t,
        });
    }

    /// Get a reference to the display list (for inspection before finishing)
    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }

    /// Close any clips and transforms left open and hand back the list.
    pub fn finish(mut self) -> DisplayList {
        while self.clip_depth > 0 {
            self.pop_clip();
        }
        while self.transform_stack.len() > 1 {
            self.pop_transform();
        }
        self.list
    }
}
