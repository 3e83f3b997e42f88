//! Recording surface used for headless runs

use glam::Vec2;

use super::{Color, PathCmd, Surface};

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Save,
    Restore,
    Alpha(f32),
    Fill(Color),
    Stroke { color: Color, width: f32 },
    Translate(Vec2),
    Rotate(f32),
    Path(Vec<PathCmd>),
    Ellipse { center: Vec2, radii: Vec2 },
    Line { from: Vec2, to: Vec2 },
}

/// A [`Surface`] that records everything drawn into it
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    size: Vec2,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    /// Change the reported size (simulates a window resize)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands recorded since the last `Clear`
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.commands[start..]
    }

    /// Number of shapes (one `save`/`restore` pair each) in the last frame
    pub fn shapes_in_last_frame(&self) -> usize {
        self.last_frame()
            .iter()
            .filter(|c| **c == DrawCommand::Save)
            .count()
    }
}

impl Surface for DrawList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        // Only the current frame is interesting
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::Alpha(alpha));
    }

    fn set_fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn set_stroke(&mut self, color: Color, width: f32) {
        self.commands.push(DrawCommand::Stroke { color, width });
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCommand::Rotate(radians));
    }

    fn fill_path(&mut self, path: &[PathCmd]) {
        self.commands.push(DrawCommand::Path(path.to_vec()));
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2) {
        self.commands.push(DrawCommand::Ellipse { center, radii });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::Line { from, to });
    }
}
