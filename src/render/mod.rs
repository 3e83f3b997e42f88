//! 2D drawing surface abstraction
//!
//! The particle field draws through [`Surface`], which covers the small
//! subset of Canvas 2D it needs. The browser implements it over
//! `CanvasRenderingContext2d`; tests and the native demo record into a
//! [`DrawList`].

pub mod draw_list;

pub use draw_list::{DrawCommand, DrawList};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An opaque sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const fn rgb(hex: u32) -> Self {
        Self(hex & 0x00ff_ffff)
    }

    /// CSS hex notation, e.g. `#fda4af`
    pub fn to_css(&self) -> String {
        format!("#{:06x}", self.0)
    }
}

/// A segment of a filled path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo(Vec2),
    /// Cubic bezier: control 1, control 2, end
    CubicTo(Vec2, Vec2, Vec2),
    Close,
}

/// Minimal immediate-mode 2D drawing surface
pub trait Surface {
    /// Current drawable size in pixels
    fn size(&self) -> Vec2;

    /// Erase the whole surface
    fn clear(&mut self);

    /// Push the transform/alpha/style state
    fn save(&mut self);

    /// Pop the state pushed by the matching `save`
    fn restore(&mut self);

    fn set_alpha(&mut self, alpha: f32);

    fn set_fill(&mut self, color: Color);

    fn set_stroke(&mut self, color: Color, width: f32);

    fn translate(&mut self, offset: Vec2);

    fn rotate(&mut self, radians: f32);

    fn fill_path(&mut self, path: &[PathCmd]);

    /// Filled ellipse centered at `center` with semi-axes `radii`
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2);

    fn stroke_line(&mut self, from: Vec2, to: Vec2);
}
