//! Canvas 2D drawing surface

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::render::{Color, PathCmd, Surface};

/// [`Surface`] backed by a `<canvas>` 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap `canvas`, or `None` if it has no 2D context
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Size the backing store to the window's inner size
    pub fn fit_to_window(&self, window: &Window) {
        let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32
        };
        let width = dim(window.inner_width());
        let height = dim(window.inner_height());
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn set_fill(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn set_stroke(&mut self, color: Color, width: f32) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
    }

    fn translate(&mut self, offset: Vec2) {
        let _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn rotate(&mut self, radians: f32) {
        let _ = self.ctx.rotate(radians as f64);
    }

    fn fill_path(&mut self, path: &[PathCmd]) {
        self.ctx.begin_path();
        for cmd in path {
            match *cmd {
                PathCmd::MoveTo(p) => self.ctx.move_to(p.x as f64, p.y as f64),
                PathCmd::CubicTo(c1, c2, end) => self.ctx.bezier_curve_to(
                    c1.x as f64,
                    c1.y as f64,
                    c2.x as f64,
                    c2.y as f64,
                    end.x as f64,
                    end.y as f64,
                ),
                PathCmd::Close => self.ctx.close_path(),
            }
        }
        self.ctx.fill();
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2) {
        self.ctx.begin_path();
        if self
            .ctx
            .ellipse(
                center.x as f64,
                center.y as f64,
                radii.x as f64,
                radii.y as f64,
                0.0,
                0.0,
                std::f64::consts::TAU,
            )
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }
}
