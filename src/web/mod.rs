//! Browser host
//!
//! Adapters that plug the host-agnostic core into the page:
//! - `canvas`: [`Surface`](crate::render::Surface) over Canvas 2D
//! - `dom`: [`GeometryProvider`](crate::geometry::GeometryProvider) over element ids
//! - `frames`: [`FrameScheduler`](crate::animation::FrameScheduler) over requestAnimationFrame
//! - `layer_mount`: full-window canvas layers (particles, confetti) with their
//!   frame loop and resize listener
//! - `question_mount`: hover/touch wiring for the runaway decline button

pub mod canvas;
pub mod dom;
pub mod frames;
pub mod layer_mount;
pub mod question_mount;

pub use canvas::CanvasSurface;
pub use dom::DomGeometry;
pub use frames::WebFrames;
pub use layer_mount::{CanvasLayer, CelebrationMount, FieldMount, LayerMount};
pub use question_mount::QuestionMount;

use crate::stage::Stage;

/// CSS class that hides an element
pub const HIDDEN_CLASS: &str = "hidden";

/// Show the section for `stage` and hide the others
pub fn show_stage(document: &web_sys::Document, stage: Stage) {
    for s in Stage::ALL {
        if let Some(el) = document.get_element_by_id(s.section_id()) {
            set_hidden(&el, s != stage);
        }
    }
}

/// Toggle the `hidden` class on `el`
pub fn set_hidden(el: &web_sys::Element, hidden: bool) {
    let classes = el.class_list();
    let result = if hidden {
        classes.add_1(HIDDEN_CLASS)
    } else {
        classes.remove_1(HIDDEN_CLASS)
    };
    if let Err(e) = result {
        log::warn!("Failed to toggle visibility on #{}: {:?}", el.id(), e);
    }
}

/// Session seed mixing wall clock and `Math.random`
pub fn session_seed() -> u64 {
    let clock = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    clock ^ (noise << 32)
}
