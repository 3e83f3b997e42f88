//! Layout geometry read from the live DOM

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::geometry::{Element, GeometryProvider, Rect};

/// [`GeometryProvider`] over `getBoundingClientRect`
#[derive(Clone)]
pub struct DomGeometry {
    window: Window,
    document: Document,
}

impl DomGeometry {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }
}

impl GeometryProvider for DomGeometry {
    fn viewport(&self) -> Vec2 {
        let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        Vec2::new(
            dim(self.window.inner_width()),
            dim(self.window.inner_height()),
        )
    }

    fn rect(&self, element: Element) -> Option<Rect> {
        let el = self.document.get_element_by_id(element.dom_id())?;
        let r = el.get_bounding_client_rect();
        let bounds = Rect::new(
            r.left() as f32,
            r.top() as f32,
            r.width() as f32,
            r.height() as f32,
        );

        // The decline button is scaled by its own transform; place candidates
        // at its layout size around the visible center.
        if element == Element::DeclineButton {
            if let Some(html) = el.dyn_ref::<HtmlElement>() {
                let size = Vec2::new(html.offset_width() as f32, html.offset_height() as f32);
                return Some(Rect::from_center(bounds.center(), size));
            }
        }

        Some(bounds)
    }
}
