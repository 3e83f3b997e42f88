//! requestAnimationFrame scheduling

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::Window;

use crate::animation::FrameScheduler;

/// Slot holding the frame callback; emptied on teardown
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// [`FrameScheduler`] over `requestAnimationFrame`
pub struct WebFrames {
    window: Window,
    callback: FrameCallback,
}

impl WebFrames {
    pub fn new(window: Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for WebFrames {
    type Request = i32;

    fn request(&mut self) -> Option<i32> {
        let slot = self.callback.borrow();
        let callback = slot.as_ref()?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel(&mut self, request: i32) {
        let _ = self.window.cancel_animation_frame(request);
    }
}
