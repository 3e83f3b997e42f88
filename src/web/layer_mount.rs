//! Full-window canvas layers driven by requestAnimationFrame
//!
//! The ambient particles and the finale confetti each own a fixed canvas
//! stretched over the page. A [`LayerMount`] keeps the canvas sized to the
//! window and runs the layer once per display frame until it is dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{HtmlCanvasElement, Window};

use super::canvas::CanvasSurface;
use super::frames::{FrameCallback, WebFrames};
use crate::animation::AnimationHandle;
use crate::celebration::Celebration;
use crate::field::ParticleField;
use crate::render::Surface;

/// Content redrawn on every frame of a [`LayerMount`]
pub trait CanvasLayer {
    /// Name used in log lines
    const NAME: &'static str;
    /// CSS stacking order of the layer's canvas
    const Z_INDEX: i32;

    /// Advance and redraw; `now` is the frame timestamp in milliseconds
    fn render_frame(&mut self, surface: &mut CanvasSurface, now: f64, rng: &mut Pcg32);

    /// Called once when the layer is unmounted
    fn halt(&mut self) {}
}

impl CanvasLayer for ParticleField {
    const NAME: &'static str = "Particle layer";
    const Z_INDEX: i32 = 0;

    fn render_frame(&mut self, surface: &mut CanvasSurface, _now: f64, rng: &mut Pcg32) {
        self.frame(surface, rng);
    }
}

impl CanvasLayer for Celebration {
    const NAME: &'static str = "Confetti layer";
    const Z_INDEX: i32 = 100;

    fn render_frame(&mut self, surface: &mut CanvasSurface, now: f64, rng: &mut Pcg32) {
        self.frame(surface, now, rng);
    }

    fn halt(&mut self) {
        self.stop();
    }
}

pub type FieldMount = LayerMount<ParticleField>;
pub type CelebrationMount = LayerMount<Celebration>;

struct LayerState<L> {
    layer: L,
    surface: CanvasSurface,
    rng: Pcg32,
    handle: AnimationHandle<WebFrames>,
}

/// A running canvas layer. Dropping it stops the loop and unhooks resize.
pub struct LayerMount<L: CanvasLayer + 'static> {
    window: Window,
    state: Rc<RefCell<LayerState<L>>>,
    callback: FrameCallback,
    resize: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

impl<L: CanvasLayer + 'static> LayerMount<L> {
    /// Start a layer on `canvas`, built by `build` for the canvas size.
    ///
    /// Returns `None` (and draws nothing) when the canvas has no 2D context.
    pub fn mount<F>(canvas: HtmlCanvasElement, seed: u64, build: F) -> Option<Self>
    where
        F: FnOnce(Vec2, &mut Pcg32) -> L,
    {
        let window = web_sys::window()?;

        // Decorative layer: never intercept input
        let style = canvas.style();
        let _ = style.set_property("pointer-events", "none");
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("inset", "0");
        let _ = style.set_property("z-index", &L::Z_INDEX.to_string());

        let Some(surface) = CanvasSurface::from_canvas(canvas) else {
            log::warn!("Canvas 2D context unavailable, {} disabled", L::NAME);
            return None;
        };
        surface.fit_to_window(&window);

        let mut rng = Pcg32::seed_from_u64(seed);
        let layer = build(surface.size(), &mut rng);

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let handle = AnimationHandle::new(WebFrames::new(window.clone(), callback.clone()));
        let state = Rc::new(RefCell::new(LayerState {
            layer,
            surface,
            rng,
            handle,
        }));

        // Weak refs keep the callback slot from owning the state it drives
        {
            let weak = Rc::downgrade(&state);
            *callback.borrow_mut() = Some(Closure::new(move |now: f64| {
                on_frame(&weak, now);
            }));
        }

        let resize = {
            let weak = Rc::downgrade(&state);
            let window_clone = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(state) = weak.upgrade() {
                    state.borrow().surface.fit_to_window(&window_clone);
                }
            });
            match window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            {
                Ok(()) => Some(closure),
                Err(e) => {
                    log::warn!("Could not watch window resize: {:?}", e);
                    None
                }
            }
        };

        let started = state.borrow_mut().handle.start();
        log::info!("{} mounted (running: {})", L::NAME, started);

        Some(Self {
            window,
            state,
            callback,
            resize,
        })
    }

    /// Stop the frame loop but keep the layer and its listeners
    pub fn pause(&self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.handle.stop();
            log::info!("{} paused after {} frames", L::NAME, state.handle.frames());
        }
    }

    /// Restart the frame loop after [`pause`](Self::pause)
    pub fn resume(&self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            if state.handle.start() {
                log::info!("{} resumed", L::NAME);
            }
        }
    }

    /// Stop the loop and release every listener
    pub fn unmount(self) {
        drop(self);
    }
}

fn on_frame<L: CanvasLayer>(weak: &Weak<RefCell<LayerState<L>>>, now: f64) {
    let Some(state) = weak.upgrade() else {
        return;
    };
    let Ok(mut guard) = state.try_borrow_mut() else {
        return;
    };
    let LayerState {
        layer,
        surface,
        rng,
        handle,
    } = &mut *guard;

    handle.fire(|| layer.render_frame(surface, now, rng));
}

impl<L: CanvasLayer + 'static> Drop for LayerMount<L> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.layer.halt();
            state.handle.stop();
        }
        if let Some(resize) = self.resize.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
        }
        self.callback.borrow_mut().take();
        log::info!("{} unmounted", L::NAME);
    }
}
