//! Hover/touch wiring for the decline button

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Document, HtmlElement};

use super::dom::DomGeometry;
use crate::evade::{EvadeConfig, EvadeOutcome, EvasiveButton};
use crate::geometry::Element;
use crate::settings::Settings;

/// Class added once the button has left its natural position
pub const ESCAPED_CLASS: &str = "escaped";

/// Events that trigger an evasion
const TRIGGERS: [&str; 2] = ["mouseenter", "touchstart"];

struct QuestionState {
    button: EvasiveButton,
    rng: Pcg32,
    config: EvadeConfig,
    taunts: Vec<String>,
    geometry: DomGeometry,
}

/// Live listeners on the decline button. Dropping it removes them.
pub struct QuestionMount {
    target: HtmlElement,
    listeners: Vec<(&'static str, Closure<dyn FnMut(web_sys::Event)>)>,
    state: Rc<RefCell<QuestionState>>,
}

impl QuestionMount {
    /// Hook the decline button. `None` if the button is not in the page.
    pub fn mount(document: &Document, settings: &Settings, seed: u64) -> Option<Self> {
        let window = web_sys::window()?;
        let target = document
            .get_element_by_id(Element::DeclineButton.dom_id())?
            .dyn_into::<HtmlElement>()
            .ok()?;

        let state = Rc::new(RefCell::new(QuestionState {
            button: EvasiveButton::new(),
            rng: Pcg32::seed_from_u64(seed),
            config: settings.evasion,
            taunts: settings.taunts.clone(),
            geometry: DomGeometry::new(window, document.clone()),
        }));

        let mut listeners = Vec::with_capacity(TRIGGERS.len());
        for event_name in TRIGGERS {
            let state = state.clone();
            let target_clone = target.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                if event.type_() == "touchstart" {
                    // Keep the tap from turning into a click on the button
                    event.prevent_default();
                }
                on_trigger(&state, &target_clone, &document);
            });
            match target.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
            {
                Ok(()) => listeners.push((event_name, closure)),
                Err(e) => log::warn!("Could not listen for {}: {:?}", event_name, e),
            }
        }

        log::info!("Decline button armed");
        Some(Self {
            target,
            listeners,
            state,
        })
    }

    /// Remove the listeners
    pub fn unmount(self) {
        drop(self);
    }
}

fn on_trigger(state: &Rc<RefCell<QuestionState>>, target: &HtmlElement, document: &Document) {
    let Ok(mut guard) = state.try_borrow_mut() else {
        return;
    };
    let QuestionState {
        button,
        rng,
        config,
        taunts,
        geometry,
    } = &mut *guard;

    if button.evade(geometry, config, rng) == EvadeOutcome::Skipped {
        return;
    }

    let _ = target
        .style()
        .set_property("transform", &button.css_transform());
    if button.escaped {
        let _ = target.class_list().add_1(ESCAPED_CLASS);
    }
    if let Some(el) = document.get_element_by_id(Element::Message.dom_id()) {
        el.set_text_content(button.message(taunts.as_slice()));
    }
}

impl Drop for QuestionMount {
    fn drop(&mut self) {
        for (event_name, closure) in self.listeners.drain(..) {
            let _ = self
                .target
                .remove_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
        }
        log::info!(
            "Decline button released after {} evasions",
            self.state.borrow().button.evasions
        );
    }
}
