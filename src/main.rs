//! Valentine Card entry point
//!
//! On the web this wires the stages, the particle layer, the decline button
//! and the finale confetti into the page. Natively it runs a headless demo of
//! the same pieces.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_card {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use valentine_card::web::{self, CelebrationMount, FieldMount, QuestionMount};
    use valentine_card::{Celebration, ParticleField, Settings, Stage};

    /// DOM id of the ambient particle canvas
    const CANVAS_ID: &str = "particles";
    /// DOM id of the finale confetti canvas
    const CONFETTI_CANVAS_ID: &str = "confetti";

    /// Card instance holding everything mounted on the page
    struct Card {
        document: Document,
        settings: Settings,
        seed: u64,
        stage: Stage,
        field: Option<FieldMount>,
        question: Option<QuestionMount>,
        celebration: Option<CelebrationMount>,
    }

    impl Card {
        fn new(document: Document, settings: Settings, seed: u64) -> Self {
            Self {
                document,
                settings,
                seed,
                stage: Stage::Hero,
                field: None,
                question: None,
                celebration: None,
            }
        }

        /// Independent stream for the `n`th component
        fn derived_seed(&self, n: u64) -> u64 {
            self.seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add(n.wrapping_mul(1442695040888963407))
        }

        fn canvas(&self, id: &str) -> Option<HtmlCanvasElement> {
            let canvas = self
                .document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
            if canvas.is_none() {
                log::warn!("No #{} canvas", id);
            }
            canvas
        }

        fn mount_field(&mut self) {
            let Some(canvas) = self.canvas(CANVAS_ID) else {
                return;
            };
            let settings = &self.settings;
            self.field = FieldMount::mount(canvas, self.seed, |bounds, rng| {
                ParticleField::new(settings, bounds, rng)
            });
        }

        fn mount_celebration(&mut self) {
            let Some(canvas) = self.canvas(CONFETTI_CANVAS_ID) else {
                return;
            };
            self.celebration =
                CelebrationMount::mount(canvas, self.derived_seed(2), |bounds, _| {
                    Celebration::new(bounds)
                });
        }

        /// Move to the next stage, (un)hooking the decline button as needed
        fn advance(&mut self) {
            let next = self.stage.next();
            if next == self.stage {
                return;
            }

            if self.stage == Stage::Question {
                if let Some(question) = self.question.take() {
                    question.unmount();
                }
            }
            match next {
                Stage::Question => {
                    self.question =
                        QuestionMount::mount(&self.document, &self.settings, self.derived_seed(1));
                    if self.question.is_none() {
                        log::warn!("Decline button missing from the question stage");
                    }
                }
                Stage::Celebration => self.mount_celebration(),
                Stage::Hero => {}
            }

            log::info!("Stage {:?} -> {:?}", self.stage, next);
            self.stage = next;
            web::show_stage(&self.document, next);
        }

        /// Page is going into the back/forward cache: stop drawing, keep state
        fn suspend(&self) {
            if let Some(field) = &self.field {
                field.pause();
            }
            if let Some(celebration) = &self.celebration {
                celebration.pause();
            }
        }

        /// Page came back from the back/forward cache
        fn resume(&self) {
            if let Some(field) = &self.field {
                field.resume();
            }
            if let Some(celebration) = &self.celebration {
                celebration.resume();
            }
        }

        /// Release everything before the page goes away for good
        fn teardown(&mut self) {
            if let Some(question) = self.question.take() {
                question.unmount();
            }
            if let Some(celebration) = self.celebration.take() {
                celebration.unmount();
            }
            if let Some(field) = self.field.take() {
                field.unmount();
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Valentine card starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let settings = Settings::load();
        let seed = web::session_seed();
        log::info!("Card initialized with seed: {}", seed);

        let card = Rc::new(RefCell::new(Card::new(document.clone(), settings, seed)));
        card.borrow_mut().mount_field();
        web::show_stage(&document, Stage::Hero);

        setup_advance_button(&document, "continue-btn", card.clone())?;
        setup_advance_button(&document, "accept-btn", card.clone())?;
        setup_page_lifecycle(&window, card)?;

        log::info!("Valentine card running!");
        Ok(())
    }

    fn setup_advance_button(
        document: &Document,
        id: &str,
        card: Rc<RefCell<Card>>,
    ) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing #{} button", id);
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            card.borrow_mut().advance();
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_page_lifecycle(
        window: &web_sys::Window,
        card: Rc<RefCell<Card>>,
    ) -> Result<(), JsValue> {
        // A persisted page may be restored from the back/forward cache
        {
            let card = card.clone();
            let closure =
                Closure::<dyn FnMut(_)>::new(move |event: web_sys::PageTransitionEvent| {
                    if event.persisted() {
                        card.borrow().suspend();
                    } else {
                        card.borrow_mut().teardown();
                    }
                });
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure =
                Closure::<dyn FnMut(_)>::new(move |event: web_sys::PageTransitionEvent| {
                    if event.persisted() {
                        log::info!("Restored from back/forward cache");
                        card.borrow().resume();
                    }
                });
            window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_card::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Valentine card (native) starting...");
    log::info!("Native mode has no page to draw on - build for wasm32 to see the card");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use valentine_card::geometry::FixedLayout;
    use valentine_card::{Celebration, DrawList, Element, EvadeOutcome, EvasiveButton};
    use valentine_card::{ParticleField, Rect, Settings, Surface};

    let settings = Settings::load();
    let mut rng = Pcg32::seed_from_u64(214);

    // Particle layer on a phone-sized surface, resized halfway through
    let mut surface = DrawList::new(390.0, 844.0);
    let mut field = ParticleField::new(&settings, surface.size(), &mut rng);
    let mut wraps = 0;
    for frame in 0..600 {
        if frame == 300 {
            surface.resize(844.0, 390.0);
        }
        field.resize(surface.size());
        wraps += field.update(&mut rng);
        field.draw(&mut surface);
    }
    println!(
        "\nParticle field: {} particles, {} frames, {} wraps, {} shapes in last frame",
        field.len(),
        field.frame_count(),
        wraps,
        surface.shapes_in_last_frame()
    );

    // Decline button on the question card
    let mut layout = FixedLayout::new(390.0, 844.0)
        .with(Element::Image, Rect::new(145.0, 180.0, 100.0, 100.0))
        .with(Element::Title, Rect::new(40.0, 300.0, 310.0, 130.0))
        .with(Element::Message, Rect::new(40.0, 446.0, 310.0, 28.0))
        .with(Element::AcceptButton, Rect::new(80.0, 498.0, 110.0, 48.0));
    let natural = Rect::new(210.0, 498.0, 100.0, 48.0);
    let mut button = EvasiveButton::new();

    println!("\nDecline button:");
    for _ in 0..10 {
        layout.set(
            Element::DeclineButton,
            Rect::from_center(natural.center() + button.offset, natural.size()),
        );
        let outcome = button.evade(&layout, &settings.evasion, &mut rng);
        let where_to = match outcome {
            EvadeOutcome::Moved { candidate, .. } => {
                format!("({:.0}, {:.0})", candidate.left, candidate.top)
            }
            EvadeOutcome::Stayed => "stayed".to_string(),
            EvadeOutcome::Skipped => "skipped".to_string(),
        };
        println!(
            "  #{:<2} {:<12} scale {:.2}  {}",
            button.evasions,
            where_to,
            button.scale,
            button.message(settings.taunts.as_slice()).unwrap_or("")
        );
    }

    // Finale confetti, three seconds at 60fps
    let mut surface = DrawList::new(390.0, 844.0);
    let mut show = Celebration::new(surface.size());
    let mut peak = 0;
    for frame in 0..180 {
        let now = frame as f64 * 1000.0 / 60.0;
        peak = peak.max(show.frame(&mut surface, now, &mut rng));
    }
    println!(
        "\nCelebration: {} pieces at peak, {} still falling after 3s",
        peak,
        show.len()
    );
}
