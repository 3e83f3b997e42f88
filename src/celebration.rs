//! Confetti for the finale
//!
//! Entering the celebration fires one big burst from the lower middle of the
//! screen, then two side cannons half a second later, then a light drizzle
//! from both edges every 400ms until the celebration is stopped. Cue times
//! come from the frame timestamps the host passes in, so the whole sequence
//! runs inside the frame loop and stops with it.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::f32::consts::PI;

use crate::render::{Color, Surface};
use crate::sample;

/// Launch speed in pixels per frame (halved to doubled at random)
pub const START_VELOCITY: f32 = 45.0;
/// Per-frame velocity retention
pub const DECAY: f32 = 0.9;
/// Downward drift added every frame (px)
pub const GRAVITY: f32 = 3.0;
/// Frames a piece lives before it is dropped
pub const LIFETIME: u32 = 200;
/// Hard cap on live pieces
pub const MAX_CONFETTI: usize = 600;

/// Delay before the side cannons (ms)
pub const CANNON_DELAY_MS: f64 = 500.0;
/// Period of the edge drizzle (ms)
pub const DRIZZLE_INTERVAL_MS: f64 = 400.0;

const BURST_PALETTE: [Color; 6] = [
    Color::rgb(0xfda4af),
    Color::rgb(0xfb7185),
    Color::rgb(0xf43f5e),
    Color::rgb(0xe11d48),
    Color::rgb(0xd4a574),
    Color::rgb(0xfff1f2),
];

const CANNON_PALETTE: [Color; 4] = [
    Color::rgb(0xfda4af),
    Color::rgb(0xfb7185),
    Color::rgb(0xf43f5e),
    Color::rgb(0xd4a574),
];

const DRIZZLE_PALETTE: [Color; 3] = [
    Color::rgb(0xfda4af),
    Color::rgb(0xfb7185),
    Color::rgb(0xd4a574),
];

/// One launch of confetti
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cannon {
    pub count: usize,
    /// Launch direction in degrees; 90 is straight up, 60 leans right
    pub angle: f32,
    /// Width of the launch cone in degrees
    pub spread: f32,
    /// Launch point as a fraction of the surface size
    pub origin: Vec2,
    pub palette: &'static [Color],
}

/// Fired on the first frame
pub const OPENING_BURST: Cannon = Cannon {
    count: 100,
    angle: 90.0,
    spread: 70.0,
    origin: Vec2::new(0.5, 0.6),
    palette: &BURST_PALETTE,
};

/// Fired once, `CANNON_DELAY_MS` after the opening burst
pub const SIDE_CANNONS: [Cannon; 2] = [
    Cannon {
        count: 50,
        angle: 60.0,
        spread: 55.0,
        origin: Vec2::new(0.0, 0.5),
        palette: &CANNON_PALETTE,
    },
    Cannon {
        count: 50,
        angle: 120.0,
        spread: 55.0,
        origin: Vec2::new(1.0, 0.5),
        palette: &CANNON_PALETTE,
    },
];

/// Fired every `DRIZZLE_INTERVAL_MS` until stopped
pub const DRIZZLE: [Cannon; 2] = [
    Cannon {
        count: 3,
        angle: 60.0,
        spread: 40.0,
        origin: Vec2::new(0.0, 0.5),
        palette: &DRIZZLE_PALETTE,
    },
    Cannon {
        count: 3,
        angle: 120.0,
        spread: 40.0,
        origin: Vec2::new(1.0, 0.5),
        palette: &DRIZZLE_PALETTE,
    },
];

/// A single piece of confetti
#[derive(Debug, Clone)]
pub struct Confetti {
    pub pos: Vec2,
    /// Direction of travel in screen space (radians, y down)
    pub heading: f32,
    pub velocity: f32,
    /// Flip phase; the piece looks thinner as it turns edge-on
    pub wobble: f32,
    pub wobble_speed: f32,
    pub tilt: f32,
    pub size: f32,
    pub color: Color,
    /// Frames lived
    pub tick: u32,
}

impl Confetti {
    fn launch<R: Rng + ?Sized>(cannon: &Cannon, origin: Vec2, rng: &mut R) -> Self {
        let spread = cannon.spread.to_radians();
        let color = cannon
            .palette
            .choose(rng)
            .copied()
            .unwrap_or(Color::rgb(0xf43f5e));

        Self {
            pos: origin,
            heading: -cannon.angle.to_radians() + spread * (0.5 - rng.random::<f32>()),
            velocity: START_VELOCITY * (0.5 + rng.random::<f32>()),
            wobble: sample(rng, 0.0, 10.0),
            wobble_speed: sample(rng, 0.05, 0.15).min(0.11),
            tilt: sample(rng, 0.25, 0.75) * PI,
            size: sample(rng, 4.0, 7.0),
            color,
            tick: 0,
        }
    }

    /// Advance one frame. Returns false once the piece has burnt out.
    pub fn step(&mut self) -> bool {
        self.pos += Vec2::from_angle(self.heading) * self.velocity + Vec2::new(0.0, GRAVITY);
        self.velocity *= DECAY;
        self.wobble += self.wobble_speed;
        self.tilt += 0.1;
        self.tick += 1;
        self.tick < LIFETIME
    }

    /// Opacity, fading linearly over the lifetime
    pub fn alpha(&self) -> f32 {
        (1.0 - self.tick as f32 / LIFETIME as f32).max(0.0)
    }

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let thickness = self.wobble.sin().abs().max(0.2);

        surface.save();
        surface.translate(self.pos);
        surface.rotate(self.tilt);
        surface.set_alpha(self.alpha());
        surface.set_fill(self.color);
        surface.fill_ellipse(Vec2::ZERO, Vec2::new(self.size, self.size * thickness));
        surface.restore();
    }
}

/// Confetti show for the final stage
#[derive(Debug, Clone)]
pub struct Celebration {
    confetti: Vec<Confetti>,
    bounds: Vec2,
    /// Timestamp of the first frame
    started_at: Option<f64>,
    cannons_fired: bool,
    /// Elapsed time of the next drizzle volley; `None` once stopped
    next_drizzle: Option<f64>,
}

impl Celebration {
    pub fn new(bounds: Vec2) -> Self {
        Self {
            confetti: Vec::new(),
            bounds,
            started_at: None,
            cannons_fired: false,
            next_drizzle: Some(DRIZZLE_INTERVAL_MS),
        }
    }

    pub fn confetti(&self) -> &[Confetti] {
        &self.confetti
    }

    pub fn len(&self) -> usize {
        self.confetti.len()
    }

    pub fn is_empty(&self) -> bool {
        self.confetti.is_empty()
    }

    /// Cancel every pending cue; live pieces still fall out
    pub fn stop(&mut self) {
        if self.next_drizzle.take().is_some() {
            log::debug!("Confetti drizzle stopped");
        }
        self.cannons_fired = true;
        if self.started_at.is_none() {
            self.started_at = Some(0.0);
        }
    }

    /// Launch one cannon. Returns how many pieces were added.
    pub fn fire<R: Rng + ?Sized>(&mut self, cannon: &Cannon, rng: &mut R) -> usize {
        let room = MAX_CONFETTI.saturating_sub(self.confetti.len());
        let count = cannon.count.min(room);
        let origin = cannon.origin * self.bounds;
        self.confetti
            .extend((0..count).map(|_| Confetti::launch(cannon, origin, rng)));
        count
    }

    /// Fire every cue due at `now` (ms). Returns how many pieces were added.
    pub fn advance<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> usize {
        let Some(start) = self.started_at else {
            self.started_at = Some(now);
            log::debug!("Celebration started");
            return self.fire(&OPENING_BURST, rng);
        };
        let elapsed = now - start;
        let mut launched = 0;

        if !self.cannons_fired && elapsed >= CANNON_DELAY_MS {
            self.cannons_fired = true;
            for cannon in &SIDE_CANNONS {
                launched += self.fire(cannon, rng);
            }
        }

        if let Some(due) = self.next_drizzle {
            if elapsed >= due {
                for cannon in &DRIZZLE {
                    launched += self.fire(cannon, rng);
                }
                // One volley per frame; volleys missed while the page was hidden are dropped
                let missed = ((elapsed - due) / DRIZZLE_INTERVAL_MS).floor();
                self.next_drizzle = Some(due + (missed + 1.0) * DRIZZLE_INTERVAL_MS);
            }
        }

        launched
    }

    /// Move every piece one frame and drop the burnt out ones.
    /// Returns how many were dropped.
    pub fn update(&mut self) -> usize {
        let before = self.confetti.len();
        self.confetti.retain_mut(Confetti::step);
        before - self.confetti.len()
    }

    /// Clear the surface and draw every piece. Returns how many were drawn.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> usize {
        surface.clear();
        for piece in &self.confetti {
            piece.draw(surface);
        }
        self.confetti.len()
    }

    /// One animation tick at timestamp `now` (ms)
    pub fn frame<S, R>(&mut self, surface: &mut S, now: f64, rng: &mut R) -> usize
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        self.bounds = surface.size();
        self.advance(now, rng);
        self.update();
        self.draw(surface)
    }
}
