//! Valentine Card - an animated three-stage greeting
//!
//! Core modules:
//! - `field`: Ambient particle field (hearts, petals, sparkles drifting upward)
//! - `celebration`: Confetti bursts for the finale
//! - `evade`: Placement for the decline button that runs away from the pointer
//! - `geometry`: Screen rectangles and the layout query abstraction
//! - `render`: 2D drawing surface abstraction and a recording surface
//! - `animation`: Cancellable frame loop handle
//! - `stage`: Hero → Question → Celebration sequencing
//! - `settings`: Data-driven tunables (density, weights, margins, taunts)
//! - `web`: Browser host (Canvas 2D, DOM geometry, requestAnimationFrame)

pub mod animation;
pub mod celebration;
pub mod evade;
pub mod field;
pub mod geometry;
pub mod render;
pub mod settings;
pub mod stage;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use animation::{AnimationHandle, FrameScheduler};
pub use celebration::Celebration;
pub use evade::{EvadeConfig, EvadeOutcome, EvasiveButton};
pub use field::{Particle, ParticleField, ParticleKind};
pub use geometry::{Element, FixedLayout, GeometryProvider, Rect};
pub use render::{Color, DrawList, Surface};
pub use settings::{Density, KindWeights, Settings};
pub use stage::Stage;

use rand::Rng;

/// Card configuration constants
pub mod consts {
    /// Default number of ambient particles
    pub const PARTICLE_COUNT: usize = 30;
    /// Hard cap on particles regardless of config
    pub const MAX_PARTICLES: usize = 120;

    /// Gap kept between the decline button and every avoided element (px)
    pub const SAFE_MARGIN: f32 = 30.0;
    /// Minimum distance from the viewport edge for a placement (px)
    pub const EDGE_PADDING: f32 = 24.0;
    /// Random placement samples per evasion
    pub const MAX_ATTEMPTS: u32 = 30;

    /// Scale lost per evasion
    pub const SCALE_STEP: f32 = 0.02;
    /// The decline button never shrinks below this
    pub const MIN_SCALE: f32 = 0.85;

    /// Ray half-length of a sparkle, relative to its size
    pub const SPARKLE_RAY: f32 = 2.5;
    /// Petal ellipse width, relative to its size
    pub const PETAL_ASPECT: f32 = 0.4;
}

/// Uniform sample in `[lo, hi)`.
///
/// Unlike `random_range` this never panics on an empty or inverted range,
/// which matters when the surface has collapsed to zero width.
#[inline]
pub fn sample<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}
