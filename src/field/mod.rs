//! Ambient particle field
//!
//! A fixed population of hearts, petals and sparkles drifting up behind the
//! card. Particles never die: once one leaves through the top it re-enters
//! below the bottom edge at a fresh x.
//!
//! The field is host-agnostic. The caller owns the RNG and the surface and
//! calls [`ParticleField::frame`] once per display refresh.

pub mod particle;
pub mod shapes;

pub use particle::{Particle, ParticleKind};
pub use shapes::{draw_particle, heart_path};

use glam::Vec2;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use crate::render::Surface;
use crate::settings::Settings;

/// The drifting particle layer
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    /// Surface size used for wrapping
    bounds: Vec2,
    /// Frames advanced since mount
    frame: u64,
}

impl ParticleField {
    /// Spawn `settings.particle_count()` particles spread over `bounds`
    pub fn new<R: Rng + ?Sized>(settings: &Settings, bounds: Vec2, rng: &mut R) -> Self {
        let count = settings.particle_count();
        let weights = settings.kind_weights.as_array();

        let particles = match WeightedIndex::new(weights) {
            Ok(dist) => (0..count)
                .map(|_| {
                    let kind = ParticleKind::ALL[dist.sample(rng)];
                    Particle::spawn(kind, bounds, rng)
                })
                .collect(),
            Err(e) => {
                log::warn!("Bad particle weights ({}), spawning hearts only", e);
                (0..count)
                    .map(|_| Particle::spawn(ParticleKind::Heart, bounds, rng))
                    .collect()
            }
        };

        log::debug!("Spawned {} particles over {:?}", count, bounds);

        Self {
            particles,
            bounds,
            frame: 0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Adopt a new surface size; positions are left untouched
    pub fn resize(&mut self, bounds: Vec2) {
        if bounds != self.bounds {
            log::debug!("Particle field resized {:?} -> {:?}", self.bounds, bounds);
            self.bounds = bounds;
        }
    }

    /// Advance every particle one frame. Returns how many wrapped.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        self.frame += 1;
        let bounds = self.bounds;
        let mut wrapped = 0;
        for particle in self.particles.iter_mut() {
            if particle.step(bounds, rng) {
                wrapped += 1;
            }
        }
        wrapped
    }

    /// Clear the surface and draw every particle. Returns how many were drawn.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> usize {
        surface.clear();
        for particle in &self.particles {
            draw_particle(surface, particle, self.frame);
        }
        self.particles.len()
    }

    /// One animation tick: pick up the surface size, update, redraw
    pub fn frame<S, R>(&mut self, surface: &mut S, rng: &mut R) -> usize
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        self.resize(surface.size());
        self.update(rng);
        self.draw(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawList;
    use crate::settings::{Density, KindWeights};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field(seed: u64, w: f32, h: f32) -> (ParticleField, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let field = ParticleField::new(&Settings::default(), Vec2::new(w, h), &mut rng);
        (field, rng)
    }

    #[test]
    fn test_spawns_configured_count() {
        let (field, _) = field(1, 360.0, 640.0);
        assert_eq!(field.len(), 30);

        let mut rng = Pcg32::seed_from_u64(1);
        let sparse = ParticleField::new(
            &Settings {
                density: Density::Sparse,
                ..Settings::default()
            },
            Vec2::new(360.0, 640.0),
            &mut rng,
        );
        assert_eq!(sparse.len(), 20);
    }

    #[test]
    fn test_same_seed_same_field() {
        let (a, _) = field(42, 360.0, 640.0);
        let (b, _) = field(42, 360.0, 640.0);
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.kind, pb.kind);
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.size, pb.size);
        }
    }

    #[test]
    fn test_all_kinds_appear_with_default_weights() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut settings = Settings::default();
        settings.particle_count = Some(100);
        let field = ParticleField::new(&settings, Vec2::new(360.0, 640.0), &mut rng);
        for kind in ParticleKind::ALL {
            assert!(field.particles().iter().any(|p| p.kind == kind));
        }
    }

    #[test]
    fn test_single_kind_weights() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut settings = Settings::default();
        settings.kind_weights = KindWeights {
            heart: 0.0,
            petal: 0.0,
            sparkle: 1.0,
        };
        let field = ParticleField::new(&settings, Vec2::new(360.0, 640.0), &mut rng);
        assert!(field.particles().iter().all(|p| p.kind == ParticleKind::Sparkle));
    }

    #[test]
    fn test_draw_count_constant_across_frames() {
        let (mut field, mut rng) = field(3, 360.0, 640.0);
        let mut surface = DrawList::new(360.0, 640.0);
        for _ in 0..2000 {
            assert_eq!(field.frame(&mut surface, &mut rng), 30);
            assert_eq!(surface.shapes_in_last_frame(), 30);
        }
        assert_eq!(field.frame_count(), 2000);
    }

    #[test]
    fn test_particles_eventually_wrap() {
        let (mut field, mut rng) = field(11, 360.0, 200.0);
        let wraps: usize = (0..5000).map(|_| field.update(&mut rng)).sum();
        assert!(wraps > 0);
        assert_eq!(field.len(), 30);
    }

    #[test]
    fn test_resize_keeps_particles() {
        let (mut field, mut rng) = field(21, 360.0, 640.0);
        let mut surface = DrawList::new(360.0, 640.0);
        for _ in 0..10 {
            field.frame(&mut surface, &mut rng);
        }
        let before: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();

        field.resize(Vec2::new(1024.0, 768.0));
        assert_eq!(field.bounds(), Vec2::new(1024.0, 768.0));
        assert_eq!(field.len(), 30);
        let after: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_frame_picks_up_surface_resize() {
        let (mut field, mut rng) = field(24, 360.0, 640.0);
        let mut surface = DrawList::new(360.0, 640.0);
        field.frame(&mut surface, &mut rng);

        surface.resize(120.0, 80.0);
        assert_eq!(field.frame(&mut surface, &mut rng), 30);
        assert_eq!(field.bounds(), Vec2::new(120.0, 80.0));
        assert_eq!(surface.shapes_in_last_frame(), 30);

        for _ in 0..20_000 {
            field.frame(&mut surface, &mut rng);
        }
        assert_eq!(field.len(), 30);
        for p in field.particles() {
            assert!(p.pos.y <= 80.0 + p.size);
            assert!(p.pos.x <= 120.0);
        }
    }

    #[test]
    fn test_resize_changes_wrap_boundary() {
        let (mut field, mut rng) = field(22, 360.0, 640.0);
        field.resize(Vec2::new(100.0, 50.0));
        for _ in 0..20_000 {
            field.update(&mut rng);
        }
        for p in field.particles() {
            assert!(p.pos.y <= 50.0 + p.size);
            assert!(p.pos.x <= 100.0);
        }
    }

    #[test]
    fn test_zero_sized_surface_does_not_panic() {
        let (mut field, mut rng) = field(23, 0.0, 0.0);
        let mut surface = DrawList::new(0.0, 0.0);
        for _ in 0..100 {
            field.frame(&mut surface, &mut rng);
        }
        assert_eq!(field.len(), 30);
    }

    proptest! {
        #[test]
        fn prop_wraparound_keeps_particles_in_band(
            seed in any::<u64>(),
            w in 1.0f32..2000.0,
            h in 1.0f32..2000.0,
            ticks in 0usize..3000,
        ) {
            let (mut field, mut rng) = field(seed, w, h);
            for _ in 0..ticks {
                field.update(&mut rng);
            }
            for p in field.particles() {
                prop_assert!(p.pos.y >= -p.size);
                prop_assert!(p.pos.y <= h + p.size);
            }
        }
    }
}
