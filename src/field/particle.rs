//! Particle kinds and per-kind spawn ranges

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::ops::Range;

use crate::render::Color;
use crate::sample;

/// Particle shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    Heart,
    Petal,
    Sparkle,
}

/// Attribute ranges a kind samples from at spawn
struct SpawnRanges {
    size: Range<f32>,
    speed: Range<f32>,
    opacity: Range<f32>,
    swing: Range<f32>,
    swing_frequency: Range<f32>,
    rotation_speed: Range<f32>,
    twinkle_rate: Range<f32>,
}

const HEART_PALETTE: [Color; 3] = [
    Color::rgb(0xfda4af),
    Color::rgb(0xfb7185),
    Color::rgb(0xfecdd3),
];

const PETAL_PALETTE: [Color; 3] = [
    Color::rgb(0xf43f5e),
    Color::rgb(0xfda4af),
    Color::rgb(0xffe4e6),
];

const SPARKLE_PALETTE: [Color; 3] = [
    Color::rgb(0xfff1f2),
    Color::rgb(0xd4a574),
    Color::rgb(0xfde68a),
];

impl ParticleKind {
    pub const ALL: [ParticleKind; 3] = [
        ParticleKind::Heart,
        ParticleKind::Petal,
        ParticleKind::Sparkle,
    ];

    pub fn palette(&self) -> &'static [Color] {
        match self {
            ParticleKind::Heart => &HEART_PALETTE,
            ParticleKind::Petal => &PETAL_PALETTE,
            ParticleKind::Sparkle => &SPARKLE_PALETTE,
        }
    }

    /// Whether the shape spins as it drifts
    pub fn rotates(&self) -> bool {
        matches!(self, ParticleKind::Petal)
    }

    /// Whether the shape has a twinkle on top of its base opacity
    pub fn twinkles(&self) -> bool {
        matches!(self, ParticleKind::Sparkle)
    }

    // Hearts and petals are big and faint; sparkles are small, quick and bright.
    fn ranges(&self) -> SpawnRanges {
        match self {
            ParticleKind::Heart => SpawnRanges {
                size: 6.0..18.0,
                speed: 0.2..0.7,
                opacity: 0.1..0.4,
                swing: 10.0..40.0,
                swing_frequency: 0.005..0.025,
                rotation_speed: 0.0..0.0,
                twinkle_rate: 0.0..0.0,
            },
            ParticleKind::Petal => SpawnRanges {
                size: 8.0..16.0,
                speed: 0.3..0.8,
                opacity: 0.15..0.4,
                swing: 15.0..45.0,
                swing_frequency: 0.008..0.02,
                rotation_speed: -0.02..0.02,
                twinkle_rate: 0.0..0.0,
            },
            ParticleKind::Sparkle => SpawnRanges {
                size: 1.5..3.5,
                speed: 0.4..1.0,
                opacity: 0.5..0.9,
                swing: 5.0..15.0,
                swing_frequency: 0.01..0.03,
                rotation_speed: 0.0..0.0,
                twinkle_rate: 0.05..0.15,
            },
        }
    }
}

/// A single drifting shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub size: f32,
    /// Upward drift in pixels per frame
    pub speed: f32,
    pub opacity: f32,
    pub swing_amplitude: f32,
    pub swing_frequency: f32,
    pub swing_phase: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub twinkle_rate: f32,
    pub color: Color,
}

impl Particle {
    /// Sample a particle of `kind` anywhere on a surface of size `bounds`
    pub fn spawn<R: Rng + ?Sized>(kind: ParticleKind, bounds: Vec2, rng: &mut R) -> Self {
        let r = kind.ranges();
        let palette = kind.palette();
        let color = palette[rng.random_range(0..palette.len())];

        Self {
            kind,
            pos: Vec2::new(sample(rng, 0.0, bounds.x), sample(rng, 0.0, bounds.y)),
            size: sample(rng, r.size.start, r.size.end),
            speed: sample(rng, r.speed.start, r.speed.end),
            opacity: sample(rng, r.opacity.start, r.opacity.end),
            swing_amplitude: sample(rng, r.swing.start, r.swing.end),
            swing_frequency: sample(rng, r.swing_frequency.start, r.swing_frequency.end),
            swing_phase: sample(rng, 0.0, TAU),
            rotation: if kind.rotates() {
                sample(rng, 0.0, TAU)
            } else {
                0.0
            },
            rotation_speed: sample(rng, r.rotation_speed.start, r.rotation_speed.end),
            twinkle_rate: sample(rng, r.twinkle_rate.start, r.twinkle_rate.end),
            color,
        }
    }

    /// Horizontal sway at `frame`
    #[inline]
    pub fn swing_offset(&self, frame: u64) -> f32 {
        let phase = frame as f64 * self.swing_frequency as f64 + self.swing_phase as f64;
        self.swing_amplitude * phase.sin() as f32
    }

    /// Twinkle multiplier in [0, 1] at `frame` (always 1 for non-sparkles)
    #[inline]
    pub fn twinkle(&self, frame: u64) -> f32 {
        if self.kind.twinkles() {
            (((frame as f64 * self.twinkle_rate as f64).sin() as f32) + 1.0) / 2.0
        } else {
            1.0
        }
    }

    /// Advance one frame, wrapping to the bottom once fully above the top edge.
    ///
    /// Returns true when the particle wrapped.
    pub fn step<R: Rng + ?Sized>(&mut self, bounds: Vec2, rng: &mut R) -> bool {
        self.pos.y -= self.speed;
        if self.kind.rotates() {
            self.rotation += self.rotation_speed;
        }

        if self.pos.y + self.size < 0.0 {
            self.pos.y = bounds.y + self.size;
            self.pos.x = sample(rng, 0.0, bounds.x);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_within_kind_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let bounds = Vec2::new(360.0, 640.0);
        for kind in ParticleKind::ALL {
            for _ in 0..200 {
                let p = Particle::spawn(kind, bounds, &mut rng);
                let r = kind.ranges();
                assert!(p.size >= r.size.start && p.size <= r.size.end);
                assert!(p.speed > 0.0);
                assert!(p.opacity > 0.0 && p.opacity <= 1.0);
                assert!(p.pos.x >= 0.0 && p.pos.x <= bounds.x);
                assert!(p.pos.y >= 0.0 && p.pos.y <= bounds.y);
                assert!(kind.palette().contains(&p.color));
            }
        }
    }

    #[test]
    fn test_sparkles_smaller_and_brighter_than_hearts() {
        let heart = ParticleKind::Heart.ranges();
        let sparkle = ParticleKind::Sparkle.ranges();
        assert!(sparkle.size.end < heart.size.start);
        assert!(sparkle.opacity.start > heart.opacity.end);
    }

    #[test]
    fn test_step_moves_up_by_speed() {
        let mut rng = Pcg32::seed_from_u64(1);
        let bounds = Vec2::new(100.0, 100.0);
        let mut p = Particle::spawn(ParticleKind::Heart, bounds, &mut rng);
        p.pos = Vec2::new(50.0, 50.0);
        let wrapped = p.step(bounds, &mut rng);
        assert!(!wrapped);
        assert!((p.pos.y - (50.0 - p.speed)).abs() < 1e-5);
        assert_eq!(p.pos.x, 50.0);
    }

    #[test]
    fn test_step_wraps_below_bottom() {
        let mut rng = Pcg32::seed_from_u64(2);
        let bounds = Vec2::new(200.0, 300.0);
        let mut p = Particle::spawn(ParticleKind::Petal, bounds, &mut rng);
        p.pos.y = -p.size + 0.01;
        assert!(p.step(bounds, &mut rng));
        assert_eq!(p.pos.y, bounds.y + p.size);
        assert!(p.pos.x >= 0.0 && p.pos.x <= bounds.x);
    }

    #[test]
    fn test_only_petals_rotate() {
        let mut rng = Pcg32::seed_from_u64(3);
        let bounds = Vec2::new(100.0, 1000.0);
        let mut heart = Particle::spawn(ParticleKind::Heart, bounds, &mut rng);
        heart.rotation_speed = 0.5;
        heart.pos.y = 500.0;
        heart.step(bounds, &mut rng);
        assert_eq!(heart.rotation, 0.0);

        let mut petal = Particle::spawn(ParticleKind::Petal, bounds, &mut rng);
        petal.rotation_speed = 0.5;
        petal.pos.y = 500.0;
        let before = petal.rotation;
        petal.step(bounds, &mut rng);
        assert!((petal.rotation - before - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_twinkle_stays_in_unit_range() {
        let mut rng = Pcg32::seed_from_u64(4);
        let p = Particle::spawn(ParticleKind::Sparkle, Vec2::splat(100.0), &mut rng);
        for frame in 0..1000 {
            let t = p.twinkle(frame);
            assert!((0.0..=1.0).contains(&t));
        }
        let h = Particle::spawn(ParticleKind::Heart, Vec2::splat(100.0), &mut rng);
        assert_eq!(h.twinkle(123), 1.0);
    }

    #[test]
    fn test_sway_and_twinkle_keep_moving_after_days() {
        let mut rng = Pcg32::seed_from_u64(5);
        let p = Particle::spawn(ParticleKind::Sparkle, Vec2::splat(100.0), &mut rng);

        // Around 2^26 frames (two weeks at 60fps) f32 cannot tell these frames apart
        let late = 1u64 << 26;
        let swings: Vec<f32> = (late..late + 4).map(|f| p.swing_offset(f)).collect();
        let twinkles: Vec<f32> = (late..late + 4).map(|f| p.twinkle(f)).collect();
        assert!(swings.windows(2).any(|w| w[0] != w[1]));
        assert!(twinkles.windows(2).any(|w| w[0] != w[1]));
    }
}
