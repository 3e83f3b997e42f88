//! Shape routines for each particle kind

use glam::Vec2;

use super::particle::{Particle, ParticleKind};
use crate::consts::{PETAL_ASPECT, SPARKLE_RAY};
use crate::render::{PathCmd, Surface};

/// Heart outline centered on the origin, `size` pixels tall
pub fn heart_path(size: f32) -> [PathCmd; 6] {
    let half = size / 2.0;
    let top = -half;
    let notch = Vec2::new(0.0, top + size / 4.0);
    let tip = Vec2::new(0.0, top + size * 0.8);

    [
        PathCmd::MoveTo(notch),
        // Left lobe
        PathCmd::CubicTo(
            Vec2::new(0.0, top),
            Vec2::new(-half, top),
            Vec2::new(-half, top + size / 4.0),
        ),
        PathCmd::CubicTo(
            Vec2::new(-half, top + half),
            Vec2::new(0.0, top + size * 0.625),
            tip,
        ),
        // Right lobe
        PathCmd::CubicTo(
            Vec2::new(0.0, top + size * 0.625),
            Vec2::new(half, top + half),
            Vec2::new(half, top + size / 4.0),
        ),
        PathCmd::CubicTo(Vec2::new(half, top), Vec2::new(0.0, top), notch),
        PathCmd::Close,
    ]
}

/// Draw one particle at its swayed position for `frame`
pub fn draw_particle<S: Surface + ?Sized>(surface: &mut S, particle: &Particle, frame: u64) {
    let at = Vec2::new(particle.pos.x + particle.swing_offset(frame), particle.pos.y);
    let size = particle.size;

    surface.save();
    surface.translate(at);
    surface.set_alpha(particle.opacity * particle.twinkle(frame));
    surface.set_fill(particle.color);

    match particle.kind {
        ParticleKind::Heart => {
            surface.fill_path(&heart_path(size));
        }
        ParticleKind::Petal => {
            surface.rotate(particle.rotation);
            surface.fill_ellipse(Vec2::ZERO, Vec2::new(size * PETAL_ASPECT / 2.0, size / 2.0));
        }
        ParticleKind::Sparkle => {
            surface.fill_ellipse(Vec2::ZERO, Vec2::splat(size));
            let ray = size * SPARKLE_RAY;
            surface.set_stroke(particle.color, (size * 0.25).max(0.5));
            surface.stroke_line(Vec2::new(-ray, 0.0), Vec2::new(ray, 0.0));
            surface.stroke_line(Vec2::new(0.0, -ray), Vec2::new(0.0, ray));
        }
    }

    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Color, DrawCommand, DrawList};

    fn particle(kind: ParticleKind) -> Particle {
        Particle {
            kind,
            pos: Vec2::new(40.0, 60.0),
            size: 10.0,
            speed: 0.5,
            opacity: 0.5,
            swing_amplitude: 0.0,
            swing_frequency: 0.0,
            swing_phase: 0.0,
            rotation: 1.0,
            rotation_speed: 0.0,
            twinkle_rate: 0.1,
            color: Color::rgb(0xfda4af),
        }
    }

    #[test]
    fn test_heart_path_is_closed_and_symmetric() {
        let path = heart_path(20.0);
        assert!(matches!(path[0], PathCmd::MoveTo(_)));
        assert_eq!(path[5], PathCmd::Close);
        if let (PathCmd::CubicTo(_, _, l), PathCmd::CubicTo(_, _, r)) = (path[1], path[3]) {
            assert_eq!(l.x, -r.x);
            assert_eq!(l.y, r.y);
        } else {
            panic!("unexpected heart path layout");
        }
    }

    #[test]
    fn test_petal_is_rotated_elongated_ellipse() {
        let mut list = DrawList::new(100.0, 100.0);
        draw_particle(&mut list, &particle(ParticleKind::Petal), 0);

        let cmds = list.commands();
        assert!(cmds.contains(&DrawCommand::Rotate(1.0)));
        assert!(cmds.contains(&DrawCommand::Ellipse {
            center: Vec2::ZERO,
            radii: Vec2::new(2.0, 5.0),
        }));
    }

    #[test]
    fn test_sparkle_has_disc_and_cross() {
        let mut list = DrawList::new(100.0, 100.0);
        draw_particle(&mut list, &particle(ParticleKind::Sparkle), 0);

        let lines: Vec<_> = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.contains(&&DrawCommand::Line {
            from: Vec2::new(-25.0, 0.0),
            to: Vec2::new(25.0, 0.0),
        }));
        // sin(0) twinkle = 0.5, so alpha is half the base opacity
        assert!(list.commands().contains(&DrawCommand::Alpha(0.25)));
    }

    #[test]
    fn test_draw_translates_to_swayed_position() {
        let mut p = particle(ParticleKind::Heart);
        p.swing_amplitude = 10.0;
        p.swing_phase = std::f32::consts::FRAC_PI_2;
        let mut list = DrawList::new(100.0, 100.0);
        draw_particle(&mut list, &p, 0);

        assert_eq!(list.commands()[0], DrawCommand::Save);
        match list.commands()[1] {
            DrawCommand::Translate(at) => assert!(at.distance(Vec2::new(50.0, 60.0)) < 1e-4),
            ref other => panic!("expected translate, got {:?}", other),
        }
        assert_eq!(*list.commands().last().unwrap(), DrawCommand::Restore);
    }
}
