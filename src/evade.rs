//! Decline button that runs away from the pointer
//!
//! Every hover or touch on the button samples random on-screen spots,
//! throws away those that crowd the other elements of the question card, and
//! jumps to the surviving spot farthest from where the button was. The
//! button also shrinks a little each time and a taunt advances.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{EDGE_PADDING, MAX_ATTEMPTS, MIN_SCALE, SAFE_MARGIN, SCALE_STEP};
use crate::geometry::{Element, GeometryProvider, Rect};
use crate::sample;

/// Placement tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvadeConfig {
    /// Clearance around every avoided element (px)
    pub safe_margin: f32,
    /// Clearance from the viewport edges (px)
    pub edge_padding: f32,
    /// Random samples per evasion
    pub max_attempts: u32,
    /// Scale lost per evasion
    pub scale_step: f32,
    /// Scale floor
    pub min_scale: f32,
}

impl Default for EvadeConfig {
    fn default() -> Self {
        Self {
            safe_margin: SAFE_MARGIN,
            edge_padding: EDGE_PADDING,
            max_attempts: MAX_ATTEMPTS,
            scale_step: SCALE_STEP,
            min_scale: MIN_SCALE,
        }
    }
}

impl EvadeConfig {
    /// Clamp values into ranges the algorithm can work with
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let non_negative = |v: f32, fallback: f32| {
            if v.is_finite() { v.max(0.0) } else { fallback }
        };
        Self {
            safe_margin: non_negative(self.safe_margin, d.safe_margin),
            edge_padding: non_negative(self.edge_padding, d.edge_padding),
            max_attempts: self.max_attempts.max(1),
            scale_step: non_negative(self.scale_step, d.scale_step),
            min_scale: if self.min_scale.is_finite() {
                self.min_scale.clamp(0.1, 1.0)
            } else {
                d.min_scale
            },
        }
    }
}

/// Result of one [`EvasiveButton::evade`] call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvadeOutcome {
    /// The button jumped; `candidate` is where it now sits on screen
    Moved { candidate: Rect, offset: Vec2 },
    /// No clear spot was found; the offset is unchanged
    Stayed,
    /// The button itself could not be measured; nothing changed
    Skipped,
}

/// Live state of the decline button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvasiveButton {
    /// Displacement from the natural layout position
    pub offset: Vec2,
    pub scale: f32,
    /// Successful evasion triggers so far
    pub evasions: u32,
    /// Set after the first evasion; the button then floats above the layout
    pub escaped: bool,
}

impl Default for EvasiveButton {
    fn default() -> Self {
        Self::new()
    }
}

impl EvasiveButton {
    pub fn new() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            evasions: 0,
            escaped: false,
        }
    }

    /// Run one evasion against the current layout
    pub fn evade<G, R>(&mut self, layout: &G, config: &EvadeConfig, rng: &mut R) -> EvadeOutcome
    where
        G: GeometryProvider + ?Sized,
        R: Rng + ?Sized,
    {
        let Some(button) = layout.rect(Element::DeclineButton) else {
            log::debug!("Decline button not mounted, skipping evasion");
            return EvadeOutcome::Skipped;
        };

        let avoid: Vec<Rect> = Element::AVOID
            .iter()
            .filter_map(|el| layout.rect(*el))
            .map(|r| r.inflate(config.safe_margin))
            .collect();

        let outcome = match find_spot(button, layout.viewport(), &avoid, config, rng) {
            Some(candidate) => {
                // Relative to where the button is now, so offsets accumulate
                self.offset += candidate.center() - button.center();
                EvadeOutcome::Moved {
                    candidate,
                    offset: self.offset,
                }
            }
            None => EvadeOutcome::Stayed,
        };

        self.escaped = true;
        self.scale = (self.scale - config.scale_step).max(config.min_scale);
        self.evasions += 1;

        log::debug!("Evasion #{}: {:?} (scale {:.2})", self.evasions, outcome, self.scale);
        outcome
    }

    /// Index of the taunt to show for a list of `len` taunts
    pub fn message_index(&self, len: usize) -> Option<usize> {
        if self.evasions == 0 || len == 0 {
            return None;
        }
        Some((self.evasions as usize - 1).min(len - 1))
    }

    /// Taunt to show, holding on the last one once the list runs out
    pub fn message<'a, S: AsRef<str>>(&self, taunts: &'a [S]) -> Option<&'a str> {
        self.message_index(taunts.len()).map(|i| taunts[i].as_ref())
    }

    /// CSS transform placing the button at its offset and scale
    pub fn css_transform(&self) -> String {
        format!(
            "translate({:.1}px, {:.1}px) scale({:.3})",
            self.offset.x, self.offset.y, self.scale
        )
    }
}

/// Sample placements for `button` and return the accepted one farthest from it.
///
/// `avoid` holds already inflated rectangles. An axis too short for the
/// padded button pins candidates to the middle of that axis, so a narrow but
/// tall viewport still gets vertical jumps. Returns `None` when every sample
/// was rejected.
pub fn find_spot<R: Rng + ?Sized>(
    button: Rect,
    viewport: Vec2,
    avoid: &[Rect],
    config: &EvadeConfig,
    rng: &mut R,
) -> Option<Rect> {
    let pad = config.edge_padding;
    let span = viewport - button.size() - Vec2::splat(pad * 2.0);
    let range = |span: f32, extent: f32, size: f32| {
        if span >= 0.0 {
            (pad, pad + span)
        } else {
            let mid = (extent - size) / 2.0;
            (mid, mid)
        }
    };
    let (x_lo, x_hi) = range(span.x, viewport.x, button.width);
    let (y_lo, y_hi) = range(span.y, viewport.y, button.height);

    let origin = button.center();
    let mut best: Option<(f32, Rect)> = None;

    for _ in 0..config.max_attempts {
        let candidate = Rect::new(
            sample(rng, x_lo, x_hi),
            sample(rng, y_lo, y_hi),
            button.width,
            button.height,
        );

        if avoid.iter().any(|r| candidate.intersects(r)) {
            continue;
        }

        let dist = candidate.center().distance(origin);
        if best.is_none_or(|(d, _)| dist > d) {
            best = Some((dist, candidate));
        }
    }

    best.map(|(_, rect)| rect)
}
