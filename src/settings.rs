//! Card settings
//!
//! Read once at startup from an inline JSON block in the page. Nothing is
//! ever written back.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_PARTICLES, PARTICLE_COUNT};
use crate::evade::EvadeConfig;

/// Particle density presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Density {
    Sparse,
    #[default]
    Normal,
    Lush,
}

impl Density {
    /// Ambient particle count for this preset
    pub fn particle_count(&self) -> usize {
        match self {
            Density::Sparse => 20,
            Density::Normal => PARTICLE_COUNT,
            Density::Lush => 35,
        }
    }
}

/// Relative odds of each particle kind at spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindWeights {
    pub heart: f32,
    pub petal: f32,
    pub sparkle: f32,
}

impl Default for KindWeights {
    fn default() -> Self {
        Self {
            heart: 35.0,
            petal: 40.0,
            sparkle: 25.0,
        }
    }
}

impl KindWeights {
    /// Weights in `ParticleKind::ALL` order
    pub fn as_array(&self) -> [f32; 3] {
        [self.heart, self.petal, self.sparkle]
    }

    fn is_usable(&self) -> bool {
        let w = self.as_array();
        w.iter().all(|v| v.is_finite() && *v >= 0.0) && w.iter().sum::<f32>() > 0.0
    }
}

fn default_taunts() -> Vec<String> {
    [
        "Are you sure? 🤔",
        "Think it over! 😢",
        "Don't do this to me! 💔",
        "It's going to be amazing! 😤",
        "Try again! 😏",
        "That button doesn't work! 🚫",
        "Press the other one! ➡️",
        "Almost there! 😜",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Card settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Particle density preset
    pub density: Density,
    /// Explicit particle count (overrides `density`)
    pub particle_count: Option<usize>,
    /// Spawn odds per particle kind
    pub kind_weights: KindWeights,
    /// Decline button placement tunables
    pub evasion: EvadeConfig,
    /// Messages shown after each evasion, in order
    pub taunts: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            density: Density::Normal,
            particle_count: None,
            kind_weights: KindWeights::default(),
            evasion: EvadeConfig::default(),
            taunts: default_taunts(),
        }
    }
}

impl Settings {
    /// Effective particle count, capped at `MAX_PARTICLES`
    pub fn particle_count(&self) -> usize {
        self.particle_count
            .unwrap_or_else(|| self.density.particle_count())
            .min(MAX_PARTICLES)
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Replace values that would break the card with defaults
    pub fn sanitized(mut self) -> Self {
        if !self.kind_weights.is_usable() {
            log::warn!("Unusable particle weights {:?}, using defaults", self.kind_weights);
            self.kind_weights = KindWeights::default();
        }
        if self.taunts.is_empty() {
            self.taunts = default_taunts();
        }
        self.evasion = self.evasion.sanitized();
        self
    }

    /// DOM id of the inline config block
    #[cfg(target_arch = "wasm32")]
    const CONFIG_ELEMENT_ID: &'static str = "card-config";

    /// Load settings from the page's inline config block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = text {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded card settings from #{}", Self::CONFIG_ELEMENT_ID);
                    return settings;
                }
                Err(e) => log::warn!("Ignoring invalid card settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_count_override_and_cap() {
        let mut settings = Settings {
            density: Density::Lush,
            ..Settings::default()
        };
        assert_eq!(settings.particle_count(), 35);

        settings.particle_count = Some(12);
        assert_eq!(settings.particle_count(), 12);

        settings.particle_count = Some(10_000);
        assert_eq!(settings.particle_count(), MAX_PARTICLES);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "density": "Sparse" }"#).unwrap();
        assert_eq!(settings.density, Density::Sparse);
        assert_eq!(settings.taunts.len(), 8);
        assert_eq!(settings.evasion, EvadeConfig::default());
    }

    #[test]
    fn test_zero_weights_are_replaced() {
        let json = r#"{ "kind_weights": { "heart": 0, "petal": 0, "sparkle": 0 } }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.kind_weights, KindWeights::default());
    }

    #[test]
    fn test_empty_taunts_are_replaced() {
        let settings = Settings::from_json(r#"{ "taunts": [] }"#).unwrap();
        assert_eq!(settings.taunts.len(), 8);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ density: ").is_err());
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut settings = Settings::default();
        settings.taunts = vec!["one".into(), "two".into()];
        let json = serde_json::to_string(&settings).unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(back.taunts, settings.taunts);
        assert_eq!(back.density, settings.density);
    }
}
