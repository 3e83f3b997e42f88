//! Card stages

use serde::{Deserialize, Serialize};

/// Which part of the card is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stage {
    /// Invitation card with a continue button
    #[default]
    Hero,
    /// The question, with the runaway decline button
    Question,
    /// Finale
    Celebration,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Hero, Stage::Question, Stage::Celebration];

    /// Following stage; the celebration is final
    pub fn next(&self) -> Stage {
        match self {
            Stage::Hero => Stage::Question,
            Stage::Question | Stage::Celebration => Stage::Celebration,
        }
    }

    /// DOM id of the section holding this stage
    pub fn section_id(&self) -> &'static str {
        match self {
            Stage::Hero => "stage-hero",
            Stage::Question => "stage-question",
            Stage::Celebration => "stage-celebration",
        }
    }
}
