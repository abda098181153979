use crate::models::ScoredCandidate;
use serde::{Deserialize, Serialize};

/// Scores strictly above this threshold earn the super-match label
pub const SUPER_MATCH_THRESHOLD: i32 = 15;

/// Shown when a match carries no rule justification of its own; the UI
/// never renders an empty reason list
const FALLBACK_REASON: &str = "a promising match for your answers";

/// Presentation-only classification derived from the numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTier {
    #[serde(rename = "super match")]
    SuperMatch,
    #[serde(rename = "match")]
    Match,
}

/// Display-ready shape of one ranked match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentedMatch {
    #[serde(rename = "animalId")]
    pub animal_id: String,
    pub name: String,
    pub species: String,
    pub tier: MatchTier,
    pub score: i32,
    pub reasons: Vec<String>,
}

/// Maps ranked engine output into the display shape.
///
/// Pure presentation: the threshold labels, it never filters, and
/// justification lists pass through unmodified apart from the empty-list
/// fallback.
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    super_match_threshold: i32,
}

impl Presenter {
    pub fn new(super_match_threshold: i32) -> Self {
        Self {
            super_match_threshold,
        }
    }

    pub fn present(&self, ranked: &[ScoredCandidate]) -> Vec<PresentedMatch> {
        ranked.iter().map(|scored| self.present_one(scored)).collect()
    }

    fn present_one(&self, scored: &ScoredCandidate) -> PresentedMatch {
        let tier = if scored.score > self.super_match_threshold {
            MatchTier::SuperMatch
        } else {
            MatchTier::Match
        };

        let reasons = if scored.justifications.is_empty() {
            vec![FALLBACK_REASON.to_string()]
        } else {
            scored.justifications.clone()
        };

        PresentedMatch {
            animal_id: scored.candidate.id.clone(),
            name: scored.candidate.name.clone(),
            species: scored.candidate.species.clone(),
            tier,
            score: scored.score,
            reasons,
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new(SUPER_MATCH_THRESHOLD)
    }
}
