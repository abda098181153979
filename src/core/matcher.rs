use crate::core::filters::is_vetoed;
use crate::core::questionnaire::Questionnaire;
use crate::core::scoring::score_candidate;
use crate::models::{AdopterProfile, AnswerMap, Candidate, ScoredCandidate};
use thiserror::Error;

/// Default number of matches surfaced to the adopter
pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// Precondition failures of a matching run.
///
/// The engine is total over well-formed inputs: an empty pool or a pool
/// where every candidate is vetoed is a successful empty result, never an
/// error. Only a malformed answer map is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("answer map is incomplete; unanswered questions: {missing:?}")]
    IncompleteAnswers { missing: Vec<String> },

    #[error("answer map references unknown question '{0}'")]
    UnknownQuestion(String),

    #[error("option '{option}' is not valid for question '{question}'")]
    UnknownOption { question: String, option: String },
}

/// Result of one matching run
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredCandidate>,
    pub total_candidates: usize,
    pub vetoed_candidates: usize,
}

/// Matching orchestrator - runs the staged pipeline over a candidate pool
///
/// # Pipeline stages
/// 1. Answer map validation (fails fast on malformed input)
/// 2. Veto filter (hard exclusions, no scoring for vetoed candidates)
/// 3. Additive scoring with justification trail
/// 4. Stable descending sort and truncation
///
/// One invocation is a pure, synchronous computation over one answer map
/// and one pool snapshot; nothing is cached or mutated, so a single
/// `Matcher` is safe to share across concurrent sessions.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    questionnaire: Questionnaire,
    result_limit: usize,
}

impl Matcher {
    pub fn new(questionnaire: Questionnaire, result_limit: usize) -> Self {
        Self {
            questionnaire,
            result_limit,
        }
    }

    pub fn with_default_limit(questionnaire: Questionnaire) -> Self {
        Self::new(questionnaire, DEFAULT_RESULT_LIMIT)
    }

    pub fn questionnaire(&self) -> Questionnaire {
        self.questionnaire
    }

    /// Rank the pool for a completed answer map.
    ///
    /// # Arguments
    /// * `answers` - the adopter's completed questionnaire answers
    /// * `candidates` - the pool snapshot supplied by the data provider
    ///
    /// # Returns
    /// Ranked, truncated matches plus pool accounting. Ties on score keep
    /// their original pool order, so identical inputs always produce
    /// identical output ordering.
    pub fn compute_matches(
        &self,
        answers: &AnswerMap,
        candidates: Vec<Candidate>,
    ) -> Result<MatchResult, MatchError> {
        let adopter = self.questionnaire.parse_profile(answers)?;
        let total_candidates = candidates.len();

        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .map(|candidate| evaluate_candidate(candidate, &adopter))
            .collect();

        let vetoed_candidates = scored.iter().filter(|c| c.veto).count();
        scored.retain(|c| !c.veto);

        // Vec::sort_by is stable: equal scores keep pool order
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(self.result_limit);

        Ok(MatchResult {
            matches: scored,
            total_candidates,
            vetoed_candidates,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_limit(Questionnaire::standard())
    }
}

/// Veto check first; scoring runs only for survivors
fn evaluate_candidate(candidate: Candidate, adopter: &AdopterProfile) -> ScoredCandidate {
    if is_vetoed(&candidate, adopter) {
        return ScoredCandidate {
            candidate,
            score: 0,
            justifications: Vec::new(),
            veto: true,
        };
    }

    let (score, justifications) = score_candidate(&candidate, adopter);
    ScoredCandidate {
        candidate,
        score,
        justifications,
        veto: false,
    }
}
