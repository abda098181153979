use crate::core::presenter::PresentedMatch;
use crate::core::questionnaire::Question;
use crate::models::domain::AnswerMap;
use serde::{Deserialize, Serialize};

/// Response for the find-matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<PresentedMatch>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "vetoedCandidates")]
    pub vetoed_candidates: usize,
}

/// The static questionnaire definition, for clients rendering prompts
#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireResponse {
    pub questions: Vec<Question>,
}

/// Current state of a server-held questionnaire session
#[derive(Debug, Clone, Serialize)]
pub struct SessionStateResponse {
    #[serde(rename = "sessionId")]
    pub session_id: uuid::Uuid,
    /// "intro", "question" or "summary"
    pub step: String,
    #[serde(rename = "questionIndex", skip_serializing_if = "Option::is_none")]
    pub question_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
    pub answers: AnswerMap,
    pub complete: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
