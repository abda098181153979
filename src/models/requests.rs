use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Request to find matches for a completed questionnaire.
///
/// Clients either reference a server-held session by id or, when they keep
/// quiz state themselves, send the answer map inline. Exactly one of the
/// two must be present; the handler rejects anything else.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[serde(alias = "session_id", rename = "sessionId", default)]
    pub session_id: Option<uuid::Uuid>,
    #[serde(default)]
    pub answers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub species: Option<String>,
    #[validate(range(min = 1, max = 20))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to record an answer in a questionnaire session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SelectOptionRequest {
    #[serde(alias = "question_index", rename = "questionIndex")]
    pub question_index: usize,
    #[validate(length(min = 1))]
    #[serde(alias = "option_id", rename = "optionId")]
    pub option_id: String,
}
