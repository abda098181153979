// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ActivityLevel, AdopterProfile, AloneTime, AnswerMap, Candidate, CompatibilityProfile,
    Experience, ExistingPets, Household, Living, ScoredCandidate, SizeClass, Tolerance, Vibe,
};
pub use requests::{FindMatchesRequest, SelectOptionRequest};
pub use responses::{
    ErrorResponse, FindMatchesResponse, HealthResponse, QuestionnaireResponse,
    SessionStateResponse,
};
