// Core engine exports
pub mod filters;
pub mod matcher;
pub mod presenter;
pub mod questionnaire;
pub mod scoring;

pub use filters::is_vetoed;
pub use matcher::{MatchError, MatchResult, Matcher, DEFAULT_RESULT_LIMIT};
pub use presenter::{MatchTier, PresentedMatch, Presenter, SUPER_MATCH_THRESHOLD};
pub use questionnaire::{
    AnswerCollector, Question, QuestionOption, Questionnaire, QuestionnaireError, Step,
};
pub use scoring::{score_candidate, BASE_SCORE};
