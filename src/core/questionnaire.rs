use crate::core::matcher::MatchError;
use crate::models::{
    ActivityLevel, AdopterProfile, AloneTime, AnswerMap, Experience, ExistingPets, Household,
    Living, Vibe,
};
use serde::Serialize;
use thiserror::Error;

/// A single selectable answer within a question
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuestionOption {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// One questionnaire question with its fixed set of mutually exclusive options
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: &'static [QuestionOption],
}

impl Question {
    pub fn option(&self, option_id: &str) -> Option<&'static QuestionOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

static STANDARD_QUESTIONS: &[Question] = &[
    Question {
        id: "living",
        prompt: "Where will your new companion live?",
        options: &[
            QuestionOption {
                id: "apartment",
                label: "Apartment",
                description: "A flat without private outdoor space",
            },
            QuestionOption {
                id: "house_small_yard",
                label: "House with small yard",
                description: "Some outdoor space, but not much room to roam",
            },
            QuestionOption {
                id: "house_garden",
                label: "House with large garden",
                description: "Plenty of fenced outdoor space",
            },
        ],
    },
    Question {
        id: "household",
        prompt: "Who lives in your household?",
        options: &[
            QuestionOption {
                id: "adults",
                label: "Adults only",
                description: "No children at home",
            },
            QuestionOption {
                id: "kids_school",
                label: "School-age children",
                description: "Children six and older",
            },
            QuestionOption {
                id: "kids_small",
                label: "Small children",
                description: "Children under school age",
            },
        ],
    },
    Question {
        id: "pets",
        prompt: "Do other pets already live with you?",
        options: &[
            QuestionOption {
                id: "none",
                label: "No other pets",
                description: "The newcomer would be the only animal",
            },
            QuestionOption {
                id: "dog",
                label: "A dog",
                description: "One or more dogs at home",
            },
            QuestionOption {
                id: "cat",
                label: "A cat",
                description: "One or more cats at home",
            },
        ],
    },
    Question {
        id: "energy",
        prompt: "How active is your day-to-day life?",
        options: &[
            QuestionOption {
                id: "low",
                label: "Relaxed",
                description: "Short walks and quiet evenings",
            },
            QuestionOption {
                id: "medium",
                label: "Moderately active",
                description: "Daily walks, weekend outings",
            },
            QuestionOption {
                id: "high",
                label: "Very active",
                description: "Running, hiking, long days outdoors",
            },
        ],
    },
    Question {
        id: "experience",
        prompt: "Have you kept a pet before?",
        options: &[
            QuestionOption {
                id: "beginner",
                label: "This would be my first",
                description: "No prior experience with pets of my own",
            },
            QuestionOption {
                id: "experienced",
                label: "I've had pets before",
                description: "Comfortable with training and care routines",
            },
        ],
    },
    Question {
        id: "alone",
        prompt: "How long would the animal be alone on a typical day?",
        options: &[
            QuestionOption {
                id: "short",
                label: "Rarely alone",
                description: "Under four hours",
            },
            QuestionOption {
                id: "work",
                label: "A work day",
                description: "Four to eight hours",
            },
            QuestionOption {
                id: "long",
                label: "Most of the day",
                description: "More than eight hours",
            },
        ],
    },
    Question {
        id: "vibe",
        prompt: "What are you hoping for in a companion?",
        options: &[
            QuestionOption {
                id: "cuddle",
                label: "A cuddly friend",
                description: "Affectionate and people-oriented",
            },
            QuestionOption {
                id: "guard",
                label: "A watchful guardian",
                description: "Alert and protective of home and family",
            },
            QuestionOption {
                id: "adventure",
                label: "An adventure buddy",
                description: "Up for anything, anywhere",
            },
        ],
    },
];

/// The static, ordered questionnaire definition.
///
/// Defined at process start and never mutated; cheap to copy around.
#[derive(Debug, Clone, Copy)]
pub struct Questionnaire {
    questions: &'static [Question],
}

impl Questionnaire {
    /// The standard PawMatch adopter questionnaire
    pub fn standard() -> Self {
        Self {
            questions: STANDARD_QUESTIONS,
        }
    }

    pub fn questions(&self) -> &'static [Question] {
        self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, index: usize) -> Option<&'static Question> {
        self.questions.get(index)
    }

    /// Validate a completed answer map and parse it into typed form.
    ///
    /// This is the engine's precondition check: a map with missing entries,
    /// unknown question ids, or unknown option ids is rejected outright.
    /// Veto and scoring rules are never run against a partial map.
    pub fn parse_profile(&self, answers: &AnswerMap) -> Result<AdopterProfile, MatchError> {
        let mut unknown: Vec<&str> = answers
            .iter()
            .filter(|(question, _)| !self.questions.iter().any(|q| q.id == *question))
            .map(|(question, _)| question)
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            return Err(MatchError::UnknownQuestion(unknown[0].to_string()));
        }

        let missing: Vec<String> = self
            .questions
            .iter()
            .filter(|q| answers.get(q.id).is_none())
            .map(|q| q.id.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(MatchError::IncompleteAnswers { missing });
        }

        let living = match self.selected(answers, "living")? {
            "apartment" => Living::Apartment,
            "house_small_yard" => Living::HouseSmallYard,
            "house_garden" => Living::HouseGarden,
            other => return Err(unknown_option("living", other)),
        };
        let household = match self.selected(answers, "household")? {
            "adults" => Household::AdultsOnly,
            "kids_school" => Household::KidsSchoolAge,
            "kids_small" => Household::KidsSmall,
            other => return Err(unknown_option("household", other)),
        };
        let pets = match self.selected(answers, "pets")? {
            "none" => ExistingPets::None,
            "dog" => ExistingPets::Dog,
            "cat" => ExistingPets::Cat,
            other => return Err(unknown_option("pets", other)),
        };
        let energy = match self.selected(answers, "energy")? {
            "low" => ActivityLevel::Low,
            "medium" => ActivityLevel::Medium,
            "high" => ActivityLevel::High,
            other => return Err(unknown_option("energy", other)),
        };
        let experience = match self.selected(answers, "experience")? {
            "beginner" => Experience::Beginner,
            "experienced" => Experience::Experienced,
            other => return Err(unknown_option("experience", other)),
        };
        let alone = match self.selected(answers, "alone")? {
            "short" => AloneTime::Short,
            "work" => AloneTime::Work,
            "long" => AloneTime::Long,
            other => return Err(unknown_option("alone", other)),
        };
        let vibe = match self.selected(answers, "vibe")? {
            "cuddle" => Vibe::Cuddle,
            "guard" => Vibe::Guard,
            "adventure" => Vibe::Adventure,
            other => return Err(unknown_option("vibe", other)),
        };

        Ok(AdopterProfile {
            living,
            household,
            pets,
            energy,
            experience,
            alone,
            vibe,
        })
    }

    fn selected<'a>(
        &self,
        answers: &'a AnswerMap,
        question_id: &str,
    ) -> Result<&'a str, MatchError> {
        answers
            .get(question_id)
            .ok_or_else(|| MatchError::IncompleteAnswers {
                missing: vec![question_id.to_string()],
            })
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::standard()
    }
}

fn unknown_option(question: &str, option: &str) -> MatchError {
    MatchError::UnknownOption {
        question: question.to_string(),
        option: option.to_string(),
    }
}

/// Errors from driving the answer collector
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestionnaireError {
    #[error("question index {index} out of range (questionnaire has {count} questions)")]
    QuestionOutOfRange { index: usize, count: usize },

    #[error("option '{option}' is not valid for question '{question}'")]
    UnknownOption { question: String, option: String },
}

/// Where the collector currently points within the questionnaire walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Before the first question; also reached by backing out of question 0
    Intro,
    Question(usize),
    /// Past the last question
    Summary,
}

/// Finite-state walk through the questionnaire for one adopter session.
///
/// Each session owns its own collector instance; there is no shared quiz
/// state. Answers persist across backward navigation, and re-answering a
/// previously visited question overwrites its entry.
#[derive(Debug, Clone)]
pub struct AnswerCollector {
    questionnaire: Questionnaire,
    answers: AnswerMap,
    step: Step,
}

impl AnswerCollector {
    pub fn new(questionnaire: Questionnaire) -> Self {
        Self {
            questionnaire,
            answers: AnswerMap::new(),
            step: Step::Intro,
        }
    }

    pub fn questionnaire(&self) -> Questionnaire {
        self.questionnaire
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Leave the intro screen; no-op once the walk has started
    pub fn start(&mut self) {
        if self.step == Step::Intro {
            self.step = Step::Question(0);
        }
    }

    /// Record an answer and advance to the next sequential question.
    ///
    /// Advancing past the last question lands on the summary step.
    pub fn select_option(
        &mut self,
        question_index: usize,
        option_id: &str,
    ) -> Result<(), QuestionnaireError> {
        let question = self.questionnaire.question(question_index).ok_or(
            QuestionnaireError::QuestionOutOfRange {
                index: question_index,
                count: self.questionnaire.len(),
            },
        )?;

        if question.option(option_id).is_none() {
            return Err(QuestionnaireError::UnknownOption {
                question: question.id.to_string(),
                option: option_id.to_string(),
            });
        }

        self.answers.record(question.id, option_id);
        self.step = if question_index + 1 >= self.questionnaire.len() {
            Step::Summary
        } else {
            Step::Question(question_index + 1)
        };
        Ok(())
    }

    /// Step back one question without discarding any recorded answer.
    ///
    /// Backing out of question 0 lands on the intro step rather than erroring.
    pub fn go_back(&mut self) {
        self.step = match self.step {
            Step::Intro | Step::Question(0) => Step::Intro,
            Step::Question(i) => Step::Question(i - 1),
            Step::Summary => Step::Question(self.questionnaire.len().saturating_sub(1)),
        };
    }

    /// Discard all answers and return to the intro step
    pub fn reset(&mut self) {
        self.answers.clear();
        self.step = Step::Intro;
    }

    /// True once every question has a recorded answer
    pub fn is_complete(&self) -> bool {
        self.questionnaire
            .questions()
            .iter()
            .all(|q| self.answers.get(q.id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector() -> AnswerCollector {
        AnswerCollector::new(Questionnaire::standard())
    }

    fn answer_all(collector: &mut AnswerCollector) {
        let picks = [
            (0, "apartment"),
            (1, "adults"),
            (2, "none"),
            (3, "low"),
            (4, "beginner"),
            (5, "short"),
            (6, "cuddle"),
        ];
        for (index, option) in picks {
            collector.select_option(index, option).unwrap();
        }
    }

    #[test]
    fn test_standard_questionnaire_shape() {
        let questionnaire = Questionnaire::standard();
        assert_eq!(questionnaire.len(), 7);
        for question in questionnaire.questions() {
            assert!(
                (2..=3).contains(&question.options.len()),
                "question '{}' must have 2-3 options",
                question.id
            );
        }
    }

    #[test]
    fn test_auto_advance_after_selection() {
        let mut c = collector();
        c.start();
        c.select_option(0, "apartment").unwrap();
        assert_eq!(c.step(), Step::Question(1));
    }

    #[test]
    fn test_last_answer_reaches_summary() {
        let mut c = collector();
        c.start();
        answer_all(&mut c);
        assert_eq!(c.step(), Step::Summary);
        assert!(c.is_complete());
    }

    #[test]
    fn test_go_back_preserves_answers() {
        let mut c = collector();
        c.start();
        c.select_option(0, "apartment").unwrap();
        c.go_back();

        assert_eq!(c.step(), Step::Question(0));
        assert_eq!(c.answers().get("living"), Some("apartment"));
    }

    #[test]
    fn test_go_back_from_first_question_lands_on_intro() {
        let mut c = collector();
        c.start();
        c.go_back();
        assert_eq!(c.step(), Step::Intro);

        // And again from intro stays on intro
        c.go_back();
        assert_eq!(c.step(), Step::Intro);
    }

    #[test]
    fn test_reanswer_overwrites() {
        let mut c = collector();
        c.start();
        c.select_option(0, "apartment").unwrap();
        c.go_back();
        c.select_option(0, "house_garden").unwrap();

        assert_eq!(c.answers().get("living"), Some("house_garden"));
        assert_eq!(c.answers().len(), 1);
    }

    #[test]
    fn test_select_rejects_bad_index_and_option() {
        let mut c = collector();
        c.start();

        assert_eq!(
            c.select_option(99, "apartment"),
            Err(QuestionnaireError::QuestionOutOfRange { index: 99, count: 7 })
        );
        assert!(matches!(
            c.select_option(0, "houseboat"),
            Err(QuestionnaireError::UnknownOption { .. })
        ));
        assert!(c.answers().is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut c = collector();
        c.start();
        answer_all(&mut c);
        c.reset();

        assert_eq!(c.step(), Step::Intro);
        assert!(c.answers().is_empty());
        assert!(!c.is_complete());
    }

    #[test]
    fn test_parse_profile_complete() {
        let mut c = collector();
        c.start();
        answer_all(&mut c);

        let profile = Questionnaire::standard()
            .parse_profile(c.answers())
            .unwrap();
        assert_eq!(profile.living, Living::Apartment);
        assert_eq!(profile.household, Household::AdultsOnly);
        assert_eq!(profile.vibe, Vibe::Cuddle);
    }

    #[test]
    fn test_parse_profile_incomplete() {
        let mut answers = AnswerMap::new();
        answers.record("living", "apartment");

        let err = Questionnaire::standard()
            .parse_profile(&answers)
            .unwrap_err();
        match err {
            MatchError::IncompleteAnswers { missing } => {
                assert_eq!(missing.len(), 6);
                assert!(!missing.contains(&"living".to_string()));
            }
            other => panic!("expected IncompleteAnswers, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_profile_unknown_question() {
        let mut c = collector();
        c.start();
        answer_all(&mut c);
        let mut answers = c.answers().clone();
        answers.record("favorite_color", "blue");

        let err = Questionnaire::standard()
            .parse_profile(&answers)
            .unwrap_err();
        assert_eq!(err, MatchError::UnknownQuestion("favorite_color".to_string()));
    }

    #[test]
    fn test_parse_profile_unknown_option() {
        let mut c = collector();
        c.start();
        answer_all(&mut c);
        let mut answers = c.answers().clone();
        answers.record("living", "castle");

        let err = Questionnaire::standard()
            .parse_profile(&answers)
            .unwrap_err();
        assert_eq!(
            err,
            MatchError::UnknownOption {
                question: "living".to_string(),
                option: "castle".to_string(),
            }
        );
    }
}
