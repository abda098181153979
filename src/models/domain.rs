use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Size class of an adoptable animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

/// Three-valued tolerance scale used throughout the compatibility profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tolerance {
    Unsuitable,
    Cautious,
    Suitable,
}

/// Activity level, shared by candidates (required level) and adopters (offered level)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    Medium,
    High,
}

impl ActivityLevel {
    /// Position on the low..high scale, for adjacency comparisons
    pub fn rank(self) -> i8 {
        match self {
            ActivityLevel::Low => 0,
            ActivityLevel::Medium => 1,
            ActivityLevel::High => 2,
        }
    }
}

/// Behavioral compatibility data nested in every candidate record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityProfile {
    pub kids: Tolerance,
    pub dogs: Tolerance,
    pub cats: Tolerance,
    pub activity: ActivityLevel,
    #[serde(rename = "suitedFor", default)]
    pub suited_for: Vec<String>,
    #[serde(rename = "notSuitedFor", default)]
    pub not_suited_for: Vec<String>,
    #[serde(rename = "toleratesAlone", default)]
    pub tolerates_alone: bool,
}

impl CompatibilityProfile {
    /// Whether the suitability flag set carries the given audience label
    pub fn is_suited_for(&self, flag: &str) -> bool {
        self.suited_for.iter().any(|f| f.eq_ignore_ascii_case(flag))
    }

    /// Whether the unsuitability flag set carries the given audience label
    pub fn is_unsuited_for(&self, flag: &str) -> bool {
        self.not_suited_for.iter().any(|f| f.eq_ignore_ascii_case(flag))
    }
}

/// Adoptable animal record as supplied by the shelter backend.
///
/// Candidates are read-only to the matching engine; it never mutates one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "animalId")]
    pub id: String,
    pub name: String,
    pub species: String,
    pub size: SizeClass,
    /// Age in years; fractional for young animals
    pub age: f32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "listedAt", default)]
    pub listed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub compatibility: CompatibilityProfile,
}

impl Candidate {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Questionnaire answers: question id mapped to the selected option id.
///
/// At most one entry per question; re-answering a question overwrites its
/// entry. The map is complete once every question in the questionnaire has
/// an entry, and only complete maps are accepted by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerMap {
    #[serde(flatten)]
    entries: HashMap<String, String>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question_id: &str, option_id: &str) {
        self.entries
            .insert(question_id.to_string(), option_id.to_string());
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.entries.get(question_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(q, o)| (q.as_str(), o.as_str()))
    }
}

impl From<HashMap<String, String>> for AnswerMap {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

/// Living situation of the adopter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Living {
    Apartment,
    HouseSmallYard,
    HouseGarden,
}

/// Household composition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Household {
    AdultsOnly,
    KidsSchoolAge,
    KidsSmall,
}

impl Household {
    /// Both kids options; rules that key on "any children" use this
    pub fn has_kids(self) -> bool {
        matches!(self, Household::KidsSchoolAge | Household::KidsSmall)
    }
}

/// Pets already living in the household
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingPets {
    None,
    Dog,
    Cat,
}

/// Prior experience keeping pets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Experience {
    Beginner,
    Experienced,
}

/// Hours per day the animal would routinely spend alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AloneTime {
    /// Under 4 hours
    Short,
    /// A standard work day, 4-8 hours
    Work,
    /// Over 8 hours
    Long,
}

/// The kind of companion the adopter is hoping for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vibe {
    Cuddle,
    Guard,
    Adventure,
}

/// Typed view of a complete, validated answer map.
///
/// Produced by `Questionnaire::parse_profile`; every veto and scoring rule
/// reads from this rather than from raw option id strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdopterProfile {
    pub living: Living,
    pub household: Household,
    pub pets: ExistingPets,
    pub energy: ActivityLevel,
    pub experience: Experience,
    pub alone: AloneTime,
    pub vibe: Vibe,
}

/// A candidate with its computed score and justification trail.
///
/// Created fresh per engine run and discarded afterwards. Justifications
/// are in rule-evaluation order; a vetoed candidate is never scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: i32,
    pub justifications: Vec<String>,
    pub veto: bool,
}
