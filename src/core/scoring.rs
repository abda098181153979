use crate::models::{
    ActivityLevel, AdopterProfile, AloneTime, Candidate, Experience, ExistingPets, Living,
    SizeClass, Tolerance, Vibe,
};

/// Every non-vetoed candidate starts from this score
pub const BASE_SCORE: i32 = 10;

/// Candidates older than this get the mature-companion mention when they
/// cannot yet handle a full work day alone
const MATURE_AGE_YEARS: f32 = 2.0;

// Keyword sets for the vibe rules. Enumerated here, rather than sniffed out
// of free text ad hoc, so rule behavior stays auditable regardless of how
// shelters fill in tags and descriptions. Matching is case-insensitive.
const AFFECTION_KEYWORDS: &[&str] = &["cuddly", "affectionate", "gentle", "loves people"];
const GUARDIAN_KEYWORDS: &[&str] = &["protective", "watchful", "guard"];
const ADVENTURE_TAG: &str = "active";

/// Compute the additive score and justification trail for one candidate.
///
/// Only called for candidates that survived the veto stage. Every bonus
/// rule pushes exactly one justification string; penalty and neutral
/// adjustments change the score silently. Rule order never changes the
/// total, only the justification ordering, and is fixed so that
/// justification snapshots stay stable. The score is not clamped; negative
/// totals simply rank lower.
pub fn score_candidate(candidate: &Candidate, adopter: &AdopterProfile) -> (i32, Vec<String>) {
    let compat = &candidate.compatibility;
    let mut score = BASE_SCORE;
    let mut justifications = Vec::new();

    // Activity match: exact level is ideal, adjacent is workable, the
    // opposite extreme costs points
    let energy_gap = (compat.activity.rank() - adopter.energy.rank()).abs();
    match energy_gap {
        0 => {
            score += 5;
            justifications.push("ideal energy fit".to_string());
        }
        1 => score += 2,
        _ => score -= 2,
    }

    // Beginner fit
    if adopter.experience == Experience::Beginner && compat.is_suited_for("beginner-suitable") {
        score += 5;
        justifications.push("great first-pet choice".to_string());
    }

    // Vibe: the options are mutually exclusive, so at most one fires
    match adopter.vibe {
        Vibe::Cuddle => {
            if mentions_any(candidate, AFFECTION_KEYWORDS) {
                score += 3;
                justifications.push("the cuddler you're looking for".to_string());
            }
        }
        Vibe::Guard => {
            if mentions_any(candidate, GUARDIAN_KEYWORDS) {
                score += 3;
                justifications.push("your loyal guardian".to_string());
            }
        }
        Vibe::Adventure => {
            if compat.activity == ActivityLevel::High || candidate.has_tag(ADVENTURE_TAG) {
                score += 3;
                justifications.push("ready for every adventure".to_string());
            }
        }
    }

    // Housing bonus
    match (candidate.size, adopter.living) {
        (SizeClass::Large, Living::HouseGarden) => {
            score += 2;
            justifications.push("enjoys the space you offer".to_string());
        }
        (SizeClass::Small, Living::Apartment) => {
            score += 2;
            justifications.push("perfect apartment size".to_string());
        }
        (SizeClass::Medium, Living::HouseSmallYard) => {
            score += 1;
            justifications.push("fits your smaller yard".to_string());
        }
        _ => {}
    }

    // Children bonus
    if adopter.household.has_kids() && compat.kids == Tolerance::Suitable {
        score += 2;
        justifications.push("good with children".to_string());
    }

    // Resident pet bonuses
    if adopter.pets == ExistingPets::Dog && compat.dogs == Tolerance::Suitable {
        score += 2;
        justifications.push("will get along with your dog".to_string());
    }
    if adopter.pets == ExistingPets::Cat && compat.cats == Tolerance::Suitable {
        score += 2;
        justifications.push("tolerates cats too".to_string());
    }

    // Alone-time: a bonus for animals that genuinely tolerate a work day
    // alone, otherwise a reassuring mention for mature animals
    if adopter.alone == AloneTime::Work {
        if compat.tolerates_alone {
            score += 2;
            justifications.push("handles solitude while you work".to_string());
        } else if candidate.age > MATURE_AGE_YEARS {
            justifications.push("a mature companion who can wait for you".to_string());
        }
    }

    (score, justifications)
}

/// True when any tag equals, or the description contains, one of the keywords
fn mentions_any(candidate: &Candidate, keywords: &[&str]) -> bool {
    if candidate
        .tags
        .iter()
        .any(|tag| keywords.iter().any(|k| tag.eq_ignore_ascii_case(k)))
    {
        return true;
    }

    match &candidate.description {
        Some(description) => {
            let description = description.to_lowercase();
            keywords.iter().any(|k| description.contains(k))
        }
        None => false,
    }
}
