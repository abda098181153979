use crate::models::{
    AdopterProfile, AloneTime, Candidate, Experience, ExistingPets, Household, Living, SizeClass,
    Tolerance,
};

/// Minimum age in years for animals placed with adopters away more than
/// eight hours a day
const LONG_ALONE_MIN_AGE: f32 = 1.0;

/// Hard-exclusion stage of the matching pipeline.
///
/// Decides whether a candidate is categorically unsuitable for this adopter
/// before any scoring is attempted. The predicates are independent and any
/// single hit vetoes the candidate; a vetoed candidate is never scored and
/// never surfaces in results. Pure per-candidate check, no inter-candidate
/// state.
#[inline]
pub fn is_vetoed(candidate: &Candidate, adopter: &AdopterProfile) -> bool {
    let compat = &candidate.compatibility;

    // Large animal in an apartment without explicit apartment clearance
    if adopter.living == Living::Apartment
        && candidate.size == SizeClass::Large
        && !compat.is_suited_for("apartment-suitable")
    {
        return true;
    }

    // Explicitly flagged as unsuited to apartment life, regardless of size
    if adopter.living == Living::Apartment && compat.is_unsuited_for("apartment") {
        return true;
    }

    // Any children at home rule out animals unsuitable around kids
    if adopter.household.has_kids() && compat.kids == Tolerance::Unsuitable {
        return true;
    }

    // Under-school-age children additionally rule out merely-cautious
    // animals; cautious tolerance is acceptable for school-age households
    if adopter.household == Household::KidsSmall && compat.kids == Tolerance::Cautious {
        return true;
    }

    // Resident cat or dog conflicts
    if adopter.pets == ExistingPets::Cat && compat.cats == Tolerance::Unsuitable {
        return true;
    }
    if adopter.pets == ExistingPets::Dog && compat.dogs == Tolerance::Unsuitable {
        return true;
    }

    // Young animals are presumed unsuited to long daily solitude
    if adopter.alone == AloneTime::Long && candidate.age < LONG_ALONE_MIN_AGE {
        return true;
    }

    // Expert-only animals never go to first-time keepers
    if adopter.experience == Experience::Beginner && compat.is_suited_for("expert-only") {
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, CompatibilityProfile, Vibe};

    fn candidate(size: SizeClass, age: f32) -> Candidate {
        Candidate {
            id: "test_animal".to_string(),
            name: "Test Animal".to_string(),
            species: "dog".to_string(),
            size,
            age,
            tags: vec![],
            description: None,
            listed_at: None,
            compatibility: CompatibilityProfile {
                kids: Tolerance::Suitable,
                dogs: Tolerance::Suitable,
                cats: Tolerance::Suitable,
                activity: ActivityLevel::Medium,
                suited_for: vec![],
                not_suited_for: vec![],
                tolerates_alone: true,
            },
        }
    }

    fn adopter() -> AdopterProfile {
        AdopterProfile {
            living: Living::HouseGarden,
            household: Household::AdultsOnly,
            pets: ExistingPets::None,
            energy: ActivityLevel::Medium,
            experience: Experience::Experienced,
            alone: AloneTime::Short,
            vibe: Vibe::Cuddle,
        }
    }

    #[test]
    fn test_compatible_candidate_passes() {
        assert!(!is_vetoed(&candidate(SizeClass::Medium, 3.0), &adopter()));
    }

    #[test]
    fn test_large_animal_vetoed_for_apartment() {
        let mut adopter = adopter();
        adopter.living = Living::Apartment;

        let large = candidate(SizeClass::Large, 3.0);
        assert!(is_vetoed(&large, &adopter));

        // The same animal with apartment clearance passes
        let mut cleared = candidate(SizeClass::Large, 3.0);
        cleared
            .compatibility
            .suited_for
            .push("apartment-suitable".to_string());
        assert!(!is_vetoed(&cleared, &adopter));
    }

    #[test]
    fn test_apartment_unsuitability_flag_vetoes_any_size() {
        let mut adopter = adopter();
        adopter.living = Living::Apartment;

        let mut small = candidate(SizeClass::Small, 3.0);
        small
            .compatibility
            .not_suited_for
            .push("apartment".to_string());
        assert!(is_vetoed(&small, &adopter));
    }

    #[test]
    fn test_kids_veto_unsuitable_tolerance() {
        let mut with_kids = adopter();
        with_kids.household = Household::KidsSchoolAge;

        let mut animal = candidate(SizeClass::Medium, 3.0);
        animal.compatibility.kids = Tolerance::Unsuitable;
        assert!(is_vetoed(&animal, &with_kids));

        // Cautious is acceptable for school-age households
        animal.compatibility.kids = Tolerance::Cautious;
        assert!(!is_vetoed(&animal, &with_kids));
    }

    #[test]
    fn test_small_kids_veto_cautious_tolerance() {
        let mut adopter = adopter();
        adopter.household = Household::KidsSmall;

        let mut animal = candidate(SizeClass::Medium, 3.0);
        animal.compatibility.kids = Tolerance::Cautious;
        assert!(is_vetoed(&animal, &adopter));
    }

    #[test]
    fn test_resident_pet_conflicts() {
        let mut with_cat = adopter();
        with_cat.pets = ExistingPets::Cat;
        let mut with_dog = adopter();
        with_dog.pets = ExistingPets::Dog;

        let mut hates_cats = candidate(SizeClass::Medium, 3.0);
        hates_cats.compatibility.cats = Tolerance::Unsuitable;
        assert!(is_vetoed(&hates_cats, &with_cat));
        assert!(!is_vetoed(&hates_cats, &with_dog));

        let mut hates_dogs = candidate(SizeClass::Medium, 3.0);
        hates_dogs.compatibility.dogs = Tolerance::Unsuitable;
        assert!(is_vetoed(&hates_dogs, &with_dog));
        assert!(!is_vetoed(&hates_dogs, &with_cat));
    }

    #[test]
    fn test_long_alone_time_vetoes_young_animals() {
        let mut adopter = adopter();
        adopter.alone = AloneTime::Long;

        assert!(is_vetoed(&candidate(SizeClass::Medium, 0.5), &adopter));
        assert!(!is_vetoed(&candidate(SizeClass::Medium, 1.0), &adopter));
    }

    #[test]
    fn test_expert_only_vetoed_for_beginners() {
        let mut beginner = adopter();
        beginner.experience = Experience::Beginner;

        let mut animal = candidate(SizeClass::Medium, 3.0);
        animal
            .compatibility
            .suited_for
            .push("expert-only".to_string());
        assert!(is_vetoed(&animal, &beginner));
        assert!(!is_vetoed(&animal, &adopter()));
    }
}
