use crate::core::error::MatchError;
use crate::core::schema::{
    validate_ordinal, OrdinalTrait, QuestionTarget, SpaceRequirement, TraitName, TraitVector,
    ORDINAL_MIN, QUESTIONS,
};
use crate::models::NewAdopter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw answer to one assessment question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Scale(i64),
    Choice(String),
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Scale(n) => write!(f, "{}", n),
            Answer::Choice(s) => write!(f, "{:?}", s),
        }
    }
}

/// Answers keyed by question id (1..=15)
pub type AssessmentAnswers = BTreeMap<u8, Answer>;

/// Who took the assessment. Carried through to the profile unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdopterIdentity {
    pub name: String,
    pub contact_info: String,
    pub email: String,
}

/// Turn raw assessment answers into a validated adopter profile
///
/// Every required question must be answered. Scale answers must lie in
/// [1, 5] and categorical answers must be one of the size literals; nothing
/// is clamped or defaulted.
pub fn build_profile(
    identity: AdopterIdentity,
    answers: &AssessmentAnswers,
) -> Result<NewAdopter, MatchError> {
    if let Some(id) = answers.keys().find(|id| !QUESTIONS.iter().any(|q| q.id == **id)) {
        return Err(MatchError::out_of_range("question", id));
    }

    let mut ordinals = [ORDINAL_MIN; OrdinalTrait::COUNT];
    let mut space = None;
    let mut preferred_size = None;

    for question in QUESTIONS.iter() {
        let field = question.field_name();

        let answer = match answers.get(&question.id) {
            Some(answer) => answer,
            None if question.required => {
                return Err(MatchError::IncompleteAssessment {
                    question: question.id,
                    field,
                });
            }
            None => continue,
        };

        match question.target {
            QuestionTarget::Trait(TraitName::Ordinal(t)) => {
                ordinals[t.index()] = ordinal_answer(field, answer)?;
            }
            QuestionTarget::Trait(TraitName::SpaceRequirement) => {
                space = Some(categorical_answer(field, answer)?);
            }
            QuestionTarget::PreferredSize => {
                preferred_size = Some(categorical_answer(field, answer)?);
            }
        }
    }

    // question 3 is required, so the loop above has either set it or returned
    let space = space.ok_or(MatchError::IncompleteAssessment {
        question: 3,
        field: TraitName::SpaceRequirement.as_str(),
    })?;

    Ok(NewAdopter {
        name: identity.name,
        contact_info: identity.contact_info,
        email: identity.email,
        traits: TraitVector::new(ordinals, space)?,
        preferred_size,
    })
}

fn ordinal_answer(field: &str, answer: &Answer) -> Result<u8, MatchError> {
    match answer {
        Answer::Scale(n) => validate_ordinal(field, *n),
        Answer::Choice(_) => Err(MatchError::out_of_range(field, answer)),
    }
}

fn categorical_answer(field: &str, answer: &Answer) -> Result<SpaceRequirement, MatchError> {
    match answer {
        Answer::Choice(s) => SpaceRequirement::parse_field(field, s),
        Answer::Scale(_) => Err(MatchError::out_of_range(field, answer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> AdopterIdentity {
        AdopterIdentity {
            name: "Ana Cruz".to_string(),
            contact_info: "ana@example.com".to_string(),
            email: "ana@example.com".to_string(),
        }
    }

    fn full_answers() -> AssessmentAnswers {
        (1..=15u8)
            .map(|id| {
                let answer = match id {
                    3 => Answer::Choice("Small".to_string()),
                    13 => Answer::Choice("Medium".to_string()),
                    _ => Answer::Scale((id % 5 + 1) as i64),
                };
                (id, answer)
            })
            .collect()
    }

    #[test]
    fn test_build_profile_maps_questions() {
        let adopter = build_profile(identity(), &full_answers()).unwrap();

        assert_eq!(adopter.name, "Ana Cruz");
        assert_eq!(adopter.traits.space_requirement(), SpaceRequirement::Small);
        assert_eq!(adopter.preferred_size, Some(SpaceRequirement::Medium));
        // q1 -> activity, q2 -> attention, q12 -> separation anxiety, q14 -> adaptability
        assert_eq!(adopter.traits.get(OrdinalTrait::ActivityLevel), 2);
        assert_eq!(adopter.traits.get(OrdinalTrait::AttentionNeeds), 3);
        assert_eq!(adopter.traits.get(OrdinalTrait::SeparationAnxietyTendency), 3);
        assert_eq!(adopter.traits.get(OrdinalTrait::Adaptability), 5);
        assert_eq!(adopter.traits.get(OrdinalTrait::VocalizationLevel), 1);
    }

    #[test]
    fn test_missing_required_answer() {
        let mut answers = full_answers();
        answers.remove(&5);

        assert_eq!(
            build_profile(identity(), &answers),
            Err(MatchError::IncompleteAssessment {
                question: 5,
                field: "noise_level"
            })
        );
    }

    #[test]
    fn test_preferred_size_is_optional() {
        let mut answers = full_answers();
        answers.remove(&13);

        let adopter = build_profile(identity(), &answers).unwrap();
        assert_eq!(adopter.preferred_size, None);
    }

    #[test]
    fn test_out_of_range_scale() {
        let mut answers = full_answers();
        answers.insert(8, Answer::Scale(6));
        assert!(matches!(
            build_profile(identity(), &answers),
            Err(MatchError::OutOfRange { field, .. }) if field == "exercise_requirements"
        ));

        answers.insert(8, Answer::Scale(0));
        assert!(build_profile(identity(), &answers).is_err());
    }

    #[test]
    fn test_wrong_answer_kind() {
        let mut answers = full_answers();
        answers.insert(3, Answer::Scale(2));
        assert!(matches!(
            build_profile(identity(), &answers),
            Err(MatchError::OutOfRange { field, .. }) if field == "space_requirement"
        ));

        let mut answers = full_answers();
        answers.insert(1, Answer::Choice("High".to_string()));
        assert!(build_profile(identity(), &answers).is_err());

        let mut answers = full_answers();
        answers.insert(13, Answer::Choice("Gigantic".to_string()));
        assert!(matches!(
            build_profile(identity(), &answers),
            Err(MatchError::OutOfRange { field, .. }) if field == "preferred_size"
        ));
    }

    #[test]
    fn test_unknown_question_rejected() {
        let mut answers = full_answers();
        answers.insert(16, Answer::Scale(3));
        assert!(matches!(
            build_profile(identity(), &answers),
            Err(MatchError::OutOfRange { field, .. }) if field == "question"
        ));
    }

    #[test]
    fn test_answer_deserializes_untagged() {
        let scale: Answer = serde_json::from_str("4").unwrap();
        let choice: Answer = serde_json::from_str("\"Large\"").unwrap();
        assert_eq!(scale, Answer::Scale(4));
        assert_eq!(choice, Answer::Choice("Large".to_string()));
    }
}
