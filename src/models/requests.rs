use crate::core::profile::{AdopterIdentity, Answer, AssessmentAnswers};
use crate::core::schema::{question_for, OrdinalTrait, TraitName};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Assessment submission
///
/// POST /api/matching/adopters/submit-assessment
///
/// Answers are named after the trait they feed. Missing answers stay `None`
/// so the profile builder can report them as incomplete.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SubmitAssessmentRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub contact_info: String,
    #[validate(email)]
    pub email: String,

    pub answer_activity_level: Option<Answer>,
    pub answer_attention_needs: Option<Answer>,
    pub answer_space_requirement: Option<Answer>,
    pub answer_grooming_needs: Option<Answer>,
    pub answer_noise_level: Option<Answer>,
    pub answer_independence_level: Option<Answer>,
    pub answer_shedding_level: Option<Answer>,
    pub answer_exercise_requirements: Option<Answer>,
    pub answer_training_needs: Option<Answer>,
    pub answer_friendliness_with_strangers: Option<Answer>,
    pub answer_energy_level: Option<Answer>,
    pub answer_separation_anxiety_tendency: Option<Answer>,
    pub answer_adaptability: Option<Answer>,
    pub answer_vocalization_level: Option<Answer>,
    /// Question 13, preferred pet size
    #[serde(default)]
    pub answer_pet_size: Option<Answer>,
}

impl SubmitAssessmentRequest {
    pub fn identity(&self) -> AdopterIdentity {
        let contact_info = if self.contact_info.trim().is_empty() {
            self.email.clone()
        } else {
            self.contact_info.clone()
        };

        AdopterIdentity {
            name: self.name.trim().to_string(),
            contact_info,
            email: self.email.trim().to_string(),
        }
    }

    /// Re-key the named answers by assessment question id
    pub fn answers(&self) -> AssessmentAnswers {
        use OrdinalTrait::*;

        let named = [
            (TraitName::Ordinal(ActivityLevel), &self.answer_activity_level),
            (TraitName::Ordinal(AttentionNeeds), &self.answer_attention_needs),
            (TraitName::SpaceRequirement, &self.answer_space_requirement),
            (TraitName::Ordinal(GroomingNeeds), &self.answer_grooming_needs),
            (TraitName::Ordinal(NoiseLevel), &self.answer_noise_level),
            (TraitName::Ordinal(IndependenceLevel), &self.answer_independence_level),
            (TraitName::Ordinal(SheddingLevel), &self.answer_shedding_level),
            (TraitName::Ordinal(ExerciseRequirements), &self.answer_exercise_requirements),
            (TraitName::Ordinal(TrainingNeeds), &self.answer_training_needs),
            (TraitName::Ordinal(FriendlinessWithStrangers), &self.answer_friendliness_with_strangers),
            (TraitName::Ordinal(EnergyLevel), &self.answer_energy_level),
            (TraitName::Ordinal(SeparationAnxietyTendency), &self.answer_separation_anxiety_tendency),
            (TraitName::Ordinal(Adaptability), &self.answer_adaptability),
            (TraitName::Ordinal(VocalizationLevel), &self.answer_vocalization_level),
        ];

        let mut answers: AssessmentAnswers = named
            .into_iter()
            .filter_map(|(name, answer)| answer.clone().map(|a| (question_for(name), a)))
            .collect();

        if let Some(size) = &self.answer_pet_size {
            answers.insert(13, size.clone());
        }

        answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_keyed_by_question() {
        let req: SubmitAssessmentRequest = serde_json::from_str(
            r#"{
                "name": "Ana Cruz",
                "contact_info": "",
                "email": "ana@example.com",
                "answer_attention_needs": 4,
                "answer_space_requirement": "Small",
                "answer_adaptability": 2
            }"#,
        )
        .unwrap();

        let answers = req.answers();
        assert_eq!(answers.len(), 3);
        assert_eq!(answers.get(&2), Some(&Answer::Scale(4)));
        assert_eq!(answers.get(&3), Some(&Answer::Choice("Small".to_string())));
        assert_eq!(answers.get(&14), Some(&Answer::Scale(2)));

        // contact info falls back to the email
        assert_eq!(req.identity().contact_info, "ana@example.com");
    }

    #[test]
    fn test_validation_rejects_bad_email() {
        let req = SubmitAssessmentRequest {
            name: "Ana".to_string(),
            email: "not-an-email".to_string(),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
