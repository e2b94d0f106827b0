//! Trait schema shared by pet records and adopter answers.
//!
//! Thirteen ordinal traits on a 1-5 scale plus one categorical trait
//! (space requirement). The same schema drives profile validation, pet
//! ingestion, weight configuration and scoring.

use crate::core::error::MatchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest legal ordinal value
pub const ORDINAL_MIN: u8 = 1;

/// Highest legal ordinal value
pub const ORDINAL_MAX: u8 = 5;

/// Placeholder used for pet traits that have not been assessed yet
pub const PLACEHOLDER_ORDINAL: u8 = 3;

/// Largest possible distance between two ordinal values
pub const MAX_ORDINAL_DISTANCE: f64 = (ORDINAL_MAX - ORDINAL_MIN) as f64;

/// Ordinal (1-5) traits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrdinalTrait {
    ActivityLevel,
    AttentionNeeds,
    GroomingNeeds,
    NoiseLevel,
    IndependenceLevel,
    SheddingLevel,
    ExerciseRequirements,
    TrainingNeeds,
    FriendlinessWithStrangers,
    EnergyLevel,
    SeparationAnxietyTendency,
    Adaptability,
    VocalizationLevel,
}

impl OrdinalTrait {
    pub const COUNT: usize = 13;

    pub const ALL: [OrdinalTrait; Self::COUNT] = [
        OrdinalTrait::ActivityLevel,
        OrdinalTrait::AttentionNeeds,
        OrdinalTrait::GroomingNeeds,
        OrdinalTrait::NoiseLevel,
        OrdinalTrait::IndependenceLevel,
        OrdinalTrait::SheddingLevel,
        OrdinalTrait::ExerciseRequirements,
        OrdinalTrait::TrainingNeeds,
        OrdinalTrait::FriendlinessWithStrangers,
        OrdinalTrait::EnergyLevel,
        OrdinalTrait::SeparationAnxietyTendency,
        OrdinalTrait::Adaptability,
        OrdinalTrait::VocalizationLevel,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            OrdinalTrait::ActivityLevel => "activity_level",
            OrdinalTrait::AttentionNeeds => "attention_needs",
            OrdinalTrait::GroomingNeeds => "grooming_needs",
            OrdinalTrait::NoiseLevel => "noise_level",
            OrdinalTrait::IndependenceLevel => "independence_level",
            OrdinalTrait::SheddingLevel => "shedding_level",
            OrdinalTrait::ExerciseRequirements => "exercise_requirements",
            OrdinalTrait::TrainingNeeds => "training_needs",
            OrdinalTrait::FriendlinessWithStrangers => "friendliness_with_strangers",
            OrdinalTrait::EnergyLevel => "energy_level",
            OrdinalTrait::SeparationAnxietyTendency => "separation_anxiety_tendency",
            OrdinalTrait::Adaptability => "adaptability",
            OrdinalTrait::VocalizationLevel => "vocalization_level",
        }
    }
}

/// Categorical space requirement / size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpaceRequirement {
    Small,
    Medium,
    Large,
}

impl SpaceRequirement {
    pub const ALL: [SpaceRequirement; 3] = [
        SpaceRequirement::Small,
        SpaceRequirement::Medium,
        SpaceRequirement::Large,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SpaceRequirement::Small => "Small",
            SpaceRequirement::Medium => "Medium",
            SpaceRequirement::Large => "Large",
        }
    }

    /// Number of size categories between `self` and `other` (0, 1 or 2)
    #[inline]
    pub fn steps_to(self, other: SpaceRequirement) -> u8 {
        (self as u8).abs_diff(other as u8)
    }

    /// Parse an exact literal, reporting failures against `field`
    pub fn parse_field(field: &str, value: &str) -> Result<Self, MatchError> {
        SpaceRequirement::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| MatchError::out_of_range(field, value))
    }
}

impl FromStr for SpaceRequirement {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpaceRequirement::parse_field(TraitName::SpaceRequirement.as_str(), s)
    }
}

impl fmt::Display for SpaceRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any scored dimension of a [`TraitVector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TraitName {
    Ordinal(OrdinalTrait),
    SpaceRequirement,
}

impl TraitName {
    /// Number of scored dimensions (13 ordinal + space)
    pub const COUNT: usize = OrdinalTrait::COUNT + 1;

    pub fn all() -> impl Iterator<Item = TraitName> {
        OrdinalTrait::ALL
            .into_iter()
            .map(TraitName::Ordinal)
            .chain(std::iter::once(TraitName::SpaceRequirement))
    }

    /// Dense index into weight tables
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            TraitName::Ordinal(t) => t.index(),
            TraitName::SpaceRequirement => OrdinalTrait::COUNT,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TraitName::Ordinal(t) => t.as_str(),
            TraitName::SpaceRequirement => "space_requirement",
        }
    }

    pub fn domain(self) -> TraitDomain {
        match self {
            TraitName::Ordinal(_) => TraitDomain::Ordinal {
                min: ORDINAL_MIN,
                max: ORDINAL_MAX,
            },
            TraitName::SpaceRequirement => TraitDomain::Categorical {
                values: &SpaceRequirement::ALL,
            },
        }
    }
}

impl FromStr for TraitName {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraitName::all()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| MatchError::Schema(s.to_string()))
    }
}

impl fmt::Display for TraitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value domain of a trait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraitDomain {
    Ordinal { min: u8, max: u8 },
    Categorical { values: &'static [SpaceRequirement] },
}

/// Look up the domain of a trait by its wire name
pub fn trait_domain(name: &str) -> Result<TraitDomain, MatchError> {
    name.parse::<TraitName>().map(TraitName::domain)
}

/// Validate a raw ordinal value against the 1-5 domain
pub fn validate_ordinal(field: &str, value: i64) -> Result<u8, MatchError> {
    if (ORDINAL_MIN as i64..=ORDINAL_MAX as i64).contains(&value) {
        Ok(value as u8)
    } else {
        Err(MatchError::out_of_range(field, value))
    }
}

/// Immutable, validated trait profile of a pet or an adopter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TraitFields", into = "TraitFields")]
pub struct TraitVector {
    ordinals: [u8; OrdinalTrait::COUNT],
    space_requirement: SpaceRequirement,
}

impl TraitVector {
    /// Build a vector from ordinals in [`OrdinalTrait::ALL`] order
    pub fn new(
        ordinals: [u8; OrdinalTrait::COUNT],
        space_requirement: SpaceRequirement,
    ) -> Result<Self, MatchError> {
        for t in OrdinalTrait::ALL {
            validate_ordinal(t.as_str(), ordinals[t.index()] as i64)?;
        }
        Ok(Self {
            ordinals,
            space_requirement,
        })
    }

    /// Every ordinal set to `value`
    pub fn uniform(value: u8, space_requirement: SpaceRequirement) -> Result<Self, MatchError> {
        Self::new([value; OrdinalTrait::COUNT], space_requirement)
    }

    #[inline]
    pub fn get(&self, t: OrdinalTrait) -> u8 {
        self.ordinals[t.index()]
    }

    #[inline]
    pub fn space_requirement(&self) -> SpaceRequirement {
        self.space_requirement
    }

    /// Copy of this vector with one ordinal replaced
    pub fn with_ordinal(&self, t: OrdinalTrait, value: u8) -> Result<Self, MatchError> {
        let mut ordinals = self.ordinals;
        ordinals[t.index()] = validate_ordinal(t.as_str(), value as i64)?;
        Ok(Self {
            ordinals,
            space_requirement: self.space_requirement,
        })
    }

    /// Copy of this vector with a different space requirement
    pub fn with_space(&self, space_requirement: SpaceRequirement) -> Self {
        Self {
            ordinals: self.ordinals,
            space_requirement,
        }
    }
}

impl Default for TraitVector {
    /// Placeholder profile: every ordinal at the midpoint, medium space
    fn default() -> Self {
        Self {
            ordinals: [PLACEHOLDER_ORDINAL; OrdinalTrait::COUNT],
            space_requirement: SpaceRequirement::Medium,
        }
    }
}

/// Flat wire layout of a trait vector, as stored on pet records
///
/// Missing or null ordinals fall back to the placeholder and a missing
/// space to Medium; present values are validated, never clamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitFields {
    #[serde(default)]
    pub activity_level: Option<i64>,
    #[serde(default)]
    pub attention_needs: Option<i64>,
    #[serde(default)]
    pub grooming_needs: Option<i64>,
    #[serde(default)]
    pub noise_level: Option<i64>,
    #[serde(default)]
    pub independence_level: Option<i64>,
    #[serde(default)]
    pub shedding_level: Option<i64>,
    #[serde(default)]
    pub exercise_requirements: Option<i64>,
    #[serde(default)]
    pub training_needs: Option<i64>,
    #[serde(default)]
    pub friendliness_with_strangers: Option<i64>,
    #[serde(default)]
    pub energy_level: Option<i64>,
    #[serde(default)]
    pub separation_anxiety_tendency: Option<i64>,
    #[serde(default)]
    pub adaptability: Option<i64>,
    #[serde(default)]
    pub vocalization_level: Option<i64>,
    #[serde(default)]
    pub space_requirement: Option<String>,
}

impl TraitFields {
    fn ordinal_values(&self) -> [Option<i64>; OrdinalTrait::COUNT] {
        [
            self.activity_level,
            self.attention_needs,
            self.grooming_needs,
            self.noise_level,
            self.independence_level,
            self.shedding_level,
            self.exercise_requirements,
            self.training_needs,
            self.friendliness_with_strangers,
            self.energy_level,
            self.separation_anxiety_tendency,
            self.adaptability,
            self.vocalization_level,
        ]
    }
}

impl TryFrom<TraitFields> for TraitVector {
    type Error = MatchError;

    fn try_from(fields: TraitFields) -> Result<Self, Self::Error> {
        let raw = fields.ordinal_values();
        let mut ordinals = [PLACEHOLDER_ORDINAL; OrdinalTrait::COUNT];
        for t in OrdinalTrait::ALL {
            if let Some(value) = raw[t.index()] {
                ordinals[t.index()] = validate_ordinal(t.as_str(), value)?;
            }
        }
        let space = match fields.space_requirement {
            Some(space) => space.parse::<SpaceRequirement>()?,
            None => SpaceRequirement::Medium,
        };
        TraitVector::new(ordinals, space)
    }
}

impl From<TraitVector> for TraitFields {
    fn from(v: TraitVector) -> Self {
        let o = |t: OrdinalTrait| Some(v.get(t) as i64);
        TraitFields {
            activity_level: o(OrdinalTrait::ActivityLevel),
            attention_needs: o(OrdinalTrait::AttentionNeeds),
            grooming_needs: o(OrdinalTrait::GroomingNeeds),
            noise_level: o(OrdinalTrait::NoiseLevel),
            independence_level: o(OrdinalTrait::IndependenceLevel),
            shedding_level: o(OrdinalTrait::SheddingLevel),
            exercise_requirements: o(OrdinalTrait::ExerciseRequirements),
            training_needs: o(OrdinalTrait::TrainingNeeds),
            friendliness_with_strangers: o(OrdinalTrait::FriendlinessWithStrangers),
            energy_level: o(OrdinalTrait::EnergyLevel),
            separation_anxiety_tendency: o(OrdinalTrait::SeparationAnxietyTendency),
            adaptability: o(OrdinalTrait::Adaptability),
            vocalization_level: o(OrdinalTrait::VocalizationLevel),
            space_requirement: Some(v.space_requirement().as_str().to_string()),
        }
    }
}

/// What an assessment question feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionTarget {
    Trait(TraitName),
    /// Question 13: preferred pet size, carried on the profile but not scored
    PreferredSize,
}

/// One assessment question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: u8,
    pub target: QuestionTarget,
    pub required: bool,
}

impl Question {
    const fn scored(id: u8, target: TraitName) -> Self {
        Self {
            id,
            target: QuestionTarget::Trait(target),
            required: true,
        }
    }

    pub fn is_categorical(&self) -> bool {
        matches!(
            self.target,
            QuestionTarget::PreferredSize | QuestionTarget::Trait(TraitName::SpaceRequirement)
        )
    }

    pub fn field_name(&self) -> &'static str {
        match self.target {
            QuestionTarget::Trait(t) => t.as_str(),
            QuestionTarget::PreferredSize => "preferred_size",
        }
    }
}

/// Question id -> trait mapping of the adopter assessment
pub const QUESTIONS: [Question; 15] = [
    Question::scored(1, TraitName::Ordinal(OrdinalTrait::ActivityLevel)),
    Question::scored(2, TraitName::Ordinal(OrdinalTrait::AttentionNeeds)),
    Question::scored(3, TraitName::SpaceRequirement),
    Question::scored(4, TraitName::Ordinal(OrdinalTrait::GroomingNeeds)),
    Question::scored(5, TraitName::Ordinal(OrdinalTrait::NoiseLevel)),
    Question::scored(6, TraitName::Ordinal(OrdinalTrait::IndependenceLevel)),
    Question::scored(7, TraitName::Ordinal(OrdinalTrait::SheddingLevel)),
    Question::scored(8, TraitName::Ordinal(OrdinalTrait::ExerciseRequirements)),
    Question::scored(9, TraitName::Ordinal(OrdinalTrait::TrainingNeeds)),
    Question::scored(10, TraitName::Ordinal(OrdinalTrait::FriendlinessWithStrangers)),
    Question::scored(11, TraitName::Ordinal(OrdinalTrait::EnergyLevel)),
    Question::scored(12, TraitName::Ordinal(OrdinalTrait::SeparationAnxietyTendency)),
    Question {
        id: 13,
        target: QuestionTarget::PreferredSize,
        required: false,
    },
    Question::scored(14, TraitName::Ordinal(OrdinalTrait::Adaptability)),
    Question::scored(15, TraitName::Ordinal(OrdinalTrait::VocalizationLevel)),
];

/// Question with the given id, if any
pub fn question(id: u8) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// Id of the question that feeds `name`
pub fn question_for(name: TraitName) -> u8 {
    QUESTIONS
        .iter()
        .find(|q| q.target == QuestionTarget::Trait(name))
        .map(|q| q.id)
        .unwrap_or_default()
}
