use crate::core::error::MatchError;
use crate::core::schema::{SpaceRequirement, TraitName, TraitVector};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Adoption status of a pet record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PetStatus {
    #[default]
    Available,
    #[serde(rename = "In Trial")]
    InTrial,
    Adopted,
    #[serde(other)]
    Unknown,
}

/// Pet snapshot as served by the pet backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub breed: String,
    #[serde(rename = "type", default)]
    pub pet_type: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: PetStatus,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(flatten)]
    pub traits: TraitVector,
}

/// Validated assessment output, not yet persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAdopter {
    pub name: String,
    pub contact_info: String,
    pub email: String,
    #[serde(flatten)]
    pub traits: TraitVector,
    pub preferred_size: Option<SpaceRequirement>,
}

/// Stored adopter profile
///
/// Every assessment submission creates a new profile; existing profiles are
/// never rewritten, so earlier match results stay reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdopterProfile {
    pub id: i64,
    pub name: String,
    pub contact_info: String,
    pub email: String,
    #[serde(flatten)]
    pub traits: TraitVector,
    pub preferred_size: Option<SpaceRequirement>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl AdopterProfile {
    pub fn from_new(id: i64, adopter: NewAdopter, created_at: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            id,
            name: adopter.name,
            contact_info: adopter.contact_info,
            email: adopter.email,
            traits: adopter.traits,
            preferred_size: adopter.preferred_size,
            created_at,
        }
    }
}

/// One scored pet in a match result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetMatch {
    pub pet_id: i64,
    pub name: String,
    pub breed: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    pub image: Option<String>,
    #[serde(rename = "match")]
    pub match_percentage: u8,
}

impl PetMatch {
    pub fn from_record(pet: &PetRecord, match_percentage: u8) -> Self {
        Self {
            pet_id: pet.id,
            name: pet.name.clone(),
            breed: pet.breed.clone(),
            pet_type: pet.pet_type.clone(),
            image: pet.image.clone(),
            match_percentage,
        }
    }
}

/// Ranked, tiered matches for one adopter. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub adopter_name: String,
    pub top_matches: Vec<PetMatch>,
    pub other_matches: Vec<PetMatch>,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.top_matches.is_empty() && self.other_matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.top_matches.len() + self.other_matches.len()
    }
}

/// Per-trait scoring weights, normalized to sum to 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    weights: [f64; TraitName::COUNT],
}

impl ScoringWeights {
    /// Equal weight on every trait
    pub fn equal() -> Self {
        Self {
            weights: [1.0 / TraitName::COUNT as f64; TraitName::COUNT],
        }
    }

    /// Build weights from relative values keyed by trait name
    ///
    /// Traits not named keep a relative weight of 1.0. The result is
    /// normalized so the weights sum to 1.
    pub fn from_map(relative: &HashMap<String, f64>) -> Result<Self, MatchError> {
        let mut weights = [1.0; TraitName::COUNT];

        for (name, &weight) in relative {
            let name: TraitName = name.parse()?;
            if !weight.is_finite() || weight < 0.0 {
                return Err(MatchError::out_of_range(format!("weights.{}", name), weight));
            }
            weights[name.index()] = weight;
        }

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(MatchError::out_of_range("weights", total));
        }

        for w in weights.iter_mut() {
            *w /= total;
        }

        Ok(Self { weights })
    }

    #[inline]
    pub fn weight(&self, name: TraitName) -> f64 {
        self.weights[name.index()]
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::equal()
    }
}
