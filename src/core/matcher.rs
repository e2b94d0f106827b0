use crate::core::error::MatchError;
use crate::core::schema::SpaceRequirement;
use crate::core::scoring::calculate_match_score;
use crate::models::{AdopterProfile, MatchResult, PetMatch, PetRecord, ScoringWeights};
use rayon::prelude::*;
use std::collections::HashMap;

/// Population size from which per-pet scoring runs on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Match tier of a scored pet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Top,
    Other,
}

/// Lower bounds (inclusive) of the two match tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierThresholds {
    top: u8,
    min: u8,
}

impl TierThresholds {
    pub fn new(top: u8, min: u8) -> Result<Self, MatchError> {
        if top > 100 {
            return Err(MatchError::out_of_range("matching.top_threshold", top));
        }
        if min > top {
            return Err(MatchError::out_of_range("matching.min_threshold", min));
        }
        Ok(Self { top, min })
    }

    pub fn top(&self) -> u8 {
        self.top
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    /// Tier for a match percentage, `None` below the minimum
    #[inline]
    pub fn tier(&self, match_percentage: u8) -> Option<Tier> {
        if match_percentage >= self.top {
            Some(Tier::Top)
        } else if match_percentage >= self.min {
            Some(Tier::Other)
        } else {
            None
        }
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self { top: 85, min: 50 }
    }
}

/// Ranking and tiering engine
///
/// # Pipeline Stages
/// 1. Weight selection by the adopter's space requirement
/// 2. Per-pet scoring (parallel for large populations)
/// 3. Sort by match descending, pet id ascending
/// 4. Partition into top and other tiers, drop the rest
///
/// Holds configuration only; no state survives between calls.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    space_weights: HashMap<SpaceRequirement, ScoringWeights>,
    thresholds: TierThresholds,
    parallel_threshold: usize,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            space_weights: HashMap::new(),
            thresholds: TierThresholds::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default())
    }

    /// Use `weights` for adopters whose home has the given space
    pub fn with_space_weights(mut self, space: SpaceRequirement, weights: ScoringWeights) -> Self {
        self.space_weights.insert(space, weights);
        self
    }

    pub fn with_thresholds(mut self, thresholds: TierThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold.max(1);
        self
    }

    pub fn thresholds(&self) -> TierThresholds {
        self.thresholds
    }

    /// Weights applied to an adopter with the given space requirement
    pub fn weights_for(&self, space: SpaceRequirement) -> &ScoringWeights {
        self.space_weights.get(&space).unwrap_or(&self.weights)
    }

    /// Score an adopter against every pet and split the result into tiers
    ///
    /// An empty population yields an empty result.
    pub fn rank(&self, adopter: &AdopterProfile, pets: &[PetRecord]) -> MatchResult {
        let weights = self.weights_for(adopter.traits.space_requirement());
        let thresholds = self.thresholds;

        let score = |pet: &PetRecord| {
            let match_percentage = calculate_match_score(&adopter.traits, &pet.traits, weights);
            thresholds
                .tier(match_percentage)
                .map(|_| PetMatch::from_record(pet, match_percentage))
        };

        let mut scored: Vec<PetMatch> = if pets.len() >= self.parallel_threshold {
            pets.par_iter().filter_map(score).collect()
        } else {
            pets.iter().filter_map(score).collect()
        };

        scored.sort_by(|a, b| {
            b.match_percentage
                .cmp(&a.match_percentage)
                .then_with(|| a.pet_id.cmp(&b.pet_id))
        });

        let (top_matches, other_matches): (Vec<PetMatch>, Vec<PetMatch>) = scored
            .into_iter()
            .partition(|m| thresholds.tier(m.match_percentage) == Some(Tier::Top));

        MatchResult {
            adopter_name: adopter.name.clone(),
            top_matches,
            other_matches,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{OrdinalTrait, TraitVector};
    use crate::models::PetStatus;
    use chrono::Utc;

    fn create_pet(id: i64, traits: TraitVector) -> PetRecord {
        PetRecord {
            id,
            name: format!("Pet {}", id),
            breed: "Mixed".to_string(),
            pet_type: if id % 2 == 0 { "Dog" } else { "Cat" }.to_string(),
            image: None,
            status: PetStatus::Available,
            size: None,
            traits,
        }
    }

    fn create_adopter(traits: TraitVector) -> AdopterProfile {
        AdopterProfile {
            id: 1,
            name: "Ana Cruz".to_string(),
            contact_info: "ana@example.com".to_string(),
            email: "ana@example.com".to_string(),
            traits,
            preferred_size: None,
            created_at: Utc::now(),
        }
    }

    fn uniform(value: u8, space: SpaceRequirement) -> TraitVector {
        TraitVector::uniform(value, space).unwrap()
    }

    #[test]
    fn test_rank_basic_tiers() {
        let matcher = Matcher::with_default_weights();
        let adopter = create_adopter(uniform(3, SpaceRequirement::Medium));

        let pets = vec![
            create_pet(1, uniform(3, SpaceRequirement::Medium)), // 100
            create_pet(2, uniform(5, SpaceRequirement::Large)),  // 50
            create_pet(3, uniform(1, SpaceRequirement::Small)),  // 50
            create_pet(4, uniform(4, SpaceRequirement::Medium)), // 77
        ];

        let result = matcher.rank(&adopter, &pets);

        assert_eq!(result.adopter_name, "Ana Cruz");
        assert_eq!(result.top_matches.len(), 1);
        assert_eq!(result.top_matches[0].pet_id, 1);
        assert_eq!(result.top_matches[0].match_percentage, 100);

        let other: Vec<(i64, u8)> = result
            .other_matches
            .iter()
            .map(|m| (m.pet_id, m.match_percentage))
            .collect();
        assert_eq!(other, vec![(4, 77), (2, 50), (3, 50)]);
    }

    #[test]
    fn test_below_minimum_excluded() {
        let matcher = Matcher::with_default_weights();
        let adopter = create_adopter(uniform(1, SpaceRequirement::Small));
        let pets = vec![create_pet(1, uniform(5, SpaceRequirement::Large))];

        let result = matcher.rank(&adopter, &pets);
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_population() {
        let matcher = Matcher::with_default_weights();
        let adopter = create_adopter(TraitVector::default());

        let result = matcher.rank(&adopter, &[]);
        assert!(result.is_empty());
        assert_eq!(result.adopter_name, "Ana Cruz");
    }

    #[test]
    fn test_ties_broken_by_pet_id() {
        let matcher = Matcher::with_default_weights();
        let adopter = create_adopter(uniform(3, SpaceRequirement::Medium));
        let pets = vec![
            create_pet(9, uniform(3, SpaceRequirement::Medium)),
            create_pet(2, uniform(3, SpaceRequirement::Medium)),
            create_pet(5, uniform(3, SpaceRequirement::Medium)),
        ];

        let result = matcher.rank(&adopter, &pets);
        let ids: Vec<i64> = result.top_matches.iter().map(|m| m.pet_id).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let adopter = create_adopter(uniform(3, SpaceRequirement::Medium));
        let pets: Vec<PetRecord> = (0..500)
            .map(|i| {
                let traits = uniform(3, SpaceRequirement::Medium)
                    .with_ordinal(OrdinalTrait::ALL[i % OrdinalTrait::COUNT], (i % 5 + 1) as u8)
                    .unwrap()
                    .with_space(SpaceRequirement::ALL[i % 3]);
                create_pet(i as i64, traits)
            })
            .collect();

        let sequential = Matcher::with_default_weights()
            .with_parallel_threshold(usize::MAX)
            .rank(&adopter, &pets);
        let parallel = Matcher::with_default_weights()
            .with_parallel_threshold(1)
            .rank(&adopter, &pets);

        assert_eq!(sequential, parallel);
        assert_eq!(sequential.len(), 500);
    }

    #[test]
    fn test_space_specific_weights() {
        let mut relative = HashMap::new();
        relative.insert("separation_anxiety_tendency".to_string(), 20.0);
        let apartment = ScoringWeights::from_map(&relative).unwrap();

        let matcher = Matcher::with_default_weights()
            .with_space_weights(SpaceRequirement::Small, apartment);

        let small = uniform(3, SpaceRequirement::Small);
        let pet = create_pet(
            1,
            small.with_ordinal(OrdinalTrait::SeparationAnxietyTendency, 1).unwrap(),
        );

        let apartment_result = matcher.rank(&create_adopter(small), std::slice::from_ref(&pet));
        assert!(apartment_result.top_matches.is_empty());
        assert_eq!(apartment_result.other_matches.len(), 1);

        let house = small.with_space(SpaceRequirement::Large);
        let house_pet = create_pet(2, pet.traits.with_space(SpaceRequirement::Large));
        let house_result = matcher.rank(&create_adopter(house), &[house_pet]);
        assert_eq!(house_result.top_matches.len(), 1);
    }

    #[test]
    fn test_threshold_validation() {
        assert!(TierThresholds::new(85, 50).is_ok());
        assert!(TierThresholds::new(50, 85).is_err());
        assert!(TierThresholds::new(101, 50).is_err());

        let t = TierThresholds::default();
        assert_eq!(t.tier(85), Some(Tier::Top));
        assert_eq!(t.tier(84), Some(Tier::Other));
        assert_eq!(t.tier(50), Some(Tier::Other));
        assert_eq!(t.tier(49), None);
    }
}
