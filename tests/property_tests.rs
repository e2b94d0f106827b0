// Property tests for scoring and ranking

use chrono::Utc;
use pet_match::core::{
    calculate_match_score, Matcher, OrdinalTrait, SpaceRequirement, TierThresholds, TraitVector,
};
use pet_match::models::{AdopterProfile, PetRecord, PetStatus, ScoringWeights};
use proptest::prelude::*;
use std::collections::HashMap;

fn space_strategy() -> impl Strategy<Value = SpaceRequirement> {
    prop_oneof![
        Just(SpaceRequirement::Small),
        Just(SpaceRequirement::Medium),
        Just(SpaceRequirement::Large),
    ]
}

fn traits_strategy() -> impl Strategy<Value = TraitVector> {
    (
        prop::array::uniform13(1u8..=5),
        space_strategy(),
    )
        .prop_map(|(ordinals, space)| TraitVector::new(ordinals, space).unwrap())
}

fn weights_strategy() -> impl Strategy<Value = ScoringWeights> {
    prop::collection::vec(0.0f64..10.0, OrdinalTrait::COUNT).prop_map(|values| {
        let mut relative: HashMap<String, f64> = OrdinalTrait::ALL
            .iter()
            .zip(values)
            .map(|(t, w)| (t.as_str().to_string(), w))
            .collect();
        // keeps the total above zero
        relative.insert("space_requirement".to_string(), 1.0);
        ScoringWeights::from_map(&relative).unwrap()
    })
}

fn adopter(traits: TraitVector) -> AdopterProfile {
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

fn pets(traits: Vec<TraitVector>) -> Vec<PetRecord> {
    traits
        .into_iter()
        .enumerate()
        .map(|(i, traits)| PetRecord {
            id: i as i64 + 1,
            name: format!("Pet {}", i + 1),
            breed: "Mixed".to_string(),
            pet_type: "Dog".to_string(),
            image: None,
            status: PetStatus::Available,
            size: None,
            traits,
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_self_match_is_perfect(v in traits_strategy(), w in weights_strategy()) {
        prop_assert_eq!(calculate_match_score(&v, &v, &w), 100);
    }

    #[test]
    fn prop_score_is_symmetric(
        a in traits_strategy(),
        b in traits_strategy(),
        w in weights_strategy(),
    ) {
        prop_assert_eq!(calculate_match_score(&a, &b, &w), calculate_match_score(&b, &a, &w));
    }

    #[test]
    fn prop_score_is_bounded(a in traits_strategy(), b in traits_strategy(), w in weights_strategy()) {
        prop_assert!(calculate_match_score(&a, &b, &w) <= 100);
    }

    #[test]
    fn prop_moving_away_never_raises_score(
        a in traits_strategy(),
        trait_index in 0..OrdinalTrait::COUNT,
        w in weights_strategy(),
    ) {
        let t = OrdinalTrait::ALL[trait_index];
        let base = a.get(t);

        // walk one trait of the pet away from the adopter, upward then downward
        for walk in [(base..=5).collect::<Vec<u8>>(), (1..=base).rev().collect()] {
            let mut previous = 100;
            for value in walk {
                let pet = a.with_ordinal(t, value).unwrap();
                let score = calculate_match_score(&a, &pet, &w);
                prop_assert!(score <= previous);
                previous = score;
            }
        }
    }

    #[test]
    fn prop_ranking_partitions_population(
        a in traits_strategy(),
        population in prop::collection::vec(traits_strategy(), 0..60),
        top in 50u8..=100,
        min in 0u8..50,
    ) {
        let thresholds = TierThresholds::new(top, min).unwrap();
        let matcher = Matcher::with_default_weights().with_thresholds(thresholds);
        let adopter = adopter(a);
        let pets = pets(population);

        let result = matcher.rank(&adopter, &pets);

        // every pet at or above the minimum appears exactly once
        let expected = pets
            .iter()
            .filter(|p| calculate_match_score(&a, &p.traits, &ScoringWeights::default()) >= min)
            .count();
        prop_assert_eq!(result.len(), expected);

        prop_assert!(result.top_matches.iter().all(|m| m.match_percentage >= top));
        prop_assert!(result
            .other_matches
            .iter()
            .all(|m| m.match_percentage >= min && m.match_percentage < top));

        let all: Vec<_> = result.top_matches.iter().chain(&result.other_matches).collect();
        for pair in all.windows(2) {
            let ordered = pair[0].match_percentage > pair[1].match_percentage
                || (pair[0].match_percentage == pair[1].match_percentage
                    && pair[0].pet_id < pair[1].pet_id);
            prop_assert!(ordered);
        }
    }

    #[test]
    fn prop_ranking_is_deterministic(
        a in traits_strategy(),
        population in prop::collection::vec(traits_strategy(), 0..40),
    ) {
        let adopter = adopter(a);
        let pets = pets(population);

        let sequential = Matcher::with_default_weights()
            .with_parallel_threshold(usize::MAX)
            .rank(&adopter, &pets);
        let parallel = Matcher::with_default_weights()
            .with_parallel_threshold(1)
            .rank(&adopter, &pets);

        prop_assert_eq!(&sequential, &parallel);
        prop_assert_eq!(sequential, Matcher::with_default_weights().rank(&adopter, &pets));
    }
}
