use crate::core::schema::{
    OrdinalTrait, SpaceRequirement, TraitName, TraitVector, MAX_ORDINAL_DISTANCE,
};
use crate::models::ScoringWeights;

/// Calculate a match percentage (0-100) between an adopter and a pet
///
/// Scoring formula:
/// score = round(100 * sum(weight[t] * similarity[t]))
///
/// where, per trait:
///     ordinal:  similarity = 1 - |adopter - pet| / 4
///     space:    similarity = 1.0 same size, 0.5 adjacent, 0.0 Small vs Large
///
/// Weights sum to 1, so identical vectors score 100 and the result is
/// symmetric in its two vector arguments.
pub fn calculate_match_score(
    adopter: &TraitVector,
    pet: &TraitVector,
    weights: &ScoringWeights,
) -> u8 {
    let similarity = weighted_similarity(adopter, pet, weights);
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Weighted mean of per-trait similarities, in [0, 1]
pub fn weighted_similarity(a: &TraitVector, b: &TraitVector, weights: &ScoringWeights) -> f64 {
    let ordinal: f64 = OrdinalTrait::ALL
        .iter()
        .map(|&t| weights.weight(TraitName::Ordinal(t)) * ordinal_similarity(a.get(t), b.get(t)))
        .sum();

    let space = weights.weight(TraitName::SpaceRequirement)
        * space_similarity(a.space_requirement(), b.space_requirement());

    ordinal + space
}

/// Similarity of two 1-5 values (0-1)
#[inline]
pub fn ordinal_similarity(a: u8, b: u8) -> f64 {
    1.0 - a.abs_diff(b) as f64 / MAX_ORDINAL_DISTANCE
}

/// Similarity of two size categories (0-1)
/// Adjacent sizes get partial credit instead of an all-or-nothing cliff
#[inline]
pub fn space_similarity(a: SpaceRequirement, b: SpaceRequirement) -> f64 {
    match a.steps_to(b) {
        0 => 1.0,
        1 => 0.5,
        _ => 0.0,
    }
}
