use crate::models::{PetRecord, PetStatus};

/// Check if a pet can be offered to adopters
///
/// Adopted pets drop out of matching unless `include_adopted` is set.
/// Pets in a trial adoption stay eligible.
#[inline]
pub fn is_matchable(pet: &PetRecord, include_adopted: bool) -> bool {
    include_adopted || pet.status != PetStatus::Adopted
}

/// Reduce a pet snapshot to the population that gets scored
pub fn eligible_population(pets: Vec<PetRecord>, include_adopted: bool) -> Vec<PetRecord> {
    pets.into_iter()
        .filter(|pet| is_matchable(pet, include_adopted))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::TraitVector;

    fn pet(id: i64, status: PetStatus) -> PetRecord {
        PetRecord {
            id,
            name: format!("Pet {}", id),
            breed: "Mixed".to_string(),
            pet_type: "Dog".to_string(),
            image: None,
            status,
            size: None,
            traits: TraitVector::default(),
        }
    }

    #[test]
    fn test_adopted_pets_filtered() {
        assert!(is_matchable(&pet(1, PetStatus::Available), false));
        assert!(is_matchable(&pet(2, PetStatus::InTrial), false));
        assert!(!is_matchable(&pet(3, PetStatus::Adopted), false));
        assert!(is_matchable(&pet(3, PetStatus::Adopted), true));
    }

    #[test]
    fn test_eligible_population_keeps_order() {
        let pets = vec![
            pet(4, PetStatus::Available),
            pet(5, PetStatus::Adopted),
            pet(6, PetStatus::Unknown),
        ];
        let ids: Vec<i64> = eligible_population(pets, false).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 6]);
    }
}
