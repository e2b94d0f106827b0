use crate::core::{build_profile, eligible_population, MatchError, Matcher};
use crate::error::{AppError, Result};
use crate::models::{AdopterProfile, MatchResult, SubmitAssessmentRequest};
use crate::services::{AdopterRepository, PetCatalog};
use std::sync::Arc;
use validator::Validate;

/// Orchestrates assessment intake and match requests
///
/// Every match request recomputes from the stored profile and a fresh read
/// of the pet population. Nothing is cached between requests.
#[derive(Clone)]
pub struct MatchService {
    adopters: Arc<dyn AdopterRepository>,
    pets: Arc<dyn PetCatalog>,
    matcher: Arc<Matcher>,
    include_adopted: bool,
}

impl MatchService {
    pub fn new(
        adopters: Arc<dyn AdopterRepository>,
        pets: Arc<dyn PetCatalog>,
        matcher: Matcher,
    ) -> Self {
        Self {
            adopters,
            pets,
            matcher: Arc::new(matcher),
            include_adopted: false,
        }
    }

    /// Keep adopted pets in the ranked population
    pub fn with_include_adopted(mut self, include_adopted: bool) -> Self {
        self.include_adopted = include_adopted;
        self
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Validate an assessment and store it as a new adopter profile
    pub async fn submit_assessment(&self, request: SubmitAssessmentRequest) -> Result<AdopterProfile> {
        request.validate()?;

        let new_adopter = build_profile(request.identity(), &request.answers()).map_err(|e| {
            tracing::info!("Rejected assessment from {}: {}", request.email, e);
            e
        })?;

        let profile = self.adopters.create_adopter(new_adopter).await?;

        tracing::info!(
            "Stored adopter profile {} ({} home)",
            profile.id,
            profile.traits.space_requirement()
        );

        Ok(profile)
    }

    pub async fn get_adopter(&self, adopter_id: i64) -> Result<AdopterProfile> {
        self.adopters
            .get_adopter(adopter_id)
            .await?
            .ok_or(AppError::Match(MatchError::AdopterNotFound(adopter_id)))
    }

    /// Rank the current pet population against a stored adopter profile
    pub async fn match_pets(&self, adopter_id: i64) -> Result<MatchResult> {
        let (adopter, pets) = tokio::try_join!(
            self.adopters.get_adopter(adopter_id),
            self.pets.list_pets()
        )?;

        let adopter = adopter.ok_or(MatchError::AdopterNotFound(adopter_id))?;

        let total = pets.len();
        let population = eligible_population(pets, self.include_adopted);

        tracing::debug!(
            "Scoring adopter {} against {} of {} pets",
            adopter_id,
            population.len(),
            total
        );

        let matcher = Arc::clone(&self.matcher);
        let result = tokio::task::spawn_blocking(move || matcher.rank(&adopter, &population))
            .await
            .map_err(|e| AppError::Internal(format!("Ranking task failed: {}", e)))?;

        tracing::info!(
            "Adopter {}: {} top and {} other matches",
            adopter_id,
            result.top_matches.len(),
            result.other_matches.len()
        );

        Ok(result)
    }

    /// Whether the adopter store is reachable
    pub async fn health(&self) -> bool {
        self.adopters.health_check().await
    }
}
