use crate::error::Result;
use crate::models::{AdopterProfile, NewAdopter, PetRecord};
use crate::services::{AdopterRepository, PetCatalog};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Process-local adopter store
///
/// Used when no database is configured and in tests. Profiles are lost on
/// restart.
#[derive(Debug, Default)]
pub struct InMemoryAdopterStore {
    inner: RwLock<BTreeMap<i64, AdopterProfile>>,
}

impl InMemoryAdopterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl AdopterRepository for InMemoryAdopterStore {
    async fn create_adopter(&self, adopter: NewAdopter) -> Result<AdopterProfile> {
        let mut profiles = self.inner.write().await;
        let id = profiles.keys().next_back().map_or(1, |last| last + 1);
        let profile = AdopterProfile::from_new(id, adopter, chrono::Utc::now());
        profiles.insert(id, profile.clone());

        tracing::debug!("Stored adopter {} in memory", id);
        Ok(profile)
    }

    async fn get_adopter(&self, id: i64) -> Result<Option<AdopterProfile>> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Fixed pet population
#[derive(Debug, Clone, Default)]
pub struct StaticPetCatalog {
    pets: Vec<PetRecord>,
}

impl StaticPetCatalog {
    pub fn new(pets: Vec<PetRecord>) -> Self {
        Self { pets }
    }
}

#[async_trait]
impl PetCatalog for StaticPetCatalog {
    async fn list_pets(&self) -> Result<Vec<PetRecord>> {
        Ok(self.pets.clone())
    }
}
