// Service exports
pub mod matching;
pub mod memory;
pub mod pet_backend;
pub mod postgres;

pub use matching::MatchService;
pub use memory::{InMemoryAdopterStore, StaticPetCatalog};
pub use pet_backend::{BackendError, PetBackendClient};
pub use postgres::{PostgresAdopterStore, PostgresError};

use crate::error::Result;
use crate::models::{AdopterProfile, NewAdopter, PetRecord};
use async_trait::async_trait;

/// Persistence for adopter profiles
#[async_trait]
pub trait AdopterRepository: Send + Sync {
    /// Store a new profile and return it with its assigned id
    async fn create_adopter(&self, adopter: NewAdopter) -> Result<AdopterProfile>;

    async fn get_adopter(&self, id: i64) -> Result<Option<AdopterProfile>>;

    async fn health_check(&self) -> bool;
}

/// Read-only source of the current pet population
#[async_trait]
pub trait PetCatalog: Send + Sync {
    async fn list_pets(&self) -> Result<Vec<PetRecord>>;
}
