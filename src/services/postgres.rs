use crate::core::schema::{OrdinalTrait, SpaceRequirement, TraitVector};
use crate::core::MatchError;
use crate::error::Result;
use crate::models::{AdopterProfile, NewAdopter};
use crate::services::AdopterRepository;
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

impl From<MatchError> for PostgresError {
    fn from(err: MatchError) -> Self {
        PostgresError::InvalidData(err.to_string())
    }
}

const TRAIT_COLUMNS: &str = "activity_level, attention_needs, grooming_needs, noise_level, \
    independence_level, shedding_level, exercise_requirements, training_needs, \
    friendliness_with_strangers, energy_level, separation_anxiety_tendency, adaptability, \
    vocalization_level, space_requirement";

/// PostgreSQL store for adopter profiles
///
/// Profiles are insert-only. A retaken assessment produces a new row so
/// earlier match results can be recomputed from the profile they used.
pub struct PostgresAdopterStore {
    pool: PgPool,
}

impl PostgresAdopterStore {
    /// Create a new store from a connection string and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
    ) -> std::result::Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    async fn insert(&self, adopter: NewAdopter) -> std::result::Result<AdopterProfile, PostgresError> {
        let query = format!(
            r#"
            INSERT INTO adopter_profiles (name, contact_info, email, {}, preferred_size)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING id, created_at
            "#,
            TRAIT_COLUMNS
        );

        let mut q = sqlx::query(&query)
            .bind(&adopter.name)
            .bind(&adopter.contact_info)
            .bind(&adopter.email);
        for t in OrdinalTrait::ALL {
            q = q.bind(adopter.traits.get(t) as i16);
        }
        let row = q
            .bind(adopter.traits.space_requirement().as_str())
            .bind(adopter.preferred_size.map(|s| s.as_str()))
            .fetch_one(&self.pool)
            .await?;

        let id: i64 = row.try_get("id")?;
        let created_at = row.try_get("created_at")?;

        tracing::debug!("Stored adopter profile {} for {}", id, adopter.email);

        Ok(AdopterProfile::from_new(id, adopter, created_at))
    }

    async fn fetch(&self, id: i64) -> std::result::Result<Option<AdopterProfile>, PostgresError> {
        let query = format!(
            r#"
            SELECT id, name, contact_info, email, {}, preferred_size, created_at
            FROM adopter_profiles
            WHERE id = $1
            "#,
            TRAIT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| profile_from_row(&r)).transpose()
    }

    /// Health check for the database connection
    pub async fn ping(&self) -> std::result::Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn profile_from_row(row: &PgRow) -> std::result::Result<AdopterProfile, PostgresError> {
    let mut ordinals = [0u8; OrdinalTrait::COUNT];
    for t in OrdinalTrait::ALL {
        let value: i16 = row.try_get(t.as_str())?;
        ordinals[t.index()] = u8::try_from(value)
            .map_err(|_| MatchError::out_of_range(t.as_str(), value))?;
    }

    let space: String = row.try_get("space_requirement")?;
    let preferred_size: Option<String> = row.try_get("preferred_size")?;

    Ok(AdopterProfile {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        contact_info: row.try_get("contact_info")?,
        email: row.try_get("email")?,
        traits: TraitVector::new(ordinals, space.parse()?)?,
        preferred_size: preferred_size
            .map(|s| SpaceRequirement::parse_field("preferred_size", &s))
            .transpose()?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl AdopterRepository for PostgresAdopterStore {
    async fn create_adopter(&self, adopter: NewAdopter) -> Result<AdopterProfile> {
        Ok(self.insert(adopter).await?)
    }

    async fn get_adopter(&self, id: i64) -> Result<Option<AdopterProfile>> {
        Ok(self.fetch(id).await?)
    }

    async fn health_check(&self) -> bool {
        self.ping().await.unwrap_or(false)
    }
}
