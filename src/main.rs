use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use pet_match::config::Settings;
use pet_match::routes::{self, AppState};
use pet_match::services::{
    AdopterRepository, InMemoryAdopterStore, MatchService, PetBackendClient, PostgresAdopterStore,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_tracing(&settings.logging.level, &settings.logging.format);

    info!("Starting pet matching service...");

    // Adopter store: PostgreSQL when configured, memory otherwise
    let adopters: Arc<dyn AdopterRepository> = match &settings.database.url {
        Some(url) => {
            let max_conn = settings.database.max_connections.unwrap_or(10);
            let store = PostgresAdopterStore::new(
                url,
                max_conn,
                settings.database.min_connections.unwrap_or(1),
                Duration::from_secs(settings.database.acquire_timeout_secs.unwrap_or(5)),
            )
            .await
            .map_err(|e| startup_error("Failed to connect to PostgreSQL", e))?;

            info!("PostgreSQL adopter store initialized (max: {} connections)", max_conn);
            Arc::new(store)
        }
        None => {
            warn!("No database configured, adopter profiles are kept in memory");
            Arc::new(InMemoryAdopterStore::new())
        }
    };

    let pets = PetBackendClient::new(
        settings.pet_backend.endpoint.clone(),
        settings.pet_backend.api_token.clone(),
        Duration::from_secs(settings.pet_backend.timeout_secs),
        settings.pet_backend.max_pages,
    )
    .map_err(|e| startup_error("Failed to build pet backend client", e))?;

    info!("Pet backend client initialized ({})", settings.pet_backend.endpoint);

    let matcher = settings
        .build_matcher()
        .map_err(|e| startup_error("Invalid scoring configuration", e))?;

    info!(
        "Matcher initialized (top >= {}, other >= {}, {} space override(s))",
        matcher.thresholds().top(),
        matcher.thresholds().min(),
        settings.scoring.space_overrides.len()
    );

    let app_state = AppState {
        service: MatchService::new(adopters, Arc::new(pets), matcher)
            .with_include_adopted(settings.matching.include_adopted),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
