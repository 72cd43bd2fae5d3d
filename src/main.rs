use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use care_scheduler::config::{LoggingSettings, Settings};
use care_scheduler::core::{Matcher, RandomDistance};
use care_scheduler::routes::{self, AppState};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            // Logging is not up yet
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting care scheduler service...");

    if settings.distance.max_random_distance <= 0.0 {
        warn!(
            "distance.max_random_distance is {}, every pair will score as zero distance",
            settings.distance.max_random_distance
        );
    }

    let matching_options = settings.matching.options();
    let matcher = Matcher::new(
        Arc::new(RandomDistance::new(settings.distance.max_random_distance)),
        matching_options,
    );

    info!("Matcher initialized with options: {:?}", matching_options);

    let app_state = AppState::new(matcher);

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(routes::configure_extractors)
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
