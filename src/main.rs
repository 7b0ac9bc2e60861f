use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use mentor_match::config::Settings;
use mentor_match::core::Ranker;
use mentor_match::routes::{self, AppState};
use mentor_match::services::{predictor_from_settings, EventCatalog};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    // Initialize logging; RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }

    info!("Starting Mentor Match scoring service...");
    info!("Configuration loaded successfully");

    // Load the predictor once; failures are logged by the loader and leave
    // the service on fallback scoring
    let predictor = predictor_from_settings(&settings.model);
    let ranker = Ranker::with_predictor(predictor);

    info!("Ranker initialized ({})", ranker.scorer().predictor().describe());

    // Build application state
    let app_state = AppState::new(ranker, EventCatalog::new(settings.events.clone()));

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
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
