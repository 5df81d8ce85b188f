mod config;
mod core;
mod models;
mod routes;
mod services;

use crate::config::Settings;
use crate::core::Recommender;
use crate::models::{ClassifierThresholds, SuitabilityBand};
use crate::routes::recommendations::AppState;
use crate::services::SessionStore;
use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing::{error, info};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Arbor Algo recommendation service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize recommender with configured thresholds
    let thresholds = ClassifierThresholds {
        highly: SuitabilityBand {
            min_suitability: settings.classifier.highly.min_suitability,
            min_environmental: settings.classifier.highly.min_environmental,
            min_health: settings.classifier.highly.min_health,
            max_canopy: settings.classifier.highly.max_canopy,
            min_stability: settings.classifier.highly.min_stability,
        },
        moderately: SuitabilityBand {
            min_suitability: settings.classifier.moderately.min_suitability,
            min_environmental: settings.classifier.moderately.min_environmental,
            min_health: settings.classifier.moderately.min_health,
            max_canopy: settings.classifier.moderately.max_canopy,
            min_stability: settings.classifier.moderately.min_stability,
        },
    };

    let recommender = Recommender::new(thresholds);

    info!("Recommender initialized with thresholds: {:?}", thresholds);

    // Initialize session store
    let session_capacity = settings.session.capacity.unwrap_or(256);
    let session_ttl = settings.session.idle_ttl_secs.unwrap_or(3600);

    let sessions = Arc::new(SessionStore::new(session_capacity, session_ttl));

    info!(
        "Session store initialized (capacity: {}, idle TTL: {}s)",
        session_capacity, session_ttl
    );

    let chart_top_n = settings.recommendation.chart_top_n.unwrap_or(10);

    // Build application state
    let app_state = AppState {
        sessions,
        recommender,
        chart_top_n,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
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
