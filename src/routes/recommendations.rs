use crate::core::Recommender;
use crate::models::{
    ChartEntry, ChartResponse, ErrorResponse, HealthResponse, RecommendRequest,
    RecommendResponse, RecommendationQuery, UploadResponse,
};
use crate::services::{
    export_file_name, load_inventory, write_recommendations_csv, SessionStore,
};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Application state shared across all handlers
///
/// The session store is the only shared mutable piece; tables and filter
/// state inside it are per-session.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub recommender: Recommender,
    pub chart_top_n: usize,
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/inventory", web::post().to(upload_inventory))
        .route(
            "/sessions/{id}/recommendations",
            web::post().to(recommend),
        )
        .route("/sessions/{id}/chart", web::get().to(top_chart))
        .route("/sessions/{id}/export", web::get().to(export_csv));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    tracing::trace!("Health check ({} active sessions)", state.sessions.session_count());

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Upload an inventory CSV and open a session for it
///
/// POST /api/v1/inventory
///
/// Body: raw CSV bytes with at least the required inventory columns.
async fn upload_inventory(state: web::Data<AppState>, body: web::Bytes) -> impl Responder {
    let records = match load_inventory(&body[..]) {
        Ok(records) => records,
        Err(e) => {
            tracing::info!("Rejected inventory upload: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "invalid_inventory".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    let session = state.sessions.create(records);

    tracing::info!(
        "Loaded inventory into session {} ({} records)",
        session.id,
        session.records().len()
    );

    HttpResponse::Ok().json(UploadResponse {
        session_id: session.id,
        record_count: session.records().len(),
    })
}

/// Compute recommendations for a session
///
/// POST /api/v1/sessions/{id}/recommendations
///
/// Request body:
/// ```json
/// {
///   "location": "Jalan Perda Utama",
///   "labels": ["Highly Suitable"],
///   "minStability": 0.0,
///   "minEnvironmental": 0.0,
///   "minHealth": 0.0
/// }
/// ```
///
/// Stores the filters on the session so chart and export derive from the
/// same state. Zero matches is a 200 with an empty list, never an error.
async fn recommend(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let session_id = path.into_inner();
    let session = match state.sessions.get(&session_id) {
        Ok(session) => session,
        Err(e) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Session not found".to_string(),
                message: e.to_string(),
                status_code: 404,
            });
        }
    };

    let query: RecommendationQuery = req.into_inner().into();
    if let Err(e) = session.set_filters(query.clone()) {
        tracing::error!("Failed to store filters on session {}: {}", session_id, e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Failed to store filters".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }

    let result = state.recommender.recommend(session.records(), &query);

    tracing::info!(
        "Session {}: {} recommendations for '{}' ({} location matches of {} records)",
        session_id,
        result.trees.len(),
        query.location,
        result.location_matches,
        result.total_records
    );

    HttpResponse::Ok().json(RecommendResponse {
        trees: result.trees,
        location_matches: result.location_matches,
        total_records: result.total_records,
    })
}

/// Top-N chart data for a session's current recommendations
///
/// GET /api/v1/sessions/{id}/chart
///
/// Returns the best trees by suitability score, keyed on scientific name,
/// derived from the filters the session last applied.
async fn top_chart(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let session_id = path.into_inner();
    let session = match state.sessions.get(&session_id) {
        Ok(session) => session,
        Err(e) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Session not found".to_string(),
                message: e.to_string(),
                status_code: 404,
            });
        }
    };

    let query = match session.filters() {
        Ok(query) => query,
        Err(e) => {
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to read filters".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let result = state.recommender.recommend(session.records(), &query);

    // The result is already ranked; the chart is just its head
    let entries: Vec<ChartEntry> = result
        .trees
        .iter()
        .take(state.chart_top_n)
        .map(|tree| ChartEntry {
            scientific_name: tree.scientific_name.clone(),
            suitability_score: tree.suitability_score,
        })
        .collect();

    HttpResponse::Ok().json(ChartResponse { entries })
}

/// Download a session's current recommendations as CSV
///
/// GET /api/v1/sessions/{id}/export
async fn export_csv(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let session_id = path.into_inner();
    let session = match state.sessions.get(&session_id) {
        Ok(session) => session,
        Err(e) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Session not found".to_string(),
                message: e.to_string(),
                status_code: 404,
            });
        }
    };

    let query = match session.filters() {
        Ok(query) => query,
        Err(e) => {
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to read filters".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let result = state.recommender.recommend(session.records(), &query);

    let bytes = match write_recommendations_csv(&result.trees) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Failed to serialize export for session {}: {}", session_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to serialize export".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let file_name = export_file_name(&query.location);

    tracing::info!(
        "Session {}: exporting {} trees as {}",
        session_id,
        result.trees.len(),
        file_name
    );

    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", file_name),
        ))
        .body(bytes)
}
