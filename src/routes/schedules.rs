use actix_web::{web, HttpResponse, Responder};

use crate::models::{GenerateQuery, HealthResponse, MatchRequest, ScheduleResponse};
use crate::routes::{request_rng, roster_error, AppState};

/// Configure health and scheduling routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/schedules/generate", web::post().to(generate_schedules))
        .route("/schedules/match", web::post().to(match_schedules))
        .route("/schedule-options", web::get().to(list_schedule_options))
        .route("/schedule-options", web::delete().to(clear_schedule_options))
        .route("/schedule-options/{id}", web::get().to(get_schedule_option));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Generate schedule options from the stored roster
///
/// POST /api/v1/schedules/generate?seed=42
///
/// Replaces any previously stored options. `seed` pins the balanced
/// option's shuffle; without it every call may return a different option 2.
async fn generate_schedules(state: web::Data<AppState>, query: web::Query<GenerateQuery>) -> impl Responder {
    let (caregivers, clients) = state.roster.snapshot().await;

    if caregivers.is_empty() || clients.is_empty() {
        tracing::warn!(
            "Generating schedules with {} caregivers and {} clients; options will be empty",
            caregivers.len(),
            clients.len()
        );
    }

    let mut rng = request_rng(query.seed);
    let result = state.matcher.schedule(&caregivers, &clients, &mut rng);

    state.roster.replace_schedule_options(result.options.clone()).await;

    tracing::info!(
        "Generated {} schedule options with {} total matches",
        result.options.len(),
        result.total_matches
    );

    HttpResponse::Ok().json(ScheduleResponse {
        options: result.options,
        total_matches: result.total_matches,
    })
}

/// Match a roster supplied in the request body
///
/// POST /api/v1/schedules/match
///
/// Request body:
/// ```json
/// {
///   "caregivers": [ { "id": "cg-1", "name": "...", "address": "...", "weeklySchedule": [] } ],
///   "clients": [ { "id": "cl-1", "name": "...", "address": "...", "weeklySchedule": [] } ],
///   "seed": 42
/// }
/// ```
///
/// Nothing is stored.
async fn match_schedules(state: web::Data<AppState>, req: web::Json<MatchRequest>) -> impl Responder {
    let req = req.into_inner();

    tracing::info!(
        "Matching {} caregivers against {} clients",
        req.caregivers.len(),
        req.clients.len()
    );

    let mut rng = request_rng(req.seed);
    let result = state.matcher.schedule(&req.caregivers, &req.clients, &mut rng);

    HttpResponse::Ok().json(ScheduleResponse {
        options: result.options,
        total_matches: result.total_matches,
    })
}

async fn list_schedule_options(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.roster.list_schedule_options().await)
}

async fn get_schedule_option(state: web::Data<AppState>, path: web::Path<u64>) -> impl Responder {
    match state.roster.get_schedule_option(path.into_inner()).await {
        Ok(option) => HttpResponse::Ok().json(option),
        Err(e) => roster_error(e),
    }
}

async fn clear_schedule_options(state: web::Data<AppState>) -> impl Responder {
    state.roster.clear_schedule_options().await;
    HttpResponse::NoContent().finish()
}
