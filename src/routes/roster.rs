use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{CreateCaregiverRequest, CreateClientRequest, UpdateCaregiverRequest, UpdateClientRequest};
use crate::routes::{roster_error, validation_failed, AppState};

/// Configure caregiver and client CRUD routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/caregivers", web::get().to(list_caregivers))
        .route("/caregivers", web::post().to(create_caregiver))
        .route("/caregivers/{id}", web::get().to(get_caregiver))
        .route("/caregivers/{id}", web::put().to(update_caregiver))
        .route("/caregivers/{id}", web::delete().to(delete_caregiver))
        .route("/clients", web::get().to(list_clients))
        .route("/clients", web::post().to(create_client))
        .route("/clients/{id}", web::get().to(get_client))
        .route("/clients/{id}", web::put().to(update_client))
        .route("/clients/{id}", web::delete().to(delete_client));
}

async fn list_caregivers(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.roster.list_caregivers().await)
}

async fn get_caregiver(state: web::Data<AppState>, path: web::Path<u64>) -> impl Responder {
    match state.roster.get_caregiver(path.into_inner()).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => roster_error(e),
    }
}

/// POST /api/v1/caregivers
async fn create_caregiver(state: web::Data<AppState>, req: web::Json<CreateCaregiverRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_caregiver request: {:?}", errors);
        return validation_failed(errors);
    }

    let record = state.roster.create_caregiver(req.into_inner()).await;
    tracing::info!("Created caregiver {}", record.caregiver.id);

    HttpResponse::Created().json(record)
}

/// PUT /api/v1/caregivers/{id}, partial update
async fn update_caregiver(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    req: web::Json<UpdateCaregiverRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.roster.update_caregiver(path.into_inner(), req.into_inner()).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => roster_error(e),
    }
}

async fn delete_caregiver(state: web::Data<AppState>, path: web::Path<u64>) -> impl Responder {
    match state.roster.delete_caregiver(path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => roster_error(e),
    }
}

async fn list_clients(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.roster.list_clients().await)
}

async fn get_client(state: web::Data<AppState>, path: web::Path<u64>) -> impl Responder {
    match state.roster.get_client(path.into_inner()).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => roster_error(e),
    }
}

/// POST /api/v1/clients
async fn create_client(state: web::Data<AppState>, req: web::Json<CreateClientRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_client request: {:?}", errors);
        return validation_failed(errors);
    }

    let record = state.roster.create_client(req.into_inner()).await;
    tracing::info!("Created client {}", record.client.id);

    HttpResponse::Created().json(record)
}

/// PUT /api/v1/clients/{id}, partial update
async fn update_client(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    req: web::Json<UpdateClientRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.roster.update_client(path.into_inner(), req.into_inner()).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => roster_error(e),
    }
}

async fn delete_client(state: web::Data<AppState>, path: web::Path<u64>) -> impl Responder {
    match state.roster.delete_client(path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => roster_error(e),
    }
}
